//! # Column (Isolated) Footing Design
//!
//! Sizes an isolated pad footing under a square column: plan dimensions
//! from net allowable soil pressure (square, or rectangular under a width
//! restriction), thickness from two-way (punching) shear at the `d/2`
//! perimeter and one-way (beam) shear at `d` from the column face, then
//! flexural steel in each principal direction.
//!
//! ## Assumptions
//!
//! - Square column of width `column_width_in`
//! - Loads are total service kips on the column
//! - Concrete cast against earth (3 in clear cover)
//! - Two-way bottom mat (effective depth allows a full bar diameter)
//! - Gravity loads only (U = 1.2D + 1.6L governs)
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "CF-1",
//!   "column_width_in": 18.0,
//!   "location": "interior",
//!   "max_width_ft": null,
//!   "loads": { "dead": 50.0, "live": 40.0 },
//!   "f_c_psi": 4000.0,
//!   "grade": 60,
//!   "concrete_type": "nw",
//!   "concrete_unit_weight_pcf": 150.0,
//!   "soil": {
//!     "gross_allowable_psf": 4000.0,
//!     "unit_weight_pcf": 100.0,
//!     "depth_to_bottom_ft": 4.0
//!   },
//!   "precision_ft": 0.08333333333
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::MAX_THICKNESS_ADJUSTMENTS;
use crate::errors::{DesignError, DesignResult};
use crate::flexure::{self, FlexuralSolution, SteelGovernance};
use crate::loads::ServiceLoads;
use crate::materials::{ConcreteType, MaterialModel, SteelGrade};
use crate::narrative::Narrative;
use crate::section::{
    round_up_to_precision, FootingKind, SectionGeometry, DEFAULT_BAR_SIZE,
};
use crate::soil::{factored_bearing_pressure, SoilProfile};

/// Column position in the slab, which sets the alpha_s term of the third
/// punching-shear capacity candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLocation {
    Interior,
    Edge,
    Corner,
}

impl ColumnLocation {
    /// alpha_s per ACI 22.6.5.2(c): 40 interior, 30 edge, 20 corner.
    pub fn alpha_s(&self) -> f64 {
        match self {
            ColumnLocation::Interior => 40.0,
            ColumnLocation::Edge => 30.0,
            ColumnLocation::Corner => 20.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColumnLocation::Interior => "interior",
            ColumnLocation::Edge => "edge",
            ColumnLocation::Corner => "corner",
        }
    }

    /// Parse a wire label; anything else is an `InvalidCategory` error.
    pub fn from_label(label: &str) -> DesignResult<Self> {
        match label.trim() {
            "interior" => Ok(ColumnLocation::Interior),
            "edge" => Ok(ColumnLocation::Edge),
            "corner" => Ok(ColumnLocation::Corner),
            other => Err(DesignError::invalid_category(
                "col_loc",
                other,
                "interior, edge, corner",
            )),
        }
    }
}

impl Default for ColumnLocation {
    fn default() -> Self {
        ColumnLocation::Interior
    }
}

/// Input parameters for a column footing design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFootingInput {
    /// User label for this footing (e.g., "CF-1")
    pub label: String,

    /// Column width (in); the column is assumed square
    pub column_width_in: f64,

    /// Column position (interior / edge / corner)
    #[serde(default)]
    pub location: ColumnLocation,

    /// Optional plan-width restriction (ft); forces a rectangular footing
    #[serde(default)]
    pub max_width_ft: Option<f64>,

    /// Total service loads on the column (k)
    pub loads: ServiceLoads,

    /// Specified concrete compressive strength (psi)
    pub f_c_psi: f64,

    /// Reinforcing-steel grade
    pub grade: SteelGrade,

    /// Concrete density classification
    #[serde(default)]
    pub concrete_type: ConcreteType,

    /// Concrete unit weight (pcf)
    pub concrete_unit_weight_pcf: f64,

    /// Bearing conditions
    pub soil: SoilProfile,

    /// Plan-dimension rounding increment (ft)
    pub precision_ft: f64,

    /// Assumed bar designation (/8 in) for the effective-depth allowance
    #[serde(default = "default_bar_size")]
    pub bar_size: u32,
}

fn default_bar_size() -> u32 {
    DEFAULT_BAR_SIZE
}

impl ColumnFootingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> DesignResult<()> {
        if self.column_width_in <= 0.0 {
            return Err(DesignError::invalid_input(
                "column_width_in",
                self.column_width_in.to_string(),
                "Column width must be positive",
            ));
        }
        if self.loads.dead < 0.0 || self.loads.live < 0.0 {
            return Err(DesignError::invalid_input(
                "loads",
                format!("D = {}, L = {}", self.loads.dead, self.loads.live),
                "Service loads cannot be negative",
            ));
        }
        if self.loads.total() <= 0.0 {
            return Err(DesignError::invalid_input(
                "loads",
                self.loads.total().to_string(),
                "Total service load must be positive",
            ));
        }
        if self.f_c_psi <= 0.0 {
            return Err(DesignError::invalid_input(
                "f_c_psi",
                self.f_c_psi.to_string(),
                "Concrete strength must be positive",
            ));
        }
        if self.soil.gross_allowable_psf <= 0.0 {
            return Err(DesignError::invalid_input(
                "soil.gross_allowable_psf",
                self.soil.gross_allowable_psf.to_string(),
                "Allowable soil pressure must be positive",
            ));
        }
        if let Some(max_width_ft) = self.max_width_ft {
            if max_width_ft <= 0.0 {
                return Err(DesignError::invalid_input(
                    "max_width_ft",
                    max_width_ft.to_string(),
                    "Width restriction must be positive",
                ));
            }
        }
        if self.precision_ft <= 0.0 {
            return Err(DesignError::invalid_input(
                "precision_ft",
                self.precision_ft.to_string(),
                "Rounding precision must be positive",
            ));
        }
        Ok(())
    }
}

/// Results from a column footing design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFootingResult {
    /// User label, copied from the input
    pub label: String,

    /// Plan length (ft) - the unrestricted dimension
    pub length_ft: f64,

    /// Plan width (ft) - equals the restriction when one was given
    pub width_ft: f64,

    /// Final footing thickness (ft)
    pub thickness_ft: f64,

    /// Governing steel area parallel to the length (sq in)
    pub steel_long_sqin: f64,

    /// Governing steel area parallel to the width (sq in)
    pub steel_short_sqin: f64,

    /// Net allowable soil pressure at the initial thickness (ksf)
    pub net_allowable_ksf: f64,

    /// Factored bearing pressure q_u (ksf)
    pub factored_pressure_ksf: f64,

    /// Final effective depth (in)
    pub effective_depth_in: f64,

    /// Two-way shear demand at the final section (k)
    pub punching_demand_kips: f64,

    /// Two-way shear capacity at the final section (k)
    pub punching_capacity_kips: f64,

    /// One-way shear demand at the final section (k)
    pub beam_shear_demand_kips: f64,

    /// One-way shear capacity at the final section (k)
    pub beam_shear_capacity_kips: f64,

    /// Flexural solve in the length direction
    pub flexure_long: FlexuralSolution,

    /// Flexural solve in the width direction
    pub flexure_short: FlexuralSolution,

    /// Minimum-reinforcement governance, length direction
    pub steel_governance_long: SteelGovernance,

    /// Minimum-reinforcement governance, width direction
    pub steel_governance_short: SteelGovernance,
}

impl ColumnFootingResult {
    /// Whether the plan came out square.
    pub fn is_square(&self) -> bool {
        self.length_ft == self.width_ft
    }

    /// Bearing area (sq ft).
    pub fn bearing_area_sqft(&self) -> f64 {
        self.length_ft * self.width_ft
    }

    /// The resolved section carries both shear demands.
    pub fn shear_ok(&self) -> bool {
        self.punching_capacity_kips >= self.punching_demand_kips
            && self.beam_shear_capacity_kips >= self.beam_shear_demand_kips
    }
}

impl fmt::Display for ColumnFootingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: column footing {:.2} x {:.2} ft, h = {:.2} ft, As = {:.2} / {:.2} in^2",
            self.label,
            self.length_ft,
            self.width_ft,
            self.thickness_ft,
            self.steel_long_sqin,
            self.steel_short_sqin
        )
    }
}

/// Design a column footing.
///
/// Phases run in order: size the plan against net allowable pressure,
/// settle the thickness through the punching-shear then beam-shear checks
/// (beam-shear thinning never drops below what punching needs), then solve
/// and govern the flexural steel in each direction.
pub fn design(
    input: &ColumnFootingInput,
    log: &mut dyn Narrative,
) -> DesignResult<ColumnFootingResult> {
    input.validate()?;

    let material = MaterialModel::new(
        input.f_c_psi,
        input.concrete_unit_weight_pcf,
        input.concrete_type,
        input.grade,
        log,
    );
    let mut section = SectionGeometry::new(FootingKind::Column, input.bar_size);

    // --- Size the plan ---
    let net_allowable_ksf = input
        .soil
        .net_allowable_ksf(material.unit_weight_pcf, section.thickness_ft());
    log.note(&format!(
        "Net allowable soil pressure = {:.3} ksf",
        net_allowable_ksf
    ));
    if net_allowable_ksf <= 0.0 {
        return Err(DesignError::InsufficientBearingCapacity { net_allowable_ksf });
    }

    let required_area_sqft = input.loads.total() / net_allowable_ksf;
    let (length_ft, width_ft) = match input.max_width_ft {
        Some(max_width_ft) => {
            let length_ft =
                round_up_to_precision(required_area_sqft / max_width_ft, input.precision_ft);
            log.note(&format!(
                "Required area = {:.3} sq ft with width capped at {:.2} ft: {:.3} x {:.2} ft",
                required_area_sqft, max_width_ft, length_ft, max_width_ft
            ));
            (length_ft, max_width_ft)
        }
        None => {
            let side_ft =
                round_up_to_precision(required_area_sqft.sqrt(), input.precision_ft);
            log.note(&format!(
                "Required area = {:.3} sq ft: square {:.3} x {:.3} ft",
                required_area_sqft, side_ft, side_ft
            ));
            (side_ft, side_ft)
        }
    };
    let area_sqft = length_ft * width_ft;

    let q_u = factored_bearing_pressure(&input.loads, area_sqft);
    log.note(&format!(
        "Factored pressure q_u = {:.3} ksf ({})",
        q_u,
        ServiceLoads::combination_equation()
    ));

    // --- Two-way (punching) shear at the d/2 perimeter ---
    adjust_for_punching_shear(
        &mut section,
        &material,
        q_u,
        area_sqft,
        input.column_width_in,
        input.location,
        log,
    )?;

    // --- One-way (beam) shear at d from the column face ---
    adjust_for_beam_shear(
        &mut section,
        &material,
        q_u,
        area_sqft,
        length_ft,
        width_ft,
        input.column_width_in,
        input.location,
        input.precision_ft,
        log,
    )?;

    // Record both checks at the section as finally resolved.
    let depth_in = section.effective_depth_in();
    let punching_demand_kips = punching_demand(q_u, area_sqft, input.column_width_in, depth_in);
    let punching_capacity_kips =
        punching_capacity(&material, input.column_width_in, depth_in, input.location);
    let beam_shear_demand_kips =
        beam_shear_demand(q_u, length_ft, width_ft, input.column_width_in, depth_in);
    let beam_shear_capacity_kips = beam_shear_capacity(&material, width_ft, depth_in);

    // --- Flexural steel, length direction ---
    let (flexure_long, steel_governance_long) = solve_direction_steel(
        &material,
        &section,
        q_u,
        length_ft,
        width_ft,
        input.column_width_in,
        "length",
        log,
    )?;

    // --- Flexural steel, width direction (mirrors on a square plan) ---
    let (flexure_short, steel_governance_short) = if length_ft == width_ft {
        log.note("Square plan: width-direction steel mirrors the length direction");
        (flexure_long, steel_governance_long)
    } else {
        solve_direction_steel(
            &material,
            &section,
            q_u,
            width_ft,
            length_ft,
            input.column_width_in,
            "width",
            log,
        )?
    };

    Ok(ColumnFootingResult {
        label: input.label.clone(),
        length_ft,
        width_ft,
        thickness_ft: section.thickness_ft(),
        steel_long_sqin: steel_governance_long.governing_sqin,
        steel_short_sqin: steel_governance_short.governing_sqin,
        net_allowable_ksf,
        factored_pressure_ksf: q_u,
        effective_depth_in: depth_in,
        punching_demand_kips,
        punching_capacity_kips,
        beam_shear_demand_kips,
        beam_shear_capacity_kips,
        flexure_long,
        flexure_short,
        steel_governance_long,
        steel_governance_short,
    })
}

/// Two-way shear demand: factored pressure outside the critical perimeter.
fn punching_demand(q_u: f64, area_sqft: f64, column_width_in: f64, depth_in: f64) -> f64 {
    q_u * (area_sqft - ((column_width_in + depth_in) / 12.0).powi(2))
}

/// Two-way shear capacity: 0.75 times the least of the three code
/// candidates on the b_0 perimeter (square column).
fn punching_capacity(
    material: &MaterialModel,
    column_width_in: f64,
    depth_in: f64,
    location: ColumnLocation,
) -> f64 {
    let b_0 = 4.0 * (column_width_in + depth_in);
    let base = material.lambda * material.sqrt_f_c() * b_0 * depth_in / 1000.0;
    let v_ca = 4.0 * base;
    let v_cb = 6.0 * base;
    let v_cc = (location.alpha_s() * depth_in / b_0 + 2.0) * base;
    0.75 * v_ca.min(v_cb).min(v_cc)
}

/// One-way shear demand across the full width at `d` from the column face.
fn beam_shear_demand(
    q_u: f64,
    length_ft: f64,
    width_ft: f64,
    column_width_in: f64,
    depth_in: f64,
) -> f64 {
    q_u * width_ft * ((length_ft - column_width_in / 12.0) / 2.0 - depth_in / 12.0)
}

/// One-way shear capacity across the full width.
fn beam_shear_capacity(material: &MaterialModel, width_ft: f64, depth_in: f64) -> f64 {
    0.75 * 2.0 * material.lambda * material.sqrt_f_c() * width_ft * 12.0 * depth_in / 1000.0
}

/// Walk the thickness in 1-inch steps until punching capacity sits between
/// 1.0x and 1.5x demand. The search is purely incremental in both
/// directions; a section that keeps bouncing between the bounds trips the
/// iteration cap.
fn adjust_for_punching_shear(
    section: &mut SectionGeometry,
    material: &MaterialModel,
    q_u: f64,
    area_sqft: f64,
    column_width_in: f64,
    location: ColumnLocation,
    log: &mut dyn Narrative,
) -> DesignResult<()> {
    let mut iterations = 0u32;
    loop {
        let depth_in = section.effective_depth_in();
        let demand = punching_demand(q_u, area_sqft, column_width_in, depth_in);
        let capacity = punching_capacity(material, column_width_in, depth_in, location);

        let step_in = if capacity < demand {
            1.0
        } else if capacity >= 1.5 * demand {
            -1.0
        } else {
            log.note(&format!(
                "Two-way shear settled: V_u = {:.2} k <= phi*V_n = {:.2} k at h = {:.3} ft",
                demand,
                capacity,
                section.thickness_ft()
            ));
            return Ok(());
        };

        iterations += 1;
        if iterations > MAX_THICKNESS_ADJUSTMENTS {
            return Err(DesignError::non_convergent("two-way shear", iterations));
        }
        section.step_thickness_in(step_in);
        log.note(&format!(
            "Two-way shear {}: h = {:.3} ft (V_u = {:.2} k, phi*V_n = {:.2} k)",
            if step_in > 0.0 {
                "under-designed, thickening"
            } else {
                "over-designed, thinning"
            },
            section.thickness_ft(),
            demand,
            capacity
        ));
    }
}

/// One-way shear adjustment, same two branches as the wall footing:
/// thin by 1-inch steps while over-designed, then one direct solve for `d`
/// if under-designed. Thinning stops early rather than drop the section
/// below what the already-settled punching check needs.
#[allow(clippy::too_many_arguments)]
fn adjust_for_beam_shear(
    section: &mut SectionGeometry,
    material: &MaterialModel,
    q_u: f64,
    area_sqft: f64,
    length_ft: f64,
    width_ft: f64,
    column_width_in: f64,
    location: ColumnLocation,
    precision_ft: f64,
    log: &mut dyn Narrative,
) -> DesignResult<()> {
    let mut demand =
        beam_shear_demand(q_u, length_ft, width_ft, column_width_in, section.effective_depth_in());
    let mut capacity = beam_shear_capacity(material, width_ft, section.effective_depth_in());

    let mut iterations = 0u32;
    while capacity >= 1.5 * demand {
        iterations += 1;
        if iterations > MAX_THICKNESS_ADJUSTMENTS {
            return Err(DesignError::non_convergent("one-way shear", iterations));
        }

        let thinner_depth_in = section.effective_depth_in() - 1.0;
        let punching_ok = punching_capacity(material, column_width_in, thinner_depth_in, location)
            >= punching_demand(q_u, area_sqft, column_width_in, thinner_depth_in);
        if !punching_ok {
            log.note("One-way shear over-designed but two-way shear governs the thickness");
            break;
        }

        section.step_thickness_in(-1.0);
        demand = beam_shear_demand(
            q_u,
            length_ft,
            width_ft,
            column_width_in,
            section.effective_depth_in(),
        );
        capacity = beam_shear_capacity(material, width_ft, section.effective_depth_in());
        log.note(&format!(
            "One-way shear over-designed: h = {:.3} ft, V_u = {:.2} k, phi*V_n = {:.2} k",
            section.thickness_ft(),
            demand,
            capacity
        ));
    }

    if capacity < demand {
        let depth_required_in = round_up_to_precision(
            demand * 1000.0
                / (0.75 * 2.0 * material.lambda * material.sqrt_f_c() * width_ft * 12.0),
            precision_ft,
        );
        section.set_effective_depth_in(depth_required_in);
        demand = beam_shear_demand(
            q_u,
            length_ft,
            width_ft,
            column_width_in,
            section.effective_depth_in(),
        );
        capacity = beam_shear_capacity(material, width_ft, section.effective_depth_in());
        log.note(&format!(
            "One-way shear under-designed: set d = {:.2} in, h = {:.3} ft, phi*V_n = {:.2} k",
            depth_required_in,
            section.thickness_ft(),
            capacity
        ));
    }

    log.note(&format!(
        "One-way shear settled: V_u = {:.2} k <= phi*V_n = {:.2} k at h = {:.3} ft",
        demand,
        capacity,
        section.thickness_ft()
    ));
    Ok(())
}

/// Flexure for one principal direction: cantilever from the column face to
/// the `span_ft` edge, distributed across the `band_ft` dimension.
#[allow(clippy::too_many_arguments)]
fn solve_direction_steel(
    material: &MaterialModel,
    section: &SectionGeometry,
    q_u: f64,
    span_ft: f64,
    band_ft: f64,
    column_width_in: f64,
    direction: &str,
    log: &mut dyn Narrative,
) -> DesignResult<(FlexuralSolution, SteelGovernance)> {
    let arm_ft = (span_ft - column_width_in / 12.0) / 2.0;
    let moment_kipft = q_u * band_ft * arm_ft.powi(2) / 2.0;
    log.note(&format!(
        "{} direction: arm = {:.3} ft, M_u = {:.3} kip-ft",
        direction, arm_ft, moment_kipft
    ));

    let band_in = band_ft * 12.0;
    let depth_in = section.effective_depth_in();
    let solution = flexure::design_flexure(moment_kipft, band_in, depth_in, material, log)?;
    let required_sqin = flexure::required_steel_area(solution.rho, band_in, depth_in);
    let governance = flexure::minimum_reinforcement(
        band_in,
        depth_in,
        section.thickness_ft(),
        material,
        required_sqin,
    );
    log.note(&format!(
        "{} direction: As required = {:.3} in^2, beam min = {:.3}, slab min = {:.3}{} -> provide {:.3} in^2",
        direction,
        governance.required_sqin,
        governance.beam_minimum_sqin,
        governance.slab_minimum_sqin,
        if governance.four_thirds_applied {
            " (4/3 exception)"
        } else {
            ""
        },
        governance.governing_sqin
    ));
    Ok((solution, governance))
}
