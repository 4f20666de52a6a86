//! # Wall (Strip) Footing Design
//!
//! Sizes a continuous footing under a wall per the iterative procedure:
//! width from net allowable soil pressure, thickness from one-way shear at
//! the critical section `d` from the wall face, then flexural steel on a
//! per-foot-of-wall basis with minimum-reinforcement governance.
//!
//! ## Assumptions
//!
//! - Loads are kips per linear foot of wall
//! - Concrete cast against earth (3 in clear cover)
//! - Single bottom reinforcement layer (effective depth to bar centroid)
//! - Gravity loads only (U = 1.2D + 1.6L governs)
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "WF-1",
//!   "wall_width_in": 12.0,
//!   "wall_type": "concrete",
//!   "loads": { "dead": 10.0, "live": 8.0 },
//!   "f_c_psi": 3000.0,
//!   "grade": 60,
//!   "concrete_type": "nw",
//!   "concrete_unit_weight_pcf": 150.0,
//!   "soil": {
//!     "gross_allowable_psf": 3000.0,
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

/// Wall construction above the footing. Masonry shifts the flexural
/// critical section a quarter of the wall width inward from the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    Masonry,
    Concrete,
}

impl WallType {
    pub fn label(&self) -> &'static str {
        match self {
            WallType::Masonry => "masonry",
            WallType::Concrete => "concrete",
        }
    }

    /// Parse a wire label; anything else is an `InvalidCategory` error.
    pub fn from_label(label: &str) -> DesignResult<Self> {
        match label.trim() {
            "masonry" => Ok(WallType::Masonry),
            "concrete" => Ok(WallType::Concrete),
            other => Err(DesignError::invalid_category(
                "wall_type",
                other,
                "masonry, concrete",
            )),
        }
    }
}

/// Input parameters for a wall footing design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallFootingInput {
    /// User label for this footing (e.g., "WF-1")
    pub label: String,

    /// Wall thickness (in)
    pub wall_width_in: f64,

    /// Wall construction (masonry or concrete)
    pub wall_type: WallType,

    /// Service loads per foot of wall (k/ft)
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

impl WallFootingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> DesignResult<()> {
        if self.wall_width_in <= 0.0 {
            return Err(DesignError::invalid_input(
                "wall_width_in",
                self.wall_width_in.to_string(),
                "Wall width must be positive",
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

/// Results from a wall footing design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallFootingResult {
    /// User label, copied from the input
    pub label: String,

    /// Committed footing width (ft)
    pub width_ft: f64,

    /// Final footing thickness (ft)
    pub thickness_ft: f64,

    /// Governing steel area per foot of wall (sq in/ft)
    pub steel_sqin_per_ft: f64,

    /// Net allowable soil pressure at the initial thickness (ksf)
    pub net_allowable_ksf: f64,

    /// Factored bearing pressure q_u (ksf)
    pub factored_pressure_ksf: f64,

    /// Final effective depth (in)
    pub effective_depth_in: f64,

    /// One-way shear demand V_u at the final section (k per ft of wall)
    pub shear_demand_kips: f64,

    /// One-way shear capacity phi*V_n at the final section (k per ft)
    pub shear_capacity_kips: f64,

    /// Factored cantilever moment (kip-ft per ft of wall)
    pub design_moment_kipft: f64,

    /// Flexural solve outcome
    pub flexure: FlexuralSolution,

    /// Minimum-reinforcement governance
    pub steel: SteelGovernance,
}

impl WallFootingResult {
    /// The resolved section carries its shear demand.
    pub fn shear_ok(&self) -> bool {
        self.shear_capacity_kips >= self.shear_demand_kips
    }
}

impl fmt::Display for WallFootingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: wall footing B = {:.2} ft, h = {:.2} ft, As = {:.2} in^2/ft",
            self.label, self.width_ft, self.thickness_ft, self.steel_sqin_per_ft
        )
    }
}

/// Design a wall footing.
///
/// Phases run in order: size the width against net allowable pressure,
/// settle the thickness through the one-way shear check, compute the
/// cantilever moment at the wall-type-dependent critical section, then
/// solve and govern the flexural steel.
pub fn design(
    input: &WallFootingInput,
    log: &mut dyn Narrative,
) -> DesignResult<WallFootingResult> {
    input.validate()?;

    let material = MaterialModel::new(
        input.f_c_psi,
        input.concrete_unit_weight_pcf,
        input.concrete_type,
        input.grade,
        log,
    );
    let mut section = SectionGeometry::new(FootingKind::Wall, input.bar_size);

    // --- Size the width ---
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

    let required_width_ft = input.loads.total() / net_allowable_ksf;
    let width_ft = round_up_to_precision(required_width_ft, input.precision_ft);
    log.note(&format!(
        "Required width = {:.3} ft for D + L = {:.2} k/ft; use B = {:.3} ft",
        required_width_ft,
        input.loads.total(),
        width_ft
    ));

    let q_u = factored_bearing_pressure(&input.loads, width_ft);
    log.note(&format!(
        "Factored pressure q_u = {:.3} ksf ({})",
        q_u,
        ServiceLoads::combination_equation()
    ));

    // --- One-way shear at d from the wall face ---
    let (shear_demand_kips, shear_capacity_kips) = adjust_for_one_way_shear(
        &mut section,
        &material,
        q_u,
        width_ft,
        input.wall_width_in,
        input.precision_ft,
        log,
    )?;

    // --- Cantilever moment ---
    let projection_ft = (width_ft - input.wall_width_in / 12.0) / 2.0;
    let arm_ft = match input.wall_type {
        WallType::Masonry => projection_ft + 0.25 * input.wall_width_in / 12.0,
        WallType::Concrete => projection_ft,
    };
    let design_moment_kipft = q_u * arm_ft.powi(2) / 2.0;
    log.note(&format!(
        "{} wall: critical arm = {:.3} ft, M_u = {:.3} kip-ft/ft",
        input.wall_type.label(),
        arm_ft,
        design_moment_kipft
    ));

    // --- Flexural steel on a 12-in strip ---
    let depth_in = section.effective_depth_in();
    let flexure = flexure::design_flexure(design_moment_kipft, 12.0, depth_in, &material, log)?;
    let required_sqin = flexure::required_steel_area(flexure.rho, 12.0, depth_in);
    let steel = flexure::minimum_reinforcement(
        12.0,
        depth_in,
        section.thickness_ft(),
        &material,
        required_sqin,
    );
    log.note(&format!(
        "As required = {:.3} in^2/ft, beam min = {:.3}, slab min = {:.3}{} -> provide {:.3} in^2/ft",
        steel.required_sqin,
        steel.beam_minimum_sqin,
        steel.slab_minimum_sqin,
        if steel.four_thirds_applied {
            " (4/3 exception)"
        } else {
            ""
        },
        steel.governing_sqin
    ));

    Ok(WallFootingResult {
        label: input.label.clone(),
        width_ft,
        thickness_ft: section.thickness_ft(),
        steel_sqin_per_ft: steel.governing_sqin,
        net_allowable_ksf,
        factored_pressure_ksf: q_u,
        effective_depth_in: section.effective_depth_in(),
        shear_demand_kips,
        shear_capacity_kips,
        design_moment_kipft,
        flexure,
        steel,
    })
}

/// One-way shear demand per foot of wall: pressure on the cantilever
/// beyond the critical section at `d` from the wall face.
fn one_way_demand(q_u: f64, width_ft: f64, wall_width_in: f64, depth_in: f64) -> f64 {
    q_u * ((width_ft - wall_width_in / 12.0) / 2.0 - depth_in / 12.0)
}

/// One-way shear capacity per foot of wall: phi * 2*lambda*sqrt(f_c)*b*d
/// on a 12-in strip, in kips.
fn one_way_capacity(material: &MaterialModel, depth_in: f64) -> f64 {
    0.75 * 2.0 * material.lambda * material.sqrt_f_c() * 12.0 * depth_in / 1000.0
}

/// Walk the thickness until one-way shear capacity sits between 1.0x and
/// 1.5x demand: thin by 1-inch steps while over-designed, then one direct
/// solve for `d` if the section ends up under-designed.
fn adjust_for_one_way_shear(
    section: &mut SectionGeometry,
    material: &MaterialModel,
    q_u: f64,
    width_ft: f64,
    wall_width_in: f64,
    precision_ft: f64,
    log: &mut dyn Narrative,
) -> DesignResult<(f64, f64)> {
    let mut demand = one_way_demand(q_u, width_ft, wall_width_in, section.effective_depth_in());
    let mut capacity = one_way_capacity(material, section.effective_depth_in());

    let mut iterations = 0u32;
    while capacity >= 1.5 * demand {
        iterations += 1;
        if iterations > MAX_THICKNESS_ADJUSTMENTS {
            return Err(DesignError::non_convergent("one-way shear", iterations));
        }
        section.step_thickness_in(-1.0);
        demand = one_way_demand(q_u, width_ft, wall_width_in, section.effective_depth_in());
        capacity = one_way_capacity(material, section.effective_depth_in());
        log.note(&format!(
            "One-way shear over-designed: h = {:.3} ft, V_u = {:.2} k, phi*V_n = {:.2} k",
            section.thickness_ft(),
            demand,
            capacity
        ));
    }

    if capacity < demand {
        // Solve directly for the depth where capacity meets the current
        // demand; demand only shrinks as d grows, so one pass suffices.
        let depth_required_in = round_up_to_precision(
            demand * 1000.0 / (0.75 * 2.0 * material.lambda * material.sqrt_f_c() * 12.0),
            precision_ft,
        );
        section.set_effective_depth_in(depth_required_in);
        demand = one_way_demand(q_u, width_ft, wall_width_in, section.effective_depth_in());
        capacity = one_way_capacity(material, section.effective_depth_in());
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
    Ok((demand, capacity))
}
