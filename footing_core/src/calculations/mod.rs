//! # Footing Calculations
//!
//! The two footing design procedures and the batch-facing wire types.
//! Each calculation follows the pattern:
//!
//! - `*Input` - validated input parameters (JSON-serializable)
//! - `*Result` - design results (JSON-serializable)
//! - `design(input, narrative) -> Result<*Result, DesignError>` - pure
//!   design function
//!
//! [`FootingRequest`] is the raw record read from a batch file. Categorical
//! fields stay as plain strings/numbers there so that one malformed request
//! fails on its own during conversion instead of poisoning the whole batch
//! at parse time.

pub mod column_footing;
pub mod wall_footing;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use column_footing::{ColumnFootingInput, ColumnFootingResult, ColumnLocation};
pub use wall_footing::{WallFootingInput, WallFootingResult, WallType};

use crate::errors::{DesignError, DesignResult};
use crate::loads::ServiceLoads;
use crate::materials::{ConcreteType, SteelGrade};
use crate::narrative::Narrative;
use crate::section::{FootingKind, DEFAULT_BAR_SIZE};
use crate::soil::{SoilProfile, DEFAULT_DEPTH_TO_BOTTOM_FT, DEFAULT_SOIL_UNIT_WEIGHT_PCF};

/// Default concrete unit weight when a request leaves `w_c` blank (pcf).
pub const DEFAULT_CONCRETE_UNIT_WEIGHT_PCF: f64 = 150.0;

/// Default plan-dimension rounding increment: 1 inch (ft).
pub const DEFAULT_PRECISION_FT: f64 = 1.0 / 12.0;

/// Cap on 1-inch thickness adjustments per shear check. Sixty-four steps
/// is over five feet of travel; a search still bouncing at that point is
/// oscillating on degenerate inputs, not converging.
pub(crate) const MAX_THICKNESS_ADJUSTMENTS: u32 = 64;

/// One design request as read from a batch file.
///
/// Field names follow the legacy batch format; long-form aliases are
/// accepted. `width` is the wall thickness (in) for wall requests and the
/// column width (in) for column requests.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "F-1",
///   "ftng_type": "wall",
///   "dead_load": 10.0,
///   "live_load": 8.0,
///   "f_c": 3000.0,
///   "grade": 60,
///   "a_s_p": 3000.0,
///   "width": 12.0,
///   "wall_type": "concrete"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingRequest {
    /// Caller-supplied identifier, echoed on results and failures
    pub id: String,

    /// Footing kind: "wall" or "column"
    pub ftng_type: String,

    /// Service dead load (k/ft for walls, k for columns)
    pub dead_load: f64,

    /// Service live load (same basis as dead_load)
    pub live_load: f64,

    /// Specified concrete compressive strength (psi)
    pub f_c: f64,

    /// Reinforcing-steel grade designation (40, 60, 75)
    pub grade: u32,

    /// Gross allowable soil pressure (psf)
    #[serde(rename = "a_s_p", alias = "allowable_soil_pressure_psf")]
    pub allowable_soil_pressure_psf: f64,

    /// Concrete unit weight (pcf); blank means 150
    #[serde(default, rename = "w_c", alias = "concrete_unit_weight_pcf")]
    pub concrete_unit_weight_pcf: Option<f64>,

    /// Soil unit weight (pcf); blank means 100
    #[serde(default, rename = "w_e", alias = "soil_unit_weight_pcf")]
    pub soil_unit_weight_pcf: Option<f64>,

    /// Depth from grade to the bottom of the footing (ft); blank means 4
    #[serde(default, rename = "bottom_of_ftng", alias = "depth_to_bottom_ft")]
    pub depth_to_bottom_ft: Option<f64>,

    /// Plan-dimension rounding increment (ft); blank means 1 inch
    #[serde(default, rename = "precision", alias = "precision_ft")]
    pub precision_ft: Option<f64>,

    /// Concrete density category ("nw", "lw", "s_lw"); blank means "nw"
    #[serde(default)]
    pub conc_type: Option<String>,

    /// Wall thickness or column width (in)
    pub width: f64,

    /// Wall construction ("masonry" or "concrete"); wall requests only
    #[serde(default)]
    pub wall_type: Option<String>,

    /// Plan-width restriction (ft); column requests only
    #[serde(default)]
    pub width_restriction: Option<f64>,

    /// Column position ("interior", "edge", "corner"); blank means interior
    #[serde(default)]
    pub col_loc: Option<String>,
}

impl FootingRequest {
    /// Resolve the footing kind, failing with `InvalidCategory` on
    /// anything but "wall" or "column".
    pub fn kind(&self) -> DesignResult<FootingKind> {
        match self.ftng_type.trim() {
            "wall" => Ok(FootingKind::Wall),
            "column" => Ok(FootingKind::Column),
            other => Err(DesignError::invalid_category(
                "ftng_type",
                other,
                "wall, column",
            )),
        }
    }

    fn service_loads(&self) -> ServiceLoads {
        ServiceLoads::new(self.dead_load, self.live_load)
    }

    fn soil_profile(&self) -> SoilProfile {
        SoilProfile::new(
            self.allowable_soil_pressure_psf,
            self.soil_unit_weight_pcf
                .unwrap_or(DEFAULT_SOIL_UNIT_WEIGHT_PCF),
            self.depth_to_bottom_ft.unwrap_or(DEFAULT_DEPTH_TO_BOTTOM_FT),
        )
    }

    fn concrete_type(&self) -> DesignResult<ConcreteType> {
        match self.conc_type.as_deref() {
            Some(label) => ConcreteType::from_label(label),
            None => Ok(ConcreteType::default()),
        }
    }

    /// Convert into a validated wall-footing input.
    pub fn to_wall_input(&self) -> DesignResult<WallFootingInput> {
        let wall_type_label = self
            .wall_type
            .as_deref()
            .ok_or_else(|| DesignError::missing_field("wall_type"))?;
        Ok(WallFootingInput {
            label: self.id.clone(),
            wall_width_in: self.width,
            wall_type: WallType::from_label(wall_type_label)?,
            loads: self.service_loads(),
            f_c_psi: self.f_c,
            grade: SteelGrade::from_designation(self.grade)?,
            concrete_type: self.concrete_type()?,
            concrete_unit_weight_pcf: self
                .concrete_unit_weight_pcf
                .unwrap_or(DEFAULT_CONCRETE_UNIT_WEIGHT_PCF),
            soil: self.soil_profile(),
            precision_ft: self.precision_ft.unwrap_or(DEFAULT_PRECISION_FT),
            bar_size: DEFAULT_BAR_SIZE,
        })
    }

    /// Convert into a validated column-footing input.
    pub fn to_column_input(&self) -> DesignResult<ColumnFootingInput> {
        let location = match self.col_loc.as_deref() {
            Some(label) => ColumnLocation::from_label(label)?,
            None => ColumnLocation::default(),
        };
        Ok(ColumnFootingInput {
            label: self.id.clone(),
            column_width_in: self.width,
            location,
            max_width_ft: self.width_restriction,
            loads: self.service_loads(),
            f_c_psi: self.f_c,
            grade: SteelGrade::from_designation(self.grade)?,
            concrete_type: self.concrete_type()?,
            concrete_unit_weight_pcf: self
                .concrete_unit_weight_pcf
                .unwrap_or(DEFAULT_CONCRETE_UNIT_WEIGHT_PCF),
            soil: self.soil_profile(),
            precision_ft: self.precision_ft.unwrap_or(DEFAULT_PRECISION_FT),
            bar_size: DEFAULT_BAR_SIZE,
        })
    }
}

/// Enum wrapper over the two result types, for heterogeneous collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FootingResult {
    /// Wall (strip) footing result
    Wall(WallFootingResult),
    /// Column (isolated) footing result
    Column(ColumnFootingResult),
}

impl FootingResult {
    /// The label carried through from the request.
    pub fn label(&self) -> &str {
        match self {
            FootingResult::Wall(result) => &result.label,
            FootingResult::Column(result) => &result.label,
        }
    }

    /// The calculation kind as a string.
    pub fn calc_type(&self) -> &'static str {
        match self {
            FootingResult::Wall(_) => "wall",
            FootingResult::Column(_) => "column",
        }
    }

    /// Display-rounded record for the aggregated batch report.
    pub fn to_record(&self) -> FootingRecord {
        match self {
            FootingResult::Wall(result) => FootingRecord {
                id: result.label.clone(),
                footing: "wall".to_string(),
                length_ft: None,
                width_ft: round_display(result.width_ft),
                thickness_ft: round_display(result.thickness_ft),
                steel_long_sqin: round_display(result.steel_sqin_per_ft),
                steel_short_sqin: None,
            },
            FootingResult::Column(result) => FootingRecord {
                id: result.label.clone(),
                footing: "column".to_string(),
                length_ft: Some(round_display(result.length_ft)),
                width_ft: round_display(result.width_ft),
                thickness_ft: round_display(result.thickness_ft),
                steel_long_sqin: round_display(result.steel_long_sqin),
                steel_short_sqin: Some(round_display(result.steel_short_sqin)),
            },
        }
    }
}

impl fmt::Display for FootingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootingResult::Wall(result) => result.fmt(f),
            FootingResult::Column(result) => result.fmt(f),
        }
    }
}

/// One line of the aggregated report: identity plus display-rounded
/// dimensions. Internal computation keeps full precision; rounding happens
/// only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingRecord {
    pub id: String,
    /// "wall" or "column"
    pub footing: String,
    /// Plan length (ft); column footings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_ft: Option<f64>,
    /// Plan width (ft)
    pub width_ft: f64,
    /// Thickness (ft)
    pub thickness_ft: f64,
    /// Steel area: per foot of wall (wall) or length-direction total (column)
    pub steel_long_sqin: f64,
    /// Width-direction steel (column footings only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steel_short_sqin: Option<f64>,
}

fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Design one request end to end: resolve the kind, convert, run the
/// matching designer.
pub fn design_footing(
    request: &FootingRequest,
    log: &mut dyn Narrative,
) -> DesignResult<FootingResult> {
    match request.kind()? {
        FootingKind::Wall => {
            let input = request.to_wall_input()?;
            wall_footing::design(&input, log).map(FootingResult::Wall)
        }
        FootingKind::Column => {
            let input = request.to_column_input()?;
            column_footing::design(&input, log).map(FootingResult::Column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::NullNarrative;

    fn wall_request_json() -> &'static str {
        r#"{
            "id": "F-1",
            "ftng_type": "wall",
            "dead_load": 10.0,
            "live_load": 8.0,
            "f_c": 3000.0,
            "grade": 60,
            "a_s_p": 3000.0,
            "width": 12.0,
            "wall_type": "concrete"
        }"#
    }

    #[test]
    fn test_request_defaults_applied() {
        let request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        let input = request.to_wall_input().unwrap();
        assert_eq!(input.concrete_unit_weight_pcf, 150.0);
        assert_eq!(input.soil.unit_weight_pcf, 100.0);
        assert_eq!(input.soil.depth_to_bottom_ft, 4.0);
        assert!((input.precision_ft - 1.0 / 12.0).abs() < 1e-12);
        assert_eq!(input.concrete_type, crate::materials::ConcreteType::NormalWeight);
    }

    #[test]
    fn test_request_null_fields_mean_defaults() {
        let json = r#"{
            "id": "F-2",
            "ftng_type": "column",
            "dead_load": 50.0,
            "live_load": 40.0,
            "f_c": 4000.0,
            "grade": 60,
            "a_s_p": 4000.0,
            "w_c": null,
            "w_e": null,
            "bottom_of_ftng": null,
            "precision": null,
            "conc_type": null,
            "width": 18.0,
            "width_restriction": null,
            "col_loc": null
        }"#;
        let request: FootingRequest = serde_json::from_str(json).unwrap();
        let input = request.to_column_input().unwrap();
        assert_eq!(input.location, ColumnLocation::Interior);
        assert_eq!(input.max_width_ft, None);
        assert_eq!(input.concrete_unit_weight_pcf, 150.0);
    }

    #[test]
    fn test_design_footing_dispatch() {
        let request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        let result = design_footing(&request, &mut NullNarrative).unwrap();
        assert_eq!(result.calc_type(), "wall");
        assert_eq!(result.label(), "F-1");
        assert!(matches!(result, FootingResult::Wall(_)));
    }

    #[test]
    fn test_unknown_kind_is_per_request_error() {
        let mut request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        request.ftng_type = "pile".to_string();
        let err = design_footing(&request, &mut NullNarrative).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CATEGORY");
    }

    #[test]
    fn test_missing_wall_type_is_reported() {
        let mut request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        request.wall_type = None;
        let err = design_footing(&request, &mut NullNarrative).unwrap_err();
        assert_eq!(err, DesignError::missing_field("wall_type"));
    }

    #[test]
    fn test_bad_grade_is_per_request_error() {
        let mut request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        request.grade = 55;
        let err = design_footing(&request, &mut NullNarrative).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CATEGORY");
    }

    #[test]
    fn test_record_rounds_for_display() {
        let request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        let result = design_footing(&request, &mut NullNarrative).unwrap();
        let record = result.to_record();
        assert_eq!(record.id, "F-1");
        assert_eq!(record.footing, "wall");
        // 7.1667 ft and 1.1667 ft round to two decimals
        assert_eq!(record.width_ft, 7.17);
        assert_eq!(record.thickness_ft, 1.17);
        assert_eq!(record.steel_long_sqin, 0.42);
        assert!(record.length_ft.is_none());
        assert!(record.steel_short_sqin.is_none());
    }

    #[test]
    fn test_result_enum_serialization_tag() {
        let request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        let result = design_footing(&request, &mut NullNarrative).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"type\":\"Wall\""));
        let roundtrip: FootingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_request_serialization_roundtrip() {
        let request: FootingRequest = serde_json::from_str(wall_request_json()).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        let roundtrip: FootingRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, roundtrip);
    }
}
