//! # Material Model
//!
//! Concrete and reinforcing-steel mechanical properties per ACI 318.
//! All derived values (lambda, beta_1, f_y, epsilon_y) are fixed at
//! construction; a [`MaterialModel`] is immutable for the life of a design.
//!
//! ## Categories
//!
//! - **Concrete density**: normal-weight (`nw`), all-lightweight (`lw`),
//!   sand-lightweight (`s_lw`) - sets the lambda modification factor.
//! - **Steel grade**: 40, 60, or 75 - sets yield strength and yield strain.
//!
//! An unrecognized category is a configuration error, reported as
//! [`DesignError::InvalidCategory`].
//!
//! ## Example
//!
//! ```rust
//! use footing_core::materials::{ConcreteType, MaterialModel, SteelGrade};
//! use footing_core::narrative::NullNarrative;
//!
//! let mat = MaterialModel::new(
//!     3000.0,
//!     150.0,
//!     ConcreteType::NormalWeight,
//!     SteelGrade::Grade60,
//!     &mut NullNarrative,
//! );
//! assert_eq!(mat.lambda, 1.0);
//! assert_eq!(mat.beta_1, 0.85);
//! assert_eq!(mat.f_y_psi, 60_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::narrative::Narrative;

/// Concrete density classification per ACI 318 Table 19.2.4.1(a).
///
/// Wire labels follow the legacy batch files (`"nw"`, `"lw"`, `"s_lw"`);
/// long-form aliases are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcreteType {
    /// Normal-weight concrete, lambda = 1.0
    #[serde(rename = "nw", alias = "normal-weight", alias = "normal_weight")]
    NormalWeight,
    /// All-lightweight concrete, lambda = 0.75
    #[serde(rename = "lw", alias = "lightweight")]
    Lightweight,
    /// Sand-lightweight concrete, lambda = 0.85
    #[serde(rename = "s_lw", alias = "sand-lightweight", alias = "sand_lightweight")]
    SandLightweight,
}

impl ConcreteType {
    /// Lambda modification factor for the mechanical properties of
    /// lightweight concrete.
    pub fn lambda(&self) -> f64 {
        match self {
            ConcreteType::NormalWeight => 1.0,
            ConcreteType::Lightweight => 0.75,
            ConcreteType::SandLightweight => 0.85,
        }
    }

    /// Wire label, as written in request files.
    pub fn label(&self) -> &'static str {
        match self {
            ConcreteType::NormalWeight => "nw",
            ConcreteType::Lightweight => "lw",
            ConcreteType::SandLightweight => "s_lw",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ConcreteType::NormalWeight => "normal-weight",
            ConcreteType::Lightweight => "all-lightweight",
            ConcreteType::SandLightweight => "sand-lightweight",
        }
    }

    /// Parse a wire label. Fails with `InvalidCategory` on anything outside
    /// the enumerated set.
    pub fn from_label(label: &str) -> DesignResult<Self> {
        match label.trim() {
            "nw" | "normal-weight" | "normal_weight" => Ok(ConcreteType::NormalWeight),
            "lw" | "lightweight" => Ok(ConcreteType::Lightweight),
            "s_lw" | "sand-lightweight" | "sand_lightweight" => Ok(ConcreteType::SandLightweight),
            other => Err(DesignError::invalid_category(
                "conc_type",
                other,
                "nw, lw, s_lw",
            )),
        }
    }
}

impl Default for ConcreteType {
    fn default() -> Self {
        ConcreteType::NormalWeight
    }
}

/// Reinforcing-steel grade (ASTM A615 designation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SteelGrade {
    /// Grade 40: f_y = 40,000 psi
    Grade40,
    /// Grade 60: f_y = 60,000 psi
    Grade60,
    /// Grade 75: f_y = 75,000 psi
    Grade75,
}

impl SteelGrade {
    /// Yield strength in psi.
    pub fn f_y_psi(&self) -> f64 {
        match self {
            SteelGrade::Grade40 => 40_000.0,
            SteelGrade::Grade60 => 60_000.0,
            SteelGrade::Grade75 => 75_000.0,
        }
    }

    /// Yield strain epsilon_y = f_y / E_s.
    pub fn epsilon_y(&self) -> f64 {
        match self {
            SteelGrade::Grade40 => 0.00138,
            SteelGrade::Grade60 => 0.00207,
            SteelGrade::Grade75 => 0.00259,
        }
    }

    /// Numeric grade designation (40, 60, 75).
    pub fn designation(&self) -> u32 {
        match self {
            SteelGrade::Grade40 => 40,
            SteelGrade::Grade60 => 60,
            SteelGrade::Grade75 => 75,
        }
    }

    /// Parse a numeric designation. Fails with `InvalidCategory` on
    /// anything outside {40, 60, 75}.
    pub fn from_designation(grade: u32) -> DesignResult<Self> {
        match grade {
            40 => Ok(SteelGrade::Grade40),
            60 => Ok(SteelGrade::Grade60),
            75 => Ok(SteelGrade::Grade75),
            other => Err(DesignError::invalid_category(
                "grade",
                other.to_string(),
                "40, 60, 75",
            )),
        }
    }
}

impl TryFrom<u32> for SteelGrade {
    type Error = DesignError;

    fn try_from(grade: u32) -> Result<Self, Self::Error> {
        SteelGrade::from_designation(grade)
    }
}

impl From<SteelGrade> for u32 {
    fn from(grade: SteelGrade) -> u32 {
        grade.designation()
    }
}

/// Derived concrete and steel properties for one design request.
///
/// Immutable once constructed. The narrative records which branch set each
/// derived value; writing it has no effect on the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialModel {
    /// Specified concrete compressive strength (psi)
    pub f_c_psi: f64,
    /// Concrete unit weight (pcf), used for footing self-weight
    pub unit_weight_pcf: f64,
    /// Density classification the lambda factor came from
    pub concrete_type: ConcreteType,
    /// Reinforcing-steel grade
    pub grade: SteelGrade,
    /// Lightweight-concrete modification factor
    pub lambda: f64,
    /// Equivalent-stress-block depth factor (ACI 22.2.2.4.3)
    pub beta_1: f64,
    /// Steel yield strength (psi)
    pub f_y_psi: f64,
    /// Steel yield strain
    pub epsilon_y: f64,
}

impl MaterialModel {
    /// Derive all material properties from the categorical inputs.
    pub fn new(
        f_c_psi: f64,
        unit_weight_pcf: f64,
        concrete_type: ConcreteType,
        grade: SteelGrade,
        log: &mut dyn Narrative,
    ) -> Self {
        let lambda = concrete_type.lambda();
        log.note(&format!(
            "{} concrete: lambda = {:.2}",
            concrete_type.description(),
            lambda
        ));

        let beta_1 = beta_1_for(f_c_psi);
        if f_c_psi <= 4000.0 {
            log.note(&format!(
                "f'c = {:.0} psi <= 4000 psi: beta_1 = 0.85",
                f_c_psi
            ));
        } else {
            log.note(&format!(
                "f'c = {:.0} psi > 4000 psi: beta_1 = {:.3}",
                f_c_psi, beta_1
            ));
        }

        let f_y_psi = grade.f_y_psi();
        let epsilon_y = grade.epsilon_y();
        log.note(&format!(
            "Grade {} reinforcement: f_y = {:.0} psi, epsilon_y = {:.5}",
            grade.designation(),
            f_y_psi,
            epsilon_y
        ));

        MaterialModel {
            f_c_psi,
            unit_weight_pcf,
            concrete_type,
            grade,
            lambda,
            beta_1,
            f_y_psi,
            epsilon_y,
        }
    }

    /// Construct from raw wire values, mapping unknown categories to
    /// `InvalidCategory`.
    pub fn from_labels(
        f_c_psi: f64,
        unit_weight_pcf: f64,
        conc_type: &str,
        grade: u32,
        log: &mut dyn Narrative,
    ) -> DesignResult<Self> {
        let concrete_type = ConcreteType::from_label(conc_type)?;
        let grade = SteelGrade::from_designation(grade)?;
        Ok(MaterialModel::new(
            f_c_psi,
            unit_weight_pcf,
            concrete_type,
            grade,
            log,
        ))
    }

    /// sqrt(f'c), the recurring shear-strength term (psi^0.5).
    pub fn sqrt_f_c(&self) -> f64 {
        self.f_c_psi.sqrt()
    }
}

/// Equivalent-stress-block factor: 0.85 up to 4000 psi, then reduced by
/// 0.05 per 1000 psi with a floor of 0.65.
fn beta_1_for(f_c_psi: f64) -> f64 {
    if f_c_psi <= 4000.0 {
        0.85
    } else {
        (0.85 - 0.05 * (f_c_psi - 4000.0) / 1000.0).max(0.65)
    }
}
