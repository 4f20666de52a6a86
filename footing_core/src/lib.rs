//! # footing_core - Shallow Foundation Design Engine
//!
//! `footing_core` sizes reinforced-concrete shallow foundations (wall and
//! column footings) per the ACI 318 strength-design provisions: plan
//! dimensions from allowable soil pressure, thickness from one-way and
//! two-way shear, and minimum flexural reinforcement in each direction.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure `design()` functions that take input and return
//!   results; every request owns its own material and section state
//! - **JSON-First**: all inputs, results, and errors serialize cleanly
//! - **Rich Errors**: structured error types, not just strings
//! - **Explainable**: every design accepts an injected narrative sink and
//!   writes a human-readable trace of each derivation branch; the trace
//!   never influences a computed value
//!
//! ## Quick Start
//!
//! ```rust
//! use footing_core::calculations::wall_footing::{self, WallFootingInput, WallType};
//! use footing_core::loads::ServiceLoads;
//! use footing_core::materials::{ConcreteType, SteelGrade};
//! use footing_core::narrative::NullNarrative;
//! use footing_core::soil::SoilProfile;
//!
//! let input = WallFootingInput {
//!     label: "WF-1".to_string(),
//!     wall_width_in: 12.0,
//!     wall_type: WallType::Concrete,
//!     loads: ServiceLoads::new(10.0, 8.0),
//!     f_c_psi: 3000.0,
//!     grade: SteelGrade::Grade60,
//!     concrete_type: ConcreteType::NormalWeight,
//!     concrete_unit_weight_pcf: 150.0,
//!     soil: SoilProfile::new(3000.0, 100.0, 4.0),
//!     precision_ft: 1.0 / 12.0,
//!     bar_size: 8,
//! };
//!
//! let result = wall_footing::design(&input, &mut NullNarrative).unwrap();
//! println!("B = {:.2} ft, h = {:.2} ft", result.width_ft, result.thickness_ft);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - the wall and column footing designers and batch
//!   wire types
//! - [`materials`] - concrete/steel property derivation
//! - [`section`] - thickness/effective-depth bookkeeping and rounding
//! - [`loads`] - service loads and the governing strength combination
//! - [`soil`] - net allowable and factored bearing pressures
//! - [`flexure`] - reinforcement-ratio solve and minimum-steel governance
//! - [`narrative`] - injected derivation-trace sink
//! - [`errors`] - structured error types
//! - [`file_io`] - batch request loading and report aggregation

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod flexure;
pub mod loads;
pub mod materials;
pub mod narrative;
pub mod section;
pub mod soil;

// Re-export commonly used types at crate root for convenience
pub use calculations::{design_footing, FootingRecord, FootingRequest, FootingResult};
pub use errors::{DesignError, DesignResult};
pub use file_io::{load_requests, BatchReport};
pub use narrative::{BufferNarrative, Narrative, NullNarrative, WriterNarrative};
pub use section::FootingKind;
