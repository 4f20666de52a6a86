//! # Service Loads
//!
//! Dead and live service loads for one footing, with the ACI/ASCE strength
//! combination applied where the design procedure needs factored demand.
//!
//! Footings see a single governing gravity combination (U = 1.2D + 1.6L),
//! so the full combination table machinery is collapsed to that one case.
//! Loads are kips per foot of wall for strip footings and total kips for
//! isolated footings; the combination is unit-agnostic.

use serde::{Deserialize, Serialize};

/// Strength-design load factors (1.2D + 1.6L).
pub const DEAD_LOAD_FACTOR: f64 = 1.2;
pub const LIVE_LOAD_FACTOR: f64 = 1.6;

/// Unfactored dead and live loads for a single footing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceLoads {
    /// Dead load (k/ft for wall footings, k for column footings)
    pub dead: f64,
    /// Live load (same basis as dead)
    pub live: f64,
}

impl ServiceLoads {
    pub fn new(dead: f64, live: f64) -> Self {
        ServiceLoads { dead, live }
    }

    /// Total service load D + L, used against allowable soil pressure.
    pub fn total(&self) -> f64 {
        self.dead + self.live
    }

    /// Factored load U = 1.2D + 1.6L, used for strength checks.
    pub fn factored(&self) -> f64 {
        DEAD_LOAD_FACTOR * self.dead + LIVE_LOAD_FACTOR * self.live
    }

    /// Human-readable equation for the governing combination.
    pub fn combination_equation() -> &'static str {
        "1.2D + 1.6L"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_service_sum() {
        let loads = ServiceLoads::new(10.0, 8.0);
        assert_eq!(loads.total(), 18.0);
    }

    #[test]
    fn test_factored_combination() {
        // 1.2*50 + 1.6*40 = 124
        let loads = ServiceLoads::new(50.0, 40.0);
        assert!((loads.factored() - 124.0).abs() < 1e-12);
    }

    #[test]
    fn test_factored_exceeds_service_for_gravity_loads() {
        let loads = ServiceLoads::new(10.0, 8.0);
        assert!(loads.factored() > loads.total());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let loads = ServiceLoads::new(12.5, 7.25);
        let json = serde_json::to_string(&loads).unwrap();
        let roundtrip: ServiceLoads = serde_json::from_str(&json).unwrap();
        assert_eq!(loads, roundtrip);
    }
}
