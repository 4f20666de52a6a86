//! # Soil Pressure Model
//!
//! Net allowable and factored soil bearing pressures.
//!
//! The gross allowable pressure from the geotechnical report supports
//! everything above the bearing plane: soil backfill over the footing, the
//! footing's own weight, and the superimposed loads. Netting the first two
//! out leaves the capacity available for the loads the structure actually
//! delivers. No validation happens here - a degenerate (non-positive) net
//! pressure is returned as-is and the designers decide what it means.

use serde::{Deserialize, Serialize};

use crate::loads::ServiceLoads;

/// Default soil unit weight (pcf)
pub const DEFAULT_SOIL_UNIT_WEIGHT_PCF: f64 = 100.0;

/// Default depth from grade to the bottom of the footing (ft)
pub const DEFAULT_DEPTH_TO_BOTTOM_FT: f64 = 4.0;

/// Bearing conditions for one footing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    /// Gross allowable soil pressure from the geotechnical report (psf)
    pub gross_allowable_psf: f64,
    /// Unit weight of the soil backfill above the footing (pcf)
    pub unit_weight_pcf: f64,
    /// Depth from grade to the bottom of the footing (ft)
    pub depth_to_bottom_ft: f64,
}

impl SoilProfile {
    pub fn new(gross_allowable_psf: f64, unit_weight_pcf: f64, depth_to_bottom_ft: f64) -> Self {
        SoilProfile {
            gross_allowable_psf,
            unit_weight_pcf,
            depth_to_bottom_ft,
        }
    }

    /// Net allowable soil pressure (ksf): gross capacity minus the soil
    /// overburden above the footing and the footing self-weight.
    ///
    /// May be zero or negative for degenerate inputs; callers are expected
    /// to check before sizing against it.
    pub fn net_allowable_ksf(
        &self,
        concrete_unit_weight_pcf: f64,
        footing_thickness_ft: f64,
    ) -> f64 {
        (self.gross_allowable_psf
            - self.unit_weight_pcf * (self.depth_to_bottom_ft - footing_thickness_ft)
            - concrete_unit_weight_pcf * footing_thickness_ft)
            / 1000.0
    }
}

/// Factored (ultimate) bearing pressure: U = 1.2D + 1.6L spread over the
/// bearing dimension. Pass an area (sq ft) for isolated footings to get
/// ksf, or a width (ft) for strip footings to get k/ft per foot of wall.
pub fn factored_bearing_pressure(loads: &ServiceLoads, bearing_dimension: f64) -> f64 {
    loads.factored() / bearing_dimension
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_allowable_nets_overburden_and_self_weight() {
        // 3000 psf gross, 100 pcf soil over 2.5 ft, 150 pcf concrete over 1.5 ft
        let soil = SoilProfile::new(3000.0, 100.0, 4.0);
        let net = soil.net_allowable_ksf(150.0, 1.5);
        assert!((net - 2.525).abs() < 1e-9);
    }

    #[test]
    fn test_net_allowable_thicker_footing_trades_soil_for_concrete() {
        let soil = SoilProfile::new(4000.0, 100.0, 4.0);
        let net = soil.net_allowable_ksf(150.0, 2.0);
        // 4000 - 100*2 - 150*2 = 3500 psf
        assert!((net - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_net_allowable_can_go_negative() {
        // Weak soil fully consumed by overburden - passed through, not clamped
        let soil = SoilProfile::new(500.0, 120.0, 6.0);
        let net = soil.net_allowable_ksf(150.0, 2.0);
        assert!(net < 0.0);
    }

    #[test]
    fn test_factored_pressure_area_basis() {
        let loads = ServiceLoads::new(50.0, 40.0);
        // 124 k over 25.84 sq ft
        let q_u = factored_bearing_pressure(&loads, 25.840278);
        assert!((q_u - 4.798709).abs() < 1e-4);
    }

    #[test]
    fn test_factored_pressure_width_basis() {
        let loads = ServiceLoads::new(10.0, 8.0);
        let q_u = factored_bearing_pressure(&loads, 7.1666667);
        assert!((q_u - 3.460465).abs() < 1e-4);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let soil = SoilProfile::new(3000.0, 100.0, 4.0);
        let json = serde_json::to_string(&soil).unwrap();
        let roundtrip: SoilProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(soil, roundtrip);
    }
}
