//! # Section Geometry
//!
//! Footing thickness / effective-depth bookkeeping and the conservative
//! rounding utilities used throughout the sizing procedures.
//!
//! The effective depth `d` is re-derived every time the thickness changes,
//! so callers can never observe a stale pair. Plan dimensions are rounded
//! up to practical construction increments (typically 1 inch); intermediate
//! ratios are rounded up by decimal place. Both roundings only ever move a
//! value toward the conservative side.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::section::{FootingKind, SectionGeometry};
//!
//! let mut section = SectionGeometry::new(FootingKind::Wall, 8);
//! assert_eq!(section.thickness_ft(), 1.5);
//! assert_eq!(section.effective_depth_in(), 14.5); // 18 - 3 cover - 0.5 half-bar
//!
//! section.step_thickness_in(-1.0);
//! assert!((section.effective_depth_in() - 13.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Clear cover to reinforcement for concrete cast against earth (in).
pub const COVER_IN: f64 = 3.0;

/// Default assumed bar designation (/8 in), i.e. a 1-inch-diameter bar.
pub const DEFAULT_BAR_SIZE: u32 = 8;

/// Which of the two footing procedures a section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootingKind {
    /// Strip footing under a continuous wall
    Wall,
    /// Isolated pad footing under a column
    Column,
}

impl FootingKind {
    /// Starting thickness for the iterative sizing (ft).
    pub fn default_thickness_ft(&self) -> f64 {
        match self {
            FootingKind::Wall => 1.5,
            FootingKind::Column => 2.0,
        }
    }

    /// Depth allowance from the bottom of the section to the reinforcement
    /// centroid, beyond clear cover (in). A wall footing has one bar layer
    /// (half a diameter to centroid); a column footing carries a two-way
    /// bottom mat (a full diameter).
    pub fn bar_allowance_in(&self, bar_size: u32) -> f64 {
        let bar_diameter_in = bar_size as f64 / 8.0;
        match self {
            FootingKind::Wall => bar_diameter_in / 2.0,
            FootingKind::Column => bar_diameter_in,
        }
    }

    /// Display label ("wall" / "column").
    pub fn label(&self) -> &'static str {
        match self {
            FootingKind::Wall => "wall",
            FootingKind::Column => "column",
        }
    }
}

/// Mutable thickness/effective-depth pair for one design in progress.
///
/// Invariant: `effective_depth_in` is always derived from the current
/// thickness (`d = h*12 - cover - bar allowance`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    kind: FootingKind,
    bar_size: u32,
    thickness_ft: f64,
    effective_depth_in: f64,
}

impl SectionGeometry {
    /// New section at the kind-dependent default thickness.
    pub fn new(kind: FootingKind, bar_size: u32) -> Self {
        let thickness_ft = kind.default_thickness_ft();
        SectionGeometry {
            kind,
            bar_size,
            thickness_ft,
            effective_depth_in: effective_depth(thickness_ft, kind, bar_size),
        }
    }

    pub fn kind(&self) -> FootingKind {
        self.kind
    }

    /// Total thickness h (ft).
    pub fn thickness_ft(&self) -> f64 {
        self.thickness_ft
    }

    /// Effective depth d (in), consistent with the current thickness.
    pub fn effective_depth_in(&self) -> f64 {
        self.effective_depth_in
    }

    /// Set the total thickness and re-derive the effective depth.
    pub fn set_thickness_ft(&mut self, thickness_ft: f64) {
        self.thickness_ft = thickness_ft;
        self.effective_depth_in = effective_depth(thickness_ft, self.kind, self.bar_size);
    }

    /// Adjust the thickness by a whole-inch step (negative to thin the
    /// section) and re-derive the effective depth.
    pub fn step_thickness_in(&mut self, step_in: f64) {
        self.set_thickness_ft(self.thickness_ft + step_in / 12.0);
    }

    /// Force a specific effective depth (the one-way-shear direct solve)
    /// and back-compute the thickness that produces it.
    pub fn set_effective_depth_in(&mut self, depth_in: f64) {
        self.effective_depth_in = depth_in;
        self.thickness_ft =
            (depth_in + COVER_IN + self.kind.bar_allowance_in(self.bar_size)) / 12.0;
    }
}

/// Effective depth from total thickness: `d = h*12 - cover - bar allowance`.
pub fn effective_depth(thickness_ft: f64, kind: FootingKind, bar_size: u32) -> f64 {
    thickness_ft * 12.0 - COVER_IN - kind.bar_allowance_in(bar_size)
}

/// Round a dimension up to a practical construction increment.
///
/// Two candidate ladders descend from `ceil(x)`: one in steps of
/// `precision`, one in steps of 0.5. Each stops at the smallest rung that
/// is still >= x; the finer (smaller) of the two rungs wins. The result is
/// therefore always in `[x, ceil(x)]` - never an under-designed dimension.
pub fn round_up_to_precision(x: f64, precision: f64) -> f64 {
    if !(precision > 0.0) {
        return x.ceil();
    }
    descend_from_ceiling(x, precision).min(descend_from_ceiling(x, 0.5))
}

fn descend_from_ceiling(x: f64, step: f64) -> f64 {
    let mut value = x.ceil();
    while value - step >= x {
        value -= step;
    }
    value
}

/// Round up at a fixed number of decimal places: `ceil(x*10^n)/10^n`.
///
/// Idempotent: re-rounding an already-rounded value returns it unchanged
/// (float noise from the first pass is absorbed rather than ceiled again).
pub fn round_up_decimal(x: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = x * factor;
    let nearest = scaled.round();
    let ceiled = if (scaled - nearest).abs() < 1e-9 {
        nearest
    } else {
        scaled.ceil()
    };
    ceiled / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thickness_by_kind() {
        assert_eq!(SectionGeometry::new(FootingKind::Wall, 8).thickness_ft(), 1.5);
        assert_eq!(
            SectionGeometry::new(FootingKind::Column, 8).thickness_ft(),
            2.0
        );
    }

    #[test]
    fn test_effective_depth_by_kind() {
        // Wall: 18 - 3 - 0.5 = 14.5; column: 24 - 3 - 1.0 = 20.0
        assert!((effective_depth(1.5, FootingKind::Wall, 8) - 14.5).abs() < 1e-12);
        assert!((effective_depth(2.0, FootingKind::Column, 8) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_effective_depth_monotonic_and_less_than_thickness() {
        let mut previous = f64::MIN;
        for step in 0..24 {
            let h = 1.0 + step as f64 / 12.0;
            let d = effective_depth(h, FootingKind::Column, 8);
            assert!(d > previous);
            assert!(d < h * 12.0);
            previous = d;
        }
    }

    #[test]
    fn test_bar_size_is_configurable() {
        // #6 bar: 0.75 in diameter
        assert!((effective_depth(1.5, FootingKind::Wall, 6) - 14.625).abs() < 1e-12);
        assert!((effective_depth(1.5, FootingKind::Column, 6) - 14.25).abs() < 1e-12);
    }

    #[test]
    fn test_depth_never_stale_after_mutation() {
        let mut section = SectionGeometry::new(FootingKind::Column, 8);
        section.step_thickness_in(1.0);
        assert!((section.thickness_ft() - (2.0 + 1.0 / 12.0)).abs() < 1e-12);
        assert!((section.effective_depth_in() - 21.0).abs() < 1e-9);

        section.set_thickness_ft(1.5);
        assert!((section.effective_depth_in() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_effective_depth_back_computes_thickness() {
        let mut section = SectionGeometry::new(FootingKind::Wall, 8);
        section.set_effective_depth_in(17.25);
        assert!((section.effective_depth_in() - 17.25).abs() < 1e-12);
        // h = (17.25 + 3 + 0.5) / 12
        assert!((section.thickness_ft() - 20.75 / 12.0).abs() < 1e-12);
        // and the pair stays consistent through the next derivation
        let rederived =
            effective_depth(section.thickness_ft(), FootingKind::Wall, 8);
        assert!((rederived - 17.25).abs() < 1e-9);
    }

    #[test]
    fn test_round_up_to_precision_basic() {
        let inch = 1.0 / 12.0;
        // 7.1287 ft rounds to 7'-2" (7.1667), not up to 7.5
        let rounded = round_up_to_precision(7.128713, inch);
        assert!((rounded - (8.0 - 10.0 * inch)).abs() < 1e-9);
        // coarse precision falls back to the half-foot ladder
        let rounded = round_up_to_precision(5.0709, 0.5);
        assert!((rounded - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_round_up_to_precision_bounds() {
        let inch = 1.0 / 12.0;
        for &x in &[0.4, 1.01, 2.499, 3.5, 5.0709, 7.128713, 10.999] {
            for &p in &[inch, 0.25, 0.333333, 0.5] {
                let rounded = round_up_to_precision(x, p);
                assert!(rounded >= x - 1e-9, "rounded {} below {}", rounded, x);
                assert!(
                    rounded <= x.ceil() + 1e-9,
                    "rounded {} above ceil({})",
                    rounded,
                    x
                );
            }
        }
    }

    #[test]
    fn test_round_up_to_precision_exact_integer() {
        assert_eq!(round_up_to_precision(4.0, 1.0 / 12.0), 4.0);
    }

    #[test]
    fn test_round_up_decimal() {
        assert!((round_up_decimal(0.00285, 4) - 0.0029).abs() < 1e-12);
        assert!((round_up_decimal(0.0028594, 4) - 0.0029).abs() < 1e-12);
        assert!((round_up_decimal(12.301, 1) - 12.4).abs() < 1e-9);
    }

    #[test]
    fn test_round_up_decimal_idempotent() {
        for &x in &[0.0028594, 0.0029, 0.017201, 3.14159, 0.999999] {
            let once = round_up_decimal(x, 4);
            let twice = round_up_decimal(once, 4);
            assert_eq!(once, twice, "not idempotent for {}", x);
            assert!(once >= x - 1e-12);
        }
    }

    #[test]
    fn test_serialization() {
        let section = SectionGeometry::new(FootingKind::Column, 8);
        let json = serde_json::to_string(&section).unwrap();
        let roundtrip: SectionGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(section, roundtrip);

        assert_eq!(serde_json::to_string(&FootingKind::Wall).unwrap(), "\"wall\"");
    }
}
