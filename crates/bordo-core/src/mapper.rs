//! Sensor-to-visual value mapping: raw samples in, ring geometry out.
//!
//! Pure functions only — no clocks, no I/O, no rendering. The presentation
//! layer decides what an arc length or a color tier looks like on screen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A channel declared a non-positive (or non-finite) maximum.
/// This is a caller contract violation, not a runtime condition.
#[derive(Debug, Error, PartialEq)]
#[error("channel range max must be positive and finite, got {max}")]
pub struct InvalidRange {
    pub max: f64,
}

/// Discrete urgency band selected by `value / max`.
///
/// Bands: [0, 40%) / [40, 60%) / [60, 80%) / [80, 100%].
/// Monotonic: a higher fraction never maps to a cooler tier, and a value
/// sitting exactly on a boundary takes the more urgent side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorTier {
    Cool,
    Nominal,
    Elevated,
    Critical,
}

impl ColorTier {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 0.8 {
            ColorTier::Critical
        } else if fraction >= 0.6 {
            ColorTier::Elevated
        } else if fraction >= 0.4 {
            ColorTier::Nominal
        } else {
            ColorTier::Cool
        }
    }
}

/// One mapped sample: the bounded display value, the ring arc drawn for it,
/// and the color tier it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub arc_len: f64,
    pub tier: ColorTier,
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            value: 0.0,
            arc_len: 0.0,
            tier: ColorTier::Cool,
        }
    }
}

/// Map a raw sample into display state for a ring of the given circumference.
///
/// `value` is `raw` clamped to `[0, max]`; non-finite samples read as 0.
pub fn map(raw: f64, max: f64, circumference: f64) -> Result<Reading, InvalidRange> {
    if !max.is_finite() || max <= 0.0 {
        return Err(InvalidRange { max });
    }
    let raw = if raw.is_finite() { raw } else { 0.0 };
    let value = raw.clamp(0.0, max);
    let fraction = value / max;
    Ok(Reading {
        value,
        arc_len: fraction * circumference,
        tier: ColorTier::from_fraction(fraction),
    })
}

/// Engine-speed proxy from a crankshaft position sample.
///
/// This is a linear re-scaling of the CKP angle (`[0, 360)` degrees) onto
/// `[0, rpm_max]` — a stand-in readout, not a physical RPM model.
pub fn rpm_from_crank_angle(angle_deg: f64, rpm_max: f64) -> f64 {
    (angle_deg / 360.0) * rpm_max
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIRC: f64 = 2.0 * std::f64::consts::PI * 36.0;

    #[test]
    fn value_is_clamped_to_range() {
        for raw in [-50.0, 0.0, 0.1, 119.9, 120.0, 500.0, f64::INFINITY] {
            let r = map(raw, 120.0, CIRC).unwrap();
            assert!(r.value >= 0.0 && r.value <= 120.0, "raw={raw} -> {}", r.value);
        }
        assert_eq!(map(-1.0, 120.0, CIRC).unwrap().value, 0.0);
        assert_eq!(map(500.0, 120.0, CIRC).unwrap().value, 120.0);
    }

    #[test]
    fn arc_length_is_proportional() {
        let r = map(60.0, 120.0, CIRC).unwrap();
        assert!((r.arc_len - CIRC / 2.0).abs() < 1e-9);
        assert_eq!(map(0.0, 120.0, CIRC).unwrap().arc_len, 0.0);
        assert!((map(120.0, 120.0, CIRC).unwrap().arc_len - CIRC).abs() < 1e-9);
    }

    #[test]
    fn tier_boundaries_resolve_upward() {
        assert_eq!(ColorTier::from_fraction(0.0), ColorTier::Cool);
        assert_eq!(ColorTier::from_fraction(0.39), ColorTier::Cool);
        assert_eq!(ColorTier::from_fraction(0.4), ColorTier::Nominal);
        assert_eq!(ColorTier::from_fraction(0.6), ColorTier::Elevated);
        assert_eq!(ColorTier::from_fraction(0.8), ColorTier::Critical);
        assert_eq!(ColorTier::from_fraction(1.0), ColorTier::Critical);
    }

    #[test]
    fn tier_is_monotone_in_fraction() {
        let mut last = ColorTier::Cool;
        for i in 0..=1000 {
            let tier = ColorTier::from_fraction(i as f64 / 1000.0);
            assert!(tier >= last, "tier regressed at fraction {}", i as f64 / 1000.0);
            last = tier;
        }
    }

    #[test]
    fn crank_angle_rescales_linearly() {
        assert_eq!(rpm_from_crank_angle(0.0, 8000.0), 0.0);
        assert_eq!(rpm_from_crank_angle(180.0, 8000.0), 4000.0);
        assert_eq!(rpm_from_crank_angle(90.0, 8000.0), 2000.0);
    }

    #[test]
    fn invalid_range_is_rejected() {
        assert!(map(10.0, 0.0, CIRC).is_err());
        assert!(map(10.0, -5.0, CIRC).is_err());
        assert!(map(10.0, f64::NAN, CIRC).is_err());
    }
}
