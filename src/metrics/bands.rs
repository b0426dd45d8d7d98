//! Interpretation banding
//!
//! Maps each calendar-spread metric to a fixed qualitative band. The
//! threshold chains are the contract: every finite input falls in exactly
//! one band, with the open/closed endpoints placed exactly as listed on
//! each `from_value`. Callers only band finite values; NaN metrics are
//! displayed as-is with no interpretation.

use serde::{Deserialize, Serialize};

/// Band for `iv_crush` (short-leg IV change over the period)
///
/// `<-2` strong crush, `[-2,-0.5)` mild crush, `[-0.5,0.5]` stable,
/// `(0.5,2)` risen, `>=2` surged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrushBand {
    StrongCrush,
    MildCrush,
    Stable,
    Risen,
    Surged,
}

impl CrushBand {
    pub fn from_value(v: f64) -> Self {
        if v < -2.0 {
            CrushBand::StrongCrush
        } else if v < -0.5 {
            CrushBand::MildCrush
        } else if v <= 0.5 {
            CrushBand::Stable
        } else if v < 2.0 {
            CrushBand::Risen
        } else {
            CrushBand::Surged
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrushBand::StrongCrush => "Strong IV crush on the short leg",
            CrushBand::MildCrush => "Mild IV crush on the short leg",
            CrushBand::Stable => "Short-leg IV stable over the period",
            CrushBand::Risen => "Short-leg IV has risen",
            CrushBand::Surged => "Short-leg IV surged",
        }
    }
}

/// Band for `iv_ratio` (short end IV / long end IV)
///
/// `>=1.2` strong front edge, `[1.05,1.2)` moderate edge, `[0.95,1.05)`
/// flat, `[0.85,0.95)` inverse skew, `<0.85` unusual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatioBand {
    StrongFrontEdge,
    ModerateEdge,
    Flat,
    InverseSkew,
    Unusual,
}

impl RatioBand {
    pub fn from_value(v: f64) -> Self {
        if v >= 1.2 {
            RatioBand::StrongFrontEdge
        } else if v >= 1.05 {
            RatioBand::ModerateEdge
        } else if v >= 0.95 {
            RatioBand::Flat
        } else if v >= 0.85 {
            RatioBand::InverseSkew
        } else {
            RatioBand::Unusual
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatioBand::StrongFrontEdge => "Strong front-month IV edge",
            RatioBand::ModerateEdge => "Moderate front-month IV edge",
            RatioBand::Flat => "Flat ratio between legs",
            RatioBand::InverseSkew => "Inverse skew: front IV below back",
            RatioBand::Unusual => "Unusual ratio; spread structure compromised",
        }
    }
}

/// Band for `iv_spread` (short end IV minus long end IV, IV points)
///
/// `>5` wide, `[2,5]` moderate, `[-1,2)` converged/neutral, `<-1`
/// negative skew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadBand {
    Wide,
    Moderate,
    Converged,
    NegativeSkew,
}

impl SpreadBand {
    pub fn from_value(v: f64) -> Self {
        if v > 5.0 {
            SpreadBand::Wide
        } else if v >= 2.0 {
            SpreadBand::Moderate
        } else if v >= -1.0 {
            SpreadBand::Converged
        } else {
            SpreadBand::NegativeSkew
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpreadBand::Wide => "Wide IV spread between legs",
            SpreadBand::Moderate => "Moderate IV spread",
            SpreadBand::Converged => "Legs converged; spread neutral",
            SpreadBand::NegativeSkew => "Negative IV skew between legs",
        }
    }
}

/// Band for `iv_slope` (IV points per day of expiration gap)
///
/// `<-0.4` inverted, `[-0.4,-0.1)` mild inversion, `[-0.1,0.1]` flat,
/// `(0.1,0.4]` mild upward, `>0.4` strong upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlopeBand {
    Inverted,
    MildInversion,
    Flat,
    MildUpward,
    StrongUpward,
}

impl SlopeBand {
    pub fn from_value(v: f64) -> Self {
        if v < -0.4 {
            SlopeBand::Inverted
        } else if v < -0.1 {
            SlopeBand::MildInversion
        } else if v <= 0.1 {
            SlopeBand::Flat
        } else if v <= 0.4 {
            SlopeBand::MildUpward
        } else {
            SlopeBand::StrongUpward
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlopeBand::Inverted => "Inverted term-structure slope",
            SlopeBand::MildInversion => "Mild term-structure inversion",
            SlopeBand::Flat => "Flat term-structure slope",
            SlopeBand::MildUpward => "Mild upward term-structure slope",
            SlopeBand::StrongUpward => "Strong upward term-structure slope",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crush_boundaries() {
        assert_eq!(CrushBand::from_value(-2.01), CrushBand::StrongCrush);
        assert_eq!(CrushBand::from_value(-2.0), CrushBand::MildCrush);
        assert_eq!(CrushBand::from_value(-0.5), CrushBand::Stable);
        assert_eq!(CrushBand::from_value(0.5), CrushBand::Stable);
        assert_eq!(CrushBand::from_value(0.51), CrushBand::Risen);
        assert_eq!(CrushBand::from_value(1.99), CrushBand::Risen);
        // Knife-edge 2.0 falls to the else arm
        assert_eq!(CrushBand::from_value(2.0), CrushBand::Surged);
        assert_eq!(CrushBand::from_value(8.0), CrushBand::Surged);
    }

    #[test]
    fn test_ratio_boundaries() {
        assert_eq!(RatioBand::from_value(1.2), RatioBand::StrongFrontEdge);
        assert_eq!(RatioBand::from_value(1.19), RatioBand::ModerateEdge);
        assert_eq!(RatioBand::from_value(1.05), RatioBand::ModerateEdge);
        assert_eq!(RatioBand::from_value(1.0), RatioBand::Flat);
        assert_eq!(RatioBand::from_value(0.95), RatioBand::Flat);
        assert_eq!(RatioBand::from_value(0.9), RatioBand::InverseSkew);
        assert_eq!(RatioBand::from_value(0.85), RatioBand::InverseSkew);
        assert_eq!(RatioBand::from_value(0.84), RatioBand::Unusual);
    }

    #[test]
    fn test_spread_boundaries() {
        assert_eq!(SpreadBand::from_value(5.1), SpreadBand::Wide);
        assert_eq!(SpreadBand::from_value(5.0), SpreadBand::Moderate);
        assert_eq!(SpreadBand::from_value(2.0), SpreadBand::Moderate);
        assert_eq!(SpreadBand::from_value(1.99), SpreadBand::Converged);
        assert_eq!(SpreadBand::from_value(-1.0), SpreadBand::Converged);
        assert_eq!(SpreadBand::from_value(-1.01), SpreadBand::NegativeSkew);
    }

    #[test]
    fn test_slope_boundaries() {
        assert_eq!(SlopeBand::from_value(-0.41), SlopeBand::Inverted);
        assert_eq!(SlopeBand::from_value(-0.4), SlopeBand::MildInversion);
        assert_eq!(SlopeBand::from_value(-0.1), SlopeBand::Flat);
        assert_eq!(SlopeBand::from_value(0.1), SlopeBand::Flat);
        assert_eq!(SlopeBand::from_value(0.11), SlopeBand::MildUpward);
        assert_eq!(SlopeBand::from_value(0.4), SlopeBand::MildUpward);
        assert_eq!(SlopeBand::from_value(0.41), SlopeBand::StrongUpward);
    }

    #[test]
    fn test_bands_total_over_samples() {
        // Every finite input lands in exactly one band; spot-check a sweep
        let mut v = -10.0;
        while v <= 10.0 {
            let _ = CrushBand::from_value(v);
            let _ = RatioBand::from_value(v);
            let _ = SpreadBand::from_value(v);
            let _ = SlopeBand::from_value(v);
            v += 0.01;
        }
    }
}
