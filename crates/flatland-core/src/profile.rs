//! Scanner profiles: per-bin weight masks modeling constrained vision.
//!
//! A profile is applied identically to all three scanner vectors
//! (distance, color, energy) after they are computed. `Core` zeroes the
//! outermost bins; `Forward` attenuates the trailing bins; `Balanced`
//! leaves every bin at full weight.

use crate::SCAN_BINS;
use std::fmt;
use std::str::FromStr;

/// Named per-bin weighting scheme for the directional scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanProfile {
    /// All bins at full weight.
    Balanced,
    /// Trailing bins attenuated; vision biased along the heading.
    Forward,
    /// Outermost bins zeroed; only the central cone is visible.
    Core,
}

/// Weight tables. One entry per scanner bin, ordered leading to trailing.
static BALANCED_WEIGHTS: [f32; SCAN_BINS] = [1.0, 1.0, 1.0, 1.0, 1.0];
static FORWARD_WEIGHTS: [f32; SCAN_BINS] = [1.0, 1.0, 1.0, 0.7, 0.4];
static CORE_WEIGHTS: [f32; SCAN_BINS] = [0.0, 1.0, 1.0, 1.0, 0.0];

impl ScanProfile {
    /// Per-bin weights, applied to all three scan vectors.
    ///
    /// The exact values are part of the trace compatibility surface.
    pub fn weights(self) -> &'static [f32; SCAN_BINS] {
        match self {
            ScanProfile::Balanced => &BALANCED_WEIGHTS,
            ScanProfile::Forward => &FORWARD_WEIGHTS,
            ScanProfile::Core => &CORE_WEIGHTS,
        }
    }

    /// Stable lowercase name used in configuration tables and traces.
    pub fn name(self) -> &'static str {
        match self {
            ScanProfile::Balanced => "balanced",
            ScanProfile::Forward => "forward",
            ScanProfile::Core => "core",
        }
    }
}

impl fmt::Display for ScanProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScanProfile {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(ScanProfile::Balanced),
            "forward" => Ok(ScanProfile::Forward),
            "core" => Ok(ScanProfile::Core),
            _ => Err(()),
        }
    }
}
