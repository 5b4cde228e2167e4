//! Control signals emitted by agent policies.
//!
//! A policy answers each percept with a [`Control`]: either a single
//! scalar move command, or a two-channel differential drive that the
//! episode resolves into one scalar before quantization.

use std::fmt;

/// Blend weight for the average-drive component of a differential control.
const DRIVE_AVG_WEIGHT: f32 = 0.65;
/// Blend weight for the left/right differential component.
const DRIVE_DIFF_WEIGHT: f32 = 0.35;

/// One control signal from a policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    /// Direct move command in `[-1, 1]`.
    Scalar(f32),
    /// Differential drive: two channels resolved as
    /// `0.65 * (left + right) / 2 + 0.35 * (right - left)`, clamped.
    Drive {
        /// Left drive channel.
        left: f32,
        /// Right drive channel.
        right: f32,
    },
}

impl Control {
    /// Resolve to a single move scalar in `[-1, 1]`.
    pub fn resolve(self) -> f32 {
        match self {
            Control::Scalar(v) => v.clamp(-1.0, 1.0),
            Control::Drive { left, right } => {
                let avg = (left + right) / 2.0;
                let diff = right - left;
                (DRIVE_AVG_WEIGHT * avg + DRIVE_DIFF_WEIGHT * diff).clamp(-1.0, 1.0)
            }
        }
    }

    /// The control surface this signal belongs to.
    pub fn surface(self) -> ControlSurface {
        match self {
            Control::Scalar(_) => ControlSurface::Scalar,
            Control::Drive { .. } => ControlSurface::Differential,
        }
    }
}

/// Identifies the shape of a policy's output.
///
/// Surface name and width are reported in the evaluation trace and are
/// part of its compatibility surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlSurface {
    /// Single scalar output.
    Scalar,
    /// Two-channel differential drive.
    Differential,
}

impl ControlSurface {
    /// Stable trace name.
    pub fn name(self) -> &'static str {
        match self {
            ControlSurface::Scalar => "scalar",
            ControlSurface::Differential => "differential",
        }
    }

    /// Number of output channels.
    pub fn width(self) -> usize {
        match self {
            ControlSurface::Scalar => 1,
            ControlSurface::Differential => 2,
        }
    }
}

impl fmt::Display for ControlSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
