//! Core types for the Flatland evaluation scape.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the resource class tables, control-surface types, error enums, and
//! the stable identifier hash shared by the rest of the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod control;
pub mod error;
pub mod hash;
pub mod kind;
pub mod profile;
pub mod traits;

pub use control::{Control, ControlSurface};
pub use error::{ConfigError, EvalError, PolicyError};
pub use kind::{ClassParams, EntityKind, ResourceClass};
pub use profile::ScanProfile;
pub use traits::{Policy, SensorNet};

use smallvec::SmallVec;

/// Number of directional scanner probes.
pub const SCAN_BINS: usize = 5;

/// Number of direct (non-scanner) sense signals in a percept.
pub const DIRECT_SIGNALS: usize = 10;

/// Total percept width: direct signals plus three scanner vectors.
pub const PERCEPT_WIDTH: usize = DIRECT_SIGNALS + 3 * SCAN_BINS;

/// One scanner output vector ([`SCAN_BINS`] entries, inline-allocated).
pub type ScanVec = SmallVec<[f32; 8]>;
