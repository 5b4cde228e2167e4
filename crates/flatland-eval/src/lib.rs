//! Evaluation driver for the Flatland scape.
//!
//! One [`evaluate()`] call runs a full episode for one agent policy:
//! resolve the mode layout, tick the world (respawns → percept →
//! decision → step) until a terminal condition fires, and aggregate the
//! accumulated statistics into a bounded scalar fitness plus a
//! structured diagnostic trace. Policy adapters normalize both direct
//! step functions and tick-and-poll sensor networks onto the single
//! [`Policy`](flatland_core::Policy) seam.
//!
//! Evaluations are strictly sequential internally, cancellable between
//! ticks, and fully independent of each other — [`evaluate_batch()`]
//! runs many in parallel with no shared mutable state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod context;
pub mod driver;
pub mod fitness;
pub mod policy;
pub mod trace;

pub use batch::{evaluate_batch, BatchJob, BatchOptions};
pub use context::{
    default_data_source, set_default_data_source, CancelToken, DataSource, EvalContext,
};
pub use driver::{evaluate, Evaluation};
pub use fitness::FITNESS_MAX;
pub use policy::{DirectPolicy, RegistryPolicy};
pub use trace::{Trace, TraceValue};
