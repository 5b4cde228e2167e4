//! Flatland: a deterministic foraging-world fitness scape for
//! neuroevolution populations.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Flatland sub-crates. For most users, adding `flatland` as
//! a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use flatland::prelude::*;
//!
//! // A policy that always steps clockwise.
//! let mut policy = DirectPolicy::new(|_percept: &[f32]| {
//!     Ok::<_, PolicyError>(Control::Scalar(1.0))
//! });
//!
//! let ctx = EvalContext::new("agent-1");
//! let eval = evaluate(Mode::Gt, &ctx, &mut policy).unwrap();
//! assert!(eval.fitness >= 0.0 && eval.fitness <= FITNESS_MAX);
//! println!("terminal: {:?}", eval.terminal);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flatland-core` | Resource classes, controls, errors, core traits |
//! | [`world`] | `flatland-world` | Ring geometry, layouts, the episode state machine |
//! | [`obs`] | `flatland-obs` | Direct sensing signals and the directional scanner |
//! | [`eval`] | `flatland-eval` | Evaluation driver, policy adapters, fitness, batching |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and constants (`flatland-core`).
///
/// Contains [`types::ResourceClass`], [`types::Control`], the error
/// types, and the fundamental traits ([`types::Policy`],
/// [`types::SensorNet`]).
pub use flatland_core as types;

/// Ring geometry, layouts, and the episode state machine
/// (`flatland-world`).
///
/// [`world::Episode`] is the simulation core; [`world::Layout`]
/// resolves the per-mode world tables.
pub use flatland_world as world;

/// Direct sensing and the directional scanner (`flatland-obs`).
///
/// [`obs::percept()`] assembles the full flat observation vector a
/// policy sees each tick.
pub use flatland_obs as obs;

/// Evaluation driver, policy adapters, fitness aggregation, and batch
/// parallelism (`flatland-eval`).
///
/// [`eval::evaluate()`] runs one episode; [`eval::evaluate_batch()`]
/// fans a population out over a worker pool.
pub use flatland_eval as eval;

/// Common imports for typical Flatland usage.
///
/// ```rust
/// use flatland::prelude::*;
/// ```
///
/// This imports the most frequently used types: the evaluation entry
/// points, policy adapters, core traits, controls, and errors.
pub mod prelude {
    // Core traits, controls, and constants
    pub use flatland_core::{Control, ControlSurface, Policy, ScanProfile, SensorNet};

    // Errors
    pub use flatland_core::{ConfigError, EvalError, PolicyError};

    // World
    pub use flatland_world::{Episode, Layout, Mode, TerminalReason};

    // Observation
    pub use flatland_obs::{percept, scan, ScannerFrame};

    // Evaluation
    pub use flatland_eval::{
        evaluate, evaluate_batch, BatchJob, BatchOptions, CancelToken, DirectPolicy, EvalContext,
        Evaluation, RegistryPolicy, Trace, TraceValue, FITNESS_MAX,
    };
}
