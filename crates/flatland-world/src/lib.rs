//! The Flatland world: a toroidal 1-D ring populated with resources.
//!
//! This crate owns everything that mutates during an episode: ring
//! geometry, the uniform resource representation with cooldown-driven
//! respawn, per-mode deterministic layouts, and the [`Episode`] state
//! machine that advances one discrete tick per call.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod episode;
pub mod layout;
pub mod resource;
pub mod ring;

pub use episode::{Counters, Episode, TerminalReason};
pub use layout::{Layout, Mode};
pub use resource::Resource;
