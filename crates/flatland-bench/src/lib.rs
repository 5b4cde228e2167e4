//! Benchmark profiles and utilities for the Flatland fitness scape.
//!
//! Provides pre-built episodes and agent-id batches so the bench
//! targets measure stepping and evaluation, not setup:
//!
//! - [`gt_episode`]: a fresh episode on the ground-truth layout
//! - [`benchmark_episode`]: an agent-keyed benchmark-mode episode
//! - [`agent_ids`]: a deterministic batch of agent identifiers

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use flatland_world::{Episode, Layout, Mode};

/// A fresh episode on the ground-truth layout.
pub fn gt_episode() -> Episode {
    let layout = Layout::resolve(Mode::Gt, "").expect("gt layout is statically valid");
    Episode::new(&layout)
}

/// A fresh benchmark-mode episode keyed by `agent_id`.
pub fn benchmark_episode(agent_id: &str) -> Episode {
    let layout =
        Layout::resolve(Mode::Benchmark, agent_id).expect("benchmark layouts are statically valid");
    Episode::new(&layout)
}

/// `n` deterministic agent identifiers for batch benchmarks.
pub fn agent_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("bench-agent-{i}")).collect()
}
