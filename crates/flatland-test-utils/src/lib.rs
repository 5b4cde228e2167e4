//! Test fixtures and scripted policies for Flatland development.
//!
//! Four standard policies for driver and batch testing, plus a
//! scripted sensor network:
//!
//! - [`StationaryPolicy`] — always emits a zero command.
//! - [`ConstPolicy`] — always emits the same scalar command.
//! - [`GreedyForager`] — steps toward the strongest food heading.
//! - [`FailingPolicy`] — fails deterministically after N calls.
//! - [`ScriptNet`] — a [`SensorNet`] that replays a fixed actuator
//!   output and records every sensor write.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use flatland_core::{Control, Policy, PolicyError, SensorNet};
use flatland_obs::signal;

/// Emits a zero command every tick; the agent never moves.
///
/// Useful as a behavioural baseline: it exercises idle consumption,
/// metabolic drain, and predator pressure without any navigation.
pub struct StationaryPolicy;

impl Policy for StationaryPolicy {
    fn decide(&mut self, _percept: &[f32]) -> Result<Control, PolicyError> {
        Ok(Control::Scalar(0.0))
    }
}

/// Emits the same scalar command every tick.
pub struct ConstPolicy {
    pub command: f32,
}

impl ConstPolicy {
    pub fn new(command: f32) -> Self {
        Self { command }
    }
}

impl Policy for ConstPolicy {
    fn decide(&mut self, _percept: &[f32]) -> Result<Control, PolicyError> {
        Ok(Control::Scalar(self.command))
    }
}

/// Steps in the direction of the food-heading signal.
///
/// Not a clever agent — it ignores poison and predators entirely —
/// but it reliably out-forages [`StationaryPolicy`], which is all the
/// driver tests need.
pub struct GreedyForager;

impl GreedyForager {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        GreedyForager
    }
}

impl Policy for GreedyForager {
    fn decide(&mut self, percept: &[f32]) -> Result<Control, PolicyError> {
        let heading = percept.get(signal::FOOD_HEADING).copied().unwrap_or(0.0);
        Ok(Control::Scalar(heading.signum()))
    }
}

/// Fails deterministically after a configurable number of successful
/// calls.
pub struct FailingPolicy {
    calls: AtomicUsize,
    fail_after: usize,
}

impl FailingPolicy {
    /// Succeed `fail_after` times, then fail on every later call.
    pub fn after(fail_after: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_after,
        }
    }
}

impl Policy for FailingPolicy {
    fn decide(&mut self, _percept: &[f32]) -> Result<Control, PolicyError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_after {
            Ok(Control::Scalar(0.0))
        } else {
            Err(PolicyError::ExecutionFailed {
                reason: format!("scripted failure on call {call}"),
            })
        }
    }
}

/// Scripted [`SensorNet`] with a fixed `"drive"` actuator output.
///
/// Declares all four standard sensor slots by default; restrict with
/// [`with_slots`](ScriptNet::with_slots). Every accepted sensor write
/// is recorded and retrievable via [`written`](ScriptNet::written),
/// so adapter tests can verify exactly what landed in each slot.
pub struct ScriptNet {
    output: Vec<f32>,
    slots: Vec<String>,
    writes: HashMap<String, Vec<f32>>,
    ticks: usize,
}

impl ScriptNet {
    /// A net whose `"drive"` actuator always reads back `output`.
    pub fn new(output: Vec<f32>) -> Self {
        Self {
            output,
            slots: ["direct", "scan_distance", "scan_color", "scan_energy"]
                .into_iter()
                .map(String::from)
                .collect(),
            writes: HashMap::new(),
            ticks: 0,
        }
    }

    /// Replace the declared sensor slots.
    pub fn with_slots(mut self, slots: &[&str]) -> Self {
        self.slots = slots.iter().map(|s| s.to_string()).collect();
        self
    }

    /// The values last written to `slot`, if any write was accepted.
    pub fn written(&self, slot: &str) -> Option<&[f32]> {
        self.writes.get(slot).map(Vec::as_slice)
    }

    /// Number of [`tick`](SensorNet::tick) calls so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

impl SensorNet for ScriptNet {
    fn set_sensor(&mut self, slot: &str, values: &[f32]) -> bool {
        if !self.slots.iter().any(|s| s == slot) {
            return false;
        }
        self.writes.insert(slot.to_string(), values.to_vec());
        true
    }

    fn tick(&mut self) -> Result<(), PolicyError> {
        self.ticks += 1;
        Ok(())
    }

    fn actuator(&self, name: &str) -> Option<&[f32]> {
        (name == "drive").then_some(self.output.as_slice())
    }
}
