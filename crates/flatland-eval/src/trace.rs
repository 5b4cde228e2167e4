//! The structured diagnostic trace emitted with every fitness value.
//!
//! A trace is a flat, insertion-ordered map. Field names, types, and
//! ordering are a compatibility surface for downstream consumers
//! (population analytics, replay comparison); add fields at the end,
//! never rename or retype existing ones.

use flatland_core::{ControlSurface, DIRECT_SIGNALS, SCAN_BINS};
use flatland_world::{Episode, TerminalReason};
use indexmap::IndexMap;

/// One trace field value.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceValue {
    /// A continuous quantity.
    Scalar(f64),
    /// An event counter.
    Count(u64),
    /// A symbolic name.
    Text(String),
    /// A fixed-width vector (sense values, scanner bins, weights).
    Series(Vec<f32>),
}

/// Flat diagnostic record for one evaluation.
pub type Trace = IndexMap<&'static str, TraceValue>;

/// Assemble the trace for a finished episode.
///
/// `last_percept` is the percept handed to the policy on the final
/// executed tick; `surface` is the control surface of the last control
/// the policy emitted.
pub fn build(
    episode: &Episode,
    terminal: TerminalReason,
    last_percept: &[f32],
    surface: ControlSurface,
) -> Trace {
    let layout = episode.layout();
    let counters = episode.counters();
    let mut trace = Trace::new();

    trace.insert("age", TraceValue::Count(episode.age() as u64));
    trace.insert("energy", TraceValue::Scalar(episode.energy() as f64));
    trace.insert("reward_acc", TraceValue::Scalar(episode.reward_acc() as f64));
    trace.insert(
        "food_collected",
        TraceValue::Count(counters.food_collected as u64),
    );
    trace.insert(
        "prey_collected",
        TraceValue::Count(counters.prey_collected as u64),
    );
    trace.insert("poison_hits", TraceValue::Count(counters.poison_hits as u64));
    trace.insert(
        "predator_hits",
        TraceValue::Count(counters.predator_hits as u64),
    );
    trace.insert(
        "wall_collisions",
        TraceValue::Count(counters.wall_collisions as u64),
    );
    trace.insert(
        "resource_respawns",
        TraceValue::Count(counters.resource_respawns as u64),
    );
    trace.insert("prey_hunted", TraceValue::Count(counters.prey_hunted as u64));
    trace.insert(
        "predator_feeds",
        TraceValue::Count(counters.predator_feeds as u64),
    );
    trace.insert(
        "predator_pressure_events",
        TraceValue::Count(counters.predator_pressure_events as u64),
    );

    let direct = &last_percept[..DIRECT_SIGNALS];
    trace.insert("sense_direct", TraceValue::Series(direct.to_vec()));
    let frame = slice_scanner(last_percept);
    trace.insert("scan_distance", TraceValue::Series(frame.0));
    trace.insert("scan_color", TraceValue::Series(frame.1));
    trace.insert("scan_energy", TraceValue::Series(frame.2));

    trace.insert(
        "scan_profile",
        TraceValue::Text(layout.profile.name().into()),
    );
    trace.insert(
        "scan_weights",
        TraceValue::Series(layout.profile.weights().to_vec()),
    );

    trace.insert("mode", TraceValue::Text(layout.mode.name().into()));
    trace.insert("layout_variant", TraceValue::Count(layout.variant as u64));
    trace.insert("layout_shift", TraceValue::Count(layout.shift as u64));
    trace.insert(
        "initial_heading",
        TraceValue::Scalar(layout.heading as f64),
    );

    trace.insert("terminal_reason", TraceValue::Text(terminal.name().into()));
    trace.insert("control_surface", TraceValue::Text(surface.name().into()));
    trace.insert("control_width", TraceValue::Count(surface.width() as u64));
    trace
}

/// A zeroed trace for an evaluation that executed no ticks.
pub fn zeroed() -> Trace {
    Trace::new()
}

/// Recover the three scanner vectors from an assembled percept.
fn slice_scanner(percept: &[f32]) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let scans = &percept[DIRECT_SIGNALS..];
    (
        scans[..SCAN_BINS].to_vec(),
        scans[SCAN_BINS..2 * SCAN_BINS].to_vec(),
        scans[2 * SCAN_BINS..3 * SCAN_BINS].to_vec(),
    )
}
