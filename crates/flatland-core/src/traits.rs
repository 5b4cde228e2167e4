//! Core traits implemented across the workspace.

use crate::{Control, PolicyError};

/// An agent control policy: maps one percept to one control signal.
///
/// This is the single seam between the simulation core and whatever
/// substrate implements the agent. Implementations may be stateful
/// (ticked networks keep activations between calls). A returned error
/// is terminal for the evaluation and propagates to the caller
/// unchanged.
pub trait Policy {
    /// Decide one control signal for the given percept.
    fn decide(&mut self, percept: &[f32]) -> Result<Control, PolicyError>;
}

/// A tick-and-poll network with named sensor and actuator registries.
///
/// The alternative to a direct percept-to-control function: the driver
/// writes percept slices into named sensor slots, ticks the network
/// once, and reads back the actuator's last emitted values. Adapted to
/// [`Policy`] by `RegistryPolicy` in the evaluation crate.
pub trait SensorNet {
    /// Write `values` into the named sensor slot.
    ///
    /// Returns `false` when the network does not declare the slot.
    /// An absent *optional* slot is not an error — the channel simply
    /// stays unset for this network.
    fn set_sensor(&mut self, slot: &str, values: &[f32]) -> bool;

    /// Advance the network by one tick.
    fn tick(&mut self) -> Result<(), PolicyError>;

    /// The named actuator's last emitted values, if the actuator exists.
    fn actuator(&self, name: &str) -> Option<&[f32]>;
}
