//! Policy adapters: direct step functions and tick-and-poll networks.
//!
//! The simulation core consumes exactly one capability: a
//! `(percept) -> control` decision. [`DirectPolicy`] wraps a plain
//! closure; [`RegistryPolicy`] adapts a [`SensorNet`] — a stateful
//! network with named sensor and actuator registries — onto the same
//! seam, so the core never branches on the agent kind.

use flatland_core::{Control, Policy, PolicyError, SensorNet, DIRECT_SIGNALS, SCAN_BINS};

/// Sensor slot name for the direct signal block.
pub const SLOT_DIRECT: &str = "direct";
/// Sensor slot name for the scanner distance vector.
pub const SLOT_SCAN_DISTANCE: &str = "scan_distance";
/// Sensor slot name for the scanner color vector.
pub const SLOT_SCAN_COLOR: &str = "scan_color";
/// Sensor slot name for the scanner energy vector.
pub const SLOT_SCAN_ENERGY: &str = "scan_energy";

/// A policy backed by a single synchronous decision function.
pub struct DirectPolicy<F> {
    decide: F,
}

impl<F> DirectPolicy<F>
where
    F: FnMut(&[f32]) -> Result<Control, PolicyError>,
{
    /// Wrap a decision function.
    pub fn new(decide: F) -> Self {
        Self { decide }
    }
}

impl<F> Policy for DirectPolicy<F>
where
    F: FnMut(&[f32]) -> Result<Control, PolicyError>,
{
    fn decide(&mut self, percept: &[f32]) -> Result<Control, PolicyError> {
        (self.decide)(percept)
    }
}

/// Adapts a tick-and-poll [`SensorNet`] to the [`Policy`] seam.
///
/// Each decision writes the percept slices into the network's named
/// sensor slots, ticks it once, and reads the actuator's last emitted
/// values: one channel maps to [`Control::Scalar`], two to
/// [`Control::Drive`]. A sensor slot the network does not declare is
/// skipped silently (optional channel); a missing actuator or an
/// unsupported output arity fails the evaluation.
pub struct RegistryPolicy<N> {
    net: N,
    actuator: String,
}

impl<N: SensorNet> RegistryPolicy<N> {
    /// Adapt `net`, reading control output from the named actuator.
    pub fn new(net: N, actuator: impl Into<String>) -> Self {
        Self {
            net,
            actuator: actuator.into(),
        }
    }

    /// The adapted network.
    pub fn net(&self) -> &N {
        &self.net
    }
}

impl<N: SensorNet> Policy for RegistryPolicy<N> {
    fn decide(&mut self, percept: &[f32]) -> Result<Control, PolicyError> {
        let (direct, scans) = percept.split_at(DIRECT_SIGNALS);
        let (scan_distance, rest) = scans.split_at(SCAN_BINS);
        let (scan_color, scan_energy) = rest.split_at(SCAN_BINS);

        // Undeclared slots are optional channels, not errors.
        self.net.set_sensor(SLOT_DIRECT, direct);
        self.net.set_sensor(SLOT_SCAN_DISTANCE, scan_distance);
        self.net.set_sensor(SLOT_SCAN_COLOR, scan_color);
        self.net.set_sensor(SLOT_SCAN_ENERGY, scan_energy);

        self.net.tick()?;

        let out = self
            .net
            .actuator(&self.actuator)
            .ok_or_else(|| PolicyError::MissingActuator {
                name: self.actuator.clone(),
            })?;
        match out {
            [v] => Ok(Control::Scalar(*v)),
            [left, right] => Ok(Control::Drive {
                left: *left,
                right: *right,
            }),
            other => Err(PolicyError::BadActuatorArity { got: other.len() }),
        }
    }
}
