//! Sensing model for the Flatland evaluation scape.
//!
//! Percepts are assembled read-only from an [`Episode`]: ten direct
//! heading/proximity/balance signals followed by the three directional
//! scanner vectors (distance, color, energy), each weighted by the
//! layout's scanner profile. The percept layout — signal order and
//! total width — is a compatibility surface for trained policies.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direct;
pub mod scanner;

pub use scanner::{nearest_entity_from, scan, ScannerFrame};

use flatland_core::{ResourceClass, PERCEPT_WIDTH};
use flatland_world::Episode;

/// Indices of the direct signals within an assembled percept.
///
/// Part of the percept compatibility surface; policies trained against
/// one ordering are invalid under any other.
pub mod signal {
    /// Compound food-attraction signal.
    pub const DISTANCE_TO_FOOD: usize = 0;
    /// Heading toward the nearest active plant.
    pub const FOOD_HEADING: usize = 1;
    /// Heading toward the nearest active prey.
    pub const PREY_HEADING: usize = 2;
    /// Heading toward the nearest active poison.
    pub const POISON_HEADING: usize = 3;
    /// Heading toward the nearest active predator.
    pub const PREDATOR_HEADING: usize = 4;
    /// Heading toward the nearest wall.
    pub const WALL_HEADING: usize = 5;
    /// Proximity of the nearest active plant.
    pub const FOOD_PROXIMITY: usize = 6;
    /// Proximity of the nearest active poison.
    pub const POISON_PROXIMITY: usize = 7;
    /// Proximity of the nearest wall.
    pub const WALL_PROXIMITY: usize = 8;
    /// Active-count balance of plants versus poison.
    pub const FOOD_POISON_BALANCE: usize = 9;
}

/// Assemble the full percept for the episode's current state.
///
/// Order: `[distance_to_food, food_heading, prey_heading,
/// poison_heading, predator_heading, wall_heading, food_proximity,
/// poison_proximity, wall_proximity, food_poison_balance]`, then the
/// weighted distance, color, and energy scan vectors.
pub fn percept(episode: &Episode) -> Vec<f32> {
    let mut out = Vec::with_capacity(PERCEPT_WIDTH);
    out.push(direct::distance_to_food(episode));
    out.push(direct::heading_signal(episode, ResourceClass::Plant));
    out.push(direct::heading_signal(episode, ResourceClass::Prey));
    out.push(direct::heading_signal(episode, ResourceClass::Poison));
    out.push(direct::heading_signal(episode, ResourceClass::Predator));
    out.push(direct::wall_heading(episode));
    out.push(direct::proximity(episode, ResourceClass::Plant));
    out.push(direct::proximity(episode, ResourceClass::Poison));
    out.push(direct::wall_proximity(episode));
    out.push(direct::balance(
        episode,
        ResourceClass::Plant,
        ResourceClass::Poison,
    ));

    let frame = scanner::scan(episode);
    out.extend_from_slice(&frame.distance);
    out.extend_from_slice(&frame.color);
    out.extend_from_slice(&frame.energy);

    debug_assert_eq!(out.len(), PERCEPT_WIDTH);
    out
}
