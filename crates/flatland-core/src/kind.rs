//! Resource classes and their per-class parameter tables.
//!
//! Every consumable in the world (plants, prey, poison, predators) shares
//! one shape; what distinguishes the classes is the [`ClassParams`] table:
//! respawn delay, potency bounds, per-tick potency growth, and the color
//! constant the scanner reports. Walls are static terrain and appear only
//! as an [`EntityKind`] for sensing.

use std::fmt;

/// Class of a consumable resource instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceClass {
    /// Stationary energy source.
    Plant,
    /// Mobile-in-spirit energy source (richer than plants).
    Prey,
    /// Energy drain on contact.
    Poison,
    /// Heavy energy drain; participates in social dynamics.
    Predator,
}

impl ResourceClass {
    /// All classes in the canonical sensing order.
    ///
    /// This order is the tie-break for nearest-entity classification:
    /// first-seen in this order wins. It is reproducible, not meaningful.
    pub const ALL: [ResourceClass; 4] = [
        ResourceClass::Plant,
        ResourceClass::Prey,
        ResourceClass::Poison,
        ResourceClass::Predator,
    ];

    /// Whether consuming this class adds energy (`true`) or drains it.
    pub fn is_nourishing(self) -> bool {
        matches!(self, ResourceClass::Plant | ResourceClass::Prey)
    }

    /// The per-class parameter table.
    pub fn params(self) -> &'static ClassParams {
        match self {
            ResourceClass::Plant => &PLANT_PARAMS,
            ResourceClass::Prey => &PREY_PARAMS,
            ResourceClass::Poison => &POISON_PARAMS,
            ResourceClass::Predator => &PREDATOR_PARAMS,
        }
    }

    /// Stable lowercase name used in trace fields.
    pub fn name(self) -> &'static str {
        match self {
            ResourceClass::Plant => "plant",
            ResourceClass::Prey => "prey",
            ResourceClass::Poison => "poison",
            ResourceClass::Predator => "predator",
        }
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything the scanner can classify at a probe point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A consumable resource of the given class.
    Resource(ResourceClass),
    /// A static wall cell.
    Wall,
}

impl EntityKind {
    /// Scanner color constant for this entity kind.
    ///
    /// Distinct per class; `0.0` is reserved for "nothing found".
    /// These values are part of the trace compatibility surface.
    pub fn color(self) -> f32 {
        match self {
            EntityKind::Resource(ResourceClass::Plant) => 0.2,
            EntityKind::Resource(ResourceClass::Prey) => 0.4,
            EntityKind::Resource(ResourceClass::Poison) => 0.6,
            EntityKind::Resource(ResourceClass::Predator) => 0.8,
            EntityKind::Wall => 1.0,
        }
    }
}

impl From<ResourceClass> for EntityKind {
    fn from(class: ResourceClass) -> Self {
        EntityKind::Resource(class)
    }
}

/// Per-class resource parameters.
///
/// The concrete values below are a compatibility surface: fitness traces
/// are only comparable across builds if these stay bit-identical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassParams {
    /// Ticks a consumed resource stays inactive before respawning.
    pub respawn_delay: u32,
    /// Potency immediately after (re)spawn.
    pub potency_min: f32,
    /// Potency ceiling while active.
    pub potency_max: f32,
    /// Per-tick potency growth while active.
    pub growth_rate: f32,
}

impl ClassParams {
    /// Clamp a potency value into this class's `[min, max]` band.
    pub fn clamp_potency(&self, potency: f32) -> f32 {
        potency.clamp(self.potency_min, self.potency_max)
    }
}

/// Plant class table.
pub static PLANT_PARAMS: ClassParams = ClassParams {
    respawn_delay: 25,
    potency_min: 1.5,
    potency_max: 3.5,
    growth_rate: 0.05,
};

/// Prey class table.
pub static PREY_PARAMS: ClassParams = ClassParams {
    respawn_delay: 40,
    potency_min: 2.0,
    potency_max: 5.0,
    growth_rate: 0.08,
};

/// Poison class table.
pub static POISON_PARAMS: ClassParams = ClassParams {
    respawn_delay: 30,
    potency_min: 1.0,
    potency_max: 3.0,
    growth_rate: 0.05,
};

/// Predator class table.
pub static PREDATOR_PARAMS: ClassParams = ClassParams {
    respawn_delay: 60,
    potency_min: 2.5,
    potency_max: 6.0,
    growth_rate: 0.05,
};
