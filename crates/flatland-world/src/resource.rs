//! The uniform resource representation and respawn placement.
//!
//! Plants, prey, poison, and predators all share one shape: a ring
//! position, a respawn cooldown, and a potency value that drifts toward
//! the class maximum while active. A resource with `cooldown > 0` is
//! inert — never sensed, never collided with, and not counted as
//! occupying a cell for respawn placement.

use crate::ring;
use flatland_core::ResourceClass;

/// Probe stride for respawn placement.
///
/// Combined with the quadratic term this visits cells in a fixed,
/// non-repeating pattern per sweep, so placement stays deterministic
/// while spreading respawns away from the cursor.
pub(crate) const RESPAWN_STRIDE: i64 = 7;

/// One consumable resource instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    /// Class this instance belongs to.
    pub class: ResourceClass,
    /// Cell index, always normalized to `[0, ring_len)`.
    pub position: i32,
    /// Ticks remaining before the resource is active again; `0` = active.
    pub cooldown: u32,
    /// Effect magnitude: energy gain for plant/prey, damage otherwise.
    pub potency: f32,
}

impl Resource {
    /// Create an active resource at `position` with the class minimum potency.
    pub fn new(class: ResourceClass, position: i32) -> Self {
        Self {
            class,
            position,
            cooldown: 0,
            potency: class.params().potency_min,
        }
    }

    /// Whether the resource is active (sensable, collidable, consumable).
    pub fn is_active(&self) -> bool {
        self.cooldown == 0
    }

    /// Grow potency toward the class maximum by one tick's increment.
    pub fn grow(&mut self) {
        let params = self.class.params();
        self.potency = (self.potency + params.growth_rate).min(params.potency_max);
    }

    /// Put the resource into its class cooldown and reset potency.
    pub fn begin_cooldown(&mut self) {
        let params = self.class.params();
        self.cooldown = params.respawn_delay;
        self.potency = params.potency_min;
    }
}

/// Find the next free cell for a respawning resource.
///
/// Scans deterministically from `cursor` with a quadratic stride
/// (`cursor + k*STRIDE + k*k` for increasing `k`), skipping every cell
/// marked occupied. `occupied` must already mark walls, active
/// resources, the agent's cell, and the vacated `previous` cell.
/// Returns `None` when a full ring sweep finds no free cell; the caller
/// falls back to `previous`.
pub(crate) fn next_respawn_position(cursor: i32, len: i32, occupied: &[bool]) -> Option<i32> {
    debug_assert_eq!(occupied.len(), len as usize);
    for k in 0..len as i64 {
        let raw = cursor as i64 + k * RESPAWN_STRIDE + k * k;
        let p = ring::wrap((raw % len as i64) as i32, len);
        if !occupied[p as usize] {
            return Some(p);
        }
    }
    None
}
