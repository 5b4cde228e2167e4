//! The episode state machine.
//!
//! An [`Episode`] owns the agent's position, energy, and age plus every
//! resource collection, and is mutated only through its own methods.
//! Each simulated tick is `advance_respawns()` followed by one
//! [`step()`](Episode::step) with the agent's resolved move command.
//! Episodes are exclusively owned by one evaluation for their entire
//! lifetime and never retained afterward.

use crate::layout::Layout;
use crate::resource::{next_respawn_position, Resource, RESPAWN_STRIDE};
use crate::ring;
use flatland_core::ResourceClass;
use indexmap::IndexSet;
use std::fmt;

/// Upper bound on agent energy.
pub const ENERGY_CAP: f32 = 100.0;
/// Energy at episode start.
pub const INITIAL_ENERGY: f32 = 50.0;
/// Per-tick metabolic cost, paid regardless of movement.
pub const BASE_METABOLIC: f32 = 0.08;
/// Additional metabolic cost per cell moved.
pub const MOVE_METABOLIC: f32 = 0.05;
/// Additional metabolic cost when standing still.
pub const IDLE_METABOLIC: f32 = 0.02;
/// Reward penalty for a blocked move into a wall.
pub const WALL_REWARD_PENALTY: f32 = 0.5;
/// Energy lost on a blocked move into a wall.
pub const WALL_ENERGY_PENALTY: f32 = 1.0;
/// Shaped reward granted for surviving one tick.
pub const SURVIVAL_REWARD: f32 = 0.01;
/// Quantization threshold for the move command.
pub const MOVE_THRESHOLD: f32 = 0.33;
/// Ring distance within which a predator consumes prey autonomously.
pub const PREDATOR_HUNT_RADIUS: i32 = 2;
/// Ring distance within which a predator pressures (but does not hit) the agent.
pub const PREDATOR_PRESSURE_RADIUS: i32 = 3;
/// Energy drained per predator pressure event.
pub const PREDATOR_PRESSURE_DRAIN: f32 = 0.4;
/// Potency boost a predator gains from consuming prey.
pub const PREDATOR_FEED_BOOST: f32 = 0.5;

/// Why an episode ended.
///
/// Checked in this priority order after every tick: depletion first,
/// then forage goal, then age limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminalReason {
    /// Energy reached zero.
    Depleted,
    /// The forage goal was met.
    ForageGoal,
    /// The tick budget ran out.
    AgeLimit,
}

impl TerminalReason {
    /// Stable trace name.
    pub fn name(self) -> &'static str {
        match self {
            TerminalReason::Depleted => "depleted",
            TerminalReason::ForageGoal => "forage_goal",
            TerminalReason::AgeLimit => "age_limit",
        }
    }
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accumulated per-episode event counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// Plants consumed by the agent.
    pub food_collected: u32,
    /// Poison cells hit by the agent.
    pub poison_hits: u32,
    /// Prey consumed by the agent.
    pub prey_collected: u32,
    /// Direct predator collisions.
    pub predator_hits: u32,
    /// Blocked moves into walls.
    pub wall_collisions: u32,
    /// Resources that completed a cooldown and respawned.
    pub resource_respawns: u32,
    /// Prey consumed by predators (social dynamics).
    pub prey_hunted: u32,
    /// Predator feeding events (social dynamics).
    pub predator_feeds: u32,
    /// Predator near-miss pressure events against the agent.
    pub predator_pressure_events: u32,
}

/// One evaluation's world state.
pub struct Episode {
    layout: Layout,
    position: i32,
    heading: i8,
    energy: f32,
    age: u32,
    reward_acc: f32,
    counters: Counters,
    plants: Vec<Resource>,
    prey: Vec<Resource>,
    poison: Vec<Resource>,
    predators: Vec<Resource>,
    walls: IndexSet<i32>,
    respawn_cursor: i32,
    last_move_step: i32,
}

impl Episode {
    /// Construct the initial episode state for a resolved layout.
    pub fn new(layout: &Layout) -> Self {
        let spawn = |cells: &[i32], class: ResourceClass| -> Vec<Resource> {
            cells.iter().map(|&c| Resource::new(class, c)).collect()
        };
        Self {
            position: layout.start_cell,
            heading: layout.heading,
            energy: INITIAL_ENERGY,
            age: 0,
            reward_acc: 0.0,
            counters: Counters::default(),
            plants: spawn(&layout.plants, ResourceClass::Plant),
            prey: spawn(&layout.prey, ResourceClass::Prey),
            poison: spawn(&layout.poison, ResourceClass::Poison),
            predators: spawn(&layout.predators, ResourceClass::Predator),
            walls: layout.walls.iter().copied().collect(),
            respawn_cursor: layout.start_cell,
            last_move_step: 0,
            layout: layout.clone(),
        }
    }

    // ── Read access ─────────────────────────────────────────────

    /// The layout this episode was constructed from.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current agent cell.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Current heading (`+1` or `-1`); affects scanner probes only.
    pub fn heading(&self) -> i8 {
        self.heading
    }

    /// Current energy, in `[0, ENERGY_CAP]`.
    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Ticks executed so far.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Running shaped-reward accumulator.
    pub fn reward_acc(&self) -> f32 {
        self.reward_acc
    }

    /// Event counters.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Ring size in cells.
    pub fn ring_len(&self) -> i32 {
        self.layout.ring_len
    }

    /// The resource collection for one class.
    pub fn resources(&self, class: ResourceClass) -> &[Resource] {
        match class {
            ResourceClass::Plant => &self.plants,
            ResourceClass::Prey => &self.prey,
            ResourceClass::Poison => &self.poison,
            ResourceClass::Predator => &self.predators,
        }
    }

    /// Wall cells.
    pub fn walls(&self) -> &IndexSet<i32> {
        &self.walls
    }

    /// Move step applied by the most recent [`step()`](Episode::step).
    pub fn last_move_step(&self) -> i32 {
        self.last_move_step
    }

    // ── Respawn tick ────────────────────────────────────────────

    /// Advance every resource cooldown by one tick.
    ///
    /// A cooldown that reaches zero relocates the resource via the
    /// deterministic quadratic probe and resets potency to the class
    /// minimum; active resources grow potency toward the class maximum.
    pub fn advance_respawns(&mut self) {
        for class in ResourceClass::ALL {
            for idx in 0..self.resources(class).len() {
                let (active, cooldown, previous) = {
                    let r = &self.class_vec(class)[idx];
                    (r.is_active(), r.cooldown, r.position)
                };
                if active {
                    self.class_vec_mut(class)[idx].grow();
                    continue;
                }
                let cooldown = cooldown - 1;
                if cooldown > 0 {
                    self.class_vec_mut(class)[idx].cooldown = cooldown;
                    continue;
                }
                let occupied = self.occupancy(previous);
                let placed = next_respawn_position(self.respawn_cursor, self.ring_len(), &occupied);
                if let Some(cell) = placed {
                    // Roll the cursor so consecutive respawns fan out.
                    self.respawn_cursor =
                        ring::wrap(cell + RESPAWN_STRIDE as i32, self.layout.ring_len);
                }
                let r = &mut self.class_vec_mut(class)[idx];
                r.cooldown = 0;
                r.potency = class.params().potency_min;
                // Ring exhausted: fall back to the vacated cell.
                r.position = placed.unwrap_or(previous);
                self.counters.resource_respawns += 1;
            }
        }
    }

    /// Occupancy mask for respawn placement: walls, active resources,
    /// the agent's cell, and the vacated `previous` cell.
    fn occupancy(&self, previous: i32) -> Vec<bool> {
        let mut occupied = vec![false; self.ring_len() as usize];
        for &w in &self.walls {
            occupied[w as usize] = true;
        }
        for class in ResourceClass::ALL {
            for r in self.resources(class) {
                if r.is_active() {
                    occupied[r.position as usize] = true;
                }
            }
        }
        occupied[self.position as usize] = true;
        occupied[previous as usize] = true;
        occupied
    }

    // ── One tick ────────────────────────────────────────────────

    /// Apply one agent move and advance the world by one tick.
    ///
    /// Clamps and quantizes `command`, resolves wall collision or
    /// movement plus consumption, runs social dynamics when enabled,
    /// applies metabolic cost, and returns the terminal reason if one
    /// fired this tick.
    pub fn step(&mut self, command: f32) -> Option<TerminalReason> {
        let move_step = quantize(command.clamp(-1.0, 1.0));
        self.last_move_step = move_step;

        let target = ring::wrap(self.position + move_step, self.layout.ring_len);
        if move_step != 0 && self.walls.contains(&target) {
            self.counters.wall_collisions += 1;
            self.reward_acc -= WALL_REWARD_PENALTY;
            self.energy = (self.energy - WALL_ENERGY_PENALTY).max(0.0);
        } else {
            self.position = target;
            // Each class is consumed independently; priority order is
            // plant, prey, poison, predator.
            for class in ResourceClass::ALL {
                self.consume_at(class, target);
            }
        }

        if self.layout.social_dynamics {
            self.resolve_social_dynamics();
        }

        let mut cost = BASE_METABOLIC + MOVE_METABOLIC * move_step.abs() as f32;
        if move_step == 0 {
            cost += IDLE_METABOLIC;
        }
        self.energy = (self.energy - cost).max(0.0);

        self.reward_acc += SURVIVAL_REWARD;
        self.age += 1;
        self.terminal_state()
    }

    /// Consume the first active resource of `class` at `position`.
    ///
    /// Applies the energy delta clamped into `[0, ENERGY_CAP]`, adjusts
    /// the shaped reward by `potency / class_max`, bumps the class
    /// counter, and puts the resource into cooldown.
    fn consume_at(&mut self, class: ResourceClass, position: i32) {
        let Some(idx) = self
            .resources(class)
            .iter()
            .position(|r| r.is_active() && r.position == position)
        else {
            return;
        };
        let params = class.params();
        let r = &mut self.class_vec_mut(class)[idx];
        let potency = params.clamp_potency(r.potency);
        r.begin_cooldown();

        let share = potency / params.potency_max;
        if class.is_nourishing() {
            self.energy = (self.energy + potency).min(ENERGY_CAP);
            self.reward_acc += share;
        } else {
            self.energy = (self.energy - potency).max(0.0);
            self.reward_acc -= share;
        }
        match class {
            ResourceClass::Plant => self.counters.food_collected += 1,
            ResourceClass::Prey => self.counters.prey_collected += 1,
            ResourceClass::Poison => self.counters.poison_hits += 1,
            ResourceClass::Predator => self.counters.predator_hits += 1,
        }
    }

    /// Autonomous predator behavior, independent of the agent's move.
    ///
    /// A predator within [`PREDATOR_HUNT_RADIUS`] of an active prey
    /// consumes it and gains potency. A predator within
    /// [`PREDATOR_PRESSURE_RADIUS`] of the agent without colliding
    /// drains a little energy and counts a pressure event.
    fn resolve_social_dynamics(&mut self) {
        let len = self.layout.ring_len;
        for pi in 0..self.predators.len() {
            if !self.predators[pi].is_active() {
                continue;
            }
            let predator_cell = self.predators[pi].position;

            if let Some(qi) = self.prey.iter().position(|q| {
                q.is_active() && ring::distance(predator_cell, q.position, len) <= PREDATOR_HUNT_RADIUS
            }) {
                self.prey[qi].begin_cooldown();
                let predator = &mut self.predators[pi];
                let params = predator.class.params();
                predator.potency = params.clamp_potency(predator.potency + PREDATOR_FEED_BOOST);
                self.counters.prey_hunted += 1;
                self.counters.predator_feeds += 1;
            }

            let agent_distance = ring::distance(predator_cell, self.position, len);
            if agent_distance > 0 && agent_distance <= PREDATOR_PRESSURE_RADIUS {
                self.energy = (self.energy - PREDATOR_PRESSURE_DRAIN).max(0.0);
                self.counters.predator_pressure_events += 1;
            }
        }
    }

    /// Current terminal condition, if any, in priority order.
    pub fn terminal_state(&self) -> Option<TerminalReason> {
        if self.energy <= 0.0 {
            Some(TerminalReason::Depleted)
        } else if self.counters.food_collected >= self.layout.forage_goal {
            Some(TerminalReason::ForageGoal)
        } else if self.age >= self.layout.max_age {
            Some(TerminalReason::AgeLimit)
        } else {
            None
        }
    }

    fn class_vec(&self, class: ResourceClass) -> &Vec<Resource> {
        match class {
            ResourceClass::Plant => &self.plants,
            ResourceClass::Prey => &self.prey,
            ResourceClass::Poison => &self.poison,
            ResourceClass::Predator => &self.predators,
        }
    }

    fn class_vec_mut(&mut self, class: ResourceClass) -> &mut Vec<Resource> {
        match class {
            ResourceClass::Plant => &mut self.plants,
            ResourceClass::Prey => &mut self.prey,
            ResourceClass::Poison => &mut self.poison,
            ResourceClass::Predator => &mut self.predators,
        }
    }
}

impl fmt::Debug for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Episode")
            .field("mode", &self.layout.mode)
            .field("position", &self.position)
            .field("energy", &self.energy)
            .field("age", &self.age)
            .field("counters", &self.counters)
            .finish()
    }
}

/// Quantize a clamped move command into `{-1, 0, +1}`.
fn quantize(command: f32) -> i32 {
    if command > MOVE_THRESHOLD {
        1
    } else if command < -MOVE_THRESHOLD {
        -1
    } else {
        0
    }
}
