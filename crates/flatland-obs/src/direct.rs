//! Direct heading, proximity, and balance signals.
//!
//! All signals derive from [`resource_signal_delta`] and
//! [`nearest_wall_delta`], which report the signed ring delta and
//! distance to the nearest *active* member of a class. A resource in
//! cooldown is invisible. Nearest-member ties keep the first found in
//! collection order; that order is reproducible, not meaningful.

use flatland_core::ResourceClass;
use flatland_world::{ring, Episode};

/// Poison-avoidance damping weight in [`distance_to_food`].
const POISON_AVOIDANCE: f32 = 0.6;
/// Wall-avoidance damping weight in [`distance_to_food`].
const WALL_AVOIDANCE: f32 = 0.3;
/// Cells of slack before nearby poison stops damping the food signal.
const POISON_SLACK: i32 = 2;
/// Wall distance at which the wall-avoidance term engages.
const WALL_RANGE: i32 = 2;

/// Signed delta and distance to the nearest active member of `class`.
///
/// Returns `None` when no member of the class is currently active.
pub fn resource_signal_delta(episode: &Episode, class: ResourceClass) -> Option<(i32, i32)> {
    let len = episode.ring_len();
    let origin = episode.position();
    let mut best: Option<(i32, i32)> = None;
    for r in episode.resources(class) {
        if !r.is_active() {
            continue;
        }
        let delta = ring::signed_distance(origin, r.position, len);
        let dist = delta.abs();
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((delta, dist));
        }
    }
    best
}

/// Signed delta and distance to the nearest wall cell.
pub fn nearest_wall_delta(episode: &Episode) -> Option<(i32, i32)> {
    let len = episode.ring_len();
    let origin = episode.position();
    let mut best: Option<(i32, i32)> = None;
    for &w in episode.walls() {
        let delta = ring::signed_distance(origin, w, len);
        let dist = delta.abs();
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((delta, dist));
        }
    }
    best
}

/// Normalized signed heading toward the nearest active member of `class`.
///
/// `0.0` when no member is active.
pub fn heading_signal(episode: &Episode, class: ResourceClass) -> f32 {
    match resource_signal_delta(episode, class) {
        Some((delta, _)) => (delta as f32 / episode.layout().half_world()).clamp(-1.0, 1.0),
        None => 0.0,
    }
}

/// Normalized signed heading toward the nearest wall.
pub fn wall_heading(episode: &Episode) -> f32 {
    match nearest_wall_delta(episode) {
        Some((delta, _)) => (delta as f32 / episode.layout().half_world()).clamp(-1.0, 1.0),
        None => 0.0,
    }
}

/// Proximity to the nearest active member of `class`: `1` on top of it,
/// `0` at half the ring or farther (or when none is active).
pub fn proximity(episode: &Episode, class: ResourceClass) -> f32 {
    match resource_signal_delta(episode, class) {
        Some((_, dist)) => proximity_from_distance(dist, episode.layout().half_world()),
        None => 0.0,
    }
}

/// Proximity to the nearest wall cell.
pub fn wall_proximity(episode: &Episode) -> f32 {
    match nearest_wall_delta(episode) {
        Some((_, dist)) => proximity_from_distance(dist, episode.layout().half_world()),
        None => 0.0,
    }
}

/// Active-count balance between two classes, in `[-1, 1]`.
///
/// Positive favors `a`; `0.0` when both classes are fully in cooldown.
pub fn balance(episode: &Episode, a: ResourceClass, b: ResourceClass) -> f32 {
    let count = |class| {
        episode
            .resources(class)
            .iter()
            .filter(|r| r.is_active())
            .count() as f32
    };
    let active_a = count(a);
    let active_b = count(b);
    if active_a + active_b == 0.0 {
        return 0.0;
    }
    ((active_a - active_b) / (active_a + active_b)).clamp(-1.0, 1.0)
}

/// Compound food-attraction signal.
///
/// Starts from plant proximity, then subtracts a damped poison term
/// when the nearest poison is at most [`POISON_SLACK`] cells farther
/// than the nearest plant, and a wall term when a wall is within
/// [`WALL_RANGE`] cells. Models attraction/repulsion rather than pure
/// nearest-food heading. `0.0` when no plant is active.
pub fn distance_to_food(episode: &Episode) -> f32 {
    let half = episode.layout().half_world();
    let Some((_, food_dist)) = resource_signal_delta(episode, ResourceClass::Plant) else {
        return 0.0;
    };
    let mut signal = proximity_from_distance(food_dist, half);

    if let Some((_, poison_dist)) = resource_signal_delta(episode, ResourceClass::Poison) {
        if poison_dist <= food_dist + POISON_SLACK {
            signal -= POISON_AVOIDANCE * proximity_from_distance(poison_dist, half);
        }
    }
    if let Some((_, wall_dist)) = nearest_wall_delta(episode) {
        if wall_dist <= WALL_RANGE {
            signal -= WALL_AVOIDANCE * proximity_from_distance(wall_dist, half);
        }
    }
    signal.clamp(-1.0, 1.0)
}

fn proximity_from_distance(dist: i32, half_world: f32) -> f32 {
    (1.0 - dist as f32 / half_world).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatland_world::{Layout, Mode};

    fn gt_episode() -> Episode {
        Episode::new(&Layout::resolve(Mode::Gt, "").unwrap())
    }

    #[test]
    fn nearest_plant_from_start() {
        // gt: agent at 1, plants at [5, 13, 21, 34, 47, 55]; 55 is 10
        // cells behind, 5 is 4 cells ahead.
        let ep = gt_episode();
        let (delta, dist) = resource_signal_delta(&ep, ResourceClass::Plant).unwrap();
        assert_eq!((delta, dist), (4, 4));
    }

    #[test]
    fn cooldown_members_are_invisible() {
        let ep = gt_episode();
        let (_, dist_before) = resource_signal_delta(&ep, ResourceClass::Plant).unwrap();

        let mut ep = gt_episode();
        // Knock out the nearest plant; the signal must fall through to
        // the next one.
        for _ in 0..4 {
            ep.step(1.0);
        }
        let (_, dist_after) = resource_signal_delta(&ep, ResourceClass::Plant).unwrap();
        assert!(dist_after > 0);
        // Agent is now on the consumed plant's cell; next plant is 8 ahead.
        assert_eq!(dist_after, 8);
        assert_eq!(dist_before, 4);
    }

    #[test]
    fn heading_sign_tracks_direction() {
        let ep = gt_episode();
        // Nearest plant is ahead of the agent.
        assert!(heading_signal(&ep, ResourceClass::Plant) > 0.0);
        // Nearest wall (cell 0) is one behind.
        assert!(wall_heading(&ep) < 0.0);
    }

    #[test]
    fn proximity_is_one_on_top_and_decays() {
        let mut ep = gt_episode();
        assert!(proximity(&ep, ResourceClass::Plant) < 1.0);
        // Stand one cell short of the plant: dist 1.
        for _ in 0..3 {
            ep.step(1.0);
        }
        let near = proximity(&ep, ResourceClass::Plant);
        assert!(near > 0.9 && near < 1.0);
    }

    #[test]
    fn wall_proximity_from_start() {
        let ep = gt_episode();
        // Wall at 0, agent at 1.
        let expected = 1.0 - 1.0 / ep.layout().half_world();
        assert!((wall_proximity(&ep) - expected).abs() < 1e-6);
    }

    #[test]
    fn balance_reflects_active_counts() {
        let ep = gt_episode();
        // 6 plants vs 4 poison -> (6-4)/10.
        let b = balance(&ep, ResourceClass::Plant, ResourceClass::Poison);
        assert!((b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn balance_zero_when_counts_equal() {
        let ep = Episode::new(&Layout::resolve(Mode::Validation, "").unwrap());
        // One prey, one predator.
        let b = balance(&ep, ResourceClass::Prey, ResourceClass::Predator);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn food_signal_damped_by_nearby_poison() {
        // At cell 3: plant 5 at dist 2, poison 9 at dist 6 (outside the
        // slack window), walls at dist 3 -> clean signal.
        let mut ep = gt_episode();
        ep.step(1.0);
        ep.step(1.0);
        assert_eq!(ep.position(), 3);
        let undamped = distance_to_food(&ep);
        assert!((undamped - proximity(&ep, ResourceClass::Plant)).abs() < 1e-6);

        // At cell 7 (plant at 5 already eaten): plant 13 at dist 6,
        // poison 9 at dist 2 -> within slack, damped.
        for _ in 0..4 {
            ep.step(1.0);
        }
        assert_eq!(ep.position(), 7);
        let damped = distance_to_food(&ep);
        assert!(damped < proximity(&ep, ResourceClass::Plant));
    }

    #[test]
    fn food_signal_damped_by_adjacent_wall() {
        let ep = gt_episode();
        // Wall at dist 1 from the start cell engages the wall term.
        let signal = distance_to_food(&ep);
        let raw = proximity(&ep, ResourceClass::Plant);
        assert!(signal < raw);
    }
}
