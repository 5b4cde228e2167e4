//! Fitness aggregation: episode statistics to one bounded scalar.
//!
//! The weights below are a design choice preserved bit-for-bit for
//! compatibility testing against recorded traces; they are not derived
//! from anything and must not be "improved" in place.

use flatland_world::{Episode, TerminalReason};

/// Weight of the survival term (`age / max_age`).
pub const SURVIVAL_WEIGHT: f32 = 0.33;
/// Weight of the normalized final-energy term.
pub const ENERGY_WEIGHT: f32 = 0.24;
/// Weight of the forage-quality term.
pub const FORAGE_WEIGHT: f32 = 0.24;
/// Weight of the shaped-reward term.
pub const REWARD_WEIGHT: f32 = 0.14;
/// Weight (negative) of the wall-collision rate.
pub const WALL_WEIGHT: f32 = -0.12;
/// Weight of the respawn-activity rate.
pub const RESPAWN_WEIGHT: f32 = 0.03;
/// Bonus granted when the episode ends by meeting the forage goal.
pub const GOAL_BONUS: f32 = 0.1;
/// Upper fitness bound.
pub const FITNESS_MAX: f32 = 1.4;

/// Score a finished episode.
///
/// Returns exactly `0.0` when no ticks were executed.
pub fn score(episode: &Episode, terminal: TerminalReason) -> f32 {
    let age = episode.age();
    if age == 0 {
        return 0.0;
    }
    let age_f = age as f32;
    let counters = episode.counters();

    let survival = age_f / episode.layout().max_age as f32;
    let energy_term = (episode.energy() / flatland_world::episode::ENERGY_CAP).clamp(0.0, 1.0);

    let food = counters.food_collected as f32;
    let poison = counters.poison_hits as f32;
    let resource_collisions = (counters.food_collected
        + counters.prey_collected
        + counters.poison_hits
        + counters.predator_hits) as f32;
    let forage_term = 0.5 + 0.5 * ((food - poison) / (resource_collisions + 2.0)).clamp(-1.0, 1.0);

    let reward_term = 0.5 + 0.5 * (episode.reward_acc() / age_f).clamp(-1.0, 1.0);
    let wall_term = (counters.wall_collisions as f32 / age_f).clamp(0.0, 1.0);
    let respawn_term = (counters.resource_respawns as f32 / age_f).clamp(0.0, 1.0);

    let mut fitness = SURVIVAL_WEIGHT * survival
        + ENERGY_WEIGHT * energy_term
        + FORAGE_WEIGHT * forage_term
        + REWARD_WEIGHT * reward_term
        + WALL_WEIGHT * wall_term
        + RESPAWN_WEIGHT * respawn_term;
    if terminal == TerminalReason::ForageGoal {
        fitness += GOAL_BONUS;
    }
    fitness.clamp(0.0, FITNESS_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatland_world::{Layout, Mode};
    use proptest::prelude::*;

    fn finished_episode(ticks: u32) -> Episode {
        let mut ep = Episode::new(&Layout::resolve(Mode::Gt, "").unwrap());
        for _ in 0..ticks {
            ep.advance_respawns();
            ep.step(0.0);
        }
        ep
    }

    #[test]
    fn zero_ticks_scores_zero() {
        let ep = Episode::new(&Layout::resolve(Mode::Gt, "").unwrap());
        assert_eq!(score(&ep, TerminalReason::AgeLimit), 0.0);
    }

    #[test]
    fn fitness_is_bounded() {
        for ticks in [1, 10, 100, 500] {
            let ep = finished_episode(ticks);
            for terminal in [
                TerminalReason::Depleted,
                TerminalReason::ForageGoal,
                TerminalReason::AgeLimit,
            ] {
                let f = score(&ep, terminal);
                assert!((0.0..=FITNESS_MAX).contains(&f), "fitness {f} out of bounds");
            }
        }
    }

    #[test]
    fn goal_bonus_applies_only_on_forage_goal() {
        let ep = finished_episode(50);
        let with_goal = score(&ep, TerminalReason::ForageGoal);
        let without = score(&ep, TerminalReason::AgeLimit);
        assert!((with_goal - without - GOAL_BONUS).abs() < 1e-6);
    }

    #[test]
    fn longer_survival_scores_higher_for_idle_agent() {
        // Same world, nothing eaten: the survival term dominates.
        let short = finished_episode(10);
        let long = finished_episode(200);
        assert!(
            score(&long, TerminalReason::AgeLimit) > score(&short, TerminalReason::AgeLimit)
        );
    }

    #[test]
    fn weights_are_locked() {
        // Compatibility guard: these exact values are part of the
        // public contract for recorded traces.
        assert_eq!(SURVIVAL_WEIGHT, 0.33);
        assert_eq!(ENERGY_WEIGHT, 0.24);
        assert_eq!(FORAGE_WEIGHT, 0.24);
        assert_eq!(REWARD_WEIGHT, 0.14);
        assert_eq!(WALL_WEIGHT, -0.12);
        assert_eq!(RESPAWN_WEIGHT, 0.03);
        assert_eq!(GOAL_BONUS, 0.1);
        assert_eq!(FITNESS_MAX, 1.4);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn score_is_bounded_for_arbitrary_play(
            commands in proptest::collection::vec(-1.0f32..=1.0, 1..150),
        ) {
            let mut ep = Episode::new(&Layout::resolve(Mode::Gt, "").unwrap());
            for command in commands {
                ep.advance_respawns();
                if ep.step(command).is_some() {
                    break;
                }
            }
            for terminal in [
                TerminalReason::Depleted,
                TerminalReason::ForageGoal,
                TerminalReason::AgeLimit,
            ] {
                let f = score(&ep, terminal);
                prop_assert!(
                    (0.0..=FITNESS_MAX).contains(&f),
                    "fitness {f} out of bounds for {terminal:?}"
                );
            }
        }
    }
}
