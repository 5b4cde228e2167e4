//! The directional scanner: multi-bin probes ahead of and behind the agent.
//!
//! Each of the [`SCAN_BINS`] probes maps to a signed ring offset from
//! the agent (scaled by the layout's spread, shifted by its offset, and
//! mirrored when the heading is reversed). The nearest entity from each
//! probe cell is classified into a distance/color/energy triple, and the
//! layout's scanner profile weights are applied identically to all
//! three vectors.

use flatland_core::{EntityKind, ResourceClass, ScanVec, SCAN_BINS};
use flatland_world::{ring, Episode};
use smallvec::SmallVec;

/// Energy magnitude the scanner reports for a wall.
const WALL_ENERGY: f32 = 1.0;

/// One tick's scanner output: three parallel per-bin vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannerFrame {
    /// `clamp(1 - dist/half_world, 0, 1)` per bin; `0` when nothing found.
    pub distance: ScanVec,
    /// Class color constant per bin; `0` when nothing found.
    pub color: ScanVec,
    /// Signed potency share per bin: positive for plant/prey, negative
    /// for poison/predator/wall; `0` when nothing found.
    pub energy: ScanVec,
}

/// Classify the nearest entity visible from `origin`.
///
/// Scans all active resources in the fixed class order (plants, prey,
/// poison, predators) and then walls; the first seen at the smallest
/// distance wins ties. Returns `(kind, distance, potency)`; walls carry
/// zero potency.
pub fn nearest_entity_from(episode: &Episode, origin: i32) -> Option<(EntityKind, i32, f32)> {
    let len = episode.ring_len();
    let mut best: Option<(EntityKind, i32, f32)> = None;

    for class in ResourceClass::ALL {
        for r in episode.resources(class) {
            if !r.is_active() {
                continue;
            }
            let dist = ring::distance(origin, r.position, len);
            if best.is_none_or(|(_, d, _)| dist < d) {
                best = Some((class.into(), dist, r.potency));
            }
        }
    }
    for &w in episode.walls() {
        let dist = ring::distance(origin, w, len);
        if best.is_none_or(|(_, d, _)| dist < d) {
            best = Some((EntityKind::Wall, dist, 0.0));
        }
    }
    best
}

/// Run all scanner probes and apply the layout's profile weights.
pub fn scan(episode: &Episode) -> ScannerFrame {
    let layout = episode.layout();
    let half_world = layout.half_world();
    let heading = episode.heading() as i32;
    let weights = layout.profile.weights();

    let mut distance: ScanVec = SmallVec::with_capacity(SCAN_BINS);
    let mut color: ScanVec = SmallVec::with_capacity(SCAN_BINS);
    let mut energy: ScanVec = SmallVec::with_capacity(SCAN_BINS);

    for bin in 0..SCAN_BINS {
        let rel = bin as i32 - (SCAN_BINS / 2) as i32;
        let offset = heading * (rel * layout.spread + layout.scan_offset);
        let probe = ring::wrap(episode.position() + offset, layout.ring_len);

        let (d, c, e) = match nearest_entity_from(episode, probe) {
            Some((kind, dist, potency)) => {
                let d = (1.0 - dist as f32 / half_world).clamp(0.0, 1.0);
                let e = match kind {
                    EntityKind::Resource(class) => {
                        let params = class.params();
                        let share = params.clamp_potency(potency) / params.potency_max;
                        if class.is_nourishing() {
                            share
                        } else {
                            -share
                        }
                    }
                    EntityKind::Wall => -WALL_ENERGY,
                };
                (d, kind.color(), e)
            }
            None => (0.0, 0.0, 0.0),
        };

        let w = weights[bin];
        distance.push(d * w);
        color.push(c * w);
        energy.push(e * w);
    }

    ScannerFrame {
        distance,
        color,
        energy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatland_core::ScanProfile;
    use flatland_world::{Layout, Mode};

    fn episode(mode: Mode) -> Episode {
        Episode::new(&Layout::resolve(mode, "").unwrap())
    }

    // ── Nearest-entity classification ───────────────────────────

    #[test]
    fn classifies_adjacent_wall() {
        let ep = episode(Mode::Gt);
        // Probing from cell 0 (a wall) finds the wall itself at dist 0.
        let (kind, dist, _) = nearest_entity_from(&ep, 0).unwrap();
        assert_eq!(kind, EntityKind::Wall);
        assert_eq!(dist, 0);
    }

    #[test]
    fn classifies_nearest_plant() {
        let ep = episode(Mode::Gt);
        // From cell 5 the plant on that cell wins.
        let (kind, dist, potency) = nearest_entity_from(&ep, 5).unwrap();
        assert_eq!(kind, EntityKind::Resource(ResourceClass::Plant));
        assert_eq!(dist, 0);
        assert_eq!(potency, ResourceClass::Plant.params().potency_min);
    }

    #[test]
    fn class_order_breaks_ties() {
        let ep = episode(Mode::Gt);
        // gt: plant 13 and prey 17 are both 2 cells from 15; the class
        // scan order (plants before prey) keeps the plant.
        let (kind, dist, _) = nearest_entity_from(&ep, 15).unwrap();
        assert_eq!(dist, 2);
        assert_eq!(kind, EntityKind::Resource(ResourceClass::Plant));
    }

    #[test]
    fn cooldown_resources_are_invisible_to_scanner() {
        let mut ep = episode(Mode::Gt);
        for _ in 0..4 {
            ep.step(1.0);
        }
        // Plant at 5 is consumed; probing its cell must not see it.
        let (kind, _, _) = nearest_entity_from(&ep, 5).unwrap();
        assert_ne!(kind, EntityKind::Resource(ResourceClass::Plant));
    }

    // ── Scanner geometry ────────────────────────────────────────

    #[test]
    fn frame_has_one_entry_per_bin() {
        let frame = scan(&episode(Mode::Gt));
        assert_eq!(frame.distance.len(), SCAN_BINS);
        assert_eq!(frame.color.len(), SCAN_BINS);
        assert_eq!(frame.energy.len(), SCAN_BINS);
    }

    #[test]
    fn core_profile_zeroes_edge_bins() {
        let mut layout = Layout::resolve(Mode::Gt, "").unwrap();
        layout.profile = ScanProfile::Core;
        let frame = scan(&Episode::new(&layout));
        assert_eq!(frame.distance[0], 0.0);
        assert_eq!(frame.distance[SCAN_BINS - 1], 0.0);
        assert_eq!(frame.color[0], 0.0);
        assert_eq!(frame.color[SCAN_BINS - 1], 0.0);
        assert_eq!(frame.energy[0], 0.0);
        assert_eq!(frame.energy[SCAN_BINS - 1], 0.0);
    }

    #[test]
    fn balanced_profile_keeps_edge_bins() {
        // gt uses the balanced profile; with a wall one cell behind the
        // agent, every probe sees *something*, so no bin is zeroed.
        let frame = scan(&episode(Mode::Gt));
        assert!(frame.distance.iter().all(|&d| d > 0.0));
    }

    #[test]
    fn heading_mirrors_probes() {
        let mut layout = Layout::resolve(Mode::Gt, "").unwrap();
        let forward = scan(&Episode::new(&layout));
        layout.heading = -1;
        let reversed = scan(&Episode::new(&layout));
        // Mirrored probes visit the same cells in reverse bin order
        // (gt has zero scanner offset).
        for bin in 0..SCAN_BINS {
            assert_eq!(forward.distance[bin], reversed.distance[SCAN_BINS - 1 - bin]);
        }
    }

    #[test]
    fn energy_sign_tracks_class() {
        let ep = episode(Mode::Gt);
        // Probe directly over poison at cell 9 (agent at 1, spread 2:
        // bin offsets -4..4 -> probe cells 61, 63, 1, 3, 5).
        let (kind, _, _) = nearest_entity_from(&ep, 9).unwrap();
        assert_eq!(kind, EntityKind::Resource(ResourceClass::Poison));

        // Plant bin (cell 5) reads positive, wall-backed bins negative.
        let frame = scan(&ep);
        assert!(frame.energy[4] > 0.0, "plant under the leading probe");
    }
}
