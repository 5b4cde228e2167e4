//! Per-mode deterministic world layouts.
//!
//! The four evaluation modes (`gt`, `validation`, `test`, `benchmark`)
//! each carry a static table of world geometry and episode bounds.
//! Benchmark mode additionally derives a layout variant, a ring shift,
//! and the initial heading from an FNV-1a hash of the agent identifier,
//! so repeated evaluations of one agent reproduce the same world while
//! different agents face different ones.

use crate::ring;
use flatland_core::hash::agent_id_hash;
use flatland_core::{ConfigError, ScanProfile};
use std::fmt;
use std::str::FromStr;

/// Number of benchmark layout variants the agent hash selects between.
const BENCHMARK_VARIANTS: u64 = 4;

/// Evaluation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Ground-truth layout used during training.
    Gt,
    /// Held-out validation layout.
    Validation,
    /// Held-out test layout with a forward scanner profile.
    Test,
    /// Agent-keyed benchmark layout with a core scanner profile.
    Benchmark,
}

impl Mode {
    /// Stable lowercase name used in configuration and traces.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Gt => "gt",
            Mode::Validation => "validation",
            Mode::Test => "test",
            Mode::Benchmark => "benchmark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gt" => Ok(Mode::Gt),
            "validation" => Ok(Mode::Validation),
            "test" => Ok(Mode::Test),
            "benchmark" => Ok(Mode::Benchmark),
            other => Err(ConfigError::UnknownMode { mode: other.into() }),
        }
    }
}

/// Resolved world layout for one evaluation.
///
/// Everything an [`Episode`](crate::Episode) needs at construction:
/// geometry, initial cell lists, episode bounds, and scanner settings.
/// All cell values are normalized to `[0, ring_len)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// The mode this layout was resolved for.
    pub mode: Mode,
    /// Ring size in cells.
    pub ring_len: i32,
    /// Episode tick budget.
    pub max_age: u32,
    /// Food items needed for forage-goal termination.
    pub forage_goal: u32,
    /// Agent starting cell.
    pub start_cell: i32,
    /// Initial heading, `+1` or `-1`.
    pub heading: i8,
    /// Initial plant cells.
    pub plants: Vec<i32>,
    /// Initial prey cells.
    pub prey: Vec<i32>,
    /// Initial poison cells.
    pub poison: Vec<i32>,
    /// Initial predator cells.
    pub predators: Vec<i32>,
    /// Wall cells (static for the whole episode).
    pub walls: Vec<i32>,
    /// Scanner probe spread (cells between adjacent bins).
    pub spread: i32,
    /// Scanner probe offset (cells added to every bin).
    pub scan_offset: i32,
    /// Scanner weighting profile.
    pub profile: ScanProfile,
    /// Whether predator/prey social dynamics run each tick.
    pub social_dynamics: bool,
    /// Benchmark layout variant (`0` outside benchmark mode).
    pub variant: u32,
    /// Benchmark ring shift (`0` outside benchmark mode).
    pub shift: i32,
}

/// Static per-variant cell lists, before any benchmark shift.
struct BaseCells {
    start_cell: i32,
    plants: &'static [i32],
    prey: &'static [i32],
    poison: &'static [i32],
    predators: &'static [i32],
    walls: &'static [i32],
}

/// Variant 0 — also the `gt` and `benchmark` base layout.
static VARIANT_GT: BaseCells = BaseCells {
    start_cell: 1,
    plants: &[5, 13, 21, 34, 47, 55],
    prey: &[17, 39],
    poison: &[9, 27, 42, 58],
    predators: &[50],
    walls: &[0, 32],
};

static VARIANT_SPARSE: BaseCells = BaseCells {
    start_cell: 1,
    plants: &[6, 18, 31, 45, 57],
    prey: &[24],
    poison: &[12, 37, 51],
    predators: &[42],
    walls: &[0],
};

static VARIANT_DENSE: BaseCells = BaseCells {
    start_cell: 3,
    plants: &[7, 11, 19, 28, 36, 44, 52, 60],
    prey: &[15, 33, 49],
    poison: &[9, 23, 41, 55, 62],
    predators: &[26, 58],
    walls: &[0, 21, 43],
};

static VARIANT_WALLED: BaseCells = BaseCells {
    start_cell: 2,
    plants: &[6, 14, 27, 38, 50, 61],
    prey: &[19, 45],
    poison: &[10, 30, 53],
    predators: &[35],
    walls: &[0, 16, 32, 48],
};

static VALIDATION_CELLS: BaseCells = BaseCells {
    start_cell: 1,
    plants: &[7, 19, 29, 41, 53],
    prey: &[35],
    poison: &[11, 25, 47],
    predators: &[59],
    walls: &[0],
};

static TEST_CELLS: BaseCells = BaseCells {
    start_cell: 1,
    plants: &[4, 16, 30, 44, 56],
    prey: &[26, 48],
    poison: &[10, 22, 38, 52],
    predators: &[60],
    walls: &[0, 20, 40],
};

fn benchmark_variant(variant: u32) -> &'static BaseCells {
    match variant {
        0 => &VARIANT_GT,
        1 => &VARIANT_SPARSE,
        2 => &VARIANT_DENSE,
        _ => &VARIANT_WALLED,
    }
}

impl Layout {
    /// Ring size shared by every built-in mode.
    pub const RING_LEN: i32 = 64;

    /// Resolve the layout for `mode`, keyed by `agent_id` in benchmark
    /// mode and ignoring it elsewhere.
    ///
    /// Fails fast — before any episode is constructed — on an empty
    /// benchmark agent id or a layout table that violates a structural
    /// invariant.
    pub fn resolve(mode: Mode, agent_id: &str) -> Result<Layout, ConfigError> {
        let layout = match mode {
            Mode::Gt => Layout::from_cells(
                mode,
                &VARIANT_GT,
                500,
                20,
                2,
                0,
                ScanProfile::Balanced,
                true,
            ),
            Mode::Validation => Layout::from_cells(
                mode,
                &VALIDATION_CELLS,
                400,
                16,
                2,
                0,
                ScanProfile::Balanced,
                false,
            ),
            Mode::Test => {
                Layout::from_cells(mode, &TEST_CELLS, 400, 18, 3, 1, ScanProfile::Forward, true)
            }
            Mode::Benchmark => {
                if agent_id.is_empty() {
                    return Err(ConfigError::EmptyAgentId);
                }
                let hash = agent_id_hash(agent_id);
                let variant = (hash % BENCHMARK_VARIANTS) as u32;
                let shift = ((hash >> 8) % Self::RING_LEN as u64) as i32;
                let heading = if (hash >> 16) & 1 == 0 { 1 } else { -1 };
                let mut layout = Layout::from_cells(
                    mode,
                    benchmark_variant(variant),
                    600,
                    24,
                    2,
                    0,
                    ScanProfile::Core,
                    true,
                );
                layout.apply_shift(shift);
                layout.heading = heading;
                layout.variant = variant;
                layout
            }
        };
        layout.validate()?;
        Ok(layout)
    }

    #[allow(clippy::too_many_arguments)]
    fn from_cells(
        mode: Mode,
        cells: &BaseCells,
        max_age: u32,
        forage_goal: u32,
        spread: i32,
        scan_offset: i32,
        profile: ScanProfile,
        social_dynamics: bool,
    ) -> Layout {
        Layout {
            mode,
            ring_len: Self::RING_LEN,
            max_age,
            forage_goal,
            start_cell: cells.start_cell,
            heading: 1,
            plants: cells.plants.to_vec(),
            prey: cells.prey.to_vec(),
            poison: cells.poison.to_vec(),
            predators: cells.predators.to_vec(),
            walls: cells.walls.to_vec(),
            spread,
            scan_offset,
            profile,
            social_dynamics,
            variant: 0,
            shift: 0,
        }
    }

    /// Rotate every cell list and the start cell by `shift`.
    fn apply_shift(&mut self, shift: i32) {
        let len = self.ring_len;
        let rotate = |cells: &mut Vec<i32>| {
            for c in cells.iter_mut() {
                *c = ring::wrap(*c + shift, len);
            }
        };
        rotate(&mut self.plants);
        rotate(&mut self.prey);
        rotate(&mut self.poison);
        rotate(&mut self.predators);
        rotate(&mut self.walls);
        self.start_cell = ring::wrap(self.start_cell + shift, len);
        self.shift = shift;
    }

    /// Check structural invariants shared by all layout tables.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.plants.is_empty() {
            return Err(ConfigError::InvalidLayout {
                reason: "no plant cells: forage goal is unreachable".into(),
            });
        }
        let mut seen = vec![false; self.ring_len as usize];
        let lists = [
            &self.plants,
            &self.prey,
            &self.poison,
            &self.predators,
            &self.walls,
        ];
        for list in lists {
            for &cell in list.iter() {
                if !(0..self.ring_len).contains(&cell) {
                    return Err(ConfigError::InvalidLayout {
                        reason: format!("cell {cell} outside ring of {}", self.ring_len),
                    });
                }
                if seen[cell as usize] {
                    return Err(ConfigError::InvalidLayout {
                        reason: format!("cell {cell} assigned twice"),
                    });
                }
                seen[cell as usize] = true;
            }
        }
        if self.walls.contains(&self.start_cell) {
            return Err(ConfigError::InvalidLayout {
                reason: format!("start cell {} is a wall", self.start_cell),
            });
        }
        Ok(())
    }

    /// Half the ring size, used to normalize distances into `[0, 1]`.
    pub fn half_world(&self) -> f32 {
        self.ring_len as f32 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_round_trip() {
        for mode in [Mode::Gt, Mode::Validation, Mode::Test, Mode::Benchmark] {
            assert_eq!(mode.name().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_config_error() {
        let err = "warp".parse::<Mode>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode { .. }));
    }

    #[test]
    fn static_layouts_validate() {
        for mode in [Mode::Gt, Mode::Validation, Mode::Test] {
            let layout = Layout::resolve(mode, "").unwrap();
            assert_eq!(layout.variant, 0);
            assert_eq!(layout.shift, 0);
            assert_eq!(layout.heading, 1);
        }
    }

    #[test]
    fn benchmark_requires_agent_id() {
        assert_eq!(
            Layout::resolve(Mode::Benchmark, "").unwrap_err(),
            ConfigError::EmptyAgentId
        );
    }

    #[test]
    fn benchmark_is_pure_in_agent_id() {
        let a = Layout::resolve(Mode::Benchmark, "agent-31").unwrap();
        let b = Layout::resolve(Mode::Benchmark, "agent-31").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn benchmark_variants_diverge_across_population() {
        let baseline = Layout::resolve(Mode::Benchmark, "agent-0").unwrap();
        let mut saw_other_variant = false;
        for i in 1..64 {
            let layout = Layout::resolve(Mode::Benchmark, &format!("agent-{i}")).unwrap();
            if layout.variant != baseline.variant {
                saw_other_variant = true;
                break;
            }
        }
        assert!(saw_other_variant, "64 agents all drew the same variant");
    }

    #[test]
    fn benchmark_shift_rotates_every_list() {
        let layout = Layout::resolve(Mode::Benchmark, "shift-probe").unwrap();
        let base = benchmark_variant(layout.variant);
        for (shifted, original) in layout.plants.iter().zip(base.plants.iter()) {
            assert_eq!(*shifted, ring::wrap(original + layout.shift, layout.ring_len));
        }
        assert_eq!(
            layout.start_cell,
            ring::wrap(base.start_cell + layout.shift, layout.ring_len)
        );
    }

    #[test]
    fn benchmark_shifted_layouts_still_validate() {
        // A rotation preserves disjointness, so every derived layout is valid.
        for i in 0..128 {
            Layout::resolve(Mode::Benchmark, &format!("sweep-{i}")).unwrap();
        }
    }

    #[test]
    fn half_world_matches_ring() {
        let layout = Layout::resolve(Mode::Gt, "").unwrap();
        assert_eq!(layout.half_world(), 32.0);
    }
}
