//! Mining and collapse
//!
//! Mining lowers one sector toward its floor. If that leaves a neighbour
//! towering over it by more than `max_diff * amplitude`, the neighbour
//! slides down (a random fraction of twice the difference per step) and the
//! check walks on in the same direction until the slope is stable again.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spheroid::Spheroid;
use crate::error::SimResult;
use crate::settings::MiningConfig;

/// Walking direction around the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward lower sector indices (counter-clockwise in y-down screen space)
    Backward,
    /// Toward higher sector indices (clockwise on screen)
    Forward,
}

impl Direction {
    #[inline]
    pub fn step(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Material that slid off a neighbouring sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collapse {
    pub sector: usize,
    pub depth: f32,
}

/// Result of a player-facing mine action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MineOutcome {
    /// Sector the player mined
    pub sector: usize,
    /// Depth removed from that sector (0 when already at floor)
    pub depth: f32,
    /// Cost of the dig, rounded up
    pub cost: u32,
    /// Secondary slides, in the order they happened
    pub collapses: Vec<Collapse>,
}

impl MineOutcome {
    /// Whether anything was removed at all
    pub fn is_noop(&self) -> bool {
        self.depth <= 0.0
    }

    /// Every sector whose surface moved
    pub fn touched_sectors(&self) -> impl Iterator<Item = usize> + '_ {
        let first = (!self.is_noop()).then_some(self.sector);
        first
            .into_iter()
            .chain(self.collapses.iter().map(|c| c.sector))
    }

    /// Depth removed by the dig and every slide it triggered
    pub fn total_depth(&self) -> f32 {
        self.depth + self.collapses.iter().map(|c| c.depth).sum::<f32>()
    }
}

/// Applies mining and collapse to a spheroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningEngine {
    /// Collapse threshold in multiples of the spheroid amplitude
    pub max_diff: f32,
    /// Cost of removing one amplitude of material at difficulty 1
    pub base_cost: f32,
    /// Safety cap on slide steps per collapse check
    pub max_collapse_steps: usize,
}

impl Default for MiningEngine {
    fn default() -> Self {
        Self::new(&MiningConfig::default())
    }
}

impl MiningEngine {
    pub fn new(config: &MiningConfig) -> Self {
        Self {
            max_diff: config.max_diff,
            base_cost: config.base_cost,
            max_collapse_steps: config.max_collapse_steps,
        }
    }

    /// Height difference a neighbour may stand above a sector before it slides
    #[inline]
    pub fn threshold(&self, spheroid: &Spheroid) -> f32 {
        self.max_diff * spheroid.amplitude()
    }

    /// Lower `sector` by up to `requested`, never below its floor.
    ///
    /// Returns the depth actually removed; zero means there was nothing to mine.
    pub fn mine_sector(
        &self,
        spheroid: &mut Spheroid,
        sector: usize,
        requested: f32,
    ) -> SimResult<f32> {
        let height = spheroid.height(sector)?;
        let floor = spheroid.floor(sector)?;
        let new_height = (height - requested.max(0.0)).max(floor);
        let depth = height - new_height;
        if depth > 0.0 {
            spheroid.set_height(sector, new_height);
            Ok(depth)
        } else {
            Ok(0.0)
        }
    }

    /// Let the neighbour of `sector` in `direction` slide if it is too steep,
    /// then keep walking that way from the neighbour.
    pub fn check_collapse<R: Rng + ?Sized>(
        &self,
        spheroid: &mut Spheroid,
        sector: usize,
        direction: Direction,
        rng: &mut R,
    ) -> SimResult<Vec<Collapse>> {
        spheroid.check_index(sector)?;
        let threshold = self.threshold(spheroid);
        let mut collapses = Vec::new();
        let mut current = sector;
        let mut steps = 0usize;

        loop {
            let neighbor = spheroid.neighbor(current, direction.step());
            let mut slid = 0.0;

            loop {
                let diff = spheroid.height(neighbor)? - spheroid.height(current)?;
                if diff <= threshold {
                    break;
                }
                if steps >= self.max_collapse_steps {
                    log::warn!(
                        "Collapse from sector {} stopped after {} steps",
                        sector,
                        steps
                    );
                    if slid > 0.0 {
                        collapses.push(Collapse {
                            sector: neighbor,
                            depth: slid,
                        });
                    }
                    return Ok(collapses);
                }
                steps += 1;

                let request = rng.random::<f32>() * 2.0 * diff;
                let removed = self.mine_sector(spheroid, neighbor, request)?;
                if removed <= 0.0 {
                    break;
                }
                slid += removed;
            }

            if slid <= 0.0 {
                break;
            }
            collapses.push(Collapse {
                sector: neighbor,
                depth: slid,
            });
            current = neighbor;
        }

        if !collapses.is_empty() {
            log::debug!(
                "Collapse from sector {} {:?}: {} sectors in {} steps",
                sector,
                direction,
                collapses.len(),
                steps
            );
        }
        Ok(collapses)
    }

    /// Cost of removing `depth` at the given difficulty, rounded up
    pub fn cost(&self, depth: f32, amplitude: f32, difficulty: f32) -> u32 {
        if depth <= 0.0 {
            return 0;
        }
        let unit = if amplitude > 0.0 { amplitude } else { 1.0 };
        (depth * self.base_cost * difficulty / unit).ceil().max(0.0) as u32
    }

    /// Player-facing dig with a random intensity in `[0, amplitude)`
    pub fn mine<R: Rng + ?Sized>(
        &self,
        spheroid: &mut Spheroid,
        sector: usize,
        difficulty: f32,
        rng: &mut R,
    ) -> SimResult<MineOutcome> {
        spheroid.check_index(sector)?;
        let intensity = rng.random::<f32>() * spheroid.amplitude();
        self.mine_with_intensity(spheroid, sector, intensity, difficulty, rng)
    }

    /// Dig with a chosen intensity. Collapse still draws from `rng`.
    ///
    /// Leaves the spheroid untouched when the sector is already at its floor.
    pub fn mine_with_intensity<R: Rng + ?Sized>(
        &self,
        spheroid: &mut Spheroid,
        sector: usize,
        intensity: f32,
        difficulty: f32,
        rng: &mut R,
    ) -> SimResult<MineOutcome> {
        let depth = self.mine_sector(spheroid, sector, intensity)?;
        let mut outcome = MineOutcome {
            sector,
            depth,
            ..Default::default()
        };
        if outcome.is_noop() {
            return Ok(outcome);
        }

        outcome.cost = self.cost(depth, spheroid.amplitude(), difficulty);
        for direction in [Direction::Backward, Direction::Forward] {
            let slides = self.check_collapse(spheroid, sector, direction, rng)?;
            outcome.collapses.extend(slides);
        }
        Ok(outcome)
    }
}
