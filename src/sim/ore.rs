//! Ore deposits buried under a planet's surface
//!
//! A deposit sits at a fixed radial height inside one sector. It stays
//! buried while the surface above it is higher; once mining brings the
//! surface down to (or below) the deposit, it is exposed and collected.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::spheroid::Spheroid;
use crate::error::SimResult;
use crate::{polar_to_cartesian, sector_for_angle};

/// A collectible deposit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OreDeposit {
    pub id: u32,
    /// Angle in [0, 2π)
    pub angle: f32,
    /// Sector containing `angle`
    pub sector: usize,
    /// Distance from the planet center
    pub radial_height: f32,
    /// Visual size, proportional to value
    pub radius: f32,
    /// Cash credited on collection
    pub value: u32,
}

impl OreDeposit {
    /// Position in planet space
    pub fn position(&self) -> Vec2 {
        polar_to_cartesian(self.radial_height, self.angle)
    }

    /// Whether the surface has come down to this deposit
    pub fn is_exposed(&self, spheroid: &Spheroid) -> SimResult<bool> {
        Ok(self.radial_height >= spheroid.height(self.sector)?)
    }
}

/// All deposits on the current planet (sorted by id)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OreField {
    deposits: Vec<OreDeposit>,
}

impl OreField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatter `count` buried deposits over the spheroid.
    ///
    /// Each deposit's radial height is drawn from `[floor, surface)` of its
    /// sector. Sectors already at their floor have no room and are skipped.
    pub fn scatter<R: Rng + ?Sized>(
        spheroid: &Spheroid,
        count: usize,
        radius_range: (f32, f32),
        value_per_radius: f32,
        rng: &mut R,
    ) -> Self {
        let (min_r, max_r) = radius_range;
        let n = spheroid.sector_count();
        let mut deposits = Vec::with_capacity(count);
        let mut next_id = 1;

        for _ in 0..count {
            let angle = rng.random::<f32>() * TAU;
            let sector = sector_for_angle(angle, n);
            let top = spheroid.heights()[sector];
            let bottom = spheroid.floors()[sector];
            if top <= bottom {
                continue;
            }
            let radial_height = (bottom + rng.random::<f32>() * (top - bottom)).min(top);
            if radial_height >= top {
                continue;
            }
            let radius = min_r + rng.random::<f32>() * (max_r - min_r);
            deposits.push(OreDeposit {
                id: next_id,
                angle,
                sector,
                radial_height,
                radius,
                value: (radius * value_per_radius).round() as u32,
            });
            next_id += 1;
        }

        log::debug!(
            "Scattered {} ore deposits worth {}",
            deposits.len(),
            deposits.iter().map(|d| d.value as u64).sum::<u64>()
        );
        Self { deposits }
    }

    /// Remove and return every exposed deposit in the given sectors
    pub fn collect_exposed(
        &mut self,
        spheroid: &Spheroid,
        sectors: impl IntoIterator<Item = usize>,
    ) -> SimResult<Vec<OreDeposit>> {
        let mut collected = Vec::new();
        for sector in sectors {
            let surface = spheroid.height(sector)?;
            let mut i = 0;
            while i < self.deposits.len() {
                let d = self.deposits[i];
                if d.sector == sector && d.radial_height >= surface {
                    collected.push(self.deposits.remove(i));
                } else {
                    i += 1;
                }
            }
        }
        Ok(collected)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OreDeposit> {
        self.deposits.iter()
    }

    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    /// Cash still buried in the planet
    pub fn remaining_value(&self) -> u64 {
        self.deposits.iter().map(|d| d.value as u64).sum()
    }
}

impl FromIterator<OreDeposit> for OreField {
    fn from_iter<I: IntoIterator<Item = OreDeposit>>(iter: I) -> Self {
        let mut deposits: Vec<_> = iter.into_iter().collect();
        deposits.sort_by_key(|d| d.id);
        Self { deposits }
    }
}
