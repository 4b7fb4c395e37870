//! Spheroid geometry: a roughly circular body with a per-sector radius
//!
//! In polar coordinates, a spheroid with `n` sectors is defined by:
//! - heights: surface radius at each sector's start angle `i * 2π / n`
//! - floors: minimum radius each sector can be mined down to
//! - amplitude: the surface noise used at creation, also the unit for mining

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::{
    SimError, SimResult, validate_non_negative, validate_positive, validate_sector_count,
};
use crate::{polar_to_cartesian, wrap_sector};

/// One anchor of the smoothed outline plus its two Bézier handles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Surface point at the sector angle
    pub anchor: Vec2,
    /// Control point entering the anchor (toward the previous sector)
    pub control_in: Vec2,
    /// Control point leaving the anchor (toward the next sector)
    pub control_out: Vec2,
}

/// A deformable circular body split into equal angular sectors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SpheroidData")]
pub struct Spheroid {
    amplitude: f32,
    heights: Vec<f32>,
    floors: Vec<f32>,
}

/// Unchecked wire form; deserialization goes through [`Spheroid::from_heights`]
#[derive(Deserialize)]
struct SpheroidData {
    amplitude: f32,
    heights: Vec<f32>,
    floors: Vec<f32>,
}

impl TryFrom<SpheroidData> for Spheroid {
    type Error = SimError;

    fn try_from(data: SpheroidData) -> SimResult<Self> {
        Self::from_heights(data.heights, data.floors, data.amplitude)
    }
}

impl Spheroid {
    /// Generate a roughly round body of the given radius and number of sectors.
    ///
    /// Heights and floors are both jittered by `amplitude * (u - 0.5)`.
    /// Floors never go below zero and a height never starts below its floor.
    pub fn create<R: Rng + ?Sized>(
        radius: f32,
        amplitude: f32,
        sectors: usize,
        floor: f32,
        rng: &mut R,
    ) -> SimResult<Self> {
        validate_sector_count("sectors", sectors)?;
        validate_non_negative("amplitude", amplitude)?;
        validate_positive("radius", radius)?;
        validate_non_negative("floor", floor)?;
        if floor > radius {
            return Err(SimError::invalid(
                "floor",
                format!("floor {} is above radius {}", floor, radius),
            ));
        }

        let mut heights = Vec::with_capacity(sectors);
        let mut floors = Vec::with_capacity(sectors);
        for _ in 0..sectors {
            let h = radius + amplitude * (rng.random::<f32>() - 0.5);
            let f = (floor + amplitude * (rng.random::<f32>() - 0.5)).max(0.0);
            heights.push(h.max(f));
            floors.push(f);
        }

        Ok(Self {
            amplitude,
            heights,
            floors,
        })
    }

    /// Build a spheroid from explicit per-sector heights and floors
    pub fn from_heights(heights: Vec<f32>, floors: Vec<f32>, amplitude: f32) -> SimResult<Self> {
        validate_sector_count("heights", heights.len())?;
        validate_non_negative("amplitude", amplitude)?;
        if floors.len() != heights.len() {
            return Err(SimError::invalid(
                "floors",
                format!("{} floors for {} sectors", floors.len(), heights.len()),
            ));
        }
        for (h, f) in heights.iter().zip(&floors) {
            validate_non_negative("floors", *f)?;
            if !h.is_finite() || h < f {
                return Err(SimError::invalid(
                    "heights",
                    format!("height {} is below its floor {}", h, f),
                ));
            }
        }

        Ok(Self {
            amplitude,
            heights,
            floors,
        })
    }

    /// Build a spheroid that shares one floor across every sector
    pub fn with_uniform_floor(heights: Vec<f32>, floor: f32, amplitude: f32) -> SimResult<Self> {
        let floors = vec![floor; heights.len()];
        Self::from_heights(heights, floors, amplitude)
    }

    #[inline]
    pub fn sector_count(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    #[inline]
    pub fn floors(&self) -> &[f32] {
        &self.floors
    }

    /// Angular width of one sector (Δθ)
    #[inline]
    pub fn sector_angle(&self) -> f32 {
        TAU / self.sector_count() as f32
    }

    pub fn check_index(&self, sector: usize) -> SimResult<()> {
        if sector < self.sector_count() {
            Ok(())
        } else {
            Err(SimError::IndexOutOfRange {
                index: sector,
                len: self.sector_count(),
            })
        }
    }

    pub fn height(&self, sector: usize) -> SimResult<f32> {
        self.check_index(sector)?;
        Ok(self.heights[sector])
    }

    pub fn floor(&self, sector: usize) -> SimResult<f32> {
        self.check_index(sector)?;
        Ok(self.floors[sector])
    }

    /// Whether a sector has nothing left to mine
    pub fn is_at_floor(&self, sector: usize) -> SimResult<bool> {
        self.check_index(sector)?;
        Ok(self.heights[sector] <= self.floors[sector])
    }

    /// Total material left above the floors
    pub fn minable_depth(&self) -> f32 {
        self.heights
            .iter()
            .zip(&self.floors)
            .map(|(h, f)| h - f)
            .sum()
    }

    /// Neighbouring sector index, wrapping around the body
    #[inline]
    pub fn neighbor(&self, sector: usize, step: isize) -> usize {
        wrap_sector(sector as isize + step, self.sector_count())
    }

    /// Cartesian surface point of a sector (wraps indices)
    pub fn surface_point(&self, sector: isize) -> Vec2 {
        let n = self.sector_count();
        let i = wrap_sector(sector, n);
        polar_to_cartesian(self.heights[i], sector as f32 * self.sector_angle())
    }

    /// Lower a sector to `height`. Callers keep it at or above the floor.
    pub(crate) fn set_height(&mut self, sector: usize, height: f32) {
        debug_assert!(height >= self.floors[sector]);
        self.heights[sector] = height;
    }

    /// Smooth closed outline through every sector point.
    ///
    /// The tangent at sector `i` follows the chord from `i - 1` to `i + 1`;
    /// each handle sits `smoothing` times the adjacent chord length away
    /// from the anchor along that tangent. Must be recomputed after mining.
    pub fn curve_points(&self, smoothing: f32) -> Vec<CurvePoint> {
        let n = self.sector_count() as isize;
        (0..n)
            .map(|i| {
                let prev = self.surface_point(i - 1);
                let anchor = self.surface_point(i);
                let next = self.surface_point(i + 1);
                let tangent = (next - prev).normalize_or_zero();
                CurvePoint {
                    anchor,
                    control_in: anchor - smoothing * tangent * (anchor - prev).length(),
                    control_out: anchor + smoothing * tangent * (anchor - next).length(),
                }
            })
            .collect()
    }
}
