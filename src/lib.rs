//! Eriezium - An orbital mining arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spheroids, mining, collapse, ore, session state)
//! - `render`: Vector-graphics adapter over simulation state
//! - `settings`: Data-driven game configuration
//! - `error`: Simulation error types

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::{DifficultyPreset, GameConfig};

use glam::Vec2;
use std::f32::consts::TAU;

/// Game configuration constants
pub mod consts {
    /// Planet defaults
    pub const PLANET_RADIUS: f32 = 1200.0;
    pub const PLANET_AMPLITUDE: f32 = 50.0;
    pub const PLANET_SECTORS: usize = 48;
    /// Planet floor sits at half the core radius
    pub const PLANET_FLOOR: f32 = CORE_RADIUS / 2.0;

    /// Core defaults (decorative, never mined)
    pub const CORE_RADIUS: f32 = 300.0;
    pub const CORE_AMPLITUDE: f32 = 20.0;
    pub const CORE_SECTORS: usize = 16;
    pub const CORE_FLOOR: f32 = 0.0;

    /// Bézier smoothing factor for spheroid outlines
    pub const SMOOTHING: f32 = 0.2;

    /// Collapse threshold, in multiples of the spheroid amplitude
    pub const MAX_DIFF: f32 = 3.0;
    /// Cost of removing one full amplitude of material at difficulty 1
    pub const BASE_COST: f32 = 10.0;
    /// Upper bound on collapse steps for a single check
    pub const MAX_COLLAPSE_STEPS: usize = 4096;

    /// One full planet rotation (seconds)
    pub const ROTATION_PERIOD: f32 = 360.0;

    /// Player craft orbit, measured from the planet center
    pub const PLAYER_ALTITUDE: f32 = PLANET_RADIUS + 200.0;

    /// Economy defaults
    pub const STARTING_CASH: i64 = 100;
    pub const DIFFICULTY_GROWTH: f32 = 1.25;
    pub const ORE_PER_PLANET: usize = 12;
    pub const ORE_MIN_RADIUS: f32 = 10.0;
    pub const ORE_MAX_RADIUS: f32 = 30.0;
    pub const ORE_VALUE_PER_RADIUS: f32 = 2.0;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Euclidean length of (x, y)
#[inline]
pub fn magnitude(x: f32, y: f32) -> f32 {
    Vec2::new(x, y).length()
}

/// Sector containing `angle` on a body split into `sectors` equal wedges.
///
/// Always in `[0, sectors)`; sector 0 starts on the positive x-axis.
#[inline]
pub fn sector_for_angle(angle: f32, sectors: usize) -> usize {
    let n = sectors.max(1);
    let raw = (normalize_angle(angle) * n as f32 / TAU).floor() as usize;
    raw % n
}

/// Wrap a possibly negative or overflowing sector index into `[0, sectors)`
#[inline]
pub fn wrap_sector(index: isize, sectors: usize) -> usize {
    index.rem_euclid(sectors.max(1) as isize) as usize
}

/// Angle of the middle of sector `index`
#[inline]
pub fn sector_center_angle(index: usize, sectors: usize) -> f32 {
    (index as f32 + 0.5) * TAU / sectors.max(1) as f32
}
