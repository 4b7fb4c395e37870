//! Game configuration
//!
//! Every tunable lives here. `Default` reproduces the constants in
//! [`crate::consts`]; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{
    SimError, SimResult, validate_non_negative, validate_positive, validate_sector_count,
};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "norm" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Cost multiplier on the first planet
    pub fn starting_difficulty(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 0.5,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 2.0,
        }
    }

    /// Cash on hand at the start of a run
    pub fn starting_cash(&self) -> i64 {
        match self {
            DifficultyPreset::Easy => STARTING_CASH * 2,
            DifficultyPreset::Normal => STARTING_CASH,
            DifficultyPreset::Hard => STARTING_CASH / 2,
        }
    }
}

/// Shape of one spheroid (planet or core)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpheroidConfig {
    /// Nominal radius
    pub radius: f32,
    /// Surface jitter; heights vary by ±amplitude/2
    pub amplitude: f32,
    /// Number of angular sectors (≥ 3)
    pub sectors: usize,
    /// Nominal floor, jittered per sector like the heights
    pub floor: f32,
}

impl SpheroidConfig {
    pub fn planet() -> Self {
        Self {
            radius: PLANET_RADIUS,
            amplitude: PLANET_AMPLITUDE,
            sectors: PLANET_SECTORS,
            floor: PLANET_FLOOR,
        }
    }

    pub fn core() -> Self {
        Self {
            radius: CORE_RADIUS,
            amplitude: CORE_AMPLITUDE,
            sectors: CORE_SECTORS,
            floor: CORE_FLOOR,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_sector_count("sectors", self.sectors)?;
        validate_positive("radius", self.radius)?;
        validate_non_negative("amplitude", self.amplitude)?;
        validate_non_negative("floor", self.floor)?;
        if self.floor > self.radius {
            return Err(SimError::invalid(
                "floor",
                format!("floor {} is above radius {}", self.floor, self.radius),
            ));
        }
        Ok(())
    }
}

/// Mining and collapse tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Collapse threshold in multiples of the spheroid amplitude
    pub max_diff: f32,
    /// Cost of removing one amplitude of material at difficulty 1
    pub base_cost: f32,
    /// Bézier handle length as a fraction of the adjacent chord
    pub smoothing: f32,
    /// Upper bound on slide steps for one collapse check.
    ///
    /// Hitting it stops the cascade early and logs a warning; the slope
    /// where it stopped may still be steeper than `max_diff * amplitude`.
    pub max_collapse_steps: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            max_diff: MAX_DIFF,
            base_cost: BASE_COST,
            smoothing: SMOOTHING,
            max_collapse_steps: MAX_COLLAPSE_STEPS,
        }
    }
}

impl MiningConfig {
    pub fn validate(&self) -> SimResult<()> {
        validate_non_negative("max_diff", self.max_diff)?;
        validate_non_negative("base_cost", self.base_cost)?;
        validate_non_negative("smoothing", self.smoothing)?;
        if self.max_collapse_steps == 0 {
            return Err(SimError::invalid("max_collapse_steps", "must be at least 1"));
        }
        Ok(())
    }
}

/// Cash, difficulty progression and ore placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_cash: i64,
    pub starting_difficulty: f32,
    /// Difficulty multiplier applied on each new planet
    pub difficulty_growth: f32,
    /// Deposits scattered on each planet
    pub ore_count: usize,
    pub ore_min_radius: f32,
    pub ore_max_radius: f32,
    /// Cash per unit of deposit radius
    pub ore_value_per_radius: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_cash: STARTING_CASH,
            starting_difficulty: 1.0,
            difficulty_growth: DIFFICULTY_GROWTH,
            ore_count: ORE_PER_PLANET,
            ore_min_radius: ORE_MIN_RADIUS,
            ore_max_radius: ORE_MAX_RADIUS,
            ore_value_per_radius: ORE_VALUE_PER_RADIUS,
        }
    }
}

impl EconomyConfig {
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("starting_difficulty", self.starting_difficulty)?;
        validate_positive("difficulty_growth", self.difficulty_growth)?;
        validate_positive("ore_min_radius", self.ore_min_radius)?;
        validate_positive("ore_max_radius", self.ore_max_radius)?;
        validate_positive("ore_value_per_radius", self.ore_value_per_radius)?;
        if self.ore_min_radius > self.ore_max_radius {
            return Err(SimError::invalid(
                "ore_max_radius",
                format!(
                    "range {}..{} is inverted",
                    self.ore_min_radius, self.ore_max_radius
                ),
            ));
        }
        Ok(())
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: DifficultyPreset,
    pub planet: SpheroidConfig,
    pub core: SpheroidConfig,
    pub mining: MiningConfig,
    pub economy: EconomyConfig,
    /// Seconds per planet rotation (render only)
    pub rotation_period: f32,
    /// Distance of the player craft from the planet center
    pub player_altitude: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyPreset::Normal,
            planet: SpheroidConfig::planet(),
            core: SpheroidConfig::core(),
            mining: MiningConfig::default(),
            economy: EconomyConfig::default(),
            rotation_period: ROTATION_PERIOD,
            player_altitude: PLAYER_ALTITUDE,
        }
    }
}

impl GameConfig {
    /// Create a config from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a difficulty preset (updates difficulty-dependent values)
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.difficulty = preset;
        self.economy.starting_difficulty = preset.starting_difficulty();
        self.economy.starting_cash = preset.starting_cash();
    }

    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::invalid("config", e.to_string()))
    }

    /// Load a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SimError::invalid("config", format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.planet.validate()?;
        self.core.validate()?;
        self.mining.validate()?;
        self.economy.validate()?;
        validate_positive("rotation_period", self.rotation_period)?;
        validate_positive("player_altitude", self.player_altitude)?;
        Ok(())
    }
}
