//! Game state and session types
//!
//! Player position, cash, difficulty and the planet counter all live on
//! [`GameState`] and are passed explicitly into the mining engine.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::mining::{Direction, MineOutcome, MiningEngine};
use super::ore::OreField;
use super::spheroid::Spheroid;
use crate::error::SimResult;
use crate::settings::GameConfig;
use crate::{sector_center_angle, sector_for_angle};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is orbiting and mining
    Playing,
    /// Every deposit collected; waiting to move to the next planet
    PlanetCleared,
    /// Run ended
    GameOver,
}

/// Something the front-end may want to react to (sound, flash, HUD pop)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Mined { sector: usize, depth: f32, cost: u32 },
    Collapsed { sector: usize, depth: f32 },
    OreCollected { id: u32, value: u32 },
    PlanetCleared { level: u32 },
    NewPlanet { level: u32 },
    Bankrupt { cash: i64 },
    Stranded,
    Restarted { seed: u64 },
}

/// A bit of rubble thrown off the surface (not gameplay-affecting)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Debris {
    pub angle: f32,
    pub height: f32,
    pub height_vel: f32,
    /// Seconds left to live
    pub ttl: f32,
}

/// Maximum debris particles
pub const MAX_DEBRIS: usize = 256;
/// Pull back toward the planet (units/s²)
pub const DEBRIS_GRAVITY: f32 = 400.0;

/// Salt so the cosmetic RNG stream never mirrors the gameplay one
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Planet counter (1-based)
    pub level: u32,
    pub phase: GamePhase,
    pub cash: i64,
    /// Cost multiplier
    pub difficulty: f32,
    /// Sector under the player craft
    pub player_sector: usize,
    pub planet: Spheroid,
    /// Decorative inner body
    pub core: Spheroid,
    pub ore: OreField,
    /// Seconds since the run started
    pub elapsed: f32,
    /// Visual debris
    #[serde(skip)]
    pub debris: Vec<Debris>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Gameplay stream, saved mid-sequence so a reloaded run continues identically
    rng: Pcg32,
    /// Cosmetic stream
    fx_rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let planet = generate_planet(&config, &mut rng)?;
        let core = generate_core(&config, &mut rng)?;
        let ore = scatter_ore(&config, &planet, &mut rng);

        log::info!(
            "New run (seed {}): planet with {} sectors, {} deposits",
            seed,
            planet.sector_count(),
            ore.len()
        );

        Ok(Self {
            seed,
            level: 1,
            phase: GamePhase::Playing,
            cash: config.economy.starting_cash,
            difficulty: config.economy.starting_difficulty,
            player_sector: 0,
            planet,
            core,
            ore,
            elapsed: 0.0,
            debris: Vec::new(),
            events: Vec::new(),
            rng,
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
            config,
        })
    }

    pub fn engine(&self) -> MiningEngine {
        MiningEngine::new(&self.config.mining)
    }

    /// Move the player one sector around the planet
    pub fn rotate(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.player_sector = self.planet.neighbor(self.player_sector, direction.step());
    }

    /// Mine under the player, pay for it, collect whatever it exposes.
    ///
    /// Returns `None` outside of [`GamePhase::Playing`].
    pub fn mine(&mut self) -> SimResult<Option<MineOutcome>> {
        if self.phase != GamePhase::Playing {
            return Ok(None);
        }

        let engine = self.engine();
        let outcome = engine.mine(
            &mut self.planet,
            self.player_sector,
            self.difficulty,
            &mut self.rng,
        )?;
        if outcome.is_noop() {
            log::debug!("Sector {} is at its floor", outcome.sector);
            return Ok(Some(outcome));
        }

        self.cash -= outcome.cost as i64;
        self.events.push(GameEvent::Mined {
            sector: outcome.sector,
            depth: outcome.depth,
            cost: outcome.cost,
        });
        self.spawn_debris(outcome.sector, outcome.depth);
        for slide in &outcome.collapses {
            self.events.push(GameEvent::Collapsed {
                sector: slide.sector,
                depth: slide.depth,
            });
            self.spawn_debris(slide.sector, slide.depth);
        }

        for deposit in self.ore.collect_exposed(&self.planet, outcome.touched_sectors())? {
            self.cash += deposit.value as i64;
            self.events.push(GameEvent::OreCollected {
                id: deposit.id,
                value: deposit.value,
            });
        }

        self.update_phase();
        Ok(Some(outcome))
    }

    /// Win/lose evaluation after the planet or cash changed
    fn update_phase(&mut self) {
        if self.cash < 0 {
            log::info!("Bankrupt on planet {} (cash {})", self.level, self.cash);
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::Bankrupt { cash: self.cash });
        } else if self.ore.is_empty() {
            log::info!("Planet {} cleared with {} cash", self.level, self.cash);
            self.phase = GamePhase::PlanetCleared;
            self.events.push(GameEvent::PlanetCleared { level: self.level });
        } else if self.planet.minable_depth() <= 0.0 {
            log::info!("Planet {} mined out with ore left", self.level);
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::Stranded);
        }
    }

    /// Move on after clearing a planet. Returns false in any other phase.
    pub fn next_planet(&mut self) -> SimResult<bool> {
        if self.phase != GamePhase::PlanetCleared {
            return Ok(false);
        }
        self.planet = generate_planet(&self.config, &mut self.rng)?;
        self.core = generate_core(&self.config, &mut self.rng)?;
        self.ore = scatter_ore(&self.config, &self.planet, &mut self.rng);
        self.level += 1;
        self.difficulty *= self.config.economy.difficulty_growth;
        self.player_sector = 0;
        self.debris.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::NewPlanet { level: self.level });

        log::info!(
            "Planet {} (difficulty {:.2}): {} deposits",
            self.level,
            self.difficulty,
            self.ore.len()
        );
        Ok(true)
    }

    /// Start a fresh run with the same config after a game over
    pub fn restart(&mut self) -> SimResult<bool> {
        if self.phase != GamePhase::GameOver {
            return Ok(false);
        }
        let seed = self.seed.wrapping_add(1);
        *self = Self::new(self.config.clone(), seed)?;
        self.events.push(GameEvent::Restarted { seed });
        Ok(true)
    }

    /// Angle of the player craft, centered on its sector
    pub fn player_angle(&self) -> f32 {
        sector_center_angle(self.player_sector, self.planet.sector_count())
    }

    /// Current planet rotation for display, in [0, 2π)
    pub fn planet_rotation(&self) -> f32 {
        let period = self.config.rotation_period;
        (self.elapsed % period) / period * TAU
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn spawn_debris(&mut self, sector: usize, depth: f32) {
        let amplitude = self.planet.amplitude().max(1.0);
        let count = ((depth / amplitude) * 4.0).ceil().clamp(1.0, 8.0) as usize;
        let dt = self.planet.sector_angle();
        let surface = self.planet.heights()[sector];

        for _ in 0..count {
            if self.debris.len() >= MAX_DEBRIS {
                break;
            }
            self.debris.push(Debris {
                angle: (sector as f32 + self.fx_rng.random::<f32>()) * dt,
                height: surface,
                height_vel: 100.0 + self.fx_rng.random::<f32>() * 200.0,
                ttl: 0.5 + self.fx_rng.random::<f32>(),
            });
        }
    }

    /// Age debris; drop it once expired or back under the surface
    pub fn update_debris(&mut self, dt: f32) {
        for d in &mut self.debris {
            d.height += d.height_vel * dt;
            d.height_vel -= DEBRIS_GRAVITY * dt;
            d.ttl -= dt;
        }
        let planet = &self.planet;
        let n = planet.sector_count();
        self.debris
            .retain(|d| d.ttl > 0.0 && d.height >= planet.heights()[sector_for_angle(d.angle, n)]);
    }
}

fn generate_planet<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> SimResult<Spheroid> {
    let p = config.planet;
    Spheroid::create(p.radius, p.amplitude, p.sectors, p.floor, rng)
}

fn generate_core<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> SimResult<Spheroid> {
    let c = config.core;
    Spheroid::create(c.radius, c.amplitude, c.sectors, c.floor, rng)
}

fn scatter_ore<R: Rng + ?Sized>(config: &GameConfig, planet: &Spheroid, rng: &mut R) -> OreField {
    let e = config.economy;
    OreField::scatter(
        planet,
        e.ore_count,
        (e.ore_min_radius, e.ore_max_radius),
        e.ore_value_per_radius,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ore::OreDeposit;

    fn state(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_new_state() {
        let s = state(1);
        assert_eq!(s.level, 1);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.cash, 100);
        assert_eq!(s.planet.sector_count(), 48);
        assert_eq!(s.core.sector_count(), 16);
        assert_eq!(s.ore.len(), 12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.planet.sectors = 2;
        assert!(GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_rotate_wraps() {
        let mut s = state(1);
        s.rotate(Direction::Backward);
        assert_eq!(s.player_sector, 47);
        s.rotate(Direction::Forward);
        s.rotate(Direction::Forward);
        assert_eq!(s.player_sector, 1);
    }

    #[test]
    fn test_mine_charges_cash_and_emits_events() {
        let mut s = state(3);
        let outcome = s.mine().unwrap().unwrap();
        let events = s.drain_events();
        if outcome.is_noop() {
            assert!(events.is_empty());
        } else {
            let collected: i64 = events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::OreCollected { value, .. } => Some(*value as i64),
                    _ => None,
                })
                .sum();
            assert_eq!(s.cash, 100 - outcome.cost as i64 + collected);
            assert!(matches!(events[0], GameEvent::Mined { sector: 0, .. }));
            assert!(!s.debris.is_empty());
        }
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_bankrupt_ends_run() {
        let mut config = GameConfig::default();
        config.economy.starting_cash = 0;
        config.mining.base_cost = 1000.0;
        let mut s = GameState::new(config, 5).unwrap();
        // Keep digging until something is actually removed
        for _ in 0..50 {
            s.mine().unwrap();
            if s.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.cash < 0);
        assert!(s.mine().unwrap().is_none());

        assert!(s.restart().unwrap());
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.seed, 6);
        assert_eq!(s.drain_events(), vec![GameEvent::Restarted { seed: 6 }]);
    }

    #[test]
    fn test_clearing_planet_and_moving_on() {
        let mut config = GameConfig::default();
        config.economy.starting_cash = 1_000_000;
        config.economy.ore_count = 3;
        let mut s = GameState::new(config, 9).unwrap();

        // Dig every sector to its floor; every deposit must come out
        for _ in 0..48 {
            for _ in 0..1000 {
                if s.phase != GamePhase::Playing || s.planet.is_at_floor(s.player_sector).unwrap()
                {
                    break;
                }
                s.mine().unwrap();
            }
            if s.phase != GamePhase::Playing {
                break;
            }
            s.rotate(Direction::Forward);
        }

        assert_eq!(s.phase, GamePhase::PlanetCleared);
        assert!(s.ore.is_empty());
        assert!(s.next_planet().unwrap());
        assert_eq!(s.level, 2);
        assert_eq!(s.phase, GamePhase::Playing);
        assert!((s.difficulty - 1.25).abs() < 1e-6);
        assert_eq!(s.ore.len(), 3);
        assert!(!s.next_planet().unwrap());
    }

    #[test]
    fn test_mined_out_with_ore_left_is_stranded() {
        let mut s = state(6);
        s.cash = 1_000_000;
        let mut heights = vec![100.0; 8];
        heights[0] = 110.0;
        s.planet = Spheroid::with_uniform_floor(heights, 100.0, 50.0).unwrap();
        // Deposit sunk below the floor can never be reached
        s.ore = [OreDeposit {
            id: 1,
            angle: 1.5 * TAU / 8.0,
            sector: 1,
            radial_height: 50.0,
            radius: 10.0,
            value: 20,
        }]
        .into_iter()
        .collect();

        for _ in 0..1000 {
            if s.phase != GamePhase::Playing {
                break;
            }
            s.mine().unwrap();
        }

        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.planet.minable_depth(), 0.0);
        assert_eq!(s.ore.len(), 1);
        assert_eq!(s.drain_events().last(), Some(&GameEvent::Stranded));
    }

    #[test]
    fn test_input_ignored_outside_playing() {
        let mut s = state(2);
        s.phase = GamePhase::PlanetCleared;
        s.rotate(Direction::Forward);
        assert_eq!(s.player_sector, 0);
        assert!(s.mine().unwrap().is_none());
        assert!(!s.restart().unwrap());
    }

    #[test]
    fn test_planet_rotation_wraps() {
        let mut s = state(2);
        s.elapsed = 90.0;
        assert!((s.planet_rotation() - TAU / 4.0).abs() < 1e-4);
        s.elapsed = 450.0;
        assert!((s.planet_rotation() - TAU / 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_debris_falls_back() {
        let mut s = state(4);
        s.spawn_debris(0, 50.0);
        assert!(!s.debris.is_empty());
        for _ in 0..200 {
            s.update_debris(1.0 / 60.0);
        }
        assert!(s.debris.is_empty());
    }

    #[test]
    fn test_serde_round_trip_continues_run() {
        let mut config = GameConfig::default();
        config.economy.starting_cash = 1_000_000;
        let mut a = GameState::new(config, 12).unwrap();
        a.mine().unwrap();

        let json = serde_json::to_string(&a).unwrap();
        let mut b: GameState = serde_json::from_str(&json).unwrap();
        assert!(b.debris.is_empty());

        for _ in 0..5 {
            a.mine().unwrap();
            b.mine().unwrap();
        }
        assert_eq!(a.planet.heights(), b.planet.heights());
        assert_eq!(a.cash, b.cash);
        assert_eq!(a.ore.len(), b.ore.len());
        assert_eq!(a.rng.random::<u64>(), b.rng.random::<u64>());
        assert_eq!(a.fx_rng.random::<u64>(), b.fx_rng.random::<u64>());
    }

    #[test]
    fn test_gameplay_and_cosmetic_streams_differ() {
        let mut s = state(8);
        let json = serde_json::to_string(&s).unwrap();
        let mut back: GameState = serde_json::from_str(&json).unwrap();
        assert_ne!(back.rng.random::<u64>(), back.fx_rng.random::<u64>());
        assert_ne!(s.rng.random::<u64>(), s.fx_rng.random::<u64>());
    }

    #[test]
    fn test_player_angle_centered() {
        let mut s = state(4);
        s.player_sector = 1;
        let dt = TAU / 48.0;
        assert!((s.player_angle() - 1.5 * dt).abs() < 1e-6);
    }
}
