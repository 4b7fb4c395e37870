//! End-to-end runs through the public API

use eriezium::render::{scene_svg, spheroid_path};
use eriezium::sim::{Direction, GameEvent, GamePhase, GameState, MiningEngine, Spheroid, TickInput, tick};
use eriezium::{GameConfig, SimError, sector_for_angle};
use rand::SeedableRng;
use rand_pcg::Pcg32;

const DT: f32 = 1.0 / 60.0;

fn autopilot(state: &mut GameState, max_frames: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..max_frames {
        if state.phase != GamePhase::Playing {
            break;
        }
        let input = if state.planet.is_at_floor(state.player_sector).unwrap() {
            TickInput {
                rotate: Some(Direction::Forward),
                ..Default::default()
            }
        } else {
            TickInput {
                mine: true,
                ..Default::default()
            }
        };
        tick(state, &input, DT).unwrap();
        events.extend(state.drain_events());
    }
    events
}

#[test]
fn rich_player_clears_planet_and_moves_on() {
    let mut config = GameConfig::default();
    config.economy.starting_cash = 1_000_000;
    let mut state = GameState::new(config, 2024).unwrap();
    let buried = state.ore.remaining_value() as i64;

    let events = autopilot(&mut state, 50_000);

    assert_eq!(state.phase, GamePhase::PlanetCleared);
    let spent: i64 = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Mined { cost, .. } => Some(*cost as i64),
            _ => None,
        })
        .sum();
    assert_eq!(state.cash, 1_000_000 - spent + buried);
    assert!(matches!(events.last(), Some(GameEvent::PlanetCleared { level: 1 })));

    // Floors held for the whole run
    for (h, f) in state.planet.heights().iter().zip(state.planet.floors()) {
        assert!(h >= f);
    }

    let advance = TickInput {
        advance: true,
        ..Default::default()
    };
    tick(&mut state, &advance, DT).unwrap();
    assert_eq!(state.level, 2);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.drain_events(), vec![GameEvent::NewPlanet { level: 2 }]);
}

#[test]
fn broke_player_goes_bankrupt_and_restarts() {
    let mut config = GameConfig::default();
    config.economy.starting_cash = 5;
    config.mining.base_cost = 50.0;
    let mut state = GameState::new(config, 77).unwrap();

    let events = autopilot(&mut state, 10_000);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Bankrupt { .. })));

    // Further input is ignored until advancing
    let heights = state.planet.heights().to_vec();
    let mine = TickInput {
        mine: true,
        ..Default::default()
    };
    tick(&mut state, &mine, DT).unwrap();
    assert_eq!(state.planet.heights(), heights.as_slice());

    let advance = TickInput {
        advance: true,
        ..Default::default()
    };
    tick(&mut state, &advance, DT).unwrap();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.seed, 78);
    assert_eq!(state.cash, 5);
}

#[test]
fn engine_on_standalone_spheroid() {
    let mut rng = Pcg32::seed_from_u64(3);
    let mut planet = Spheroid::create(1200.0, 50.0, 48, 150.0, &mut rng).unwrap();
    let engine = MiningEngine::default();

    // Sector indices derived from angles are always valid
    for k in 0..100 {
        let angle = k as f32 * 0.37 - 10.0;
        let sector = sector_for_angle(angle, planet.sector_count());
        engine.mine(&mut planet, sector, 1.0, &mut rng).unwrap();
    }

    assert_eq!(
        engine.mine(&mut planet, 48, 1.0, &mut rng),
        Err(SimError::IndexOutOfRange { index: 48, len: 48 })
    );
    assert!(spheroid_path(&planet.curve_points(0.2)).ends_with('Z'));
}

#[test]
fn scene_renders_after_play() {
    let mut state = GameState::new(GameConfig::default(), 5).unwrap();
    autopilot(&mut state, 30);
    let svg = scene_svg(&state, 4000.0);
    assert!(svg.contains("<path d=\"M"));
}
