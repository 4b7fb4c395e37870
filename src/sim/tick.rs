//! Per-frame simulation step
//!
//! Applies one frame of player input, advances the clock and ages debris.

use serde::{Deserialize, Serialize};

use super::mining::Direction;
use super::state::{GamePhase, GameState};
use crate::error::SimResult;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move one sector around the planet
    pub rotate: Option<Direction>,
    /// Dig under the player
    pub mine: bool,
    /// Next planet after a clear, new run after a game over
    pub advance: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> SimResult<()> {
    state.elapsed += dt;

    match state.phase {
        GamePhase::Playing => {
            if let Some(direction) = input.rotate {
                state.rotate(direction);
            }
            if input.mine {
                state.mine()?;
            }
        }
        GamePhase::PlanetCleared => {
            if input.advance {
                state.next_planet()?;
            }
        }
        GamePhase::GameOver => {
            if input.advance {
                state.restart()?;
            }
        }
    }

    state.update_debris(dt);
    Ok(())
}
