//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in explicitly
//! - Stable iteration order (by sector index, deposits by ID)
//! - No rendering or platform dependencies

pub mod mining;
pub mod ore;
pub mod spheroid;
pub mod state;
pub mod tick;

pub use mining::{Collapse, Direction, MineOutcome, MiningEngine};
pub use ore::{OreDeposit, OreField};
pub use spheroid::{CurvePoint, Spheroid};
pub use state::{Debris, GameEvent, GamePhase, GameState, MAX_DEBRIS};
pub use tick::{TickInput, tick};
