//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One physics step per tick (no variable timestep)
//! - Seeded RNG only (per match)
//! - Stable iteration order (striker, queen, rings)
//! - No rendering or platform dependencies

pub mod ai;
pub mod aim;
pub mod board;
pub mod collision;
pub mod disc;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aim::{AimGesture, GestureMode, shot_velocity};
pub use board::Board;
pub use collision::{CollisionResult, in_pocket, pocket_at, resolve_collision, resolve_wall};
pub use disc::{Disc, DiscKind};
pub use physics::{Capture, StepReport, step};
pub use snapshot::Snapshot;
pub use state::{
    Game, GameEvent, GameMode, GamePhase, MatchState, Player, ScheduledTask, TaskHandle,
    TurnPhase, rack,
};
pub use tick::tick;
