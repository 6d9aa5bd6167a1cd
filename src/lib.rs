//! Carrom Flick - A two-player disc flicking board game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, turns, AI)
//! - `tuning`: Data-driven rule and physics constants
//! - `profile`: Coins and striker skins, persisted outside the core
//! - `web`: wasm-bindgen surface for a browser host (wasm32 only)

pub mod profile;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use profile::{Profile, Skin, SKINS};
pub use sim::{Game, GameEvent, GameMode, Player};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Nominal frame time fed to `Game::tick` by hosts running at 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Board side used before the host reports a viewport
    pub const DEFAULT_BOARD_SIZE: f32 = 600.0;
    /// Fraction of the smaller viewport dimension the board fills
    pub const VIEWPORT_FILL: f32 = 0.95;

    /// Where pocketed discs are parked (far outside any board)
    pub const OFF_BOARD: Vec2 = Vec2::new(-10_000.0, -10_000.0);

    /// Default striker color (classic white)
    pub const DEFAULT_STRIKER_COLOR: u32 = 0xffffff;
    pub const QUEEN_COLOR: u32 = 0xff0055;
    pub const LIGHT_COLOR: u32 = 0xeeeeee;
    pub const DARK_COLOR: u32 = 0x222222;
}

/// Board side length for a viewport of the given size
#[inline]
pub fn board_size_for_viewport(width: f32, height: f32) -> f32 {
    width.min(height) * consts::VIEWPORT_FILL
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// True when the point lies outside the parked area (i.e. somewhere near a board)
#[inline]
pub fn is_on_board(pos: Vec2) -> bool {
    pos.x > consts::OFF_BOARD.x * 0.5 && pos.y > consts::OFF_BOARD.y * 0.5
}
