//! Disc entities: the striker and the playing pieces

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a disc is; decides its radius, color and points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscKind {
    Striker,
    Queen,
    Light,
    Dark,
}

impl DiscKind {
    /// Points for pocketing a disc of this kind (striker is a foul, not a score)
    pub fn points(&self) -> i32 {
        match self {
            DiscKind::Striker => 0,
            DiscKind::Queen => 50,
            DiscKind::Light => 20,
            DiscKind::Dark => 10,
        }
    }

    /// Whether the match continues while a disc of this kind is on the board
    pub fn keeps_match_alive(&self) -> bool {
        matches!(self, DiscKind::Light | DiscKind::Dark)
    }

    pub fn default_color(&self) -> u32 {
        match self {
            DiscKind::Striker => DEFAULT_STRIKER_COLOR,
            DiscKind::Queen => QUEEN_COLOR,
            DiscKind::Light => LIGHT_COLOR,
            DiscKind::Dark => DARK_COLOR,
        }
    }
}

/// A disc on the board (unit mass)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disc {
    pub id: u32,
    pub kind: DiscKind,
    pub pos: Vec2,
    /// Velocity in board units per tick
    pub vel: Vec2,
    pub radius: f32,
    /// False once pocketed; inactive discs are parked at `OFF_BOARD`
    pub active: bool,
    /// RGB, cosmetic only
    pub color: u32,
}

impl Disc {
    pub fn new(id: u32, kind: DiscKind, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            active: true,
            color: kind.default_color(),
        }
    }

    #[inline]
    pub fn is_striker(&self) -> bool {
        self.kind == DiscKind::Striker
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Kinetic energy with unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }

    /// Remove from play: stop, deactivate and park off the board
    pub fn park(&mut self) {
        self.vel = Vec2::ZERO;
        self.active = false;
        self.pos = OFF_BOARD;
    }
}
