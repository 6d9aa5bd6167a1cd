//! Collision detection and response for discs on a square board
//!
//! Three kinds of contact: disc vs wall (per-axis reflection), disc vs pocket
//! (point capture), and disc vs disc (equal-mass elastic exchange).

use glam::Vec2;

use super::board::Board;
use super::disc::Disc;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact normal, pointing from the first disc toward the second
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles
///
/// Coincident centers have no defined normal; `Vec2::X` is used so the pair
/// still separates.
pub fn circle_circle(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let delta = b_pos - a_pos;
    let dist = delta.length();
    let min_dist = a_radius + b_radius;

    if dist >= min_dist {
        return CollisionResult::miss();
    }

    let normal = if dist > 1e-6 { delta / dist } else { Vec2::X };
    CollisionResult {
        hit: true,
        normal,
        penetration: min_dist - dist,
    }
}

/// Separate and bounce two overlapping discs
///
/// Each disc moves half the overlap along the normal. Then, if they are
/// approaching, their normal velocity components are swapped (unit masses),
/// which keeps both momentum and kinetic energy. Returns true when an impulse
/// was applied.
pub fn resolve_collision(a: &mut Disc, b: &mut Disc) -> bool {
    let contact = circle_circle(a.pos, a.radius, b.pos, b.radius);
    if !contact.hit {
        return false;
    }

    let n = contact.normal;
    let correction = n * (contact.penetration * 0.5);
    a.pos -= correction;
    b.pos += correction;

    // Closing speed along the normal
    let closing = (a.vel - b.vel).dot(n);
    if closing <= 0.0 {
        return false;
    }

    a.vel -= n * closing;
    b.vel += n * closing;
    true
}

/// Which wall(s) a disc bounced off this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Keep a disc on the board, reflecting each axis independently
pub fn resolve_wall(disc: &mut Disc, board: &Board, restitution: f32) -> WallHit {
    let r = disc.radius;
    let hi = board.size - r;
    let mut hit = WallHit::default();

    if disc.pos.x < r {
        disc.pos.x = r;
        disc.vel.x *= -restitution;
        hit.x = true;
    } else if disc.pos.x > hi {
        disc.pos.x = hi;
        disc.vel.x *= -restitution;
        hit.x = true;
    }

    if disc.pos.y < r {
        disc.pos.y = r;
        disc.vel.y *= -restitution;
        hit.y = true;
    } else if disc.pos.y > hi {
        disc.pos.y = hi;
        disc.vel.y *= -restitution;
        hit.y = true;
    }

    hit
}

/// Check if a disc center lies inside a pocket's capture radius
#[inline]
pub fn in_pocket(pos: Vec2, pocket: Vec2, capture_radius: f32) -> bool {
    pos.distance(pocket) < capture_radius
}

/// Index of the pocket capturing this position, if any
pub fn pocket_at(pos: Vec2, board: &Board) -> Option<usize> {
    board
        .pockets
        .iter()
        .position(|&pocket| in_pocket(pos, pocket, board.pocket_radius))
}
