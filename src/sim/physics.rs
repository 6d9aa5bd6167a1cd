//! One fixed physics tick over all discs
//!
//! Order per tick:
//! 1. Each active disc: integrate, friction, walls, pockets
//! 2. Every unordered pair of active discs: collision
//! 3. Re-clamp active discs inside the walls

use glam::Vec2;

use super::board::Board;
use super::collision::{pocket_at, resolve_collision, resolve_wall};
use super::disc::{Disc, DiscKind};
use crate::tuning::Tuning;

/// A disc that dropped into a pocket during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture {
    pub disc_id: u32,
    pub kind: DiscKind,
    pub pocket: usize,
}

/// Outcome of one physics tick
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    /// Anything still in motion (drives turn end)
    pub moving: bool,
    /// Pairwise impulses applied this tick
    pub collisions: u32,
    /// Discs pocketed this tick
    pub captures: Vec<Capture>,
}

/// Advance every disc by one tick
pub fn step(discs: &mut [Disc], board: &Board, tuning: &Tuning) -> StepReport {
    let mut report = StepReport::default();

    for disc in discs.iter_mut().filter(|d| d.active) {
        let moved = disc.speed() > tuning.rest_epsilon;
        if moved {
            report.moving = true;
            disc.pos += disc.vel;
            disc.vel *= tuning.friction;
        } else {
            disc.vel = Vec2::ZERO;
        }

        resolve_wall(disc, board, tuning.wall_restitution);

        // Only a disc that travelled this tick can drop into a pocket
        if !moved {
            continue;
        }
        if let Some(pocket) = pocket_at(disc.pos, board) {
            log::debug!("{:?} #{} dropped into pocket {}", disc.kind, disc.id, pocket);
            report.captures.push(Capture {
                disc_id: disc.id,
                kind: disc.kind,
                pocket,
            });
            disc.park();
        }
    }

    for i in 0..discs.len() {
        let (head, tail) = discs.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.active {
            continue;
        }
        for b in tail.iter_mut().filter(|d| d.active) {
            if resolve_collision(a, b) {
                report.collisions += 1;
            }
        }
    }

    // Positional correction can push a disc into a wall
    for disc in discs.iter_mut().filter(|d| d.active) {
        disc.pos = board.clamp_inside(disc.pos, disc.radius);
    }

    report.moving |= report.collisions > 0
        || discs
            .iter()
            .any(|d| d.active && d.speed() > tuning.rest_epsilon);
    report
}
