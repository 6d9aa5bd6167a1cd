//! Square board geometry
//!
//! Everything is derived from the side length `size` through the ratios in
//! [`Tuning`], so a resize only has to rescale positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::disc::DiscKind;
use crate::tuning::Tuning;

/// The play surface and its four corner pockets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Side length
    pub size: f32,
    /// Capture radius of each pocket
    pub pocket_radius: f32,
    /// Pocket centers: top-left, top-right, bottom-left, bottom-right
    pub pockets: [Vec2; 4],
    striker_radius_ratio: f32,
    piece_radius_ratio: f32,
    baseline_ratio: f32,
}

impl Board {
    pub fn new(size: f32, tuning: &Tuning) -> Self {
        let mut board = Self {
            size,
            pocket_radius: 0.0,
            pockets: [Vec2::ZERO; 4],
            striker_radius_ratio: tuning.striker_radius_ratio,
            piece_radius_ratio: tuning.piece_radius_ratio,
            baseline_ratio: tuning.baseline_ratio,
        };
        board.pocket_radius = size * tuning.pocket_radius_ratio;
        board.layout_pockets();
        board
    }

    fn layout_pockets(&mut self) {
        let r = self.pocket_radius;
        let s = self.size;
        self.pockets = [
            Vec2::new(r, r),
            Vec2::new(s - r, r),
            Vec2::new(r, s - r),
            Vec2::new(s - r, s - r),
        ];
    }

    /// Change the side length; returns the scale factor applied (new / old)
    pub fn resize(&mut self, new_size: f32) -> f32 {
        let scale = if self.size > 0.0 { new_size / self.size } else { 1.0 };
        self.pocket_radius *= scale;
        self.size = new_size;
        self.layout_pockets();
        scale
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }

    /// Radius of a disc of the given kind on this board
    pub fn radius_for(&self, kind: DiscKind) -> f32 {
        match kind {
            DiscKind::Striker => self.size * self.striker_radius_ratio,
            DiscKind::Queen | DiscKind::Light | DiscKind::Dark => {
                self.size * self.piece_radius_ratio
            }
        }
    }

    /// Striker start position for a baseline (player one at the bottom)
    pub fn baseline_position(&self, bottom: bool) -> Vec2 {
        let y = if bottom {
            self.size * self.baseline_ratio
        } else {
            self.size * (1.0 - self.baseline_ratio)
        };
        Vec2::new(self.size / 2.0, y)
    }

    /// Horizontal range the striker may slide along its baseline
    ///
    /// Keeps a full pocket diameter between the striker and either side wall.
    pub fn slide_range(&self, striker_radius: f32) -> (f32, f32) {
        let margin = 2.0 * self.pocket_radius + striker_radius;
        let lo = margin.min(self.size / 2.0);
        (lo, self.size - lo)
    }

    /// Clamp a center so a disc of `radius` lies fully on the board
    pub fn clamp_inside(&self, pos: Vec2, radius: f32) -> Vec2 {
        let hi = (self.size - radius).max(radius);
        Vec2::new(pos.x.clamp(radius, hi), pos.y.clamp(radius, hi))
    }
}
