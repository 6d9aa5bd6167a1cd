//! Aim/shot controller
//!
//! A gesture starts on pointer-down. Touching the striker slides it along
//! the baseline; touching anywhere else pulls back a shot, slingshot style:
//! the striker flies opposite to the drag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::disc::Disc;
use super::state::{Game, TurnPhase};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureMode {
    #[default]
    None,
    /// Striker follows the pointer horizontally
    Sliding,
    /// Dragging out a shot
    Aiming,
}

/// Transient pointer gesture state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimGesture {
    pub mode: GestureMode,
    pub start: Vec2,
    pub current: Vec2,
}

impl AimGesture {
    /// Pick the gesture mode by how close the pointer is to the striker
    pub fn begin(&mut self, point: Vec2, striker: &Disc, grab_factor: f32) -> GestureMode {
        self.start = point;
        self.current = point;
        self.mode = if point.distance(striker.pos) < striker.radius * grab_factor {
            GestureMode::Sliding
        } else {
            GestureMode::Aiming
        };
        self.mode
    }

    /// Track the pointer; sliding moves the striker, aiming only records
    pub fn update(&mut self, point: Vec2, striker: &mut Disc, board: &Board) {
        match self.mode {
            GestureMode::None => {}
            GestureMode::Sliding => {
                self.current = point;
                let (lo, hi) = board.slide_range(striker.radius);
                striker.pos.x = point.x.clamp(lo, hi);
            }
            GestureMode::Aiming => self.current = point,
        }
    }

    /// End the gesture, returning the shot velocity if one was pulled
    pub fn release(&mut self, tuning: &Tuning) -> Option<Vec2> {
        let shot = match self.mode {
            GestureMode::Aiming => shot_velocity(self.pull(), tuning),
            GestureMode::Sliding | GestureMode::None => None,
        };
        self.cancel();
        shot
    }

    /// Drag vector in shot direction (start - current)
    #[inline]
    pub fn pull(&self) -> Vec2 {
        self.start - self.current
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn rescale(&mut self, scale: f32) {
        self.start *= scale;
        self.current *= scale;
    }
}

/// Convert a pull vector into striker velocity
///
/// Pulls no longer than `min_pull` are rejected; longer ones are capped at
/// `max_shot_power` before scaling.
pub fn shot_velocity(pull: Vec2, tuning: &Tuning) -> Option<Vec2> {
    let power = pull.length();
    if !(power > tuning.min_pull) {
        return None;
    }
    let power = power.min(tuning.max_shot_power);
    Some(pull / pull.length() * power * tuning.power_scale)
}

impl Game {
    /// Whether pointer input may start a gesture right now
    pub fn accepts_gesture(&self) -> bool {
        self.match_state
            .as_ref()
            .is_some_and(|m| m.turn == TurnPhase::AwaitingShot && !m.is_ai_turn())
    }

    /// Pointer down (board coordinates)
    pub fn begin_gesture(&mut self, x: f32, y: f32) -> GestureMode {
        if !self.accepts_gesture() {
            return GestureMode::None;
        }
        let grab = self.tuning.slide_grab_factor;
        match self.match_state.as_mut() {
            Some(m) => {
                let striker = m.discs[0].clone();
                m.gesture.begin(Vec2::new(x, y), &striker, grab)
            }
            None => GestureMode::None,
        }
    }

    /// Pointer moved; safe to call many times per tick
    pub fn update_gesture(&mut self, x: f32, y: f32) {
        if !self.accepts_gesture() {
            return;
        }
        let board = &self.board;
        if let Some(m) = self.match_state.as_mut() {
            let (striker, _) = m.discs.split_at_mut(1);
            m.gesture.update(Vec2::new(x, y), &mut striker[0], board);
        }
    }

    /// Pointer up; fires the striker when an aiming pull was long enough
    pub fn end_gesture(&mut self) -> bool {
        let accepting = self.accepts_gesture();
        let Some(m) = self.match_state.as_mut() else {
            return false;
        };
        let shot = m.gesture.release(&self.tuning);
        match shot {
            Some(velocity) if accepting => m.fire_striker(velocity, &mut self.events),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_STRIKER_COLOR;
    use crate::sim::disc::DiscKind;
    use crate::sim::state::GameMode;

    fn playing(mode: GameMode) -> Game {
        let mut g = Game::new(Tuning::classic(), 600.0, 1);
        g.start_match(mode, DEFAULT_STRIKER_COLOR);
        g
    }

    #[test]
    fn test_shot_velocity_thresholds() {
        let t = Tuning::classic();
        assert!(shot_velocity(Vec2::new(5.0, 0.0), &t).is_none());
        assert!(shot_velocity(Vec2::new(10.0, 0.0), &t).is_none());
        assert!(shot_velocity(Vec2::ZERO, &t).is_none());

        let v = shot_velocity(Vec2::new(0.0, -100.0), &t).expect("shot");
        assert!((v - Vec2::new(0.0, -20.0)).length() < 1e-4);

        let capped = shot_velocity(Vec2::new(300.0, 400.0), &t).expect("shot");
        assert!((capped.length() - 40.0).abs() < 1e-3);
        assert!((capped.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-4);
    }

    #[test]
    fn test_touch_near_striker_slides() {
        let mut g = playing(GameMode::PvP);
        let striker = g.match_state.as_ref().map(|m| m.striker().pos).expect("match");
        assert_eq!(g.begin_gesture(striker.x + 5.0, striker.y), GestureMode::Sliding);

        g.update_gesture(200.0, 10.0);
        g.update_gesture(200.0, 10.0);
        let m = g.match_state.as_ref().expect("match");
        assert!((m.striker().pos.x - 200.0).abs() < 1e-4);
        // Sliding never changes the baseline
        assert!((m.striker().pos.y - striker.y).abs() < 1e-4);

        assert!(!g.end_gesture());
        let m = g.match_state.as_ref().expect("match");
        assert_eq!(m.turn, TurnPhase::AwaitingShot);
        assert_eq!(m.gesture.mode, GestureMode::None);
    }

    #[test]
    fn test_slide_is_clamped_away_from_pockets() {
        let mut g = playing(GameMode::PvP);
        let striker = g.match_state.as_ref().map(|m| m.striker().pos).expect("match");
        g.begin_gesture(striker.x, striker.y);
        g.update_gesture(-50.0, striker.y);
        let r = g.board.radius_for(DiscKind::Striker);
        let (lo, _) = g.board.slide_range(r);
        let m = g.match_state.as_ref().expect("match");
        assert!((m.striker().pos.x - lo).abs() < 1e-4);
    }

    #[test]
    fn test_aim_release_fires_opposite_drag() {
        let mut g = playing(GameMode::PvP);
        assert_eq!(g.begin_gesture(300.0, 560.0), GestureMode::Aiming);
        g.update_gesture(300.0, 580.0);
        g.update_gesture(300.0, 600.0);
        assert!(g.end_gesture());

        let m = g.match_state.as_ref().expect("match");
        assert_eq!(m.turn, TurnPhase::ShotInFlight);
        assert!((m.striker().vel - Vec2::new(0.0, -8.0)).length() < 1e-4);
    }

    #[test]
    fn test_release_without_movement_is_noop() {
        let mut g = playing(GameMode::PvP);
        g.begin_gesture(100.0, 100.0);
        assert!(!g.end_gesture());
        let m = g.match_state.as_ref().expect("match");
        assert_eq!(m.turn, TurnPhase::AwaitingShot);
        assert_eq!(m.striker().vel, Vec2::ZERO);
    }

    #[test]
    fn test_no_gesture_on_ai_turn_or_in_flight() {
        let mut g = playing(GameMode::PvAI);
        if let Some(m) = g.match_state.as_mut() {
            m.current_player = crate::sim::state::Player::Two;
        }
        assert_eq!(g.begin_gesture(100.0, 100.0), GestureMode::None);

        let mut g = playing(GameMode::PvP);
        assert!(g.fire_striker(Vec2::new(0.0, -5.0)));
        assert_eq!(g.begin_gesture(100.0, 100.0), GestureMode::None);
        assert!(!g.end_gesture());
    }

    #[test]
    fn test_update_without_gesture_is_ignored() {
        let mut g = playing(GameMode::PvP);
        let before = g.match_state.as_ref().map(|m| m.striker().pos).expect("match");
        g.update_gesture(10.0, 10.0);
        let after = g.match_state.as_ref().map(|m| m.striker().pos).expect("match");
        assert_eq!(before, after);
    }
}
