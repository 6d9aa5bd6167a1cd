//! Read-only view of the game for renderers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aim::GestureMode;
use super::disc::DiscKind;
use super::state::{Game, GameMode, GamePhase, Player, TurnPhase};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub size: f32,
    pub pocket_radius: f32,
    pub pockets: [Vec2; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscView {
    pub id: u32,
    pub kind: DiscKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub active: bool,
}

/// Aim line endpoints while a pull is in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimView {
    pub mode: GestureMode,
    pub start: Vec2,
    pub current: Vec2,
    /// Where the aim guide should point (striker + 2 * pull)
    pub guide_end: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub mode: GameMode,
    pub current_player: Player,
    pub turn: TurnPhase,
    pub ai_thinking: bool,
    pub scores: [i32; 2],
    /// Striker first; inactive pieces are included so hosts can animate removal
    pub discs: Vec<DiscView>,
    pub aim: Option<AimView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub board: BoardView,
    pub game: Option<MatchView>,
}

impl Game {
    /// Capture everything a renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot {
        let board = BoardView {
            size: self.board.size,
            pocket_radius: self.board.pocket_radius,
            pockets: self.board.pockets,
        };

        let game = self.match_state.as_ref().map(|m| {
            let discs = m
                .discs
                .iter()
                .map(|d| DiscView {
                    id: d.id,
                    kind: d.kind,
                    pos: d.pos,
                    radius: d.radius,
                    color: d.color,
                    active: d.active,
                })
                .collect();

            let aim = (m.gesture.mode != GestureMode::None).then(|| AimView {
                mode: m.gesture.mode,
                start: m.gesture.start,
                current: m.gesture.current,
                guide_end: m.striker().pos + m.gesture.pull() * 2.0,
            });

            MatchView {
                mode: m.mode,
                current_player: m.current_player,
                turn: m.turn,
                ai_thinking: m.pending_ai.is_some(),
                scores: m.scores,
                discs,
                aim,
            }
        });

        Snapshot {
            phase: self.phase(),
            board,
            game,
        }
    }
}
