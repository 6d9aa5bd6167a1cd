//! Game context and match state
//!
//! `Game` owns everything the core mutates: the tuning, the board and the
//! optional running match. There are no globals; hosts hold a `Game` and call
//! into it from their frame loop and input handlers.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aim::AimGesture;
use super::board::Board;
use super::disc::{Disc, DiscKind};
use super::physics::Capture;
use crate::consts::DEFAULT_BOARD_SIZE;
use crate::tuning::Tuning;
use crate::{board_size_for_viewport, is_on_board, polar_to_cartesian};

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No match; host shows its menu/shop
    Menu,
    /// A match exists (running or finished)
    Playing,
}

/// Who controls player two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans sharing the board
    PvP,
    /// Player two is the computer
    PvAI,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::PvP => "PvP",
            GameMode::PvAI => "PvAI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Shoots from the bottom baseline
    One,
    /// Shoots from the top baseline
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// 1 or 2, for display
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Current player may aim, slide or (AI) shoot
    AwaitingShot,
    /// Striker was fired; waiting for the board to settle
    ShotInFlight,
    /// No scorable pieces left
    MatchOver,
}

/// Identifies a scheduled AI move and the match it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub match_id: u64,
    pub seq: u64,
}

/// A delayed callback counted down by `tick`
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub handle: TaskHandle,
    /// Seconds until it fires
    pub remaining: f32,
}

impl ScheduledTask {
    pub fn new(handle: TaskHandle, delay: f32) -> Self {
        Self {
            handle,
            remaining: delay.max(0.0),
        }
    }

    /// Count down; returns true once the task is due
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining -= dt.max(0.0);
        self.remaining <= 0.0
    }
}

/// Events for the host (economy, HUD, audio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted { mode: GameMode },
    ShotFired { player: Player, velocity: Vec2 },
    /// A piece was pocketed by `player`'s shot; `points` is the score delta
    DiscPocketed {
        player: Player,
        kind: DiscKind,
        points: i32,
    },
    /// The striker was pocketed; `penalty` is subtracted from the score
    StrikerFoul { player: Player, penalty: i32 },
    TurnChanged { player: Player },
    MatchOver {
        scores: [i32; 2],
        winner: Option<Player>,
    },
}

/// Everything about one match; dropped on return to menu
#[derive(Debug, Clone)]
pub struct MatchState {
    pub id: u64,
    pub mode: GameMode,
    pub current_player: Player,
    pub turn: TurnPhase,
    /// Striker first, then queen, then ring pieces
    pub discs: Vec<Disc>,
    pub scores: [i32; 2],
    pub gesture: AimGesture,
    pub pending_ai: Option<ScheduledTask>,
    /// Captures since the striker was fired
    pub flight: Vec<Capture>,
    pub striker_color: u32,
    pub rng: Pcg32,
    next_task_seq: u64,
}

impl MatchState {
    pub fn new(
        id: u64,
        mode: GameMode,
        board: &Board,
        tuning: &Tuning,
        striker_color: u32,
        seed: u64,
    ) -> Self {
        Self {
            id,
            mode,
            current_player: Player::One,
            turn: TurnPhase::AwaitingShot,
            discs: rack(board, tuning, striker_color),
            scores: [0, 0],
            gesture: AimGesture::default(),
            pending_ai: None,
            flight: Vec::new(),
            striker_color,
            rng: Pcg32::seed_from_u64(seed),
            next_task_seq: 1,
        }
    }

    pub fn striker(&self) -> &Disc {
        &self.discs[0]
    }

    pub fn striker_mut(&mut self) -> &mut Disc {
        &mut self.discs[0]
    }

    /// True while a shot is being simulated
    pub fn turn_active(&self) -> bool {
        self.turn == TurnPhase::ShotInFlight
    }

    pub fn is_ai(&self, player: Player) -> bool {
        self.mode == GameMode::PvAI && player == Player::Two
    }

    pub fn is_ai_turn(&self) -> bool {
        self.is_ai(self.current_player)
    }

    /// Light and dark pieces still on the board
    pub fn scorable_remaining(&self) -> usize {
        self.discs
            .iter()
            .filter(|d| d.active && d.kind.keeps_match_alive())
            .count()
    }

    /// Put the striker back on the current player's baseline, at rest
    pub fn reset_striker(&mut self, board: &Board) {
        let bottom = self.current_player == Player::One;
        let striker = self.striker_mut();
        striker.vel = Vec2::ZERO;
        striker.active = true;
        striker.radius = board.radius_for(DiscKind::Striker);
        striker.pos = board.baseline_position(bottom);
    }

    /// Give the striker a velocity and start the flight
    ///
    /// Only valid while awaiting a shot; zero or non-finite velocities are
    /// ignored.
    pub fn fire_striker(&mut self, velocity: Vec2, events: &mut Vec<GameEvent>) -> bool {
        if self.turn != TurnPhase::AwaitingShot
            || !velocity.is_finite()
            || velocity.length_squared() <= 0.0
        {
            return false;
        }

        let player = self.current_player;
        let striker = self.striker_mut();
        striker.active = true;
        striker.vel = velocity;
        self.turn = TurnPhase::ShotInFlight;
        self.flight.clear();
        self.gesture.cancel();
        log::debug!("Player {} fired at {:?}", player.number(), velocity);
        events.push(GameEvent::ShotFired { player, velocity });
        true
    }

    /// Schedule the AI move after `delay` seconds
    pub fn schedule_ai(&mut self, delay: f32) -> TaskHandle {
        let handle = TaskHandle {
            match_id: self.id,
            seq: self.next_task_seq,
        };
        self.next_task_seq += 1;
        self.pending_ai = Some(ScheduledTask::new(handle, delay));
        handle
    }

    /// Winner by score (none on a tie)
    pub fn leader(&self) -> Option<Player> {
        use std::cmp::Ordering;
        match self.scores[0].cmp(&self.scores[1]) {
            Ordering::Greater => Some(Player::One),
            Ordering::Less => Some(Player::Two),
            Ordering::Equal => None,
        }
    }
}

/// Striker, queen at center, then each ring at `i / count * 2π`, alternating light/dark
pub fn rack(board: &Board, tuning: &Tuning, striker_color: u32) -> Vec<Disc> {
    let mut discs = Vec::with_capacity(tuning.piece_count() + 1);

    let mut striker = Disc::new(
        0,
        DiscKind::Striker,
        board.baseline_position(true),
        board.radius_for(DiscKind::Striker),
    );
    striker.color = striker_color;
    discs.push(striker);

    let center = board.center();
    let piece_radius = board.radius_for(DiscKind::Queen);
    discs.push(Disc::new(1, DiscKind::Queen, center, piece_radius));

    let mut id = 2;
    for ring in &tuning.formation {
        let dist = piece_radius * ring.radius_factor;
        for i in 0..ring.count {
            let angle = i as f32 / ring.count as f32 * TAU;
            let kind = if i % 2 == 0 { DiscKind::Light } else { DiscKind::Dark };
            let pos = center + polar_to_cartesian(dist, angle);
            discs.push(Disc::new(id, kind, pos, board.radius_for(kind)));
            id += 1;
        }
    }

    discs
}

/// The simulation context
#[derive(Debug, Clone)]
pub struct Game {
    pub tuning: Tuning,
    pub board: Board,
    /// `Some` while playing
    pub match_state: Option<MatchState>,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    /// Base seed; each match derives its own
    pub seed: u64,
    next_match_id: u64,
}

impl Game {
    /// Invalid tunings fall back to `Tuning::classic()` and invalid sizes to
    /// `DEFAULT_BOARD_SIZE`, both with a warning.
    pub fn new(tuning: Tuning, board_size: f32, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning ({}), using classic", e);
                Tuning::classic()
            }
        };
        let board_size = if board_size.is_finite() && board_size > 0.0 {
            board_size
        } else {
            log::warn!("Invalid board size {}, using {}", board_size, DEFAULT_BOARD_SIZE);
            DEFAULT_BOARD_SIZE
        };
        let board = Board::new(board_size, &tuning);
        Self {
            tuning,
            board,
            match_state: None,
            events: Vec::new(),
            seed,
            next_match_id: 1,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.match_state.is_some() {
            GamePhase::Playing
        } else {
            GamePhase::Menu
        }
    }

    /// Rack the board and hand the first shot to player one
    pub fn start_match(&mut self, mode: GameMode, striker_color: u32) {
        if let Some(old) = self.match_state.take() {
            log::info!("Discarding match {} for a new one", old.id);
        }

        let id = self.next_match_id;
        self.next_match_id += 1;
        let seed = self
            .seed
            .wrapping_add(id.wrapping_mul(0x9E37_79B9_7F4A_7C15));

        let state = MatchState::new(id, mode, &self.board, &self.tuning, striker_color, seed);
        log::info!(
            "Match {} started ({}, {} discs)",
            id,
            mode.as_str(),
            state.discs.len()
        );
        self.match_state = Some(state);
        self.events.push(GameEvent::MatchStarted { mode });
        self.events.push(GameEvent::TurnChanged {
            player: Player::One,
        });
    }

    /// Drop the match; any scheduled AI move goes with it
    pub fn return_to_menu(&mut self) {
        if let Some(mut state) = self.match_state.take() {
            if let Some(task) = state.pending_ai.take() {
                log::info!("Cancelled AI move {:?}", task.handle);
            }
            log::info!("Match {} closed", state.id);
        }
    }

    /// Handle of the AI move waiting to fire, if any
    pub fn pending_ai(&self) -> Option<TaskHandle> {
        self.match_state
            .as_ref()
            .and_then(|m| m.pending_ai.as_ref())
            .map(|t| t.handle)
    }

    /// Cancel a scheduled AI move; false if it already fired or belongs elsewhere
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let Some(state) = self.match_state.as_mut() else {
            return false;
        };
        match &state.pending_ai {
            Some(task) if task.handle == handle => {
                state.pending_ai = None;
                true
            }
            _ => false,
        }
    }

    /// Viewport changed: refit the board and rescale the match
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.set_board_size(board_size_for_viewport(viewport_width, viewport_height));
    }

    /// Rescale positions, velocities and radii to a new board side
    pub fn set_board_size(&mut self, size: f32) {
        if !(size.is_finite() && size > 0.0) {
            log::warn!("Ignoring invalid board size {}", size);
            return;
        }

        let scale = self.board.resize(size);
        let board = &self.board;
        if let Some(state) = self.match_state.as_mut() {
            for disc in &mut state.discs {
                disc.radius = board.radius_for(disc.kind);
                if disc.active && is_on_board(disc.pos) {
                    disc.pos = board.clamp_inside(disc.pos * scale, disc.radius);
                    disc.vel *= scale;
                }
            }
            state.gesture.rescale(scale);
        }
        log::info!("Board resized to {:.1} (x{:.3})", size, scale);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fire the striker for the current player (used by both human and AI paths)
    pub fn fire_striker(&mut self, velocity: Vec2) -> bool {
        match self.match_state.as_mut() {
            Some(state) => state.fire_striker(velocity, &mut self.events),
            None => false,
        }
    }
}
