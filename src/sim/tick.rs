//! Per-frame tick: physics, turn transitions and the AI timer
//!
//! One call runs exactly one fixed physics step. `dt` is the wall-clock time
//! since the previous call and only drives the AI "thinking" delay.

use super::ai::plan_shot;
use super::board::Board;
use super::disc::DiscKind;
use super::physics::{self, Capture};
use super::state::{Game, GameEvent, MatchState, TaskHandle, TurnPhase};
use crate::tuning::{CaptureRule, Tuning};

/// Advance the game by one tick
pub fn tick(game: &mut Game, dt: f32) {
    let Game {
        tuning,
        board,
        match_state,
        events,
        ..
    } = game;
    let Some(state) = match_state.as_mut() else {
        return;
    };
    if state.turn == TurnPhase::MatchOver {
        return;
    }

    // Scheduled AI move
    let due = state
        .pending_ai
        .as_mut()
        .is_some_and(|task| task.advance(dt));
    if due {
        if let Some(task) = state.pending_ai.take() {
            ai_move(state, board, tuning, events, task.handle);
        }
    }

    let report = physics::step(&mut state.discs, board, tuning);

    if state.turn == TurnPhase::ShotInFlight {
        for capture in report.captures {
            record_capture(state, capture, tuning, events);
        }
        if !report.moving {
            end_turn(state, board, tuning, events);
        }
    }
}

/// Score a capture for the shooter and log it for the turn rule
fn record_capture(
    state: &mut MatchState,
    capture: Capture,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let player = state.current_player;
    match capture.kind {
        DiscKind::Striker => {
            let penalty = if tuning.scoring_enabled {
                tuning.foul_penalty
            } else {
                0
            };
            state.scores[player.index()] -= penalty;
            log::info!("Player {} pocketed the striker (foul)", player.number());
            events.push(GameEvent::StrikerFoul { player, penalty });
        }
        kind @ (DiscKind::Queen | DiscKind::Light | DiscKind::Dark) => {
            let points = if tuning.scoring_enabled {
                kind.points()
            } else {
                0
            };
            state.scores[player.index()] += points;
            log::info!("Player {} pocketed {:?} (+{})", player.number(), kind, points);
            events.push(GameEvent::DiscPocketed {
                player,
                kind,
                points,
            });
        }
    }
    state.flight.push(capture);
}

/// Board settled after a shot: pick the next player and reset the striker
fn end_turn(state: &mut MatchState, board: &Board, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let shooter = state.current_player;
    let fouled = state.flight.iter().any(|c| c.kind == DiscKind::Striker);
    let pocketed = state.flight.iter().filter(|c| c.kind != DiscKind::Striker).count();
    state.flight.clear();

    let next = match tuning.capture_rule {
        CaptureRule::KeepTurnOnCapture if pocketed > 0 && !fouled => shooter,
        CaptureRule::KeepTurnOnCapture | CaptureRule::AlwaysSwitch => shooter.other(),
    };
    state.current_player = next;
    state.reset_striker(board);

    if state.scorable_remaining() == 0 {
        finish_match(state, tuning, events);
        return;
    }

    state.turn = TurnPhase::AwaitingShot;
    log::info!("Turn: player {}", next.number());
    events.push(GameEvent::TurnChanged { player: next });

    if state.is_ai_turn() {
        let handle = state.schedule_ai(tuning.ai_think_delay);
        log::debug!("AI move scheduled {:?}", handle);
    }
}

fn finish_match(state: &mut MatchState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    state.turn = TurnPhase::MatchOver;
    state.pending_ai = None;
    state.gesture.cancel();
    let winner = if tuning.scoring_enabled {
        state.leader()
    } else {
        None
    };
    log::info!(
        "Match {} over: {} - {} (winner: {:?})",
        state.id,
        state.scores[0],
        state.scores[1],
        winner
    );
    events.push(GameEvent::MatchOver {
        scores: state.scores,
        winner,
    });
}

/// Fire the scheduled AI shot if the task still belongs to this turn
fn ai_move(
    state: &mut MatchState,
    board: &Board,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
    handle: TaskHandle,
) {
    if handle.match_id != state.id
        || state.turn != TurnPhase::AwaitingShot
        || !state.is_ai_turn()
    {
        log::warn!("Dropping stale AI move {:?}", handle);
        return;
    }

    let player = state.current_player;
    match plan_shot(&state.discs, board, tuning, player, &mut state.rng) {
        Some(velocity) => {
            state.fire_striker(velocity, events);
        }
        None => finish_match(state, tuning, events),
    }
}

impl Game {
    /// Advance one tick (see [`tick`])
    pub fn tick(&mut self, dt: f32) {
        tick(self, dt);
    }
}
