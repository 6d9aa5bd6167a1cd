//! Carrom Flick native entry point
//!
//! Plays a headless match for quick balancing runs:
//!
//! ```text
//! carrom [--pvp] [tuning.json]
//! ```
//!
//! Human turns are scripted through the gesture API; the browser build
//! lives behind the `web` module of the library.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use carrom::consts::{DEFAULT_BOARD_SIZE, SIM_DT};
    use carrom::sim::ai::choose_target;
    use carrom::sim::{Game, GameEvent, GameMode, TurnPhase};
    use carrom::tuning::{AiTargeting, Tuning, TuningError};
    use carrom::{Profile, polar_to_cartesian};

    /// Give up after ten simulated minutes
    const MAX_TICKS: u32 = 60 * 60 * 10;
    /// Drag length of a scripted shot (before the power cap)
    const SCRIPTED_PULL: f32 = 120.0;

    pub struct Options {
        pub mode: GameMode,
        pub tuning_path: Option<String>,
    }

    pub fn parse_args(args: impl Iterator<Item = String>) -> Options {
        let mut options = Options {
            mode: GameMode::PvAI,
            tuning_path: None,
        };
        for arg in args {
            match arg.as_str() {
                "--pvp" => options.mode = GameMode::PvP,
                "--ai" => options.mode = GameMode::PvAI,
                _ => options.tuning_path = Some(arg),
            }
        }
        options
    }

    fn load_tuning(path: Option<&str>) -> Result<Tuning, TuningError> {
        let Some(path) = path else {
            return Ok(Tuning::classic());
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Tuning::from_json(&json),
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}, using classic", path, e);
                Ok(Tuning::classic())
            }
        }
    }

    /// Drag out a shot at the nearest piece, the way a player would
    fn scripted_shot(game: &mut Game, turn: u32) -> bool {
        let Some(state) = game.match_state.as_ref() else {
            return false;
        };
        let striker = state.striker().clone();
        let Some(target) = choose_target(&state.discs, striker.pos, AiTargeting::Nearest) else {
            return false;
        };
        let offset = target.pos - striker.pos;
        if offset.length() < 1e-3 {
            return false;
        }
        // A small fanning offset so repeated turns do not replay the same shot
        let wobble = ((turn % 5) as f32 - 2.0) * 0.02;
        let dir = polar_to_cartesian(1.0, offset.to_angle() + wobble);

        // Start the drag well clear of the striker so it counts as aiming
        let grab = striker.radius * game.tuning.slide_grab_factor;
        let start = striker.pos + dir * (grab + 10.0);
        let end = start - dir * SCRIPTED_PULL;
        game.begin_gesture(start.x, start.y);
        game.update_gesture(end.x, end.y);
        game.end_gesture()
    }

    pub fn run(options: Options) -> Result<(), TuningError> {
        let tuning = load_tuning(options.tuning_path.as_deref())?;
        tuning.validate()?;

        let mut profile = Profile::default();
        let mut game = Game::new(tuning, DEFAULT_BOARD_SIZE, 0x00C0_FFEE);
        game.start_match(options.mode, profile.selected_color);
        log::info!("Headless {} match started", options.mode.as_str());

        let mut shots = 0u32;
        let mut events = Vec::new();
        for tick in 0..MAX_TICKS {
            if game.accepts_gesture() {
                if scripted_shot(&mut game, shots) {
                    shots += 1;
                } else {
                    log::warn!("Scripted player has no shot, stopping");
                    break;
                }
            }

            game.tick(SIM_DT);
            for event in game.drain_events() {
                if let GameEvent::ShotFired { player, velocity } = &event {
                    log::debug!("Player {} fires {:?}", player.number(), velocity);
                }
                events.push(event);
            }

            if game
                .match_state
                .as_ref()
                .is_some_and(|m| m.turn == TurnPhase::MatchOver)
            {
                log::info!("Match finished after {} ticks", tick + 1);
                break;
            }
        }

        let earned = profile.credit(&events, options.mode);

        match game.match_state.as_ref() {
            Some(m) => {
                let winner = events.iter().find_map(|e| match e {
                    GameEvent::MatchOver { winner, .. } => Some(*winner),
                    _ => None,
                });
                println!(
                    "Final score {} - {} | turn {:?} | winner {:?} | coins earned {}",
                    m.scores[0],
                    m.scores[1],
                    m.turn,
                    winner.flatten(),
                    earned
                );
            }
            None => println!("No match was played"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Carrom Flick (native) starting...");

    let options = headless::parse_args(std::env::args().skip(1));
    if let Err(e) = headless::run(options) {
        log::error!("Invalid tuning: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is carrom::web::start
}
