//! Browser surface
//!
//! A thin wasm-bindgen class the JS host drives: forward pointer events in
//! board coordinates, call `tick` once per animation frame and draw from
//! `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::consts::DEFAULT_BOARD_SIZE;
use crate::profile::Profile;
use crate::sim::{Game, GameMode};
use crate::tuning::Tuning;
use crate::board_size_for_viewport;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Carrom Flick starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    profile: Profile,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32, seed: u64) -> WebGame {
        let size = board_size_for_viewport(viewport_width, viewport_height);
        let size = if size.is_finite() && size > 0.0 {
            size
        } else {
            DEFAULT_BOARD_SIZE
        };
        WebGame {
            game: Game::new(Tuning::classic(), size, seed),
            profile: Profile::load(),
        }
    }

    pub fn start_match(&mut self, vs_ai: bool) {
        let mode = if vs_ai { GameMode::PvAI } else { GameMode::PvP };
        self.game.start_match(mode, self.profile.selected_color);
    }

    pub fn return_to_menu(&mut self) {
        self.game.return_to_menu();
    }

    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.game.resize(viewport_width, viewport_height);
    }

    pub fn board_size(&self) -> f32 {
        self.game.board.size
    }

    /// Returns true when the pointer grabbed the striker for sliding
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.game.begin_gesture(x, y) == crate::sim::GestureMode::Sliding
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.game.update_gesture(x, y);
    }

    /// Returns true when the release fired a shot
    pub fn pointer_up(&mut self) -> bool {
        self.game.end_gesture()
    }

    /// One frame; `dt` in seconds
    pub fn tick(&mut self, dt: f32) {
        self.game.tick(dt);
        let events = self.game.drain_events();
        if events.is_empty() {
            return;
        }
        let Some(mode) = self.game.match_state.as_ref().map(|m| m.mode) else {
            return;
        };
        if self.profile.credit(&events, mode) > 0 {
            if let Err(e) = self.profile.save() {
                log::warn!("Failed to save profile: {}", e);
            }
        }
    }

    /// Render snapshot as JSON (empty object if serialization fails)
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|e| {
            log::warn!("Snapshot serialization failed: {}", e);
            "{}".to_string()
        })
    }

    pub fn coins(&self) -> u32 {
        self.profile.coins
    }

    pub fn selected_color(&self) -> u32 {
        self.profile.selected_color
    }

    pub fn owns_skin(&self, id: &str) -> bool {
        self.profile.owns(id)
    }

    /// Buy a skin; rejects with the shop error message
    pub fn buy_skin(&mut self, id: &str) -> Result<(), JsValue> {
        self.profile
            .buy(id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.profile
            .save()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Equip an owned skin; takes effect at the next match
    pub fn equip_skin(&mut self, id: &str) -> Result<(), JsValue> {
        self.profile
            .equip(id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.profile
            .save()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
