//! Player profile: coins, owned striker skins and the equipped color
//!
//! Persisted to LocalStorage on the web and to a JSON file natively. A broken
//! or missing profile never blocks a match; it falls back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_STRIKER_COLOR;
use crate::sim::{GameEvent, GameMode, Player};

/// Coins a fresh profile starts with
pub const STARTING_COINS: u32 = 100;

/// Bonus for a human winning a scored match
pub const WIN_BONUS: u32 = 50;

/// A purchasable striker skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub color: u32,
    pub price: u32,
}

/// Shop catalog, cheapest first
pub const SKINS: [Skin; 4] = [
    Skin {
        id: "white",
        name: "Classic",
        color: 0xffffff,
        price: 0,
    },
    Skin {
        id: "gold",
        name: "Gold Pro",
        color: 0xffd700,
        price: 200,
    },
    Skin {
        id: "neon",
        name: "Neon Blue",
        color: 0x00ffff,
        price: 500,
    },
    Skin {
        id: "ruby",
        name: "Ruby Red",
        color: 0xff0055,
        price: 1000,
    },
];

/// Look up a skin by id
pub fn skin(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.id == id)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("unknown skin '{0}'")]
    UnknownSkin(String),
    #[error("skin '{0}' is already owned")]
    AlreadyOwned(String),
    #[error("skin costs {price} coins but only {coins} available")]
    InsufficientCoins { price: u32, coins: u32 },
    #[error("skin '{0}' is not owned")]
    NotOwned(String),
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("profile I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("browser storage unavailable")]
    StorageUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub coins: u32,
    /// Skin ids, in purchase order
    pub owned: Vec<String>,
    /// Striker color handed to `Game::start_match`
    pub selected_color: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            owned: vec!["white".to_string()],
            selected_color: DEFAULT_STRIKER_COLOR,
        }
    }
}

impl Profile {
    /// LocalStorage key (used only in wasm32)
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "carrom_profile";

    pub fn owns(&self, id: &str) -> bool {
        self.owned.iter().any(|o| o == id)
    }

    /// Buy a skin; coins are only spent on success
    pub fn buy(&mut self, id: &str) -> Result<&'static Skin, ShopError> {
        let skin = skin(id).ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;
        if self.owns(id) {
            return Err(ShopError::AlreadyOwned(id.to_string()));
        }
        if self.coins < skin.price {
            return Err(ShopError::InsufficientCoins {
                price: skin.price,
                coins: self.coins,
            });
        }
        self.coins -= skin.price;
        self.owned.push(id.to_string());
        log::info!("Bought skin {} for {} coins", skin.name, skin.price);
        Ok(skin)
    }

    /// Equip an owned skin as the striker color
    pub fn equip(&mut self, id: &str) -> Result<u32, ShopError> {
        let skin = skin(id).ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;
        if !self.owns(id) {
            return Err(ShopError::NotOwned(id.to_string()));
        }
        self.selected_color = skin.color;
        Ok(skin.color)
    }

    /// Turn match events into coins. Returns the amount credited.
    ///
    /// Only human players earn: both seats in PvP, player one against the AI.
    /// Penalties never take coins away.
    pub fn credit(&mut self, events: &[GameEvent], mode: GameMode) -> u32 {
        let is_human = |p: Player| mode == GameMode::PvP || p == Player::One;
        let mut earned: u32 = 0;
        for event in events {
            match event {
                GameEvent::DiscPocketed { player, points, .. } if is_human(*player) => {
                    earned = earned.saturating_add(u32::try_from(*points).unwrap_or(0));
                }
                GameEvent::MatchOver {
                    winner: Some(winner),
                    ..
                } if is_human(*winner) => {
                    earned = earned.saturating_add(WIN_BONUS);
                }
                _ => {}
            }
        }
        if earned > 0 {
            self.coins = self.coins.saturating_add(earned);
            log::debug!("Credited {} coins (total {})", earned, self.coins);
        }
        earned
    }

    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load from LocalStorage, falling back to a fresh profile
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let read = || -> Result<Option<Self>, ProfileError> {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(ProfileError::StorageUnavailable)?;
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => Ok(Some(Self::from_json(&json)?)),
                Ok(None) => Ok(None),
                Err(_) => Err(ProfileError::StorageUnavailable),
            }
        };
        match read() {
            Ok(Some(profile)) => {
                log::info!("Loaded profile ({} coins)", profile.coins);
                profile
            }
            Ok(None) => {
                log::info!("No profile found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Profile load failed, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), ProfileError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(ProfileError::StorageUnavailable)?;
        storage
            .set_item(Self::STORAGE_KEY, &self.to_json()?)
            .map_err(|_| ProfileError::StorageUnavailable)?;
        log::debug!("Profile saved");
        Ok(())
    }

    /// Read a profile file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn read_from(path: &std::path::Path) -> Result<Self, ProfileError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a profile file, falling back to a fresh profile
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match Self::read_from(path) {
            Ok(profile) => {
                log::info!("Loaded profile from {} ({} coins)", path.display(), profile.coins);
                profile
            }
            Err(ProfileError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No profile at {}, starting fresh", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Profile load failed, using defaults: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ProfileError> {
        std::fs::write(path, self.to_json()?)?;
        log::debug!("Profile saved to {}", path.display());
        Ok(())
    }
}
