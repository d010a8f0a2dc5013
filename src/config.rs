//! Match configuration
//!
//! Values only: the session reads them, nothing here carries game logic.
//! A config is built from [`GameConfig::default`], optionally replaced by a
//! JSON file, then patched by command-line flags in the binary.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{Layout, Player};
use crate::error::Result;

/// Who controls each colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchType {
    #[default]
    HumanVsHuman,
    /// The host colour is the human
    HumanVsComputer,
    ComputerVsComputer,
}

impl MatchType {
    pub const ALL: [MatchType; 3] = [
        MatchType::HumanVsHuman,
        MatchType::HumanVsComputer,
        MatchType::ComputerVsComputer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MatchType::HumanVsHuman => "Human vs Human",
            MatchType::HumanVsComputer => "Human vs Computer",
            MatchType::ComputerVsComputer => "Computer vs Computer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub layout: Layout,
    pub match_type: MatchType,
    /// Colour seated at the bottom of the board
    pub host_color: Player,
    /// Per-turn clock for Black, in seconds
    pub clock_black_secs: u64,
    /// Per-turn clock for White, in seconds
    pub clock_white_secs: u64,
    /// Move cap per side; 0 disables the cap
    pub moves_per_team: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Standard,
            match_type: MatchType::HumanVsHuman,
            host_color: Player::Black,
            clock_black_secs: 30,
            clock_white_secs: 30,
            moves_per_team: 50,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Turn clock length for `player`
    pub fn clock_for(&self, player: Player) -> Duration {
        Duration::from_secs(match player {
            Player::Black => self.clock_black_secs,
            Player::White => self.clock_white_secs,
        })
    }

    /// Set both clocks at once
    pub fn set_clock(&mut self, secs: u64) {
        self.clock_black_secs = secs;
        self.clock_white_secs = secs;
    }

    /// True if `player` is driven by the move-search engine
    pub fn is_computer(&self, player: Player) -> bool {
        match self.match_type {
            MatchType::HumanVsHuman => false,
            MatchType::HumanVsComputer => player != self.host_color,
            MatchType::ComputerVsComputer => true,
        }
    }

    /// Move cap, `None` when unlimited
    pub fn move_limit(&self) -> Option<u32> {
        (self.moves_per_team > 0).then_some(self.moves_per_team)
    }
}
