//! Настройки казино.
//!
//! Все секции имеют значения по умолчанию, поэтому JSON может
//! переопределять только нужные поля.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Credits;
use crate::games::slots::Symbol;
use crate::games::Difficulty;
use crate::ledger::DEFAULT_STARTING_BALANCE;
use crate::venue::bar::{default_drinks, Drink};
use crate::venue::dj::default_playlist;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Стол с анте и фиксированной ставкой (блэкджек / покер).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub ante: Credits,
    pub bet_amount: Credits,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            ante: Credits(10.0),
            bet_amount: Credits(10.0),
        }
    }
}

impl TableConfig {
    pub fn validate(&self, name: &str) -> Result<(), String> {
        if !(self.ante.0 >= 0.0) {
            return Err(format!("{name}: ante must be non-negative"));
        }
        if !(self.bet_amount.0 >= 0.0) {
            return Err(format!("{name}: bet_amount must be non-negative"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PokerConfig {
    pub table: TableConfig,
    /// По столу на каждый уровень, в этом порядке.
    pub tables: Vec<Difficulty>,
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            tables: vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlotsConfig {
    pub spin_cost: Credits,
    pub weights: Vec<f64>,
    pub base_multiplier: f64,
    pub wheel: Vec<u32>,
    pub jackpot_multiplier: f64,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            spin_cost: Credits(10.0),
            weights: Symbol::DEFAULT_WEIGHTS.to_vec(),
            base_multiplier: 10.0,
            wheel: vec![1, 2, 3],
            jackpot_multiplier: 70.0,
        }
    }
}

impl SlotsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.spin_cost.0 >= 0.0) {
            return Err("SlotsConfig: spin_cost must be non-negative".into());
        }
        if self.weights.len() != Symbol::ALL.len() {
            return Err(format!(
                "SlotsConfig: expected {} weights, got {}",
                Symbol::ALL.len(),
                self.weights.len()
            ));
        }
        if self.weights.iter().any(|w| !(*w >= 0.0)) || self.weights.iter().sum::<f64>() <= 0.0 {
            return Err("SlotsConfig: weights must be non-negative with a positive sum".into());
        }
        if self.wheel.is_empty() {
            return Err("SlotsConfig: wheel is empty".into());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HorseConfig {
    pub horse_count: u32,
    pub default_bet: Credits,
    pub payout_multiplier: f64,
    pub bookmaker_dialogues: Vec<String>,
}

impl Default for HorseConfig {
    fn default() -> Self {
        Self {
            horse_count: 5,
            default_bet: Credits(50.0),
            payout_multiplier: 3.0,
            bookmaker_dialogues: vec![
                "YEEHAW COWBOY! It's your lucky day!".to_string(),
                "Want to bet on a horse race?".to_string(),
            ],
        }
    }
}

impl HorseConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.horse_count == 0 {
            return Err("HorseConfig: horse_count = 0".into());
        }
        if !(self.default_bet.0 > 0.0) {
            return Err("HorseConfig: default_bet must be positive".into());
        }
        if !(self.payout_multiplier >= 0.0) {
            return Err("HorseConfig: payout_multiplier must be non-negative".into());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VenueConfig {
    pub drinks: Vec<Drink>,
    pub bouncer_dialogues: Vec<String>,
    pub teleport_room: String,
    pub playlist: Vec<String>,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            drinks: default_drinks(),
            bouncer_dialogues: vec![
                "HEY YOU RIGHT THERE".to_string(),
                "YOU LOOK SUS".to_string(),
                "I NEED TO SEE YOUR ID".to_string(),
            ],
            teleport_room: "Trottier Town".to_string(),
            playlist: default_playlist(),
        }
    }
}

impl VenueConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(d) = self.drinks.iter().find(|d| !(d.price.0 >= 0.0)) {
            return Err(format!("VenueConfig: drink '{}' has a negative price", d.name));
        }
        if self.bouncer_dialogues.is_empty() {
            return Err("VenueConfig: bouncer_dialogues is empty".into());
        }
        Ok(())
    }
}

/// Полный конфиг казино.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CasinoConfig {
    pub starting_balance: Credits,
    pub blackjack: TableConfig,
    pub poker: PokerConfig,
    pub slots: SlotsConfig,
    pub horses: HorseConfig,
    pub venue: VenueConfig,
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            blackjack: TableConfig::default(),
            poker: PokerConfig::default(),
            slots: SlotsConfig::default(),
            horses: HorseConfig::default(),
            venue: VenueConfig::default(),
        }
    }
}

impl CasinoConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: CasinoConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Жёсткая проверка всех секций.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.starting_balance.0 >= 0.0) {
            return Err(ConfigError::Invalid(
                "CasinoConfig: starting_balance must be non-negative".into(),
            ));
        }
        self.blackjack
            .validate("blackjack")
            .map_err(ConfigError::Invalid)?;
        self.poker.table.validate("poker").map_err(ConfigError::Invalid)?;
        self.slots.validate().map_err(ConfigError::Invalid)?;
        self.horses.validate().map_err(ConfigError::Invalid)?;
        self.venue.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
