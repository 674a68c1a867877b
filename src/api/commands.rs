use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Credits;
use crate::games::GameError;

/// Чат-команда казино (текст без ведущего `/`).
///
/// Какой команде принадлежит текст, решает движок; здесь только
/// `matches` и разбор.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ChatCommand {
    /// `balance`
    Balance,
    /// `age/<digits>`
    Age(String),
    /// `bet_horse/<amount>`; сумма не разобрана, ошибку показываем игроку.
    BetHorse(String),
}

impl ChatCommand {
    pub const BALANCE: &'static str = "balance";
    pub const AGE_PREFIX: &'static str = "age/";
    pub const BET_HORSE_PREFIX: &'static str = "bet_horse/";

    pub fn matches_balance(text: &str) -> bool {
        strip_slash(text).trim().eq_ignore_ascii_case(Self::BALANCE)
    }

    pub fn matches_age(text: &str) -> bool {
        strip_slash(text)
            .strip_prefix(Self::AGE_PREFIX)
            .is_some_and(|age| !age.is_empty() && age.bytes().all(|b| b.is_ascii_digit()))
    }

    pub fn matches_bet_horse(text: &str) -> bool {
        strip_slash(text).starts_with(Self::BET_HORSE_PREFIX)
    }

    pub fn matches(text: &str) -> bool {
        Self::parse(text).is_some()
    }

    pub fn parse(text: &str) -> Option<Self> {
        let body = strip_slash(text);
        if Self::matches_balance(body) {
            Some(ChatCommand::Balance)
        } else if Self::matches_age(body) {
            Some(ChatCommand::Age(body[Self::AGE_PREFIX.len()..].to_string()))
        } else if Self::matches_bet_horse(body) {
            Some(ChatCommand::BetHorse(
                body[Self::BET_HORSE_PREFIX.len()..].trim().to_string(),
            ))
        } else {
            None
        }
    }
}

fn strip_slash(text: &str) -> &str {
    text.strip_prefix('/').unwrap_or(text)
}

/// Сумма ставки из `bet_horse/<amount>`.
pub fn parse_bet_amount(raw: &str) -> Result<Credits, GameError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(Credits(v)),
        _ => Err(GameError::InvalidBet(raw.to_string())),
    }
}

/// Пункты меню блэкджека.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackAction {
    Deal,
    Hit,
    Stand,
    Quit,
}

impl FromStr for BlackjackAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deal" => Ok(BlackjackAction::Deal),
            "hit" => Ok(BlackjackAction::Hit),
            "stand" => Ok(BlackjackAction::Stand),
            "quit" => Ok(BlackjackAction::Quit),
            _ => Err(GameError::InvalidSelection(s.to_string())),
        }
    }
}

/// Пункты меню покерного стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PokerAction {
    Deal,
    Bet,
    Fold,
    Quit,
}

impl FromStr for PokerAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deal" => Ok(PokerAction::Deal),
            "bet" => Ok(PokerAction::Bet),
            "fold" => Ok(PokerAction::Fold),
            "quit" => Ok(PokerAction::Quit),
            _ => Err(GameError::InvalidSelection(s.to_string())),
        }
    }
}

/// Пульт диджея.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DjAction {
    Play,
    Next,
    Previous,
    Shuffle,
}

impl FromStr for DjAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "play" => Ok(DjAction::Play),
            "next" => Ok(DjAction::Next),
            "previous" => Ok(DjAction::Previous),
            "shuffle" => Ok(DjAction::Shuffle),
            _ => Err(GameError::InvalidSelection(s.to_string())),
        }
    }
}

/// "Horse Bet Menu": yes / no.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BetMenuChoice {
    Yes,
    No,
}

impl FromStr for BetMenuChoice {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(BetMenuChoice::Yes),
            "no" => Ok(BetMenuChoice::No),
            _ => Err(GameError::InvalidSelection(s.to_string())),
        }
    }
}
