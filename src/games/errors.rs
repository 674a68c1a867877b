use thiserror::Error;

use crate::domain::{Credits, HorseNumber};

/// Ошибки игрового уровня. Это ошибки ввода/состояния игрока,
/// а не программиста: они превращаются в игровое сообщение.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("You need at least {needed} to {action}!")]
    InsufficientFunds {
        needed: Credits,
        balance: Credits,
        action: &'static str,
    },

    #[error("A round is already active!")]
    RoundAlreadyActive,

    #[error("No active round. Choose 'Deal' first.")]
    NoActiveRound,

    #[error("The deck ran out of cards")]
    DeckExhausted,

    #[error("Horse {0} is not running in this race. Please try again.")]
    InvalidHorse(HorseNumber),

    #[error("Invalid selection. Please try again.")]
    InvalidSelection(String),

    #[error("Invalid bet amount '{0}'. Usage: /bet_horse/<amount>")]
    InvalidBet(String),

    #[error("You haven't chosen a horse yet.")]
    NoHorseChosen,

    #[error("Please enter a valid number for your age.")]
    InvalidAge(String),
}
