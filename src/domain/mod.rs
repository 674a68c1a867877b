//! Доменная модель казино: карты, колода, рука, валюта, лошади.

pub mod card;
pub mod credits;
pub mod deck;
pub mod hand;
pub mod horse;

/// Ключ игрока в кошельке. Движок даёт нам имя игрока,
/// для "безымянных" вызовов используется `DEFAULT_PLAYER`.
pub type PlayerName = String;

/// Идентификатор стола (игрового компьютера) внутри зала.
pub type TableId = u64;

pub const DEFAULT_PLAYER: &str = "default";

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use credits::*;
pub use deck::*;
pub use hand::*;
pub use horse::*;
