//! Мини-игры казино: блэкджек, one-card poker, слот-машина, скачки.
//!
//! Каждая игра - детерминированный калькулятор правил поверх `RandomSource`.
//! Деньги двигаются только через `ledger::BalanceManager`.

pub mod blackjack;
pub mod errors;
pub mod horse_race;
pub mod one_card_poker;
pub mod slots;
pub mod strategy;
pub mod tables;

pub use blackjack::{BlackjackGame, BlackjackOutcome};
pub use errors::GameError;
pub use horse_race::{HorseBettingManager, HorseBettingObserver, SignScoreboardObserver};
pub use one_card_poker::{OneCardPokerGame, ShowdownOutcome};
pub use slots::{
    JackpotStrategy, Payout, SlotMachine, SlotMachineStrategy, StandardStrategyWithWheel, Symbol,
};
pub use strategy::{
    Difficulty, EasyPokerStrategy, HardPokerStrategy, MediumPokerStrategy, PokerStrategy,
};
pub use tables::{BlackjackTable, OneCardPokerTable};

/// RNG интерфейс для игр.
/// Реализации живут в infra (обёртки над `rand` и сценарный RNG для тестов).
///
/// Всё, кроме `shuffle`, доступно и через `&mut dyn RandomSource`:
/// так стратегии ИИ и выплат остаются подключаемыми объектами.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized;

    /// Равномерно из [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Равномерно из [0, upper). Для `upper == 0` - 0.
    fn next_below(&mut self, upper: usize) -> usize;

    /// Индекс по весам.
    fn pick_weighted(&mut self, weights: &[f64]) -> usize;
}
