//! Кошелёк игроков: общий для всех мини-игр баланс и рассылка
//! уведомлений наблюдателям (звуки, реплики).

pub mod manager;
pub mod observers;

pub use manager::{
    BalanceChangeReason, BalanceManager, BalanceObserver, ObserverId, DEFAULT_STARTING_BALANCE,
};
pub use observers::{interaction_observers, BalanceEffectObserver, SoundEffectObserver};
