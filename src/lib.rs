//! Контент казино для тайлового мультиплеерного движка.
//!
//! Мини-игры (блэкджек, one-card poker, слоты, скачки), окружение
//! (бар, вышибала, букмекер, диджей) и общий кошелёк игроков.
//! Каждое действие игрока - синхронный вызов, который возвращает
//! список исходящих `api::Message`; доставляет их движок.

pub mod api;
pub mod casino;
pub mod config;
pub mod domain;
pub mod games;
pub mod infra;
pub mod ledger;
pub mod venue;

pub use casino::Casino;
pub use config::{CasinoConfig, ConfigError};
