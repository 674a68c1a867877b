//! Внешний API казино для движка.
//!
//! - исходящие сообщения (messages.rs) - всё, что движок рисует игроку;
//! - команды (commands.rs) - чат-команды и пункты меню;
//! - ошибки (errors.rs) - как ошибки ввода превращаются в реплики.

pub mod commands;
pub mod errors;
pub mod messages;

pub use commands::*;
pub use errors::*;
pub use messages::*;
