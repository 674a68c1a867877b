use crate::api::messages::{Message, Speaker};
use crate::games::GameError;

/// Превратить ошибку ввода игрока в игровое сообщение.
///
/// Ошибки состояния стола ("нет раунда") звучат репликой того,
/// с кем игрок говорит; остальное - системной строкой.
pub fn game_error_message(speaker: &Speaker, player: &str, err: &GameError) -> Message {
    log::debug!("player {} input rejected: {}", player, err);
    match err {
        GameError::NoActiveRound | GameError::InvalidSelection(_) | GameError::InvalidAge(_) => {
            Message::dialogue(speaker, player, err.to_string())
        }
        _ => Message::server(player, err.to_string()),
    }
}
