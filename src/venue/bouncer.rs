use std::collections::HashMap;

use crate::api::errors::game_error_message;
use crate::api::messages::{Message, Reply, Speaker};
use crate::domain::PlayerName;
use crate::games::GameError;

pub const ADULT_AGE: u32 = 18;
pub const AGE_PROMPT: &str = "Tell me your age? (Please type /age/<your_age> in chat)";

#[derive(Clone, Debug, Default)]
struct Conversation {
    dialogue_index: usize,
    waiting_for_input: bool,
    finished: bool,
}

/// Вышибала на входе: по реплике за взаимодействие, потом спрашивает возраст.
///
/// Состояние разговора хранится на игрока.
pub struct Bouncer {
    speaker: Speaker,
    dialogues: Vec<String>,
    teleport_room: String,
    conversations: HashMap<PlayerName, Conversation>,
}

impl Default for Bouncer {
    fn default() -> Self {
        Self::new(
            vec![
                "HEY YOU RIGHT THERE".to_string(),
                "YOU LOOK SUS".to_string(),
                "I NEED TO SEE YOUR ID".to_string(),
            ],
            "Trottier Town",
        )
    }
}

impl Bouncer {
    pub fn new(dialogues: Vec<String>, teleport_room: impl Into<String>) -> Self {
        assert!(!dialogues.is_empty(), "Dialogues list must not be empty.");
        Self {
            speaker: Speaker::new("Bouncer", "prof"),
            dialogues,
            teleport_room: teleport_room.into(),
            conversations: HashMap::new(),
        }
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn is_waiting_for(&self, player: &str) -> bool {
        self.conversations
            .get(player)
            .is_some_and(|c| c.waiting_for_input)
    }

    pub fn is_finished_with(&self, player: &str) -> bool {
        self.conversations.get(player).is_some_and(|c| c.finished)
    }

    pub fn player_interacted(&mut self, player: &str) -> Vec<Message> {
        let conv = self.conversations.entry(player.to_string()).or_default();
        if conv.finished {
            return Vec::new();
        }

        if let Some(line) = self.dialogues.get(conv.dialogue_index) {
            conv.dialogue_index += 1;
            vec![Message::dialogue(&self.speaker, player, line.clone())]
        } else {
            conv.waiting_for_input = true;
            vec![Message::dialogue(&self.speaker, player, AGE_PROMPT)]
        }
    }

    /// Обработать `/age/<n>`. Без активного вопроса - пустой ответ.
    /// После любого ответа разговор закрыт.
    pub fn process_player_input(&mut self, player: &str, input: &str) -> Reply {
        let Some(conv) = self.conversations.get_mut(player) else {
            return Reply::default();
        };
        if !conv.waiting_for_input {
            return Reply::default();
        }
        conv.waiting_for_input = false;
        conv.dialogue_index = 0;
        conv.finished = true;

        match parse_age(input) {
            Ok(age) if age < ADULT_AGE => {
                log::info!("bouncer: {} is underage, teleporting", player);
                Reply {
                    messages: vec![
                        Message::server(player, format!("Teleporting you to {}...", self.teleport_room)),
                        Message::dialogue(&self.speaker, player, "You are too young!"),
                    ],
                    teleport_to: Some(self.teleport_room.clone()),
                }
            }
            Ok(_) => Reply {
                messages: vec![Message::dialogue(
                    &self.speaker,
                    player,
                    "Welcome! You may continue your journey.",
                )],
                teleport_to: None,
            },
            Err(err) => Reply {
                messages: vec![game_error_message(&self.speaker, player, &err)],
                teleport_to: None,
            },
        }
    }
}

/// Возраст - целое > 0.
pub fn parse_age(input: &str) -> Result<u32, GameError> {
    match input.trim().parse::<u32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(GameError::InvalidAge(input.to_string())),
    }
}
