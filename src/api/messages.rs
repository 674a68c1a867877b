use serde::{Deserialize, Serialize};

use crate::domain::PlayerName;

/// Координата тайла, на котором движок рисует эмоут.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coord {
    pub y: i32,
    pub x: i32,
}

impl Coord {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }
}

/// Кто "говорит" в диалоге: имя объекта/NPC и его картинка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Speaker {
    pub name: String,
    pub image: String,
}

impl Speaker {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// Исходящее сообщение для движка.
///
/// Движок сам решает, как это отрисовать и доставить; мы только
/// возвращаем упорядоченный список сообщений на каждое действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Message {
    /// Окно диалога с картинкой собеседника.
    Dialogue {
        sender: String,
        recipient: PlayerName,
        text: String,
        image: String,
    },

    /// Системная строка в чате.
    Server { recipient: PlayerName, text: String },

    /// Проиграть звук.
    Sound {
        recipient: PlayerName,
        sound: String,
        repeat: bool,
        volume: f32,
    },

    /// Показать эмоут на тайле.
    Emote {
        recipient: PlayerName,
        emote: String,
        pos: Coord,
    },

    /// Открыть меню с вариантами.
    Menu {
        sender: String,
        recipient: PlayerName,
        menu_name: String,
        options: Vec<String>,
    },
}

impl Message {
    pub fn dialogue(speaker: &Speaker, recipient: &str, text: impl Into<String>) -> Self {
        Message::Dialogue {
            sender: speaker.name.clone(),
            recipient: recipient.to_string(),
            text: text.into(),
            image: speaker.image.clone(),
        }
    }

    pub fn server(recipient: &str, text: impl Into<String>) -> Self {
        Message::Server {
            recipient: recipient.to_string(),
            text: text.into(),
        }
    }

    pub fn sound(recipient: &str, sound: impl Into<String>) -> Self {
        Message::Sound {
            recipient: recipient.to_string(),
            sound: sound.into(),
            repeat: false,
            volume: 1.0,
        }
    }

    pub fn sound_with_volume(recipient: &str, sound: impl Into<String>, volume: f32) -> Self {
        Message::Sound {
            recipient: recipient.to_string(),
            sound: sound.into(),
            repeat: false,
            volume,
        }
    }

    pub fn emote(recipient: &str, emote: impl Into<String>, pos: Coord) -> Self {
        Message::Emote {
            recipient: recipient.to_string(),
            emote: emote.into(),
            pos,
        }
    }

    pub fn menu(
        speaker: &Speaker,
        recipient: &str,
        menu_name: impl Into<String>,
        options: &[&str],
    ) -> Self {
        Message::Menu {
            sender: speaker.name.clone(),
            recipient: recipient.to_string(),
            menu_name: menu_name.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Текст сообщения, если он есть (диалог или серверная строка).
    pub fn text(&self) -> Option<&str> {
        match self {
            Message::Dialogue { text, .. } | Message::Server { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Имя звука для `Sound`.
    pub fn sound_name(&self) -> Option<&str> {
        match self {
            Message::Sound { sound, .. } => Some(sound),
            _ => None,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Message::Dialogue { recipient, .. }
            | Message::Server { recipient, .. }
            | Message::Sound { recipient, .. }
            | Message::Emote { recipient, .. }
            | Message::Menu { recipient, .. } => recipient,
        }
    }
}

/// Ответ на действие игрока: сообщения плюс, возможно, телепорт.
/// Телепорт выполняет движок; мы только называем комнату.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reply {
    pub messages: Vec<Message>,
    pub teleport_to: Option<String>,
}

impl From<Vec<Message>> for Reply {
    fn from(messages: Vec<Message>) -> Self {
        Self {
            messages,
            teleport_to: None,
        }
    }
}
