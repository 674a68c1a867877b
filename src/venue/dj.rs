use crate::api::messages::{Coord, Message, Speaker};
use crate::games::RandomSource;

pub const DJ_MENU: &str = "DJ Booth Controls";
pub const DJ_OPTIONS: [&str; 4] = ["play", "next", "previous", "shuffle"];

/// Световые эффекты вокруг пульта: (эмоут, координата).
/// Серверная строка вставляется после первых четырёх.
const LIGHTS_BEFORE: [(&str, Coord); 4] = [
    ("disco", Coord::new(1, 4)),
    ("small_light", Coord::new(5, 1)),
    ("light_blue", Coord::new(0, 0)),
    ("light_red", Coord::new(5, 0)),
];
const LIGHTS_AFTER: [(&str, Coord); 3] = [
    ("light_red", Coord::new(5, 1)),
    ("small_light", Coord::new(0, 0)),
    ("light_blue", Coord::new(7, 0)),
];

pub fn default_playlist() -> Vec<String> {
    ["baby", "365", "party4u", "limitless", "audacity"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Диджейский пульт: плейлист и указатель на текущую песню.
pub struct DjBooth {
    speaker: Speaker,
    songs: Vec<String>,
    current_index: usize,
}

impl Default for DjBooth {
    fn default() -> Self {
        Self::new(default_playlist())
    }
}

impl DjBooth {
    pub fn new(songs: Vec<String>) -> Self {
        Self {
            speaker: Speaker::new("DJ Booth", "casino_table6"),
            songs,
            current_index: 0,
        }
    }

    pub fn songs(&self) -> &[String] {
        &self.songs
    }

    pub fn current_song(&self) -> Option<&str> {
        self.songs.get(self.current_index).map(String::as_str)
    }

    pub fn menu(&self, player: &str) -> Message {
        Message::menu(&self.speaker, player, DJ_MENU, &DJ_OPTIONS)
    }

    /// Пустой плейлист - пустой ответ.
    pub fn play(&self, player: &str) -> Vec<Message> {
        let Some(song) = self.current_song() else {
            return Vec::new();
        };
        log::debug!("dj: playing {} for {}", song, player);

        let mut messages = vec![Message::sound(player, song)];
        messages.extend(
            LIGHTS_BEFORE
                .iter()
                .map(|(emote, pos)| Message::emote(player, *emote, *pos)),
        );
        messages.push(Message::server(player, "Playing Music in DJ Booth"));
        messages.extend(
            LIGHTS_AFTER
                .iter()
                .map(|(emote, pos)| Message::emote(player, *emote, *pos)),
        );
        messages
    }

    pub fn next_song(&mut self, player: &str) -> Vec<Message> {
        if self.songs.is_empty() {
            return Vec::new();
        }
        self.current_index = (self.current_index + 1) % self.songs.len();
        self.play(player)
    }

    pub fn previous_song(&mut self, player: &str) -> Vec<Message> {
        if self.songs.is_empty() {
            return Vec::new();
        }
        let len = self.songs.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.play(player)
    }

    /// Перемешать и начать с первой.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R, player: &str) -> Vec<Message> {
        if self.songs.is_empty() {
            return Vec::new();
        }
        rng.shuffle(&mut self.songs);
        self.current_index = 0;
        self.play(player)
    }
}
