use std::collections::HashMap;

use crate::api::errors::game_error_message;
use crate::api::messages::{Message, Speaker};
use crate::domain::{Credits, HorseNumber, PlayerName};
use crate::games::{GameError, HorseBettingManager, RandomSource};
use crate::ledger::{interaction_observers, BalanceManager};

pub const HORSE_BET_MENU: &str = "Horse Bet Menu";
pub const HORSE_CHOOSE_MENU: &str = "Horse Choose Menu";

#[derive(Clone, Debug, Default)]
struct Visit {
    dialogue_index: usize,
    interaction_done: bool,
    awaiting_bet: bool,
}

/// Букмекер на ранчо: пара реплик, затем меню "ставить или нет".
pub struct Bookmaker {
    speaker: Speaker,
    dialogues: Vec<String>,
    visits: HashMap<PlayerName, Visit>,
}

impl Default for Bookmaker {
    fn default() -> Self {
        Self::new(vec![
            "YEEHAW COWBOY! It's your lucky day!".to_string(),
            "Want to bet on a horse race?".to_string(),
        ])
    }
}

impl Bookmaker {
    pub fn new(dialogues: Vec<String>) -> Self {
        Self {
            speaker: Speaker::new("The Bookmaker", "player2"),
            dialogues,
            visits: HashMap::new(),
        }
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    /// Ждёт ли букмекер от игрока `/bet_horse/<amount>`.
    pub fn is_awaiting_bet(&self, player: &str) -> bool {
        self.visits.get(player).is_some_and(|v| v.awaiting_bet)
    }

    /// Реплики по одной; после них - меню ставки.
    /// Следующее взаимодействие после меню ничего не показывает и сбрасывает флаг.
    pub fn player_interacted(&mut self, player: &str) -> Vec<Message> {
        let visit = self.visits.entry(player.to_string()).or_default();
        if visit.interaction_done {
            visit.interaction_done = false;
            return Vec::new();
        }

        if let Some(line) = self.dialogues.get(visit.dialogue_index) {
            visit.dialogue_index += 1;
            return vec![Message::dialogue(&self.speaker, player, line.clone())];
        }

        visit.interaction_done = true;
        vec![Message::menu(&self.speaker, player, HORSE_BET_MENU, &["yes", "no"])]
    }

    /// "yes": подсказка про ставку и меню выбора лошади.
    pub fn accept(&mut self, manager: &HorseBettingManager, player: &str) -> Vec<Message> {
        self.visits.entry(player.to_string()).or_default().awaiting_bet = true;

        let me = Speaker::new(player, "player2");
        let mut numbers: Vec<HorseNumber> = manager.band().horses.iter().map(|h| h.number).collect();
        numbers.sort_unstable();
        let labels: Vec<String> = numbers.iter().map(|n| format!("Horse {n}")).collect();
        let options: Vec<&str> = labels.iter().map(String::as_str).collect();

        vec![
            Message::dialogue(
                &me,
                player,
                format!(
                    "Please place your bet using /bet_horse/<amount>. (Default is ${})",
                    manager.default_bet().0
                ),
            ),
            Message::dialogue(&me, player, "Choose which Horse to bet on:"),
            Message::menu(&self.speaker, player, HORSE_CHOOSE_MENU, &options),
        ]
    }

    /// "no".
    pub fn decline(&mut self, player: &str) -> Vec<Message> {
        self.visits.entry(player.to_string()).or_default().awaiting_bet = false;
        let me = Speaker::new(player, "player2");
        vec![Message::dialogue(&me, player, "Not brave enough to take a risk aye?")]
    }

    /// `/bet_horse/<amount>` пока букмекер ждёт ставку.
    pub fn place_bet(
        &self,
        manager: &mut HorseBettingManager,
        player: &str,
        amount: Credits,
    ) -> Vec<Message> {
        if !self.is_awaiting_bet(player) {
            return vec![Message::server(player, "No one is asking for you to bet")];
        }
        match manager.set_bet(player, amount) {
            Ok(()) => vec![Message::server(player, format!("Your bet is set to {amount}."))],
            Err(err) => vec![game_error_message(&self.speaker, player, &err)],
        }
    }

    /// Выбор лошади в меню ("Horse 3" или "3") и сразу забег.
    pub fn choose_horse<R: RandomSource>(
        &mut self,
        manager: &mut HorseBettingManager,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
        option: &str,
    ) -> Vec<Message> {
        let me = Speaker::new(player, "player2");
        let result = run_race(manager, ledger, rng, &me, player, option);

        let visit = self.visits.entry(player.to_string()).or_default();
        visit.dialogue_index = 0;
        visit.interaction_done = true;
        visit.awaiting_bet = false;

        result.unwrap_or_else(|err| vec![game_error_message(&me, player, &err)])
    }
}

fn run_race<R: RandomSource>(
    manager: &mut HorseBettingManager,
    ledger: &mut BalanceManager,
    rng: &mut R,
    me: &Speaker,
    player: &str,
    option: &str,
) -> Result<Vec<Message>, GameError> {
    let horse = parse_horse_option(option)?;
    manager.set_player_choice(player, horse)?;

    let mut messages = manager.option_horse(player);
    let race = ledger.with_observers(interaction_observers(me, player), |ledger| {
        manager.process_bet(ledger, rng, player)
    })?;
    messages.extend(race);
    Ok(messages)
}

/// "Horse 3" / "3" -> 3.
pub fn parse_horse_option(option: &str) -> Result<HorseNumber, GameError> {
    let trimmed = option.trim();
    let digits = trimmed
        .strip_prefix("Horse")
        .or_else(|| trimmed.strip_prefix("horse"))
        .unwrap_or(trimmed)
        .trim();
    digits
        .parse::<HorseNumber>()
        .map_err(|_| GameError::InvalidSelection(option.to_string()))
}
