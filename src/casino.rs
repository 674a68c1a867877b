//! Фасад казино: явные сервисы процесса вместо глобальных синглтонов.
//!
//! Движок держит один `Casino` и прокидывает в него действия игроков
//! (взаимодействие с объектом, пункт меню, чат-команда). Каждое действие
//! синхронно возвращает упорядоченный список сообщений.

use crate::api::commands::{
    parse_bet_amount, BetMenuChoice, BlackjackAction, ChatCommand, DjAction, PokerAction,
};
use crate::api::errors::game_error_message;
use crate::api::messages::{Message, Reply, Speaker};
use crate::config::{CasinoConfig, ConfigError};
use crate::domain::{BandOfHorses, TableId};
use crate::games::horse_race::{ScoreboardId, NO_RACES_TEXT};
use crate::games::{
    BlackjackTable, HorseBettingManager, JackpotStrategy, OneCardPokerTable, RandomSource,
    SignScoreboardObserver, SlotMachine, StandardStrategyWithWheel,
};
use crate::infra::SystemRng;
use crate::ledger::BalanceManager;
use crate::venue::{Bar, Bookmaker, Bouncer, DjBooth};

pub const BLACKJACK_TABLE_ID: TableId = 1;
/// Покерные столы нумеруются с этого id в порядке `config.poker.tables`.
pub const FIRST_POKER_TABLE_ID: TableId = 10;

const SCOREBOARD_NAME: &str = "Horse Scoreboard";

pub struct Casino<R: RandomSource = SystemRng> {
    config: CasinoConfig,
    rng: R,
    ledger: BalanceManager,
    blackjack: BlackjackTable,
    poker_tables: Vec<OneCardPokerTable>,
    slots: SlotMachine,
    horses: HorseBettingManager,
    scoreboard: ScoreboardId,
    bar: Bar,
    bouncer: Bouncer,
    bookmaker: Bookmaker,
    dj: DjBooth,
}

impl Casino<SystemRng> {
    /// Казино с настройками по умолчанию и системным RNG.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(CasinoConfig::default(), SystemRng)
    }
}

impl<R: RandomSource> Casino<R> {
    /// Собрать казино. Конфиг проверяется до создания столов,
    /// поэтому невалидные значения не доходят до игр.
    pub fn new(config: CasinoConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let blackjack = BlackjackTable::new(
            BLACKJACK_TABLE_ID,
            "casino_table4",
            config.blackjack.ante,
            config.blackjack.bet_amount,
        );

        let poker_tables = config
            .poker
            .tables
            .iter()
            .enumerate()
            .map(|(i, difficulty)| {
                OneCardPokerTable::new(
                    FIRST_POKER_TABLE_ID + i as TableId,
                    difficulty.table_image(),
                    difficulty.strategy(),
                    config.poker.table.ante,
                    config.poker.table.bet_amount,
                )
            })
            .collect();

        let slots = SlotMachine::new(config.slots.spin_cost)
            .with_weights(config.slots.weights.clone())
            .with_strategies(
                StandardStrategyWithWheel {
                    base_multiplier: config.slots.base_multiplier,
                    wheel: config.slots.wheel.clone(),
                },
                JackpotStrategy {
                    multiplier: config.slots.jackpot_multiplier,
                },
            );

        let mut horses = HorseBettingManager::new(
            BandOfHorses::with_count(config.horses.horse_count),
            config.horses.default_bet,
            config.horses.payout_multiplier,
        );
        let scoreboard = horses.register_scoreboard_observer(Box::new(SignScoreboardObserver::new(
            SCOREBOARD_NAME,
            config.horses.horse_count,
        )));

        let venue = &config.venue;
        let bar = Bar::new(venue.drinks.clone());
        let bouncer = Bouncer::new(venue.bouncer_dialogues.clone(), venue.teleport_room.clone());
        let bookmaker = Bookmaker::new(config.horses.bookmaker_dialogues.clone());
        let dj = DjBooth::new(venue.playlist.clone());

        log::info!(
            "casino opened: {} poker tables, {} horses",
            config.poker.tables.len(),
            config.horses.horse_count
        );

        Ok(Self {
            ledger: BalanceManager::with_starting_balance(config.starting_balance),
            config,
            rng,
            blackjack,
            poker_tables,
            slots,
            horses,
            scoreboard,
            bar,
            bouncer,
            bookmaker,
            dj,
        })
    }

    /// Загрузить настройки из JSON-файла.
    pub fn from_config_file(path: impl AsRef<std::path::Path>, rng: R) -> Result<Self, ConfigError> {
        Self::new(CasinoConfig::from_json_file(path)?, rng)
    }

    pub fn config(&self) -> &CasinoConfig {
        &self.config
    }

    pub fn ledger(&self) -> &BalanceManager {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut BalanceManager {
        &mut self.ledger
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn blackjack(&self) -> &BlackjackTable {
        &self.blackjack
    }

    pub fn poker_table(&self, id: TableId) -> Option<&OneCardPokerTable> {
        self.poker_tables.iter().find(|t| t.id == id)
    }

    pub fn poker_table_ids(&self) -> Vec<TableId> {
        self.poker_tables.iter().map(|t| t.id).collect()
    }

    pub fn slots(&self) -> &SlotMachine {
        &self.slots
    }

    pub fn horses(&self) -> &HorseBettingManager {
        &self.horses
    }

    pub fn bouncer(&self) -> &Bouncer {
        &self.bouncer
    }

    pub fn bookmaker(&self) -> &Bookmaker {
        &self.bookmaker
    }

    pub fn dj(&self) -> &DjBooth {
        &self.dj
    }

    /// Текст табло скачек (после первого забега).
    pub fn scoreboard_text(&self) -> Option<String> {
        self.horses.scoreboard_text(self.scoreboard)
    }

    // ---------------- чат ----------------

    /// Разобрать и выполнить чат-команду. `None` - текст не наш.
    pub fn handle_chat(&mut self, player: &str, text: &str) -> Option<Reply> {
        let command = ChatCommand::parse(text)?;
        Some(match command {
            ChatCommand::Balance => self.chat_balance(player).into(),
            ChatCommand::Age(raw) => self.chat_age(player, &raw),
            ChatCommand::BetHorse(raw) => self.chat_bet_horse(player, &raw).into(),
        })
    }

    pub fn chat_balance(&mut self, player: &str) -> Vec<Message> {
        let balance = self.ledger.get_balance(player);
        vec![Message::server(player, format!("Your current balance is {balance}"))]
    }

    pub fn chat_age(&mut self, player: &str, raw: &str) -> Reply {
        if !self.bouncer.is_waiting_for(player) {
            return vec![Message::server(player, "No one is asking for your age right now.")].into();
        }
        self.bouncer.process_player_input(player, raw)
    }

    pub fn chat_bet_horse(&mut self, player: &str, raw: &str) -> Vec<Message> {
        if !self.bookmaker.is_awaiting_bet(player) {
            return vec![Message::server(player, "No one is asking for you to bet")];
        }
        match parse_bet_amount(raw) {
            Ok(amount) => self.bookmaker.place_bet(&mut self.horses, player, amount),
            Err(err) => vec![game_error_message(self.bookmaker.speaker(), player, &err)],
        }
    }

    // ---------------- столы ----------------

    pub fn blackjack_interact(&self, player: &str) -> Vec<Message> {
        vec![self.blackjack.menu(player)]
    }

    pub fn blackjack_action(&mut self, player: &str, action: BlackjackAction) -> Vec<Message> {
        match action {
            BlackjackAction::Deal => self.blackjack.deal(&mut self.ledger, &mut self.rng, player),
            BlackjackAction::Hit => self.blackjack.hit(player),
            BlackjackAction::Stand => self.blackjack.stand(&mut self.ledger, player),
            BlackjackAction::Quit => self.blackjack.quit(player),
        }
    }

    /// Пункт меню блэкджека строкой, как его прислал движок.
    pub fn blackjack_option(&mut self, player: &str, option: &str) -> Vec<Message> {
        match option.parse::<BlackjackAction>() {
            Ok(action) => self.blackjack_action(player, action),
            Err(err) => vec![game_error_message(self.blackjack.speaker(), player, &err)],
        }
    }

    pub fn poker_interact(&self, table: TableId, player: &str) -> Vec<Message> {
        match self.poker_table(table) {
            Some(t) => vec![t.menu(player)],
            None => Vec::new(),
        }
    }

    /// Неизвестный стол - пустой ответ.
    pub fn poker_action(&mut self, table: TableId, player: &str, action: PokerAction) -> Vec<Message> {
        let Some(t) = self.poker_tables.iter_mut().find(|t| t.id == table) else {
            log::warn!("poker action for unknown table {}", table);
            return Vec::new();
        };
        match action {
            PokerAction::Deal => t.deal(&mut self.ledger, &mut self.rng, player),
            PokerAction::Bet => t.bet(&mut self.ledger, &mut self.rng, player),
            PokerAction::Fold => t.fold(player),
            PokerAction::Quit => t.quit(player),
        }
    }

    pub fn poker_option(&mut self, table: TableId, player: &str, option: &str) -> Vec<Message> {
        match option.parse::<PokerAction>() {
            Ok(action) => self.poker_action(table, player, action),
            Err(err) => match self.poker_table(table) {
                Some(t) => vec![game_error_message(t.speaker(), player, &err)],
                None => Vec::new(),
            },
        }
    }

    pub fn spin_slots(&mut self, player: &str) -> Vec<Message> {
        let (_, messages) = self.slots.play_spin(&mut self.ledger, &mut self.rng, player);
        messages
    }

    // ---------------- окружение ----------------

    pub fn bar_interact(&self, player: &str) -> Vec<Message> {
        let mut messages = self.bar.greet(player);
        messages.push(self.bar.menu(player));
        messages
    }

    pub fn bar_order(&mut self, player: &str, selection: &str) -> Vec<Message> {
        self.bar.order(&mut self.ledger, player, selection)
    }

    pub fn bouncer_interact(&mut self, player: &str) -> Vec<Message> {
        self.bouncer.player_interacted(player)
    }

    pub fn bookmaker_interact(&mut self, player: &str) -> Vec<Message> {
        self.bookmaker.player_interacted(player)
    }

    pub fn bookmaker_menu(&mut self, player: &str, choice: BetMenuChoice) -> Vec<Message> {
        match choice {
            BetMenuChoice::Yes => self.bookmaker.accept(&self.horses, player),
            BetMenuChoice::No => self.bookmaker.decline(player),
        }
    }

    pub fn bookmaker_option(&mut self, player: &str, option: &str) -> Vec<Message> {
        match option.parse::<BetMenuChoice>() {
            Ok(choice) => self.bookmaker_menu(player, choice),
            Err(err) => vec![game_error_message(self.bookmaker.speaker(), player, &err)],
        }
    }

    /// Пункт "Horse Choose Menu": выбор лошади и забег.
    pub fn choose_horse(&mut self, player: &str, option: &str) -> Vec<Message> {
        self.bookmaker.choose_horse(
            &mut self.horses,
            &mut self.ledger,
            &mut self.rng,
            player,
            option,
        )
    }

    /// Табличка у ипподрома: табло или "забегов не было".
    pub fn scoreboard_sign_interact(&self, player: &str) -> Vec<Message> {
        self.horses
            .show_result_sign(self.scoreboard, player)
            .unwrap_or_else(|| {
                let speaker = Speaker::new(SCOREBOARD_NAME, "sign");
                vec![Message::dialogue(&speaker, player, NO_RACES_TEXT)]
            })
    }

    pub fn dj_interact(&self, player: &str) -> Vec<Message> {
        vec![self.dj.menu(player)]
    }

    pub fn dj_action(&mut self, player: &str, action: DjAction) -> Vec<Message> {
        match action {
            DjAction::Play => self.dj.play(player),
            DjAction::Next => self.dj.next_song(player),
            DjAction::Previous => self.dj.previous_song(player),
            DjAction::Shuffle => self.dj.shuffle(&mut self.rng, player),
        }
    }
}
