use std::collections::{BTreeMap, HashMap};

use crate::api::messages::{Coord, Message, Speaker};
use crate::domain::{BandOfHorses, Credits, HorseNumber, PlayerName};
use crate::games::errors::GameError;
use crate::games::RandomSource;
use crate::ledger::{BalanceChangeReason, BalanceManager};

/// Ставка по умолчанию.
pub const DEFAULT_HORSE_BET: Credits = Credits(50.0);

/// Во сколько раз умножается ставка при угаданном победителе.
pub const HORSE_PAYOUT_MULTIPLIER: f64 = 3.0;

/// Текст таблички, пока не было ни одного забега.
pub const NO_RACES_TEXT: &str = "There has been no races";

/// Наблюдатель за результатами забегов (табло и т.п.).
pub trait HorseBettingObserver {
    /// Сообщения уходят игроку, ради ставки которого прошёл забег.
    fn update_scoreboard(&mut self, player: &str, winning_horse: HorseNumber) -> Vec<Message>;

    /// Текущий текст табло, если наблюдатель его ведёт.
    fn render(&self) -> Option<String> {
        None
    }

    /// Что увидит игрок, подойдя к табличке. `None` - показывать нечего.
    fn show_result_sign(&self, _player: &str) -> Option<Vec<Message>> {
        None
    }
}

/// Табличка с количеством побед каждой лошади. Одна на ипподром.
pub struct SignScoreboardObserver {
    name: String,
    horse_wins: BTreeMap<HorseNumber, u32>,
    scoreboard: Option<String>,
}

impl SignScoreboardObserver {
    /// Табло для лошадей 1..=horse_count, все с нулём побед.
    pub fn new(name: impl Into<String>, horse_count: u32) -> Self {
        Self {
            name: name.into(),
            horse_wins: (1..=horse_count).map(|n| (n, 0)).collect(),
            scoreboard: None,
        }
    }

    pub fn wins(&self, horse: HorseNumber) -> Option<u32> {
        self.horse_wins.get(&horse).copied()
    }

    fn rebuild(&mut self) -> String {
        let items: Vec<String> = self
            .horse_wins
            .iter()
            .map(|(horse, wins)| format!("Horse {horse}: {wins} wins"))
            .collect();

        let lines: Vec<String> = items.chunks(2).map(|pair| pair.join(" ")).collect();
        format!("Horse Scoreboard:\n{}", lines.join("\n"))
    }
}

impl HorseBettingObserver for SignScoreboardObserver {
    fn update_scoreboard(&mut self, player: &str, winning_horse: HorseNumber) -> Vec<Message> {
        if let Some(wins) = self.horse_wins.get_mut(&winning_horse) {
            *wins += 1;
        }
        let text = self.rebuild();
        self.scoreboard = Some(text.clone());

        let speaker = Speaker::new(self.name.clone(), "sign");
        vec![Message::dialogue(&speaker, player, text)]
    }

    fn render(&self) -> Option<String> {
        self.scoreboard.clone()
    }

    /// Сообщение с табло или `None`, если забегов ещё не было.
    fn show_result_sign(&self, player: &str) -> Option<Vec<Message>> {
        let speaker = Speaker::new(self.name.clone(), "sign");
        self.scoreboard
            .as_ref()
            .map(|text| vec![Message::dialogue(&speaker, player, text.clone())])
    }
}

/// Хэндл наблюдателя табло.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScoreboardId(u64);

/// Забег с перемешиванием и правилом "прошлый победитель продвигается на одну позицию".
/// Исходный табун не трогаем, возвращаем новый рейтинг.
pub fn figure_out_winner<R: RandomSource>(band: &BandOfHorses, rng: &mut R) -> BandOfHorses {
    let mut ranking = band.clone();
    rng.shuffle(&mut ranking.horses);
    ranking.apply_previous_winner_bias();
    ranking
}

/// Менеджер ставок на скачки: выбор лошади, размер ставки, забег, выплата.
pub struct HorseBettingManager {
    band: BandOfHorses,
    player_choices: HashMap<PlayerName, HorseNumber>,
    player_bets: HashMap<PlayerName, Credits>,
    default_bet: Credits,
    payout_multiplier: f64,
    scoreboard_observers: Vec<(ScoreboardId, Box<dyn HorseBettingObserver>)>,
    next_observer_id: u64,
}

impl Default for HorseBettingManager {
    fn default() -> Self {
        Self::new(BandOfHorses::default(), DEFAULT_HORSE_BET, HORSE_PAYOUT_MULTIPLIER)
    }
}

impl HorseBettingManager {
    pub fn new(band: BandOfHorses, default_bet: Credits, payout_multiplier: f64) -> Self {
        Self {
            band,
            player_choices: HashMap::new(),
            player_bets: HashMap::new(),
            default_bet,
            payout_multiplier,
            scoreboard_observers: Vec::new(),
            next_observer_id: 1,
        }
    }

    pub fn band(&self) -> &BandOfHorses {
        &self.band
    }

    pub fn register_scoreboard_observer(
        &mut self,
        observer: Box<dyn HorseBettingObserver>,
    ) -> ScoreboardId {
        let id = ScoreboardId(self.next_observer_id);
        self.next_observer_id += 1;
        self.scoreboard_observers.push((id, observer));
        id
    }

    pub fn unregister_scoreboard_observer(&mut self, id: ScoreboardId) -> bool {
        let before = self.scoreboard_observers.len();
        self.scoreboard_observers.retain(|(oid, _)| *oid != id);
        self.scoreboard_observers.len() != before
    }

    pub fn scoreboard_observer_count(&self) -> usize {
        self.scoreboard_observers.len()
    }

    /// Текст табло конкретного наблюдателя.
    pub fn scoreboard_text(&self, id: ScoreboardId) -> Option<String> {
        self.scoreboard_observers
            .iter()
            .find(|(oid, _)| *oid == id)
            .and_then(|(_, o)| o.render())
    }

    /// Табличка конкретного наблюдателя для игрока.
    pub fn show_result_sign(&self, id: ScoreboardId, player: &str) -> Option<Vec<Message>> {
        self.scoreboard_observers
            .iter()
            .find(|(oid, _)| *oid == id)
            .and_then(|(_, o)| o.show_result_sign(player))
    }

    pub fn notify_scoreboard_observers(
        &mut self,
        player: &str,
        winning_horse: HorseNumber,
    ) -> Vec<Message> {
        let mut messages = Vec::new();
        for (_, observer) in self.scoreboard_observers.iter_mut() {
            messages.extend(observer.update_scoreboard(player, winning_horse));
        }
        messages
    }

    /// Сохранить выбор лошади. Лошадь должна бежать в этом забеге.
    pub fn set_player_choice(&mut self, player: &str, horse: HorseNumber) -> Result<(), GameError> {
        if !self.band.contains(horse) {
            return Err(GameError::InvalidHorse(horse));
        }
        self.player_choices.insert(player.to_string(), horse);
        Ok(())
    }

    pub fn get_player_choice(&self, player: &str) -> Option<HorseNumber> {
        self.player_choices.get(player).copied()
    }

    /// Выставить ставку игрока. Отрицательная/нечисловая - ошибка ввода.
    pub fn set_bet(&mut self, player: &str, amount: Credits) -> Result<(), GameError> {
        if !amount.0.is_finite() || amount.0 <= 0.0 {
            return Err(GameError::InvalidBet(amount.0.to_string()));
        }
        self.player_bets.insert(player.to_string(), amount);
        Ok(())
    }

    /// Ставка игрока или ставка по умолчанию.
    pub fn get_bet(&self, player: &str) -> Credits {
        self.player_bets.get(player).copied().unwrap_or(self.default_bet)
    }

    pub fn default_bet(&self) -> Credits {
        self.default_bet
    }

    /// Реплика перед стартом, после выбора лошади.
    pub fn option_horse(&self, player: &str) -> Vec<Message> {
        vec![Message::dialogue(&player_speaker(player), player, "Let the race begin!")]
    }

    /// Провести забег по текущей ставке игрока и рассчитаться.
    ///
    /// Наблюдатели баланса (если нужны) регистрирует вызывающий.
    /// После забега ставка игрока сбрасывается на ставку по умолчанию,
    /// а итоговый рейтинг становится текущим табуном (флаг прошлого победителя).
    pub fn process_bet<R: RandomSource>(
        &mut self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> Result<Vec<Message>, GameError> {
        let choice = self.get_player_choice(player).ok_or(GameError::NoHorseChosen)?;
        let bet = self.get_bet(player);

        let balance = ledger.get_balance(player);
        if balance < bet {
            return Err(GameError::InsufficientFunds {
                needed: bet,
                balance,
                action: "bet on this race",
            });
        }

        let speaker = player_speaker(player);
        let mut messages = Vec::new();

        for count in ["3", "2", "1"] {
            messages.push(Message::dialogue(&speaker, player, count));
        }
        messages.push(Message::sound(player, "gunshot"));
        messages.push(Message::dialogue(&speaker, player, "GO!"));
        messages.push(Message::emote(player, "smaller_horse.png", Coord::new(9, 5)));
        messages.push(Message::sound_with_volume(player, "horse_race", 0.8));

        let result = figure_out_winner(&self.band, rng);
        let winner = result
            .winner()
            .map(|h| h.number)
            .ok_or(GameError::InvalidHorse(choice))?;
        self.band = result;
        log::info!("horse race: winner {} (player {} picked {})", winner, player, choice);

        let observer_msgs = if winner == choice {
            let win_amount = bet * self.payout_multiplier;
            messages.push(Message::dialogue(
                &speaker,
                player,
                format!("Well done! You've won {win_amount}!"),
            ));
            ledger.increase_balance(win_amount, BalanceChangeReason::Win, player)
        } else {
            messages.push(Message::dialogue(
                &speaker,
                player,
                format!("You've lost {bet}... better luck next time!"),
            ));
            ledger.decrease_balance(bet, BalanceChangeReason::Lose, player)
        };

        let scoreboard_msgs = self.notify_scoreboard_observers(player, winner);
        messages.extend(observer_msgs);
        messages.push(Message::sound_with_volume(player, "horse", 0.8));
        messages.extend(scoreboard_msgs);

        self.player_bets.remove(player);
        Ok(messages)
    }
}

/// В скачках "говорит" сам игрок (его же картинка).
fn player_speaker(player: &str) -> Speaker {
    Speaker::new(player, "player2")
}
