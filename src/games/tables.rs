use std::collections::HashMap;

use crate::api::errors::game_error_message;
use crate::api::messages::{Message, Speaker};
use crate::domain::{Credits, PlayerName, TableId};
use crate::games::blackjack::{BlackjackGame, BlackjackOutcome};
use crate::games::errors::GameError;
use crate::games::one_card_poker::{OneCardPokerGame, ShowdownOutcome};
use crate::games::strategy::PokerStrategy;
use crate::games::RandomSource;
use crate::ledger::{interaction_observers, BalanceChangeReason, BalanceManager};

pub const BLACKJACK_MENU: &str = "Blackjack Menu";
pub const BLACKJACK_OPTIONS: [&str; 4] = ["Deal", "Hit", "Stand", "Quit"];

pub const POKER_MENU: &str = "One-Card Poker Menu";
pub const POKER_OPTIONS: [&str; 4] = ["Deal", "Bet", "Fold", "Quit"];

type Outcome = Result<Vec<Message>, GameError>;

/// Стол блэкджека. Для каждого игрока - своя партия,
/// создаётся по требованию и выбрасывается по окончании раунда или по Quit.
pub struct BlackjackTable {
    pub id: TableId,
    speaker: Speaker,
    ante: Credits,
    bet_amount: Credits,
    sessions: HashMap<PlayerName, BlackjackGame>,
}

impl BlackjackTable {
    pub fn new(id: TableId, image: impl Into<String>, ante: Credits, bet_amount: Credits) -> Self {
        Self {
            id,
            speaker: Speaker::new("Blackjack Table", image),
            ante,
            bet_amount,
            sessions: HashMap::new(),
        }
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn menu(&self, player: &str) -> Message {
        Message::menu(&self.speaker, player, BLACKJACK_MENU, &BLACKJACK_OPTIONS)
    }

    pub fn session(&self, player: &str) -> Option<&BlackjackGame> {
        self.sessions.get(player)
    }

    pub fn has_session(&self, player: &str) -> bool {
        self.sessions.contains_key(player)
    }

    /// Партия игрока, создаётся при первом обращении.
    pub fn get_or_create_game(&mut self, player: &str) -> &mut BlackjackGame {
        let (ante, bet) = (self.ante, self.bet_amount);
        self.sessions
            .entry(player.to_string())
            .or_insert_with(|| BlackjackGame::new(ante, bet))
    }

    pub fn remove_game(&mut self, player: &str) -> bool {
        self.sessions.remove(player).is_some()
    }

    /// Deal: проверить деньги, списать анте, раздать.
    pub fn deal<R: RandomSource>(
        &mut self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> Vec<Message> {
        let observers = interaction_observers(&self.speaker, player);
        let result = ledger.with_observers(observers, |ledger| self.try_deal(ledger, rng, player));
        self.with_menu(player, result)
    }

    pub fn hit(&mut self, player: &str) -> Vec<Message> {
        let result = self.try_hit(player);
        self.with_menu(player, result)
    }

    /// Stand: ход дилера, выплата, партия закрывается.
    pub fn stand(&mut self, ledger: &mut BalanceManager, player: &str) -> Vec<Message> {
        let observers = interaction_observers(&self.speaker, player);
        let result = ledger.with_observers(observers, |ledger| self.try_stand(ledger, player));
        self.with_menu(player, result)
    }

    pub fn quit(&mut self, player: &str) -> Vec<Message> {
        if self.remove_game(player) {
            vec![Message::server(player, "You quit the Blackjack session.")]
        } else {
            vec![Message::server(player, "You're not currently in a Blackjack game.")]
        }
    }

    fn try_deal<R: RandomSource>(
        &mut self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> Outcome {
        let speaker = self.speaker.clone();
        let game = self.get_or_create_game(player);
        if game.active_round {
            return Err(GameError::RoundAlreadyActive);
        }

        let balance = ledger.get_balance(player);
        if balance < game.ante {
            return Err(GameError::InsufficientFunds {
                needed: game.ante,
                balance,
                action: "ante up",
            });
        }

        game.start_new_round(rng)?;
        let mut messages = ledger.decrease_balance(game.ante, BalanceChangeReason::Cost, player);
        game.pot = game.ante * 2.0;

        let text = format!(
            "New round started!\nYour hand: {} (Total: {})\nDealer shows: {}",
            game.get_player_cards().join(", "),
            game.get_player_total(),
            game.get_dealer_cards(false).join(", "),
        );
        messages.push(Message::dialogue(&speaker, player, text));
        log::info!("blackjack table {}: new round for {}", self.id, player);
        Ok(messages)
    }

    fn try_hit(&mut self, player: &str) -> Outcome {
        let game = self
            .sessions
            .get_mut(player)
            .filter(|g| g.active_round && !g.player_hand.is_empty())
            .ok_or(GameError::NoActiveRound)?;

        let card = game.player_hit()?;
        let cards = game.get_player_cards().join(", ");
        let total = game.get_player_total();
        let article = card.rank.article();

        let mut messages = Vec::new();
        if game.is_busted() {
            let winner = game.determine_winner();
            messages.push(Message::dialogue(
                &self.speaker,
                player,
                format!("You drew {article} {card} and busted!\nFinal hand: {cards} (Total: {total})"),
            ));
            messages.push(Message::dialogue(
                &self.speaker,
                player,
                format!("Result: {} wins!", winner.label()),
            ));
            self.sessions.remove(player);
            log::info!("blackjack table {}: {} busted", self.id, player);
        } else {
            messages.push(Message::dialogue(
                &self.speaker,
                player,
                format!("You drew {article} {card}.\nYour hand: {cards} (Total: {total})"),
            ));
        }
        Ok(messages)
    }

    fn try_stand(&mut self, ledger: &mut BalanceManager, player: &str) -> Outcome {
        let game = self
            .sessions
            .get_mut(player)
            .filter(|g| g.active_round && !g.player_hand.is_empty())
            .ok_or(GameError::NoActiveRound)?;

        game.dealer_turn()?;
        let mut messages = vec![Message::dialogue(
            &self.speaker,
            player,
            format!(
                "Dealer's hand: {} (Total: {})",
                game.get_dealer_cards(true).join(", "),
                game.get_dealer_total()
            ),
        )];

        let winner = game.determine_winner();
        let (pot, ante) = (game.pot, game.ante);
        match winner {
            BlackjackOutcome::Player => {
                messages.push(Message::dialogue(&self.speaker, player, "Result: Player wins!"));
                messages.extend(ledger.increase_balance(pot, BalanceChangeReason::Win, player));
            }
            BlackjackOutcome::Push => {
                messages.push(Message::dialogue(
                    &self.speaker,
                    player,
                    "Result: Push! Your ante is returned.",
                ));
                messages.extend(ledger.increase_balance(ante, BalanceChangeReason::Tie, player));
            }
            BlackjackOutcome::Dealer => {
                messages.push(Message::dialogue(&self.speaker, player, "Result: Dealer wins!"));
            }
        }

        log::info!("blackjack table {}: {} -> {:?}", self.id, player, winner);
        self.sessions.remove(player);
        Ok(messages)
    }

    fn with_menu(&self, player: &str, result: Outcome) -> Vec<Message> {
        let mut messages = match result {
            Ok(m) => m,
            Err(e) => vec![game_error_message(&self.speaker, player, &e)],
        };
        messages.push(self.menu(player));
        messages
    }
}

/// Стол one-card poker с ИИ-соперником.
///
/// Стратегия одна на стол: профиль ставок/фолдов копится по всем игрокам.
pub struct OneCardPokerTable {
    pub id: TableId,
    speaker: Speaker,
    ante: Credits,
    bet_amount: Credits,
    strategy: Box<dyn PokerStrategy>,
    sessions: HashMap<PlayerName, OneCardPokerGame>,
}

impl OneCardPokerTable {
    pub fn new(
        id: TableId,
        image: impl Into<String>,
        strategy: Box<dyn PokerStrategy>,
        ante: Credits,
        bet_amount: Credits,
    ) -> Self {
        Self {
            id,
            speaker: Speaker::new("One-Card Poker Table", image),
            ante,
            bet_amount,
            strategy,
            sessions: HashMap::new(),
        }
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn strategy(&self) -> &dyn PokerStrategy {
        self.strategy.as_ref()
    }

    pub fn menu(&self, player: &str) -> Message {
        Message::menu(&self.speaker, player, POKER_MENU, &POKER_OPTIONS)
    }

    pub fn session(&self, player: &str) -> Option<&OneCardPokerGame> {
        self.sessions.get(player)
    }

    pub fn get_or_create_game(&mut self, player: &str) -> &mut OneCardPokerGame {
        let (ante, bet) = (self.ante, self.bet_amount);
        self.sessions
            .entry(player.to_string())
            .or_insert_with(|| OneCardPokerGame::new(ante, bet))
    }

    pub fn remove_game(&mut self, player: &str) -> bool {
        self.sessions.remove(player).is_some()
    }

    pub fn deal<R: RandomSource>(
        &mut self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> Vec<Message> {
        let observers = interaction_observers(&self.speaker, player);
        let result = ledger.with_observers(observers, |ledger| self.try_deal(ledger, rng, player));
        self.with_menu(player, result)
    }

    /// Bet: игрок ставит фиксированную сумму, ИИ решает колл/фолд.
    pub fn bet<R: RandomSource>(
        &mut self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> Vec<Message> {
        let observers = interaction_observers(&self.speaker, player);
        let result = ledger.with_observers(observers, |ledger| self.try_bet(ledger, rng, player));
        self.with_menu(player, result)
    }

    /// Fold: игрок отдаёт банк ИИ.
    pub fn fold(&mut self, player: &str) -> Vec<Message> {
        let result = self.try_fold(player);
        self.with_menu(player, result)
    }

    pub fn quit(&mut self, player: &str) -> Vec<Message> {
        if self.remove_game(player) {
            vec![Message::server(player, "You quit the One-Card Poker session.")]
        } else {
            vec![Message::server(player, "You're not currently in a One-Card Poker game.")]
        }
    }

    fn try_deal<R: RandomSource>(
        &mut self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> Outcome {
        let speaker = self.speaker.clone();
        let game = self.get_or_create_game(player);
        if game.active_round {
            return Err(GameError::RoundAlreadyActive);
        }

        let balance = ledger.get_balance(player);
        if balance < game.ante {
            return Err(GameError::InsufficientFunds {
                needed: game.ante,
                balance,
                action: "ante up",
            });
        }

        game.start_new_round(rng);
        let mut messages = ledger.decrease_balance(game.ante, BalanceChangeReason::Cost, player);
        game.pot = game.ante * 2.0;
        game.deal_cards()?;

        if let Some(card) = game.player_card {
            messages.push(Message::dialogue(
                &speaker,
                player,
                format!(
                    "You receive {} {card}.\nThe pot is now {}.",
                    card.rank.article(),
                    game.pot
                ),
            ));
        }
        Ok(messages)
    }

    fn try_bet<R: RandomSource>(
        &mut self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> Outcome {
        let game = self
            .sessions
            .get_mut(player)
            .filter(|g| g.active_round)
            .ok_or(GameError::NoActiveRound)?;
        let ai_card = game.ai_card.ok_or(GameError::NoActiveRound)?;

        let balance = ledger.get_balance(player);
        if balance < game.bet_amount {
            return Err(GameError::InsufficientFunds {
                needed: game.bet_amount,
                balance,
                action: "bet",
            });
        }

        let mut messages = ledger.decrease_balance(game.bet_amount, BalanceChangeReason::Bet, player);
        game.pot += game.bet_amount;
        self.strategy.record_player_bet();

        let ai_rank = ai_card.rank;
        let article = ai_rank.article();

        if game.ai_decides_call(self.strategy.as_ref(), rng) {
            game.pot += game.bet_amount;
            messages.push(Message::dialogue(
                &self.speaker,
                player,
                format!("AI calls your bet! Pot is now {}.\nTime for showdown...", game.pot),
            ));

            let outcome = game.showdown();
            match outcome {
                ShowdownOutcome::Player => {
                    messages.push(Message::dialogue(
                        &self.speaker,
                        player,
                        format!("You won the showdown! AI had {article} {ai_rank}"),
                    ));
                    messages.extend(ledger.increase_balance(game.pot, BalanceChangeReason::Win, player));
                }
                ShowdownOutcome::Ai => {
                    messages.push(Message::dialogue(
                        &self.speaker,
                        player,
                        format!("AI wins the showdown with {article} {ai_rank}"),
                    ));
                }
                ShowdownOutcome::Tie => {
                    // Каждый получает назад свою половину банка.
                    let stake = game.pot * 0.5;
                    messages.extend(ledger.increase_balance(stake, BalanceChangeReason::Tie, player));
                    messages.push(Message::dialogue(
                        &self.speaker,
                        player,
                        "It's a tie. You get your stake back!",
                    ));
                }
            }
            log::info!("poker table {}: showdown for {} -> {:?}", self.id, player, outcome);
        } else {
            messages.push(Message::dialogue(
                &self.speaker,
                player,
                format!("AI folds {article} {ai_rank}! You take the pot."),
            ));
            messages.extend(ledger.increase_balance(game.pot, BalanceChangeReason::Win, player));
            log::info!("poker table {}: AI folded to {}", self.id, player);
        }

        game.active_round = false;
        Ok(messages)
    }

    fn try_fold(&mut self, player: &str) -> Outcome {
        let game = self
            .sessions
            .get_mut(player)
            .filter(|g| g.active_round)
            .ok_or(GameError::NoActiveRound)?;

        self.strategy.record_player_fold();
        game.active_round = false;

        Ok(vec![Message::dialogue(
            &self.speaker,
            player,
            "You folded. AI wins the pot.",
        )])
    }

    fn with_menu(&self, player: &str, result: Outcome) -> Vec<Message> {
        let mut messages = match result {
            Ok(m) => m,
            Err(e) => vec![game_error_message(&self.speaker, player, &e)],
        };
        messages.push(self.menu(player));
        messages
    }
}
