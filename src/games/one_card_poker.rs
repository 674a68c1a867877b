use serde::{Deserialize, Serialize};

use crate::domain::{Card, Credits, Deck};
use crate::games::errors::GameError;
use crate::games::strategy::PokerStrategy;
use crate::games::RandomSource;

/// Итог шоудауна.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShowdownOutcome {
    Player,
    Ai,
    Tie,
}

/// One-card poker против одного ИИ.
///
/// Банк = анте игрока + анте ИИ. Дальше игрок ставит или сбрасывает,
/// а ИИ решает коллировать или нет через свою `PokerStrategy`
/// (стратегия принадлежит столу, сюда передаётся ссылкой).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OneCardPokerGame {
    pub deck: Deck,
    pub player_card: Option<Card>,
    pub ai_card: Option<Card>,
    pub ante: Credits,
    pub bet_amount: Credits,
    pub pot: Credits,
    pub active_round: bool,
}

impl Default for OneCardPokerGame {
    fn default() -> Self {
        Self::new(Credits(10.0), Credits(10.0))
    }
}

impl OneCardPokerGame {
    pub fn new(ante: Credits, bet_amount: Credits) -> Self {
        assert!(ante.0 >= 0.0, "ante must be non-negative");
        Self {
            deck: Deck::one_card_poker(),
            player_card: None,
            ai_card: None,
            ante,
            bet_amount,
            pot: Credits::ZERO,
            active_round: false,
        }
    }

    /// Свежая колода из трёх карт, перемешать, очистить карты и банк.
    pub fn start_new_round<R: RandomSource>(&mut self, rng: &mut R) {
        let mut deck = Deck::one_card_poker();
        rng.shuffle(&mut deck.cards);
        self.deck = deck;

        self.player_card = None;
        self.ai_card = None;
        self.pot = Credits::ZERO;
        self.active_round = true;
    }

    /// По одной карте игроку и ИИ (игроку первому).
    pub fn deal_cards(&mut self) -> Result<(), GameError> {
        self.player_card = Some(self.deck.deal_card().ok_or(GameError::DeckExhausted)?);
        self.ai_card = Some(self.deck.deal_card().ok_or(GameError::DeckExhausted)?);
        Ok(())
    }

    pub fn ai_decides_call(
        &self,
        strategy: &dyn PokerStrategy,
        rng: &mut dyn RandomSource,
    ) -> bool {
        strategy.decide_call_or_fold(self.ai_card, rng)
    }

    /// Старшая карта выигрывает, равные - ничья.
    /// Если какой-то карты нет - тоже ничья.
    pub fn showdown(&self) -> ShowdownOutcome {
        let (Some(player), Some(ai)) = (self.player_card, self.ai_card) else {
            return ShowdownOutcome::Tie;
        };

        match player.rank.cmp(&ai.rank) {
            std::cmp::Ordering::Greater => ShowdownOutcome::Player,
            std::cmp::Ordering::Less => ShowdownOutcome::Ai,
            std::cmp::Ordering::Equal => ShowdownOutcome::Tie,
        }
    }
}
