use serde::{Deserialize, Serialize};

use crate::domain::{Card, Credits, Deck, Hand};
use crate::games::errors::GameError;
use crate::games::RandomSource;

/// Дилер добирает, пока сумма меньше этого порога.
pub const DEALER_STANDS_ON: u32 = 17;

/// Что показывать вместо закрытой карты дилера.
pub const HIDDEN_CARD: &str = "<Hidden Card>";

/// Итог раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackOutcome {
    Player,
    Dealer,
    Push,
}

impl BlackjackOutcome {
    pub fn label(self) -> &'static str {
        match self {
            BlackjackOutcome::Player => "Player",
            BlackjackOutcome::Dealer => "Dealer",
            BlackjackOutcome::Push => "Push",
        }
    }
}

/// Блэкджек один на один с домом.
///
/// Анте игрока и ответное анте дома формируют банк.
/// Жизненный цикл: `start_new_round` → `player_hit`* → `dealer_turn` → `determine_winner`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlackjackGame {
    pub deck: Deck,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub ante: Credits,
    pub bet_amount: Credits,
    pub pot: Credits,
    pub active_round: bool,
}

impl Default for BlackjackGame {
    fn default() -> Self {
        Self::new(Credits(10.0), Credits(10.0))
    }
}

impl BlackjackGame {
    pub fn new(ante: Credits, bet_amount: Credits) -> Self {
        assert!(ante.0 >= 0.0, "ante must be non-negative");
        Self {
            deck: Deck::standard_52(),
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            ante,
            bet_amount,
            pot: Credits::ZERO,
            active_round: false,
        }
    }

    /// Новая колода, перемешать, по две карты игроку и дилеру (игроку первому).
    pub fn start_new_round<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let mut deck = Deck::standard_52();
        rng.shuffle(&mut deck.cards);
        self.deck = deck;

        self.player_hand.clear_hand();
        self.dealer_hand.clear_hand();

        for _ in 0..2 {
            let card = self.draw()?;
            self.player_hand.add_card(card);
        }
        for _ in 0..2 {
            let card = self.draw()?;
            self.dealer_hand.add_card(card);
        }

        self.pot = Credits::ZERO;
        self.active_round = true;
        Ok(())
    }

    /// Выдать игроку одну карту и вернуть её.
    pub fn player_hit(&mut self) -> Result<Card, GameError> {
        let card = self.draw()?;
        self.player_hand.add_card(card);
        Ok(card)
    }

    pub fn is_busted(&self) -> bool {
        self.player_hand.is_busted_blackjack()
    }

    /// Дилер добирает до 17+. `true`, если дилер перебрал.
    pub fn dealer_turn(&mut self) -> Result<bool, GameError> {
        while self.dealer_hand.total_blackjack() < DEALER_STANDS_ON {
            let card = self.draw()?;
            self.dealer_hand.add_card(card);
        }
        Ok(self.dealer_hand.is_busted_blackjack())
    }

    pub fn determine_winner(&self) -> BlackjackOutcome {
        let p_total = self.player_hand.total_blackjack();
        let d_total = self.dealer_hand.total_blackjack();

        if self.player_hand.is_busted_blackjack() {
            return BlackjackOutcome::Dealer;
        }
        if self.dealer_hand.is_busted_blackjack() {
            return BlackjackOutcome::Player;
        }
        match p_total.cmp(&d_total) {
            std::cmp::Ordering::Greater => BlackjackOutcome::Player,
            std::cmp::Ordering::Less => BlackjackOutcome::Dealer,
            std::cmp::Ordering::Equal => BlackjackOutcome::Push,
        }
    }

    pub fn get_player_cards(&self) -> Vec<String> {
        self.player_hand.card_names()
    }

    /// Карты дилера; без `reveal_all` первая карта скрыта.
    pub fn get_dealer_cards(&self, reveal_all: bool) -> Vec<String> {
        if reveal_all || self.dealer_hand.is_empty() {
            return self.dealer_hand.card_names();
        }
        std::iter::once(HIDDEN_CARD.to_string())
            .chain(self.dealer_hand.cards[1..].iter().map(|c| c.to_string()))
            .collect()
    }

    pub fn get_player_total(&self) -> u32 {
        self.player_hand.total_blackjack()
    }

    pub fn get_dealer_total(&self) -> u32 {
        self.dealer_hand.total_blackjack()
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck.deal_card().ok_or(GameError::DeckExhausted)
    }
}
