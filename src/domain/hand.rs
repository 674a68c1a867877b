use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

/// Порог блэкджека.
pub const BLACKJACK: u32 = 21;

/// Карты на руках у игрока/дилера.
/// Используется и в блэкджеке (несколько карт), и в one-card poker (одна карта).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear_hand(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Оптимальная сумма для блэкджека:
    /// - картинки = 10, туз сначала считается за 1;
    /// - затем каждый туз жадно повышается до 11, пока сумма <= 21.
    pub fn total_blackjack(&self) -> u32 {
        let mut total: u32 = 0;
        let mut aces = 0;

        for card in &self.cards {
            if card.rank == Rank::Ace {
                aces += 1;
                total += 1;
            } else {
                total += u32::from(card.base_value()).min(10);
            }
        }

        for _ in 0..aces {
            if total + 10 <= BLACKJACK {
                total += 10;
            }
        }

        total
    }

    pub fn is_busted_blackjack(&self) -> bool {
        self.total_blackjack() > BLACKJACK
    }

    /// Длинные имена карт по порядку.
    pub fn card_names(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.to_string()).collect()
    }
}

impl fmt::Display for Hand {
    /// Список карт через запятую.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.card_names().join(", "))
    }
}
