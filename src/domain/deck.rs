use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт. В домене - просто упорядоченный список карт,
/// верх колоды = конец вектора.
/// Перемешивание делает игра (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Колода из произвольного набора карт (порядок сохраняется).
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Deck {
            cards: cards.into_iter().collect(),
        }
    }

    /// Урезанная колода для one-card poker: Q♠, K♠, A♠.
    pub fn one_card_poker() -> Self {
        Deck::from_cards([
            Card::new(Rank::Queen, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::Ace, Suit::Spades),
        ])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}
