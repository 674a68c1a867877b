use serde::{Deserialize, Serialize};

use crate::domain::{Card, Rank};
use crate::games::RandomSource;

/// Уровень ИИ за покерным столом (для конфига).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub fn strategy(self) -> Box<dyn PokerStrategy> {
        match self {
            Difficulty::Easy => Box::new(EasyPokerStrategy),
            Difficulty::Medium => Box::new(MediumPokerStrategy),
            Difficulty::Hard => Box::new(HardPokerStrategy::new()),
        }
    }

    /// Картинка стола под уровень.
    pub fn table_image(self) -> &'static str {
        match self {
            Difficulty::Easy => "casino_easy",
            Difficulty::Medium => "casino_medium",
            Difficulty::Hard => "casino_hard",
        }
    }
}

/// Стратегия ИИ в one-card poker: коллировать или сбросить.
///
/// Экземпляр стратегии один на стол, поэтому счётчики ставок/фолдов
/// копятся по всем игрокам за этим столом.
pub trait PokerStrategy {
    /// `true` - ИИ коллирует, `false` - сбрасывает.
    /// Без карты у ИИ - всегда фолд.
    fn decide_call_or_fold(&self, ai_card: Option<Card>, rng: &mut dyn RandomSource) -> bool;

    fn record_player_bet(&mut self) {}

    fn record_player_fold(&mut self) {}

    fn name(&self) -> &'static str;
}

/// Лёгкий ИИ: туз - всегда колл, иначе колл в 10% случаев.
#[derive(Clone, Debug, Default)]
pub struct EasyPokerStrategy;

impl PokerStrategy for EasyPokerStrategy {
    fn decide_call_or_fold(&self, ai_card: Option<Card>, rng: &mut dyn RandomSource) -> bool {
        match ai_card {
            None => false,
            Some(c) if c.rank == Rank::Ace => true,
            Some(_) => rng.next_unit() < 0.1,
        }
    }

    fn name(&self) -> &'static str {
        "easy"
    }
}

/// Средний ИИ: туз 100%, король 70%, дама 25%.
#[derive(Clone, Debug, Default)]
pub struct MediumPokerStrategy;

impl PokerStrategy for MediumPokerStrategy {
    fn decide_call_or_fold(&self, ai_card: Option<Card>, rng: &mut dyn RandomSource) -> bool {
        let Some(card) = ai_card else {
            return false;
        };
        match card.rank {
            Rank::Ace => true,
            Rank::King => rng.next_unit() < 0.7,
            _ => rng.next_unit() < 0.25,
        }
    }

    fn name(&self) -> &'static str {
        "medium"
    }
}

/// Сложный ИИ: строит профиль игрока по частоте ставок.
///
/// - нет данных → считаем частоту ставок 50%;
/// - частота > 40% (агрессивный игрок) → колл только с тузом;
/// - иначе → колл с королём или тузом.
#[derive(Clone, Debug, Default)]
pub struct HardPokerStrategy {
    pub num_bets: u32,
    pub num_folds: u32,
}

impl HardPokerStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_bet_frequency(&self) -> f64 {
        let total = self.num_bets + self.num_folds;
        if total == 0 {
            0.5
        } else {
            f64::from(self.num_bets) / f64::from(total)
        }
    }
}

impl PokerStrategy for HardPokerStrategy {
    fn decide_call_or_fold(&self, ai_card: Option<Card>, _rng: &mut dyn RandomSource) -> bool {
        let Some(card) = ai_card else {
            return false;
        };
        if self.player_bet_frequency() > 0.4 {
            card.rank == Rank::Ace
        } else {
            card.rank >= Rank::King
        }
    }

    fn record_player_bet(&mut self) {
        self.num_bets += 1;
    }

    fn record_player_fold(&mut self) {
        self.num_folds += 1;
    }

    fn name(&self) -> &'static str {
        "hard"
    }
}
