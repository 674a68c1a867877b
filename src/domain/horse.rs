use serde::{Deserialize, Serialize};

/// Номер лошади на табло (1..=N).
pub type HorseNumber = u32;

/// Одна лошадь: номер + флаг "выиграла прошлый забег".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Horse {
    pub number: HorseNumber,
    pub victorious: bool,
}

impl Horse {
    pub const fn new(number: HorseNumber, victorious: bool) -> Self {
        Self { number, victorious }
    }
}

/// Группа лошадей одного забега. Порядок в векторе = место в рейтинге
/// (после забега первый элемент - победитель).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandOfHorses {
    pub horses: Vec<Horse>,
}

impl Default for BandOfHorses {
    /// Пять лошадей, ни одна ещё не выигрывала.
    fn default() -> Self {
        Self::with_count(5)
    }
}

impl BandOfHorses {
    pub fn new(horses: Vec<Horse>) -> Self {
        Self { horses }
    }

    /// Лошади 1..=count без побед.
    pub fn with_count(count: u32) -> Self {
        Self {
            horses: (1..=count).map(|n| Horse::new(n, false)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.horses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horses.is_empty()
    }

    pub fn contains(&self, number: HorseNumber) -> bool {
        self.horses.iter().any(|h| h.number == number)
    }

    pub fn is_first(&self, number: HorseNumber) -> bool {
        self.horses.first().map(|h| h.number) == Some(number)
    }

    pub fn winner(&self) -> Option<&Horse> {
        self.horses.first()
    }

    /// Правило "прошлый победитель продвигается на одну позицию":
    /// первый найденный прошлый победитель, который не стоит первым,
    /// меняется местами с соседом сверху и теряет флаг.
    /// После этого флаг победы получает новый лидер.
    ///
    /// Вызывается на уже перемешанном рейтинге.
    pub fn apply_previous_winner_bias(&mut self) {
        let promoted = self
            .horses
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, h)| h.victorious)
            .map(|(idx, _)| idx);

        if let Some(idx) = promoted {
            self.horses[idx].victorious = false;
            self.horses.swap(idx, idx - 1);
        }

        if let Some(first) = self.horses.first_mut() {
            first.victorious = true;
        }
    }
}
