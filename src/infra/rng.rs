use std::collections::VecDeque;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::games::RandomSource;

/// Общая часть для реализаций поверх `rand`.
fn weighted_pick<G: RngCore>(rng: &mut G, weights: &[f64]) -> usize {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        // Пустые/битые веса: берём первый вариант.
        Err(_) => 0,
    }
}

/// Системный RNG (thread_rng) для живой игры.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn next_below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }

    fn pick_weighted(&mut self, weights: &[f64]) -> usize {
        weighted_pick(&mut rand::thread_rng(), weights)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же партии при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.inner.gen_range(0..upper)
    }

    fn pick_weighted(&mut self, weights: &[f64]) -> usize {
        weighted_pick(&mut self.inner, weights)
    }
}

/// "Сценарный" RNG: отдаёт заранее заданные значения по очереди.
///
/// - `shuffle` не трогает порядок (колода остаётся как собрана);
/// - `next_unit` / `next_below` / `pick_weighted` берут значения из своих очередей,
///   а когда очередь пуста - возвращают 0.
///
/// Нужен, чтобы в тестах и реплеях разыгрывать конкретный расклад.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
    shuffles: VecDeque<Vec<usize>>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Значения для `next_unit` (броски "монетки" стратегий).
    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    /// Значения для `next_below` и `pick_weighted` (общая очередь индексов).
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Перестановка для следующего `shuffle`: `order[i]` - какой исходный
    /// элемент окажется на позиции `i`. Неподходящая по длине перестановка
    /// игнорируется.
    pub fn with_shuffle(mut self, order: Vec<usize>) -> Self {
        self.shuffles.push_back(order);
        self
    }
}

impl RandomSource for ScriptedRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        let Some(order) = self.shuffles.pop_front() else {
            return;
        };
        if order.len() != slice.len() {
            return;
        }
        let mut seen = vec![false; order.len()];
        if order.iter().any(|&i| i >= seen.len() || std::mem::replace(&mut seen[i], true)) {
            return;
        }

        // Применяем перестановку через циклы, без Clone для T.
        let mut placed = vec![false; order.len()];
        for start in 0..order.len() {
            if placed[start] {
                continue;
            }
            let mut pos = start;
            loop {
                placed[pos] = true;
                let src = order[pos];
                if src == start {
                    break;
                }
                slice.swap(pos, src);
                // после swap на позиции src лежит то, что было на pos;
                // дальше работаем с позицией src
                pos = src;
            }
        }
    }

    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }

    fn next_below(&mut self, upper: usize) -> usize {
        let idx = self.indices.pop_front().unwrap_or(0);
        if upper == 0 {
            0
        } else {
            idx.min(upper - 1)
        }
    }

    fn pick_weighted(&mut self, weights: &[f64]) -> usize {
        let idx = self.indices.pop_front().unwrap_or(0);
        idx.min(weights.len().saturating_sub(1))
    }
}
