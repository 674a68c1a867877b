use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::api::messages::Message;
use crate::domain::{Credits, PlayerName, DEFAULT_PLAYER};

/// Стартовый баланс нового игрока.
pub const DEFAULT_STARTING_BALANCE: Credits = Credits(1000.0);

/// Причина изменения баланса. Наблюдатели по ней выбирают текст/звук.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BalanceChangeReason {
    Win,
    Lose,
    Jackpot,
    Drink,
    Cost,
    Bet,
    Tie,
}

/// Наблюдатель за изменениями баланса.
///
/// Вызывается синхронно после каждого изменения и возвращает сообщения,
/// которые уйдут игроку.
pub trait BalanceObserver {
    /// - `new_balance` - баланс после изменения;
    /// - `change` - знаковое изменение (>= 0 выигрыш, <= 0 трата/проигрыш);
    /// - `reason` - причина.
    fn update_balance(
        &mut self,
        new_balance: Credits,
        change: Credits,
        reason: BalanceChangeReason,
    ) -> Vec<Message>;
}

/// Хэндл зарегистрированного наблюдателя (для снятия с регистрации).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Кошелёк всех игроков + рассылка уведомлений наблюдателям.
///
/// Наблюдатели регистрируются на время одного взаимодействия и снимаются
/// после него. Если забыть снять - следующие изменения будут уведомлять
/// их повторно (сообщения задвоятся). Для безопасного варианта есть
/// [`BalanceManager::with_observers`].
pub struct BalanceManager {
    balances: HashMap<PlayerName, Credits>,
    observers: Vec<(ObserverId, Box<dyn BalanceObserver>)>,
    next_observer_id: u64,
    starting_balance: Credits,
}

impl Default for BalanceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceManager {
    pub fn new() -> Self {
        Self::with_starting_balance(DEFAULT_STARTING_BALANCE)
    }

    pub fn with_starting_balance(starting_balance: Credits) -> Self {
        Self {
            balances: HashMap::new(),
            observers: Vec::new(),
            next_observer_id: 1,
            starting_balance,
        }
    }

    pub fn starting_balance(&self) -> Credits {
        self.starting_balance
    }

    /// Зарегистрировать наблюдателя. Уведомления идут в порядке регистрации.
    pub fn register_observer(&mut self, observer: Box<dyn BalanceObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Снять наблюдателя. `false`, если такого уже нет.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Зарегистрировать наблюдателей на время `f` и гарантированно снять их после.
    ///
    /// Наблюдатели снимаются и при панике внутри `f` (например, отрицательная
    /// сумма), после чего паника пробрасывается дальше.
    pub fn with_observers<T>(
        &mut self,
        observers: Vec<Box<dyn BalanceObserver>>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let ids: Vec<ObserverId> = observers
            .into_iter()
            .map(|o| self.register_observer(o))
            .collect();

        let out = panic::catch_unwind(AssertUnwindSafe(|| f(&mut *self)));

        for id in ids {
            self.unregister_observer(id);
        }
        match out {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Текущий баланс игрока. Первый доступ создаёт стартовый баланс.
    pub fn get_balance(&mut self, player: &str) -> Credits {
        *self.entry(player)
    }

    /// Баланс без создания записи (для read-only запросов).
    pub fn peek_balance(&self, player: &str) -> Option<Credits> {
        self.balances.get(key(player)).copied()
    }

    /// Жёстко выставить баланс. Наблюдатели НЕ уведомляются
    /// (администрирование, тесты).
    pub fn set_balance(&mut self, player: &str, amount: Credits) {
        self.balances.insert(key(player).to_string(), amount);
    }

    /// Увеличить баланс и уведомить наблюдателей.
    ///
    /// # Panics
    /// Если `amount` отрицательный.
    pub fn increase_balance(
        &mut self,
        amount: Credits,
        reason: BalanceChangeReason,
        player: &str,
    ) -> Vec<Message> {
        assert!(amount.0 >= 0.0, "Amount to increase must be non-negative.");
        *self.entry(player) += amount;
        log::debug!("balance +{} ({:?}) for {}", amount, reason, key(player));
        self.notify_observers(amount, reason, player)
    }

    /// Уменьшить баланс и уведомить наблюдателей.
    /// Овердрафт не проверяется - баланс может уйти в минус.
    ///
    /// # Panics
    /// Если `amount` отрицательный.
    pub fn decrease_balance(
        &mut self,
        amount: Credits,
        reason: BalanceChangeReason,
        player: &str,
    ) -> Vec<Message> {
        assert!(amount.0 >= 0.0, "Amount to decrease must be non-negative.");
        *self.entry(player) -= amount;
        log::debug!("balance -{} ({:?}) for {}", amount, reason, key(player));
        self.notify_observers(-amount, reason, player)
    }

    /// Разослать изменение всем наблюдателям, склеив их сообщения.
    pub fn notify_observers(
        &mut self,
        change: Credits,
        reason: BalanceChangeReason,
        player: &str,
    ) -> Vec<Message> {
        let new_balance = self.get_balance(player);
        let mut messages = Vec::new();
        for (_, observer) in self.observers.iter_mut() {
            messages.extend(observer.update_balance(new_balance, change, reason));
        }
        messages
    }

    fn entry(&mut self, player: &str) -> &mut Credits {
        let starting = self.starting_balance;
        self.balances
            .entry(key(player).to_string())
            .or_insert(starting)
    }
}

/// Пустое имя = "default".
fn key(player: &str) -> &str {
    if player.is_empty() {
        DEFAULT_PLAYER
    } else {
        player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Vec<(f64, f64)>);

    impl BalanceObserver for Recorder {
        fn update_balance(
            &mut self,
            new_balance: Credits,
            change: Credits,
            _reason: BalanceChangeReason,
        ) -> Vec<Message> {
            self.0.push((new_balance.0, change.0));
            vec![Message::server("p", format!("{}", change.0))]
        }
    }

    #[test]
    fn empty_name_maps_to_default_key() {
        let mut bm = BalanceManager::new();
        bm.decrease_balance(Credits(10.0), BalanceChangeReason::Cost, "");
        assert_eq!(bm.peek_balance(DEFAULT_PLAYER), Some(Credits(990.0)));
    }

    #[test]
    fn with_observers_always_unregisters() {
        let mut bm = BalanceManager::new();
        let msgs = bm.with_observers(vec![Box::new(Recorder(Vec::new()))], |bm| {
            bm.increase_balance(Credits(5.0), BalanceChangeReason::Win, "p")
        });
        assert_eq!(msgs.len(), 1);
        assert_eq!(bm.observer_count(), 0);
    }
}
