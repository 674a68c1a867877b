use crate::api::messages::{Message, Speaker};
use crate::domain::{Credits, PlayerName};
use crate::ledger::manager::{BalanceChangeReason, BalanceObserver};

/// Наблюдатель, который описывает изменение баланса репликой в диалоге.
pub struct BalanceEffectObserver {
    sender: Speaker,
    player: PlayerName,
}

impl BalanceEffectObserver {
    /// `sender` - кто "говорит" (стол, автомат, сам игрок).
    pub fn new(sender: Speaker, player: impl Into<PlayerName>) -> Self {
        Self {
            sender,
            player: player.into(),
        }
    }

    fn say(&self, text: String) -> Vec<Message> {
        vec![Message::dialogue(&self.sender, &self.player, text)]
    }
}

impl BalanceObserver for BalanceEffectObserver {
    fn update_balance(
        &mut self,
        new_balance: Credits,
        change: Credits,
        reason: BalanceChangeReason,
    ) -> Vec<Message> {
        if change.0 > 0.0 {
            return match reason {
                BalanceChangeReason::Tie => self.say(format!(
                    "It's a push! {change} returned, your new balance is {new_balance}"
                )),
                _ => self.say(format!(
                    "After winning {change}, your new balance is {new_balance}"
                )),
            };
        }

        // Показываем не отрицательное изменение, а сколько потрачено/проиграно.
        let spent = change.abs();
        match reason {
            BalanceChangeReason::Drink => self.say(format!(
                "Enjoy your drink! It will cost you {spent}, your new balance is {new_balance}"
            )),
            BalanceChangeReason::Cost => self.say(format!(
                "This game cost {spent}, your new balance is {new_balance}"
            )),
            BalanceChangeReason::Bet => self.say(format!("You bet {spent}")),
            BalanceChangeReason::Lose => self.say(format!(
                "After losing {spent}, your new balance is {new_balance}"
            )),
            _ => Vec::new(),
        }
    }
}

/// Наблюдатель, который на каждое изменение баланса отдаёт звук.
pub struct SoundEffectObserver {
    player: PlayerName,
}

impl SoundEffectObserver {
    pub fn new(player: impl Into<PlayerName>) -> Self {
        Self {
            player: player.into(),
        }
    }
}

impl BalanceObserver for SoundEffectObserver {
    fn update_balance(
        &mut self,
        _new_balance: Credits,
        change: Credits,
        reason: BalanceChangeReason,
    ) -> Vec<Message> {
        let sound = if change.0 > 0.0 {
            match reason {
                BalanceChangeReason::Jackpot => Some("jackpot"),
                BalanceChangeReason::Tie => Some("tie"),
                _ => Some("win"),
            }
        } else {
            match reason {
                BalanceChangeReason::Drink => Some("slurp"),
                BalanceChangeReason::Cost | BalanceChangeReason::Bet => Some("cost"),
                BalanceChangeReason::Lose => Some("lose"),
                BalanceChangeReason::Tie => Some("tie"),
                _ => None,
            }
        };

        sound
            .map(|s| vec![Message::sound(&self.player, s)])
            .unwrap_or_default()
    }
}

/// Стандартная пара наблюдателей на одно взаимодействие: звук + реплика.
pub fn interaction_observers(sender: &Speaker, player: &str) -> Vec<Box<dyn BalanceObserver>> {
    vec![
        Box::new(SoundEffectObserver::new(player)),
        Box::new(BalanceEffectObserver::new(sender.clone(), player)),
    ]
}
