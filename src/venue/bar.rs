use serde::{Deserialize, Serialize};

use crate::api::errors::game_error_message;
use crate::api::messages::{Coord, Message, Speaker};
use crate::domain::Credits;
use crate::games::GameError;
use crate::ledger::{interaction_observers, BalanceChangeReason, BalanceManager};

pub const BAR_MENU: &str = "Bar Menu";

/// Напиток в меню бара.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Drink {
    pub name: String,
    pub price: Credits,
}

impl Drink {
    pub fn new(name: impl Into<String>, price: Credits) -> Self {
        assert!(price.0 >= 0.0, "Price must be positive");
        Self {
            name: name.into(),
            price,
        }
    }

    /// Пункт меню: "coke - $5.00".
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.price)
    }
}

pub fn default_drinks() -> Vec<Drink> {
    vec![
        Drink::new("coke", Credits(5.0)),
        Drink::new("vodka coke", Credits(17.0)),
        Drink::new("vodka", Credits(12.0)),
    ]
}

/// Барная стойка и бармен.
pub struct Bar {
    counter: Speaker,
    bartender: Speaker,
    greeting: String,
    drinks: Vec<Drink>,
}

impl Default for Bar {
    fn default() -> Self {
        Self::new(default_drinks())
    }
}

impl Bar {
    pub fn new(drinks: Vec<Drink>) -> Self {
        Self {
            counter: Speaker::new("Bar", "counter3"),
            bartender: Speaker::new("Bartender", "prof"),
            greeting: "Welcome to the bar! What can I get you?".to_string(),
            drinks,
        }
    }

    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    pub fn greet(&self, player: &str) -> Vec<Message> {
        vec![Message::dialogue(&self.bartender, player, self.greeting.clone())]
    }

    pub fn menu(&self, player: &str) -> Message {
        let labels: Vec<String> = self.drinks.iter().map(Drink::label).collect();
        let options: Vec<&str> = labels.iter().map(String::as_str).collect();
        Message::menu(&self.counter, player, BAR_MENU, &options)
    }

    /// Ищем напиток по пункту меню или просто по названию.
    pub fn find_drink(&self, selection: &str) -> Option<&Drink> {
        let selection = selection.trim();
        self.drinks
            .iter()
            .find(|d| d.label() == selection || d.name.eq_ignore_ascii_case(selection))
    }

    /// Купить напиток. Овердрафт не проверяется: бар наливает всем.
    pub fn order(&self, ledger: &mut BalanceManager, player: &str, selection: &str) -> Vec<Message> {
        let Some(drink) = self.find_drink(selection) else {
            let err = GameError::InvalidSelection(selection.to_string());
            return vec![game_error_message(&self.bartender, player, &err)];
        };

        let sender = Speaker::new(player, "player2");
        let observer_msgs = ledger.with_observers(interaction_observers(&sender, player), |ledger| {
            ledger.decrease_balance(drink.price, BalanceChangeReason::Drink, player)
        });
        log::info!("bar: {} ordered {}", player, drink.name);

        let mut messages = vec![Message::emote(player, "yellow_drink", Coord::new(8, 5))];
        messages.extend(observer_msgs);
        messages
    }
}
