use core::fmt;

use serde::{Deserialize, Serialize};

use crate::api::messages::{Message, Speaker};
use crate::domain::Credits;
use crate::games::RandomSource;
use crate::ledger::{interaction_observers, BalanceChangeReason, BalanceManager};

/// Символ на барабане.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    Heart,
    Tongue,
    Sparkle,
    Diamond,
    Seven,
}

impl Symbol {
    pub const ALL: [Symbol; 5] = [
        Symbol::Heart,
        Symbol::Tongue,
        Symbol::Sparkle,
        Symbol::Diamond,
        Symbol::Seven,
    ];

    /// Веса выпадения (в том же порядке, что `ALL`).
    pub const DEFAULT_WEIGHTS: [f64; 5] = [0.7, 0.125, 0.125, 0.025, 0.025];

    pub fn face(self) -> &'static str {
        match self {
            Symbol::Heart => "(  <3  )",
            Symbol::Tongue => "(  :p  )",
            Symbol::Sparkle => "( ~*~ )",
            Symbol::Diamond => "(  <>  )",
            Symbol::Seven => "(  7  )",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.face())
    }
}

/// Результат трёх барабанов.
pub type Reels = [Symbol; 3];

pub const JACKPOT_REELS: Reels = [Symbol::Seven, Symbol::Seven, Symbol::Seven];

pub const NO_WIN_TEXT: &str = "No win, better luck next time.";
pub const JACKPOT_TEXT: &str = "JACKPOT HIT!!";
pub const WELCOME_TEXT: &str = "Welcome to the Slot Machine!";

/// Выплата за спин: сумма (>= 0) и текст исхода.
#[derive(Clone, Debug, PartialEq)]
pub struct Payout {
    pub amount: Credits,
    pub text: String,
    pub jackpot: bool,
}

impl Payout {
    pub fn none() -> Self {
        Self {
            amount: Credits::ZERO,
            text: NO_WIN_TEXT.to_string(),
            jackpot: false,
        }
    }

    pub fn is_win(&self) -> bool {
        self.amount.0 > 0.0
    }
}

/// Стратегия расчёта выплаты.
pub trait SlotMachineStrategy {
    /// `spin_cost` >= 0; возвращаемая сумма всегда >= 0.
    fn calculate_payout(
        &self,
        spin_cost: Credits,
        reels: &Reels,
        rng: &mut dyn RandomSource,
    ) -> Payout;
}

/// Обычный выигрыш: три одинаковых символа → `spin_cost * 10 * x`,
/// где множитель x крутится на "колесе" из {1, 2, 3}.
#[derive(Clone, Debug)]
pub struct StandardStrategyWithWheel {
    pub base_multiplier: f64,
    pub wheel: Vec<u32>,
}

impl Default for StandardStrategyWithWheel {
    fn default() -> Self {
        Self {
            base_multiplier: 10.0,
            wheel: vec![1, 2, 3],
        }
    }
}

impl SlotMachineStrategy for StandardStrategyWithWheel {
    fn calculate_payout(
        &self,
        spin_cost: Credits,
        reels: &Reels,
        rng: &mut dyn RandomSource,
    ) -> Payout {
        assert!(spin_cost.0 >= 0.0, "Spin cost must be non-negative.");
        if !(reels[0] == reels[1] && reels[1] == reels[2]) || self.wheel.is_empty() {
            return Payout::none();
        }

        let multiplier = self.wheel[rng.next_below(self.wheel.len())];
        let amount = spin_cost * self.base_multiplier * f64::from(multiplier);

        let stops: Vec<String> = self.wheel.iter().map(|m| format!("x{m}")).collect();
        let text = format!(
            "Spinning the multiplier wheel...\nWheel in motion: {} ...\nIt lands on x{multiplier}! YOU WIN!!",
            stops.join(" ... ")
        );

        Payout {
            amount,
            text,
            jackpot: false,
        }
    }
}

/// Джекпот: три семёрки → `spin_cost * 10 * 7`.
#[derive(Clone, Debug)]
pub struct JackpotStrategy {
    pub multiplier: f64,
}

impl Default for JackpotStrategy {
    fn default() -> Self {
        Self { multiplier: 70.0 }
    }
}

impl SlotMachineStrategy for JackpotStrategy {
    fn calculate_payout(
        &self,
        spin_cost: Credits,
        reels: &Reels,
        _rng: &mut dyn RandomSource,
    ) -> Payout {
        assert!(spin_cost.0 >= 0.0, "Spin cost must be non-negative.");
        if *reels != JACKPOT_REELS {
            return Payout::none();
        }
        Payout {
            amount: spin_cost * self.multiplier,
            text: JACKPOT_TEXT.to_string(),
            jackpot: true,
        }
    }
}

/// Слот-машина зала. Стратегия выбирается по исходу каждого спина.
pub struct SlotMachine {
    pub spin_cost: Credits,
    pub weights: Vec<f64>,
    speaker: Speaker,
    standard: StandardStrategyWithWheel,
    jackpot: JackpotStrategy,
}

impl Default for SlotMachine {
    fn default() -> Self {
        Self::new(Credits(10.0))
    }
}

impl SlotMachine {
    pub fn new(spin_cost: Credits) -> Self {
        assert!(spin_cost.0 >= 0.0, "Spin cost must be non-negative.");
        Self {
            spin_cost,
            weights: Symbol::DEFAULT_WEIGHTS.to_vec(),
            speaker: Speaker::new("Slot Machine", "slot_machine3"),
            standard: StandardStrategyWithWheel::default(),
            jackpot: JackpotStrategy::default(),
        }
    }

    pub fn with_strategies(
        mut self,
        standard: StandardStrategyWithWheel,
        jackpot: JackpotStrategy,
    ) -> Self {
        self.standard = standard;
        self.jackpot = jackpot;
        self
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = weights;
        self
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    /// Крутим три барабана с весами.
    pub fn spin_reels<R: RandomSource>(&self, rng: &mut R) -> Reels {
        let mut pick = || {
            let idx = rng.pick_weighted(&self.weights);
            Symbol::ALL[idx.min(Symbol::ALL.len() - 1)]
        };
        [pick(), pick(), pick()]
    }

    /// Стратегия под конкретный исход: джекпот для трёх семёрок, иначе стандартная.
    pub fn strategy_for(&self, reels: &Reels) -> &dyn SlotMachineStrategy {
        if *reels == JACKPOT_REELS {
            &self.jackpot
        } else {
            &self.standard
        }
    }

    /// Один спин для игрока. Деньги двигаются через `ledger`,
    /// сообщения наблюдателей (звук + реплика автомата) вклеиваются по ходу.
    ///
    /// Возвращает `(успешен ли спин, сообщения)`.
    pub fn play_spin<R: RandomSource>(
        &self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> (bool, Vec<Message>) {
        let observers = interaction_observers(&self.speaker, player);
        let (ok, spin) =
            ledger.with_observers(observers, |ledger| self.spin_once(ledger, rng, player));

        let mut messages = vec![Message::dialogue(&self.speaker, player, WELCOME_TEXT)];
        messages.extend(spin);
        (ok, messages)
    }

    fn spin_once<R: RandomSource>(
        &self,
        ledger: &mut BalanceManager,
        rng: &mut R,
        player: &str,
    ) -> (bool, Vec<Message>) {
        let mut messages = Vec::new();
        let speaker = &self.speaker;

        let balance = ledger.get_balance(player);
        messages.push(Message::dialogue(speaker, player, format!("Starting balance: {balance}")));

        if balance < self.spin_cost {
            messages.push(Message::server(player, "Insufficient funds to spin!"));
            return (false, messages);
        }

        messages.extend(ledger.decrease_balance(self.spin_cost, BalanceChangeReason::Cost, player));

        messages.push(Message::sound(player, "playing"));
        messages.push(Message::dialogue(speaker, player, "PLAY: (  X  )   (  X  )   (  X  )"));

        let reels = self.spin_reels(rng);
        let faces: Vec<&str> = reels.iter().map(|s| s.face()).collect();
        messages.push(Message::dialogue(speaker, player, format!("Reels: {}", faces.join("  "))));

        let payout = self.strategy_for(&reels).calculate_payout(self.spin_cost, &reels, rng);
        log::info!("slots: {} spun {:?} -> {}", player, reels, payout.amount);

        if payout.is_win() {
            let observer_msgs = if payout.jackpot {
                ledger.increase_balance(payout.amount, BalanceChangeReason::Jackpot, player)
            } else {
                messages.push(Message::sound(player, "wheel"));
                ledger.increase_balance(payout.amount, BalanceChangeReason::Win, player)
            };
            messages.push(Message::dialogue(speaker, player, payout.text));
            messages.extend(observer_msgs);
        } else {
            let observer_msgs = ledger.decrease_balance(Credits::ZERO, BalanceChangeReason::Lose, player);
            messages.push(Message::dialogue(speaker, player, payout.text));
            messages.extend(observer_msgs);
        }

        let balance = ledger.get_balance(player);
        messages.push(Message::server(player, format!("Current balance: {balance}")));
        messages.push(Message::server(player, "Game over!"));
        (true, messages)
    }
}
