//! Скачки: ставки, забег, табло, правило прошлого победителя.
//!
//! Без сценария перемешивания рейтинг равен порядку табуна,
//! поэтому первый забег выигрывает лошадь 1.

use casino_royale::api::Message;
use casino_royale::domain::{BandOfHorses, Credits, Horse, HorseNumber};
use casino_royale::games::horse_race::{figure_out_winner, DEFAULT_HORSE_BET};
use casino_royale::games::*;
use casino_royale::infra::ScriptedRng;
use casino_royale::ledger::BalanceManager;

fn texts(messages: &[Message]) -> Vec<&str> {
    messages.iter().filter_map(Message::text).collect()
}

fn order(band: &BandOfHorses) -> Vec<HorseNumber> {
    band.horses.iter().map(|h| h.number).collect()
}

#[test]
fn figure_out_winner_keeps_source_band() {
    let band = BandOfHorses::default();
    let mut rng = ScriptedRng::new().with_shuffle(vec![3, 1, 2, 0, 4]);

    let ranking = figure_out_winner(&band, &mut rng);

    assert_eq!(order(&ranking), vec![4, 2, 3, 1, 5]);
    assert_eq!(ranking.horses[0], Horse::new(4, true));
    assert_eq!(band, BandOfHorses::default());
}

#[test]
fn bet_defaults_and_validation() {
    let mut m = HorseBettingManager::default();
    assert_eq!(m.get_bet("alice"), DEFAULT_HORSE_BET);

    m.set_bet("alice", Credits(120.0)).unwrap();
    assert_eq!(m.get_bet("alice"), Credits(120.0));
    assert_eq!(m.get_bet("bob"), Credits(50.0));

    assert!(matches!(m.set_bet("alice", Credits(0.0)), Err(GameError::InvalidBet(_))));
    assert!(matches!(m.set_bet("alice", Credits(-5.0)), Err(GameError::InvalidBet(_))));
    assert!(matches!(
        m.set_bet("alice", Credits(f64::NAN)),
        Err(GameError::InvalidBet(_))
    ));
    assert_eq!(m.get_bet("alice"), Credits(120.0));
}

#[test]
fn choice_must_be_running() {
    let mut m = HorseBettingManager::default();
    assert_eq!(m.set_player_choice("alice", 9), Err(GameError::InvalidHorse(9)));
    assert_eq!(m.get_player_choice("alice"), None);

    m.set_player_choice("alice", 3).unwrap();
    assert_eq!(m.get_player_choice("alice"), Some(3));
}

#[test]
fn race_without_choice_fails() {
    let mut m = HorseBettingManager::default();
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();

    let err = m.process_bet(&mut ledger, &mut rng, "alice").unwrap_err();
    assert_eq!(err, GameError::NoHorseChosen);
}

/// Угаданный победитель платит ставку * 3.
#[test]
fn winning_bet_pays_triple() {
    let mut m = HorseBettingManager::default();
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();

    m.set_player_choice("alice", 1).unwrap();
    let msgs = m.process_bet(&mut ledger, &mut rng, "alice").unwrap();

    let t = texts(&msgs);
    assert_eq!(&t[..4], &["3", "2", "1", "GO!"]);
    assert!(t.contains(&"Well done! You've won $150.00!"));
    assert_eq!(ledger.get_balance("alice"), Credits(1150.0));
    assert!(msgs.iter().any(|m| m.sound_name() == Some("gunshot")));
    assert_eq!(msgs.last().and_then(Message::sound_name), Some("horse"));
}

#[test]
fn losing_bet_costs_stake() {
    let mut m = HorseBettingManager::default();
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();

    m.set_player_choice("alice", 2).unwrap();
    m.set_bet("alice", Credits(80.0)).unwrap();
    let msgs = m.process_bet(&mut ledger, &mut rng, "alice").unwrap();

    assert!(texts(&msgs).contains(&"You've lost $80.00... better luck next time!"));
    assert_eq!(ledger.get_balance("alice"), Credits(920.0));
}

/// После забега ставка возвращается к значению по умолчанию.
#[test]
fn bet_resets_after_race() {
    let mut m = HorseBettingManager::default();
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();

    m.set_player_choice("alice", 2).unwrap();
    m.set_bet("alice", Credits(200.0)).unwrap();
    m.process_bet(&mut ledger, &mut rng, "alice").unwrap();

    assert_eq!(m.get_bet("alice"), DEFAULT_HORSE_BET);
}

#[test]
fn race_without_funds_is_rejected() {
    let mut m = HorseBettingManager::default();
    let mut ledger = BalanceManager::with_starting_balance(Credits(10.0));
    let mut rng = ScriptedRng::new();

    m.set_player_choice("alice", 1).unwrap();
    let err = m.process_bet(&mut ledger, &mut rng, "alice").unwrap_err();

    assert!(matches!(err, GameError::InsufficientFunds { needed, .. } if needed == Credits(50.0)));
    assert_eq!(ledger.get_balance("alice"), Credits(10.0));
    // забег не состоялся
    assert_eq!(m.band(), &BandOfHorses::default());
}

/// Итоговый рейтинг сохраняется: прошлый победитель поднимается
/// на одну позицию и в следующем забеге.
#[test]
fn previous_winner_bias_carries_over() {
    let mut m = HorseBettingManager::default();
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new()
        .with_shuffle(vec![0, 1, 2, 3, 4])
        .with_shuffle(vec![1, 0, 2, 3, 4]);

    m.set_player_choice("alice", 1).unwrap();
    m.process_bet(&mut ledger, &mut rng, "alice").unwrap();
    assert_eq!(m.band().horses[0], Horse::new(1, true));

    // перемешивание ставит 2 первым, но 1 с флагом обгоняет её
    m.process_bet(&mut ledger, &mut rng, "alice").unwrap();
    assert_eq!(order(m.band()), vec![1, 2, 3, 4, 5]);
    assert_eq!(ledger.get_balance("alice"), Credits(1300.0));
}

#[test]
fn scoreboard_counts_wins() {
    let mut m = HorseBettingManager::default();
    let id = m.register_scoreboard_observer(Box::new(SignScoreboardObserver::new(
        "Horse Scoreboard",
        5,
    )));
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();

    assert_eq!(m.scoreboard_text(id), None);
    assert!(m.show_result_sign(id, "bob").is_none());

    m.set_player_choice("alice", 3).unwrap();
    let msgs = m.process_bet(&mut ledger, &mut rng, "alice").unwrap();

    let expected = "Horse Scoreboard:\nHorse 1: 1 wins Horse 2: 0 wins\nHorse 3: 0 wins Horse 4: 0 wins\nHorse 5: 0 wins";
    assert_eq!(m.scoreboard_text(id).as_deref(), Some(expected));
    assert_eq!(texts(&msgs).last().copied(), Some(expected));
    assert!(msgs.iter().all(|msg| msg.recipient() == "alice"));

    // табличку видит и тот, кто не ставил
    let sign = m.show_result_sign(id, "bob").unwrap();
    assert_eq!(texts(&sign), vec![expected]);
    assert_eq!(sign[0].recipient(), "bob");

    assert!(m.unregister_scoreboard_observer(id));
    assert_eq!(m.scoreboard_observer_count(), 0);
}

#[test]
fn sign_shows_nothing_before_first_race() {
    let mut sign = SignScoreboardObserver::new("Horse Scoreboard", 3);
    assert!(sign.show_result_sign("alice").is_none());
    assert_eq!(sign.wins(2), Some(0));

    sign.update_scoreboard("alice", 2);
    assert_eq!(sign.wins(2), Some(1));
    // неизвестная лошадь не ломает табло
    sign.update_scoreboard("alice", 9);
    assert_eq!(sign.wins(9), None);
    assert!(sign.show_result_sign("bob").is_some());
}
