//! Фасад казино: чат-команды, конфиг, маршрутизация действий.

use casino_royale::api::{BetMenuChoice, BlackjackAction, Message, PokerAction};
use casino_royale::casino::{BLACKJACK_TABLE_ID, FIRST_POKER_TABLE_ID};
use casino_royale::domain::Credits;
use casino_royale::games::Difficulty;
use casino_royale::infra::ScriptedRng;
use casino_royale::{Casino, CasinoConfig, ConfigError};

fn texts(messages: &[Message]) -> Vec<&str> {
    messages.iter().filter_map(Message::text).collect()
}

fn casino() -> Casino<ScriptedRng> {
    Casino::new(CasinoConfig::default(), ScriptedRng::new()).unwrap()
}

// ---------- чат ----------

#[test]
fn chat_balance() {
    let mut c = casino();
    let reply = c.handle_chat("alice", "/balance").unwrap();
    assert_eq!(texts(&reply.messages), vec!["Your current balance is $1000.00"]);
    assert_eq!(reply.teleport_to, None);
}

#[test]
fn chat_ignores_foreign_text() {
    let mut c = casino();
    assert!(c.handle_chat("alice", "hello everyone").is_none());
    assert!(c.handle_chat("alice", "age/abc").is_none());
}

#[test]
fn chat_age_without_question() {
    let mut c = casino();
    let reply = c.handle_chat("alice", "age/21").unwrap();
    assert_eq!(
        texts(&reply.messages),
        vec!["No one is asking for your age right now."]
    );
}

/// Полный разговор с вышибалой через фасад.
#[test]
fn bouncer_conversation_via_chat() {
    let mut c = casino();
    for _ in 0..4 {
        c.bouncer_interact("alice");
    }
    assert!(c.bouncer().is_waiting_for("alice"));

    let reply = c.handle_chat("alice", "/age/12").unwrap();
    assert_eq!(reply.teleport_to.as_deref(), Some("Trottier Town"));

    // второй раз уже никто не спрашивает
    let again = c.handle_chat("alice", "age/12").unwrap();
    assert_eq!(again.teleport_to, None);
}

#[test]
fn bet_horse_requires_bookmaker() {
    let mut c = casino();
    let reply = c.handle_chat("alice", "bet_horse/100").unwrap();
    assert_eq!(texts(&reply.messages), vec!["No one is asking for you to bet"]);
}

#[test]
fn horse_betting_flow() {
    let mut c = casino();
    for _ in 0..3 {
        c.bookmaker_interact("alice");
    }
    c.bookmaker_menu("alice", BetMenuChoice::Yes);

    let bad = c.handle_chat("alice", "bet_horse/abc").unwrap();
    assert_eq!(
        texts(&bad.messages),
        vec!["Invalid bet amount 'abc'. Usage: /bet_horse/<amount>"]
    );

    let ok = c.handle_chat("alice", "bet_horse/100").unwrap();
    assert_eq!(texts(&ok.messages), vec!["Your bet is set to $100.00."]);

    let msgs = c.choose_horse("alice", "Horse 1");
    assert!(texts(&msgs).contains(&"Well done! You've won $300.00!"));
    assert_eq!(c.ledger_mut().get_balance("alice"), Credits(1300.0));
    assert!(c
        .scoreboard_text()
        .is_some_and(|t| t.contains("Horse 1: 1 wins")));
}

/// Табличка у ипподрома: до забегов - заглушка, после - табло.
#[test]
fn scoreboard_sign_before_and_after_race() {
    let mut c = casino();
    let before = c.scoreboard_sign_interact("bob");
    assert_eq!(texts(&before), vec!["There has been no races"]);
    assert!(matches!(&before[0], Message::Dialogue { .. }));
    assert_eq!(before[0].recipient(), "bob");

    c.bookmaker_menu("alice", BetMenuChoice::Yes);
    c.choose_horse("alice", "Horse 2");

    let after = c.scoreboard_sign_interact("bob");
    let board = texts(&after);
    assert_eq!(board.len(), 1);
    assert!(board[0].starts_with("Horse Scoreboard:\nHorse 1: 1 wins Horse 2: 0 wins"));
    assert_eq!(c.scoreboard_text().as_deref(), Some(board[0]));
}

#[test]
fn bookmaker_option_parses_menu_text() {
    let mut c = casino();
    let msgs = c.bookmaker_option("alice", "No");
    assert_eq!(texts(&msgs), vec!["Not brave enough to take a risk aye?"]);

    let msgs = c.bookmaker_option("alice", "maybe");
    assert_eq!(texts(&msgs), vec!["Invalid selection. Please try again."]);
}

// ---------- столы ----------

#[test]
fn default_tables_layout() {
    let c = casino();
    assert_eq!(c.blackjack().id, BLACKJACK_TABLE_ID);
    assert_eq!(
        c.poker_table_ids(),
        vec![FIRST_POKER_TABLE_ID, FIRST_POKER_TABLE_ID + 1, FIRST_POKER_TABLE_ID + 2]
    );

    let images: Vec<String> = c
        .poker_table_ids()
        .into_iter()
        .filter_map(|id| c.poker_table(id).map(|t| t.speaker().image.clone()))
        .collect();
    assert_eq!(images, vec!["casino_easy", "casino_medium", "casino_hard"]);
    assert!(c.poker_table(99).is_none());
}

#[test]
fn blackjack_option_routes_to_table() {
    let mut c = casino();
    let msgs = c.blackjack_option("alice", "DEAL");
    assert!(texts(&msgs)[1].starts_with("New round started!"));
    assert_eq!(c.ledger().peek_balance("alice"), Some(Credits(990.0)));

    let msgs = c.blackjack_action("alice", BlackjackAction::Stand);
    assert!(texts(&msgs).contains(&"Result: Player wins!"));

    let msgs = c.blackjack_option("alice", "double down");
    assert_eq!(texts(&msgs), vec!["Invalid selection. Please try again."]);
}

#[test]
fn poker_tables_keep_own_sessions() {
    let mut c = casino();
    c.poker_action(10, "alice", PokerAction::Deal);

    assert!(c.poker_table(10).and_then(|t| t.session("alice")).is_some());
    assert!(c.poker_table(11).and_then(|t| t.session("alice")).is_none());

    let msgs = c.poker_action(11, "alice", PokerAction::Bet);
    assert_eq!(texts(&msgs), vec!["No active round. Choose 'Deal' first."]);
}

#[test]
fn poker_unknown_table_is_silent() {
    let mut c = casino();
    assert!(c.poker_action(99, "alice", PokerAction::Deal).is_empty());
    assert!(c.poker_option(99, "alice", "dance").is_empty());
    assert!(c.poker_interact(99, "alice").is_empty());
}

#[test]
fn poker_option_invalid_text() {
    let mut c = casino();
    let msgs = c.poker_option(12, "alice", "dance");
    assert_eq!(texts(&msgs), vec!["Invalid selection. Please try again."]);
}

#[test]
fn spin_slots_uses_shared_ledger() {
    let mut c = Casino::new(
        CasinoConfig::default(),
        ScriptedRng::new().with_indices([4, 4, 4]),
    )
    .unwrap();
    let msgs = c.spin_slots("alice");
    assert_eq!(texts(&msgs)[0], "Welcome to the Slot Machine!");
    let reply = c.handle_chat("alice", "balance").unwrap();
    assert_eq!(texts(&reply.messages), vec!["Your current balance is $1690.00"]);
}

#[test]
fn bar_interact_shows_menu() {
    let c = casino();
    let msgs = c.bar_interact("alice");
    assert_eq!(msgs.len(), 2);
    assert!(matches!(msgs[1], Message::Menu { .. }));
}

// ---------- конфиг ----------

#[test]
fn config_partial_json_keeps_defaults() {
    let raw = r#"{
        "starting_balance": 50,
        "poker": { "tables": ["hard"] },
        "slots": { "spin_cost": 2.5 }
    }"#;
    let config = CasinoConfig::from_json_str(raw).unwrap();

    assert_eq!(config.starting_balance, Credits(50.0));
    assert_eq!(config.poker.tables, vec![Difficulty::Hard]);
    assert_eq!(config.poker.table.ante, Credits(10.0));
    assert_eq!(config.slots.spin_cost, Credits(2.5));
    assert_eq!(config.slots.wheel, vec![1, 2, 3]);
    assert_eq!(config.horses.horse_count, 5);

    let mut c = Casino::new(config, ScriptedRng::new()).unwrap();
    assert_eq!(c.poker_table_ids(), vec![FIRST_POKER_TABLE_ID]);
    assert_eq!(c.ledger_mut().get_balance("alice"), Credits(50.0));
}

#[test]
fn config_default_validates() {
    assert!(CasinoConfig::default().validate().is_ok());
    let empty = CasinoConfig::from_json_str("{}").unwrap();
    assert_eq!(empty, CasinoConfig::default());
}

/// Конфиг, собранный в коде, тоже проверяется до открытия казино.
#[test]
fn casino_rejects_invalid_programmatic_config() {
    let mut cfg = CasinoConfig::default();
    cfg.blackjack.ante = Credits(-5.0);
    assert!(matches!(
        Casino::new(cfg, ScriptedRng::new()),
        Err(ConfigError::Invalid(_))
    ));

    let mut cfg = CasinoConfig::default();
    cfg.venue.bouncer_dialogues.clear();
    assert!(matches!(
        Casino::new(cfg, ScriptedRng::new()),
        Err(ConfigError::Invalid(_))
    ));

    assert!(Casino::with_defaults().is_ok());
}

#[test]
fn config_rejects_invalid_values() {
    let cases = [
        r#"{ "starting_balance": -1 }"#,
        r#"{ "blackjack": { "ante": -5 } }"#,
        r#"{ "slots": { "weights": [1.0] } }"#,
        r#"{ "slots": { "wheel": [] } }"#,
        r#"{ "horses": { "horse_count": 0 } }"#,
        r#"{ "horses": { "default_bet": 0 } }"#,
        r#"{ "venue": { "bouncer_dialogues": [] } }"#,
    ];
    for raw in cases {
        assert!(
            matches!(CasinoConfig::from_json_str(raw), Err(ConfigError::Invalid(_))),
            "{raw}"
        );
    }
}

#[test]
fn config_reports_parse_and_io_errors() {
    assert!(matches!(
        CasinoConfig::from_json_str("{ not json"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        CasinoConfig::from_json_file("/definitely/missing/casino.json"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn casino_from_config_file() {
    let path = std::env::temp_dir().join(format!("casino_royale_test_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "horses": { "horse_count": 3 } }"#).unwrap();

    let c = Casino::from_config_file(&path, ScriptedRng::new()).unwrap();
    assert_eq!(c.horses().band().len(), 3);
    assert_eq!(c.config().horses.horse_count, 3);

    std::fs::remove_file(&path).unwrap();
}
