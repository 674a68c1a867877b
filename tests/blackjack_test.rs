//! Блэкджек: правила раунда и поток стола (Deal / Hit / Stand / Quit).
//!
//! Без сценария перемешивания колода остаётся в заводском порядке,
//! поэтому раздача известна заранее:
//! игрок A♠ K♠ (21), дилер Q♠ J♠ (20), дальше 10♠, 9♠, ...

use casino_royale::api::Message;
use casino_royale::domain::{Card, Credits, Deck};
use casino_royale::games::blackjack::HIDDEN_CARD;
use casino_royale::games::tables::BLACKJACK_MENU;
use casino_royale::games::{BlackjackGame, BlackjackOutcome, BlackjackTable, GameError};
use casino_royale::infra::ScriptedRng;
use casino_royale::ledger::BalanceManager;

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|c| c.parse().unwrap()).collect()
}

fn texts(messages: &[Message]) -> Vec<&str> {
    messages.iter().filter_map(Message::text).collect()
}

fn table() -> BlackjackTable {
    BlackjackTable::new(1, "casino_table4", Credits(10.0), Credits(10.0))
}

/// Перестановка, после которой игрок получает K♠ Q♠ (20), а дилер J♠ 10♠ (20).
fn push_shuffle() -> Vec<usize> {
    let mut order: Vec<usize> = (0..47).collect();
    order.extend([51, 47, 48, 49, 50]);
    order
}

// ---------- правила ----------

#[test]
fn new_round_deals_two_cards_each() {
    let mut game = BlackjackGame::default();
    let mut rng = ScriptedRng::new();
    game.start_new_round(&mut rng).unwrap();

    assert!(game.active_round);
    assert_eq!(game.player_hand.cards, cards(&["AS", "KS"]));
    assert_eq!(game.dealer_hand.cards, cards(&["QS", "JS"]));
    assert_eq!(game.deck.len(), 48);
    assert_eq!(game.get_player_total(), 21);
    assert_eq!(game.get_dealer_total(), 20);
}

#[test]
fn dealer_first_card_hidden_until_revealed() {
    let mut game = BlackjackGame::default();
    game.start_new_round(&mut ScriptedRng::new()).unwrap();

    assert_eq!(
        game.get_dealer_cards(false),
        vec![HIDDEN_CARD.to_string(), "Jack of Spades".to_string()]
    );
    assert_eq!(
        game.get_dealer_cards(true),
        vec!["Queen of Spades".to_string(), "Jack of Spades".to_string()]
    );
}

/// A♠ K♠ + 10♠ - жёсткие 21, ещё 9♠ - перебор.
#[test]
fn player_hit_draws_and_busts() {
    let mut game = BlackjackGame::default();
    game.start_new_round(&mut ScriptedRng::new()).unwrap();

    let card = game.player_hit().unwrap();
    assert_eq!(card, "10S".parse::<Card>().unwrap());
    assert_eq!(game.get_player_total(), 21);
    assert!(!game.is_busted());

    game.player_hit().unwrap();
    assert_eq!(game.player_hand.len(), 4);
    assert!(game.is_busted());
    assert_eq!(game.determine_winner(), BlackjackOutcome::Dealer);
}

/// Дилер добирает, пока меньше 17, и может перебрать.
#[test]
fn dealer_hits_below_seventeen() {
    let mut game = BlackjackGame::default();
    game.player_hand.cards = cards(&["10H", "9H"]);
    game.dealer_hand.cards = cards(&["10C", "6C"]);
    game.deck = Deck::from_cards(cards(&["2D", "9D"]));

    let busted = game.dealer_turn().unwrap();
    assert!(busted);
    assert_eq!(game.get_dealer_total(), 25);
    assert_eq!(game.determine_winner(), BlackjackOutcome::Player);
}

#[test]
fn dealer_stands_on_seventeen() {
    let mut game = BlackjackGame::default();
    game.dealer_hand.cards = cards(&["10C", "7C"]);
    game.deck = Deck::from_cards(cards(&["2D"]));

    assert!(!game.dealer_turn().unwrap());
    assert_eq!(game.dealer_hand.len(), 2);
}

#[test]
fn dealer_turn_reports_exhausted_deck() {
    let mut game = BlackjackGame::default();
    game.dealer_hand.cards = cards(&["2C", "3C"]);
    game.deck = Deck::from_cards(Vec::new());
    assert_eq!(game.dealer_turn(), Err(GameError::DeckExhausted));
}

#[test]
fn winner_by_totals() {
    let mut game = BlackjackGame::default();

    game.player_hand.cards = cards(&["10H", "9H"]);
    game.dealer_hand.cards = cards(&["10C", "8C"]);
    assert_eq!(game.determine_winner(), BlackjackOutcome::Player);

    game.dealer_hand.cards = cards(&["10C", "9C"]);
    assert_eq!(game.determine_winner(), BlackjackOutcome::Push);

    game.dealer_hand.cards = cards(&["10C", "AC"]);
    assert_eq!(game.determine_winner(), BlackjackOutcome::Dealer);

    // перебор игрока важнее перебора дилера
    game.player_hand.cards = cards(&["10H", "9H", "5H"]);
    game.dealer_hand.cards = cards(&["10C", "9C", "5C"]);
    assert_eq!(game.determine_winner(), BlackjackOutcome::Dealer);
}

// ---------- стол ----------

#[test]
fn deal_charges_ante_and_shows_hand() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();
    let mut t = table();

    let msgs = t.deal(&mut ledger, &mut rng, "alice");

    assert_eq!(ledger.get_balance("alice"), Credits(990.0));
    assert_eq!(msgs[0].sound_name(), Some("cost"));
    assert_eq!(
        texts(&msgs),
        vec![
            "This game cost $10.00, your new balance is $990.00",
            "New round started!\nYour hand: Ace of Spades, King of Spades (Total: 21)\nDealer shows: <Hidden Card>, Jack of Spades",
        ]
    );
    match msgs.last() {
        Some(Message::Menu { menu_name, options, .. }) => {
            assert_eq!(menu_name, BLACKJACK_MENU);
            assert_eq!(options, &["Deal", "Hit", "Stand", "Quit"]);
        }
        other => panic!("expected menu, got {other:?}"),
    }

    let game = t.session("alice").unwrap();
    assert_eq!(game.pot, Credits(20.0));
    assert_eq!(ledger.observer_count(), 0);
}

#[test]
fn deal_twice_is_rejected() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();
    let mut t = table();

    t.deal(&mut ledger, &mut rng, "alice");
    let msgs = t.deal(&mut ledger, &mut rng, "alice");

    assert_eq!(texts(&msgs), vec!["A round is already active!"]);
    assert_eq!(ledger.get_balance("alice"), Credits(990.0));
}

/// Деньги проверяются до начала раунда: сессия не становится активной.
#[test]
fn deal_without_funds_does_not_start_round() {
    let mut ledger = BalanceManager::with_starting_balance(Credits(5.0));
    let mut rng = ScriptedRng::new();
    let mut t = table();

    let msgs = t.deal(&mut ledger, &mut rng, "alice");

    assert_eq!(texts(&msgs), vec!["You need at least $10.00 to ante up!"]);
    assert_eq!(ledger.get_balance("alice"), Credits(5.0));
    assert!(!t.session("alice").unwrap().active_round);
}

#[test]
fn hit_without_round() {
    let mut t = table();
    let msgs = t.hit("alice");
    assert_eq!(texts(&msgs), vec!["No active round. Choose 'Deal' first."]);
}

#[test]
fn hit_then_bust_ends_session() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();
    let mut t = table();

    t.deal(&mut ledger, &mut rng, "alice");
    let first = t.hit("alice");
    assert_eq!(
        texts(&first),
        vec!["You drew a 10 of Spades.\nYour hand: Ace of Spades, King of Spades, 10 of Spades (Total: 21)"]
    );

    let msgs = t.hit("alice");
    assert_eq!(
        texts(&msgs),
        vec![
            "You drew a 9 of Spades and busted!\nFinal hand: Ace of Spades, King of Spades, 10 of Spades, 9 of Spades (Total: 30)",
            "Result: Dealer wins!",
        ]
    );
    assert!(!t.has_session("alice"));
    assert_eq!(ledger.get_balance("alice"), Credits(990.0));
}

#[test]
fn hit_without_bust_keeps_playing() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new().with_shuffle(push_shuffle());
    let mut t = table();

    t.deal(&mut ledger, &mut rng, "alice");
    // игрок K♠ Q♠; следующая карта сверху - A♠
    let msgs = t.hit("alice");
    assert_eq!(
        texts(&msgs),
        vec!["You drew an Ace of Spades.\nYour hand: King of Spades, Queen of Spades, Ace of Spades (Total: 21)"]
    );
    assert!(t.has_session("alice"));
}

#[test]
fn stand_player_wins_pot() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();
    let mut t = table();

    t.deal(&mut ledger, &mut rng, "alice");
    let msgs = t.stand(&mut ledger, "alice");

    assert_eq!(
        texts(&msgs),
        vec![
            "Dealer's hand: Queen of Spades, Jack of Spades (Total: 20)",
            "Result: Player wins!",
            "After winning $20.00, your new balance is $1010.00",
        ]
    );
    assert_eq!(ledger.get_balance("alice"), Credits(1010.0));
    assert!(!t.has_session("alice"));
}

/// Ничья возвращает анте.
#[test]
fn stand_push_returns_ante() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new().with_shuffle(push_shuffle());
    let mut t = table();

    t.deal(&mut ledger, &mut rng, "alice");
    let msgs = t.stand(&mut ledger, "alice");

    assert!(texts(&msgs).contains(&"Result: Push! Your ante is returned."));
    assert!(msgs.iter().any(|m| m.sound_name() == Some("tie")));
    assert_eq!(ledger.get_balance("alice"), Credits(1000.0));
}

#[test]
fn quit_discards_session() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();
    let mut t = table();

    assert_eq!(
        texts(&t.quit("alice")),
        vec!["You're not currently in a Blackjack game."]
    );

    t.deal(&mut ledger, &mut rng, "alice");
    assert_eq!(texts(&t.quit("alice")), vec!["You quit the Blackjack session."]);
    assert!(!t.has_session("alice"));
}

/// У каждого игрока своя партия.
#[test]
fn sessions_are_per_player() {
    let mut ledger = BalanceManager::new();
    let mut rng = ScriptedRng::new();
    let mut t = table();

    t.deal(&mut ledger, &mut rng, "alice");
    let msgs = t.deal(&mut ledger, &mut rng, "bob");

    assert!(texts(&msgs)[1].starts_with("New round started!"));
    assert!(t.has_session("alice"));
    assert!(t.has_session("bob"));
    assert!(msgs.iter().all(|m| m.recipient() == "bob"));
}
