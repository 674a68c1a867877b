// src/bin/casino_dev_cli.rs
//
// Прогон одного игрока по всему казино с детерминированным RNG.
// Использование: casino_dev_cli [seed] [config.json] [--json]

use casino_royale::api::{BetMenuChoice, BlackjackAction, DjAction, Message, PokerAction};
use casino_royale::infra::DeterministicRng;
use casino_royale::{Casino, CasinoConfig};

const PLAYER: &str = "dev";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));

    let seed = positional
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    let config = match positional.next() {
        Some(path) => match CasinoConfig::from_json_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("casino_dev_cli: {e}");
                std::process::exit(1);
            }
        },
        None => CasinoConfig::default(),
    };

    println!("casino_dev_cli: открываем казино (seed = {seed})…");
    let mut casino = match Casino::new(config, DeterministicRng::from_seed(seed)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("casino_dev_cli: {e}");
            std::process::exit(1);
        }
    };

    // 1. Вход: вышибала
    section("BOUNCER");
    for _ in 0..4 {
        show(&casino.bouncer_interact(PLAYER), json);
    }
    if let Some(reply) = casino.handle_chat(PLAYER, "age/21") {
        show(&reply.messages, json);
    }

    // 2. Бар и музыка
    section("BAR");
    show(&casino.bar_interact(PLAYER), json);
    show(&casino.bar_order(PLAYER, "coke - $5.00"), json);

    section("DJ");
    show(&casino.dj_action(PLAYER, DjAction::Play), json);
    show(&casino.dj_action(PLAYER, DjAction::Next), json);

    // 3. Блэкджек: раздали, стоим
    section("BLACKJACK");
    show(&casino.blackjack_action(PLAYER, BlackjackAction::Deal), json);
    show(&casino.blackjack_action(PLAYER, BlackjackAction::Stand), json);

    // 4. Покер на каждом столе
    for table in casino.poker_table_ids() {
        section(&format!("POKER TABLE {table}"));
        show(&casino.poker_action(table, PLAYER, PokerAction::Deal), json);
        show(&casino.poker_action(table, PLAYER, PokerAction::Bet), json);
        show(&casino.poker_action(table, PLAYER, PokerAction::Quit), json);
    }

    // 5. Слоты
    section("SLOTS");
    for _ in 0..3 {
        show(&casino.spin_slots(PLAYER), json);
    }

    // 6. Скачки
    section("HORSES");
    show(&casino.scoreboard_sign_interact(PLAYER), json);
    show(&casino.bookmaker_interact(PLAYER), json);
    show(&casino.bookmaker_interact(PLAYER), json);
    show(&casino.bookmaker_interact(PLAYER), json);
    show(&casino.bookmaker_menu(PLAYER, BetMenuChoice::Yes), json);
    if let Some(reply) = casino.handle_chat(PLAYER, "bet_horse/100") {
        show(&reply.messages, json);
    }
    show(&casino.choose_horse(PLAYER, "Horse 3"), json);
    show(&casino.scoreboard_sign_interact(PLAYER), json);

    section("SUMMARY");
    if let Some(reply) = casino.handle_chat(PLAYER, "balance") {
        show(&reply.messages, json);
    }
}

fn section(title: &str) {
    println!();
    println!("================ {title} ================");
}

fn show(messages: &[Message], json: bool) {
    for msg in messages {
        if json {
            match serde_json::to_string(msg) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("serialize failed: {e}"),
            }
            continue;
        }
        match msg {
            Message::Dialogue { sender, text, .. } => println!("[{sender}] {text}"),
            Message::Server { text, .. } => println!("(server) {text}"),
            Message::Sound { sound, .. } => println!("(sound) {sound}"),
            Message::Emote { emote, pos, .. } => println!("(emote) {emote} @ ({}, {})", pos.y, pos.x),
            Message::Menu {
                menu_name, options, ..
            } => println!("(menu) {menu_name}: {}", options.join(" | ")),
        }
    }
}
