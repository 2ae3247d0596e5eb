//! The darkness countdown as seen through whole turns of play.

use std::sync::Arc;

use venture::game::{canonical_world, Game, GameSettings, GrueHazard, GRUE_DEATH, GRUE_WARNING};

fn new_game() -> Game {
    Game::new(Arc::new(canonical_world()), GameSettings::default()).expect("game")
}

fn fetch_candle(game: &mut Game) {
    game.turn("move east");
    assert!(game.turn("get candle").starts_with("You pick up the candle."));
    game.turn("move west");
}

#[test]
fn lit_candle_keeps_the_grue_away() {
    let mut game = new_game();
    fetch_candle(&mut game);
    game.turn("light candle");

    let reply = game.turn("move west");
    assert!(reply.contains("It is dark, but your candle casts a warm glow."));
    for _ in 0..10 {
        let reply = game.turn("look");
        assert!(!reply.contains(GRUE_WARNING), "{}", reply);
    }
    assert!(!game.is_done());
}

#[test]
fn lighting_up_before_the_last_turn_resets_the_countdown() {
    let mut game = new_game();
    fetch_candle(&mut game);

    game.turn("move west");
    game.turn("look");
    let warned = game.turn("look");
    assert!(warned.ends_with(GRUE_WARNING));

    let reply = game.turn("light candle");
    assert!(reply.starts_with("You light the candle."));
    assert!(!reply.contains(GRUE_WARNING));
    assert_eq!(game.state().countdown, 4);

    for _ in 0..6 {
        game.turn("look");
    }
    assert!(!game.is_done());
}

#[test]
fn dropping_the_candle_in_the_dark_starts_the_clock() {
    let mut game = new_game();
    fetch_candle(&mut game);
    game.turn("light candle");
    game.turn("move west");

    let reply = game.turn("drop candle");
    assert!(reply.contains("You drop the candle."));
    assert!(reply.contains("The candle sputters and goes out."));
    assert!(!game.state().lit);

    game.turn("look");
    game.turn("look");
    game.turn("look");
    assert!(!game.is_done());
    assert_eq!(game.turn("look"), GRUE_DEATH);
    assert!(game.is_done());
}

#[test]
fn leaving_the_dark_resets_the_countdown() {
    let mut game = new_game();
    game.turn("west");
    game.turn("look");
    game.turn("look");
    assert!(game.state().countdown < 4);

    let reply = game.turn("east");
    assert!(reply.contains("You are in The Foyer."));
    assert!(!reply.contains(GRUE_WARNING));
    assert_eq!(game.state().countdown, 4);
}

#[test]
fn unknown_commands_do_not_advance_the_countdown() {
    let mut game = new_game();
    game.turn("west");
    let before = game.state().countdown;
    for _ in 0..10 {
        game.turn("xyzzy");
    }
    assert_eq!(game.state().countdown, before);
    assert!(!game.is_done());
}

#[test]
fn configured_countdown_changes_the_deadline() {
    let mut game = new_game().with_hazard(GrueHazard::new(1, 1));
    game.turn("west");
    assert!(!game.is_done());
    let reply = game.turn("look");
    assert_eq!(reply, GRUE_DEATH);
}

#[test]
fn light_source_named_in_another_case_can_still_be_lit() {
    let world = venture::game::seed_loader::load_world_from_str(
        r#"{
            "light_source": "Candle",
            "rooms": [ { "id": "0", "name": "The Cellar", "description": "a cellar.", "dark": true } ],
            "objects": [ { "id": "candle", "room": "0" } ]
        }"#,
        "inline",
    )
    .expect("world loads");
    let mut game = Game::new(Arc::new(world), GameSettings::default()).expect("game");

    game.turn("get candle");
    let reply = game.turn("light candle");
    assert!(reply.starts_with("You light the candle."), "{}", reply);
    assert!(game.state().lit);
    assert!(game.turn("inventory").contains("Your candle is lit."));
}
