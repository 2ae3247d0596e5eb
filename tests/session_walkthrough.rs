//! End-to-end play over an in-memory stream: the canonical house tour that
//! ends with the player wandering into the dark kitchen.

mod common;

use venture::game::{GRUE_DEATH, GRUE_WARNING};
use venture::server::SessionEnd;

#[tokio::test]
async fn tour_of_the_house_ends_in_the_grue() {
    let server = common::server();
    let (stream, mut player) = common::connection();

    let (end, ()) = tokio::join!(server.serve_connection(stream), async {
        let greeting = player.recv().await.expect("greeting");
        assert!(greeting.starts_with("Welcome to Realms of Venture!"));
        assert!(greeting.contains("You are in The Foyer."));
        assert!(greeting.contains("Paths lie to north, east, west."));

        let reply = player.cmd("move north").await;
        assert!(reply.contains("You are in The Fountain."), "{}", reply);
        assert!(reply.contains("You notice: coin"));

        let reply = player.cmd("move south").await;
        assert!(reply.contains("You are in The Foyer."), "{}", reply);

        let reply = player.cmd("get candle").await;
        assert_eq!(reply, "You don't see any \"candle\" here.");

        let reply = player.cmd("move west").await;
        assert!(reply.contains("You are in The Kitchen."), "{}", reply);
        assert!(reply.contains("You are likely to be eaten by a grue."));
        assert!(!reply.contains(GRUE_WARNING));

        // Four more turns in the dark: quiet, warned, warned, eaten.
        let first = player.cmd("look").await;
        assert!(!first.contains(GRUE_WARNING));
        let second = player.cmd("look").await;
        assert!(second.ends_with(GRUE_WARNING), "{}", second);
        let third = player.cmd("inventory").await;
        assert!(third.starts_with("Your bag is empty."));
        assert!(third.ends_with(GRUE_WARNING));
        let last = player.cmd("look").await;
        assert_eq!(last, GRUE_DEATH);
        assert!(last.contains("Goodbye!"));

        player.expect_closed().await;
    });

    assert_eq!(end.expect("session"), SessionEnd::Finished);
}

#[tokio::test]
async fn quit_ends_the_session_from_any_room() {
    let server = common::server();
    let (stream, mut player) = common::connection();

    let (end, ()) = tokio::join!(server.serve_connection(stream), async {
        player.recv().await.expect("greeting");
        player.cmd("east").await;
        let reply = player.cmd("quit").await;
        assert_eq!(reply, "Thanks for playing Realms of Venture. Goodbye!");
        player.expect_closed().await;
    });

    assert_eq!(end.expect("session"), SessionEnd::Finished);
}

#[tokio::test]
async fn unknown_command_keeps_the_session_alive() {
    let server = common::server();
    let (stream, mut player) = common::connection();

    let (end, ()) = tokio::join!(server.serve_connection(stream), async {
        player.recv().await.expect("greeting");
        let reply = player.cmd("xyzzy").await;
        assert!(reply.contains("xyzzy"), "{}", reply);
        assert!(!reply.contains("Goodbye!"));

        // Still playing: the next command is answered normally.
        let reply = player.cmd("look").await;
        assert!(reply.contains("You are in The Foyer."));
        player.cmd("exit").await;
        player.expect_closed().await;
    });

    assert_eq!(end.expect("session"), SessionEnd::Finished);
}

#[tokio::test]
async fn every_input_gets_exactly_one_reply() {
    let server = common::server();
    let (stream, mut player) = common::connection();

    let (end, ()) = tokio::join!(server.serve_connection(stream), async {
        player.recv().await.expect("greeting");
        for line in ["move", "teleport", "get", "drop", "light", "say", "help", "   "] {
            let reply = player.cmd(line).await;
            assert!(!reply.is_empty(), "no reply to {:?}", line);
        }
        player.cmd("quit").await;
    });

    assert_eq!(end.expect("session"), SessionEnd::Finished);
}

#[tokio::test]
async fn teleport_to_unknown_room_says_goodbye() {
    let server = common::server();
    let (stream, mut player) = common::connection();

    let (end, ()) = tokio::join!(server.serve_connection(stream), async {
        player.recv().await.expect("greeting");
        let reply = player.cmd("teleport 2").await;
        assert!(reply.contains("puff of smoke"));
        assert!(reply.contains("You are in The Library."));

        let reply = player.cmd("teleport 99").await;
        assert!(reply.contains("\"99\""));
        assert!(reply.ends_with("Goodbye!"));
        player.expect_closed().await;
    });

    assert_eq!(end.expect("session"), SessionEnd::Finished);
}

#[tokio::test]
async fn client_hanging_up_ends_the_session_cleanly() {
    let server = common::server();
    let (stream, mut player) = common::connection();

    let (end, ()) = tokio::join!(server.serve_connection(stream), async move {
        player.recv().await.expect("greeting");
        player.cmd("look").await;
        player.hang_up();
    });

    assert_eq!(end.expect("session"), SessionEnd::Disconnected);
}
