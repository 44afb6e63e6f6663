//! Integration tests for the Mancala game engine.
//!
//! These tests drive complete games through the public session API and
//! check the rule invariants over random move sequences.

use mancala_core::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn fixed_config(first: Side) -> GameConfig {
    GameConfig {
        first_mover: FirstMover::Fixed(first),
        seed: Some(42),
        ..GameConfig::default()
    }
}

/// Play the human side with its own bot until the session stops
fn play_out(session: &mut GameSession, human: &mut dyn MoveSource) -> Vec<GameEvent> {
    let total = session.board().total_stones();
    let mut events = session.advance();
    let mut iterations = 0;
    let max_iterations = 500;

    while session.is_active() && iterations < max_iterations {
        let side = session.to_move().expect("active session waits for the human");
        assert_eq!(side, session.human_side());

        let pit = human
            .choose_move(&session.snapshot())
            .expect("human side has a legal move while the game is live");
        assert!(session.validate_move(side, pit));

        events.extend(session.play_move(side, pit).unwrap());
        assert_eq!(session.board().total_stones(), total);
        iterations += 1;
    }

    assert!(
        !session.is_active(),
        "Game should finish within {} moves",
        max_iterations
    );
    events
}

#[test]
fn test_full_game_against_medium_bot() {
    let mut session = GameSession::with_bot(fixed_config(Side::PlayerA)).unwrap();
    let mut human = Bot::with_seed(Side::PlayerA, BotDifficulty::Easy, 1);

    let events = play_out(&mut session, &mut human);

    let outcome = session.outcome().expect("game finished normally");
    assert!(session.board().is_end_condition());
    assert_eq!(session.board().total_stones(), 48);
    assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));

    let store_a = session.board().store(Side::PlayerA);
    let store_b = session.board().store(Side::PlayerB);
    assert_eq!(outcome, Outcome::from_stores(store_a, store_b));

    // Nothing validates once the game is over
    for side in Side::ALL {
        for pit in 0..PIT_COUNT {
            assert!(!session.validate_move(side, pit));
            assert!(!session.board().validate_move(side, pit));
        }
    }
}

#[test]
fn test_full_games_record_on_scoreboard() {
    let mut scores = Scoreboard::new();

    for seed in 0..5 {
        let config = GameConfig {
            seed: Some(seed),
            difficulty: BotDifficulty::Easy,
            ..GameConfig::default()
        };
        let mut session = GameSession::with_bot(config).unwrap();
        let mut human = Bot::with_seed(Side::PlayerA, BotDifficulty::Medium, seed);

        play_out(&mut session, &mut human);

        assert!(session.report_outcome(&mut scores));
        assert!(!session.report_outcome(&mut scores));
    }

    assert_eq!(scores.games_played(), 5);
}

#[test]
fn test_sweep_rule_empties_every_row() {
    let config = GameConfig {
        end_rule: EndRule::SweepRemaining,
        ..fixed_config(Side::PlayerA)
    };
    let mut session = GameSession::with_bot(config).unwrap();
    let mut human = Bot::with_seed(Side::PlayerA, BotDifficulty::Medium, 3);

    let events = play_out(&mut session, &mut human);

    for side in Side::ALL {
        assert!(session.board().side_is_empty(side));
    }
    let store_a = session.board().store(Side::PlayerA);
    let store_b = session.board().store(Side::PlayerB);
    assert_eq!(store_a + store_b, 48);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::RowsSwept { .. })));
}

#[test]
fn test_capture_scenario() {
    // A: [1,0,0,0,0,0] store 10, B: [0,4,4,4,4,4] store 10
    let mut board =
        Board::from_counts([1, 0, 0, 0, 0, 0, 10, 0, 4, 4, 4, 4, 4, 10], Side::PlayerA);

    let result = resolve_move(&mut board, 0);

    assert_eq!(result.final_index, 1);
    assert_eq!(
        result.capture,
        Some(Capture {
            pit: 1,
            opposite: 11,
            stones: 5
        })
    );
    assert_eq!(
        board.snapshot().pits,
        [0, 0, 0, 0, 0, 0, 15, 0, 4, 4, 4, 0, 4, 10]
    );
}

#[test]
fn test_capture_scenario_ends_session() {
    let board =
        Board::from_counts([1, 0, 0, 0, 0, 0, 10, 0, 4, 4, 4, 4, 4, 10], Side::PlayerA);
    let opponent = Box::new(|_: &BoardSnapshot| -> Option<usize> {
        panic!("opponent must not be asked after the game ends")
    });
    let mut session =
        GameSession::from_board(board, fixed_config(Side::PlayerA), opponent).unwrap();

    let events = session.play_move(Side::PlayerA, 0).unwrap();

    // Player A's row is now empty
    assert_eq!(session.outcome(), Some(Outcome::Win(Side::PlayerA)));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            outcome: Outcome::Win(Side::PlayerA),
            store_a: 15,
            store_b: 10
        })
    );
}

#[test]
fn test_thirteen_stone_scenario() {
    let mut board =
        Board::from_counts([13, 4, 4, 4, 4, 4, 0, 4, 4, 4, 4, 4, 4, 0], Side::PlayerA);

    let result = resolve_move(&mut board, 0);

    let skipped: Vec<_> = result
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::StoreSkipped { .. }))
        .collect();
    let into_own_store = result
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::StoneSown { pit: 6, .. }))
        .count();

    assert_eq!(skipped, vec![&GameEvent::StoreSkipped { pit: 13 }]);
    assert_eq!(into_own_store, 1);
    assert_eq!(board.store(Side::PlayerB), 0);
    assert_eq!(board.total_stones(), 57);
}

#[test]
fn test_computer_clearing_its_row_ends_game() {
    // Player B's last stone goes into its own store
    let board = Board::from_counts([4, 4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 0, 1, 0], Side::PlayerB);
    let mut calls = 0;
    let opponent = Box::new(move |snapshot: &BoardSnapshot| {
        calls += 1;
        assert_eq!(calls, 1, "opponent asked again after the game ended");
        snapshot.legal_moves(Side::PlayerB).first().copied()
    });
    let mut session =
        GameSession::from_board(board, fixed_config(Side::PlayerA), opponent).unwrap();

    let events = session.advance();

    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::ExtraTurn { .. })));
    assert_eq!(session.outcome(), Some(Outcome::Win(Side::PlayerB)));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_events_serialize_to_json() {
    let mut session = GameSession::with_bot(fixed_config(Side::PlayerA)).unwrap();
    let events = session.play_move(Side::PlayerA, 2).unwrap();

    let json = serde_json::to_string(&events).unwrap();
    let back: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, events);

    let snapshot: BoardSnapshot =
        serde_json::from_str(&serde_json::to_string(&session.snapshot()).unwrap()).unwrap();
    assert_eq!(snapshot.store(Side::PlayerA), 1);
}

#[test]
fn test_oversized_config_is_rejected() {
    let config = GameConfig {
        stones_per_pit: 400_000_000,
        ..GameConfig::default()
    };

    assert_eq!(
        GameSession::with_bot(config).unwrap_err(),
        GameError::Config(ConfigError::TooManyStones {
            max: MAX_STONES_PER_PIT
        })
    );
}

proptest! {
    #[test]
    fn prop_stones_are_conserved(
        stones in 1u32..8,
        picks in prop::collection::vec(0usize..6, 1..150),
    ) {
        let config = GameConfig {
            stones_per_pit: stones,
            first_mover: FirstMover::Fixed(Side::PlayerA),
            ..GameConfig::default()
        };
        let mut computer_picks = picks.clone().into_iter().rev();
        let opponent = Box::new(move |snapshot: &BoardSnapshot| {
            let legal = snapshot.legal_moves(snapshot.turn);
            let pick = computer_picks.next().unwrap_or(0);
            legal.get(pick % legal.len().max(1)).copied()
        });
        let mut session = GameSession::new(config, opponent).unwrap();
        let total = stones * 12;

        for pick in picks {
            if !session.is_active() {
                break;
            }
            let side = session.human_side();
            let legal = session.board().legal_moves(side);
            prop_assert!(!legal.is_empty());

            session.play_move(side, legal[pick % legal.len()]).unwrap();
            prop_assert_eq!(session.board().total_stones(), total);
        }
    }

    #[test]
    fn prop_opponent_store_never_sown(
        mover_is_a in any::<bool>(),
        offset in 0usize..6,
        held in 14u32..60,
        counts in prop::array::uniform14(0u32..6),
    ) {
        let side = if mover_is_a { Side::PlayerA } else { Side::PlayerB };
        let start = side.first_pit() + offset;
        let mut counts = counts;
        counts[start] = held;

        let mut board = Board::from_counts(counts, side);
        let before = board.store(side.other());
        let total = board.total_stones();

        let result = resolve_move(&mut board, start);

        let opponent_store = side.other().store_index();
        prop_assert!(!result.events.iter().any(
            |e| matches!(e, GameEvent::StoneSown { pit, .. } if *pit == opponent_store)
        ), "stone was sown into the opponent's store");
        prop_assert_eq!(board.store(side.other()), before);
        prop_assert_eq!(board.total_stones(), total);
    }
}
