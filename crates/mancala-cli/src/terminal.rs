//! Text rendering and input parsing for the terminal front end.

use mancala_core::{BoardSnapshot, GameEvent, Outcome, Scoreboard, Side, PITS_PER_SIDE};
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a pit number")]
    Empty,

    #[error("{0:?} is not a pit number")]
    NotANumber(String),

    #[error("Pit {0} does not exist, choose 1-6")]
    OutOfRange(usize),
}

/// Turn a typed pit number (1-6, left to right) into a board index for `side`
pub fn parse_pit(input: &str, side: Side) -> Result<usize, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    let number: usize = input
        .parse()
        .map_err(|_| InputError::NotANumber(input.to_string()))?;
    if !(1..=PITS_PER_SIDE).contains(&number) {
        return Err(InputError::OutOfRange(number));
    }

    Ok(side.first_pit() + number - 1)
}

/// Pit number as the human sees it, or the store name
fn pit_label(index: usize, human: Side) -> String {
    if index == human.store_index() {
        "your store".to_string()
    } else if index == human.other().store_index() {
        "the computer's store".to_string()
    } else if human.owns_pit(index) {
        format!("your pit {}", index - human.first_pit() + 1)
    } else {
        format!("computer pit {}", index - human.other().first_pit() + 1)
    }
}

/// Draw the board with the computer's row on top, sown right to left
pub fn render_board(snapshot: &BoardSnapshot, human: Side) -> String {
    let computer = human.other();
    let mut out = String::new();

    let top: Vec<String> = computer
        .pit_range()
        .rev()
        .map(|i| format!("{:>3}", snapshot.stones(i)))
        .collect();
    let bottom: Vec<String> = human
        .pit_range()
        .map(|i| format!("{:>3}", snapshot.stones(i)))
        .collect();
    let labels: Vec<String> = (1..=PITS_PER_SIDE).map(|n| format!("{n:>3}")).collect();

    let _ = writeln!(out, "       {}", top.join(" "));
    let _ = writeln!(
        out,
        "  {:>3}  {}  {:<3}",
        snapshot.store(computer),
        " ".repeat(top.join(" ").len()),
        snapshot.store(human)
    );
    let _ = writeln!(out, "       {}", bottom.join(" "));
    let _ = write!(out, "       {}", labels.join(" "));
    out
}

/// One line of commentary for the events worth telling the player about
pub fn describe(event: &GameEvent, human: Side) -> Option<String> {
    let who = |side: Side| if side == human { "You" } else { "Computer" };

    match event {
        GameEvent::StonesPickedUp { side, pit, stones } => Some(format!(
            "{} picked up {} stones from {}",
            who(*side),
            stones,
            pit_label(*pit, human)
        )),
        GameEvent::Captured {
            side,
            opposite,
            stones,
            ..
        } => Some(format!(
            "{} captured from {} ({} stones to the store)",
            who(*side),
            pit_label(*opposite, human),
            stones
        )),
        GameEvent::ExtraTurn { side } if *side == human => Some("You get another turn".into()),
        GameEvent::ExtraTurn { .. } => Some("The computer gets another turn".into()),
        GameEvent::RowsSwept { swept } => {
            let parts: Vec<String> = swept
                .iter()
                .map(|(side, stones)| format!("{} {}", who(*side), stones))
                .collect();
            Some(format!("Leftover stones swept into stores: {}", parts.join(", ")))
        }
        GameEvent::GameOver {
            outcome,
            store_a,
            store_b,
        } => {
            let (mine, theirs) = match human {
                Side::PlayerA => (store_a, store_b),
                Side::PlayerB => (store_b, store_a),
            };
            let verdict = match outcome {
                Outcome::Win(side) if *side == human => "You win!",
                Outcome::Win(_) => "The computer wins.",
                Outcome::Tie => "It's a tie.",
            };
            Some(format!("Game over, {mine} to {theirs}. {verdict}"))
        }
        GameEvent::Aborted { reason } => Some(format!("The game was stopped: {reason}")),
        GameEvent::StoneSown { .. }
        | GameEvent::StoreSkipped { .. }
        | GameEvent::TurnEnded { .. } => None,
    }
}

pub fn render_scoreboard(scores: &Scoreboard, human: Side) -> String {
    format!(
        "Wins: you {}, computer {}, ties {} ({} played)",
        scores.wins(human),
        scores.wins(human.other()),
        scores.ties,
        scores.games_played()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mancala_core::{Board, GameError};

    #[test]
    fn test_parse_pit() {
        assert_eq!(parse_pit("1", Side::PlayerA), Ok(0));
        assert_eq!(parse_pit(" 6\n", Side::PlayerA), Ok(5));
        assert_eq!(parse_pit("1", Side::PlayerB), Ok(7));
        assert_eq!(parse_pit("", Side::PlayerA), Err(InputError::Empty));
        assert_eq!(parse_pit("7", Side::PlayerA), Err(InputError::OutOfRange(7)));
        assert_eq!(parse_pit("0", Side::PlayerA), Err(InputError::OutOfRange(0)));
        assert!(matches!(
            parse_pit("store", Side::PlayerA),
            Err(InputError::NotANumber(_))
        ));
    }

    #[test]
    fn test_render_board_orientation() {
        let snapshot =
            Board::from_counts([1, 2, 3, 4, 5, 6, 20, 7, 8, 9, 10, 11, 12, 21], Side::PlayerA)
                .snapshot();
        let text = render_board(&snapshot, Side::PlayerA);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), ["12", "11", "10", "9", "8", "7"]);
        assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), ["21", "20"]);
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_describe_events() {
        let picked = GameEvent::StonesPickedUp {
            side: Side::PlayerB,
            pit: 9,
            stones: 4,
        };
        assert_eq!(
            describe(&picked, Side::PlayerA).as_deref(),
            Some("Computer picked up 4 stones from computer pit 3")
        );
        assert_eq!(
            describe(&GameEvent::StoneSown { pit: 3, stones: 1 }, Side::PlayerA),
            None
        );

        let aborted = GameEvent::Aborted {
            reason: GameError::OpponentHasNoMove,
        };
        assert_eq!(
            describe(&aborted, Side::PlayerA).as_deref(),
            Some("The game was stopped: Opponent has no move while the game is still running")
        );

        let over = GameEvent::GameOver {
            outcome: Outcome::Win(Side::PlayerB),
            store_a: 20,
            store_b: 28,
        };
        assert_eq!(
            describe(&over, Side::PlayerB).as_deref(),
            Some("Game over, 28 to 20. You win!")
        );
    }
}
