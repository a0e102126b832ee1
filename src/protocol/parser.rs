//! Session command parser.
//!
//! Parses incoming lines into `Command` variants that the main loop can
//! dispatch on. Server move lines are decoded by `notation`.

use super::notation::{parse_game_over, parse_move, parse_tile, NotationError, WireMove};
use crate::board::Tile;

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply a move for the local player.
    Move(WireMove),

    /// The server ended the game; report the final score.
    GameOver { game: String },

    /// Pick and apply a move, optionally for a given tile.
    Go { tile: Option<Tile> },

    /// Print the remaining pieces.
    Pieces,

    /// Print the current score.
    Score,

    /// Reset the board and the player.
    NewGame,

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, NotationError> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return Ok(None);
    };

    let command = match first {
        "quit" => Command::Quit,
        "newgame" => Command::NewGame,
        "pieces" => Command::Pieces,
        "score" => Command::Score,
        "go" => parse_go(&tokens)?,
        "GAME" if tokens.get(2) == Some(&"OVER") => Command::GameOver {
            game: parse_game_over(trimmed)?.game,
        },
        "GAME" => Command::Move(parse_move(trimmed)?),
        other => {
            return Err(NotationError::UnexpectedToken {
                expected: "command".to_string(),
                found: other.to_string(),
            })
        }
    };
    Ok(Some(command))
}

/// Parses `go [RIGHT+LEFT]`.
fn parse_go(tokens: &[&str]) -> Result<Command, NotationError> {
    match tokens {
        [_] => Ok(Command::Go { tile: None }),
        [_, tile] => Ok(Command::Go {
            tile: Some(parse_tile(tile)?),
        }),
        [_, _, extra, ..] => Err(NotationError::UnexpectedToken {
            expected: "end of line".to_string(),
            found: extra.to_string(),
        }),
        [] => Err(NotationError::EmptyInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Column, Terrain};
    use crate::protocol::notation::WireAction;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("newgame"), Ok(Some(Command::NewGame)));
        assert_eq!(parse_command("  pieces "), Ok(Some(Command::Pieces)));
        assert_eq!(parse_command("score"), Ok(Some(Command::Score)));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \t"), Ok(None));
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(
            parse_command("frobnicate"),
            Err(NotationError::UnexpectedToken {
                expected: "command".to_string(),
                found: "frobnicate".to_string()
            })
        );
    }

    #[test]
    fn parse_go_with_and_without_tile() {
        assert_eq!(parse_command("go"), Ok(Some(Command::Go { tile: None })));
        assert_eq!(
            parse_command("go LAKE+JUNGLE"),
            Ok(Some(Command::Go {
                tile: Tile::new(Terrain::Jungle, Terrain::Lake)
            }))
        );
        assert!(parse_command("go LAKE+JUNGLE now").is_err());
    }

    #[test]
    fn parse_move_line() {
        let cmd = parse_command("GAME 7 MOVE 1 PLACE LAKE+LAKE AT 1 -1 0 2 FOUND SETTLEMENT AT 0 -1 1")
            .unwrap()
            .unwrap();
        match cmd {
            Command::Move(mv) => {
                assert_eq!(mv.volcano, Column::new(1, 0));
                assert_eq!(mv.action, WireAction::Found(Column::new(0, -1)));
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn parse_game_over_line() {
        assert_eq!(
            parse_command("GAME 7 OVER PLAYER a 10 PLAYER b 3"),
            Ok(Some(Command::GameOver {
                game: "7".to_string()
            }))
        );
    }
}
