//! Game server move notation.
//!
//! The server addresses columns with cube triples `x y z` (summing to
//! zero), names terrains with uppercase tokens and writes tiles as
//! `RIGHT+LEFT`. A move line carries a tile placement followed by exactly
//! one settlement action:
//!
//! ```text
//! GAME 1 MOVE 4 PLACE ROCK+GRASS AT 1 1 -2 6 BUILD TIGER PLAYGROUND AT -2 3 -1
//! ```

use thiserror::Error;

use crate::board::{Column, Orientation, Terrain, Tile};
use crate::settlement::StructureKind;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(String),

    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    #[error("unknown terrain '{0}'")]
    UnknownTerrain(String),

    #[error("a tile cannot carry a second volcano")]
    VolcanoInTile,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("cube coordinates {0} {1} {2} do not sum to zero")]
    CubeSum(i32, i32, i32),

    #[error("cube coordinates {0} {1} {2} are out of range")]
    CubeOutOfRange(i32, i32, i32),

    #[error("unknown orientation '{0}'")]
    UnknownOrientation(String),
}

/// The settlement action that completes a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireAction {
    Found(Column),
    FoundWithShaman(Column),
    Expand(Column, Terrain),
    Build(StructureKind, Column),
}

/// One full move as exchanged with the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMove {
    pub game: String,
    pub number: u32,
    pub tile: Tile,
    pub volcano: Column,
    pub orientation: Orientation,
    pub action: WireAction,
}

/// Final scores of a game, one entry per player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub game: String,
    pub scores: Vec<(String, u32)>,
}

/// Cursor over whitespace-separated tokens.
struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Result<Self, NotationError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(NotationError::EmptyInput);
        }
        Ok(Tokens { tokens, pos: 0 })
    }

    fn next(&mut self, expected: &str) -> Result<&'a str, NotationError> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or_else(|| NotationError::UnexpectedEnd(expected.to_string()))?;
        self.pos += 1;
        Ok(token)
    }

    fn keyword(&mut self, word: &str) -> Result<(), NotationError> {
        let token = self.next(word)?;
        if token == word {
            Ok(())
        } else {
            Err(NotationError::UnexpectedToken {
                expected: word.to_string(),
                found: token.to_string(),
            })
        }
    }

    fn number<T: std::str::FromStr>(&mut self, expected: &str) -> Result<T, NotationError> {
        let token = self.next(expected)?;
        token
            .parse()
            .map_err(|_| NotationError::InvalidNumber(token.to_string()))
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn finish(&self) -> Result<(), NotationError> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some(extra) => Err(NotationError::UnexpectedToken {
                expected: "end of line".to_string(),
                found: extra.to_string(),
            }),
        }
    }
}

/// Column `(x, y)` in cube form.
pub fn format_cube(column: Column) -> String {
    let (x, y) = (i64::from(column.x), i64::from(column.y));
    format!("{} {} {}", x, y - x, -y)
}

/// Decodes a cube triple, refusing triples whose column leaves the island's range.
pub fn cube_to_column(x: i32, y: i32, z: i32) -> Result<Column, NotationError> {
    if i64::from(x) + i64::from(y) + i64::from(z) != 0 {
        return Err(NotationError::CubeSum(x, y, z));
    }
    z.checked_neg()
        .map(|row| Column::new(x, row))
        .filter(|col| col.in_bounds())
        .ok_or(NotationError::CubeOutOfRange(x, y, z))
}

fn parse_cube(tokens: &mut Tokens<'_>) -> Result<Column, NotationError> {
    let x = tokens.number("cube x")?;
    let y = tokens.number("cube y")?;
    let z = tokens.number("cube z")?;
    cube_to_column(x, y, z)
}

fn parse_terrain(token: &str) -> Result<Terrain, NotationError> {
    Terrain::from_wire_name(token).ok_or_else(|| NotationError::UnknownTerrain(token.to_string()))
}

pub fn format_tile(tile: Tile) -> String {
    format!("{}+{}", tile.right, tile.left)
}

/// Parses `RIGHT+LEFT`.
pub fn parse_tile(token: &str) -> Result<Tile, NotationError> {
    let (right, left) = token
        .split_once('+')
        .ok_or_else(|| NotationError::UnexpectedToken {
            expected: "tile (RIGHT+LEFT)".to_string(),
            found: token.to_string(),
        })?;
    let left = parse_terrain(left)?;
    let right = parse_terrain(right)?;
    Tile::new(left, right).ok_or(NotationError::VolcanoInTile)
}

fn parse_orientation(tokens: &mut Tokens<'_>) -> Result<Orientation, NotationError> {
    let token = tokens.next("orientation")?;
    token
        .parse::<u8>()
        .ok()
        .and_then(Orientation::from_number)
        .ok_or_else(|| NotationError::UnknownOrientation(token.to_string()))
}

fn parse_action(tokens: &mut Tokens<'_>) -> Result<WireAction, NotationError> {
    match tokens.next("FOUND, EXPAND or BUILD")? {
        "FOUND" => match tokens.next("SETTLEMENT or SHANGRILA")? {
            "SETTLEMENT" => {
                tokens.keyword("AT")?;
                Ok(WireAction::Found(parse_cube(tokens)?))
            }
            "SHANGRILA" => {
                tokens.keyword("AT")?;
                Ok(WireAction::FoundWithShaman(parse_cube(tokens)?))
            }
            other => Err(NotationError::UnexpectedToken {
                expected: "SETTLEMENT or SHANGRILA".to_string(),
                found: other.to_string(),
            }),
        },
        "EXPAND" => {
            tokens.keyword("SETTLEMENT")?;
            tokens.keyword("AT")?;
            let at = parse_cube(tokens)?;
            let terrain = parse_terrain(tokens.next("terrain")?)?;
            Ok(WireAction::Expand(at, terrain))
        }
        "BUILD" => {
            let kind = match tokens.next("TOTORO or TIGER")? {
                "TOTORO" => {
                    tokens.keyword("SANCTUARY")?;
                    StructureKind::Sanctuary
                }
                "TIGER" => {
                    tokens.keyword("PLAYGROUND")?;
                    StructureKind::Playground
                }
                other => {
                    return Err(NotationError::UnexpectedToken {
                        expected: "TOTORO or TIGER".to_string(),
                        found: other.to_string(),
                    })
                }
            };
            tokens.keyword("AT")?;
            Ok(WireAction::Build(kind, parse_cube(tokens)?))
        }
        other => Err(NotationError::UnexpectedToken {
            expected: "FOUND, EXPAND or BUILD".to_string(),
            found: other.to_string(),
        }),
    }
}

fn format_action(action: WireAction) -> String {
    match action {
        WireAction::Found(at) => format!("FOUND SETTLEMENT AT {}", format_cube(at)),
        WireAction::FoundWithShaman(at) => format!("FOUND SHANGRILA AT {}", format_cube(at)),
        WireAction::Expand(at, terrain) => {
            format!("EXPAND SETTLEMENT AT {} {}", format_cube(at), terrain)
        }
        WireAction::Build(StructureKind::Sanctuary, at) => {
            format!("BUILD TOTORO SANCTUARY AT {}", format_cube(at))
        }
        WireAction::Build(StructureKind::Playground, at) => {
            format!("BUILD TIGER PLAYGROUND AT {}", format_cube(at))
        }
    }
}

/// Parses a full `GAME <gid> MOVE <n> PLACE ...` line.
pub fn parse_move(line: &str) -> Result<WireMove, NotationError> {
    let mut tokens = Tokens::new(line)?;
    tokens.keyword("GAME")?;
    let game = tokens.next("game id")?.to_string();
    tokens.keyword("MOVE")?;
    let number = tokens.number("move number")?;
    tokens.keyword("PLACE")?;
    let tile = parse_tile(tokens.next("tile")?)?;
    tokens.keyword("AT")?;
    let volcano = parse_cube(&mut tokens)?;
    let orientation = parse_orientation(&mut tokens)?;
    let action = parse_action(&mut tokens)?;
    tokens.finish()?;

    Ok(WireMove {
        game,
        number,
        tile,
        volcano,
        orientation,
        action,
    })
}

pub fn format_move(mv: &WireMove) -> String {
    format!(
        "GAME {} MOVE {} PLACE {} AT {} {} {}",
        mv.game,
        mv.number,
        format_tile(mv.tile),
        format_cube(mv.volcano),
        mv.orientation.number(),
        format_action(mv.action)
    )
}

/// Parses `GAME <gid> OVER [PLAYER <pid> <score>]...`.
pub fn parse_game_over(line: &str) -> Result<GameOver, NotationError> {
    let mut tokens = Tokens::new(line)?;
    tokens.keyword("GAME")?;
    let game = tokens.next("game id")?.to_string();
    tokens.keyword("OVER")?;

    let mut scores = Vec::new();
    while !tokens.is_done() {
        tokens.keyword("PLAYER")?;
        let player = tokens.next("player id")?.to_string();
        let score = tokens.number("score")?;
        scores.push((player, score));
    }
    Ok(GameOver { game, scores })
}

pub fn format_game_over(over: &GameOver) -> String {
    let mut line = format!("GAME {} OVER", over.game);
    for (player, score) in &over.scores {
        line.push_str(&format!(" PLAYER {player} {score}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_coordinates() {
        assert_eq!(format_cube(Column::new(1, 2)), "1 1 -2");
        assert_eq!(format_cube(Column::new(-2, 1)), "-2 3 -1");
        assert_eq!(cube_to_column(3, 1, -4), Ok(Column::new(3, 4)));
        assert_eq!(cube_to_column(1, 1, 1), Err(NotationError::CubeSum(1, 1, 1)));
    }

    #[test]
    fn cube_coordinates_at_the_integer_edge() {
        assert_eq!(
            cube_to_column(i32::MAX, 1, 0),
            Err(NotationError::CubeSum(i32::MAX, 1, 0))
        );
        assert_eq!(
            cube_to_column(i32::MAX, -i32::MAX, 0),
            Err(NotationError::CubeOutOfRange(i32::MAX, -i32::MAX, 0))
        );
        assert_eq!(
            cube_to_column(i32::MAX, 1, i32::MIN),
            Err(NotationError::CubeOutOfRange(i32::MAX, 1, i32::MIN))
        );
        assert_eq!(
            format_cube(Column::new(i32::MAX, i32::MIN)),
            "2147483647 -4294967295 2147483648"
        );
    }

    #[test]
    fn move_lines_with_huge_coordinates_are_errors() {
        assert_eq!(
            parse_move("GAME 1 MOVE 1 PLACE LAKE+LAKE AT 2147483647 1 0 3 FOUND SETTLEMENT AT 0 0 0"),
            Err(NotationError::CubeSum(i32::MAX, 1, 0))
        );
        assert_eq!(
            parse_move(
                "GAME 1 MOVE 1 PLACE LAKE+LAKE AT 2147483647 -2147483647 0 3 FOUND SETTLEMENT AT 0 0 0"
            ),
            Err(NotationError::CubeOutOfRange(i32::MAX, -i32::MAX, 0))
        );
        assert_eq!(
            parse_move("GAME 1 MOVE 1 PLACE LAKE+LAKE AT 1 -1 0 3 FOUND SETTLEMENT AT 0 2147483647 -2147483647"),
            Err(NotationError::CubeOutOfRange(0, i32::MAX, -i32::MAX))
        );
    }

    #[test]
    fn tiles_are_written_right_first() {
        let tile = Tile::new(Terrain::Grassland, Terrain::Rocky).unwrap();
        assert_eq!(format_tile(tile), "ROCK+GRASS");
        assert_eq!(parse_tile("ROCK+GRASS"), Ok(tile));
        assert_eq!(parse_tile("VOLCANO+LAKE"), Err(NotationError::VolcanoInTile));
        assert_eq!(
            parse_tile("SAND+LAKE"),
            Err(NotationError::UnknownTerrain("SAND".to_string()))
        );
    }

    #[test]
    fn parse_build_playground_move() {
        let line = "GAME 1 MOVE 4 PLACE ROCK+GRASS AT 1 1 -2 6 BUILD TIGER PLAYGROUND AT -2 3 -1";
        let mv = parse_move(line).unwrap();
        assert_eq!(mv.game, "1");
        assert_eq!(mv.number, 4);
        assert_eq!(mv.tile, Tile::new(Terrain::Grassland, Terrain::Rocky).unwrap());
        assert_eq!(mv.volcano, Column::new(1, 2));
        assert_eq!(mv.orientation, Orientation::NorthwestWest);
        assert_eq!(
            mv.action,
            WireAction::Build(StructureKind::Playground, Column::new(-2, 1))
        );
        assert_eq!(format_move(&mv), line);
    }

    #[test]
    fn parse_found_and_expand_moves() {
        let mv = parse_move("GAME 5 MOVE 2 PLACE ROCK+PADDY AT 2 -1 -1 1 FOUND SETTLEMENT AT 3 1 -4")
            .unwrap();
        assert_eq!(mv.volcano, Column::new(2, 1));
        assert_eq!(mv.action, WireAction::Found(Column::new(3, 4)));

        let mv = parse_move(
            "GAME 5 MOVE 2 PLACE ROCK+PADDY AT 2 -1 -1 1 EXPAND SETTLEMENT AT 3 1 -4 PADDY",
        )
        .unwrap();
        assert_eq!(mv.action, WireAction::Expand(Column::new(3, 4), Terrain::Paddy));

        let mv = parse_move("GAME 5 MOVE 2 PLACE ROCK+PADDY AT 2 -1 -1 1 FOUND SHANGRILA AT 3 1 -4")
            .unwrap();
        assert_eq!(mv.action, WireAction::FoundWithShaman(Column::new(3, 4)));
    }

    #[test]
    fn malformed_moves() {
        assert_eq!(parse_move("   "), Err(NotationError::EmptyInput));
        assert_eq!(
            parse_move("GAME 1 MOVE 4 PLACE ROCK+GRASS AT 1 1 -2 9 FOUND SETTLEMENT AT 0 0 0"),
            Err(NotationError::UnknownOrientation("9".to_string()))
        );
        assert_eq!(
            parse_move("GAME 1 MOVE x PLACE"),
            Err(NotationError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            parse_move("GAME 1 MOVE 4 PLACE ROCK+GRASS AT 1 1 -2 6"),
            Err(NotationError::UnexpectedEnd("FOUND, EXPAND or BUILD".to_string()))
        );
        assert!(matches!(
            parse_move("GAME 1 MOVE 4 PLACE ROCK+GRASS AT 1 1 -2 6 FOUND SETTLEMENT AT 0 0 0 EXTRA"),
            Err(NotationError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn game_over_lines() {
        let line = "GAME gameOne OVER PLAYER spagett 100 PLAYER playerTwo 95";
        let over = parse_game_over(line).unwrap();
        assert_eq!(over.game, "gameOne");
        assert_eq!(
            over.scores,
            vec![("spagett".to_string(), 100), ("playerTwo".to_string(), 95)]
        );
        assert_eq!(format_game_over(&over), line);
        assert!(parse_game_over("GAME g OVER").unwrap().scores.is_empty());
    }
}
