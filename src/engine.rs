//! Session state management.
//!
//! Holds the board, the local player and the rules for one game, applies
//! server move lines atomically and answers the line commands dispatched
//! by the binary.

use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::board::{Board, Column, Location, Tile};
use crate::config::Rules;
use crate::movegen::{foundable_cells, legal_placements, random_tile};
use crate::placement::{place, PlacementError};
use crate::player::{PieceKind, Player};
use crate::protocol::notation::{format_game_over, format_move, GameOver, NotationError};
use crate::protocol::{Command, WireAction, WireMove};
use crate::settlement::{build, expand, found, found_with_shaman, SettlementError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
    #[error("no settlement at {0}")]
    NoSettlementAt(Location),
    #[error("no legal move")]
    NoLegalMove,
}

/// One game from the local player's point of view.
pub struct Session {
    board: Board,
    player: Player,
    rules: Rules,
    player_id: String,
    game: String,
    moves: u32,
    rng: SmallRng,
}

impl Session {
    pub fn new(rules: Rules, player_id: impl Into<String>) -> Self {
        Self::with_rng(rules, player_id.into(), SmallRng::from_entropy())
    }

    /// Creates a session whose move choices are reproducible.
    pub fn with_seed(rules: Rules, player_id: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(rules, player_id.into(), SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rules: Rules, player_id: String, rng: SmallRng) -> Self {
        Session {
            board: Board::with_first_tile(),
            player: Player::new(rules.starting_pieces),
            rules,
            player_id,
            game: "0".to_string(),
            moves: 0,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Resets the board and the player for a new game.
    pub fn new_game(&mut self) {
        self.board = Board::with_first_tile();
        self.player = Player::new(self.rules.starting_pieces);
        self.moves = 0;
        info!(player = %self.player_id, "new game");
    }

    /// Applies a placement and its action, returning the new score.
    ///
    /// Either both halves of the move take effect or neither does.
    pub fn apply_move(&mut self, mv: &WireMove) -> Result<u32, SessionError> {
        let board = self.board.clone();
        let player = self.player.clone();
        match self.play(mv) {
            Ok(()) => {
                self.game.clone_from(&mv.game);
                self.moves = mv.number;
                info!(game = %mv.game, number = mv.number, score = self.player.score(), "move applied");
                Ok(self.player.score())
            }
            Err(e) => {
                self.board = board;
                self.player = player;
                warn!(game = %mv.game, number = mv.number, error = %e, "move rejected");
                Err(e)
            }
        }
    }

    fn play(&mut self, mv: &WireMove) -> Result<(), SessionError> {
        let height = self.board.top_height(mv.volcano).map_or(0, |h| h + 1);
        place(&mut self.board, mv.tile, mv.volcano.at(height), mv.orientation)?;

        match mv.action {
            WireAction::Found(col) => {
                let at = self.topmost_at(col)?;
                found(&mut self.board, &mut self.player, at)?;
            }
            WireAction::FoundWithShaman(col) => {
                let at = self.topmost_at(col)?;
                found_with_shaman(&mut self.board, &mut self.player, at)?;
            }
            WireAction::Expand(col, terrain) => {
                let at = self.topmost_at(col)?;
                let id = self
                    .board
                    .lookup(at)
                    .and_then(|c| c.settlement)
                    .ok_or(SessionError::NoSettlementAt(at))?;
                expand(&mut self.board, &mut self.player, &self.rules, id, terrain)?;
            }
            WireAction::Build(kind, col) => {
                let at = self.topmost_at(col)?;
                build(&mut self.board, &mut self.player, &self.rules, kind, at)?;
            }
        }
        Ok(())
    }

    fn topmost_at(&self, column: Column) -> Result<Location, SessionError> {
        self.board
            .topmost(column)
            .map(|c| c.location)
            .ok_or(SessionError::Settlement(SettlementError::NoHexAtLocation(
                column.at(0),
            )))
    }

    /// Picks a random legal placement of `tile` followed by a founding, and
    /// applies it.
    pub fn choose_move(&mut self, tile: Tile) -> Result<WireMove, SessionError> {
        if self.player.remaining(PieceKind::Settler) == 0 {
            return Err(SessionError::NoLegalMove);
        }
        let mut placements = legal_placements(&self.board);
        placements.shuffle(&mut self.rng);

        for p in placements {
            let mut trial = self.board.clone();
            place(&mut trial, tile, p.volcano, p.orientation)?;
            let mut targets = foundable_cells(&trial);
            targets.shuffle(&mut self.rng);

            for at in targets {
                let mv = WireMove {
                    game: self.game.clone(),
                    number: self.moves + 1,
                    tile,
                    volcano: p.volcano.column(),
                    orientation: p.orientation,
                    action: WireAction::Found(at.column()),
                };
                if self.apply_move(&mv).is_ok() {
                    return Ok(mv);
                }
            }
        }
        Err(SessionError::NoLegalMove)
    }

    /// Final score line for the local player.
    pub fn game_over(&self, game: &str) -> GameOver {
        GameOver {
            game: game.to_string(),
            scores: vec![(self.player_id.clone(), self.player.score())],
        }
    }

    /// Handles one command, writing its response to `out`.
    ///
    /// Returns `Ok(false)` when the session should end.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<bool> {
        match cmd {
            Command::Move(mv) => match self.apply_move(&mv) {
                Ok(score) => writeln!(out, "ok score {score}")?,
                Err(e) => writeln!(out, "error {e}")?,
            },
            Command::Go { tile } => {
                let tile = tile.unwrap_or_else(|| random_tile(&mut self.rng));
                match self.choose_move(tile) {
                    Ok(mv) => writeln!(out, "{}", format_move(&mv))?,
                    Err(e) => writeln!(out, "error {e}")?,
                }
            }
            Command::GameOver { game } => {
                writeln!(out, "{}", format_game_over(&self.game_over(&game)))?;
            }
            Command::Pieces => {
                let p = self.player.pieces();
                writeln!(
                    out,
                    "pieces settlers {} sanctuaries {} playgrounds {} shamans {}",
                    p.settlers, p.sanctuaries, p.playgrounds, p.shamans
                )?;
            }
            Command::Score => writeln!(out, "score {}", self.player.score())?,
            Command::NewGame => self.new_game(),
            Command::Quit => return Ok(false),
        }
        out.flush()?;
        Ok(true)
    }
}
