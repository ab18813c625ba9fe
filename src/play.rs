//! Match loop against a human, with console I/O left to the caller.

use tracing::{debug, error, info};

use crate::engine::engine::Engine;
use crate::error::{MoveError, NetworkError, PlayError};
use crate::game::board::{Status, Symbol, SIZE};
use crate::game::game::Game;

/// Supplies the human's moves as 0-based `(row, column)`.
pub trait MoveSource {
    /// `None` ends the match early (for example on end of input).
    fn next_move(&mut self, game: &Game) -> Option<(usize, usize)>;

    /// Called when the last move from `next_move` was rejected. The game is
    /// unchanged and `next_move` will be asked again.
    fn rejected(&mut self, _error: MoveError) {}
}

/// The computer side of a match.
pub trait Opponent {
    /// The symbol this side plays.
    fn symbol(&self) -> Symbol;

    /// `None` when there is no empty cell left.
    fn select_move(&mut self, game: &Game) -> Result<Option<(usize, usize)>, NetworkError>;
}

impl Opponent for Engine {
    fn symbol(&self) -> Symbol {
        self.computer_symbol()
    }

    fn select_move(&mut self, game: &Game) -> Result<Option<(usize, usize)>, NetworkError> {
        Engine::select_move(self, game)
    }
}

/// Receives the board after every change, read-only.
pub trait BoardRenderer {
    fn render(&mut self, cells: &[[Symbol; SIZE]; SIZE], text: fn(Symbol) -> &'static str);
}

/// Plays `game` to the end, alternating between `human` and `computer`.
///
/// Returns the final status, or `Status::InProgress` if `human` ran out of
/// moves first.
///
/// # Errors
/// Fails if the computer's network fails or if it picks a move the game
/// rejects; the game is left as it was before that move.
pub fn play_game<C, M, R>(
    computer: &mut C,
    game: &mut Game,
    human: &mut M,
    renderer: &mut R,
) -> Result<Status, PlayError>
where
    C: Opponent + ?Sized,
    M: MoveSource + ?Sized,
    R: BoardRenderer + ?Sized,
{
    renderer.render(game.board().cells(), Symbol::as_str);

    while !game.check_status().is_terminal() {
        let mover = game.current_player().symbol();

        if mover != computer.symbol() {
            let Some((row, column)) = human.next_move(game) else {
                info!("human resigned");
                return Ok(game.check_status());
            };
            if let Err(error) = game.try_move(row, column) {
                debug!(row, column, %error, "move rejected");
                human.rejected(error);
                continue;
            }
        } else {
            let Some((row, column)) = computer.select_move(game)? else {
                break;
            };
            debug!(row, column, "computer move");
            if let Err(source) = game.try_move(row, column) {
                error!(row, column, %source, "computer produced an illegal move");
                return Err(PlayError::IllegalComputerMove { row, column, source });
            }
        }

        renderer.render(game.board().cells(), Symbol::as_str);
    }

    let status = game.check_status();
    info!(?status, "game over");
    Ok(status)
}
