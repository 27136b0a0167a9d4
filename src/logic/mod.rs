mod render;

use tracing::{debug, info};

use crate::{
    data::{Board, CellStatus, Pos},
    error::CommandError,
    model::{Command, Outcome, Summary, Target},
};

/// What the session should do after a command was accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Continue,
    /// The command list was requested.
    Help,
    Finished(Outcome),
}

/// Live game: the board plus the player's marks and the round counters.
///
/// `cells_revealed` always equals the number of revealed cells and
/// `mines_marked` the number of marked cells holding a mine, so the game is
/// won exactly when every mine is marked and every other cell is revealed.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    status: Vec<CellStatus>,
    rounds_completed: u32,
    cells_revealed: usize,
    mines_marked: usize,
    fog_lifted: bool,
}

fn bounded(index: i32, length: usize) -> Result<usize, CommandError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < length)
        .ok_or(CommandError::OutOfBounds { index, length })
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            status: vec![CellStatus::Hidden; board.cell_count()],
            board,
            rounds_completed: 0,
            cells_revealed: 0,
            mines_marked: 0,
            fog_lifted: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self, pos: Pos) -> Option<CellStatus> {
        self.board.index(pos).map(|i| self.status[i])
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn cells_revealed(&self) -> usize {
        self.cells_revealed
    }

    pub fn mines_marked(&self) -> usize {
        self.mines_marked
    }

    /// Whether the next frame shows the mines.
    pub fn fog_lifted(&self) -> bool {
        self.fog_lifted
    }

    pub fn is_won(&self) -> bool {
        self.mines_marked + self.cells_revealed == self.board.cell_count()
    }

    pub fn score(&self) -> f64 {
        100.0 * self.board.cell_count() as f64 / f64::from(self.rounds_completed.max(1))
    }

    pub fn summary(&self, outcome: Outcome) -> Summary {
        Summary {
            outcome,
            rows: self.board.rows(),
            cols: self.board.cols(),
            rounds_completed: self.rounds_completed,
            cells_revealed: self.cells_revealed,
            mines_marked: self.mines_marked,
        }
    }

    /// Checks `target` against the board; the row is checked first.
    fn resolve(&self, target: Target) -> Result<Pos, CommandError> {
        let row = bounded(target.row, self.board.rows())?;
        let col = bounded(target.col, self.board.cols())?;
        Ok(Pos::new(row, col))
    }

    /// Resolves `target` to a cell that has not been revealed yet.
    fn unrevealed(&self, target: Target) -> Result<(Pos, usize), CommandError> {
        let pos = self.resolve(target)?;
        let index = pos.col + pos.row * self.board.cols();
        if self.status[index] == CellStatus::Revealed {
            return Err(CommandError::AlreadyRevealed {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok((pos, index))
    }

    fn reveal(&mut self, target: Target) -> Result<Step, CommandError> {
        let (pos, index) = self.unrevealed(target)?;
        if self.board.is_mine(pos) {
            return Ok(Step::Finished(Outcome::Lost { at: pos }));
        }

        self.status[index] = CellStatus::Revealed;
        self.cells_revealed += 1;
        self.rounds_completed += 1;
        Ok(Step::Continue)
    }

    fn mark(&mut self, target: Target) -> Result<Step, CommandError> {
        let (pos, index) = self.unrevealed(target)?;
        if self.board.is_mine(pos) && self.status[index] != CellStatus::Marked {
            self.mines_marked += 1;
        }

        self.status[index] = CellStatus::Marked;
        self.rounds_completed += 1;
        Ok(Step::Continue)
    }

    fn guess(&mut self, target: Target) -> Result<Step, CommandError> {
        let (pos, index) = self.unrevealed(target)?;
        if self.board.is_mine(pos) && self.status[index] == CellStatus::Marked {
            self.mines_marked -= 1;
        }

        self.status[index] = CellStatus::Guessed;
        self.rounds_completed += 1;
        Ok(Step::Continue)
    }

    /// Applies one command. Rejected commands leave the game untouched.
    pub fn apply(&mut self, command: Command) -> Result<Step, CommandError> {
        debug!(command = command.name(), round = self.rounds_completed, "applying command");

        let step = match command {
            Command::Reveal(target) => self.reveal(target)?,
            Command::Mark(target) => self.mark(target)?,
            Command::Guess(target) => self.guess(target)?,
            Command::NoFog => {
                self.fog_lifted = true;
                self.rounds_completed += 1;
                Step::Continue
            }
            Command::Help => {
                self.rounds_completed += 1;
                Step::Help
            }
            Command::Quit => Step::Finished(Outcome::Quit),
        };

        let step = match step {
            Step::Finished(_) => step,
            _ if self.is_won() => Step::Finished(Outcome::Won {
                score: self.score(),
            }),
            _ => step,
        };

        if let Step::Finished(outcome) = step {
            info!(?outcome, rounds = self.rounds_completed, "game finished");
        }
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use crate::seed::Seed;

    use super::*;

    fn game(seed: &str) -> Game {
        Game::new(Board::new(&seed.parse::<Seed>().unwrap()))
    }

    fn run(game: &mut Game, line: &str) -> Result<Step, CommandError> {
        game.apply(line.parse::<Command>()?)
    }

    fn counters(game: &Game) -> (u32, usize, usize) {
        (game.rounds_completed(), game.cells_revealed(), game.mines_marked())
    }

    /// The counters must always agree with the status grid.
    fn assert_consistent(game: &Game) {
        let board = game.board();
        let revealed = board
            .positions()
            .filter(|&p| game.status(p) == Some(CellStatus::Revealed))
            .count();
        let marked_mines = board
            .positions()
            .filter(|&p| board.is_mine(p) && game.status(p) == Some(CellStatus::Marked))
            .count();
        assert_eq!(game.cells_revealed(), revealed);
        assert_eq!(game.mines_marked(), marked_mines);
    }

    #[test]
    fn reveal_counts_cell_and_round() {
        let mut game = game("5 5 2 0 0 4 4");
        assert_eq!(run(&mut game, "reveal 2 2"), Ok(Step::Continue));
        assert_eq!(game.status(Pos::new(2, 2)), Some(CellStatus::Revealed));
        assert_eq!(counters(&game), (1, 1, 0));
        assert_consistent(&game);
    }

    #[test]
    fn revealing_a_mine_loses_without_a_round() {
        let mut game = game("5 5 2 0 0 4 4");
        run(&mut game, "r 1 1").unwrap();
        assert_eq!(
            run(&mut game, "reveal 0 0"),
            Ok(Step::Finished(Outcome::Lost { at: Pos::new(0, 0) }))
        );
        assert_eq!(game.rounds_completed(), 1);
        assert!(game.board().is_mine(Pos::new(0, 0)));
    }

    #[test]
    fn revealing_a_marked_mine_still_loses() {
        let mut game = game("5 5 1 3 3");
        run(&mut game, "mark 3 3").unwrap();
        assert!(matches!(
            run(&mut game, "reveal 3 3"),
            Ok(Step::Finished(Outcome::Lost { .. }))
        ));
    }

    #[test]
    fn out_of_range_changes_nothing() {
        let mut game = game("5 5 2 0 0 4 4");
        run(&mut game, "mark 1 1").unwrap();
        let before = game.clone();

        assert_eq!(
            run(&mut game, "reveal 99 0"),
            Err(CommandError::OutOfBounds { index: 99, length: 5 })
        );
        assert_eq!(
            run(&mut game, "g 0 -1"),
            Err(CommandError::OutOfBounds { index: -1, length: 5 })
        );
        assert_eq!(counters(&game), counters(&before));
        assert_eq!(game.to_string(), before.to_string());
    }

    #[test]
    fn parse_errors_change_nothing() {
        let mut game = game("5 5 2 0 0 4 4");
        assert!(run(&mut game, "reveal 1").is_err());
        assert!(run(&mut game, "help me").is_err());
        assert!(run(&mut game, "dance").is_err());
        assert_eq!(counters(&game), (0, 0, 0));
    }

    #[test]
    fn revealed_cells_cannot_be_revealed_or_marked_again() {
        let mut game = game("5 5 2 0 0 4 4");
        run(&mut game, "r 2 2").unwrap();
        for line in ["r 2 2", "m 2 2", "g 2 2"] {
            assert_eq!(
                run(&mut game, line),
                Err(CommandError::AlreadyRevealed { row: 2, col: 2 })
            );
        }
        assert_eq!(counters(&game), (1, 1, 0));
    }

    #[test]
    fn marking_counts_only_mines_once() {
        let mut game = game("5 5 2 0 0 4 4");
        run(&mut game, "mark 1 1").unwrap();
        assert_eq!(counters(&game), (1, 0, 0));
        run(&mut game, "mark 0 0").unwrap();
        run(&mut game, "mark 0 0").unwrap();
        assert_eq!(counters(&game), (3, 0, 1));
        assert_consistent(&game);
    }

    #[test]
    fn guessing_a_marked_mine_unmarks_it() {
        let mut game = game("5 5 2 0 0 4 4");
        run(&mut game, "m 4 4").unwrap();
        run(&mut game, "g 4 4").unwrap();
        assert_eq!(game.status(Pos::new(4, 4)), Some(CellStatus::Guessed));
        assert_eq!(counters(&game), (2, 0, 0));
        assert_consistent(&game);
    }

    #[test]
    fn revealing_a_marked_safe_cell() {
        let mut game = game("5 5 2 0 0 4 4");
        run(&mut game, "m 2 3").unwrap();
        run(&mut game, "r 2 3").unwrap();
        assert_eq!(game.status(Pos::new(2, 3)), Some(CellStatus::Revealed));
        assert_eq!(counters(&game), (2, 1, 0));
        assert_consistent(&game);
    }

    #[test]
    fn help_and_nofog_take_a_round() {
        let mut game = game("5 5 2 0 0 4 4");
        assert_eq!(run(&mut game, "h"), Ok(Step::Help));
        assert_eq!(run(&mut game, "nofog"), Ok(Step::Continue));
        assert!(game.fog_lifted());
        assert_eq!(counters(&game), (2, 0, 0));
    }

    #[test]
    fn quit_finishes_without_a_round() {
        let mut game = game("5 5 2 0 0 4 4");
        assert_eq!(run(&mut game, "q"), Ok(Step::Finished(Outcome::Quit)));
        assert_eq!(game.rounds_completed(), 0);
    }

    #[test]
    fn marking_mines_and_revealing_the_rest_wins() {
        let mut game = game("5 5 2 0 0 4 4");
        run(&mut game, "mark 0 0").unwrap();
        run(&mut game, "mark 4 4").unwrap();

        let safe: Vec<Pos> = game
            .board()
            .positions()
            .filter(|&p| !game.board().is_mine(p))
            .collect();
        assert_eq!(safe.len(), 23);

        let (last, rest) = safe.split_last().unwrap();
        for pos in rest {
            let step = run(&mut game, &format!("reveal {} {}", pos.row, pos.col)).unwrap();
            assert_eq!(step, Step::Continue);
            assert!(!game.is_won());
        }

        let step = run(&mut game, &format!("reveal {} {}", last.row, last.col)).unwrap();
        assert_eq!(game.mines_marked(), 2);
        assert_eq!(game.cells_revealed(), 23);
        assert_eq!(game.rounds_completed(), 25);
        assert!(game.is_won());
        assert_eq!(step, Step::Finished(Outcome::Won { score: 100.0 }));

        let summary = game.summary(Outcome::Won { score: game.score() });
        assert_eq!(summary.score(), Some(100.0 * 25.0 / 25.0));
    }

    #[test]
    fn extra_rounds_lower_the_score() {
        let mut game = game("5 5 1 0 0");
        run(&mut game, "help").unwrap();
        run(&mut game, "guess 0 0").unwrap();
        run(&mut game, "mark 0 0").unwrap();

        let rest: Vec<Pos> = game.board().positions().skip(1).collect();
        let mut last = Step::Continue;
        for pos in rest {
            last = run(&mut game, &format!("r {} {}", pos.row, pos.col)).unwrap();
        }

        assert_eq!(game.rounds_completed(), 27);
        assert_eq!(
            last,
            Step::Finished(Outcome::Won {
                score: 100.0 * 25.0 / 27.0
            })
        );
    }

    #[test]
    fn marking_a_safe_cell_does_not_complete_the_board() {
        let mut game = game("5 5 1 0 0");
        run(&mut game, "m 0 1").unwrap();
        let rest: Vec<Pos> = game.board().positions().skip(2).collect();
        for pos in rest {
            run(&mut game, &format!("r {} {}", pos.row, pos.col)).unwrap();
        }
        // (0, 0) is an unmarked mine and (0, 1) a marked safe cell.
        assert_eq!(game.cells_revealed() + game.mines_marked(), 23);
        assert!(!game.is_won());

        assert_eq!(run(&mut game, "r 0 1"), Ok(Step::Continue));
        assert!(matches!(
            run(&mut game, "m 0 0"),
            Ok(Step::Finished(Outcome::Won { .. }))
        ));
    }
}
