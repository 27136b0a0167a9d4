use std::fmt;

use crate::data::{CellStatus, Pos};

use super::Game;

impl Game {
    fn write_cell(&self, f: &mut fmt::Formatter<'_>, pos: Pos, status: CellStatus) -> fmt::Result {
        let mine = self.board.is_mine(pos);
        if self.fog_lifted && mine {
            return f.write_str(match status {
                CellStatus::Hidden => "|< >",
                CellStatus::Marked => "|<F>",
                CellStatus::Guessed => "|<?>",
                CellStatus::Revealed => "| * ",
            });
        }

        match status {
            CellStatus::Hidden => f.write_str("|   "),
            CellStatus::Marked => f.write_str("| F "),
            CellStatus::Guessed => f.write_str("| ? "),
            CellStatus::Revealed => match self.board.adjacent_mines(pos) {
                Some(count) => write!(f, "| {count} "),
                None => f.write_str("| * "),
            },
        }
    }

    /// Renders the board and lowers the fog again if `nofog` lifted it.
    pub fn next_frame(&mut self) -> String {
        let frame = self.to_string();
        self.fog_lifted = false;
        frame
    }
}

/// The board as shown between rounds: a rounds counter, one line per row
/// with the row index in front, and the column indices underneath.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Rounds Completed: {}", self.rounds_completed)?;
        writeln!(f)?;

        let cols = self.board.cols();
        for row in 0..self.board.rows() {
            write!(f, " {row} ")?;
            for col in 0..cols {
                let pos = Pos::new(row, col);
                self.write_cell(f, pos, self.status[col + row * cols])?;
            }
            writeln!(f, "| ")?;
        }

        write!(f, "    ")?;
        for col in 0..cols - 1 {
            write!(f, " {col}  ")?;
        }
        writeln!(f, " {} ", cols - 1)?;
        writeln!(f)
    }
}
