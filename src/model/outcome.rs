use crate::data::Pos;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Every cell is revealed or marked. Higher scores mean fewer rounds per cell.
    Won { score: f64 },
    /// A mine was revealed.
    Lost { at: Pos },
    /// The player quit or input ran out.
    Quit,
}

/// Counters at the moment the game ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub outcome: Outcome,
    pub rows: usize,
    pub cols: usize,
    pub rounds_completed: u32,
    pub cells_revealed: usize,
    pub mines_marked: usize,
}

impl Summary {
    pub fn score(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Won { score } => Some(score),
            _ => None,
        }
    }
}
