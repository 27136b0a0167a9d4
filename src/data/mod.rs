use crate::seed::Seed;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellStatus {
    #[default]
    Hidden,
    Revealed,
    Marked,
    Guessed,
}

/// Static mine layout with the adjacency count of every cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    mine_count: usize,
    mines: Vec<bool>,
    adjacent: Vec<u8>,
}

fn count_adjacent_mines(mines: &[bool], index: usize, rows: usize, cols: usize) -> u8 {
    let row = index / cols;
    let col = index % cols;
    let mut count = 0;

    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }

            let new_row = row as i32 + dr;
            let new_col = col as i32 + dc;

            if new_row >= 0 && new_row < rows as i32 && new_col >= 0 && new_col < cols as i32 {
                let adj_index = (new_col as usize) + (new_row as usize) * cols;
                if mines[adj_index] {
                    count += 1;
                }
            }
        }
    }

    count
}

impl Board {
    pub fn new(seed: &Seed) -> Self {
        let (rows, cols) = (seed.rows(), seed.cols());
        let mut mines = vec![false; rows * cols];
        for pos in seed.mines() {
            mines[pos.col + pos.row * cols] = true;
        }

        let adjacent = (0..mines.len())
            .map(|i| {
                if mines[i] {
                    0
                } else {
                    count_adjacent_mines(&mines, i, rows, cols)
                }
            })
            .collect();

        Self {
            rows,
            cols,
            mine_count: seed.mines().len(),
            mines,
            adjacent,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.col + pos.row * self.cols)
    }

    pub fn is_mine(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|i| self.mines[i])
    }

    /// Number of mines around `pos`, or `None` when `pos` is off the board
    /// or is itself a mine.
    pub fn adjacent_mines(&self, pos: Pos) -> Option<u8> {
        let i = self.index(pos)?;
        (!self.mines[i]).then_some(self.adjacent[i])
    }

    /// Row-major positions of every cell.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Pos::new(row, col)))
    }
}
