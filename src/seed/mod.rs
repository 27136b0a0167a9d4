//! Seed descriptions: the whitespace separated integer format a board is built from.
//!
//! ```text
//! rows cols mine_count
//! row col        (mine_count times)
//! ```

use std::{collections::HashSet, fmt, fs, io, path::Path, str::FromStr, str::SplitWhitespace};

use rand::Rng;
use tracing::{debug, warn};

use crate::{
    data::Pos,
    error::{FatalError, SeedError},
};

pub const MIN_SIDE: i32 = 5;
pub const MAX_SIDE: i32 = 10;

/// A validated seed: dimensions in range, mine count in range, every mine
/// on the board and no mine listed twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seed {
    rows: usize,
    cols: usize,
    mines: Vec<Pos>,
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    fn next_int(&mut self, expected: &'static str) -> Result<i32, SeedError> {
        self.position += 1;
        let token = self.inner.next();
        token
            .and_then(|t| t.parse::<i32>().ok())
            .ok_or_else(|| SeedError::MalformedToken {
                expected,
                position: self.position,
                found: token.map(str::to_owned),
            })
    }
}

fn check_dimensions(rows: i32, cols: i32) -> Result<(), SeedError> {
    let side = MIN_SIDE..=MAX_SIDE;
    if side.contains(&rows) && side.contains(&cols) {
        Ok(())
    } else {
        Err(SeedError::Dimension { rows, cols })
    }
}

fn check_mine_count(rows: i32, cols: i32, count: i32) -> Result<(), SeedError> {
    let max = rows * cols - 1;
    if (1..=max).contains(&count) {
        Ok(())
    } else {
        Err(SeedError::MineCount { count, max })
    }
}

fn coordinate(value: i32, limit: usize, axis: &'static str) -> Result<usize, SeedError> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v < limit)
        .ok_or(SeedError::OutOfBounds { axis, value })
}

fn saturating_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl Seed {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mines(&self) -> &[Pos] {
        &self.mines
    }

    /// Places `mine_count` mines uniformly at random, walking the cells in
    /// row-major order and drawing each one with probability
    /// `mines_left / cells_left`.
    pub fn random<R>(rows: usize, cols: usize, mine_count: usize, rng: &mut R) -> Result<Self, SeedError>
    where
        R: Rng,
    {
        let (r, c) = (saturating_i32(rows), saturating_i32(cols));
        check_dimensions(r, c)?;
        check_mine_count(r, c, saturating_i32(mine_count))?;

        let length = rows * cols;
        let mut mines = Vec::with_capacity(mine_count);
        let mut mines_left = mine_count;
        for (index, cells_left) in (1..=length).rev().enumerate() {
            if rng.random_ratio(mines_left as u32, cells_left as u32) {
                mines.push(Pos::new(index / cols, index % cols));
                mines_left -= 1;
            }
        }

        debug!(rows, cols, mine_count, "generated random seed");
        Ok(Self { rows, cols, mines })
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(text);
        let rows = tokens.next_int("row count")?;
        let cols = tokens.next_int("column count")?;
        let count = tokens.next_int("mine count")?;

        check_dimensions(rows, cols)?;
        check_mine_count(rows, cols, count)?;

        let (rows, cols) = (rows as usize, cols as usize);
        let mut mines = Vec::with_capacity(count as usize);
        let mut seen = HashSet::with_capacity(count as usize);
        for _ in 0..count {
            let row = coordinate(tokens.next_int("mine row")?, rows, "row")?;
            let col = coordinate(tokens.next_int("mine column")?, cols, "column")?;
            let pos = Pos::new(row, col);
            if !seen.insert(pos) {
                return Err(SeedError::DuplicateMine { row, col });
            }
            mines.push(pos);
        }

        let leftover = tokens.inner.count();
        if leftover > 0 {
            warn!(leftover, "ignoring tokens after the last mine coordinate");
        }

        Ok(Self { rows, cols, mines })
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.rows, self.cols, self.mines.len())?;
        for pos in &self.mines {
            writeln!(f, "{} {}", pos.row, pos.col)?;
        }
        Ok(())
    }
}

/// Reads and validates the seed file at `path`.
pub fn read_seed_file(path: &Path) -> Result<Seed, FatalError> {
    let bytes = fs::read(path).map_err(|source| {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            FatalError::SeedNotFound { path, source }
        } else {
            FatalError::SeedUnreadable { path, source }
        }
    })?;

    let seed = String::from_utf8_lossy(&bytes).parse::<Seed>()?;
    debug!(path = %path.display(), rows = seed.rows, cols = seed.cols, mines = seed.mines.len(), "loaded seed file");
    Ok(seed)
}
