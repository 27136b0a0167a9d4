//! Error types for seed loading, command handling and startup.

use std::{io, path::PathBuf};

/// Exit code for a missing or extra command line argument.
pub const EXIT_USAGE: u8 = 1;
/// Exit code for a seed file that cannot be found or read.
pub const EXIT_SEED_NOT_FOUND: u8 = 2;
/// Exit code for a seed file with a bad token or a rule violation.
pub const EXIT_SEED_MALFORMED: u8 = 3;

/// Reasons a seed description is rejected by the board builder.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("Cannot create a mine field with that many rows and/or columns! ({rows}x{cols})")]
    Dimension { rows: i32, cols: i32 },

    #[error("Invalid mine count {count} (expected 1 to {max})")]
    MineCount { count: i32, max: i32 },

    /// `found` is `None` when the input ended before the token.
    #[error("Incorrect Datatype Detected: expected {expected} at token {position}, found {}", found_text(.found))]
    MalformedToken {
        expected: &'static str,
        position: usize,
        found: Option<String>,
    },

    #[error("Mine Coordinate Out of Bounds: {value} is not a valid {axis}")]
    OutOfBounds { axis: &'static str, value: i32 },

    #[error("Duplicate mine at ({row}, {col})")]
    DuplicateMine { row: usize, col: usize },
}

fn found_text(found: &Option<String>) -> String {
    match found {
        Some(token) => format!("`{token}`"),
        None => "end of input".to_string(),
    }
}

/// Recoverable errors for a single line typed during play.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("no command entered")]
    EmptyCommand,

    #[error("Command not recognized! (`{0}`)")]
    Unrecognized(String),

    #[error("`{command}` expects a {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{token}` is not a valid {expected}")]
    InvalidArgument {
        token: String,
        expected: &'static str,
    },

    #[error("Command not recognized! (unexpected `{0}`)")]
    TrailingInput(String),

    #[error("Index {index} out of bounds for length {length}")]
    OutOfBounds { index: i32, length: usize },

    #[error("cell ({row}, {col}) is already revealed")]
    AlreadyRevealed { row: usize, col: usize },
}

impl CommandError {
    /// Whether the error comes from tokenizing rather than from the board.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCommand
                | Self::MissingArgument { .. }
                | Self::InvalidArgument { .. }
                | Self::TrailingInput(_)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures that end the process before or outside the game loop.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("Usage: minesweeper-alpha SEED_FILE_PATH")]
    Usage,

    #[error("Seed File Not Found Error: {}: {source}", .path.display())]
    SeedNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Seed File Not Found Error: cannot read {}: {source}", .path.display())]
    SeedUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Seed File Malformed Error: {0}")]
    SeedMalformed(#[from] SeedError),

    #[error("Cannot generate seed: {0}")]
    Generate(#[source] SeedError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl FatalError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage | Self::Generate(_) | Self::Config(_) | Self::Io(_) => EXIT_USAGE,
            Self::SeedNotFound { .. } | Self::SeedUnreadable { .. } => EXIT_SEED_NOT_FOUND,
            Self::SeedMalformed(_) => EXIT_SEED_MALFORMED,
        }
    }
}
