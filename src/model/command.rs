use std::str::FromStr;

use crate::error::CommandError;

/// Raw coordinates as typed; checked against the board by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub row: i32,
    pub col: i32,
}

/// One line of player input.
///
/// `reveal`, `mark` and `guess` take exactly a row and a column, the others
/// take nothing. Short spellings `r`, `m`, `g`, `h` and `q` are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Target),
    Mark(Target),
    Guess(Target),
    NoFog,
    Help,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reveal(_) => "reveal",
            Self::Mark(_) => "mark",
            Self::Guess(_) => "guess",
            Self::NoFog => "nofog",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

fn int_arg<'a>(
    command: &'static str,
    expected: &'static str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<i32, CommandError> {
    let token = tokens
        .next()
        .ok_or(CommandError::MissingArgument { command, expected })?;
    token.parse().map_err(|_| CommandError::InvalidArgument {
        token: token.to_owned(),
        expected,
    })
}

fn target<'a>(
    command: &'static str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<Target, CommandError> {
    let row = int_arg(command, "row index", tokens)?;
    let col = int_arg(command, "column index", tokens)?;
    Ok(Target { row, col })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(CommandError::EmptyCommand)?;

        let command = match name {
            "reveal" | "r" => Self::Reveal(target("reveal", &mut tokens)?),
            "mark" | "m" => Self::Mark(target("mark", &mut tokens)?),
            "guess" | "g" => Self::Guess(target("guess", &mut tokens)?),
            "nofog" => Self::NoFog,
            "help" | "h" => Self::Help,
            "quit" | "q" => Self::Quit,
            other => return Err(CommandError::Unrecognized(other.to_owned())),
        };

        match tokens.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}
