//! The read-evaluate-render loop.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::{
    logic::{Game, Step},
    model::{Command, Outcome, Summary},
};

pub const DEFAULT_PROMPT: &str = "minesweeper-alpha: ";

pub const HELP: &str = "
Commands Available...
 - Reveal: r/reveal row col
 -   Mark: m/mark   row col
 -  Guess: g/guess  row col
 -   Help: h/help
 -   Quit: q/quit
";

/// Presentation callbacks around a game. The session itself never touches
/// files; whatever text a frontend wants to show goes through these.
pub trait SessionHooks {
    fn on_start(&mut self, out: &mut dyn Write) -> io::Result<()>;

    fn on_win(&mut self, out: &mut dyn Write, summary: &Summary) -> io::Result<()>;

    fn on_loss(&mut self, out: &mut dyn Write, summary: &Summary) -> io::Result<()>;

    fn on_quit(&mut self, out: &mut dyn Write, _summary: &Summary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Quitting the game...")?;
        writeln!(out, "Bye!")
    }
}

pub struct Session {
    game: Game,
    prompt: String,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game is won, lost or quit. Running out of input
    /// counts as quitting. Rejected commands are reported on `err` and the
    /// player is prompted again.
    pub fn run<R, W, E, H>(
        &mut self,
        mut input: R,
        out: &mut W,
        err: &mut E,
        hooks: &mut H,
    ) -> io::Result<Summary>
    where
        R: BufRead,
        W: Write,
        E: Write,
        H: SessionHooks + ?Sized,
    {
        hooks.on_start(out)?;

        let mut buf = Vec::new();
        loop {
            out.write_all(self.game.next_frame().as_bytes())?;
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                info!("input closed, ending the game");
                writeln!(out)?;
                return self.finish(Outcome::Quit, out, hooks);
            }
            let line = String::from_utf8_lossy(&buf);

            match line.parse::<Command>().and_then(|c| self.game.apply(c)) {
                Ok(Step::Continue) => writeln!(out)?,
                Ok(Step::Help) => {
                    out.write_all(HELP.as_bytes())?;
                    writeln!(out)?;
                }
                Ok(Step::Finished(outcome)) => return self.finish(outcome, out, hooks),
                Err(error) => {
                    debug!(%error, input = line.trim_end(), "rejected command");
                    writeln!(err)?;
                    writeln!(err, "Invalid Command: {error}")?;
                    writeln!(err)?;
                    err.flush()?;
                }
            }
        }
    }

    fn finish<W, H>(&self, outcome: Outcome, out: &mut W, hooks: &mut H) -> io::Result<Summary>
    where
        W: Write,
        H: SessionHooks + ?Sized,
    {
        let summary = self.game.summary(outcome);
        match outcome {
            Outcome::Won { .. } => hooks.on_win(out, &summary)?,
            Outcome::Lost { .. } => hooks.on_loss(out, &summary)?,
            Outcome::Quit => hooks.on_quit(out, &summary)?,
        }
        out.flush()?;
        Ok(summary)
    }
}
