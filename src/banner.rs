//! Welcome, game-won and game-over text around a session.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tracing::{debug, warn};

use crate::{model::Summary, session::SessionHooks};

pub const WELCOME_FILE: &str = "welcome.txt";
pub const GAME_WON_FILE: &str = "gamewon.txt";
pub const GAME_OVER_FILE: &str = "gameover.txt";

const WELCOME: &str = r"        _
  /\/\ (_)_ __   ___  _____      _____  ___ _ __   ___ _ __
 /    \| | '_ \ / _ \/ __\ \ /\ / / _ \/ _ \ '_ \ / _ \ '__|
/ /\/\ \ | | | |  __/\__ \\ V  V /  __/  __/ |_) |  __/ |
\/    \/_|_| |_|\___||___/ \_/\_/ \___|\___| .__/ \___|_|
                                    ALPHA  |_|
";

const GAME_WON: &str = r" *****************************************
 *  Every mine is flagged and every safe *
 *  cell is open. You cleared the field! *
 *****************************************

 CONGRATULATIONS!
 YOU HAVE WON!
 SCORE:";

const GAME_OVER: &str = r"  ___   _   __  __ ___    _____   _____ ___
 / __| /_\ |  \/  | __|  / _ \ \ / / __| _ \
| (_ |/ _ \| |\/| | _|  | (_) \ V /| _||   /
 \___/_/ \_\_|  |_|___|  \___/ \_/ |___|_|_\
";

/// Banner texts for the three points of a game where one is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banners {
    welcome: String,
    game_won: String,
    game_over: String,
}

impl Default for Banners {
    fn default() -> Self {
        Self {
            welcome: WELCOME.to_string(),
            game_won: GAME_WON.to_string(),
            game_over: GAME_OVER.to_string(),
        }
    }
}

fn read_banner(dir: &Path, name: &str, fallback: &str) -> String {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(text) => {
            debug!(path = %path.display(), "loaded banner");
            text
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "banner unavailable, using built-in text");
            fallback.to_string()
        }
    }
}

impl Banners {
    pub fn new(
        welcome: impl Into<String>,
        game_won: impl Into<String>,
        game_over: impl Into<String>,
    ) -> Self {
        Self {
            welcome: welcome.into(),
            game_won: game_won.into(),
            game_over: game_over.into(),
        }
    }

    /// Loads `welcome.txt`, `gamewon.txt` and `gameover.txt` from `dir`.
    /// Files that cannot be read fall back to the built-in text.
    pub fn load(dir: Option<&Path>) -> Self {
        match dir {
            None => Self::default(),
            Some(dir) => Self {
                welcome: read_banner(dir, WELCOME_FILE, WELCOME),
                game_won: read_banner(dir, GAME_WON_FILE, GAME_WON),
                game_over: read_banner(dir, GAME_OVER_FILE, GAME_OVER),
            },
        }
    }
}

fn write_block(out: &mut dyn Write, text: &str) -> io::Result<()> {
    for line in text.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

impl SessionHooks for Banners {
    fn on_start(&mut self, out: &mut dyn Write) -> io::Result<()> {
        write_block(out, &self.welcome)?;
        writeln!(out)
    }

    /// The score goes on the banner's last line.
    fn on_win(&mut self, out: &mut dyn Write, summary: &Summary) -> io::Result<()> {
        let score = summary.score().unwrap_or_default();
        let text = self.game_won.trim_end();
        let (head, last) = match text.rsplit_once('\n') {
            Some((head, last)) => (Some(head), last),
            None => (None, text),
        };
        if let Some(head) = head {
            write_block(out, head)?;
        }
        writeln!(out, "{last} {score:.2}")?;
        writeln!(out)
    }

    fn on_loss(&mut self, out: &mut dyn Write, _summary: &Summary) -> io::Result<()> {
        writeln!(out)?;
        write_block(out, &self.game_over)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Outcome;

    use super::*;

    fn summary(outcome: Outcome) -> Summary {
        Summary {
            outcome,
            rows: 5,
            cols: 5,
            rounds_completed: 30,
            cells_revealed: 23,
            mines_marked: 2,
        }
    }

    fn render(f: impl FnOnce(&mut Banners, &mut Vec<u8>) -> io::Result<()>) -> String {
        let mut banners = Banners::new("hello\n", "you won\nscore:\n", "boom");
        let mut out = Vec::new();
        f(&mut banners, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn score_follows_last_line_of_win_banner() {
        let text = render(|b, out| b.on_win(out, &summary(Outcome::Won { score: 83.333 })));
        assert_eq!(text, "you won\nscore: 83.33\n\n");
    }

    #[test]
    fn single_line_win_banner() {
        let mut banners = Banners::new("", "Score:", "");
        let mut out = Vec::new();
        banners
            .on_win(&mut out, &summary(Outcome::Won { score: 100.0 }))
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Score: 100.00\n\n");
    }

    #[test]
    fn start_loss_and_quit_text() {
        assert_eq!(render(|b, out| b.on_start(out)), "hello\n\n");
        assert_eq!(
            render(|b, out| b.on_loss(out, &summary(Outcome::Quit))),
            "\nboom\n\n"
        );
        assert_eq!(
            render(|b, out| b.on_quit(out, &summary(Outcome::Quit))),
            "\nQuitting the game...\nBye!\n"
        );
    }

    #[test]
    fn loads_banners_from_directory_with_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(WELCOME_FILE), "custom welcome\n").unwrap();

        let banners = Banners::load(Some(dir.path()));
        assert_eq!(banners.welcome, "custom welcome\n");
        assert_eq!(banners.game_won, GAME_WON);
        assert_eq!(banners.game_over, GAME_OVER);

        assert_eq!(Banners::load(None), Banners::default());
    }
}
