use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, error::ErrorKind};
use minesweeper_alpha::{
    banner::Banners,
    config::Config,
    data::Board,
    error::FatalError,
    logic::Game,
    seed::{self, Seed},
    session::Session,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "minesweeper-alpha", about = "Console minesweeper played on a seed file", version)]
struct Args {
    /// Seed file describing the mine field
    #[arg(value_name = "SEED_FILE_PATH", required_unless_present = "generate")]
    seed: Option<PathBuf>,

    /// JSON config file (defaults to $MINESWEEPER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a random seed description instead of playing
    #[arg(
        long,
        num_args = 3,
        value_names = ["ROWS", "COLS", "MINES"],
        conflicts_with = "seed"
    )]
    generate: Option<Vec<usize>>,

    /// Makes --generate reproducible
    #[arg(long, requires = "generate")]
    rng_seed: Option<u64>,
}

fn generate(dimensions: &[usize], rng_seed: Option<u64>) -> Result<(), FatalError> {
    let &[rows, cols, mines] = dimensions else {
        return Err(FatalError::Usage);
    };

    let seed = match rng_seed {
        Some(value) => Seed::random(rows, cols, mines, &mut StdRng::seed_from_u64(value)),
        None => Seed::random(rows, cols, mines, &mut rand::rng()),
    }
    .map_err(FatalError::Generate)?;

    let mut out = io::stdout().lock();
    write!(out, "{seed}")?;
    out.flush()?;
    Ok(())
}

fn run(args: Args) -> Result<(), FatalError> {
    if let Some(dimensions) = args.generate {
        return generate(&dimensions, args.rng_seed);
    }

    let config = Config::load(args.config.as_deref())?;

    let path = args.seed.ok_or(FatalError::Usage)?;
    let seed = seed::read_seed_file(&path)?;
    info!(path = %path.display(), rows = seed.rows(), cols = seed.cols(), "starting game");

    let mut banners = Banners::load(config.banner_dir.as_deref());
    let mut session = Session::new(Game::new(Board::new(&seed))).with_prompt(config.prompt);

    let summary = session.run(
        io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &mut banners,
    )?;
    info!(?summary, "session ended");
    Ok(())
}

/// Exit code for a rejected command line. Help and version output are not
/// failures; everything else clap rejects is a usage error.
fn parse_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => FatalError::Usage.exit_code(),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            let code = parse_exit_code(&err);
            if code != 0 {
                eprintln!();
                eprintln!("{}", FatalError::Usage);
            }
            return ExitCode::from(code);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!();
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
