use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use movie_wolp::app::{AppError, AppState, Runtime};
use movie_wolp::library::LibraryConfig;
use movie_wolp::logging;
use movie_wolp::terminal::Terminal;

/// Search local movie and TV show folders; prints the chosen folder.
#[derive(Parser, Debug)]
#[command(name = "movie-wolp", version, about)]
struct Args {
    /// JSON file with `movie_dirs` and `tv_dirs`.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Movie library folder (repeatable).
    #[arg(long = "movies", value_name = "DIR")]
    movies: Vec<PathBuf>,

    /// TV show library folder (repeatable).
    #[arg(long = "tv", value_name = "DIR")]
    tv: Vec<PathBuf>,

    /// Maximum number of results shown (1-99).
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Directory for log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _logging = logging::init(args.log_dir.clone());

    match run(args) {
        Ok(Some(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "movie-wolp failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<Option<PathBuf>, AppError> {
    let mut config = LibraryConfig::load_or_default(&args.config)?;
    config.merge_cli(args.movies, args.tv, args.limit);
    config.validate()?;

    let mut state = AppState::new(&config);
    state.load();

    let terminal = Terminal::new()?;
    Runtime::new(state, terminal).run()
}
