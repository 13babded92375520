use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use gitdeck::config::{self, Config};
use gitdeck::dispatch::{self, Outcome};
use gitdeck::git::{query, GitRunner};
use gitdeck::repolist::RepoStore;
use gitdeck::selector;
use gitdeck::session::Session;
use gitdeck::ui::Ui;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Repository to open directly, skipping the selector
    #[arg(value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Print the stored repository list and exit
    #[arg(long)]
    list_repos: bool,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("gitdeck: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    // git missing is fatal before any screen comes up
    let git = match GitRunner::discover() {
        Ok(git) => git,
        Err(e) => {
            eprintln!("gitdeck: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let store = RepoStore::open_default()?;

    if args.list_repos {
        for path in store.load()? {
            println!("{}", path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = Config::load()?;
    let _log_guard = init_logging()?;

    // A repository given on the command line behaves like browsing to it:
    // validated, added to the list, and opened directly.
    let mut pending = match args.repo {
        Some(path) => {
            if !query::is_work_tree(&git, &path) {
                eprintln!("gitdeck: {} is not a git working tree", path.display());
                return Ok(ExitCode::FAILURE);
            }
            store.add(&path)?;
            Some(Session::open(&git, &path))
        }
        None => None,
    };

    let mut ui = Ui::new()?;
    info!("gitdeck started");

    loop {
        let mut session = match pending.take() {
            Some(session) => session,
            None => match selector::select(&mut ui, &store, &git)? {
                Some(session) => session,
                None => break,
            },
        };

        info!(repo = %session.root.display(), "repository selected");

        match dispatch::run(&mut ui, &git, &cfg, &mut session)? {
            Outcome::ChangeRepository => continue,
            Outcome::Quit => break,
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to a file in the config dir; writing to the terminal would tear
/// up the alternate screen.
fn init_logging() -> Result<WorkerGuard> {
    let dir = config::config_dir()?;
    let appender = tracing_appender::rolling::never(dir, "gitdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("GITDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok();

    Ok(guard)
}
