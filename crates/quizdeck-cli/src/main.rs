//! quizdeck CLI — the user-facing command-line interface.

use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use quizdeck_core::loader;
use quizdeck_core::model::QuizOutcome;
use quizdeck_core::session::{self, Quiz, StdinAnswers};
use quizdeck_core::shuffle;

mod config;

const WELCOME_MESSAGE: &str = "Welcome to the quiz!";
const ENTER_MESSAGE: &str = "Press [Enter] to start the quiz";

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Timed CSV quiz runner for the terminal")]
struct Cli {
    /// Path to the two-column problems CSV [default: problems.csv]
    #[arg(long)]
    file: Option<PathBuf>,

    /// Total quiz duration in seconds [default: 30]
    #[arg(long)]
    timeout: Option<u64>,

    /// Randomize question order [default: true]
    #[arg(long, value_name = "BOOL")]
    shuffle: Option<bool>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck_core=info".parse().unwrap())
                .add_directive("quizdeck_cli=info".parse().unwrap()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Exit explicitly in both cases: after a timeout the abandoned answer
    // loop may still be blocked on stdin, and runtime shutdown would wait
    // for it.
    match run(cli).await {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::load_config_from(cli.config.as_deref())?;
    let settings = config.resolve(cli.file, cli.timeout, cli.shuffle);
    tracing::debug!(?settings, "resolved settings");

    let mut problems = loader::load_problems(&settings.file)?;
    shuffle::maybe_shuffle(&mut problems, settings.shuffle);

    println!("{WELCOME_MESSAGE}");
    println!("{ENTER_MESSAGE}");
    wait_for_enter().context("failed to read start signal")?;

    // The deadline clock starts only after Enter.
    let quiz = Quiz::new(problems, StdinAnswers, io::stdout());
    let outcome = session::run_timed(quiz, Duration::from_secs(settings.timeout_secs)).await?;

    match outcome {
        QuizOutcome::Completed(card) => {
            println!("You have got {} / {}", card.score, card.asked);
        }
        QuizOutcome::TimedOut => {
            println!("Time is up after {}s", settings.timeout_secs);
        }
    }

    Ok(())
}

fn wait_for_enter() -> io::Result<()> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}
