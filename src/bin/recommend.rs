use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use movie_recommender::{build_default_recommender, Recommender};

const SUGGESTION_LIMIT: usize = 5;

/// Recommend movies by genre similarity
#[derive(Parser, Debug)]
#[command(name = "recommend")]
#[command(version)]
struct Args {
    /// Movie title to search for
    title: String,

    /// Number of recommendations to return
    #[arg(short = 'n', long = "top-n", default_value_t = 5)]
    top_n: usize,

    /// Optional path to a custom movies.csv file
    #[arg(long, env = "MOVIES_CSV")]
    csv: Option<PathBuf>,
}

/// Whether a lookup produced any recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Found,
    NoMatch,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Found => ExitCode::SUCCESS,
            Outcome::NoMatch => ExitCode::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let recommender = build_default_recommender(args.csv.as_deref())?;
    report(&recommender, &args.title, args.top_n, out)
}

/// Writes recommendations for `title`, or the no-match message and any suggestions
fn report(
    recommender: &Recommender,
    title: &str,
    top_n: usize,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let recommendations = recommender.recommend(title, top_n)?;

    if recommendations.is_empty() {
        writeln!(out, "No matches found for '{}'.", title)?;
        let suggestions = recommender.suggest_titles(title, SUGGESTION_LIMIT);
        write_suggestions(out, &suggestions)?;
        return Ok(Outcome::NoMatch);
    }

    writeln!(out, "Recommendations for '{}':", title)?;
    for rec in recommendations {
        writeln!(out, "  - {}", rec)?;
    }
    Ok(Outcome::Found)
}

fn write_suggestions(out: &mut impl Write, suggestions: &[String]) -> io::Result<()> {
    if suggestions.is_empty() {
        return Ok(());
    }
    writeln!(out, "Did you mean:")?;
    for suggestion in suggestions {
        writeln!(out, "  - {}", suggestion)?;
    }
    Ok(())
}
