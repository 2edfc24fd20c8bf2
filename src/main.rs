use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use calci::calculator::{evaluate, format_number};
use calci::{CalciConfig, Session};

/// Keypad calculator.
///
/// Reads input lines from stdin and prints the display after each one.
/// Digits and operators are key presses, `{Name}` is a named key such as
/// `{Enter}`, `{Backspace}` or `{Escape}`, and `[label]` clicks a keypad
/// button such as `[C]`, `[R]` or `[=]`.
#[derive(Parser, Debug)]
#[command(name = "calci", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override how long the error marker is shown
    #[arg(long, value_name = "MS")]
    flash_delay_ms: Option<u64>,

    /// Evaluate one expression and exit
    #[arg(short, long, value_name = "EXPR", allow_hyphen_values = true)]
    eval: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Evaluate one expression, printing the result to `out` or the error to
/// `err`.
fn eval_once(expr: &str, out: &mut impl Write, err: &mut impl Write) -> Result<ExitCode> {
    match evaluate(expr) {
        Ok(value) => {
            writeln!(out, "{}", format_number(value))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(kind = e.kind(), "evaluation failed");
            writeln!(err, "Error: {}", e)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    if let Some(expr) = cli.eval {
        return eval_once(&expr, &mut std::io::stdout(), &mut std::io::stderr());
    }

    let mut config = CalciConfig::load(cli.config.as_deref())?;
    if let Some(ms) = cli.flash_delay_ms {
        config.flash_delay_ms = ms;
    }
    tracing::debug!(?config, "starting session");

    let mut session = Session::new(&config, std::io::stdout().lock());
    session.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(ExitCode::SUCCESS)
}
