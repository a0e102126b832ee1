//! Islander -- a rules engine session for the hex island tile game.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one line each. Logs go to stderr and are filtered through `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::prelude::*;

use islander::config::Rules;
use islander::engine::Session;
use islander::protocol::parse_command;

struct Args {
    rules: Option<String>,
    player: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        rules: None,
        player: "islander".to_string(),
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rules" => {
                parsed.rules = Some(args.next().ok_or("--rules needs a file path")?);
            }
            "--player" => {
                parsed.player = args.next().ok_or("--player needs an id")?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(parsed)
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Runs the session loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> ExitCode {
    init_logging();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: islander [--rules FILE] [--player ID]");
            return ExitCode::from(2);
        }
    };

    let rules = match &args.rules {
        Some(path) => match Rules::load(path) {
            Ok(r) => r,
            Err(e) => {
                error!(%path, error = %e, "cannot load rules");
                return ExitCode::from(2);
            }
        },
        None => Rules::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut session = Session::new(rules, args.player);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                if writeln!(out, "error {e}").and_then(|()| out.flush()).is_err() {
                    break;
                }
                continue;
            }
        };

        match session.handle(cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!(error = %e, "cannot write response");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
