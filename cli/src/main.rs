use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use sweeper_core::{Registry, RegistryConfig};
use sweeper_protocol::{GameResponse, Response, handle_json};

use command::{Command, HELP};

mod command;

/// Minesweeper sessions over stdin/stdout, one command per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Read JSON requests and write JSON responses
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    let registry = Registry::new(RegistryConfig { seed: args.seed });
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if args.json {
            if line.trim().is_empty() {
                continue;
            }
            writeln!(stdout, "{}", handle_json(&registry, &line)?)?;
            continue;
        }

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Request(request))) => {
                write_response(&mut stdout, &request.handle(&registry))?
            }
            Ok(Some(Command::Help)) => writeln!(stdout, "{HELP}")?,
            Ok(Some(Command::Quit)) => break,
            Err(err) => writeln!(stdout, "error: {err:#}")?,
        }
        stdout.flush()?;
    }

    log::debug!("{} games played", registry.len());
    Ok(())
}

fn write_response(out: &mut impl Write, response: &Response) -> io::Result<()> {
    match response {
        Response::Game(game) => write_game(out, game),
        Response::Error(err) => writeln!(out, "error: {}", err.detail),
    }
}

/// Hidden cells print as `.` so the grid stays readable.
fn write_game(out: &mut impl Write, game: &GameResponse) -> io::Result<()> {
    let state = if game.completed { "completed" } else { "in progress" };
    writeln!(
        out,
        "game {} ({}x{}, {} mines, {})",
        game.game_id, game.width, game.height, game.mine_count, state
    )?;
    for row in &game.grid {
        let line: String = row
            .iter()
            .map(|&marker| if marker == ' ' { '.' } else { marker })
            .collect();
        writeln!(out, "  {line}")?;
    }
    Ok(())
}
