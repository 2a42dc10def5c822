//! # Chess Arena
//!
//! Terminal chess against another human or a background negamax search. The
//! interactive loop never blocks on the AI: the search runs on its own
//! thread, is polled once per tick, and can be cancelled at any time by an
//! undo, a restart or a quit.
//!
//! ## Usage
//! Run with `cargo run --release` for best AI performance. By default White
//! is human and Black is the AI; use `--white ai --black ai` to watch the
//! engine play itself. Diagnostics go through the standard `log` facade,
//! e.g. `RUST_LOG=debug cargo run 2>session.log`.

pub mod app;
pub mod chess;
pub mod selection;
pub mod supervisor;
pub mod tui;

use std::io;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;

use crate::app::{App, PlayerKind, SessionConfig};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum PlayerArg {
    Human,
    Ai,
}

impl From<PlayerArg> for PlayerKind {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::Human => PlayerKind::Human,
            PlayerArg::Ai => PlayerKind::Search,
        }
    }
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Who plays the white pieces
    #[clap(long, value_enum, default_value = "human")]
    white: PlayerArg,

    /// Who plays the black pieces
    #[clap(long, value_enum, default_value = "ai")]
    black: PlayerArg,

    /// Search depth in plies
    #[clap(short, long, default_value_t = 3)]
    depth: u32,

    /// Worker threads for the search pool (0 = one per CPU)
    #[clap(short, long, default_value_t = 0)]
    num_threads: usize,

    /// Bounded wait when collecting a finished search result, in seconds
    #[clap(long, default_value_t = 1)]
    result_wait_secs: u64,

    /// Seed for the fallback move picker (reproducible sessions)
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut app = App::new(SessionConfig {
        white: args.white.into(),
        black: args.black.into(),
        depth: args.depth,
        num_threads: args.num_threads,
        result_wait: Duration::from_secs(args.result_wait_secs),
        seed: args.seed,
    });

    tui::run(&mut app)?;

    // The alternate screen is gone; leave the result on the real terminal.
    match app.outcome() {
        Some(outcome) => println!("{}", outcome.to_string().bold().green()),
        None => println!("{}", "Session ended before a result.".bold()),
    }
    print!("{}", app.format_move_log());

    Ok(())
}
