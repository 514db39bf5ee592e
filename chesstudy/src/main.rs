//! chesstudy - command-line front end for the chess study core.
//!
//! Three subcommands exercise the library crates:
//!
//! 1. **`linearize`**: parses a PGN file and prints its move list as a flat
//!    token line (or JSON), replaying every move and variation on the way.
//! 2. **`play`**: runs a sequence of coordinate moves through a game session
//!    and prints the SAN of each move, the final status and the game PGN.
//! 3. **`board`**: prints a text diagram of a position.
//!
//! Logs go to stderr and are filtered through `RUST_LOG` (default `info`),
//! so stdout only carries command output.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::PlayerArg;

/// Top-level CLI arguments.
#[derive(Parser)]
#[command(name = "chesstudy", about = "Chess study tools: PGN move lists and game sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a PGN game (with its variations) into a move list.
    Linearize {
        /// PGN file to read.
        file: PathBuf,
        /// Print the tokens as JSON instead of a text line.
        #[arg(long)]
        json: bool,
    },
    /// Play coordinate moves (`e2e4`, `e7e8n`) through a game session.
    Play {
        /// Starting position; the standard one when omitted.
        #[arg(long)]
        fen: Option<String>,
        /// Who drives White.
        #[arg(long, value_enum, default_value_t = PlayerArg::Human)]
        white: PlayerArg,
        /// Who drives Black.
        #[arg(long, value_enum, default_value_t = PlayerArg::Human)]
        black: PlayerArg,
        /// Moves to play, in order.
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Print a position as a text board.
    Board {
        /// Position to print; the standard one when omitted.
        #[arg(long)]
        fen: Option<String>,
        /// Show the board from Black's side.
        #[arg(long)]
        reversed: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Linearize { file, json } => commands::linearize(&file, json)?,
        Commands::Play {
            fen,
            white,
            black,
            moves,
        } => commands::play(fen.as_deref(), white, black, &moves)?,
        Commands::Board { fen, reversed } => commands::board(fen.as_deref(), reversed)?,
    };
    print!("{output}");

    Ok(())
}
