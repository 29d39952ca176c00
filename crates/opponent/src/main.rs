//! Practice opponent CLI
//!
//! Pick a move for a position, apply a move to a FEN, play an interactive
//! game on stdin, or let the opponent play itself.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chess_core::{Color, Position, START_FEN};
use clap::{Args, Parser, Subcommand, ValueEnum};
use opponent::{
    apply_move_text, Opponent, OpponentConfig, PracticeError, PracticeGame, SelfPlay,
    SelfPlayConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "opponent", version, about = "Chess practice opponent")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Choose a move for a position
    Choose {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[command(flatten)]
        opponent: OpponentArgs,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply a move to a position and report the result as JSON
    Apply {
        #[arg(long)]
        fen: String,
        #[arg(long = "move")]
        mv: String,
    },
    /// Play against the opponent on stdin
    Play {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[arg(long, value_enum, default_value_t = Side::White)]
        color: Side,
        #[command(flatten)]
        opponent: OpponentArgs,
    },
    /// Let the opponent play both sides
    Selfplay {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[arg(long, default_value_t = 200)]
        plies: u32,
        #[command(flatten)]
        opponent: OpponentArgs,
    },
}

/// Opponent options. Flags override values from `--config`.
#[derive(Args)]
struct OpponentArgs {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fallback search depth in plies
    #[arg(long)]
    depth: Option<u8>,
    /// UCI engine to consult first
    #[arg(long)]
    engine: Option<PathBuf>,
    /// Delegate skill level (0-20)
    #[arg(long)]
    strength: Option<i32>,
    /// Delegate move timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl OpponentArgs {
    fn build(&self) -> Result<Opponent> {
        let mut config = match &self.config {
            Some(path) => OpponentConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => OpponentConfig::default(),
        };
        if let Some(depth) = self.depth {
            config.search_depth = depth;
        }
        if let Some(engine) = &self.engine {
            config.delegate_path = Some(engine.clone());
        }
        if let Some(strength) = self.strength {
            config.delegate_strength = strength;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.delegate_timeout_ms = timeout_ms;
        }
        config.validate()?;
        Ok(Opponent::new(config))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> Result<()> {
    // stdout carries results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Cmd::Choose {
            fen,
            opponent,
            json,
        } => choose(&fen, &opponent, json),
        Cmd::Apply { fen, mv } => {
            let report = apply_move_text(&fen, &mv)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Cmd::Play {
            fen,
            color,
            opponent,
        } => play(&fen, color.into(), &opponent),
        Cmd::Selfplay {
            fen,
            plies,
            opponent,
        } => {
            let mut opponent = opponent.build()?;
            let start = parse_fen(&fen)?;
            let runner = SelfPlay::new(SelfPlayConfig {
                max_plies: plies,
                verbose: true,
            });
            let record = runner.run(&mut opponent, start)?;
            opponent.shutdown();
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
    }
}

fn parse_fen(fen: &str) -> Result<Position> {
    Position::from_fen(fen).with_context(|| format!("invalid FEN '{fen}'"))
}

fn choose(fen: &str, args: &OpponentArgs, json: bool) -> Result<()> {
    let pos = parse_fen(fen)?;
    let mut opponent = args.build()?;
    let decision = opponent.choose_move(&pos)?;
    opponent.shutdown();

    match (decision.chosen(), json) {
        (Some(chosen), true) => {
            let out = serde_json::json!({
                "move": chosen.mv.to_string(),
                "source": chosen.source,
                "score": chosen.score,
                "nodes": chosen.nodes,
            });
            println!("{out}");
        }
        (Some(chosen), false) => println!("{}", chosen.mv),
        (None, true) => println!("{}", serde_json::json!({ "move": null })),
        (None, false) => println!("(none)"),
    }
    Ok(())
}

fn play(fen: &str, human: Color, args: &OpponentArgs) -> Result<()> {
    let mut game = PracticeGame::new(args.build()?, human, parse_fen(fen)?);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    println!("You play {:?}. Enter moves like e2e4, or quit.", game.human());

    loop {
        if let Some(chosen) = game.reply()? {
            println!("Computer plays {}", chosen.mv);
        }
        print_board(game.position());
        println!("{}", game.status());
        if game.position().is_game_over() {
            break;
        }

        print!("> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let text = line.trim();
        match text {
            "" => continue,
            "quit" | "exit" => break,
            _ => {}
        }

        match game.play_human(text) {
            Ok(_) => {}
            Err(
                e @ (PracticeError::IllegalMove { .. }
                | PracticeError::InvalidMoveText { .. }
                | PracticeError::NotYourTurn),
            ) => println!("{e}"),
            Err(e) => bail!(e),
        }
    }

    game.opponent_mut().shutdown();
    Ok(())
}

fn print_board(pos: &Position) {
    for rank in (0..8u8).rev() {
        let row: String = (0..8u8)
            .map(|file| pos.piece_at(rank * 8 + file).map_or('.', |pc| pc.symbol()))
            .flat_map(|c| [c, ' '])
            .collect();
        println!("{} {}", rank + 1, row.trim_end());
    }
    println!("  a b c d e f g h");
}
