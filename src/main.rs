//! Headless runner (default binary).
//!
//! Stands in for the presentation layer: every event is written to stdout as a
//! JSON line and animations are acknowledged immediately.
//!
//! ```text
//! tile-merge [SEED] [MAX_MOVES]   play with a seeded random policy
//! tile-merge --stdin [SEED]       read JSON commands from stdin
//! ```
//!
//! Grid size and win value come from `TILE_MERGE_*` environment variables;
//! log verbosity from `RUST_LOG` (default `info`, written to stderr).

use std::io::{BufWriter, Stdout, Write};

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tile_merge::adapter::{parse_command, ClientCommand, CommandOutcome, OutboundJson, SessionHandle};
use tile_merge::core::{GameSession, SessionConfig, SimpleRng};
use tile_merge::types::{Direction, SessionState};

const DEFAULT_SEED: u32 = 1;
const DEFAULT_MAX_MOVES: u32 = 10_000;
const MAX_PENDING_COMMANDS: usize = 8;

struct Args {
    stdin: bool,
    seed: u32,
    max_moves: u32,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut stdin = false;
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--stdin" => stdin = true,
                flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
                _ => positional.push(arg),
            }
        }
        if positional.len() > 2 {
            bail!("expected at most SEED and MAX_MOVES, got {} arguments", positional.len());
        }

        let seed = match positional.first() {
            Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
            None => DEFAULT_SEED,
        };
        let max_moves = match positional.get(1) {
            Some(s) => s.parse().with_context(|| format!("invalid move limit {s:?}"))?,
            None => DEFAULT_MAX_MOVES,
        };

        Ok(Self {
            stdin,
            seed,
            max_moves,
        })
    }
}

/// Writes outcomes as numbered JSON lines
struct Printer {
    seq: u64,
    out: BufWriter<Stdout>,
}

impl Printer {
    fn new() -> Self {
        Self {
            seq: 0,
            out: BufWriter::new(std::io::stdout()),
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn emit(&mut self, outcome: &CommandOutcome) -> Result<()> {
        let seq = self.next_seq();
        let ack = OutboundJson::ack(seq, &outcome.command, outcome.accepted, outcome.state);
        writeln!(self.out, "{}", ack.to_line()?)?;

        for event in &outcome.events {
            let seq = self.next_seq();
            writeln!(self.out, "{}", OutboundJson::from_event(seq, event).to_line()?)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = SessionConfig::from_env();
    info!(
        width = config.width,
        height = config.height,
        win = config.win_value,
        seed = args.seed,
        "starting session"
    );

    let session = GameSession::new(config, args.seed).context("invalid session configuration")?;
    let handle = SessionHandle::spawn(session, MAX_PENDING_COMMANDS);
    let mut printer = Printer::new();

    let session = if args.stdin {
        run_stdin(handle, &mut printer).await?
    } else {
        autoplay(handle, &mut printer, args.seed, args.max_moves).await?
    };

    info!(
        state = %session.state(),
        rounds = session.round(),
        highest = ?session.highest_value(),
        "session finished"
    );
    Ok(())
}

async fn autoplay(
    mut handle: SessionHandle,
    printer: &mut Printer,
    seed: u32,
    max_moves: u32,
) -> Result<GameSession> {
    // Separate stream so the policy does not perturb spawn randomness.
    let mut policy = SimpleRng::new(seed ^ 0x9E37_79B9);

    let mut outcome = handle.request(ClientCommand::Start).await?;
    printer.emit(&outcome)?;

    let mut moves = 0;
    while outcome.state == SessionState::WaitingInput && moves < max_moves {
        let direction = Direction::ALL[policy.next_range(4) as usize];
        outcome = handle.request(ClientCommand::Move(direction)).await?;
        printer.emit(&outcome)?;
        moves += 1;

        if outcome.state == SessionState::Moving {
            outcome = handle.request(ClientCommand::AnimationsComplete).await?;
            printer.emit(&outcome)?;
        }
    }

    handle.shutdown().await
}

async fn run_stdin(mut handle: SessionHandle, printer: &mut Printer) -> Result<GameSession> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!(error = %err, "skipping command");
                continue;
            }
        };

        let outcome = handle.request(command).await?;
        printer.emit(&outcome)?;
        if outcome.state.is_terminal() {
            break;
        }
    }

    handle.shutdown().await
}
