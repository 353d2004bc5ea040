//! Session runtime.
//!
//! Runs a [`GameSession`] on a tokio task. The presentation layer sends
//! [`ClientCommand`]s in and receives one [`CommandOutcome`] per command, carrying
//! the events that command produced. While a move is being animated the session
//! just sits in `Moving`; nothing advances until `AnimationsComplete` arrives.

use anyhow::{anyhow, Context};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::core::GameSession;
use crate::types::{Direction, GameEvent, SessionState};

/// Command delivered to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    Start,
    Move(Direction),
    AnimationsComplete,
}

impl ClientCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientCommand::Start => "start",
            ClientCommand::Move(_) => "move",
            ClientCommand::AnimationsComplete => "animations_complete",
        }
    }
}

/// Reply to one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub command: ClientCommand,
    /// False when the command was ignored in the current state
    pub accepted: bool,
    /// Session state after the command
    pub state: SessionState,
    pub events: Vec<GameEvent>,
}

/// Handle to a session running on a tokio task.
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    out_rx: mpsc::UnboundedReceiver<CommandOutcome>,
    task: JoinHandle<GameSession>,
}

impl SessionHandle {
    /// Spawn `session` onto the current tokio runtime.
    ///
    /// `max_pending` bounds the number of queued commands.
    pub fn spawn(session: GameSession, max_pending: usize) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>(max_pending.max(1));
        let (out_tx, out_rx) = mpsc::unbounded_channel::<CommandOutcome>();
        let task = tokio::spawn(run_session(session, cmd_rx, out_tx));

        Self {
            cmd_tx,
            out_rx,
            task,
        }
    }

    pub async fn send(&self, command: ClientCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| anyhow!("session task has stopped"))
    }

    pub async fn recv(&mut self) -> Option<CommandOutcome> {
        self.out_rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<CommandOutcome> {
        self.out_rx.try_recv().ok()
    }

    /// Send a command and wait for its outcome
    pub async fn request(&mut self, command: ClientCommand) -> anyhow::Result<CommandOutcome> {
        self.send(command).await?;
        self.recv()
            .await
            .ok_or_else(|| anyhow!("session task closed before replying"))
    }

    /// Stop the task and hand the session back
    pub async fn shutdown(self) -> anyhow::Result<GameSession> {
        drop(self.cmd_tx);
        self.task.await.context("session task panicked")
    }
}

async fn run_session(
    mut session: GameSession,
    mut cmd_rx: mpsc::Receiver<ClientCommand>,
    out_tx: mpsc::UnboundedSender<CommandOutcome>,
) -> GameSession {
    while let Some(command) = cmd_rx.recv().await {
        let accepted = match command {
            ClientCommand::Start => {
                session.start();
                true
            }
            ClientCommand::Move(direction) => session.request_move(direction),
            ClientCommand::AnimationsComplete => session.animations_complete(),
        };
        if !accepted {
            trace!(command = command.as_str(), state = %session.state(), "command ignored");
        }

        let outcome = CommandOutcome {
            command,
            accepted,
            state: session.state(),
            events: session.take_events(),
        };
        if out_tx.send(outcome).is_err() {
            debug!("outcome receiver dropped, stopping session task");
            break;
        }
    }
    session
}
