//! Protocol module - JSON message types for the presentation bridge
//!
//! Line-delimited JSON. Every message has `type` and `seq`.
//!
//! Inbound (presentation -> core):
//!
//! ```text
//! {"type":"start"}
//! {"type":"move","direction":"left"}
//! {"type":"animations_complete"}
//! ```
//!
//! Outbound (core -> presentation): one `ack` per command followed by the events
//! that command produced (`state_changed`, `spawned`, `moved`, `merge_settled`,
//! `game_won`, `game_lost`).

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::runtime::ClientCommand;
use crate::types::{
    Direction, GameEvent, MergeNotice, Position, SessionState, TilePlacement, TileSpawn,
};

// ============== Presentation -> Core ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandMessage {
    Start,
    Move { direction: String },
    AnimationsComplete,
}

impl CommandMessage {
    pub fn into_command(self) -> anyhow::Result<ClientCommand> {
        match self {
            CommandMessage::Start => Ok(ClientCommand::Start),
            CommandMessage::AnimationsComplete => Ok(ClientCommand::AnimationsComplete),
            CommandMessage::Move { direction } => Direction::from_str(&direction)
                .map(ClientCommand::Move)
                .ok_or_else(|| anyhow!("unknown direction {direction:?}")),
        }
    }
}

/// Parse one inbound JSON line
pub fn parse_command(line: &str) -> anyhow::Result<ClientCommand> {
    let msg: CommandMessage =
        serde_json::from_str(line.trim()).context("malformed command message")?;
    msg.into_command()
}

// ============== Core -> Presentation ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellJson {
    pub x: u16,
    pub y: u16,
}

impl From<Position> for CellJson {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementJson {
    pub tile: u32,
    pub from: CellJson,
    pub to: CellJson,
}

impl From<&TilePlacement> for PlacementJson {
    fn from(p: &TilePlacement) -> Self {
        Self {
            tile: p.tile.0,
            from: p.from.into(),
            to: p.to.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeJson {
    pub survivor: u32,
    pub absorbed: [u32; 2],
    pub cell: CellJson,
    pub value: u32,
}

impl From<&MergeNotice> for MergeJson {
    fn from(m: &MergeNotice) -> Self {
        Self {
            survivor: m.survivor.0,
            absorbed: [m.absorbed[0].0, m.absorbed[1].0],
            cell: m.cell.into(),
            value: m.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundJson {
    Ack {
        seq: u64,
        command: String,
        accepted: bool,
        state: String,
    },
    StateChanged {
        seq: u64,
        from: String,
        to: String,
    },
    Spawned {
        seq: u64,
        tile: u32,
        cell: CellJson,
        value: u32,
    },
    Moved {
        seq: u64,
        direction: String,
        placements: Vec<PlacementJson>,
        merges: Vec<MergeJson>,
        travel_ms: u32,
    },
    MergeSettled {
        seq: u64,
        tile: u32,
        cell: CellJson,
        value: u32,
    },
    GameWon {
        seq: u64,
    },
    GameLost {
        seq: u64,
    },
}

impl OutboundJson {
    pub fn ack(seq: u64, command: &ClientCommand, accepted: bool, state: SessionState) -> Self {
        OutboundJson::Ack {
            seq,
            command: command.as_str().to_string(),
            accepted,
            state: state.as_str().to_string(),
        }
    }

    pub fn from_event(seq: u64, event: &GameEvent) -> Self {
        fn spawn_parts(s: &TileSpawn) -> (u32, CellJson, u32) {
            (s.tile.0, s.cell.into(), s.value)
        }

        match event {
            GameEvent::StateChanged { from, to } => OutboundJson::StateChanged {
                seq,
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            },
            GameEvent::Spawned(s) => {
                let (tile, cell, value) = spawn_parts(s);
                OutboundJson::Spawned {
                    seq,
                    tile,
                    cell,
                    value,
                }
            }
            GameEvent::Moved(batch) => OutboundJson::Moved {
                seq,
                direction: batch.direction.as_str().to_string(),
                placements: batch.placements.iter().map(PlacementJson::from).collect(),
                merges: batch.merges.iter().map(MergeJson::from).collect(),
                travel_ms: batch.travel_ms,
            },
            GameEvent::MergeSettled(s) => {
                let (tile, cell, value) = spawn_parts(s);
                OutboundJson::MergeSettled {
                    seq,
                    tile,
                    cell,
                    value,
                }
            }
            GameEvent::GameWon => OutboundJson::GameWon { seq },
            GameEvent::GameLost => OutboundJson::GameLost { seq },
        }
    }

    pub fn to_line(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("failed to encode outbound message")
    }
}
