//! Adapter module - the bridge between the rules engine and a presentation layer
//!
//! The core never calls into rendering or animation code. Instead a front end
//! drives it through messages:
//!
//! 1. **Start**: generate the level; the reply carries the initial spawns
//! 2. **Move**: accepted only while waiting for input; the reply carries the
//!    `Moved` batch (placements and pending merges) to animate
//! 3. **AnimationsComplete**: merges settle, a tile spawns, win/lose is checked
//!
//! Each command gets exactly one reply, even when it is ignored, so a client can
//! always wait for an answer.
//!
//! # Implementation
//!
//! - [`runtime`]: the session runs on a **tokio** task behind mpsc channels
//! - [`protocol`]: line-delimited JSON forms of commands and events (**serde**)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Core: {"type":"start"}
//! Core -> Client: {"type":"ack","seq":1,"command":"start","accepted":true,"state":"waitingInput"}
//! Core -> Client: {"type":"spawned","seq":2,"tile":0,"cell":{"x":1,"y":3},"value":2}
//! Client -> Core: {"type":"move","direction":"left"}
//! Core -> Client: {"type":"moved","seq":7,"direction":"left","placements":[...],"merges":[],"travel_ms":200}
//! Client -> Core: {"type":"animations_complete"}
//! ```

pub mod protocol;
pub mod runtime;

pub use tile_merge_core as core;
pub use tile_merge_types as types;

// Re-export protocol types for convenience
pub use protocol::{parse_command, CommandMessage, OutboundJson};
pub use runtime::{ClientCommand, CommandOutcome, SessionHandle};
