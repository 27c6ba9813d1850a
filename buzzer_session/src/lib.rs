//! buzzer_session
//!
//! Synchronized, caller-facing layer around `buzzer_core`.
//!
//! Responsibilities:
//! - own the single roster + round state behind one serializing lock
//! - take timestamps inside that lock so buzz arbitration is exact
//! - decode outside-world commands and dispatch them
//!
//! Non-goals:
//! - no IO
//! - no async
//! - no transport, polling loop or authentication (callers own those)

pub mod command;
pub mod session;

pub use command::{parse_command, Command, CommandError, CommandOutcome};
pub use session::GameSession;
