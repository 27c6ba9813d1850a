//! Command adapter: turn outside-world requests into session calls.
//!
//! Transport and authentication stay with the caller. This module only
//! decodes a request (JSON) into a [`Command`] and dispatches it.

use buzzer_core::{BuzzOutcome, Clock, ResumeOutcome, Snapshot};
use serde::{Deserialize, Serialize};

use crate::session::GameSession;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Every operation the session exposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    // admin
    AddPlayer { name: String },
    ClearAll,
    ResetTeam,
    StartFreshRound,
    ResumeRound,
    Reset,
    // player
    ConnectPlayer { name: String },
    Buzz { name: String },
    // observer
    Snapshot,
    ListAvailable,
}

impl Command {
    /// Belongs to the admin surface; gating is the caller's job.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Command::AddPlayer { .. }
                | Command::ClearAll
                | Command::ResetTeam
                | Command::StartFreshRound
                | Command::ResumeRound
                | Command::Reset
        )
    }

    /// Mutates the session (goes through the write lock).
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Command::Snapshot | Command::ListAvailable)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Roster operations: whether anything changed.
    Changed(bool),
    /// Unconditional transitions.
    Done,
    Buzz(BuzzOutcome),
    Resume(ResumeOutcome),
    Snapshot(Snapshot),
    Available(Vec<String>),
}

/// Decode one JSON command, e.g. `{"op":"buzz","name":"Alice"}`.
pub fn parse_command(src: &str) -> Result<Command, CommandError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(CommandError::Empty);
    }
    Ok(serde_json::from_str(src)?)
}

impl<C: Clock> GameSession<C> {
    pub fn apply(&self, cmd: Command) -> CommandOutcome {
        match cmd {
            Command::AddPlayer { name } => CommandOutcome::Changed(self.add_player(&name)),
            Command::ConnectPlayer { name } => {
                CommandOutcome::Changed(self.connect_player(&name))
            }
            Command::ClearAll => {
                self.clear_all();
                CommandOutcome::Done
            }
            Command::ResetTeam => {
                self.reset_team();
                CommandOutcome::Done
            }
            Command::StartFreshRound => {
                self.start_fresh_round();
                CommandOutcome::Done
            }
            Command::ResumeRound => CommandOutcome::Resume(self.resume_round()),
            Command::Reset => {
                self.reset();
                CommandOutcome::Done
            }
            Command::Buzz { name } => CommandOutcome::Buzz(self.buzz(&name)),
            Command::Snapshot => CommandOutcome::Snapshot(self.snapshot()),
            Command::ListAvailable => CommandOutcome::Available(self.list_available()),
        }
    }

    /// Decode and apply a JSON command, returning the JSON outcome.
    pub fn apply_json(&self, src: &str) -> Result<String, CommandError> {
        let cmd = parse_command(src)?;
        Ok(serde_json::to_string(&self.apply(cmd))?)
    }
}
