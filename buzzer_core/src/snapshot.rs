use serde::{Deserialize, Serialize};

use crate::format::format_elapsed;
use crate::player::Player;
use crate::round::Phase;

/// Point-in-time copy of a session for rendering.
///
/// Built under one read of the session, so `winner` and `elapsed_secs` always
/// describe the same transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub phase: Phase,
    pub winner: Option<String>,
    pub elapsed_secs: f64,
    /// Accepted buzzes so far; bumps once per Armed -> Buzzed edge.
    pub buzz_seq: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            phase: Phase::Idle,
            winner: None,
            elapsed_secs: 0.0,
            buzz_seq: 0,
        }
    }
}

impl Snapshot {
    pub fn is_winner(&self, name: &str) -> bool {
        self.winner.as_deref() == Some(name)
    }

    /// No team has been created yet.
    #[inline]
    pub fn roster_is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Unclaimed names, in roster order.
    pub fn available(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| !p.connected)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn elapsed_label(&self, european: bool) -> String {
        format_elapsed(self.elapsed_secs, self.phase, european)
    }
}
