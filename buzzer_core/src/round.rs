use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::clock::RoundTimer;

/// Phase tag visible to observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Armed,
    Buzzed,
}

/// Round phase with the data that only exists in that phase.
///
/// A segment start exists only while armed, and a winner never exists
/// without its frozen time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RoundState {
    #[default]
    Idle,
    Armed { started_at: Instant },
    Buzzed { winner: String, final_elapsed: Duration },
}

impl RoundState {
    #[inline]
    pub fn phase(&self) -> Phase {
        match self {
            RoundState::Idle => Phase::Idle,
            RoundState::Armed { .. } => Phase::Armed,
            RoundState::Buzzed { .. } => Phase::Buzzed,
        }
    }
}

/// Result of a buzz attempt. Losing is routine, not an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BuzzOutcome {
    Won { elapsed_secs: f64 },
    NotArmed,
    AlreadyBuzzed { winner: String },
    UnknownPlayer,
}

impl BuzzOutcome {
    #[inline]
    pub fn is_won(&self) -> bool {
        matches!(self, BuzzOutcome::Won { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ResumeOutcome {
    /// Clock restarted from the previously frozen total.
    Resumed { baseline_secs: f64 },
    /// Nothing to resume; state untouched.
    NotBuzzed { phase: Phase },
}

impl ResumeOutcome {
    #[inline]
    pub fn is_resumed(&self) -> bool {
        matches!(self, ResumeOutcome::Resumed { .. })
    }
}

/// Idle / Armed / Buzzed state machine driving a [`RoundTimer`].
///
/// Pure: callers pass `now` and provide any locking.
#[derive(Clone, Debug, Default)]
pub struct RoundController {
    state: RoundState,
    timer: RoundTimer,
    buzz_seq: u64,
}

impl RoundController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[inline]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn winner(&self) -> Option<&str> {
        match &self.state {
            RoundState::Buzzed { winner, .. } => Some(winner.as_str()),
            _ => None,
        }
    }

    pub fn final_elapsed(&self) -> Option<Duration> {
        match &self.state {
            RoundState::Buzzed { final_elapsed, .. } => Some(*final_elapsed),
            _ => None,
        }
    }

    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.timer.accumulated()
    }

    /// Count of accepted buzzes over the controller's lifetime.
    #[inline]
    pub fn buzz_seq(&self) -> u64 {
        self.buzz_seq
    }

    /// Any phase -> Armed, clock from zero.
    pub fn start_fresh(&mut self, now: Instant) {
        self.timer.clear();
        self.state = RoundState::Armed { started_at: now };
    }

    /// Buzzed -> Armed, clock continues from the frozen total.
    pub fn resume(&mut self, now: Instant) -> ResumeOutcome {
        match self.state {
            RoundState::Buzzed { .. } => {
                let baseline = self.timer.accumulated();
                self.state = RoundState::Armed { started_at: now };
                ResumeOutcome::Resumed {
                    baseline_secs: baseline.as_secs_f64(),
                }
            }
            _ => ResumeOutcome::NotBuzzed {
                phase: self.phase(),
            },
        }
    }

    /// Any phase -> Idle, all round data dropped.
    pub fn reset(&mut self) {
        self.timer.clear();
        self.state = RoundState::Idle;
    }

    /// First caller in an Armed window wins; everyone after is rejected.
    ///
    /// The caller must already have validated `player` against the roster.
    pub fn buzz(&mut self, player: &str, now: Instant) -> BuzzOutcome {
        let started_at = match &self.state {
            RoundState::Armed { started_at } => *started_at,
            RoundState::Buzzed { winner, .. } => {
                return BuzzOutcome::AlreadyBuzzed {
                    winner: winner.clone(),
                }
            }
            RoundState::Idle => return BuzzOutcome::NotArmed,
        };

        let total = self.timer.bank(started_at, now);
        self.state = RoundState::Buzzed {
            winner: player.to_string(),
            final_elapsed: total,
        };
        self.buzz_seq += 1;
        BuzzOutcome::Won {
            elapsed_secs: total.as_secs_f64(),
        }
    }

    /// Idle: zero. Armed: banked plus the running segment. Buzzed: frozen.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match &self.state {
            RoundState::Idle => Duration::ZERO,
            RoundState::Armed { started_at } => self.timer.running_total(*started_at, now),
            RoundState::Buzzed { final_elapsed, .. } => *final_elapsed,
        }
    }
}
