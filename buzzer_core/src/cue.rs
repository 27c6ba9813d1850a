//! Observer-side edge detection for the buzz cue.
//!
//! Observers poll snapshots; the sound/animation must play once per accepted
//! buzz, not once per poll. `BuzzCue` remembers the last buzz sequence it saw
//! and fires only when a newer one shows up in the Buzzed phase.

use crate::round::Phase;
use crate::snapshot::Snapshot;

#[derive(Clone, Debug, PartialEq)]
pub struct CueEvent {
    pub winner: String,
    pub elapsed_secs: f64,
}

#[derive(Clone, Debug, Default)]
pub struct BuzzCue {
    last_seq: Option<u64>,
}

impl BuzzCue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest snapshot; returns the cue to fire, if any.
    ///
    /// The first snapshot only primes the detector, so an observer joining
    /// while a winner is already on screen stays quiet.
    pub fn observe(&mut self, snap: &Snapshot) -> Option<CueEvent> {
        let prev = self.last_seq.replace(snap.buzz_seq)?;
        // Comparing sequences also catches two wins with the Armed phase
        // between them missed by the poll.
        if snap.phase != Phase::Buzzed || snap.buzz_seq <= prev {
            return None;
        }
        Some(CueEvent {
            winner: snap.winner.clone()?,
            elapsed_secs: snap.elapsed_secs,
        })
    }

    /// Forget history; the next snapshot primes again.
    pub fn clear(&mut self) {
        self.last_seq = None;
    }
}
