//! The shared game session.
//!
//! One `GameSession` per process, constructed explicitly and handed to every
//! command handler (wrap it in an `Arc` to share across threads).
//!
//! Every mutation runs under the write side of one `RwLock` and captures `now`
//! while holding it, so a transition and its timestamp land together. Queries
//! take the read side and never see a half-applied mutation. Nothing in here
//! blocks on IO while a guard is held; logging happens after release.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use buzzer_core::{
    is_valid_name, BuzzOutcome, Clock, MonotonicClock, Phase, PlayerRegistry, ResumeOutcome,
    RoundController, SessionCfg, Snapshot,
};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct SessionState {
    roster: PlayerRegistry,
    round: RoundController,
}

impl SessionState {
    fn snapshot(&self, now: Instant) -> Snapshot {
        Snapshot {
            players: self.roster.players().to_vec(),
            phase: self.round.phase(),
            winner: self.round.winner().map(str::to_string),
            elapsed_secs: self.round.elapsed(now).as_secs_f64(),
            buzz_seq: self.round.buzz_seq(),
        }
    }
}

#[derive(Debug)]
pub struct GameSession<C: Clock = MonotonicClock> {
    cfg: SessionCfg,
    clock: C,
    state: RwLock<SessionState>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionCfg::default())
    }
}

impl GameSession {
    /// Empty roster, phase Idle, monotonic clock.
    pub fn new(cfg: SessionCfg) -> Self {
        Self::with_clock(cfg, MonotonicClock)
    }
}

impl<C: Clock> GameSession<C> {
    pub fn with_clock(cfg: SessionCfg, clock: C) -> Self {
        Self {
            cfg,
            clock,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn cfg(&self) -> &SessionCfg {
        &self.cfg
    }

    /// Cadence observers should poll [`GameSession::snapshot`] at.
    pub fn poll_interval(&self) -> Duration {
        self.cfg.poll_interval()
    }

    // Mutations are computed then assigned whole, so a guard recovered from a
    // poisoned lock still holds a consistent state.
    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("game session lock poisoned; recovering");
            self.state.clear_poison();
            poisoned.into_inner()
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("game session lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Run `f` inside the serializing boundary with `now` taken under the lock.
    fn mutate<R>(&self, f: impl FnOnce(&mut SessionState, Instant) -> R) -> R {
        let mut guard = self.write();
        let now = self.clock.now();
        f(&mut guard, now)
    }

    // --- roster ---

    /// Returns `true` if the roster grew. Blank and duplicate names are no-ops.
    pub fn add_player(&self, name: &str) -> bool {
        let added = self.mutate(|st, _| st.roster.add(name));
        if added {
            info!(player = %name, "player added");
        } else {
            debug!(player = %name, "add_player ignored (blank or duplicate)");
        }
        added
    }

    /// Returns `true` on the first connect of a known player.
    pub fn connect_player(&self, name: &str) -> bool {
        let connected = self.mutate(|st, _| st.roster.connect(name));
        if connected {
            info!(player = %name, "player connected");
        } else {
            debug!(player = %name, "connect_player ignored (unknown or already connected)");
        }
        connected
    }

    /// Unclaimed names in roster order, as of this call.
    pub fn list_available(&self) -> Vec<String> {
        self.read().roster.available()
    }

    /// Empty the roster. The round is left alone; see [`GameSession::reset_team`].
    pub fn clear_all(&self) {
        let n = self.mutate(|st, _| {
            let n = st.roster.len();
            st.roster.clear();
            n
        });
        info!(removed = n, "roster cleared");
    }

    /// Clear the roster and reset the round in one step.
    pub fn reset_team(&self) {
        let n = self.mutate(|st, _| {
            let n = st.roster.len();
            st.roster.clear();
            st.round.reset();
            n
        });
        info!(removed = n, "team reset");
    }

    // --- round ---

    pub fn start_fresh_round(&self) {
        let prev = self.mutate(|st, now| {
            let prev = st.round.phase();
            st.round.start_fresh(now);
            prev
        });
        info!(from = ?prev, "round armed");
    }

    /// Buzzed -> Armed keeping the banked time. Anything else is rejected.
    pub fn resume_round(&self) -> ResumeOutcome {
        let outcome = self.mutate(|st, now| st.round.resume(now));
        match &outcome {
            ResumeOutcome::Resumed { baseline_secs } => {
                info!(baseline_secs, "round resumed")
            }
            ResumeOutcome::NotBuzzed { phase } => {
                debug!(phase = ?phase, "resume_round rejected: nothing to resume")
            }
        }
        outcome
    }

    pub fn reset(&self) {
        let prev = self.mutate(|st, _| {
            let prev = st.round.phase();
            st.round.reset();
            prev
        });
        info!(from = ?prev, "round reset");
    }

    /// The contended operation: exactly one caller per Armed window wins,
    /// namely the first to take the write lock.
    pub fn buzz(&self, name: &str) -> BuzzOutcome {
        let strict = self.cfg.strict_roster;
        let outcome = self.mutate(|st, now| {
            if !is_valid_name(name) || (strict && !st.roster.contains(name)) {
                return BuzzOutcome::UnknownPlayer;
            }
            st.round.buzz(name, now)
        });
        match &outcome {
            BuzzOutcome::Won { elapsed_secs } => {
                info!(player = %name, elapsed_secs, "buzz accepted")
            }
            rejected => debug!(player = %name, outcome = ?rejected, "buzz rejected"),
        }
        outcome
    }

    // --- queries ---

    pub fn phase(&self) -> Phase {
        self.read().round.phase()
    }

    /// One consistent copy of roster, phase, winner and elapsed time.
    pub fn snapshot(&self) -> Snapshot {
        let guard = self.read();
        let now = self.clock.now();
        guard.snapshot(now)
    }
}
