//! buzzer_core
//!
//! Pure round/timer state machine for a "first to respond" contest.
//!
//! No locking, no IO: every transition takes `now` from the caller, which is
//! expected to serialize mutations (see `buzzer_session`).

pub mod cfg;
pub mod clock;
pub mod cue;
pub mod format;
pub mod player;
pub mod round;
pub mod snapshot;

pub use cfg::{CfgError, SessionCfg};
pub use clock::{Clock, ManualClock, MonotonicClock, RoundTimer};
pub use cue::{BuzzCue, CueEvent};
pub use player::{is_valid_name, Player, PlayerRegistry};
pub use round::{BuzzOutcome, Phase, ResumeOutcome, RoundController, RoundState};
pub use snapshot::Snapshot;
