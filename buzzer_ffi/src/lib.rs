#![allow(clippy::missing_safety_doc)]

//! C ABI over one [`GameSession`], for host UIs (web server, desktop shell,
//! scripting runtime) that own transport, polling and admin gating.
//!
//! Structured data (snapshots, rosters, command outcomes) crosses the boundary
//! as JSON bytes that must be released with `buzzer_bytes_free`.

use std::ptr;

use buzzer_core::{BuzzOutcome, Phase, ResumeOutcome, SessionCfg};
use buzzer_session::GameSession;
use tracing::warn;

/// FFI ABI version for buzzer_ffi.
///
/// Bump this when any `#[repr(C)]` struct layout or exported function signature changes.
pub const BUZZER_FFI_VERSION: u32 = 1;

/// Null handle or argument.
pub const BUZZER_ERR_ARG: i32 = -1;
/// Argument was not valid UTF-8.
pub const BUZZER_ERR_UTF8: i32 = -2;

#[no_mangle]
pub extern "C" fn buzzer_ffi_version() -> u32 {
    BUZZER_FFI_VERSION
}

/// Opaque handle exposed over FFI.
pub struct BuzzerSession {
    inner: GameSession,
}

/// FFI string view (UTF-8 bytes).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct BuzzerStr {
    pub ptr: *const u8,
    pub len: usize,
}

impl BuzzerStr {
    pub const fn null() -> Self {
        Self { ptr: ptr::null(), len: 0 }
    }

    unsafe fn as_str(&self) -> Result<&str, i32> {
        if self.ptr.is_null() {
            return Err(BUZZER_ERR_ARG);
        }
        let bytes = std::slice::from_raw_parts(self.ptr, self.len);
        std::str::from_utf8(bytes).map_err(|_| BUZZER_ERR_UTF8)
    }
}

/// Owned byte buffer (JSON). Empty (null) on failure.
#[repr(C)]
pub struct BuzzerBytes {
    pub ptr: *mut u8,
    pub len: usize,
}

impl BuzzerBytes {
    fn empty() -> Self {
        Self { ptr: ptr::null_mut(), len: 0 }
    }

    fn from_vec(buf: Vec<u8>) -> Self {
        let mut boxed = buf.into_boxed_slice();
        let ptr = boxed.as_mut_ptr();
        let len = boxed.len();
        // freed by buzzer_bytes_free
        std::mem::forget(boxed);
        Self { ptr, len }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuzzerPhase {
    Idle = 0,
    Armed = 1,
    Buzzed = 2,
}

impl From<Phase> for BuzzerPhase {
    fn from(p: Phase) -> Self {
        match p {
            Phase::Idle => BuzzerPhase::Idle,
            Phase::Armed => BuzzerPhase::Armed,
            Phase::Buzzed => BuzzerPhase::Buzzed,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuzzerBuzzResult {
    Won = 0,
    NotArmed = 1,
    AlreadyBuzzed = 2,
    UnknownPlayer = 3,
    InvalidArgument = 4,
}

/// Buzz result. `elapsed_secs` is meaningful only for `Won`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct BuzzerBuzz {
    pub result: BuzzerBuzzResult,
    pub elapsed_secs: f64,
}

/// Cheap poll without JSON. Fetch the winner's name via `buzzer_snapshot_json`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct BuzzerStatus {
    pub phase: BuzzerPhase,
    pub elapsed_secs: f64,
    pub buzz_seq: u64,
    pub player_count: u32,
}

unsafe fn session<'a>(h: *const BuzzerSession) -> Option<&'a GameSession> {
    h.as_ref().map(|s| &s.inner)
}

fn to_json_bytes<T: serde::Serialize>(value: &T) -> BuzzerBytes {
    match serde_json::to_vec(value) {
        Ok(buf) => BuzzerBytes::from_vec(buf),
        Err(e) => {
            warn!(error = %e, "failed to encode ffi payload");
            BuzzerBytes::empty()
        }
    }
}

/// Install a `RUST_LOG`-driven tracing subscriber.
///
/// Returns 0 on success, 1 if a global subscriber was already set.
#[no_mangle]
pub extern "C" fn buzzer_init_logging() -> i32 {
    let res = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    if res.is_ok() {
        0
    } else {
        1
    }
}

/// Create a session. `cfg_toml` may be null for defaults.
///
/// Returns null if the config does not parse.
///
/// The handle is safe to call from many threads at once; mutations serialize
/// on the session's internal lock.
#[no_mangle]
pub unsafe extern "C" fn buzzer_session_new(cfg_toml: BuzzerStr) -> *mut BuzzerSession {
    let cfg = if cfg_toml.ptr.is_null() {
        SessionCfg::default()
    } else {
        let parsed = cfg_toml
            .as_str()
            .map_err(|rc| format!("config is not utf-8 (rc {rc})"))
            .and_then(|s| SessionCfg::from_toml_str(s).map_err(|e| e.to_string()));
        match parsed {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(error = %e, "rejecting session config");
                return ptr::null_mut();
            }
        }
    };
    Box::into_raw(Box::new(BuzzerSession {
        inner: GameSession::new(cfg),
    }))
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_session_free(h: *mut BuzzerSession) {
    if !h.is_null() {
        drop(Box::from_raw(h));
    }
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_poll_interval_ms(h: *const BuzzerSession) -> u64 {
    match session(h) {
        Some(s) => s.poll_interval().as_millis() as u64,
        None => 0,
    }
}

/// 1 if the roster grew, 0 for a blank/duplicate no-op, negative on bad arguments.
#[no_mangle]
pub unsafe extern "C" fn buzzer_add_player(h: *const BuzzerSession, name: BuzzerStr) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    match name.as_str() {
        Ok(name) => s.add_player(name) as i32,
        Err(rc) => rc,
    }
}

/// 1 on first connect, 0 for unknown/already connected, negative on bad arguments.
#[no_mangle]
pub unsafe extern "C" fn buzzer_connect_player(h: *const BuzzerSession, name: BuzzerStr) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    match name.as_str() {
        Ok(name) => s.connect_player(name) as i32,
        Err(rc) => rc,
    }
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_clear_all(h: *const BuzzerSession) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    s.clear_all();
    0
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_reset_team(h: *const BuzzerSession) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    s.reset_team();
    0
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_start_fresh_round(h: *const BuzzerSession) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    s.start_fresh_round();
    0
}

/// 1 if resumed, 0 if there was no buzzed round to resume.
#[no_mangle]
pub unsafe extern "C" fn buzzer_resume_round(h: *const BuzzerSession) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    match s.resume_round() {
        ResumeOutcome::Resumed { .. } => 1,
        ResumeOutcome::NotBuzzed { .. } => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_reset(h: *const BuzzerSession) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    s.reset();
    0
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_buzz(h: *const BuzzerSession, name: BuzzerStr) -> BuzzerBuzz {
    let invalid = BuzzerBuzz {
        result: BuzzerBuzzResult::InvalidArgument,
        elapsed_secs: 0.0,
    };
    let Some(s) = session(h) else { return invalid };
    let Ok(name) = name.as_str() else { return invalid };

    match s.buzz(name) {
        BuzzOutcome::Won { elapsed_secs } => BuzzerBuzz {
            result: BuzzerBuzzResult::Won,
            elapsed_secs,
        },
        BuzzOutcome::NotArmed => BuzzerBuzz {
            result: BuzzerBuzzResult::NotArmed,
            elapsed_secs: 0.0,
        },
        BuzzOutcome::AlreadyBuzzed { .. } => BuzzerBuzz {
            result: BuzzerBuzzResult::AlreadyBuzzed,
            elapsed_secs: 0.0,
        },
        BuzzOutcome::UnknownPlayer => BuzzerBuzz {
            result: BuzzerBuzzResult::UnknownPlayer,
            elapsed_secs: 0.0,
        },
    }
}

/// Fill `out` with the current status. Returns 0, or negative on bad arguments.
#[no_mangle]
pub unsafe extern "C" fn buzzer_status(h: *const BuzzerSession, out: *mut BuzzerStatus) -> i32 {
    let Some(s) = session(h) else { return BUZZER_ERR_ARG };
    let Some(out) = out.as_mut() else { return BUZZER_ERR_ARG };
    let snap = s.snapshot();
    *out = BuzzerStatus {
        phase: snap.phase.into(),
        elapsed_secs: snap.elapsed_secs,
        buzz_seq: snap.buzz_seq,
        player_count: snap.players.len() as u32,
    };
    0
}

/// Full snapshot as JSON. Free with `buzzer_bytes_free`.
#[no_mangle]
pub unsafe extern "C" fn buzzer_snapshot_json(h: *const BuzzerSession) -> BuzzerBytes {
    match session(h) {
        Some(s) => to_json_bytes(&s.snapshot()),
        None => BuzzerBytes::empty(),
    }
}

/// Unclaimed names as a JSON array. Free with `buzzer_bytes_free`.
#[no_mangle]
pub unsafe extern "C" fn buzzer_list_available_json(h: *const BuzzerSession) -> BuzzerBytes {
    match session(h) {
        Some(s) => to_json_bytes(&s.list_available()),
        None => BuzzerBytes::empty(),
    }
}

/// Apply one JSON command (`{"op":"buzz","name":"Alice"}`) and return the JSON
/// outcome. Empty on a malformed command.
#[no_mangle]
pub unsafe extern "C" fn buzzer_apply_json(h: *const BuzzerSession, cmd: BuzzerStr) -> BuzzerBytes {
    let Some(s) = session(h) else { return BuzzerBytes::empty() };
    let Ok(src) = cmd.as_str() else { return BuzzerBytes::empty() };
    match s.apply_json(src) {
        Ok(out) => BuzzerBytes::from_vec(out.into_bytes()),
        Err(e) => {
            warn!(error = %e, "rejecting ffi command");
            BuzzerBytes::empty()
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn buzzer_bytes_free(b: BuzzerBytes) {
    if !b.ptr.is_null() {
        let slice_ptr = ptr::slice_from_raw_parts_mut(b.ptr, b.len);
        drop(Box::from_raw(slice_ptr));
    }
}
