//! Elapsed-time labels for observers.
//!
//! A running clock is shown to a tenth of a second; a frozen buzz time to a
//! hundredth.

use crate::round::Phase;

fn europeanize(s: String, european: bool) -> String {
    if european {
        s.replace('.', ",")
    } else {
        s
    }
}

/// Format `secs` for the given phase.
///
/// # Examples
/// ```
/// use buzzer_core::format::format_elapsed;
/// use buzzer_core::Phase;
/// assert_eq!(format_elapsed(1.456, Phase::Armed, false), "1.5s");
/// assert_eq!(format_elapsed(1.456, Phase::Buzzed, false), "1.46s");
/// assert_eq!(format_elapsed(1.456, Phase::Buzzed, true), "1,46s");
/// assert_eq!(format_elapsed(0.0, Phase::Idle, false), "0.0s");
/// ```
pub fn format_elapsed(secs: f64, phase: Phase, european: bool) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let s = match phase {
        Phase::Buzzed => format!("{:.2}s", secs),
        Phase::Armed | Phase::Idle => format!("{:.1}s", secs),
    };
    europeanize(s, european)
}
