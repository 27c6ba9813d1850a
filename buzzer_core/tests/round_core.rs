use std::time::{Duration, Instant};

use buzzer_core::*;

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn first_buzz_wins_and_freezes_time() {
    let t0 = Instant::now();
    let mut round = RoundController::new();
    round.start_fresh(t0);

    let won = round.buzz("Alice", t0 + secs(1.5));
    assert!(matches!(won, BuzzOutcome::Won { elapsed_secs } if approx(elapsed_secs, 1.5)));
    assert_eq!(round.phase(), Phase::Buzzed);
    assert_eq!(round.winner(), Some("Alice"));

    let late = round.buzz("Bob", t0 + secs(1.6));
    assert_eq!(late, BuzzOutcome::AlreadyBuzzed { winner: "Alice".into() });
    assert_eq!(round.winner(), Some("Alice"));

    // frozen: does not advance
    assert_eq!(round.elapsed(t0 + secs(30.0)), secs(1.5));
    assert_eq!(round.buzz_seq(), 1);
}

#[test]
fn buzz_while_idle_is_rejected() {
    let mut round = RoundController::new();
    assert_eq!(round.buzz("Alice", Instant::now()), BuzzOutcome::NotArmed);
    assert_eq!(round.phase(), Phase::Idle);
    assert_eq!(round.buzz_seq(), 0);
}

#[test]
fn resume_continues_from_frozen_total() {
    let t0 = Instant::now();
    let mut round = RoundController::new();
    round.start_fresh(t0);
    round.buzz("Alice", t0 + secs(1.5));

    let resumed = round.resume(t0 + secs(5.0));
    assert!(matches!(resumed, ResumeOutcome::Resumed { baseline_secs } if approx(baseline_secs, 1.5)));
    assert_eq!(round.phase(), Phase::Armed);
    assert_eq!(round.winner(), None);
    assert_eq!(round.final_elapsed(), None);
    assert!(approx(round.elapsed(t0 + secs(5.5)).as_secs_f64(), 2.0));

    let won = round.buzz("Bob", t0 + secs(6.0));
    assert!(matches!(won, BuzzOutcome::Won { elapsed_secs } if approx(elapsed_secs, 2.5)));
    assert_eq!(round.winner(), Some("Bob"));
    assert_eq!(round.buzz_seq(), 2);
}

#[test]
fn resume_outside_buzzed_is_rejected() {
    let t0 = Instant::now();
    let mut round = RoundController::new();
    assert_eq!(round.resume(t0), ResumeOutcome::NotBuzzed { phase: Phase::Idle });
    assert_eq!(round.phase(), Phase::Idle);

    round.start_fresh(t0);
    assert_eq!(round.resume(t0 + secs(2.0)), ResumeOutcome::NotBuzzed { phase: Phase::Armed });
    // clock was not restarted
    assert!(approx(round.elapsed(t0 + secs(3.0)).as_secs_f64(), 3.0));
}

#[test]
fn start_fresh_zeroes_from_any_phase() {
    let t0 = Instant::now();
    let mut round = RoundController::new();
    round.start_fresh(t0);
    round.buzz("Alice", t0 + secs(4.0));
    round.resume(t0 + secs(5.0));
    round.buzz("Bob", t0 + secs(6.0));
    assert!(round.accumulated() > Duration::ZERO);

    round.start_fresh(t0 + secs(10.0));
    assert_eq!(round.phase(), Phase::Armed);
    assert_eq!(round.accumulated(), Duration::ZERO);
    assert_eq!(round.winner(), None);
    assert_eq!(round.elapsed(t0 + secs(10.0)), Duration::ZERO);
}

#[test]
fn reset_returns_to_idle() {
    let t0 = Instant::now();
    for armed_only in [false, true] {
        let mut round = RoundController::new();
        round.start_fresh(t0);
        if !armed_only {
            round.buzz("Alice", t0 + secs(1.0));
        }
        round.reset();
        assert_eq!(round.phase(), Phase::Idle);
        assert_eq!(round.winner(), None);
        assert_eq!(round.elapsed(t0 + secs(9.0)), Duration::ZERO);
        assert_eq!(round.accumulated(), Duration::ZERO);
    }
}

#[test]
fn elapsed_never_negative_for_earlier_now() {
    let t0 = Instant::now();
    let mut round = RoundController::new();
    round.start_fresh(t0 + secs(1.0));
    assert_eq!(round.elapsed(t0), Duration::ZERO);
}

#[test]
fn registry_add_is_idempotent_and_ordered() {
    let mut reg = PlayerRegistry::new();
    assert!(reg.add("Alice"));
    assert!(reg.add("Bob"));
    assert!(reg.connect("Alice"));
    assert!(!reg.add("Alice"));
    assert!(!reg.add(""));
    assert!(!reg.add("   "));

    assert_eq!(reg.len(), 2);
    assert_eq!(reg.get("Alice").map(|p| p.connected), Some(true));
    let names: Vec<&str> = reg.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob"]);
}

#[test]
fn registry_connect_and_available() {
    let mut reg = PlayerRegistry::new();
    for n in ["Alice", "Bob", "Carol"] {
        reg.add(n);
    }
    assert!(reg.connect("Bob"));
    assert!(!reg.connect("Bob"));
    assert!(!reg.connect("Mallory"));
    assert_eq!(reg.available(), ["Alice", "Carol"]);

    reg.clear();
    assert!(reg.is_empty());
    assert!(reg.available().is_empty());
}

#[test]
fn manual_clock_only_moves_forward() {
    let clock = ManualClock::new();
    let a = clock.now();
    clock.advance(secs(1.5));
    assert_eq!(clock.now() - a, secs(1.5));
    clock.set_elapsed(secs(1.0));
    assert_eq!(clock.now() - a, secs(1.5));
    clock.set_elapsed(secs(5.0));
    assert_eq!(clock.now() - a, secs(5.0));
}

#[test]
fn cfg_defaults_and_partial_toml() {
    let cfg = SessionCfg::default();
    assert_eq!(cfg.poll_interval(), Duration::from_millis(500));
    assert!(!cfg.strict_roster);

    let cfg = SessionCfg::from_toml_str("strict_roster = true\npoll_interval_ms = 250\n").unwrap();
    assert!(cfg.strict_roster);
    assert_eq!(cfg.poll_interval(), Duration::from_millis(250));
    assert!(!cfg.european_decimals);

    let cfg = SessionCfg::from_toml_str("poll_interval_ms = 10").unwrap();
    assert_eq!(cfg.poll_interval(), Duration::from_millis(50));

    assert!(matches!(
        SessionCfg::from_toml_str("poll_interval_ms = 0"),
        Err(CfgError::Invalid(_))
    ));
    assert!(matches!(
        SessionCfg::from_toml_str("poll_interval_ms = \"fast\""),
        Err(CfgError::Parse(_))
    ));
}
