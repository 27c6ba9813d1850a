use buzzer_core::*;

fn snap(phase: Phase, winner: Option<&str>, seq: u64, elapsed: f64) -> Snapshot {
    Snapshot {
        players: vec![
            Player { name: "Alice".into(), connected: true },
            Player { name: "Bob".into(), connected: false },
        ],
        phase,
        winner: winner.map(str::to_string),
        elapsed_secs: elapsed,
        buzz_seq: seq,
    }
}

#[test]
fn cue_fires_once_per_buzz() {
    let mut cue = BuzzCue::new();
    assert_eq!(cue.observe(&snap(Phase::Idle, None, 0, 0.0)), None);
    assert_eq!(cue.observe(&snap(Phase::Armed, None, 0, 0.4)), None);

    let fired = cue.observe(&snap(Phase::Buzzed, Some("Alice"), 1, 1.5));
    assert_eq!(fired, Some(CueEvent { winner: "Alice".into(), elapsed_secs: 1.5 }));

    // repeated polls of the same buzzed state stay quiet
    for _ in 0..5 {
        assert_eq!(cue.observe(&snap(Phase::Buzzed, Some("Alice"), 1, 1.5)), None);
    }
}

#[test]
fn cue_fires_when_armed_poll_was_missed() {
    let mut cue = BuzzCue::new();
    cue.observe(&snap(Phase::Buzzed, Some("Alice"), 1, 1.5));
    // resume + second win happened between two polls
    let fired = cue.observe(&snap(Phase::Buzzed, Some("Alice"), 2, 2.5));
    assert_eq!(fired.map(|c| c.elapsed_secs), Some(2.5));
}

#[test]
fn late_joiner_does_not_replay_cue() {
    let mut cue = BuzzCue::new();
    assert_eq!(cue.observe(&snap(Phase::Buzzed, Some("Bob"), 3, 2.0)), None);
    cue.clear();
    assert_eq!(cue.observe(&snap(Phase::Buzzed, Some("Bob"), 3, 2.0)), None);
}

#[test]
fn snapshot_helpers() {
    let s = snap(Phase::Buzzed, Some("Alice"), 1, 1.456);
    assert!(s.is_winner("Alice"));
    assert!(!s.is_winner("Bob"));
    assert!(!s.roster_is_empty());
    assert_eq!(s.available(), ["Bob"]);
    assert_eq!(s.elapsed_label(false), "1.46s");
    assert_eq!(s.elapsed_label(true), "1,46s");

    let live = snap(Phase::Armed, None, 1, 0.94);
    assert_eq!(live.elapsed_label(false), "0.9s");
    assert!(Snapshot::default().roster_is_empty());
}

#[test]
fn snapshot_json_shape() {
    let s = snap(Phase::Armed, None, 0, 0.25);
    let v: serde_json::Value = serde_json::to_value(&s).unwrap();
    assert_eq!(v["phase"], "armed");
    assert!(v["winner"].is_null());
    assert_eq!(v["players"][0]["name"], "Alice");
    let back: Snapshot = serde_json::from_value(v).unwrap();
    assert_eq!(back, s);
}
