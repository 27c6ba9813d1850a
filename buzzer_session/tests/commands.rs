use buzzer_core::{BuzzOutcome, Phase, SessionCfg};
use buzzer_session::{parse_command, Command, CommandError, CommandOutcome, GameSession};
use test_log::test;

#[test]
fn parses_tagged_commands() {
    assert_eq!(
        parse_command(r#"{"op":"buzz","name":"Alice"}"#).unwrap(),
        Command::Buzz { name: "Alice".into() }
    );
    assert_eq!(parse_command(" {\"op\":\"reset\"} ").unwrap(), Command::Reset);
    assert!(matches!(parse_command("   "), Err(CommandError::Empty)));
    assert!(matches!(parse_command(r#"{"op":"explode"}"#), Err(CommandError::Malformed(_))));
}

#[test]
fn classifies_surfaces() {
    assert!(Command::StartFreshRound.is_admin());
    assert!(Command::AddPlayer { name: "x".into() }.is_admin());
    assert!(!Command::Buzz { name: "x".into() }.is_admin());
    assert!(!Command::Snapshot.is_mutation());
    assert!(Command::ConnectPlayer { name: "x".into() }.is_mutation());
}

#[test]
fn apply_drives_a_round() {
    let game = GameSession::new(SessionCfg::default());
    assert_eq!(
        game.apply(Command::AddPlayer { name: "Alice".into() }),
        CommandOutcome::Changed(true)
    );
    assert_eq!(
        game.apply(Command::AddPlayer { name: "Alice".into() }),
        CommandOutcome::Changed(false)
    );
    assert_eq!(
        game.apply(Command::ListAvailable),
        CommandOutcome::Available(vec!["Alice".into()])
    );
    assert_eq!(game.apply(Command::StartFreshRound), CommandOutcome::Done);

    match game.apply(Command::Buzz { name: "Alice".into() }) {
        CommandOutcome::Buzz(BuzzOutcome::Won { .. }) => {}
        other => panic!("unexpected outcome: {other:?}"),
    }
    match game.apply(Command::Snapshot) {
        CommandOutcome::Snapshot(s) => {
            assert_eq!(s.phase, Phase::Buzzed);
            assert!(s.is_winner("Alice"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(game.apply(Command::ResetTeam), CommandOutcome::Done);
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn apply_json_reports_rejections_as_outcomes() {
    let game = GameSession::new(SessionCfg::default());
    let out = game.apply_json(r#"{"op":"buzz","name":"Alice"}"#).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["kind"], "buzz");
    assert_eq!(v["value"]["result"], "not_armed");

    let out = game.apply_json(r#"{"op":"resume_round"}"#).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["value"]["result"], "not_buzzed");
    assert_eq!(v["value"]["phase"], "idle");

    assert!(game.apply_json("[]").is_err());
}
