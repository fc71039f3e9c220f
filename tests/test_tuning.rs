use std::io::Write;

use rstest::rstest;
use tempfile::NamedTempFile;

use space_inflators::{ConfigError, Hooks, ScriptedRandom, Tuning, World};

fn tuning_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn file_overrides_reach_the_world() {
    let file = tuning_file(
        r#"
[player]
start_lives = 5
full_health = 80

[pickups]
star_odds = 0
"#,
    );

    let tuning = Tuning::load(file.path()).unwrap();
    assert_eq!(tuning.player.start_lives, 5);
    assert_eq!(tuning.weapons, Tuning::default().weapons);

    let world = World::new(tuning, Hooks::headless(), Box::new(ScriptedRandom::default()));
    assert_eq!(world.lives(), 5);
    assert_eq!(world.scoreboard().health, 80);
    assert_eq!(world.scoreboard().energy_percent(), 100);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Tuning::load(&path).unwrap_err();

    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = tuning_file("[aliens\npatrol_share = 70");
    assert!(matches!(
        Tuning::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[rstest]
#[case("[aliens]\npatrol_share = 101\n", "aliens.patrol_share")]
#[case("[aliens]\nwealthy_share = 300\n", "aliens.wealthy_share")]
#[case("[pickups]\nmove_period = 0\n", "pickups.move_period")]
#[case("[player]\nstart_lives = 0\n", "player.start_lives")]
fn nonsensical_values_are_rejected(#[case] text: &str, #[case] expected: &str) {
    let file = tuning_file(text);
    match Tuning::load(file.path()) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected invalid `{expected}`, got {other:?}"),
    }
}
