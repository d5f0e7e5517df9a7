//! Settings and rankings files

use std::fs;

use paddle_duel::rankings::RankingSink;
use paddle_duel::settings::SettingsError;
use paddle_duel::{GameMode, PlayMode, Rankings, Settings, Theme};

#[test]
fn settings_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.theme = Theme::Dark;
    settings.mode = GameMode::Tournament;
    settings.players = PlayMode::LocalVersus;
    settings.tournament_target = 7;
    settings.seed = Some(1234);
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn missing_settings_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Settings::load(&dir.path().join("nope.json")).unwrap();
    assert_eq!(loaded, Settings::default());
}

#[test]
fn malformed_settings_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Settings::load(&path), Err(SettingsError::Parse(_))));

    fs::write(&path, r#"{"volume": 3.0}"#).unwrap();
    assert!(matches!(
        Settings::load(&path),
        Err(SettingsError::Validation(_))
    ));
}

#[test]
fn missing_rankings_file_is_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let rankings = Rankings::load(dir.path().join("rankings.txt")).unwrap();
    assert!(rankings.is_empty());
}

#[test]
fn rankings_persist_best_score_per_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.txt");

    let mut rankings = Rankings::load(&path).unwrap();
    assert_eq!(rankings.path(), Some(path.as_path()));
    rankings.report("Classic", 3).unwrap();
    rankings.report("Classic", 1).unwrap();
    rankings.report("Time Attack", 6).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "Classic:3\nTime Attack:6\n");

    let reloaded = Rankings::load(&path).unwrap();
    assert_eq!(reloaded.best("Classic"), Some(3));
    assert_eq!(reloaded.best("Time Attack"), Some(6));
}

#[test]
fn rankings_skip_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.txt");
    fs::write(&path, "Survival:4\nthis is not a ranking\nClassic:-2\nTournament:5\n").unwrap();

    let rankings = Rankings::load(&path).unwrap();
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings.best("Survival"), Some(4));
    assert_eq!(rankings.best("Tournament"), Some(5));
}
