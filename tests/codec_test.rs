//! Save-file round trips through the filesystem.

use renju::codec;
use renju::{EngineStatus, ForbiddenPolicy, RuleEngine, Side};

fn played_engine() -> RuleEngine {
    let mut engine = RuleEngine::new(15, 15);
    engine.set_engine_status(EngineStatus::Disabled);
    engine.set_name(Side::Sente, "Alice".to_string());
    engine.set_name(Side::Gote, "Bob".to_string());
    for (row, col) in [(7, 7), (0, 0), (7, 8), (1, 1), (8, 7)] {
        let side = engine.side_to_move();
        engine.apply_move(row, col, side).unwrap();
    }
    engine
}

#[test]
fn a_played_game_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.txt");

    let engine = played_engine();
    let saved = engine.snapshot().unwrap();
    codec::save_to_path(&saved, &path).unwrap();

    let loaded = codec::load_from_path(&path).unwrap();
    assert_eq!(loaded, saved);

    // The reconstructed engine resumes with the right side on move.
    let engine = RuleEngine::from_snapshot(loaded, ForbiddenPolicy::Enforced);
    assert_eq!(engine.moves_made(), 5);
    assert_eq!(engine.side_to_move(), Side::Gote);
}

#[test]
fn the_file_uses_the_documented_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.txt");
    codec::save_to_path(&played_engine().snapshot().unwrap(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Sente: Alice");
    assert_eq!(lines[1], "Gote: Bob");
    assert!(lines[2].starts_with("Time: "));
    assert_eq!(lines[3], "Engine Status: Disabled");
    assert_eq!(lines[4], "Board Parameters: 15*15");
    // 15 board rows of exactly 15 cells.
    for line in &lines[5..20] {
        assert_eq!(line.chars().count(), 15);
    }
    assert!(lines[5].contains('O'));
    assert!(lines[12].contains('@'));
    assert_eq!(lines[20], "7 7 Sente");
    assert_eq!(lines.len(), 25);
}

#[test]
fn loading_a_missing_file_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        codec::load_from_path(dir.path().join("absent.txt")),
        Err(codec::CodecError::Io(_))
    ));
}

#[test]
fn tampered_files_are_rejected_not_corrected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.txt");
    codec::save_to_path(&played_engine().snapshot().unwrap(), &path).unwrap();

    // Flip one logged move to the wrong color.
    let tampered = std::fs::read_to_string(&path)
        .unwrap()
        .replace("7 8 Sente", "7 8 Gote");
    std::fs::write(&path, tampered).unwrap();

    assert!(matches!(
        codec::load_from_path(&path),
        Err(codec::CodecError::MoveMismatch { row: 7, col: 8 })
    ));
}
