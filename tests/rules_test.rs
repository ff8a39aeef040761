//! End-to-end rule-arbitration properties of the rule engine.

use renju::{
    EngineStatus, ForbiddenPolicy, MoveError, MoveOutcome, RuleEngine, Side, Square, Violation,
};

/// A 15x15 engine with no automated opponent, so undo works one ply at a
/// time and both colors are played directly.
fn pvp_engine() -> RuleEngine {
    let mut engine = RuleEngine::standard();
    engine.set_engine_status(EngineStatus::Disabled);
    engine
}

/// Applies alternating moves, panicking on any rejection.
fn play(engine: &mut RuleEngine, moves: &[(usize, usize)]) {
    for &(row, col) in moves {
        let side = engine.side_to_move();
        engine
            .apply_move(row, col, side)
            .unwrap_or_else(|rejection| panic!("({row}, {col}) rejected: {rejection}"));
    }
}

#[test]
fn log_matches_board_after_every_move() {
    let mut engine = pvp_engine();
    let moves = [(7, 7), (0, 0), (7, 8), (0, 1), (8, 8), (14, 14), (6, 6)];
    for (index, &(row, col)) in moves.iter().enumerate() {
        let side = engine.side_to_move();
        assert_eq!(
            side,
            if index % 2 == 0 { Side::Sente } else { Side::Gote },
            "turn must alternate starting with Sente"
        );
        engine.apply_move(row, col, side).unwrap();
        assert_eq!(engine.moves_made(), index + 1);
        assert_eq!(engine.log().len(), engine.moves_made());
        for entry in engine.log() {
            assert_eq!(
                *engine.board().get(entry.row, entry.col).unwrap(),
                Square::Occupied(entry.side)
            );
        }
    }
}

#[test]
fn a_single_open_three_is_legal() {
    let mut engine = pvp_engine();
    play(&mut engine, &[(7, 7), (0, 0), (7, 8), (0, 2)]);
    assert_eq!(
        engine.apply_move(7, 9, Side::Sente),
        Ok(MoveOutcome::Success)
    );
}

#[test]
fn the_move_creating_a_second_open_three_is_rejected() {
    let mut engine = pvp_engine();
    // Sente builds a horizontal pair ending at (7, 9)'s left and a vertical
    // pair below it; Gote stays scattered on row 0.
    play(
        &mut engine,
        &[
            (7, 7),
            (0, 0),
            (7, 8),
            (0, 2),
            (8, 9),
            (0, 4),
            (9, 9),
            (0, 6),
        ],
    );
    assert_eq!(
        engine.apply_move(7, 9, Side::Sente),
        Err(MoveError::ViolationRejected(Violation::DoubleThree))
    );
    // The rejection left no trace.
    assert!(engine.board().get(7, 9).unwrap().is_empty());
    assert_eq!(engine.moves_made(), 8);
    assert_eq!(engine.side_to_move(), Side::Sente);
}

#[test]
fn chained_revalidation_rejects_a_clean_candidate_next_to_a_dirty_stone() {
    let mut engine = pvp_engine();
    // After (7, 7), the neighbor (7, 6) would sit on both the row three and
    // a vertical three; the candidate itself carries only the row three.
    play(
        &mut engine,
        &[
            (7, 5),
            (0, 0),
            (7, 6),
            (0, 2),
            (5, 6),
            (0, 4),
            (6, 6),
            (0, 6),
        ],
    );
    assert_eq!(
        engine.apply_move(7, 7, Side::Sente),
        Err(MoveError::ViolationRejected(Violation::DoubleThree))
    );
    assert!(engine.board().get(7, 7).unwrap().is_empty());
}

#[test]
fn sente_overline_is_rejected_not_won() {
    let mut engine = pvp_engine();
    // Five Sente stones around a one-cell gap at (7, 7); filling it would
    // make a six-run with no exact five anywhere else.
    play(
        &mut engine,
        &[
            (7, 4),
            (0, 0),
            (7, 5),
            (0, 2),
            (7, 6),
            (0, 4),
            (7, 8),
            (0, 6),
            (7, 9),
            (0, 8),
        ],
    );
    assert_eq!(
        engine.apply_move(7, 7, Side::Sente),
        Err(MoveError::ViolationRejected(Violation::Overline))
    );
    assert_eq!(engine.moves_made(), 10);
}

#[test]
fn sente_win_stands_when_an_exact_five_crosses_an_overline() {
    let mut engine = pvp_engine();
    // The same gapped six on row 7, plus four stones down column 7 so that
    // (7, 7) completes a genuine exact five vertically.
    play(
        &mut engine,
        &[
            (7, 4),
            (0, 0),
            (7, 5),
            (0, 2),
            (7, 6),
            (0, 4),
            (7, 8),
            (0, 6),
            (7, 9),
            (0, 8),
            (3, 7),
            (0, 10),
            (4, 7),
            (0, 12),
            (5, 7),
            (14, 0),
            (6, 7),
            (14, 2),
        ],
    );
    assert_eq!(engine.apply_move(7, 7, Side::Sente), Ok(MoveOutcome::Win));
}

#[test]
fn a_double_four_is_rejected() {
    let mut engine = pvp_engine();
    play(
        &mut engine,
        &[
            (7, 4),
            (0, 0),
            (7, 5),
            (0, 2),
            (7, 6),
            (0, 4),
            (4, 7),
            (0, 6),
            (5, 7),
            (0, 8),
            (6, 7),
            (0, 10),
        ],
    );
    assert_eq!(
        engine.apply_move(7, 7, Side::Sente),
        Err(MoveError::ViolationRejected(Violation::DoubleFour))
    );
}

#[test]
fn gote_wins_with_six_or_more() {
    let mut engine = pvp_engine();
    play(
        &mut engine,
        &[
            (0, 0),
            (7, 4),
            (0, 2),
            (7, 5),
            (0, 4),
            (7, 6),
            (0, 6),
            (7, 8),
            (0, 8),
            (7, 9),
            (0, 10),
        ],
    );
    // Gote bridges the gap into a six-run: still a win for Gote.
    assert_eq!(engine.apply_move(7, 7, Side::Gote), Ok(MoveOutcome::Win));
}

#[test]
fn advisory_policy_warns_but_allows() {
    let mut engine = pvp_engine();
    engine.set_policy(ForbiddenPolicy::Advisory);
    play(
        &mut engine,
        &[
            (7, 7),
            (0, 0),
            (7, 8),
            (0, 2),
            (8, 9),
            (0, 4),
            (9, 9),
            (0, 6),
        ],
    );
    assert_eq!(
        engine.apply_move(7, 9, Side::Sente),
        Ok(MoveOutcome::Success)
    );
}

#[test]
fn overline_under_off_policy_is_allowed_but_never_a_sente_win() {
    let mut engine = pvp_engine();
    engine.set_policy(ForbiddenPolicy::Off);
    play(
        &mut engine,
        &[
            (7, 4),
            (0, 0),
            (7, 5),
            (0, 2),
            (7, 6),
            (0, 4),
            (7, 8),
            (0, 6),
            (7, 9),
            (0, 8),
        ],
    );
    // The six-run goes on the board, but it is not a win for Sente.
    assert_eq!(
        engine.apply_move(7, 7, Side::Sente),
        Ok(MoveOutcome::Success)
    );
}

#[test]
fn hypothetical_probe_leaves_the_game_untouched() {
    let mut engine = pvp_engine();
    play(
        &mut engine,
        &[
            (7, 7),
            (0, 0),
            (7, 8),
            (0, 2),
            (8, 9),
            (0, 4),
            (9, 9),
            (0, 6),
        ],
    );
    assert_eq!(
        engine.would_violate(7, 9),
        Ok(Some(Violation::DoubleThree))
    );
    assert_eq!(engine.would_violate(5, 5), Ok(None));
    assert!(engine.board().get(7, 9).unwrap().is_empty());
    assert_eq!(engine.moves_made(), 8);
    // Occupied and out-of-range cells cannot be probed.
    assert!(engine.would_violate(7, 7).is_err());
    assert!(engine.would_violate(15, 15).is_err());
}

#[test]
fn undo_restores_one_ply_without_an_automated_side() {
    let mut engine = pvp_engine();
    play(&mut engine, &[(7, 7)]);
    assert_eq!(engine.undo().unwrap(), 1);
    assert_eq!(engine.moves_made(), 0);
    assert!(engine.board().get(7, 7).unwrap().is_empty());
    assert_eq!(engine.side_to_move(), Side::Sente);
    // Undo on an empty board is a no-op, not an error.
    assert_eq!(engine.undo().unwrap(), 0);
}

#[test]
fn undo_removes_two_plies_with_an_automated_side() {
    let mut engine = RuleEngine::standard();
    engine.set_engine_status(EngineStatus::Gote);
    play(&mut engine, &[(7, 7), (0, 0)]);
    assert_eq!(engine.undo().unwrap(), 2);
    assert_eq!(engine.moves_made(), 0);
    assert!(engine.board().get(7, 7).unwrap().is_empty());
    assert!(engine.board().get(0, 0).unwrap().is_empty());
}

#[test]
fn new_game_replaces_the_board_wholesale() {
    let mut engine = pvp_engine();
    play(&mut engine, &[(7, 7), (0, 0)]);
    engine.clear(9, 11);
    assert_eq!(engine.moves_made(), 0);
    assert_eq!(engine.board().rows().unwrap(), 9);
    assert_eq!(engine.board().cols().unwrap(), 11);
    assert_eq!(engine.side_to_move(), Side::Sente);
}
