use domino_tracker::simulate::{first_legal_move, random_deal};
use domino_tracker::{
    Move, MoveError, MoveOutcome, PlacementError, PlayerSetup, Round, Session, Side, Tile, TileSet,
};

fn t(a: u8, b: u8) -> Tile {
    Tile::new(a, b)
}

fn doubles() -> Vec<Tile> {
    (0..=6).map(|i| t(i, i)).collect()
}

fn table_of_four() -> Vec<PlayerSetup> {
    vec![
        PlayerSetup::known("P1", doubles()),
        PlayerSetup::hidden("P2"),
        PlayerSetup::hidden("P3"),
        PlayerSetup::hidden("P4"),
    ]
}

/// P1 (doubles) wins in seven plays; P2 bridges 0/1, 1/2, ... between them.
fn play_winning_round(session: &mut Session) -> Round {
    let setups = vec![PlayerSetup::known("P1", doubles()), PlayerSetup::hidden("P2")];
    let mut r = session.start_round(setups, 0, 0).unwrap();
    for i in 0..=6u8 {
        let out = r.attempt_move(0, Move::play_on(t(i, i), Side::Right));
        if i == 6 {
            assert_eq!(out, MoveOutcome::RoundOver { winner: 0 });
        } else {
            assert_eq!(out, MoveOutcome::Accepted);
            assert_eq!(r.attempt_move(1, Move::play_on(t(i, i + 1), Side::Right)), MoveOutcome::Accepted);
        }
    }
    r
}

#[test]
fn double_three_then_three_five() {
    for (side, expected) in [(Side::Left, (5, 3)), (Side::Right, (3, 5))] {
        let mut r = Round::start(table_of_four(), 0, 0).unwrap();
        assert_eq!(r.attempt_move(0, Move::play(t(3, 3))), MoveOutcome::Accepted);
        assert_eq!(r.current_ends(), Some((3, 3)));

        assert_eq!(
            r.attempt_move(1, Move::play(t(3, 5))),
            MoveOutcome::Rejected(MoveError::Placement(PlacementError::AmbiguousSide { tile: t(3, 5) }))
        );
        assert_eq!(r.attempt_move(1, Move::play_on(t(3, 5), side)), MoveOutcome::Accepted);
        assert_eq!(r.current_ends(), Some(expected));
        assert_eq!(r.placed_sequence().len(), 2);
    }
}

#[test]
fn single_end_match_moves_that_end() {
    let mut r = Round::start(table_of_four(), 0, 1).unwrap();
    assert_eq!(r.attempt_move(1, Move::play(t(2, 4))), MoveOutcome::Accepted);
    assert_eq!(r.current_ends(), Some((2, 4)));
    // P3 plays 2/6 on the left (2 matches left only)
    assert_eq!(r.attempt_move(2, Move::play(t(2, 6))), MoveOutcome::Accepted);
    assert_eq!(r.current_ends(), Some((6, 4)));
    // P4 plays 4/5 on the right
    assert_eq!(r.attempt_move(3, Move::play(t(4, 5))), MoveOutcome::Accepted);
    assert_eq!(r.current_ends(), Some((6, 5)));
    assert_eq!(r.table().to_string(), "6/2 - 2/4 - 4/5");
}

#[test]
fn played_tiles_leave_every_other_candidate_set() {
    let mut r = Round::start(table_of_four(), 0, 1).unwrap();
    assert_eq!(r.attempt_move(1, Move::play(t(0, 5))), MoveOutcome::Accepted);
    for idx in 1..4 {
        assert!(!r.candidate_tiles(idx).contains(t(0, 5)), "player {idx}");
    }
    assert!(r.players()[2].impossible().contains(t(0, 5)));
    assert!(!r.players()[1].impossible().contains(t(0, 5)));
    // and nobody else may replay it
    assert!(matches!(
        r.attempt_move(2, Move::play(t(0, 5))),
        MoveOutcome::Rejected(MoveError::TileNotCandidate { .. })
    ));
}

#[test]
fn passing_never_grows_candidates_and_never_ends_round() {
    let mut r = Round::start(table_of_four(), 0, 1).unwrap();
    assert_eq!(r.attempt_move(1, Move::play(t(1, 4))), MoveOutcome::Accepted);

    for _ in 0..12 {
        let idx = r.current_player().unwrap();
        let before = r.candidate_tiles(idx);
        assert_eq!(r.attempt_move(idx, Move::Pass), MoveOutcome::Accepted);
        assert!(r.candidate_tiles(idx).is_subset(before));
    }
    assert!(!r.is_over());
    assert_eq!(r.consecutive_passes(), 12);
    for idx in 1..4 {
        assert!(r.candidate_tiles(idx).iter().all(|x| !x.has(1) && !x.has(4)));
    }
}

#[test]
fn conservation_holds_through_a_seeded_round() {
    for seed in [3u64, 11, 29] {
        let mut setups = random_deal(&[], 3, seed);
        // only the principal's hand is public; P2 and P3 stay hidden to the engine
        let hidden: Vec<Vec<Tile>> = setups[1..].iter().map(|s| s.hand.clone().unwrap()).collect();
        for s in setups[1..].iter_mut() {
            s.hand = None;
        }
        let mut r = Round::start(setups, 0, 0).unwrap();

        // hidden hands are played by a mirror that mimics the first-legal driver
        let mut mirror = hidden;
        let mut guard = 0;
        while let Some(idx) = r.current_player() {
            guard += 1;
            assert!(guard < 500);
            if r.consecutive_passes() >= 3 {
                break;
            }
            let mv = if idx == 0 {
                first_legal_move(&r, 0)
            } else {
                let hand = &mut mirror[idx - 1];
                match hand.iter().position(|&x| r.table().can_place(x)) {
                    Some(pos) => {
                        let tile = hand.remove(pos);
                        let side = if r.table().legal_sides(tile).contains(&Side::Left) { Side::Left } else { Side::Right };
                        Move::play_on(tile, side)
                    }
                    None => Move::Pass,
                }
            };
            let out = r.attempt_move(idx, mv);
            assert!(!matches!(out, MoveOutcome::Rejected(_)), "seed {seed}: {out:?}");

            assert!(r.conservation_holds());
            let principal_left = r.players()[0].tiles_left();
            let hidden_left: usize = mirror.iter().map(Vec::len).sum();
            let undealt = r
                .unseen_pool()
                .difference(mirror.iter().flatten().collect::<TileSet>())
                .len();
            assert_eq!(principal_left + hidden_left + r.placed_sequence().len() + undealt, 28);
            assert_eq!(undealt, 7);
        }
    }
}

#[test]
fn empty_short_hand_does_not_win() {
    let setups = vec![
        PlayerSetup::known("P1", doubles()),
        PlayerSetup::known("P2", vec![t(0, 1), t(1, 2)]),
    ];
    let mut r = Round::start(setups, 0, 0).unwrap();
    assert_eq!(r.attempt_move(0, Move::play(t(0, 0))), MoveOutcome::Accepted);
    assert_eq!(r.attempt_move(1, Move::play_on(t(0, 1), Side::Right)), MoveOutcome::Accepted);
    assert_eq!(r.attempt_move(0, Move::play(t(1, 1))), MoveOutcome::Accepted);
    assert_eq!(r.attempt_move(1, Move::play(t(1, 2))), MoveOutcome::Accepted);
    assert!(r.players()[1].hand_is_empty());
    assert!(!r.is_over());
    assert!(matches!(
        r.attempt_move(0, Move::play(t(5, 5))),
        MoveOutcome::Rejected(MoveError::Placement(PlacementError::NoMatchingEnd { .. }))
    ));
}

#[test]
fn four_wins_score_a_rabbit_across_rounds() {
    let mut session = Session::new();
    for round_no in 1..=4u32 {
        let mut r = play_winning_round(&mut session);
        let summary = session.finish_round(&mut r).unwrap();
        assert_eq!(summary.round_id, round_no);
        assert_eq!(summary.rabbit, round_no == 4);
        assert!(!summary.cat);
    }
    assert_eq!(session.rabbits(), 1);
    assert_eq!(session.wins("P1"), 0);
    assert_eq!(session.wins("P2"), 0);
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.history()[0].participants[0].play_count, 7);
    assert_eq!(session.history()[0].participants[1].play_count, 6);
}

#[test]
fn scoreless_round_scores_a_cat() {
    let mut session = Session::new();
    let r = Round::start(table_of_four(), 0, 0).unwrap();
    let zeroes = r.players().iter().map(|p| p.snapshot()).collect();
    let summary = session.record_result("P3".into(), zeroes);
    assert!(summary.cat);
    assert_eq!(session.cats(), 1);
    assert_eq!(session.wins("P3"), 1);
}
