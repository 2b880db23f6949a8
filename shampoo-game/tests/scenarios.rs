use shampoo_game::{
    Action, ChaosKind, DailyOutcome, Ending, EventKind, GameConfig, GameError, GameSession,
    GameState, TerminalReason, advance, score_day,
};

fn session_on(schedule: Vec<EventKind>, seed: u64) -> GameSession {
    GameSession::with_schedule(GameConfig::default(), seed, schedule).unwrap()
}

#[test]
fn all_chill_waiting_matches_hand_trace() {
    let mut session = session_on(vec![EventKind::Chill; 10], 11);

    let first = session.submit_action(Action::Wait).unwrap();
    let record = first.record().unwrap();
    assert_eq!(record.days_since_wash_after, 3);
    assert_eq!(record.health_after, 100);
    assert_eq!(record.score, 3);

    let mut totals = vec![session.state().total_score];
    while !session.is_over() {
        session.submit_action(Action::Wait).unwrap();
        totals.push(session.state().total_score);
    }

    // Day 1 at 3 days unwashed scores 3; every later day is in the 4+ bucket.
    assert_eq!(totals, vec![3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    let summary = session.on_game_end().unwrap();
    assert_eq!(summary.ending, Ending::Completed);
    assert_eq!(summary.final_score, 12);
    assert!(summary.solver.best_score > 12);
}

#[test]
fn seventh_consecutive_wash_fries_hair() {
    let schedule = vec![
        EventKind::Meeting,
        EventKind::Date,
        EventKind::Chill,
        EventKind::Party,
        EventKind::Workout,
        EventKind::Chill,
        EventKind::Meeting,
        EventKind::Date,
        EventKind::Chill,
        EventKind::Party,
    ];
    let mut session = session_on(schedule, 21);

    for day in 0..6 {
        let outcome = session.submit_action(Action::Wash).unwrap();
        assert!(outcome.record().is_some(), "day {day} should score");
        assert!(!outcome.ended());
    }
    assert_eq!(session.state().hair_health, 10);

    let fatal = session.submit_action(Action::Wash).unwrap();
    assert_eq!(
        fatal.outcome,
        DailyOutcome::Terminal(TerminalReason::HairFried { day: 6, health: -5 })
    );
    assert_eq!(fatal.ending, Some(Ending::HairFried));
    assert_eq!(session.state().history.len(), 6);
    assert_eq!(session.state().current_day, 6);

    assert_eq!(
        session.submit_action(Action::Wait).unwrap_err(),
        GameError::GameOver
    );
    let summary = session.on_game_end().unwrap();
    assert_eq!(summary.ending, Ending::HairFried);
    assert_eq!(summary.days_played, 6);
}

#[test]
fn rain_on_peak_day_overrides_health_caps() {
    // Frizz cap (health < 50) would leave 8; rain forces exactly 6.
    assert_eq!(score_day(1, 40, EventKind::Chill, ChaosKind::Rain), 6);
    assert_eq!(score_day(1, 40, EventKind::Meeting, ChaosKind::Rain), 18);
    assert_eq!(score_day(1, 40, EventKind::Meeting, ChaosKind::None), 24);
    // Fried cap would leave 5; rain replaces it with 6 rather than taking the min.
    assert_eq!(score_day(1, 15, EventKind::Chill, ChaosKind::Rain), 6);
}

#[test]
fn dirty_workout_rounds_half_up() {
    assert_eq!(score_day(3, 100, EventKind::Workout, ChaosKind::None), 17);

    let cfg = GameConfig::default();
    let mut schedule = vec![EventKind::Chill; 10];
    schedule[0] = EventKind::Workout;
    let mut state = GameState::new(&cfg, schedule);
    let outcome = advance(&mut state, &cfg, Action::Wait, ChaosKind::None).unwrap();
    assert_eq!(outcome.record().map(|r| r.score), Some(17));
}

#[test]
fn textual_actions_drive_the_session() {
    let mut session = session_on(vec![EventKind::Party; 10], 3);
    session.submit_label("shampoo").unwrap();
    assert_eq!(session.state().days_since_wash, 0);
    session.submit_label("wait").unwrap();
    assert_eq!(session.state().days_since_wash, 1);
    assert!(matches!(
        session.submit_label("conditioner"),
        Err(GameError::UnknownAction(_))
    ));
    assert_eq!(session.state().current_day, 2);
}
