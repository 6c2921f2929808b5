//! Ошибки движка и защита от повторного входа.
//!
//! - любое отклонённое действие не меняет состояние раздачи;
//! - ход не в свою очередь, чужой игрок, пустое место;
//! - точка решения: пока ждём источник, прямое применение и второй запрос запрещены;
//! - устаревший токен отклоняется;
//! - прерывание раздачи возвращает вклады.

use holdem_table_engine::domain::{
    chips::Chips,
    player::PlayerAtTable,
    table::{Table, TableConfig},
    PlayerId, SeatIndex,
};
use holdem_table_engine::engine::{
    abort_hand,
    actions::{PlayerAction, PlayerActionKind},
    apply_action, apply_with_token, start_hand, EngineError, HandEngine, HandEventKind, IllegalAction,
    RandomSource,
};

struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

fn setup(stacks: &[u64]) -> (Table, HandEngine) {
    let mut table = Table::new(1, "Errors", TableConfig::new(6, 10, 20));
    for (seat, &stack) in stacks.iter().enumerate() {
        let pid = seat as PlayerId + 1;
        table.sit(seat as SeatIndex, PlayerAtTable::new(pid, format!("P{pid}"), Chips(stack)));
    }
    let engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");
    (table, engine)
}

fn action(engine: &HandEngine, seat: SeatIndex, kind: PlayerActionKind) -> PlayerAction {
    let player_id = engine.hand.seat(seat).expect("место").player_id;
    PlayerAction::new(player_id, seat, kind)
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let (mut table, mut engine) = setup(&[1_000, 1_000, 1_000]);
    let hand_before = engine.hand.clone();
    let table_before = table.clone();
    let events_before = engine.history.events.len();

    let cases = [
        (
            action(&engine, 1, PlayerActionKind::Call),
            EngineError::IllegalAction(IllegalAction::NotPlayersTurn(1)),
        ),
        (
            action(&engine, 0, PlayerActionKind::Check),
            EngineError::IllegalAction(IllegalAction::CannotCheck { to_call: Chips(20) }),
        ),
        (
            action(&engine, 0, PlayerActionKind::Raise(Chips(25))),
            EngineError::IllegalAction(IllegalAction::RaiseTooSmall {
                total: Chips(25),
                min_total: Chips(40),
            }),
        ),
        (PlayerAction::new(99, 0, PlayerActionKind::Call), EngineError::PlayerNotAtSeat(99)),
        (PlayerAction::new(4, 4, PlayerActionKind::Call), EngineError::EmptySeat),
        (PlayerAction::new(1, 17, PlayerActionKind::Call), EngineError::InvalidSeat(17)),
    ];

    for (act, expected) in cases {
        let err = apply_action(&mut table, &mut engine, act).expect_err("действие должно быть отклонено");
        assert_eq!(err, expected);
        assert_eq!(engine.hand, hand_before);
        assert_eq!(table, table_before);
        assert_eq!(engine.history.events.len(), events_before);
    }
}

#[test]
fn call_with_nothing_owed_is_illegal() {
    let (mut table, mut engine) = setup(&[1_000, 1_000]);
    let act = action(&engine, 0, PlayerActionKind::Call);
    apply_action(&mut table, &mut engine, act).expect("call");

    let act = action(&engine, 1, PlayerActionKind::Call);
    let err = apply_action(&mut table, &mut engine, act)
        .expect_err("BB ничего не должен");
    assert_eq!(err, EngineError::IllegalAction(IllegalAction::CannotCall));
    assert!(err.is_illegal_action());
}

#[test]
fn actions_after_hand_end_are_rejected() {
    let (mut table, mut engine) = setup(&[1_000, 1_000]);
    let act = action(&engine, 0, PlayerActionKind::Fold);
    apply_action(&mut table, &mut engine, act).expect("fold");
    assert!(engine.is_complete());

    let act = action(&engine, 1, PlayerActionKind::Check);
    let err = apply_action(&mut table, &mut engine, act)
        .expect_err("раздача завершена");
    assert_eq!(err, EngineError::NoActiveHand);
    assert_eq!(engine.begin_decision().err(), Some(EngineError::NoActiveHand));
}

#[test]
fn pending_decision_blocks_other_entry_points() {
    let (mut table, mut engine) = setup(&[1_000, 1_000, 1_000]);

    let token = engine.begin_decision().expect("точка решения");
    assert_eq!(token.seat(), 0);
    assert!(engine.is_decision_pending());

    assert_eq!(engine.begin_decision().err(), Some(EngineError::ActionInFlight));
    let act = action(&engine, 0, PlayerActionKind::Call);
    let err = apply_action(&mut table, &mut engine, act)
        .expect_err("прямое применение запрещено");
    assert_eq!(err, EngineError::ActionInFlight);

    // Недопустимое действие по токену – точка остаётся открытой.
    let err = apply_with_token(&mut table, &mut engine, &token, PlayerActionKind::Check).expect_err("check нельзя");
    assert!(err.is_illegal_action());
    assert!(engine.is_decision_pending());

    apply_with_token(&mut table, &mut engine, &token, PlayerActionKind::Call).expect("call");
    assert!(!engine.is_decision_pending());
    assert_eq!(engine.active_seat(), Some(1));

    // Тот же токен второй раз – устаревшее решение.
    let err = apply_with_token(&mut table, &mut engine, &token, PlayerActionKind::Call).expect_err("токен устарел");
    assert_eq!(err, EngineError::StaleDecision);
}

#[test]
fn abandoned_decision_frees_the_gate() {
    let (mut table, mut engine) = setup(&[1_000, 1_000]);

    let token = engine.begin_decision().expect("точка решения");
    engine.abandon_decision(token);
    assert!(!engine.is_decision_pending());

    let act = action(&engine, 0, PlayerActionKind::Call);
    apply_action(&mut table, &mut engine, act).expect("call");
    let second = engine.begin_decision().expect("новая точка решения");
    assert_eq!(second.seat(), 1);
    assert_eq!(second.point().seq, 1, "номера точек растут");
}

#[test]
fn abort_hand_refunds_everything() {
    let (mut table, mut engine) = setup(&[1_000, 950, 900]);
    let initial: Vec<_> = table.seats.iter().flatten().map(|p| p.stack).collect();

    let act = action(&engine, 0, PlayerActionKind::Raise(Chips(80)));
    apply_action(&mut table, &mut engine, act).expect("raise");
    let act = action(&engine, 1, PlayerActionKind::Call);
    apply_action(&mut table, &mut engine, act).expect("call");

    abort_hand(&mut table, &mut engine).expect("abort");

    let after: Vec<_> = table.seats.iter().flatten().map(|p| p.stack).collect();
    assert_eq!(after, initial);
    assert!(!table.hand_in_progress);
    assert!(engine.is_complete());
    assert!(engine.summary().is_none());
    assert!(engine.history.iter().any(|e| matches!(e, HandEventKind::HandAborted)));

    assert_eq!(abort_hand(&mut table, &mut engine), Err(EngineError::NoActiveHand));
}
