//! Интеграционные тесты старта раздачи и перехода улиц.
//!
//! Проверяем:
//! - старт раздачи (2 карты каждому, SB/BB, первый ход);
//! - ротацию кнопки и хедз-ап блайнды;
//! - переход Preflop -> Flop -> Turn -> River -> Showdown;
//! - рост board: 0 -> 3 -> 4 -> 5;
//! - короткие блайнды и автоматический докат борда;
//! - снимки каждой улицы при докатке.

use holdem_table_engine::domain::{
    chips::Chips,
    hand::Street,
    player::PlayerAtTable,
    table::{Table, TableConfig},
    PlayerId, SeatIndex,
};
use holdem_table_engine::engine::{
    actions::{PlayerAction, PlayerActionKind},
    apply_action, start_hand, EngineError, HandEngine, HandEventKind, HandStatus, RandomSource,
};

/// Тасовка без изменений – колода остаётся в известном порядке.
struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

/// Стол 10/20 с игроками на первых местах.
fn make_table(stacks: &[u64]) -> Table {
    let mut table = Table::new(1, "Test table", TableConfig::new(6, 10, 20));
    for (seat, &stack) in stacks.iter().enumerate() {
        let pid = seat as PlayerId + 1;
        table.sit(seat as SeatIndex, PlayerAtTable::new(pid, format!("P{pid}"), Chips(stack)));
    }
    table
}

fn act(table: &mut Table, engine: &mut HandEngine, seat: SeatIndex, kind: PlayerActionKind) -> HandStatus {
    let player_id = engine.hand.seat(seat).expect("место в раздаче").player_id;
    apply_action(table, engine, PlayerAction::new(player_id, seat, kind)).expect("действие должно быть допустимым")
}

#[test]
fn start_hand_posts_blinds_and_deals_two_cards() {
    let mut table = make_table(&[1_000, 1_000, 1_000, 1_000]);
    let engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");

    let hand = &engine.hand;
    assert_eq!(hand.dealer, 0);
    assert_eq!(table.dealer_button, Some(0));
    assert!(table.hand_in_progress);

    for seat in &hand.seats {
        assert_eq!(seat.hole_cards.len(), 2, "у места {} должно быть 2 карты", seat.seat);
    }
    assert_eq!(engine.deck.len(), 52 - 8);

    assert_eq!(hand.seat(1).map(|s| s.current_bet), Some(Chips(10)));
    assert_eq!(hand.seat(2).map(|s| s.current_bet), Some(Chips(20)));
    assert_eq!(hand.current_bet, Chips(20));
    assert_eq!(hand.min_raise, Chips(20));
    assert_eq!(hand.active, Some(3), "первым ходит место после BB");
    assert!(hand.board.is_empty());
    assert_eq!(hand.chips_in_play(), Chips(4_000));
}

#[test]
fn button_rotates_between_hands() {
    let mut table = make_table(&[1_000, 1_000, 1_000]);

    let mut engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");
    assert_eq!(engine.hand.dealer, 0);

    // Все фолдят до BB.
    act(&mut table, &mut engine, 0, PlayerActionKind::Fold);
    let status = act(&mut table, &mut engine, 1, PlayerActionKind::Fold);
    assert!(status.is_finished());
    assert!(!table.hand_in_progress);
    assert_eq!(table.hands_played, 1);

    let engine = start_hand(&mut table, &mut NoShuffle, 2).expect("start_hand");
    assert_eq!(engine.hand.dealer, 1);
    assert_eq!(engine.hand.active, Some(1), "3-max: первым ходит кнопка");
}

#[test]
fn heads_up_dealer_posts_small_blind_and_acts_first() {
    let mut table = make_table(&[1_000, 1_000]);
    let engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");

    assert_eq!(engine.hand.dealer, 0);
    assert_eq!(engine.hand.seat(0).map(|s| s.current_bet), Some(Chips(10)));
    assert_eq!(engine.hand.seat(1).map(|s| s.current_bet), Some(Chips(20)));
    assert_eq!(engine.hand.active, Some(0));
}

#[test]
fn streets_progress_and_board_grows() {
    let mut table = make_table(&[1_000, 950, 900]);
    let mut engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");

    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    act(&mut table, &mut engine, 1, PlayerActionKind::Call);
    act(&mut table, &mut engine, 2, PlayerActionKind::Check);

    assert_eq!(engine.hand.street, Street::Flop);
    assert_eq!(engine.hand.board.len(), 3);
    assert_eq!(engine.hand.pot, Chips(60));
    assert_eq!(engine.hand.current_bet, Chips::ZERO);
    assert_eq!(engine.hand.active, Some(1), "постфлоп первым ходит первый слева от кнопки");

    for seat in [1, 2, 0] {
        act(&mut table, &mut engine, seat, PlayerActionKind::Check);
    }
    assert_eq!(engine.hand.street, Street::Turn);
    assert_eq!(engine.hand.board.len(), 4);

    for seat in [1, 2, 0] {
        act(&mut table, &mut engine, seat, PlayerActionKind::Check);
    }
    assert_eq!(engine.hand.street, Street::River);
    assert_eq!(engine.hand.board.len(), 5);
}

#[test]
fn big_blind_keeps_option_after_limps() {
    let mut table = make_table(&[1_000, 1_000, 1_000]);
    let mut engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");

    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    act(&mut table, &mut engine, 1, PlayerActionKind::Call);

    assert_eq!(engine.hand.street, Street::Preflop);
    assert_eq!(engine.hand.active, Some(2), "BB может ещё повысить");

    act(&mut table, &mut engine, 2, PlayerActionKind::Raise(Chips(60)));
    assert_eq!(engine.hand.active, Some(0), "после рейза BB круг открывается заново");
}

#[test]
fn short_blinds_go_all_in_and_board_runs_out() {
    // У обоих меньше блайнда: никто не может ходить, борд докладывается сразу.
    let mut table = make_table(&[5, 8]);
    let engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");

    assert!(engine.is_complete());
    assert_eq!(engine.hand.board.len(), 5);
    let summary = engine.summary().expect("раздача рассчитана");
    assert!(summary.showdown);
    assert_eq!(summary.total_pot, Chips(13));
    assert_eq!(table.total_chips(), Chips(13));
    assert!(!table.hand_in_progress);

    let completed = engine
        .history
        .iter()
        .filter(|e| matches!(e, HandEventKind::RoundCompleted { .. }))
        .count();
    assert_eq!(completed, 4);
}

#[test]
fn run_out_leaves_a_snapshot_per_street() {
    let mut table = make_table(&[1_000, 1_000]);
    let mut engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");
    assert!(engine.take_street_snapshots().is_empty());

    // Хедз-ап: кнопка на малом блайнде ходит первой.
    act(&mut table, &mut engine, 0, PlayerActionKind::AllIn);
    assert!(engine.take_street_snapshots().is_empty());
    act(&mut table, &mut engine, 1, PlayerActionKind::Call);
    assert!(engine.is_complete());

    let streets = engine.take_street_snapshots();
    let seen: Vec<(Street, usize)> = streets.iter().map(|s| (s.street, s.board.len())).collect();
    assert_eq!(seen, vec![(Street::Flop, 3), (Street::Turn, 4), (Street::River, 5)]);
    assert!(streets.iter().all(|s| !s.complete && s.active.is_none() && s.last_aggressor.is_none()));
    assert_eq!(streets[0].pot, Chips(2_000));

    assert!(engine.take_street_snapshots().is_empty(), "снимки забираются один раз");
}

#[test]
fn start_hand_errors() {
    let mut lonely = make_table(&[1_000]);
    assert_eq!(
        start_hand(&mut lonely, &mut NoShuffle, 1).err(),
        Some(EngineError::NotEnoughPlayers)
    );

    let mut table = make_table(&[1_000, 1_000]);
    let _engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");
    assert_eq!(
        start_hand(&mut table, &mut NoShuffle, 2).err(),
        Some(EngineError::HandAlreadyInProgress)
    );

    let mut bad = Table::new(2, "Bad", TableConfig::new(6, 30, 20));
    bad.sit(0, PlayerAtTable::new(1, "A", Chips(100)));
    bad.sit(1, PlayerAtTable::new(2, "B", Chips(100)));
    assert!(matches!(
        start_hand(&mut bad, &mut NoShuffle, 1),
        Err(EngineError::InvalidStakes(_))
    ));
}
