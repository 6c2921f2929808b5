//! Позиции за столом: кнопка, блайнды, названия позиций для сервиса решений.

use holdem_table_engine::domain::{
    chips::Chips,
    player::PlayerAtTable,
    table::{Table, TableConfig},
    PlayerId, SeatIndex,
};
use holdem_table_engine::engine::{
    positions::{blind_seats, next_dealer, seats_after_dealer},
    start_hand, PositionName, RandomSource,
};

struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

fn names(table_size: usize) -> Vec<String> {
    (0..table_size)
        .map(|offset| PositionName::from_offset(offset, table_size).to_string())
        .collect()
}

#[test]
fn heads_up_has_button_and_big_blind() {
    assert_eq!(names(2), vec!["Button", "Big Blind"]);
}

#[test]
fn position_wheel_for_every_table_size() {
    assert_eq!(names(3), vec!["Button", "Small Blind", "Big Blind"]);
    assert_eq!(names(4), vec!["Button", "Small Blind", "Big Blind", "Under the Gun"]);
    assert_eq!(
        names(5),
        vec!["Button", "Small Blind", "Big Blind", "Under the Gun", "Cutoff"]
    );
    assert_eq!(
        names(6),
        vec!["Button", "Small Blind", "Big Blind", "Under the Gun", "Middle Position", "Cutoff"]
    );
    assert_eq!(
        names(8),
        vec![
            "Button",
            "Small Blind",
            "Big Blind",
            "Under the Gun",
            "Under the Gun +1",
            "Middle Position",
            "Middle Position +1",
            "Cutoff"
        ]
    );
    assert_eq!(
        names(9)[3..].to_vec(),
        vec![
            "Under the Gun",
            "Under the Gun +1",
            "Under the Gun +2",
            "Middle Position",
            "Middle Position +1",
            "Cutoff"
        ]
    );
}

#[test]
fn contract_indices_are_unique_per_table() {
    for size in 2..=10 {
        let mut idx: Vec<u8> = (0..size)
            .map(|offset| PositionName::from_offset(offset, size).contract_index())
            .collect();
        idx.sort_unstable();
        idx.dedup();
        assert_eq!(idx.len(), size, "размер стола {size}");
    }
    assert_eq!(PositionName::UnderTheGun(0).contract_index(), 0);
    assert_eq!(PositionName::Cutoff.contract_index(), 4);
    assert_eq!(PositionName::BigBlind.contract_index(), 7);
}

#[test]
fn seats_after_dealer_wraps_around() {
    assert_eq!(seats_after_dealer(0, 0, 6), 0);
    assert_eq!(seats_after_dealer(1, 4, 6), 3);
    assert_eq!(seats_after_dealer(4, 1, 6), 3);
    assert_eq!(seats_after_dealer(3, 3, 0), 0);
}

fn table_with(seats: &[SeatIndex]) -> Table {
    let mut table = Table::new(1, "Positions", TableConfig::new(9, 10, 20));
    for &seat in seats {
        let pid = seat as PlayerId + 1;
        table.sit(seat, PlayerAtTable::new(pid, format!("P{pid}"), Chips(500)));
    }
    table
}

#[test]
fn button_skips_empty_seats() {
    let mut table = table_with(&[2, 5, 7]);
    assert_eq!(next_dealer(&table), Some(2));

    table.dealer_button = Some(5);
    assert_eq!(next_dealer(&table), Some(7));

    table.dealer_button = Some(7);
    assert_eq!(next_dealer(&table), Some(2), "кнопка переходит через конец стола");
}

#[test]
fn positions_in_a_sparse_hand() {
    let mut table = table_with(&[1, 4, 6, 8]);
    let engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");
    let hand = &engine.hand;

    assert_eq!(hand.dealer, 1);
    assert_eq!(blind_seats(hand), Some((4, 6)));
    assert_eq!(PositionName::for_seat(hand, 1), Some(PositionName::Button));
    assert_eq!(PositionName::for_seat(hand, 4), Some(PositionName::SmallBlind));
    assert_eq!(PositionName::for_seat(hand, 6), Some(PositionName::BigBlind));
    assert_eq!(PositionName::for_seat(hand, 8), Some(PositionName::UnderTheGun(0)));
    assert_eq!(PositionName::for_seat(hand, 3), None);
}

#[test]
fn heads_up_blinds_follow_the_button() {
    let mut table = table_with(&[3, 7]);
    let engine = start_hand(&mut table, &mut NoShuffle, 1).expect("start_hand");

    assert_eq!(engine.hand.dealer, 3);
    assert_eq!(blind_seats(&engine.hand), Some((3, 7)));
    assert_eq!(PositionName::for_seat(&engine.hand, 7), Some(PositionName::BigBlind));
}
