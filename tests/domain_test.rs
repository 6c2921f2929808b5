//! Тесты доменной модели: карты, фишки, колода, стол.

use holdem_table_engine::domain::card::{cards_from_str, cards_to_symbols, Card, Rank, Suit};
use holdem_table_engine::domain::chips::Chips;
use holdem_table_engine::domain::deck::Deck;
use holdem_table_engine::domain::player::{PlayerAtTable, PlayerStatus, SeatState};
use holdem_table_engine::domain::table::{Table, TableConfig, TableStakes};

#[test]
fn card_parsing_and_symbols() {
    let cards = cards_from_str("As Kh Td 2c").expect("валидная строка карт");
    assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
    assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(cards[0].to_string(), "As");

    // Нотация сервиса решений.
    assert_eq!(cards_to_symbols(&cards[..2]), "♠A♥K");
    assert_eq!(cards[2].symbol(), "♦10");

    assert!(cards_from_str("Ax").is_err());
    assert!(cards_from_str("A").is_err());
}

#[test]
fn chips_arithmetic_never_underflows() {
    assert_eq!(Chips(10) - Chips(25), Chips::ZERO);
    assert_eq!(Chips(10).saturating_sub(Chips(3)), Chips(7));
    assert_eq!(Chips(25).split(2), (Chips(12), Chips(1)));
    assert_eq!(Chips(25).split(0), (Chips::ZERO, Chips(25)));

    let total: Chips = [Chips(1), Chips(2), Chips(3)].iter().sum();
    assert_eq!(total, Chips(6));
}

#[test]
fn deck_has_52_unique_cards_and_stack_top_controls_draw_order() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let mut seen = deck.cards.clone();
    seen.sort_by_key(|c| (c.suit.index(), c.rank.value()));
    seen.dedup();
    assert_eq!(seen.len(), 52);

    let top = cards_from_str("Ah Kd 7c").expect("карты");
    deck.stack_top(&top);
    assert_eq!(deck.len(), 52, "дубликаты должны убираться из колоды");
    assert_eq!(deck.draw_n(3), top);
}

#[test]
fn table_sit_and_counts() {
    let mut table = Table::new(7, "Test table", TableConfig::new(6, 10, 20));
    assert_eq!(table.seats.len(), 6);

    assert!(table.sit(0, PlayerAtTable::new(1, "Alice", Chips(1_000))));
    assert!(!table.sit(0, PlayerAtTable::new(2, "Bob", Chips(1_000))), "место занято");
    assert!(!table.sit(9, PlayerAtTable::new(2, "Bob", Chips(1_000))), "места нет");
    assert!(table.sit(3, PlayerAtTable::human(2, "Bob", Chips::ZERO)));

    assert_eq!(table.seated_count(), 2);
    assert_eq!(table.dealable_count(), 1, "игрок без фишек не получает карты");
    assert!(table.player(3).is_some_and(|p| p.is_human));
    assert_eq!(table.total_chips(), Chips(1_000));
}

#[test]
fn stakes_validation() {
    assert!(TableStakes::new(Chips(10), Chips(20)).validate().is_ok());
    assert!(TableStakes::new(Chips(10), Chips::ZERO).validate().is_err());
    assert!(TableStakes::new(Chips(30), Chips(20)).validate().is_err());
}

#[test]
fn seat_commit_caps_at_stack_and_marks_all_in() {
    let player = PlayerAtTable::new(1, "Short", Chips(30));
    let mut seat = SeatState::from_player(0, &player);

    assert_eq!(seat.commit(Chips(10)), Chips(10));
    assert_eq!(seat.status, PlayerStatus::Active);

    assert_eq!(seat.commit(Chips(50)), Chips(20));
    assert_eq!(seat.stack, Chips::ZERO);
    assert_eq!(seat.current_bet, Chips(30));
    assert_eq!(seat.committed, Chips(30));
    assert!(seat.is_all_in());
    assert!(seat.is_in_hand());
    assert!(!seat.can_act());
}
