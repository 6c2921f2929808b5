use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{HandState, SeatIndex, SeatState, Table};

/// Найти следующее место по кругу, где сидит игрок, которому можно сдавать карты.
pub fn next_dealable_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if table.seats[idx].as_ref().is_some_and(|p| p.can_be_dealt()) {
            return Some(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Следующая позиция дилера:
/// - если есть текущая кнопка – следующее место с игроком;
/// - если нет – первое такое место с нуля.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    match table.dealer_button {
        Some(button) => next_dealable_seat(table, button, false),
        None => next_dealable_seat(table, 0, true),
    }
}

/// Сколько мест после дилера сидит игрок (дилер = 0). Работает для любого размера стола.
pub fn seats_after_dealer(seat_pos: usize, dealer_pos: usize, table_size: usize) -> usize {
    if table_size == 0 {
        return 0;
    }
    (seat_pos % table_size + table_size - dealer_pos % table_size) % table_size
}

/// Места раздачи по кругу, начиная со следующего за `start` (сам `start` – последним).
pub fn seats_after(hand: &HandState, start: SeatIndex) -> impl Iterator<Item = &SeatState> {
    let n = hand.seats.len();
    let from = hand.position_of(start).unwrap_or(0);
    (1..=n).map(move |i| &hand.seats[(from + i) % n])
}

/// Первое место после `start`, удовлетворяющее условию.
pub fn next_seat_where<F>(hand: &HandState, start: SeatIndex, pred: F) -> Option<SeatIndex>
where
    F: Fn(&SeatState) -> bool,
{
    seats_after(hand, start).find(|s| pred(s)).map(|s| s.seat)
}

/// Места малого и большого блайндов.
///
/// Хедз-ап: дилер ставит SB, второй игрок – BB.
/// Иначе: SB – первый слева от дилера, BB – следующий.
pub fn blind_seats(hand: &HandState) -> Option<(SeatIndex, SeatIndex)> {
    match hand.seats.len() {
        0 | 1 => None,
        2 => {
            let bb = next_seat_where(hand, hand.dealer, |_| true)?;
            Some((hand.dealer, bb))
        }
        _ => {
            let sb = next_seat_where(hand, hand.dealer, |_| true)?;
            let bb = next_seat_where(hand, sb, |_| true)?;
            Some((sb, bb))
        }
    }
}

/// Название позиции за столом, как его ожидает сервис решений.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PositionName {
    /// UTG + n.
    UnderTheGun(u8),
    /// MP + n.
    MiddlePosition(u8),
    Cutoff,
    Button,
    SmallBlind,
    BigBlind,
}

impl PositionName {
    /// Позиция места в раздаче. Колесо позиций строится от дилера по модулю размера стола.
    pub fn for_seat(hand: &HandState, seat: SeatIndex) -> Option<PositionName> {
        let n = hand.seats.len();
        let seat_pos = hand.position_of(seat)?;
        let dealer_pos = hand.position_of(hand.dealer)?;
        Some(Self::from_offset(seats_after_dealer(seat_pos, dealer_pos, n), n))
    }

    /// `offset` – мест после дилера, `table_size` – игроков в раздаче.
    pub fn from_offset(offset: usize, table_size: usize) -> PositionName {
        if table_size <= 2 {
            return if offset == 0 {
                PositionName::Button
            } else {
                PositionName::BigBlind
            };
        }
        match offset {
            0 => PositionName::Button,
            1 => PositionName::SmallBlind,
            2 => PositionName::BigBlind,
            _ => {
                // Места между BB и кнопкой: UTG.. MP.. CO.
                let middle = table_size - 3;
                let idx = offset - 3;
                // Сколько мест из середины отдаём под UTG.
                let utg_count = match middle {
                    0..=3 => 1,
                    4 => 2,
                    m => m - 3,
                };
                if middle >= 2 && idx == middle - 1 {
                    PositionName::Cutoff
                } else if idx < utg_count {
                    PositionName::UnderTheGun(idx as u8)
                } else {
                    PositionName::MiddlePosition((idx - utg_count) as u8)
                }
            }
        }
    }

    /// Номер позиции в списке сервиса решений:
    /// UTG, UTG+1, MP, MP+1, CO, BTN, SB, BB. Дальние UTG+n получают номера после BB.
    pub fn contract_index(&self) -> u8 {
        match *self {
            PositionName::UnderTheGun(0) => 0,
            PositionName::UnderTheGun(1) => 1,
            PositionName::UnderTheGun(n) => 6 + n,
            PositionName::MiddlePosition(0) => 2,
            PositionName::MiddlePosition(_) => 3,
            PositionName::Cutoff => 4,
            PositionName::Button => 5,
            PositionName::SmallBlind => 6,
            PositionName::BigBlind => 7,
        }
    }
}

impl fmt::Display for PositionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionName::UnderTheGun(0) => write!(f, "Under the Gun"),
            PositionName::UnderTheGun(n) => write!(f, "Under the Gun +{n}"),
            PositionName::MiddlePosition(0) => write!(f, "Middle Position"),
            PositionName::MiddlePosition(n) => write!(f, "Middle Position +{n}"),
            PositionName::Cutoff => write!(f, "Cutoff"),
            PositionName::Button => write!(f, "Button"),
            PositionName::SmallBlind => write!(f, "Small Blind"),
            PositionName::BigBlind => write!(f, "Big Blind"),
        }
    }
}
