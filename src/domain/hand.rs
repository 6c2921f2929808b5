use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::SeatState;
use crate::domain::table::SeatIndex;
use crate::domain::{HandId, PlayerId, TableId};

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица и сколько карт борда на неё открывается.
    pub fn next(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            Street::River => Some((Street::Showdown, 0)),
            Street::Showdown => None,
        }
    }

    /// Сколько карт лежит на борде на этой улице.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        }
    }
}

/// Сила руки. Сравнивается как число: больше – сильнее.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    /// Итоговый ранг руки (если дошёл до шоудауна).
    pub rank: Option<HandRank>,
    /// Сколько игрок внёс в банк за раздачу.
    pub committed: Chips,
    /// Сколько получил из банка(ов).
    pub won: Chips,
    /// Стек после расчёта.
    pub final_stack: Chips,
    /// Является ли игрок победителем (включая сплит).
    pub is_winner: bool,
}

impl PlayerHandResult {
    /// Выигрыш/проигрыш относительно начала раздачи.
    pub fn net(&self) -> i64 {
        self.won.0 as i64 - self.committed.0 as i64
    }
}

/// Краткое описание завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    /// Была ли вскрытие (false – все, кроме одного, сфолдили).
    pub showdown: bool,
    /// Результаты в порядке мест за столом.
    pub results: Vec<PlayerHandResult>,
}

impl HandSummary {
    pub fn result_for(&self, seat: SeatIndex) -> Option<&PlayerHandResult> {
        self.results.iter().find(|r| r.seat == seat)
    }

    pub fn winners(&self) -> Vec<SeatIndex> {
        self.results
            .iter()
            .filter(|r| r.is_winner)
            .map(|r| r.seat)
            .collect()
    }

    /// Сколько рук было оценено на шоудауне.
    pub fn evaluated_count(&self) -> usize {
        self.results.iter().filter(|r| r.rank.is_some()).count()
    }
}

/// Состояние одной раздачи. Создаётся на каждую раздачу и выбрасывается после расчёта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandState {
    pub table_id: TableId,
    pub hand_id: HandId,
    /// Участники раздачи в порядке мест за столом. Состав не меняется до конца раздачи.
    pub seats: Vec<SeatState>,
    /// Место дилерской кнопки.
    pub dealer: SeatIndex,
    /// Общие карты: 0 / 3 / 4 / 5, только растут.
    pub board: Vec<Card>,
    /// Ставки прошлых улиц, уже сметённые в банк.
    pub pot: Chips,
    pub street: Street,
    /// Ставка, которую нужно уравнять на текущей улице.
    pub current_bet: Chips,
    /// Минимальное повышение (BB или размер последнего полного рейза).
    pub min_raise: Chips,
    /// Последний агрессор на улице.
    pub last_aggressor: Option<SeatIndex>,
    pub big_blind: Chips,
    /// Чей сейчас ход.
    pub active: Option<SeatIndex>,
    /// Раздача рассчитана.
    pub complete: bool,
}

impl HandState {
    pub fn seat(&self, seat: SeatIndex) -> Option<&SeatState> {
        self.seats.iter().find(|s| s.seat == seat)
    }

    pub fn seat_mut(&mut self, seat: SeatIndex) -> Option<&mut SeatState> {
        self.seats.iter_mut().find(|s| s.seat == seat)
    }

    /// Индекс места в `seats`.
    pub fn position_of(&self, seat: SeatIndex) -> Option<usize> {
        self.seats.iter().position(|s| s.seat == seat)
    }

    /// Сколько ещё нужно доставить игроку до текущей ставки.
    pub fn to_call(&self, seat: SeatIndex) -> Chips {
        self.seat(seat)
            .map(|s| self.current_bet.saturating_sub(s.current_bet))
            .unwrap_or(Chips::ZERO)
    }

    /// Сколько мест ещё борются за банк.
    pub fn in_hand_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_in_hand()).count()
    }

    /// Сколько мест ещё могут ходить (не сфолдили, не в олл-ине).
    pub fn can_act_count(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }

    /// Ставки текущей улицы, ещё не сметённые в банк.
    pub fn street_bets(&self) -> Chips {
        self.seats.iter().map(|s| s.current_bet).sum()
    }

    /// Весь банк с учётом ставок текущей улицы.
    pub fn total_pot(&self) -> Chips {
        self.pot + self.street_bets()
    }

    /// Все фишки раздачи: стеки + банк + ставки улицы.
    /// Постоянна до момента расчёта.
    pub fn chips_in_play(&self) -> Chips {
        let stacks: Chips = self.seats.iter().map(|s| s.stack).sum();
        stacks + self.pot + self.street_bets()
    }
}
