use thiserror::Error;

use crate::domain::{Chips, PlayerId, SeatIndex};
use crate::eval::EvalError;

/// Почему действие не может быть применено. Состояние при этом не меняется,
/// вызывающая сторона (контроллер/UI) должна запросить действие заново.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("сейчас не ход места {0}")]
    NotPlayersTurn(SeatIndex),

    #[error("место {0} уже не может ходить в этой раздаче")]
    SeatNotLive(SeatIndex),

    #[error("check невозможен – нужно доставить {to_call:?}")]
    CannotCheck { to_call: Chips },

    #[error("call невозможен – нет ставки для уравнивания")]
    CannotCall,

    #[error("рейз до {total:?} меньше минимума {min_total:?}")]
    RaiseTooSmall { total: Chips, min_total: Chips },

    #[error("рейз до {total:?} больше доступного {max_total:?}")]
    RaiseExceedsStack { total: Chips, max_total: Chips },

    #[error("нечего повышать – у игрока не осталось фишек сверх колла")]
    NothingToRaise,
}

/// Ошибки движка покера.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("В этом месте нет игрока")]
    EmptySeat,

    #[error("Игрок {0} не сидит на этом месте")]
    PlayerNotAtSeat(PlayerId),

    #[error("Недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error("Некорректные блайнды: {0}")]
    InvalidStakes(String),

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Недопустимое действие: {0}")]
    IllegalAction(#[from] IllegalAction),

    #[error("Некорректный набор карт для оценки: {0}")]
    InvalidHandInput(#[from] EvalError),

    #[error("Уже ожидается действие по этой раздаче")]
    ActionInFlight,

    #[error("Решение для устаревшей точки принятия решения")]
    StaleDecision,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Ошибка, после которой достаточно переспросить действие.
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, EngineError::IllegalAction(_))
    }
}
