use thiserror::Error;

use crate::domain::card::Card;

/// Некорректный набор карт для оценки. При правильной работе движка не возникает.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Для оценки нужно минимум 5 карт, передано {0}")]
    TooFewCards(usize),

    #[error("Для оценки нужно не больше 7 карт, передано {0}")]
    TooManyCards(usize),

    #[error("Карта {0} встречается дважды")]
    DuplicateCard(Card),
}
