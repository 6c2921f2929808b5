//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_cards(cards) -> Result<HandRank, EvalError>` (5–7 карт)
//!   `evaluate_best_hand(hole, board)`

pub mod errors;
pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use errors::EvalError;
pub use evaluator::{evaluate_best_hand, evaluate_cards};
pub use hand_rank::{describe_hand, hand_category, HandCategory};
