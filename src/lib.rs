//! Движок стола техасского холдема.
//!
//! - `domain` – карты, фишки, игроки, стол, состояние раздачи;
//! - `eval` – оценка силы руки;
//! - `engine` – раунды ставок, жизненный цикл раздачи, источники действий, контроллер;
//! - `time_ctrl` – время на ход и таймбанк;
//! - `infra` – реализации RNG.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod time_ctrl;
