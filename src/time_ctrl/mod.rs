//! Контроль времени хода: правила и банк времени игроков.
//!
//! Ожидание решения ограничено `base_action_secs + остаток банка`;
//! всё, что потрачено сверх базы, списывается из банка.

pub mod time_bank;
pub mod time_rules;

pub use time_bank::{PlayerTimeBank, TimeBank};
pub use time_rules::{TimeProfile, TimeRules};
