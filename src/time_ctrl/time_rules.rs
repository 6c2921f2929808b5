//! Правила тайминга хода. Только "правила", без состояния и без привязки к столу.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Профиль тайминга.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeProfile {
    /// 20 сек на ход + банк 60 сек, списывается по 10 сек.
    Standard,
    /// Быстрые боты: 2 сек на ход, банка нет.
    Bots,
}

/// Правила тайминга для одного стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeRules {
    /// Сколько секунд даётся на базовое решение (каждый ход).
    pub base_action_secs: u32,
    /// Сколько секунд банка времени есть у каждого игрока на сессию.
    pub bank_per_player_secs: u32,
    /// Банк списывается кусками такого размера.
    pub bank_step_secs: u32,
}

impl TimeRules {
    pub const fn new(base_action_secs: u32, bank_per_player_secs: u32, bank_step_secs: u32) -> Self {
        Self {
            base_action_secs,
            bank_per_player_secs,
            bank_step_secs,
        }
    }

    pub const fn standard() -> Self {
        Self::new(20, 60, 10)
    }

    pub const fn from_profile(profile: TimeProfile) -> Self {
        match profile {
            TimeProfile::Standard => Self::standard(),
            TimeProfile::Bots => Self::new(2, 0, 1),
        }
    }

    pub fn base_action(&self) -> Duration {
        Duration::from_secs(self.base_action_secs as u64)
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
