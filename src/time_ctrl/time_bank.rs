//! Таймбанк игроков: сколько секунд дополнительного времени у кого осталось.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TimeRules;
use crate::domain::PlayerId;

/// Таймбанк одного игрока (секунды).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerTimeBank {
    pub remaining_secs: u32,
}

impl PlayerTimeBank {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            remaining_secs: initial_secs,
        }
    }

    /// Списать до `requested` секунд. Возвращает фактически списанное.
    pub fn grant(&mut self, requested: u32) -> u32 {
        let grant = requested.min(self.remaining_secs);
        self.remaining_secs -= grant;
        grant
    }
}

/// Таймбанк стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimeBank {
    players: HashMap<PlayerId, PlayerTimeBank>,
}

impl TimeBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Завести банк игрокам, у которых его ещё нет.
    pub fn init_for_players<I>(&mut self, rules: &TimeRules, players: I)
    where
        I: IntoIterator<Item = PlayerId>,
    {
        for pid in players {
            self.players
                .entry(pid)
                .or_insert_with(|| PlayerTimeBank::new(rules.bank_per_player_secs));
        }
    }

    /// Остаток таймбанка у игрока.
    pub fn remaining_for(&self, player_id: PlayerId) -> u32 {
        self.players
            .get(&player_id)
            .map(|b| b.remaining_secs)
            .unwrap_or(0)
    }

    /// Сколько всего ждать решения игрока: база + остаток банка.
    pub fn deadline_for(&self, player_id: PlayerId, rules: &TimeRules) -> Duration {
        rules.base_action() + Duration::from_secs(self.remaining_for(player_id) as u64)
    }

    /// Списать из банка время, потраченное сверх базового.
    /// Списывается кусками по `bank_step_secs`, но не больше остатка. Возвращает списанное.
    pub fn charge(&mut self, player_id: PlayerId, elapsed: Duration, rules: &TimeRules) -> u32 {
        let over = elapsed.saturating_sub(rules.base_action());
        if over.is_zero() {
            return 0;
        }

        let over_secs = over.as_millis().div_ceil(1000) as u32;
        let step = rules.bank_step_secs.max(1);
        let requested = over_secs.div_ceil(step).saturating_mul(step);

        self.players
            .get_mut(&player_id)
            .map(|bank| bank.grant(requested))
            .unwrap_or(0)
    }
}
