use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "amount", rename_all = "kebab-case")]
pub enum PlayerActionKind {
    Fold,
    Check,
    /// Уравнять текущую ставку. Если стека не хватает – олл-ин на остаток.
    Call,
    /// Поднять ставку улицы ДО указанной суммы (итоговая ставка игрока на улице).
    /// При нулевой ставке улицы это обычный bet.
    Raise(Chips),
    /// Поставить весь стек: по ситуации это call или raise.
    AllIn,
}

impl PlayerActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerActionKind::Fold => "fold",
            PlayerActionKind::Check => "check",
            PlayerActionKind::Call => "call",
            PlayerActionKind::Raise(_) => "raise",
            PlayerActionKind::AllIn => "all-in",
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// В каком месте он сидит.
    pub seat: SeatIndex,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, seat: SeatIndex, kind: PlayerActionKind) -> Self {
        Self {
            player_id,
            seat,
            kind,
        }
    }
}
