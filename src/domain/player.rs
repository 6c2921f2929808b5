use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;
use crate::domain::PlayerId;

/// Статус игрока в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в олл-ине – не может больше делать ставки, но борется за банк.
    AllIn,
    /// Игрок сидит за столом, но не участвует в раздаче (sit out).
    SittingOut,
    /// Игрок вылетел (нулевой стек).
    Busted,
}

/// Игрок за конкретным столом (живёт между раздачами).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    pub name: String,
    /// Решения принимает человек через UI (иначе – бот / внешний сервис).
    pub is_human: bool,
    /// Текущий стек за столом.
    pub stack: Chips,
    pub status: PlayerStatus,
}

impl PlayerAtTable {
    pub fn new(player_id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            player_id,
            name: name.into(),
            is_human: false,
            stack,
            status: PlayerStatus::Active,
        }
    }

    pub fn human(player_id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            is_human: true,
            ..Self::new(player_id, name, stack)
        }
    }

    /// Может ли игрок получить карты в следующей раздаче.
    pub fn can_be_dealt(&self) -> bool {
        !self.stack.is_zero() && !matches!(self.status, PlayerStatus::SittingOut | PlayerStatus::Busted)
    }
}

/// Место в конкретной раздаче: стек, ставки, карты, флаги.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatState {
    /// Позиция за столом.
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub name: String,
    pub is_human: bool,
    /// Фишки, ещё не поставленные в этой раздаче.
    pub stack: Chips,
    /// Ставка на текущей улице (ещё не сметена в банк).
    pub current_bet: Chips,
    /// Сколько всего внесено за раздачу (все улицы) – база для сайд-потов.
    pub committed: Chips,
    /// Карманные карты: 0 или ровно 2.
    pub hole_cards: Vec<Card>,
    pub status: PlayerStatus,
    /// Действовал ли игрок после последнего рейза на этой улице.
    pub has_acted: bool,
}

impl SeatState {
    pub fn from_player(seat: SeatIndex, player: &PlayerAtTable) -> Self {
        Self {
            seat,
            player_id: player.player_id,
            name: player.name.clone(),
            is_human: player.is_human,
            stack: player.stack,
            current_bet: Chips::ZERO,
            committed: Chips::ZERO,
            hole_cards: Vec::new(),
            status: PlayerStatus::Active,
            has_acted: false,
        }
    }

    /// Ещё борется за банк (не сфолдил).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    /// Может ещё делать ходы на этой раздаче.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Переложить из стека в ставку не больше `amount`. Возвращает реально внесённое.
    /// Если стек закончился – игрок в олл-ине.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.current_bet += real;
        self.committed += real;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        real
    }
}
