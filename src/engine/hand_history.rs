use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, Street};
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче. Журнал живёт только в памяти, пока идёт раздача.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    HandStarted {
        table_id: TableId,
        hand_id: HandId,
        dealer: SeatIndex,
    },

    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    PlayerActed {
        player_id: PlayerId,
        seat: SeatIndex,
        action: PlayerActionKind,
        paid: Chips,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Действие подставлено контроллером (таймаут, сбой источника, неверные ответы).
    ForcedAction {
        seat: SeatIndex,
        action: PlayerActionKind,
        reason: String,
    },

    /// Раунд ставок на улице завершён.
    RoundCompleted {
        street: Street,
    },

    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },

    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        rank: HandRank,
    },

    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        pot_index: usize,
        amount: Chips,
    },

    /// Раздача прервана, вклады возвращены.
    HandAborted,

    HandFinished {
        hand_id: HandId,
        table_id: TableId,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// История раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandEventKind> {
        self.events.iter().map(|e| &e.kind)
    }

    /// Сколько раз завершался раунд на улице.
    pub fn rounds_completed_on(&self, street: Street) -> usize {
        self.iter()
            .filter(|k| matches!(k, HandEventKind::RoundCompleted { street: s } if *s == street))
            .count()
    }
}
