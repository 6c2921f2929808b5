//! Граница с UI: снимки стола только для чтения и контекст решения для источника действий.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::card::{cards_to_symbols, Card};
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::actions::PlayerActionKind;
use crate::engine::game_loop::HandEngine;
use crate::engine::positions::PositionName;
use crate::engine::validation::{diff_to_call, legal_actions, min_raise_total};

/// Публичная информация о месте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub stack: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Сколько закрытых карт у места (0 или 2).
    pub card_count: usize,
    /// Карты, открытые на шоудауне.
    pub revealed: Option<Vec<Card>>,
}

/// Снимок стола после действия или смены улицы. Карманные карты скрыты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub table_id: TableId,
    pub table_name: String,
    pub hand_id: HandId,
    pub street: Street,
    pub board: Vec<Card>,
    /// Банк вместе со ставками текущей улицы.
    pub pot: Chips,
    pub current_bet: Chips,
    /// Кто последним ставил или повышал на этой улице.
    pub last_aggressor: Option<SeatIndex>,
    pub dealer: SeatIndex,
    pub active: Option<SeatIndex>,
    pub complete: bool,
    pub seats: Vec<SeatView>,
}

impl TableSnapshot {
    pub fn capture(table: &Table, engine: &HandEngine) -> Self {
        let hand = &engine.hand;
        let showdown = engine.summary().is_some_and(|s| s.showdown);

        let seats = hand
            .seats
            .iter()
            .map(|s| SeatView {
                seat: s.seat,
                player_id: s.player_id,
                name: s.name.clone(),
                is_human: s.is_human,
                stack: s.stack,
                current_bet: s.current_bet,
                status: s.status,
                card_count: s.hole_cards.len(),
                revealed: (showdown && s.is_in_hand()).then(|| s.hole_cards.clone()),
            })
            .collect();

        Self {
            table_id: table.id,
            table_name: table.name.clone(),
            hand_id: hand.hand_id,
            street: hand.street,
            board: hand.board.clone(),
            pot: hand.total_pot(),
            current_bet: hand.current_bet,
            last_aggressor: hand.last_aggressor,
            dealer: hand.dealer,
            active: engine.active_seat(),
            complete: hand.complete,
            seats,
        }
    }

    pub fn seat(&self, seat: SeatIndex) -> Option<&SeatView> {
        self.seats.iter().find(|s| s.seat == seat)
    }
}

/// Всё, что источник действий знает о своём ходе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionContext {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub name: String,
    pub street: Street,
    pub hole_cards: Vec<Card>,
    /// Карты в виде "♠A♥K".
    pub hole_cards_symbols: String,
    pub board: Vec<Card>,
    pub board_symbols: String,
    pub stack: Chips,
    pub pot: Chips,
    pub current_bet: Chips,
    pub to_call: Chips,
    pub min_raise_total: Chips,
    /// Максимальная итоговая ставка места на улице (олл-ин).
    pub max_total: Chips,
    pub legal_actions: Vec<PlayerActionKind>,
    pub position: PositionName,
    pub position_name: String,
    pub position_index: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub players_in_hand: usize,
    pub snapshot: TableSnapshot,
}

impl DecisionContext {
    /// Контекст для места. None, если места нет в раздаче.
    pub fn for_seat(table: &Table, engine: &HandEngine, seat: SeatIndex) -> Option<Self> {
        let hand = &engine.hand;
        let state = hand.seat(seat)?;
        let position = PositionName::for_seat(hand, seat)?;

        Some(Self {
            table_id: table.id,
            hand_id: hand.hand_id,
            seat,
            player_id: state.player_id,
            name: state.name.clone(),
            street: hand.street,
            hole_cards: state.hole_cards.clone(),
            hole_cards_symbols: cards_to_symbols(&state.hole_cards),
            board: hand.board.clone(),
            board_symbols: cards_to_symbols(&hand.board),
            stack: state.stack,
            pot: hand.total_pot(),
            current_bet: hand.current_bet,
            to_call: diff_to_call(state, hand),
            min_raise_total: min_raise_total(hand),
            max_total: state.stack + state.current_bet,
            legal_actions: legal_actions(state, hand),
            position,
            position_name: position.to_string(),
            position_index: position.contract_index(),
            small_blind: table.config.stakes.small_blind,
            big_blind: table.config.stakes.big_blind,
            players_in_hand: hand.in_hand_count(),
            snapshot: TableSnapshot::capture(table, engine),
        })
    }

    /// Нужно ли что-то доставлять, чтобы остаться в раздаче.
    pub fn owes_chips(&self) -> bool {
        !self.to_call.is_zero()
    }
}

/// Потребитель снимков стола (UI, лог, сеть).
pub trait SnapshotSink: Send {
    fn publish(&mut self, snapshot: TableSnapshot);
}

/// Снимки копятся в памяти.
impl SnapshotSink for Vec<TableSnapshot> {
    fn publish(&mut self, snapshot: TableSnapshot) {
        self.push(snapshot);
    }
}

/// Снимки уходят в канал tokio. Закрытый приёмник не останавливает игру.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<TableSnapshot>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<TableSnapshot>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TableSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SnapshotSink for ChannelSink {
    fn publish(&mut self, snapshot: TableSnapshot) {
        if self.tx.send(snapshot).is_err() {
            debug!("приёмник снимков закрыт");
        }
    }
}
