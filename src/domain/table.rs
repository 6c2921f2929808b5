use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::domain::TableId;

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Конфиг стола: сколько мест и какие блайнды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (обычно 2–9).
    pub max_seats: u8,
    pub stakes: TableStakes,
}

impl TableConfig {
    pub fn new(max_seats: u8, small_blind: u64, big_blind: u64) -> Self {
        Self {
            max_seats,
            stakes: TableStakes::new(Chips(small_blind), Chips(big_blind)),
        }
    }
}

/// Стейки стола (SB/BB).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.big_blind.is_zero() {
            return Err("big_blind = 0".into());
        }
        if self.small_blind > self.big_blind {
            return Err(format!(
                "small_blind ({}) > big_blind ({})",
                self.small_blind.0, self.big_blind.0
            ));
        }
        Ok(())
    }
}

/// Стол между раздачами: кто где сидит, стеки, кнопка.
/// Состояние конкретной раздачи живёт в `HandState`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<PlayerAtTable>>,

    /// Место дилерской кнопки или None, если раздач ещё не было.
    pub dealer_button: Option<SeatIndex>,

    /// Идёт ли сейчас раздача.
    pub hand_in_progress: bool,

    /// Сколько раздач сыграно за столом.
    pub hands_played: u64,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, name: impl Into<String>, config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        Self {
            id,
            name: name.into(),
            config,
            seats,
            dealer_button: None,
            hand_in_progress: false,
            hands_played: 0,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Сколько игроков можно посадить в следующую раздачу.
    pub fn dealable_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|p| p.can_be_dealt())
            .count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    /// Посадить игрока. Возвращает false, если место занято или не существует.
    pub fn sit(&mut self, index: SeatIndex, player: PlayerAtTable) -> bool {
        match self.seats.get_mut(index as usize) {
            Some(slot @ None) => {
                *slot = Some(player);
                true
            }
            _ => false,
        }
    }

    pub fn player(&self, index: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(index as usize).and_then(|s| s.as_ref())
    }

    /// Сумма стеков всех игроков за столом.
    pub fn total_chips(&self) -> Chips {
        self.seats.iter().flatten().map(|p| p.stack).sum()
    }
}
