//! Защита от повторного входа: на столе может ожидаться не больше одного действия.
//!
//! Перед запросом действия у источника контроллер берёт `InFlightToken`.
//! Пока токен не использован или не брошен, новый запрос и прямое применение
//! действия отклоняются.

use serde::{Deserialize, Serialize};

use crate::domain::{HandId, SeatIndex};
use crate::engine::errors::EngineError;

/// Точка принятия решения: раздача, номер запроса, место.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionPoint {
    pub hand_id: HandId,
    pub seq: u64,
    pub seat: SeatIndex,
}

/// Право применить одно действие в конкретной точке решения. Не клонируется.
#[derive(Debug, PartialEq, Eq)]
pub struct InFlightToken {
    point: DecisionPoint,
}

impl InFlightToken {
    pub fn point(&self) -> DecisionPoint {
        self.point
    }

    pub fn seat(&self) -> SeatIndex {
        self.point.seat
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionGate {
    in_flight: Option<DecisionPoint>,
    next_seq: u64,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending(&self) -> Option<DecisionPoint> {
        self.in_flight
    }

    /// Открыть точку решения. Ошибка, если уже есть ожидающая.
    pub fn begin(&mut self, hand_id: HandId, seat: SeatIndex) -> Result<InFlightToken, EngineError> {
        if self.in_flight.is_some() {
            return Err(EngineError::ActionInFlight);
        }
        let point = DecisionPoint {
            hand_id,
            seq: self.next_seq,
            seat,
        };
        self.next_seq += 1;
        self.in_flight = Some(point);
        Ok(InFlightToken { point })
    }

    /// Токен относится к текущей ожидающей точке.
    pub fn check(&self, token: &InFlightToken) -> Result<(), EngineError> {
        if self.in_flight == Some(token.point) {
            Ok(())
        } else {
            Err(EngineError::StaleDecision)
        }
    }

    /// Закрыть точку решения (действие применено или запрос брошен).
    pub fn release(&mut self, token: &InFlightToken) {
        if self.in_flight == Some(token.point) {
            self.in_flight = None;
        }
    }

    /// Сбросить ожидание без токена (раздача завершена/прервана).
    pub fn clear(&mut self) {
        self.in_flight = None;
    }
}
