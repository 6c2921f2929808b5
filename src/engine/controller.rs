//! Асинхронный контроллер стола: гоняет раздачи, спрашивает источники действий,
//! следит за временем и подставляет безопасный ход при сбоях.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{timeout, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::hand::HandSummary;
use crate::domain::table::Table;
use crate::domain::{HandId, SeatIndex};
use crate::engine::action_source::{default_action, ActionSource, ActionSourceError, UnknownActionPolicy};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{abort_hand, apply_with_token, start_hand, HandEngine, HandStatus};
use crate::engine::gate::InFlightToken;
use crate::engine::hand_history::HandEventKind;
use crate::engine::view::{DecisionContext, SnapshotSink, TableSnapshot};
use crate::engine::RandomSource;
use crate::time_ctrl::{TimeBank, TimeRules};

/// Настройки контроллера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ControllerConfig {
    pub time_rules: TimeRules,
    /// Сколько раз переспрашивать источник после недопустимого действия.
    pub max_reprompts: u32,
    /// Политика для неизвестных строк действия от сервиса решений.
    /// Применяется к каждому источнику при `set_source`.
    pub unknown_action: UnknownActionPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            time_rules: TimeRules::standard(),
            max_reprompts: 2,
            unknown_action: UnknownActionPolicy::DefaultToCall,
        }
    }
}

impl ControllerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ControllerError> {
        serde_json::from_str(raw).map_err(|e| ControllerError::InvalidConfig(e.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("раздача отменена")]
    Cancelled,

    #[error("у места {0} нет источника действий")]
    MissingActionSource(SeatIndex),

    #[error("некорректная конфигурация: {0}")]
    InvalidConfig(String),
}

/// Стол вместе с источниками действий мест.
pub struct HandController<R: RandomSource> {
    table: Table,
    sources: Vec<Option<Box<dyn ActionSource>>>,
    rng: R,
    config: ControllerConfig,
    sink: Option<Box<dyn SnapshotSink>>,
    time_bank: TimeBank,
    next_hand_id: HandId,
    last_hand: Option<HandEngine>,
}

impl<R: RandomSource> HandController<R> {
    pub fn new(table: Table, rng: R, config: ControllerConfig) -> Self {
        let sources = std::iter::repeat_with(|| None).take(table.seats.len()).collect();
        Self {
            table,
            sources,
            rng,
            config,
            sink: None,
            time_bank: TimeBank::new(),
            next_hand_id: 1,
            last_hand: None,
        }
    }

    pub fn with_sink(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Назначить источник действий занятому месту.
    pub fn set_source(&mut self, seat: SeatIndex, source: impl ActionSource + 'static) -> Result<(), ControllerError> {
        let slot = self
            .sources
            .get_mut(seat as usize)
            .ok_or(EngineError::InvalidSeat(seat))?;
        if self.table.is_seat_empty(seat) {
            return Err(EngineError::EmptySeat.into());
        }
        let mut source = Box::new(source);
        source.set_unknown_action_policy(self.config.unknown_action);
        *slot = Some(source);
        Ok(())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn time_bank(&self) -> &TimeBank {
        &self.time_bank
    }

    /// Последняя сыгранная (или прерванная) раздача.
    pub fn last_hand(&self) -> Option<&HandEngine> {
        self.last_hand.as_ref()
    }

    /// Сыграть одну раздачу до конца.
    pub async fn play_hand(&mut self, cancel: &CancellationToken) -> Result<HandSummary, ControllerError> {
        for (idx, slot) in self.table.seats.iter().enumerate() {
            let dealt = slot.as_ref().is_some_and(|p| p.can_be_dealt());
            if dealt && self.sources.get(idx).map_or(true, Option::is_none) {
                return Err(ControllerError::MissingActionSource(idx as SeatIndex));
            }
        }

        let players: Vec<_> = self.table.seats.iter().flatten().map(|p| p.player_id).collect();
        self.time_bank.init_for_players(&self.config.time_rules, players);

        let hand_id = self.next_hand_id;
        self.next_hand_id += 1;

        let mut engine = start_hand(&mut self.table, &mut self.rng, hand_id)?;
        self.publish(&mut engine);

        let result = self.drive(&mut engine, cancel).await;
        self.last_hand = Some(engine);
        result
    }

    /// Сыграть до `n` раздач подряд. Останавливается, когда играть некому.
    pub async fn play_hands(&mut self, n: usize, cancel: &CancellationToken) -> Result<Vec<HandSummary>, ControllerError> {
        let mut summaries = Vec::with_capacity(n);
        for _ in 0..n {
            if self.table.dealable_count() < 2 {
                info!(table_id = self.table.id, "за столом меньше двух игроков с фишками");
                break;
            }
            summaries.push(self.play_hand(cancel).await?);
        }
        Ok(summaries)
    }

    async fn drive(&mut self, engine: &mut HandEngine, cancel: &CancellationToken) -> Result<HandSummary, ControllerError> {
        loop {
            if let Some(summary) = engine.summary() {
                return Ok(summary.clone());
            }

            let token = engine.begin_decision()?;
            let Some(ctx) = DecisionContext::for_seat(&self.table, engine, token.seat()) else {
                engine.abandon_decision(token);
                return Err(EngineError::Internal("нет контекста для активного места").into());
            };

            let status = match self.decide(engine, &token, &ctx, cancel).await {
                Ok(status) => status,
                Err(ControllerError::Cancelled) => {
                    engine.abandon_decision(token);
                    abort_hand(&mut self.table, engine)?;
                    self.publish(engine);
                    return Err(ControllerError::Cancelled);
                }
                Err(e) => {
                    engine.abandon_decision(token);
                    return Err(e);
                }
            };

            self.publish(engine);
            if let HandStatus::Finished(summary, _) = status {
                return Ok(summary);
            }
        }
    }

    /// Получить и применить действие активного места.
    /// Недопустимое действие – переспросить; таймаут или сбой – безопасный ход.
    async fn decide(
        &mut self,
        engine: &mut HandEngine,
        token: &InFlightToken,
        ctx: &DecisionContext,
        cancel: &CancellationToken,
    ) -> Result<HandStatus, ControllerError> {
        let seat = token.seat();
        let rules = self.config.time_rules.clone();
        let mut reprompts = 0;

        let reason = loop {
            let deadline = self.time_bank.deadline_for(ctx.player_id, &rules);
            let source = self
                .sources
                .get_mut(seat as usize)
                .and_then(Option::as_mut)
                .ok_or(ControllerError::MissingActionSource(seat))?;

            let started = Instant::now();
            let outcome = tokio::select! {
                _ = cancel.cancelled() => return Err(ControllerError::Cancelled),
                res = timeout(deadline, source.next_action(ctx)) => res,
            };
            self.time_bank.charge(ctx.player_id, started.elapsed(), &rules);

            match outcome {
                Ok(Ok(kind)) => match apply_with_token(&mut self.table, engine, token, kind) {
                    Ok(status) => return Ok(status),
                    Err(e) if e.is_illegal_action() && reprompts < self.config.max_reprompts => {
                        reprompts += 1;
                        warn!(hand_id = ctx.hand_id, seat, error = %e, reprompts, "недопустимое действие, переспрашиваем");
                    }
                    Err(e) if e.is_illegal_action() => break format!("недопустимое действие: {e}"),
                    Err(e) => return Err(e.into()),
                },
                Ok(Err(e)) => {
                    warn!(hand_id = ctx.hand_id, seat, error = %e, "источник действий не ответил");
                    break e.to_string();
                }
                Err(_) => {
                    warn!(hand_id = ctx.hand_id, seat, ?deadline, "время на ход вышло");
                    break ActionSourceError::Timeout.to_string();
                }
            }
        };

        let action = default_action(ctx);
        engine.history.push(HandEventKind::ForcedAction {
            seat,
            action,
            reason,
        });
        warn!(hand_id = ctx.hand_id, seat, action = action.name(), "подставлен ход по умолчанию");
        Ok(apply_with_token(&mut self.table, engine, token, action)?)
    }

    /// Снимки улиц, открытых последним действием, затем текущее состояние.
    /// Если последняя улица и есть текущее состояние, второй раз не шлём.
    fn publish(&mut self, engine: &mut HandEngine) {
        let streets = engine.take_street_snapshots();
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let current = TableSnapshot::capture(&self.table, engine);
        let duplicate = streets.last() == Some(&current);
        for snapshot in streets {
            sink.publish(snapshot);
        }
        if !duplicate {
            sink.publish(current);
        }
    }
}
