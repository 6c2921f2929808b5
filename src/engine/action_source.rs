//! Источники действий: откуда контроллер берёт решение для места.
//!
//! Один интерфейс `ActionSource` на всё: человек через UI, локальный бот,
//! сценарий из теста, внешний сервис решений. Контроллеру всё равно, кто отвечает.

use std::collections::VecDeque;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::chips::Chips;
use crate::engine::actions::PlayerActionKind;
use crate::engine::view::DecisionContext;

/// Почему источник не дал действие. Контроллер в этом случае подставляет безопасный ход.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionSourceError {
    #[error("источник не ответил вовремя")]
    Timeout,

    #[error("источник недоступен: {0}")]
    Unavailable(String),

    #[error("некорректный ответ источника: {0}")]
    Malformed(String),
}

/// Кто принимает решения за место.
#[async_trait]
pub trait ActionSource: Send {
    /// Вызывается, когда ход за этим местом. Может ждать сколько угодно:
    /// ограничение по времени накладывает контроллер.
    async fn next_action(&mut self, ctx: &DecisionContext) -> Result<PlayerActionKind, ActionSourceError>;

    /// Короткое имя для логов.
    fn describe(&self) -> &str;

    /// Политика для неизвестных действий. Контроллер задаёт её из своего конфига,
    /// когда назначает источник месту. Источникам без разбора ответов она не нужна.
    fn set_unknown_action_policy(&mut self, _policy: UnknownActionPolicy) {}
}

/// Безопасный ход по умолчанию: check, если ничего не должен, иначе fold.
pub fn default_action(ctx: &DecisionContext) -> PlayerActionKind {
    if ctx.owes_chips() {
        PlayerActionKind::Fold
    } else {
        PlayerActionKind::Check
    }
}

/// Заранее заданная очередь действий.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    name: String,
    queue: VecDeque<PlayerActionKind>,
}

impl ScriptedSource {
    pub fn new<I>(name: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = PlayerActionKind>,
    {
        Self {
            name: name.into(),
            queue: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[async_trait]
impl ActionSource for ScriptedSource {
    async fn next_action(&mut self, _ctx: &DecisionContext) -> Result<PlayerActionKind, ActionSourceError> {
        self.queue
            .pop_front()
            .ok_or_else(|| ActionSourceError::Unavailable("сценарий исчерпан".into()))
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

/// Действия человека из UI через канал tokio.
#[derive(Debug)]
pub struct ChannelSource {
    name: String,
    rx: mpsc::Receiver<PlayerActionKind>,
}

impl ChannelSource {
    pub fn new(name: impl Into<String>, rx: mpsc::Receiver<PlayerActionKind>) -> Self {
        Self { name: name.into(), rx }
    }

    /// Источник и отправитель для UI.
    pub fn channel(name: impl Into<String>, buffer: usize) -> (Self, mpsc::Sender<PlayerActionKind>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self::new(name, rx), tx)
    }
}

#[async_trait]
impl ActionSource for ChannelSource {
    async fn next_action(&mut self, _ctx: &DecisionContext) -> Result<PlayerActionKind, ActionSourceError> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| ActionSourceError::Unavailable("канал UI закрыт".into()))
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

/// Простейший бот: check, когда можно, иначе call.
#[derive(Clone, Debug)]
pub struct PassiveBot {
    name: String,
}

impl PassiveBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ActionSource for PassiveBot {
    async fn next_action(&mut self, ctx: &DecisionContext) -> Result<PlayerActionKind, ActionSourceError> {
        Ok(if ctx.owes_chips() {
            PlayerActionKind::Call
        } else {
            PlayerActionKind::Check
        })
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

/// Что делать с неизвестной строкой действия в ответе сервиса решений.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownActionPolicy {
    /// Считать это call'ом (check, если ничего не должен).
    #[default]
    DefaultToCall,
    /// Считать ответ некорректным.
    Reject,
}

/// Ответ сервиса решений: `{"action": "fold|check|call|raise|all-in", "amount": 0}`.
/// Для raise `amount` – итоговая ставка на улице.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotDecision {
    pub action: String,
    #[serde(default)]
    pub amount: u64,
}

pub fn parse_decision(raw: &str) -> Result<BotDecision, ActionSourceError> {
    serde_json::from_str(raw).map_err(|e| ActionSourceError::Malformed(e.to_string()))
}

/// Перевод ответа сервиса в действие движка.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecisionMapping {
    pub unknown_action: UnknownActionPolicy,
}

impl DecisionMapping {
    pub fn new(unknown_action: UnknownActionPolicy) -> Self {
        Self { unknown_action }
    }

    /// Законность действия здесь не проверяется: это делает движок.
    pub fn map(&self, decision: &BotDecision, ctx: &DecisionContext) -> Result<PlayerActionKind, ActionSourceError> {
        let action = decision.action.trim().to_ascii_lowercase();
        match action.as_str() {
            "fold" => Ok(PlayerActionKind::Fold),
            "check" => Ok(PlayerActionKind::Check),
            "call" => Ok(PlayerActionKind::Call),
            "raise" | "bet" => Ok(PlayerActionKind::Raise(Chips(decision.amount))),
            "all-in" | "allin" | "all_in" => Ok(PlayerActionKind::AllIn),
            other => match self.unknown_action {
                UnknownActionPolicy::DefaultToCall => {
                    warn!(seat = ctx.seat, action = other, "неизвестное действие, считаем call");
                    Ok(if ctx.owes_chips() {
                        PlayerActionKind::Call
                    } else {
                        PlayerActionKind::Check
                    })
                }
                UnknownActionPolicy::Reject => {
                    Err(ActionSourceError::Malformed(format!("неизвестное действие: {other}")))
                }
            },
        }
    }
}

/// Клиент внешнего сервиса решений. Возвращает сырой JSON-ответ.
#[async_trait]
pub trait DecisionClient: Send + Sync {
    async fn request(&self, ctx: &DecisionContext) -> Result<String, ActionSourceError>;
}

/// Место, за которое решает внешний сервис.
pub struct RemoteDecisionSource<C: DecisionClient> {
    name: String,
    client: C,
    mapping: DecisionMapping,
}

impl<C: DecisionClient> RemoteDecisionSource<C> {
    /// Политика неизвестных действий – `DefaultToCall`, пока контроллер не задаст свою.
    pub fn new(name: impl Into<String>, client: C) -> Self {
        Self {
            name: name.into(),
            client,
            mapping: DecisionMapping::default(),
        }
    }

    pub fn unknown_action_policy(&self) -> UnknownActionPolicy {
        self.mapping.unknown_action
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: DecisionClient> ActionSource for RemoteDecisionSource<C> {
    async fn next_action(&mut self, ctx: &DecisionContext) -> Result<PlayerActionKind, ActionSourceError> {
        let raw = self.client.request(ctx).await?;
        let decision = parse_decision(&raw)?;
        self.mapping.map(&decision, ctx)
    }

    fn describe(&self) -> &str {
        &self.name
    }

    fn set_unknown_action_policy(&mut self, policy: UnknownActionPolicy) {
        self.mapping.unknown_action = policy;
    }
}
