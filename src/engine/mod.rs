//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун, асинхронный контроллер.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `advance_if_needed` – авто-переход улиц/завершение раздачи
//!   - `HandController::play_hand` – сыграть раздачу с источниками действий

pub mod action_source;
pub mod actions;
pub mod betting;
pub mod controller;
pub mod errors;
pub mod game_loop;
pub mod gate;
pub mod hand_history;
pub mod positions;
pub mod side_pots;
pub mod validation;
pub mod view;

pub use action_source::{
    default_action, ActionSource, ActionSourceError, BotDecision, ChannelSource, DecisionClient,
    DecisionMapping, PassiveBot, RemoteDecisionSource, ScriptedSource, UnknownActionPolicy,
};
pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::{is_round_complete, round_state, RoundState};
pub use controller::{ControllerConfig, ControllerError, HandController};
pub use errors::{EngineError, IllegalAction};
pub use game_loop::{
    abort_hand, advance_if_needed, apply_action, apply_with_token, start_hand, HandEngine, HandStatus,
};
pub use gate::{ActionGate, DecisionPoint, InFlightToken};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use positions::PositionName;
pub use side_pots::{compute_side_pots, Contribution, SidePot};
pub use view::{ChannelSink, DecisionContext, SeatView, SnapshotSink, TableSnapshot};

/// Источник случайности для тасовки колоды.
/// Реализации – в `infra::rng`.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
