//! Машина состояний раунда ставок: применение действий, очередь хода, завершение раунда.

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, HandState, PlayerStatus, SeatIndex, Street};
use crate::engine::actions::PlayerActionKind;
use crate::engine::positions::next_seat_where;

/// Состояние раунда ставок на улице.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundState {
    AwaitingAction(SeatIndex),
    RoundComplete,
}

/// Текущее состояние раунда. Чистая функция от состояния раздачи.
pub fn round_state(hand: &HandState) -> RoundState {
    if is_round_complete(hand) {
        return RoundState::RoundComplete;
    }
    match hand.active {
        Some(seat) => RoundState::AwaitingAction(seat),
        None => RoundState::RoundComplete,
    }
}

/// Проверка, завершён ли раунд ставок.
///
/// Завершён, если каждое несфолдившее место либо в олл-ине, либо уже ходило
/// после последнего рейза и уравняло текущую ставку. Также завершён, если
/// ходить может не больше одного места и оно никому ничего не должно.
pub fn is_round_complete(hand: &HandState) -> bool {
    if hand.in_hand_count() <= 1 {
        return true;
    }

    let settled = hand
        .seats
        .iter()
        .filter(|s| s.is_in_hand())
        .all(|s| s.is_all_in() || (s.has_acted && s.current_bet == hand.current_bet));
    if settled {
        return true;
    }

    let mut actors = hand.seats.iter().filter(|s| s.can_act());
    match (actors.next(), actors.next()) {
        (None, _) => true,
        (Some(only), None) => only.current_bet >= hand.current_bet,
        _ => false,
    }
}

/// Место, которому ещё нужно действовать на этой улице.
fn needs_to_act(hand: &HandState, seat: SeatIndex) -> bool {
    hand.seat(seat)
        .is_some_and(|s| s.can_act() && (!s.has_acted || s.current_bet < hand.current_bet))
}

/// Следующий ход после `from` по порядку мест. None – раунд завершён.
pub fn next_to_act(hand: &HandState, from: SeatIndex) -> Option<SeatIndex> {
    if is_round_complete(hand) {
        return None;
    }
    next_seat_where(hand, from, |s| needs_to_act(hand, s.seat))
}

/// Применить уже проверенное (`validate_action`) и нормализованное действие.
/// Возвращает, сколько фишек место добавило в банк.
pub fn apply_validated(hand: &mut HandState, seat: SeatIndex, action: PlayerActionKind) -> Chips {
    let current_bet = hand.current_bet;
    let min_raise = hand.min_raise;

    let Some(player) = hand.seat_mut(seat) else {
        return Chips::ZERO;
    };
    player.has_acted = true;

    match action {
        PlayerActionKind::Fold => {
            player.status = PlayerStatus::Folded;
            Chips::ZERO
        }
        PlayerActionKind::Check => Chips::ZERO,
        PlayerActionKind::Call => {
            let to_call = current_bet.saturating_sub(player.current_bet);
            player.commit(to_call)
        }
        PlayerActionKind::Raise(total) => {
            let paid = player.commit(total.saturating_sub(player.current_bet));
            let new_bet = player.current_bet;
            if new_bet > current_bet {
                on_raise(hand, seat, new_bet, current_bet, min_raise);
            }
            paid
        }
        PlayerActionKind::AllIn => {
            let stack = player.stack;
            let paid = player.commit(stack);
            let new_bet = player.current_bet;
            if new_bet > current_bet {
                on_raise(hand, seat, new_bet, current_bet, min_raise);
            }
            paid
        }
    }
}

/// Обновить состояние после bet/raise: ставка улицы, минимальный рейз, агрессор,
/// и все остальные живые места должны действовать заново.
fn on_raise(hand: &mut HandState, seat: SeatIndex, new_bet: Chips, prev_bet: Chips, min_raise: Chips) {
    let raise_size = new_bet.saturating_sub(prev_bet);
    // Неполный (олл-ин) рейз не меняет минимальный шаг.
    if raise_size >= min_raise {
        hand.min_raise = raise_size;
    }
    hand.current_bet = new_bet;
    hand.last_aggressor = Some(seat);

    for other in hand.seats.iter_mut().filter(|s| s.seat != seat && s.can_act()) {
        other.has_acted = false;
    }
}

/// Начать новую улицу: ставки сметаются в банк, флаги "ходил" сбрасываются.
pub fn reset_for_street(hand: &mut HandState, street: Street) {
    let swept = sweep_bets(hand);
    hand.pot += swept;
    for seat in hand.seats.iter_mut() {
        seat.has_acted = false;
    }
    hand.current_bet = Chips::ZERO;
    hand.min_raise = hand.big_blind;
    hand.last_aggressor = None;
    hand.street = street;
}

/// Обнулить ставки улицы, вернуть их сумму.
pub fn sweep_bets(hand: &mut HandState) -> Chips {
    let mut total = Chips::ZERO;
    for seat in hand.seats.iter_mut() {
        total += seat.current_bet;
        seat.current_bet = Chips::ZERO;
    }
    total
}
