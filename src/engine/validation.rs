use crate::domain::{Chips, HandState, SeatState};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::IllegalAction;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Возвращает нормализованное действие: `AllIn` превращается в `Call` или `Raise(весь стек)`.
/// Ничего не меняет.
pub fn validate_action(
    seat: &SeatState,
    action: &PlayerActionKind,
    hand: &HandState,
) -> Result<PlayerActionKind, IllegalAction> {
    if !seat.can_act() {
        return Err(IllegalAction::SeatNotLive(seat.seat));
    }

    let to_call = diff_to_call(seat, hand);
    let max_total = seat.stack + seat.current_bet;

    match *action {
        PlayerActionKind::Fold => Ok(PlayerActionKind::Fold),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(PlayerActionKind::Check)
            } else {
                Err(IllegalAction::CannotCheck { to_call })
            }
        }

        // Короткий call (стек меньше to_call) – это олл-ин, не ошибка.
        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(IllegalAction::CannotCall)
            } else {
                Ok(PlayerActionKind::Call)
            }
        }

        PlayerActionKind::Raise(total) => {
            if max_total <= hand.current_bet {
                return Err(IllegalAction::NothingToRaise);
            }
            if total > max_total {
                return Err(IllegalAction::RaiseExceedsStack { total, max_total });
            }

            let min_total = min_raise_total(hand);
            // Олл-ин меньше минимального рейза разрешён (неполный рейз).
            let short_all_in = total == max_total && total > hand.current_bet;
            if total < min_total && !short_all_in {
                return Err(IllegalAction::RaiseTooSmall { total, min_total });
            }

            Ok(PlayerActionKind::Raise(total))
        }

        PlayerActionKind::AllIn => {
            if max_total <= hand.current_bet {
                Ok(PlayerActionKind::Call)
            } else {
                Ok(PlayerActionKind::Raise(max_total))
            }
        }
    }
}

/// Минимальная итоговая ставка для рейза на текущей улице.
pub fn min_raise_total(hand: &HandState) -> Chips {
    hand.current_bet + hand.min_raise
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(seat: &SeatState, hand: &HandState) -> Chips {
    hand.current_bet.saturating_sub(seat.current_bet)
}

/// Все допустимые сейчас виды действий (для UI и сервиса решений).
pub fn legal_actions(seat: &SeatState, hand: &HandState) -> Vec<PlayerActionKind> {
    if !seat.can_act() {
        return Vec::new();
    }

    let mut res = vec![PlayerActionKind::Fold];
    if diff_to_call(seat, hand).is_zero() {
        res.push(PlayerActionKind::Check);
    } else {
        res.push(PlayerActionKind::Call);
    }

    let max_total = seat.stack + seat.current_bet;
    if max_total > hand.current_bet {
        let min_total = min_raise_total(hand).min(max_total);
        res.push(PlayerActionKind::Raise(min_total));
    }
    res.push(PlayerActionKind::AllIn);
    res
}
