use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex, SeatState};

/// Сайд-пот: часть банка, за которую борются только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Уровень вклада, до которого собран этот пот.
    pub cap: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Вклад одного места за раздачу.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    pub amount: Chips,
    /// false – место сфолдило: фишки остаются в банке, но претендовать нельзя.
    pub eligible: bool,
}

impl From<&SeatState> for Contribution {
    fn from(s: &SeatState) -> Self {
        Self {
            seat: s.seat,
            amount: s.committed,
            eligible: s.is_in_hand(),
        }
    }
}

/// Посчитать банк и сайд-поты по суммарным вкладам мест.
///
/// Уровни берутся по вкладам претендентов: на уровне L каждый вносит
/// `min(вклад, L) - min(вклад, предыдущий L)`. Претенденты уровня – те, кто внёс не меньше L.
/// Сфолдившие фишки выше последнего уровня уходят в последний пот.
/// Выход: поты "от младших к старшим", без нулевых.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .filter(|c| c.eligible && !c.amount.is_zero())
        .map(|c| c.amount)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev_level = Chips::ZERO;

    for &level in &levels {
        let amount: Chips = contributions
            .iter()
            .map(|c| c.amount.min(level).saturating_sub(c.amount.min(prev_level)))
            .sum();

        let mut eligible_seats: Vec<SeatIndex> = contributions
            .iter()
            .filter(|c| c.eligible && c.amount >= level)
            .map(|c| c.seat)
            .collect();
        eligible_seats.sort_unstable();

        if !amount.is_zero() {
            pots.push(SidePot {
                amount,
                cap: level,
                eligible_seats,
            });
        }
        prev_level = level;
    }

    // Остаток выше последнего уровня (вклады сфолдивших).
    let leftover: Chips = contributions
        .iter()
        .map(|c| c.amount.saturating_sub(prev_level))
        .sum();
    if !leftover.is_zero() {
        match pots.last_mut() {
            Some(last) => last.amount += leftover,
            None => pots.push(SidePot {
                amount: leftover,
                cap: prev_level,
                eligible_seats: Vec::new(),
            }),
        }
    }

    pots
}
