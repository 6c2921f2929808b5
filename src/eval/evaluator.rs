use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::errors::EvalError;
use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Оценить лучшую руку из карманных карт и борда (вместе 5–7 карт).
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandRank, EvalError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_cards(&all_cards)
}

/// Главная функция: сила лучшей 5-карточной комбинации из 5–7 карт.
///
/// Значение равно максимуму по всем 5-карточным подмножествам входа.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandRank, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::TooFewCards(cards.len()));
    }
    if cards.len() > 7 {
        return Err(EvalError::TooManyCards(cards.len()));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[i + 1..].contains(card) {
            return Err(EvalError::DuplicateCard(*card));
        }
    }

    Ok(best_of_all_5card_combinations(cards))
}

/// Перебираем все комбинации 5 карт из N (N=5–7, максимум 21) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank(0);

    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.max(evaluate_5card_hand(&five));
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let first_suit = cards[0].suit;
    let is_flush = cards.iter().all(|c| c.suit == first_suit);

    let mut rank_counts = [0u8; 15];
    let mut rank_mask: RankMask = 0;
    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let straight_high = detect_straight(rank_mask);
    if let Some(high) = straight_high {
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return HandRank::straight(category, high);
    }

    // Группы (количество, ранг), сначала по количеству, затем по рангу – по убыванию.
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .rev()
        .filter(|r| rank_counts[r.value() as usize] > 0)
        .map(|r| (rank_counts[r.value() as usize], *r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let pattern: Vec<u8> = groups.iter().map(|(count, _)| *count).collect();
    let ranks: Vec<Rank> = groups.iter().map(|(_, rank)| *rank).collect();

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandRank::from_category_and_ranks(category, &ranks)
}
