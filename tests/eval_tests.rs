//! Тесты оценки рук.
//!
//! - порядок категорий;
//! - колесо (A-2-3-4-5) сильнее любой не-стритовой руки и слабее стрита от шестёрки;
//! - кикеры и сплиты;
//! - ошибки на некорректном наборе карт.

use holdem_table_engine::domain::card::cards_from_str;
use holdem_table_engine::domain::hand::HandRank;
use holdem_table_engine::eval::{describe_hand, evaluate_best_hand, evaluate_cards, EvalError, HandCategory};

fn rank_of(cards: &str) -> HandRank {
    let cards = cards_from_str(cards).expect("валидные карты");
    evaluate_cards(&cards).expect("оценка должна пройти")
}

fn best(hole: &str, board: &str) -> HandRank {
    let hole = cards_from_str(hole).expect("валидные карты");
    let board = cards_from_str(board).expect("валидные карты");
    evaluate_best_hand(&hole, &board).expect("оценка должна пройти")
}

#[test]
fn categories_are_detected() {
    let cases = [
        ("As Kd 9h 7c 3s", HandCategory::HighCard),
        ("As Ad 9h 7c 3s", HandCategory::OnePair),
        ("As Ad 9h 9c 3s", HandCategory::TwoPair),
        ("As Ad Ah 7c 3s", HandCategory::ThreeOfAKind),
        ("9s Td Jh Qc Ks", HandCategory::Straight),
        ("2h 7h 9h Jh Kh", HandCategory::Flush),
        ("As Ad Ah 7c 7s", HandCategory::FullHouse),
        ("As Ad Ah Ac 3s", HandCategory::FourOfAKind),
        ("9h Th Jh Qh Kh", HandCategory::StraightFlush),
    ];
    for (cards, expected) in cases {
        assert_eq!(rank_of(cards).category(), expected, "{cards}");
    }
}

#[test]
fn category_order_is_total() {
    let ranks: Vec<HandRank> = [
        "As Kd 9h 7c 3s",
        "As Ad 9h 7c 3s",
        "As Ad 9h 9c 3s",
        "As Ad Ah 7c 3s",
        "9s Td Jh Qc Ks",
        "2h 7h 9h Jh Kh",
        "As Ad Ah 7c 7s",
        "As Ad Ah Ac 3s",
        "9h Th Jh Qh Kh",
    ]
    .iter()
    .map(|c| rank_of(c))
    .collect();

    for i in 0..ranks.len() {
        for j in 0..ranks.len() {
            assert_eq!(ranks[i].cmp(&ranks[j]), i.cmp(&j), "категории {i} и {j}");
        }
    }
}

#[test]
fn wheel_is_lowest_straight() {
    let wheel = rank_of("As 2d 3h 4c 5s");
    let six_high = rank_of("2d 3h 4c 5s 6h");
    let ace_high = rank_of("As Kd Qh Jc 9s");
    let trips = rank_of("Ks Kd Kh 4c 2s");

    assert_eq!(wheel.category(), HandCategory::Straight);
    assert!(wheel > ace_high);
    assert!(wheel > trips);
    assert!(wheel < six_high);
    assert_eq!(describe_hand(wheel), "Straight, 5-high");

    let steel_wheel = rank_of("Ah 2h 3h 4h 5h");
    assert_eq!(steel_wheel.category(), HandCategory::StraightFlush);
    assert!(steel_wheel < rank_of("2h 3h 4h 5h 6h"));
}

#[test]
fn kickers_decide_within_category() {
    let board = "Ks 9d 7h 4c 2s";
    let ace_kicker = best("Kd Ah", board);
    let queen_kicker = best("Kh Qc", board);
    assert!(ace_kicker > queen_kicker);

    let pair_nines_high_kicker = rank_of("9s 9d Ah 7c 3s");
    let pair_nines_low_kicker = rank_of("9s 9d Kh 7c 3s");
    assert!(pair_nines_high_kicker > pair_nines_low_kicker);
}

#[test]
fn best_five_of_seven_and_board_plays() {
    // Оба играют борд – ровно одинаковый ранг.
    let board = "As Ks Qs Js Ts";
    assert_eq!(best("2c 3d", board), best("4h 5h", board));

    // Из 7 карт выбирается флеш, а не стрит.
    let r = best("2h 9h", "Th Jh Qc Kd 5h");
    assert_eq!(r.category(), HandCategory::Flush);
}

#[test]
fn evaluation_is_order_independent() {
    assert_eq!(rank_of("As Ad 9h 9c 3s"), rank_of("3s 9c As 9h Ad"));
}

#[test]
fn invalid_inputs_are_rejected() {
    let four = cards_from_str("As Kd 9h 7c").expect("карты");
    assert_eq!(evaluate_cards(&four), Err(EvalError::TooFewCards(4)));

    let eight = cards_from_str("As Kd 9h 7c 3s 2d 4h 5c").expect("карты");
    assert_eq!(evaluate_cards(&eight), Err(EvalError::TooManyCards(8)));

    let dup = cards_from_str("As As 9h 7c 3s").expect("карты");
    assert!(matches!(evaluate_cards(&dup), Err(EvalError::DuplicateCard(_))));
}
