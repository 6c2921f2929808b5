use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
        }
    }
}

/// Значение кикера "пусто" – меньше любой двойки.
const EMPTY_NIBBLE: u32 = 0;
/// Туз в колесе (A-2-3-4-5) играет как единица.
const LOW_ACE_NIBBLE: u32 = 1;

impl HandRank {
    /// Собрать HandRank из категории и значимых рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Незначимые позиции = 0, поэтому внутри категории сравнение идёт по кикерам.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[Rank]) -> Self {
        let nibbles: Vec<u32> = ranks.iter().map(|r| r.value() as u32).collect();
        Self::from_nibbles(category, &nibbles)
    }

    /// Стрит (или стрит-флеш) по старшей карте. Колесо: старшая = пятёрка, туз внизу.
    pub fn straight(category: HandCategory, high: Rank) -> Self {
        let top = high.value() as u32;
        let mut nibbles = [top, top - 1, top - 2, top - 3, top - 4];
        if high == Rank::Five {
            nibbles[4] = LOW_ACE_NIBBLE;
        }
        Self::from_nibbles(category, &nibbles)
    }

    fn from_nibbles(category: HandCategory, nibbles: &[u32]) -> Self {
        let mut value = (category as u32) & 0x0F;
        for i in 0..5 {
            let n = nibbles.get(i).copied().unwrap_or(EMPTY_NIBBLE) & 0x0F;
            value = (value << 4) | n;
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        let cat_id = ((self.0 >> 20) & 0x0F) as usize;
        HandCategory::ALL
            .get(cat_id)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }

    /// Значимые ранги (от старшего к младшему). Туз колеса возвращается как туз.
    pub fn ranks(&self) -> Vec<Rank> {
        (0..5)
            .rev()
            .map(|i| (self.0 >> (i * 4)) & 0x0F)
            .filter(|&n| n != EMPTY_NIBBLE)
            .filter_map(|n| {
                if n == LOW_ACE_NIBBLE {
                    Some(Rank::Ace)
                } else {
                    Rank::from_value(n as u8)
                }
            })
            .collect()
    }
}

/// Удобная функция – получить категорию из HandRank.
pub fn hand_category(rank: HandRank) -> HandCategory {
    rank.category()
}

/// Человеческое описание руки: "Straight, 5-high" / "One pair: K".
pub fn describe_hand(rank: HandRank) -> String {
    let cat = rank.category();
    let ranks = rank.ranks();
    let Some(top) = ranks.first() else {
        return cat.name().to_string();
    };
    match cat {
        HandCategory::Straight | HandCategory::StraightFlush | HandCategory::HighCard | HandCategory::Flush => {
            format!("{}, {}-high", cat.name(), top)
        }
        HandCategory::TwoPair | HandCategory::FullHouse => match ranks.get(1) {
            Some(second) => format!("{}: {} and {}", cat.name(), top, second),
            None => format!("{}: {}", cat.name(), top),
        },
        _ => format!("{}: {}", cat.name(), top),
    }
}
