use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// 13 бит (от 2 до A): бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маска колеса A-2-3-4-5.
pub const WHEEL_MASK: RankMask = mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);

/// Пять подряд идущих рангов, начиная с двойки.
const FIVE_IN_A_ROW: RankMask = 0b1_1111;

/// Получить битовую маску для одного ранга.
pub const fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank as u8 - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= rank_to_bit(ranks[i]);
        i += 1;
    }
    mask
}

/// Найти стрит в маске рангов. Возвращает старшую карту стрита.
///
/// Особый случай: колесо (A2345) → Rank::Five.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    // От бродвея (T-A, сдвиг 8) вниз до 2-6 (сдвиг 0).
    for shift in (0..=8u8).rev() {
        let window = FIVE_IN_A_ROW << shift;
        if rank_mask & window == window {
            return Rank::from_value(shift + 6);
        }
    }
    if rank_mask & WHEEL_MASK == WHEEL_MASK {
        return Some(Rank::Five);
    }
    None
}
