use crate::cards::Rank;

const WHEEL: u16 = 0b1_0000_0000_1111;

/// Whether a set of ranks contains a straight and its top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Detect the best straight in a 13-bit rank mask (bit 0 = Two).
    /// Handles both regular straights and the wheel (A-2-3-4-5).
    pub fn detect(rank_mask: u16) -> Self {
        // Highest five-bit window first so the best straight wins.
        for low in (0..=8).rev() {
            let window = 0b1_1111 << low;
            if rank_mask & window == window {
                return StraightInfo { is_straight: true, top_rank: Rank::from_index(low + 4) };
            }
        }

        if rank_mask & WHEEL == WHEEL {
            return StraightInfo { is_straight: true, top_rank: Some(Rank::Five) };
        }

        StraightInfo { is_straight: false, top_rank: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(ranks: &[Rank]) -> u16 {
        ranks.iter().fold(0, |m, r| m | (1 << r.index()))
    }

    #[test]
    fn test_regular_straight() {
        let info =
            StraightInfo::detect(mask(&[Rank::King, Rank::Queen, Rank::Jack, Rank::Ten, Rank::Nine]));
        assert!(info.is_straight);
        assert_eq!(info.top_rank, Some(Rank::King));
    }

    #[test]
    fn test_ace_high_straight() {
        let info =
            StraightInfo::detect(mask(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten]));
        assert_eq!(info.top_rank, Some(Rank::Ace));
    }

    #[test]
    fn test_wheel() {
        let info =
            StraightInfo::detect(mask(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]));
        assert!(info.is_straight);
        assert_eq!(info.top_rank, Some(Rank::Five));
    }

    #[test]
    fn test_longer_run_picks_highest() {
        let info = StraightInfo::detect(mask(&[
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
        ]));
        assert_eq!(info.top_rank, Some(Rank::Seven));
    }

    #[test]
    fn test_not_straight() {
        let info =
            StraightInfo::detect(mask(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]));
        assert!(!info.is_straight);
        assert_eq!(info.top_rank, None);
        assert!(!StraightInfo::detect(0).is_straight);
    }
}
