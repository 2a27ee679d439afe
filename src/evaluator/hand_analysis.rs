use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use crate::cards::Rank;
use crate::evaluator::Category;

/// Up to five ranks that break ties inside a category, most significant first.
pub type Tiebreak = Vec<Rank>;

/// Pre-computed analysis of a rank pattern.
/// Built once per table entry and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub rank_groups: RankGroups,
    pub straight_info: StraightInfo,
    /// All cards of the pattern share one suit (flush table entries).
    pub suited: bool,
}

impl HandAnalysis {
    /// Analyze a non-flush pattern from its per-rank counts.
    pub fn from_counts(counts: [u8; 13]) -> Self {
        let rank_groups = RankGroups::from_counts(counts);
        let straight_info = StraightInfo::detect(rank_groups.rank_mask());
        Self { rank_groups, straight_info, suited: false }
    }

    /// Analyze the cards of a single suit given as a 13-bit rank mask.
    pub fn suited(rank_mask: u16) -> Self {
        let mut counts = [0u8; 13];
        for (i, count) in counts.iter_mut().enumerate() {
            *count = ((rank_mask >> i) & 1) as u8;
        }
        Self { suited: true, ..Self::from_counts(counts) }
    }

    /// True when the suited pattern holds enough cards for a flush.
    pub fn is_flush(&self) -> bool {
        self.suited && self.rank_groups.cards() >= 5
    }

    /// Classify the pattern, returning its category and tiebreak ranks.
    pub fn classify(&self) -> (Category, Tiebreak) {
        use super::detector::DETECTORS;

        // Check categories in priority order (highest to lowest)
        for detector in DETECTORS.iter() {
            if detector.detect(self) {
                return (detector.category(), detector.tiebreak(self));
            }
        }

        // Unreachable: HighCard detector always matches as fallback
        unreachable!("HighCard detector should always match")
    }
}

/// Pack tiebreak ranks four bits each, absent ranks as zero, so that the
/// natural integer order is the poker order within one category.
pub fn pack_tiebreak(tiebreak: &[Rank]) -> u32 {
    debug_assert!(tiebreak.len() <= 5);
    (0..5).fold(0u32, |acc, i| (acc << 4) | tiebreak.get(i).map_or(0, |r| r.value() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(ranks: &[Rank]) -> [u8; 13] {
        let mut counts = [0u8; 13];
        for r in ranks {
            counts[r.index()] += 1;
        }
        counts
    }

    #[test]
    fn test_quads_analysis() {
        let a = HandAnalysis::from_counts(counts(&[
            Rank::Ace,
            Rank::Ace,
            Rank::Ace,
            Rank::Ace,
            Rank::King,
            Rank::Two,
        ]));
        assert_eq!(a.classify(), (Category::FourOfAKind, vec![Rank::Ace, Rank::King]));
    }

    #[test]
    fn test_full_house_beats_straight() {
        let a = HandAnalysis::from_counts(counts(&[
            Rank::Five,
            Rank::Five,
            Rank::Five,
            Rank::Six,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
        ]));
        assert_eq!(a.classify(), (Category::FullHouse, vec![Rank::Five, Rank::Six]));
    }

    #[test]
    fn test_straight_flush_analysis() {
        let mask = [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Nine]
            .iter()
            .fold(0u16, |m, r| m | (1 << r.index()));
        let a = HandAnalysis::suited(mask);
        assert!(a.is_flush());
        assert_eq!(a.classify(), (Category::StraightFlush, vec![Rank::Five]));
    }

    #[test]
    fn test_two_pair_with_third_pair_kicker() {
        let a = HandAnalysis::from_counts(counts(&[
            Rank::King,
            Rank::King,
            Rank::Nine,
            Rank::Nine,
            Rank::Queen,
            Rank::Queen,
            Rank::Two,
        ]));
        assert_eq!(a.classify(), (Category::TwoPair, vec![Rank::King, Rank::Queen, Rank::Nine]));
    }

    #[test]
    fn test_partial_hands() {
        let pair = HandAnalysis::from_counts(counts(&[Rank::Ace, Rank::Ace]));
        assert_eq!(pair.classify(), (Category::Pair, vec![Rank::Ace]));

        let single = HandAnalysis::from_counts(counts(&[Rank::Seven]));
        assert_eq!(single.classify(), (Category::HighCard, vec![Rank::Seven]));

        let empty = HandAnalysis::from_counts([0; 13]);
        assert_eq!(empty.classify(), (Category::HighCard, vec![]));
    }

    #[test]
    fn test_pack_orders_kickers() {
        let hi = pack_tiebreak(&[Rank::Ace, Rank::King]);
        let lo = pack_tiebreak(&[Rank::Ace, Rank::Queen, Rank::Jack]);
        let short = pack_tiebreak(&[Rank::Ace]);
        assert!(hi > lo);
        assert!(lo > short);
    }
}
