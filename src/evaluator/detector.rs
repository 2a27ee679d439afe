use super::hand_analysis::{HandAnalysis, Tiebreak};
use crate::evaluator::Category;

/// Strategy pattern: each category detector knows how to detect its category
/// and which ranks break ties inside it.
pub trait CategoryDetector: Sync {
    fn category(&self) -> Category;
    fn detect(&self, analysis: &HandAnalysis) -> bool;
    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Straight Flush: Five consecutive ranks, all same suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.is_flush() && analysis.straight_info.is_straight
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        analysis.straight_info.top_rank.into_iter().collect()
    }
}

/// Four of a Kind: Four cards of the same rank
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.quad().is_some()
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        let groups = &analysis.rank_groups;
        let quad = groups.quad().into_iter().collect::<Vec<_>>();
        let kicker = groups.kickers(&quad, 1);
        quad.into_iter().chain(kicker).collect()
    }
}

/// Full House: Three of a kind plus a pair (or a second three of a kind)
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        let groups = &analysis.rank_groups;
        groups.trips().is_some_and(|t| groups.full_house_pair(t).is_some())
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        let groups = &analysis.rank_groups;
        groups
            .trips()
            .into_iter()
            .flat_map(|t| std::iter::once(t).chain(groups.full_house_pair(t)))
            .collect()
    }
}

/// Flush: Five cards of the same suit, best five ranks count
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.is_flush()
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        analysis.rank_groups.kickers(&[], 5)
    }
}

/// Straight: Five consecutive ranks (not all same suit)
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_info.is_straight
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        analysis.straight_info.top_rank.into_iter().collect()
    }
}

/// Three of a Kind: Three cards of the same rank
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.trips().is_some()
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        let groups = &analysis.rank_groups;
        let trips = groups.trips().into_iter().collect::<Vec<_>>();
        let kickers = groups.kickers(&trips, 2);
        trips.into_iter().chain(kickers).collect()
    }
}

/// Two Pair: Two pairs of cards
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.pairs().len() >= 2
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        let groups = &analysis.rank_groups;
        let mut pairs = groups.pairs();
        pairs.truncate(2);
        let kicker = groups.kickers(&pairs, 1);
        pairs.into_iter().chain(kicker).collect()
    }
}

/// One Pair: Two cards of the same rank
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.pairs().len() == 1
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        let groups = &analysis.rank_groups;
        let pair = groups.pairs();
        let kickers = groups.kickers(&pair, 3);
        pair.into_iter().chain(kickers).collect()
    }
}

/// High Card: No matching ranks or sequences
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn detect(&self, _analysis: &HandAnalysis) -> bool {
        true // Always matches as fallback
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Tiebreak {
        analysis.rank_groups.kickers(&[], 5)
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub static DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
