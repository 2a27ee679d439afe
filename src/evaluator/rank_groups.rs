use crate::cards::Rank;

/// Per-rank card counts of a hand pattern, queried highest rank first.
///
/// Example: AAAKKQQ has trips [Ace], pairs [King, Queen].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    counts: [u8; 13],
}

impl RankGroups {
    /// Create RankGroups from a count array indexed by [`Rank::index`].
    pub fn from_counts(counts: [u8; 13]) -> Self {
        Self { counts }
    }

    pub fn count(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    /// Total number of cards in the pattern.
    pub fn cards(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Ranks present at least `n` times, in descending order.
    pub fn at_least(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        Rank::ALL.iter().rev().copied().filter(move |&r| self.count(r) >= n)
    }

    /// Returns the rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.at_least(4).next()
    }

    /// Returns the highest rank held three or more times.
    pub fn trips(&self) -> Option<Rank> {
        self.at_least(3).next()
    }

    /// Returns all ranks held exactly twice, in descending order.
    pub fn pairs(&self) -> Vec<Rank> {
        Rank::ALL.iter().rev().copied().filter(|&r| self.count(r) == 2).collect()
    }

    /// The best pair to go with `trips` in a full house: a second trips or a pair.
    pub fn full_house_pair(&self, trips: Rank) -> Option<Rank> {
        self.at_least(2).find(|&r| r != trips)
    }

    /// Up to `n` highest present ranks not in `exclude`, in descending order.
    pub fn kickers(&self, exclude: &[Rank], n: usize) -> Vec<Rank> {
        self.at_least(1).filter(|r| !exclude.contains(r)).take(n).collect()
    }

    /// 13-bit mask of the ranks present.
    pub fn rank_mask(&self) -> u16 {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .fold(0u16, |m, (i, _)| m | (1 << i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_counts(pairs: &[(Rank, u8)]) -> [u8; 13] {
        let mut counts = [0u8; 13];
        for &(rank, count) in pairs {
            counts[rank.index()] = count;
        }
        counts
    }

    #[test]
    fn test_quad() {
        let groups = RankGroups::from_counts(make_counts(&[(Rank::Ace, 4), (Rank::King, 1)]));
        assert_eq!(groups.quad(), Some(Rank::Ace));
        assert_eq!(groups.kickers(&[Rank::Ace], 1), vec![Rank::King]);
        assert_eq!(groups.cards(), 5);
    }

    #[test]
    fn test_two_trips_make_a_full_house() {
        let groups = RankGroups::from_counts(make_counts(&[
            (Rank::Nine, 3),
            (Rank::King, 3),
            (Rank::Two, 1),
        ]));
        assert_eq!(groups.trips(), Some(Rank::King));
        assert_eq!(groups.full_house_pair(Rank::King), Some(Rank::Nine));
    }

    #[test]
    fn test_three_pairs() {
        let groups = RankGroups::from_counts(make_counts(&[
            (Rank::Jack, 2),
            (Rank::Four, 2),
            (Rank::Queen, 2),
            (Rank::Ace, 1),
        ]));
        assert_eq!(groups.pairs(), vec![Rank::Queen, Rank::Jack, Rank::Four]);
        assert_eq!(groups.trips(), None);
        assert_eq!(groups.kickers(&[Rank::Queen, Rank::Jack], 1), vec![Rank::Ace]);
    }

    #[test]
    fn test_kickers_are_capped() {
        let groups = RankGroups::from_counts(make_counts(&[
            (Rank::Two, 1),
            (Rank::Five, 1),
            (Rank::Nine, 1),
        ]));
        assert_eq!(groups.kickers(&[], 5), vec![Rank::Nine, Rank::Five, Rank::Two]);
        assert_eq!(groups.rank_mask(), 0b1_0000_1001);
    }
}
