use crate::cards::Suit;

/// Packed per-suit card counters, one nibble per suit.
///
/// Each nibble starts at 3 so that it reaches 8 (bit 3 set) exactly when the
/// suit holds five cards; at most seven cards keep every nibble below 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuitCounts(u16);

impl SuitCounts {
    pub const EMPTY: SuitCounts = SuitCounts(0x3333);
    const FLUSH_BITS: u16 = 0x8888;

    #[inline]
    pub const fn add(self, suit: Suit) -> Self {
        Self(self.0 + (1 << (4 * suit as u16)))
    }

    pub const fn count(self, suit: Suit) -> u8 {
        (((self.0 >> (4 * suit as u16)) & 0xf) - 3) as u8
    }

    /// The suit holding five or more cards, if any.
    #[inline]
    pub const fn flush_suit(self) -> Option<Suit> {
        let bits = self.0 & Self::FLUSH_BITS;
        if bits == 0 {
            None
        } else {
            Some(Suit::ALL[(bits.trailing_zeros() / 4) as usize])
        }
    }
}

impl Default for SuitCounts {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush() {
        let counts = (0..5).fold(SuitCounts::EMPTY, |c, _| c.add(Suit::Spades));
        assert_eq!(counts.flush_suit(), Some(Suit::Spades));
        assert_eq!(counts.count(Suit::Spades), 5);
    }

    #[test]
    fn test_not_flush() {
        let counts = [Suit::Spades, Suit::Spades, Suit::Hearts, Suit::Spades, Suit::Spades]
            .into_iter()
            .fold(SuitCounts::EMPTY, SuitCounts::add);
        assert_eq!(counts.flush_suit(), None);
        assert_eq!(counts.count(Suit::Hearts), 1);
        assert_eq!(counts.count(Suit::Clubs), 0);
    }

    #[test]
    fn test_seven_clubs() {
        let counts = (0..7).fold(SuitCounts::EMPTY, |c, _| c.add(Suit::Clubs));
        assert_eq!(counts.flush_suit(), Some(Suit::Clubs));
        assert_eq!(counts.count(Suit::Clubs), 7);
        assert_eq!(counts.count(Suit::Diamonds), 0);
    }
}
