use crate::cards::{Card, Suit};
use rand::Rng;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A set of cards stored as a 52-bit mask, bit `i` being the card with index `i`.
///
/// ```
/// use poker_equity::cards::{Card, Rank, Suit};
/// use poker_equity::deck::CardMask;
///
/// let ah = Card::new(Rank::Ace, Suit::Hearts);
/// let mask = CardMask::EMPTY.with(ah);
/// assert!(mask.contains(ah));
/// assert_eq!(mask.len(), 1);
/// assert_eq!(mask.complement().len(), 51);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardMask(u64);

impl CardMask {
    pub const EMPTY: CardMask = CardMask(0);
    pub const FULL: CardMask = CardMask((1u64 << Card::COUNT) - 1);

    /// Mask from raw bits; bits above 51 are dropped.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & Self::FULL.0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn of(card: Card) -> Self {
        Self(1u64 << card.index())
    }

    /// Returns a new mask with `card` added.
    #[inline]
    pub const fn with(self, card: Card) -> Self {
        Self(self.0 | (1u64 << card.index()))
    }

    #[inline]
    pub const fn contains(self, card: Card) -> bool {
        self.0 & (1u64 << card.index()) != 0
    }

    #[inline]
    pub const fn intersects(self, other: CardMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn union(self, other: CardMask) -> Self {
        Self(self.0 | other.0)
    }

    /// Cards of the deck not in this mask.
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::FULL.0)
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 13-bit rank mask of the cards of one suit (bit 0 = Two, bit 12 = Ace).
    #[inline]
    pub const fn suit_ranks(self, suit: Suit) -> u16 {
        ((self.0 >> (13 * suit as u32)) & 0x1fff) as u16
    }

    /// Cards in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Card::from_index(index)
        })
    }
}

impl BitOr for CardMask {
    type Output = CardMask;
    fn bitor(self, rhs: CardMask) -> CardMask {
        self.union(rhs)
    }
}

impl BitOrAssign for CardMask {
    fn bitor_assign(&mut self, rhs: CardMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CardMask {
    type Output = CardMask;
    fn bitand(self, rhs: CardMask) -> CardMask {
        CardMask(self.0 & rhs.0)
    }
}

impl Not for CardMask {
    type Output = CardMask;
    fn not(self) -> CardMask {
        self.complement()
    }
}

impl From<Card> for CardMask {
    fn from(card: Card) -> Self {
        CardMask::of(card)
    }
}

impl FromIterator<Card> for CardMask {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        iter.into_iter().fold(CardMask::EMPTY, CardMask::with)
    }
}

impl fmt::Display for CardMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.iter() {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

/// The cards still available to deal, in ascending index order.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use poker_equity::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        Self::excluding(CardMask::EMPTY)
    }

    /// Every card not in `used`.
    pub fn excluding(used: CardMask) -> Self {
        Self { cards: used.complement().iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Pick a uniformly random card that is not in `used`.
    ///
    /// Returns `None` when every card of the deck is in `used`.
    pub fn pick_excluding<R: Rng + ?Sized>(&self, rng: &mut R, used: CardMask) -> Option<Card> {
        let available = self.cards.iter().filter(|c| !used.contains(**c)).count();
        if available == 0 {
            return None;
        }
        // Rejection is cheap while most of the deck is free.
        if available * 2 >= self.cards.len() {
            loop {
                let card = self.cards[rng.random_range(0..self.cards.len())];
                if !used.contains(card) {
                    return Some(card);
                }
            }
        }
        let nth = rng.random_range(0..available);
        self.cards.iter().copied().filter(|c| !used.contains(*c)).nth(nth)
    }
}
