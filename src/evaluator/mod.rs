//! Table driven hand evaluator for hands of up to seven cards.
//!
//! A [`Hand`] carries everything needed to rank it (rank counts as a base-5
//! key, packed suit counters and the card mask), so evaluating is a couple of
//! table reads. Cards can be added one at a time and partial state reused:
//!
//! ```
//! use poker_equity::cards::parse_cards;
//! use poker_equity::evaluator::{Category, Hand};
//!
//! let board = parse_cards("Qc Jd 9h 3s 2c").unwrap();
//! let board = board.iter().fold(Hand::EMPTY, |h, &c| h.add(c));
//! let aces = parse_cards("As Ah").unwrap();
//! let kings = parse_cards("Ks Kh").unwrap();
//!
//! let a = board.add(aces[0]).add(aces[1]).evaluate();
//! let k = board.add(kings[0]).add(kings[1]).evaluate();
//! assert!(a > k);
//! assert_eq!(a.category(), Category::Pair);
//! ```

pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;
pub(crate) mod tables;

use crate::cards::{Card, CardParseError};
use crate::deck::CardMask;
use serde::{Deserialize, Serialize};
use std::fmt;
use suit_info::SuitCounts;

/// Width of one category in the [`HandValue`] space.
pub const CATEGORY_SPAN: u16 = 4096;

/// Most cards a [`Hand`] can hold.
pub const MAX_HAND_CARDS: usize = tables::MAX_CARDS;

/// Compact, comparable hand strength. Higher is better.
///
/// `value / 4096` is the [`Category`]; the remainder orders hands within it.
/// Hands of equal poker strength have equal values whatever their suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandValue(u16);

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn from_raw(raw: u16) -> Self {
        HandValue(raw)
    }

    /// Combine a category with an ordinal inside it.
    pub const fn from_parts(category: Category, ordinal: u16) -> Self {
        HandValue(category as u16 * CATEGORY_SPAN + ordinal)
    }

    pub const fn category(self) -> Category {
        Category::from_value(self.0)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.category())
    }
}

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Category of a raw hand value.
    pub const fn from_value(value: u16) -> Category {
        let index = (value / CATEGORY_SPAN) as usize;
        if index < Self::ALL.len() {
            Self::ALL[index]
        } else {
            Category::StraightFlush
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("a hand holds at most 7 cards, got {0}")]
    TooManyCards(usize),
    #[error(transparent)]
    Card(#[from] CardParseError),
}

/// Incremental evaluation state for up to seven distinct cards.
///
/// `Hand` is a small `Copy` value; [`Hand::add`] returns a new hand and
/// leaves the original untouched, so a board prefix can be shared by many
/// hands without aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand {
    mask: CardMask,
    key: u32,
    suits: SuitCounts,
    len: u8,
}

impl Hand {
    pub const EMPTY: Hand =
        Hand { mask: CardMask::EMPTY, key: 0, suits: SuitCounts::EMPTY, len: 0 };

    /// Returns this hand with `card` added.
    ///
    /// The card must not already be in the hand and the hand must hold fewer
    /// than seven cards; use [`Hand::try_add`] for unchecked input.
    #[inline]
    pub fn add(self, card: Card) -> Hand {
        debug_assert!(!self.mask.contains(card), "{card} added twice");
        debug_assert!((self.len as usize) < tables::MAX_CARDS);
        Hand {
            mask: self.mask.with(card),
            key: self.key + tables::RANK_KEYS[card.rank().index()],
            suits: self.suits.add(card.suit()),
            len: self.len + 1,
        }
    }

    /// Checked version of [`Hand::add`].
    pub fn try_add(self, card: Card) -> Result<Hand, EvalError> {
        if self.mask.contains(card) {
            return Err(EvalError::Card(CardParseError::Duplicate(card)));
        }
        if self.len as usize >= tables::MAX_CARDS {
            return Err(EvalError::TooManyCards(self.len as usize + 1));
        }
        Ok(self.add(card))
    }

    /// Build a hand from distinct cards, at most seven.
    pub fn from_cards(cards: &[Card]) -> Result<Hand, EvalError> {
        if cards.len() > tables::MAX_CARDS {
            return Err(EvalError::TooManyCards(cards.len()));
        }
        cards.iter().try_fold(Hand::EMPTY, |hand, &card| hand.try_add(card))
    }

    /// Build a hand from a mask of at most seven cards.
    pub fn from_mask(mask: CardMask) -> Result<Hand, EvalError> {
        if mask.len() > tables::MAX_CARDS {
            return Err(EvalError::TooManyCards(mask.len()));
        }
        Ok(mask.iter().fold(Hand::EMPTY, Hand::add))
    }

    pub fn mask(&self) -> CardMask {
        self.mask
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rank the hand. Equal to the best five card subset for 6 and 7 cards.
    #[inline]
    pub fn evaluate(&self) -> HandValue {
        let tables = tables::get();
        // A flush in at most seven cards rules out quads and full houses, so
        // the flush entry is the best the hand can do.
        match self.suits.flush_suit() {
            Some(suit) => HandValue(tables.flush_value(self.mask.suit_ranks(suit))),
            None => HandValue(tables.rank_value(self.key)),
        }
    }
}

impl Default for Hand {
    fn default() -> Self {
        Hand::EMPTY
    }
}

/// Force the lookup tables to be built now rather than on first evaluation.
pub fn init() {
    let _ = tables::get();
}

/// Evaluate up to seven distinct cards.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::evaluator::{evaluate_cards, Category};
///
/// let royal = evaluate_cards(&parse_cards("AhKhQhJhTh").unwrap()).unwrap();
/// let quads = evaluate_cards(&parse_cards("2c2d2h2s3c").unwrap()).unwrap();
/// assert_eq!(royal.category(), Category::StraightFlush);
/// assert!(royal > quads);
/// ```
pub fn evaluate_cards(cards: &[Card]) -> Result<HandValue, EvalError> {
    Hand::from_cards(cards).map(|h| h.evaluate())
}

/// Evaluate a mask of up to seven cards.
pub fn evaluate_mask(mask: CardMask) -> Result<HandValue, EvalError> {
    Hand::from_mask(mask).map(|h| h.evaluate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_card_sequence, parse_cards};

    fn eval(s: &str) -> HandValue {
        evaluate_cards(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(Category::from_value(0), Category::HighCard);
        assert_eq!(Category::from_value(4095), Category::HighCard);
        assert_eq!(Category::from_value(4096), Category::Pair);
        assert_eq!(Category::from_value(8 * 4096), Category::StraightFlush);
        assert_eq!(HandValue::from_parts(Category::Flush, 7).raw(), 5 * 4096 + 7);
        assert_eq!(Category::FourOfAKind.to_string(), "Four of a Kind");
    }

    #[test]
    fn evaluate_categories() {
        assert_eq!(eval("AsKsQsJsTs").category(), Category::StraightFlush);
        assert_eq!(eval("KcKdKhKs2s").category(), Category::FourOfAKind);
        assert_eq!(eval("TcTdTh2s2h").category(), Category::FullHouse);
        assert_eq!(eval("Ah9h7h3h2h").category(), Category::Flush);
        assert_eq!(eval("Ac2d3h4s5c").category(), Category::Straight);
        assert_eq!(eval("QcQdQh9s2c").category(), Category::ThreeOfAKind);
        assert_eq!(eval("JcJd9c9h2s").category(), Category::TwoPair);
        assert_eq!(eval("AhAdTs9c2d").category(), Category::Pair);
        assert_eq!(eval("AhKd7s5c2d").category(), Category::HighCard);
    }

    #[test]
    fn wheel_is_lowest_straight_and_straight_flush() {
        assert!(eval("2c3d4h5s6c") > eval("Ac2d3h4s5c"));
        assert!(eval("2h3h4h5h6h") > eval("Ah2h3h4h5h"));
        assert_eq!(eval("Ah2h3h4h5h").category(), Category::StraightFlush);
    }

    #[test]
    fn suits_do_not_matter() {
        assert_eq!(eval("AhKhQhJh9h"), eval("AcKcQcJc9c"));
        assert_eq!(eval("AhAdKs7c2d"), eval("AcAsKh7d2s"));
    }

    #[test]
    fn seven_card_flush_over_straight() {
        let v = eval("9h8h7h6h2h5cTd");
        assert_eq!(v.category(), Category::Flush);
        let sf = eval("9h8h7h6h5h Tc Td");
        assert_eq!(sf.category(), Category::StraightFlush);
    }

    #[test]
    fn partial_hands_rank_consistently() {
        assert_eq!(eval("Ah").category(), Category::HighCard);
        assert_eq!(eval("AhAd").category(), Category::Pair);
        assert!(eval("AhAdKc") > eval("AhAd"));
        assert!(eval("2c2d") > eval("AhKd"));
        assert_eq!(Hand::EMPTY.evaluate().raw(), 0);
    }

    #[test]
    fn add_is_order_independent_and_immutable() {
        let cards = parse_cards("Ah Kd 7s 7c 2d Jh 9s").unwrap();
        let forward = cards.iter().fold(Hand::EMPTY, |h, &c| h.add(c));
        let backward = cards.iter().rev().fold(Hand::EMPTY, |h, &c| h.add(c));
        assert_eq!(forward, backward);
        assert_eq!(forward.evaluate(), backward.evaluate());

        let base = Hand::EMPTY.add(cards[0]);
        let _ = base.add(cards[1]);
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn checked_construction() {
        let cards = parse_cards("Ah Kd 7s 7c 2d Jh 9s 3c").unwrap();
        assert_eq!(Hand::from_cards(&cards), Err(EvalError::TooManyCards(8)));
        let twice = Hand::EMPTY.add(cards[0]).try_add(cards[0]);
        assert!(matches!(twice, Err(EvalError::Card(CardParseError::Duplicate(_)))));

        let mask = parse_card_sequence("AhKhQhJhTh").unwrap();
        assert_eq!(evaluate_mask(mask).unwrap().category(), Category::StraightFlush);
    }
}
