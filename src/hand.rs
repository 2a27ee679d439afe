use crate::cards::{parse_cards, Card, CardParseError};
use crate::deck::CardMask;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("board and dead cards overlap: {0}")]
    Overlap(CardMask),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error(transparent)]
    CardParse(#[from] CardParseError),
}

/// A player's two private hole cards, one concrete combo.
///
/// The cards are stored high card first so equal combos compare equal
/// regardless of the order they were given in.
///
/// ```
/// use poker_equity::cards::{Card, Rank, Suit};
/// use poker_equity::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::King, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.to_string(), "AsKs");
/// assert_eq!(hole.mask().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    /// Return the higher hole card.
    pub fn first(&self) -> Card {
        self.0
    }

    /// Return the lower hole card.
    pub fn second(&self) -> Card {
        self.1
    }

    /// Return both hole cards as a fixed array.
    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn mask(&self) -> CardMask {
        CardMask::of(self.0).with(self.1)
    }

    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }

    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        if a > b {
            Ok(Self(a, b))
        } else {
            Ok(Self(b, a))
        }
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| match e {
            CardParseError::Duplicate(_) => HandError::DuplicateHoleCards,
            e => HandError::CardParse(e),
        })?;
        Self::from_slice(&cards)
    }
}

/// Community cards on the board, 0 to 5 of them.
///
/// ```
/// use poker_equity::hand::Board;
///
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.missing(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cards: CardMask,
}

impl Board {
    pub const MAX_CARDS: usize = 5;

    pub fn try_new(cards: CardMask) -> Result<Self, HandError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards still to come.
    pub fn missing(&self) -> usize {
        Self::MAX_CARDS - self.len()
    }

    pub fn mask(&self) -> CardMask {
        self.cards
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        if cards.len() > Self::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        Board::try_new(cards.into_iter().collect())
    }
}

/// Validate that the board and the dead cards can be dealt together.
///
/// ```
/// use poker_equity::cards::parse_card_sequence;
/// use poker_equity::hand::{validate_fixed, Board};
///
/// let board: Board = "Ah Kd 2c".parse().unwrap();
/// validate_fixed(&board, parse_card_sequence("3s").unwrap()).unwrap();
/// assert!(validate_fixed(&board, parse_card_sequence("Kd").unwrap()).is_err());
/// ```
pub fn validate_fixed(board: &Board, dead: CardMask) -> Result<(), HandError> {
    let overlap = board.mask() & dead;
    if !overlap.is_empty() {
        return Err(HandError::Overlap(overlap));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_card_sequence, Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
        assert!(matches!("AsAs".parse::<HoleCards>(), Err(HandError::DuplicateHoleCards)));
    }

    #[test]
    fn hole_cards_are_order_independent() {
        let a: HoleCards = "2c Ah".parse().unwrap();
        let b: HoleCards = "Ah2c".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.first(), Card::new(Rank::Ace, Suit::Hearts));
        assert!(!a.is_suited());
        assert!(!a.is_pair());
    }

    #[test]
    fn hole_count_is_checked() {
        assert!(matches!("AhKhQh".parse::<HoleCards>(), Err(HandError::HoleCount(3))));
        assert!(matches!("Zh".parse::<HoleCards>(), Err(HandError::CardParse(_))));
    }

    #[test]
    fn board_try_new_checks_limits() {
        let cards = parse_card_sequence("2c3c4c5c6c7c").unwrap();
        assert!(matches!(Board::try_new(cards), Err(HandError::TooManyBoardCards(6))));
        assert!(matches!("2c2c".parse::<Board>(), Err(HandError::CardParse(_))));
        assert!(Board::default().is_empty());
    }

    #[test]
    fn validate_fixed_catches_overlap() {
        let board: Board = "As 2c 3c".parse().unwrap();
        let dead = parse_card_sequence("As Kd").unwrap();
        let err = validate_fixed(&board, dead).unwrap_err();
        assert_eq!(err, HandError::Overlap(parse_card_sequence("As").unwrap()));
    }
}
