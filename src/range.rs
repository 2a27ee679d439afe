//! Range notation.
//!
//! A range is a comma separated list of items, each optionally followed by
//! `:weight` (default `1`):
//!
//! | item        | combos                                   |
//! |-------------|------------------------------------------|
//! | `AhKh`      | that exact combo                         |
//! | `QQ`        | the 6 pocket queens                      |
//! | `AKs`/`AKo` | 4 suited / 12 offsuit                    |
//! | `AK`        | all 16                                   |
//! | `77+`       | 77 through AA                            |
//! | `A2s+`      | A2s through AKs                          |
//! | `22-55`     | 22, 33, 44, 55                           |
//! | `KTo-KQo`   | KTo, KJo, KQo                            |
//! | `XX`        | any two cards (wildcard, must be alone)  |
//!
//! When a combo appears in several items the last weight wins, and combos
//! whose final weight is zero are dropped.

use crate::cards::{Card, CardParseError, Rank, Suit};
use crate::deck::CardMask;
use crate::hand::HoleCards;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RangeError {
    #[error("empty range")]
    Empty,
    #[error("empty item in range '{0}'")]
    EmptyItem(String),
    #[error("malformed range item '{0}'")]
    Malformed(String),
    #[error("'+' cannot follow an exact combo: '{0}'")]
    PlusOnExact(String),
    #[error("pocket pairs take no suitedness: '{0}'")]
    SuitednessOnPair(String),
    #[error("range span ends do not match: '{0}'")]
    SpanMismatch(String),
    #[error("invalid weight '{0}', expected a finite non-negative number")]
    Weight(String),
    #[error("a wildcard must be the only item of its range")]
    WildcardMixed,
    #[error("a wildcard takes no weight")]
    WildcardWeight,
    #[error(transparent)]
    Card(#[from] CardParseError),
}

/// One concrete combo with its relative weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedCombo {
    pub combo: HoleCards,
    pub weight: f64,
}

/// The hands a player may hold.
///
/// ```
/// use poker_equity::range::Range;
///
/// let range: Range = "QQ+, AKs".parse().unwrap();
/// assert_eq!(range.len(), 3 * 6 + 4);
///
/// let random: Range = "XX".parse().unwrap();
/// assert!(random.is_wildcard());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Range {
    /// Explicit combos in order of first appearance, every weight positive.
    Weighted(Vec<WeightedCombo>),
    /// Any two cards not otherwise in use, uniformly.
    Wildcard,
}

impl Range {
    /// A range holding a single combo with unit weight.
    pub fn single(combo: HoleCards) -> Self {
        Range::Weighted(vec![WeightedCombo { combo, weight: 1.0 }])
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Range::Wildcard)
    }

    /// Materialised combos; empty for the wildcard.
    pub fn combos(&self) -> &[WeightedCombo] {
        match self {
            Range::Weighted(combos) => combos,
            Range::Wildcard => &[],
        }
    }

    /// Number of materialised combos.
    pub fn len(&self) -> usize {
        self.combos().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_wildcard() && self.combos().is_empty()
    }

    /// The range without combos that use a card of `dead`.
    ///
    /// The wildcard is returned unchanged; its combos are resolved against
    /// the deck when dealt.
    pub fn remove_dead(&self, dead: CardMask) -> Range {
        match self {
            Range::Weighted(combos) => Range::Weighted(
                combos.iter().copied().filter(|c| !c.combo.mask().intersects(dead)).collect(),
            ),
            Range::Wildcard => Range::Wildcard,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.combos().iter().map(|c| c.weight).sum()
    }
}

impl FromStr for Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(RangeError::Empty);
        }

        let items = s.split(',').map(str::trim).collect::<Vec<_>>();
        let mut builder = RangeBuilder::default();

        for item in &items {
            if item.is_empty() {
                return Err(RangeError::EmptyItem(s.to_string()));
            }
            let (body, weight) = match item.split_once(':') {
                Some((body, weight)) => (body.trim(), Some(parse_weight(weight)?)),
                None => (*item, None),
            };

            if is_wildcard(body) {
                if items.len() > 1 {
                    return Err(RangeError::WildcardMixed);
                }
                if weight.is_some() {
                    return Err(RangeError::WildcardWeight);
                }
                return Ok(Range::Wildcard);
            }

            let weight = weight.unwrap_or(1.0);
            for combo in expand_item(body)? {
                builder.insert(combo, weight);
            }
        }

        Ok(builder.build())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Wildcard => f.write_str("XX"),
            Range::Weighted(combos) => {
                for (i, c) in combos.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", c.combo)?;
                    if c.weight != 1.0 {
                        write!(f, ":{}", c.weight)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Collects combos keeping first appearance order, last weight wins.
#[derive(Default)]
struct RangeBuilder {
    combos: Vec<WeightedCombo>,
    index: HashMap<HoleCards, usize>,
}

impl RangeBuilder {
    fn insert(&mut self, combo: HoleCards, weight: f64) {
        match self.index.get(&combo) {
            Some(&i) => self.combos[i].weight = weight,
            None => {
                self.index.insert(combo, self.combos.len());
                self.combos.push(WeightedCombo { combo, weight });
            }
        }
    }

    fn build(mut self) -> Range {
        self.combos.retain(|c| c.weight > 0.0);
        Range::Weighted(self.combos)
    }
}

fn is_wildcard(body: &str) -> bool {
    body.eq_ignore_ascii_case("xx") || body.eq_ignore_ascii_case("random")
}

fn parse_weight(s: &str) -> Result<f64, RangeError> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => Err(RangeError::Weight(s.to_string())),
    }
}

/// A hand class such as `AKs` or `77`, high rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Pair(Rank),
    Suited(Rank, Rank),
    Offsuit(Rank, Rank),
    Any(Rank, Rank),
}

impl Shape {
    fn parse(item: &str) -> Result<Shape, RangeError> {
        let chars = item.chars().collect::<Vec<_>>();
        let (a, b, suffix) = match chars[..] {
            [a, b] => (a, b, None),
            [a, b, s] => (a, b, Some(s.to_ascii_lowercase())),
            _ => return Err(RangeError::Malformed(item.to_string())),
        };
        let a = Rank::try_from(a).map_err(CardParseError::from)?;
        let b = Rank::try_from(b).map_err(CardParseError::from)?;
        let (high, low) = if a >= b { (a, b) } else { (b, a) };

        match (high == low, suffix) {
            (true, None) => Ok(Shape::Pair(high)),
            (true, Some(_)) => Err(RangeError::SuitednessOnPair(item.to_string())),
            (false, None) => Ok(Shape::Any(high, low)),
            (false, Some('s')) => Ok(Shape::Suited(high, low)),
            (false, Some('o')) => Ok(Shape::Offsuit(high, low)),
            (false, Some(_)) => Err(RangeError::Malformed(item.to_string())),
        }
    }

    /// Same shape with a different low rank (or pair rank).
    fn with_low(self, low: Rank) -> Shape {
        match self {
            Shape::Pair(_) => Shape::Pair(low),
            Shape::Suited(h, _) => Shape::Suited(h, low),
            Shape::Offsuit(h, _) => Shape::Offsuit(h, low),
            Shape::Any(h, _) => Shape::Any(h, low),
        }
    }

    /// The rank that `+` and spans move.
    fn moving(self) -> Rank {
        match self {
            Shape::Pair(r) => r,
            Shape::Suited(_, l) | Shape::Offsuit(_, l) | Shape::Any(_, l) => l,
        }
    }

    /// Exclusive upper bound for the moving rank.
    fn ceiling(self) -> usize {
        match self {
            Shape::Pair(_) => Rank::ALL.len(),
            Shape::Suited(h, _) | Shape::Offsuit(h, _) | Shape::Any(h, _) => h.index(),
        }
    }

    fn same_family(self, other: Shape) -> bool {
        match (self, other) {
            (Shape::Pair(_), Shape::Pair(_)) => true,
            (Shape::Suited(a, _), Shape::Suited(b, _))
            | (Shape::Offsuit(a, _), Shape::Offsuit(b, _))
            | (Shape::Any(a, _), Shape::Any(b, _)) => a == b,
            _ => false,
        }
    }

    fn combos(self) -> Vec<HoleCards> {
        let mut out = Vec::new();
        let (high, low) = match self {
            Shape::Pair(r) => {
                for (i, &s1) in Suit::ALL.iter().enumerate() {
                    for &s2 in &Suit::ALL[i + 1..] {
                        out.extend(HoleCards::try_new(Card::new(r, s1), Card::new(r, s2)).ok());
                    }
                }
                return out;
            }
            Shape::Suited(h, l) | Shape::Offsuit(h, l) | Shape::Any(h, l) => (h, l),
        };
        for s1 in Suit::ALL {
            for s2 in Suit::ALL {
                let keep = match self {
                    Shape::Suited(..) => s1 == s2,
                    Shape::Offsuit(..) => s1 != s2,
                    _ => true,
                };
                if keep {
                    out.extend(HoleCards::try_new(Card::new(high, s1), Card::new(low, s2)).ok());
                }
            }
        }
        out
    }
}

fn expand_item(body: &str) -> Result<Vec<HoleCards>, RangeError> {
    if let Some((from, to)) = body.split_once('-') {
        let (from, to) = (Shape::parse(from.trim())?, Shape::parse(to.trim())?);
        if !from.same_family(to) {
            return Err(RangeError::SpanMismatch(body.to_string()));
        }
        let (a, b) = (from.moving().index(), to.moving().index());
        let (lo, hi) = (a.min(b), a.max(b));
        return Ok(Rank::ALL[lo..=hi].iter().flat_map(|&r| from.with_low(r).combos()).collect());
    }

    if let Some(base) = body.strip_suffix('+') {
        if exact_combo(base).is_some() {
            return Err(RangeError::PlusOnExact(body.to_string()));
        }
        let shape = Shape::parse(base)?;
        let start = shape.moving().index();
        return Ok(Rank::ALL[start..shape.ceiling()]
            .iter()
            .flat_map(|&r| shape.with_low(r).combos())
            .collect());
    }

    if let Some(parsed) = exact_combo(body) {
        let (a, b) = parsed?;
        return HoleCards::try_new(a, b)
            .map(|combo| vec![combo])
            .map_err(|_| RangeError::Card(CardParseError::Duplicate(a)));
    }

    Shape::parse(body).map(Shape::combos)
}

/// `Some` when `body` has the form of an exact combo such as `AhKh`.
fn exact_combo(body: &str) -> Option<Result<(Card, Card), RangeError>> {
    let chars = body.chars().collect::<Vec<_>>();
    match chars[..] {
        [r1, s1, r2, s2] if Suit::try_from(s1).is_ok() && Suit::try_from(s2).is_ok() => {
            let card = |r: char, s: char| -> Result<Card, RangeError> {
                let rank = Rank::try_from(r).map_err(CardParseError::from)?;
                let suit = Suit::try_from(s).map_err(CardParseError::from)?;
                Ok(Card::new(rank, suit))
            };
            Some(card(r1, s1).and_then(|a| Ok((a, card(r2, s2)?))))
        }
        _ => None,
    }
}
