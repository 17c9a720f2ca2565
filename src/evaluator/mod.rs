mod combinations;
mod shape;

use crate::cards::{Card, Rank};
use crate::hand::{validate_cards, HandError, HoleCards};
use combinations::FiveFromN;
use shape::HandShape;
use std::fmt;

/// Poker hand categories from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
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
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };
        f.write_str(name)
    }
}

/// Compact, totally ordered hand strength: category plus up to five
/// tie-break ranks packed most-significant-first. Comparing two values is
/// exactly the lexicographic (category, tie-breakers) comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

impl HandValue {
    // Category sits in the high byte; each tie-break rank gets 6 bits below
    // it so r0 always outweighs r1..r4. Unused slots stay zero.
    const CAT_SHIFT: u32 = 48;
    const RANK_STRIDE: u32 = 6;

    pub(crate) fn pack(category: Category, tiebreak: &[Rank]) -> Self {
        debug_assert!(tiebreak.len() <= 5);
        let mut v = (category as u64) << Self::CAT_SHIFT;
        for (i, r) in tiebreak.iter().enumerate() {
            let offset = Self::CAT_SHIFT - Self::RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandValue(v)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Result of evaluating one hand: the category for display plus the packed
/// value that drives ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandEval {
    pub value: HandValue,
    pub category: Category,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error(transparent)]
    InvalidHand(#[from] HandError),
    #[error("need at least five cards to evaluate, got {0}")]
    NotEnoughCards(usize),
}

/// Evaluate exactly five cards into a totally ordered [`HandEval`].
///
/// Categories are tested in strength order; the wheel (A-2-3-4-5) counts as
/// a five-high straight, and an ace-high straight flush is a royal flush.
pub fn evaluate_five(cards: &[Card; 5]) -> HandEval {
    let sh = HandShape::of(cards);

    if let (Some(_), Some(high)) = (sh.flush_suit, sh.straight_high) {
        if high == Rank::Ace {
            return mk(Category::RoyalFlush, &[Rank::Ace]);
        }
        return mk(Category::StraightFlush, &[high]);
    }
    if let Some(quad) = sh.group_of(4) {
        let kicker = sh.group_of(1).unwrap_or(quad);
        return mk(Category::FourOfAKind, &[quad, kicker]);
    }
    if let (Some(trips), Some(pair)) = (sh.group_of(3), sh.group_of(2)) {
        return mk(Category::FullHouse, &[trips, pair]);
    }
    if sh.flush_suit.is_some() {
        return mk(Category::Flush, &sh.ranks_desc);
    }
    if let Some(high) = sh.straight_high {
        return mk(Category::Straight, &[high]);
    }
    if let Some(trips) = sh.group_of(3) {
        let mut tb = vec![trips];
        tb.extend(sh.ranks_with_count(1));
        return mk(Category::ThreeOfAKind, &tb);
    }
    let pairs: Vec<Rank> = sh.ranks_with_count(2).collect();
    match pairs.len() {
        2 => {
            let kicker = sh.group_of(1).unwrap_or(pairs[1]);
            mk(Category::TwoPair, &[pairs[0], pairs[1], kicker])
        }
        1 => {
            let mut tb = vec![pairs[0]];
            tb.extend(sh.ranks_with_count(1));
            mk(Category::Pair, &tb)
        }
        _ => mk(Category::HighCard, &sh.ranks_desc),
    }
}

fn mk(category: Category, tiebreak: &[Rank]) -> HandEval {
    HandEval { value: HandValue::pack(category, tiebreak), category }
}

/// Best five-card hand from two hole cards plus 0..=5 community cards.
///
/// Enumerates every five-card subset of the combined pool (at most
/// C(7,5) = 21) and returns the maximum under the total order.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::{best_hand_value, Category};
/// use holdem_engine::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board = parse_cards("Qs Js 10s 2d 3c").unwrap();
/// let eval = best_hand_value(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::RoyalFlush);
/// ```
pub fn best_hand_value(hole: &HoleCards, community: &[Card]) -> Result<HandEval, EvalError> {
    validate_cards(hole, community)?;
    let mut pool = Vec::with_capacity(2 + community.len());
    pool.push(hole.first());
    pool.push(hole.second());
    pool.extend_from_slice(community);
    if pool.len() < 5 {
        return Err(EvalError::NotEnoughCards(pool.len()));
    }

    let mut best: Option<HandEval> = None;
    for idx in FiveFromN::new(pool.len()) {
        let five = [pool[idx[0]], pool[idx[1]], pool[idx[2]], pool[idx[3]], pool[idx[4]]];
        let eval = evaluate_five(&five);
        if best.map_or(true, |b| eval > b) {
            best = Some(eval);
        }
    }
    best.ok_or(EvalError::NotEnoughCards(pool.len()))
}
