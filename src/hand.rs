use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate hole cards")]
    DuplicateHoleCards,
    #[error("too many community cards: {0}")]
    TooManyCommunityCards(usize),
    #[error("duplicate cards across hole and community")]
    DuplicateCards,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards; always distinct.
///
/// ```
/// use holdem_engine::hand::HoleCards;
///
/// let hole: HoleCards = "As Kd".parse().unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        if cards.len() != 2 {
            return Err(HandError::HoleCount(cards.len()));
        }
        Self::try_new(cards[0], cards[1])
    }
}

/// Check that hole cards plus 0..=5 community cards contain no duplicates.
pub fn validate_cards(hole: &HoleCards, community: &[Card]) -> Result<(), HandError> {
    if community.len() > 5 {
        return Err(HandError::TooManyCommunityCards(community.len()));
    }
    let mut seen: HashSet<Card> = HashSet::with_capacity(community.len() + 2);
    seen.insert(hole.first());
    if !seen.insert(hole.second()) {
        return Err(HandError::DuplicateHoleCards);
    }
    for &c in community {
        if !seen.insert(c) {
            return Err(HandError::DuplicateCards);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
    }

    #[test]
    fn parse_rejects_wrong_count() {
        assert!(matches!("As".parse::<HoleCards>(), Err(HandError::HoleCount(1))));
        assert!(matches!("As Kd Qc".parse::<HoleCards>(), Err(HandError::HoleCount(3))));
    }

    #[test]
    fn validate_catches_overlap() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let community = parse_cards("As 2c 3c").unwrap();
        assert!(matches!(validate_cards(&hole, &community), Err(HandError::DuplicateCards)));
    }

    #[test]
    fn validate_rejects_oversized_board() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let community = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        assert!(matches!(
            validate_cards(&hole, &community),
            Err(HandError::TooManyCommunityCards(6))
        ));
    }

    #[test]
    fn validate_accepts_partial_boards() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        for n in 0..=5 {
            let community = parse_cards("2c 3c 4c 5c 6c").unwrap()[..n].to_vec();
            assert!(validate_cards(&hole, &community).is_ok());
        }
    }
}
