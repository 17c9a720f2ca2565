use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A standard 52-card deck consumed front-to-back by [`Deck::draw`].
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 distinct cards in a fixed order.
    ///
    /// ```
    /// use holdem_engine::deck::Deck;
    ///
    /// assert_eq!(Deck::standard().remaining(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Consume the deck, returning the cards in their current order.
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    /// Shuffle with a seeded RNG for reproducible deals.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle with any caller-provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card; `None` once the deck is exhausted. Callers that treat
    /// exhaustion as a lifecycle bug surface it as `DeckExhausted`.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw up to `n` cards; shorter than `n` only when the deck runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_distinct_cards() {
        let d = Deck::standard();
        assert_eq!(d.remaining(), 52);
        let unique: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = Deck::standard();
        let mut b = Deck::standard();
        a.shuffle_seeded(42);
        b.shuffle_seeded(42);
        assert_eq!(a.cards, b.cards);
    }

    #[test]
    fn draw_consumes_and_never_repeats() {
        let mut d = Deck::standard();
        d.shuffle_seeded(7);
        let mut seen = HashSet::new();
        while let Some(c) = d.draw() {
            assert!(seen.insert(c), "duplicate card drawn: {c}");
        }
        assert_eq!(seen.len(), 52);
        assert!(d.draw().is_none());
    }

    #[test]
    fn draw_n_stops_at_exhaustion() {
        let mut d = Deck::standard();
        let all = d.draw_n(60);
        assert_eq!(all.len(), 52);
        assert!(d.is_empty());
    }
}
