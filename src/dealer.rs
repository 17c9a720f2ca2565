//! Card distribution behind a trait so games can swap the shuffled deck for
//! scripted deals in tests.

use crate::cards::Card;
use crate::deck::Deck;
use crate::hand::HoleCards;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DealError {
    #[error("deck exhausted while dealing {0}")]
    Exhausted(&'static str),
    #[error("no hole cards dealt to seat {0}")]
    MissingHand(usize),
    #[error("duplicate card in dealt hand")]
    DuplicateCard,
}

/// Source of cards for one hand. Implementations own the hole cards and the
/// board; the engine only asks for them back at decision and showdown time.
pub trait Dealer {
    /// Shuffle and deal two cards to every seat where `in_hand` is true.
    /// Resets any previous hand's cards.
    fn deal_hole(&mut self, seats: usize, in_hand: &[bool]) -> Result<(), DealError>;

    fn deal_flop(&mut self) -> Result<[Card; 3], DealError>;

    fn deal_turn(&mut self) -> Result<Card, DealError>;

    fn deal_river(&mut self) -> Result<Card, DealError>;

    /// Hole cards for a seat; `None` for seats that were dealt out.
    fn player_hand(&self, seat: usize) -> Option<HoleCards>;

    fn community_cards(&self) -> &[Card];
}

/// The standard dealer: a freshly shuffled 52-card deck per hand.
pub struct DeckDealer {
    deck: Deck,
    hands: Vec<Option<HoleCards>>,
    community: Vec<Card>,
    rng: StdRng,
}

impl DeckDealer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic deals for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { deck: Deck::standard(), hands: Vec::new(), community: Vec::new(), rng }
    }

    fn draw(&mut self, what: &'static str) -> Result<Card, DealError> {
        self.deck.draw().ok_or(DealError::Exhausted(what))
    }
}

impl Default for DeckDealer {
    fn default() -> Self {
        Self::new()
    }
}

impl Dealer for DeckDealer {
    fn deal_hole(&mut self, seats: usize, in_hand: &[bool]) -> Result<(), DealError> {
        self.deck = Deck::standard();
        self.deck.shuffle_with(&mut self.rng);
        self.community.clear();
        self.hands = vec![None; seats];
        for seat in 0..seats {
            if !in_hand.get(seat).copied().unwrap_or(false) {
                continue;
            }
            let a = self.draw("hole cards")?;
            let b = self.draw("hole cards")?;
            let hole = HoleCards::try_new(a, b).map_err(|_| DealError::DuplicateCard)?;
            self.hands[seat] = Some(hole);
        }
        Ok(())
    }

    fn deal_flop(&mut self) -> Result<[Card; 3], DealError> {
        let flop = [
            self.draw("flop")?,
            self.draw("flop")?,
            self.draw("flop")?,
        ];
        self.community.extend_from_slice(&flop);
        Ok(flop)
    }

    fn deal_turn(&mut self) -> Result<Card, DealError> {
        let card = self.draw("turn")?;
        self.community.push(card);
        Ok(card)
    }

    fn deal_river(&mut self) -> Result<Card, DealError> {
        let card = self.draw("river")?;
        self.community.push(card);
        Ok(card)
    }

    fn player_hand(&self, seat: usize) -> Option<HoleCards> {
        self.hands.get(seat).copied().flatten()
    }

    fn community_cards(&self) -> &[Card] {
        &self.community
    }
}
