//! Observer seam for UIs. The engine pushes read-only views; rendering
//! itself lives outside this crate.

use crate::cards::Card;
use crate::hand::HoleCards;
use crate::table::{Chips, Street};

/// Snapshot of the public table state, emitted after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub pot: Chips,
    pub stacks: Vec<Chips>,
    pub bets: Vec<Chips>,
    pub folded: Vec<bool>,
    pub community: Vec<Card>,
    pub current: usize,
    pub dealer: usize,
    pub street: Street,
}

/// Receives table updates. All methods default to no-ops so observers
/// implement only what they display.
pub trait Renderer {
    fn table_updated(&mut self, view: &TableView) {
        let _ = view;
    }

    /// Called once per showdown with each revealed hand and the winners.
    fn showdown(&mut self, revealed: &[(usize, HoleCards)], winners: &[usize]) {
        let _ = (revealed, winners);
    }
}

/// Renderer for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}
