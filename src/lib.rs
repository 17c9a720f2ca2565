//! Single-table no-limit Texas hold'em engine.
//!
//! The crate is split along the lines a table runs on:
//! - [`cards`] and [`deck`] model the 52-card deck;
//! - [`evaluator`] ranks five-card hands and finds the best of seven;
//! - [`equity`] estimates win probability by Monte Carlo simulation;
//! - [`engine`] drives blinds, betting rounds, streets and showdown over
//!   the [`table`] state, dealing through a [`dealer::Dealer`] and
//!   reporting to a [`render::Renderer`];
//! - [`policy`] provides bot personalities built on the equity estimate.
//!
//! ```
//! use holdem_engine::dealer::DeckDealer;
//! use holdem_engine::engine::BettingEngine;
//! use holdem_engine::policy::{BalancedPolicy, BotPolicy};
//! use holdem_engine::render::NullRenderer;
//! use holdem_engine::table::Street;
//!
//! let mut engine =
//!     BettingEngine::new(4, 1000, 5, 10, DeckDealer::seeded(1), NullRenderer);
//! let mut bots: Vec<BalancedPolicy> =
//!     (0..4u64).map(BalancedPolicy::seeded).collect();
//! bots.iter_mut().for_each(|b| b.simulations = 100);
//!
//! engine.start_new_hand().unwrap();
//! while engine.table().street().is_betting() {
//!     let seat = engine.table().current();
//!     let snap = engine.snapshot(seat).unwrap();
//!     let action = bots[seat].decide(&snap);
//!     engine.apply(seat, action).unwrap();
//! }
//! assert_eq!(engine.table().street(), Street::Complete);
//! assert!(!engine.winners().is_empty());
//! ```

pub mod cards;
pub mod dealer;
pub mod deck;
pub mod engine;
pub mod equity;
pub mod evaluator;
pub mod hand;
pub mod policy;
pub mod render;
pub mod table;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
