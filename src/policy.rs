//! Bot personalities. Every policy works from the same inputs: a Monte
//! Carlo equity estimate, pot odds and a private RNG for mixing decisions.

use crate::engine::DecisionSnapshot;
use crate::equity::{estimate_equity, DEFAULT_SIMULATIONS};
use crate::table::{Action, Chips};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A betting decision maker. `decide` must return some action for every
/// snapshot; the engine clamps amounts, so policies only aim.
pub trait BotPolicy {
    fn decide(&mut self, snap: &DecisionSnapshot) -> Action;
}

/// `call / (pot + call)`, the equity needed for a break-even call.
pub fn pot_odds(snap: &DecisionSnapshot) -> f64 {
    if snap.call_amount == 0 {
        return 0.0;
    }
    f64::from(snap.call_amount) / f64::from(snap.pot + snap.call_amount)
}

/// Equity of the snapshot's hand against one random hand per live opponent.
/// Falls back to a neutral 0.5 if the estimate cannot run.
fn equity<R: Rng + ?Sized>(snap: &DecisionSnapshot, simulations: u32, rng: &mut R) -> f64 {
    let opponents = snap.active_players.saturating_sub(1).max(1);
    estimate_equity(&snap.hole, &snap.community, opponents, simulations, rng)
        .unwrap_or(0.5)
        .clamp(0.0, 1.0)
}

fn raise_to_minimum(snap: &DecisionSnapshot) -> Action {
    Action::Raise(snap.min_raise_to.min(snap.stack + snap.bet))
}

/// Open the betting for `amount`. At the big-blind option a blind is still
/// standing, so the opening bet has to go in as a raise on top of it.
fn open_bet(snap: &DecisionSnapshot, amount: Chips) -> Action {
    if snap.current_bet == 0 {
        Action::Bet(amount)
    } else {
        Action::Raise((snap.current_bet + amount).min(snap.stack + snap.bet))
    }
}

/// Bets and raises far more often than its hand justifies.
pub struct AggressivePolicy {
    pub aggression: f64,
    /// Monte Carlo trials per decision.
    pub simulations: u32,
    rng: StdRng,
}

impl AggressivePolicy {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { aggression: 0.7, simulations: DEFAULT_SIMULATIONS, rng }
    }
}

impl Default for AggressivePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPolicy for AggressivePolicy {
    fn decide(&mut self, snap: &DecisionSnapshot) -> Action {
        let strength = equity(snap, self.simulations, &mut self.rng);
        let feeling_it = strength > 0.3 || self.rng.random::<f64>() < self.aggression;

        if snap.can_check {
            if feeling_it && self.rng.random::<f64>() < 0.6 {
                let amount = (snap.pot / 2).max(snap.big_blind).min(snap.stack);
                return open_bet(snap, amount);
            }
            return Action::Check;
        }

        if strength > 0.6 || (feeling_it && strength > 0.4) {
            return raise_to_minimum(snap);
        }
        if strength > 0.3 {
            return Action::Call;
        }
        Action::Fold
    }
}

/// Plays only strong hands and otherwise waits.
pub struct TightPolicy {
    pub play_threshold: f64,
    /// Monte Carlo trials per decision.
    pub simulations: u32,
    rng: StdRng,
}

impl TightPolicy {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { play_threshold: 0.6, simulations: DEFAULT_SIMULATIONS, rng }
    }
}

impl Default for TightPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPolicy for TightPolicy {
    fn decide(&mut self, snap: &DecisionSnapshot) -> Action {
        let strength = equity(snap, self.simulations, &mut self.rng);

        if snap.can_check {
            if strength > 0.75 {
                return open_bet(snap, (snap.pot / 2).min(snap.stack));
            }
            return Action::Check;
        }

        if strength > self.play_threshold {
            if strength > 0.8 {
                return raise_to_minimum(snap);
            }
            return Action::Call;
        }
        Action::Fold
    }
}

/// Mixes value bets with the occasional bluff and weighs pot odds on
/// marginal calls.
pub struct BalancedPolicy {
    pub bluff_frequency: f64,
    /// Monte Carlo trials per decision.
    pub simulations: u32,
    rng: StdRng,
}

impl BalancedPolicy {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { bluff_frequency: 0.15, simulations: DEFAULT_SIMULATIONS, rng }
    }
}

impl Default for BalancedPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPolicy for BalancedPolicy {
    fn decide(&mut self, snap: &DecisionSnapshot) -> Action {
        let strength = equity(snap, self.simulations, &mut self.rng);
        let odds = pot_odds(snap);
        let bluffing = self.rng.random::<f64>() < self.bluff_frequency;

        if snap.can_check {
            if strength > 0.6 || bluffing {
                let amount = two_thirds_pot(snap.pot).max(snap.big_blind).min(snap.stack);
                return open_bet(snap, amount);
            }
            return Action::Check;
        }

        if strength > 0.75 {
            // Mostly raise, sometimes slow-play.
            if self.rng.random::<f64>() < 0.7 {
                return raise_to_minimum(snap);
            }
            return Action::Call;
        }

        if strength > 0.45 && (odds < 0.33 || strength > 0.55) {
            return Action::Call;
        }

        if bluffing && snap.active_players <= 2 {
            return raise_to_minimum(snap);
        }
        Action::Fold
    }
}

/// Pot-odds-driven variant of [`BalancedPolicy`]: calls whenever the price
/// is right and reserves raises for clear value or heads-up semi-bluffs.
pub struct SmartBalancedPolicy {
    pub bluff_frequency: f64,
    pub value_raise_equity: f64,
    /// Looseness added on top of pure pot odds when deciding a call.
    pub call_buffer: f64,
    /// Monte Carlo trials per decision.
    pub simulations: u32,
    rng: StdRng,
}

impl SmartBalancedPolicy {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            bluff_frequency: 0.12,
            value_raise_equity: 0.72,
            call_buffer: 0.05,
            simulations: DEFAULT_SIMULATIONS,
            rng,
        }
    }
}

impl Default for SmartBalancedPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPolicy for SmartBalancedPolicy {
    fn decide(&mut self, snap: &DecisionSnapshot) -> Action {
        let strength = equity(snap, self.simulations, &mut self.rng);
        let odds = pot_odds(snap);
        let bluffing = self.rng.random::<f64>() < self.bluff_frequency;

        if snap.can_check {
            if strength > 0.6 || bluffing {
                let amount = two_thirds_pot(snap.pot).max(snap.big_blind).min(snap.stack);
                return open_bet(snap, amount);
            }
            return Action::Check;
        }

        if strength >= self.value_raise_equity {
            return raise_to_minimum(snap);
        }
        if strength >= odds + self.call_buffer {
            return Action::Call;
        }
        if bluffing && snap.active_players <= 2 && strength > 0.25 {
            return raise_to_minimum(snap);
        }
        Action::Fold
    }
}

fn two_thirds_pot(pot: Chips) -> Chips {
    (f64::from(pot) * 0.66).round() as Chips
}
