//! Monte Carlo equity estimation.
//!
//! Each trial deals random opponent hole cards and the remaining community
//! cards from the unseen portion of the deck, then showdowns the hero
//! against every opponent. Ties are worth half a win.

use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::{best_hand_value, EvalError};
use crate::hand::{validate_cards, HoleCards};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Trial count used by the bot policies unless configured otherwise.
pub const DEFAULT_SIMULATIONS: u32 = 500;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EquityError {
    #[error("equity needs at least one opponent")]
    NoOpponents,
    #[error("equity needs at least one simulation")]
    NoSimulations,
    #[error("not enough unseen cards for {opponents} opponents and {board_needed} board cards")]
    PoolExhausted { opponents: usize, board_needed: usize },
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("equity estimation was cancelled")]
    Cancelled,
}

/// Estimate the probability that `hole` wins at showdown against
/// `opponents` random hands, given the community cards seen so far.
///
/// Returns `(wins + 0.5 * ties) / simulations`, always in `[0, 1]`.
/// The caller supplies the RNG, so a seeded generator makes the whole
/// estimate reproducible.
pub fn estimate_equity<R: Rng + ?Sized>(
    hole: &HoleCards,
    community: &[Card],
    opponents: usize,
    simulations: u32,
    rng: &mut R,
) -> Result<f64, EquityError> {
    run_trials(hole, community, opponents, simulations, rng, None)
}

/// Same as [`estimate_equity`] but checks `cancel` between trials and
/// returns [`EquityError::Cancelled`] once it flips.
pub fn estimate_equity_cancellable<R: Rng + ?Sized>(
    hole: &HoleCards,
    community: &[Card],
    opponents: usize,
    simulations: u32,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Result<f64, EquityError> {
    run_trials(hole, community, opponents, simulations, rng, Some(cancel))
}

fn run_trials<R: Rng + ?Sized>(
    hole: &HoleCards,
    community: &[Card],
    opponents: usize,
    simulations: u32,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> Result<f64, EquityError> {
    if opponents == 0 {
        return Err(EquityError::NoOpponents);
    }
    if simulations == 0 {
        return Err(EquityError::NoSimulations);
    }
    validate_cards(hole, community).map_err(EvalError::from)?;

    let seen: Vec<Card> = hole
        .as_array()
        .into_iter()
        .chain(community.iter().copied())
        .collect();
    let pool: Vec<Card> = Deck::standard()
        .into_cards()
        .into_iter()
        .filter(|c| !seen.contains(c))
        .collect();

    let board_needed = 5 - community.len();
    let draw_count = opponents * 2 + board_needed;
    if draw_count > pool.len() {
        return Err(EquityError::PoolExhausted { opponents, board_needed });
    }

    let mut wins = 0u32;
    let mut ties = 0u32;
    let mut trial_pool = pool.clone();

    for _ in 0..simulations {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(EquityError::Cancelled);
            }
        }

        // Partial Fisher-Yates: only the first draw_count slots need to be
        // uniformly random, the rest of the pool is never touched.
        trial_pool.copy_from_slice(&pool);
        for i in 0..draw_count {
            let j = rng.random_range(i..trial_pool.len());
            trial_pool.swap(i, j);
        }

        let mut full_board = community.to_vec();
        full_board.extend_from_slice(&trial_pool[opponents * 2..draw_count]);

        let hero = best_hand_value(hole, &full_board)?;

        let mut best_villain = None;
        for opp in 0..opponents {
            let villain_hole =
                HoleCards::try_new(trial_pool[opp * 2], trial_pool[opp * 2 + 1])
                    .map_err(EvalError::from)?;
            let eval = best_hand_value(&villain_hole, &full_board)?;
            if best_villain.map_or(true, |b| eval > b) {
                best_villain = Some(eval);
            }
        }
        let villain = match best_villain {
            Some(v) => v,
            None => return Err(EquityError::NoOpponents),
        };

        if hero > villain {
            wins += 1;
        } else if hero == villain {
            ties += 1;
        }
    }

    Ok((f64::from(wins) + 0.5 * f64::from(ties)) / f64::from(simulations))
}
