//! Shared table state: streets, player actions and per-seat bookkeeping.

use std::fmt;

/// Chip amounts. Stacks and pots in this engine never approach the u32
/// ceiling; the arithmetic uses saturating/min guards rather than widening.
pub type Chips = u32;

/// Phase of a hand. `Showdown` and `Complete` accept no further actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl Street {
    pub fn is_betting(self) -> bool {
        matches!(self, Street::Preflop | Street::Flop | Street::Turn | Street::River)
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
            Street::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// A player's move. `Bet` opens the betting on a street; `Raise` carries the
/// target total (the amount the seat's street commitment becomes), not the
/// increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Bet(n) => write!(f, "bet {n}"),
            Action::Raise(n) => write!(f, "raise to {n}"),
        }
    }
}

/// Per-hand mutable state for every seat plus the shared pot.
///
/// All vectors are indexed by seat and share one length. Field access stays
/// crate-private; callers observe the table through the engine's snapshot
/// and view types.
#[derive(Debug, Clone)]
pub struct TableState {
    pub(crate) stacks: Vec<Chips>,
    /// Chips committed on the current street only.
    pub(crate) bets: Vec<Chips>,
    pub(crate) folded: Vec<bool>,
    /// Whether the seat has acted since the last bet or raise.
    pub(crate) has_acted: Vec<bool>,
    pub(crate) pot: Chips,
    /// Highest per-street commitment any seat must match.
    pub(crate) current_bet: Chips,
    pub(crate) dealer: usize,
    pub(crate) current: usize,
    pub(crate) street: Street,
    /// Seat of the last bet or raise this street; the big blind preflop.
    pub(crate) last_raiser: Option<usize>,
}

impl TableState {
    pub(crate) fn new(seats: usize, starting_stack: Chips) -> Self {
        Self {
            stacks: vec![starting_stack; seats],
            bets: vec![0; seats],
            folded: vec![false; seats],
            has_acted: vec![false; seats],
            pot: 0,
            current_bet: 0,
            dealer: 0,
            current: 0,
            street: Street::Complete,
            last_raiser: None,
        }
    }

    pub fn seats(&self) -> usize {
        self.stacks.len()
    }

    pub fn stack(&self, seat: usize) -> Chips {
        self.stacks[seat]
    }

    pub fn bet(&self, seat: usize) -> Chips {
        self.bets[seat]
    }

    pub fn is_folded(&self, seat: usize) -> bool {
        self.folded[seat]
    }

    pub fn is_all_in(&self, seat: usize) -> bool {
        !self.folded[seat] && self.stacks[seat] == 0
    }

    pub fn pot(&self) -> Chips {
        self.pot
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// Seat whose turn it is. Meaningless outside a betting street.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn last_raiser(&self) -> Option<usize> {
        self.last_raiser
    }

    /// Seats still contesting the pot (not folded).
    pub fn active_players(&self) -> usize {
        self.folded.iter().filter(|&&f| !f).count()
    }

    /// Seats that can still take an action: in the hand with chips behind.
    pub(crate) fn can_act(&self, seat: usize) -> bool {
        !self.folded[seat] && self.stacks[seat] > 0
    }

    /// Move `amount` (capped at the stack) from the seat into its street bet.
    /// Returns what actually moved, which is less than `amount` for all-ins.
    pub(crate) fn commit(&mut self, seat: usize, amount: Chips) -> Chips {
        let paid = amount.min(self.stacks[seat]);
        self.stacks[seat] -= paid;
        self.bets[seat] += paid;
        self.pot += paid;
        paid
    }

    /// Clear street bets and the bet-to-match; the pot carries forward.
    pub(crate) fn start_street(&mut self, street: Street) {
        self.bets.iter_mut().for_each(|b| *b = 0);
        self.has_acted.iter_mut().for_each(|a| *a = false);
        self.current_bet = 0;
        self.last_raiser = None;
        self.street = street;
    }
}
