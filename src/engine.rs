//! Betting-round state machine: blinds, turn order, street transitions and
//! showdown resolution for a single-table no-limit hold'em game.

use crate::cards::Card;
use crate::dealer::{DealError, Dealer};
use crate::evaluator::{best_hand_value, EvalError, HandEval};
use crate::hand::HoleCards;
use crate::render::{Renderer, TableView};
use crate::table::{Action, Chips, Street, TableState};

/// Why an [`Action`] was refused. The table state is unchanged and the same
/// seat is still to act.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalAction {
    #[error("cannot check facing a bet")]
    CheckFacingBet,
    #[error("cannot bet while a bet is standing; raise instead")]
    BetOverStandingBet,
    #[error("cannot raise without a standing bet; bet instead")]
    RaiseWithoutBet,
    #[error("acting out of turn")]
    NotYourTurn,
    #[error("no betting round in progress")]
    HandOver,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("seat {0} does not exist")]
    InvalidSeat(usize),
    #[error("no seat has chips; the game cannot continue")]
    UnplayableState,
    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Everything a policy may look at when deciding its action. Private cards
/// are limited to the acting seat's own hand.
#[derive(Debug, Clone)]
pub struct DecisionSnapshot {
    pub seat: usize,
    pub stack: Chips,
    /// Chips this seat has committed on the current street.
    pub bet: Chips,
    pub pot: Chips,
    pub current_bet: Chips,
    pub active_players: usize,
    /// Chips needed to call, capped at the stack.
    pub call_amount: Chips,
    /// Smallest legal raise target (going all-in for less is still allowed).
    pub min_raise_to: Chips,
    pub can_check: bool,
    pub big_blind: Chips,
    pub hole: HoleCards,
    pub community: Vec<Card>,
    pub street: Street,
}

/// One table's betting engine, generic over where the cards come from and
/// who watches the action.
pub struct BettingEngine<D: Dealer, R: Renderer> {
    table: TableState,
    dealer: D,
    renderer: R,
    small_blind: Chips,
    big_blind: Chips,
    winners: Vec<usize>,
}

impl<D: Dealer, R: Renderer> BettingEngine<D, R> {
    pub fn new(
        seats: usize,
        starting_stack: Chips,
        small_blind: Chips,
        big_blind: Chips,
        dealer: D,
        renderer: R,
    ) -> Self {
        Self {
            table: TableState::new(seats, starting_stack),
            dealer,
            renderer,
            small_blind,
            big_blind,
            winners: Vec::new(),
        }
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// Winners of the last completed hand, in seat order.
    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// Deal a fresh hand, post blinds and hand the action to the first seat
    /// after the big blind. Seats without chips sit out.
    pub fn start_new_hand(&mut self) -> Result<(), EngineError> {
        let seats = self.table.seats();
        let in_hand: Vec<bool> = self.table.stacks.iter().map(|&s| s > 0).collect();
        if !in_hand.iter().any(|&f| f) {
            return Err(EngineError::UnplayableState);
        }

        self.dealer.deal_hole(seats, &in_hand)?;
        for seat in 0..seats {
            self.table.folded[seat] = !in_hand[seat];
            self.table.bets[seat] = 0;
            self.table.has_acted[seat] = false;
        }
        self.table.pot = 0;
        self.table.current_bet = 0;
        self.table.street = Street::Preflop;
        self.winners.clear();

        // Blinds sit at the two seats after the button. A short stack posts
        // what it has and is all-in.
        let sb = (self.table.dealer + 1) % seats;
        let bb = (self.table.dealer + 2) % seats;
        // The bet to match is what the big blind actually posted, which is
        // short of the nominal blind when the seat is nearly broke. A short
        // big blind must never leave the small blind's post unmatched.
        let sb_posted = self.table.commit(sb, self.small_blind);
        let bb_posted = self.table.commit(bb, self.big_blind);
        self.table.current_bet = bb_posted.max(sb_posted);
        self.table.last_raiser = Some(bb);

        if self.table.active_players() == 1 {
            let lone = (0..seats).find(|&s| !self.table.folded[s]).unwrap_or(0);
            self.award_entire_pot(lone);
            return Ok(());
        }

        match self.next_actionable(bb) {
            Some(seat) => {
                self.table.current = seat;
                self.emit_view();
            }
            None => {
                // Everyone is all-in from the blinds; run the board out.
                self.end_betting_round()?;
            }
        }
        Ok(())
    }

    /// Decision context for a seat. Only valid mid-betting-round.
    pub fn snapshot(&self, seat: usize) -> Result<DecisionSnapshot, EngineError> {
        if seat >= self.table.seats() {
            return Err(EngineError::InvalidSeat(seat));
        }
        if !self.table.street.is_betting() {
            return Err(IllegalAction::HandOver.into());
        }
        let hole = self
            .dealer
            .player_hand(seat)
            .ok_or(DealError::MissingHand(seat))?;
        let bet = self.table.bets[seat];
        let stack = self.table.stacks[seat];
        let owed = self.table.current_bet.saturating_sub(bet);
        Ok(DecisionSnapshot {
            seat,
            stack,
            bet,
            pot: self.table.pot,
            current_bet: self.table.current_bet,
            active_players: self.table.active_players(),
            call_amount: owed.min(stack),
            min_raise_to: self.table.current_bet + self.big_blind,
            can_check: owed == 0,
            big_blind: self.big_blind,
            hole,
            community: self.dealer.community_cards().to_vec(),
            street: self.table.street,
        })
    }

    /// Apply one action for the seat whose turn it is, then move the hand
    /// forward: pass the turn, close the street, run the board out or reach
    /// showdown as the table dictates.
    pub fn apply(&mut self, seat: usize, action: Action) -> Result<(), EngineError> {
        if seat >= self.table.seats() {
            return Err(EngineError::InvalidSeat(seat));
        }
        if !self.table.street.is_betting() {
            return Err(IllegalAction::HandOver.into());
        }
        if seat != self.table.current {
            return Err(IllegalAction::NotYourTurn.into());
        }

        match action {
            Action::Fold => {
                self.table.folded[seat] = true;
                self.table.has_acted[seat] = true;
                if self.table.active_players() == 1 {
                    let lone = (0..self.table.seats())
                        .find(|&s| !self.table.folded[s])
                        .unwrap_or(seat);
                    self.award_entire_pot(lone);
                    return Ok(());
                }
            }
            Action::Check => {
                if self.table.bets[seat] != self.table.current_bet {
                    return Err(IllegalAction::CheckFacingBet.into());
                }
                self.table.has_acted[seat] = true;
            }
            Action::Call => {
                let owed = self.table.current_bet.saturating_sub(self.table.bets[seat]);
                self.table.commit(seat, owed);
                self.table.has_acted[seat] = true;
            }
            Action::Bet(amount) => {
                if self.table.current_bet > 0 {
                    return Err(IllegalAction::BetOverStandingBet.into());
                }
                let amount = amount.max(self.big_blind);
                self.table.commit(seat, amount);
                self.reopen_action(seat);
            }
            Action::Raise(target) => {
                if self.table.current_bet == 0 {
                    return Err(IllegalAction::RaiseWithoutBet.into());
                }
                let target = target.max(self.table.current_bet + self.big_blind);
                let add = target.saturating_sub(self.table.bets[seat]);
                self.table.commit(seat, add);
                self.reopen_action(seat);
            }
        }

        self.progress()
    }

    /// A bet or raise puts everyone else back to act. The bet-to-match only
    /// ever moves up, so an all-in for less than the minimum cannot lower it.
    fn reopen_action(&mut self, seat: usize) {
        self.table.current_bet = self.table.current_bet.max(self.table.bets[seat]);
        self.table.last_raiser = Some(seat);
        for s in 0..self.table.seats() {
            self.table.has_acted[s] = s == seat;
        }
    }

    fn progress(&mut self) -> Result<(), EngineError> {
        if !self.table.street.is_betting() {
            return Ok(());
        }
        if self.round_complete() {
            return self.end_betting_round();
        }
        match self.next_actionable(self.table.current) {
            Some(seat) => {
                self.table.current = seat;
                self.emit_view();
                Ok(())
            }
            None => {
                log::warn!(
                    "no actionable seat on {}; closing betting round",
                    self.table.street
                );
                self.end_betting_round()
            }
        }
    }

    /// A street is settled when every seat still able to act has acted since
    /// the last bet or raise and matched it. With nobody able to act the
    /// street settles immediately.
    fn round_complete(&self) -> bool {
        for s in 0..self.table.seats() {
            if !self.table.can_act(s) {
                continue;
            }
            if !self.table.has_acted[s] || self.table.bets[s] != self.table.current_bet {
                return false;
            }
        }
        true
    }

    /// Next seat after `from` (one full lap) that can still act.
    fn next_actionable(&self, from: usize) -> Option<usize> {
        let seats = self.table.seats();
        (1..=seats)
            .map(|off| (from + off) % seats)
            .find(|&s| self.table.can_act(s))
    }

    /// How many seats can still take an action this hand.
    fn actionable_seats(&self) -> usize {
        (0..self.table.seats()).filter(|&s| self.table.can_act(s)).count()
    }

    fn end_betting_round(&mut self) -> Result<(), EngineError> {
        loop {
            let next = match self.table.street {
                Street::Preflop => {
                    self.dealer.deal_flop()?;
                    Street::Flop
                }
                Street::Flop => {
                    self.dealer.deal_turn()?;
                    Street::Turn
                }
                Street::Turn => {
                    self.dealer.deal_river()?;
                    Street::River
                }
                Street::River => {
                    self.table.street = Street::Showdown;
                    return self.resolve_showdown();
                }
                Street::Showdown | Street::Complete => return Ok(()),
            };
            self.table.start_street(next);
            log::debug!("dealt {}; pot {}", next, self.table.pot);

            if self.actionable_seats() > 1 {
                if let Some(seat) = self.next_actionable(self.table.dealer) {
                    self.table.current = seat;
                    self.emit_view();
                    return Ok(());
                }
            }
            // One or zero seats can act, so no more betting is possible;
            // keep dealing until the board is complete.
            self.emit_view();
        }
    }

    fn resolve_showdown(&mut self) -> Result<(), EngineError> {
        let board = self.dealer.community_cards().to_vec();
        let mut revealed: Vec<(usize, HoleCards)> = Vec::new();
        let mut evals: Vec<(usize, HandEval)> = Vec::new();
        for seat in 0..self.table.seats() {
            if self.table.folded[seat] {
                continue;
            }
            let hole = self
                .dealer
                .player_hand(seat)
                .ok_or(DealError::MissingHand(seat))?;
            revealed.push((seat, hole));
            evals.push((seat, best_hand_value(&hole, &board)?));
        }

        let best = evals
            .iter()
            .map(|&(_, e)| e)
            .max()
            .ok_or(EngineError::UnplayableState)?;
        self.winners = evals
            .iter()
            .filter(|&&(_, e)| e == best)
            .map(|&(s, _)| s)
            .collect();

        // Even split; the odd chips go to the first winner in seat order.
        let pot = self.table.pot;
        let share = pot / self.winners.len() as Chips;
        let remainder = pot % self.winners.len() as Chips;
        for (i, &seat) in self.winners.iter().enumerate() {
            let mut won = share;
            if i == 0 {
                won += remainder;
            }
            self.table.stacks[seat] += won;
        }
        self.table.pot = 0;
        self.table.street = Street::Complete;

        let winners = self.winners.clone();
        log::debug!("showdown: pot {} to seats {:?}", pot, winners);
        self.renderer.showdown(&revealed, &winners);
        self.emit_view();
        self.rotate_button();
        Ok(())
    }

    /// Hand the whole pot to one seat without a showdown.
    fn award_entire_pot(&mut self, seat: usize) {
        self.table.stacks[seat] += self.table.pot;
        self.table.pot = 0;
        self.table.street = Street::Complete;
        self.winners = vec![seat];
        self.emit_view();
        self.rotate_button();
    }

    /// Move the button to the next seat with chips. If no seat has chips the
    /// button stays put and the next hand reports `UnplayableState`.
    fn rotate_button(&mut self) {
        let seats = self.table.seats();
        let next = (1..=seats)
            .map(|off| (self.table.dealer + off) % seats)
            .find(|&s| self.table.stacks[s] > 0);
        if let Some(next) = next {
            self.table.dealer = next;
        }
    }

    fn emit_view(&mut self) {
        let view = TableView {
            pot: self.table.pot,
            stacks: self.table.stacks.clone(),
            bets: self.table.bets.clone(),
            folded: self.table.folded.clone(),
            community: self.dealer.community_cards().to_vec(),
            current: self.table.current,
            dealer: self.table.dealer,
            street: self.table.street,
        };
        self.renderer.table_updated(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dealer::DeckDealer;
    use crate::render::NullRenderer;

    fn engine(seats: usize, stack: Chips) -> BettingEngine<DeckDealer, NullRenderer> {
        BettingEngine::new(seats, stack, 5, 10, DeckDealer::seeded(42), NullRenderer)
    }

    #[test]
    fn blinds_posted_and_first_actor_after_big_blind() {
        let mut e = engine(4, 1000);
        e.start_new_hand().unwrap();
        let t = e.table();
        assert_eq!(t.bet(1), 5, "small blind at dealer + 1");
        assert_eq!(t.bet(2), 10, "big blind at dealer + 2");
        assert_eq!(t.pot(), 15);
        assert_eq!(t.current_bet(), 10);
        assert_eq!(t.current(), 3);
        assert_eq!(t.street(), Street::Preflop);
        assert_eq!(t.last_raiser(), Some(2));
    }

    #[test]
    fn bet_and_calls_close_the_street() {
        let mut e = engine(4, 1000);
        e.start_new_hand().unwrap();
        for seat in [3, 0, 1] {
            e.apply(seat, Action::Call).unwrap();
        }
        assert_eq!(e.table().street(), Street::Preflop, "big blind still has the option");
        e.apply(2, Action::Check).unwrap();
        assert_eq!(e.table().street(), Street::Flop);
        assert_eq!(e.table().pot(), 40);
        assert_eq!(e.table().current_bet(), 0);
    }

    #[test]
    fn check_facing_bet_is_rejected_and_turn_unchanged() {
        let mut e = engine(4, 1000);
        e.start_new_hand().unwrap();
        let err = e.apply(3, Action::Check).unwrap_err();
        assert_eq!(err, EngineError::Illegal(IllegalAction::CheckFacingBet));
        assert_eq!(e.table().current(), 3);
    }

    #[test]
    fn acting_out_of_turn_is_rejected() {
        let mut e = engine(4, 1000);
        e.start_new_hand().unwrap();
        assert_eq!(
            e.apply(0, Action::Call).unwrap_err(),
            EngineError::Illegal(IllegalAction::NotYourTurn)
        );
        assert_eq!(e.snapshot(9).unwrap_err(), EngineError::InvalidSeat(9));
    }

    #[test]
    fn folds_to_one_award_pot_without_showdown() {
        let mut e = engine(3, 500);
        e.start_new_hand().unwrap();
        // Dealer is seat 0, blinds 1 and 2, seat 0 acts first.
        e.apply(0, Action::Fold).unwrap();
        e.apply(1, Action::Fold).unwrap();
        assert_eq!(e.table().street(), Street::Complete);
        assert_eq!(e.winners(), &[2]);
        assert_eq!(e.table().stack(2), 505, "big blind collects both blinds");
        assert_eq!(e.table().pot(), 0);
    }

    #[test]
    fn raise_reopens_action_for_callers() {
        let mut e = engine(3, 1000);
        e.start_new_hand().unwrap();
        e.apply(0, Action::Call).unwrap();
        e.apply(1, Action::Raise(40)).unwrap();
        // Seat 0 already called once but faces the raise again.
        assert_eq!(e.table().street(), Street::Preflop);
        e.apply(2, Action::Call).unwrap();
        e.apply(0, Action::Call).unwrap();
        assert_eq!(e.table().street(), Street::Flop);
        assert_eq!(e.table().pot(), 120);
    }

    #[test]
    fn raise_below_minimum_is_lifted_to_minimum() {
        let mut e = engine(3, 1000);
        e.start_new_hand().unwrap();
        e.apply(0, Action::Raise(11)).unwrap();
        assert_eq!(e.table().current_bet(), 20, "minimum raise is one big blind");
    }

    #[test]
    fn short_stack_call_goes_all_in_for_less() {
        let mut e = BettingEngine::new(4, 1000, 5, 10, DeckDealer::seeded(7), NullRenderer);
        e.table.stacks[0] = 30;
        e.start_new_hand().unwrap();
        e.apply(3, Action::Raise(100)).unwrap();
        e.apply(0, Action::Call).unwrap();
        assert_eq!(e.table().street(), Street::Preflop, "blinds still to act");
        assert_eq!(e.table().stack(0), 0);
        assert_eq!(e.table().bet(0), 30, "call capped at the short stack");
        assert!(e.table().is_all_in(0));
        assert_eq!(e.table().current(), 1);
    }

    #[test]
    fn short_big_blind_still_has_to_cover_the_small_blind() {
        let mut e = BettingEngine::new(3, 500, 10, 20, DeckDealer::seeded(13), NullRenderer);
        e.table.stacks[2] = 5;
        e.start_new_hand().unwrap();
        // Seat 2 posts its last 5, but the small blind's 10 still sets the price.
        assert_eq!(e.table().current_bet(), 10);
        assert!(e.table().is_all_in(2));
        assert_eq!(
            e.apply(0, Action::Check).unwrap_err(),
            EngineError::Illegal(IllegalAction::CheckFacingBet)
        );
        e.apply(0, Action::Call).unwrap();
        e.apply(1, Action::Check).unwrap();
        assert_eq!(e.table().street(), Street::Flop, "round closes without a stall");
        assert_eq!(e.table().pot(), 25);
    }

    #[test]
    fn bet_below_big_blind_is_floored() {
        let mut e = engine(3, 1000);
        e.start_new_hand().unwrap();
        for seat in [0, 1] {
            e.apply(seat, Action::Call).unwrap();
        }
        e.apply(2, Action::Check).unwrap();
        assert_eq!(e.table().street(), Street::Flop);
        let first = e.table().current();
        e.apply(first, Action::Bet(1)).unwrap();
        assert_eq!(e.table().current_bet(), 10);
    }

    #[test]
    fn button_skips_broke_seats() {
        let mut e = engine(3, 500);
        e.table.stacks[1] = 0;
        e.start_new_hand().unwrap();
        // Seat 1 sits out, so only seats 0 and 2 contest the hand.
        e.apply(0, Action::Fold).unwrap();
        assert_eq!(e.table().street(), Street::Complete);
        assert_eq!(e.winners(), &[2]);
        assert_eq!(e.table().dealer(), 2, "button passes over the empty stack");
    }

    #[test]
    fn unplayable_when_every_stack_is_empty() {
        let mut e = engine(2, 0);
        assert_eq!(e.start_new_hand().unwrap_err(), EngineError::UnplayableState);
    }

    #[test]
    fn snapshot_reports_call_amount_and_min_raise() {
        let mut e = engine(4, 1000);
        e.start_new_hand().unwrap();
        let snap = e.snapshot(3).unwrap();
        assert_eq!(snap.call_amount, 10);
        assert_eq!(snap.min_raise_to, 20);
        assert!(!snap.can_check);
        assert_eq!(snap.active_players, 4);
        assert_eq!(snap.street, Street::Preflop);
        assert!(snap.community.is_empty());
    }
}
