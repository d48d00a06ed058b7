use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use std::fmt;
use std::vec::Vec;

pub const TRICKS_PER_ROUND: usize = 13;
pub const MAX_BID: u8 = 13;

#[derive(Debug, Clone)]
pub struct RoundState {
    dealer: Seat,
    hands: [Hand; 4],
    bids: [Option<u8>; 4],
    tricks_won: [u8; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    phase: RoundPhase,
    spades_broken: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Bidding,
    Playing,
    Complete,
}

impl RoundState {
    pub fn deal(deck: Deck, dealer: Seat) -> Self {
        Self::from_hands(deck.deal(), dealer)
    }

    /// Starts a round from prepared hands; bidding opens left of the dealer.
    pub fn from_hands(hands: [Hand; 4], dealer: Seat) -> Self {
        Self {
            dealer,
            hands,
            bids: [None; 4],
            tricks_won: [0; 4],
            current_trick: Trick::new(dealer.next()),
            trick_history: Vec::with_capacity(TRICKS_PER_ROUND),
            phase: RoundPhase::Bidding,
            spades_broken: false,
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Complete
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn bid(&self, seat: Seat) -> Option<u8> {
        self.bids[seat.index()]
    }

    pub fn tricks_won(&self, seat: Seat) -> u8 {
        self.tricks_won[seat.index()]
    }

    pub fn trick_counts(&self) -> [u8; 4] {
        self.tricks_won
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn spades_broken(&self) -> bool {
        self.spades_broken
    }

    /// Cards in hands, in the trick on the table and in finished tricks.
    pub fn cards_accounted(&self) -> usize {
        let in_hands: usize = self.hands.iter().map(Hand::len).sum();
        in_hands + self.current_trick.plays().len() + 4 * self.trick_history.len()
    }

    pub fn bidder(&self) -> Option<Seat> {
        if self.phase != RoundPhase::Bidding {
            return None;
        }
        let placed = self.bids.iter().filter(|bid| bid.is_some()).count();
        self.dealer.next().turn_order().get(placed).copied()
    }

    pub fn place_bid(&mut self, seat: Seat, bid: u8, allow_nil: bool) -> Result<(), BidError> {
        let Some(expected) = self.bidder() else {
            return Err(BidError::NotBidding);
        };

        if self.bids[seat.index()].is_some() {
            return Err(BidError::AlreadyBid(seat));
        }

        if expected != seat {
            return Err(BidError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        if bid > MAX_BID {
            return Err(BidError::OutOfRange(bid));
        }

        if bid == 0 && !allow_nil {
            return Err(BidError::NilDisabled);
        }

        self.bids[seat.index()] = Some(bid);
        if self.bids.iter().all(Option::is_some) {
            self.phase = RoundPhase::Playing;
        }
        Ok(())
    }

    pub fn expected_to_play(&self) -> Option<Seat> {
        if self.phase != RoundPhase::Playing {
            return None;
        }
        self.current_trick.next_to_play()
    }

    pub fn legal_moves(&self, seat: Seat) -> Vec<Card> {
        self.hands[seat.index()].legal_moves(self.current_trick.lead_suit(), self.spades_broken)
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        if self.phase != RoundPhase::Playing {
            return Err(PlayError::NotInPlayPhase);
        }

        let hand = &self.hands[seat.index()];
        if !hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        if let Some(expected) = self.current_trick.next_to_play() {
            if expected != seat {
                return Err(PlayError::OutOfTurn {
                    expected,
                    actual: seat,
                });
            }
        }

        let lead_suit = self.current_trick.lead_suit();
        match lead_suit {
            Some(suit) => {
                if card.suit != suit && hand.has_suit(suit) {
                    return Err(PlayError::MustFollowSuit(suit));
                }
            }
            None => {
                if card.is_trump() && !self.spades_broken && !hand.is_all_trumps() {
                    return Err(PlayError::SpadesNotBroken);
                }
            }
        }

        // Move the card from the hand into the trick as one step.
        let card = self.hands[seat.index()]
            .take(card)
            .ok_or(PlayError::CardNotInHand(card))?;
        if let Err(err) = self.current_trick.play(seat, card) {
            self.hands[seat.index()].add(card);
            return Err(PlayError::Trick(err));
        }

        if card.is_trump() && lead_suit.is_some_and(|suit| !suit.is_trump()) {
            self.spades_broken = true;
        }

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played);
        }

        let winning = self
            .current_trick
            .winning_play()
            .ok_or(PlayError::Unresolved)?;
        self.tricks_won[winning.seat.index()] += 1;
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winning.seat));
        self.trick_history.push(finished);
        if self.trick_history.len() == TRICKS_PER_ROUND {
            self.phase = RoundPhase::Complete;
        }

        Ok(PlayOutcome::TrickCompleted {
            winner: winning.seat,
            winning_card: winning.card,
            trick_number: self.trick_history.len(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted {
        winner: Seat,
        winning_card: Card,
        trick_number: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    NotBidding,
    OutOfTurn { expected: Seat, actual: Seat },
    AlreadyBid(Seat),
    OutOfRange(u8),
    NilDisabled,
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::NotBidding => write!(f, "bidding is closed"),
            BidError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to bid next but got {actual}")
            }
            BidError::AlreadyBid(seat) => write!(f, "{seat} has already bid this round"),
            BidError::OutOfRange(bid) => {
                write!(f, "bid {bid} is outside 0-{MAX_BID}")
            }
            BidError::NilDisabled => write!(f, "nil bids are disabled"),
        }
    }
}

impl std::error::Error for BidError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    CardNotInHand(Card),
    OutOfTurn { expected: Seat, actual: Seat },
    MustFollowSuit(Suit),
    SpadesNotBroken,
    Unresolved,
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInPlayPhase => write!(f, "cards can only be played after bidding"),
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {}", suit.name()),
            PlayError::SpadesNotBroken => write!(f, "spades cannot be led until broken"),
            PlayError::Unresolved => write!(f, "completed trick has no winner"),
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}
