mod heuristic;

pub use heuristic::HeuristicPolicy;

use spades_core::game::rules::GameRules;
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::player::Seat;
use spades_core::model::round::{BidError, PlayError, RoundState};
use std::fmt;
use std::io;
use thiserror::Error;

/// What a seat can see when asked for a bid.
pub struct BidContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub rules: &'a GameRules,
}

impl BidContext<'_> {
    pub fn min_bid(&self) -> u8 {
        self.rules.min_bid()
    }
}

/// What a seat can see when asked for a card.
pub struct PlayContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub round: &'a RoundState,
    pub legal_moves: &'a [Card],
}

impl PlayContext<'_> {
    /// Cards already on the table in the current trick, in play order.
    pub fn trick_cards(&self) -> Vec<Card> {
        self.round.current_trick().cards()
    }
}

/// An engine refusal handed back to the policy that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Bid(BidError),
    Play(PlayError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Bid(err) => write!(f, "bid rejected: {err}"),
            Rejection::Play(err) => write!(f, "play rejected: {err}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("input closed before a choice was made")]
    InputClosed,
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("no legal move available")]
    NoLegalMove,
}

/// Decision interface shared by bots and interactive players.
pub trait Policy {
    fn choose_bid(&mut self, ctx: &BidContext<'_>) -> Result<u8, PolicyError>;

    fn choose_play(&mut self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError>;

    /// Called when the engine refuses a choice. Return `true` to be asked again.
    fn handle_rejection(&mut self, _rejection: &Rejection) -> bool {
        false
    }
}
