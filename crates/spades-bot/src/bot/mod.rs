mod bid;
mod play;

pub use bid::{BidEstimator, MAX_BOT_BID, MIN_BOT_BID};
pub use play::{PlayPlanner, enforce_unbroken_lead};

use spades_core::model::card::Card;

pub(crate) fn lowest(cards: impl IntoIterator<Item = Card>) -> Option<Card> {
    cards.into_iter().min_by_key(|card| card.rank)
}

pub(crate) fn highest(cards: impl IntoIterator<Item = Card>) -> Option<Card> {
    cards.into_iter().max_by_key(|card| card.rank)
}
