use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A playing card. Field order gives the derived ordering: suit group first,
/// then ascending rank, which is the canonical hand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub const fn is_trump(self) -> bool {
        self.suit.is_trump()
    }

    /// Whether `self`, played after `other`, takes over a trick led in `led_suit`.
    ///
    /// A spade beats any non-spade and spades compare by rank. Otherwise only a
    /// card of the led suit can win, and it beats anything off-suit. Two
    /// off-suit non-spades never beat each other.
    pub fn beats(self, other: Card, led_suit: Suit) -> bool {
        match (self.is_trump(), other.is_trump()) {
            (true, false) => true,
            (true, true) => self.rank > other.rank,
            (false, true) => false,
            (false, false) => {
                if self.suit != led_suit {
                    return false;
                }
                other.suit != led_suit || self.rank > other.rank
            }
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
