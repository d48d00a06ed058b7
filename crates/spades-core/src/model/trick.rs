use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

/// Result of challenging the card currently winning a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contest {
    Holds,
    Overtaken,
}

/// Compares the card currently winning a trick against a later card.
pub fn compare(current: Card, challenger: Card, led_suit: Suit) -> Contest {
    if challenger.beats(current, led_suit) {
        Contest::Overtaken
    } else {
        Contest::Holds
    }
}

/// Best card among `cards` played in order; the first card sets the led suit.
pub fn best_card(cards: &[Card]) -> Option<Card> {
    let (&first, rest) = cards.split_first()?;
    Some(rest.iter().fold(first, |best, &card| {
        match compare(best, card, first.suit) {
            Contest::Holds => best,
            Contest::Overtaken => card,
        }
    }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
    AlreadyPlayed(Seat),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "{seat} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn next_to_play(&self) -> Option<Seat> {
        if self.is_complete() {
            return None;
        }
        Some(
            self.plays
                .last()
                .map(|play| play.seat.next())
                .unwrap_or(self.leader),
        )
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        let Some(expected) = self.next_to_play() else {
            return Err(TrickError::TrickComplete);
        };

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// The play currently taking the trick, even if it is not finished yet.
    pub fn winning_play(&self) -> Option<Play> {
        let (&first, rest) = self.plays.split_first()?;
        let led = first.card.suit;
        Some(rest.iter().fold(first, |best, &play| {
            match compare(best.card, play.card, led) {
                Contest::Holds => best,
                Contest::Overtaken => play,
            }
        }))
    }

    pub fn winner(&self) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        self.winning_play().map(|play| play.seat)
    }
}
