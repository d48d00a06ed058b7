use core::fmt;
use serde::{Deserialize, Serialize};

/// Suits in display order. Spades lead the order because they are trump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const TRUMP: Suit = Suit::Spades;

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Spades),
            1 => Some(Suit::Hearts),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_trump(self) -> bool {
        matches!(self, Suit::Spades)
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn only_spades_are_trump() {
        let trumps: Vec<_> = Suit::ALL.iter().filter(|s| s.is_trump()).collect();
        assert_eq!(trumps, vec![&Suit::Spades]);
        assert_eq!(Suit::TRUMP, Suit::Spades);
    }

    #[test]
    fn ordering_puts_spades_first() {
        let mut suits = vec![Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];
        suits.sort();
        assert_eq!(suits, Suit::ALL.to_vec());
    }

    #[test]
    fn index_roundtrip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_index(suit.index()), Some(suit));
        }
        assert_eq!(Suit::from_index(4), None);
    }
}
