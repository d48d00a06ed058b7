use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    /// All four seats in turn order, starting with `self`.
    pub fn turn_order(self) -> [Seat; 4] {
        let mut order = [self; 4];
        for i in 1..4 {
            order[i] = order[i - 1].next();
        }
        order
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Bot,
}

/// Who sits in a seat. Hands, bids and scores live in the round and match state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerProfile {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Bot,
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerProfile, Seat};

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::West.next(), Seat::North);
        assert_eq!(Seat::North.next(), Seat::East);
    }

    #[test]
    fn turn_order_starts_at_self() {
        assert_eq!(
            Seat::South.turn_order(),
            [Seat::South, Seat::West, Seat::North, Seat::East]
        );
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
        assert_eq!(Seat::from_index(4), None);
    }

    #[test]
    fn profiles_know_their_kind() {
        assert!(PlayerProfile::human("You").is_human());
        assert!(!PlayerProfile::bot("Alex").is_human());
    }
}
