use crate::model::player::Seat;
use serde::{Deserialize, Serialize};

pub const POINTS_PER_TRICK: i32 = 10;
pub const NIL_POINTS: i32 = 100;
pub const BAG_LIMIT: u8 = 10;
pub const BAG_PENALTY: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidOutcome {
    Made { overtricks: u8 },
    Missed { short_by: u8 },
    NilMade,
    NilFailed,
}

/// One seat's scoring for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub outcome: BidOutcome,
    /// Total change to the seat's score, bag penalties included.
    pub delta: i32,
    pub bags_after: u8,
    pub bag_penalties: u8,
}

/// Scores a single seat. Pure in its inputs and the nil setting.
///
/// With nil enabled a zero bid is worth +/-100 on its own. Otherwise a made
/// bid earns ten per bid trick and banks overtricks as bags, and a missed bid
/// loses ten per bid trick. Every ten bags then cost 100 points.
pub fn score_player(bid: u8, tricks_won: u8, bags_before: u8, nil_enabled: bool) -> RoundScore {
    let (outcome, mut delta, mut bags) = if nil_enabled && bid == 0 {
        if tricks_won == 0 {
            (BidOutcome::NilMade, NIL_POINTS, u32::from(bags_before))
        } else {
            (BidOutcome::NilFailed, -NIL_POINTS, u32::from(bags_before))
        }
    } else if tricks_won >= bid {
        let overtricks = tricks_won - bid;
        (
            BidOutcome::Made { overtricks },
            POINTS_PER_TRICK * i32::from(bid),
            u32::from(bags_before) + u32::from(overtricks),
        )
    } else {
        (
            BidOutcome::Missed {
                short_by: bid - tricks_won,
            },
            -POINTS_PER_TRICK * i32::from(bid),
            u32::from(bags_before),
        )
    };

    let mut bag_penalties = 0u8;
    while bags >= u32::from(BAG_LIMIT) {
        bags -= u32::from(BAG_LIMIT);
        delta -= BAG_PENALTY;
        bag_penalties += 1;
    }

    RoundScore {
        outcome,
        delta,
        bags_after: bags as u8,
        bag_penalties,
    }
}

/// Cumulative score and bag count per seat across the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [i32; 4],
    bags: [u8; 4],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            totals: [0; 4],
            bags: [0; 4],
        }
    }

    pub fn score(&self, seat: Seat) -> i32 {
        self.totals[seat.index()]
    }

    pub fn bags(&self, seat: Seat) -> u8 {
        self.bags[seat.index()]
    }

    pub fn set_score(&mut self, seat: Seat, points: i32) {
        self.totals[seat.index()] = points;
    }

    pub fn apply(&mut self, seat: Seat, score: &RoundScore) {
        self.totals[seat.index()] += score.delta;
        self.bags[seat.index()] = score.bags_after;
    }

    pub fn max_score(&self) -> i32 {
        self.totals.iter().copied().max().unwrap_or(0)
    }

    /// Every seat sharing the highest score, in seat order.
    pub fn leaders(&self) -> Vec<Seat> {
        let best = self.max_score();
        Seat::LOOP
            .iter()
            .copied()
            .filter(|seat| self.score(*seat) == best)
            .collect()
    }

    pub fn has_reached(&self, target: i32) -> bool {
        self.totals.iter().any(|&total| total >= target)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
