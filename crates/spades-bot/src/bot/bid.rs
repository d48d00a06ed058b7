use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::rank::Rank;

pub const MIN_BOT_BID: u8 = 1;
pub const MAX_BOT_BID: u8 = 7;

const SHORT_SUIT_LEN: usize = 2;
const SHORT_SUIT_BONUS: f64 = 0.3;

/// Counts likely tricks from honours and trumps.
///
/// Spades are weighed first, then the side suits, each in hand order. The sum
/// is rounded half to even and clamped to 1..=7, so bots never bid nil.
pub struct BidEstimator;

impl BidEstimator {
    pub fn strength(hand: &Hand) -> f64 {
        let trumps = hand.iter().filter(|card| card.is_trump());
        let side = hand.iter().filter(|card| !card.is_trump());
        trumps
            .chain(side)
            .fold(0.0, |total, &card| total + card_weight(hand, card))
    }

    pub fn estimate(hand: &Hand) -> u8 {
        let rounded = Self::strength(hand).round_ties_even();
        let clamped = rounded.clamp(f64::from(MIN_BOT_BID), f64::from(MAX_BOT_BID));
        // In 1.0..=7.0 after the clamp.
        clamped as u8
    }
}

fn card_weight(hand: &Hand, card: Card) -> f64 {
    if card.is_trump() {
        return match card.rank {
            Rank::Ace => 1.2,
            Rank::King => 1.0,
            Rank::Queen => 0.8,
            Rank::Jack => 0.6,
            _ => 0.3,
        };
    }

    let base = match card.rank {
        Rank::Ace => 0.7,
        Rank::King => 0.5,
        Rank::Queen => 0.3,
        _ => 0.0,
    };
    // Short side suits run out early and leave room to trump.
    if hand.count_suit(card.suit) <= SHORT_SUIT_LEN {
        base + SHORT_SUIT_BONUS
    } else {
        base
    }
}
