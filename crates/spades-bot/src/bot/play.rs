use super::{highest, lowest};
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::suit::Suit;
use spades_core::model::trick::best_card;
use std::cmp::Reverse;

pub struct PlayPlanner;

impl PlayPlanner {
    /// Picks a card by fixed priority: win the trick as cheaply as possible,
    /// else duck with the lowest card of the led suit, else trump low, else
    /// discard high from the longest suit.
    pub fn choose(
        hand: &Hand,
        led_suit: Option<Suit>,
        spades_broken: bool,
        trick_cards: &[Card],
    ) -> Option<Card> {
        let legal = hand.legal_moves(led_suit, spades_broken);
        let choice = pick(hand, &legal, led_suit, trick_cards)?;
        Some(enforce_unbroken_lead(
            hand,
            &legal,
            led_suit,
            spades_broken,
            choice,
        ))
    }
}

fn pick(
    hand: &Hand,
    legal: &[Card],
    led_suit: Option<Suit>,
    trick_cards: &[Card],
) -> Option<Card> {
    if let Some(led) = led_suit {
        let follow: Vec<Card> = legal.iter().copied().filter(|c| c.suit == led).collect();
        if !follow.is_empty() {
            if let Some(current) = best_card(trick_cards) {
                let winners = follow.iter().copied().filter(|c| c.beats(current, led));
                let cheapest_winner = lowest(winners);
                if cheapest_winner.is_some() {
                    return cheapest_winner;
                }
            }
            return lowest(follow);
        }
    }

    if let Some(spade) = lowest(legal.iter().copied().filter(|c| c.is_trump())) {
        return Some(spade);
    }

    discard(hand, legal)
}

fn discard(hand: &Hand, legal: &[Card]) -> Option<Card> {
    // Longest suit in the full hand; ties go to the earlier suit.
    let suit = Suit::ALL
        .into_iter()
        .filter(|suit| legal.iter().any(|c| c.suit == *suit))
        .max_by_key(|suit| (hand.count_suit(*suit), Reverse(suit.index())))?;
    highest(legal.iter().copied().filter(|c| c.suit == suit))
}

/// Swaps a spade lead for the lowest non-spade legal card while spades are
/// unbroken and the hand still holds another suit.
pub fn enforce_unbroken_lead(
    hand: &Hand,
    legal: &[Card],
    led_suit: Option<Suit>,
    spades_broken: bool,
    choice: Card,
) -> Card {
    if led_suit.is_some() || spades_broken || !choice.is_trump() || hand.is_all_trumps() {
        return choice;
    }
    lowest(legal.iter().copied().filter(|c| !c.is_trump())).unwrap_or(choice)
}
