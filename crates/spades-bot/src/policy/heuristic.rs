use super::{BidContext, PlayContext, Policy, PolicyError};
use crate::bot::{BidEstimator, PlayPlanner};
use spades_core::model::card::Card;
use spades_core::model::suit::Suit;
use tracing::{Level, event};

/// Adapter that runs `BidEstimator` and `PlayPlanner` behind the `Policy` trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn choose_bid(&mut self, ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
        let strength = BidEstimator::strength(ctx.hand);
        let bid = BidEstimator::estimate(ctx.hand);
        event!(
            target: "spades_bot::bid",
            Level::INFO,
            seat = %ctx.seat,
            strength,
            spades = ctx.hand.count_suit(Suit::TRUMP),
            bid
        );
        Ok(bid)
    }

    fn choose_play(&mut self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
        let trick_cards = ctx.trick_cards();
        let led_suit = ctx.round.current_trick().lead_suit();
        let spades_broken = ctx.round.spades_broken();
        let choice = PlayPlanner::choose(ctx.hand, led_suit, spades_broken, &trick_cards)
            .ok_or(PolicyError::NoLegalMove)?;
        log_play_decision(ctx, &trick_cards, choice);
        Ok(choice)
    }
}

fn log_play_decision(ctx: &PlayContext<'_>, trick_cards: &[Card], chosen: Card) {
    if !tracing::enabled!(target: "spades_bot::play", Level::INFO) {
        return;
    }

    let legal_preview = ctx
        .legal_moves
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    event!(
        target: "spades_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        legal_count = ctx.legal_moves.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        spades_broken = ctx.round.spades_broken(),
        trick_cards = trick_cards.len(),
    );
}
