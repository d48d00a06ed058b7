use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use spades_bot::{
    BidEstimator, HeuristicPolicy, NullObserver, PlayContext, PlayPlanner, Policy, SeatAgent,
    Table, TableObserver,
};
use spades_core::game::match_state::{GameResult, MatchState};
use spades_core::game::rules::GameRules;
use spades_core::model::card::Card;
use spades_core::model::deck::Deck;
use spades_core::model::player::Seat;
use spades_core::model::round::RoundState;

fn bots() -> [SeatAgent; 4] {
    ["You", "Alex", "Blake", "Casey"].map(SeatAgent::bot)
}

#[derive(Default)]
struct Transcript {
    events: Vec<String>,
}

impl TableObserver for Transcript {
    fn bid_placed(&mut self, seat: Seat, bid: u8) {
        self.events.push(format!("bid {seat} {bid}"));
    }

    fn card_played(&mut self, seat: Seat, card: Card) {
        self.events.push(format!("play {seat} {card}"));
    }

    fn game_over(&mut self, result: &GameResult) {
        self.events.push(format!("over {:?} {}", result.winners, result.score));
    }
}

#[test]
fn seeded_bot_games_are_reproducible() {
    for seed in [3u64, 17, 2024] {
        let mut first = Transcript::default();
        let mut second = Transcript::default();
        Table::new(MatchState::with_seed(GameRules::default(), seed).unwrap(), bots())
            .run(&mut first)
            .unwrap();
        Table::new(MatchState::with_seed(GameRules::default(), seed).unwrap(), bots())
            .run(&mut second)
            .unwrap();
        assert_eq!(first.events, second.events, "seed {seed}");
        assert!(first.events.last().unwrap().starts_with("over"));
    }
}

#[test]
fn bot_games_reach_the_target_with_top_scores_as_winners() {
    for seed in 0u64..12 {
        let rules = GameRules {
            target_score: 120,
            ..GameRules::default()
        };
        let mut table = Table::new(MatchState::with_seed(rules, seed).unwrap(), bots());
        let result = table.run(&mut NullObserver).unwrap();
        let scores = table.state().scores();
        let best = Seat::LOOP.iter().map(|s| scores.score(*s)).max().unwrap();
        assert!(best >= 120, "seed {seed}");
        assert_eq!(result.score, best);
        for seat in Seat::LOOP {
            assert_eq!(result.winners.contains(&seat), scores.score(seat) == best);
        }
    }
}

#[test]
fn bot_bids_stay_within_one_to_seven() {
    for seed in 0u64..100 {
        for hand in Deck::shuffled_with_seed(seed).deal() {
            assert!((1..=7).contains(&BidEstimator::estimate(&hand)));
        }
    }
}

#[test]
fn bot_choices_are_always_legal() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut policy = HeuristicPolicy::new();
    for seed in 0u64..40 {
        let mut round = RoundState::deal(Deck::shuffled_with_seed(seed), Seat::South);
        while let Some(seat) = round.bidder() {
            round.place_bid(seat, 3, false).unwrap();
        }
        while let Some(seat) = round.expected_to_play() {
            let legal = round.legal_moves(seat);
            let ctx = PlayContext {
                seat,
                hand: round.hand(seat),
                round: &round,
                legal_moves: &legal,
            };
            let choice = policy.choose_play(&ctx).unwrap();
            assert!(legal.contains(&choice), "seed {seed}: {choice} not legal");

            // Mix in random play so bots face broken and unbroken spades alike.
            let card = if seat == Seat::North {
                *legal.choose(&mut rng).unwrap()
            } else {
                choice
            };
            round.play_card(seat, card).unwrap();
        }
    }
}

#[test]
fn planner_never_leads_spades_while_unbroken() {
    for seed in 0u64..200 {
        for hand in Deck::shuffled_with_seed(seed).deal() {
            let choice = PlayPlanner::choose(&hand, None, false, &[]).unwrap();
            if !hand.is_all_trumps() {
                assert!(!choice.is_trump(), "seed {seed}: led {choice}");
            }
        }
    }
}
