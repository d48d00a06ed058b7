use crate::policy::{BidContext, HeuristicPolicy, PlayContext, Policy, PolicyError, Rejection};
use spades_core::game::match_state::{
    GameResult, MatchError, MatchState, RoundEnd, RoundReport, SeatScore,
};
use spades_core::model::card::Card;
use spades_core::model::player::{PlayerProfile, Seat};
use spades_core::model::round::{PlayError, PlayOutcome, RoundState};
use spades_core::model::score::ScoreBoard;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A seat at the table: who sits there and how they decide.
pub struct SeatAgent {
    pub profile: PlayerProfile,
    pub policy: Box<dyn Policy>,
}

impl SeatAgent {
    pub fn new(profile: PlayerProfile, policy: impl Policy + 'static) -> Self {
        Self {
            profile,
            policy: Box::new(policy),
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self::new(PlayerProfile::bot(name), HeuristicPolicy::new())
    }
}

/// One-way notifications about table progress. Every method defaults to a no-op.
pub trait TableObserver {
    fn round_started(&mut self, _round_number: u32, _dealer: Seat, _round: &RoundState) {}

    fn bid_placed(&mut self, _seat: Seat, _bid: u8) {}

    fn trick_started(&mut self, _trick_number: usize, _leader: Seat) {}

    fn card_played(&mut self, _seat: Seat, _card: Card) {}

    fn trick_won(&mut self, _winner: Seat, _card: Card, _tricks_won: [u8; 4]) {}

    fn round_scored(&mut self, _line: &SeatScore) {}

    fn scoreboard(&mut self, _scores: &ScoreBoard) {}

    fn game_over(&mut self, _result: &GameResult) {}
}

pub struct NullObserver;

impl TableObserver for NullObserver {}

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error("{seat} could not decide: {source}")]
    Policy {
        seat: Seat,
        #[source]
        source: PolicyError,
    },
    #[error("{seat} made an illegal choice: {rejection}")]
    IllegalChoice { seat: Seat, rejection: Rejection },
}

/// Drives a `MatchState` to completion with one policy per seat.
pub struct Table {
    state: MatchState,
    agents: [SeatAgent; 4],
}

impl Table {
    pub fn new(state: MatchState, agents: [SeatAgent; 4]) -> Self {
        if state.rules().allow_blind_nil {
            warn!(
                target: "spades_bot::table",
                "blind nil is enabled but has no effect; blind bids are never offered"
            );
        }
        Self { state, agents }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn profile(&self, seat: Seat) -> &PlayerProfile {
        &self.agents[seat.index()].profile
    }

    pub fn run(&mut self, observer: &mut dyn TableObserver) -> Result<GameResult, TableError> {
        info!(
            target: "spades_bot::table",
            seed = self.state.seed(),
            target_score = self.state.rules().target_score,
            "game started"
        );
        loop {
            let report = self.play_round(observer)?;
            if let RoundEnd::GameOver(result) = report.end {
                info!(
                    target: "spades_bot::table",
                    winners = ?result.winners,
                    score = result.score,
                    rounds = report.round_number,
                    "game over"
                );
                observer.game_over(&result);
                return Ok(result);
            }
        }
    }

    /// Plays the current round from bidding through scoring.
    pub fn play_round(
        &mut self,
        observer: &mut dyn TableObserver,
    ) -> Result<RoundReport, TableError> {
        let round_number = self.state.round_number();
        let dealer = self.state.dealer();
        info!(
            target: "spades_bot::table",
            round = round_number,
            dealer = %dealer,
            "round started"
        );
        observer.round_started(round_number, dealer, self.state.round());

        self.run_bidding(observer)?;
        self.run_tricks(observer)?;

        let report = self.state.finish_round()?;
        for line in &report.seats {
            debug!(
                target: "spades_bot::table",
                seat = %line.seat,
                bid = line.bid,
                tricks = line.tricks_won,
                delta = line.score.delta,
                bags = line.score.bags_after,
                total = line.total,
                "round scored"
            );
            observer.round_scored(line);
        }
        observer.scoreboard(self.state.scores());
        Ok(report)
    }

    fn run_bidding(&mut self, observer: &mut dyn TableObserver) -> Result<(), TableError> {
        while let Some(seat) = self.state.round().bidder() {
            let bid = self.request_bid(seat)?;
            observer.bid_placed(seat, bid);
        }
        Ok(())
    }

    fn request_bid(&mut self, seat: Seat) -> Result<u8, TableError> {
        let Table { state, agents } = self;
        let agent = &mut agents[seat.index()];
        let allow_nil = state.rules().allow_nil;
        loop {
            let bid = {
                let ctx = BidContext {
                    seat,
                    hand: state.round().hand(seat),
                    rules: state.rules(),
                };
                agent
                    .policy
                    .choose_bid(&ctx)
                    .map_err(|source| TableError::Policy { seat, source })?
            };

            match state.round_mut().place_bid(seat, bid, allow_nil) {
                Ok(()) => return Ok(bid),
                Err(err) => {
                    let rejection = Rejection::Bid(err);
                    retry_or_fail(seat, agent.policy.as_mut(), rejection)?;
                }
            }
        }
    }

    fn run_tricks(&mut self, observer: &mut dyn TableObserver) -> Result<(), TableError> {
        while let Some(seat) = self.state.round().expected_to_play() {
            let round = self.state.round();
            if round.current_trick().plays().is_empty() {
                observer.trick_started(round.tricks_completed() + 1, seat);
            }

            let (card, outcome) = self.request_play(seat)?;
            observer.card_played(seat, card);

            if let PlayOutcome::TrickCompleted {
                winner,
                winning_card,
                trick_number,
            } = outcome
            {
                debug!(
                    target: "spades_bot::table",
                    trick = trick_number,
                    winner = %winner,
                    card = %winning_card,
                    "trick won"
                );
                observer.trick_won(winner, winning_card, self.state.round().trick_counts());
            }
        }
        Ok(())
    }

    fn request_play(&mut self, seat: Seat) -> Result<(Card, PlayOutcome), TableError> {
        let Table { state, agents } = self;
        let agent = &mut agents[seat.index()];
        loop {
            let card = {
                let round = state.round();
                let legal = round.legal_moves(seat);
                let ctx = PlayContext {
                    seat,
                    hand: round.hand(seat),
                    round,
                    legal_moves: &legal,
                };
                agent
                    .policy
                    .choose_play(&ctx)
                    .map_err(|source| TableError::Policy { seat, source })?
            };

            match state.round_mut().play_card(seat, card) {
                Ok(outcome) => return Ok((card, outcome)),
                Err(err @ PlayError::CardNotInHand(_)) => {
                    return Err(TableError::IllegalChoice {
                        seat,
                        rejection: Rejection::Play(err),
                    });
                }
                Err(err) => retry_or_fail(seat, agent.policy.as_mut(), Rejection::Play(err))?,
            }
        }
    }
}

fn retry_or_fail(
    seat: Seat,
    policy: &mut dyn Policy,
    rejection: Rejection,
) -> Result<(), TableError> {
    if policy.handle_rejection(&rejection) {
        warn!(
            target: "spades_bot::table",
            seat = %seat,
            %rejection,
            "choice rejected, asking again"
        );
        Ok(())
    } else {
        Err(TableError::IllegalChoice { seat, rejection })
    }
}

#[cfg(test)]
mod tests {
    use super::{NullObserver, SeatAgent, Table, TableError, TableObserver};
    use crate::policy::{BidContext, PlayContext, Policy, PolicyError, Rejection};
    use spades_core::game::match_state::{MatchState, SeatScore};
    use spades_core::game::rules::GameRules;
    use spades_core::model::card::Card;
    use spades_core::model::player::{PlayerProfile, Seat};
    use spades_core::model::round::{BidError, PlayError};

    fn bots() -> [SeatAgent; 4] {
        ["You", "Alex", "Blake", "Casey"].map(SeatAgent::bot)
    }

    fn short_rules() -> GameRules {
        GameRules {
            target_score: 50,
            ..GameRules::default()
        }
    }

    #[derive(Default)]
    struct Recorder {
        bids: usize,
        plays: usize,
        tricks: usize,
        rounds: usize,
        scored: Vec<SeatScore>,
        finished: bool,
    }

    impl TableObserver for Recorder {
        fn round_started(
            &mut self,
            _round_number: u32,
            _dealer: Seat,
            _round: &spades_core::model::round::RoundState,
        ) {
            self.rounds += 1;
        }

        fn bid_placed(&mut self, _seat: Seat, _bid: u8) {
            self.bids += 1;
        }

        fn card_played(&mut self, _seat: Seat, _card: Card) {
            self.plays += 1;
        }

        fn trick_won(&mut self, _winner: Seat, _card: Card, _tricks_won: [u8; 4]) {
            self.tricks += 1;
        }

        fn round_scored(&mut self, line: &SeatScore) {
            self.scored.push(*line);
        }

        fn game_over(&mut self, _result: &spades_core::game::match_state::GameResult) {
            self.finished = true;
        }
    }

    #[test]
    fn bot_table_plays_to_completion() {
        let state = MatchState::with_seed(short_rules(), 11).unwrap();
        let mut table = Table::new(state, bots());
        let mut recorder = Recorder::default();
        let result = table.run(&mut recorder).unwrap();

        assert!(recorder.finished);
        assert!(result.score >= 50);
        assert_eq!(recorder.bids, recorder.rounds * 4);
        assert_eq!(recorder.plays, recorder.rounds * 52);
        assert_eq!(recorder.tricks, recorder.rounds * 13);
        assert_eq!(recorder.scored.len(), recorder.rounds * 4);
        for seat in &result.winners {
            assert_eq!(table.state().scores().score(*seat), result.score);
        }
    }

    /// Offers one out-of-range bid and one off-suit card before behaving.
    struct Clumsy {
        rejections: usize,
        bad_bid_sent: bool,
        bad_play_sent: bool,
    }

    impl Policy for Clumsy {
        fn choose_bid(&mut self, _ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
            if self.bad_bid_sent {
                Ok(2)
            } else {
                self.bad_bid_sent = true;
                Ok(14)
            }
        }

        fn choose_play(&mut self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
            if !self.bad_play_sent {
                let illegal = ctx
                    .hand
                    .iter()
                    .copied()
                    .find(|card| !ctx.legal_moves.contains(card));
                if let Some(card) = illegal {
                    self.bad_play_sent = true;
                    return Ok(card);
                }
            }
            ctx.legal_moves.first().copied().ok_or(PolicyError::NoLegalMove)
        }

        fn handle_rejection(&mut self, _rejection: &Rejection) -> bool {
            self.rejections += 1;
            true
        }
    }

    #[test]
    fn rejected_choices_are_offered_back_when_policy_retries() {
        let state = MatchState::with_seed(GameRules::default(), 4).unwrap();
        let mut agents = bots();
        agents[1] = SeatAgent::new(
            PlayerProfile::human("Alex"),
            Clumsy {
                rejections: 0,
                bad_bid_sent: false,
                bad_play_sent: false,
            },
        );
        let mut table = Table::new(state, agents);
        let report = table.play_round(&mut NullObserver).unwrap();
        assert_eq!(report.seats[Seat::East.index()].bid, 2);
        assert_eq!(report.round_number, 1);
    }

    struct StubbornBidder;

    impl Policy for StubbornBidder {
        fn choose_bid(&mut self, _ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
            Ok(0)
        }

        fn choose_play(&mut self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
            ctx.legal_moves.first().copied().ok_or(PolicyError::NoLegalMove)
        }
    }

    #[test]
    fn rejection_without_retry_aborts_the_game() {
        let state = MatchState::with_seed(GameRules::default(), 9).unwrap();
        let mut agents = bots();
        agents[Seat::East.index()] = SeatAgent::new(PlayerProfile::bot("Alex"), StubbornBidder);
        let mut table = Table::new(state, agents);
        let err = table.run(&mut NullObserver).unwrap_err();
        match err {
            TableError::IllegalChoice { seat, rejection } => {
                assert_eq!(seat, Seat::East);
                assert_eq!(rejection, Rejection::Bid(BidError::NilDisabled));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    struct Cheater;

    impl Policy for Cheater {
        fn choose_bid(&mut self, _ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
            Ok(3)
        }

        fn choose_play(&mut self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
            let foreign = ctx
                .round
                .hand(ctx.seat.next())
                .iter()
                .copied()
                .next()
                .ok_or(PolicyError::NoLegalMove)?;
            Ok(foreign)
        }

        fn handle_rejection(&mut self, _rejection: &Rejection) -> bool {
            true
        }
    }

    #[test]
    fn card_outside_the_hand_is_fatal_even_when_retry_is_requested() {
        let state = MatchState::with_seed(GameRules::default(), 2).unwrap();
        let mut agents = bots();
        agents[Seat::East.index()] = SeatAgent::new(PlayerProfile::bot("Alex"), Cheater);
        let mut table = Table::new(state, agents);
        let err = table.run(&mut NullObserver).unwrap_err();
        assert!(matches!(
            err,
            TableError::IllegalChoice {
                seat: Seat::East,
                rejection: Rejection::Play(PlayError::CardNotInHand(_)),
            }
        ));
    }

    struct Silent;

    impl Policy for Silent {
        fn choose_bid(&mut self, _ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
            Err(PolicyError::InputClosed)
        }

        fn choose_play(&mut self, _ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
            Err(PolicyError::InputClosed)
        }
    }

    #[test]
    fn policy_errors_carry_the_seat() {
        let state = MatchState::with_seed(GameRules::default(), 1).unwrap();
        let mut agents = bots();
        agents[Seat::South.index()] = SeatAgent::new(PlayerProfile::human("You"), Silent);
        let mut table = Table::new(state, agents);
        let err = table.run(&mut NullObserver).unwrap_err();
        assert!(matches!(
            err,
            TableError::Policy {
                seat: Seat::South,
                source: PolicyError::InputClosed,
            }
        ));
    }
}
