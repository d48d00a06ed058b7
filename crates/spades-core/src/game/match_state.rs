use crate::game::rules::{GameRules, RulesError};
use crate::model::deck::Deck;
use crate::model::player::Seat;
use crate::model::round::RoundState;
use crate::model::score::{RoundScore, ScoreBoard, score_player};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

#[derive(Debug, Clone)]
pub struct MatchState {
    rules: GameRules,
    scores: ScoreBoard,
    dealer: Seat,
    round_number: u32,
    current_round: RoundState,
    rng: StdRng,
    seed: u64,
}

/// One seat's line in the round scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatScore {
    pub seat: Seat,
    pub bid: u8,
    pub tricks_won: u8,
    pub score: RoundScore,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winners: Vec<Seat>,
    pub score: i32,
}

impl GameResult {
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEnd {
    NextRound,
    GameOver(GameResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub round_number: u32,
    pub seats: [SeatScore; 4],
    pub end: RoundEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Rules(RulesError),
    RoundInProgress { tricks_completed: usize },
    MissingBid(Seat),
    GameOver,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Rules(err) => write!(f, "invalid rules: {err}"),
            MatchError::RoundInProgress { tricks_completed } => write!(
                f,
                "round cannot be scored after {tricks_completed} of 13 tricks"
            ),
            MatchError::MissingBid(seat) => write!(f, "{seat} never placed a bid"),
            MatchError::GameOver => write!(f, "the game is already over"),
        }
    }
}

impl std::error::Error for MatchError {}

impl From<RulesError> for MatchError {
    fn from(value: RulesError) -> Self {
        MatchError::Rules(value)
    }
}

impl MatchState {
    pub fn new(rules: GameRules) -> Result<Self, MatchError> {
        let seed: u64 = rand::random();
        Self::with_seed(rules, seed)
    }

    pub fn with_seed(rules: GameRules, seed: u64) -> Result<Self, MatchError> {
        Self::with_seed_and_dealer(rules, seed, Seat::North)
    }

    pub fn with_seed_and_dealer(
        rules: GameRules,
        seed: u64,
        dealer: Seat,
    ) -> Result<Self, MatchError> {
        rules.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        Ok(Self {
            rules,
            scores: ScoreBoard::new(),
            dealer,
            round_number: 1,
            current_round: RoundState::deal(deck, dealer),
            rng,
            seed,
        })
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn round(&self) -> &RoundState {
        &self.current_round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.current_round
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn is_over(&self) -> bool {
        self.scores.has_reached(self.rules.target_score)
    }

    pub fn is_round_ready_for_scoring(&self) -> bool {
        self.current_round.is_complete()
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            winners: self.scores.leaders(),
            score: self.scores.max_score(),
        }
    }

    /// Scores the finished round in seat order, passes the deal on and either
    /// deals the next round or reports the winners.
    ///
    /// The target score is only checked here, at the round boundary.
    pub fn finish_round(&mut self) -> Result<RoundReport, MatchError> {
        if self.is_over() {
            return Err(MatchError::GameOver);
        }
        if !self.is_round_ready_for_scoring() {
            return Err(MatchError::RoundInProgress {
                tricks_completed: self.current_round.tricks_completed(),
            });
        }

        let mut seats = Vec::with_capacity(4);
        for seat in Seat::LOOP {
            let bid = self
                .current_round
                .bid(seat)
                .ok_or(MatchError::MissingBid(seat))?;
            let tricks_won = self.current_round.tricks_won(seat);
            let score = score_player(bid, tricks_won, self.scores.bags(seat), self.rules.allow_nil);
            self.scores.apply(seat, &score);
            seats.push(SeatScore {
                seat,
                bid,
                tricks_won,
                score,
                total: self.scores.score(seat),
            });
        }
        let seats: [SeatScore; 4] = [seats[0], seats[1], seats[2], seats[3]];

        let round_number = self.round_number;
        self.dealer = self.dealer.next();

        let end = if self.is_over() {
            RoundEnd::GameOver(self.result())
        } else {
            self.round_number += 1;
            let deck = Deck::shuffled(&mut self.rng);
            self.current_round = RoundState::deal(deck, self.dealer);
            RoundEnd::NextRound
        };

        Ok(RoundReport {
            round_number,
            seats,
            end,
        })
    }
}
