use spades_bot::{BidContext, PlayContext, Policy, PolicyError, Rejection, TableObserver};
use spades_core::AppInfo;
use spades_core::game::match_state::{GameResult, SeatScore};
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::player::Seat;
use spades_core::model::round::{MAX_BID, RoundState};
use spades_core::model::score::{
    BAG_PENALTY, BidOutcome, NIL_POINTS, POINTS_PER_TRICK, ScoreBoard,
};
use spades_core::model::suit::Suit;
use std::fmt;
use std::io::{BufRead, Write};

/// Interactive seat reading choices line by line.
pub struct TerminalPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, text: &str) -> Result<String, PolicyError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(PolicyError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn show_hand(&mut self, hand: &Hand) -> Result<(), PolicyError> {
        writeln!(self.output, "Your hand:")?;
        for suit in Suit::ALL {
            let cards = hand
                .cards_of(suit)
                .map(|card| card.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.output, "  {}: {cards}", suit.symbol())?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Policy for TerminalPlayer<R, W> {
    fn choose_bid(&mut self, ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
        writeln!(self.output)?;
        self.show_hand(ctx.hand)?;
        let min = ctx.min_bid();
        let prompt = format!("Enter your bid ({min}-{MAX_BID}): ");
        loop {
            let raw = self.prompt(&prompt)?;
            let Ok(bid) = raw.parse::<i32>() else {
                writeln!(self.output, "Please enter a whole number.")?;
                continue;
            };
            if bid == 0 && min > 0 {
                writeln!(self.output, "Nil is disabled in this game.")?;
                continue;
            }
            match u8::try_from(bid) {
                Ok(bid) if bid <= MAX_BID => return Ok(bid),
                _ => writeln!(self.output, "Bid must be between {min} and {MAX_BID}.")?,
            }
        }
    }

    fn choose_play(&mut self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
        if ctx.legal_moves.is_empty() {
            return Err(PolicyError::NoLegalMove);
        }

        let cards = ctx.hand.cards();
        writeln!(self.output, "Your hand:")?;
        for (index, card) in cards.iter().enumerate() {
            let mark = if ctx.legal_moves.contains(card) { "*" } else { " " };
            writeln!(self.output, "  [{index}] {card}{mark}")?;
        }
        writeln!(self.output, "  * indicates a legal play")?;

        loop {
            let raw = self.prompt("Choose card index to play: ")?;
            let Ok(index) = raw.parse::<usize>() else {
                writeln!(self.output, "Please enter a whole number index.")?;
                continue;
            };
            let Some(&card) = cards.get(index) else {
                writeln!(self.output, "Index out of range.")?;
                continue;
            };
            if !ctx.legal_moves.contains(&card) {
                writeln!(
                    self.output,
                    "That card is not a legal move. You must follow suit if possible, and cannot lead spades until broken."
                )?;
                continue;
            }
            return Ok(card);
        }
    }

    fn handle_rejection(&mut self, rejection: &Rejection) -> bool {
        writeln!(self.output, "{rejection}. Try again.").is_ok()
    }
}

/// Prints table progress. Write failures are ignored; the game itself continues.
pub struct TerminalObserver<W> {
    output: W,
    names: [String; 4],
}

impl<W: Write> TerminalObserver<W> {
    pub fn new(output: W, names: [String; 4]) -> Self {
        Self { output, names }
    }

    pub fn banner(&mut self, target_score: i32, seed: u64) {
        self.line(format_args!("\n=== {} ===\n", AppInfo::title()));
        self.line(format_args!("First to {target_score} points wins. (seed {seed})"));
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    fn name(&self, seat: Seat) -> &str {
        &self.names[seat.index()]
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.output.write_fmt(args);
        let _ = self.output.write_all(b"\n");
    }
}

impl<W: Write> TableObserver for TerminalObserver<W> {
    fn round_started(&mut self, round_number: u32, dealer: Seat, _round: &RoundState) {
        let dealer = self.name(dealer).to_string();
        self.line(format_args!("\n--- Round {round_number} (dealer: {dealer}) ---"));
        self.line(format_args!("\nBidding phase:"));
    }

    fn bid_placed(&mut self, seat: Seat, bid: u8) {
        let name = self.name(seat).to_string();
        if bid == 0 {
            self.line(format_args!("- {name} bids nil"));
        } else {
            self.line(format_args!("- {name} bids {bid}"));
        }
    }

    fn trick_started(&mut self, trick_number: usize, _leader: Seat) {
        self.line(format_args!("\nTrick {trick_number}"));
    }

    fn card_played(&mut self, seat: Seat, card: Card) {
        let name = self.name(seat).to_string();
        self.line(format_args!("  {name} plays {card}"));
    }

    fn trick_won(&mut self, winner: Seat, card: Card, tricks_won: [u8; 4]) {
        let name = self.name(winner).to_string();
        self.line(format_args!("Trick taken by {name} with {card}"));
        let tally = Seat::LOOP
            .iter()
            .map(|seat| format!("{} {}", self.name(*seat), tricks_won[seat.index()]))
            .collect::<Vec<_>>()
            .join(" | ");
        self.line(format_args!("  Tricks: {tally}"));
    }

    fn round_scored(&mut self, line: &SeatScore) {
        let name = self.name(line.seat).to_string();
        let delta = line.score.delta;
        let total = line.total;
        let contract = POINTS_PER_TRICK * i32::from(line.bid);
        if line.seat == Seat::LOOP[0] {
            self.line(format_args!("\nScoring:"));
        }
        match line.score.outcome {
            BidOutcome::NilMade => {
                self.line(format_args!("- {name}: nil successful (+{NIL_POINTS}) -> score {total}"))
            }
            BidOutcome::NilFailed => {
                self.line(format_args!("- {name}: nil failed (-{NIL_POINTS}) -> score {total}"))
            }
            BidOutcome::Made { overtricks } => self.line(format_args!(
                "- {name}: made bid {} (+{contract}), overtricks={overtricks} (bags now {}) -> score {total}",
                line.bid,
                line.score.bags_after,
            )),
            BidOutcome::Missed { .. } => self.line(format_args!(
                "- {name}: missed bid {} (-{contract}) -> score {total}",
                line.bid,
            )),
        }
        if line.score.bag_penalties > 0 {
            let penalty = BAG_PENALTY * i32::from(line.score.bag_penalties);
            self.line(format_args!(
                "  Bag penalty: -{penalty} (round delta {delta}, bags reduced to {})",
                line.score.bags_after
            ));
        }
    }

    fn scoreboard(&mut self, scores: &ScoreBoard) {
        self.line(format_args!("\nScoreboard:"));
        for seat in Seat::LOOP {
            let name = self.name(seat).to_string();
            self.line(format_args!(
                "  {name}: {} (bags {})",
                scores.score(seat),
                scores.bags(seat)
            ));
        }
    }

    fn game_over(&mut self, result: &GameResult) {
        let names = result
            .winners
            .iter()
            .map(|seat| self.name(*seat).to_string())
            .collect::<Vec<_>>();
        if result.is_tie() {
            self.line(format_args!(
                "\nTie between {} at {} points!",
                names.join(", "),
                result.score
            ));
        } else {
            self.line(format_args!(
                "\nWinner: {} with {} points!",
                names.join(", "),
                result.score
            ));
        }
    }
}
