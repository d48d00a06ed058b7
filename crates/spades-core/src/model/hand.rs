use crate::model::card::Card;
use crate::model::suit::Suit;

/// Cards held by one seat, always in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.cards.sort_unstable();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.cards.sort_unstable();
    }

    /// Removes `card` and hands it back, or `None` if it is not held.
    pub fn take(&mut self, card: Card) -> Option<Card> {
        let index = self.cards.iter().position(|&c| c == card)?;
        Some(self.cards.remove(index))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|c| c.suit == suit).count()
    }

    pub fn cards_of(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |c| c.suit == suit)
    }

    pub fn is_all_trumps(&self) -> bool {
        self.cards.iter().all(|c| c.is_trump())
    }

    /// Cards that may be played to the current trick.
    ///
    /// A leader may not open with a spade until spades are broken, unless the
    /// hand holds nothing else. A follower must follow the led suit when able
    /// and may play anything otherwise.
    pub fn legal_moves(&self, led_suit: Option<Suit>, spades_broken: bool) -> Vec<Card> {
        match led_suit {
            None => {
                if spades_broken || self.is_all_trumps() {
                    self.cards.clone()
                } else {
                    self.cards.iter().copied().filter(|c| !c.is_trump()).collect()
                }
            }
            Some(suit) => {
                let follow: Vec<Card> = self.cards_of(suit).collect();
                if follow.is_empty() {
                    self.cards.clone()
                } else {
                    follow
                }
            }
        }
    }
}
