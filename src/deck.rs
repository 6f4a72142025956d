use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck is exhausted")]
    Exhausted,
}

/// Source of cards for a hand: draws and burns without replacement.
pub trait Dealer {
    /// Remove the top card and hand it out.
    fn draw(&mut self) -> Result<Card, DeckError>;
    /// Remove the top card and discard it.
    fn burn(&mut self) -> Result<Card, DeckError>;
    /// Cards still in the deck.
    fn remaining(&self) -> usize;
}

/// An ordered pile of unique cards. The top of the deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    burned: Vec<Card>,
}

impl Deck {
    /// All 52 cards in suit-major order, unshuffled.
    ///
    /// ```
    /// use holdem_round::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards, burned: Vec::new() }
    }

    /// A standard deck shuffled with ChaCha8 seeded from `seed`.
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_seeded(seed);
        deck
    }

    /// A deck that deals `cards` in the given order: `cards[0]` comes off first.
    ///
    /// ```
    /// use holdem_round::cards::parse_cards;
    /// use holdem_round::deck::{Dealer, Deck};
    ///
    /// let mut deck = Deck::stacked(parse_cards("As Kd 2c").unwrap());
    /// assert_eq!(deck.draw().unwrap().to_string(), "As");
    /// assert_eq!(deck.burn().unwrap().to_string(), "Kd");
    /// assert_eq!(deck.remaining(), 1);
    /// ```
    pub fn stacked(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards, burned: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards burned so far, oldest first.
    pub fn burned(&self) -> &[Card] {
        &self.burned
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted);
        }
        (0..n).map(|_| self.draw()).collect()
    }
}

impl Dealer for Deck {
    fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    fn burn(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::Exhausted)?;
        self.burned.push(card);
        Ok(card)
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }
}
