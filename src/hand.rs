use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Most community cards a Hold'em board ever holds.
pub const MAX_COMMUNITY: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many community cards: {0}")]
    TooManyCommunityCards(usize),
    #[error("duplicate community cards")]
    DuplicateCommunityCards,
    #[error("hole cards overlap with community cards")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards, assigned once per hand.
///
/// ```
/// use holdem_round::cards::{Card, Rank, Suit};
/// use holdem_round::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 == card || self.1 == card
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Shared cards on the table. Grows street by street and never shrinks.
///
/// Insertion order is kept for display only; evaluation treats it as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityCards {
    cards: Vec<Card>,
}

impl CommunityCards {
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(MAX_COMMUNITY) }
    }

    /// ```
    /// use holdem_round::cards::{Card, Rank, Suit};
    /// use holdem_round::hand::CommunityCards;
    ///
    /// let flop = CommunityCards::try_new(vec![
    ///     Card::new(Rank::Two, Suit::Clubs),
    ///     Card::new(Rank::Three, Suit::Clubs),
    ///     Card::new(Rank::Four, Suit::Clubs),
    /// ]).unwrap();
    /// assert_eq!(flop.len(), 3);
    /// ```
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > MAX_COMMUNITY {
            return Err(HandError::TooManyCommunityCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateCommunityCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == MAX_COMMUNITY
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub(crate) fn push(&mut self, card: Card) -> Result<(), HandError> {
        if self.cards.len() >= MAX_COMMUNITY {
            return Err(HandError::TooManyCommunityCards(self.cards.len() + 1));
        }
        if self.contains(card) {
            return Err(HandError::DuplicateCommunityCards);
        }
        self.cards.push(card);
        Ok(())
    }
}

impl fmt::Display for CommunityCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

impl FromStr for CommunityCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        CommunityCards::try_new(cards)
    }
}

/// Check that hole cards and community cards could come from one deck.
///
/// ```
/// use holdem_round::hand::{validate_holdem, CommunityCards, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let flop: CommunityCards = "2c 3c 4c".parse().unwrap();
/// validate_holdem(&hole, &flop).unwrap();
/// ```
pub fn validate_holdem(hole: &HoleCards, community: &CommunityCards) -> Result<(), HandError> {
    if community.len() > MAX_COMMUNITY {
        return Err(HandError::TooManyCommunityCards(community.len()));
    }
    if community.contains(hole.first()) || community.contains(hole.second()) {
        return Err(HandError::Overlap);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    Ok(())
}
