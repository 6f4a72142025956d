pub(crate) mod combinations;
pub(crate) mod rank_groups;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, CommunityCards, HandError, HoleCards, MAX_COMMUNITY};
use combinations::FiveCardCombinations;
use core::cmp::Ordering;
use rank_groups::RankGroups;
use std::fmt;

/// Sorted ranks of the ace-low straight before the Ace is remapped to 1.
const WHEEL: [u8; 5] = [2, 3, 4, 5, 14];
const WHEEL_LOW: [u8; 5] = [1, 2, 3, 4, 5];

/// Poker hand quality tier from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Quality {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    Trips = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    Quads = 8,
    StraightFlush = 9,
}

impl Quality {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Quality::HighCard => "High Card",
            Quality::Pair => "Pair",
            Quality::TwoPair => "Two Pairs",
            Quality::Trips => "Three of a Kind",
            Quality::Straight => "Straight",
            Quality::Flush => "Flush",
            Quality::FullHouse => "Full House",
            Quality::Quads => "Four of a Kind",
            Quality::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comparable hand strength: quality first, then the tie-break ranks lexicographically.
///
/// `ranks` holds the distinct rank values of the hand ordered by (multiplicity desc,
/// rank desc). The Ace of a wheel straight counts as 1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue {
    quality: Quality,
    ranks: Vec<u8>,
}

impl HandValue {
    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn ranks(&self) -> &[u8] {
        &self.ranks
    }
}

/// Detailed evaluation result. `value` drives ordering; `best_five` is for display.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Evaluation {
    pub quality: Quality,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    pub fn value(&self) -> &HandValue {
        &self.value
    }

    /// Tie-break ranks, most significant first.
    pub fn ranks(&self) -> &[u8] {
        &self.value.ranks
    }

    fn rank_at(&self, i: usize) -> Rank {
        self.value.ranks.get(i).and_then(|&v| Rank::from_value(v)).unwrap_or(Rank::Two)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = self.rank_at(0);
        match self.quality {
            Quality::HighCard => write!(f, "High Card, {}", top.name()),
            Quality::Pair => write!(f, "Pair of {}", top.plural()),
            Quality::TwoPair => {
                write!(f, "Two Pairs, {} and {}", top.plural(), self.rank_at(1).plural())
            }
            Quality::Trips => write!(f, "Three of a Kind, {}", top.plural()),
            Quality::Straight => write!(f, "Straight, {} high", top.name()),
            Quality::Flush => write!(f, "Flush, {} high", top.name()),
            Quality::FullHouse => {
                write!(f, "Full House, {} over {}", top.plural(), self.rank_at(1).plural())
            }
            Quality::Quads => write!(f, "Four of a Kind, {}", top.plural()),
            Quality::StraightFlush if top == Rank::Ace => f.write_str("Royal Flush"),
            Quality::StraightFlush => write!(f, "Straight Flush, {} high", top.name()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: {0}")]
    NotEnoughCards(usize),
    #[error("too many cards to evaluate: {0}")]
    TooManyCards(usize),
}

/// Classify exactly five cards into a quality tier plus tie-break ranks.
///
/// ```
/// use holdem_round::cards::parse_cards;
/// use holdem_round::evaluator::{evaluate_five, Quality};
///
/// let cards: [_; 5] = parse_cards("Ah 2d 3c 4s 5h").unwrap().try_into().unwrap();
/// let eval = evaluate_five(&cards);
/// assert_eq!(eval.quality, Quality::Straight);
/// assert_eq!(eval.ranks(), &[5, 4, 3, 2, 1]);
/// ```
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let mut values = (*cards).map(|c| c.rank().value());
    values.sort_unstable();
    if values == WHEEL {
        values = WHEEL_LOW;
    }

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let is_straight = values.windows(2).all(|w| w[1] == w[0] + 1);

    let groups = RankGroups::from_values(&values);
    let quality = match (is_flush, is_straight, groups.counts().as_slice()) {
        (true, true, _) => Quality::StraightFlush,
        (_, _, [4, 1]) => Quality::Quads,
        (_, _, [3, 2]) => Quality::FullHouse,
        (true, _, _) => Quality::Flush,
        (_, true, _) => Quality::Straight,
        (_, _, [3, 1, 1]) => Quality::Trips,
        (_, _, [2, 2, 1]) => Quality::TwoPair,
        (_, _, [2, 1, 1, 1]) => Quality::Pair,
        _ => Quality::HighCard,
    };
    let ranks = groups.ranks();

    let wheel = values == WHEEL_LOW;
    let mut best_five = *cards;
    best_five.sort_by_key(|c| {
        let v = match c.rank() {
            Rank::Ace if wheel => 1,
            r => r.value(),
        };
        ranks.iter().position(|&x| x == v).unwrap_or(ranks.len())
    });

    Evaluation { quality, best_five, value: HandValue { quality, ranks } }
}

/// Best evaluation over all 21 five-card subsets of seven cards.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    best_of_unchecked(cards)
}

/// Best evaluation over every five-card subset of 5 to 7 cards.
///
/// Useful before the river, when fewer than seven cards are known.
pub fn best_of(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }
    if cards.len() > 2 + MAX_COMMUNITY {
        return Err(EvalError::TooManyCards(cards.len()));
    }
    Ok(best_of_unchecked(cards))
}

fn best_of_unchecked(cards: &[Card]) -> Evaluation {
    let mut best: Option<Evaluation> = None;
    for idx in FiveCardCombinations::new(cards.len()) {
        let hand = idx.map(|i| cards[i]);
        let eval = evaluate_five(&hand);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.unwrap_or_else(|| evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]))
}

/// Evaluate a player's best hand from two hole cards plus the five community cards.
///
/// ```
/// use holdem_round::evaluator::{best_hand, Quality};
/// use holdem_round::hand::{CommunityCards, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: CommunityCards = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = best_hand(&hole, &board).unwrap();
/// assert_eq!(eval.quality, Quality::Pair);
/// assert_eq!(eval.to_string(), "Pair of Aces");
/// ```
pub fn best_hand(hole: &HoleCards, community: &CommunityCards) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, community)?;
    if !community.is_complete() {
        return Err(EvalError::NotEnoughCards(2 + community.len()));
    }
    let mut seven = [hole.first(); 7];
    seven[1] = hole.second();
    seven[2..].copy_from_slice(community.as_slice());
    Ok(evaluate_seven(&seven))
}

/// Compare two hands on a shared board.
///
/// ```
/// use holdem_round::evaluator::compare_hands;
/// use holdem_round::hand::{CommunityCards, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: CommunityCards = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_hands(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_hands(
    a: &HoleCards,
    b: &HoleCards,
    community: &CommunityCards,
) -> Result<Ordering, EvalError> {
    let va = best_hand(a, community)?;
    let vb = best_hand(b, community)?;
    Ok(va.cmp(&vb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn classifies_each_quality() {
        let cases = [
            ("As Ks Qs Js Ts", Quality::StraightFlush),
            ("Kc Kd Kh Ks 2s", Quality::Quads),
            ("Tc Td Th 2s 2h", Quality::FullHouse),
            ("Ah 9h 7h 3h 2h", Quality::Flush),
            ("9c Td Jh Qs Kc", Quality::Straight),
            ("Qc Qd Qh 9s 2c", Quality::Trips),
            ("Jc Jd 9c 9h 2s", Quality::TwoPair),
            ("Ah Ad Ts 9c 2d", Quality::Pair),
            ("Ah Kd 7s 5c 2d", Quality::HighCard),
        ];
        for (cards, want) in cases {
            assert_eq!(evaluate_five(&five(cards)).quality, want, "{cards}");
        }
    }

    #[test]
    fn tie_break_ranks_follow_group_order() {
        assert_eq!(evaluate_five(&five("3c 3d Kh Ks 3h")).ranks(), &[3, 13]);
        assert_eq!(evaluate_five(&five("5c Jd Jh 9s 5h")).ranks(), &[11, 5, 9]);
        assert_eq!(evaluate_five(&five("2c 8d Ah 8s Kh")).ranks(), &[8, 14, 13, 2]);
        assert_eq!(evaluate_five(&five("2c 7d Ah 9s Kh")).ranks(), &[14, 13, 9, 7, 2]);
    }

    #[test]
    fn wheel_is_five_high_straight() {
        let wheel = evaluate_five(&five("Ac 2d 3h 4s 5c"));
        assert_eq!(wheel.quality, Quality::Straight);
        assert_eq!(wheel.ranks(), &[5, 4, 3, 2, 1]);
        assert_eq!(wheel.best_five[4].rank(), Rank::Ace);
        assert_eq!(wheel.to_string(), "Straight, Five high");

        let six_high = evaluate_five(&five("2d 3h 4s 5c 6d"));
        assert!(six_high > wheel);

        let steel_wheel = evaluate_five(&five("Ah 2h 3h 4h 5h"));
        assert_eq!(steel_wheel.quality, Quality::StraightFlush);
    }

    #[test]
    fn ace_is_never_low_outside_the_wheel() {
        // A-2-3-4-6 is just ace high, and Q-K-A-2-3 does not wrap around.
        assert_eq!(evaluate_five(&five("Ac 2d 3h 4s 6c")).quality, Quality::HighCard);
        assert_eq!(evaluate_five(&five("Qc Kd Ah 2s 3c")).quality, Quality::HighCard);
    }

    #[test]
    fn best_five_leads_with_primary_group() {
        let e = evaluate_five(&five("2c Kd 2h Ks 2d"));
        assert_eq!(e.best_five[0].rank(), Rank::Two);
        assert_eq!(e.best_five[3].rank(), Rank::King);
        assert_eq!(e.to_string(), "Full House, Twos over Kings");
    }

    #[test]
    fn best_of_checks_card_counts() {
        let four = parse_cards("As Ks Qs Js").unwrap();
        assert_eq!(best_of(&four).unwrap_err(), EvalError::NotEnoughCards(4));
        let eight = parse_cards("As Ks Qs Js Ts 9s 8s 7s").unwrap();
        assert_eq!(best_of(&eight).unwrap_err(), EvalError::TooManyCards(8));
        let six = parse_cards("2c As Ks Qs Js Ts").unwrap();
        assert_eq!(best_of(&six).unwrap().to_string(), "Royal Flush");
    }

    #[test]
    fn best_hand_requires_full_board() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        let board: CommunityCards = "2c 3c 4c".parse().unwrap();
        assert_eq!(best_hand(&hole, &board).unwrap_err(), EvalError::NotEnoughCards(5));
    }

    #[test]
    fn best_hand_rejects_overlap() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        let board: CommunityCards = "As 3c 4c 5d 9h".parse().unwrap();
        assert!(matches!(
            best_hand(&hole, &board),
            Err(EvalError::InvalidHand(HandError::Overlap))
        ));
    }
}
