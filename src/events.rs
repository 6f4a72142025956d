use crate::agents::Action;
use crate::cards::Card;
use crate::game::{PlayerId, ShowdownEntry, Street};
use crate::hand::CommunityCards;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameEvent {
    HandStarted { players: usize },
    BlindPosted { player: PlayerId, amount: u64 },
    /// Two cards went to `player`; the cards themselves stay private.
    HoleCardsDealt { player: PlayerId },
    StreetStarted { street: Street, community: CommunityCards },
    ActionApplied { player: PlayerId, action: Action, street: Street },
    PotChanged { pot: u64, outstanding_bid: u64 },
    StreetEnded { street: Street },
    CardBurned,
    CommunityDealt { cards: Vec<Card> },
    /// Everyone else folded.
    Eliminated { winner: PlayerId, pot: u64 },
    /// `winner` is `None` when the best hands tie exactly.
    Showdown { results: Vec<ShowdownEntry>, winner: Option<PlayerId>, pot: u64 },
}

impl GameEvent {
    /// Events that close the hand.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::Eliminated { .. } | GameEvent::Showdown { .. })
    }
}

fn write_cards(f: &mut fmt::Formatter<'_>, cards: &[Card]) -> fmt::Result {
    for (i, c) in cards.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::HandStarted { players } => write!(f, "New hand with {players} players"),
            GameEvent::BlindPosted { player, amount } => write!(f, "{player} posts {amount}"),
            GameEvent::HoleCardsDealt { player } => write!(f, "{player} is dealt two cards"),
            GameEvent::StreetStarted { street, community } if community.is_empty() => {
                write!(f, "*** {street} ***")
            }
            GameEvent::StreetStarted { street, community } => {
                write!(f, "*** {street} *** {community}")
            }
            GameEvent::ActionApplied { player, action, .. } => write!(f, "{player}: {action}"),
            GameEvent::PotChanged { pot, outstanding_bid } => {
                write!(f, "Pot {pot}, to match {outstanding_bid}")
            }
            GameEvent::StreetEnded { street } => write!(f, "{street} betting closed"),
            GameEvent::CardBurned => f.write_str("Burn"),
            GameEvent::CommunityDealt { cards } => {
                f.write_str("Dealt ")?;
                write_cards(f, cards)
            }
            GameEvent::Eliminated { winner, pot } => {
                write!(f, "{winner} wins {pot} (everyone else folded)")
            }
            GameEvent::Showdown { results, winner, pot } => {
                f.write_str("Showdown: ")?;
                for (i, entry) in results.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} {}", entry.player, entry.evaluation)?;
                }
                match winner {
                    Some(w) => write!(f, " => {w} wins {pot}"),
                    None => write!(f, " => tie, pot of {pot} not split"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line() {
        let p1 = PlayerId::new(1);
        let cases = [
            (GameEvent::BlindPosted { player: p1, amount: 1 }, "P1 posts 1"),
            (
                GameEvent::ActionApplied {
                    player: p1,
                    action: Action::Call { pot_increment: 1 },
                    street: Street::Preflop,
                },
                "P1: Call (+1)",
            ),
            (GameEvent::PotChanged { pot: 4, outstanding_bid: 2 }, "Pot 4, to match 2"),
            (
                GameEvent::CommunityDealt { cards: crate::cards::parse_cards("Ah Kd 2c").unwrap() },
                "Dealt Ah Kd 2c",
            ),
            (GameEvent::Eliminated { winner: p1, pot: 3 }, "P1 wins 3 (everyone else folded)"),
        ];
        for (event, want) in cases {
            assert_eq!(event.to_string(), want);
            assert!(!event.to_string().contains('\n'));
        }
    }

    #[test]
    fn street_header_shows_board_when_present() {
        let empty = GameEvent::StreetStarted {
            street: Street::Preflop,
            community: CommunityCards::new(),
        };
        assert_eq!(empty.to_string(), "*** Preflop ***");
        let flop = GameEvent::StreetStarted {
            street: Street::Flop,
            community: "2c 3c 4c".parse().unwrap(),
        };
        assert_eq!(flop.to_string(), "*** Flop *** [2c 3c 4c]");
    }

    #[test]
    fn terminal_events() {
        assert!(GameEvent::Eliminated { winner: PlayerId::new(2), pot: 3 }.is_terminal());
        assert!(!GameEvent::CardBurned.is_terminal());
    }
}
