//! holdem-round: one hand of Texas Hold'em, from the deal to the showdown.
//!
//! Goals:
//! - A betting state machine that only ever applies legal actions
//! - Exact hand ranking with correct kicker and wheel handling
//! - Decisions come from pluggable agents: scripts, bots or a terminal user
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: compare two Hold'em hands
//! ```
//! use holdem_round::evaluator::{best_hand, Quality};
//! use holdem_round::hand::{CommunityCards, HoleCards};
//!
//! let board: CommunityCards = "Kc Qd Jh 3s 2c".parse().unwrap();
//! let aces: HoleCards = "As Ah".parse().unwrap();
//! let broadway: HoleCards = "Ac Td".parse().unwrap();
//!
//! let a = best_hand(&aces, &board).unwrap();
//! let b = best_hand(&broadway, &board).unwrap();
//! assert_eq!(a.quality, Quality::Pair);
//! assert_eq!(b.quality, Quality::Straight);
//! assert!(b > a);
//! ```
//!
//! ## Play a scripted hand
//! ```
//! use holdem_round::agents::{Intent, ScriptedAgent};
//! use holdem_round::config::TableConfig;
//! use holdem_round::game::Game;
//!
//! let mut game = Game::new(TableConfig::default().with_players(2).with_seed(9)).unwrap();
//! // P1 calls the big blind, P2 checks, then both check down.
//! let mut script = ScriptedAgent::new(
//!     [Intent::Call, Intent::Check].into_iter().chain([Intent::Check; 6]),
//! );
//! let outcome = game.play_hand(&mut script).unwrap();
//! assert_eq!(outcome.pot(), 4);
//! assert_eq!(game.community().len(), 5);
//! ```
//!
//! ## TUI
//! Run the interactive table with:
//! ```sh
//! cargo run --bin holdem-round -- --players 4 --log-file holdem.log
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod events;
pub mod game;
pub mod hand;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
