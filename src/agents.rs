//! Agents: the pluggable decision sources the betting engine asks for moves.
//!
//! The engine only talks to the [`ActionProvider`] trait. A provider sees a read-only
//! [`PlayerView`] plus the outstanding bid and answers with an [`Action`]. Concrete
//! providers here are the seat dispatcher [`AgentTable`], the deterministic
//! [`ScriptedAgent`] used by tests, and [`BotAgent`]; the terminal front-end lives in
//! `tui`.

use crate::events::GameEvent;
use crate::game::{PlayerId, Street};
use crate::hand::{CommunityCards, HoleCards};
use core::fmt;
use std::collections::VecDeque;

mod bots;

pub use bots::{BotAgent, BotProfile, Difficulty};

/// A player's decision, with the chip movement it implies spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    /// Only legal when the player's bid already matches the outstanding bid.
    Check,
    /// Match the outstanding bid; `pot_increment` is `outstanding - bid`.
    Call { pot_increment: u64 },
    /// Raise the outstanding bid to `amount`; `pot_increment` is `amount - outstanding`.
    Raise { amount: u64, pot_increment: u64 },
}

impl Action {
    /// A call for a player currently bidding `bid` against `outstanding_bid`.
    pub fn call(bid: u64, outstanding_bid: u64) -> Self {
        Action::Call { pot_increment: outstanding_bid.saturating_sub(bid) }
    }

    /// A raise to `amount` over `outstanding_bid`.
    pub fn raise_to(amount: u64, outstanding_bid: u64) -> Self {
        Action::Raise { amount, pot_increment: amount.saturating_sub(outstanding_bid) }
    }

    /// Chips this action adds to the pot.
    pub fn pot_increment(&self) -> u64 {
        match *self {
            Action::Fold | Action::Check => 0,
            Action::Call { pot_increment } | Action::Raise { pot_increment, .. } => pot_increment,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call { .. } => "Call",
            Action::Raise { .. } => "Raise to",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Fold | Action::Check => f.write_str(self.label()),
            Action::Call { pot_increment } => write!(f, "Call (+{pot_increment})"),
            Action::Raise { amount, pot_increment } => {
                write!(f, "Raise to {amount} (+{pot_increment})")
            }
        }
    }
}

/// Seat-level intents, resolved into an [`Action`] against the current bids.
///
/// Front-ends and scripts work in intents so they never compute pot increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    Fold,
    Check,
    Call,
    /// Check when level, call when behind.
    CheckCall,
    RaiseTo(u64),
    /// Pass an action through untouched, legal or not.
    Raw(Action),
}

impl Intent {
    pub fn resolve(self, bid: u64, outstanding_bid: u64) -> Action {
        match self {
            Intent::Fold => Action::Fold,
            Intent::Check => Action::Check,
            Intent::Call => Action::call(bid, outstanding_bid),
            Intent::CheckCall if bid >= outstanding_bid => Action::Check,
            Intent::CheckCall => Action::call(bid, outstanding_bid),
            Intent::RaiseTo(amount) => Action::raise_to(amount, outstanding_bid),
            Intent::Raw(action) => action,
        }
    }
}

/// Which moves are open to a player, from comparing their bid to the outstanding bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalActions {
    pub check: bool,
    pub call: bool,
    pub to_call: u64,
    /// Smallest legal raise target.
    pub min_raise_to: u64,
}

impl LegalActions {
    /// Fold and raise are always open; check when level, call when behind.
    ///
    /// ```
    /// use holdem_round::agents::LegalActions;
    ///
    /// let behind = LegalActions::for_bids(1, 2);
    /// assert!(behind.call && !behind.check);
    /// assert_eq!(behind.to_call, 1);
    /// assert_eq!(behind.min_raise_to, 3);
    /// ```
    pub fn for_bids(bid: u64, outstanding_bid: u64) -> Self {
        let level = bid >= outstanding_bid;
        Self {
            check: level,
            call: !level,
            to_call: outstanding_bid.saturating_sub(bid),
            min_raise_to: outstanding_bid.saturating_add(1),
        }
    }

    /// Whether `action` is allowed and its pot increment is the one the bids imply.
    pub fn permits(&self, action: &Action, outstanding_bid: u64) -> bool {
        match *action {
            Action::Fold => true,
            Action::Check => self.check,
            Action::Call { pot_increment } => self.call && pot_increment == self.to_call,
            Action::Raise { amount, pot_increment } => {
                amount >= self.min_raise_to && pot_increment == amount - outstanding_bid
            }
        }
    }
}

/// What a provider may see when asked to act: never the other players' cards.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct PlayerView<'a> {
    pub player: PlayerId,
    pub hole: HoleCards,
    pub bid: u64,
    pub street: Street,
    pub community: &'a CommunityCards,
    pub pot: u64,
    pub big_blind: u64,
    pub active_players: usize,
}

impl PlayerView<'_> {
    pub fn legal_actions(&self, outstanding_bid: u64) -> LegalActions {
        LegalActions::for_bids(self.bid, outstanding_bid)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentError {
    #[error("no agent seated for {0}")]
    NoAgent(PlayerId),
    #[error("script ran out of actions for {0}")]
    ScriptExhausted(PlayerId),
    #[error("player quit the table")]
    Quit,
    #[error("terminal i/o failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for AgentError {
    fn from(e: std::io::Error) -> Self {
        AgentError::Io(e.to_string())
    }
}

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
    Script,
}

/// Supplies decisions to the betting engine. Calls block until a decision exists.
pub trait ActionProvider {
    /// Decide for `view.player`, who must match `outstanding_bid` to stay in.
    fn request_action(
        &mut self,
        view: &PlayerView<'_>,
        outstanding_bid: u64,
    ) -> Result<Action, AgentError>;

    /// Receive every engine event in order. Default ignores them.
    fn observe(&mut self, _event: &GameEvent) {}

    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}

impl<T: ActionProvider + ?Sized> ActionProvider for &mut T {
    fn request_action(
        &mut self,
        view: &PlayerView<'_>,
        outstanding_bid: u64,
    ) -> Result<Action, AgentError> {
        (**self).request_action(view, outstanding_bid)
    }

    fn observe(&mut self, event: &GameEvent) {
        (**self).observe(event)
    }

    fn kind(&self) -> AgentKind {
        (**self).kind()
    }
}

/// Plays back a fixed list of intents in turn order, whoever is acting.
///
/// Records every view it was shown and every event it observed, for assertions.
#[derive(Debug, Default)]
pub struct ScriptedAgent {
    script: VecDeque<Intent>,
    asked: Vec<(PlayerId, u64, u64)>,
    events: Vec<GameEvent>,
}

impl ScriptedAgent {
    pub fn new<I: IntoIterator<Item = Intent>>(script: I) -> Self {
        Self { script: script.into_iter().collect(), asked: Vec::new(), events: Vec::new() }
    }

    /// `(player, bid, outstanding_bid)` for every request, oldest first.
    pub fn asked(&self) -> &[(PlayerId, u64, u64)] {
        &self.asked
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ActionProvider for ScriptedAgent {
    fn request_action(
        &mut self,
        view: &PlayerView<'_>,
        outstanding_bid: u64,
    ) -> Result<Action, AgentError> {
        self.asked.push((view.player, view.bid, outstanding_bid));
        let intent = self.script.pop_front().ok_or(AgentError::ScriptExhausted(view.player))?;
        Ok(intent.resolve(view.bid, outstanding_bid))
    }

    fn observe(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Script
    }
}

/// Routes each request to the agent seated for that player. Events go to every agent.
pub struct AgentTable<'a> {
    seats: Vec<Option<Box<dyn ActionProvider + 'a>>>,
}

impl fmt::Debug for AgentTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Human) => 'H',
                Some(AgentKind::Bot) => 'B',
                Some(_) => 'S',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl<'a> AgentTable<'a> {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats }
    }

    /// Assign an agent to a player's seat (or remove it with `None`).
    pub fn set_agent(&mut self, player: PlayerId, agent: Option<Box<dyn ActionProvider + 'a>>) {
        let seat = player.index();
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    pub fn agent_kind(&self, player: PlayerId) -> Option<AgentKind> {
        self.seats.get(player.index()).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    pub fn has_agent(&self, player: PlayerId) -> bool {
        self.agent_kind(player).is_some()
    }

    /// Whether any bots are seated.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| ag.kind() == AgentKind::Bot)
    }
}

impl ActionProvider for AgentTable<'_> {
    fn request_action(
        &mut self,
        view: &PlayerView<'_>,
        outstanding_bid: u64,
    ) -> Result<Action, AgentError> {
        match self.seats.get_mut(view.player.index()) {
            Some(Some(agent)) => agent.request_action(view, outstanding_bid),
            _ => Err(AgentError::NoAgent(view.player)),
        }
    }

    fn observe(&mut self, event: &GameEvent) {
        for agent in self.seats.iter_mut().flatten() {
            agent.observe(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(community: &CommunityCards, bid: u64) -> PlayerView<'_> {
        PlayerView {
            player: PlayerId::new(1),
            hole: "As Kd".parse().expect("valid hole cards"),
            bid,
            street: Street::Preflop,
            community,
            pot: 3,
            big_blind: 2,
            active_players: 2,
        }
    }

    #[test]
    fn legal_actions_follow_bid_comparison() {
        let level = LegalActions::for_bids(2, 2);
        assert!(level.check && !level.call);
        assert!(level.permits(&Action::Check, 2));
        assert!(!level.permits(&Action::call(2, 2), 2));
        assert!(level.permits(&Action::raise_to(3, 2), 2));
        assert!(!level.permits(&Action::raise_to(2, 2), 2));
        assert!(level.permits(&Action::Fold, 2));

        let behind = LegalActions::for_bids(1, 2);
        assert!(!behind.permits(&Action::Check, 2));
        assert!(behind.permits(&Action::call(1, 2), 2));
        assert!(!behind.permits(&Action::Call { pot_increment: 2 }, 2));
    }

    #[test]
    fn raise_increment_is_measured_from_outstanding_bid() {
        assert_eq!(Action::raise_to(10, 2), Action::Raise { amount: 10, pot_increment: 8 });
        let legal = LegalActions::for_bids(1, 2);
        assert!(!legal.permits(&Action::Raise { amount: 10, pot_increment: 9 }, 2));
    }

    #[test]
    fn min_raise_saturates_at_the_top_bid() {
        let legal = LegalActions::for_bids(u64::MAX, u64::MAX);
        assert!(legal.check);
        assert_eq!(legal.min_raise_to, u64::MAX);
    }

    #[test]
    fn intents_resolve_against_bids() {
        assert_eq!(Intent::CheckCall.resolve(2, 2), Action::Check);
        assert_eq!(Intent::CheckCall.resolve(1, 2), Action::Call { pot_increment: 1 });
        assert_eq!(Intent::Call.resolve(0, 6), Action::Call { pot_increment: 6 });
        assert_eq!(Intent::Raw(Action::Check).resolve(0, 6), Action::Check);
    }

    #[test]
    fn scripted_agent_plays_in_order_and_records() {
        let board = CommunityCards::new();
        let mut agent = ScriptedAgent::new([Intent::Call, Intent::Fold]);
        assert_eq!(agent.request_action(&view(&board, 1), 2).unwrap(), Action::call(1, 2));
        assert_eq!(agent.request_action(&view(&board, 2), 2).unwrap(), Action::Fold);
        assert_eq!(
            agent.request_action(&view(&board, 2), 2),
            Err(AgentError::ScriptExhausted(PlayerId::new(1)))
        );
        assert_eq!(agent.asked().len(), 3);
    }

    #[test]
    fn table_dispatches_by_seat() {
        let board = CommunityCards::new();
        let mut table = AgentTable::for_seats(2);
        assert_eq!(
            table.request_action(&view(&board, 1), 2),
            Err(AgentError::NoAgent(PlayerId::new(1)))
        );
        table.set_agent(PlayerId::new(1), Some(Box::new(ScriptedAgent::new([Intent::Fold]))));
        assert!(table.has_agent(PlayerId::new(1)));
        assert!(!table.has_agent(PlayerId::new(2)));
        assert_eq!(table.request_action(&view(&board, 1), 2).unwrap(), Action::Fold);
        assert_eq!(format!("{table:?}"), "AgentTable(S-)");
    }
}
