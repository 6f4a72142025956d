use crate::agents::{Action, ActionProvider, AgentError, PlayerView};
use crate::config::{ConfigError, TableConfig};
use crate::deck::{Dealer, Deck, DeckError};
use crate::evaluator::{best_hand, EvalError, Evaluation};
use crate::events::GameEvent;
use crate::hand::{CommunityCards, HandError, HoleCards};
use core::fmt;
use rand::Rng;

/// Seat identity, assigned at seating from 1 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(usize);

impl PlayerId {
    /// `n` is the 1-based seat number.
    pub const fn new(n: usize) -> Self {
        Self(n)
    }

    pub const fn number(self) -> usize {
        self.0
    }

    /// 0-based index into the seat arena.
    pub const fn index(self) -> usize {
        self.0.saturating_sub(1)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards dealt when this street's betting closes.
    pub fn cards_dealt_after(self) -> usize {
        match self {
            Street::Preflop => 3,
            Street::Flop | Street::Turn => 1,
            Street::River => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("the hand is already finished")]
    HandFinished,
    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("{0} is no longer in the hand")]
    PlayerNotActive(PlayerId),
    #[error("cannot check: bid {bid} is below the outstanding bid {outstanding}")]
    CheckNotAllowed { bid: u64, outstanding: u64 },
    #[error("nothing to call: bid already matches {outstanding}")]
    CallNotAllowed { outstanding: u64 },
    #[error("raise to {amount} must exceed the outstanding bid {outstanding}")]
    RaiseTooSmall { amount: u64, outstanding: u64 },
    #[error("pot increment should be {expected}, got {got}")]
    IncrementMismatch { expected: u64, got: u64 },
    #[error("adding {increment} to a pot of {pot} overflows")]
    PotOverflow { pot: u64, increment: u64 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("{player} gave {attempts} illegal actions in a row")]
    TooManyIllegalActions { player: PlayerId, attempts: u32 },
    #[error("{0} betting is still open")]
    StreetInProgress(Street),
    #[error("no street follows the river")]
    NoNextStreet,
    #[error("showdown needs the river, hand is on the {0}")]
    ShowdownBeforeRiver(Street),
}

/// One contender's hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownEntry {
    pub player: PlayerId,
    pub evaluation: Evaluation,
}

/// How a hand ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandOutcome {
    /// Everyone else folded.
    Uncontested { winner: PlayerId, pot: u64 },
    /// `winner` is `None` when the best hands tie exactly; the pot is not split.
    Showdown { winner: Option<PlayerId>, pot: u64, results: Vec<ShowdownEntry> },
}

impl HandOutcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match *self {
            HandOutcome::Uncontested { winner, .. } => Some(winner),
            HandOutcome::Showdown { winner, .. } => winner,
        }
    }

    pub fn pot(&self) -> u64 {
        match *self {
            HandOutcome::Uncontested { pot, .. } | HandOutcome::Showdown { pot, .. } => pot,
        }
    }

    /// Showdown evaluations; empty for an uncontested hand.
    pub fn results(&self) -> &[ShowdownEntry] {
        match self {
            HandOutcome::Uncontested { .. } => &[],
            HandOutcome::Showdown { results, .. } => results,
        }
    }
}

impl fmt::Display for HandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandOutcome::Uncontested { winner, pot } => write!(f, "{winner} wins {pot} uncontested"),
            HandOutcome::Showdown { winner: Some(w), pot, results } => {
                match results.iter().find(|e| e.player == *w) {
                    Some(entry) => write!(f, "{w} wins {pot} with {}", entry.evaluation),
                    None => write!(f, "{w} wins {pot}"),
                }
            }
            HandOutcome::Showdown { winner: None, pot, .. } => {
                write!(f, "Tie for best hand, pot of {pot} is not split")
            }
        }
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) hole: HoleCards,
    pub(crate) bid: u64,
    pub(crate) action_required: bool,
    pub(crate) in_hand: bool,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hole(&self) -> HoleCards {
        self.hole
    }

    /// Chips bid on the current street.
    pub fn bid(&self) -> u64 {
        self.bid
    }

    /// Still has to respond to the outstanding bid this street.
    pub fn action_required(&self) -> bool {
        self.action_required
    }

    /// False once the player has folded.
    pub fn in_hand(&self) -> bool {
        self.in_hand
    }
}

/// One hand: dealing, betting on four streets, and the showdown.
///
/// ```
/// use holdem_round::agents::{Intent, ScriptedAgent};
/// use holdem_round::config::TableConfig;
/// use holdem_round::game::{Game, HandOutcome, PlayerId};
///
/// let cfg = TableConfig::default().with_players(2).with_seed(3);
/// let mut game = Game::new(cfg).unwrap();
/// let mut script = ScriptedAgent::new([Intent::Fold]);
/// let outcome = game.play_hand(&mut script).unwrap();
/// assert_eq!(outcome, HandOutcome::Uncontested { winner: PlayerId::new(2), pot: 3 });
/// ```
#[derive(Debug)]
pub struct Game<D: Dealer = Deck> {
    config: TableConfig,
    dealer: D,
    players: Vec<Player>,
    community: CommunityCards,
    street: Street,
    outstanding_bid: u64,
    pot: u64,
    /// Seat the scan for the next actor resumes from.
    cursor: usize,
    outcome: Option<HandOutcome>,
    history: Vec<GameEvent>,
    /// History entries already passed to a provider's `observe`.
    delivered: usize,
}

impl Game<Deck> {
    /// Shuffle a fresh deck (seeded from the config when set) and start a hand.
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("shuffling with seed {seed}");
        Self::with_dealer(config, Deck::shuffled(seed))
    }
}

impl<D: Dealer> Game<D> {
    /// Start a hand drawing from `dealer`: deal hole cards and post the blinds.
    pub fn with_dealer(config: TableConfig, mut dealer: D) -> Result<Self, GameError> {
        config.validate()?;

        let mut players = Vec::with_capacity(config.players);
        for n in 1..=config.players {
            let a = dealer.draw()?;
            let b = dealer.draw()?;
            players.push(Player {
                id: PlayerId::new(n),
                hole: HoleCards::try_new(a, b)?,
                bid: 0,
                action_required: true,
                in_hand: true,
            });
        }

        let mut game = Self {
            config,
            dealer,
            players,
            community: CommunityCards::new(),
            street: Street::Preflop,
            outstanding_bid: 0,
            pot: 0,
            cursor: 0,
            outcome: None,
            history: Vec::new(),
            delivered: 0,
        };

        game.emit(GameEvent::HandStarted { players: game.players.len() });
        for n in 1..=game.players.len() {
            game.emit(GameEvent::HoleCardsDealt { player: PlayerId::new(n) });
        }
        game.emit(GameEvent::StreetStarted {
            street: Street::Preflop,
            community: CommunityCards::new(),
        });
        game.post_blinds();
        Ok(game)
    }

    fn post_blinds(&mut self) {
        let blinds = [self.config.small_blind, self.config.big_blind];
        let posted: Vec<(PlayerId, u64)> =
            self.players.iter().map(|p| p.id).zip(blinds).collect();
        for (player, amount) in posted {
            self.players[player.index()].bid = amount;
            self.pot += amount;
            self.emit(GameEvent::BlindPosted { player, amount });
        }
        self.outstanding_bid = self.config.big_blind;
        self.emit(GameEvent::PotChanged { pot: self.pot, outstanding_bid: self.outstanding_bid });
    }

    fn emit(&mut self, event: GameEvent) {
        match &event {
            GameEvent::HandStarted { .. }
            | GameEvent::StreetStarted { .. }
            | GameEvent::StreetEnded { .. }
            | GameEvent::Eliminated { .. }
            | GameEvent::Showdown { .. } => log::info!("{event}"),
            _ => log::debug!("{event}"),
        }
        self.history.push(event);
    }

    /// Pass every event the provider has not seen yet to its `observe` hook.
    pub fn deliver_events<P: ActionProvider + ?Sized>(&mut self, provider: &mut P) {
        for event in &self.history[self.delivered..] {
            provider.observe(event);
        }
        self.delivered = self.history.len();
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn dealer(&self) -> &D {
        &self.dealer
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    /// The amount every active player must match this street.
    pub fn outstanding_bid(&self) -> u64 {
        self.outstanding_bid
    }

    pub fn community(&self) -> &CommunityCards {
        &self.community
    }

    /// All seats in seating order, folded ones included.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index()).filter(|p| p.id == id)
    }

    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players.iter().filter(|p| p.in_hand).map(|p| p.id).collect()
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand).count()
    }

    pub fn outcome(&self) -> Option<&HandOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Every event of this hand, oldest first.
    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    /// The last `n` events.
    pub fn history_recent(&self, n: usize) -> &[GameEvent] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Whether any active player still has to act this street.
    pub fn action_pending(&self) -> bool {
        self.outcome.is_none() && self.players.iter().any(|p| p.in_hand && p.action_required)
    }

    /// The player whose turn it is: the next flagged seat in seating order, wrapping
    /// back to the first seat once the end of the table is passed.
    pub fn next_to_act(&self) -> Option<PlayerId> {
        if self.outcome.is_some() {
            return None;
        }
        let n = self.players.len();
        (0..n)
            .map(|i| &self.players[(self.cursor + i) % n])
            .find(|p| p.in_hand && p.action_required)
            .map(|p| p.id)
    }

    fn seat(&self, id: PlayerId) -> Result<&Player, ActionError> {
        let player = self.player(id).ok_or(ActionError::UnknownPlayer(id))?;
        if !player.in_hand {
            return Err(ActionError::PlayerNotActive(id));
        }
        Ok(player)
    }

    /// The read-only view a provider gets when `id` is asked to act.
    pub fn view(&self, id: PlayerId) -> Result<PlayerView<'_>, ActionError> {
        let player = self.seat(id)?;
        Ok(PlayerView {
            player: id,
            hole: player.hole,
            bid: player.bid,
            street: self.street,
            community: &self.community,
            pot: self.pot,
            big_blind: self.config.big_blind,
            active_players: self.active_count(),
        })
    }

    /// Check `action` against the current bids without applying it.
    pub fn validate(&self, id: PlayerId, action: &Action) -> Result<(), ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::HandFinished);
        }
        let bid = self.seat(id)?.bid;
        let outstanding = self.outstanding_bid;
        let rule = match *action {
            Action::Fold => Ok(()),
            Action::Check if bid == outstanding => Ok(()),
            Action::Check => Err(ActionError::CheckNotAllowed { bid, outstanding }),
            Action::Call { .. } if bid >= outstanding => {
                Err(ActionError::CallNotAllowed { outstanding })
            }
            Action::Call { pot_increment } => {
                expect_increment(outstanding - bid, pot_increment)
            }
            Action::Raise { amount, .. } if amount <= outstanding => {
                Err(ActionError::RaiseTooSmall { amount, outstanding })
            }
            Action::Raise { amount, pot_increment } => {
                expect_increment(amount - outstanding, pot_increment)
            }
        };
        rule?;
        let increment = action.pot_increment();
        match self.pot.checked_add(increment) {
            Some(_) => Ok(()),
            None => Err(ActionError::PotOverflow { pot: self.pot, increment }),
        }
    }

    /// Ask the provider for `id`'s action, re-asking after illegal answers.
    ///
    /// Gives up with [`GameError::TooManyIllegalActions`] once the configured number
    /// of attempts is spent. Nothing is recorded for rejected answers.
    pub fn request_action<P: ActionProvider + ?Sized>(
        &mut self,
        id: PlayerId,
        provider: &mut P,
    ) -> Result<Action, GameError> {
        let attempts = self.config.max_prompt_attempts;
        for attempt in 1..=attempts {
            self.deliver_events(provider);
            let view = self.view(id)?;
            let action = provider.request_action(&view, self.outstanding_bid)?;
            match self.validate(id, &action) {
                Ok(()) => return Ok(action),
                Err(e) => log::warn!("{id} tried {action}: {e} (attempt {attempt}/{attempts})"),
            }
        }
        Err(GameError::TooManyIllegalActions { player: id, attempts })
    }

    /// Apply a decision for `id`.
    ///
    /// A fold removes the player for the rest of the hand; their chips stay in the
    /// pot. Calls and raises add their pot increment. A raise sets the outstanding
    /// bid and re-opens action for every other active player. The actor's own flag
    /// is always cleared. Turn order is not enforced here.
    pub fn apply_response(&mut self, id: PlayerId, action: Action) -> Result<(), ActionError> {
        self.validate(id, &action)?;
        let idx = id.index();
        let street = self.street;
        let outstanding = self.outstanding_bid;

        match action {
            Action::Fold => self.players[idx].in_hand = false,
            Action::Check => {}
            Action::Call { pot_increment } => {
                self.players[idx].bid = outstanding;
                self.pot += pot_increment;
            }
            Action::Raise { amount, pot_increment } => {
                self.players[idx].bid = amount;
                self.pot += pot_increment;
                self.outstanding_bid = amount;
                for p in self.players.iter_mut().filter(|p| p.in_hand && p.id != id) {
                    p.action_required = true;
                }
            }
        }
        self.players[idx].action_required = false;
        self.cursor = idx + 1;

        self.emit(GameEvent::ActionApplied { player: id, action, street });
        if action.pot_increment() > 0 {
            self.emit(GameEvent::PotChanged {
                pot: self.pot,
                outstanding_bid: self.outstanding_bid,
            });
        }
        if action == Action::Fold {
            self.check_elimination();
        }
        Ok(())
    }

    /// End the hand if exactly one player is left in it, returning that player.
    pub fn check_elimination(&mut self) -> Option<PlayerId> {
        if let Some(HandOutcome::Uncontested { winner, .. }) = self.outcome {
            return Some(winner);
        }
        if self.outcome.is_some() {
            return None;
        }
        let mut active = self.players.iter().filter(|p| p.in_hand);
        let winner = match (active.next(), active.next()) {
            (Some(p), None) => p.id,
            _ => return None,
        };
        self.outcome = Some(HandOutcome::Uncontested { winner, pot: self.pot });
        self.emit(GameEvent::Eliminated { winner, pot: self.pot });
        Some(winner)
    }

    /// Close the current street: burn, deal the next community cards and reset bids.
    ///
    /// Fails while anyone still has to act, after the hand is over, and on the river
    /// (which goes to [`Game::showdown`] instead).
    pub fn advance_street(&mut self) -> Result<Street, GameError> {
        if self.outcome.is_some() {
            return Err(ActionError::HandFinished.into());
        }
        if self.action_pending() {
            return Err(GameError::StreetInProgress(self.street));
        }
        let next = self.street.next().ok_or(GameError::NoNextStreet)?;
        self.emit(GameEvent::StreetEnded { street: self.street });

        self.dealer.burn()?;
        self.emit(GameEvent::CardBurned);
        let mut dealt = Vec::with_capacity(self.street.cards_dealt_after());
        for _ in 0..self.street.cards_dealt_after() {
            let card = self.dealer.draw()?;
            self.community.push(card)?;
            dealt.push(card);
        }
        self.emit(GameEvent::CommunityDealt { cards: dealt });

        for p in self.players.iter_mut().filter(|p| p.in_hand) {
            p.bid = 0;
            p.action_required = true;
        }
        self.outstanding_bid = 0;
        self.cursor = 0;
        self.street = next;
        self.emit(GameEvent::StreetStarted { street: next, community: self.community.clone() });
        Ok(next)
    }

    /// Evaluate every remaining player's best hand and pick the strictly best one.
    ///
    /// An exact tie for best hand yields no winner; the pot is not split.
    pub fn showdown(&mut self) -> Result<HandOutcome, GameError> {
        if let Some(outcome) = &self.outcome {
            return Ok(outcome.clone());
        }
        if self.street != Street::River {
            return Err(GameError::ShowdownBeforeRiver(self.street));
        }
        if self.action_pending() {
            return Err(GameError::StreetInProgress(self.street));
        }
        self.emit(GameEvent::StreetEnded { street: Street::River });

        let mut results = Vec::with_capacity(self.players.len());
        for p in self.players.iter().filter(|p| p.in_hand) {
            results.push(ShowdownEntry { player: p.id, evaluation: best_hand(&p.hole, &self.community)? });
        }
        let winner = match results.iter().map(|e| &e.evaluation).max() {
            Some(best) => {
                let mut top = results.iter().filter(|e| e.evaluation == *best);
                match (top.next(), top.next()) {
                    (Some(entry), None) => Some(entry.player),
                    _ => None,
                }
            }
            None => None,
        };
        if winner.is_none() {
            log::info!("exact tie for best hand, pot of {} stays unsplit", self.pot);
        }

        let outcome = HandOutcome::Showdown { winner, pot: self.pot, results: results.clone() };
        self.emit(GameEvent::Showdown { results, winner, pot: self.pot });
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Run the current street until nobody is left to act or the hand ends.
    pub fn play_street<P: ActionProvider + ?Sized>(
        &mut self,
        provider: &mut P,
    ) -> Result<(), GameError> {
        while let Some(id) = self.next_to_act() {
            let action = self.request_action(id, provider)?;
            self.apply_response(id, action)?;
        }
        self.deliver_events(provider);
        Ok(())
    }

    /// Play the hand to the end: every street, then the showdown if it gets there.
    pub fn play_hand<P: ActionProvider + ?Sized>(
        &mut self,
        provider: &mut P,
    ) -> Result<HandOutcome, GameError> {
        loop {
            self.play_street(provider)?;
            if let Some(outcome) = &self.outcome {
                return Ok(outcome.clone());
            }
            if self.street == Street::River {
                let outcome = self.showdown()?;
                self.deliver_events(provider);
                return Ok(outcome);
            }
            self.advance_street()?;
        }
    }
}

fn expect_increment(expected: u64, got: u64) -> Result<(), ActionError> {
    if expected == got {
        Ok(())
    } else {
        Err(ActionError::IncrementMismatch { expected, got })
    }
}
