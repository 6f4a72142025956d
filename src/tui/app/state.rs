use crate::agents::{Action, LegalActions, PlayerView};
use crate::events::GameEvent;
use crate::game::{PlayerId, Street};
use crate::hand::{CommunityCards, HoleCards};
use std::collections::VecDeque;

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    Fold,
    Call,
    Check,
    RaiseOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountSubmit,
    AmountCancel,
    ToggleHelp,
    ToggleHistory,
    Quit,
}

/// What a handled key produced for the waiting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResult {
    Act(Action),
    Quit,
}

/// One seat as the table shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub id: PlayerId,
    pub bid: u64,
    pub in_hand: bool,
    pub last_action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Prompt {
    bid: u64,
    outstanding: u64,
}

/// Everything the terminal shows, rebuilt from engine events. No terminal needed.
#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub human: PlayerId,
    seats: Vec<SeatView>,
    hole: Option<HoleCards>,
    street: Street,
    community: CommunityCards,
    pot: u64,
    outstanding_bid: u64,
    prompt: Option<Prompt>,
    log: VecDeque<String>,
    help_open: bool,
    history_open: bool,
    amount_entry: Option<String>,
    message: Option<String>,
    outcome: Option<String>,
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const LOG_CAPACITY: usize = 200;
    const MAX_AMOUNT_DIGITS: usize = 12;

    pub const ILLEGAL_ACTION: &'static str = "You may not do that.";
    pub const RAISE_TOO_LOW: &'static str = "Please enter a higher value";

    pub fn new(human: PlayerId) -> Self {
        Self {
            human,
            seats: Vec::new(),
            hole: None,
            street: Street::Preflop,
            community: CommunityCards::new(),
            pot: 0,
            outstanding_bid: 0,
            prompt: None,
            log: VecDeque::new(),
            help_open: false,
            history_open: false,
            amount_entry: None,
            message: None,
            outcome: None,
        }
    }

    pub fn seats(&self) -> &[SeatView] {
        &self.seats
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Show the human's cards before they are first asked to act.
    pub fn reveal_hole(&mut self, hole: HoleCards) {
        self.hole = Some(hole);
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn community(&self) -> &CommunityCards {
        &self.community
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn outstanding_bid(&self) -> u64 {
        self.outstanding_bid
    }

    /// Legal moves while the human is being asked to act.
    pub fn legal_actions(&self) -> Option<LegalActions> {
        self.prompt.map(|p| LegalActions::for_bids(p.bid, p.outstanding))
    }

    pub fn awaiting_input(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    /// The last `n` event lines, oldest first.
    pub fn recent_log(&self, n: usize) -> impl Iterator<Item = &str> {
        let skip = self.log.len().saturating_sub(n);
        self.log.iter().skip(skip).map(String::as_str)
    }

    pub fn apply_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HandStarted { players } => {
                self.seats = (1..=*players)
                    .map(|n| SeatView {
                        id: PlayerId::new(n),
                        bid: 0,
                        in_hand: true,
                        last_action: None,
                    })
                    .collect();
                self.community = CommunityCards::new();
                self.street = Street::Preflop;
                self.pot = 0;
                self.outstanding_bid = 0;
                self.outcome = None;
                self.log.clear();
            }
            GameEvent::BlindPosted { player, amount } => {
                if let Some(seat) = self.seat_mut(*player) {
                    seat.bid = *amount;
                    seat.last_action = Some(format!("Blind {amount}"));
                }
            }
            GameEvent::StreetStarted { street, community } => {
                self.street = *street;
                self.community = community.clone();
                if *street != Street::Preflop {
                    self.outstanding_bid = 0;
                    for seat in self.seats.iter_mut().filter(|s| s.in_hand) {
                        seat.bid = 0;
                        seat.last_action = None;
                    }
                }
            }
            GameEvent::ActionApplied { player, action, .. } => {
                let outstanding = self.outstanding_bid;
                if let Some(seat) = self.seat_mut(*player) {
                    match *action {
                        Action::Fold => seat.in_hand = false,
                        Action::Check => {}
                        Action::Call { .. } => seat.bid = outstanding,
                        Action::Raise { amount, .. } => seat.bid = amount,
                    }
                    seat.last_action = Some(action.to_string());
                }
            }
            GameEvent::PotChanged { pot, outstanding_bid } => {
                self.pot = *pot;
                self.outstanding_bid = *outstanding_bid;
            }
            GameEvent::Eliminated { .. } | GameEvent::Showdown { .. } => {
                self.outcome = Some(event.to_string());
                self.prompt = None;
            }
            _ => {}
        }
        if self.log.len() == Self::LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(event.to_string());
    }

    fn seat_mut(&mut self, id: PlayerId) -> Option<&mut SeatView> {
        self.seats.iter_mut().find(|s| s.id == id)
    }

    /// The engine is waiting on the human.
    pub fn begin_prompt(&mut self, view: &PlayerView<'_>, outstanding_bid: u64) {
        self.hole = Some(view.hole);
        self.prompt = Some(Prompt { bid: view.bid, outstanding: outstanding_bid });
        self.amount_entry = None;
        self.message = None;
    }

    fn finish(&mut self, action: Action) -> Option<PromptResult> {
        self.prompt = None;
        self.amount_entry = None;
        self.message = None;
        Some(PromptResult::Act(action))
    }

    fn refuse(&mut self, message: &str) -> Option<PromptResult> {
        self.message = Some(message.to_string());
        None
    }

    pub fn handle_input(&mut self, input: InputAction) -> Option<PromptResult> {
        match input {
            InputAction::ToggleHelp => {
                self.history_open = false;
                self.help_open = !self.help_open;
                return None;
            }
            InputAction::ToggleHistory => {
                self.help_open = false;
                self.history_open = !self.history_open;
                return None;
            }
            InputAction::Quit => return Some(PromptResult::Quit),
            _ => {}
        }
        let prompt = self.prompt?;
        let legal = LegalActions::for_bids(prompt.bid, prompt.outstanding);

        if self.amount_entry.is_some() {
            return self.handle_amount_entry(input, prompt.outstanding);
        }
        match input {
            InputAction::Fold => self.finish(Action::Fold),
            InputAction::Check if legal.check => self.finish(Action::Check),
            InputAction::Call if legal.call => {
                self.finish(Action::call(prompt.bid, prompt.outstanding))
            }
            InputAction::Check | InputAction::Call => self.refuse(Self::ILLEGAL_ACTION),
            InputAction::RaiseOpen => {
                self.amount_entry = Some(legal.min_raise_to.to_string());
                self.message = None;
                None
            }
            _ => None,
        }
    }

    fn handle_amount_entry(&mut self, input: InputAction, outstanding: u64) -> Option<PromptResult> {
        let buf = self.amount_entry.as_mut()?;
        match input {
            InputAction::AmountDigit(d) if d <= 9 => {
                if buf.len() < Self::MAX_AMOUNT_DIGITS {
                    buf.push(char::from(b'0' + d));
                }
                None
            }
            InputAction::AmountBackspace => {
                buf.pop();
                None
            }
            InputAction::AmountCancel => {
                self.amount_entry = None;
                self.message = None;
                None
            }
            InputAction::AmountSubmit => match buf.parse::<u64>() {
                Ok(amount) if amount > outstanding => {
                    self.finish(Action::raise_to(amount, outstanding))
                }
                _ => self.refuse(Self::RAISE_TOO_LOW),
            },
            _ => None,
        }
    }
}
