use crate::agents::{Action, ActionProvider, AgentError, AgentKind, PlayerView};
use crate::events::GameEvent;
use crate::game::PlayerId;
use crate::tui::app::{AppState, InputAction, PromptResult};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type Term = Terminal<CrosstermBackend<Stdout>>;

/// Map a key to an input, given whether the raise amount entry is open.
pub fn map_key(code: KeyCode, amount_entry: bool) -> Option<InputAction> {
    if amount_entry {
        return match code {
            KeyCode::Esc => Some(InputAction::AmountCancel),
            KeyCode::Enter => Some(InputAction::AmountSubmit),
            KeyCode::Backspace => Some(InputAction::AmountBackspace),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(InputAction::AmountDigit(c as u8 - b'0')),
            _ => None,
        };
    }
    match code {
        KeyCode::Char('f') | KeyCode::Char('F') => Some(InputAction::Fold),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(InputAction::Call),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(InputAction::Check),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::RaiseOpen),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(InputAction::ToggleHistory),
        KeyCode::Char('?') => Some(InputAction::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputAction::Quit),
        _ => None,
    }
}

/// The human seat: draws the table and blocks on the keyboard when asked to act.
pub struct TerminalAgent {
    terminal: Term,
    app: AppState,
}

impl TerminalAgent {
    pub fn new(terminal: Term, human: PlayerId) -> Self {
        Self { terminal, app: AppState::new(human) }
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut AppState {
        &mut self.app
    }

    pub fn redraw(&mut self) -> io::Result<()> {
        let app = &self.app;
        self.terminal.draw(|f| ui::draw(f, app))?;
        Ok(())
    }

    fn next_key(&mut self) -> io::Result<KeyCode> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key.code);
                }
            }
        }
    }

    /// Show the finished hand until the user picks: `true` for another hand.
    pub fn show_outcome(&mut self) -> io::Result<bool> {
        loop {
            self.redraw()?;
            match self.next_key()? {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(true),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
                code => {
                    if let Some(input) = map_key(code, false) {
                        self.app.handle_input(input);
                    }
                }
            }
        }
    }

    /// Hand the terminal back for restoring.
    pub fn into_terminal(self) -> Term {
        self.terminal
    }
}

impl ActionProvider for TerminalAgent {
    fn request_action(
        &mut self,
        view: &PlayerView<'_>,
        outstanding_bid: u64,
    ) -> Result<Action, AgentError> {
        self.app.begin_prompt(view, outstanding_bid);
        loop {
            self.redraw()?;
            let code = self.next_key()?;
            let Some(input) = map_key(code, self.app.amount_entry_active()) else {
                continue;
            };
            match self.app.handle_input(input) {
                Some(PromptResult::Act(action)) => {
                    self.redraw()?;
                    return Ok(action);
                }
                Some(PromptResult::Quit) => return Err(AgentError::Quit),
                None => {}
            }
        }
    }

    fn observe(&mut self, event: &GameEvent) {
        self.app.apply_event(event);
        if let Err(e) = self.redraw() {
            log::warn!("redraw failed: {e}");
        }
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}
