mod state;

pub use state::{AppState, InputAction, PromptResult, SeatView};
