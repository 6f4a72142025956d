//! Terminal front-end: a ratatui table and a keyboard-driven [`ActionProvider`].
//!
//! [`ActionProvider`]: crate::agents::ActionProvider

pub mod app;
pub mod controller;
pub mod ui;
