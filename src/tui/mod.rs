//! Terminal User Interface (TUI) module.
//!
//! This module provides the interactive split-pane interface using the
//! `ratatui` library: the event loop, the screen state machines and the view.

mod app;
pub mod event;
pub mod form;
pub mod screen;
pub mod theme;
pub mod view;

pub use app::{App, Effect, MenuItem, ScreenKind, MENU_ITEMS};
pub use event::{Action, AppEvent};
pub use theme::Theme;
