//! User interface for PromptCoder.
//!
//! The [`app::CoderApp`] struct coordinates the panels and windows: the
//! prompt panel on the left, the tabbed editor/preview workspace in the
//! center, the menu bar, and the sign-in window the session gate raises for
//! unauthenticated users.

pub mod app;
pub mod editor_pane;
pub mod help_window;
pub mod login_window;
pub mod menu;
pub mod prompt_panel;

pub use app::CoderApp;
