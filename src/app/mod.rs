//! Core application modules for PromptCoder.
//!
//! # Module Organization
//!
//! ## Editing and Preview
//! - [`source_document`] - The editable HTML/CSS/JS document and its revisioned buffer
//! - [`debounce`] - Debounced change notifier driving preview refreshes
//! - [`preview`] - Document composition and the sandboxed preview process
//! - [`export`] - Single-file project download
//!
//! ## Backend Integration
//! - [`generation`] - AI code-generation client and worker dispatch
//! - [`auth`] - External identity provider integration and the session gate
//! - [`config`] - `promptcoder.json` configuration loader
//!
//! ## UI and Infrastructure
//! - [`coderui`] - Complete user interface implementation
//! - [`notifications`] - Notification system for user feedback
//! - [`web_syntax`] - Editor syntax definitions for the three source fields

pub mod auth;
pub mod coderui;
pub mod config;
pub mod debounce;
pub mod export;
pub mod generation;
pub mod notifications;
pub mod preview;
pub mod source_document;
pub mod web_syntax;

pub use coderui::app::CoderApp;
