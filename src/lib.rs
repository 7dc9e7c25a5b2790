//! PromptCoder - AI-Assisted Web Snippet Builder
//!
//! PromptCoder is a desktop application for generating, editing and previewing
//! small HTML/CSS/JS snippets from natural-language prompts. Type a prompt, an
//! AI backend produces the code, the built-in editor lets you refine it, and a
//! sandboxed preview window renders the result live as you type.
//!
//! # Core Features
//!
//! - **Prompt-driven Generation**: Describe a component; the backend returns runnable code
//! - **Tabbed Code Editor**: Syntax-highlighted HTML, CSS and JS editing
//! - **Live Sandboxed Preview**: Debounced re-render in a separate preview process
//! - **Fault Containment**: A throwing script shows an error banner inside the preview only
//! - **Single-file Export**: Download the whole project as one `.html` artifact
//! - **Hosted Sign-in**: Browser-based authentication against an external identity provider
//!
//! # Architecture Overview
//!
//! - **UI Layer** ([`app::coderui`]): egui-based desktop interface
//! - **Editing Core** ([`app::source_document`], [`app::debounce`]): revisioned
//!   buffer plus the quiet-period notifier that decides when to re-render
//! - **Preview** ([`app::preview`]): document composition and the separate
//!   preview process the untrusted script runs in
//! - **Backend Integration** ([`app::generation`], [`app::auth`]): blocking
//!   HTTP clients driven from worker threads, polled by the UI loop
//!
//! The main application entry point is [`CoderApp`], which coordinates all
//! subsystems and owns the single source buffer.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
pub use app::CoderApp;
