//! Editable source document and buffer.
//!
//! The [`SourceDocument`] is the single piece of shared mutable state in the
//! application: the HTML/CSS/JS triple the editor operates on and the preview
//! renders from. It is owned by the UI thread and replaced wholesale on each
//! generation result or user edit.
//!
//! The [`SourceBuffer`] wraps the document with a revision counter. Every
//! mutation bumps the revision, which is what the debounced change notifier
//! keys off to detect "something changed since the last snapshot".

use serde::{Deserialize, Serialize};

/// Which field of the source document an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceField {
    Html,
    Css,
    Js,
}

impl std::fmt::Display for SourceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceField::Html => write!(f, "HTML"),
            SourceField::Css => write!(f, "CSS"),
            SourceField::Js => write!(f, "JS"),
        }
    }
}

/// One editable web document: markup, style and script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl SourceDocument {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// True when every field is blank after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.html.trim().is_empty() && self.css.trim().is_empty() && self.js.trim().is_empty()
    }

    pub fn field(&self, field: SourceField) -> &str {
        match field {
            SourceField::Html => &self.html,
            SourceField::Css => &self.css,
            SourceField::Js => &self.js,
        }
    }

    pub fn field_mut(&mut self, field: SourceField) -> &mut String {
        match field {
            SourceField::Html => &mut self.html,
            SourceField::Css => &mut self.css,
            SourceField::Js => &mut self.js,
        }
    }
}

/// The editable source buffer: current document plus a revision counter.
///
/// Single-writer, single-reader semantics are sufficient here (only the UI
/// thread touches the buffer), so no internal locking is used. `get()` always
/// reflects the most recent completed `set`/`update`, and `set` replaces the
/// whole document in one assignment so a reader never observes a half-replaced
/// document.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    document: SourceDocument,
    revision: u64,
}

impl SourceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &SourceDocument {
        &self.document
    }

    /// Revision counter, bumped on every completed mutation. Starts at 0 for
    /// the empty document created at session start.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the whole document atomically.
    pub fn set(&mut self, document: SourceDocument) {
        self.document = document;
        self.revision += 1;
    }

    /// Replace a single field, leaving the others untouched.
    pub fn update(&mut self, field: SourceField, text: impl Into<String>) {
        *self.document.field_mut(field) = text.into();
        self.revision += 1;
    }

    /// Mutable access for the editor widget. The editor binds
    /// `&mut String` directly; callers must report whether the widget actually
    /// changed the text via [`SourceBuffer::mark_changed`].
    pub fn field_mut(&mut self, field: SourceField) -> &mut String {
        self.document.field_mut(field)
    }

    /// Record that an in-place edit (through [`SourceBuffer::field_mut`])
    /// modified the document.
    pub fn mark_changed(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(SourceDocument::default().is_blank());
        assert!(SourceDocument::new("  \n", "\t", "").is_blank());
        assert!(!SourceDocument::new("<p>hi</p>", "", "").is_blank());
        assert!(!SourceDocument::new("", "", "let x = 1;").is_blank());
    }

    #[test]
    fn test_set_replaces_whole_document() {
        let mut buffer = SourceBuffer::new();
        buffer.set(SourceDocument::new("<p>a</p>", "p { color: red }", "x()"));
        let doc = buffer.get();
        assert_eq!(doc.html, "<p>a</p>");
        assert_eq!(doc.css, "p { color: red }");
        assert_eq!(doc.js, "x()");
    }

    #[test]
    fn test_revision_advances_on_every_mutation() {
        let mut buffer = SourceBuffer::new();
        assert_eq!(buffer.revision(), 0);

        buffer.set(SourceDocument::new("<p>a</p>", "", ""));
        assert_eq!(buffer.revision(), 1);

        buffer.update(SourceField::Css, "body {}");
        assert_eq!(buffer.revision(), 2);
        assert_eq!(buffer.get().html, "<p>a</p>");
        assert_eq!(buffer.get().css, "body {}");

        buffer.field_mut(SourceField::Js).push_str("f();");
        buffer.mark_changed();
        assert_eq!(buffer.revision(), 3);
        assert_eq!(buffer.get().js, "f();");
    }
}
