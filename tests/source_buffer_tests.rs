#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use promptcoder::app::source_document::{SourceBuffer, SourceDocument, SourceField};

    #[test]
    fn test_new_buffer_is_blank_at_revision_zero() {
        let buffer = SourceBuffer::new();
        assert_eq!(buffer.revision(), 0);
        assert!(buffer.get().is_blank());
    }

    #[test]
    fn test_set_replaces_document_atomically() {
        let mut buffer = SourceBuffer::new();
        buffer.set(SourceDocument::new(
            "<h1>Title</h1>",
            "h1 { color: blue; }",
            "console.log('hi');",
        ));

        let doc = buffer.get();
        assert_eq!(doc.html, "<h1>Title</h1>");
        assert_eq!(doc.css, "h1 { color: blue; }");
        assert_eq!(doc.js, "console.log('hi');");
        assert_eq!(buffer.revision(), 1);

        // A second set fully replaces the previous document.
        buffer.set(SourceDocument::new("<p>b</p>", "", ""));
        assert_eq!(buffer.get().html, "<p>b</p>");
        assert_eq!(buffer.get().css, "");
        assert_eq!(buffer.revision(), 2);
    }

    #[test]
    fn test_field_update_leaves_other_fields_untouched() {
        let mut buffer = SourceBuffer::new();
        buffer.set(SourceDocument::new("<p>a</p>", "p {}", "f();"));

        buffer.update(SourceField::Css, "p { margin: 0; }");
        assert_eq!(buffer.get().html, "<p>a</p>");
        assert_eq!(buffer.get().css, "p { margin: 0; }");
        assert_eq!(buffer.get().js, "f();");
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let mut buffer = SourceBuffer::new();

        buffer.set(SourceDocument::default());
        buffer.update(SourceField::Html, "<p>a</p>");
        buffer.field_mut(SourceField::Js).push_str("g();");
        buffer.mark_changed();

        assert_eq!(buffer.revision(), 3);
    }

    #[test]
    fn test_blank_detection_ignores_whitespace() {
        assert!(SourceDocument::new("  ", "\n\t", " ").is_blank());
        assert!(!SourceDocument::new("", " .a{} ", "").is_blank());
    }

    #[test]
    fn test_field_accessors_agree() {
        let doc = SourceDocument::new("<div></div>", "div {}", "let x;");
        assert_eq!(doc.field(SourceField::Html), "<div></div>");
        assert_eq!(doc.field(SourceField::Css), "div {}");
        assert_eq!(doc.field(SourceField::Js), "let x;");
    }
}
