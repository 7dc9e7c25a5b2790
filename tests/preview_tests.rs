#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use promptcoder::app::preview::{
        compose_export_document, compose_preview_document, parse_preview_args,
        stage_preview_document, PreviewSnapshot,
    };
    use promptcoder::app::source_document::{SourceBuffer, SourceDocument, SourceField};

    fn snapshot_of(html: &str, css: &str, js: &str) -> PreviewSnapshot {
        let mut buffer = SourceBuffer::new();
        buffer.set(SourceDocument::new(html, css, js));
        PreviewSnapshot::take(&buffer)
    }

    #[test]
    fn test_snapshot_is_point_in_time_copy() {
        let mut buffer = SourceBuffer::new();
        buffer.set(SourceDocument::new("<p>v1</p>", "", ""));
        let snapshot = PreviewSnapshot::take(&buffer);

        buffer.update(SourceField::Html, "<p>v2</p>");

        // Later buffer edits do not leak into an already-taken snapshot.
        assert_eq!(snapshot.document().html, "<p>v1</p>");
        assert_eq!(snapshot.revision(), 1);
        assert_eq!(buffer.revision(), 2);
    }

    #[test]
    fn test_preview_document_embeds_all_three_fields_in_order() {
        let snapshot = snapshot_of(
            "<h1>Hello</h1>",
            "h1 { color: teal; }",
            "document.title = 'preview';",
        );
        let composed = compose_preview_document(&snapshot);

        let style_at = composed.find("h1 { color: teal; }").expect("css present");
        let html_at = composed.find("<h1>Hello</h1>").expect("html present");
        let js_at = composed
            .find("document.title = 'preview';")
            .expect("js present");

        assert!(composed.starts_with("<!DOCTYPE html>"));
        assert!(style_at < html_at);
        assert!(html_at < js_at);
    }

    #[test]
    fn test_preview_script_is_guarded_with_error_banner() {
        let snapshot = snapshot_of("<p>body</p>", "", "throw new Error('x');");
        let composed = compose_preview_document(&snapshot);

        // The guard wraps the user script and surfaces faults inside the
        // previewed document itself.
        assert!(composed.contains("try {"));
        assert!(composed.contains("throw new Error('x');"));
        assert!(composed.contains("} catch (e) {"));
        assert!(composed.contains("'Error in preview: ' + e.message"));
        assert!(composed.contains("preview-error-banner"));

        // The banner class is styled even when the user supplies no CSS.
        assert!(composed.contains(".preview-error-banner {"));
    }

    #[test]
    fn test_script_terminator_in_user_js_cannot_escape_the_guard() {
        let snapshot = snapshot_of("", "", "var s = '</script><script>evil()';");
        let composed = compose_preview_document(&snapshot);

        assert!(composed.contains("<\\/script>"));
        // Exactly one real closing script tag: the guard's own.
        assert_eq!(composed.matches("</script>").count(), 1);
    }

    #[test]
    fn test_style_terminator_in_user_css_is_neutralized() {
        let snapshot = snapshot_of("", "/* </style><script>evil()</script> */", "");
        let composed = compose_preview_document(&snapshot);

        assert!(composed.contains("<\\/style>"));
        assert_eq!(composed.matches("</style>").count(), 1);
    }

    #[test]
    fn test_export_document_has_no_guard() {
        let document = SourceDocument::new("<p>a</p>", "p {}", "run();");
        let exported = compose_export_document(&document);

        assert!(exported.contains("run();"));
        assert!(!exported.contains("try {"));
        assert!(!exported.contains("preview-error-banner"));
    }

    #[test]
    fn test_parse_preview_args_requires_preview_flag() {
        let args = vec!["promptcoder".to_string()];
        assert!(parse_preview_args(&args).is_none());

        let args = vec![
            "promptcoder".to_string(),
            "--html-file".to_string(),
            "/tmp/doc.html".to_string(),
        ];
        assert!(parse_preview_args(&args).is_none());
    }

    #[test]
    fn test_parse_preview_args_extracts_document_path_and_title() {
        let args = vec![
            "promptcoder".to_string(),
            "--preview".to_string(),
            "--title".to_string(),
            "My Preview".to_string(),
            "--html-file".to_string(),
            "/tmp/preview-doc.html".to_string(),
        ];
        let (document, title) = parse_preview_args(&args).expect("preview args");
        assert_eq!(document, PathBuf::from("/tmp/preview-doc.html"));
        assert_eq!(title, "My Preview");
    }

    #[test]
    fn test_parse_preview_args_defaults_title() {
        let args = vec![
            "promptcoder".to_string(),
            "--preview".to_string(),
            "--html-file".to_string(),
            "/tmp/preview-doc.html".to_string(),
        ];
        let (_, title) = parse_preview_args(&args).expect("preview args");
        assert_eq!(title, "PromptCoder Preview");
    }

    #[test]
    fn test_staged_document_round_trips_beyond_argv_limits() {
        let dir = tempfile::tempdir().unwrap();

        // Well past the 128 KiB-per-argument cap the file handoff exists to
        // avoid.
        let big_html = format!("<div>{}</div>", "x".repeat(400_000));
        let snapshot = snapshot_of(&big_html, "div { color: red; }", "init();");
        let composed = compose_preview_document(&snapshot);
        assert!(composed.len() > 200_000);

        let path = stage_preview_document(&composed, dir.path()).expect("staging succeeds");
        let loaded = std::fs::read_to_string(&path).unwrap();
        assert_eq!(loaded, composed);
    }

    #[test]
    fn test_staged_documents_get_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let first = stage_preview_document("<p>a</p>", dir.path()).unwrap();
        let second = stage_preview_document("<p>b</p>", dir.path()).unwrap();

        // A newly staged document never clobbers one a still-starting preview
        // process may not have read yet.
        assert_ne!(first, second);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "<p>a</p>");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "<p>b</p>");
    }
}
