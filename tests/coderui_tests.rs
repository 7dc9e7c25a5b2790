#[cfg(test)]
mod tests {
    use promptcoder::app::coderui::app::{CoderApp, ThemeChoice, WorkspaceTab};
    use promptcoder::app::source_document::SourceField;

    #[test]
    fn test_coderapp_default() {
        let app = CoderApp::default();

        assert!(matches!(app.theme, ThemeChoice::Latte));
        assert_eq!(app.active_tab, WorkspaceTab::Editor);
        assert!(app.auto_preview);
        assert_eq!(app.buffer.revision(), 0);
        assert!(app.buffer.get().is_blank());
        assert!(app.prompt_panel.prompt.is_empty());
        assert!(app.prompt_panel.suggestions.is_empty());
        assert!(!app.help_window.open);
        assert!(!app.login_window.open);
        assert!(app.renderer.last_rendered_revision().is_none());
    }

    #[test]
    fn test_theme_choice_default() {
        let theme = ThemeChoice::default();
        assert!(matches!(theme, ThemeChoice::Latte));
    }

    #[test]
    fn test_theme_choices() {
        assert!(ThemeChoice::Latte == ThemeChoice::Latte);
        assert!(ThemeChoice::Latte != ThemeChoice::Mocha);

        assert_eq!(ThemeChoice::Latte.to_string(), "Latte");
        assert_eq!(ThemeChoice::Frappe.to_string(), "Frappe");
        assert_eq!(ThemeChoice::Macchiato.to_string(), "Macchiato");
        assert_eq!(ThemeChoice::Mocha.to_string(), "Mocha");
    }

    #[test]
    fn test_workspace_tab_equality() {
        assert_eq!(WorkspaceTab::Editor, WorkspaceTab::Editor);
        assert_ne!(WorkspaceTab::Editor, WorkspaceTab::Preview);
    }

    #[test]
    fn test_coderapp_persisted_state_serialization() {
        let mut app = CoderApp::default();
        app.theme = ThemeChoice::Mocha;
        app.active_tab = WorkspaceTab::Preview;
        app.auto_preview = false;
        app.buffer.update(SourceField::Html, "<p>transient</p>");

        let serialized = serde_json::to_string(&app).unwrap();
        let deserialized: CoderApp = serde_json::from_str(&serialized).unwrap();

        // UI preferences survive the round trip.
        assert!(matches!(deserialized.theme, ThemeChoice::Mocha));
        assert_eq!(deserialized.active_tab, WorkspaceTab::Preview);
        assert!(!deserialized.auto_preview);

        // Session state is skipped and comes back as defaults.
        assert!(deserialized.buffer.get().is_blank());
        assert_eq!(deserialized.buffer.revision(), 0);
        assert!(deserialized.prompt_panel.prompt.is_empty());
    }

    #[test]
    fn test_editor_pane_defaults_to_html_tab() {
        let app = CoderApp::default();
        assert_eq!(app.editor_pane.active_field, SourceField::Html);
    }
}
