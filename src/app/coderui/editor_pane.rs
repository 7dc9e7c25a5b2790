//! Code editor pane: one `egui_code_editor` tab per source field.

use egui::Ui;
use egui_code_editor::{CodeEditor, ColorTheme};

use crate::app::coderui::app::ThemeChoice;
use crate::app::source_document::{SourceBuffer, SourceField};
use crate::app::web_syntax;

pub struct EditorPane {
    pub active_field: SourceField,
}

impl Default for EditorPane {
    fn default() -> Self {
        Self {
            active_field: SourceField::Html,
        }
    }
}

impl EditorPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the tab strip and the editor bound to the active field.
    /// Buffer revision is bumped only when the widget reports a change.
    pub fn show(&mut self, ui: &mut Ui, buffer: &mut SourceBuffer, theme: ThemeChoice) {
        ui.horizontal(|ui| {
            for field in [SourceField::Html, SourceField::Css, SourceField::Js] {
                ui.selectable_value(&mut self.active_field, field, field.to_string());
            }
        });
        ui.separator();

        let code_theme = if theme == ThemeChoice::Latte {
            ColorTheme::GITHUB_LIGHT
        } else {
            ColorTheme::GITHUB_DARK
        };

        let syntax = match self.active_field {
            SourceField::Html => web_syntax::html_syntax(),
            SourceField::Css => web_syntax::css_syntax(),
            SourceField::Js => web_syntax::js_syntax(),
        };

        let available_height = ui.available_height();
        let rows = (available_height / 20.0).max(10.0) as usize;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("source_editor_scroll")
            .show(ui, |ui| {
                let output = CodeEditor::default()
                    .id_source(format!("source_editor_{}", self.active_field))
                    .with_rows(rows)
                    .with_fontsize(14.0)
                    .with_theme(code_theme)
                    .with_syntax(syntax)
                    .show(ui, buffer.field_mut(self.active_field));

                if output.response.changed() {
                    buffer.mark_changed();
                }
            });
    }
}
