//! Prompt-and-controls panel.
//!
//! Left-hand panel with the natural-language prompt, the Generate / Suggest
//! Improvements / Download buttons, and the most recent improvement
//! suggestions. The panel itself never talks to the backend; it returns a
//! [`PromptAction`] the app loop executes.

use egui::{RichText, ScrollArea, Ui};

/// What the user asked for this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Generate { prompt: String },
    SuggestImprovements,
    Download,
}

#[derive(Default)]
pub struct PromptPanel {
    pub prompt: String,
    /// Suggestions from the last suggest-improvements call.
    pub suggestions: Vec<String>,
}

impl PromptPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the panel. `busy` disables dispatching while a generation is in
    /// flight; `has_code` gates the code-dependent actions.
    pub fn show(&mut self, ui: &mut Ui, busy: bool, has_code: bool) -> Option<PromptAction> {
        let mut action = None;

        ui.heading("✨ AI Prompt");
        ui.label("Describe the UI or component you want to build.");
        ui.add_space(4.0);

        let text_height = (ui.available_height() * 0.4).max(120.0);
        ScrollArea::vertical()
            .max_height(text_height)
            .show(ui, |ui| {
                ui.add_sized(
                    [ui.available_width(), text_height],
                    egui::TextEdit::multiline(&mut self.prompt).hint_text(
                        "e.g., A responsive hero section with a title, subtitle, and a call-to-action button...",
                    ),
                );
            });

        ui.add_space(8.0);

        ui.vertical_centered_justified(|ui| {
            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Generating...");
                });
            } else if ui
                .button(RichText::new("✨ Generate Code").size(15.0))
                .clicked()
            {
                action = Some(PromptAction::Generate {
                    prompt: self.prompt.clone(),
                });
            }

            if ui
                .add_enabled(
                    !busy && has_code,
                    egui::Button::new("💡 Suggest Improvements"),
                )
                .clicked()
            {
                action = Some(PromptAction::SuggestImprovements);
            }

            if ui.button("⬇ Download Project").clicked() {
                action = Some(PromptAction::Download);
            }
        });

        if !self.suggestions.is_empty() {
            ui.add_space(8.0);
            ui.separator();
            ui.label(RichText::new("Suggested improvements").strong());
            ScrollArea::vertical()
                .id_salt("suggestions_scroll")
                .show(ui, |ui| {
                    for suggestion in &self.suggestions {
                        ui.label(format!("• {}", suggestion));
                    }
                });
        }

        action
    }
}
