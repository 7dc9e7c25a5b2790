//! Small about/help window.

use egui::Context;

#[derive(Default)]
pub struct HelpWindow {
    pub open: bool,
}

impl HelpWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &Context) {
        if !self.open {
            return;
        }

        let mut open = self.open;
        egui::Window::new("About PromptCoder")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("PromptCoder");
                ui.label(format!(
                    "Version {} ({} {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("GIT_BRANCH"),
                    env!("GIT_COMMIT")
                ));
                ui.add_space(8.0);
                ui.label(
                    "Type a prompt, generate an HTML/CSS/JS snippet, edit it in the \
                     code editor, and watch it render live in a sandboxed preview \
                     window.",
                );
                ui.add_space(8.0);
                ui.label("The preview runs generated scripts in a separate process; \
                     a script that throws shows an error banner inside the preview \
                     without affecting this window.");
            });
        self.open = open;
    }
}
