//! Sign-in window shown while the session gate keeps the app unmounted.

use std::sync::Arc;
use std::thread;

use egui::{Context, RichText, Vec2};
use tracing::info;

use crate::app::auth::AuthProvider;

/// Sign-in surface backed by the external identity provider.
///
/// The actual sign-in is a blocking browser round trip, so it runs on a
/// worker thread; this window only reflects the provider's loading flag and
/// last error.
pub struct LoginWindow {
    pub open: bool,
    sign_in_started: bool,
    first_open: bool, // Track if this is the first time opening the window
}

impl Default for LoginWindow {
    fn default() -> Self {
        Self {
            open: false,
            sign_in_started: false,
            first_open: true,
        }
    }
}

impl LoginWindow {
    /// Show the sign-in window; `provider` supplies loading state and the
    /// sign-in entry point.
    pub fn show(&mut self, ctx: &Context, provider: &Arc<dyn AuthProvider>) {
        if !self.open {
            return;
        }

        let loading = provider.is_loading();
        if !loading {
            self.sign_in_started = false;
        }
        let last_error = provider.last_error();

        let mut window = egui::Window::new("Sign in to PromptCoder")
            .resizable(false)
            .collapsible(false)
            .min_width(360.0);

        if self.first_open {
            // Center on first open, override any saved position.
            let screen_rect = ctx.screen_rect();
            let window_size = Vec2::new(360.0, 180.0);
            window = window.current_pos(screen_rect.center() - window_size / 2.0);
            self.first_open = false;
        }

        window.show(ctx, |ui| {
            ui.label("PromptCoder needs you to sign in with the identity provider before generating code.");
            ui.add_space(8.0);

            if loading && self.sign_in_started {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Waiting for sign-in to complete in your browser...");
                });
            } else {
                let button = ui.add_enabled(
                    !loading,
                    egui::Button::new(RichText::new("Sign in with browser").size(16.0)),
                );
                if button.clicked() {
                    info!("Sign-in requested from login window");
                    self.sign_in_started = true;
                    let provider = Arc::clone(provider);
                    thread::spawn(move || {
                        // Failures surface through the provider's last_error.
                        let _ = provider.sign_in();
                    });
                }
            }

            if let Some(error) = &last_error {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::from_rgb(220, 50, 50), error);
            }
        });
    }
}
