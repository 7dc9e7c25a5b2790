//! Top menu bar: file actions, theme selection, account menu.

use egui::RichText;

use crate::app::auth::AuthSession;
use crate::app::coderui::app::ThemeChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Export,
    OpenPreview,
    ShowHelp,
    SignOut,
    Quit,
}

/// Render the menu bar contents; returns the action the user picked.
pub fn build_menu(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    theme: &mut ThemeChoice,
    session: Option<&AuthSession>,
) -> MenuAction {
    let mut menu_action = MenuAction::None;

    ui.menu_button("File", |ui| {
        if ui.button("Download Project").clicked() {
            menu_action = MenuAction::Export;
        }
        if ui.button("Open Preview Window").clicked() {
            menu_action = MenuAction::OpenPreview;
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            menu_action = MenuAction::Quit;
        }
    });

    ui.menu_button(RichText::new("🎨").size(18.0), |ui| {
        if ui.button("Latte").clicked() {
            catppuccin_egui::set_theme(ctx, catppuccin_egui::LATTE);
            *theme = ThemeChoice::Latte;
        }
        if ui.button("Frappe").clicked() {
            catppuccin_egui::set_theme(ctx, catppuccin_egui::FRAPPE);
            *theme = ThemeChoice::Frappe;
        }
        if ui.button("Macchiato").clicked() {
            catppuccin_egui::set_theme(ctx, catppuccin_egui::MACCHIATO);
            *theme = ThemeChoice::Macchiato;
        }
        if ui.button("Mocha").clicked() {
            catppuccin_egui::set_theme(ctx, catppuccin_egui::MOCHA);
            *theme = ThemeChoice::Mocha;
        }
    });

    ui.menu_button("Help", |ui| {
        if ui.button("About PromptCoder").clicked() {
            menu_action = MenuAction::ShowHelp;
        }
    });

    // Account menu on the right, the desktop analogue of the original's
    // header auth button.
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if let Some(session) = session {
            ui.menu_button(format!("👤 {}", session.display_name), |ui| {
                ui.label(&session.email);
                ui.separator();
                if ui.button("Sign Out").clicked() {
                    menu_action = MenuAction::SignOut;
                }
            });
        }
    });

    menu_action
}
