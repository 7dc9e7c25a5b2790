use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NotificationType {
    Error,
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub notification_type: NotificationType,
    pub message: String,
    #[serde(skip, default = "Instant::now")]
    pub created_at: Instant,
    #[serde(skip, default)]
    pub expires_at: Option<Instant>,
    pub dismissible: bool,
    pub source: String, // e.g. "Code Generation", "Export"
}

impl Notification {
    pub fn new_error(title: String, message: String, source: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            notification_type: NotificationType::Error,
            message,
            created_at: Instant::now(),
            expires_at: None, // Errors don't auto-expire
            dismissible: true,
            source,
        }
    }

    pub fn new_warning(title: String, message: String, source: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            notification_type: NotificationType::Warning,
            message,
            created_at: Instant::now(),
            expires_at: Some(Instant::now() + Duration::from_secs(30)),
            dismissible: true,
            source,
        }
    }

    pub fn new_info(title: String, message: String, source: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            notification_type: NotificationType::Info,
            message,
            created_at: Instant::now(),
            expires_at: Some(Instant::now() + Duration::from_secs(10)),
            dismissible: true,
            source,
        }
    }

    pub fn new_success(title: String, message: String, source: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            notification_type: NotificationType::Success,
            message,
            created_at: Instant::now(),
            expires_at: Some(Instant::now() + Duration::from_secs(5)),
            dismissible: true,
            source,
        }
    }

    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            Instant::now() > expires_at
        } else {
            false
        }
    }

    pub fn get_color(&self) -> Color32 {
        match self.notification_type {
            NotificationType::Error => Color32::from_rgb(220, 50, 50),
            NotificationType::Warning => Color32::from_rgb(255, 150, 0),
            NotificationType::Info => Color32::from_rgb(70, 130, 200),
            NotificationType::Success => Color32::from_rgb(40, 180, 40),
        }
    }

    pub fn get_icon(&self) -> &'static str {
        match self.notification_type {
            NotificationType::Error => "✗",
            NotificationType::Warning => "⚠",
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
        }
    }
}

#[derive(Default)]
pub struct NotificationManager {
    notifications: HashMap<String, Notification>,
    pub show_details_window: bool,
    pub selected_notification_id: Option<String>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    pub fn notify_error(&mut self, title: &str, message: impl Into<String>, source: &str) {
        self.add_notification(Notification::new_error(
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn notify_warning(&mut self, title: &str, message: impl Into<String>, source: &str) {
        self.add_notification(Notification::new_warning(
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn notify_info(&mut self, title: &str, message: impl Into<String>, source: &str) {
        self.add_notification(Notification::new_info(
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn notify_success(&mut self, title: &str, message: impl Into<String>, source: &str) {
        self.add_notification(Notification::new_success(
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn dismiss_notification(&mut self, id: &str) {
        self.notifications.remove(id);
        if let Some(selected_id) = &self.selected_notification_id {
            if selected_id == id {
                self.selected_notification_id = None;
                self.show_details_window = false;
            }
        }
    }

    pub fn clear_expired(&mut self) {
        self.notifications
            .retain(|_, notification| !notification.is_expired());
    }

    pub fn get_active_notifications(&self) -> Vec<&Notification> {
        let mut notifications: Vec<&Notification> = self.notifications.values().collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications
    }

    pub fn get_notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.get(id)
    }

    pub fn has_errors(&self) -> bool {
        self.notifications
            .values()
            .any(|n| matches!(n.notification_type, NotificationType::Error))
    }

    pub fn get_error_count(&self) -> usize {
        self.notifications
            .values()
            .filter(|n| matches!(n.notification_type, NotificationType::Error))
            .count()
    }

    pub fn get_warning_count(&self) -> usize {
        self.notifications
            .values()
            .filter(|n| matches!(n.notification_type, NotificationType::Warning))
            .count()
    }

    pub fn show_notification_details(&mut self, notification_id: String) {
        self.selected_notification_id = Some(notification_id);
        self.show_details_window = true;
    }

    /// Status-bar summary: newest notice inline, error/warning counters
    /// clickable for details.
    pub fn render_status_bar_indicator(&mut self, ui: &mut egui::Ui) {
        self.clear_expired();

        let error_count = self.get_error_count();
        let warning_count = self.get_warning_count();

        // Newest transient notice shown inline, toast style.
        let latest = self
            .get_active_notifications()
            .first()
            .map(|n| (n.id.clone(), n.get_icon(), n.get_color(), n.title.clone()));

        if let Some((id, icon, color, title)) = latest {
            ui.separator();
            if ui
                .colored_label(color, format!("{} {}", icon, title))
                .clicked()
            {
                self.show_notification_details(id);
            }
        }

        if error_count > 0 {
            let error_text = if error_count == 1 {
                "1 error".to_string()
            } else {
                format!("{} errors", error_count)
            };

            if ui
                .colored_label(Color32::from_rgb(220, 50, 50), format!("✗ {}", error_text))
                .clicked()
            {
                if let Some(error_notification) = self
                    .get_active_notifications()
                    .iter()
                    .find(|n| matches!(n.notification_type, NotificationType::Error))
                {
                    self.show_notification_details(error_notification.id.clone());
                }
            }
        }

        if warning_count > 0 {
            let warning_text = if warning_count == 1 {
                "1 warning".to_string()
            } else {
                format!("{} warnings", warning_count)
            };

            if ui
                .colored_label(
                    Color32::from_rgb(255, 150, 0),
                    format!("⚠ {}", warning_text),
                )
                .clicked()
            {
                if let Some(warning_notification) = self
                    .get_active_notifications()
                    .iter()
                    .find(|n| matches!(n.notification_type, NotificationType::Warning))
                {
                    self.show_notification_details(warning_notification.id.clone());
                }
            }
        }
    }

    /// Details window for the selected notification.
    pub fn render_details_window(&mut self, ctx: &egui::Context) {
        if !self.show_details_window {
            return;
        }

        let Some(notification) = self
            .selected_notification_id
            .as_ref()
            .and_then(|id| self.notifications.get(id))
            .cloned()
        else {
            self.show_details_window = false;
            return;
        };

        let mut open = true;
        let mut dismiss = false;
        egui::Window::new(format!(
            "{} {}",
            notification.get_icon(),
            notification.title
        ))
        .open(&mut open)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.colored_label(notification.get_color(), &notification.message);
            ui.separator();
            ui.label(format!("Source: {}", notification.source));
            if notification.dismissible && ui.button("Dismiss").clicked() {
                dismiss = true;
            }
        });

        if dismiss {
            self.dismiss_notification(&notification.id);
        }
        if !open || dismiss {
            self.show_details_window = false;
        }
    }
}
