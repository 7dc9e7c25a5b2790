use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{info, warn};

use super::editor_pane::EditorPane;
use super::help_window::HelpWindow;
use super::login_window::LoginWindow;
use super::menu::{self, MenuAction};
use super::prompt_panel::{PromptAction, PromptPanel};
use crate::app::auth::{
    AuthContext, AuthProvider, AuthSubscription, GateDecision, HostedAuthProvider, SessionGate,
};
use crate::app::config::AppConfig;
use crate::app::debounce::DebouncedNotifier;
use crate::app::export;
use crate::app::generation::{
    dispatch_generation, dispatch_suggestions, CompletedGeneration, CompletedSuggestions,
    GenerationBackend, GenerationRequest, GenerationResult, HttpGenerationBackend,
    SuggestionsResult,
};
use crate::app::notifications::NotificationManager;
use crate::app::preview::{PreviewRenderer, PreviewSnapshot};
use crate::app::source_document::{SourceBuffer, SourceField};

/// Backend call timeout; generation can be slow.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Default)]
pub enum ThemeChoice {
    #[default]
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum WorkspaceTab {
    #[default]
    Editor,
    Preview,
}

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CoderApp {
    pub theme: ThemeChoice,
    pub active_tab: WorkspaceTab,
    /// Re-render the preview automatically when the debounced buffer settles.
    pub auto_preview: bool,

    #[serde(skip)]
    pub config: AppConfig,
    #[serde(skip)]
    pub buffer: SourceBuffer,
    #[serde(skip)]
    pub notifier: DebouncedNotifier,
    #[serde(skip)]
    pub renderer: PreviewRenderer,
    #[serde(skip)]
    pub session_gate: SessionGate,
    #[serde(skip)]
    pub prompt_panel: PromptPanel,
    #[serde(skip)]
    pub editor_pane: EditorPane,
    #[serde(skip)]
    pub login_window: LoginWindow,
    #[serde(skip)]
    pub help_window: HelpWindow,
    #[serde(skip)]
    pub notification_manager: NotificationManager,
    #[serde(skip)]
    backend: Option<Arc<dyn GenerationBackend>>,
    #[serde(skip)]
    auth_context: Option<AuthContext>,
    #[serde(skip)]
    auth_subscription: Option<AuthSubscription>,
    #[serde(skip)]
    pending_generation: Option<Receiver<CompletedGeneration>>,
    #[serde(skip)]
    pending_suggestions: Option<Receiver<CompletedSuggestions>>,
    #[serde(skip)]
    generation_sequence: u64,
    #[serde(skip)]
    suggestions_sequence: u64,
}

impl Default for CoderApp {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            active_tab: WorkspaceTab::default(),
            auto_preview: true,
            config: AppConfig::default(),
            buffer: SourceBuffer::new(),
            notifier: DebouncedNotifier::default(),
            renderer: PreviewRenderer::new(),
            session_gate: SessionGate::new(),
            prompt_panel: PromptPanel::new(),
            editor_pane: EditorPane::new(),
            login_window: LoginWindow::default(),
            help_window: HelpWindow::new(),
            notification_manager: NotificationManager::new(),
            backend: None,
            auth_context: None,
            auth_subscription: None,
            pending_generation: None,
            pending_suggestions: None,
            generation_sequence: 0,
            suggestions_sequence: 0,
        }
    }
}

impl CoderApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: CoderApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.initialize();
        app
    }

    /// Wire up the runtime collaborators: config, generation backend,
    /// identity provider. Kept out of `Default` so tests can construct the
    /// app without touching the network or filesystem.
    fn initialize(&mut self) {
        let config = AppConfig::load();
        self.notifier = DebouncedNotifier::new(config.debounce_interval());

        match (config.generate_endpoint(), config.suggest_endpoint()) {
            (Ok(generate), Ok(suggest)) => {
                match HttpGenerationBackend::new(
                    generate,
                    suggest,
                    config.api_key.clone(),
                    GENERATION_TIMEOUT,
                ) {
                    Ok(backend) => self.backend = Some(Arc::new(backend)),
                    Err(e) => {
                        warn!("Failed to build generation backend: {:#}", e);
                        self.notification_manager.notify_error(
                            "Generation backend unavailable",
                            format!("{:#}", e),
                            "Startup",
                        );
                    }
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Invalid backend URL in config: {:#}", e);
                self.notification_manager.notify_error(
                    "Invalid backend URL",
                    format!("{:#}", e),
                    "Startup",
                );
            }
        }

        match config
            .auth_base()
            .and_then(|base| HostedAuthProvider::new(base))
        {
            Ok(provider) => {
                let provider: Arc<HostedAuthProvider> = Arc::new(provider);
                {
                    let provider = Arc::clone(&provider);
                    thread::spawn(move || provider.resolve_initial_session());
                }
                let mut context = AuthContext::new(provider);
                // Held for the lifetime of the app; dropping the subscription
                // on teardown unregisters the listener.
                self.auth_subscription = Some(context.subscribe(|state| {
                    let label = match state {
                        crate::app::auth::AuthState::Pending => "pending",
                        crate::app::auth::AuthState::Authenticated(_) => "authenticated",
                        crate::app::auth::AuthState::Unauthenticated => "unauthenticated",
                    };
                    info!("Session listener: auth state is now {}", label);
                }));
                self.auth_context = Some(context);
            }
            Err(e) => {
                warn!("Failed to configure identity provider: {:#}", e);
                self.notification_manager.notify_error(
                    "Identity provider unavailable",
                    format!("{:#}", e),
                    "Startup",
                );
            }
        }

        self.config = config;
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        let flavor = match self.theme {
            ThemeChoice::Latte => catppuccin_egui::LATTE,
            ThemeChoice::Frappe => catppuccin_egui::FRAPPE,
            ThemeChoice::Macchiato => catppuccin_egui::MACCHIATO,
            ThemeChoice::Mocha => catppuccin_egui::MOCHA,
        };
        catppuccin_egui::set_theme(ctx, flavor);
    }

    /// Refresh the auth context and ask the session gate what may mount.
    /// With no identity provider configured the app fails open so the tool
    /// stays usable offline; the startup notice already flagged it.
    fn gate_decision(&mut self) -> GateDecision {
        match &mut self.auth_context {
            Some(context) => {
                let state = context.refresh().clone();
                self.session_gate.evaluate(&state)
            }
            None => GateDecision::MountApp,
        }
    }

    fn auth_provider(&self) -> Option<Arc<dyn AuthProvider>> {
        self.auth_context
            .as_ref()
            .map(|context| Arc::clone(context.provider()))
    }

    /// Apply a finished generation. Results overtaken by a newer dispatch are
    /// discarded so a slow response never clobbers a newer request's outcome.
    fn poll_completed_generation(&mut self) {
        let Some(receiver) = &self.pending_generation else {
            return;
        };
        match receiver.try_recv() {
            Ok(completed) => {
                self.pending_generation = None;
                if completed.sequence != self.generation_sequence {
                    trace_info!(
                        "Discarding stale generation result (seq {} < {})",
                        completed.sequence, self.generation_sequence
                    );
                    return;
                }
                match completed.result {
                    GenerationResult::Success { code } => {
                        self.buffer.update(SourceField::Html, code);
                        self.notification_manager.notify_success(
                            "Code Generated!",
                            "The AI has generated new code based on your prompt.",
                            "Code Generation",
                        );
                    }
                    GenerationResult::Failure { message } => {
                        self.notification_manager.notify_error(
                            "Error Generating Code",
                            message,
                            "Code Generation",
                        );
                    }
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_generation = None;
                self.notification_manager.notify_error(
                    "Error Generating Code",
                    "Generation worker stopped unexpectedly.",
                    "Code Generation",
                );
            }
        }
    }

    fn poll_completed_suggestions(&mut self) {
        let Some(receiver) = &self.pending_suggestions else {
            return;
        };
        match receiver.try_recv() {
            Ok(completed) => {
                self.pending_suggestions = None;
                if completed.sequence != self.suggestions_sequence {
                    return;
                }
                match completed.result {
                    SuggestionsResult::Success { suggestions } => {
                        self.prompt_panel.suggestions = suggestions;
                    }
                    SuggestionsResult::Failure { message } => {
                        self.notification_manager.notify_error(
                            "Suggestions unavailable",
                            message,
                            "Code Generation",
                        );
                    }
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_suggestions = None;
            }
        }
    }

    fn handle_prompt_action(&mut self, action: PromptAction) {
        match action {
            PromptAction::Generate { prompt } => {
                // Existing editor content rides along as context so the
                // backend can iterate on it.
                let context = self.buffer.get().html.clone();
                let request = match GenerationRequest::new(&prompt, Some(context.as_str())) {
                    Ok(request) => request,
                    Err(e) => {
                        self.notification_manager.notify_warning(
                            "Prompt is empty",
                            e.to_string(),
                            "Code Generation",
                        );
                        return;
                    }
                };
                let Some(backend) = &self.backend else {
                    self.notification_manager.notify_error(
                        "Generation backend unavailable",
                        "No backend configured; check promptcoder.json.",
                        "Code Generation",
                    );
                    return;
                };
                self.generation_sequence += 1;
                log_info!(
                    "Dispatching generation request (seq {})",
                    self.generation_sequence
                );
                self.pending_generation = Some(dispatch_generation(
                    Arc::clone(backend),
                    request,
                    self.generation_sequence,
                ));
            }
            PromptAction::SuggestImprovements => {
                let code = self.buffer.get().html.clone();
                if code.trim().is_empty() {
                    self.notification_manager.notify_warning(
                        "Nothing to improve",
                        "Generate or write some code first.",
                        "Code Generation",
                    );
                    return;
                }
                let Some(backend) = &self.backend else {
                    return;
                };
                self.suggestions_sequence += 1;
                self.pending_suggestions = Some(dispatch_suggestions(
                    Arc::clone(backend),
                    code,
                    self.suggestions_sequence,
                ));
            }
            PromptAction::Download => self.export_project(),
        }
    }

    fn export_project(&mut self) {
        let path = export::default_export_path();
        match export::export_to_file(self.buffer.get(), &path) {
            Ok(()) => {
                self.notification_manager.notify_success(
                    "Code Downloaded",
                    format!("Saved to {}", path.display()),
                    "Export",
                );
            }
            Err(e) => {
                self.notification_manager
                    .notify_warning("Nothing to download", e.to_string(), "Export");
            }
        }
    }

    /// Render the current buffer immediately, bypassing the debounce window.
    /// Always spawns a fresh window, even if the revision is unchanged (the
    /// user may have closed the previous one).
    fn open_preview_now(&mut self) {
        self.renderer.invalidate();
        let snapshot = PreviewSnapshot::take(&self.buffer);
        if let Err(e) = self.renderer.render(&snapshot) {
            self.notification_manager.notify_error(
                "Preview failed",
                format!("{:#}", e),
                "Live Preview",
            );
        }
    }

    fn handle_menu_action(&mut self, action: MenuAction, ctx: &egui::Context) {
        match action {
            MenuAction::None => {}
            MenuAction::Export => self.export_project(),
            MenuAction::OpenPreview => self.open_preview_now(),
            MenuAction::ShowHelp => self.help_window.open = true,
            MenuAction::SignOut => {
                if let Some(provider) = self.auth_provider() {
                    thread::spawn(move || {
                        let _ = provider.sign_out();
                    });
                }
            }
            MenuAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn render_gate_progress(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.add(egui::Spinner::new().size(48.0));
            });
        });
    }

    fn render_sign_in_surface(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.label("Sign in to start building with PromptCoder.");
            });
        });
        if let Some(provider) = self.auth_provider() {
            self.login_window.show(ctx, &provider);
        }
    }

    fn render_workspace(&mut self, ctx: &egui::Context) {
        let session = self
            .auth_context
            .as_ref()
            .and_then(|context| context.session().cloned());

        let mut menu_action = MenuAction::None;
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                menu_action = menu::build_menu(ui, ctx, &mut self.theme, session.as_ref());
            });
        });
        self.handle_menu_action(menu_action, ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(session) = &session {
                    ui.label(format!("Signed in as {}", session.email));
                }
                match self.renderer.last_rendered_revision() {
                    Some(revision) => {
                        ui.separator();
                        ui.label(format!("Preview at revision {}", revision));
                    }
                    None => {
                        ui.separator();
                        ui.label("No preview yet");
                    }
                }
                self.notification_manager.render_status_bar_indicator(ui);
            });
        });

        let busy = self.pending_generation.is_some();
        let has_code = !self.buffer.get().is_blank();
        let mut prompt_action = None;
        egui::SidePanel::left("prompt_panel")
            .default_width(320.0)
            .show(ctx, |ui| {
                prompt_action = self.prompt_panel.show(ui, busy, has_code);
            });
        if let Some(action) = prompt_action {
            self.handle_prompt_action(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_tab, WorkspaceTab::Editor, "📝 Code Editor");
                ui.selectable_value(
                    &mut self.active_tab,
                    WorkspaceTab::Preview,
                    "📺 Live Preview",
                );
            });
            ui.separator();

            match self.active_tab {
                WorkspaceTab::Editor => {
                    let theme = self.theme;
                    self.editor_pane.show(ui, &mut self.buffer, theme);
                }
                WorkspaceTab::Preview => {
                    ui.checkbox(
                        &mut self.auto_preview,
                        "Re-render automatically after edits settle",
                    );
                    ui.add_space(4.0);
                    if ui.button("Open Preview Window").clicked() {
                        self.open_preview_now();
                    }
                    ui.add_space(8.0);
                    match self.renderer.last_rendered_revision() {
                        Some(revision) => {
                            ui.label(format!(
                                "The preview window is showing buffer revision {}. \
                                 It refreshes {} ms after you stop typing.",
                                revision,
                                self.notifier.quiet_period().as_millis()
                            ));
                        }
                        None => {
                            ui.label(
                                "No preview yet. Generate some code or start typing \
                                 in the editor and a sandboxed preview window will \
                                 open automatically.",
                            );
                        }
                    }
                }
            }
        });

        self.help_window.show(ctx);
        self.notification_manager.render_details_window(ctx);
    }
}

impl eframe::App for CoderApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        match self.gate_decision() {
            GateDecision::ShowProgress => {
                self.render_gate_progress(ctx);
                // Poll again soon so the gate resolves without user input.
                ctx.request_repaint_after(Duration::from_millis(100));
                return;
            }
            GateDecision::RedirectToSignIn => {
                info!("Session resolved unauthenticated; redirecting to sign-in");
                self.login_window.open = true;
                self.render_sign_in_surface(ctx);
                ctx.request_repaint_after(Duration::from_millis(250));
                return;
            }
            GateDecision::StayOnSignIn => {
                self.render_sign_in_surface(ctx);
                ctx.request_repaint_after(Duration::from_millis(250));
                return;
            }
            GateDecision::MountApp => {
                self.login_window.open = false;
            }
        }

        self.poll_completed_generation();
        self.poll_completed_suggestions();

        self.render_workspace(ctx);

        // Debounced preview: emit a snapshot once edits settle, render it.
        if let Some(snapshot) = self.notifier.poll(&self.buffer, Instant::now()) {
            if self.auto_preview {
                if let Err(e) = self.renderer.render(&snapshot) {
                    self.notification_manager.notify_error(
                        "Preview failed",
                        format!("{:#}", e),
                        "Live Preview",
                    );
                }
            }
        }

        // Keep the debounce timer and worker polls ticking even when idle.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
