//! Authentication: external identity provider integration and session gate.
//!
//! Identity is delegated entirely to a third-party provider; this module only
//! consumes it. The provider surface is the [`AuthProvider`] trait (opaque
//! session, loading flag, sign-in/out), observed through an explicit
//! [`AuthContext`] that is injected into the UI tree, with no module-level
//! "current user" singleton. Session-change listeners are registered through
//! a subscribe call that returns an RAII [`AuthSubscription`] disposer, so
//! teardown is guaranteed when the owning scope ends.
//!
//! The [`SessionGate`] is the pure state machine that decides what the UI may
//! mount: a progress indicator while the provider is still resolving, a
//! redirect to the sign-in surface (exactly once) when unauthenticated, the
//! application itself when a session is present.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Opaque session owned by the external identity provider. The core only
/// reads presence/absence plus display fields for the account menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Resolved authentication state as seen by the session gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Provider has not resolved yet (initial load, or sign-in/out in
    /// flight).
    Pending,
    Authenticated(AuthSession),
    Unauthenticated,
}

/// External identity collaborator contract.
///
/// `sign_in`/`sign_out` are blocking calls meant to run on a worker thread;
/// the UI observes progress through `is_loading` and `current_session`.
/// Implementations must always resolve the loading flag, even on failure.
pub trait AuthProvider: Send + Sync {
    fn current_session(&self) -> Option<AuthSession>;
    fn is_loading(&self) -> bool;
    /// Human-readable description of the most recent sign-in/out failure.
    fn last_error(&self) -> Option<String>;
    fn sign_in(&self) -> anyhow::Result<()>;
    fn sign_out(&self) -> anyhow::Result<()>;
}

type Listener = Box<dyn FnMut(&AuthState) + Send>;
type ListenerMap = Arc<Mutex<HashMap<u64, Listener>>>;

/// Disposer returned by [`AuthContext::subscribe`]. Dropping it unregisters
/// the listener.
pub struct AuthSubscription {
    id: u64,
    listeners: ListenerMap,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.remove(&self.id);
        }
    }
}

/// Explicit auth context object passed into the component tree.
///
/// Polls the provider once per UI frame via [`AuthContext::refresh`] and
/// notifies subscribers whenever the resolved [`AuthState`] changes (initial
/// resolution, sign-in, sign-out).
pub struct AuthContext {
    provider: Arc<dyn AuthProvider>,
    state: AuthState,
    listeners: ListenerMap,
    next_listener_id: u64,
}

impl AuthContext {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            state: AuthState::Pending,
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_listener_id: 0,
        }
    }

    pub fn provider(&self) -> &Arc<dyn AuthProvider> {
        &self.provider
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn session(&self) -> Option<&AuthSession> {
        match &self.state {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Register a session-change listener; the returned disposer unregisters
    /// it when dropped.
    pub fn subscribe(&mut self, listener: impl FnMut(&AuthState) + Send + 'static) -> AuthSubscription {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.insert(id, Box::new(listener));
        }
        AuthSubscription {
            id,
            listeners: Arc::clone(&self.listeners),
        }
    }

    /// Re-read the provider and notify subscribers on change. Returns the
    /// current state for convenience.
    pub fn refresh(&mut self) -> &AuthState {
        let new_state = if self.provider.is_loading() {
            AuthState::Pending
        } else {
            match self.provider.current_session() {
                Some(session) => AuthState::Authenticated(session),
                None => AuthState::Unauthenticated,
            }
        };

        if new_state != self.state {
            info!(
                "Auth state changed: {} -> {}",
                describe_state(&self.state),
                describe_state(&new_state)
            );
            self.state = new_state;
            if let Ok(mut listeners) = self.listeners.lock() {
                for listener in listeners.values_mut() {
                    listener(&self.state);
                }
            }
        }
        &self.state
    }
}

fn describe_state(state: &AuthState) -> &'static str {
    match state {
        AuthState::Pending => "Pending",
        AuthState::Authenticated(_) => "Authenticated",
        AuthState::Unauthenticated => "Unauthenticated",
    }
}

/// What the session gate allows the UI to show this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Provider still resolving: render a neutral progress indicator only.
    ShowProgress,
    /// Just resolved to unauthenticated: trigger the redirect to the sign-in
    /// surface. Produced exactly once per unauthenticated resolution.
    RedirectToSignIn,
    /// Already on the sign-in surface; no new redirect.
    StayOnSignIn,
    /// A session is present: the rest of the application may mount.
    MountApp,
}

/// Pure three-state gate: `Pending -> Authenticated | Unauthenticated`,
/// terminal on either until a sign-out (loading again) resets it.
#[derive(Debug, Default)]
pub struct SessionGate {
    redirect_fired: bool,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, state: &AuthState) -> GateDecision {
        match state {
            AuthState::Pending => {
                // Back to pending (initial load or sign-out): arm the
                // redirect for the next unauthenticated resolution.
                self.redirect_fired = false;
                GateDecision::ShowProgress
            }
            AuthState::Authenticated(_) => {
                self.redirect_fired = false;
                GateDecision::MountApp
            }
            AuthState::Unauthenticated => {
                if self.redirect_fired {
                    GateDecision::StayOnSignIn
                } else {
                    self.redirect_fired = true;
                    GateDecision::RedirectToSignIn
                }
            }
        }
    }
}

/// Wire shape of the hosted provider's session-start response.
#[derive(Debug, Deserialize)]
struct StartSignInResponse {
    /// Browser URL the user completes sign-in at.
    login_url: String,
    /// Token this client polls with while the user finishes in the browser.
    poll_token: String,
}

#[derive(Debug, Deserialize)]
struct PollSessionResponse {
    session: Option<AuthSession>,
}

#[derive(Debug, Default)]
struct HostedProviderState {
    loading: bool,
    session: Option<AuthSession>,
    last_error: Option<String>,
}

/// Hosted-login identity provider.
///
/// Sign-in opens the provider's sign-in page in the system browser and polls
/// the session endpoint until the user completes the flow there, mirroring a
/// device-authorization grant. The provider itself stays opaque: this client
/// never sees credentials, only the resulting session object.
pub struct HostedAuthProvider {
    session_endpoint: url::Url,
    client: reqwest::blocking::Client,
    state: Mutex<HostedProviderState>,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl HostedAuthProvider {
    pub fn new(session_endpoint: url::Url) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            session_endpoint,
            client,
            state: Mutex::new(HostedProviderState {
                // Pending until the first session check resolves.
                loading: true,
                ..Default::default()
            }),
            poll_interval: Duration::from_secs(2),
            max_poll_attempts: 150,
        })
    }

    fn endpoint(&self, segment: &str) -> anyhow::Result<url::Url> {
        Ok(self.session_endpoint.join(segment)?)
    }

    /// Resolve the initial session check: an existing session (e.g. from a
    /// provider-side cookie/refresh token) or unauthenticated. Run once at
    /// startup on a worker thread.
    pub fn resolve_initial_session(&self) {
        let result: anyhow::Result<Option<AuthSession>> = (|| {
            let endpoint = self.endpoint("session")?;
            let response = self.client.get(endpoint).send()?;
            if !response.status().is_success() {
                anyhow::bail!("Session check returned {}", response.status());
            }
            let body: PollSessionResponse = response.json()?;
            Ok(body.session)
        })();

        let mut state = self.lock_state();
        match result {
            Ok(session) => {
                info!(
                    "Initial session resolved: {}",
                    if session.is_some() { "signed in" } else { "signed out" }
                );
                state.session = session;
            }
            Err(e) => {
                // An unreachable provider resolves to unauthenticated rather
                // than leaving the gate spinning forever.
                warn!("Initial session check failed: {:#}", e);
                state.session = None;
                state.last_error = Some(format!("{:#}", e));
            }
        }
        state.loading = false;
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, HostedProviderState> {
        // A poisoned lock here means a worker thread panicked mid-update;
        // the plain auth fields are still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AuthProvider for HostedAuthProvider {
    fn current_session(&self) -> Option<AuthSession> {
        self.lock_state().session.clone()
    }

    fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    fn sign_in(&self) -> anyhow::Result<()> {
        {
            let mut state = self.lock_state();
            if state.loading {
                anyhow::bail!("A sign-in is already in progress");
            }
            state.loading = true;
            state.last_error = None;
        }

        let outcome: anyhow::Result<AuthSession> = (|| {
            let start_endpoint = self.endpoint("session/start")?;
            let response = self.client.post(start_endpoint).send()?;
            if !response.status().is_success() {
                anyhow::bail!("Sign-in start returned {}", response.status());
            }
            let start: StartSignInResponse = response.json()?;

            info!("Opening sign-in page in browser: {}", start.login_url);
            open::that(&start.login_url)?;

            let mut poll_endpoint = self.endpoint("session/poll")?;
            poll_endpoint
                .query_pairs_mut()
                .append_pair("token", &start.poll_token);

            for _ in 0..self.max_poll_attempts {
                std::thread::sleep(self.poll_interval);
                let response = self.client.get(poll_endpoint.clone()).send()?;
                if !response.status().is_success() {
                    anyhow::bail!("Session poll returned {}", response.status());
                }
                let body: PollSessionResponse = response.json()?;
                if let Some(session) = body.session {
                    return Ok(session);
                }
            }
            anyhow::bail!("Sign-in timed out waiting for browser completion")
        })();

        let mut state = self.lock_state();
        state.loading = false;
        match outcome {
            Ok(session) => {
                info!("Signed in as {}", session.email);
                state.session = Some(session);
                Ok(())
            }
            Err(e) => {
                error!("Sign-in failed: {:#}", e);
                state.last_error = Some(format!("{:#}", e));
                Err(e)
            }
        }
    }

    fn sign_out(&self) -> anyhow::Result<()> {
        {
            let mut state = self.lock_state();
            state.loading = true;
            state.last_error = None;
        }

        let outcome: anyhow::Result<()> = (|| {
            let endpoint = self.endpoint("session")?;
            let response = self.client.delete(endpoint).send()?;
            if !response.status().is_success() {
                anyhow::bail!("Sign-out returned {}", response.status());
            }
            Ok(())
        })();

        let mut state = self.lock_state();
        // The local session is cleared regardless; a provider-side failure is
        // reported but never leaves the user stuck signed in locally.
        state.session = None;
        state.loading = false;
        if let Err(e) = &outcome {
            error!("Sign-out failed: {:#}", e);
            state.last_error = Some(format!("{:#}", e));
        } else {
            info!("Signed out");
        }
        outcome
    }
}
