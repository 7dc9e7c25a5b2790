#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use promptcoder::app::auth::{
        AuthContext, AuthProvider, AuthSession, AuthState, GateDecision, SessionGate,
    };

    /// Hand-driven provider: tests flip the loading flag and session directly.
    #[derive(Default)]
    struct FakeProvider {
        loading: AtomicBool,
        session: Mutex<Option<AuthSession>>,
        last_error: Mutex<Option<String>>,
    }

    impl FakeProvider {
        fn set_loading(&self, loading: bool) {
            self.loading.store(loading, Ordering::SeqCst);
        }

        fn set_session(&self, session: Option<AuthSession>) {
            *self.session.lock().unwrap() = session;
        }
    }

    impl AuthProvider for FakeProvider {
        fn current_session(&self) -> Option<AuthSession> {
            self.session.lock().unwrap().clone()
        }

        fn is_loading(&self) -> bool {
            self.loading.load(Ordering::SeqCst)
        }

        fn last_error(&self) -> Option<String> {
            self.last_error.lock().unwrap().clone()
        }

        fn sign_in(&self) -> anyhow::Result<()> {
            Ok(())
        }

        fn sign_out(&self) -> anyhow::Result<()> {
            self.set_session(None);
            Ok(())
        }
    }

    fn session() -> AuthSession {
        AuthSession {
            user_id: "user-1".to_string(),
            display_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_gate_shows_progress_while_loading() {
        let mut gate = SessionGate::new();
        assert_eq!(gate.evaluate(&AuthState::Pending), GateDecision::ShowProgress);
        // Still loading on later frames: still progress, never a redirect.
        assert_eq!(gate.evaluate(&AuthState::Pending), GateDecision::ShowProgress);
    }

    #[test]
    fn test_gate_redirects_exactly_once_when_unauthenticated() {
        let mut gate = SessionGate::new();
        gate.evaluate(&AuthState::Pending);

        assert_eq!(
            gate.evaluate(&AuthState::Unauthenticated),
            GateDecision::RedirectToSignIn
        );
        // Subsequent frames stay on the sign-in surface without a new
        // redirect.
        for _ in 0..5 {
            assert_eq!(
                gate.evaluate(&AuthState::Unauthenticated),
                GateDecision::StayOnSignIn
            );
        }
    }

    #[test]
    fn test_gate_mounts_app_when_authenticated() {
        let mut gate = SessionGate::new();
        gate.evaluate(&AuthState::Pending);
        assert_eq!(
            gate.evaluate(&AuthState::Authenticated(session())),
            GateDecision::MountApp
        );
    }

    #[test]
    fn test_sign_out_rearms_the_redirect() {
        let mut gate = SessionGate::new();
        gate.evaluate(&AuthState::Pending);
        assert_eq!(
            gate.evaluate(&AuthState::Unauthenticated),
            GateDecision::RedirectToSignIn
        );
        assert_eq!(
            gate.evaluate(&AuthState::Unauthenticated),
            GateDecision::StayOnSignIn
        );

        // User signs in, then out again: the sign-out passes through Pending,
        // which re-arms the single redirect.
        assert_eq!(
            gate.evaluate(&AuthState::Authenticated(session())),
            GateDecision::MountApp
        );
        assert_eq!(gate.evaluate(&AuthState::Pending), GateDecision::ShowProgress);
        assert_eq!(
            gate.evaluate(&AuthState::Unauthenticated),
            GateDecision::RedirectToSignIn
        );
    }

    #[test]
    fn test_context_reflects_provider_state() {
        let provider = Arc::new(FakeProvider::default());
        provider.set_loading(true);

        let mut context = AuthContext::new(provider.clone());
        assert_eq!(context.refresh(), &AuthState::Pending);
        assert!(context.session().is_none());

        provider.set_loading(false);
        provider.set_session(Some(session()));
        assert_eq!(context.refresh(), &AuthState::Authenticated(session()));
        assert_eq!(context.session().map(|s| s.email.as_str()), Some("ada@example.com"));

        provider.set_session(None);
        assert_eq!(context.refresh(), &AuthState::Unauthenticated);
    }

    #[test]
    fn test_listener_fires_only_on_state_change() {
        let provider = Arc::new(FakeProvider::default());
        provider.set_loading(true);
        let mut context = AuthContext::new(provider.clone());

        let notified = Arc::new(AtomicUsize::new(0));
        let _subscription = {
            let notified = notified.clone();
            context.subscribe(move |_state| {
                notified.fetch_add(1, Ordering::SeqCst);
            })
        };

        // Initial state is already Pending; a Pending refresh is not a change.
        context.refresh();
        assert_eq!(notified.load(Ordering::SeqCst), 0);

        provider.set_loading(false);
        context.refresh(); // Pending -> Unauthenticated
        context.refresh(); // no change
        provider.set_session(Some(session()));
        context.refresh(); // Unauthenticated -> Authenticated

        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropped_subscription_stops_notifications() {
        let provider = Arc::new(FakeProvider::default());
        provider.set_loading(true);
        let mut context = AuthContext::new(provider.clone());

        let notified = Arc::new(AtomicUsize::new(0));
        let subscription = {
            let notified = notified.clone();
            context.subscribe(move |_state| {
                notified.fetch_add(1, Ordering::SeqCst);
            })
        };

        provider.set_loading(false);
        context.refresh();
        assert_eq!(notified.load(Ordering::SeqCst), 1);

        // RAII disposal: once dropped, further changes are not delivered.
        drop(subscription);
        provider.set_session(Some(session()));
        context.refresh();
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_gate_over_context_full_startup_flow() {
        let provider = Arc::new(FakeProvider::default());
        provider.set_loading(true);
        let mut context = AuthContext::new(provider.clone());
        let mut gate = SessionGate::new();

        // Frame 1: provider still resolving.
        let state = context.refresh().clone();
        assert_eq!(gate.evaluate(&state), GateDecision::ShowProgress);

        // Frame 2: resolved without a session.
        provider.set_loading(false);
        let state = context.refresh().clone();
        assert_eq!(gate.evaluate(&state), GateDecision::RedirectToSignIn);

        // Frame 3: user completed sign-in in the browser.
        provider.set_session(Some(session()));
        let state = context.refresh().clone();
        assert_eq!(gate.evaluate(&state), GateDecision::MountApp);
    }
}
