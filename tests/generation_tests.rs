#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use promptcoder::app::generation::{
        dispatch_generation, dispatch_suggestions, GenerationBackend, GenerationClient,
        GenerationRequest, GenerationResult, SuggestionsResult,
    };

    /// Scripted backend that counts its invocations.
    struct MockBackend {
        calls: AtomicUsize,
        response: Result<String, String>,
        suggestions: Result<Vec<String>, String>,
    }

    impl MockBackend {
        fn succeeding(code: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Ok(code.to_string()),
                suggestions: Ok(vec!["Add alt text".to_string()]),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Err(message.to_string()),
                suggestions: Err(message.to_string()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GenerationBackend for MockBackend {
        fn generate_code(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .map_err(|message| anyhow::anyhow!(message))
        }

        fn suggest_improvements(&self, _code: &str) -> anyhow::Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.suggestions
                .clone()
                .map_err(|message| anyhow::anyhow!(message))
        }
    }

    #[test]
    fn test_blank_prompt_rejected_before_any_backend_call() {
        let backend = Arc::new(MockBackend::succeeding("<p>unused</p>"));

        for prompt in ["", "   ", "\n\t "] {
            let result = GenerationRequest::new(prompt, None);
            let err = result.expect_err("blank prompt must be rejected");
            assert_eq!(
                err.to_string(),
                "Prompt is empty. Enter a prompt to generate code."
            );
        }

        // Validation happened locally; the backend never saw a request.
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_blank_context_collapses_to_none() {
        let request = GenerationRequest::new("a landing page", Some("   \n")).unwrap();
        assert!(request.context.is_none());

        let request = GenerationRequest::new("a landing page", Some("<p>old</p>")).unwrap();
        assert_eq!(request.context.as_deref(), Some("<p>old</p>"));
    }

    #[test]
    fn test_successful_generation_returns_code_verbatim() {
        let code = "<script>alert('untrusted')</script>";
        let backend = Arc::new(MockBackend::succeeding(code));
        let client = GenerationClient::new(backend.clone());

        let request = GenerationRequest::new("a popup", None).unwrap();
        // Returned code is not sanitized here; that is the renderer's job.
        assert_eq!(
            client.generate(&request),
            GenerationResult::Success {
                code: code.to_string()
            }
        );
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_backend_failure_becomes_typed_failure() {
        let backend = Arc::new(MockBackend::failing("model overloaded"));
        let client = GenerationClient::new(backend);

        let request = GenerationRequest::new("a hero section", None).unwrap();
        match client.generate(&request) {
            GenerationResult::Failure { message } => {
                assert!(message.contains("model overloaded"));
            }
            GenerationResult::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn test_dispatch_delivers_result_with_sequence() {
        let backend: Arc<dyn GenerationBackend> = Arc::new(MockBackend::succeeding("<p>ok</p>"));
        let request = GenerationRequest::new("a paragraph", None).unwrap();

        let rx = dispatch_generation(backend, request, 7);
        let completed = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker result");

        assert_eq!(completed.sequence, 7);
        assert_eq!(
            completed.result,
            GenerationResult::Success {
                code: "<p>ok</p>".to_string()
            }
        );
    }

    #[test]
    fn test_dispatch_suggestions_round_trip() {
        let backend: Arc<dyn GenerationBackend> = Arc::new(MockBackend::succeeding(""));
        let rx = dispatch_suggestions(backend, "<p>snippet</p>".to_string(), 3);
        let completed = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker result");

        assert_eq!(completed.sequence, 3);
        assert_eq!(
            completed.result,
            SuggestionsResult::Success {
                suggestions: vec!["Add alt text".to_string()]
            }
        );
    }

    #[test]
    fn test_suggest_failure_becomes_typed_failure() {
        let backend = Arc::new(MockBackend::failing("quota exceeded"));
        let client = GenerationClient::new(backend);

        match client.suggest("<p>code</p>") {
            SuggestionsResult::Failure { message } => {
                assert!(message.contains("quota exceeded"));
            }
            SuggestionsResult::Success { .. } => panic!("expected failure"),
        }
    }
}
