//! Code generation client.
//!
//! Formats a user prompt (plus optional existing-code context) into a request
//! against the generation backend and converts every outcome (success,
//! transport failure, malformed response, backend-reported error) into a
//! typed [`GenerationResult`]. Nothing at this boundary panics or propagates
//! an error past it, and the returned code is passed through verbatim:
//! sanitization is the preview renderer's job.
//!
//! Backend calls are blocking HTTP, so the UI dispatches them on a worker
//! thread and polls the result over an mpsc channel each frame.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Raised when a prompt is empty after trimming. Validation happens locally,
/// before any backend call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPromptError;

impl std::fmt::Display for EmptyPromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Prompt is empty. Enter a prompt to generate code.")
    }
}

impl std::error::Error for EmptyPromptError {}

/// A validated request for the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Existing editor content the backend may use to produce an edited or
    /// continued version. Passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl GenerationRequest {
    /// Build a request, rejecting whitespace-only prompts locally.
    /// A blank context collapses to `None` rather than being sent along.
    pub fn new(prompt: &str, context: Option<&str>) -> Result<Self, EmptyPromptError> {
        if prompt.trim().is_empty() {
            return Err(EmptyPromptError);
        }
        let context = context
            .map(str::to_string)
            .filter(|c| !c.trim().is_empty());
        Ok(Self {
            prompt: prompt.to_string(),
            context,
        })
    }
}

/// Outcome of one generation call. Exactly one variant is populated; the
/// caller decides whether to apply a success to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { code: String },
    Failure { message: String },
}

/// Outcome of one suggest-improvements call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionsResult {
    Success { suggestions: Vec<String> },
    Failure { message: String },
}

/// The generation backend contract: request/response only, any channel.
///
/// Implementations may fail with any error; the [`GenerationClient`] converts
/// those into the `Failure` variants at its boundary.
pub trait GenerationBackend: Send + Sync {
    fn generate_code(&self, request: &GenerationRequest) -> anyhow::Result<String>;
    fn suggest_improvements(&self, code: &str) -> anyhow::Result<Vec<String>>;
}

/// Client wrapper that owns the failure-conversion boundary.
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Call the backend, capturing every failure path as `Failure{message}`.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        match self.backend.generate_code(request) {
            Ok(code) => {
                info!("Generation succeeded ({} bytes of code)", code.len());
                GenerationResult::Success { code }
            }
            Err(e) => {
                error!("Generation failed: {:#}", e);
                GenerationResult::Failure {
                    message: format!("{:#}", e),
                }
            }
        }
    }

    pub fn suggest(&self, code: &str) -> SuggestionsResult {
        match self.backend.suggest_improvements(code) {
            Ok(suggestions) => {
                info!("Received {} improvement suggestions", suggestions.len());
                SuggestionsResult::Success { suggestions }
            }
            Err(e) => {
                error!("Suggest improvements failed: {:#}", e);
                SuggestionsResult::Failure {
                    message: format!("{:#}", e),
                }
            }
        }
    }
}

/// A finished generation, tagged with the dispatch sequence number so the UI
/// can discard results that were overtaken by a newer request.
#[derive(Debug)]
pub struct CompletedGeneration {
    pub sequence: u64,
    pub result: GenerationResult,
}

/// A finished suggest-improvements call.
#[derive(Debug)]
pub struct CompletedSuggestions {
    pub sequence: u64,
    pub result: SuggestionsResult,
}

/// Run a generation on a worker thread; the UI polls the receiver with
/// `try_recv` each frame. There is no client-side cancellation; a stale
/// result is identified by its sequence number and dropped on arrival.
pub fn dispatch_generation(
    backend: Arc<dyn GenerationBackend>,
    request: GenerationRequest,
    sequence: u64,
) -> Receiver<CompletedGeneration> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let client = GenerationClient::new(backend);
        let result = client.generate(&request);
        // The receiver may be gone if the session ended; nothing to do then.
        let _ = tx.send(CompletedGeneration { sequence, result });
    });
    rx
}

pub fn dispatch_suggestions(
    backend: Arc<dyn GenerationBackend>,
    code: String,
    sequence: u64,
) -> Receiver<CompletedSuggestions> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let client = GenerationClient::new(backend);
        let result = client.suggest(&code);
        let _ = tx.send(CompletedSuggestions { sequence, result });
    });
    rx
}

/// Wire payload for the generate endpoint: `{ prompt, context? } -> { code }`.
#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    code: String,
}

/// Wire payload for the suggest endpoint:
/// `{ code } -> { suggestions: [string] }`.
#[derive(Debug, Serialize)]
struct SuggestRequestBody<'a> {
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct SuggestResponseBody {
    suggestions: Vec<String>,
}

/// HTTP implementation of the generation backend.
pub struct HttpGenerationBackend {
    generate_endpoint: url::Url,
    suggest_endpoint: url::Url,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpGenerationBackend {
    pub fn new(
        generate_endpoint: url::Url,
        suggest_endpoint: url::Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            generate_endpoint,
            suggest_endpoint,
            api_key,
            client,
        })
    }

    fn post_json<B: Serialize>(
        &self,
        endpoint: &url::Url,
        body: &B,
    ) -> anyhow::Result<reqwest::blocking::Response> {
        let mut builder = self.client.post(endpoint.clone()).json(body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send()?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().unwrap_or_default();
            anyhow::bail!("Backend returned {}: {}", status, detail.trim());
        }
        Ok(response)
    }
}

impl GenerationBackend for HttpGenerationBackend {
    fn generate_code(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        info!(
            "Calling generation backend at {} (context: {})",
            self.generate_endpoint,
            request.context.is_some()
        );
        let response = self.post_json(&self.generate_endpoint, request)?;
        let body: GenerateResponseBody = response.json()?;
        Ok(body.code)
    }

    fn suggest_improvements(&self, code: &str) -> anyhow::Result<Vec<String>> {
        info!("Calling suggest endpoint at {}", self.suggest_endpoint);
        let response = self.post_json(&self.suggest_endpoint, &SuggestRequestBody { code })?;
        let body: SuggestResponseBody = response.json()?;
        Ok(body.suggestions)
    }
}
