//! The analysis client: one structured-extraction call per name.
//!
//! [`NameAnalyzer`] prompts an LLM for the fields of
//! [`AnalysisResult`], then runs the raw answer through schema validation.
//! Frontends only see the [`Analyzer`] trait, so tests can swap in
//! [`MockAnalyzer`](crate::testing::MockAnalyzer).

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EngineConfig, EngineProvider};
use crate::error::AnalysisFailure;
use crate::llm::{AnthropicClient, CompletionRequest, LlmClient, OllamaClient};
use crate::schema::{output_schema, AnalysisRequest, AnalysisResult, RawAnalysis, OUTPUT_FIELDS};

/// Anything that can turn a name into a validated analysis.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Engine and model description, for banners and logs.
    fn describe(&self) -> String;

    /// Run exactly one analysis attempt. Never retries.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisFailure>;
}

/// Settings for a single extraction call.
#[derive(Debug, Clone)]
pub struct NameAnalyzerConfig {
    /// Maximum tokens for the LLM response.
    pub max_tokens: u32,
    /// Temperature for generation.
    pub temperature: f32,
    /// Give up on the engine after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for NameAnalyzerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.0,
            timeout: None,
        }
    }
}

impl From<&EngineConfig> for NameAnalyzerConfig {
    fn from(engine: &EngineConfig) -> Self {
        Self {
            max_tokens: engine.max_tokens,
            temperature: engine.temperature,
            timeout: engine.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// LLM-backed analyzer.
///
/// Generic over the LLM client type to support different backends
/// (Ollama, Anthropic, mocks).
pub struct NameAnalyzer<C: LlmClient> {
    client: Arc<C>,
    config: NameAnalyzerConfig,
}

impl<C: LlmClient> NameAnalyzer<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            config: NameAnalyzerConfig::default(),
        }
    }

    pub fn with_config(client: Arc<C>, config: NameAnalyzerConfig) -> Self {
        Self { client, config }
    }

    /// Override the timeout, e.g. from a command-line flag.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    fn build_system_prompt(&self) -> String {
        let mut prompt = String::from(
            "You are an onomastics expert. Perform a deep cultural and linguistic analysis \
             of a personal name. Identify literal meanings, original scripts, and \
             demographic associations.\n\nRespond with a single JSON object and nothing \
             else, with these keys:\n",
        );
        for (field, description) in OUTPUT_FIELDS {
            prompt.push_str(&format!("- {}: {}\n", field, description));
        }
        prompt
    }

    fn build_request(&self, request: &AnalysisRequest) -> CompletionRequest {
        CompletionRequest::new(format!("Name: {}", request.name()))
            .with_system(self.build_system_prompt())
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
            .with_format(output_schema())
    }

    async fn call_engine(&self, request: &AnalysisRequest) -> Result<String, AnalysisFailure> {
        let call = self.client.complete(self.build_request(request));

        let response = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| AnalysisFailure::timeout(limit))?,
            None => call.await,
        }?;

        debug!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "engine answered"
        );
        Ok(response.text)
    }
}

/// Parse the engine's text answer into a validated result.
///
/// Models sometimes wrap the object in prose or code fences, so only the
/// outermost `{ ... }` span is parsed.
pub fn parse_response(text: &str) -> Result<AnalysisResult, AnalysisFailure> {
    let json_str = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            return Err(AnalysisFailure::schema(format!(
                "engine answer contains no JSON object: {}",
                text
            )))
        }
    };

    let raw: RawAnalysis = serde_json::from_str(json_str).map_err(|e| {
        AnalysisFailure::schema(format!("failed to parse engine answer: {} - {}", e, text))
    })?;

    raw.validate()
}

#[async_trait]
impl<C: LlmClient> Analyzer for NameAnalyzer<C> {
    fn describe(&self) -> String {
        format!("{} · {}", self.client.provider(), self.client.model())
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisFailure> {
        info!(name = request.name(), provider = self.client.provider(), "analyzing name");

        let outcome = self
            .call_engine(request)
            .await
            .and_then(|text| parse_response(&text));

        if let Err(failure) = &outcome {
            warn!(name = request.name(), kind = ?failure.kind, "analysis failed: {}", failure.message);
        }
        outcome
    }
}

/// Factory: build the configured analyzer.
pub fn create_analyzer(engine: &EngineConfig) -> Result<Arc<dyn Analyzer>, ConfigError> {
    let config = NameAnalyzerConfig::from(engine);

    match engine.provider {
        EngineProvider::Ollama => {
            let mut client = OllamaClient::new(&engine.model);
            if let Some(base) = &engine.api_base {
                client = client.with_api_base(base);
            }
            if let Some(key) = engine.api_key.as_deref().filter(|k| !k.is_empty()) {
                client = client.with_api_key(key);
            }
            Ok(Arc::new(NameAnalyzer::with_config(Arc::new(client), config)))
        }
        EngineProvider::Anthropic => {
            let api_key = engine.api_key.clone().ok_or_else(|| {
                ConfigError::ValidationError(
                    "engine.api_key must be set when provider = \"anthropic\"".to_string(),
                )
            })?;
            let mut client = AnthropicClient::new(api_key, &engine.model);
            if let Some(base) = &engine.api_base {
                client = client.with_api_base(base);
            }
            Ok(Arc::new(NameAnalyzer::with_config(Arc::new(client), config)))
        }
    }
}
