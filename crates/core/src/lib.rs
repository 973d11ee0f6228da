//! Onomastic analysis of personal names.
//!
//! A name goes in, a validated [`AnalysisResult`] (or a typed
//! [`AnalysisFailure`]) comes out, and [`present`] turns either into a
//! frontend-neutral [`Presentation`].
//!
//! ```text
//! AnalysisRequest ──► Analyzer ──► LlmClient ──► engine
//!                        │
//!                        ▼
//!          Result<AnalysisResult, AnalysisFailure> ──► present() ──► Presentation
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod llm;
pub mod presenter;
pub mod schema;
pub mod testing;

pub use analyzer::{create_analyzer, parse_response, Analyzer, NameAnalyzer, NameAnalyzerConfig};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, EngineConfig,
    EngineProvider, SanitizedConfig, DEFAULT_CONFIG_FILE,
};
pub use error::{AnalysisFailure, FailureKind};
pub use llm::{
    AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage,
    OllamaClient,
};
pub use presenter::{
    present, present_failure, ConfidenceBand, Presentation, Profile, ProfileRow, RowHint,
};
pub use schema::{AnalysisRecord, AnalysisRequest, AnalysisResult, Gender, RawAnalysis};
