//! Testing utilities and mock implementations.
//!
//! Mocks for both seams of the analysis pipeline:
//! - [`MockLlmClient`] stands in for the inference engine under a real
//!   [`NameAnalyzer`](crate::analyzer::NameAnalyzer).
//! - [`MockAnalyzer`] replaces the whole analysis client for frontend tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use whatsurname_core::testing::{fixtures, MockAnalyzer};
//!
//! let analyzer = MockAnalyzer::new();
//! analyzer.set_delay_for("Anna", Duration::from_secs(2)).await;
//! analyzer.set_next_error(AnalysisFailure::engine_unavailable("down")).await;
//! ```

mod mock_analyzer;
mod mock_llm_client;

pub use mock_analyzer::MockAnalyzer;
pub use mock_llm_client::MockLlmClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::schema::{AnalysisResult, Gender};

    /// A validated analysis of "Mikhail".
    pub fn mikhail() -> AnalysisResult {
        AnalysisResult {
            first_name: "Mikhail".to_string(),
            middle_name: String::new(),
            last_name: String::new(),
            literal_meaning: "Who is like God?".to_string(),
            original_script: "Михаил".to_string(),
            ethnic_background: "East Slavic (Russian)".to_string(),
            geographic_origin: "Russia".to_string(),
            likely_gender: Gender::Masculine,
            confidence_score: 0.92,
            reasoning: "Mikhail is the Russian form of the Hebrew name Michael.".to_string(),
        }
    }

    /// The engine answer that validates to [`mikhail`].
    pub fn mikhail_json() -> String {
        serde_json::json!({
            "first_name": "Mikhail",
            "middle_name": "",
            "last_name": "",
            "literal_meaning": "Who is like God?",
            "original_script": "Михаил",
            "ethnic_background": "East Slavic (Russian)",
            "geographic_origin": "Russia",
            "likely_gender": "Masculine",
            "confidence_score": 0.92,
            "reasoning": "Mikhail is the Russian form of the Hebrew name Michael."
        })
        .to_string()
    }

    /// A validated analysis with the given first name and otherwise
    /// generic values.
    pub fn analysis_for(first_name: &str) -> AnalysisResult {
        AnalysisResult {
            first_name: first_name.to_string(),
            middle_name: String::new(),
            last_name: String::new(),
            literal_meaning: format!("Meaning of {}", first_name),
            original_script: first_name.to_string(),
            ethnic_background: "Unknown".to_string(),
            geographic_origin: "Unknown".to_string(),
            likely_gender: Gender::Undetermined,
            confidence_score: 0.4,
            reasoning: format!("Reasoning about {}", first_name),
        }
    }
}
