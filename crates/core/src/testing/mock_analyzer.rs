//! Mock analyzer for frontend tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::analyzer::Analyzer;
use crate::error::AnalysisFailure;
use crate::schema::{AnalysisRequest, AnalysisResult};
use crate::testing::fixtures;

type Outcome = Result<AnalysisResult, AnalysisFailure>;

/// Mock implementation of the Analyzer trait.
///
/// Provides controllable behavior for testing:
/// - Return a fixed outcome, or per-name outcomes
/// - Simulate slow engines with per-name delays
/// - Track analyzed names for assertions
///
/// Without configuration every name succeeds with
/// [`fixtures::analysis_for`] of that name.
///
/// # Example
///
/// ```rust,ignore
/// let analyzer = MockAnalyzer::with_outcome(Ok(fixtures::mikhail()));
/// let result = analyzer.analyze(&AnalysisRequest::new("Mikhail")?).await?;
/// assert_eq!(analyzer.call_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockAnalyzer {
    /// Outcome returned for names without a specific one.
    outcome: Arc<RwLock<Option<Outcome>>>,
    /// Outcomes keyed by name.
    outcomes_by_name: Arc<RwLock<HashMap<String, Outcome>>>,
    /// If set, the next analysis fails with this error.
    next_error: Arc<RwLock<Option<AnalysisFailure>>>,
    /// Delay applied to every analysis.
    delay: Arc<RwLock<Duration>>,
    /// Delays keyed by name, overriding `delay`.
    delays_by_name: Arc<RwLock<HashMap<String, Duration>>>,
    /// Names analyzed, in call order.
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every name with `outcome`.
    pub fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome: Arc::new(RwLock::new(Some(outcome))),
            ..Self::default()
        }
    }

    /// Set the outcome for one name.
    pub async fn set_outcome_for(&self, name: &str, outcome: Outcome) {
        self.outcomes_by_name
            .write()
            .await
            .insert(name.to_string(), outcome);
    }

    /// Configure the next analysis to fail with the given error.
    pub async fn set_next_error(&self, error: AnalysisFailure) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every analysis.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Delay analyses of one name.
    pub async fn set_delay_for(&self, name: &str, delay: Duration) {
        self.delays_by_name
            .write()
            .await
            .insert(name.to_string(), delay);
    }

    /// Names analyzed so far, in call order.
    pub async fn recorded_names(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Get the number of analyses performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    fn describe(&self) -> String {
        "mock · mock-model".to_string()
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisFailure> {
        let name = request.name().to_string();
        self.calls.write().await.push(name.clone());

        let delay = match self.delays_by_name.read().await.get(&name) {
            Some(delay) => *delay,
            None => *self.delay.read().await,
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(outcome) = self.outcomes_by_name.read().await.get(&name) {
            return outcome.clone();
        }

        match self.outcome.read().await.as_ref() {
            Some(outcome) => outcome.clone(),
            None => Ok(fixtures::analysis_for(&name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[tokio::test]
    async fn test_default_outcome_follows_name() {
        let analyzer = MockAnalyzer::new();
        let request = AnalysisRequest::new("Anna").unwrap();

        let result = analyzer.analyze(&request).await.unwrap();
        assert_eq!(result.first_name, "Anna");
        assert_eq!(analyzer.recorded_names().await, vec!["Anna"]);
    }

    #[tokio::test]
    async fn test_next_error_is_consumed() {
        let analyzer = MockAnalyzer::with_outcome(Ok(fixtures::mikhail()));
        analyzer
            .set_next_error(AnalysisFailure::engine_unavailable("down"))
            .await;
        let request = AnalysisRequest::new("Mikhail").unwrap();

        let err = analyzer.analyze(&request).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::EngineUnavailable);
        assert!(analyzer.analyze(&request).await.is_ok());
        assert_eq!(analyzer.call_count().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_for_name() {
        let analyzer = MockAnalyzer::new();
        analyzer
            .set_delay_for("Anna", Duration::from_secs(10))
            .await;

        let start = tokio::time::Instant::now();
        analyzer
            .analyze(&AnalysisRequest::new("Anna").unwrap())
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_secs(10));
    }
}
