//! Frontend-independent presentation of analysis outcomes.
//!
//! [`present`] is pure: it decides *what* is shown (rows, labels,
//! formatting, confidence band). Frontends only decide *how*, e.g. styled
//! terminal output or plain text.

use crate::error::{AnalysisFailure, FailureKind};
use crate::schema::AnalysisResult;

/// Coarse confidence bucket, used as a display hint only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// `>= 0.8` is high, `> 0.5` medium, anything else low.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConfidenceBand::High
        } else if score > 0.5 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
        }
    }
}

/// How a row's value should be emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHint {
    Plain,
    /// Native-script rendering, shown in bold where supported.
    Strong,
    Confidence(ConfidenceBand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub label: &'static str,
    pub value: String,
    pub hint: RowHint,
}

impl ProfileRow {
    fn plain(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            hint: RowHint::Plain,
        }
    }
}

/// A successful analysis, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// The name as the user typed it (trimmed).
    pub name: String,
    /// Name components.
    pub identity: Vec<ProfileRow>,
    /// Meaning, script, origin, gender and confidence.
    pub details: Vec<ProfileRow>,
    /// Verbatim reasoning trace; frontends may collapse it.
    pub reasoning: String,
}

impl Profile {
    pub fn title(&self) -> String {
        format!("Analysis for {}", self.name)
    }

    /// All rows, identity first.
    pub fn rows(&self) -> impl Iterator<Item = &ProfileRow> {
        self.identity.iter().chain(self.details.iter())
    }
}

/// Renderable outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Profile(Profile),
    Failure { kind: FailureKind, message: String },
}

/// Map an analysis outcome to its presentation.
pub fn present(name: &str, outcome: &Result<AnalysisResult, AnalysisFailure>) -> Presentation {
    match outcome {
        Ok(result) => Presentation::Profile(profile(name, result)),
        Err(failure) => present_failure(failure),
    }
}

pub fn present_failure(failure: &AnalysisFailure) -> Presentation {
    Presentation::Failure {
        kind: failure.kind,
        message: failure.message.clone(),
    }
}

fn profile(name: &str, result: &AnalysisResult) -> Profile {
    let mut identity = vec![ProfileRow::plain("First Name", &result.first_name)];
    if !result.middle_name.is_empty() {
        identity.push(ProfileRow::plain("Middle Name", &result.middle_name));
    }
    identity.push(ProfileRow::plain("Last Name", &result.last_name));

    let details = vec![
        ProfileRow::plain("Meaning", &result.literal_meaning),
        ProfileRow {
            label: "Script",
            value: result.original_script.clone(),
            hint: RowHint::Strong,
        },
        ProfileRow::plain("Ethnicity", &result.ethnic_background),
        ProfileRow::plain("Geography", &result.geographic_origin),
        ProfileRow::plain("Gender", result.likely_gender.as_str()),
        ProfileRow {
            label: "Confidence",
            value: format!("{:.2}", result.confidence_score),
            hint: RowHint::Confidence(ConfidenceBand::from_score(result.confidence_score)),
        },
    ];

    Profile {
        name: name.trim().to_string(),
        identity,
        details,
        reasoning: result.reasoning.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::from_score(1.0), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(0.8), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(0.79), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_score(0.51), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_score(0.5), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_score(0.0), ConfidenceBand::Low);
    }

    #[test]
    fn test_profile_rows() {
        let presentation = present("Mikhail", &Ok(fixtures::mikhail()));
        let Presentation::Profile(profile) = presentation else {
            panic!("expected a profile");
        };

        assert_eq!(profile.title(), "Analysis for Mikhail");
        let labels: Vec<_> = profile.rows().map(|row| row.label).collect();
        assert_eq!(
            labels,
            vec![
                "First Name",
                "Last Name",
                "Meaning",
                "Script",
                "Ethnicity",
                "Geography",
                "Gender",
                "Confidence"
            ]
        );

        let confidence = profile.details.last().unwrap();
        assert_eq!(confidence.value, "0.92");
        assert_eq!(confidence.hint, RowHint::Confidence(ConfidenceBand::High));
        assert_eq!(profile.reasoning, fixtures::mikhail().reasoning);
    }

    #[test]
    fn test_middle_name_row_when_present() {
        let mut result = fixtures::mikhail();
        result.middle_name = "Sergeyevich".to_string();

        let Presentation::Profile(profile) = present("Mikhail Sergeyevich", &Ok(result)) else {
            panic!("expected a profile");
        };
        assert_eq!(profile.identity[1].label, "Middle Name");
        assert_eq!(profile.identity[1].value, "Sergeyevich");
    }

    #[test]
    fn test_failure_block() {
        let failure = AnalysisFailure::engine_unavailable("connection refused");
        assert_eq!(
            present("Mikhail", &Err(failure)),
            Presentation::Failure {
                kind: FailureKind::EngineUnavailable,
                message: "connection refused".to_string(),
            }
        );
    }

    #[test]
    fn test_present_is_deterministic() {
        let outcome = Ok(fixtures::mikhail());
        assert_eq!(present("Mikhail", &outcome), present("Mikhail", &outcome));
    }
}
