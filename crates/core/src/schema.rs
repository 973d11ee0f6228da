//! The analysis schema: requests, validated results, and the raw engine
//! output they are validated from.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisFailure;

/// Output fields requested from the engine, with the description the model
/// sees for each. Order matches the record shown to users.
pub const OUTPUT_FIELDS: &[(&str, &str)] = &[
    ("first_name", "Given name"),
    (
        "middle_name",
        "Middle name(s) if present, else empty string",
    ),
    ("last_name", "Family name / Surname"),
    (
        "literal_meaning",
        "Semantic definition of the name (e.g., 'Who is like God?')",
    ),
    (
        "original_script",
        "The name in its native script (e.g., 'Михаил' or '三沢')",
    ),
    (
        "ethnic_background",
        "The specific ethno-cultural group (e.g., Ashkenazi Jewish, Han Chinese)",
    ),
    (
        "geographic_origin",
        "Region or country where the name is most rooted",
    ),
    (
        "likely_gender",
        "Exactly one of: Masculine, Feminine, Unisex, Undetermined",
    ),
    (
        "confidence_score",
        "Float from 0.0 to 1.0 indicating confidence in the analysis",
    ),
    ("reasoning", "Step-by-step logic justifying the results"),
];

/// A single name to analyze. Always non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    name: String,
}

impl AnalysisRequest {
    /// Build a request from raw user input.
    ///
    /// Empty or whitespace-only input is rejected here, so it can never
    /// reach an [`Analyzer`](crate::analyzer::Analyzer).
    pub fn new(raw: &str) -> Result<Self, AnalysisFailure> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AnalysisFailure::input_rejected("name must not be empty"));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Gender most commonly associated with a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Unisex,
    Undetermined,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Masculine,
        Gender::Feminine,
        Gender::Unisex,
        Gender::Undetermined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculine => "Masculine",
            Gender::Feminine => "Feminine",
            Gender::Unisex => "Unisex",
            Gender::Undetermined => "Undetermined",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AnalysisFailure;

    /// Accepts the canonical names and a few synonyms, case-insensitively,
    /// optionally followed by one parenthesized qualifier such as `(85%)`.
    /// Anything else, including hedged or mixed answers, is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = match trimmed.strip_suffix(')').and_then(|rest| rest.rsplit_once('(')) {
            Some((head, qualifier)) if !qualifier.contains(')') => head.trim_end(),
            _ => trimmed,
        };

        match value.to_lowercase().as_str() {
            "masculine" | "male" => Ok(Gender::Masculine),
            "feminine" | "female" => Ok(Gender::Feminine),
            "unisex" => Ok(Gender::Unisex),
            "undetermined" | "unknown" => Ok(Gender::Undetermined),
            _ => Err(AnalysisFailure::schema(format!(
                "likely_gender {:?} is not one of Masculine, Feminine, Unisex, Undetermined",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub literal_meaning: String,
    pub original_script: String,
    pub ethnic_background: String,
    pub geographic_origin: String,
    pub likely_gender: Gender,
    /// Always within `0.0..=1.0`.
    pub confidence_score: f64,
    pub reasoning: String,
}

/// Engine output before validation. Values are kept as loose JSON so that a
/// number where a string was expected (or the reverse) is judged by the
/// validation rules rather than by the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    #[serde(default)]
    pub first_name: Option<Value>,
    #[serde(default)]
    pub middle_name: Option<Value>,
    #[serde(default)]
    pub last_name: Option<Value>,
    #[serde(default)]
    pub literal_meaning: Option<Value>,
    #[serde(default)]
    pub original_script: Option<Value>,
    #[serde(default)]
    pub ethnic_background: Option<Value>,
    #[serde(default, alias = "geographic_centroid")]
    pub geographic_origin: Option<Value>,
    #[serde(default)]
    pub likely_gender: Option<Value>,
    #[serde(default)]
    pub confidence_score: Option<Value>,
    #[serde(default)]
    pub reasoning: Option<Value>,
}

/// Placeholders models use for "no middle name".
const EMPTY_MARKERS: &[&str] = &["none", "n/a", "na", "null", "-"];

impl RawAnalysis {
    /// Validate and coerce every field, producing a complete record or the
    /// first violation found.
    pub fn validate(self) -> Result<AnalysisResult, AnalysisFailure> {
        let likely_gender = required_text("likely_gender", self.likely_gender)?.parse()?;
        let confidence_score = parse_confidence(self.confidence_score)?;

        Ok(AnalysisResult {
            first_name: required_text("first_name", self.first_name)?,
            middle_name: optional_text(self.middle_name)?,
            last_name: required_text("last_name", self.last_name)?,
            literal_meaning: required_text("literal_meaning", self.literal_meaning)?,
            original_script: required_text("original_script", self.original_script)?,
            ethnic_background: required_text("ethnic_background", self.ethnic_background)?,
            geographic_origin: required_text("geographic_origin", self.geographic_origin)?,
            likely_gender,
            confidence_score,
            reasoning: required_text("reasoning", self.reasoning)?,
        })
    }
}

fn scalar_text(field: &str, value: Value) -> Result<Option<String>, AnalysisFailure> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(AnalysisFailure::schema(format!(
            "{} must be text, got {}",
            field, other
        ))),
    }
}

fn required_text(field: &str, value: Option<Value>) -> Result<String, AnalysisFailure> {
    value
        .map(|v| scalar_text(field, v))
        .transpose()?
        .flatten()
        .ok_or_else(|| AnalysisFailure::schema(format!("missing field {}", field)))
}

fn optional_text(value: Option<Value>) -> Result<String, AnalysisFailure> {
    let text = value
        .map(|v| scalar_text("middle_name", v))
        .transpose()?
        .flatten()
        .unwrap_or_default();

    if EMPTY_MARKERS.contains(&text.to_lowercase().as_str()) {
        Ok(String::new())
    } else {
        Ok(text)
    }
}

/// Parse a confidence value into `0.0..=1.0`.
///
/// Accepts a JSON number or a numeric string; a trailing `%` divides by 100.
pub fn parse_confidence(value: Option<Value>) -> Result<f64, AnalysisFailure> {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            match s.strip_suffix('%') {
                Some(pct) => pct.trim().parse::<f64>().ok().map(|p| p / 100.0),
                None => s.parse::<f64>().ok(),
            }
        }
        Some(Value::Null) | None => {
            return Err(AnalysisFailure::schema("missing field confidence_score"))
        }
        Some(other) => {
            return Err(AnalysisFailure::schema(format!(
                "confidence_score must be numeric, got {}",
                other
            )))
        }
    };

    match score {
        Some(score) if score.is_finite() && (0.0..=1.0).contains(&score) => Ok(score),
        Some(score) => Err(AnalysisFailure::schema(format!(
            "confidence_score {} is outside 0.0..=1.0",
            score
        ))),
        None => Err(AnalysisFailure::schema(
            "confidence_score is not a number".to_string(),
        )),
    }
}

/// JSON schema handed to engines that can constrain their output.
pub fn output_schema() -> Value {
    let mut properties = Map::new();
    for (field, description) in OUTPUT_FIELDS {
        let property = match *field {
            "confidence_score" => json!({
                "type": "number",
                "minimum": 0.0,
                "maximum": 1.0,
                "description": description,
            }),
            "likely_gender" => json!({
                "type": "string",
                "enum": Gender::ALL.iter().map(Gender::as_str).collect::<Vec<_>>(),
                "description": description,
            }),
            _ => json!({ "type": "string", "description": description }),
        };
        properties.insert(field.to_string(), property);
    }

    let required: Vec<&str> = OUTPUT_FIELDS.iter().map(|(field, _)| *field).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Flat key/value form of a result, as emitted by `analyze --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub name: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub meaning: String,
    pub script: String,
    pub ethnicity: String,
    pub geography: String,
    pub gender: Gender,
    pub confidence: f64,
    pub reasoning: String,
}

impl AnalysisRecord {
    pub fn new(name: &str, result: &AnalysisResult) -> Self {
        Self {
            name: name.to_string(),
            first_name: result.first_name.clone(),
            middle_name: result.middle_name.clone(),
            last_name: result.last_name.clone(),
            meaning: result.literal_meaning.clone(),
            script: result.original_script.clone(),
            ethnicity: result.ethnic_background.clone(),
            geography: result.geographic_origin.clone(),
            gender: result.likely_gender,
            confidence: result.confidence_score,
            reasoning: result.reasoning.clone(),
        }
    }
}
