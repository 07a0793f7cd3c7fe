//! Language-model fallback for queries the rule table leaves unmatched.
//!
//! The model receives a classification prompt and is expected to answer
//! with a JSON object `{action, region?, year?, metric?}`. Output is read
//! leniently: the outermost `{...}` span is parsed, and the reported action
//! is fuzzy-matched against the fixed action set.

pub mod ollama;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{IntentError, IntentResult};
use ea_protocol::ActionKind;

/// Minimum normalized similarity for a fuzzy action match.
pub const MIN_ACTION_SIMILARITY: f64 = 0.4;

/// Text-completion capability used by the fallback path.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete `prompt` and return the raw response text.
    async fn complete(&self, prompt: &str) -> IntentResult<String>;

    /// Model name (for logging).
    fn name(&self) -> &str;
}

/// What the model said, after validation against the action set.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelVerdict {
    pub action: ActionKind,
    /// Region name exactly as reported (not yet resolved to a canonical region).
    pub region: Option<String>,
    pub year: Option<i32>,
}

/// Classification prompt for `query`.
pub fn build_prompt(query: &str) -> String {
    let actions = ActionKind::ALL
        .iter()
        .map(|a| format!("\"{a}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are an intent classifier for energy data analytics.\n\
         Classify the query below into JSON with keys:\n\
         - action: one of [{actions}]\n\
         - region: optional\n\
         - year: optional\n\
         - metric: optional\n\
         Query: \"{}\"\n\
         Respond only with JSON.",
        query.replace('"', "'")
    )
}

/// Read a model response into a verdict.
///
/// A missing or unrecognizable action becomes `free_text`; only a response
/// with no parseable JSON object is an error.
pub fn interpret(response: &str) -> IntentResult<ModelVerdict> {
    let json = outermost_object(response).ok_or(IntentError::EmptyResponse)?;
    let value: Value = serde_json::from_str(json)
        .map_err(|e| IntentError::MalformedResponse(format!("{e}: {json}")))?;
    let Value::Object(fields) = value else {
        return Err(IntentError::MalformedResponse(json.to_string()));
    };

    let action = fields
        .get("action")
        .and_then(Value::as_str)
        .and_then(closest_action)
        .unwrap_or(ActionKind::FreeText);

    let region = fields
        .get("region")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let year = fields.get("year").and_then(year_from_value);

    Ok(ModelVerdict {
        action,
        region,
        year,
    })
}

/// Best fuzzy match for `name` in the action set, if similar enough.
pub fn closest_action(name: &str) -> Option<ActionKind> {
    let name = name.trim().to_lowercase();
    if let Ok(exact) = name.parse() {
        return Some(exact);
    }
    ActionKind::ALL
        .into_iter()
        .map(|a| (a, strsim::normalized_levenshtein(&name, a.as_str())))
        .filter(|(_, score)| *score >= MIN_ACTION_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(a, _)| a)
}

/// Span from the first `{` to the last `}`.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Accept `2024` or `"2024"`, within 1900-2099.
fn year_from_value(value: &Value) -> Option<i32> {
    let year = match value {
        Value::Number(n) => i32::try_from(n.as_i64()?).ok()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (1900..=2099).contains(&year).then_some(year)
}
