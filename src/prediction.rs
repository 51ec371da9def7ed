use serde_json::{Map, Value};

use crate::config::{AI_LABEL, VERDICT_FIELD};
use crate::error::PredictError;

/// How a result is styled. Only an exact `"AI"` verdict lands in `Ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Ai,
    Human,
}

impl Category {
    pub fn css_class(self) -> &'static str {
        match self {
            Category::Ai => "prediction-ai",
            Category::Human => "prediction-human",
        }
    }
}

/// Successful classifier response, kept as the raw field mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub raw: Map<String, Value>,
}

impl Prediction {
    /// Decode a 2xx body. Anything but a JSON object is malformed; missing
    /// fields are not.
    pub fn from_json(body: &[u8]) -> Result<Self, PredictError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(raw)) => Ok(Self { raw }),
            Ok(other) => Err(PredictError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(PredictError::MalformedResponse(e.to_string())),
        }
    }

    pub fn verdict(&self) -> Option<&Value> {
        self.raw.get(VERDICT_FIELD)
    }

    /// Text shown for the verdict; empty when the field is absent.
    pub fn label(&self) -> String {
        match self.verdict() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn category(&self) -> Category {
        match self.verdict() {
            Some(Value::String(s)) if s == AI_LABEL => Category::Ai,
            _ => Category::Human,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// What the last request ended in. `None` in the workflow means neither.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Result(Prediction),
    Failure { message: String },
}

impl From<Result<Prediction, PredictError>> for PredictionOutcome {
    fn from(result: Result<Prediction, PredictError>) -> Self {
        match result {
            Ok(p) => PredictionOutcome::Result(p),
            Err(e) => PredictionOutcome::Failure {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(body: &str) -> Prediction {
        Prediction::from_json(body.as_bytes()).unwrap()
    }

    #[test]
    fn ai_verdict_is_ai_category() {
        let p = prediction(r#"{"Random_Forest":"AI"}"#);
        assert_eq!(p.category(), Category::Ai);
        assert_eq!(p.label(), "AI");
    }

    #[test]
    fn other_verdicts_fall_into_human() {
        for body in [
            r#"{"Random_Forest":"Human"}"#,
            r#"{"Random_Forest":"Unknown"}"#,
            r#"{"Random_Forest":"ai"}"#,
            r#"{"Random_Forest":1}"#,
            r#"{"SVM":"AI"}"#,
            r#"{}"#,
        ] {
            assert_eq!(prediction(body).category(), Category::Human, "{body}");
        }
    }

    #[test]
    fn missing_verdict_has_empty_label() {
        let p = prediction(r#"{"confidence":0.9}"#);
        assert_eq!(p.label(), "");
        assert_eq!(p.raw.get("confidence"), Some(&serde_json::json!(0.9)));
    }

    #[test]
    fn non_string_verdict_label_is_json_text() {
        assert_eq!(prediction(r#"{"Random_Forest":1}"#).label(), "1");
    }

    #[test]
    fn non_object_body_is_malformed() {
        let err = Prediction::from_json(b"[\"AI\"]").unwrap_err();
        assert!(matches!(err, PredictError::MalformedResponse(ref m) if m.contains("an array")));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = Prediction::from_json(b"not json").unwrap_err();
        assert!(matches!(err, PredictError::MalformedResponse(_)));
    }

    #[test]
    fn error_converts_to_failure_message() {
        let outcome = PredictionOutcome::from(Err::<Prediction, _>(PredictError::NoSelection));
        assert_eq!(
            outcome,
            PredictionOutcome::Failure {
                message: "Please select an audio file first.".to_string()
            }
        );
    }
}
