//! Failures a prediction request can end in.
//!
//! The `Display` text of each variant is what the window shows in its error box.

pub const NO_SELECTION_MESSAGE: &str = "Please select an audio file first.";
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the classification server. \
     Make sure the backend is running and reachable.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// Trigger pressed before any file was picked.
    #[error("{}", NO_SELECTION_MESSAGE)]
    NoSelection,
    /// No response reached us: connect, DNS, TLS or timeout failure.
    /// The detail is logged, never shown.
    #[error("{}", UNREACHABLE_MESSAGE)]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// 2xx response whose body could not be decoded.
    #[error("Unexpected response from the classification server: {0}")]
    MalformedResponse(String),
    #[error("Could not read {name}: {reason}")]
    Read { name: String, reason: String },
    /// The worker ended without reporting a result.
    #[error("The prediction was interrupted unexpectedly.")]
    Interrupted,
}

impl PredictError {
    /// Build the failure for a non-2xx response, preferring the server's own
    /// `error` field when the body carries one.
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            error: Option<String>,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("HTTP error: {status}"));
        PredictError::Rejected { status, message }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        PredictError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_prefers_server_error_field() {
        let err = PredictError::rejected(400, br#"{"error":"unsupported format"}"#);
        assert_eq!(err.to_string(), "unsupported format");
    }

    #[test]
    fn rejected_falls_back_to_status_without_error_field() {
        let err = PredictError::rejected(404, br#"{"detail":"nope"}"#);
        assert_eq!(err.to_string(), "HTTP error: 404");
    }

    #[test]
    fn rejected_falls_back_to_status_on_unparseable_body() {
        let err = PredictError::rejected(500, b"<html>Internal Server Error</html>");
        assert_eq!(
            err,
            PredictError::Rejected {
                status: 500,
                message: "HTTP error: 500".to_string()
            }
        );
    }

    #[test]
    fn rejected_ignores_blank_error_field() {
        let err = PredictError::rejected(502, br#"{"error":"  "}"#);
        assert_eq!(err.to_string(), "HTTP error: 502");
    }

    #[test]
    fn transport_hides_detail() {
        let err = PredictError::Transport("connection refused".into());
        assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
    }
}
