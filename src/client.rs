//! HTTP client for the remote classification endpoint.

use std::io::Read;
use std::path::Path;

use reqwest::blocking::{Client, Response, multipart};

use crate::config::{AUDIO_FIELD, CONNECT_TIMEOUT, MAX_RESPONSE_BYTES, REQUEST_TIMEOUT};
use crate::error::PredictError;
use crate::prediction::Prediction;
use crate::selection::SelectedInput;

/// Something that can classify a selected audio file.
pub trait Classifier: Send + Sync {
    fn classify(&self, input: &SelectedInput) -> Result<Prediction, PredictError>;
}

pub struct HttpClassifier {
    client: Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, input: &SelectedInput) -> Result<Prediction, PredictError> {
        let bytes = std::fs::read(&input.path).map_err(|e| PredictError::Read {
            name: input.display_name.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(
            "POST {} with {} ({} bytes)",
            self.endpoint,
            input.display_name,
            bytes.len()
        );

        let file_name = input
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display_name.clone());
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type(&input.path))?;
        let form = multipart::Form::new().part(AUDIO_FIELD, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {e}", self.endpoint);
                PredictError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still reports the status.
            let body = read_body(response).unwrap_or_else(|e| {
                tracing::debug!("Ignoring {status} body: {e:?}");
                Vec::new()
            });
            return Err(PredictError::rejected(status.as_u16(), &body));
        }

        let body = read_body(response)?;
        tracing::debug!("Classifier answered {status} with {} bytes", body.len());
        Prediction::from_json(&body)
    }
}

/// Read the response body, refusing anything larger than the cap.
fn read_body(response: Response) -> Result<Vec<u8>, PredictError> {
    if let Some(length) = response.content_length()
        && length > MAX_RESPONSE_BYTES as u64
    {
        return Err(PredictError::MalformedResponse(format!(
            "response too large: {length} bytes"
        )));
    }

    let mut body = Vec::new();
    response
        .take(MAX_RESPONSE_BYTES as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| PredictError::Transport(e.to_string()))?;
    if body.len() > MAX_RESPONSE_BYTES {
        return Err(PredictError::MalformedResponse(format!(
            "response exceeded {MAX_RESPONSE_BYTES} bytes"
        )));
    }
    Ok(body)
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" | "wave" => "audio/wav",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "ogg" | "oga" | "opus" => "audio/ogg",
        "m4a" | "mp4" | "aac" => "audio/mp4",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
