use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// Multipart field the classifier reads the upload from.
pub const AUDIO_FIELD: &str = "audio";
/// Response field holding the primary model's verdict.
pub const VERDICT_FIELD: &str = "Random_Forest";
pub const AI_LABEL: &str = "AI";

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const MAX_RESPONSE_BYTES: usize = 256 * 1024;

pub const POLL_INTERVAL: Duration = Duration::from_millis(80);
pub const WINDOW_WIDTH: i32 = 420;
pub const WINDOW_HEIGHT: i32 = 360;

/// Classification endpoint, fixed at build time.
/// Set `VOXCHECK_ENDPOINT` while compiling to point at another server.
pub fn endpoint() -> &'static str {
    option_env!("VOXCHECK_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT)
}
