/// Application-level constants
pub const APP_NAME: &str = "Anamnesis";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version stamp embedded in doctor hand-off metadata.
pub const ANALYSIS_VERSION: &str = "1.0";

/// Fixed budget for a single oracle round trip. A call that outlives this
/// is treated as unavailable and the contextual fallback takes over.
pub const ORACLE_TIMEOUT_SECS: u64 = 30;

/// OpenAI-compatible chat-completions endpoint base.
pub const ORACLE_BASE_URL: &str = "https://api.openai.com/v1";
pub const ORACLE_MODEL: &str = "gpt-4o-mini";

const ORACLE_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// The oracle credential, if one is configured. An unset, empty, or
/// placeholder value means the oracle is unreachable and every caller takes
/// the local fallback path instead.
pub fn oracle_api_key() -> Option<String> {
    match std::env::var(ORACLE_API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() && key != "demo-key" => Some(key),
        _ => None,
    }
}

pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
