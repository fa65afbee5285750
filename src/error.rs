//! Error types for Card Assist.

/// Failures from the bank API client.
///
/// The in-memory mock never produces these; the variants model the transport
/// and decode failures a real HTTP client behind `BankApi` would surface
/// through the same trait. The orchestrator recovers every one of them into
/// a canned apology, so they never reach the HTTP caller as errors.
#[derive(Debug, thiserror::Error)]
pub enum BankApiError {
    #[error("bank API unreachable: {0}")]
    Unreachable(String),

    #[error("invalid response from bank API: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
