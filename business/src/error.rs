use thiserror::Error;

/// Failure of the one-shot dataset fetch.
///
/// Every variant collapses to the same user-facing message; the variants
/// only shape the log line. Never propagated past the load command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API returned status: {0}")]
    Status(u16),
    #[error("failed to decode users payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// The single message the rendering layer shows for any fetch failure.
    pub const USER_MESSAGE: &'static str = "Failed to fetch users. Please try again.";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
}
