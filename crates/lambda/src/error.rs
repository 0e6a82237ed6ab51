use remotion_core::error::CoreError;

/// Errors from building, sending, or decoding render function calls.
#[derive(Debug, thiserror::Error)]
pub enum LambdaError {
    /// Configuration or validation failure from `remotion_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The invocation itself failed (credentials, network, throttling).
    #[error("Lambda invocation failed: {0}")]
    Invoke(String),

    /// The render function ran but reported an error.
    #[error("Render function error: {0}")]
    Function(String),

    /// A payload could not be encoded or a reply could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The render reported a fatal error while being polled.
    #[error("Render {render_id} encountered a fatal error")]
    Fatal { render_id: String },

    /// Polling gave up before the render finished.
    #[error("Render {render_id} not done after {attempts} progress checks")]
    Timeout { render_id: String, attempts: u32 },
}
