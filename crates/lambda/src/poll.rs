//! Poll a render until it finishes.
//!
//! [`RemotionClient::wait_for_render`] asks for progress on a fixed
//! interval and returns the first snapshot marked `done`.

use std::time::Duration;

use crate::client::RemotionClient;
use crate::error::LambdaError;
use crate::invoker::LambdaInvoker;
use crate::responses::RenderProgress;

/// Tunable parameters for progress polling.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between two progress requests.
    pub interval: Duration,
    /// Progress requests made before giving up.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 3000,
        }
    }
}

impl<I: LambdaInvoker> RemotionClient<I> {
    /// Poll until the render is done.
    ///
    /// Waits one `interval` before every progress request, so a render that
    /// was just started gets time to register. An empty progress reply
    /// counts as an attempt. Stops with
    /// [`LambdaError::Fatal`] as soon as the function reports a fatal
    /// error, and with [`LambdaError::Timeout`] once `max_attempts` is used up.
    pub async fn wait_for_render(
        &self,
        render_id: &str,
        bucket_name: &str,
        config: &PollConfig,
    ) -> Result<RenderProgress, LambdaError> {
        for attempt in 1..=config.max_attempts {
            tokio::time::sleep(config.interval).await;

            match self.get_render_progress(render_id, bucket_name).await? {
                Some(progress) if progress.fatal_error_encountered => {
                    tracing::error!(
                        render_id,
                        errors = ?progress.errors,
                        "Render hit a fatal error",
                    );
                    return Err(LambdaError::Fatal {
                        render_id: render_id.to_string(),
                    });
                }
                Some(progress) if progress.done => {
                    tracing::info!(
                        render_id,
                        attempt,
                        output_file = ?progress.output_file,
                        "Render done",
                    );
                    return Ok(progress);
                }
                Some(progress) => {
                    tracing::info!(
                        render_id,
                        attempt,
                        overall_progress = %progress.overall_progress,
                        chunks = progress.chunks,
                        "Render in progress",
                    );
                }
                None => {
                    tracing::debug!(render_id, attempt, "Empty progress reply");
                }
            }
        }

        Err(LambdaError::Timeout {
            render_id: render_id.to_string(),
            attempts: config.max_attempts,
        })
    }
}
