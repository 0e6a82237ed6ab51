//! Transport seam between [`RemotionClient`](crate::RemotionClient) and a
//! deployed render function.

use async_trait::async_trait;
use aws_sdk_lambda::config::Region;
use aws_sdk_lambda::primitives::Blob;

use crate::error::LambdaError;
use crate::responses::error_message;

/// Delivers a JSON payload to a function and returns its reply body.
#[async_trait]
pub trait LambdaInvoker: Send + Sync {
    async fn invoke(&self, function_name: &str, payload: Vec<u8>) -> Result<Vec<u8>, LambdaError>;
}

/// Synchronous (`RequestResponse`) invocation through the AWS SDK.
pub struct AwsLambdaInvoker {
    lambda_client: aws_sdk_lambda::Client,
}

impl AwsLambdaInvoker {
    /// Build an invoker from the default AWS credential chain, pinned to
    /// `region`.
    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            lambda_client: aws_sdk_lambda::Client::new(&config),
        }
    }
}

#[async_trait]
impl LambdaInvoker for AwsLambdaInvoker {
    async fn invoke(&self, function_name: &str, payload: Vec<u8>) -> Result<Vec<u8>, LambdaError> {
        let output = self
            .lambda_client
            .invoke()
            .function_name(function_name)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|error| {
                LambdaError::Invoke(format!("failed to invoke {function_name}: {error}"))
            })?;

        let body = output
            .payload()
            .map(|blob| blob.as_ref().to_vec())
            .unwrap_or_default();

        if let Some(kind) = output.function_error() {
            let message = serde_json::from_slice(&body)
                .ok()
                .and_then(|value| error_message(&value))
                .unwrap_or_else(|| kind.to_string());
            tracing::warn!(function_name, kind, "Render function reported an error");
            return Err(LambdaError::Function(message));
        }

        tracing::debug!(function_name, bytes = body.len(), "Render function replied");
        Ok(body)
    }
}
