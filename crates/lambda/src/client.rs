//! Client for a deployed Remotion Lambda render function.
//!
//! [`RemotionClient`] holds the connection settings for one function and
//! exposes the two calls a caller needs: start a render and ask for its
//! progress. Both return `Ok(None)` when the function replies with nothing.

use remotion_core::config::LambdaConfig;
use remotion_core::regions::validate_region;

use crate::error::LambdaError;
use crate::invoker::{AwsLambdaInvoker, LambdaInvoker};
use crate::params::{
    encode_start, encode_status, RenderParams, RenderProgressParams, DEFAULT_PROTOCOL_VERSION,
};
use crate::responses::{decode_body, RenderProgress, RenderResponse};

pub struct RemotionClient<I = AwsLambdaInvoker> {
    region: String,
    serve_url: String,
    function_name: String,
    version: String,
    invoker: I,
}

impl RemotionClient<AwsLambdaInvoker> {
    /// Create a client that invokes the function through the AWS SDK.
    pub async fn connect(config: &LambdaConfig) -> Result<Self, LambdaError> {
        let invoker = AwsLambdaInvoker::from_region(&config.region).await;
        Self::new(config, invoker)
    }
}

impl<I: LambdaInvoker> RemotionClient<I> {
    /// Create a client over an arbitrary invoker.
    pub fn new(config: &LambdaConfig, invoker: I) -> Result<Self, LambdaError> {
        validate_region(&config.region)?;

        tracing::info!(
            region = %config.region,
            function_name = %config.function_name,
            version = config.version.as_deref().unwrap_or(DEFAULT_PROTOCOL_VERSION),
            "Remotion client ready",
        );

        Ok(Self {
            region: config.region.clone(),
            serve_url: config.serve_url.clone(),
            function_name: config.function_name.clone(),
            version: config
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
            invoker,
        })
    }

    /// Override the protocol version sent to the function. It must match
    /// the version the function was deployed with. `new` already applies
    /// [`LambdaConfig::version`] when it is set.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn serve_url(&self) -> &str {
        &self.serve_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Start rendering `params.composition` with `params.data` as input props.
    pub async fn render_media_on_lambda(
        &self,
        params: &RenderParams,
    ) -> Result<Option<RenderResponse>, LambdaError> {
        let payload = encode_start(params, &self.region, &self.serve_url, &self.version)?;

        tracing::info!(
            composition = %params.composition,
            function_name = %self.function_name,
            "Requesting render",
        );

        let body = self.invoker.invoke(&self.function_name, payload).await?;
        match decode_body(&body)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Fetch the current progress of a render.
    pub async fn get_render_progress(
        &self,
        render_id: &str,
        bucket_name: &str,
    ) -> Result<Option<RenderProgress>, LambdaError> {
        let params = RenderProgressParams {
            render_id: render_id.to_string(),
            bucket_name: bucket_name.to_string(),
            function_name: self.function_name.clone(),
            region: self.region.clone(),
        };
        let payload = encode_status(&params, &self.version)?;

        tracing::debug!(render_id, bucket_name, "Requesting render progress");

        let body = self.invoker.invoke(&self.function_name, payload).await?;
        match decode_body(&body)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
