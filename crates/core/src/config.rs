//! Client configuration loaded from environment variables.
//!
//! Binaries call `dotenvy::dotenv().ok()` before [`LambdaConfig::from_env`]
//! so that a local `.env` file takes part in the lookup.

use crate::error::CoreError;
use crate::regions::validate_region;

/// Target region of the render function.
pub const ENV_REGION: &str = "REMOTION_APP_REGION";
/// Output bucket. Read for completeness; the render flow takes the bucket
/// from each render response instead.
pub const ENV_BUCKET: &str = "REMOTION_APP_BUCKET";
/// Name of the deployed render function.
pub const ENV_FUNCTION_NAME: &str = "REMOTION_APP_FUNCTION_NAME";
/// URL of the deployed site bundle to render from.
pub const ENV_SERVE_URL: &str = "REMOTION_APP_SERVE_URL";
/// Protocol version the deployed function speaks, e.g. `4.0.100`.
pub const ENV_VERSION: &str = "REMOTION_APP_VERSION";

/// Connection settings for a deployed Remotion Lambda function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub region: String,
    pub bucket: Option<String>,
    pub function_name: String,
    pub serve_url: String,
    /// Overrides the client's default protocol version when set.
    pub version: Option<String>,
}

impl LambdaConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Required |
    /// |------------------------------|----------|
    /// | `REMOTION_APP_REGION`        | yes      |
    /// | `REMOTION_APP_BUCKET`        | no       |
    /// | `REMOTION_APP_FUNCTION_NAME` | yes      |
    /// | `REMOTION_APP_SERVE_URL`     | yes      |
    /// | `REMOTION_APP_VERSION`       | no       |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let region = get(ENV_REGION).ok_or(CoreError::MissingConfig(ENV_REGION))?;
        validate_region(&region)?;

        let function_name =
            get(ENV_FUNCTION_NAME).ok_or(CoreError::MissingConfig(ENV_FUNCTION_NAME))?;
        let serve_url = get(ENV_SERVE_URL).ok_or(CoreError::MissingConfig(ENV_SERVE_URL))?;
        let bucket = get(ENV_BUCKET);
        let version = get(ENV_VERSION).map(|v| v.trim().to_string());

        tracing::debug!(
            region = %region,
            function_name = %function_name,
            serve_url = %serve_url,
            bucket = ?bucket,
            version = ?version,
            "Loaded Lambda configuration",
        );

        Ok(Self {
            region,
            bucket,
            function_name,
            serve_url,
            version,
        })
    }
}
