//! `remotion-testclient` -- start a render on Remotion Lambda and report
//! its progress.
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default | Description                         |
//! |----------------------------------|----------|---------|-------------------------------------|
//! | `REMOTION_APP_REGION`            | yes      | --      | AWS region of the render function   |
//! | `REMOTION_APP_BUCKET`            | no       | --      | Output bucket (informational)       |
//! | `REMOTION_APP_FUNCTION_NAME`     | yes      | --      | Deployed render function name       |
//! | `REMOTION_APP_SERVE_URL`         | yes      | --      | URL of the deployed site bundle     |
//! | `REMOTION_APP_VERSION`           | no       | `4.0.0` | Protocol version of the function    |
//! | `REMOTION_APP_WAIT`              | no       | `false` | Poll until the render finishes      |
//! | `REMOTION_APP_POLL_INTERVAL_MS`  | no       | `1000`  | Delay between progress requests     |
//! | `REMOTION_APP_POLL_MAX_ATTEMPTS` | no       | `3000`  | Progress requests before giving up  |
//!
//! A `.env` file in the working directory is loaded first.

use remotion_core::config::LambdaConfig;
use remotion_lambda::RemotionClient;
use remotion_testclient::demo::{demo_params, run_demo};
use remotion_testclient::settings::ProgressMode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remotion_testclient=info,remotion_lambda=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = LambdaConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    let mode = ProgressMode::from_env();

    let client = RemotionClient::connect(&config).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to construct Remotion client");
        std::process::exit(1);
    });

    let report = run_demo(&client, &demo_params(), &mode).await;

    if let Err(e) = report.write_to(&mut std::io::stdout().lock()) {
        tracing::error!(error = %e, "Failed to write report");
        std::process::exit(1);
    }
}
