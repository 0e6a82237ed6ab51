//! Optional demo settings read from the environment.

use std::time::Duration;

use remotion_lambda::PollConfig;

/// Poll until the render finishes instead of asking for progress once.
pub const ENV_WAIT: &str = "REMOTION_APP_WAIT";
pub const ENV_POLL_INTERVAL_MS: &str = "REMOTION_APP_POLL_INTERVAL_MS";
pub const ENV_POLL_MAX_ATTEMPTS: &str = "REMOTION_APP_POLL_MAX_ATTEMPTS";

/// How the demo asks for progress after a render starts.
#[derive(Debug, Clone)]
pub enum ProgressMode {
    /// A single progress request.
    Once,
    /// Poll until done, fatal, or out of attempts.
    Wait(PollConfig),
}

impl ProgressMode {
    /// Read the mode from the process environment.
    ///
    /// | Env Var                          | Default |
    /// |----------------------------------|---------|
    /// | `REMOTION_APP_WAIT`              | `false` |
    /// | `REMOTION_APP_POLL_INTERVAL_MS`  | `1000`  |
    /// | `REMOTION_APP_POLL_MAX_ATTEMPTS` | `3000`  |
    ///
    /// Unparsable or zero values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let wait = lookup(ENV_WAIT)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        if !wait {
            return Self::Once;
        }

        let defaults = PollConfig::default();
        let interval = lookup(ENV_POLL_INTERVAL_MS)
            .and_then(|v| v.trim().parse().ok())
            .filter(|ms: &u64| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.interval);
        let max_attempts = lookup(ENV_POLL_MAX_ATTEMPTS)
            .and_then(|v| v.trim().parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(defaults.max_attempts);

        Self::Wait(PollConfig {
            interval,
            max_attempts,
        })
    }
}
