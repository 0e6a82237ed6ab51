//! Remotion Lambda render client.
//!
//! Builds render and progress payloads, hands them to a deployed render
//! function through a [`LambdaInvoker`](invoker::LambdaInvoker), and
//! decodes the replies into typed responses.

pub mod client;
pub mod error;
pub mod invoker;
pub mod params;
pub mod poll;
pub mod responses;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use client::RemotionClient;
pub use error::LambdaError;
pub use invoker::{AwsLambdaInvoker, LambdaInvoker};
pub use params::{RenderParams, RenderProgressParams};
pub use poll::PollConfig;
pub use responses::{RenderProgress, RenderResponse};
