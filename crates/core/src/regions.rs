//! AWS regions in which Remotion Lambda can be deployed.
//!
//! Mirrors the region list published with the Lambda runtime. Requests
//! targeting any other region are rejected before touching the network.

use crate::error::CoreError;

/// Every region the render function can be deployed to.
pub const AWS_REGIONS: &[&str] = &[
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-south-1",
    "eu-north-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-south-1",
    "ap-east-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ca-central-1",
    "me-south-1",
    "sa-east-1",
];

/// Validate that `region` is a supported AWS region.
pub fn validate_region(region: &str) -> Result<(), CoreError> {
    if AWS_REGIONS.contains(&region) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid region '{region}'. Must be one of: {AWS_REGIONS:?}"
        )))
    }
}
