pub mod http;

pub use http::HttpValidator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::decode::DecodedResource;
use crate::error::Result;

/// Structural verdict for one resource against one versioned profile URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralOutcome {
    pub valid: bool,
    pub issues: Vec<String>,
}

impl StructuralOutcome {
    pub fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    pub fn failure(issues: Vec<String>) -> Self {
        Self {
            valid: false,
            issues,
        }
    }
}

/// Structural conformance seam.
///
/// `profile_url` is always of the form `canonical|version`; the version is
/// pinned by the profile registry, never by the fetched content. A `Result`
/// error means the verdict could not be obtained at all (the validator was
/// unreachable), which callers record as a Skip rather than a Fail.
#[async_trait]
pub trait StructuralValidator: Send + Sync {
    async fn validate(
        &self,
        resource: &DecodedResource,
        profile_url: &str,
    ) -> Result<StructuralOutcome>;
}
