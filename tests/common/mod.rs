use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use udsplus_validator::*;

/// Gateway serving canned responses from a url -> (status, body) table.
/// Unrouted URLs fail with a transport error, like an unreachable host.
#[allow(dead_code)]
#[derive(Default)]
pub struct StaticGateway {
    responses: HashMap<String, (u16, String)>,
}

#[allow(dead_code)]
impl StaticGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), (status, body.to_string()));
        self
    }
}

#[async_trait]
impl FetchGateway for StaticGateway {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        match self.responses.get(url) {
            Some((status, body)) => Ok(FetchResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Err(UdsPlusError::Transport {
                message: format!("no route to {url}"),
            }),
        }
    }
}

/// Validator that approves everything and records the profile URLs it saw.
#[allow(dead_code)]
#[derive(Default)]
pub struct ApprovingValidator {
    seen: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ApprovingValidator {
    pub fn seen_profiles(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuralValidator for ApprovingValidator {
    async fn validate(
        &self,
        _resource: &DecodedResource,
        profile_url: &str,
    ) -> Result<StructuralOutcome> {
        self.seen.lock().unwrap().push(profile_url.to_string());
        Ok(StructuralOutcome::success())
    }
}

/// Validator that rejects everything with the given issues.
#[allow(dead_code)]
pub struct RejectingValidator {
    pub issues: Vec<String>,
}

#[async_trait]
impl StructuralValidator for RejectingValidator {
    async fn validate(
        &self,
        _resource: &DecodedResource,
        _profile_url: &str,
    ) -> Result<StructuralOutcome> {
        Ok(StructuralOutcome::failure(self.issues.clone()))
    }
}

/// Validator that rejects one specific profile URL and approves the rest.
#[allow(dead_code)]
pub struct SelectiveValidator {
    pub reject_profile: String,
    pub issues: Vec<String>,
}

#[async_trait]
impl StructuralValidator for SelectiveValidator {
    async fn validate(
        &self,
        _resource: &DecodedResource,
        profile_url: &str,
    ) -> Result<StructuralOutcome> {
        if profile_url == self.reject_profile {
            Ok(StructuralOutcome::failure(self.issues.clone()))
        } else {
            Ok(StructuralOutcome::success())
        }
    }
}

/// Validator whose service can never be reached.
#[allow(dead_code)]
pub struct UnreachableValidator;

#[async_trait]
impl StructuralValidator for UnreachableValidator {
    async fn validate(
        &self,
        _resource: &DecodedResource,
        _profile_url: &str,
    ) -> Result<StructuralOutcome> {
        Err(UdsPlusError::Transport {
            message: "validator service unreachable".to_string(),
        })
    }
}

/// Build an inline Parameters manifest with one udsData entry per
/// (type, url) pair.
#[allow(dead_code)]
pub fn uds_manifest(entries: &[(&str, &str)]) -> String {
    let parameter: Vec<serde_json::Value> = entries
        .iter()
        .map(|(profile_type, url)| {
            serde_json::json!({
                "name": "udsData",
                "part": [
                    {"name": "type", "valueCode": profile_type},
                    {"name": "url", "valueUrl": url}
                ]
            })
        })
        .collect();

    serde_json::json!({
        "resourceType": "Parameters",
        "parameter": parameter
    })
    .to_string()
}

/// Versioned profile URL for a registered UDS+ short name.
#[allow(dead_code)]
pub fn versioned_profile(short_name: &str) -> String {
    ProfileRegistry::uds_plus()
        .lookup(short_name)
        .unwrap()
        .versioned_url()
}
