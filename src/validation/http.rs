use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ValidatorConfig;
use crate::decode::DecodedResource;
use crate::error::{Result, UdsPlusError};
use crate::validation::{StructuralOutcome, StructuralValidator};

/// Client for the external structural validator service.
///
/// The service exposes `POST {base}/validate?profile={url}` taking the
/// resource JSON as the request body and answering with a FHIR
/// OperationOutcome. Issues of severity `error` or `fatal` make the
/// outcome invalid; each contributes one diagnostic string.
#[derive(Debug, Clone)]
pub struct HttpValidator {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OperationOutcome {
    #[serde(default)]
    issue: Vec<OutcomeIssue>,
}

#[derive(Debug, Deserialize)]
struct OutcomeIssue {
    severity: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    diagnostics: Option<String>,
    #[serde(default)]
    expression: Vec<String>,
}

impl OutcomeIssue {
    fn is_blocking(&self) -> bool {
        matches!(self.severity.as_str(), "error" | "fatal")
    }

    fn render(&self) -> String {
        let detail = self
            .diagnostics
            .as_deref()
            .or(self.code.as_deref())
            .unwrap_or("no diagnostics provided");
        if self.expression.is_empty() {
            format!("{}: {}", self.severity, detail)
        } else {
            format!("{}: {} [{}]", self.severity, detail, self.expression.join(", "))
        }
    }
}

impl HttpValidator {
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|error| UdsPlusError::Transport {
                message: format!("failed to build validator client: {error}"),
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        Self::new(
            config.validator_base_url.clone(),
            config.request_timeout,
            &config.user_agent,
        )
    }
}

#[async_trait]
impl StructuralValidator for HttpValidator {
    async fn validate(
        &self,
        resource: &DecodedResource,
        profile_url: &str,
    ) -> Result<StructuralOutcome> {
        let endpoint = format!("{}/validate", self.base_url);
        let response = self
            .client
            .post(&endpoint)
            .query(&[("profile", profile_url)])
            .json(&resource.resource)
            .send()
            .await
            .map_err(|error| UdsPlusError::Transport {
                message: format!("validator service unreachable at {endpoint}: {error}"),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(UdsPlusError::Transport {
                message: format!("validator service returned status {status} for {profile_url}"),
            });
        }

        let outcome: OperationOutcome =
            response
                .json()
                .await
                .map_err(|error| UdsPlusError::Transport {
                    message: format!("validator service answered with unreadable body: {error}"),
                })?;

        let issues: Vec<String> = outcome
            .issue
            .iter()
            .filter(|issue| issue.is_blocking())
            .map(OutcomeIssue::render)
            .collect();

        if issues.is_empty() {
            Ok(StructuralOutcome::success())
        } else {
            Ok(StructuralOutcome::failure(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_issues_are_rendered_with_location() {
        let issue = OutcomeIssue {
            severity: "error".to_string(),
            code: Some("structure".to_string()),
            diagnostics: Some("cardinality violated".to_string()),
            expression: vec!["Patient.name".to_string()],
        };
        assert!(issue.is_blocking());
        assert_eq!(issue.render(), "error: cardinality violated [Patient.name]");
    }

    #[test]
    fn informational_issues_do_not_block() {
        let issue = OutcomeIssue {
            severity: "warning".to_string(),
            code: None,
            diagnostics: None,
            expression: Vec::new(),
        };
        assert!(!issue.is_blocking());
        assert_eq!(issue.render(), "warning: no diagnostics provided");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let validator = HttpValidator::new(
            "http://validator_service:4567/",
            Duration::from_secs(5),
            "test",
        )
        .unwrap();
        assert_eq!(validator.base_url, "http://validator_service:4567");
    }
}
