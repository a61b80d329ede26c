use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Result, UdsPlusError};
use crate::gateway::FetchGateway;

/// Name that marks a top-level parameter as a UDS+ data reference.
/// Parameters with any other name are unrelated metadata and are dropped.
pub const UDS_DATA_PARAMETER: &str = "udsData";

/// Where a manifest comes from: fetched from a URL or supplied inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    Url(String),
    Inline(String),
}

impl ManifestSource {
    /// Classify caller input by its first non-whitespace character:
    /// `{` means inline JSON, anything else is treated as a URL.
    pub fn detect(input: &str) -> Self {
        match input.trim_start().chars().next() {
            Some('{') => ManifestSource::Inline(input.to_string()),
            _ => ManifestSource::Url(input.trim().to_string()),
        }
    }
}

/// One `udsData` reference inside a resolved manifest.
///
/// Both fields stay optional through resolution: an entry missing its
/// `type` or `url` part is reported as a failure by the orchestrator rather
/// than aborting its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub profile_name: Option<String>,
    pub content_url: Option<String>,
}

/// A manifest whose `udsData` entries have been extracted.
///
/// The whole manifest object is retained because it gets its own structural
/// conformance check against the ImportManifest profile, separate from the
/// per-entry content validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedManifest {
    pub entries: Vec<ManifestEntry>,
    pub resource: Value,
}

/// Require a syntactically valid absolute http(s) URI.
pub(crate) fn require_http_uri(raw: &str) -> Result<Url> {
    let parsed = Url::parse(raw).map_err(|_| UdsPlusError::InvalidUri {
        uri: raw.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(UdsPlusError::InvalidUri {
            uri: raw.to_string(),
        }),
    }
}

/// Resolve a manifest source into its ordered `udsData` entries.
///
/// URL sources are fetched through the gateway and must answer 200 with a
/// JSON body; inline sources must be JSON. Either way the decoded value
/// must be a resource-like object (a JSON object carrying a string
/// `resourceType`), or resolution fails for the whole run.
pub async fn resolve(
    source: &ManifestSource,
    gateway: &dyn FetchGateway,
) -> Result<ParsedManifest> {
    let text = match source {
        ManifestSource::Url(location) => {
            require_http_uri(location)?;
            let response = gateway.fetch(location).await?;
            if response.status != 200 {
                return Err(UdsPlusError::FetchFailed {
                    url: location.clone(),
                    status: response.status,
                });
            }
            response.body
        }
        ManifestSource::Inline(text) => text.clone(),
    };

    let resource: Value =
        serde_json::from_str(&text).map_err(|error| UdsPlusError::MalformedManifest {
            message: error.to_string(),
        })?;

    let object = resource.as_object().ok_or_else(|| UdsPlusError::NotAResource {
        message: "manifest is not a JSON object".to_string(),
    })?;
    if !object.get("resourceType").is_some_and(Value::is_string) {
        return Err(UdsPlusError::NotAResource {
            message: "manifest carries no resourceType".to_string(),
        });
    }

    let entries = extract_entries(&resource);
    Ok(ParsedManifest { entries, resource })
}

fn extract_entries(manifest: &Value) -> Vec<ManifestEntry> {
    let Some(parameters) = manifest.get("parameter").and_then(Value::as_array) else {
        return Vec::new();
    };

    parameters
        .iter()
        .filter(|parameter| {
            parameter.get("name").and_then(Value::as_str) == Some(UDS_DATA_PARAMETER)
        })
        .map(|parameter| {
            let mut entry = ManifestEntry {
                profile_name: None,
                content_url: None,
            };
            let Some(parts) = parameter.get("part").and_then(Value::as_array) else {
                return entry;
            };
            for part in parts {
                match part.get("name").and_then(Value::as_str) {
                    Some("type") if entry.profile_name.is_none() => {
                        entry.profile_name = part
                            .get("valueCode")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                    }
                    Some("url") if entry.content_url.is_none() => {
                        entry.content_url = part
                            .get("valueUrl")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                    }
                    _ => {}
                }
            }
            entry
        })
        .collect()
}
