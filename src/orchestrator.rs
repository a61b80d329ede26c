use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ValidatorConfig;
use crate::decode::{self, DecodedResource};
use crate::error::UdsPlusError;
use crate::gateway::FetchGateway;
use crate::manifest::{self, ManifestEntry, ManifestSource, ParsedManifest};
use crate::registry::ProfileRegistry;
use crate::report::{EntryReport, RecordReport, ValidationReport, Verdict};
use crate::split;
use crate::validation::StructuralValidator;

/// Short name of the profile the whole manifest is checked against.
const MANIFEST_PROFILE: &str = "ImportManifest";

/// Drives the end-to-end validation flow: resolve the manifest, check its
/// own structure, then evaluate every `udsData` entry and every record the
/// entry's content body yields.
///
/// Failure is contained at each level: a bad entry never stops its
/// siblings, and a bad record never stops the rest of its entry. Entries
/// are evaluated through an order-preserving bounded-concurrency stream, so
/// the report always lists them in manifest order.
pub struct ValidationOrchestrator {
    registry: ProfileRegistry,
    gateway: Arc<dyn FetchGateway>,
    validator: Arc<dyn StructuralValidator>,
    config: ValidatorConfig,
}

impl ValidationOrchestrator {
    pub fn new(
        registry: ProfileRegistry,
        gateway: Arc<dyn FetchGateway>,
        validator: Arc<dyn StructuralValidator>,
        config: ValidatorConfig,
    ) -> Self {
        Self {
            registry,
            gateway,
            validator,
            config,
        }
    }

    /// Run one full validation pass over a manifest source.
    pub async fn run(&self, source: ManifestSource) -> ValidationReport {
        let started_at = Utc::now();
        match &source {
            ManifestSource::Url(url) => info!(%url, "starting validation run"),
            ManifestSource::Inline(_) => info!("starting validation run with inline manifest"),
        }

        let manifest = match manifest::resolve(&source, self.gateway.as_ref()).await {
            Ok(manifest) => manifest,
            Err(error) => {
                warn!(%error, "manifest resolution failed, nothing to validate");
                return ValidationReport {
                    started_at,
                    finished_at: Utc::now(),
                    manifest_fetch: Verdict::Fail(error.to_string()),
                    manifest_structure: Verdict::Skip(
                        "no manifest available to validate".to_string(),
                    ),
                    entries: Vec::new(),
                };
            }
        };
        debug!(entries = manifest.entries.len(), "manifest resolved");

        let manifest_structure = self.validate_manifest_structure(&manifest).await;

        let entries = stream::iter(
            manifest
                .entries
                .iter()
                .enumerate()
                .map(|(index, entry)| self.evaluate_entry(index, entry)),
        )
        .buffered(self.config.max_concurrent_entries.max(1))
        .collect::<Vec<_>>()
        .await;

        info!(
            entries = entries.len(),
            failed = entries.iter().filter(|entry| entry.verdict.is_fail()).count(),
            "validation run finished"
        );

        ValidationReport {
            started_at,
            finished_at: Utc::now(),
            manifest_fetch: Verdict::Pass,
            manifest_structure,
            entries,
        }
    }

    /// Structural check of the whole manifest against the ImportManifest
    /// profile. Informational: its outcome never stops entry processing.
    async fn validate_manifest_structure(&self, manifest: &ParsedManifest) -> Verdict {
        let Some(profile) = self.registry.lookup(MANIFEST_PROFILE) else {
            return Verdict::Skip(format!("no {MANIFEST_PROFILE} profile registered"));
        };

        let resource_type = manifest
            .resource
            .get("resourceType")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let resource = DecodedResource {
            resource_type,
            resource: manifest.resource.clone(),
        };

        let profile_url = profile.versioned_url();
        match self.validator.validate(&resource, &profile_url).await {
            Ok(outcome) if outcome.valid => Verdict::Pass,
            Ok(outcome) => Verdict::Fail(format!(
                "manifest does not conform to {profile_url}: {}",
                outcome.issues.join("; ")
            )),
            Err(error) => {
                warn!(%error, "manifest structure check could not be evaluated");
                Verdict::Skip(format!("manifest structure could not be evaluated: {error}"))
            }
        }
    }

    /// Evaluate one manifest entry through its terminal state:
    /// missing fields, unknown profile, invalid URL, failed fetch, empty
    /// body, or records evaluated.
    async fn evaluate_entry(&self, index: usize, entry: &ManifestEntry) -> EntryReport {
        let (Some(profile_name), Some(content_url)) = (&entry.profile_name, &entry.content_url)
        else {
            let missing = match (&entry.profile_name, &entry.content_url) {
                (None, None) => "type and url parts",
                (None, Some(_)) => "type part",
                _ => "url part",
            };
            return EntryReport::failed(
                index,
                entry.profile_name.clone(),
                entry.content_url.clone(),
                UdsPlusError::MissingManifestFields {
                    detail: format!("entry {index} is missing its {missing}"),
                }
                .to_string(),
            );
        };

        let Some(profile) = self.registry.lookup(profile_name) else {
            debug!(index, profile = %profile_name, "entry names an unregistered profile");
            return EntryReport::failed(
                index,
                entry.profile_name.clone(),
                entry.content_url.clone(),
                UdsPlusError::UnknownProfile {
                    name: profile_name.clone(),
                }
                .to_string(),
            );
        };

        if manifest::require_http_uri(content_url).is_err() {
            return EntryReport::failed(
                index,
                entry.profile_name.clone(),
                entry.content_url.clone(),
                format!("invalid URL provided for type {profile_name}: {content_url}"),
            );
        }

        let response = match self.gateway.fetch(content_url).await {
            Ok(response) => response,
            Err(error) => {
                warn!(index, url = %content_url, %error, "entry content fetch failed");
                return EntryReport::failed(
                    index,
                    entry.profile_name.clone(),
                    entry.content_url.clone(),
                    error.to_string(),
                );
            }
        };
        if response.status != 200 {
            return EntryReport::failed(
                index,
                entry.profile_name.clone(),
                entry.content_url.clone(),
                UdsPlusError::FetchFailed {
                    url: content_url.clone(),
                    status: response.status,
                }
                .to_string(),
            );
        }

        let profile_url = profile.versioned_url();
        let mut records = Vec::new();
        for (record_index, raw) in split::split(&response.body).enumerate() {
            records.push(RecordReport {
                index: record_index,
                verdict: self.evaluate_record(raw, &profile_url).await,
            });
        }

        if records.is_empty() {
            return EntryReport::failed(
                index,
                entry.profile_name.clone(),
                entry.content_url.clone(),
                UdsPlusError::NoRecords {
                    url: content_url.clone(),
                }
                .to_string(),
            );
        }

        debug!(index, records = records.len(), "entry records evaluated");
        EntryReport {
            index,
            profile_name: entry.profile_name.clone(),
            content_url: entry.content_url.clone(),
            verdict: Verdict::Pass,
            records,
        }
    }

    /// Decode one raw record and check it against the entry's profile.
    async fn evaluate_record(&self, raw: &str, profile_url: &str) -> Verdict {
        let resource = match decode::decode(raw) {
            Ok(resource) => resource,
            Err(error) => return Verdict::Fail(error.to_string()),
        };

        match self.validator.validate(&resource, profile_url).await {
            Ok(outcome) if outcome.valid => Verdict::Pass,
            Ok(outcome) => Verdict::Fail(format!(
                "{} does not conform to {profile_url}: {}",
                resource.resource_type,
                outcome.issues.join("; ")
            )),
            Err(error) => Verdict::Skip(format!("record could not be evaluated: {error}")),
        }
    }
}
