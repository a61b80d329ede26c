//! # UDS+ Validator
//!
//! An async-first validation pipeline for UDS+ health-data submissions.
//! Given an import manifest, fetched from a URL or supplied inline as
//! JSON, it discovers the typed resource bundles the manifest references,
//! checks each against its versioned UDS+ profile, and reports a
//! pass/fail/skip verdict per entry and per record with diagnosable
//! reasons.
//!
//! ## Features
//!
//! - **Layered containment**: a failing entry never aborts its siblings,
//!   a failing record never aborts the rest of its entry
//! - **Tolerant body parsing**: content bodies may be a single JSON object,
//!   newline-delimited JSON, or concatenated objects with no separator
//! - **Injected collaborators**: the fetch gateway, structural validator,
//!   and profile registry are all explicit values, so the pipeline runs
//!   against fakes in tests and real services in deployment
//! - **Order-preserving concurrency**: entries evaluate in parallel up to a
//!   configured bound while the report stays in manifest order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use udsplus_validator::*;
//!
//! # async fn example() -> Result<()> {
//! let config = ValidatorConfig::default();
//! let gateway = Arc::new(HttpGateway::from_config(&config)?);
//! let validator = Arc::new(HttpValidator::from_config(&config)?);
//!
//! let orchestrator =
//!     ValidationOrchestrator::new(ProfileRegistry::uds_plus(), gateway, validator, config);
//!
//! let source = ManifestSource::detect("http://submitter.example/import-manifest");
//! let report = orchestrator.run(source).await;
//! assert!(!report.has_failures());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod gateway;
pub mod manifest;
pub mod orchestrator;
pub mod registry;
pub mod report;
pub mod split;
pub mod validation;

pub use config::ValidatorConfig;
pub use decode::{DecodedResource, decode};
pub use error::Result; // Our Result type takes precedence
pub use error::UdsPlusError;
pub use gateway::{FetchGateway, FetchResponse, HttpGateway};
pub use manifest::{
    ManifestEntry, ManifestSource, ParsedManifest, UDS_DATA_PARAMETER, resolve,
};
pub use orchestrator::ValidationOrchestrator;
pub use registry::{ProfileDefinition, ProfileRegistry, UDS_PLUS_IG_VERSION};
pub use report::{EntryReport, RecordReport, ValidationReport, Verdict};
pub use split::{RecordSplit, split};
pub use validation::{HttpValidator, StructuralOutcome, StructuralValidator};
