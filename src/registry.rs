use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Version tag applied to the UDS+ profile registry as a unit.
pub const UDS_PLUS_IG_VERSION: &str = "0.3.0";

const PROFILE_BASE: &str = "http://fhir.drajer.com/site";

/// A named, versioned UDS+ structural profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    pub short_name: String,
    pub canonical_url: String,
    pub version: String,
}

impl ProfileDefinition {
    pub fn new(
        short_name: impl Into<String>,
        canonical_url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            canonical_url: canonical_url.into(),
            version: version.into(),
        }
    }

    /// Canonical URL with the registry version pinned, as handed to the
    /// structural validator: `canonical|version`.
    pub fn versioned_url(&self) -> String {
        format!("{}|{}", self.canonical_url, self.version)
    }
}

/// Fixed mapping from profile short name to its versioned definition.
///
/// Built once at startup and handed into the orchestrator by value, so
/// tests can inject their own table. Never consulted through any global.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<String, ProfileDefinition>,
}

impl ProfileRegistry {
    /// The UDS+ profile table of the reference deployment.
    pub fn uds_plus() -> Self {
        let table = [
            (
                "SexualOrientation",
                "StructureDefinition-uds-plus-sexual-orientation-observation.html",
            ),
            (
                "ImportManifest",
                "StructureDefinition-uds-plus-import-manifest.html",
            ),
            ("Income", "StructureDefinition-uds-plus-income-observation.html"),
            ("DeIdentifyData", "StructureDefinition-uds-plus-deidentify-data.html"),
            ("Procedure", "StructureDefinition-uds-plus-procedure.html"),
            ("Patient", "StructureDefinition-de-identified-uds-plus-patient.html"),
            ("Encounter", "StructureDefinition-uds-plus-encounter.html"),
            ("Coverage", "StructureDefinition-uds-plus-coverage.html"),
            ("Diagnosis", "StructureDefinition-uds-plus-diagnosis.html"),
        ];

        Self::from_definitions(table.into_iter().map(|(name, page)| {
            ProfileDefinition::new(
                name,
                format!("{PROFILE_BASE}/{page}"),
                UDS_PLUS_IG_VERSION,
            )
        }))
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ProfileDefinition>) -> Self {
        Self {
            profiles: definitions
                .into_iter()
                .map(|definition| (definition.short_name.clone(), definition))
                .collect(),
        }
    }

    pub fn lookup(&self, short_name: &str) -> Option<&ProfileDefinition> {
        self.profiles.get(short_name)
    }

    pub fn short_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
