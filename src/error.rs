use thiserror::Error;

#[derive(Error, Debug)]
pub enum UdsPlusError {
    #[error("import manifest uri location is not a valid http uri: {uri}")]
    InvalidUri { uri: String },

    #[error("fetch of {url} returned status {status}")]
    FetchFailed { url: String, status: u16 },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("manifest is not well-formed JSON: {message}")]
    MalformedManifest { message: String },

    #[error("manifest does not contain a valid resource: {message}")]
    NotAResource { message: String },

    #[error("manifest entry is not conventionally accessible: {detail}")]
    MissingManifestFields { detail: String },

    #[error("'{name}' is not a defined UDS+ profile type")]
    UnknownProfile { name: String },

    #[error("no resource instances found at {url}")]
    NoRecords { url: String },

    #[error("record could not be decoded: {message}")]
    Decode { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl UdsPlusError {
    /// Errors fatal to a whole run when raised while resolving the manifest
    /// itself. Everything else is scoped to one entry or record.
    pub fn is_fatal_for_manifest(&self) -> bool {
        matches!(
            self,
            UdsPlusError::InvalidUri { .. }
                | UdsPlusError::FetchFailed { .. }
                | UdsPlusError::Transport { .. }
                | UdsPlusError::MalformedManifest { .. }
                | UdsPlusError::NotAResource { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, UdsPlusError>;
