use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, UdsPlusError};

/// A resource decoded from one raw record, tagged with its declared type.
///
/// Created per record and consumed immediately by the structural validator;
/// nothing is persisted across records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedResource {
    pub resource_type: String,
    pub resource: Value,
}

/// Decode one candidate record into a typed resource.
///
/// Surrounding whitespace and newlines are tolerated. Anything that is not
/// a JSON object carrying a string `resourceType` discriminator fails with
/// [`UdsPlusError::Decode`] so the caller can record a per-record verdict
/// and move on.
pub fn decode(text: &str) -> Result<DecodedResource> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(UdsPlusError::Decode {
            message: "record is empty".to_string(),
        });
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|error| UdsPlusError::Decode {
        message: format!("record is not well-formed JSON: {error}"),
    })?;

    let object = value.as_object().ok_or_else(|| UdsPlusError::Decode {
        message: "record is not a JSON object".to_string(),
    })?;

    let resource_type = match object.get("resourceType").and_then(Value::as_str) {
        Some(resource_type) if !resource_type.is_empty() => resource_type.to_string(),
        _ => {
            return Err(UdsPlusError::Decode {
                message: "record carries no resourceType discriminator".to_string(),
            });
        }
    };

    Ok(DecodedResource {
        resource_type,
        resource: value,
    })
}
