//! Zone selection form model.
//!
//! Back-office forms (machines, extractions) ask the operator to pick the
//! casino floor zone, or to type the name of a new one. Validation happens
//! here, before anything is sent; failures go back to the form for inline
//! display.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A floor zone as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    #[serde(alias = "nombre")]
    pub name: String,
}

impl Zone {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// What the operator chose in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ZoneSelection {
    Existing { id: i64 },
    New { name: String },
}

/// A validated selection, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ZoneRequest {
    Existing(Zone),
    Create { name: String },
}

impl ZoneSelection {
    /// Check the selection against the zones currently listed.
    ///
    /// New names are trimmed; they must be non-empty and must not repeat an
    /// existing zone name (case-insensitive).
    pub fn validate(&self, zones: &[Zone]) -> Result<ZoneRequest, ValidationError> {
        match self {
            ZoneSelection::Existing { id } => zones
                .iter()
                .find(|z| z.id == *id)
                .cloned()
                .map(ZoneRequest::Existing)
                .ok_or(ValidationError::UnknownZone(*id)),
            ZoneSelection::New { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::EmptyZoneName);
                }
                if let Some(existing) = zones
                    .iter()
                    .find(|z| z.name.trim().to_lowercase() == name.to_lowercase())
                {
                    return Err(ValidationError::DuplicateZone(existing.name.clone()));
                }
                Ok(ZoneRequest::Create {
                    name: name.to_string(),
                })
            }
        }
    }
}
