//! Graduation ceremony model.

use crate::error::AppError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A planned graduation ceremony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ceremony {
    pub id: i64,
    pub name: String,
    pub location: String,
    /// Local date and time of the ceremony.
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Data required to create or update a ceremony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeremonyInput {
    pub name: String,
    pub location: String,
    pub scheduled_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CeremonyInput {
    /// Check required fields before sending.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input_field("Name is required", "name"));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::invalid_input_field(
                "Location is required",
                "location",
            ));
        }
        if self.capacity == Some(0) {
            return Err(AppError::invalid_input_field(
                "Capacity must be greater than zero",
                "capacity",
            ));
        }
        Ok(())
    }
}
