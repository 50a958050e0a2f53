//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a beer in the stock catalog.
///
/// Assigned by the store on insert and never changed afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeerId(Uuid);

impl BeerId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BeerId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for BeerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for BeerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<BeerId> for Uuid {
    fn from(value: BeerId) -> Self {
        value.0
    }
}

impl FromStr for BeerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| DomainError::validation(format!("BeerId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_its_own_display_form() {
        let id = BeerId::new();
        let parsed: BeerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<BeerId>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.starts_with("BeerId:")));
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let id = BeerId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
