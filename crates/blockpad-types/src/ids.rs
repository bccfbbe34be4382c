//! Typed identifiers for documents and sessions.
//!
//! Both ID types wrap UUIDv7 (time-ordered, globally unique) and display as
//! standard UUID text for logging. The `short()` form (first 8 hex chars) is
//! for human-facing output only, never a lookup key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A document identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(uuid::Uuid);

/// An editing session identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(uuid::Uuid);

// Both ids share one implementation.

macro_rules! impl_typed_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Fresh id; later calls sort after earlier ones.
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Leading 8 hex digits, used in log lines and `BlockId` display.
            pub fn short(&self) -> String {
                self.0.as_simple().to_string()[..8].to_string()
            }

            /// Hyphen-free hex form used inside block keys.
            pub fn to_hex(&self) -> String {
                self.0.as_simple().to_string()
            }

            /// Accepts both the hex form and the hyphenated form.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.short())
            }
        }
    };
}

impl_typed_id!(DocumentId, "DocumentId");
impl_typed_id!(SessionId, "SessionId");

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unique() {
        let a = DocumentId::new();
        let b = DocumentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_is_8_chars() {
        assert_eq!(SessionId::new().short().len(), 8);
    }

    #[test]
    fn test_hex_is_32_chars() {
        assert_eq!(DocumentId::new().to_hex().len(), 32);
    }

    #[test]
    fn test_parse_hex_and_uuid_format() {
        let id = DocumentId::new();
        assert_eq!(DocumentId::parse(&id.to_hex()).unwrap(), id);
        // Display has hyphens
        assert_eq!(DocumentId::parse(&id.to_string()).unwrap(), id);
        assert!(DocumentId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_ordering_is_time_ordered() {
        let ids: Vec<SessionId> = (0..10).map(|_| SessionId::new()).collect();
        for i in 1..ids.len() {
            assert!(ids[i] >= ids[i - 1]);
        }
    }

    #[test]
    fn test_debug_shows_type_and_short() {
        let id = DocumentId::new();
        assert_eq!(format!("{id:?}"), format!("DocumentId({})", id.short()));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = SessionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
