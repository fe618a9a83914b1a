//! Strongly-typed ID wrappers for all entity types
//!
//! Identifiers are assigned by the document store, so each wrapper holds the
//! store's opaque string. Using newtype wrappers prevents accidentally mixing
//! up IDs from different entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a store-assigned document id
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the raw document id
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form for tables (first 8 characters)
            pub fn short(&self) -> &str {
                match self.0.char_indices().nth(8) {
                    Some((idx, _)) => &self.0[..idx],
                    None => &self.0,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(BudgetItemId);
define_id!(TodoId);
define_id!(VendorId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = BudgetItemId::new("f3b2c1d0-aaaa-bbbb");
        assert_eq!(id.to_string(), "f3b2c1d0-aaaa-bbbb");
        assert_eq!(id.short(), "f3b2c1d0");
    }

    #[test]
    fn test_short_id_on_short_input() {
        assert_eq!(TodoId::new("abc").short(), "abc");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = VendorId::new("v-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"v-1\"");

        let deserialized: VendorId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
