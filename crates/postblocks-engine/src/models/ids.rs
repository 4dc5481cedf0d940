use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! node_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh identifier. Identifiers are never reused.
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "-{}"), Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

node_id!(
    /// Stable identity of a content block
    BlockId,
    "block"
);
node_id!(
    /// Stable identity of a column within a section
    ColumnId,
    "col"
);
node_id!(
    /// Stable identity of a section row
    SectionId,
    "section"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix() {
        assert!(BlockId::generate().as_str().starts_with("block-"));
        assert!(ColumnId::generate().as_str().starts_with("col-"));
        assert!(SectionId::generate().as_str().starts_with("section-"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = BlockId::generate();
        let b = BlockId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = SectionId::from("section-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"section-1\"");
        let back: SectionId = serde_json::from_str("\"section-1\"").unwrap();
        assert_eq!(back, "section-1");
    }
}
