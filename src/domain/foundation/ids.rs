//! Strongly-typed identifier value objects.
//!
//! Forum identities reach this crate in two shapes: as JSON numbers from
//! the host and as strings from sorted-set members or query parameters.
//! Every identifier is normalized to a `u64` at the boundary so that
//! comparisons never depend on the shape the value arrived in.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Wire form accepted for any identifier: `42` or `"42"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from its numeric value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the numeric value.
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                trimmed
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|e| ValidationError::invalid_format($field, e.to_string()))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                match RawId::deserialize(deserializer)? {
                    RawId::Number(n) => Ok(Self(n)),
                    RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
                }
            }
        }
    };
}

numeric_id!(
    /// Forum user identity.
    UserId,
    "uid"
);

numeric_id!(
    /// Forum category identity.
    CategoryId,
    "cid"
);

numeric_id!(
    /// Topic identity.
    TopicId,
    "tid"
);

numeric_id!(
    /// Post identity. A topic's main post has one too.
    PostId,
    "pid"
);
