//! Priority levels carried by epic and story markdown.
//!
//! Known levels are `P0` through `P3`. Any other literal is kept verbatim in
//! [`Priority::Custom`] so downstream mappings can decide what to do with it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Planning priority of an epic or story.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// Critical.
    P0,
    /// High (default when the field is absent).
    #[default]
    P1,
    /// Normal.
    P2,
    /// Low.
    P3,
    /// Any literal outside the known set.
    Custom(String),
}

impl Priority {
    /// Returns the string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Returns `true` if this is a built-in (non-custom) variant.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self {
        match s {
            "P0" => Self::P0,
            "P1" => Self::P1,
            "P2" => Self::P2,
            "P3" => Self::P3,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "P0" => Self::P0,
            "P1" => Self::P1,
            "P2" => Self::P2,
            "P3" => Self::P3,
            _ => Self::Custom(s),
        }
    }
}
