use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Key fields a single stored object may be looked up by.
///
/// Add a variant here to allow lookups by another unique column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupField {
    Username,
    Id,
    Email,
}

impl LookupField {
    pub const ALL: [LookupField; 3] = [LookupField::Username, LookupField::Id, LookupField::Email];

    /// Column / attribute name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupField::Username => "username",
            LookupField::Id => "id",
            LookupField::Email => "email",
        }
    }
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field name outside the lookup allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Lookup by '{0}' is not allowed (expected one of: username, id, email)")]
pub struct UnknownLookupField(pub String);

impl FromStr for LookupField {
    type Err = UnknownLookupField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookupField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownLookupField(s.to_string()))
    }
}
