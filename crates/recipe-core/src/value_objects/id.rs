//! Database identifier - a positive 64-bit row id
//!
//! Every table uses a `BIGSERIAL` primary key, so ids are assigned by
//! PostgreSQL on insert and travel through the API as plain JSON integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier shared by all entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(i64);

impl Id {
    /// Wrap a raw database id
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse from a path or query string
    ///
    /// Only strictly positive integers are accepted; `0` and negatives can
    /// never name a row.
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        match s.trim().parse::<i64>() {
            Ok(v) if v > 0 => Ok(Self(v)),
            Ok(_) => Err(IdParseError::NotPositive),
            Err(_) => Err(IdParseError::InvalidFormat),
        }
    }
}

/// Error when parsing an [`Id`] from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,

    #[error("id must be a positive integer")]
    NotPositive,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Id {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Id> for i64 {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl std::str::FromStr for Id {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::parse(s)
    }
}
