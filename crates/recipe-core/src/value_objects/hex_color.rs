//! Tag color in `#RRGGBB` notation

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated 24-bit hex color, normalized to upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a color like `#e26c2d`
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let s = s.trim();
        let digits = s.strip_prefix('#').ok_or(HexColorError::MissingHash)?;

        if digits.len() != 6 {
            return Err(HexColorError::WrongLength(digits.len()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HexColorError::InvalidDigit);
        }

        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// The normalized `#RRGGBB` string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error when parsing a [`HexColor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexColorError {
    #[error("color must start with '#'")]
    MissingHash,

    #[error("color must have 6 hex digits, got {0}")]
    WrongLength(usize),

    #[error("color contains a non-hex digit")]
    InvalidDigit,
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HexColor::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        HexColor::parse(&raw).map_err(serde::de::Error::custom)
    }
}
