//! Tag entity - a colored label such as "breakfast"

use crate::value_objects::{HexColor, Id, Slug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Id,
    pub name: String,
    pub color: HexColor,
    pub slug: Slug,
}

/// Data required to insert a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: HexColor,
    pub slug: Slug,
}
