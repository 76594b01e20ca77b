//! Value objects - immutable types that represent domain concepts

mod hex_color;
mod id;
mod slug;

pub use hex_color::{HexColor, HexColorError};
pub use id::{Id, IdParseError};
pub use slug::{Slug, SlugError};
