//! Attribute document module.
//!
//! A persona description is kept as an ordered list of `Key: Value`
//! attributes. This module turns loosely formatted model output into that
//! structure and back again.
//!
//! # Module Structure
//!
//! - `model`: `AttributeDocument` and `Attribute`
//! - `parser`: line scanner and key normalization
//!
//! # Usage
//!
//! ```
//! use pw_core::document::AttributeDocument;
//!
//! let doc = AttributeDocument::parse("Name: Alice\nAge: 20");
//! assert_eq!(doc.get("Age"), Some("20"));
//! assert_eq!(doc.serialize(), "Name: Alice\nAge: 20");
//! ```

mod model;
mod parser;

pub use model::{Attribute, AttributeDocument};
pub use parser::normalize_key;
