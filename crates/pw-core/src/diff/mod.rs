//! Diff and selective merge of attribute documents.
//!
//! Comparison and resolution are split so that a caller can present each
//! differing attribute, let the user pick the old value, the new value, or
//! type a replacement, and only then build the final document.
//!
//! # Module Structure
//!
//! - `model`: `ChangeRecord`, `ChangeKind`, `ChangeSummary`
//! - `merge`: `diff` and `resolve`

mod merge;
mod model;

pub use merge::{diff, resolve};
pub use model::{ChangeKind, ChangeRecord, ChangeSummary};
