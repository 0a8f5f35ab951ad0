//! Draft history domain module.
//!
//! - `model`: `HistoryEntry` and the capacity-bounded `HistoryLog`
//! - `repository`: persistence interface for the log

mod model;
mod repository;

pub use model::{DEFAULT_HISTORY_CAPACITY, HistoryEntry, HistoryLog};
pub use repository::HistoryRepository;
