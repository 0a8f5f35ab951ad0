//! History repository trait.

use super::model::HistoryLog;
use crate::error::Result;

/// Persistence for the history log.
///
/// Implementations must treat unreadable persisted data as an empty log
/// rather than failing `load`.
pub trait HistoryRepository: Send + Sync {
    /// Loads the log, bounded to the repository's configured capacity.
    fn load(&self) -> HistoryLog;

    /// Replaces the persisted log.
    fn save(&self, log: &HistoryLog) -> Result<()>;

    /// Loads, changes and saves the log without letting another writer in
    /// between. Returns the log as saved; nothing is saved if `change` fails.
    fn update(&self, change: &mut dyn FnMut(&mut HistoryLog) -> Result<()>) -> Result<HistoryLog>;
}
