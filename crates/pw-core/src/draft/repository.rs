//! Draft repository trait.

use crate::draft::model::DraftState;
use crate::error::Result;

/// Repository for the single current-draft slot.
pub trait DraftRepository: Send + Sync {
    /// Overwrites the slot.
    fn save(&self, draft: &DraftState) -> Result<()>;

    /// Reads the slot; unreadable or missing data yields an empty draft.
    fn load(&self) -> DraftState;

    fn clear(&self) -> Result<()>;
}
