//! Current-draft domain module.

pub mod model;
pub mod repository;

pub use model::DraftState;
pub use repository::DraftRepository;
