//! Infrastructure layer for Persona Weaver: storage backends, persisted
//! DTOs, repositories, paths and configuration loading.

pub mod config_service;
pub mod draft_repository;
pub mod dto;
pub mod history_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::draft_repository::KvDraftRepository;
pub use crate::history_repository::KvHistoryRepository;
pub use crate::paths::PwPaths;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
