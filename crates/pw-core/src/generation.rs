//! Generation boundary.
//!
//! The provider is whatever turns an instruction into model output; the
//! core only hands it text and parses what comes back. `GenerationGuard`
//! tracks the Idle → Generating → {Succeeded, Failed} cycle so that at most
//! one request per document is in flight.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::error::{PwError, Result};

/// Turns an instruction into raw model output.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, instruction: &str) -> Result<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
    Succeeded,
    Failed(String),
}

impl GenerationStatus {
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }
}

/// Caller-owned in-flight flag.
///
/// `begin` moves to `Generating` from any other state and rejects a second
/// concurrent request with [`PwError::Busy`]. The returned permit records the
/// outcome on `finish`; a permit dropped unfinished (for example when the
/// awaiting future is cancelled) leaves the guard `Failed`. `reset` (or the
/// next `begin`) leaves the terminal state.
#[derive(Debug, Default)]
pub struct GenerationGuard {
    status: Mutex<GenerationStatus>,
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GenerationStatus {
        self.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().is_generating()
    }

    pub fn begin(&self) -> Result<GenerationPermit<'_>> {
        let mut status = self.lock();
        if status.is_generating() {
            warn!("Rejected generation request while another is in flight");
            return Err(PwError::Busy);
        }
        *status = GenerationStatus::Generating;
        Ok(GenerationPermit {
            guard: self,
            finished: false,
        })
    }

    fn settle(&self, next: GenerationStatus) {
        *self.lock() = next;
    }

    pub fn reset(&self) {
        *self.lock() = GenerationStatus::Idle;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GenerationStatus> {
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Proof that a generation is in flight. Consumed by [`finish`](Self::finish).
#[derive(Debug)]
#[must_use = "dropping the permit marks the generation as cancelled"]
pub struct GenerationPermit<'a> {
    guard: &'a GenerationGuard,
    finished: bool,
}

impl GenerationPermit<'_> {
    pub fn finish<T>(mut self, outcome: &Result<T>) {
        self.finished = true;
        self.guard.settle(match outcome {
            Ok(_) => GenerationStatus::Succeeded,
            Err(e) => GenerationStatus::Failed(e.to_string()),
        });
    }
}

impl Drop for GenerationPermit<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Generation dropped before it finished");
            self.guard
                .settle(GenerationStatus::Failed("Generation cancelled".to_string()));
        }
    }
}
