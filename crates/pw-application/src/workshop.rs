//! Persona Workshop
//!
//! Coordinates one editing surface: builds instructions from templates,
//! calls the generation provider, proposes a change-set against the current
//! draft, and commits the user's resolution into the draft slot and the
//! history log.
//!
//! Generation and refinement never persist anything by themselves. A failed
//! provider call therefore cannot corrupt the draft or the history; only
//! [`PersonaWorkshop::commit`] writes.

use std::collections::HashMap;
use std::sync::Arc;

use pw_core::config::WeaverConfig;
use pw_core::diff::{ChangeRecord, ChangeSummary, diff, resolve};
use pw_core::document::AttributeDocument;
use pw_core::draft::{DraftRepository, DraftState};
use pw_core::error::{PwError, Result};
use pw_core::generation::{GenerationGuard, GenerationProvider, GenerationStatus};
use pw_core::history::{HistoryEntry, HistoryLog, HistoryRepository};
use pw_core::lorebook::{LorebookEntry, LorebookSink};
use pw_core::storage::KeyValueStore;
use pw_core::template::{PromptKind, PromptVariables};
use pw_infrastructure::{KvDraftRepository, KvHistoryRepository};
use serde::Serialize;
use tracing::{error, info};

/// The outcome of one generate/refine round, awaiting the user's decision.
#[derive(Debug, Clone, Serialize)]
pub struct RevisionProposal {
    pub kind: PromptKind,
    /// The user's request for this round.
    pub request: String,
    /// The full instruction sent to the provider.
    pub instruction: String,
    /// Unparsed provider output.
    pub raw_output: String,
    pub previous: AttributeDocument,
    pub proposed: AttributeDocument,
    /// Per-attribute choices; callers adjust selections and overrides here
    /// before committing.
    pub changes: Vec<ChangeRecord>,
}

impl RevisionProposal {
    pub fn summary(&self) -> ChangeSummary {
        ChangeSummary::from_records(&self.changes)
    }
}

/// Use case object for building a persona through repeated AI edits.
pub struct PersonaWorkshop {
    provider: Arc<dyn GenerationProvider>,
    history: Arc<dyn HistoryRepository>,
    drafts: Arc<dyn DraftRepository>,
    config: WeaverConfig,
    guard: GenerationGuard,
}

impl PersonaWorkshop {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        history: Arc<dyn HistoryRepository>,
        drafts: Arc<dyn DraftRepository>,
        config: WeaverConfig,
    ) -> Self {
        Self {
            provider,
            history,
            drafts,
            config,
            guard: GenerationGuard::new(),
        }
    }

    /// Wires key-value backed repositories under the configured keys.
    pub fn with_store(
        provider: Arc<dyn GenerationProvider>,
        store: Arc<dyn KeyValueStore>,
        config: WeaverConfig,
    ) -> Self {
        let history = Arc::new(KvHistoryRepository::new(
            store.clone(),
            config.history.key.clone(),
            config.history.capacity,
        ));
        let drafts = Arc::new(KvDraftRepository::new(store, config.draft.key.clone()));
        Self::new(provider, history, drafts, config)
    }

    pub fn config(&self) -> &WeaverConfig {
        &self.config
    }

    pub fn status(&self) -> GenerationStatus {
        self.guard.status()
    }

    /// Renders the configured template for `kind`.
    pub fn build_instruction(&self, kind: PromptKind, vars: &PromptVariables) -> String {
        vars.render(self.config.template_for(kind))
    }

    // ============================================================================
    // Generation
    // ============================================================================

    /// Writes a persona from scratch. Every proposed attribute shows up as an
    /// addition.
    pub async fn generate(&self, vars: PromptVariables) -> Result<RevisionProposal> {
        self.run(PromptKind::Generate, vars, AttributeDocument::new())
            .await
    }

    /// Revises the current document. When `vars.current` is empty it is
    /// filled from the saved draft.
    pub async fn refine(&self, mut vars: PromptVariables) -> Result<RevisionProposal> {
        let previous = if vars.current.trim().is_empty() {
            let previous = self.drafts.load().document();
            vars.current = previous.serialize();
            previous
        } else {
            AttributeDocument::parse(&vars.current)
        };
        self.run(PromptKind::Refine, vars, previous).await
    }

    async fn run(
        &self,
        kind: PromptKind,
        vars: PromptVariables,
        previous: AttributeDocument,
    ) -> Result<RevisionProposal> {
        let permit = self.guard.begin()?;
        let instruction = self.build_instruction(kind, &vars);

        let outcome = self.provider.generate(&instruction).await;
        permit.finish(&outcome);
        let raw_output = outcome.inspect_err(|e| {
            error!(kind = %kind, error = %e, "Generation provider failed");
        })?;

        let proposed = AttributeDocument::parse(&raw_output);
        let changes = diff(&previous, &proposed);
        info!(
            kind = %kind,
            proposed = proposed.len(),
            changes = changes.len(),
            "Received revision proposal"
        );

        Ok(RevisionProposal {
            kind,
            request: vars.request,
            instruction,
            raw_output,
            previous,
            proposed,
            changes,
        })
    }

    // ============================================================================
    // Commit / draft
    // ============================================================================

    /// Resolves the proposal, saves the result as the current draft, and
    /// appends a history snapshot. Returns the final document.
    pub fn commit(
        &self,
        proposal: &RevisionProposal,
        overrides: &HashMap<String, String>,
        title: Option<&str>,
    ) -> Result<AttributeDocument> {
        let resolved = resolve(&proposal.changes, overrides);
        let text = resolved.serialize();

        self.drafts
            .save(&DraftState::new(text.clone(), proposal.request.clone()))?;

        let entry = HistoryEntry::new(
            title.unwrap_or_default(),
            text,
            Some(proposal.request.clone()),
        );
        let mut evicted = 0;
        let log = self.history.update(&mut |log| {
            evicted = log.append(entry.clone());
            Ok(())
        })?;
        self.guard.reset();

        info!(
            attributes = resolved.len(),
            history = log.len(),
            evicted,
            "Committed revision"
        );
        Ok(resolved)
    }

    pub fn save_draft(&self, text: &str, instruction: &str) -> Result<DraftState> {
        let draft = DraftState::new(text, instruction);
        self.drafts.save(&draft)?;
        Ok(draft)
    }

    pub fn load_draft(&self) -> DraftState {
        self.drafts.load()
    }

    pub fn clear_draft(&self) -> Result<()> {
        self.drafts.clear()
    }

    // ============================================================================
    // History
    // ============================================================================

    pub fn history(&self) -> HistoryLog {
        self.history.load()
    }

    /// Saves the current draft into history.
    pub fn snapshot(&self, title: Option<&str>) -> Result<HistoryEntry> {
        let draft = self.drafts.load();
        if draft.text.trim().is_empty() {
            return Err(PwError::not_found("draft", "current"));
        }

        let entry = HistoryEntry::new(
            title.unwrap_or_default(),
            draft.text,
            Some(draft.instruction),
        );
        self.history.update(&mut |log| {
            log.append(entry.clone());
            Ok(())
        })?;
        info!(title = %entry.title, "Saved draft snapshot");
        Ok(entry)
    }

    /// Loads a history entry back into the draft slot.
    pub fn restore(&self, index: usize) -> Result<DraftState> {
        let log = self.history.load();
        let entry = log
            .get(index)
            .ok_or_else(|| PwError::invalid_index(index, log.len()))?;

        let draft = DraftState::new(
            entry.text.clone(),
            entry.instruction.clone().unwrap_or_default(),
        );
        self.drafts.save(&draft)?;
        Ok(draft)
    }

    pub fn search_history(&self, query: &str) -> Vec<HistoryEntry> {
        self.history
            .load()
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn rename_history(&self, index: usize, title: &str) -> Result<()> {
        self.history
            .update(&mut |log| log.update_title(index, title))
            .map(|_| ())
    }

    pub fn remove_history(&self, index: usize) -> Result<HistoryEntry> {
        let mut removed = None;
        self.history.update(&mut |log| {
            removed = Some(log.remove_at(index)?);
            Ok(())
        })?;
        removed.ok_or_else(|| PwError::internal("history update removed nothing"))
    }

    pub fn clear_history(&self) -> Result<()> {
        self.history
            .update(&mut |log| {
                log.clear();
                Ok(())
            })
            .map(|_| ())
    }

    // ============================================================================
    // Lorebook
    // ============================================================================

    /// Upserts the normalized current draft under
    /// `"<entry_prefix><display_name>"`.
    pub async fn sync_lorebook(
        &self,
        sink: &dyn LorebookSink,
        display_name: &str,
    ) -> Result<LorebookEntry> {
        let document = self.drafts.load().document();
        if document.is_empty() {
            return Err(PwError::not_found("draft", "current"));
        }

        let entry = LorebookEntry::new(
            &self.config.lorebook.entry_prefix,
            display_name,
            document.serialize(),
        );
        sink.upsert(&entry).await?;
        info!(identifier = %entry.identifier, "Synced persona to lorebook");
        Ok(entry)
    }
}
