use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pw_application::PersonaWorkshop;
use pw_core::config::WeaverConfig;
use pw_core::diff::ChangeKind;
use pw_core::document::AttributeDocument;
use pw_core::error::{PwError, Result};
use pw_core::generation::{GenerationProvider, GenerationStatus};
use pw_core::lorebook::{LorebookEntry, LorebookSink};
use pw_core::storage::KeyValueStore;
use pw_core::template::PromptVariables;
use pw_infrastructure::{FileKeyValueStore, MemoryKeyValueStore};
use tempfile::TempDir;

/// Replies with queued responses and records every instruction it receives.
#[derive(Default)]
struct ScriptedProvider {
    replies: Mutex<Vec<Result<String>>>,
    instructions: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<String>>) -> Self {
        let mut replies = replies;
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            instructions: Mutex::new(Vec::new()),
        }
    }

    fn instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate(&self, instruction: &str) -> Result<String> {
        self.instructions
            .lock()
            .unwrap()
            .push(instruction.to_string());
        tokio::task::yield_now().await;
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(PwError::generation("no scripted reply")))
    }
}

/// Hangs on the first call, answers immediately afterwards.
#[derive(Default)]
struct StallOnceProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationProvider for StallOnceProvider {
    async fn generate(&self, _instruction: &str) -> Result<String> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        Ok("Name: B".to_string())
    }
}

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<LorebookEntry>>,
}

#[async_trait]
impl LorebookSink for RecordingSink {
    async fn upsert(&self, entry: &LorebookEntry) -> Result<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

fn workshop(
    provider: Arc<ScriptedProvider>,
    store: Arc<dyn KeyValueStore>,
) -> PersonaWorkshop {
    PersonaWorkshop::with_store(provider, store, WeaverConfig::default())
}

fn vars(request: &str) -> PromptVariables {
    PromptVariables {
        user_name: "Alice".to_string(),
        char_name: "Bob".to_string(),
        request: request.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_generate_then_refine_with_override() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Ok("Here you go!\nName: Alice\nAge: 20".to_string()),
        Ok("Name: Alice\nAge: 21\nJob: Librarian".to_string()),
    ]));
    let workshop = workshop(provider.clone(), Arc::new(MemoryKeyValueStore::new()));

    let first = workshop.generate(vars("a young woman")).await.unwrap();
    assert!(first.changes.iter().all(|c| c.kind() == ChangeKind::Added));
    let committed = workshop
        .commit(&first, &HashMap::new(), Some("initial"))
        .unwrap();
    assert_eq!(committed.serialize(), "Name: Alice\nAge: 20");

    let second = workshop.refine(vars("make her a librarian")).await.unwrap();
    assert_eq!(second.previous, committed);
    let age = second.changes.iter().find(|c| c.key == "Age").unwrap();
    assert_eq!(age.kind(), ChangeKind::Modified);
    assert_eq!(age.selected, "21");

    // The refine instruction carries the current draft.
    assert!(provider.instructions()[1].contains("Name: Alice\nAge: 20"));

    let overrides = HashMap::from([("Age".to_string(), "20".to_string())]);
    let merged = workshop.commit(&second, &overrides, None).unwrap();
    assert_eq!(merged, AttributeDocument::parse("Name: Alice\nAge: 20\nJob: Librarian"));

    let draft = workshop.load_draft();
    assert_eq!(draft.text, "Name: Alice\nAge: 20\nJob: Librarian");
    assert_eq!(draft.instruction, "make her a librarian");

    let history = workshop.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(1).unwrap().title, "initial");
    assert_eq!(
        history.get(0).unwrap().instruction.as_deref(),
        Some("make her a librarian")
    );
}

#[tokio::test]
async fn test_failed_generation_leaves_state_untouched() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(PwError::generation(
        "upstream 500",
    ))]));
    let workshop = workshop(provider, Arc::new(MemoryKeyValueStore::new()));
    workshop.save_draft("Name: Alice", "keep me").unwrap();

    let err = workshop.refine(vars("anything")).await.unwrap_err();
    assert!(err.is_generation());
    assert!(matches!(workshop.status(), GenerationStatus::Failed(_)));

    let draft = workshop.load_draft();
    assert_eq!(draft.text, "Name: Alice");
    assert_eq!(draft.instruction, "keep me");
    assert!(workshop.history().is_empty());
}

#[tokio::test]
async fn test_concurrent_request_is_rejected() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Ok("Name: A".to_string()),
        Ok("Name: B".to_string()),
    ]));
    let workshop = workshop(provider.clone(), Arc::new(MemoryKeyValueStore::new()));

    let (first, second) = tokio::join!(workshop.generate(vars("a")), workshop.generate(vars("b")));
    assert!(first.is_ok());
    assert!(second.unwrap_err().is_busy());
    assert_eq!(provider.instructions().len(), 1);
    assert_eq!(workshop.status(), GenerationStatus::Succeeded);
}

#[tokio::test]
async fn test_cancelled_generation_releases_workshop() {
    let workshop = PersonaWorkshop::with_store(
        Arc::new(StallOnceProvider::default()),
        Arc::new(MemoryKeyValueStore::new()),
        WeaverConfig::default(),
    );

    let timed_out =
        tokio::time::timeout(Duration::from_millis(10), workshop.generate(vars("a"))).await;
    assert!(timed_out.is_err());
    assert!(matches!(workshop.status(), GenerationStatus::Failed(_)));

    let proposal = workshop.generate(vars("b")).await.unwrap();
    assert_eq!(proposal.proposed.serialize(), "Name: B");
    assert_eq!(workshop.status(), GenerationStatus::Succeeded);
}

#[tokio::test]
async fn test_snapshot_restore_and_history_management() {
    let provider = Arc::new(ScriptedProvider::new(Vec::new()));
    let workshop = workshop(provider, Arc::new(MemoryKeyValueStore::new()));

    assert!(workshop.snapshot(None).unwrap_err().is_not_found());

    workshop.save_draft("Name: Knight", "v1").unwrap();
    workshop.snapshot(Some("Knight")).unwrap();
    workshop.save_draft("Name: Mage", "v2").unwrap();
    workshop.snapshot(Some("Mage")).unwrap();

    let hits = workshop.search_history("knight");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Knight");

    let restored = workshop.restore(1).unwrap();
    assert_eq!(restored.text, "Name: Knight");
    assert_eq!(workshop.load_draft().instruction, "v1");

    workshop.rename_history(0, "Archmage").unwrap();
    assert_eq!(workshop.history().get(0).unwrap().title, "Archmage");

    let removed = workshop.remove_history(1).unwrap();
    assert_eq!(removed.title, "Knight");
    assert!(workshop.restore(5).is_err());

    workshop.clear_history().unwrap();
    assert!(workshop.history().is_empty());

    workshop.clear_draft().unwrap();
    assert!(workshop.load_draft().is_empty());
}

#[tokio::test]
async fn test_history_capacity_from_config() {
    let provider = Arc::new(ScriptedProvider::new(Vec::new()));
    let mut config = WeaverConfig::default();
    config.history.capacity = 3;
    let workshop =
        PersonaWorkshop::with_store(provider, Arc::new(MemoryKeyValueStore::new()), config);

    for i in 0..5 {
        workshop.save_draft(&format!("Name: v{i}"), "").unwrap();
        workshop.snapshot(Some(&format!("v{i}"))).unwrap();
    }

    let titles: Vec<String> = workshop.history().iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, vec!["v4", "v3", "v2"]);
}

#[tokio::test]
async fn test_sync_lorebook_uses_normalized_draft() {
    let provider = Arc::new(ScriptedProvider::new(Vec::new()));
    let workshop = workshop(provider, Arc::new(MemoryKeyValueStore::new()));
    let sink = RecordingSink::default();

    assert!(workshop.sync_lorebook(&sink, "Alice").await.is_err());

    workshop
        .save_draft("notes\n**Name**: Alice\nAge: 20\n```", "")
        .unwrap();
    let entry = workshop.sync_lorebook(&sink, "Alice").await.unwrap();
    assert_eq!(entry.identifier, "User: Alice");
    assert_eq!(entry.content, "Name: Alice\nAge: 20");
    assert_eq!(sink.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_state_survives_reopen_with_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![Ok("Name: Alice".to_string())]));

    {
        let store = Arc::new(FileKeyValueStore::new(temp_dir.path()));
        let workshop = workshop(provider.clone(), store);
        let proposal = workshop.generate(vars("x")).await.unwrap();
        workshop.commit(&proposal, &HashMap::new(), Some("saved")).unwrap();
    }

    let store = Arc::new(FileKeyValueStore::new(temp_dir.path()));
    let reopened = workshop(provider, store);
    assert_eq!(reopened.load_draft().text, "Name: Alice");
    assert_eq!(reopened.history().get(0).unwrap().title, "saved");
}
