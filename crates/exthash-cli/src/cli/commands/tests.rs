//! Command handler tests: confirmation, id resolution, and registry effects.

use super::record::ID_PROMPT;
use super::run_record;
use super::verify::{confirm_and_record, UPDATE_PROMPT};
use anyhow::Result;
use exthash_core::config::ExtHashConfig;
use exthash_core::context::RunContext;
use exthash_core::manifest::ManifestInfo;
use exthash_core::pipeline::Verification;
use exthash_core::prompt::Prompter;
use exthash_core::registry::CATEGORY_PROMPT;
use exthash_core::release::{AssetInfo, AssetSelection};
use exthash_core::Error;
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

const REPO: &str = "einord/stina-ext-demo";
const SHA: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
const REGISTRY: &str = r#"{
  "extensions": [
    {
      "id": "demo",
      "repository": "https://github.com/einord/stina-ext-demo",
      "verifiedVersions": []
    }
  ],
  "lastUpdated": "2024-01-01T00:00:00Z"
}
"#;

/// Fixed confirmation answer plus queued text answers; records every question.
struct Scripted {
    confirm: bool,
    answers: RefCell<Vec<String>>,
    asked: RefCell<Vec<String>>,
}

impl Scripted {
    fn new(confirm: bool, answers: &[&str]) -> Self {
        Self {
            confirm,
            answers: RefCell::new(answers.iter().rev().map(|s| s.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for Scripted {
    fn confirm(&self, question: &str) -> Result<bool> {
        self.asked.borrow_mut().push(question.to_string());
        Ok(self.confirm)
    }

    fn input(&self, question: &str) -> Result<String> {
        self.asked.borrow_mut().push(question.to_string());
        Ok(self.answers.borrow_mut().pop().unwrap_or_default())
    }
}

fn verification(manifest_id: Option<&str>) -> Verification {
    let asset = AssetInfo::from_url(
        "https://github.com/einord/stina-ext-demo/releases/download/v1.2.0/demo-1.2.0.zip",
    );
    Verification {
        tag_name: "v1.2.0".to_string(),
        selection: AssetSelection {
            asset,
            matching: 1,
            candidates: Vec::new(),
        },
        sha256: SHA.to_string(),
        size: 42,
        manifest: manifest_id.map(|id| ManifestInfo {
            id: Some(id.to_string()),
            name: Some("Demo".to_string()),
            version: Some("1.2.0".to_string()),
        }),
        registry_version: "1.2.0".to_string(),
        verified_at: "2024-02-02".to_string(),
    }
}

fn context_with_registry(dir: &Path) -> (RunContext, PathBuf) {
    let path = dir.join("registry.json");
    fs::write(&path, REGISTRY).unwrap();
    let ctx = RunContext::new(ExtHashConfig::default(), Some(path.clone())).unwrap();
    (ctx, path)
}

fn saved(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn declined_confirmation_leaves_registry_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, path) = context_with_registry(dir.path());
    let prompter = Scripted::new(false, &["ignored"]);

    confirm_and_record(&ctx, REPO, &verification(Some("demo")), &prompter).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), REGISTRY);
    assert_eq!(prompter.asked(), vec![UPDATE_PROMPT.to_string()]);
}

#[test]
fn confirmed_with_manifest_id_records_without_asking_for_id() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, path) = context_with_registry(dir.path());
    let prompter = Scripted::new(true, &[]);

    confirm_and_record(&ctx, REPO, &verification(Some("demo")), &prompter).unwrap();

    assert_eq!(prompter.asked(), vec![UPDATE_PROMPT.to_string()]);
    let doc = saved(&path);
    let versions = doc["extensions"][0]["verifiedVersions"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["version"], "1.2.0");
    assert_eq!(versions[0]["sha256"], SHA);
    assert_eq!(versions[0]["verifiedAt"], "2024-02-02");
    assert_ne!(doc["lastUpdated"], "2024-01-01T00:00:00Z");
}

#[test]
fn missing_manifest_id_is_asked_for() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, path) = context_with_registry(dir.path());
    let prompter = Scripted::new(true, &["demo"]);

    run_record(&ctx, "einord/renamed-repo", &verification(None), &prompter).unwrap();

    assert_eq!(prompter.asked(), vec![ID_PROMPT.to_string()]);
    let doc = saved(&path);
    assert_eq!(doc["extensions"].as_array().unwrap().len(), 1);
    assert_eq!(doc["extensions"][0]["verifiedVersions"][0]["sha256"], SHA);
}

#[test]
fn empty_id_still_updates_entry_matched_by_repository() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, path) = context_with_registry(dir.path());
    let prompter = Scripted::new(true, &[""]);

    run_record(&ctx, REPO, &verification(None), &prompter).unwrap();

    let doc = saved(&path);
    assert_eq!(doc["extensions"][0]["id"], "demo");
    assert_eq!(doc["extensions"][0]["verifiedVersions"][0]["version"], "1.2.0");
}

#[test]
fn empty_id_without_match_is_missing_id_and_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, path) = context_with_registry(dir.path());
    let prompter = Scripted::new(true, &[""]);

    let err = run_record(&ctx, "einord/stina-ext-other", &verification(None), &prompter)
        .unwrap_err();

    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MissingId)));
    assert_eq!(fs::read_to_string(&path).unwrap(), REGISTRY);
    assert!(!prompter.asked().contains(&CATEGORY_PROMPT.to_string()));
}

#[test]
fn new_extension_gets_entry_with_prompted_categories() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, path) = context_with_registry(dir.path());
    let prompter = Scripted::new(true, &["tool"]);

    confirm_and_record(&ctx, "einord/stina-ext-new", &verification(Some("new-ext")), &prompter)
        .unwrap();

    assert_eq!(
        prompter.asked(),
        vec![UPDATE_PROMPT.to_string(), CATEGORY_PROMPT.to_string()]
    );
    let doc = saved(&path);
    let entries = doc["extensions"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    let created = &entries[1];
    assert_eq!(created["id"], "new-ext");
    assert_eq!(created["repository"], "https://github.com/einord/stina-ext-new");
    assert_eq!(created["categories"], serde_json::json!(["tool"]));
    assert_eq!(created["verifiedVersions"][0]["sha256"], SHA);
}
