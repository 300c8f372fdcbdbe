//! Integration tests for the desk against real directories.

use authority_model::{AuthoritySource, Evidence, FixedClock, ModelError, Timestamp};
use investigator_desk::{Desk, DeskConfig, DeskError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn start() -> Timestamp {
    Timestamp::parse("2024-04-01T09:00:00Z").unwrap()
}

fn open(dir: &Path) -> Desk {
    let clock = FixedClock::stepping(start(), chrono::Duration::seconds(1));
    Desk::open_with_clock(DeskConfig::new(dir), clock).unwrap()
}

fn setup() -> (TempDir, Desk) {
    let dir = tempfile::tempdir().unwrap();
    let desk = open(dir.path());
    (dir, desk)
}

/// INV-001 with one source, one cited piece of evidence and one note.
fn populate(desk: &mut Desk) {
    let now = desk.now();
    let inv = desk
        .create_investigation("INV-001", "Charter Review", "Who granted the charter?")
        .unwrap();
    inv.add_authority_source(AuthoritySource::new("AUTH-A", "Alpha", "Founding body", "Governance", now))
        .unwrap();
    inv.add_evidence("AUTH-A", Evidence::new("Doc", "Founding charter", now).with_source("Doc-1"))
        .unwrap();
    inv.add_note("Reviewed", now);
    desk.persist("INV-001").unwrap();
}

#[test]
fn test_create_writes_file() {
    let (dir, mut desk) = setup();

    desk.create_investigation("INV-TEST", "Test Investigation", "Test description")
        .unwrap();

    assert!(dir.path().join("INV-TEST.json").is_file());
    let inv = desk.get_investigation("INV-TEST").unwrap();
    assert_eq!(inv.title, "Test Investigation");
    assert_eq!(inv.created_at, start());
}

#[test]
fn test_duplicate_create_is_rejected() {
    let (_dir, mut desk) = setup();
    populate(&mut desk);

    let err = desk
        .create_investigation("INV-001", "Other", "Should not replace")
        .unwrap_err();

    assert!(matches!(err, DeskError::AlreadyExists(ref id) if id.as_str() == "INV-001"));
    let inv = desk.get_investigation("INV-001").unwrap();
    assert_eq!(inv.title, "Charter Review");
    assert_eq!(inv.source_count(), 1);
    assert_eq!(inv.notes().len(), 1);
}

#[test]
fn test_invalid_id_is_rejected() {
    let (dir, mut desk) = setup();

    let err = desk.create_investigation("../escape", "t", "d").unwrap_err();

    assert!(matches!(err, DeskError::InvalidId(_)));
    assert!(desk.list_investigations().is_empty());
    assert!(!dir.path().join("..").join("escape.json").exists());
}

#[test]
fn test_get_missing_investigation() {
    let (_dir, desk) = setup();
    assert!(desk.get_investigation("NOPE").is_none());
}

#[test]
fn test_list_investigations() {
    let (_dir, mut desk) = setup();

    desk.create_investigation("INV-B", "Second", "").unwrap();
    desk.create_investigation("INV-A", "First", "").unwrap();

    let ids: Vec<&str> = desk
        .list_investigations()
        .iter()
        .map(|inv| inv.investigation_id.as_str())
        .collect();
    assert_eq!(ids, vec!["INV-A", "INV-B"]);
}

#[test]
fn test_reopen_round_trip() {
    let (dir, mut desk) = setup();
    populate(&mut desk);
    desk.update_investigation("INV-001", |inv, clock| {
        inv.add_authority_source(AuthoritySource::new("AUTH-B", "Beta", "Delegate", "Executive", clock.now()))?;
        inv.add_connection("AUTH-A", "AUTH-B")
    })
    .unwrap();
    let original = desk.get_investigation("INV-001").unwrap().clone();

    let reopened = open(dir.path());

    assert!(reopened.load_failures().is_empty());
    let loaded = reopened.get_investigation("INV-001").unwrap();
    assert_eq!(loaded, &original);
    assert!(loaded.source("AUTH-B").unwrap().is_connected_to("AUTH-A"));
    assert_eq!(loaded.source("AUTH-A").unwrap().evidence()[0].source, "Doc-1");
}

#[test]
fn test_changes_need_a_save() {
    let (dir, mut desk) = setup();
    desk.create_investigation("INV-001", "Draft", "").unwrap();

    desk.get_investigation_mut("INV-001").unwrap().set_status("closed");
    assert_eq!(open(dir.path()).get_investigation("INV-001").unwrap().status, "active");

    desk.persist("INV-001").unwrap();
    assert_eq!(open(dir.path()).get_investigation("INV-001").unwrap().status, "closed");
}

#[test]
fn test_persist_unknown_investigation() {
    let (_dir, desk) = setup();

    let err = desk.persist("GHOST").unwrap_err();
    assert!(matches!(err, DeskError::InvestigationNotFound(_)));
}

#[test]
fn test_failed_update_restores_memory_and_skips_write() {
    let (dir, mut desk) = setup();
    populate(&mut desk);
    let before = fs::read_to_string(dir.path().join("INV-001.json")).unwrap();

    let err = desk
        .update_investigation("INV-001", |inv, clock| {
            inv.add_note("Half-done change", clock.now());
            inv.add_evidence("MISSING", Evidence::new("Doc", "Lost", clock.now()))
        })
        .unwrap_err();

    assert!(matches!(err, DeskError::Model(ModelError::SourceNotFound(_))));
    assert_eq!(desk.get_investigation("INV-001").unwrap().notes().len(), 1);
    let after = fs::read_to_string(dir.path().join("INV-001.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_update_unknown_investigation() {
    let (_dir, mut desk) = setup();

    let err = desk.update_investigation("GHOST", |_, _| Ok(())).unwrap_err();
    assert!(matches!(err, DeskError::InvestigationNotFound(_)));
}

#[test]
fn test_report_scenario() {
    let (_dir, mut desk) = setup();
    populate(&mut desk);

    let report = desk.generate_report("INV-001");

    for expected in ["Charter Review", "AUTH-A", "Alpha", "Founding charter", "Doc-1", "Reviewed"] {
        assert!(report.contains(expected), "report is missing {expected:?}:\n{report}");
    }
}

#[test]
fn test_report_for_missing_investigation() {
    let (_dir, desk) = setup();
    assert_eq!(desk.generate_report("INV-404"), "Investigation INV-404 not found");
}

#[test]
fn test_report_uses_configured_width() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DeskConfig::new(dir.path());
    config.report.rule_width = 12;
    let mut desk = Desk::open(config).unwrap();
    desk.create_investigation("INV-W", "Narrow", "").unwrap();

    let report = desk.generate_report("INV-W");
    assert!(report.starts_with(&format!("{}\n", "=".repeat(12))));
}

#[test]
fn test_corrupt_file_is_skipped() {
    let (dir, mut desk) = setup();
    desk.create_investigation("INV-GOOD", "Valid", "").unwrap();
    fs::write(dir.path().join("broken.json"), "{ this is not json").unwrap();

    let reopened = open(dir.path());

    assert_eq!(reopened.list_investigations().len(), 1);
    assert!(reopened.get_investigation("INV-GOOD").is_some());
    let failures = reopened.load_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, dir.path().join("broken.json"));
    assert!(!failures[0].message.is_empty());
}

#[test]
fn test_non_json_entries_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "scratch").unwrap();
    fs::write(dir.path().join(".investigation-abc.tmp"), "{").unwrap();

    let desk = open(dir.path());

    assert!(desk.list_investigations().is_empty());
    assert!(desk.load_failures().is_empty());
}

#[test]
fn test_file_without_required_fields_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("partial.json"), r#"{ "title": "No id" }"#).unwrap();

    let desk = open(dir.path());

    assert!(desk.list_investigations().is_empty());
    assert_eq!(desk.load_failures().len(), 1);
}

#[test]
fn test_loads_legacy_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("INV-OLD.json"),
        r#"{
  "investigation_id": "INV-OLD",
  "title": "Corporate Authority Structure Investigation",
  "description": "Investigating the hierarchical authority structure",
  "created_at": "2024-01-15T10:30:00.000000",
  "status": "active",
  "sources": {
    "AUTH-CEO": {
      "source_id": "AUTH-CEO",
      "name": "Chief Executive Officer",
      "description": "Primary executive authority",
      "authority_type": "Executive",
      "created_at": "2024-01-15T10:30:00.000001",
      "evidence": [
        {
          "type": "Corporate Charter",
          "description": "CEO appointed by Board",
          "source": "Company Charter Section 3.2",
          "timestamp": "2024-01-15T10:31:00.000000"
        }
      ],
      "connections": ["AUTH-BOARD"]
    },
    "AUTH-BOARD": {
      "source_id": "AUTH-BOARD",
      "name": "Board of Directors",
      "description": "Governing body",
      "authority_type": "Governance",
      "created_at": "2024-01-15T10:30:00.000002",
      "evidence": [],
      "connections": ["AUTH-CEO"]
    }
  },
  "notes": [
    { "timestamp": "2024-01-15T10:35:00.000000", "note": "Board identified as apex." }
  ]
}"#,
    )
    .unwrap();

    let desk = open(dir.path());

    let inv = desk.get_investigation("INV-OLD").unwrap();
    assert_eq!(inv.source_count(), 2);
    assert_eq!(inv.evidence_count(), 1);
    assert!(inv.source("AUTH-CEO").unwrap().is_connected_to("AUTH-BOARD"));
    assert_eq!(inv.created_at.to_string(), "2024-01-15T10:30:00.000000Z");
}

#[test]
fn test_save_leaves_no_temporary_files() {
    let (dir, mut desk) = setup();
    populate(&mut desk);
    desk.persist("INV-001").unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["INV-001.json".to_string()]);
}

#[test]
fn test_saved_file_is_pretty_and_versioned() {
    let (dir, mut desk) = setup();
    populate(&mut desk);

    let text = fs::read_to_string(dir.path().join("INV-001.json")).unwrap();

    assert!(text.starts_with("{\n  \""));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["sources"]["AUTH-A"]["evidence"][0]["description"], "Founding charter");
}

#[test]
fn test_wall_clock_timestamps_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = Desk::open(DeskConfig::new(dir.path())).unwrap();
    populate(&mut desk);
    let original = desk.get_investigation("INV-001").unwrap().clone();

    let reopened = Desk::open(DeskConfig::new(dir.path())).unwrap();

    assert_eq!(reopened.get_investigation("INV-001").unwrap(), &original);
}

#[test]
fn test_file_named_after_other_id_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("X.json"),
        r#"{ "investigation_id": "Y", "title": "Misfiled", "description": "" }"#,
    )
    .unwrap();

    let desk = open(dir.path());

    assert!(desk.get_investigation("Y").is_none());
    assert!(desk.list_investigations().is_empty());
    assert_eq!(desk.load_failures().len(), 1);
    assert_eq!(desk.load_failures()[0].path, dir.path().join("X.json"));
}

#[test]
fn test_failed_save_restores_memory() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("cases");
    let mut desk = open(&data_dir);
    populate(&mut desk);
    fs::remove_dir_all(&data_dir).unwrap();

    let err = desk
        .update_investigation("INV-001", |inv, clock| {
            inv.add_note("Never written", clock.now());
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(err, DeskError::Io(_)));
    let inv = desk.get_investigation("INV-001").unwrap();
    assert_eq!(inv.notes().len(), 1);
    assert_eq!(inv.notes()[0].note, "Reviewed");
}
