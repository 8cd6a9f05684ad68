//! Integration tests for the JSON file record store.

use std::sync::Arc;

use domain::{ContactNumber, EnrollmentRecord, EnrollmentStatus, Reference, ValidatedEnrollment};
use record_store::{JsonFileRecordStore, RecordRepository, RecordStore, RecordStoreError};

fn record(reference: &str, name: &str) -> EnrollmentRecord {
    EnrollmentRecord::pending(
        Reference::new(reference),
        ValidatedEnrollment {
            name: name.to_string(),
            contact: ContactNumber::new("+55 11 99999-9999"),
            course: "EEB".to_string(),
        },
    )
}

#[tokio::test]
async fn test_missing_file_loads_empty_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    let store = JsonFileRecordStore::new(&path);

    let records = store.load().await.unwrap();

    assert!(records.is_empty());
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_repository_initialize_creates_empty_document_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    let repo = RecordRepository::new(JsonFileRecordStore::new(&path));

    repo.initialize().await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");

    repo.append(record("ref-1", "Ana")).await.unwrap();
    repo.initialize().await.unwrap();
    assert_eq!(repo.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_parent_directory_is_created_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("students.json");
    let store = JsonFileRecordStore::new(&path);

    store.load().await.unwrap();
    assert!(!path.exists());

    store.save(&[]).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
}

#[tokio::test]
async fn test_save_then_load_preserves_records_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileRecordStore::new(dir.path().join("students.json"));

    let mut second = record("ref-2", "Bruno");
    second.complete().unwrap();
    let records = vec![record("ref-1", "Ana"), second];
    store.save(&records).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, records);
    assert_eq!(loaded[1].status, EnrollmentStatus::Completed);
}

#[tokio::test]
async fn test_document_layout_is_pretty_printed_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    let store = JsonFileRecordStore::new(&path);

    store.save(&[record("ref-1", "Ana")]).await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("[\n  {"));
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json[0]["reference"], "ref-1");
    assert_eq!(json[0]["whatsapp"], "+55 11 99999-9999");
    assert_eq!(json[0]["status"], "pending");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_loads_documents_written_by_older_deployments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    std::fs::write(
        &path,
        r#"[
  {
    "reference": "1717171717171",
    "name": "Ana",
    "whatsapp": "5511999999999",
    "course": "EEB",
    "status": "pending"
  }
]"#,
    )
    .unwrap();

    let records = JsonFileRecordStore::new(&path).load().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reference.as_str(), "1717171717171");
    assert!(records[0].is_pending());
}

#[tokio::test]
async fn test_corrupt_document_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    std::fs::write(&path, "{not json").unwrap();

    let result = JsonFileRecordStore::new(&path).load().await;

    assert!(matches!(result, Err(RecordStoreError::Serialization(_))));
}

#[tokio::test]
async fn test_repository_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    let repo = RecordRepository::new(JsonFileRecordStore::new(&path));

    repo.append(record("ref-1", "Ana")).await.unwrap();
    repo.append(record("ref-2", "Bruno")).await.unwrap();

    let mut batch = repo.begin().await.unwrap();
    batch
        .find_mut(&Reference::new("ref-1"))
        .unwrap()
        .complete()
        .unwrap();
    batch.commit().await.unwrap();

    let reopened = JsonFileRecordStore::new(&path).load().await.unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened[0].status, EnrollmentStatus::Completed);
    assert_eq!(reopened[1].status, EnrollmentStatus::Pending);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_racing_first_append_on_fresh_file() {
    for trial in 0..100 {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        let repo = Arc::new(RecordRepository::new(JsonFileRecordStore::new(&path)));

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.append(record(&format!("ref-{trial}"), "Ana")).await })
        };
        let reader = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.load().await })
        };

        writer.await.unwrap().unwrap();
        let seen = reader.await.unwrap().unwrap();
        assert!(seen.len() <= 1);

        let stored = JsonFileRecordStore::new(&path).load().await.unwrap();
        assert_eq!(stored.len(), 1, "trial {trial} lost the append");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_on_fresh_file_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    let repo = Arc::new(RecordRepository::new(JsonFileRecordStore::new(&path)));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.load().await?;
                repo.append(record(&format!("ref-{i}"), "Ana")).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = JsonFileRecordStore::new(&path).load().await.unwrap();
    assert_eq!(stored.len(), 20);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
