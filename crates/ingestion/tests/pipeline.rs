//! End-to-end pipeline tests over in-memory stores.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use ingestion::{IngestionPipeline, PipelineConfig, UploadBatch, UploadFile};
use storage::{BlobStorage, MemoryRecordStore};
use test_utils::{csv_bytes, sample_usage_file, FailingRecordStore};
use usage_common::{Alert, AlertKind, UsageError};

fn pipeline(records: Arc<MemoryRecordStore>) -> (IngestionPipeline, Arc<BlobStorage>) {
    let blobs = Arc::new(BlobStorage::in_memory());
    let pipeline = IngestionPipeline::new(blobs.clone(), records, PipelineConfig::default());
    (pipeline, blobs)
}

#[tokio::test]
async fn test_single_file_with_one_exceeding_row() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, blobs) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![sample_usage_file("data.csv")],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();

    // One threshold alert mentioning the exceeding row.
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].kind(), AlertKind::Threshold);
    let rendered = report.alerts[0].to_string();
    assert!(rendered.contains("40"));
    assert!(rendered.contains("2024-01-02"));

    // One structured entry with all four fields.
    assert_eq!(report.exceeded_thresholds.len(), 1);
    let entry = &report.exceeded_thresholds[0];
    assert_eq!(entry.date, "2024-01-02");
    assert_eq!(entry.usage, 40.0);
    assert_eq!(entry.threshold, 30.0);
    assert_eq!(entry.filename, "data.csv");

    // Both rows persisted, raw bytes stored.
    assert_eq!(records.len(), 2);
    assert_eq!(
        records.get("demo-user", "2024-01-01"),
        Some(Decimal::from_str("25").unwrap())
    );
    assert!(blobs.get("data.csv").await.is_ok());

    assert_eq!(report.user_id, "demo-user");
}

#[tokio::test]
async fn test_equal_to_threshold_does_not_alert() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, _) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![UploadFile::new(
            "data.csv",
            csv_bytes(&["Date,Usage", "2024-01-01,30"]),
        )],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();
    assert!(report.alerts.is_empty());
    assert!(report.exceeded_thresholds.is_empty());
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_empty_file_is_skipped_without_blob_write() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, blobs) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![UploadFile::new("empty.csv", Vec::<u8>::new())],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();
    assert_eq!(report.alerts, vec![Alert::EmptyFile {
        filename: "empty.csv".to_string()
    }]);
    assert!(records.is_empty());
    // Skipped files never reach the blob store.
    assert!(blobs.get("empty.csv").await.is_err());
}

#[tokio::test]
async fn test_unsupported_extension_is_skipped() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, _) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![UploadFile::new("report.pdf", csv_bytes(&["Date,Usage"]))],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();
    assert_eq!(report.alerts, vec![Alert::UnsupportedExtension {
        filename: "report.pdf".to_string()
    }]);
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_bad_header_aborts_batch_before_persisting() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, _) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![UploadFile::new(
            "swapped.csv",
            csv_bytes(&["Usage,Date", "25,2024-01-01"]),
        )],
        threshold: 30.0,
    };

    let err = pipeline.run(&batch).await.unwrap_err();
    assert_eq!(err.http_status_code(), 400);
    match err {
        UsageError::SchemaMismatch { filename, expected } => {
            assert_eq!(filename, "swapped.csv");
            assert_eq!(expected, vec!["Date", "Usage"]);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_bad_header_in_second_file_discards_first_files_alerts() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, _) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![
            sample_usage_file("good.csv"),
            UploadFile::new("bad.csv", csv_bytes(&["Usage,Date"])),
        ],
        threshold: 30.0,
    };

    // The whole batch fails; no partial report.
    let err = pipeline.run(&batch).await.unwrap_err();
    assert!(matches!(err, UsageError::SchemaMismatch { .. }));
    // Rows from the earlier valid file were already persisted; only the
    // report is withheld.
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_invalid_rows_are_isolated() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, _) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![UploadFile::new(
            "data.csv",
            csv_bytes(&[
                "Date,Usage",
                "2024-01-01,abc",
                "2024-01-02",
                "2024-01-03,50",
            ]),
        )],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();

    // Two invalid-row alerts, then one threshold alert for the good row.
    assert_eq!(report.alerts.len(), 3);
    assert!(matches!(&report.alerts[0], Alert::InvalidRow { row, .. } if row[1] == "abc"));
    assert!(matches!(&report.alerts[1], Alert::InvalidRow { row, .. } if row.len() == 1));
    assert_eq!(report.alerts[2].kind(), AlertKind::Threshold);

    // Only the good row was persisted and counted.
    assert_eq!(records.len(), 1);
    assert_eq!(report.exceeded_thresholds.len(), 1);
    assert_eq!(report.exceeded_thresholds[0].date, "2024-01-03");
}

#[tokio::test]
async fn test_header_only_file_reports_no_data_rows() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, blobs) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![UploadFile::new("data.txt", csv_bytes(&["Date,Usage"]))],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();
    assert_eq!(report.alerts, vec![Alert::NoDataRows {
        filename: "data.txt".to_string()
    }]);
    // The raw file is still uploaded even when it has no data rows.
    assert!(blobs.get("data.txt").await.is_ok());
}

#[tokio::test]
async fn test_store_failure_becomes_alert_and_threshold_still_runs() {
    let blobs = Arc::new(BlobStorage::in_memory());
    let pipeline = IngestionPipeline::new(
        blobs,
        Arc::new(FailingRecordStore),
        PipelineConfig::default(),
    );

    let batch = UploadBatch {
        files: vec![sample_usage_file("data.csv")],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();

    // One store-failure alert per row, plus the threshold alert for the
    // second row: the threshold check does not depend on the write.
    assert_eq!(report.alerts.len(), 3);
    assert!(matches!(&report.alerts[0], Alert::StoreFailure { date, .. } if date == "2024-01-01"));
    assert!(matches!(&report.alerts[1], Alert::StoreFailure { date, .. } if date == "2024-01-02"));
    assert_eq!(report.alerts[2].kind(), AlertKind::Threshold);
    assert_eq!(report.exceeded_thresholds.len(), 1);
}

#[tokio::test]
async fn test_multi_file_ordering() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, _) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![
            UploadFile::new("empty.csv", Vec::<u8>::new()),
            UploadFile::new("a.csv", csv_bytes(&["Date,Usage", "2024-01-01,100"])),
            UploadFile::new("b.csv", csv_bytes(&["Date,Usage", "2024-01-02,200"])),
        ],
        threshold: 30.0,
    };

    let report = pipeline.run(&batch).await.unwrap();

    // Alerts in file arrival order: skip, then a.csv's, then b.csv's.
    assert_eq!(report.alerts.len(), 3);
    assert!(matches!(&report.alerts[0], Alert::EmptyFile { .. }));
    assert!(report.alerts[1].to_string().contains("a.csv"));
    assert!(report.alerts[2].to_string().contains("b.csv"));

    let dates: Vec<&str> = report
        .exceeded_thresholds
        .iter()
        .map(|e| e.date.as_str())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
}

#[tokio::test]
async fn test_duplicate_date_overwrites_not_duplicates() {
    let records = Arc::new(MemoryRecordStore::new());
    let (pipeline, _) = pipeline(records.clone());

    let batch = UploadBatch {
        files: vec![UploadFile::new(
            "data.csv",
            csv_bytes(&["Date,Usage", "2024-01-01,10", "2024-01-01,20"]),
        )],
        threshold: 30.0,
    };

    pipeline.run(&batch).await.unwrap();

    // Last write wins for a repeated (user, date) key.
    assert_eq!(records.len(), 1);
    assert_eq!(
        records.get("demo-user", "2024-01-01"),
        Some(Decimal::from_str("20").unwrap())
    );
}
