use chrono::NaiveDate;
use clap::Parser;

use toolbox_cli::cli::ReadingsCommand;
use toolbox_cli::commands::readings::execute;
use toolbox_cli::{run, Cli, CommandError};
use toolbox_data::storage::InMemoryStorage;
use toolbox_domain::entities::Severity;
use toolbox_domain::errors::ReadingsError;
use toolbox_domain::services::{ReadingsStore, TransferFormat};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn readings_command(args: &[&str]) -> ReadingsCommand {
    let cli = Cli::try_parse_from(["toolbox", "readings"].iter().chain(args)).unwrap();
    match cli.command {
        toolbox_cli::cli::Command::Readings(command) => command,
        other => panic!("not a readings command: {other:?}"),
    }
}

fn store_with_three_days() -> ReadingsStore<InMemoryStorage> {
    let mut store = ReadingsStore::open(InMemoryStorage::new());
    store
        .import_from(
            "date,systolic,diastolic\n\
             2025-06-13T10:00:00,128,84\n\
             2025-06-11T10:00:00,120,80\n\
             2025-06-13T08:00:00,118,76\n\
             2025-05-01T08:00:00,150,95\n",
            TransferFormat::Csv,
        )
        .unwrap();
    store
}

#[tokio::test]
async fn test_add_then_list_day() {
    let mut store = ReadingsStore::open(InMemoryStorage::new());
    let today = day(2025, 6, 20);

    let outcome = execute(
        &readings_command(&["add", "-s", "135", "-d", "85"]),
        &mut store,
        today,
    )
    .await
    .unwrap();
    assert_eq!(
        outcome.notice.unwrap().to_string(),
        "Success!: Your blood pressure reading has been saved."
    );

    let listed = execute(
        &readings_command(&["list", "--day", "2025-06-20"]),
        &mut store,
        today,
    )
    .await
    .unwrap();
    assert_eq!(listed.lines.len(), 1);
    assert!(listed.lines[0].contains("135/85"));
}

#[tokio::test]
async fn test_add_out_of_range_is_rejected() {
    let mut store = ReadingsStore::open(InMemoryStorage::new());

    let err = execute(
        &readings_command(&["add", "-s", "310", "-d", "85"]),
        &mut store,
        day(2025, 6, 20),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CommandError::Readings(ReadingsError::Validation(_))));
    assert_eq!(err.notice().severity, Severity::Error);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_list_day_without_readings() {
    let mut store = store_with_three_days();

    let outcome = execute(
        &readings_command(&["list", "--day", "2025-06-12"]),
        &mut store,
        day(2025, 6, 20),
    )
    .await
    .unwrap();

    assert_eq!(outcome.lines, vec!["No readings recorded for Jun 12, 2025."]);
}

#[tokio::test]
async fn test_day_table_is_chronological() {
    let mut store = store_with_three_days();

    let outcome = execute(
        &readings_command(&["list", "--day", "2025-06-13"]),
        &mut store,
        day(2025, 6, 20),
    )
    .await
    .unwrap();

    assert_eq!(outcome.lines.len(), 2);
    assert!(outcome.lines[0].contains("118/76"));
    assert!(outcome.lines[1].contains("128/84"));
}

#[tokio::test]
async fn test_chart_respects_preset_range() {
    let mut store = store_with_three_days();

    let outcome = execute(
        &readings_command(&["chart", "--range", "last-7-days", "--json"]),
        &mut store,
        day(2025, 6, 16),
    )
    .await
    .unwrap();

    let points: serde_json::Value = serde_json::from_str(&outcome.lines[0]).unwrap();
    let systolic: Vec<u64> = points
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["systolic"].as_u64().unwrap())
        .collect();
    assert_eq!(systolic, vec![120, 118, 128]);
}

#[tokio::test]
async fn test_days_and_summary() {
    let mut store = store_with_three_days();
    let today = day(2025, 6, 20);

    let days = execute(&readings_command(&["days"]), &mut store, today)
        .await
        .unwrap();
    assert_eq!(days.lines, vec!["2025-05-01", "2025-06-11", "2025-06-13"]);

    let summary = execute(
        &readings_command(&["summary", "--from", "2025-06-01", "--to", "2025-06-30"]),
        &mut store,
        today,
    )
    .await
    .unwrap();
    assert_eq!(summary.lines[0], "Readings:  3");
}

#[tokio::test]
async fn test_export_then_import_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    let mut store = store_with_three_days();
    let path_arg = path.to_string_lossy().to_string();

    let exported = execute(
        &readings_command(&["export", "--format", "json", "--output", path_arg.as_str()]),
        &mut store,
        day(2025, 6, 20),
    )
    .await
    .unwrap();
    assert_eq!(
        exported.notice.unwrap().description.as_deref(),
        Some("Data exported as JSON.")
    );

    let mut restored = ReadingsStore::open(InMemoryStorage::new());
    let imported = execute(
        &readings_command(&["import", path_arg.as_str()]),
        &mut restored,
        day(2025, 6, 20),
    )
    .await
    .unwrap();

    assert_eq!(
        imported.notice.unwrap().to_string(),
        "Success!: Imported 4 readings."
    );
    assert_eq!(restored.readings(), store.readings());
}

#[tokio::test]
async fn test_export_empty_store_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let path_arg = path.to_string_lossy().to_string();
    let mut store = ReadingsStore::open(InMemoryStorage::new());

    let err = execute(
        &readings_command(&["export", "--output", path_arg.as_str()]),
        &mut store,
        day(2025, 6, 20),
    )
    .await
    .unwrap_err();

    assert_eq!(err.notice().title, "No data to export");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_run_with_file_storage_persists_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_string_lossy().to_string();

    let add = Cli::try_parse_from([
        "toolbox", "--storage", "file", "--data-dir", data_dir.as_str(), "readings", "add", "-s", "121",
        "-d", "79", "--date", "2025-06-13",
    ])
    .unwrap();
    run(&add).await.unwrap();

    let list = Cli::try_parse_from([
        "toolbox", "--storage", "file", "--data-dir", data_dir.as_str(), "readings", "list", "--day",
        "2025-06-13",
    ])
    .unwrap();
    let outcome = run(&list).await.unwrap();

    assert_eq!(outcome.lines.len(), 1);
    assert!(outcome.lines[0].contains("121/79"));
    assert!(dir.path().join("blood-pressure-readings.json").exists());
}

#[tokio::test]
async fn test_run_text_tools() {
    let cli = Cli::try_parse_from(["toolbox", "encode", "--kind", "html", "<a & b>"]).unwrap();
    assert_eq!(run(&cli).await.unwrap().lines, vec!["&lt;a &amp; b&gt;"]);

    let cli = Cli::try_parse_from(["toolbox", "karaoke", "Africa"]).unwrap();
    assert_eq!(
        run(&cli).await.unwrap().lines,
        vec!["https://www.youtube.com/results?search_query=Africa%20karaoke"]
    );
}
