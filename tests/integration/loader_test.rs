use std::path::Path;

use srag_tree::config::ReaderConfig;
use srag_tree::algorithm::surveillance::normalize_records;
use srag_tree::loader::{LoadOutcome, load_records, try_load_records};
use srag_tree::schema::{ColumnConfig, DateFormatConfig};

use crate::utils::{column_names, int_values, write_file};

#[test]
fn reads_semicolon_delimited_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "records.csv",
        "FEBRE;cs_sexo;CLASSI_FIN\n1;F;5\n9;M;2\n;F;\n",
    );

    let batch = try_load_records(&path, &ReaderConfig::default()).unwrap();

    assert_eq!(batch.num_rows(), 3);
    assert_eq!(column_names(&batch), vec!["FEBRE", "cs_sexo", "CLASSI_FIN"]);
    assert_eq!(int_values(&batch, "FEBRE"), vec![Some(1), Some(9), None]);
    assert_eq!(int_values(&batch, "CLASSI_FIN"), vec![Some(5), Some(2), None]);
}

#[test]
fn missing_value_tokens_are_read_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "na.csv",
        "FEBRE;TOSSE;CLASSI_FIN\n1;1;5\nNA;NaN;2\n",
    );

    let raw = try_load_records(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(int_values(&raw, "FEBRE"), vec![Some(1), None]);

    let normalized = normalize_records(
        &raw,
        &ColumnConfig::default(),
        &DateFormatConfig::default(),
        false,
    )
    .unwrap();
    assert_eq!(int_values(&normalized, "FEBRE"), vec![Some(1), None]);
    assert_eq!(int_values(&normalized, "TOSSE"), vec![Some(1), None]);
}

#[test]
fn missing_value_tokens_stay_missing_without_a_null_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "na.csv", "FEBRE;TOSSE\n1;2\nNA;NaN\n");

    let config = ReaderConfig {
        null_regex: None,
        ..ReaderConfig::default()
    };
    let raw = try_load_records(&path, &config).unwrap();
    let normalized = normalize_records(
        &raw,
        &ColumnConfig::default(),
        &DateFormatConfig::default(),
        false,
    )
    .unwrap();
    assert_eq!(int_values(&normalized, "FEBRE"), vec![Some(1), None]);
    assert_eq!(int_values(&normalized, "TOSSE"), vec![Some(0), None]);
}

#[test]
fn small_batches_are_concatenated() {
    let dir = tempfile::tempdir().unwrap();
    let rows: String = (0..25).map(|i| format!("{i};1\n")).collect();
    let path = write_file(dir.path(), "many.csv", &format!("nu_idade_n;FEBRE\n{rows}"));

    let config = ReaderConfig {
        batch_size: 4,
        ..ReaderConfig::default()
    };
    let batch = try_load_records(&path, &config).unwrap();
    assert_eq!(batch.num_rows(), 25);
}

#[test]
fn missing_file_is_a_failure_not_an_empty_table() {
    let outcome = load_records(Path::new("/no/such/dir/records.csv"), &ReaderConfig::default());
    assert!(outcome.is_failure());
    assert!(outcome.clone().into_result().is_err());

    let table = outcome.into_table();
    assert_eq!(table.num_rows(), 0);
    assert_eq!(table.num_columns(), 0);
}

#[test]
fn header_only_file_loads_as_zero_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "empty.csv", "FEBRE;CLASSI_FIN\n");

    match load_records(&path, &ReaderConfig::default()) {
        LoadOutcome::Loaded(batch) => assert_eq!(batch.num_rows(), 0),
        LoadOutcome::Failed { reason, .. } => panic!("unexpected failure: {reason}"),
    }
}

#[test]
fn ragged_rows_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "ragged.csv", "FEBRE;CLASSI_FIN\n1;5\n1;5;7;8\n");

    let outcome = load_records(&path, &ReaderConfig::default());
    assert!(outcome.is_failure());
}
