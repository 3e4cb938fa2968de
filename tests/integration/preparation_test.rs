use srag_tree::algorithm::surveillance::{derive_features, normalize_records, prepare_model_table};
use srag_tree::loader::empty_table;
use srag_tree::schema::{ColumnConfig, DateFormatConfig};
use srag_tree::RecordBatch;

use crate::utils::{batch_of, column_names, int_values, ints, strings};

fn derived(raw: &RecordBatch) -> RecordBatch {
    let columns = ColumnConfig::default();
    let normalized =
        normalize_records(raw, &columns, &DateFormatConfig::default(), false).unwrap();
    derive_features(&normalized, &columns, 2023, false).unwrap()
}

fn sample() -> RecordBatch {
    batch_of(vec![
        ("nu_idade_n", ints(&[Some(30), None, Some(61), Some(45)])),
        ("cs_sexo", strings(&[Some("F"), Some("M"), Some("M"), Some("F")])),
        ("FEBRE", ints(&[Some(1), Some(1), Some(9), Some(2)])),
        ("TOSSE", ints(&[Some(2), Some(1), Some(1), Some(1)])),
        ("CLASSI_FIN", ints(&[Some(5), Some(5), Some(4), None])),
    ])
}

#[test]
fn keeps_only_complete_rows_over_features_and_label() {
    let table = derived(&sample());
    let prepared = prepare_model_table(&table, &ColumnConfig::default(), false).unwrap();

    assert_eq!(prepared.features, vec!["age", "FEBRE", "TOSSE"]);
    assert_eq!(prepared.label.as_deref(), Some("target"));
    assert_eq!(column_names(&prepared.table), vec!["age", "FEBRE", "TOSSE", "target"]);

    // row 1 lacks age, row 2 answered "unknown" to fever
    assert_eq!(prepared.num_rows(), 2);
    assert_eq!(int_values(&prepared.table, "age"), vec![Some(30), Some(45)]);
    assert_eq!(int_values(&prepared.table, "target"), vec![Some(1), Some(0)]);
    assert!(prepared.num_rows() <= table.num_rows());
}

#[test]
fn sex_is_not_a_feature() {
    let prepared =
        prepare_model_table(&derived(&sample()), &ColumnConfig::default(), false).unwrap();
    assert!(!prepared.features.iter().any(|f| f == "cs_sexo"));
}

#[test]
fn age_without_values_is_excluded() {
    let raw = batch_of(vec![
        ("FEBRE", ints(&[Some(1), Some(2)])),
        ("CLASSI_FIN", ints(&[Some(5), Some(1)])),
    ]);
    let prepared = prepare_model_table(&derived(&raw), &ColumnConfig::default(), false).unwrap();

    assert_eq!(prepared.features, vec!["FEBRE"]);
    assert_eq!(prepared.num_rows(), 2);
}

#[test]
fn no_label_returns_table_unchanged() {
    let raw = batch_of(vec![
        ("nu_idade_n", ints(&[Some(30), None])),
        ("FEBRE", ints(&[Some(9), Some(1)])),
    ]);
    let table = derived(&raw);
    let prepared = prepare_model_table(&table, &ColumnConfig::default(), false).unwrap();

    assert!(!prepared.has_label());
    assert_eq!(prepared.features, vec!["age", "FEBRE"]);
    assert_eq!(prepared.table, table);
}

#[test]
fn empty_table_yields_no_label_and_no_rows() {
    let prepared =
        prepare_model_table(&derived(&empty_table()), &ColumnConfig::default(), false).unwrap();

    assert!(!prepared.has_label());
    assert!(prepared.features.is_empty());
    assert_eq!(prepared.num_rows(), 0);
}

#[test]
fn labelled_zero_row_table_stays_empty() {
    let raw = batch_of(vec![
        ("FEBRE", ints(&[])),
        ("CLASSI_FIN", ints(&[])),
    ]);
    let prepared = prepare_model_table(&derived(&raw), &ColumnConfig::default(), false).unwrap();

    assert!(prepared.has_label());
    assert_eq!(prepared.num_rows(), 0);
    assert_eq!(column_names(&prepared.table), vec!["FEBRE", "target"]);
}
