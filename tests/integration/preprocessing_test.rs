use arrow::array::Array;
use srag_tree::algorithm::surveillance::{derive_features, normalize_records};
use srag_tree::loader::empty_table;
use srag_tree::schema::{ColumnConfig, DateFormatConfig};

use crate::utils::{batch_of, column_names, int_values, ints, strings};

const YEAR: i32 = 2023;

fn preprocess(batch: &arrow::record_batch::RecordBatch) -> arrow::record_batch::RecordBatch {
    let columns = ColumnConfig::default();
    let normalized =
        normalize_records(batch, &columns, &DateFormatConfig::default(), false).unwrap();
    derive_features(&normalized, &columns, YEAR, false).unwrap()
}

#[test]
fn covid_case_is_labelled_positive() {
    let raw = batch_of(vec![
        ("FEBRE", ints(&[Some(1)])),
        ("CLASSI_FIN", ints(&[Some(5)])),
        ("cs_sexo", strings(&[Some("F")])),
    ]);

    let out = preprocess(&raw);

    assert_eq!(int_values(&out, "FEBRE"), vec![Some(1)]);
    assert_eq!(int_values(&out, "cs_sexo"), vec![Some(1)]);
    assert_eq!(int_values(&out, "target"), vec![Some(1)]);
}

#[test]
fn unknown_answer_becomes_missing() {
    let raw = batch_of(vec![
        ("FEBRE", ints(&[Some(9)])),
        ("CLASSI_FIN", ints(&[Some(2)])),
        ("cs_sexo", strings(&[Some("M")])),
    ]);

    let out = preprocess(&raw);

    assert_eq!(int_values(&out, "FEBRE"), vec![None]);
    assert_eq!(int_values(&out, "cs_sexo"), vec![Some(0)]);
    assert_eq!(int_values(&out, "target"), vec![Some(0)]);
}

#[test]
fn missing_outcome_is_negative() {
    let raw = batch_of(vec![("CLASSI_FIN", ints(&[None, Some(5), Some(1)]))]);
    assert_eq!(
        int_values(&preprocess(&raw), "target"),
        vec![Some(0), Some(1), Some(0)]
    );
}

#[test]
fn empty_table_flows_through() {
    let out = preprocess(&empty_table());
    assert_eq!(out.num_rows(), 0);
    // only the always-derived age column exists
    assert_eq!(column_names(&out), vec!["age"]);
}

#[test]
fn reported_age_is_copied() {
    let raw = batch_of(vec![("nu_idade_n", ints(&[Some(30), None]))]);
    assert_eq!(int_values(&preprocess(&raw), "age"), vec![Some(30), None]);
}

#[test]
fn age_falls_back_to_birth_year() {
    let raw = batch_of(vec![(
        "dt_nasc",
        strings(&[Some("12/03/1970"), Some("not a date"), Some("01/01/2030")]),
    )]);

    // future birth dates are not clamped
    assert_eq!(
        int_values(&preprocess(&raw), "age"),
        vec![Some(53), None, Some(-7)]
    );
}

#[test]
fn without_age_sources_age_is_entirely_missing() {
    let raw = batch_of(vec![("FEBRE", ints(&[Some(1), Some(2)]))]);
    let out = preprocess(&raw);
    let age = out.column_by_name("age").unwrap();
    assert_eq!(age.null_count(), 2);
}

#[test]
fn normalization_is_idempotent() {
    let raw = batch_of(vec![
        ("dt_notific", strings(&[Some("05/01/2021"), Some("??")])),
        ("FEBRE", ints(&[Some(1), Some(9)])),
        ("TOSSE", ints(&[Some(2), None])),
        ("ID_MUNICIP", ints(&[Some(1), Some(2)])),
    ]);
    let columns = ColumnConfig::default();
    let dates = DateFormatConfig::default();

    let once = normalize_records(&raw, &columns, &dates, false).unwrap();
    let twice = normalize_records(&once, &columns, &dates, false).unwrap();

    assert_eq!(once, twice);
    assert_eq!(column_names(&once), vec!["dt_notific", "FEBRE", "TOSSE"]);
}
