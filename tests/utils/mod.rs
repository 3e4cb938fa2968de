use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use srag_tree::utils::column_as_f64;

/// Build a batch from named columns
#[must_use]
pub fn batch_of(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

#[must_use]
pub fn ints(values: &[Option<i64>]) -> ArrayRef {
    Arc::new(Int64Array::from(values.to_vec()))
}

#[must_use]
pub fn floats(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

#[must_use]
pub fn strings(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

/// Column values as integers, whatever the numeric type
#[must_use]
pub fn int_values(batch: &RecordBatch, name: &str) -> Vec<Option<i64>> {
    let column = column_as_f64(batch, name)
        .unwrap()
        .unwrap_or_else(|| panic!("column {name} not found"));
    (0..column.len())
        .map(|i| column.is_valid(i).then(|| column.value(i) as i64))
        .collect()
}

/// Column names of a batch, in order
#[must_use]
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// A semicolon-delimited surveillance extract with `rows` records
///
/// Fever and loss of smell drive the COVID-19 classification, so a shallow
/// tree separates the classes well. Every seventh record answers "unknown"
/// to fever and is dropped by the model-ready filter.
#[must_use]
pub fn synthetic_csv(rows: usize) -> String {
    let mut csv = String::from(
        "dt_notific;dt_sin_pri;dt_nasc;nu_idade_n;cs_sexo;FEBRE;TOSSE;PERD_OLFT;ID_MUNICIP;CLASSI_FIN\n",
    );
    for i in 0..rows {
        let covid = i % 2 == 0;
        let febre = if i % 7 == 3 {
            9
        } else if covid {
            1
        } else {
            2
        };
        let tosse = if i % 3 == 0 { 1 } else { 2 };
        let olfato = if covid { 1 } else { 2 };
        let sexo = if i % 4 < 2 { "M" } else { "F" };
        let classi = if covid { 5 } else { 4 };
        let age = 20 + (i * 7) % 60;
        writeln!(
            csv,
            "05/01/2021;0{}/01/2021;12/03/1970;{age};{sexo};{febre};{tosse};{olfato};355030;{classi}",
            1 + i % 9
        )
        .unwrap();
    }
    csv
}

/// Whether the Graphviz `dot` executable can be launched
#[must_use]
pub fn dot_available() -> bool {
    Command::new("dot")
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}
