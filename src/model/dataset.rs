//! Conversion from model-ready Arrow tables to `linfa` datasets

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use linfa::Dataset;
use ndarray::{Array1, Array2};

use crate::error::{PipelineError, Result};
use crate::model::Samples;
use crate::utils::column_as_f64;

/// Build a `linfa` dataset from the feature and label columns of a batch
///
/// Every feature and label value must be present; the model-ready filter
/// guarantees this. Labels must be non-negative integers.
pub fn dataset_from_batch(
    batch: &RecordBatch,
    features: &[String],
    label: &str,
) -> Result<Samples> {
    let n_rows = batch.num_rows();
    let mut records = Array2::<f64>::zeros((n_rows, features.len()));

    for (j, name) in features.iter().enumerate() {
        let values = column_as_f64(batch, name)?
            .ok_or_else(|| PipelineError::conversion(name.as_str(), "feature column not found"))?;

        for (i, value) in values.iter().enumerate() {
            records[[i, j]] = value.ok_or_else(|| {
                PipelineError::conversion(name.as_str(), format!("missing value in row {i}"))
            })?;
        }
    }

    let labels = column_as_f64(batch, label)?
        .ok_or_else(|| PipelineError::conversion(label, "label column not found"))?;
    if labels.null_count() > 0 {
        return Err(PipelineError::conversion(label, "label column has missing values"));
    }

    let targets = labels
        .values()
        .iter()
        .map(|&v| {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
                Ok(v as usize)
            } else {
                Err(PipelineError::conversion(label, format!("invalid class label {v}")))
            }
        })
        .collect::<Result<Array1<usize>>>()?;

    Ok(Dataset::new(records, targets).with_feature_names(features.to_vec()))
}
