//! End-to-end pipeline: load, normalize, derive, prepare, train, evaluate, render

use std::time::Instant;

use chrono::{Datelike, Local};

use crate::algorithm::surveillance::{derive_features, normalize_records, prepare_model_table};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::loader::load_records;
use crate::model::{EvaluationReport, TreeTrainer, evaluate};
use crate::render::render_tree;
use crate::utils::{preview_batch, summarize_batch};

/// Rows shown in the verbose preview
const PREVIEW_ROWS: usize = 5;

/// What a pipeline run produced
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// The input could not be read and an empty table was used instead
    pub load_failed: bool,
    /// Rows in the loaded table
    pub loaded_rows: usize,
    /// Rows in the model-ready table
    pub model_rows: usize,
    /// Features chosen by the model-ready filter
    pub features: Vec<String>,
    /// Label column, `None` when training was skipped
    pub label: Option<String>,
    /// Held-out metrics of the fitted tree
    pub evaluation: Option<EvaluationReport>,
    /// Leaves of the fitted tree
    pub num_leaves: Option<usize>,
}

impl PipelineReport {
    /// Whether a tree was fitted
    #[must_use]
    pub const fn trained(&self) -> bool {
        self.evaluation.is_some()
    }
}

/// Run every stage in order
///
/// A load failure does not abort the run: the empty table flows downstream and
/// training is skipped for lack of a label. A labelled model-ready table with no
/// rows is a training error.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    let start = Instant::now();
    let mut report = PipelineReport::default();

    let outcome = load_records(&config.input_path, &config.reader);
    report.load_failed = outcome.is_failure();
    let raw = outcome.into_table();
    report.loaded_rows = raw.num_rows();

    let normalized = normalize_records(&raw, &config.columns, &config.date_format, config.verbose)?;

    let reference_year = config.reference_year.unwrap_or_else(|| Local::now().year());
    let derived = derive_features(&normalized, &config.columns, reference_year, config.verbose)?;

    if config.verbose {
        log::info!("Preprocessed table:\n{}", summarize_batch(&derived));
        log::info!("First rows:\n{}", preview_batch(&derived, PREVIEW_ROWS)?);
    }

    let prepared = prepare_model_table(&derived, &config.columns, config.verbose)?;
    report.features.clone_from(&prepared.features);
    report.model_rows = prepared.num_rows();

    if !prepared.has_label() {
        log::warn!(
            "No '{}' column could be derived; skipping training",
            config.columns.target_column
        );
        return Ok(report);
    }
    report.label.clone_from(&prepared.label);

    let trained = TreeTrainer::new(config.training.clone()).train(&prepared)?;
    report.num_leaves = Some(trained.model.num_leaves());

    let evaluation = evaluate(&trained.model, &trained.test, &config.class_names)?;
    log::info!("\n{evaluation}");
    report.evaluation = Some(evaluation);

    if let Some(path) = &config.model_path {
        trained.model.save(path)?;
    }

    if let Some(path) = &config.figure_path {
        render_tree(
            &trained.model,
            trained.model.feature_names(),
            &config.class_names,
            path,
        )?;
    }

    log::info!("Pipeline finished in {:?}", start.elapsed());
    Ok(report)
}
