//! Configuration for the surveillance pipeline.

use std::path::PathBuf;

use crate::model::TrainingParams;
use crate::schema::ColumnConfig;
use crate::schema::adapt::DateFormatConfig;

/// Default number of rows per CSV batch
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Input file read by the binary
pub const DEFAULT_INPUT_PATH: &str = "data/raw/INFLUD21-01-05-2023.csv";
/// Where the fitted tree is persisted
pub const DEFAULT_MODEL_PATH: &str = "models/modelo_arvore_decisao.json";
/// Where the rendered tree is written; the extension selects PNG or SVG
pub const DEFAULT_FIGURE_PATH: &str = "reports/figures/arvore_decisao.png";

/// Display names for label 0 and label 1
pub const DEFAULT_CLASS_NAMES: [&str; 2] = ["other", "covid-19"];

/// Field values read as missing, besides the empty field
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Pattern matching the empty field and every [`MISSING_VALUE_TOKENS`] entry
#[must_use]
pub fn missing_value_pattern() -> String {
    let tokens = MISSING_VALUE_TOKENS
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    format!("^(?:{tokens})?$")
}

/// Configuration for reading delimited record files
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Whether the first line holds column names
    pub has_header: bool,
    /// Rows per decoded batch
    pub batch_size: usize,
    /// Rows scanned for schema inference (`None` scans the whole file)
    pub infer_schema_records: Option<usize>,
    /// Fields matching this pattern are read as null; `None` nulls only empty fields
    pub null_regex: Option<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_header: true,
            batch_size: DEFAULT_BATCH_SIZE,
            infer_schema_records: None,
            null_regex: Some(missing_value_pattern()),
        }
    }
}

/// Configuration for a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Semicolon-delimited input table
    pub input_path: PathBuf,
    /// Output path of the serialized model; `None` skips persistence
    pub model_path: Option<PathBuf>,
    /// Output path of the tree image; `None` skips rendering
    pub figure_path: Option<PathBuf>,
    /// Log column traces and table summaries at `info` level
    pub verbose: bool,
    /// CSV reader settings
    pub reader: ReaderConfig,
    /// Date parsing settings
    pub date_format: DateFormatConfig,
    /// Column allow-lists and recoding targets
    pub columns: ColumnConfig,
    /// Split and tree hyperparameters
    pub training: TrainingParams,
    /// Class names shown in reports and the rendered tree
    pub class_names: Vec<String>,
    /// Year used for birth-date arithmetic; `None` uses the current year
    pub reference_year: Option<i32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            model_path: Some(PathBuf::from(DEFAULT_MODEL_PATH)),
            figure_path: Some(PathBuf::from(DEFAULT_FIGURE_PATH)),
            verbose: true,
            reader: ReaderConfig::default(),
            date_format: DateFormatConfig::default(),
            columns: ColumnConfig::default(),
            training: TrainingParams::default(),
            class_names: DEFAULT_CLASS_NAMES.iter().map(|c| (*c).to_string()).collect(),
            reference_year: None,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration reading `input_path` with all other defaults
    #[must_use]
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Set the model output path
    #[must_use]
    pub fn with_model_path(mut self, path: Option<PathBuf>) -> Self {
        self.model_path = path;
        self
    }

    /// Set the figure output path
    #[must_use]
    pub fn with_figure_path(mut self, path: Option<PathBuf>) -> Self {
        self.figure_path = path;
        self
    }

    /// Fix the year used for birth-date arithmetic
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Toggle verbose tracing
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
