//! SIVEP-Gripe (SRAG) column definitions
//!
//! This module is the single source of truth for which questionnaire columns
//! the pipeline consumes and how each of them is treated.

/// Notification date
pub const NOTIFICATION_DATE_COLUMN: &str = "dt_notific";
/// Date of first symptoms
pub const SYMPTOM_ONSET_COLUMN: &str = "dt_sin_pri";
/// Birth date
pub const BIRTH_DATE_COLUMN: &str = "dt_nasc";
/// Age as reported on the notification form
pub const AGE_COLUMN: &str = "nu_idade_n";
/// Sex (`M`/`F`)
pub const SEX_COLUMN: &str = "cs_sexo";
/// Final case classification; code 5 is COVID-19
pub const OUTCOME_COLUMN: &str = "CLASSI_FIN";

/// Derived age feature
pub const DERIVED_AGE_COLUMN: &str = "age";
/// Derived binary label
pub const TARGET_COLUMN: &str = "target";

/// `CLASSI_FIN` code mapped to the positive label
pub const POSITIVE_OUTCOME_CODE: f64 = 5.0;

/// Columns kept from the raw table, in output order
pub const SELECTED_COLUMNS: &[&str] = &[
    "dt_notific", "dt_sin_pri", "dt_nasc", "nu_idade_n", "cs_sexo",
    "FEBRE", "TOSSE", "GARGANTA", "DISPNEIA", "DESC_RESP", "SATURACAO",
    "DIARREIA", "VOMITO", "DOR_ABD", "FADIGA", "PERD_OLFT", "PERD_PALA",
    "FATOR_RISC", "PUERPERA", "CARDIOPATI", "HEMATOLOGI", "SIND_DOWN",
    "HEPATICA", "ASMA", "DIABETES", "NEUROLOGIC", "PNEUMOPATI", "IMUNODEPRE",
    "RENAL", "OBESIDADE", "OBES_IMC", "OUT_MORBI", "CS_GESTANT",
    "VACINA_COV", "UTI", "ANTIVIRAL", "CLASSI_FIN", "EVOLUCAO", "TRAT_COV",
];

/// Columns parsed into calendar dates
pub const DATE_COLUMNS: &[&str] = &["dt_notific", "dt_sin_pri", "dt_nasc"];

/// Symptom and comorbidity answers coded `1` yes, `2` no, `9` unknown;
/// also the canonical order of binary features
pub const BINARY_COLUMNS: &[&str] = &[
    "FEBRE", "TOSSE", "GARGANTA", "DISPNEIA", "DESC_RESP", "SATURACAO",
    "DIARREIA", "VOMITO", "DOR_ABD", "FADIGA", "PERD_OLFT", "PERD_PALA",
    "FATOR_RISC", "PUERPERA", "CARDIOPATI", "HEMATOLOGI", "SIND_DOWN",
    "HEPATICA", "ASMA", "DIABETES", "NEUROLOGIC", "PNEUMOPATI", "IMUNODEPRE",
    "RENAL", "OBESIDADE", "OBES_IMC", "OUT_MORBI", "CS_GESTANT",
];

/// Column configuration for the normalizer, deriver and model-ready filter
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConfig {
    /// Allow-list of columns, in output order
    pub selected_columns: Vec<String>,
    /// Members of `selected_columns` parsed as dates
    pub date_columns: Vec<String>,
    /// Members of `selected_columns` recoded to 0/1/missing
    pub binary_columns: Vec<String>,
    /// Numeric age column copied into the derived age
    pub age_column: String,
    /// Birth date column used when no numeric age exists
    pub birth_date_column: String,
    /// Categorical outcome the label is derived from
    pub outcome_column: String,
    /// Outcome code mapped to label 1
    pub positive_outcome_code: f64,
    /// Sex column recoded `M`→0, `F`→1
    pub sex_column: String,
    /// Name of the derived age column
    pub derived_age_column: String,
    /// Name of the derived label column
    pub target_column: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            selected_columns: to_owned(SELECTED_COLUMNS),
            date_columns: to_owned(DATE_COLUMNS),
            binary_columns: to_owned(BINARY_COLUMNS),
            age_column: AGE_COLUMN.to_string(),
            birth_date_column: BIRTH_DATE_COLUMN.to_string(),
            outcome_column: OUTCOME_COLUMN.to_string(),
            positive_outcome_code: POSITIVE_OUTCOME_CODE,
            sex_column: SEX_COLUMN.to_string(),
            derived_age_column: DERIVED_AGE_COLUMN.to_string(),
            target_column: TARGET_COLUMN.to_string(),
        }
    }
}

impl ColumnConfig {
    /// Whether a column is parsed as a date
    #[must_use]
    pub fn is_date_column(&self, name: &str) -> bool {
        self.date_columns.iter().any(|c| c == name)
    }

    /// Whether a column is a binary questionnaire answer
    #[must_use]
    pub fn is_binary_column(&self, name: &str) -> bool {
        self.binary_columns.iter().any(|c| c == name)
    }
}

fn to_owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| (*c).to_string()).collect()
}
