//! Surveillance record preprocessing
//!
//! Normalization, feature/label derivation and model-ready filtering for
//! SIVEP-Gripe hospitalization records.

pub mod derive;
pub mod normalize;
pub mod preparation;
pub mod recode;

pub use derive::{derive_age, derive_features};
pub use normalize::normalize_records;
pub use preparation::{PreparedTable, prepare_model_table, select_features};
pub use recode::{outcome_label, recode_response, recode_response_text, recode_sex};
