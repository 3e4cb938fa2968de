//! Classification metrics on the held-out partition

use std::fmt;

use linfa::prelude::*;
use ndarray::Array2;

use crate::error::{PipelineError, Result};
use crate::model::{Classifier, Samples};

/// Positive class for the headline recall figure
pub const POSITIVE_CLASS: usize = 1;

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    /// Display name of the class
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of held-out samples whose true label is this class
    pub support: usize,
}

/// Metrics of a fitted classifier on held-out data
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    /// Fraction of correct predictions
    pub accuracy: f64,
    /// Recall of [`POSITIVE_CLASS`]
    pub recall: f64,
    /// One entry per class, indexed by label
    pub classes: Vec<ClassMetrics>,
    /// Counts with actual labels as rows and predicted labels as columns
    pub confusion_matrix: Array2<usize>,
}

impl EvaluationReport {
    /// Build the report from true and predicted labels
    ///
    /// `accuracy` is passed in so the figure reported by the model library is kept.
    pub fn from_labels(
        actual: &[usize],
        predicted: &[usize],
        class_names: &[String],
        accuracy: f64,
    ) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(PipelineError::Evaluation(format!(
                "{} labels but {} predictions",
                actual.len(),
                predicted.len()
            )));
        }

        let n_classes = class_names.len();
        let mut confusion_matrix = Array2::<usize>::zeros((n_classes, n_classes));
        for (&truth, &guess) in actual.iter().zip(predicted) {
            if truth >= n_classes || guess >= n_classes {
                return Err(PipelineError::Evaluation(format!(
                    "label {} outside the {n_classes} known classes",
                    truth.max(guess)
                )));
            }
            confusion_matrix[[truth, guess]] += 1;
        }

        let classes = class_names
            .iter()
            .enumerate()
            .map(|(class, name)| {
                let tp = confusion_matrix[[class, class]] as f64;
                let support = confusion_matrix.row(class).sum();
                let predicted_as = confusion_matrix.column(class).sum();
                let precision = ratio(tp, predicted_as as f64);
                let recall = ratio(tp, support as f64);
                ClassMetrics {
                    name: name.clone(),
                    precision,
                    recall,
                    f1: ratio(2.0 * precision * recall, precision + recall),
                    support,
                }
            })
            .collect::<Vec<_>>();

        let recall = classes.get(POSITIVE_CLASS).map_or(0.0, |c| c.recall);

        Ok(Self {
            accuracy,
            recall,
            classes,
            confusion_matrix,
        })
    }

    /// Number of evaluated samples
    #[must_use]
    pub fn total_support(&self) -> usize {
        self.classes.iter().map(|c| c.support).sum()
    }

    /// Unweighted mean of (precision, recall, f1) over classes
    #[must_use]
    pub fn macro_average(&self) -> (f64, f64, f64) {
        let n = self.classes.len().max(1) as f64;
        let sum = self.classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            (acc.0 + c.precision, acc.1 + c.recall, acc.2 + c.f1)
        });
        (sum.0 / n, sum.1 / n, sum.2 / n)
    }

    /// Support-weighted mean of (precision, recall, f1) over classes
    #[must_use]
    pub fn weighted_average(&self) -> (f64, f64, f64) {
        let total = self.total_support();
        if total == 0 {
            return (0.0, 0.0, 0.0);
        }
        let total = total as f64;
        self.classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            let w = c.support as f64 / total;
            (
                acc.0 + w * c.precision,
                acc.1 + w * c.recall,
                acc.2 + w * c.f1,
            )
        })
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.name.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(12);

        writeln!(f, "Classification report:")?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                class.name, class.precision, class.recall, class.f1, class.support
            )?;
        }
        writeln!(f)?;

        let total = self.total_support();
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, total
        )?;
        for (label, (p, r, f1)) in [
            ("macro avg", self.macro_average()),
            ("weighted avg", self.weighted_average()),
        ] {
            writeln!(f, "{label:>width$} {p:>9.2} {r:>9.2} {f1:>9.2} {total:>9}")?;
        }
        writeln!(f)?;

        writeln!(f, "Confusion matrix (rows: actual, columns: predicted):")?;
        for row in self.confusion_matrix.rows() {
            let cells: Vec<String> = row.iter().map(|c| format!("{c:>7}")).collect();
            writeln!(f, "[{}]", cells.join(""))?;
        }
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        write!(f, "Recall: {:.4}", self.recall)
    }
}

/// Evaluate a classifier on the held-out partition
pub fn evaluate<C: Classifier>(
    model: &C,
    test: &Samples,
    class_names: &[String],
) -> Result<EvaluationReport> {
    if test.nsamples() == 0 {
        return Err(PipelineError::Evaluation(
            "the test partition is empty".to_string(),
        ));
    }

    let predictions = model.predict(test);
    let accuracy = predictions
        .confusion_matrix(test)
        .map_err(|e| PipelineError::Evaluation(e.to_string()))?
        .accuracy();

    let actual = test.targets().to_vec();
    EvaluationReport::from_labels(
        &actual,
        &predictions.to_vec(),
        class_names,
        f64::from(accuracy),
    )
}
