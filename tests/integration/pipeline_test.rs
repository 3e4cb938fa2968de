use srag_tree::config::PipelineConfig;
use srag_tree::pipeline;

use crate::utils::{dot_available, synthetic_csv, write_file};

fn quiet_config(input: &std::path::Path) -> PipelineConfig {
    PipelineConfig::new(input)
        .with_model_path(None)
        .with_figure_path(None)
        .with_reference_year(2023)
        .with_verbose(false)
}

#[test]
fn trains_and_evaluates_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "srag.csv", &synthetic_csv(70));
    let model_path = dir.path().join("models").join("tree.json");

    let config = quiet_config(&input).with_model_path(Some(model_path.clone()));
    let report = pipeline::run(&config).unwrap();

    assert!(!report.load_failed);
    assert_eq!(report.loaded_rows, 70);
    // every seventh record answered "unknown" to fever
    assert_eq!(report.model_rows, 60);
    assert_eq!(report.label.as_deref(), Some("target"));
    assert_eq!(report.features, vec!["age", "FEBRE", "TOSSE", "PERD_OLFT"]);
    assert!(report.trained());
    assert!(report.num_leaves.is_some_and(|n| n <= 10));
    assert!(model_path.exists());
}

#[test]
fn missing_input_degrades_to_an_untrained_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(&dir.path().join("absent.csv"));

    let report = pipeline::run(&config).unwrap();

    assert!(report.load_failed);
    assert_eq!(report.loaded_rows, 0);
    assert_eq!(report.model_rows, 0);
    assert!(report.label.is_none());
    assert!(!report.trained());
}

#[test]
fn unlabelled_input_skips_training() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "nolabel.csv", "nu_idade_n;FEBRE\n30;1\n41;2\n");

    let report = pipeline::run(&quiet_config(&input)).unwrap();

    assert!(!report.load_failed);
    assert!(report.label.is_none());
    assert_eq!(report.features, vec!["age", "FEBRE"]);
    assert!(!report.trained());
}

#[test]
fn verbose_run_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "srag.csv", &synthetic_csv(30));

    let report = pipeline::run(&quiet_config(&input).with_verbose(true)).unwrap();
    assert!(report.trained());
}

#[test]
fn renders_figure_when_graphviz_is_installed() {
    if !dot_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "srag.csv", &synthetic_csv(40));
    let figure = dir.path().join("figures").join("tree.svg");

    let config = quiet_config(&input).with_figure_path(Some(figure.clone()));
    pipeline::run(&config).unwrap();

    let svg = std::fs::read_to_string(&figure).unwrap();
    assert!(svg.contains("<svg"));
}
