use anyhow::Context;
use log::info;
use srag_tree::{PipelineConfig, pipeline};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();
    info!("Reading surveillance records from: {}", config.input_path.display());

    let report = pipeline::run(&config)
        .with_context(|| format!("pipeline failed for {}", config.input_path.display()))?;

    if report.load_failed {
        info!("Input could not be loaded; no model was trained");
    } else if let Some(evaluation) = &report.evaluation {
        info!(
            "Trained on {} model-ready rows: accuracy {:.4}, recall {:.4}",
            report.model_rows, evaluation.accuracy, evaluation.recall
        );
    }

    Ok(())
}
