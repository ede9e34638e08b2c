use crate::error::{MetricsError, SmResult};
use crate::loader;
use crate::stats;
use clap::Args;
use std::path::PathBuf;

/// Pipeline configuration. The trial-file registry is explicit: either
/// positional paths in session order or a JSON manifest, never a baked-in
/// file table.
#[derive(Args, Debug, Clone)]
pub struct PipelineConfig {
    /// Trial log files to ingest, in session order.
    pub trials: Vec<PathBuf>,

    /// JSON manifest listing the trial files instead of positional paths.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Keep Practice-type challenges in the metric extraction.
    #[arg(long, default_value_t = false)]
    pub include_practice: bool,

    /// Standard-deviation window for outlier rejection.
    #[arg(long, default_value_t = stats::OUTLIER_SIGMA)]
    pub outlier_sigma: f64,

    /// Destination for the extracted summary table.
    #[arg(long, default_value = "extracted_data.csv")]
    pub out: PathBuf,

    /// Directory for rendered figures.
    #[arg(long, default_value = "figures")]
    pub figures: PathBuf,

    /// Decimal digits kept (truncated, not rounded) in the CSV output.
    #[arg(long, default_value_t = 5)]
    pub truncate: u32,

    /// Skip chart rendering and only emit the table.
    #[arg(long, default_value_t = false)]
    pub no_figures: bool,
}

impl PipelineConfig {
    /// Resolve the trial registry from the manifest or the positional paths.
    pub fn resolve_trials(&self) -> SmResult<Vec<PathBuf>> {
        match &self.manifest {
            Some(manifest) => {
                if !self.trials.is_empty() {
                    return Err(MetricsError::Config(
                        "pass either trial paths or --manifest, not both".to_string(),
                    ));
                }
                loader::load_manifest(manifest)
            }
            None => {
                if self.trials.is_empty() {
                    return Err(MetricsError::Config(
                        "no trial files given (positional paths or --manifest)".to_string(),
                    ));
                }
                Ok(self.trials.clone())
            }
        }
    }
}
