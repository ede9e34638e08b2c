use clap::Parser;
use std::fs;
use std::process;
use stylus_metrics::aggregate;
use stylus_metrics::charts;
use stylus_metrics::config::PipelineConfig;
use stylus_metrics::error::SmResult;
use stylus_metrics::export;
use stylus_metrics::loader;
use tracing::{error, info};

mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: PipelineConfig,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.config) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(config: PipelineConfig) -> SmResult<()> {
    let trial_paths = config.resolve_trials()?;
    info!("📂 Loading {} trial logs", trial_paths.len());
    let logs = loader::load_all_trials(&trial_paths)?;

    let data = aggregate::build_study_data(&logs, config.include_practice, config.outlier_sigma)?;

    reports::print_summary_table(&data, config.truncate);

    export::write_csv(&data, &config.out, config.truncate)?;
    info!("💾 Wrote summary table: {}", config.out.display());

    if !config.no_figures {
        fs::create_dir_all(&config.figures)?;
        charts::render_all(&data, &config.figures)?;
        info!("📊 Wrote figures to {}", config.figures.display());
    }

    Ok(())
}
