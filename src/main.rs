use clap::Parser;

use log::{error, info};
use std::process::ExitCode;

use concat_yolo_datasets::{
    collect_statistics, init_logging, merge_datasets, Args, MergeOptions,
};

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = MergeOptions::from(args);
    let summary = merge_datasets(&options)?;
    summary.print_summary();

    let stats = collect_statistics(&options.output_dir)?;
    stats.print_summary();
    if let Some(stats_json) = &args.stats_json {
        stats.write_json(stats_json)?;
        info!("Statistics written to {}", stats_json.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("Failed to open log file {}: {}", args.log_file.display(), e);
        return ExitCode::FAILURE;
    }

    info!("Starting the merge process...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to merge datasets: {}", e);
            ExitCode::FAILURE
        }
    }
}
