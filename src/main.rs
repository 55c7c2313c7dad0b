use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use task_pipeline::{
    cancellation_after,
    cli::Cli,
    services::{print_report, ConsoleProgressReporter, DefaultPipelineConfig},
    ClockParityFaultPolicy, PipelineConfig, TaskPipeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DefaultPipelineConfig::default()
        .with_queue_capacity(cli.queue_capacity)
        .with_max_task_age(Duration::from_secs(cli.max_task_age_secs))
        .with_processing_delay(Duration::from_millis(cli.processing_delay_ms))
        .with_max_tasks_shown(cli.max_shown);

    let max_shown = config.max_tasks_shown();

    let reporter = if cli.json {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    };

    // デッドラインが唯一のキャンセル源であり、ジェネレータのみが消費する
    let pipeline = TaskPipeline::new(config, ClockParityFaultPolicy::new(), reporter);
    let cancel = cancellation_after(Duration::from_millis(cli.deadline_ms));

    let report = pipeline
        .execute(cancel)
        .await
        .context("pipeline execution failed")?;

    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{rendered}");
    } else {
        print_report(&report, max_shown);
    }

    Ok(())
}
