use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "task_pipeline")]
#[command(about = "Emulates continuous task generation and concurrent processing under a deadline")]
#[command(version)]
pub struct Cli {
    /// Deadline for task generation in milliseconds
    #[arg(short, long, default_value = "3000")]
    pub deadline_ms: u64,

    /// Bounded queue capacity (0 falls back to the default of 10)
    #[arg(short, long, default_value = "10")]
    pub queue_capacity: usize,

    /// Maximum task age in seconds before processing marks it as failed
    #[arg(long, default_value = "20")]
    pub max_task_age_secs: u64,

    /// Per-task processing delay in milliseconds (models I/O cost)
    #[arg(long, default_value = "150")]
    pub processing_delay_ms: u64,

    /// Maximum number of task lines shown per result collection
    #[arg(long, default_value = "100")]
    pub max_shown: usize,

    /// Emit the final report as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}
