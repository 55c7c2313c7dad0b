pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

// 公開API - 主要コンポーネントの再エクスポート
pub use crate::core::{
    FaultPolicy, PipelineConfig, PipelineError, PipelineReport, PipelineResult, ProgressReporter,
    Task, TaskFailure,
};
pub use engine::{cancellation_after, ResultAggregator, TaskPipeline};
pub use services::{
    ClockParityFaultPolicy, ConsoleProgressReporter, DefaultPipelineConfig, EveryNthFaultPolicy,
    NoFaultPolicy, NoOpProgressReporter,
};
