// サービス層 - トレイトの具象実装
// 設定・不良判定ポリシー・進捗監視・結果表示を提供

pub mod config;
pub mod monitoring;
pub mod policy;
pub mod reporting;

// 公開API - 明示的にエクスポートして曖昧性を回避
pub use config::{DefaultPipelineConfig, DEFAULT_QUEUE_CAPACITY};
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter};
pub use policy::{ClockParityFaultPolicy, EveryNthFaultPolicy, NoFaultPolicy};
pub use reporting::{format_report, format_task_group, print_report};
