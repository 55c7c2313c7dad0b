// エンジン層 - 並行処理とオーケストレーション
// ジェネレータ・ディスパッチャ・プロセッサ・集約を組み合わせる

pub mod aggregator;
pub mod dispatcher;
pub mod generator;
pub mod pipeline;
pub mod processor;

// 公開API - 主要エンジンクラス
pub use aggregator::ResultAggregator;
pub use pipeline::{cancellation_after, TaskPipeline};
