// 進捗監視の具象実装

use crate::core::ProgressReporter;
use async_trait::async_trait;
use std::time::Duration;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, queue_capacity: usize) {
        if !self.quiet {
            println!("🚀 Starting task generation (queue capacity: {queue_capacity})...");
        }
    }

    async fn report_completed(&self, succeeded: usize, failed: usize, elapsed: Duration) {
        if !self.quiet {
            println!(
                "✅ Completed in {:.2}s! Succeeded: {succeeded}, Failed: {failed}",
                elapsed.as_secs_f64()
            );
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _queue_capacity: usize) {
        // 何もしない
    }

    async fn report_completed(&self, _succeeded: usize, _failed: usize, _elapsed: Duration) {
        // 何もしない
    }
}
