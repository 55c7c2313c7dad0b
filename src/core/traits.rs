// パイプラインの抽象化インターフェース定義

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use std::time::Duration;

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// 有界キューの容量を取得（0はデフォルト容量に置換される）
    fn queue_capacity(&self) -> usize;

    /// タスクの最大許容年齢を取得（これより古いタスクは処理時に失敗する）
    fn max_task_age(&self) -> Duration;

    /// タスクごとの処理遅延を取得（I/Oコストのモデル）
    fn processing_delay(&self) -> Duration;

    /// 結果表示で個別に列挙するタスク数の上限を取得
    fn max_tasks_shown(&self) -> usize;
}

// PipelineConfig for Box<dyn PipelineConfig>
impl PipelineConfig for Box<dyn PipelineConfig> {
    fn queue_capacity(&self) -> usize {
        self.as_ref().queue_capacity()
    }

    fn max_task_age(&self) -> Duration {
        self.as_ref().max_task_age()
    }

    fn processing_delay(&self) -> Duration {
        self.as_ref().processing_delay()
    }

    fn max_tasks_shown(&self) -> usize {
        self.as_ref().max_tasks_shown()
    }
}

/// タスク生成時の不良判定ポリシーを抽象化するトレイト
///
/// どの程度の割合でタスクが不良になるかは外部ポリシーであり、
/// ジェネレータは判定結果だけを利用する
#[automock]
pub trait FaultPolicy: Send + Sync {
    /// 生成時点でタスクを不良としてマークするかどうかを判定
    fn should_preflag(&self, created_at: DateTime<Utc>) -> bool;
}

// FaultPolicy for Box<dyn FaultPolicy>
impl FaultPolicy for Box<dyn FaultPolicy> {
    fn should_preflag(&self, created_at: DateTime<Utc>) -> bool {
        self.as_ref().should_preflag(created_at)
    }
}

// FaultPolicy for Arc<F> - ポリシーを呼び出し側と共有したまま注入できる
impl<F> FaultPolicy for std::sync::Arc<F>
where
    F: FaultPolicy + ?Sized,
{
    fn should_preflag(&self, created_at: DateTime<Utc>) -> bool {
        self.as_ref().should_preflag(created_at)
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// タスク生成開始時の報告
    async fn report_started(&self, queue_capacity: usize);

    /// 全処理完了時の報告
    async fn report_completed(&self, succeeded: usize, failed: usize, elapsed: Duration);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, queue_capacity: usize) {
        self.as_ref().report_started(queue_capacity).await
    }

    async fn report_completed(&self, succeeded: usize, failed: usize, elapsed: Duration) {
        self.as_ref()
            .report_completed(succeeded, failed, elapsed)
            .await
    }
}
