// パイプラインを流れるデータ型定義

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// タスクの業務的な失敗原因
///
/// 処理の失敗はデータとしてタスクに記録され、
/// パイプライン呼び出し側へ制御フローのエラーとしては伝播しない
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskFailure {
    /// 生成時点で不良としてマークされたタスク
    #[error("task was created in a failed state")]
    PreFlagged,

    /// 処理時点で最大許容年齢を超過していたタスク
    #[error("processing failure: task exceeded the maximum age")]
    Stale,
}

/// 処理対象のタスク
///
/// 生成→キュー投入→ディスパッチ→単一プロセッサによる処理→
/// 結果コレクションへの追加、というライフサイクルを持つ。
/// 各段階で所有権が移動するため、二重処理は型システムで防止される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 生成時刻由来のID（不透明な値、一意性は保証されない）
    pub id: i64,
    /// 生成時刻
    pub created_at: DateTime<Utc>,
    /// 処理完了時刻（プロセッサが一度だけ設定する）
    pub finished_at: Option<DateTime<Utc>>,
    /// 業務的な失敗原因（生成時または処理時に設定される）
    pub failure: Option<TaskFailure>,
}

impl Task {
    /// 指定時刻で新しいタスクを生成する
    pub fn new(created_at: DateTime<Utc>, failure: Option<TaskFailure>) -> Self {
        Self {
            id: created_at.timestamp_millis(),
            created_at,
            finished_at: None,
            failure,
        }
    }

    /// タスクが失敗として終了したかどうか
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let created = self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let finished = self
            .finished_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "-".to_string());

        match &self.failure {
            Some(failure) => write!(
                f,
                "id: {}, created at: {}, finished at: {}, error: {}",
                self.id, created, finished, failure
            ),
            None => write!(
                f,
                "id: {}, created at: {}, finished at: {}",
                self.id, created, finished
            ),
        }
    }
}

/// パイプライン完了後の最終レポート
///
/// 完了トラッカーが全ユニットの終了を確認した後にのみ生成される。
/// コレクション内の順序は処理完了順に依存するため保証されない。
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// 生成開始から全処理完了までの経過時間
    pub elapsed: Duration,
    /// 成功したタスク
    pub succeeded: Vec<Task>,
    /// 失敗したタスク
    pub failed: Vec<Task>,
}

impl PipelineReport {
    /// 成功タスク数
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    /// 失敗タスク数
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// 処理されたタスクの総数
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}
