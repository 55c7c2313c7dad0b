// Processor - タスク単位の処理ロジック

use crate::core::{Task, TaskFailure};
use crate::engine::aggregator::ResultAggregator;
use chrono::{TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;

/// 単一タスクを処理して結果アグリゲータへ引き渡す
///
/// このタスクの所有権は呼び出し元から完全に移動しており、
/// 終了判定（成功/失敗）はここで一度だけ確定する。
/// 構造的なエラーは発生させず、業務的な結果のみをデータとして記録する
pub async fn process_task(
    mut task: Task,
    aggregator: Arc<ResultAggregator>,
    max_task_age: Duration,
    processing_delay: Duration,
) {
    let now = Utc::now();

    if task.failure.is_none() {
        // 生成時刻が (now - max_task_age) 以前ならば期限切れ
        let cutoff = TimeDelta::from_std(max_task_age)
            .ok()
            .and_then(|age| now.checked_sub_signed(age));
        if let Some(cutoff) = cutoff {
            if task.created_at <= cutoff {
                task.failure = Some(TaskFailure::Stale);
            }
        }
    }

    task.finished_at = Some(now);
    aggregator.record(task).await;

    // I/Oコストのモデルとしての固定遅延
    tokio::time::sleep(processing_delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_fresh_task_succeeds() {
        let aggregator = Arc::new(ResultAggregator::new());
        let task = Task::new(Utc::now(), None);

        process_task(
            task,
            Arc::clone(&aggregator),
            Duration::from_secs(20),
            Duration::ZERO,
        )
        .await;

        let (succeeded, failed) = aggregator.snapshot().await;
        assert_eq!(succeeded.len(), 1);
        assert!(failed.is_empty());
        assert!(succeeded[0].finished_at.is_some());
        assert!(succeeded[0].failure.is_none());
    }

    #[tokio::test]
    async fn test_stale_task_fails() {
        let aggregator = Arc::new(ResultAggregator::new());
        let created_at = Utc::now() - TimeDelta::try_hours(1).unwrap();
        let task = Task::new(created_at, None);

        process_task(
            task,
            Arc::clone(&aggregator),
            Duration::from_secs(20),
            Duration::ZERO,
        )
        .await;

        let (succeeded, failed) = aggregator.snapshot().await;
        assert!(succeeded.is_empty());
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].failure, Some(TaskFailure::Stale));
    }

    #[tokio::test]
    async fn test_preflagged_failure_is_not_overwritten() {
        let aggregator = Arc::new(ResultAggregator::new());
        // 生成時の不良マークは期限切れ判定より優先される
        let created_at = Utc::now() - TimeDelta::try_hours(1).unwrap();
        let task = Task::new(created_at, Some(TaskFailure::PreFlagged));

        process_task(
            task,
            Arc::clone(&aggregator),
            Duration::from_secs(20),
            Duration::ZERO,
        )
        .await;

        let (_, failed) = aggregator.snapshot().await;
        assert_eq!(failed[0].failure, Some(TaskFailure::PreFlagged));
    }

    #[tokio::test]
    async fn test_huge_max_age_disables_staleness() {
        let aggregator = Arc::new(ResultAggregator::new());
        let created_at = Utc::now() - TimeDelta::try_days(365).unwrap();
        let task = Task::new(created_at, None);

        // chronoで表現できないほど大きな年齢は「期限切れなし」として扱う
        process_task(
            task,
            Arc::clone(&aggregator),
            Duration::from_secs(u64::MAX),
            Duration::ZERO,
        )
        .await;

        let (succeeded, failed) = aggregator.snapshot().await;
        assert_eq!(succeeded.len(), 1);
        assert!(failed.is_empty());
    }

    #[tokio::test]
    async fn test_finished_at_is_set_exactly_once() {
        let aggregator = Arc::new(ResultAggregator::new());
        let created_at = Utc::now();
        let task = Task::new(created_at, None);

        process_task(
            task,
            Arc::clone(&aggregator),
            Duration::from_secs(20),
            Duration::ZERO,
        )
        .await;

        let (succeeded, _) = aggregator.snapshot().await;
        let finished_at = succeeded[0].finished_at.expect("finished_at must be set");
        assert!(finished_at >= created_at);
    }
}
