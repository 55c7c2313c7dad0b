// Dispatcher - キュー排出とタスク単位のファンアウト

use crate::core::Task;
use crate::engine::{aggregator::ResultAggregator, processor::process_task};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::task::TaskTracker;

/// Dispatcher: キューが閉じて空になるまでタスクを受信し続ける
///
/// 受信したタスクごとに独立したプロセッサを同じトラッカー上に起動し、
/// 完了を待たずに次の受信へ戻る（タスクごとに1並行ユニット）。
/// プロセッサはspawn時点でトラッカーに登録されるため、
/// 受信ループ終了後もwaitは未完了ユニットを取りこぼさない
pub fn spawn_dispatcher(
    tracker: &TaskTracker,
    mut queue_rx: mpsc::Receiver<Task>,
    aggregator: Arc<ResultAggregator>,
    max_task_age: Duration,
    processing_delay: Duration,
    dispatched: Arc<AtomicUsize>,
) -> tokio::task::JoinHandle<()> {
    let processor_tracker = tracker.clone();
    tracker.spawn(async move {
        while let Some(task) = queue_rx.recv().await {
            dispatched.fetch_add(1, Ordering::Relaxed);

            let aggregator = Arc::clone(&aggregator);
            processor_tracker.spawn(process_task(
                task,
                aggregator,
                max_task_age,
                processing_delay,
            ));
        }
        // キュー閉鎖を観測したらディスパッチャ自身も完了
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio::time::{timeout, Duration};

    fn dispatch_context() -> (Arc<ResultAggregator>, Arc<AtomicUsize>) {
        (
            Arc::new(ResultAggregator::new()),
            Arc::new(AtomicUsize::new(0)),
        )
    }

    #[tokio::test]
    async fn test_dispatcher_processes_all_received_tasks() {
        let tracker = TaskTracker::new();
        let (tx, rx) = mpsc::channel::<Task>(10);
        let (aggregator, dispatched) = dispatch_context();

        spawn_dispatcher(
            &tracker,
            rx,
            Arc::clone(&aggregator),
            Duration::from_secs(20),
            Duration::ZERO,
            Arc::clone(&dispatched),
        );

        for _ in 0..5 {
            tx.send(Task::new(Utc::now(), None)).await.unwrap();
        }
        drop(tx);

        tracker.close();
        timeout(Duration::from_secs(5), tracker.wait())
            .await
            .expect("dispatcher and processors must finish");

        let (succeeded, failed) = aggregator.snapshot().await;
        assert_eq!(dispatched.load(Ordering::Relaxed), 5);
        assert_eq!(succeeded.len() + failed.len(), 5);
    }

    #[tokio::test]
    async fn test_dispatcher_exits_on_closed_empty_queue() {
        let tracker = TaskTracker::new();
        let (tx, rx) = mpsc::channel::<Task>(1);
        let (aggregator, dispatched) = dispatch_context();

        let handle = spawn_dispatcher(
            &tracker,
            rx,
            aggregator,
            Duration::from_secs(20),
            Duration::ZERO,
            Arc::clone(&dispatched),
        );

        drop(tx);
        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
        assert_eq!(dispatched.load(Ordering::Relaxed), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_dispatcher_does_not_wait_for_processors_inline() {
        let tracker = TaskTracker::new();
        let (tx, rx) = mpsc::channel::<Task>(1);
        let (aggregator, dispatched) = dispatch_context();

        spawn_dispatcher(
            &tracker,
            rx,
            Arc::clone(&aggregator),
            Duration::from_secs(20),
            // 処理遅延が大きくても受信ループは止まらない
            Duration::from_millis(200),
            Arc::clone(&dispatched),
        );

        let send_started = std::time::Instant::now();
        for _ in 0..10 {
            tx.send(Task::new(Utc::now(), None)).await.unwrap();
        }
        drop(tx);

        // 逐次処理なら10 * 200msかかるところ、ファンアウトなら一斉に進む
        assert!(send_started.elapsed() < Duration::from_millis(1000));

        tracker.close();
        timeout(Duration::from_secs(5), tracker.wait())
            .await
            .expect("fan-out processors must all finish");

        let (succeeded, failed) = aggregator.snapshot().await;
        assert_eq!(succeeded.len() + failed.len(), 10);
        assert_eq!(dispatched.load(Ordering::Relaxed), 10);
    }
}
