// Generator - タスク連続生成機能

use crate::core::{FaultPolicy, Task, TaskFailure};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

/// Generator: キャンセルが発火するまでタスクを生成し続ける
///
/// 有界キューの送信側を単独で所有し、終了時にドロップすることで
/// キューを一度だけ閉じる。閉鎖はディスパッチャへの唯一の終了シグナル。
/// キューが満杯で送信がブロックしている間にキャンセルが発火した場合は
/// キャンセルが優先され、送信中のスロット予約は破棄される
pub fn spawn_generator<F>(
    tracker: &TaskTracker,
    cancel: CancellationToken,
    policy: Arc<F>,
    queue_tx: mpsc::Sender<Task>,
) -> tokio::task::JoinHandle<()>
where
    F: FaultPolicy + 'static,
{
    tracker.spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                permit = queue_tx.reserve() => {
                    let Ok(permit) = permit else {
                        // 受信側が先に破棄された場合は正常終了
                        break;
                    };

                    let now = Utc::now();
                    let failure = policy
                        .should_preflag(now)
                        .then_some(TaskFailure::PreFlagged);
                    permit.send(Task::new(now, failure));
                }
            }
        }
        // queue_txのドロップがキュー閉鎖シグナル
    })
}
