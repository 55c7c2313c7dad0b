// Result Aggregator - 結果コレクションのスレッドセーフな集約

use crate::core::Task;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct ResultSlots {
    succeeded: Vec<Task>,
    failed: Vec<Task>,
}

/// 並行に動作する全プロセッサからの結果を集約する
///
/// 両コレクションを単一のMutexで保護し、recordの呼び出しを直列化する。
/// 完了トラッカーが全ユニットの終了を報告するまで読み取りは無効
#[derive(Debug, Default)]
pub struct ResultAggregator {
    slots: Mutex<ResultSlots>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 処理済みタスクをちょうど一つのコレクションへ追加する
    pub async fn record(&self, task: Task) {
        let mut slots = self.slots.lock().await;
        if task.is_failed() {
            slots.failed.push(task);
        } else {
            slots.succeeded.push(task);
        }
    }

    /// 両コレクションの複製を取得する（完了後にのみ呼び出すこと）
    pub async fn snapshot(&self) -> (Vec<Task>, Vec<Task>) {
        let slots = self.slots.lock().await;
        (slots.succeeded.clone(), slots.failed.clone())
    }
}
