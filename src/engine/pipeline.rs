// Pipeline - Producer-Consumer パイプラインのオーケストレーション
// 生成・処理・完了待機・レポートのライフサイクル全体を管理

use crate::core::{
    FaultPolicy, PipelineConfig, PipelineError, PipelineReport, PipelineResult, ProgressReporter,
    Task,
};
use crate::engine::{
    aggregator::ResultAggregator, dispatcher::spawn_dispatcher, generator::spawn_generator,
};
use crate::services::config::DEFAULT_QUEUE_CAPACITY;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

/// 指定時間の経過後に発火するキャンセルトークンを作成する
///
/// パイプライン全体のデッドラインとして使用する
pub fn cancellation_after(deadline: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    let deadline_token = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        deadline_token.cancel();
    });
    token
}

/// タスク生成と並行処理のパイプライン
///
/// ライフサイクルは start_generating → start_processing →
/// wait_for_completion → report の順で呼び出す。
/// キューの送信側・受信側はtake-onceのスロットで保持され、
/// 二重起動は構造的に検出される
pub struct TaskPipeline<C, F, R> {
    config: Arc<C>,
    policy: Arc<F>,
    reporter: Arc<R>,
    queue_capacity: usize,
    tracker: TaskTracker,
    aggregator: Arc<ResultAggregator>,
    queue_tx: Option<mpsc::Sender<Task>>,
    queue_rx: Option<mpsc::Receiver<Task>>,
    dispatched: Arc<AtomicUsize>,
    started_at: Option<Instant>,
    elapsed: Option<Duration>,
}

impl<C, F, R> TaskPipeline<C, F, R>
where
    C: PipelineConfig,
    F: FaultPolicy + 'static,
    R: ProgressReporter + 'static,
{
    /// 新しいパイプラインを作成する
    ///
    /// キュー容量0はデフォルト容量（10）に置換される
    pub fn new(config: C, policy: F, reporter: R) -> Self {
        let queue_capacity = match config.queue_capacity() {
            0 => DEFAULT_QUEUE_CAPACITY,
            capacity => capacity,
        };
        let (queue_tx, queue_rx) = mpsc::channel(queue_capacity);

        Self {
            config: Arc::new(config),
            policy: Arc::new(policy),
            reporter: Arc::new(reporter),
            queue_capacity,
            tracker: TaskTracker::new(),
            aggregator: Arc::new(ResultAggregator::new()),
            queue_tx: Some(queue_tx),
            queue_rx: Some(queue_rx),
            dispatched: Arc::new(AtomicUsize::new(0)),
            started_at: None,
            elapsed: None,
        }
    }

    /// 実際に使用されるキュー容量（デフォルト置換後）
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// ディスパッチャがキューから取り出したタスクの累計数
    pub fn dispatched_count(&self) -> usize {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// タスク生成を開始する
    ///
    /// キャンセルトークンはジェネレータだけが消費する唯一の停止シグナル。
    /// 送信側の所有権はジェネレータへ移動し、キュー閉鎖の単独所有者となる
    pub async fn start_generating(&mut self, cancel: CancellationToken) -> PipelineResult<()> {
        let queue_tx = self
            .queue_tx
            .take()
            .ok_or_else(|| PipelineError::invalid_state("generator already started"))?;

        self.started_at = Some(Instant::now());
        self.reporter.report_started(self.queue_capacity).await;

        spawn_generator(&self.tracker, cancel, Arc::clone(&self.policy), queue_tx);
        Ok(())
    }

    /// タスク処理（ディスパッチャとファンアウト）を開始する
    ///
    /// ディスパッチャはキャンセルを直接観測せず、
    /// キュー閉鎖によってのみ終了する
    pub fn start_processing(&mut self) -> PipelineResult<()> {
        let queue_rx = self
            .queue_rx
            .take()
            .ok_or_else(|| PipelineError::invalid_state("dispatcher already started"))?;

        spawn_dispatcher(
            &self.tracker,
            queue_rx,
            Arc::clone(&self.aggregator),
            self.config.max_task_age(),
            self.config.processing_delay(),
            Arc::clone(&self.dispatched),
        );
        Ok(())
    }

    /// ジェネレータ・ディスパッチャ・全プロセッサの完了を待機する
    ///
    /// 完了後に一度だけ経過時間を確定する。再呼び出しは何もしない
    pub async fn wait_for_completion(&mut self) -> PipelineResult<()> {
        if self.elapsed.is_some() {
            return Ok(());
        }

        let started_at = self.started_at.ok_or_else(|| {
            PipelineError::invalid_state("wait_for_completion called before start_generating")
        })?;
        if self.queue_rx.is_some() {
            return Err(PipelineError::invalid_state(
                "wait_for_completion called before start_processing",
            ));
        }

        self.tracker.close();
        self.tracker.wait().await;

        let elapsed = started_at.elapsed();
        self.elapsed = Some(elapsed);

        let (succeeded, failed) = self.aggregator.snapshot().await;
        self.reporter
            .report_completed(succeeded.len(), failed.len(), elapsed)
            .await;
        Ok(())
    }

    /// 最終レポートを取得する
    ///
    /// 完了前の読み取りは結果コレクションへの競合アクセスになるため拒否する
    pub async fn report(&self) -> PipelineResult<PipelineReport> {
        let elapsed = self.elapsed.ok_or_else(|| {
            PipelineError::invalid_state("results requested before completion")
        })?;

        let (succeeded, failed) = self.aggregator.snapshot().await;
        Ok(PipelineReport {
            elapsed,
            succeeded,
            failed,
        })
    }

    /// ライフサイクル全体を実行して最終レポートを返す
    pub async fn execute(mut self, cancel: CancellationToken) -> PipelineResult<PipelineReport> {
        self.start_generating(cancel).await?;
        self.start_processing()?;
        self.wait_for_completion().await?;
        self.report().await
    }
}
