// 設定管理の具象実装

use crate::core::PipelineConfig;
use std::time::Duration;

/// キュー容量のデフォルト値（容量0指定時の置換先）
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;
/// タスクの最大許容年齢のデフォルト値
pub const DEFAULT_MAX_TASK_AGE: Duration = Duration::from_secs(20);
/// タスクごとの処理遅延のデフォルト値
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(150);
/// 個別列挙するタスク数上限のデフォルト値
pub const DEFAULT_MAX_TASKS_SHOWN: usize = 100;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    queue_capacity: usize,
    max_task_age: Duration,
    processing_delay: Duration,
    max_tasks_shown: usize,
}

impl DefaultPipelineConfig {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            queue_capacity,
            ..Self::default()
        }
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_max_task_age(mut self, max_task_age: Duration) -> Self {
        self.max_task_age = max_task_age;
        self
    }

    pub fn with_processing_delay(mut self, processing_delay: Duration) -> Self {
        self.processing_delay = processing_delay;
        self
    }

    pub fn with_max_tasks_shown(mut self, max_tasks_shown: usize) -> Self {
        self.max_tasks_shown = max_tasks_shown;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_task_age: DEFAULT_MAX_TASK_AGE,
            processing_delay: DEFAULT_PROCESSING_DELAY,
            max_tasks_shown: DEFAULT_MAX_TASKS_SHOWN,
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    fn max_task_age(&self) -> Duration {
        self.max_task_age
    }

    fn processing_delay(&self) -> Duration {
        self.processing_delay
    }

    fn max_tasks_shown(&self) -> usize {
        self.max_tasks_shown
    }
}
