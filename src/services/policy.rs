// タスク不良判定ポリシーの具象実装

use crate::core::FaultPolicy;
use chrono::{DateTime, Timelike, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 生成時刻のナノ秒成分の偶奇で不良を判定するポリシー
///
/// 元システムの不良タスク出現ロジックをそのまま保存したもの。
/// 出現割合はシステムクロックの分解能に依存する
#[derive(Debug, Default, Clone)]
pub struct ClockParityFaultPolicy;

impl ClockParityFaultPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl FaultPolicy for ClockParityFaultPolicy {
    fn should_preflag(&self, created_at: DateTime<Utc>) -> bool {
        created_at.nanosecond() % 2 > 0
    }
}

/// n回ごとに1回不良を返す決定的ポリシー（テスト用）
#[derive(Debug)]
pub struct EveryNthFaultPolicy {
    interval: usize,
    calls: AtomicUsize,
    flagged: AtomicUsize,
}

impl EveryNthFaultPolicy {
    /// intervalは1以上であること（0は「毎回不良」として1に置換される）
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            calls: AtomicUsize::new(0),
            flagged: AtomicUsize::new(0),
        }
    }

    /// これまでに不良としてマークした件数
    pub fn flagged_count(&self) -> usize {
        self.flagged.load(Ordering::Relaxed)
    }

    /// これまでの判定回数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl FaultPolicy for EveryNthFaultPolicy {
    fn should_preflag(&self, _created_at: DateTime<Utc>) -> bool {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        let preflag = call % self.interval == 0;
        if preflag {
            self.flagged.fetch_add(1, Ordering::Relaxed);
        }
        preflag
    }
}

/// 不良を一切発生させないポリシー（テスト・ベースライン用）
#[derive(Debug, Default, Clone)]
pub struct NoFaultPolicy;

impl FaultPolicy for NoFaultPolicy {
    fn should_preflag(&self, _created_at: DateTime<Utc>) -> bool {
        false
    }
}
