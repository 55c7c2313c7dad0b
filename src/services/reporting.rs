// 結果表示の実装 - 最終レポートの整形と出力
// コアは完全なコレクションと件数を公開し、表示ポリシーはこの層に閉じる

use crate::core::{PipelineReport, Task};
use std::fmt::Write as _;

/// タスク群を1ブロックに整形する
///
/// 件数が上限以内なら各タスクを列挙し、超過時は件数のみのサマリーへ
/// フォールバックする。空のグループは出力しない
pub fn format_task_group(tasks: &[Task], title: &str, max_shown: usize) -> Option<String> {
    match tasks.len() {
        0 => None,
        count if count > max_shown => Some(format!("count of {title}: {count}\n")),
        _ => {
            let mut block = format!("{title}:\n");
            for task in tasks {
                // writeln!はStringに対して失敗しない
                let _ = writeln!(block, "{task}");
            }
            Some(block)
        }
    }
}

/// 最終レポート全体を整形する
pub fn format_report(report: &PipelineReport, max_shown: usize) -> String {
    let mut output = format!("elapsed time: {:?}\n", report.elapsed);

    if let Some(block) = format_task_group(&report.failed, "tasks finished with error", max_shown)
    {
        output.push_str(&block);
    }
    if let Some(block) =
        format_task_group(&report.succeeded, "successfully finished tasks", max_shown)
    {
        output.push_str(&block);
    }

    output
}

/// 最終レポートを標準出力へ表示する
pub fn print_report(report: &PipelineReport, max_shown: usize) {
    print!("{}", format_report(report, max_shown));
}
