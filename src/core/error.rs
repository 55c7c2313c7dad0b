// パイプライン専用のカスタムエラー型定義

use thiserror::Error;

/// パイプラインの構造的なエラー型
///
/// タスク個々の業務的な失敗（`TaskFailure`）とは区別される。
/// ここに現れるのはライフサイクルの誤用や設定不備であり、
/// 実行時にリカバリする対象ではない
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("invalid pipeline state: {message}")]
    InvalidState { message: String },

    #[error("task join error: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PipelineError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// ライフサイクル誤用エラーの作成
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// タスク結合エラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(error: tokio::task::JoinError) -> Self {
        PipelineError::TaskError { source: error }
    }
}

/// パイプライン操作の結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
