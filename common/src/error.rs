//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 受け付けないメディアタイプ（.xlsx / .xls 以外）
    #[error("Please upload a valid Excel file (.xlsx or .xls)")]
    UnsupportedFileType(String),

    #[error("Please select a file first")]
    NoFileSelected,

    #[error("A report is already being generated")]
    SubmissionInFlight,

    /// バックエンドが返したエラー（detailをそのまま保持）
    #[error("Error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// ユーザーに提示するべきエラーか（名前取得の失敗などは黙って縮退する）
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFileType(_) | Error::NoFileSelected | Error::Backend(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
