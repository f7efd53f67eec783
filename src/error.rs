use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// 形式エラー・未選択・バックエンドのdetailなど（表示文言は共通側で定義）
    #[error(transparent)]
    App(#[from] intern_report_common::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No intern matches \"{0}\"")]
    NameNotFound(String),

    #[error("\"{query}\" matches several interns: {}", .matches.join(", "))]
    AmbiguousName { query: String, matches: Vec<String> },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// 終了時に表示する文言
    ///
    /// 共通側のエラーは画面表示と同じ文言（バックエンドの detail は "Error: ..." 済み）をそのまま使う
    pub fn user_message(&self) -> String {
        match self {
            ReportError::App(inner) => inner.to_string(),
            other => format!("Error: {}", other),
        }
    }
}
