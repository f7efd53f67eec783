//! アップロード対象ファイルの抽象化とメディアタイプ判定
//!
//! ブラウザでは `web_sys::File`、CLIではローカルファイルを同じ状態オブジェクトで扱う

use std::path::{Path, PathBuf};

/// Open XML スプレッドシート (.xlsx)
pub const XLSX_MEDIA_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 旧バイナリ形式 (.xls)
pub const XLS_MEDIA_TYPE: &str = "application/vnd.ms-excel";

/// 受け付けるメディアタイプ
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = [XLSX_MEDIA_TYPE, XLS_MEDIA_TYPE];

/// ファイル選択ダイアログの accept 属性
pub const FILE_INPUT_ACCEPT: &str = ".xlsx,.xls";

/// 選択されたファイルのハンドル
pub trait FileHandle {
    /// 表示用ファイル名
    fn name(&self) -> String;

    /// 宣言されたメディアタイプ
    fn media_type(&self) -> String;
}

pub fn is_accepted_media_type(media_type: &str) -> bool {
    ACCEPTED_MEDIA_TYPES.contains(&media_type)
}

/// 拡張子からメディアタイプを推定（ブラウザの File.type 相当）
pub fn media_type_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("xlsx") => XLSX_MEDIA_TYPE,
        Some("xls") => XLS_MEDIA_TYPE,
        _ => "application/octet-stream",
    }
}

/// ローカルファイル（CLI・テスト用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    /// ファイルを読み込み、拡張子からメディアタイプを決める
    pub fn read(path: &Path) -> crate::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            media_type: media_type_for_path(path).to_string(),
            bytes,
        })
    }

    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            media_type: media_type.into(),
            bytes,
        }
    }
}

impl FileHandle for LocalFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}
