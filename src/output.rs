//! レポートの書き出し

use crate::cli::OutputFormat;
use crate::error::Result;
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use intern_report_common::{to_document, to_text, RenderedReport, SENTINEL};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DOCUMENT_TITLE: &str = "Intern Communication Report";

/// 既定のファイル名（拡張子なし）: `report-<name>-<日時>`
pub fn default_file_stem(name: &str, now: DateTime<Local>) -> String {
    let name = if name.trim().is_empty() { SENTINEL } else { name.trim() };
    let slug: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    format!("report-{}-{}", slug, now.format("%Y%m%d-%H%M%S"))
}

/// 出力先の決定
///
/// 指定がディレクトリ（または拡張子なし）ならその中に既定名で作る
pub fn output_path(output: Option<&Path>, output_dir: Option<&Path>, stem: &str, format: OutputFormat) -> PathBuf {
    let file_name = format!("{}.{}", stem, format.extension());
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => output_dir.unwrap_or_else(|| Path::new(".")).join(file_name),
    }
}

/// 形式ごとの内容（JSONは受信した応答をそのまま書く）
pub fn render_output(raw: &Value, report: &RenderedReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Html => to_document(report, DOCUMENT_TITLE),
        OutputFormat::Json => serde_json::to_string_pretty(raw)?,
        OutputFormat::Text => to_text(report),
    })
}

pub fn write_report(
    raw: &Value,
    report: &RenderedReport,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_output(raw, report, format)?)?;
    tracing::info!(path = %path.display(), %format, "report written");
    Ok(())
}

/// 通信待ちのスピナー
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
