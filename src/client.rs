//! バックエンドAPIクライアント
//!
//! シートの解析・評価はすべてサーバー側で行う。ここではmultipartで送って結果を受け取るだけ。

use crate::error::Result;
use intern_report_common::{backend_error_message, LocalFile, NamesResponse, ReportPayload};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};

pub const NAMES_PATH: &str = "/get-intern-names";
pub const REPORT_PATH: &str = "/report-upload";

/// 生成されたレポート
#[derive(Debug, Clone)]
pub struct UploadedReport {
    pub payload: ReportPayload,
    /// 応答本文そのまま（未知のフィールドも含む）
    pub raw: Value,
}

pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReportClient {
    /// `timeout` が None ならタイムアウトなし
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn file_form(file: &LocalFile) -> Result<Form> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        Ok(Form::new().part("file", part))
    }

    /// シートに含まれるインターン名を取得
    ///
    /// 失敗の扱い（番兵のみへ縮退）は呼び出し側が決める
    pub async fn fetch_names(&self, file: &LocalFile) -> Result<Vec<String>> {
        let started = Instant::now();
        let response = self
            .http
            .post(self.url(NAMES_PATH))
            .multipart(Self::file_form(file)?)
            .send()
            .await?
            .error_for_status()?;

        let body: NamesResponse = response.json().await?;
        tracing::debug!(
            count = body.names.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched intern names"
        );
        Ok(body.names)
    }

    /// シートと対象名を送ってレポートを生成
    ///
    /// 失敗時はレスポンスの `detail` をそのままエラーにする
    pub async fn upload_report(&self, file: &LocalFile, name: &str) -> Result<UploadedReport> {
        let form = Self::file_form(file)?.text("name", name.to_string());

        let started = Instant::now();
        let response = self
            .http
            .post(self.url(REPORT_PATH))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(
            %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report request finished"
        );

        if !status.is_success() {
            return Err(intern_report_common::Error::Backend(backend_error_message(&body)).into());
        }

        let raw: Value = serde_json::from_str(&body)?;
        let payload = ReportPayload::deserialize(&raw)?;
        Ok(UploadedReport { payload, raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ReportClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(NAMES_PATH), "http://localhost:8000/get-intern-names");
    }
}
