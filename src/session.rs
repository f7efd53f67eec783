//! レポート生成セッション
//!
//! ブラウザ版と同じ `AppState` を使い、ファイル選択 → 名前取得 → 名前選択 → 送信の順に進める

use crate::client::ReportClient;
use crate::error::{ReportError, Result};
use intern_report_common::{
    filter_names, render_report, AppState, FetchTicket, LocalFile, RenderedReport,
    ReportPayload, SENTINEL, SENTINEL_LABEL,
};
use serde_json::Value;
use std::path::Path;

pub struct Session {
    state: AppState<LocalFile>,
    client: ReportClient,
    /// 直近のレポート応答そのまま（JSON出力用）
    raw_report: Option<Value>,
}

/// 送信中フラグを戻す。await 中に future が破棄された場合も含む。
struct SubmitGuard<'a>(&'a mut AppState<LocalFile>);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.finish_submit();
    }
}

impl Session {
    pub fn new(client: ReportClient) -> Self {
        Self {
            state: AppState::new(),
            client,
            raw_report: None,
        }
    }

    pub fn state(&self) -> &AppState<LocalFile> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState<LocalFile> {
        &mut self.state
    }

    /// ファイルを読み込んで選択する（形式チェックはここで行い、通信はしない）
    pub fn select_file(&mut self, path: &Path) -> Result<FetchTicket> {
        if !path.is_file() {
            return Err(ReportError::FileNotFound(path.display().to_string()));
        }

        let file = LocalFile::read(path)?;
        let ticket = self.state.select_file(file)?;
        tracing::info!(file = %path.display(), "file selected");
        Ok(ticket)
    }

    /// 名前候補を取得して反映する。失敗しても番兵のみで続行する。
    ///
    /// 取得中にファイルが変わっていた場合は結果を捨てて `false` を返す
    pub async fn load_names(&mut self, ticket: FetchTicket) -> bool {
        let result = match self.state.file() {
            Some(file) => self.client.fetch_names(file).await,
            None => return false,
        };

        if let Err(e) = &result {
            tracing::warn!(error = %e, "could not extract names, falling back to overall only");
        }
        let applied = self.state.apply_names(ticket, result);
        if !applied {
            tracing::debug!("discarded names for a file that is no longer selected");
        }
        applied
    }

    /// 名前を指定して選ぶ
    ///
    /// 完全一致（大文字小文字無視）を優先し、なければ部分一致が1件のときだけ採用する。
    /// 候補が取れなかった場合は指定された名前をそのまま送る。
    pub fn choose_name(&mut self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() || query.eq_ignore_ascii_case(SENTINEL) {
            self.state.select_name(SENTINEL, SENTINEL_LABEL);
            return Ok(());
        }

        if self.state.candidates().individual_count() == 0 {
            tracing::warn!(name = query, "no candidate names available, sending name as given");
            self.state.select_name(query, query);
            return Ok(());
        }

        let matches = filter_names(self.state.candidates(), query).individual_values();
        let exact = matches.iter().find(|m| m.to_lowercase() == query.to_lowercase());

        let chosen = match (exact, matches.as_slice()) {
            (Some(name), _) => name.clone(),
            (None, [only]) => only.clone(),
            (None, []) => return Err(ReportError::NameNotFound(query.to_string())),
            (None, _) => {
                return Err(ReportError::AmbiguousName {
                    query: query.to_string(),
                    matches: matches.clone(),
                })
            }
        };

        tracing::debug!(name = %chosen, "intern selected");
        self.state.select_name(chosen.clone(), chosen);
        Ok(())
    }

    /// レポートを生成する
    ///
    /// ファイル未選択・送信中ならリクエストを出さずにエラー
    pub async fn submit(&mut self) -> Result<&ReportPayload> {
        let submission = self.state.begin_submit()?;
        let guard = SubmitGuard(&mut self.state);
        let result = match guard.0.file() {
            Some(file) => self.client.upload_report(file, &submission.name).await,
            None => Err(intern_report_common::Error::NoFileSelected.into()),
        };
        drop(guard);

        let uploaded = result?;
        tracing::info!(
            name = %submission.name,
            skills = uploaded.payload.evaluated.len(),
            "report generated"
        );
        self.raw_report = Some(uploaded.raw);
        self.state.show_report(uploaded.payload, submission.name);

        match &self.state.report {
            Some((payload, _)) => Ok(payload),
            None => Err(intern_report_common::Error::Backend(
                intern_report_common::GENERIC_FAILURE.to_string(),
            )
            .into()),
        }
    }

    /// 直近のレポート応答（受信したJSONのまま）
    pub fn raw_report(&self) -> Option<&Value> {
        self.raw_report.as_ref()
    }

    /// 直近のレポートを表示用に変換
    pub fn rendered(&self) -> Option<RenderedReport> {
        self.state
            .report
            .as_ref()
            .map(|(payload, submitted_name)| render_report(payload, submitted_name))
    }
}
