//! アプリケーション状態
//!
//! 選択ファイル・候補名・選択名・送信状態を1つのオブジェクトにまとめ、
//! コントローラ（Web の App / CLI の Session）が唯一の所有者となる。
//!
//! 名前取得は非同期のため、発行時の `FetchTicket` を結果に添えて返す。
//! ファイル削除や再選択でトークンが進むので、古い結果は `apply_names` で破棄される。

use crate::error::{Error, Result};
use crate::file::{is_accepted_media_type, FileHandle};
use crate::names::{filter_names, CandidateNames, SelectedName, SuggestionList, Suggestions, SENTINEL};
use crate::report::ReportPayload;

/// 候補名の解決状況
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameStatus {
    /// ファイル未選択
    #[default]
    Idle,
    /// `/get-intern-names` 応答待ち
    Loading,
    Resolved,
}

/// 名前取得リクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// 送信内容（`name` フィールドに入れる値）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AppState<F> {
    file: Option<F>,
    candidates: CandidateNames,
    selected: SelectedName,
    name_status: NameStatus,
    fetch_token: u64,
    submitting: bool,
    /// 入力欄のテキスト（選択後はラベル、入力中はクエリ）
    pub query: String,
    pub suggestions: SuggestionList,
    /// 直近のレポート（送信ごとに丸ごと置き換え）
    pub report: Option<(ReportPayload, String)>,
}

impl<F> Default for AppState<F> {
    fn default() -> Self {
        Self {
            file: None,
            candidates: CandidateNames::sentinel_only(),
            selected: SelectedName::sentinel(),
            name_status: NameStatus::Idle,
            fetch_token: 0,
            submitting: false,
            query: String::new(),
            suggestions: SuggestionList::default(),
            report: None,
        }
    }
}

impl<F: FileHandle> AppState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを選択する
    ///
    /// 対応外のメディアタイプなら状態を変えずにエラーを返す。
    /// 成功時は返されたチケットで名前取得を行うこと。
    /// 選択名と入力欄は名前取得の結果が反映されるまでそのまま残す。
    pub fn select_file(&mut self, file: F) -> Result<FetchTicket> {
        let media_type = file.media_type();
        if !is_accepted_media_type(&media_type) {
            return Err(Error::UnsupportedFileType(media_type));
        }

        self.file = Some(file);
        self.candidates = CandidateNames::sentinel_only();
        self.name_status = NameStatus::Loading;
        self.fetch_token += 1;

        Ok(FetchTicket(self.fetch_token))
    }
}

impl<F> AppState<F> {
    /// 選択ファイルを外し、候補と選択名を初期状態へ戻す
    pub fn remove_file(&mut self) {
        self.file = None;
        self.candidates = CandidateNames::sentinel_only();
        self.selected = SelectedName::sentinel();
        self.name_status = NameStatus::Idle;
        self.fetch_token += 1;
        self.query.clear();
        self.suggestions.on_click_outside();
    }

    /// 名前取得の結果を反映する
    ///
    /// 失敗時は番兵のみへ縮退（エラーは表に出さない）。
    /// チケットが古ければ何もせず `false` を返す。
    pub fn apply_names<E>(&mut self, ticket: FetchTicket, result: std::result::Result<Vec<String>, E>) -> bool {
        if ticket.0 != self.fetch_token || self.file.is_none() {
            return false;
        }

        self.candidates = match result {
            Ok(names) => CandidateNames::from_backend(names),
            Err(_) => CandidateNames::sentinel_only(),
        };
        self.selected = SelectedName::sentinel();
        self.query = self.selected.label.clone();
        self.name_status = NameStatus::Resolved;
        true
    }

    /// 候補から名前を選ぶ
    pub fn select_name(&mut self, value: impl Into<String>, label: impl Into<String>) {
        self.selected = SelectedName::new(value, label);
        self.query = self.selected.label.clone();
        self.suggestions.on_select();
    }

    /// 入力欄のキー入力
    pub fn on_query_input(&mut self, query: impl Into<String>) -> Suggestions {
        self.query = query.into();
        let enabled = self.name_input_enabled();
        self.suggestions.on_input(enabled);
        self.filtered()
    }

    /// 現在の入力で絞り込んだ候補
    pub fn filtered(&self) -> Suggestions {
        // 選択直後はラベルが入っているので全件を出す
        if self.query == self.selected.label {
            filter_names(&self.candidates, "")
        } else {
            filter_names(&self.candidates, &self.query)
        }
    }

    /// 送信開始。ファイル未選択ならリクエストを出さずにエラー。
    pub fn begin_submit(&mut self) -> Result<Submission> {
        if self.file.is_none() {
            return Err(Error::NoFileSelected);
        }
        if self.submitting {
            return Err(Error::SubmissionInFlight);
        }

        self.submitting = true;
        let name = if self.selected.value.is_empty() {
            SENTINEL.to_string()
        } else {
            self.selected.value.clone()
        };
        Ok(Submission { name })
    }

    /// 送信終了（成功・失敗どちらでも必ず呼ぶ）
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// レポートを保持（送信した名前も個人レポートの見出しに使う）
    pub fn show_report(&mut self, payload: ReportPayload, submitted_name: impl Into<String>) {
        self.report = Some((payload, submitted_name.into()));
    }

    /// 「新しいレポート」: レポートを閉じてフォームを初期化
    pub fn reset(&mut self) {
        self.report = None;
        self.remove_file();
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn candidates(&self) -> &CandidateNames {
        &self.candidates
    }

    pub fn selected(&self) -> &SelectedName {
        &self.selected
    }

    pub fn name_status(&self) -> NameStatus {
        self.name_status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// 入力欄が有効か（ファイル選択中のみ）
    pub fn name_input_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// 送信ボタンが押せるか
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.submitting
    }
}
