//! インターン名の候補管理とオートコンプリート
//!
//! - CandidateNames: 先頭に "overall" を持つ候補リスト
//! - filter_names: 入力文字列による候補の絞り込み（大文字小文字を区別しない部分一致）
//! - SuggestionList: 候補ドロップダウンの開閉状態

use serde::{Deserialize, Serialize};

/// 全体レポートを表す番兵エントリ
pub const SENTINEL: &str = "overall";

/// 番兵エントリの表示ラベル
pub const SENTINEL_LABEL: &str = "Overall Report";

/// 番兵エントリの補足表示
pub const SENTINEL_DETAIL: &str = "All Interns";

pub const NO_MATCHES_MESSAGE: &str = "No matching interns found";

/// blur後にドロップダウンを閉じるまでの遅延。
/// mousedownでの選択がblurより先に届くための猶予。
pub const BLUR_CLOSE_DELAY_MS: u32 = 200;

/// `/get-intern-names` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamesResponse {
    pub names: Vec<String>,
}

/// 候補名リスト（常に番兵が先頭）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateNames(Vec<String>);

impl CandidateNames {
    pub fn sentinel_only() -> Self {
        Self(vec![SENTINEL.to_string()])
    }

    /// バックエンドの名前を受信順のまま番兵の後ろに並べる（重複除去はしない）
    pub fn from_backend(names: Vec<String>) -> Self {
        let mut all = Vec::with_capacity(names.len() + 1);
        all.push(SENTINEL.to_string());
        all.extend(names);
        Self(all)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// 番兵を除いた件数
    pub fn individual_count(&self) -> usize {
        self.0.iter().filter(|n| n.as_str() != SENTINEL).count()
    }

    pub fn iter_individuals(&self) -> impl Iterator<Item = &String> {
        self.0.iter().filter(|n| n.as_str() != SENTINEL)
    }
}

impl Default for CandidateNames {
    fn default() -> Self {
        Self::sentinel_only()
    }
}

/// 選択中の名前と入力欄の表示ラベル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedName {
    pub value: String,
    pub label: String,
}

impl SelectedName {
    pub fn sentinel() -> Self {
        Self {
            value: SENTINEL.to_string(),
            label: SENTINEL_LABEL.to_string(),
        }
    }

    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.value == SENTINEL
    }
}

impl Default for SelectedName {
    fn default() -> Self {
        Self::sentinel()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// 全体レポート
    Aggregate,
    /// 個人レポート
    Individual,
}

impl SuggestionKind {
    /// Font Awesome アイコン
    pub fn icon(&self) -> &'static str {
        match self {
            SuggestionKind::Aggregate => "fa-users",
            SuggestionKind::Individual => "fa-user",
        }
    }
}

/// ドロップダウンの1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub value: String,
    pub label: String,
    pub kind: SuggestionKind,
}

impl Suggestion {
    fn sentinel() -> Self {
        Self {
            value: SENTINEL.to_string(),
            label: SENTINEL_LABEL.to_string(),
            kind: SuggestionKind::Aggregate,
        }
    }

    fn individual(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
            kind: SuggestionKind::Individual,
        }
    }

    /// 選択時に入力欄へ表示するテキスト
    pub fn display_text(&self) -> &str {
        &self.label
    }
}

/// 絞り込み結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    /// 先頭は常に番兵
    pub entries: Vec<Suggestion>,
    /// 「該当なし」表示が必要か
    pub no_matches: bool,
}

impl Suggestions {
    /// 番兵以外の項目
    pub fn individuals(&self) -> impl Iterator<Item = &Suggestion> {
        self.entries
            .iter()
            .filter(|s| s.kind == SuggestionKind::Individual)
    }

    pub fn individual_values(&self) -> Vec<String> {
        self.individuals().map(|s| s.value.clone()).collect()
    }
}

/// 候補を入力文字列で絞り込む
///
/// 番兵は常に先頭。それ以外は部分一致（大文字小文字無視）で候補順を保つ。
/// 入力が空でなく、"overall" そのものでもなく、一致が0件なら `no_matches` を立てる。
pub fn filter_names(candidates: &CandidateNames, query: &str) -> Suggestions {
    let needle = query.to_lowercase();

    let mut entries = vec![Suggestion::sentinel()];
    entries.extend(
        candidates
            .iter_individuals()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(|name| Suggestion::individual(name)),
    );

    let no_matches = entries.len() == 1 && !query.is_empty() && needle != SENTINEL;

    Suggestions { entries, no_matches }
}

/// 候補ドロップダウンの開閉状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionList {
    open: bool,
}

impl SuggestionList {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// フォーカス時（入力欄が有効な場合のみ開く）
    pub fn on_focus(&mut self, input_enabled: bool) {
        if input_enabled {
            self.open = true;
        }
    }

    /// キー入力時
    pub fn on_input(&mut self, input_enabled: bool) {
        self.on_focus(input_enabled);
    }

    /// blur後の遅延タイマーから呼ばれる
    pub fn on_blur_elapsed(&mut self) {
        self.open = false;
    }

    pub fn on_select(&mut self) {
        self.open = false;
    }

    pub fn on_click_outside(&mut self) {
        self.open = false;
    }
}
