//! レポート描画（ペイロード → 表示モデル）
//!
//! DOMやHTMLには依存しない純粋関数。Web版はこの結果をLeptosのviewに、
//! CLIは `html` モジュールでHTML/テキストに変換する。

use crate::report::{InsightList, Rating, ReportKind, ReportPayload};

pub const OVERALL_DESCRIPTION: &str = "Comprehensive analysis of all interns";
pub const DEFAULT_MOTIVATIONAL_NOTE: &str = "Keep up the great work! Every step forward is progress.";
pub const NO_STRENGTHS: &str = "No strengths data available";
pub const NO_WEAKNESSES: &str = "No weaknesses data available";
pub const NO_RECOMMENDATIONS: &str = "No recommendations available";

/// 未知のスキルに使うアイコン
pub const DEFAULT_SKILL_ICON: &str = "fa-chart-bar";

/// プログレスバーを0%から目標幅へ伸ばすまでの遅延
pub const PROGRESS_ANIMATION_DELAY_MS: u32 = 100;

/// スキル名 → Font Awesome アイコン
pub fn skill_icon(skill: &str) -> &'static str {
    match skill {
        "Pronunciation Avg" => "fa-microphone",
        "Grammar Avg" => "fa-book",
        "Vocabulary Avg" => "fa-language",
        "Fluency Avg" => "fa-comments",
        "Confidence Avg" => "fa-user-tie",
        "Body Language Avg" => "fa-hands",
        _ => DEFAULT_SKILL_ICON,
    }
}

/// 表示ラベル（末尾の " Avg" を除く）
pub fn skill_label(skill: &str) -> &str {
    skill.strip_suffix(" Avg").unwrap_or(skill)
}

/// スキルカード1枚分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCard {
    pub skill: String,
    pub label: String,
    pub icon: &'static str,
    pub rating: String,
    pub rating_class: &'static str,
    pub percentage: u8,
}

impl SkillCard {
    fn new(skill: &str, rating: &Rating) -> Self {
        Self {
            skill: skill.to_string(),
            label: skill_label(skill).to_string(),
            icon: skill_icon(skill),
            rating: rating.as_str().to_string(),
            rating_class: rating.css_class(),
            percentage: rating.percentage(),
        }
    }
}

/// 箇条書きリスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Items(Vec<String>),
    /// データなし（1行のプレースホルダー）
    Placeholder(&'static str),
}

impl ListView {
    fn from_insights(list: &InsightList, placeholder: &'static str) -> Self {
        match list.items() {
            Some(items) => ListView::Items(items.to_vec()),
            None => ListView::Placeholder(placeholder),
        }
    }

    /// 描画する行（プレースホルダーも1行として返す）
    pub fn lines(&self) -> Vec<&str> {
        match self {
            ListView::Items(items) => items.iter().map(String::as_str).collect(),
            ListView::Placeholder(text) => vec![*text],
        }
    }
}

/// 描画済みレポート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub kind: ReportKind,
    pub description: String,
    pub skills: Vec<SkillCard>,
    pub strengths: ListView,
    pub weaknesses: ListView,
    pub recommendations: ListView,
    pub motivational_note: String,
}

/// ペイロードを表示モデルへ変換
///
/// `submitted_name` はペイロードに名前がない個人レポートの見出しに使う
pub fn render_report(payload: &ReportPayload, submitted_name: &str) -> RenderedReport {
    let description = match payload.kind {
        ReportKind::Overall => OVERALL_DESCRIPTION.to_string(),
        ReportKind::Individual => format!(
            "Individual analysis for {}",
            payload.name.as_deref().unwrap_or(submitted_name)
        ),
    };

    let skills = payload
        .ratings()
        .map(|(skill, rating)| SkillCard::new(skill, &rating))
        .collect();

    let motivational_note = payload
        .motivational_note
        .as_deref()
        .filter(|note| !note.is_empty())
        .unwrap_or(DEFAULT_MOTIVATIONAL_NOTE)
        .to_string();

    RenderedReport {
        kind: payload.kind,
        description,
        skills,
        strengths: ListView::from_insights(&payload.strengths, NO_STRENGTHS),
        weaknesses: ListView::from_insights(&payload.weaknesses, NO_WEAKNESSES),
        recommendations: ListView::from_insights(&payload.recommendations, NO_RECOMMENDATIONS),
        motivational_note,
    }
}
