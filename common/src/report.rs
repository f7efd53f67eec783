//! レポートペイロードの型定義
//!
//! `/report-upload` が返すJSON:
//! ```json
//! {
//!   "type": "overall",
//!   "name": "Alice",
//!   "evaluated": { "Fluency Avg": "Good" },
//!   "strengths": ["..."],
//!   "weaknesses": ["..."],
//!   "recommendations": ["..."],
//!   "motivational_note": "..."
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// レポート種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// 全インターンの集計
    Overall,
    /// "overall" 以外はすべて個人レポート扱い
    #[default]
    Individual,
}

/// `type` はAI出力で上書きされることがあるため、文字列以外（null・数値など）も個人扱いで受ける
impl<'de> Deserialize<'de> for ReportKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) if s == "overall" => ReportKind::Overall,
            _ => ReportKind::Individual,
        })
    }
}

/// スキル評価
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Average,
    BelowAverage,
    /// 未知の評価（表示はそのまま、割合は50%）
    Other(String),
}

impl Rating {
    pub fn parse(text: &str) -> Self {
        match text {
            "Excellent" => Rating::Excellent,
            "Good" => Rating::Good,
            "Average" => Rating::Average,
            "Below Average" => Rating::BelowAverage,
            other => Rating::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Average => "Average",
            Rating::BelowAverage => "Below Average",
            Rating::Other(text) => text,
        }
    }

    /// プログレスバーの塗り割合
    pub fn percentage(&self) -> u8 {
        match self {
            Rating::Excellent => 95,
            Rating::Good => 75,
            Rating::Average => 55,
            Rating::BelowAverage => 30,
            Rating::Other(_) => 50,
        }
    }

    /// 評価バッジのCSSクラス
    pub fn css_class(&self) -> &'static str {
        match self {
            Rating::Excellent => "rating-excellent",
            Rating::Good => "rating-good",
            Rating::BelowAverage => "rating-below",
            Rating::Average | Rating::Other(_) => "rating-average",
        }
    }
}

/// strengths / weaknesses / recommendations
///
/// 配列なら件数0でも `Items`、欠落・配列以外は `Missing`（プレースホルダー表示）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InsightList {
    Items(Vec<String>),
    #[default]
    Missing,
}

impl InsightList {
    pub fn items(&self) -> Option<&[String]> {
        match self {
            InsightList::Items(items) => Some(items),
            InsightList::Missing => None,
        }
    }
}

impl From<Vec<String>> for InsightList {
    fn from(items: Vec<String>) -> Self {
        InsightList::Items(items)
    }
}

impl<'de> Deserialize<'de> for InsightList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(entries) => InsightList::Items(entries.iter().map(entry_text).collect()),
            _ => InsightList::Missing,
        })
    }
}

impl Serialize for InsightList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InsightList::Items(items) => items.serialize(serializer),
            InsightList::Missing => serializer.serialize_none(),
        }
    }
}

/// リスト要素をテキスト化する。
/// AIが `{ "title": ..., "suggestion": ... }` 形式で返すことがあるため、その場合はフィールドを優先。
fn entry_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => ["title", "suggestion"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// null・空文字以外の値を文字列として受け取る
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// レポートペイロード
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPayload {
    #[serde(rename = "type", default)]
    pub kind: ReportKind,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// スキル名 → 評価（受信順を保持）
    #[serde(default)]
    pub evaluated: Map<String, Value>,

    #[serde(default)]
    pub strengths: InsightList,

    #[serde(default)]
    pub weaknesses: InsightList,

    #[serde(default)]
    pub recommendations: InsightList,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub motivational_note: Option<String>,
}

impl ReportPayload {
    /// 評価を受信順に列挙
    pub fn ratings(&self) -> impl Iterator<Item = (&str, Rating)> {
        self.evaluated.iter().map(|(skill, value)| {
            let rating = match value {
                Value::String(s) => Rating::parse(s),
                other => Rating::Other(other.to_string()),
            };
            (skill.as_str(), rating)
        })
    }
}

/// エラーレスポンス `{ "detail": "..." }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub detail: Option<String>,
}

/// エラー本文が読めないときの表示
pub const GENERIC_FAILURE: &str = "Failed to generate report";

/// 失敗レスポンスの本文からユーザー向けメッセージを取り出す（`detail` をそのまま使う）
pub fn backend_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.detail)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_table() {
        let cases = [
            ("Excellent", 95, "rating-excellent"),
            ("Good", 75, "rating-good"),
            ("Average", 55, "rating-average"),
            ("Below Average", 30, "rating-below"),
            ("Outstanding", 50, "rating-average"),
        ];
        for (text, percentage, class) in cases {
            let rating = Rating::parse(text);
            assert_eq!(rating.percentage(), percentage, "{}", text);
            assert_eq!(rating.css_class(), class, "{}", text);
            assert_eq!(rating.as_str(), text);
        }
    }

    #[test]
    fn test_kind_parsing() {
        let overall: ReportPayload = serde_json::from_str(r#"{"type": "overall"}"#).unwrap();
        assert_eq!(overall.kind, ReportKind::Overall);

        let individual: ReportPayload = serde_json::from_str(r#"{"type": "individual"}"#).unwrap();
        assert_eq!(individual.kind, ReportKind::Individual);

        let unknown: ReportPayload = serde_json::from_str(r#"{"type": "cohort"}"#).unwrap();
        assert_eq!(unknown.kind, ReportKind::Individual);

        let missing: ReportPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.kind, ReportKind::Individual);
    }

    #[test]
    fn test_non_string_kind_is_individual() {
        for body in [
            r#"{"type": null, "evaluated": {"Fluency Avg": "Good"}}"#,
            r#"{"type": 5, "evaluated": {"Fluency Avg": "Good"}}"#,
            r#"{"type": {"kind": "overall"}, "evaluated": {"Fluency Avg": "Good"}}"#,
        ] {
            let payload: ReportPayload = serde_json::from_str(body).unwrap();
            assert_eq!(payload.kind, ReportKind::Individual, "{}", body);
            assert_eq!(payload.evaluated.len(), 1);
        }
    }

    #[test]
    fn test_evaluated_keeps_payload_order() {
        let payload: ReportPayload = serde_json::from_str(
            r#"{"evaluated": {"Vocabulary Avg": "Good", "Grammar Avg": "Average", "Body Language Avg": "Excellent"}}"#,
        )
        .unwrap();
        let skills: Vec<&str> = payload.ratings().map(|(s, _)| s).collect();
        assert_eq!(skills, vec!["Vocabulary Avg", "Grammar Avg", "Body Language Avg"]);
    }

    #[test]
    fn test_empty_list_is_present_missing_is_missing() {
        let payload: ReportPayload =
            serde_json::from_str(r#"{"strengths": [], "weaknesses": "none"}"#).unwrap();
        assert_eq!(payload.strengths, InsightList::Items(vec![]));
        assert_eq!(payload.weaknesses, InsightList::Missing);
        assert_eq!(payload.recommendations, InsightList::Missing);
    }

    #[test]
    fn test_object_entries_use_title_or_suggestion() {
        let payload: ReportPayload = serde_json::from_str(
            r#"{"recommendations": [{"title": "Read daily"}, {"suggestion": "Record yourself"}, {"other": 1}, 3]}"#,
        )
        .unwrap();
        assert_eq!(
            payload.recommendations.items().unwrap(),
            &["Read daily", "Record yourself", r#"{"other":1}"#, "3"]
        );
    }

    #[test]
    fn test_lenient_note_and_name() {
        let payload: ReportPayload =
            serde_json::from_str(r#"{"name": 42, "motivational_note": ""}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("42"));
        assert_eq!(payload.motivational_note, None);
    }

    #[test]
    fn test_error_response_detail() {
        let err: ErrorResponse = serde_json::from_str(r#"{"detail": "Intern not found"}"#).unwrap();
        assert_eq!(err.detail.as_deref(), Some("Intern not found"));

        let err: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(err.detail, None);
    }

    #[test]
    fn test_backend_error_message() {
        assert_eq!(
            backend_error_message(r#"{"detail": "Error reading Excel file: bad zip"}"#),
            "Error reading Excel file: bad zip"
        );
        assert_eq!(backend_error_message("{}"), GENERIC_FAILURE);
        assert_eq!(backend_error_message("<html>502</html>"), GENERIC_FAILURE);
    }
}
