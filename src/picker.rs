//! 対話式インターン選択
//!
//! 検索文字列を入力 → 絞り込んだ候補から選ぶ、を決まるまで繰り返す

use crate::error::Result;
use dialoguer::{Input, Select};
use intern_report_common::names::SENTINEL_DETAIL;
use intern_report_common::{AppState, FileHandle, Suggestion, SuggestionKind, Suggestions, NO_MATCHES_MESSAGE};

/// 候補一覧の末尾に付ける「検索し直す」項目
const SEARCH_AGAIN: &str = "(search again)";

/// 選択肢の表示文字列
pub fn item_label(suggestion: &Suggestion) -> String {
    match suggestion.kind {
        SuggestionKind::Aggregate => format!("{} - {}", suggestion.label, SENTINEL_DETAIL),
        SuggestionKind::Individual => suggestion.label.clone(),
    }
}

pub fn item_labels(suggestions: &Suggestions) -> Vec<String> {
    suggestions
        .entries
        .iter()
        .map(item_label)
        .chain(std::iter::once(SEARCH_AGAIN.to_string()))
        .collect()
}

/// 対話でインターンを選び、状態に反映する
pub fn pick_name<F: FileHandle>(state: &mut AppState<F>) -> Result<()> {
    if !state.name_input_enabled() {
        println!("  候補がないため全体レポートを生成します");
        return Ok(());
    }

    println!(
        "📋 {}名のインターンが見つかりました（空Enterで全件表示）",
        state.candidates().individual_count()
    );

    loop {
        let query: String = Input::new()
            .with_prompt("Intern")
            .allow_empty(true)
            .interact_text()?;

        let suggestions = state.on_query_input(query.trim());
        if suggestions.no_matches {
            println!("  {}", NO_MATCHES_MESSAGE);
        }

        let labels = item_labels(&suggestions);
        let index = Select::new()
            .with_prompt("Select")
            .items(&labels)
            .default(0)
            .interact()?;

        match suggestions.entries.get(index) {
            Some(suggestion) => {
                state.select_name(suggestion.value.clone(), suggestion.label.clone());
                println!("  → {}\n", suggestion.display_text());
                return Ok(());
            }
            // 「検索し直す」
            None => continue,
        }
    }
}
