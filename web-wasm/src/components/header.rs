//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1><i class="fas fa-chart-line"></i>" Intern Communication Report"</h1>
            <p class="subtitle">"Upload the evaluation spreadsheet to generate an AI-assisted report"</p>
        </header>
    }
}
