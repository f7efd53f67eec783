//! レポート生成ボタン

use leptos::prelude::*;

#[component]
pub fn GenerateButton(
    enabled: Signal<bool>,
    is_loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            type="submit"
            class="btn btn-primary generate-btn"
            id="generateBtn"
            disabled=move || !enabled.get()
        >
            <Show
                when=move || is_loading.get()
                fallback=|| view! {
                    <span class="btn-text">
                        <i class="fas fa-magic"></i>
                        " Generate Report"
                    </span>
                }
            >
                <span class="btn-loader">
                    <i class="fas fa-spinner fa-spin"></i>
                    " Generating..."
                </span>
            </Show>
        </button>
    }
}
