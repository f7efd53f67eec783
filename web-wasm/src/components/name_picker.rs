//! インターン名オートコンプリート
//!
//! 候補の絞り込みと開閉状態は AppState 側が持ち、ここでは描画とイベント転送のみ行う

use intern_report_common::{Suggestion, SuggestionKind, Suggestions, NO_MATCHES_MESSAGE};
use intern_report_common::names::SENTINEL_DETAIL;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

const PLACEHOLDER_ENABLED: &str = "Type to search...";
const PLACEHOLDER_DISABLED: &str = "Type to search or select 'overall'";

#[component]
pub fn NamePicker<FF, FI, FB, FS>(
    enabled: Signal<bool>,
    query: Signal<String>,
    is_open: Signal<bool>,
    suggestions: Signal<Suggestions>,
    on_focus: FF,
    on_input: FI,
    on_blur: FB,
    on_select: FS,
) -> impl IntoView
where
    FF: Fn(()) + 'static + Clone + Send + Sync,
    FI: Fn(String) + 'static + Clone + Send + Sync,
    FB: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(Suggestion) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="form-group autocomplete-container">
            <label for="internName">"Intern"</label>
            <input
                type="text"
                id="internName"
                autocomplete="off"
                disabled=move || !enabled.get()
                placeholder=move || if enabled.get() { PLACEHOLDER_ENABLED } else { PLACEHOLDER_DISABLED }
                prop:value=move || query.get()
                on:focus={
                    let on_focus = on_focus.clone();
                    move |ev: web_sys::FocusEvent| {
                        on_focus(());
                        event_target::<HtmlInputElement>(&ev).select();
                    }
                }
                on:blur={
                    let on_blur = on_blur.clone();
                    move |_| on_blur(())
                }
                on:input={
                    let on_input = on_input.clone();
                    move |ev| on_input(event_target_value(&ev))
                }
            />

            <div
                class=move || if is_open.get() { "autocomplete-dropdown active" } else { "autocomplete-dropdown" }
                id="autocompleteDropdown"
            >
                {move || {
                    let current = suggestions.get();
                    let no_matches = current.no_matches;
                    let items = current
                        .entries
                        .into_iter()
                        .map(|suggestion| {
                            let on_select = on_select.clone();
                            view! { <SuggestionItem suggestion=suggestion on_select=on_select /> }
                        })
                        .collect_view();

                    view! {
                        {items}
                        {no_matches.then(|| view! {
                            <div class="autocomplete-no-results">{NO_MATCHES_MESSAGE}</div>
                        })}
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn SuggestionItem<FS>(suggestion: Suggestion, on_select: FS) -> impl IntoView
where
    FS: Fn(Suggestion) + 'static + Clone + Send + Sync,
{
    let icon = format!("fas {}", suggestion.kind.icon());
    let value = suggestion.value.clone();

    let label = match suggestion.kind {
        SuggestionKind::Aggregate => view! {
            <span><strong>{suggestion.label.clone()}</strong>{format!(" - {}", SENTINEL_DETAIL)}</span>
        }
        .into_any(),
        SuggestionKind::Individual => view! { <span>{suggestion.label.clone()}</span> }.into_any(),
    };

    view! {
        <div
            class="autocomplete-item"
            data-value=value
            // blurより先に届くmousedownで選択する
            on:mousedown=move |_| on_select(suggestion.clone())
        >
            <i class=icon></i>
            {label}
        </div>
    }
}
