//! メインアプリケーションコンポーネント
//!
//! AppState を1つのシグナルで保持し、各コンポーネントのイベントをここで状態更新へ振り分ける

use gloo::console;
use gloo::timers::callback::Timeout;
use intern_report_common::{
    render_report, AppState, RenderedReport, Suggestion, Suggestions, BLUR_CLOSE_DELAY_MS,
};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::api;
use crate::components::{
    generate_button::GenerateButton,
    header::Header,
    name_picker::NamePicker,
    report_view::ReportView,
    upload_area::UploadArea,
};
use crate::file::BrowserFile;

/// アプリケーション状態（web_sys::File を含むのでスレッドローカル）
pub type SharedState = RwSignal<AppState<BrowserFile>, LocalStorage>;

/// スクロール開始までの遅延
const SCROLL_DELAY_MS: u32 = 100;

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn scroll_to(id: &'static str) {
    Timeout::new(SCROLL_DELAY_MS, move || {
        if let Some(element) = document().get_element_by_id(id) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    })
    .forget();
}

/// ファイル選択 → 形式チェック → 名前取得
fn handle_file(state: SharedState, file: web_sys::File) {
    let selected = state.try_update(|s| s.select_file(BrowserFile(file.clone())));

    match selected {
        Some(Ok(ticket)) => spawn_local(async move {
            let result = api::fetch_names(&file).await;
            if let Err(err) = &result {
                console::warn!("Could not extract names, using overall only", err.clone());
            }
            let applied = state.try_update(|s| s.apply_names(ticket, result));
            if applied == Some(false) {
                console::log!("Discarded names for a file that is no longer selected");
            }
        }),
        Some(Err(err)) => alert(&err.to_string()),
        None => {}
    }
}

/// レポート生成
fn handle_submit(state: SharedState) {
    let submission = match state.try_update(|s| s.begin_submit()) {
        Some(Ok(submission)) => submission,
        Some(Err(err)) if err.is_user_facing() => {
            alert(&err.to_string());
            return;
        }
        Some(Err(err)) => {
            console::warn!(err.to_string());
            return;
        }
        None => return,
    };
    let file = state.with_untracked(|s| s.file().map(|f| f.0.clone()));

    spawn_local(async move {
        let result = match file {
            Some(file) => api::upload_report(&file, &submission.name).await,
            None => Err(intern_report_common::GENERIC_FAILURE.to_string()),
        };

        // 成否に関わらずボタンを戻す
        state.try_update(|s| s.finish_submit());

        match result {
            Ok(payload) => {
                state.try_update(|s| s.show_report(payload, submission.name));
                scroll_to("reportSection");
            }
            Err(message) => {
                console::error!("Error:", message.clone());
                alert(&intern_report_common::Error::Backend(message).to_string());
            }
        }
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state: SharedState = RwSignal::new_local(AppState::new());

    // 派生状態
    let has_file = Signal::derive(move || state.with(|s| s.has_file()));
    let file_name = Signal::derive(move || {
        state.with(|s| {
            s.file()
                .map(|f| intern_report_common::FileHandle::name(f))
                .unwrap_or_default()
        })
    });
    let name_enabled = Signal::derive(move || state.with(|s| s.name_input_enabled()));
    let query = Signal::derive(move || state.with(|s| s.query.clone()));
    let is_open = Signal::derive(move || state.with(|s| s.suggestions.is_open()));
    let suggestions: Signal<Suggestions> = Signal::derive(move || state.with(|s| s.filtered()));
    let can_submit = Signal::derive(move || state.with(|s| s.can_submit()));
    let is_loading = Signal::derive(move || state.with(|s| s.is_submitting()));
    // 入力のたびに描画し直さないよう、内容が変わったときだけ通知する
    let report: Memo<Option<RenderedReport>> = Memo::new(move |_| {
        state.with(|s| {
            s.report
                .as_ref()
                .map(|(payload, submitted_name)| render_report(payload, submitted_name))
        })
    });

    // オートコンプリート外のクリックで閉じる
    let _ = window_event_listener(leptos::ev::click, move |ev| {
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(".autocomplete-container").ok().flatten())
            .is_some();
        if !inside {
            state.try_update(|s| s.suggestions.on_click_outside());
        }
    });

    let on_file = move |file: web_sys::File| handle_file(state, file);
    let on_remove = move |_: ()| {
        state.update(|s| s.remove_file());
    };

    let on_focus = move |_: ()| {
        state.update(|s| {
            let enabled = s.name_input_enabled();
            s.suggestions.on_focus(enabled);
        });
    };
    let on_input = move |value: String| {
        state.update(|s| {
            s.on_query_input(value);
        });
    };
    let on_blur = move |_: ()| {
        Timeout::new(BLUR_CLOSE_DELAY_MS, move || {
            state.try_update(|s| s.suggestions.on_blur_elapsed());
        })
        .forget();
    };
    let on_select = move |suggestion: Suggestion| {
        state.update(|s| s.select_name(suggestion.value, suggestion.label));
    };

    let on_new_report = move |_: ()| {
        state.update(|s| s.reset());
        scroll_to("uploadSection");
    };

    view! {
        <div class="container">
            <Header />

            <section class="upload-section" id="uploadSection">
                <form
                    class="upload-card"
                    id="uploadForm"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        handle_submit(state);
                    }
                >
                    <UploadArea
                        has_file=has_file
                        file_name=file_name
                        on_file=on_file
                        on_remove=on_remove
                    />

                    <NamePicker
                        enabled=name_enabled
                        query=query
                        is_open=is_open
                        suggestions=suggestions
                        on_focus=on_focus
                        on_input=on_input
                        on_blur=on_blur
                        on_select=on_select
                    />

                    <GenerateButton enabled=can_submit is_loading=is_loading />
                </form>
            </section>

            {move || {
                report
                    .get()
                    .map(|report| view! { <ReportView report=report on_new_report=on_new_report /> })
            }}
        </div>
    }
}
