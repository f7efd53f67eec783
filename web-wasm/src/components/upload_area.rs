//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップ・クリック・参照ボタンでファイルを1つ選ぶ。
//! 形式チェックは呼び出し側（AppState::select_file）で行う。

use intern_report_common::file::FILE_INPUT_ACCEPT;
use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList};

fn first_file(files: Option<FileList>) -> Option<File> {
    files.and_then(|files| files.get(0))
}

#[component]
pub fn UploadArea<F, R>(
    has_file: Signal<bool>,
    file_name: Signal<String>,
    on_file: F,
    on_remove: R,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send + Sync,
    R: Fn(()) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let file_input: NodeRef<Input> = NodeRef::new();

    let open_picker = move || {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = first_file(ev.data_transfer().and_then(|dt| dt.files())) {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = {
        let on_file = on_file.clone();
        move |_: web_sys::Event| {
            let Some(input) = file_input.get() else {
                return;
            };
            if let Some(file) = first_file(input.files()) {
                on_file(file);
            }
        }
    };

    let on_remove_click = {
        let on_remove = on_remove.clone();
        move |ev: web_sys::MouseEvent| {
            // ドロップゾーンのクリック（ファイル選択）まで伝播させない
            ev.stop_propagation();
            if let Some(input) = file_input.get() {
                input.set_value("");
            }
            on_remove(());
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["drop-zone"];
                if is_dragover.get() {
                    classes.push("drag-over");
                }
                classes.join(" ")
            }
            id="dropZone"
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=move |_| open_picker()
        >
            <input
                type="file"
                id="fileInput"
                accept=FILE_INPUT_ACCEPT
                style="display: none;"
                node_ref=file_input
                on:change=on_change
                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
            />

            <Show
                when=move || has_file.get()
                fallback=move || view! {
                    <div class="drop-zone-content">
                        <i class="fas fa-file-excel upload-icon"></i>
                        <p>"Drag & drop your Excel file here"</p>
                        <p class="text-muted">"or"</p>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            id="browseBtn"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                open_picker();
                            }
                        >
                            "Browse Files"
                        </button>
                        <p class="text-muted">"Supported formats: .xlsx, .xls"</p>
                    </div>
                }
            >
                <div class="file-info" id="fileInfo">
                    <i class="fas fa-file-excel"></i>
                    <span class="file-name" id="fileName">{move || file_name.get()}</span>
                    <button
                        type="button"
                        class="remove-file-btn"
                        id="removeFileBtn"
                        on:click=on_remove_click.clone()
                    >
                        <i class="fas fa-times"></i>
                    </button>
                </div>
            </Show>
        </div>
    }
}
