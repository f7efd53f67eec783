//! レポートサーバー連携
//!
//! - `/get-intern-names`: ファイルからインターン名一覧を取得
//! - `/report-upload`: ファイルと名前を送ってレポートを生成
//!
//! どちらも同一オリジンへの multipart POST

use gloo::console;
use intern_report_common::{backend_error_message, NamesResponse, ReportPayload};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

pub const NAMES_URL: &str = "/get-intern-names";
pub const REPORT_URL: &str = "/report-upload";

/// JS例外からメッセージを取り出す
fn js_error_message(err: JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// multipart POST（共通処理）
async fn post_form(url: &str, form: &FormData) -> Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

fn file_form(file: &File) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename("file", file, &file.name())?;
    Ok(form)
}

/// インターン名一覧を取得
///
/// 失敗時の縮退（overallのみ）は呼び出し側の `AppState::apply_names` が行う
pub async fn fetch_names(file: &File) -> Result<Vec<String>, JsValue> {
    let started = js_sys::Date::now();
    let form = file_form(file)?;
    let resp = post_form(NAMES_URL, &form).await?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "Failed to get names, status: {}",
            resp.status()
        )));
    }

    let json = JsFuture::from(resp.json()?).await?;
    let data: NamesResponse = serde_wasm_bindgen::from_value(json)?;

    console::log!(format!(
        "Intern names received: {} ({:.0}ms)",
        data.names.len(),
        js_sys::Date::now() - started
    ));
    Ok(data.names)
}

/// レポート生成
///
/// 失敗時はユーザーに表示するメッセージ（バックエンドの `detail` またはJS例外のメッセージ）を返す
pub async fn upload_report(file: &File, name: &str) -> Result<ReportPayload, String> {
    let form = file_form(file).map_err(js_error_message)?;
    form.append_with_str("name", name).map_err(js_error_message)?;

    let resp = post_form(REPORT_URL, &form).await.map_err(js_error_message)?;
    let text_promise = resp.text().map_err(js_error_message)?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(js_error_message)?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(backend_error_message(&body));
    }

    serde_json::from_str(&body).map_err(|e| e.to_string())
}
