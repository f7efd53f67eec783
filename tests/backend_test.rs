//! バックエンド連携テスト
//!
//! tiny_http のモックサーバーを立て、セッション全体の流れとリクエスト内容を検証

use intern_report::client::{ReportClient, NAMES_PATH, REPORT_PATH};
use intern_report::error::ReportError;
use intern_report::session::Session;
use intern_report_common::render::{DEFAULT_MOTIVATIONAL_NOTE, NO_RECOMMENDATIONS, NO_WEAKNESSES, OVERALL_DESCRIPTION};
use intern_report_common::{ListView, NameStatus, SENTINEL};
use std::collections::HashMap;
use std::io::Read;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tiny_http::{Header, Response, Server};

/// 受信したリクエスト
#[derive(Debug, Clone)]
struct Recorded {
    url: String,
    body: String,
}

struct MockBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// パスごとに (ステータス, 本文) を返すサーバーを起動
    fn start(routes: &[(&'static str, u16, &str)]) -> Self {
        let server = Server::http("127.0.0.1:0").expect("Failed to start mock server");
        let addr = server.server_addr().to_ip().expect("not an IP listener");
        let routes: HashMap<&'static str, (u16, String)> = routes
            .iter()
            .map(|(path, status, body)| (*path, (*status, body.to_string())))
            .collect();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = Vec::new();
                let _ = request.as_reader().read_to_end(&mut body);
                recorded.lock().unwrap().push(Recorded {
                    url: request.url().to_string(),
                    body: String::from_utf8_lossy(&body).to_string(),
                });

                let response = match routes.get(request.url()) {
                    Some((status, body)) => Response::from_string(body.clone())
                        .with_status_code(*status)
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                        ),
                    None => Response::from_string("Not found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    fn session(&self) -> Session {
        Session::new(ReportClient::new(&self.base_url, None).expect("client"))
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.url == path).collect()
    }
}

fn sheet(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"PK\x03\x04 fake workbook").unwrap();
    path
}

const OVERALL_PAYLOAD: &str =
    r#"{"type":"overall","evaluated":{"Fluency Avg":"Good"},"strengths":["Clear articulation"]}"#;

/// ファイル未選択で送信してもリクエストは出ない
#[tokio::test]
async fn test_submit_without_file_makes_no_request() {
    let backend = MockBackend::start(&[(REPORT_PATH, 200, OVERALL_PAYLOAD)]);
    let mut session = backend.session();

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, ReportError::App(intern_report_common::Error::NoFileSelected)));
    assert_eq!(err.to_string(), "Please select a file first");
    assert!(backend.requests().is_empty());
    assert!(!session.state().is_submitting());
}

/// 対応外の形式は通信前に弾く
#[tokio::test]
async fn test_unsupported_file_is_rejected_before_any_request() {
    let backend = MockBackend::start(&[(NAMES_PATH, 200, r#"{"names":["Alice"]}"#)]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    let err = session.select_file(&sheet(&dir, "scores.csv")).unwrap_err();
    assert_eq!(err.to_string(), "Please upload a valid Excel file (.xlsx or .xls)");
    assert!(!session.state().has_file());
    assert!(backend.requests().is_empty());
}

/// 全体レポートの一連の流れ
#[tokio::test]
async fn test_overall_report_end_to_end() {
    let backend = MockBackend::start(&[
        (NAMES_PATH, 200, r#"{"names":["Alice","Bob"]}"#),
        (REPORT_PATH, 200, OVERALL_PAYLOAD),
    ]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    let ticket = session.select_file(&sheet(&dir, "scores.xlsx")).unwrap();
    assert_eq!(session.state().name_status(), NameStatus::Loading);
    assert!(session.load_names(ticket).await);
    assert_eq!(session.state().candidates().individual_count(), 2);
    assert_eq!(session.state().query, "Overall Report");

    session.submit().await.unwrap();
    let report = session.rendered().expect("report");

    assert_eq!(report.description, OVERALL_DESCRIPTION);
    assert_eq!(report.skills.len(), 1);
    assert_eq!(report.skills[0].label, "Fluency");
    assert_eq!(report.skills[0].percentage, 75);
    assert_eq!(report.skills[0].rating_class, "rating-good");
    assert_eq!(report.strengths, ListView::Items(vec!["Clear articulation".into()]));
    assert_eq!(report.weaknesses, ListView::Placeholder(NO_WEAKNESSES));
    assert_eq!(report.recommendations, ListView::Placeholder(NO_RECOMMENDATIONS));
    assert_eq!(report.motivational_note, DEFAULT_MOTIVATIONAL_NOTE);

    let uploads = backend.requests_to(REPORT_PATH);
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].body.contains(r#"name="file"; filename="scores.xlsx""#));
    assert!(uploads[0].body.contains(r#"name="name""#));
    assert!(uploads[0].body.contains(SENTINEL));
}

/// 個人を選ぶとその名前が送られる
#[tokio::test]
async fn test_individual_report_sends_selected_name() {
    let backend = MockBackend::start(&[
        (NAMES_PATH, 200, r#"{"names":["Alice","Bob"]}"#),
        (REPORT_PATH, 200, r#"{"type":"individual","evaluated":{"Clarity":"Excellent"},"strengths":[]}"#),
    ]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    let ticket = session.select_file(&sheet(&dir, "scores.xls")).unwrap();
    session.load_names(ticket).await;
    session.choose_name("ali").unwrap();
    session.submit().await.unwrap();

    let report = session.rendered().expect("report");
    assert_eq!(report.description, "Individual analysis for Alice");
    assert_eq!(report.strengths, ListView::Items(vec![]));

    let uploads = backend.requests_to(REPORT_PATH);
    assert!(uploads[0].body.contains("\r\n\r\nAlice\r\n"));
}

/// 名前取得に失敗しても番兵のみで続行できる
#[tokio::test]
async fn test_names_failure_falls_back_to_overall() {
    let backend = MockBackend::start(&[
        (NAMES_PATH, 500, r#"{"detail":"boom"}"#),
        (REPORT_PATH, 200, OVERALL_PAYLOAD),
    ]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    let ticket = session.select_file(&sheet(&dir, "scores.xlsx")).unwrap();
    assert!(session.load_names(ticket).await);

    assert_eq!(session.state().candidates().as_slice(), &[SENTINEL.to_string()]);
    assert!(session.state().selected().is_sentinel());
    assert_eq!(session.state().name_status(), NameStatus::Resolved);

    session.submit().await.unwrap();
    assert_eq!(backend.requests_to(REPORT_PATH).len(), 1);
}

/// 取得中にファイルが変わった場合、古い結果は反映しない
#[tokio::test]
async fn test_stale_names_are_discarded() {
    let backend = MockBackend::start(&[(NAMES_PATH, 200, r#"{"names":["Alice"]}"#)]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    let first = session.select_file(&sheet(&dir, "first.xlsx")).unwrap();
    let second = session.select_file(&sheet(&dir, "second.xlsx")).unwrap();

    assert!(!session.load_names(first).await);
    assert_eq!(session.state().name_status(), NameStatus::Loading);
    assert_eq!(session.state().candidates().individual_count(), 0);

    assert!(session.load_names(second).await);
    assert_eq!(session.state().candidates().individual_count(), 1);
}

/// バックエンドの detail をそのまま表示する
#[tokio::test]
async fn test_backend_detail_is_surfaced() {
    let backend = MockBackend::start(&[
        (NAMES_PATH, 200, r#"{"names":[]}"#),
        (REPORT_PATH, 400, r#"{"detail":"Sheet 'Scores' not found"}"#),
    ]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    let ticket = session.select_file(&sheet(&dir, "scores.xlsx")).unwrap();
    session.load_names(ticket).await;

    let err = session.submit().await.unwrap_err();
    assert_eq!(err.to_string(), "Error: Sheet 'Scores' not found");
    assert!(!session.state().is_submitting());
    assert!(session.rendered().is_none());
}

/// detail のない失敗は汎用メッセージ
#[tokio::test]
async fn test_backend_failure_without_detail() {
    let backend = MockBackend::start(&[(REPORT_PATH, 502, "<html>bad gateway</html>")]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    session.select_file(&sheet(&dir, "scores.xlsx")).unwrap();

    let err = session.submit().await.unwrap_err();
    assert_eq!(err.to_string(), "Error: Failed to generate report");
}

/// JSON出力用に応答本文をそのまま保持する
#[tokio::test]
async fn test_raw_response_keeps_unknown_fields() {
    let backend = MockBackend::start(&[(
        REPORT_PATH,
        200,
        r#"{"type":null,"evaluated":{"Fluency Avg":"Good"},"ai_text_raw":"raw AI text"}"#,
    )]);
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = backend.session();

    session.select_file(&sheet(&dir, "scores.xlsx")).unwrap();
    session.submit().await.unwrap();

    let raw = session.raw_report().expect("raw report");
    assert_eq!(raw["ai_text_raw"], "raw AI text");
    assert!(raw["type"].is_null());
    assert!(raw.get("strengths").is_none());

    // type が null でも個人レポートとして描画できる
    let report = session.rendered().expect("report");
    assert_eq!(report.description, "Individual analysis for overall");
    assert_eq!(report.skills.len(), 1);
}

/// 応答待ちのまま中断しても送信中のまま残らない
#[tokio::test]
async fn test_cancelled_submit_clears_in_flight_flag() {
    // 接続は受け付けるが応答しないサーバー
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = Session::new(ReportClient::new(&base_url, None).expect("client"));

    session.select_file(&sheet(&dir, "scores.xlsx")).unwrap();
    let outcome = tokio::time::timeout(Duration::from_millis(300), session.submit()).await;

    assert!(outcome.is_err());
    assert!(!session.state().is_submitting());
    assert!(session.state().can_submit());
    drop(listener);
}
