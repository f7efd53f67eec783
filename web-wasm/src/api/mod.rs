//! バックエンドAPI

mod backend;

pub use backend::{fetch_names, upload_report, NAMES_URL, REPORT_URL};
