//! Intern Report Common Library
//!
//! CLIとWeb(WASM)で共有される状態・名前フィルタ・レポート描画

pub mod error;
pub mod file;
pub mod names;
pub mod report;
pub mod render;
pub mod html;
pub mod state;

pub use error::{Error, Result};
pub use file::{FileHandle, LocalFile, ACCEPTED_MEDIA_TYPES, FILE_INPUT_ACCEPT, is_accepted_media_type, media_type_for_path};
pub use names::{
    CandidateNames, NamesResponse, SelectedName, Suggestion, SuggestionKind, SuggestionList,
    Suggestions, filter_names, BLUR_CLOSE_DELAY_MS, NO_MATCHES_MESSAGE, SENTINEL, SENTINEL_LABEL,
};
pub use report::{backend_error_message, ErrorResponse, InsightList, Rating, ReportKind, ReportPayload, GENERIC_FAILURE};
pub use render::{render_report, ListView, RenderedReport, SkillCard, PROGRESS_ANIMATION_DELAY_MS};
pub use html::{to_html, to_text};
#[cfg(feature = "document")]
pub use html::to_document;
pub use state::{AppState, FetchTicket, NameStatus, Submission};
