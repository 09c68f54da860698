use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub student_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub api_key: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub student_id: String,
    pub name: String,
    #[serde(default)]
    pub daily_credits: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Closed set of note origins. Costs, icons and colors are static data keyed
/// on this tag and resolved at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    #[default]
    Audio,
    Document,
}

impl NoteKind {
    /// Credits the server deducts for one conversion. Display only; the
    /// server remains authoritative and rejects on its own.
    pub fn credit_cost(self) -> i32 {
        match self {
            NoteKind::Audio => 10,
            NoteKind::Document => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteKind::Audio => "audio",
            NoteKind::Document => "document",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: String,
    pub title: String,
    pub original_transcription: String,
    pub summary: String,
    #[serde(default)]
    pub media_duration_seconds: f64,
    #[serde(default)]
    pub note_type: NoteKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotePdfResponse {
    pub pdf_data: String,
    pub filename: String,
    #[serde(default = "default_pdf_content_type")]
    pub content_type: String,
}

fn default_pdf_content_type() -> String {
    "application/pdf".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body shape of backend failures and of a few admin confirmations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreateUserRequest {
    pub name: String,
    pub student_id: String,
}

use leptos::*;

/// Fixed message used whenever the transport layer fails.
pub const SERVER_UNREACHABLE: &str =
    "서버에 연결할 수 없습니다. 백엔드 서버가 실행 중인지 확인해주세요.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// Local pre-flight rejection; never reached the network.
    Validation,
    /// The operation needs an active session and none exists.
    AuthRequired,
    /// Transport failure before any HTTP status was received.
    Network,
    /// Non-2xx response; carries the HTTP status.
    Backend(u16),
    /// A user-record fetch failed and the session was force-closed.
    SessionInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub kind: ApiErrorKind,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.message
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.message.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::Validation,
        }
    }

    pub fn auth_required(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::AuthRequired,
        }
    }

    pub fn network() -> Self {
        Self {
            message: SERVER_UNREACHABLE.to_string(),
            kind: ApiErrorKind::Network,
        }
    }

    pub fn backend(status: u16, msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::Backend(status),
        }
    }

    /// Non-2xx without a usable `detail` field.
    pub fn backend_fallback(status: u16) -> Self {
        Self::backend(
            status,
            format!("HTTP {}: 요청 처리 중 오류가 발생했습니다.", status),
        )
    }

    pub fn session_invalid(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::SessionInvalid,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Backend(status) => Some(status),
            _ => None,
        }
    }
}
