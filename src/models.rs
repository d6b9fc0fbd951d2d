//! View-model types for backend JSON
//!
//! Transient structs mirroring the wire contract of the captcha backend.
//! Nothing here is owned or persisted client-side; every value lives only as
//! long as the render it feeds. Unknown fields are ignored, and failure
//! bodies may carry either `{success: false, message}` or a bare `{error}`,
//! so every envelope defaults `success` to false and keeps both slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Session state
// ============================================================================

/// The most recently generated captcha, held in page memory pending
/// recognition or manual validation. Replaced wholesale on each generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaSlot {
    /// Encoded image payload (`data:image/png;base64,...`)
    pub image: String,
    /// Ground-truth text as reported by the backend
    pub text: String,
}

// ============================================================================
// Auth
// ============================================================================

/// `POST /login` body
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub login_type: String,
}

/// `POST /login` response
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub redirect_to: Option<String>,
}

/// `POST /register` body
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `POST /register` response
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// `POST /api/generate` body
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub difficulty: String,
    pub length: u32,
}

/// `POST /api/generate` response
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub text: String,
}

/// `POST /api/recognize` body
#[derive(Debug, Serialize)]
pub struct RecognizeRequest {
    pub method: String,
    pub image: String,
}

/// `POST /api/recognize` response
#[derive(Debug, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub correct: String,
    #[serde(rename = "match", default)]
    pub matched: bool,
}

/// `POST /api/validate` body
#[derive(Debug, Serialize)]
pub struct ValidateRequest {
    pub input: String,
}

/// `POST /api/validate` response. `success` doubles as the match flag here:
/// the backend answers 200 with `success: false` on a wrong guess.
#[derive(Debug, Deserialize)]
pub struct ValidateResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// `POST /api/batch_generate` body
#[derive(Debug, Serialize)]
pub struct BatchGenerateRequest {
    pub count: u32,
    pub length: u32,
    pub difficulty: String,
}

/// `POST /api/batch_generate` response
#[derive(Debug, Deserialize)]
pub struct BatchGenerateResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub folder: String,
}

/// One recognition attempt, as stored by the backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub captcha: String,
    #[serde(default)]
    pub recognized: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub success: bool,
}

/// `GET /api/history` response
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

/// Per-label breakdown inside a statistics snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct Breakdown {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub accuracy: f64,
}

/// Aggregate recognition statistics, recomputed server-side on each fetch.
/// BTreeMap keeps breakdown sections in a stable render order.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsSnapshot {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub by_difficulty: BTreeMap<String, Breakdown>,
    #[serde(default)]
    pub by_method: BTreeMap<String, Breakdown>,
}

/// `GET /api/statistics` response
#[derive(Debug, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub statistics: Option<StatisticsSnapshot>,
}

/// `POST /api/train` body
#[derive(Debug, Serialize)]
pub struct TrainRequest {
    pub dataset_path: String,
    pub model_type: String,
}

/// `POST /api/train` response
#[derive(Debug, Deserialize)]
pub struct TrainResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub accuracy: f64,
}

/// `POST /api/clear_history` response
#[derive(Debug, Deserialize)]
pub struct ClearHistoryResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

// ============================================================================
// Admin
// ============================================================================

/// One backend account, password never included
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub role: String,
}

/// `GET /api/admin/users` response
#[derive(Debug, Deserialize)]
pub struct UserListResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// `PUT /api/admin/users/{username}` body. Password omitted means unchanged.
#[derive(Debug, Serialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Shared response for user update/delete and cleanup-style mutations
#[derive(Debug, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// History record with the owning account attached (admin view)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminHistoryRecord {
    #[serde(default)]
    pub user: String,
    #[serde(flatten)]
    pub record: HistoryRecord,
}

/// `GET /api/admin/history` response; `users` feeds the filter control
#[derive(Debug, Deserialize)]
pub struct AdminHistoryResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub history: Vec<AdminHistoryRecord>,
    #[serde(default)]
    pub users: Vec<String>,
}

/// Account totals inside the admin statistics snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct UserTotals {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub admins: u64,
    #[serde(default)]
    pub regular: u64,
}

/// Recognition totals inside the admin statistics snapshot.
/// `accuracy` is already a percentage here, unlike the dashboard ratio.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordTotals {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub accuracy: f64,
}

/// File counts and sizes for the two asset categories
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSnapshot {
    #[serde(default)]
    pub captcha_files: u64,
    #[serde(default)]
    pub captcha_size_mb: f64,
    #[serde(default)]
    pub model_files: u64,
    #[serde(default)]
    pub model_size_mb: f64,
}

/// One activity/log line
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub success: bool,
}

/// System-wide statistics snapshot for the admin view
#[derive(Debug, Clone, Deserialize)]
pub struct AdminStatistics {
    pub users: UserTotals,
    pub records: RecordTotals,
    pub storage: StorageSnapshot,
    #[serde(default)]
    pub recent_activity: Vec<LogRecord>,
}

/// `GET /api/admin/statistics` response
#[derive(Debug, Deserialize)]
pub struct AdminStatisticsResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub statistics: Option<AdminStatistics>,
}

/// `GET /api/admin/logs` response
#[derive(Debug, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub logs: Vec<LogRecord>,
}

/// Data categories the cleanup endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupKind {
    Captchas,
    History,
    Models,
    All,
}

impl CleanupKind {
    /// Human label used in the confirmation prompt
    pub fn label(&self) -> &'static str {
        match self {
            CleanupKind::Captchas => "captcha files",
            CleanupKind::History => "history records",
            CleanupKind::Models => "model files",
            CleanupKind::All => "all data",
        }
    }

    /// Wire tag for the cleanup request body
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanupKind::Captchas => "captchas",
            CleanupKind::History => "history",
            CleanupKind::Models => "models",
            CleanupKind::All => "all",
        }
    }
}

/// `POST /api/admin/cleanup` body
#[derive(Debug, Serialize)]
pub struct CleanupRequest {
    #[serde(rename = "type")]
    pub kind: CleanupKind,
}

/// `POST /api/admin/cleanup` response
#[derive(Debug, Deserialize)]
pub struct CleanupResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub cleaned: Vec<String>,
}
