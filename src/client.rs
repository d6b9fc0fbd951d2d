//! Backend API client
//!
//! One typed method per backend endpoint. The backend is a conventional
//! JSON-over-HTTP service; every response carries a `success` flag and a
//! `message`/`error` field on failure. Failure bodies arrive with non-2xx
//! status codes but are still JSON, so the client parses the body regardless
//! of status and lets the envelope decide the outcome. A body that cannot be
//! parsed at all is a transport failure.
//!
//! # Endpoints
//!
//! - `POST /login`, `POST /register` - auth
//! - `POST /api/generate|recognize|validate|batch_generate|train|clear_history`
//! - `GET  /api/history`, `GET /api/statistics`
//! - `GET/PUT/DELETE /api/admin/users[/{username}]`
//! - `GET  /api/admin/history|statistics|logs`, `POST /api/admin/cleanup`

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::*;
use base64::Engine;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Typed client for the captcha backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create from config, honoring the configured request timeout
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Ok(response.json::<T>().await?)
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PUT {}", url);
        let response = self.client.put(&url).json(body).send().await?;
        Ok(response.json::<T>().await?)
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Ok(response.json::<T>().await?)
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        let resp: LoginResponse = self.post_json("/login", req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(
                resp.message.or(resp.error),
                "Login failed",
            ))
        }
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<RegisterResponse> {
        let resp: RegisterResponse = self.post_json("/register", req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(
                resp.message.or(resp.error),
                "Registration failed",
            ))
        }
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    pub async fn generate(&self, difficulty: &str, length: u32) -> ApiResult<GenerateResponse> {
        let req = GenerateRequest {
            difficulty: difficulty.to_string(),
            length,
        };
        let resp: GenerateResponse = self.post_json("/api/generate", &req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(resp.error, "Captcha generation failed"))
        }
    }

    pub async fn recognize(&self, method: &str, image: &str) -> ApiResult<RecognizeResponse> {
        let req = RecognizeRequest {
            method: method.to_string(),
            image: image.to_string(),
        };
        let resp: RecognizeResponse = self.post_json("/api/recognize", &req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(resp.error, "Recognition failed"))
        }
    }

    /// Validate a manual guess. A wrong guess is a normal outcome
    /// (`success: false` with a message), not an error; only an `error`
    /// field marks failure here.
    pub async fn validate(&self, input: &str) -> ApiResult<ValidateResponse> {
        let req = ValidateRequest {
            input: input.to_string(),
        };
        let resp: ValidateResponse = self.post_json("/api/validate", &req).await?;
        if let Some(error) = resp.error {
            Err(ApiError::api(Some(error), "Validation failed"))
        } else {
            Ok(resp)
        }
    }

    pub async fn batch_generate(
        &self,
        count: u32,
        length: u32,
        difficulty: &str,
    ) -> ApiResult<BatchGenerateResponse> {
        let req = BatchGenerateRequest {
            count,
            length,
            difficulty: difficulty.to_string(),
        };
        let resp: BatchGenerateResponse = self.post_json("/api/batch_generate", &req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(resp.error, "Batch generation failed"))
        }
    }

    pub async fn history(&self) -> ApiResult<Vec<HistoryRecord>> {
        let resp: HistoryResponse = self.get_json("/api/history").await?;
        if resp.success {
            Ok(resp.history)
        } else {
            Err(ApiError::api(resp.error, "Failed to load history"))
        }
    }

    pub async fn statistics(&self) -> ApiResult<StatisticsSnapshot> {
        let resp: StatisticsResponse = self.get_json("/api/statistics").await?;
        match (resp.success, resp.statistics) {
            (true, Some(stats)) => Ok(stats),
            (_, _) => Err(ApiError::api(resp.error, "Failed to load statistics")),
        }
    }

    pub async fn train(&self, dataset_path: &str, model_type: &str) -> ApiResult<TrainResponse> {
        let req = TrainRequest {
            dataset_path: dataset_path.to_string(),
            model_type: model_type.to_string(),
        };
        let resp: TrainResponse = self.post_json("/api/train", &req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(resp.error, "Training failed"))
        }
    }

    pub async fn clear_history(&self) -> ApiResult<ClearHistoryResponse> {
        // Body-less POST; the backend ignores the payload entirely.
        let resp: ClearHistoryResponse = self
            .post_json("/api/clear_history", &serde_json::json!({}))
            .await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(
                resp.message.or(resp.error),
                "Failed to clear history",
            ))
        }
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    pub async fn admin_users(&self) -> ApiResult<Vec<UserRecord>> {
        let resp: UserListResponse = self.get_json("/api/admin/users").await?;
        if resp.success {
            Ok(resp.users)
        } else {
            Err(ApiError::api(resp.error, "Failed to load users"))
        }
    }

    pub async fn admin_update_user(
        &self,
        username: &str,
        req: &UpdateUserRequest,
    ) -> ApiResult<MutationResponse> {
        let path = format!("/api/admin/users/{}", username);
        let resp: MutationResponse = self.put_json(&path, req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(
                resp.message.or(resp.error),
                "Failed to update user",
            ))
        }
    }

    pub async fn admin_delete_user(&self, username: &str) -> ApiResult<MutationResponse> {
        let path = format!("/api/admin/users/{}", username);
        let resp: MutationResponse = self.delete_json(&path).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(
                resp.message.or(resp.error),
                "Failed to delete user",
            ))
        }
    }

    pub async fn admin_history(
        &self,
        username_filter: Option<&str>,
    ) -> ApiResult<AdminHistoryResponse> {
        let path = match username_filter {
            Some(name) if !name.is_empty() => format!("/api/admin/history?username={}", name),
            _ => "/api/admin/history".to_string(),
        };
        let resp: AdminHistoryResponse = self.get_json(&path).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(resp.error, "Failed to load history"))
        }
    }

    pub async fn admin_statistics(&self) -> ApiResult<AdminStatistics> {
        let resp: AdminStatisticsResponse = self.get_json("/api/admin/statistics").await?;
        match (resp.success, resp.statistics) {
            (true, Some(stats)) => Ok(stats),
            (_, _) => Err(ApiError::api(resp.error, "Failed to load statistics")),
        }
    }

    pub async fn admin_logs(&self) -> ApiResult<Vec<LogRecord>> {
        let resp: LogsResponse = self.get_json("/api/admin/logs").await?;
        if resp.success {
            Ok(resp.logs)
        } else {
            Err(ApiError::api(resp.error, "Failed to load logs"))
        }
    }

    pub async fn admin_cleanup(&self, kind: CleanupKind) -> ApiResult<CleanupResponse> {
        let req = CleanupRequest { kind };
        let resp: CleanupResponse = self.post_json("/api/admin/cleanup", &req).await?;
        if resp.success {
            Ok(resp)
        } else {
            Err(ApiError::api(
                resp.message.or(resp.error),
                "Cleanup failed",
            ))
        }
    }
}

/// Decoded byte size of a `data:*;base64,` image payload, if it is one.
pub fn image_payload_bytes(image: &str) -> Option<usize> {
    let encoded = image.split_once(";base64,")?.1;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .ok()
        .map(|bytes| bytes.len())
}
