//! Shared test support: a stubbed backend and a recording view.
//!
//! The mock backend is a real axum server on an ephemeral port; controllers
//! talk to it through the normal `ApiClient`, so every test exercises the
//! full request path. Each request is logged as `"METHOD /path"` so tests
//! can assert on call counts and ordering.

use axum::extract::{Request, State};
use axum::{Json, Router};
use captcha_console::{ApiClient, Report, Table, ToastLevel, Tone, View};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    /// `"METHOD /path?query"` in arrival order
    requests: Mutex<Vec<String>>,
    /// Stubbed bodies keyed by `"METHOD /path"` (query ignored)
    responses: Mutex<HashMap<String, Value>>,
}

/// Stubbed captcha backend
pub struct MockBackend {
    base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Bind to an ephemeral port and serve until dropped.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Stub the response body for `"METHOD /path"`. Unstubbed routes answer
    /// `{"success": true}`.
    pub fn stub(&self, route: &str, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(route.to_string(), body);
    }

    /// All requests seen so far, in order, with query strings.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    /// How many requests hit `"METHOD /path"` (query ignored).
    pub fn hits(&self, route: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| {
                let without_query = r.split('?').next().unwrap_or(r);
                without_query == route
            })
            .count()
    }

    /// Client pointed at this backend.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }
}

async fn handle(State(state): State<Arc<MockState>>, request: Request) -> Json<Value> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request
        .uri()
        .query()
        .map(|q| format!("?{}", q))
        .unwrap_or_default();

    state
        .requests
        .lock()
        .unwrap()
        .push(format!("{} {}{}", method, path, query));

    let key = format!("{} {}", method, path);
    let body = state
        .responses
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or_else(|| json!({"success": true}));
    Json(body)
}

/// View double capturing every output call.
#[derive(Default)]
pub struct RecordingView {
    pub toasts: Vec<(ToastLevel, String)>,
    pub loading_events: Vec<bool>,
    pub captchas: Vec<(String, String)>,
    pub results: Vec<(String, Tone)>,
    pub tables: Vec<Table>,
    pub reports: Vec<Report>,
    pub confirm_prompts: Vec<String>,
    pub confirm_answer: bool,
    pub navigations: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirming(answer: bool) -> Self {
        Self {
            confirm_answer: answer,
            ..Self::default()
        }
    }

    pub fn last_toast(&self) -> &(ToastLevel, String) {
        self.toasts.last().expect("no toast recorded")
    }

    pub fn last_result(&self) -> &(String, Tone) {
        self.results.last().expect("no result recorded")
    }
}

impl View for RecordingView {
    fn toast(&mut self, level: ToastLevel, message: &str) {
        self.toasts.push((level, message.to_string()));
    }

    fn loading(&mut self, visible: bool) {
        self.loading_events.push(visible);
    }

    fn show_captcha(&mut self, image: &str, text: &str) {
        self.captchas.push((image.to_string(), text.to_string()));
    }

    fn set_result(&mut self, text: &str, tone: Tone) {
        self.results.push((text.to_string(), tone));
    }

    fn show_table(&mut self, table: &Table) {
        self.tables.push(table.clone());
    }

    fn show_report(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.confirm_prompts.push(prompt.to_string());
        self.confirm_answer
    }

    fn navigate(&mut self, target: &str) {
        self.navigations.push(target.to_string());
    }
}
