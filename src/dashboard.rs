//! Dashboard module
//!
//! Captcha generation, recognition, manual validation, batch generation,
//! history/statistics display, model training and history clearing. The one
//! piece of session state — the current captcha — lives in an explicit
//! [`DashboardState`] rather than an ambient global, and every operation is
//! a single gated async call: acquire the in-flight gate, toggle the loading
//! indicator around one request, render the outcome.

use crate::client::ApiClient;
use crate::gate::{Gate, GateGuard, BUSY_MESSAGE};
use crate::models::CaptchaSlot;
use crate::render::{history_table, statistics_report, Tone};
use crate::view::{report_failure, ToastLevel, View, UNRECOGNIZED};
use tracing::info;

/// Inclusive bounds accepted for batch generation.
pub const BATCH_COUNT_MIN: u32 = 1;
pub const BATCH_COUNT_MAX: u32 = 100;

/// Toast for recognition/validation attempts with no captcha on screen.
pub const GENERATE_FIRST_MESSAGE: &str = "Generate a captcha first";

/// Session state for the dashboard page: the most recently generated
/// captcha, if any. Replaced wholesale on each generate, never merged.
#[derive(Default)]
pub struct DashboardState {
    captcha: Option<CaptchaSlot>,
}

impl DashboardState {
    pub fn captcha(&self) -> Option<&CaptchaSlot> {
        self.captcha.as_ref()
    }
}

/// Dashboard page handler
pub struct DashboardController {
    client: ApiClient,
    gate: Gate,
    state: DashboardState,
}

impl DashboardController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            gate: Gate::new(),
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn try_gate(&self, view: &mut dyn View) -> Option<GateGuard> {
        match self.gate.acquire() {
            Some(guard) => Some(guard),
            None => {
                view.toast(ToastLevel::Error, BUSY_MESSAGE);
                None
            }
        }
    }

    /// Generate a fresh captcha. On success the session slot is replaced in
    /// full and the result display resets to the unrecognized state; on
    /// failure the previous captcha stays usable.
    pub async fn generate(&mut self, view: &mut dyn View, difficulty: &str, length: u32) {
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.generate(difficulty, length).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                info!("generated {} captcha of length {}", difficulty, length);
                view.show_captcha(&resp.image, &resp.text);
                view.set_result(UNRECOGNIZED, Tone::Default);
                self.state.captcha = Some(CaptchaSlot {
                    image: resp.image,
                    text: resp.text,
                });
            }
            Err(err) => report_failure(view, "generate", &err),
        }
    }

    /// Run a recognizer against the current captcha.
    pub async fn recognize(&self, view: &mut dyn View, method: &str) {
        let Some(slot) = self.state.captcha() else {
            view.toast(ToastLevel::Error, GENERATE_FIRST_MESSAGE);
            return;
        };
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.recognize(method, &slot.image).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                if resp.matched {
                    view.set_result(&resp.result, Tone::Success);
                    view.toast(
                        ToastLevel::Success,
                        &format!("Recognition correct! Result: {}", resp.result),
                    );
                } else {
                    view.set_result(&resp.result, Tone::Danger);
                    view.toast(
                        ToastLevel::Error,
                        &format!(
                            "Recognition wrong. Result: {}, correct answer: {}",
                            resp.result, resp.correct
                        ),
                    );
                }
            }
            Err(err) => report_failure(view, "recognize", &err),
        }
    }

    /// Check a manually typed guess against the current captcha. The result
    /// display shows the guess either way; tone follows the server verdict.
    pub async fn validate(&self, view: &mut dyn View, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            view.toast(ToastLevel::Error, "Enter the captcha text");
            return;
        }
        if self.state.captcha().is_none() {
            view.toast(ToastLevel::Error, GENERATE_FIRST_MESSAGE);
            return;
        }
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.validate(input).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                let (tone, level, fallback) = if resp.success {
                    (Tone::Success, ToastLevel::Success, "Validation passed")
                } else {
                    (Tone::Danger, ToastLevel::Error, "Validation failed")
                };
                view.set_result(input, tone);
                let message = resp.message.unwrap_or_else(|| fallback.to_string());
                view.toast(level, &message);
            }
            Err(err) => report_failure(view, "validate", &err),
        }
    }

    /// Generate a batch of captchas server-side. Count is bounds-checked
    /// locally before any request goes out.
    pub async fn batch_generate(
        &self,
        view: &mut dyn View,
        count: u32,
        length: u32,
        difficulty: &str,
    ) {
        if !(BATCH_COUNT_MIN..=BATCH_COUNT_MAX).contains(&count) {
            view.toast(ToastLevel::Error, "Batch count must be between 1 and 100");
            return;
        }
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.batch_generate(count, length, difficulty).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                info!("batch generated {} captchas into {}", resp.count, resp.folder);
                view.toast(
                    ToastLevel::Success,
                    &format!("Generated {} captchas, saved to {}", resp.count, resp.folder),
                );
            }
            Err(err) => report_failure(view, "batch_generate", &err),
        }
    }

    /// Fetch and render this user's history, newest first.
    pub async fn show_history(&self, view: &mut dyn View) {
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.history().await;
        view.loading(false);

        match result {
            Ok(records) => view.show_table(&history_table(&records)),
            Err(err) => report_failure(view, "history", &err),
        }
    }

    /// Fetch and render aggregate statistics with both breakdowns.
    pub async fn show_statistics(&self, view: &mut dyn View) {
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.statistics().await;
        view.loading(false);

        match result {
            Ok(stats) => view.show_report(&statistics_report(&stats)),
            Err(err) => report_failure(view, "statistics", &err),
        }
    }

    /// Trigger model training on the backend and report the accuracy.
    pub async fn train(&self, view: &mut dyn View, dataset_path: &str, model_type: &str) {
        let dataset_path = dataset_path.trim();
        if dataset_path.is_empty() {
            view.toast(ToastLevel::Error, "Enter a dataset path");
            return;
        }
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.train(dataset_path, model_type).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                info!("training finished with accuracy {:.4}", resp.accuracy);
                view.toast(
                    ToastLevel::Success,
                    &format!("Training complete! Accuracy: {:.2}%", resp.accuracy * 100.0),
                );
            }
            Err(err) => report_failure(view, "train", &err),
        }
    }

    /// Clear this user's history after explicit confirmation.
    pub async fn clear_history(&self, view: &mut dyn View) {
        if !view.confirm("Clear all history records? This cannot be undone.") {
            return;
        }
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.clear_history().await;
        view.loading(false);

        match result {
            Ok(resp) => {
                let message = resp.message.unwrap_or_else(|| "History cleared".to_string());
                view.toast(ToastLevel::Success, &message);
            }
            Err(err) => report_failure(view, "clear_history", &err),
        }
    }
}
