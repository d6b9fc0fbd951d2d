//! Auth module
//!
//! Login and registration against the backend form endpoints. Required
//! fields are validated locally before any request; on success the view is
//! asked to navigate after a fixed delay, on any failure no navigation
//! happens. The delays are controller fields so tests can zero them.

use crate::client::ApiClient;
use crate::models::{LoginRequest, RegisterRequest};
use crate::view::{report_failure, ToastLevel, View};
use std::time::Duration;
use tracing::info;

/// Delay between the success toast and navigation after login.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Delay between the success toast and navigation after registration.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login/registration form handler
pub struct AuthController {
    client: ApiClient,
    pub login_redirect_delay: Duration,
    pub register_redirect_delay: Duration,
}

impl AuthController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            login_redirect_delay: LOGIN_REDIRECT_DELAY,
            register_redirect_delay: REGISTER_REDIRECT_DELAY,
        }
    }

    /// Same controller with zeroed redirect delays, for tests.
    pub fn without_delays(client: ApiClient) -> Self {
        Self {
            client,
            login_redirect_delay: Duration::ZERO,
            register_redirect_delay: Duration::ZERO,
        }
    }

    /// Submit the login form. Navigates to the server-supplied redirect
    /// target (or the default for the login kind) on success only.
    pub async fn login(
        &self,
        view: &mut dyn View,
        username: &str,
        password: &str,
        login_type: &str,
    ) {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            view.toast(ToastLevel::Error, "Username and password are required");
            return;
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            login_type: login_type.to_string(),
        };

        match self.client.login(&request).await {
            Ok(resp) => {
                info!("login accepted for {}", username);
                view.toast(ToastLevel::Success, "Login successful, redirecting...");
                tokio::time::sleep(self.login_redirect_delay).await;
                let target = resp
                    .redirect_to
                    .unwrap_or_else(|| default_redirect(login_type).to_string());
                view.navigate(&target);
            }
            Err(err) => report_failure(view, "login", &err),
        }
    }

    /// Submit the registration form, then navigate to the login page.
    pub async fn register(
        &self,
        view: &mut dyn View,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            view.toast(ToastLevel::Error, "Username and password are required");
            return;
        }
        if password != confirm_password {
            view.toast(ToastLevel::Error, "Passwords do not match");
            return;
        }
        if password.len() < MIN_PASSWORD_LEN {
            view.toast(ToastLevel::Error, "Password must be at least 6 characters");
            return;
        }

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        match self.client.register(&request).await {
            Ok(_) => {
                info!("registered account {}", username);
                view.toast(
                    ToastLevel::Success,
                    "Registration successful, redirecting to login...",
                );
                tokio::time::sleep(self.register_redirect_delay).await;
                view.navigate("/login");
            }
            Err(err) => report_failure(view, "register", &err),
        }
    }
}

/// Fallback navigation target when the server supplies none.
fn default_redirect(login_type: &str) -> &'static str {
    if login_type == "admin" {
        "/admin"
    } else {
        "/dashboard"
    }
}
