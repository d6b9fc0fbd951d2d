//! Admin module
//!
//! Table loaders for users/history/statistics/storage/logs, user CRUD
//! through a single editor model, and data cleanup. Each loader replaces its
//! entire table on every refresh. Creating a user with the admin role is a
//! two-step saga (register, then promote) because the backend has no
//! role-at-creation call; a failed promotion triggers a compensating delete
//! so no half-privileged account is left behind.

use crate::client::ApiClient;
use crate::gate::{Gate, GateGuard, BUSY_MESSAGE};
use crate::models::{CleanupKind, RegisterRequest, UpdateUserRequest};
use crate::render::{
    activity_table, admin_history_table, admin_statistics_report, can_delete, logs_table,
    storage_report, users_table,
};
use crate::view::{report_failure, ToastLevel, View};
use tracing::{error, info};

/// Which flow the user editor modal is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

/// The add/edit user form, shared by both flows. On edit, an empty password
/// means "leave unchanged".
#[derive(Debug, Clone)]
pub struct UserEditor {
    pub mode: EditorMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Admin page handler
pub struct AdminController {
    client: ApiClient,
    gate: Gate,
}

impl AdminController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            gate: Gate::new(),
        }
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

    // ------------------------------------------------------------------
    // Table loaders
    // ------------------------------------------------------------------

    /// Fetch and render the account table.
    pub async fn load_users(&self, view: &mut dyn View) {
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.admin_users().await;
        view.loading(false);

        match result {
            Ok(users) => view.show_table(&users_table(&users)),
            Err(err) => report_failure(view, "admin users", &err),
        }
    }

    /// Fetch and render all-user history, optionally filtered by account.
    /// Returns the username list the backend supplies for the filter control
    /// (empty when the fetch failed).
    pub async fn load_history(
        &self,
        view: &mut dyn View,
        username_filter: Option<&str>,
    ) -> Vec<String> {
        let Some(_guard) = self.try_gate(view) else {
            return Vec::new();
        };

        view.loading(true);
        let result = self.client.admin_history(username_filter).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                view.show_table(&admin_history_table(&resp.history));
                resp.users
            }
            Err(err) => {
                report_failure(view, "admin history", &err);
                Vec::new()
            }
        }
    }

    /// Fetch and render the system statistics cards plus recent activity.
    pub async fn load_statistics(&self, view: &mut dyn View) {
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.admin_statistics().await;
        view.loading(false);

        match result {
            Ok(stats) => {
                view.show_report(&admin_statistics_report(&stats));
                view.show_table(&activity_table(&stats.recent_activity));
            }
            Err(err) => report_failure(view, "admin statistics", &err),
        }
    }

    /// Fetch and render storage usage. Same endpoint as statistics; the
    /// backend has no dedicated storage route.
    pub async fn load_storage(&self, view: &mut dyn View) {
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.admin_statistics().await;
        view.loading(false);

        match result {
            Ok(stats) => view.show_report(&storage_report(&stats.storage)),
            Err(err) => report_failure(view, "admin storage", &err),
        }
    }

    /// Fetch and render the activity log.
    pub async fn load_logs(&self, view: &mut dyn View) {
        let Some(_guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.admin_logs().await;
        view.loading(false);

        match result {
            Ok(logs) => view.show_table(&logs_table(&logs)),
            Err(err) => report_failure(view, "admin logs", &err),
        }
    }

    // ------------------------------------------------------------------
    // User CRUD
    // ------------------------------------------------------------------

    /// Save the editor form: update in place, or register a new account
    /// (with the promote saga when the admin role was requested). Refreshes
    /// the user table after any change.
    pub async fn save_user(&self, view: &mut dyn View, editor: &UserEditor) {
        let username = editor.username.trim();
        if username.is_empty() {
            view.toast(ToastLevel::Error, "Enter a username");
            return;
        }

        match editor.mode {
            EditorMode::Edit => self.update_user(view, username, editor).await,
            EditorMode::Create => self.create_user(view, username, editor).await,
        }
    }

    async fn update_user(&self, view: &mut dyn View, username: &str, editor: &UserEditor) {
        let Some(guard) = self.try_gate(view) else {
            return;
        };

        let request = UpdateUserRequest {
            email: editor.email.trim().to_string(),
            is_admin: editor.is_admin,
            password: if editor.password.is_empty() {
                None
            } else {
                Some(editor.password.clone())
            },
        };

        view.loading(true);
        let result = self.client.admin_update_user(username, &request).await;
        view.loading(false);

        match result {
            Ok(_) => {
                info!("updated account {}", username);
                view.toast(ToastLevel::Success, "User updated");
                drop(guard);
                self.load_users(view).await;
            }
            Err(err) => report_failure(view, "update user", &err),
        }
    }

    async fn create_user(&self, view: &mut dyn View, username: &str, editor: &UserEditor) {
        if editor.password.is_empty() {
            view.toast(ToastLevel::Error, "Enter a password");
            return;
        }
        let Some(guard) = self.try_gate(view) else {
            return;
        };

        let register = RegisterRequest {
            username: username.to_string(),
            email: editor.email.trim().to_string(),
            password: editor.password.clone(),
        };

        view.loading(true);
        let registered = self.client.register(&register).await;

        // Register failed: the promote step must never be issued.
        if let Err(err) = registered {
            view.loading(false);
            report_failure(view, "add user", &err);
            return;
        }

        if editor.is_admin {
            let promote = UpdateUserRequest {
                email: editor.email.trim().to_string(),
                is_admin: true,
                password: None,
            };
            if let Err(err) = self.client.admin_update_user(username, &promote).await {
                // Compensate: remove the half-created account so the saga
                // leaves no non-admin user behind.
                error!("promotion of {} failed, rolling back: {}", username, err);
                if let Err(rollback_err) = self.client.admin_delete_user(username).await {
                    error!("rollback delete of {} failed: {}", username, rollback_err);
                }
                view.loading(false);
                view.toast(
                    ToastLevel::Error,
                    &format!("Failed to grant admin role, account rolled back: {}", err),
                );
                drop(guard);
                self.load_users(view).await;
                return;
            }
        }

        view.loading(false);
        info!("added account {}", username);
        view.toast(ToastLevel::Success, "User added");
        drop(guard);
        self.load_users(view).await;
    }

    /// Delete an account after explicit confirmation, then refresh the
    /// table. The built-in admin account is refused up front, matching the
    /// disabled control in the rendered table.
    pub async fn delete_user(&self, view: &mut dyn View, username: &str) {
        if !can_delete(username) {
            view.toast(
                ToastLevel::Error,
                "The built-in admin account cannot be deleted",
            );
            return;
        }
        if !view.confirm(&format!(
            "Delete user \"{}\"? This cannot be undone.",
            username
        )) {
            return;
        }
        let Some(guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.admin_delete_user(username).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                info!("deleted account {}", username);
                let message = resp.message.unwrap_or_else(|| "User deleted".to_string());
                view.toast(ToastLevel::Success, &message);
                drop(guard);
                self.load_users(view).await;
            }
            Err(err) => report_failure(view, "delete user", &err),
        }
    }

    // ------------------------------------------------------------------
    // Cleanup
    // ------------------------------------------------------------------

    /// Delete a category of backend data after confirmation, then refresh
    /// only the views that category touches.
    pub async fn cleanup(&self, view: &mut dyn View, kind: CleanupKind) {
        if !view.confirm(&format!(
            "Clean up {}? This cannot be undone.",
            kind.label()
        )) {
            return;
        }
        let Some(guard) = self.try_gate(view) else {
            return;
        };

        view.loading(true);
        let result = self.client.admin_cleanup(kind).await;
        view.loading(false);

        match result {
            Ok(resp) => {
                view.toast(
                    ToastLevel::Success,
                    &format!("Cleanup finished: {}", resp.cleaned.join(", ")),
                );
                drop(guard);
                if matches!(kind, CleanupKind::Captchas | CleanupKind::All) {
                    self.load_storage(view).await;
                }
                if matches!(kind, CleanupKind::History | CleanupKind::All) {
                    self.load_statistics(view).await;
                }
            }
            Err(err) => report_failure(view, "cleanup", &err),
        }
    }
}
