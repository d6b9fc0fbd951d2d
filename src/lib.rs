//! Captcha Console
//!
//! Typed client and view layer for a captcha training backend.
//!
//! # Features
//!
//! - **Typed API client**: one method per backend endpoint, JSON over HTTP
//! - **Auth**: login/registration with local validation and delayed redirect
//! - **Dashboard**: generate/recognize/validate captchas, batch generation,
//!   history and statistics views, model training, history clearing
//! - **Admin**: user CRUD (create-then-promote saga with rollback), history,
//!   statistics, storage and log tables, data cleanup
//! - **View seam**: all output goes through the `View` trait; rendering is
//!   built as plain `Table`/`Report` values
//! - **In-flight gate**: overlapping submissions from one page are rejected
//!   locally instead of racing
//!
//! # Architecture
//!
//! ```text
//! console (REPL) ──► controllers ──► ApiClient ──► backend (JSON/HTTP)
//!                       │   auth / dashboard / admin
//!                       └──► render (Table/Report) ──► View (terminal)
//! ```

pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod models;
pub mod render;
pub mod view;

pub use admin::{AdminController, EditorMode, UserEditor};
pub use auth::AuthController;
pub use client::ApiClient;
pub use config::Config;
pub use dashboard::{DashboardController, DashboardState};
pub use error::{ApiError, ApiResult, NETWORK_ERROR_MESSAGE};
pub use gate::{Gate, GateGuard};
pub use models::{CaptchaSlot, CleanupKind};
pub use render::{Report, Table, TableBody, Tone};
pub use view::{TerminalView, ToastLevel, View, UNRECOGNIZED};
