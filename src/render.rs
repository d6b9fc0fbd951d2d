//! View-model rendering
//!
//! Pure builders that turn backend view-models into [`Table`] and [`Report`]
//! values. Nothing here touches the terminal; the [`crate::view::View`]
//! implementation decides how a table or report is actually drawn. Keeping
//! these as value-returning functions makes every rendering rule testable
//! without a display.

use crate::models::{
    AdminHistoryRecord, AdminStatistics, HistoryRecord, LogRecord, StatisticsSnapshot,
    StorageSnapshot, UserRecord,
};

/// The built-in account whose delete control is disabled in the user table.
/// UI-level protection only; the backend is expected to enforce the rule.
pub const PROTECTED_USERNAME: &str = "admin";

/// Whether the user table offers a delete action for this account.
pub fn can_delete(username: &str) -> bool {
    username != PROTECTED_USERNAME
}

/// Visual weight of a cell or result value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Success,
    Danger,
}

/// One rendered table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Default,
        }
    }

    /// Check mark or cross, toned by outcome
    pub fn status(success: bool) -> Self {
        Self {
            text: if success { "\u{2713}" } else { "\u{2717}" }.to_string(),
            tone: if success { Tone::Success } else { Tone::Danger },
        }
    }
}

/// Table body: data rows, or one placeholder row spanning all columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<Vec<Cell>>),
    Placeholder(String),
}

/// A fully rendered table, replacing the previous body wholesale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub body: TableBody,
}

impl Table {
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Placeholder(_) => 0,
        }
    }
}

/// A key/value report section with an optional heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: Option<String>,
    pub entries: Vec<(String, String)>,
}

/// A rendered report (the read-only modal views)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
}

fn dash_if_empty(text: &str) -> Cell {
    if text.is_empty() {
        Cell::plain("-")
    } else {
        Cell::plain(text)
    }
}

/// Ratio in [0,1] shown as a percentage
fn format_ratio(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Value already expressed as a percentage
fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

// ============================================================================
// Dashboard views
// ============================================================================

/// Session history, newest first. The backend stores oldest-first.
pub fn history_table(records: &[HistoryRecord]) -> Table {
    let columns = vec![
        "Time",
        "Captcha",
        "Recognized",
        "Method",
        "Difficulty",
        "Status",
    ];
    let body = if records.is_empty() {
        TableBody::Placeholder("No history records".to_string())
    } else {
        TableBody::Rows(
            records
                .iter()
                .rev()
                .map(|r| {
                    vec![
                        Cell::plain(&r.timestamp),
                        Cell::plain(&r.captcha),
                        Cell::plain(&r.recognized),
                        Cell::plain(&r.method),
                        Cell::plain(&r.difficulty),
                        Cell::status(r.success),
                    ]
                })
                .collect(),
        )
    };
    Table {
        title: "History".to_string(),
        columns,
        body,
    }
}

/// Recognition statistics: aggregate plus per-difficulty and per-method
/// breakdowns, all computed server-side.
pub fn statistics_report(stats: &StatisticsSnapshot) -> Report {
    let mut sections = vec![Section {
        heading: None,
        entries: vec![
            ("Total attempts".to_string(), stats.total.to_string()),
            ("Successful".to_string(), stats.success.to_string()),
            ("Overall accuracy".to_string(), format_ratio(stats.accuracy)),
        ],
    }];

    if !stats.by_difficulty.is_empty() {
        sections.push(Section {
            heading: Some("By difficulty".to_string()),
            entries: stats
                .by_difficulty
                .iter()
                .map(|(label, b)| {
                    (
                        label.clone(),
                        format!("{}/{} = {}", b.success, b.total, format_ratio(b.accuracy)),
                    )
                })
                .collect(),
        });
    }

    if !stats.by_method.is_empty() {
        sections.push(Section {
            heading: Some("By method".to_string()),
            entries: stats
                .by_method
                .iter()
                .map(|(label, b)| {
                    (
                        label.clone(),
                        format!("{}/{} = {}", b.success, b.total, format_ratio(b.accuracy)),
                    )
                })
                .collect(),
        });
    }

    Report {
        title: "Statistics".to_string(),
        sections,
    }
}

// ============================================================================
// Admin views
// ============================================================================

/// Account table. The protected account's delete action renders disabled.
pub fn users_table(users: &[UserRecord]) -> Table {
    let columns = vec!["Username", "Email", "Role", "Created", "Actions"];
    let body = if users.is_empty() {
        TableBody::Placeholder("No users".to_string())
    } else {
        TableBody::Rows(
            users
                .iter()
                .map(|u| {
                    let role = Cell {
                        text: if u.is_admin { "admin" } else { "user" }.to_string(),
                        tone: if u.is_admin {
                            Tone::Danger
                        } else {
                            Tone::Default
                        },
                    };
                    let actions = if can_delete(&u.username) {
                        Cell::plain("edit | delete")
                    } else {
                        Cell::plain("edit | delete (disabled)")
                    };
                    vec![
                        Cell::plain(&u.username),
                        dash_if_empty(&u.email),
                        role,
                        dash_if_empty(&u.created_at),
                        actions,
                    ]
                })
                .collect(),
        )
    };
    Table {
        title: "Users".to_string(),
        columns,
        body,
    }
}

/// All-user history, already sorted newest-first by the backend
pub fn admin_history_table(records: &[AdminHistoryRecord]) -> Table {
    let columns = vec![
        "Time",
        "User",
        "Captcha",
        "Recognized",
        "Method",
        "Difficulty",
        "Status",
    ];
    let body = if records.is_empty() {
        TableBody::Placeholder("No history records".to_string())
    } else {
        TableBody::Rows(
            records
                .iter()
                .map(|r| {
                    vec![
                        dash_if_empty(&r.record.timestamp),
                        dash_if_empty(&r.user),
                        dash_if_empty(&r.record.captcha),
                        dash_if_empty(&r.record.recognized),
                        dash_if_empty(&r.record.method),
                        dash_if_empty(&r.record.difficulty),
                        Cell::status(r.record.success),
                    ]
                })
                .collect(),
        )
    };
    Table {
        title: "All history".to_string(),
        columns,
        body,
    }
}

/// Recent activity rows inside the admin statistics view
pub fn activity_table(records: &[LogRecord]) -> Table {
    let columns = vec!["User", "Time", "Action", "Method", "Status"];
    let body = if records.is_empty() {
        TableBody::Placeholder("No recent activity".to_string())
    } else {
        TableBody::Rows(
            records
                .iter()
                .map(|r| {
                    vec![
                        dash_if_empty(&r.user),
                        dash_if_empty(&r.timestamp),
                        dash_if_empty(&r.action),
                        dash_if_empty(&r.method),
                        Cell::status(r.success),
                    ]
                })
                .collect(),
        )
    };
    Table {
        title: "Recent activity".to_string(),
        columns,
        body,
    }
}

/// Activity log table
pub fn logs_table(records: &[LogRecord]) -> Table {
    let columns = vec!["Time", "User", "Action", "Method", "Status"];
    let body = if records.is_empty() {
        TableBody::Placeholder("No log entries".to_string())
    } else {
        TableBody::Rows(
            records
                .iter()
                .map(|r| {
                    vec![
                        dash_if_empty(&r.timestamp),
                        dash_if_empty(&r.user),
                        dash_if_empty(&r.action),
                        dash_if_empty(&r.method),
                        Cell::status(r.success),
                    ]
                })
                .collect(),
        )
    };
    Table {
        title: "Logs".to_string(),
        columns,
        body,
    }
}

/// Summary cards of the admin statistics view. Accuracy arrives as a
/// percentage here, not a ratio.
pub fn admin_statistics_report(stats: &AdminStatistics) -> Report {
    Report {
        title: "System statistics".to_string(),
        sections: vec![
            Section {
                heading: Some("Users".to_string()),
                entries: vec![
                    ("Total".to_string(), stats.users.total.to_string()),
                    ("Admins".to_string(), stats.users.admins.to_string()),
                    ("Regular".to_string(), stats.users.regular.to_string()),
                ],
            },
            Section {
                heading: Some("Records".to_string()),
                entries: vec![
                    ("Total".to_string(), stats.records.total.to_string()),
                    ("Successful".to_string(), stats.records.success.to_string()),
                    (
                        "Overall accuracy".to_string(),
                        format_percent(stats.records.accuracy),
                    ),
                ],
            },
        ],
    }
}

/// Storage usage for the two asset categories
pub fn storage_report(storage: &StorageSnapshot) -> Report {
    Report {
        title: "Storage".to_string(),
        sections: vec![
            Section {
                heading: Some("Captcha files".to_string()),
                entries: vec![
                    ("Files".to_string(), storage.captcha_files.to_string()),
                    (
                        "Size".to_string(),
                        format!("{:.2} MB", storage.captcha_size_mb),
                    ),
                ],
            },
            Section {
                heading: Some("Model files".to_string()),
                entries: vec![
                    ("Files".to_string(), storage.model_files.to_string()),
                    (
                        "Size".to_string(),
                        format!("{:.2} MB", storage.model_size_mb),
                    ),
                ],
            },
        ],
    }
}
