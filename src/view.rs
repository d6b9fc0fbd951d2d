//! Rendering interface
//!
//! The original pages wrote straight into ambient DOM nodes. Here every
//! output path goes through the [`View`] trait instead: toasts, the loading
//! indicator, the captcha/result display, table and report output, the
//! confirmation step for irreversible actions, and navigation. Controllers
//! take a `&mut dyn View` per handler call, so tests can substitute a
//! recording implementation.

use crate::client::image_payload_bytes;
use crate::error::ApiError;
use crate::render::{Report, Table, TableBody, Tone};
use std::io::{BufRead, Write};
use tracing::error;

/// Neutral result text shown until a recognition attempt lands.
pub const UNRECOGNIZED: &str = "unrecognized";

/// Toast flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Output seam between controllers and whatever is displaying them.
pub trait View {
    /// Transient notification
    fn toast(&mut self, level: ToastLevel, message: &str);

    /// Loading indicator visibility
    fn loading(&mut self, visible: bool);

    /// Current captcha display (image payload plus ground-truth text)
    fn show_captcha(&mut self, image: &str, text: &str);

    /// Recognition result display
    fn set_result(&mut self, text: &str, tone: Tone);

    /// Full table replacement
    fn show_table(&mut self, table: &Table);

    /// Key/value report (statistics, storage)
    fn show_report(&mut self, report: &Report);

    /// Explicit confirmation for irreversible actions
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Page navigation after a successful auth action
    fn navigate(&mut self, target: &str);
}

/// Standard failure path: transport causes go to the diagnostic log, the
/// user sees one toast either way. Never navigates, never retries.
pub fn report_failure(view: &mut dyn View, context: &str, err: &ApiError) {
    if let ApiError::Transport(cause) = err {
        error!("{} request failed: {}", context, cause);
    }
    view.toast(ToastLevel::Error, &err.toast_message());
}

/// Terminal implementation used by the console binary.
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Default => "",
        Tone::Success => " [ok]",
        Tone::Danger => " [!!]",
    }
}

impl View for TerminalView {
    fn toast(&mut self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Success => println!("  + {}", message),
            ToastLevel::Error => println!("  ! {}", message),
        }
    }

    fn loading(&mut self, visible: bool) {
        if visible {
            println!("  ...");
        }
    }

    fn show_captcha(&mut self, image: &str, text: &str) {
        match image_payload_bytes(image) {
            Some(bytes) => println!("  captcha: {} ({} byte image)", text, bytes),
            None => println!("  captcha: {}", text),
        }
    }

    fn set_result(&mut self, text: &str, tone: Tone) {
        println!("  result: {}{}", text, tone_marker(tone));
    }

    fn show_table(&mut self, table: &Table) {
        println!("== {} ==", table.title);
        println!("  {}", table.columns.join(" | "));
        match &table.body {
            TableBody::Placeholder(text) => println!("  ({})", text),
            TableBody::Rows(rows) => {
                for row in rows {
                    let line: Vec<String> = row
                        .iter()
                        .map(|cell| format!("{}{}", cell.text, tone_marker(cell.tone)))
                        .collect();
                    println!("  {}", line.join(" | "));
                }
            }
        }
    }

    fn show_report(&mut self, report: &Report) {
        println!("== {} ==", report.title);
        for section in &report.sections {
            if let Some(heading) = &section.heading {
                println!("  -- {} --", heading);
            }
            for (key, value) in &section.entries {
                println!("  {}: {}", key, value);
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N]: ", prompt);
        std::io::stdout().flush().ok();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }

    fn navigate(&mut self, target: &str) {
        println!("  -> {}", target);
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording view double for controller unit tests.

    use super::*;

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

        pub fn last_toast(&self) -> Option<&(ToastLevel, String)> {
            self.toasts.last()
        }

        pub fn last_result(&self) -> Option<&(String, Tone)> {
            self.results.last()
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
}
