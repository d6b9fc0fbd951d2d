//! Dashboard flow integration tests
//!
//! Session captcha lifecycle, local guards that must not touch the network,
//! and the history/statistics render path against the stubbed backend.

mod support;

use captcha_console::{DashboardController, TableBody, ToastLevel, Tone, UNRECOGNIZED};
use serde_json::json;
use support::{MockBackend, RecordingView};

// "hi" and "yo" as png-flavored data URLs
const IMAGE_ONE: &str = "data:image/png;base64,aGk=";
const IMAGE_TWO: &str = "data:image/png;base64,eW8=";

#[tokio::test]
async fn test_generate_fills_slot_and_resets_result() {
    let backend = MockBackend::start().await;
    backend.stub(
        "POST /api/generate",
        json!({"success": true, "image": IMAGE_ONE, "text": "aB3xK"}),
    );

    let mut dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.generate(&mut view, "medium", 5).await;

    let slot = dashboard.state().captcha().expect("slot filled");
    assert_eq!(slot.text, "aB3xK");
    assert_eq!(slot.image, IMAGE_ONE);
    assert_eq!(view.captchas, vec![(IMAGE_ONE.to_string(), "aB3xK".to_string())]);
    assert_eq!(
        view.last_result(),
        &(UNRECOGNIZED.to_string(), Tone::Default)
    );
}

#[tokio::test]
async fn test_generate_replaces_slot_wholesale() {
    let backend = MockBackend::start().await;
    backend.stub(
        "POST /api/generate",
        json!({"success": true, "image": IMAGE_ONE, "text": "first"}),
    );

    let mut dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.generate(&mut view, "simple", 4).await;

    backend.stub(
        "POST /api/generate",
        json!({"success": true, "image": IMAGE_TWO, "text": "second"}),
    );
    dashboard.generate(&mut view, "hard", 6).await;

    let slot = dashboard.state().captcha().unwrap();
    assert_eq!(slot.text, "second");
    assert_eq!(slot.image, IMAGE_TWO);
    // Result display reset again for the new captcha
    assert_eq!(view.results.len(), 2);
    assert_eq!(view.results[1].0, UNRECOGNIZED);
}

#[tokio::test]
async fn test_generate_failure_keeps_previous_slot() {
    let backend = MockBackend::start().await;
    backend.stub(
        "POST /api/generate",
        json!({"success": true, "image": IMAGE_ONE, "text": "keepme"}),
    );

    let mut dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.generate(&mut view, "medium", 5).await;

    backend.stub("POST /api/generate", json!({"error": "generator exploded"}));
    dashboard.generate(&mut view, "medium", 5).await;

    assert_eq!(view.last_toast().1, "generator exploded");
    assert_eq!(dashboard.state().captcha().unwrap().text, "keepme");
}

#[tokio::test]
async fn test_recognize_without_captcha_sends_nothing() {
    let backend = MockBackend::start().await;
    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();

    dashboard.recognize(&mut view, "ml").await;

    assert_eq!(view.last_toast().1, "Generate a captcha first");
    assert_eq!(backend.hits("POST /api/recognize"), 0);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_validate_without_captcha_sends_nothing() {
    let backend = MockBackend::start().await;
    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();

    dashboard.validate(&mut view, "aB3xK").await;

    assert_eq!(view.last_toast().1, "Generate a captcha first");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_recognize_mismatch_shows_correct_answer() {
    let backend = MockBackend::start().await;
    backend.stub(
        "POST /api/generate",
        json!({"success": true, "image": IMAGE_ONE, "text": "aB3xK"}),
    );
    backend.stub(
        "POST /api/recognize",
        json!({"success": true, "result": "aB3xX", "correct": "aB3xK", "match": false}),
    );

    let mut dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.generate(&mut view, "medium", 5).await;
    dashboard.recognize(&mut view, "tesseract").await;

    assert_eq!(view.last_result(), &("aB3xX".to_string(), Tone::Danger));
    let (level, message) = view.last_toast();
    assert_eq!(*level, ToastLevel::Error);
    assert!(message.contains("aB3xK"), "mismatch toast names the answer");
}

#[tokio::test]
async fn test_recognize_match_renders_green() {
    let backend = MockBackend::start().await;
    backend.stub(
        "POST /api/generate",
        json!({"success": true, "image": IMAGE_ONE, "text": "aB3xK"}),
    );
    backend.stub(
        "POST /api/recognize",
        json!({"success": true, "result": "aB3xK", "correct": "aB3xK", "match": true}),
    );

    let mut dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.generate(&mut view, "medium", 5).await;
    dashboard.recognize(&mut view, "ml").await;

    assert_eq!(view.last_result(), &("aB3xK".to_string(), Tone::Success));
    assert_eq!(view.last_toast().0, ToastLevel::Success);
}

#[tokio::test]
async fn test_validate_wrong_guess_renders_red_with_server_message() {
    let backend = MockBackend::start().await;
    backend.stub(
        "POST /api/generate",
        json!({"success": true, "image": IMAGE_ONE, "text": "aB3xK"}),
    );
    backend.stub(
        "POST /api/validate",
        json!({"success": false, "message": "incorrect, try again"}),
    );

    let mut dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.generate(&mut view, "medium", 5).await;
    dashboard.validate(&mut view, "zzzzz").await;

    // The guess itself lands in the result display, toned by the verdict
    assert_eq!(view.last_result(), &("zzzzz".to_string(), Tone::Danger));
    assert_eq!(view.last_toast().1, "incorrect, try again");
}

#[tokio::test]
async fn test_batch_out_of_bounds_sends_nothing() {
    let backend = MockBackend::start().await;
    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();

    dashboard.batch_generate(&mut view, 0, 5, "medium").await;
    dashboard.batch_generate(&mut view, 101, 5, "medium").await;

    assert_eq!(view.toasts.len(), 2);
    assert_eq!(backend.hits("POST /api/batch_generate"), 0);
}

#[tokio::test]
async fn test_batch_reports_count_and_folder() {
    let backend = MockBackend::start().await;
    backend.stub(
        "POST /api/batch_generate",
        json!({"success": true, "count": 10, "folder": "data/captchas/batch_alice_20250101"}),
    );

    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.batch_generate(&mut view, 10, 5, "hard").await;

    let (level, message) = view.last_toast();
    assert_eq!(*level, ToastLevel::Success);
    assert!(message.contains("10"));
    assert!(message.contains("data/captchas/batch_alice_20250101"));
    assert_eq!(backend.hits("POST /api/batch_generate"), 1);
}

#[tokio::test]
async fn test_empty_history_renders_single_placeholder_row() {
    let backend = MockBackend::start().await;
    backend.stub("GET /api/history", json!({"success": true, "history": []}));

    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.show_history(&mut view).await;

    assert_eq!(view.tables.len(), 1);
    let table = &view.tables[0];
    assert_eq!(table.columns.len(), 6);
    assert!(matches!(table.body, TableBody::Placeholder(_)));
}

#[tokio::test]
async fn test_history_renders_newest_first() {
    let backend = MockBackend::start().await;
    backend.stub(
        "GET /api/history",
        json!({"success": true, "history": [
            {"timestamp": "2025-01-01 09:00:00", "captcha": "old1", "recognized": "old1",
             "method": "ml", "difficulty": "medium", "success": true},
            {"timestamp": "2025-01-01 10:00:00", "captcha": "new1", "recognized": "nope",
             "method": "tesseract", "difficulty": "hard", "success": false}
        ]}),
    );

    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.show_history(&mut view).await;

    let TableBody::Rows(rows) = &view.tables[0].body else {
        panic!("expected rows");
    };
    assert_eq!(rows[0][1].text, "new1");
    assert_eq!(rows[1][1].text, "old1");
}

#[tokio::test]
async fn test_statistics_report_has_breakdown_sections() {
    let backend = MockBackend::start().await;
    backend.stub(
        "GET /api/statistics",
        json!({"success": true, "statistics": {
            "total": 20, "success": 15, "accuracy": 0.75,
            "by_difficulty": {"medium": {"total": 20, "success": 15, "accuracy": 0.75}},
            "by_method": {"ml": {"total": 12, "success": 10, "accuracy": 0.8333}}
        }}),
    );

    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.show_statistics(&mut view).await;

    let report = &view.reports[0];
    assert_eq!(report.sections.len(), 3);
    assert_eq!(report.sections[0].entries[2].1, "75.00%");
    assert_eq!(report.sections[1].heading.as_deref(), Some("By difficulty"));
    assert_eq!(report.sections[2].heading.as_deref(), Some("By method"));
}

#[tokio::test]
async fn test_train_reports_accuracy_percentage() {
    let backend = MockBackend::start().await;
    backend.stub("POST /api/train", json!({"success": true, "accuracy": 0.9125}));

    let dashboard = DashboardController::new(backend.client());
    let mut view = RecordingView::new();
    dashboard.train(&mut view, "data/dataset", "knn").await;

    assert!(view.last_toast().1.contains("91.25%"));
}

#[tokio::test]
async fn test_clear_history_requires_confirmation() {
    let backend = MockBackend::start().await;

    let dashboard = DashboardController::new(backend.client());
    let mut declined = RecordingView::confirming(false);
    dashboard.clear_history(&mut declined).await;
    assert_eq!(backend.hits("POST /api/clear_history"), 0);

    let mut confirmed = RecordingView::confirming(true);
    dashboard.clear_history(&mut confirmed).await;
    assert_eq!(backend.hits("POST /api/clear_history"), 1);
    assert_eq!(confirmed.last_toast().0, ToastLevel::Success);
}
