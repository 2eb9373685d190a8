use super::*;
use crate::test_support::{sample_analysis, StubGateway};

fn pdf(filename: &str) -> CandidateFile {
    CandidateFile {
        filename: filename.to_string(),
        mime_type: PDF_MIME.to_string(),
        bytes: b"%PDF-1.7 minimal".to_vec(),
    }
}

fn text_file(filename: &str) -> CandidateFile {
    CandidateFile {
        filename: filename.to_string(),
        mime_type: "text/plain".to_string(),
        bytes: b"plain text".to_vec(),
    }
}

#[tokio::test]
async fn non_pdf_selection_is_rejected_without_network() {
    let gateway = StubGateway::new();
    let mut controller = UploadController::new();

    controller.select_file(text_file("notes.txt"));

    assert_eq!(controller.phase(), UploadPhase::Idle);
    assert!(controller.selected_file().is_none());
    assert_eq!(controller.error(), Some(INVALID_FILE_TYPE));
    assert_eq!(gateway.total_calls(), 0);

    // The rejected candidate must not be submittable either.
    controller.submit(&gateway).await;
    assert_eq!(controller.error(), Some(MISSING_FILE_AT_SUBMIT));
    assert_eq!(gateway.total_calls(), 0);
}

#[test]
fn valid_selection_clears_stale_error_and_result() {
    let mut controller = UploadController::new();
    controller.select_file(text_file("notes.txt"));
    assert_eq!(controller.error(), Some(INVALID_FILE_TYPE));

    controller.select_file(pdf("resume.pdf"));
    assert_eq!(controller.phase(), UploadPhase::FileSelected);
    assert_eq!(
        controller.selected_file().map(|f| f.filename.as_str()),
        Some("resume.pdf")
    );
    assert!(controller.error().is_none());
}

#[test]
fn remove_file_returns_to_idle() {
    let mut controller = UploadController::new();
    controller.select_file(pdf("resume.pdf"));
    controller.remove_file();

    assert_eq!(controller.phase(), UploadPhase::Idle);
    assert!(controller.selected_file().is_none());
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn submit_without_file_fails_fast_locally() {
    let gateway = StubGateway::new();
    let mut controller = UploadController::new();

    controller.submit(&gateway).await;

    assert_eq!(controller.error(), Some(MISSING_FILE_AT_SUBMIT));
    assert_eq!(controller.phase(), UploadPhase::Idle);
    assert_eq!(gateway.total_calls(), 0);
}

#[tokio::test]
async fn successful_submission_carries_response_body_losslessly() {
    let gateway = StubGateway::new();
    let expected = sample_analysis("resume.pdf");
    gateway.set_submit(Ok(expected.clone()));

    let mut controller = UploadController::new();
    controller.select_file(pdf("resume.pdf"));
    controller.submit(&gateway).await;

    assert_eq!(controller.phase(), UploadPhase::Succeeded);
    assert_eq!(controller.result(), Some(&expected));
    assert!(controller.error().is_none());
    assert_eq!(gateway.submit_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_submission_keeps_file_and_surfaces_detail() {
    let gateway = StubGateway::new();
    gateway.set_submit(Err(ServiceError::service("Only PDF files are allowed")));

    let mut controller = UploadController::new();
    controller.select_file(pdf("resume.pdf"));
    controller.submit(&gateway).await;

    assert_eq!(controller.phase(), UploadPhase::Failed);
    assert_eq!(controller.failure_message(), Some("Only PDF files are allowed"));
    assert!(controller.selected_file().is_some());

    // Retrying the same action is allowed and clears the stale failure while
    // the new attempt is in flight.
    gateway.set_submit(Ok(sample_analysis("resume.pdf")));
    controller.submit(&gateway).await;
    assert_eq!(controller.phase(), UploadPhase::Succeeded);
}

#[tokio::test]
async fn rejected_selection_after_failed_submission_discards_the_old_outcome() {
    let gateway = StubGateway::new();
    gateway.set_submit(Err(ServiceError::service("Only PDF files are allowed")));

    let mut controller = UploadController::new();
    controller.select_file(pdf("resume.pdf"));
    controller.submit(&gateway).await;
    assert_eq!(controller.phase(), UploadPhase::Failed);

    controller.select_file(text_file("notes.txt"));

    assert_eq!(controller.phase(), UploadPhase::Idle);
    assert_eq!(controller.error(), Some(INVALID_FILE_TYPE));
    assert!(controller.failure_message().is_none());
    assert!(controller.selected_file().is_none());
}

#[test]
fn begin_submit_clears_previous_attempt_state() {
    let mut controller = UploadController::new();
    controller.select_file(pdf("resume.pdf"));

    let first = controller.begin_submit().expect("file is selected");
    controller.complete_submit(Err(ServiceError::service("boom")));
    assert_eq!(controller.phase(), UploadPhase::Failed);

    let second = controller.begin_submit().expect("retry is allowed");
    assert_eq!(first, second);
    assert_eq!(controller.phase(), UploadPhase::Submitting);
    assert!(controller.failure_message().is_none());
    assert!(controller.result().is_none());
}

#[test]
fn completed_analysis_requires_reset_before_resubmitting() {
    let mut controller = UploadController::new();
    controller.select_file(pdf("resume.pdf"));
    let file = controller.begin_submit().expect("file is selected");
    controller.complete_submit(Ok(sample_analysis(&file.filename)));

    assert!(controller.begin_submit().is_none());
    controller.reset();
    controller.select_file(pdf("resume.pdf"));
    assert!(controller.begin_submit().is_some());
}

#[tokio::test]
async fn reset_is_indistinguishable_from_initial_idle() {
    let gateway = StubGateway::new();

    for submit_result in [
        Ok(sample_analysis("resume.pdf")),
        Err(ServiceError::service("boom")),
    ] {
        gateway.set_submit(submit_result);
        let mut controller = UploadController::new();
        controller.select_file(pdf("resume.pdf"));
        controller.submit(&gateway).await;

        controller.reset();

        assert_eq!(controller.phase(), UploadPhase::Idle);
        assert!(controller.selected_file().is_none());
        assert!(controller.result().is_none());
        assert!(controller.error().is_none());
        assert!(!controller.is_submitting());
    }
}

#[test]
fn drag_and_drop_path_enforces_same_validation() {
    // Dropped files go through select_file exactly like picked ones; a
    // dropped .txt must produce the identical error.
    let mut controller = UploadController::new();
    controller.select_file(text_file("dropped.txt"));
    assert_eq!(controller.error(), Some(INVALID_FILE_TYPE));
    assert!(controller.selected_file().is_none());
}
