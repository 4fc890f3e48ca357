#![allow(clippy::expect_used)]
//! End-to-end submission tests against the in-memory service.

use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use serde_json::json;

use rsvp_test::domain::model::RecordField;
use rsvp_test::service::notify::MemoryNotifier;

use super::helpers::*;

fn cell(row: &[String], field: RecordField) -> &str {
    &row[field.column_index()]
}

/// ## Summary
/// A valid solo submission lands under a freshly written header and triggers
/// exactly one confirmation.
#[test_log::test(tokio::test)]
async fn solo_guest_is_stored_and_confirmed() {
    let app = TestApp::new();

    app
        .submit(&jane())
        .await
        .assert_status(StatusCode::OK)
        .assert_success();

    let rows = app.rows().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 19);
    assert_eq!(rows[0][0], "Timestamp");
    assert_eq!(cell(&rows[1], RecordField::Phone), "'+1 234 567");
    assert_eq!(cell(&rows[1], RecordField::ChurchGuestCount), "1");
    assert_eq!(cell(&rows[1], RecordField::ReceptionGuestCount), "N/A");

    let layout = app.store.layout("RSVP").await.expect("sheet created");
    assert!(layout.style.bold);
    assert_eq!(layout.style.background, "#F4C7D4");
    assert_eq!(layout.style.foreground, "#2D1E24");
    assert_eq!(layout.frozen_rows, 1);

    let sent = app.notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "RSVP Confirmation - Anna & Ben's Wedding");
    assert!(sent[0].text.contains("Church Ceremony (lunch dietary note: Vegetarian)"));
}

/// ## Summary
/// Derived columns come from the attendance flags, not the client's claims.
#[test_log::test(tokio::test)]
async fn server_recomputes_derived_columns() {
    let app = TestApp::new();
    let mut body = jane();
    body["churchGuestCount"] = json!(2);
    body["receptionGuestCount"] = json!(2);
    body["plusOneChurch"] = json!("Yes");
    body["plusOneName"] = json!("Ghost");
    body["yourDinnerDietary"] = json!("Hidden input");

    app.submit(&body).await.assert_status(StatusCode::OK).assert_success();

    let rows = app.rows().await;
    let row = &rows[1];
    assert_eq!(cell(row, RecordField::ChurchGuestCount), "1");
    assert_eq!(cell(row, RecordField::ReceptionGuestCount), "N/A");
    assert_eq!(cell(row, RecordField::PlusOneName), "N/A");
    assert_eq!(cell(row, RecordField::PlusOneChurch), "N/A");
    assert_eq!(cell(row, RecordField::YourDinnerDietary), "N/A");
}

/// ## Summary
/// Malformed guest counts are ignored rather than rejecting the RSVP.
#[test_log::test(tokio::test)]
async fn unreadable_guest_counts_are_recomputed() {
    let app = TestApp::new();
    let mut body = jane();
    body["churchGuestCount"] = json!(-1);
    body["receptionGuestCount"] = json!(1.5);

    app.submit(&body)
        .await
        .assert_status(StatusCode::OK)
        .assert_success();

    let rows = app.rows().await;
    assert_eq!(cell(&rows[1], RecordField::ChurchGuestCount), "1");
    assert_eq!(cell(&rows[1], RecordField::ReceptionGuestCount), "N/A");
}

/// ## Summary
/// A couple attending both events with partial dietary notes.
#[test_log::test(tokio::test)]
async fn couple_submission_counts_both_parties() {
    let app = TestApp::new();
    let mut body = jane();
    body["hasPlusOne"] = json!("Yes");
    body["plusOneName"] = json!("John Roe");
    body["yourReception"] = json!("Yes");
    body["plusOneChurch"] = json!("Yes");
    body["plusOneReception"] = json!("Yes");
    body["yourDinnerDietary"] = json!("");
    body["plusOneLunchDietary"] = json!("None");
    body["plusOneDinnerDietary"] = json!("Nut allergy");
    body["song"] = json!("September");

    app.submit(&body).await.assert_status(StatusCode::OK).assert_success();

    let rows = app.rows().await;
    let row = &rows[1];
    assert_eq!(cell(row, RecordField::PlusOneName), "John Roe");
    assert_eq!(cell(row, RecordField::ChurchGuestCount), "2");
    assert_eq!(cell(row, RecordField::ReceptionGuestCount), "2");
    assert_eq!(cell(row, RecordField::YourDinnerDietary), "None");
    assert_eq!(cell(row, RecordField::PlusOneDinnerDietary), "Nut allergy");
    assert_eq!(cell(row, RecordField::Song), "September");

    let sent = app.notifier.sent().await;
    assert!(sent[0].text.contains("\nJohn Roe\n"));
    assert!(sent[0].text.contains("Song request: September"));
}

/// ## Summary
/// Each validation failure names its field and leaves the sheet untouched.
#[test_log::test(tokio::test)]
async fn validation_errors_name_the_field() {
    let app = TestApp::new();
    let cases = [
        ("fullName", json!(""), "Full Name is required"),
        ("email", json!("not-an-email"), "Invalid email format"),
        ("friendOf", json!("Cousin"), "Friend Of must be either Bride or Groom"),
    ];

    for (field, value, message) in cases {
        let mut body = jane();
        body[field] = value;
        app
            .submit(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error(message);
    }

    assert!(app.rows().await.is_empty());
    assert!(app.notifier.sent().await.is_empty());
}

/// ## Summary
/// A failing mail relay never turns an accepted RSVP into an error.
#[test_log::test(tokio::test)]
async fn notification_failure_still_succeeds() {
    let app = TestApp::with_notifier(test_config(), MemoryNotifier::failing());

    app
        .submit(&jane())
        .await
        .assert_status(StatusCode::OK)
        .assert_success();

    assert_eq!(app.rows().await.len(), 2);
}

/// ## Summary
/// The health check answers without touching storage.
#[test_log::test(tokio::test)]
async fn healthcheck_reports_ok() {
    let app = TestApp::new();

    let mut response = TestClient::get("http://127.0.0.1:5800/api/app/healthcheck")
        .send(&app.service)
        .await;

    assert_eq!(response.status_code, Some(StatusCode::OK));
    assert_eq!(response.take_string().await.expect("body"), "OK");
}
