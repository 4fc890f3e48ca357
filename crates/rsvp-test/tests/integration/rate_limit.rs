#![allow(clippy::expect_used)]
//! Per-phone submission limits across the HTTP layer.

use chrono::{TimeDelta, Utc};
use futures::future::join_all;
use salvo::http::StatusCode;
use serde_json::json;

use rsvp_test::db::db::RsvpStore;
use rsvp_test::domain::model::RsvpSubmission;

use super::helpers::*;

const RETRY_MESSAGE: &str =
    "Too many submissions from this phone number. Please try again in 24 hours.";

fn jane_submission() -> RsvpSubmission {
    serde_json::from_value(jane()).expect("valid submission")
}

/// ## Summary
/// The fourth submission from one phone inside the window gets a 429 and
/// writes nothing.
#[test_log::test(tokio::test)]
async fn fourth_submission_is_rejected() {
    let app = TestApp::new();

    for _ in 0..3 {
        app.submit(&jane()).await.assert_status(StatusCode::OK).assert_success();
    }
    app
        .submit(&jane())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .assert_error(RETRY_MESSAGE);

    assert_eq!(app.rows().await.len(), 4);
    assert_eq!(app.notifier.sent().await.len(), 3);
    assert_eq!(
        app.store
            .rate_limit_entries("'+1 234 567")
            .await
            .expect("entries")
            .len(),
        3
    );
}

/// ## Summary
/// Limits are tracked per phone number.
#[test_log::test(tokio::test)]
async fn phones_are_limited_independently() {
    let app = TestApp::new();

    for _ in 0..3 {
        app.submit(&jane()).await.assert_status(StatusCode::OK).assert_success();
    }
    let mut other = jane();
    other["phone"] = json!("+44 20 7946 0000");

    app
        .submit(&other)
        .await
        .assert_status(StatusCode::OK)
        .assert_success();
}

/// ## Summary
/// Entries older than the window no longer count.
#[test_log::test(tokio::test)]
async fn expired_entries_free_the_allowance() {
    let app = TestApp::new();
    let long_ago = Utc::now() - TimeDelta::hours(25);

    for minutes in 0..3 {
        app.rsvp
            .submit(&jane_submission(), long_ago + TimeDelta::minutes(minutes))
            .await
            .expect("accepted");
    }

    app.submit(&jane()).await.assert_status(StatusCode::OK).assert_success();

    let entries = app
        .store
        .rate_limit_entries("'+1 234 567")
        .await
        .expect("entries");
    assert_eq!(entries.len(), 1, "expired entries are purged on admission");
}

/// ## Summary
/// Entries still inside the window block HTTP submissions.
#[test_log::test(tokio::test)]
async fn recent_entries_block_submissions() {
    let app = TestApp::new();
    let recently = Utc::now() - TimeDelta::hours(23);

    for _ in 0..3 {
        app.rsvp
            .submit(&jane_submission(), recently)
            .await
            .expect("accepted");
    }

    app
        .submit(&jane())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .assert_error(RETRY_MESSAGE);
}

/// ## Summary
/// Concurrent submissions from one phone cannot overshoot the limit.
#[test_log::test(tokio::test)]
async fn concurrent_submissions_respect_limit() {
    let app = TestApp::new();
    let body = jane();

    let responses = join_all((0..8).map(|_| app.submit(&body))).await;

    let accepted = responses
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .count();
    let limited = responses
        .iter()
        .filter(|r| r.status == StatusCode::TOO_MANY_REQUESTS)
        .count();
    assert_eq!(accepted, 3);
    assert_eq!(limited, 5);

    let rows = app.rows().await;
    assert_eq!(rows.len(), 4);
    assert_eq!(rows.iter().filter(|r| r[0] == "Timestamp").count(), 1);
}
