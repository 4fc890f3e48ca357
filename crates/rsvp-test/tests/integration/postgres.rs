#![allow(clippy::expect_used)]
//! Admission against a real Postgres database.
//!
//! Each test works on its own sheet and phone number so runs never collide.
//! Set `RSVP_TEST_DATABASE_URL` to enable the suite.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use futures::future::join_all;
use tokio::sync::OnceCell;

use rsvp_test::db::db::RsvpStore;
use rsvp_test::db::db::connection::{DbPool, create_pool};
use rsvp_test::db::db::migrations::run_migrations;
use rsvp_test::db::model::admission::{Admission, AdmissionOutcome};
use rsvp_test::domain::model::SheetLayout;
use rsvp_test::domain::rate_limit::RateLimitPolicy;
use rsvp_test::service::ingress::RsvpService;
use rsvp_test::service::notify::MemoryNotifier;

use super::helpers::*;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn test_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var("RSVP_TEST_DATABASE_URL") else {
        tracing::warn!("RSVP_TEST_DATABASE_URL not set, skipping Postgres test");
        return None;
    };
    MIGRATED
        .get_or_init(|| async { run_migrations(&url).await.expect("migrations") })
        .await;
    Some(create_pool(&url, 4).await.expect("pool"))
}

fn unique(prefix: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{nanos}")
}

fn admission(sheet: &SheetLayout, phone: &str, cell: &str) -> Admission {
    Admission {
        sheet: sheet.clone(),
        row: vec![cell.to_string(); sheet.width()],
        phone: phone.to_string(),
        at: Utc::now(),
        policy: RateLimitPolicy::default(),
    }
}

/// ## Summary
/// The header is written once, before the first row, with its styling.
#[test_log::test(tokio::test)]
async fn header_is_written_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let sheet = SheetLayout::rsvp(unique("sheet"));

    let first = pool
        .admit(&admission(&sheet, &unique("phone"), "a"))
        .await
        .expect("admitted");
    let second = pool
        .admit(&admission(&sheet, &unique("phone"), "b"))
        .await
        .expect("admitted");

    assert_eq!(
        first,
        AdmissionOutcome::Admitted {
            row_number: 2,
            header_written: true
        }
    );
    assert_eq!(
        second,
        AdmissionOutcome::Admitted {
            row_number: 3,
            header_written: false
        }
    );

    let rows = pool.rows(&sheet.name).await.expect("rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], sheet.header);
    assert_eq!(rows[1][0], "a");
    assert_eq!(rows[2][0], "b");
}

/// ## Summary
/// The limit holds under concurrent admissions for one phone.
#[test_log::test(tokio::test)]
async fn concurrent_admissions_respect_limit() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let sheet = SheetLayout::rsvp(unique("sheet"));
    let phone = unique("phone");
    let admissions: Vec<_> = (0..6).map(|_| admission(&sheet, &phone, "x")).collect();

    let outcomes = join_all(admissions.iter().map(|a| pool.admit(a))).await;

    let admitted = outcomes
        .iter()
        .filter(|o| o.as_ref().expect("outcome").is_admitted())
        .count();
    assert_eq!(admitted, 3);
    assert_eq!(
        pool.rate_limit_entries(&phone).await.expect("entries").len(),
        3
    );
    assert_eq!(pool.rows(&sheet.name).await.expect("rows").len(), 4);
}

/// ## Summary
/// Expired entries are purged and no longer count.
#[test_log::test(tokio::test)]
async fn expired_entries_are_purged() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let sheet = SheetLayout::rsvp(unique("sheet"));
    let phone = unique("phone");

    for _ in 0..3 {
        let mut old = admission(&sheet, &phone, "old");
        old.at = Utc::now() - TimeDelta::hours(25);
        assert!(pool.admit(&old).await.expect("admitted").is_admitted());
    }

    let fresh = pool
        .admit(&admission(&sheet, &phone, "new"))
        .await
        .expect("admitted");

    assert!(fresh.is_admitted());
    let entries = pool.rate_limit_entries(&phone).await.expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].count, 1);
}

/// ## Summary
/// The full ingress pipeline over the Postgres store.
#[test_log::test(tokio::test)]
async fn service_stores_sanitized_row() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let mut settings = test_config();
    settings.sheet.name = unique("sheet");
    let service = RsvpService::new(Arc::new(pool.clone()), Arc::new(MemoryNotifier::new()), &settings);
    let mut submission: rsvp_test::domain::model::RsvpSubmission =
        serde_json::from_value(jane()).expect("submission");
    submission.phone = Some(format!("+{}", Utc::now().timestamp_subsec_nanos()));

    let receipt = service
        .submit(&submission, Utc::now())
        .await
        .expect("accepted");

    assert_eq!(receipt.row_number, 2);
    let rows = pool.rows(&settings.sheet.name).await.expect("rows");
    assert_eq!(rows[1][1], "Jane Doe");
    assert!(rows[1][3].starts_with("'+"));
}
