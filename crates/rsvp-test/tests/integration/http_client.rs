#![allow(clippy::expect_used)]
//! The guest-side client talking to a live server over HTTP.

use std::time::Duration;

use rsvp_test::client::error::ClientError;
use rsvp_test::client::session::RsvpSession;
use rsvp_test::client::transport::SubmissionClient;
use rsvp_test::client::wizard::form::{Event, FieldChange, Party};
use rsvp_test::client::wizard::{Effect, Intent, Phase};
use rsvp_test::domain::constants::RSVP_ROUTE_PREFIX;
use rsvp_test::domain::model::{RecordField, Relation, RsvpSubmission};

use super::helpers::*;

async fn live_client() -> (TestApp, SubmissionClient) {
    let app = TestApp::new();
    let base = serve(app.fresh_service()).await;
    let client =
        SubmissionClient::new(Some(format!("{base}{RSVP_ROUTE_PREFIX}").as_str())).expect("client");
    (app, client)
}

fn fill_form() -> Vec<Intent> {
    [
        FieldChange::FullName("Jane Doe".to_string()),
        FieldChange::Email("jane@x.com".to_string()),
        FieldChange::Phone("+1 234 567".to_string()),
        FieldChange::FriendOf(Relation::Bride),
        FieldChange::HasPlusOne(true),
        FieldChange::PlusOneName("John Roe".to_string()),
    ]
    .into_iter()
    .map(Intent::FieldChanged)
    .chain([Intent::Next])
    .chain(
        [
            FieldChange::Attendance {
                party: Party::You,
                event: Event::Church,
                attending: true,
            },
            FieldChange::Attendance {
                party: Party::PlusOne,
                event: Event::Church,
                attending: true,
            },
            FieldChange::Dietary {
                party: Party::PlusOne,
                event: Event::Church,
                note: "Gluten free".to_string(),
            },
        ]
        .into_iter()
        .map(Intent::FieldChanged),
    )
    .chain([
        Intent::Next,
        Intent::FieldChanged(FieldChange::Message("Can't wait!".to_string())),
    ])
    .collect()
}

/// ## Summary
/// A full wizard run ends in the success modal and a stored row.
#[test_log::test(tokio::test)]
async fn wizard_submission_round_trip() {
    let (app, client) = live_client().await;
    let mut session = RsvpSession::new(client).with_success_delay(Duration::ZERO);

    for intent in fill_form() {
        assert!(session.dispatch(intent).await.is_empty());
    }
    assert_eq!(session.wizard().step(), 3);

    let effects = session.submit().await;

    assert_eq!(effects, vec![Effect::ShowSuccess]);
    assert_eq!(session.wizard().phase(), Phase::Submitted);

    let rows = app.rows().await;
    assert_eq!(rows.len(), 2);
    let row = &rows[1];
    assert_eq!(row[RecordField::PlusOneName.column_index()], "John Roe");
    assert_eq!(row[RecordField::ChurchGuestCount.column_index()], "2");
    assert_eq!(row[RecordField::PlusOneLunchDietary.column_index()], "Gluten free");
    assert_eq!(row[RecordField::YourLunchDietary.column_index()], "None");
    assert_eq!(row[RecordField::PlusOneReception.column_index()], "No");
    assert_eq!(row[RecordField::Message.column_index()], "Can't wait!");

    session.dispatch(Intent::Dismiss).await;
    assert_eq!(session.wizard().step(), 1);
    assert!(session.wizard().form().full_name.is_empty());
}

/// ## Summary
/// An error envelope surfaces as a rejection with the server's message.
#[test_log::test(tokio::test)]
async fn rejected_submission_carries_message() {
    let (_app, client) = live_client().await;
    let submission = RsvpSubmission {
        full_name: Some("Jane Doe".to_string()),
        email: Some("nope".to_string()),
        phone: Some("555".to_string()),
        friend_of: Some("Groom".to_string()),
        ..RsvpSubmission::default()
    };

    let error = client.submit(&submission).await.expect_err("rejected");

    assert!(
        matches!(&error, ClientError::Rejected(message) if message == "Invalid email format"),
        "unexpected error {error}"
    );
}

/// ## Summary
/// A rate-limited guest sees the retry window in the alert.
#[test_log::test(tokio::test)]
async fn rate_limit_alert_reaches_the_wizard() {
    let (_app, client) = live_client().await;
    let mut session = RsvpSession::new(client).with_success_delay(Duration::ZERO);
    for intent in fill_form() {
        session.dispatch(intent).await;
    }

    for _ in 0..3 {
        assert_eq!(session.submit().await, vec![Effect::ShowSuccess]);
        session.dispatch(Intent::Dismiss).await;
        for intent in fill_form() {
            session.dispatch(intent).await;
        }
    }
    let effects = session.submit().await;

    assert!(
        matches!(effects.as_slice(), [Effect::Alert(message)] if message.contains("24 hours")),
        "unexpected effects {effects:?}"
    );
    assert_eq!(session.wizard().phase(), Phase::Editing);
}

/// ## Summary
/// Nothing listening on the endpoint collapses into the generic alert.
#[test_log::test(tokio::test)]
async fn unreachable_server_is_a_generic_failure() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port")
        .port();
    let endpoint = format!("http://127.0.0.1:{port}{RSVP_ROUTE_PREFIX}");
    let client = SubmissionClient::new(Some(endpoint.as_str())).expect("client");
    let mut session = RsvpSession::new(client).with_success_delay(Duration::ZERO);
    for intent in fill_form() {
        session.dispatch(intent).await;
    }

    let effects = session.submit().await;

    assert_eq!(
        effects,
        vec![Effect::Alert(
            rsvp_test::client::wizard::SUBMISSION_FAILED_ALERT.to_string()
        )]
    );
}
