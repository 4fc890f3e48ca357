#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building an in-memory service with observable store and notifier
//! - Serving it on a real socket for the HTTP client
//! - Posting submissions and asserting on envelopes
//!
//! The Postgres suite needs `RSVP_TEST_DATABASE_URL`; without it those tests
//! log a warning and return early.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use salvo::conn::{Acceptor, TcpListener};
use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use salvo::{Listener, Server, Service};
use serde_json::json;

use rsvp_test::db::db::memory::MemoryStore;
use rsvp_test::domain::config::Settings;
use rsvp_test::domain::constants::RSVP_ROUTE_PREFIX;
use rsvp_test::domain::model::{Envelope, EnvelopeStatus};
use rsvp_test::service::ingress::RsvpService;
use rsvp_test::service::notify::MemoryNotifier;

pub use tracing;

const BASE_URL: &str = "http://127.0.0.1:5800";

/// Test configuration: defaults with a fixed wedding and the memory backend.
#[must_use]
pub fn test_config() -> Settings {
    let mut settings = Settings::defaults().expect("default settings");
    settings.wedding.bride = "Anna".to_string();
    settings.wedding.groom = "Ben".to_string();
    settings.wedding.contact_email = "rsvp@anna-ben.example".to_string();
    settings
}

#[must_use]
pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// A full service over in-memory storage.
pub struct TestApp {
    pub service: Service,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<MemoryNotifier>,
    pub rsvp: Arc<RsvpService>,
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    #[must_use]
    pub fn with_config(settings: Settings) -> Self {
        Self::with_notifier(settings, MemoryNotifier::new())
    }

    #[must_use]
    pub fn with_notifier(settings: Settings, notifier: MemoryNotifier) -> Self {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(notifier);
        let rsvp = Arc::new(RsvpService::new(store.clone(), notifier.clone(), &settings));
        Self {
            service: rsvp_test::app::app::service(Arc::new(settings), rsvp.clone()),
            store,
            notifier,
            rsvp,
        }
    }

    /// A second service over the same store and notifier, for serving on a
    /// real socket.
    #[must_use]
    pub fn fresh_service(&self) -> Service {
        rsvp_test::app::app::service(Arc::new(test_config()), self.rsvp.clone())
    }

    /// Posts `body` to the ingress endpoint.
    pub async fn submit(&self, body: &serde_json::Value) -> TestResponse {
        let mut response = TestClient::post(format!("{BASE_URL}{RSVP_ROUTE_PREFIX}"))
            .json(body)
            .send(&self.service)
            .await;
        TestResponse {
            status: response
                .status_code
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            envelope: response.take_json::<Envelope>().await.ok(),
        }
    }

    /// Sheet rows, header first.
    pub async fn rows(&self) -> Vec<Vec<String>> {
        use rsvp_test::db::db::RsvpStore;
        self.store.rows("RSVP").await.expect("rows")
    }
}

/// Represents an ingress response for assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub envelope: Option<Envelope>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {} ({:?})",
            self.status, self.envelope
        );
        self
    }

    /// Asserts a success envelope.
    pub fn assert_success(self) {
        let envelope = self.envelope.expect("envelope body");
        assert!(envelope.is_success(), "Expected success but got {envelope:?}");
    }

    /// Asserts an error envelope carrying exactly `message`.
    pub fn assert_error(self, message: &str) {
        let envelope = self.envelope.expect("envelope body");
        assert_eq!(envelope.status, EnvelopeStatus::Error);
        assert_eq!(envelope.message, message);
    }
}

/// The record a solo guest attending the ceremony posts.
#[must_use]
pub fn jane() -> serde_json::Value {
    json!({
        "timestamp": "2026-10-18T10:00:00.000Z",
        "fullName": "Jane Doe",
        "email": "jane@x.com",
        "phone": "+1 234 567",
        "friendOf": "Bride",
        "hasPlusOne": "No",
        "plusOneName": "N/A",
        "yourChurch": "Yes",
        "yourReception": "No",
        "plusOneChurch": "N/A",
        "plusOneReception": "N/A",
        "churchGuestCount": 1,
        "receptionGuestCount": "N/A",
        "yourLunchDietary": "Vegetarian",
        "plusOneLunchDietary": "N/A",
        "yourDinnerDietary": "N/A",
        "plusOneDinnerDietary": "N/A",
        "song": "N/A",
        "message": "N/A"
    })
}

/// Serves `service` on an ephemeral local port and returns its base URL.
///
/// The acceptor is bound once on port 0 and keeps the socket, so the port
/// cannot be taken between choosing and serving.
pub async fn serve(service: Service) -> String {
    let acceptor = TcpListener::new("127.0.0.1:0").bind().await;
    let addr = acceptor
        .holdings()
        .first()
        .and_then(|holding| holding.local_addr.clone().into_std())
        .expect("bound local address");
    tokio::spawn(Server::new(acceptor).serve(service));
    format!("http://{addr}")
}
