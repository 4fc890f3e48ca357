//! Ingress endpoint for RSVP submissions.


use salvo::http::StatusCode;
use salvo::prelude::*;

use rsvp_core::constants::RSVP_ROUTE_COMPONENT;
use rsvp_core::model::{Envelope, RsvpSubmission};
use rsvp_service::error::ServiceError;

use crate::config::get_config_from_depot;
use crate::service_handler::get_rsvp_service_from_depot;

fn reply(res: &mut Response, status: StatusCode, envelope: Envelope) {
    res.status_code(status);
    res.render(Json(envelope));
}

fn status_for(error: &ServiceError) -> StatusCode {
    if error.as_validation().is_some() {
        return StatusCode::BAD_REQUEST;
    }
    match error {
        ServiceError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// ## Summary
/// Accepts one RSVP as a flat JSON object and answers with an envelope.
///
/// The body is parsed regardless of `Content-Type`, since the static form
/// may post it as plain text.
///
/// ## Errors
/// Answers 400 for an unreadable body or a validation failure, 429 when the
/// phone is rate limited and 500 for storage failures. Every answer carries
/// an envelope; unexpected failures get the generic message.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn submit(req: &mut Request, res: &mut Response, depot: &Depot) {
    let (service, settings) = match (
        get_rsvp_service_from_depot(depot),
        get_config_from_depot(depot),
    ) {
        (Ok(service), Ok(settings)) => (service, settings),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(error = %e, "Depot is missing its state");
            reply(res, StatusCode::INTERNAL_SERVER_ERROR, Envelope::generic_failure());
            return;
        }
    };

    let submission = match req.payload_with_max_size(settings.server.max_body_bytes).await {
        Ok(bytes) => serde_json::from_slice::<RsvpSubmission>(bytes),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            reply(res, StatusCode::BAD_REQUEST, Envelope::generic_failure());
            return;
        }
    };
    let submission = match submission {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!(error = %e, "Request body is not an RSVP record");
            reply(res, StatusCode::BAD_REQUEST, Envelope::generic_failure());
            return;
        }
    };

    match service.submit(&submission, chrono::Utc::now()).await {
        Ok(receipt) => {
            tracing::info!(
                row_number = receipt.row_number,
                notified = receipt.notified,
                "RSVP accepted"
            );
            reply(res, StatusCode::OK, Envelope::success());
        }
        Err(e) => {
            let status = status_for(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(error = %e, "RSVP submission failed");
            } else {
                tracing::info!(error = %e, %status, "RSVP submission rejected");
            }
            reply(res, status, Envelope::error(service.public_message(&e)));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(RSVP_ROUTE_COMPONENT).post(submit)
}
