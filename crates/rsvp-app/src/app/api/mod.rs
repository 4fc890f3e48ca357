mod app_specific;
mod rsvp;

use salvo::Router;

// Re-export route constants from core
pub use rsvp_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, RSVP_ROUTE_COMPONENT, RSVP_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router: the RSVP ingress endpoint and the app routes.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(rsvp::routes())
}
