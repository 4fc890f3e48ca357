pub mod api;

use std::sync::Arc;

use salvo::cors::{Any, Cors, CorsHandler};
use salvo::http::Method;
use salvo::{Router, Service};

use rsvp_core::config::Settings;
use rsvp_service::ingress::RsvpService;

use crate::config::ConfigHandler;
use crate::service_handler::RsvpServiceHandler;

fn cors(origin: &str) -> CorsHandler {
    let cors = Cors::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers("content-type");
    if origin == "*" {
        cors.allow_origin(Any).into_handler()
    } else {
        cors.allow_origin(origin).into_handler()
    }
}

/// ## Summary
/// Builds the HTTP service: depot hoops, API routes and, when
/// `server.allowed_origin` is set, CORS for the static site.
///
/// CORS sits on the service rather than the router so preflight requests
/// are answered before route matching.
#[must_use]
pub fn service(settings: Arc<Settings>, rsvp: Arc<RsvpService>) -> Service {
    let origin = settings.server.allowed_origin.clone();

    let router = Router::new()
        .hoop(ConfigHandler { settings })
        .hoop(RsvpServiceHandler { service: rsvp })
        .push(api::routes());

    let service = Service::new(router);
    match origin.as_deref() {
        Some(origin) => service.hoop(cors(origin)),
        None => service,
    }
}
