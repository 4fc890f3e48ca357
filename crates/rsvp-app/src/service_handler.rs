use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use rsvp_core::error::CoreError;
use rsvp_service::ingress::RsvpService;

pub struct RsvpServiceHandler {
    pub service: Arc<RsvpService>,
}

#[async_trait]
impl salvo::Handler for RsvpServiceHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.service.clone());
    }
}

/// ## Summary
/// Retrieves the RSVP service from the depot.
///
/// ## Errors
/// Returns an error if the service is not found in the depot.
pub fn get_rsvp_service_from_depot(depot: &salvo::Depot) -> AppResult<Arc<RsvpService>> {
    depot
        .obtain::<Arc<RsvpService>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("RSVP service not found in depot").into())
}
