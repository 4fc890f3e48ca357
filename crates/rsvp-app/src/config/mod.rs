use std::sync::Arc;

use salvo::async_trait;
pub use rsvp_core::config::*;

use crate::error::{AppError, AppResult};

/// Hoop that injects the loaded [`Settings`] into every request's depot.
///
/// The ingress handler reads `server.max_body_bytes` for its payload cap;
/// the rate-limit, sheet and wedding sections are already baked into the
/// `RsvpService` and are carried here for handlers that need them.
pub struct ConfigHandler {
    pub settings: Arc<Settings>,
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.settings.clone());
    }
}

/// ## Summary
/// Retrieves the application configuration from the depot.
///
/// ## Errors
/// Returns an error if the configuration is not found in the depot.
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot.obtain::<Arc<Settings>>().cloned().map_err(|_err| {
        AppError::CoreError(rsvp_core::error::CoreError::InvariantViolation(
            "Configuration not found in depot",
        ))
    })
}
