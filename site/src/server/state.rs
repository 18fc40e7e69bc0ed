//! Shared application state.
//!
//! Constructed once in `main` and cloned into every handler. The platform
//! handle is `Option`al by design: without credentials the product starts
//! anyway and dependent features degrade per call site.

use crate::config::Config;
use crate::email::Mailer;
use crate::features::booking_desk::{
    BookingDeskAction, BookingDeskEnvironment, BookingDeskReducer, BookingDeskState,
};
use std::sync::Arc;
use std::time::Duration;
use wayfare_platform::PlatformApi;
use wayfare_runtime::Store;

/// The store hosting the server-side booking pipeline.
pub type BookingDeskStore =
    Store<BookingDeskState, BookingDeskAction, BookingDeskEnvironment, BookingDeskReducer>;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Platform handle; `None` when credentials are missing
    pub platform: Option<Arc<dyn PlatformApi>>,
    /// The booking pipeline
    pub booking_desk: Arc<BookingDeskStore>,
    /// Token marking internal lead submissions
    pub internal_api_token: Option<String>,
    /// Bound on the HTTP → store handoff
    pub store_timeout: Duration,
}

impl AppState {
    /// Assemble the state from config and the injected collaborators.
    #[must_use]
    pub fn new(
        config: &Config,
        platform: Option<Arc<dyn PlatformApi>>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let booking_desk = Arc::new(Store::new(
            BookingDeskState::default(),
            BookingDeskReducer::new(),
            BookingDeskEnvironment::new(platform.clone(), mailer),
        ));

        Self {
            platform,
            booking_desk,
            internal_api_token: config.internal_api_token.clone(),
            store_timeout: config.store_timeout(),
        }
    }
}
