use std::sync::Arc;

use crate::{config::Settings, directory::LocationDirectory, service::ServiceContext};

#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub directory: Arc<LocationDirectory>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        directory: Arc<LocationDirectory>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            service_context,
            directory,
            settings,
        }
    }
}
