use std::sync::Arc;

use tablegate_core::ResourceRegistry;

use crate::dispatcher::Dispatcher;
use crate::handler::HandlerSet;

/// Everything a route needs to serve a request.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub dispatcher: Dispatcher,
    pub handlers: HandlerSet,
}

impl AppServices {
    pub fn new(registry: Arc<ResourceRegistry>, handlers: HandlerSet) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
            handlers,
        }
    }
}
