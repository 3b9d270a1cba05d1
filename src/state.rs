use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;

pub struct AppState {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(Self { config, clock })
    }
}
