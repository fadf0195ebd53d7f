use log::{debug, info};

const TARGET: &str = "aerocore";

pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!(target: TARGET, "[{}] {}", self.component, message);
    }

    /// Expected transient conditions; hidden unless debug logging is enabled.
    pub fn detail(&self, message: &str) {
        debug!(target: TARGET, "[{}] {}", self.component, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("engine")
    }
}
