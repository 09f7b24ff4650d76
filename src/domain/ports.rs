use crate::domain::model::{ServiceRecord, SupervisorEvent};
use async_trait::async_trait;
use std::time::Duration;

/// Receives every launch and shutdown event.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SupervisorEvent);
}

/// Starts one service. Outcomes go to the sink only; nothing is returned.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn start(&self, record: &ServiceRecord, timeout: Duration, sink: &dyn EventSink);
}
