use crate::domain::model::{StartOutcome, SupervisorEvent};
use crate::domain::ports::EventSink;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Writes every event as a log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: SupervisorEvent) {
        match &event {
            SupervisorEvent::Launch {
                command,
                outcome: StartOutcome::Failed { .. },
                ..
            } => tracing::warn!(command = %command, "{}", event),
            SupervisorEvent::Launch { command, .. } => {
                tracing::info!(command = %command, "{}", event)
            }
            SupervisorEvent::Stopping { .. } => tracing::info!("{}", event),
        }
    }
}

/// Forwards events into an unbounded channel so a caller can collect them.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<SupervisorEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<SupervisorEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: SupervisorEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event receiver dropped; discarding event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ServiceRecord;

    #[test]
    fn test_channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        let first = ServiceRecord::new("a", vec!["true".to_string()]);
        let second = ServiceRecord::new("b", vec!["true".to_string()]);

        sink.emit(SupervisorEvent::started(&first, "true"));
        sink.emit(SupervisorEvent::stopping(&second));

        assert_eq!(rx.try_recv().unwrap().service(), "a");
        assert_eq!(rx.try_recv().unwrap().service(), "b");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        let record = ServiceRecord::new("a", vec!["true".to_string()]);
        sink.emit(SupervisorEvent::stopping(&record));
    }
}
