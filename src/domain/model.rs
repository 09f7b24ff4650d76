use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DESCRIPTION: &str = "default service description";
pub const DEFAULT_START_MESSAGE: &str = "Starting initialize";
pub const DEFAULT_STOP_MESSAGE: &str = "Stopping initialize";
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// One validated service definition. Immutable once handed to the supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    pub description: String,
    /// Ordering key: lower values are dispatched first.
    pub position: i64,
    pub start_commands: Vec<String>,
    pub stop_commands: Vec<String>,
    pub restart_commands: Vec<String>,
    pub blocking: bool,
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl ServiceRecord {
    pub fn new(name: impl Into<String>, start_commands: Vec<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            position: 0,
            start_commands,
            stop_commands: Vec::new(),
            restart_commands: Vec::new(),
            blocking: false,
            timeout_secs: None,
            source: None,
        }
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Process-wide configuration, read-only after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub path: Option<PathBuf>,
    pub timeout_secs: u64,
    pub start_message: String,
    pub stop_message: String,
    pub services_pattern: String,
    /// Service records in discovery order.
    pub services: Vec<ServiceRecord>,
}

impl Config {
    pub fn new(timeout_secs: u64, services: Vec<ServiceRecord>) -> Self {
        Self {
            path: None,
            timeout_secs,
            start_message: DEFAULT_START_MESSAGE.to_string(),
            stop_message: DEFAULT_STOP_MESSAGE.to_string(),
            services_pattern: String::new(),
            services,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartOutcome {
    Started,
    Failed { reason: String },
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, StartOutcome::Started)
    }
}

/// Everything the engine reports. Events only flow outward to an
/// [`EventSink`](crate::domain::ports::EventSink); the supervisor never reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SupervisorEvent {
    Launch {
        service: String,
        command: String,
        outcome: StartOutcome,
    },
    Stopping {
        service: String,
        description: String,
    },
}

impl SupervisorEvent {
    pub fn started(record: &ServiceRecord, command: &str) -> Self {
        SupervisorEvent::Launch {
            service: record.name.clone(),
            command: command.to_string(),
            outcome: StartOutcome::Started,
        }
    }

    pub fn failed(record: &ServiceRecord, command: &str, reason: impl Into<String>) -> Self {
        SupervisorEvent::Launch {
            service: record.name.clone(),
            command: command.to_string(),
            outcome: StartOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn stopping(record: &ServiceRecord) -> Self {
        SupervisorEvent::Stopping {
            service: record.name.clone(),
            description: record.description.clone(),
        }
    }

    pub fn service(&self) -> &str {
        match self {
            SupervisorEvent::Launch { service, .. } | SupervisorEvent::Stopping { service, .. } => {
                service
            }
        }
    }
}

impl fmt::Display for SupervisorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorEvent::Launch {
                service,
                outcome: StartOutcome::Started,
                ..
            } => write!(f, "{}, [started]", service),
            SupervisorEvent::Launch {
                service,
                outcome: StartOutcome::Failed { reason },
                ..
            } => write!(f, "{}, [failed], reason: {}", service, reason),
            SupervisorEvent::Stopping {
                service,
                description,
            } => write!(
                f,
                "Stopping service: [{}] -> Description: [{}]",
                service, description
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let record = ServiceRecord::new("sshd", vec!["/usr/sbin/sshd".to_string()])
            .with_description("OpenSSH daemon");

        assert_eq!(
            SupervisorEvent::started(&record, "/usr/sbin/sshd").to_string(),
            "sshd, [started]"
        );
        assert_eq!(
            SupervisorEvent::failed(&record, "/usr/sbin/sshd", "timeout after 5 secs").to_string(),
            "sshd, [failed], reason: timeout after 5 secs"
        );
        assert_eq!(
            SupervisorEvent::stopping(&record).to_string(),
            "Stopping service: [sshd] -> Description: [OpenSSH daemon]"
        );
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let record = ServiceRecord::new("cron", vec!["cron".to_string()]);
        let json = serde_json::to_value(SupervisorEvent::started(&record, "cron")).unwrap();

        assert_eq!(json["event"], "launch");
        assert_eq!(json["service"], "cron");
        assert_eq!(json["outcome"]["status"], "started");
    }

    #[test]
    fn test_new_record_uses_default_description() {
        let record = ServiceRecord::new("udev", vec!["udevd".to_string()]);
        assert_eq!(record.description, DEFAULT_DESCRIPTION);
        assert!(!record.blocking);
        assert_eq!(record.timeout_secs, None);
    }
}
