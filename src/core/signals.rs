use crate::utils::error::{InitError, Result};
use std::fmt;
use tokio::signal::unix::{signal, Signal, SignalKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationSignal::Interrupt => write!(f, "SIGINT"),
            TerminationSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// SIGINT and SIGTERM listeners. Once installed, the default action
/// (terminating the process) is replaced, so install before children start.
pub struct TerminationSignals {
    interrupt: Signal,
    terminate: Signal,
}

impl TerminationSignals {
    pub fn install() -> Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt()).map_err(InitError::SignalError)?,
            terminate: signal(SignalKind::terminate()).map_err(InitError::SignalError)?,
        })
    }

    /// Resolves on the first of SIGINT or SIGTERM.
    pub async fn recv(&mut self) -> TerminationSignal {
        tokio::select! {
            _ = self.interrupt.recv() => TerminationSignal::Interrupt,
            _ = self.terminate.recv() => TerminationSignal::Terminate,
        }
    }
}
