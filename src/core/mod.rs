pub mod environment;
pub mod launcher;
pub mod ordering;
pub mod signals;
pub mod supervisor;

pub use crate::domain::model::{Config, ServiceRecord, StartOutcome, SupervisorEvent};
pub use crate::domain::ports::{EventSink, Launcher};
pub use crate::utils::error::Result;
