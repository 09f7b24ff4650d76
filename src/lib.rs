pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{ChannelSink, TracingSink};
pub use core::environment::Environment;
pub use core::launcher::ShellLauncher;
pub use core::supervisor::{Supervisor, SupervisorState};
pub use domain::model::{Config, ServiceRecord, StartOutcome, SupervisorEvent};
pub use utils::error::{InitError, Result};
