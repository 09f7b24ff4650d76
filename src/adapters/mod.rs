// Adapters layer: concrete implementations of the domain ports.

pub mod sinks;

pub use sinks::{ChannelSink, TracingSink};
