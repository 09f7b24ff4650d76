use tracing_subscriber::fmt::Layer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise only our own events below `info` are dropped.
fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "small_init=debug,info" } else { "small_init=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn bare_layer<S>() -> Layer<S> {
    tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
}

/// Human-readable lines for an interactive console.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(bare_layer().compact())
        .init();
}

/// One JSON object per line; serial consoles on cloud images are scraped that way.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(filter(false))
        .with(bare_layer().json())
        .init();
}
