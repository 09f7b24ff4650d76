use anyhow::Context;
use clap::Parser;
use small_init::core::ordering;
use small_init::utils::logger;
use small_init::{CliArgs, Config, Supervisor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("CLI args: {:?}", args);
    tracing::info!("Loading configuration from: {}", args.config.display());

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed ({:?}): {}", e.category(), e);
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    if args.check {
        return print_roster(&config, args.json_logs);
    }

    let supervisor = Supervisor::with_defaults(config);
    if let Err(e) = supervisor.run().await {
        tracing::error!("Init failed ({:?}): {}", e.category(), e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }

    tracing::info!("Shutdown reported, exiting");
    Ok(())
}

fn print_roster(config: &Config, json: bool) -> anyhow::Result<()> {
    let ordered = ordering::sort_by_position(&config.services);

    if json {
        let rendered =
            serde_json::to_string_pretty(&ordered).context("failed to render service roster")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Configuration OK: {} services", ordered.len());
    for service in ordered {
        let timeout = ordering::effective_timeout(service.timeout_secs, config.timeout_secs);
        println!(
            "  [{}] {} ({}) - {} start step(s), {}",
            service.position,
            service.name,
            service.description,
            service.start_commands.len(),
            if service.blocking {
                format!("blocking, timeout {}s", timeout.as_secs())
            } else {
                "non-blocking".to_string()
            }
        );
    }
    Ok(())
}
