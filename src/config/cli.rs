use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-init")]
#[command(about = "A minimal init: starts configured services and waits for SIGINT/SIGTERM")]
pub struct CliArgs {
    /// Path to the TOML init file
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log records as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Load and validate the configuration, print the start order and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = CliArgs::try_parse_from(["small-init", "/etc/init.toml", "--check", "-v"]).unwrap();
        assert_eq!(args.config, PathBuf::from("/etc/init.toml"));
        assert!(args.check);
        assert!(args.verbose);
        assert!(!args.json_logs);
    }

    #[test]
    fn test_config_path_is_required() {
        let err = CliArgs::try_parse_from(["small-init"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
