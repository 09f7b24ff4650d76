#[cfg(feature = "cli")]
pub mod cli;
pub mod init_file;
pub mod service_file;

use crate::domain::model::Config;
use crate::utils::error::{InitError, Result};
use init_file::InitFile;
use std::path::{Path, PathBuf};

impl Config {
    /// Loads the init file, discovers service files through its glob
    /// pattern and loads each one. Records keep discovery order.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let init = InitFile::from_file(path)?;

        let pattern = resolve_pattern(path, init.services_pattern());
        let service_paths = discover_services(&pattern)?;
        tracing::debug!("found {} service files with {}", service_paths.len(), pattern);

        let services = service_paths
            .iter()
            .map(|service_path| service_file::load_service(service_path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Config {
            path: Some(path.to_path_buf()),
            timeout_secs: init.timeout_secs(),
            start_message: init.start_message().to_string(),
            stop_message: init.stop_message().to_string(),
            services_pattern: pattern,
            services,
        })
    }
}

/// Relative patterns are taken relative to the init file's directory.
pub fn resolve_pattern(config_path: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }

    let base = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    base.join(pattern).to_string_lossy().into_owned()
}

/// Regular files matching `pattern`, in glob's (alphabetical) order.
pub fn discover_services(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| InitError::ServicePatternError {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| InitError::ServicePatternError {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        tracing::warn!("no service definitions match {}", pattern);
    }
    Ok(paths)
}
