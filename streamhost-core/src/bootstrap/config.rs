//! Configuration loading

use std::path::Path;

use anyhow::Result;

use crate::Config;

const CWD_CONFIG: &str = "config.yaml";
const MOUNTED_CONFIG: &str = "/config/config.yaml";

/// Load configuration from a config file or environment variables
///
/// Config file search order:
/// 1. `explicit` (from `--config` or `STREAMHOST_CONFIG_PATH`)
/// 2. ./config.yaml (current working directory)
/// 3. /config/config.yaml (container mount path)
/// 4. Environment variables only
///
/// Logging is not initialized yet when this runs, so progress goes to stderr.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    let config_path = resolve_config_path(explicit)?;

    let config = match config_path {
        Some(path) => {
            eprintln!("Loading config from {path}");
            Config::from_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load {path}: {e}"))?
        }
        None => {
            eprintln!("No config file found, using environment variables");
            Config::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?
        }
    };

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Config validation error: {error}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s): {}",
            errors.len(),
            errors.join("; ")
        ));
    }

    Ok(config)
}

fn resolve_config_path(explicit: Option<&str>) -> Result<Option<String>> {
    if let Some(path) = explicit {
        if !Path::new(path).exists() {
            return Err(anyhow::anyhow!("Config file {path} does not exist"));
        }
        return Ok(Some(path.to_string()));
    }

    Ok([CWD_CONFIG, MOUNTED_CONFIG]
        .into_iter()
        .find(|p| Path::new(p).exists())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_LOCK;
    use std::io::Write;

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config(Some("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn invalid_file_fails_validation() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "proxy:\n  timeout_seconds: 0").unwrap();

        let err = load_config(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("proxy.timeout_seconds"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "server:\n  port: 4100").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.port, 4100);
    }
}
