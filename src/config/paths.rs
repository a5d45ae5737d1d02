//! Path management for envput
//!
//! The project config lives next to the code it describes.
//!
//! ## Path Resolution Order
//!
//! 1. `--config <path>` flag or `ENVPUT_CONFIG` environment variable
//! 2. `.envputrc` in the current working directory

use std::path::{Path, PathBuf};

use crate::error::EnvputError;

/// File name of the project config
pub const CONFIG_FILE: &str = ".envputrc";

/// Environment variable that overrides the config location
pub const CONFIG_ENV_VAR: &str = "ENVPUT_CONFIG";

/// Resolves the config file and the local environment files it references
#[derive(Debug, Clone)]
pub struct EnvputPaths {
    config_file: PathBuf,
    base_dir: PathBuf,
}

impl EnvputPaths {
    /// Create paths for the current working directory, honouring an explicit override
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn new(config_override: Option<PathBuf>) -> Result<Self, EnvputError> {
        let cwd = std::env::current_dir()
            .map_err(|e| EnvputError::Io(format!("Failed to read working directory: {}", e)))?;

        Ok(match config_override {
            Some(path) => Self::with_config_file(cwd.join(path), cwd),
            None => Self::with_base_dir(cwd),
        })
    }

    /// Use `.envputrc` inside a specific directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            config_file: base_dir.join(CONFIG_FILE),
            base_dir,
        }
    }

    /// Use an explicit config file; relative environment files resolve against `base_dir`
    pub fn with_config_file(config_file: PathBuf, base_dir: PathBuf) -> Self {
        Self {
            config_file,
            base_dir,
        }
    }

    /// Get the path to the config file
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Resolve an environment file path from the config
    pub fn resolve_env_file(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }

    /// Check if a config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvputPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.config_file(), temp_dir.path().join(".envputrc"));
        assert!(!paths.config_exists());
    }

    #[test]
    fn test_resolve_env_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvputPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.resolve_env_file(".env.production"),
            temp_dir.path().join(".env.production")
        );

        // Absolute paths are kept as they are
        let absolute = temp_dir.path().join("elsewhere").join(".env");
        assert_eq!(
            paths.resolve_env_file(absolute.to_str().unwrap()),
            absolute
        );
    }

    #[test]
    fn test_explicit_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("team.json");
        let paths = EnvputPaths::with_config_file(config.clone(), temp_dir.path().to_path_buf());

        std::fs::write(&config, "{}").unwrap();
        assert!(paths.config_exists());
        assert_eq!(paths.config_file(), config);
    }
}
