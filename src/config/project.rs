//! Project configuration for envput
//!
//! One `.envputrc` per project: the shared passphrase, where the encrypted
//! blobs live in S3, and which local file belongs to each environment.

use std::collections::HashSet;

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::EnvputPaths;
use crate::crypto::SecureString;
use crate::error::{EnvputError, EnvputResult};
use crate::storage::file_io::write_json_atomic;

/// Random bytes behind a generated encryption key
const GENERATED_KEY_BYTES: usize = 32;

/// S3 location and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsConfig {
    /// Access key id; empty means "use the default AWS credential chain"
    #[serde(default)]
    pub access_key_id: String,

    /// Secret access key; empty means "use the default AWS credential chain"
    #[serde(default)]
    pub secret_access_key: SecureString,

    pub region: String,

    pub bucket: String,

    /// Prefix inside the bucket, e.g. "/" or "/configs/"
    pub bucket_path: String,
}

impl AwsConfig {
    /// Whether explicit credentials are configured
    pub fn has_static_credentials(&self) -> bool {
        !self.access_key_id.trim().is_empty() && !self.secret_access_key.is_blank()
    }
}

/// A named environment and its local file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub name: String,
    pub file: String,
}

impl EnvironmentConfig {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Contents of `.envputrc`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Namespace for this project's blobs
    pub project_name: String,

    /// Passphrase all environments are encrypted under
    pub encryption_key: SecureString,

    pub aws: AwsConfig,

    pub environments: Vec<EnvironmentConfig>,
}

impl ProjectConfig {
    /// Load and validate the config file
    pub fn load(paths: &EnvputPaths) -> EnvputResult<Self> {
        let config_path = paths.config_file();

        if !config_path.exists() {
            return Err(EnvputError::Config(format!(
                "{} does not exist. Run 'envput init' to create one.",
                config_path.display()
            )));
        }

        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            EnvputError::Config(format!(
                "Failed to read {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: ProjectConfig = serde_json::from_str(&contents).map_err(|e| {
            EnvputError::Config(format!(
                "Invalid config in {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        debug!(
            path = %config_path.display(),
            environments = config.environments.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Save the config to disk
    pub fn save(&self, paths: &EnvputPaths) -> EnvputResult<()> {
        self.validate()?;
        write_json_atomic(paths.config_file(), self)
    }

    /// Check required fields and environment uniqueness
    pub fn validate(&self) -> EnvputResult<()> {
        require("projectName", &self.project_name)?;
        if self.encryption_key.is_blank() {
            return Err(missing("encryptionKey"));
        }
        require("aws.region", &self.aws.region)?;
        require("aws.bucket", &self.aws.bucket)?;
        require("aws.bucketPath", &self.aws.bucket_path)?;

        let mut seen = HashSet::new();
        for (i, env) in self.environments.iter().enumerate() {
            if env.name.trim().is_empty() {
                return Err(EnvputError::Config(format!(
                    "Environment {} missing required field: name",
                    i
                )));
            }
            if env.file.trim().is_empty() {
                return Err(EnvputError::Config(format!(
                    "Environment {} missing required field: file",
                    i
                )));
            }
            if !seen.insert(env.name.as_str()) {
                return Err(EnvputError::Config(format!(
                    "Duplicate environment name: {}",
                    env.name
                )));
            }
        }

        Ok(())
    }

    /// Object key for an environment: `[prefix/]project/environment`
    pub fn storage_key(&self, environment: &str) -> String {
        storage_key(&self.aws.bucket_path, &self.project_name, environment)
    }

    /// Find an environment by name
    pub fn environment(&self, name: &str) -> EnvputResult<&EnvironmentConfig> {
        self.environments
            .iter()
            .find(|env| env.name == name)
            .ok_or_else(|| EnvputError::environment_not_found(name, self.environment_names()))
    }

    /// Names of all configured environments, in config order
    pub fn environment_names(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(|env| env.name.as_str())
    }
}

/// Build a storage key from a bucket prefix, project and environment
///
/// Surrounding whitespace and `/` are stripped from the prefix; an empty
/// prefix puts the project at the bucket root.
pub fn storage_key(prefix: &str, project: &str, environment: &str) -> String {
    let prefix = prefix.trim().trim_matches('/');

    if prefix.is_empty() {
        format!("{}/{}", project, environment)
    } else {
        format!("{}/{}/{}", prefix, project, environment)
    }
}

/// Generate a fresh project passphrase (32 random bytes, hex encoded)
pub fn generate_encryption_key() -> SecureString {
    let mut bytes = [0u8; GENERATED_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let key = SecureString::new(hex::encode(bytes));
    bytes.iter_mut().for_each(|b| *b = 0);
    key
}

/// Project and environment names: letters, digits, `-` and `_`
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn require(field: &str, value: &str) -> EnvputResult<()> {
    if value.trim().is_empty() {
        Err(missing(field))
    } else {
        Ok(())
    }
}

fn missing(field: &str) -> EnvputError {
    EnvputError::Config(format!("Configuration missing required field: {}", field))
}
