//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the crypto and storage layers.

pub mod batch;
pub mod download;
pub mod init;
pub mod list;
pub mod prompt;
pub mod upload;

use clap::Args;

use crate::config::{EnvironmentConfig, EnvputPaths, ProjectConfig};
use crate::error::{EnvputError, EnvputResult};
use crate::storage::BlobStore;

pub use batch::BatchReport;
pub use download::{download_all, handle_download_command};
pub use init::handle_init_command;
pub use list::handle_list_command;
pub use prompt::{Prompt, TerminalPrompt};
pub use upload::{handle_upload_command, upload_all};

/// Shown for any failure to turn a stored blob back into plaintext
pub const DECRYPT_FAILURE_MESSAGE: &str =
    "Failed to decrypt file. The encryption key may be invalid or the file may be corrupted.";

/// Environment selection shared by `upload` and `download`
#[derive(Args, Debug, Clone, Default)]
pub struct TransferArgs {
    /// Environment name
    pub environment: Option<String>,

    /// Environment name (the positional argument wins if both are given)
    #[arg(short = 'e', long = "environment", value_name = "NAME")]
    pub environment_flag: Option<String>,

    /// Process every configured environment, skipping ones that already exist
    #[arg(long, conflicts_with_all = ["environment", "environment_flag"])]
    pub all: bool,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub force: bool,
}

impl TransferArgs {
    /// The explicitly requested environment, if any
    pub fn requested(&self) -> Option<&str> {
        self.environment
            .as_deref()
            .or(self.environment_flag.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// What to do when the destination already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingPolicy {
    /// Ask; declining cancels the command
    Ask,
    /// Leave it alone and report the environment as skipped
    Skip,
    /// Replace it
    Overwrite,
}

impl ExistingPolicy {
    /// Single-environment policy
    pub fn single(force: bool) -> Self {
        if force {
            Self::Overwrite
        } else {
            Self::Ask
        }
    }

    /// `--all` policy: never prompt
    pub fn batch(force: bool) -> Self {
        if force {
            Self::Overwrite
        } else {
            Self::Skip
        }
    }
}

/// Result of transferring one environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Completed,
    Skipped,
}

/// Everything a transfer command works against
pub struct Workspace<'a> {
    pub paths: &'a EnvputPaths,
    pub config: &'a ProjectConfig,
    pub store: &'a dyn BlobStore,
}

impl<'a> Workspace<'a> {
    pub fn new(paths: &'a EnvputPaths, config: &'a ProjectConfig, store: &'a dyn BlobStore) -> Self {
        Self {
            paths,
            config,
            store,
        }
    }
}

/// Resolve the environment to work on
///
/// An explicit name must exist. Without one, a single configured environment
/// is used directly and several are offered as a choice.
pub fn select_environment<'a>(
    config: &'a ProjectConfig,
    requested: Option<&str>,
    prompt: &mut dyn Prompt,
) -> EnvputResult<&'a EnvironmentConfig> {
    if let Some(name) = requested {
        return config.environment(name);
    }

    match config.environments.as_slice() {
        [] => Err(EnvputError::Config(
            "No environments configured. Run 'envput init' to add some.".into(),
        )),
        [only] => Ok(only),
        environments => {
            let choices: Vec<String> = environments
                .iter()
                .map(|env| format!("{} ({})", env.name, env.file))
                .collect();
            let index = prompt.select("Select environment:", &choices)?;
            Ok(&environments[index])
        }
    }
}

/// User-facing text for an error
///
/// Malformed envelopes and padding failures share one message: a wrong key and
/// corrupted data look the same to the cipher.
pub fn user_message(err: &EnvputError) -> String {
    if err.is_decryption() {
        DECRYPT_FAILURE_MESSAGE.to_string()
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::prompt::scripted::ScriptedPrompt;
    use super::*;
    use crate::config::AwsConfig;

    fn config_with(envs: &[(&str, &str)]) -> ProjectConfig {
        ProjectConfig {
            project_name: "myapp".into(),
            encryption_key: "pass".into(),
            aws: AwsConfig {
                access_key_id: String::new(),
                secret_access_key: Default::default(),
                region: "us-east-1".into(),
                bucket: "bucket".into(),
                bucket_path: "/".into(),
            },
            environments: envs
                .iter()
                .map(|(name, file)| EnvironmentConfig::new(*name, *file))
                .collect(),
        }
    }

    #[test]
    fn test_positional_beats_flag() {
        let args = TransferArgs {
            environment: Some("production".into()),
            environment_flag: Some("development".into()),
            ..Default::default()
        };
        assert_eq!(args.requested(), Some("production"));

        let args = TransferArgs {
            environment_flag: Some("development".into()),
            ..Default::default()
        };
        assert_eq!(args.requested(), Some("development"));
    }

    #[test]
    fn test_select_named_environment() {
        let config = config_with(&[("dev", ".env.dev"), ("prod", ".env.prod")]);
        let mut prompt = ScriptedPrompt::default();

        let env = select_environment(&config, Some("prod"), &mut prompt).unwrap();
        assert_eq!(env.file, ".env.prod");

        let err = select_environment(&config, Some("qa"), &mut prompt).unwrap_err();
        assert!(matches!(err, EnvputError::EnvironmentNotFound { .. }));
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_select_single_environment_without_prompt() {
        let config = config_with(&[("dev", ".env.dev")]);
        let mut prompt = ScriptedPrompt::default();

        let env = select_environment(&config, None, &mut prompt).unwrap();
        assert_eq!(env.name, "dev");
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_select_prompts_between_several() {
        let config = config_with(&[("dev", ".env.dev"), ("prod", ".env.prod")]);
        let mut prompt = ScriptedPrompt::new(["prod"]);

        let env = select_environment(&config, None, &mut prompt).unwrap();
        assert_eq!(env.name, "prod");
        assert_eq!(prompt.asked, vec!["Select environment:"]);
    }

    #[test]
    fn test_select_with_no_environments() {
        let config = config_with(&[]);
        let mut prompt = ScriptedPrompt::default();

        assert!(matches!(
            select_environment(&config, None, &mut prompt),
            Err(EnvputError::Config(_))
        ));
    }

    #[test]
    fn test_user_message_for_decryption() {
        let err = EnvputError::MalformedEnvelope("blob is 3 bytes".into());
        assert_eq!(user_message(&err), DECRYPT_FAILURE_MESSAGE);

        let err = EnvputError::StorageNotFound("s3://b/k".into());
        assert_eq!(user_message(&err), "File not found: s3://b/k");
    }
}
