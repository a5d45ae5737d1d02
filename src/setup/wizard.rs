//! Setup wizard orchestration
//!
//! Coordinates the setup steps, generates the shared encryption key and
//! writes the resulting config.

use tracing::debug;

use super::steps::{EnvironmentsStep, ProjectStep, StorageStep};
use crate::cli::Prompt;
use crate::config::paths::CONFIG_FILE;
use crate::config::project::generate_encryption_key;
use crate::config::{EnvputPaths, ProjectConfig};
use crate::error::EnvputResult;

/// The setup wizard
pub struct SetupWizard<'a> {
    paths: &'a EnvputPaths,
}

impl<'a> SetupWizard<'a> {
    pub fn new(paths: &'a EnvputPaths) -> Self {
        Self { paths }
    }

    /// Ask every question and build the config without touching disk
    pub fn build(&self, prompt: &mut dyn Prompt) -> EnvputResult<ProjectConfig> {
        println!("🚀 Creating new envput configuration...");
        println!();

        let project_name = ProjectStep::run(prompt)?;

        let encryption_key = generate_encryption_key();
        println!("🔑 Generated secure encryption key");

        let aws = StorageStep::run(prompt)?;
        let environments = EnvironmentsStep::run(prompt)?;

        Ok(ProjectConfig {
            project_name,
            encryption_key,
            aws,
            environments,
        })
    }

    /// Run the wizard and save the config
    pub fn run(&self, prompt: &mut dyn Prompt) -> EnvputResult<ProjectConfig> {
        let config = self.build(prompt)?;
        config.save(self.paths)?;
        debug!(path = %self.paths.config_file().display(), "wrote config");

        println!();
        println!(
            "🎉 Configuration created with {} environment(s)!",
            config.environments.len()
        );
        println!("✅ Configuration saved to {}", self.paths.config_file().display());
        println!("💡 Don't forget to add {} to your .gitignore file.", CONFIG_FILE);
        println!();
        println!("⚠️  CRITICAL WARNING: BACKUP YOUR ENCRYPTION KEY!");
        println!(
            "   If you lose your {} file, you will PERMANENTLY lose",
            CONFIG_FILE
        );
        println!("   access to ALL your encrypted environment files in S3.");
        println!("   Store this file securely in multiple locations!");

        Ok(config)
    }
}
