//! Environment list step

use super::{ask_until_valid, required};
use crate::cli::Prompt;
use crate::config::project::is_valid_name;
use crate::config::EnvironmentConfig;
use crate::error::EnvputResult;

/// Asks for one or more named environments and their local files
pub struct EnvironmentsStep;

impl EnvironmentsStep {
    pub fn run(prompt: &mut dyn Prompt) -> EnvputResult<Vec<EnvironmentConfig>> {
        println!();
        println!("📁 Environment Files:");

        let mut environments: Vec<EnvironmentConfig> = Vec::new();

        loop {
            let name = ask_until_valid(
                prompt,
                "Environment name (e.g., 'development', 'production'):",
                None,
                |name| {
                    if name.is_empty() {
                        Err("Environment name is required".into())
                    } else if !is_valid_name(name) {
                        Err("Environment name can only contain letters, numbers, hyphens, and underscores".into())
                    } else if environments.iter().any(|env| env.name == name) {
                        Err("Environment name must be unique".into())
                    } else {
                        Ok(())
                    }
                },
            )?;

            let default_file = format!(".env.{}", name);
            let file = ask_until_valid(
                prompt,
                "Local file path:",
                Some(&default_file),
                required("File path"),
            )?;

            environments.push(EnvironmentConfig::new(name, file));

            if !prompt.confirm("Add another environment?", false)? {
                break;
            }
        }

        Ok(environments)
    }
}
