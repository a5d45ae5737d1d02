//! Project name step

use super::ask_until_valid;
use crate::cli::Prompt;
use crate::config::project::is_valid_name;
use crate::error::EnvputResult;

/// Asks for the project name used in storage keys
pub struct ProjectStep;

impl ProjectStep {
    pub fn run(prompt: &mut dyn Prompt) -> EnvputResult<String> {
        println!("📋 Project Configuration:");

        ask_until_valid(prompt, "Project name (used in S3 paths):", None, |name| {
            if name.is_empty() {
                Err("Project name is required".into())
            } else if !is_valid_name(name) {
                Err(
                    "Project name can only contain letters, numbers, hyphens, and underscores"
                        .into(),
                )
            } else {
                Ok(())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::scripted::ScriptedPrompt;

    #[test]
    fn test_reprompts_until_valid() {
        let mut prompt = ScriptedPrompt::new(["", "my app", "  my-app_2  "]);
        let name = ProjectStep::run(&mut prompt).unwrap();

        assert_eq!(name, "my-app_2");
        assert_eq!(prompt.asked.len(), 3);
    }
}
