//! Setup wizard steps
//!
//! Individual steps in the setup wizard flow. Each step keeps asking until
//! the answer passes validation.

pub mod environments;
pub mod project;
pub mod storage;

pub use environments::EnvironmentsStep;
pub use project::ProjectStep;
pub use storage::StorageStep;

use crate::cli::Prompt;
use crate::error::EnvputResult;

/// Ask until `validate` accepts the trimmed answer
pub(crate) fn ask_until_valid<F>(
    prompt: &mut dyn Prompt,
    message: &str,
    default: Option<&str>,
    validate: F,
) -> EnvputResult<String>
where
    F: Fn(&str) -> Result<(), String>,
{
    loop {
        let answer = prompt.input(message, default)?.trim().to_string();
        match validate(&answer) {
            Ok(()) => return Ok(answer),
            Err(problem) => println!("❌ {}", problem),
        }
    }
}

/// Validator for fields that only need to be present
pub(crate) fn required(field: &'static str) -> impl Fn(&str) -> Result<(), String> {
    move |answer: &str| {
        if answer.is_empty() {
            Err(format!("{} is required", field))
        } else {
            Ok(())
        }
    }
}
