//! Init command

use super::Prompt;
use crate::config::EnvputPaths;
use crate::error::{EnvputError, EnvputResult};
use crate::setup::SetupWizard;

/// Handle `envput init`
pub fn handle_init_command(paths: &EnvputPaths, prompt: &mut dyn Prompt) -> EnvputResult<()> {
    if paths.config_exists()
        && !prompt.confirm("Configuration file already exists. Overwrite?", false)?
    {
        return Err(EnvputError::Cancelled("Initialization cancelled".into()));
    }

    SetupWizard::new(paths).run(prompt)?;
    Ok(())
}
