//! List command

use std::io::{self, Write};

use crate::config::ProjectConfig;
use crate::error::EnvputResult;

/// Handle `envput list`
pub fn handle_list_command(config: &ProjectConfig) -> EnvputResult<()> {
    let stdout = io::stdout();
    write_environment_list(&mut stdout.lock(), config)?;
    Ok(())
}

/// Write the configured environments with their files and S3 locations
pub fn write_environment_list<W: Write>(out: &mut W, config: &ProjectConfig) -> io::Result<()> {
    writeln!(out, "📋 Configured environments:")?;
    writeln!(out)?;

    if config.environments.is_empty() {
        writeln!(out, "No environments configured.")?;
        return Ok(());
    }

    for (i, env) in config.environments.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, env.name)?;
        writeln!(out, "   File: {}", env.file)?;
        writeln!(
            out,
            "   S3 Path: s3://{}/{}",
            config.aws.bucket,
            config.storage_key(&env.name)
        )?;
        writeln!(out)?;
    }

    Ok(())
}
