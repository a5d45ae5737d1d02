//! Download command
//!
//! Fetches a blob, unpacks and decrypts it, and only then writes the local
//! environment file.

use tracing::{debug, warn};

use super::{
    select_environment, user_message, BatchReport, ExistingPolicy, Prompt, Transfer,
    TransferArgs, Workspace,
};
use crate::config::EnvironmentConfig;
use crate::envelope::Envelope;
use crate::error::{EnvputError, EnvputResult};
use crate::storage::file_io::write_atomic;

/// Handle `envput download`
pub async fn handle_download_command(
    ws: &Workspace<'_>,
    args: &TransferArgs,
    prompt: &mut dyn Prompt,
) -> EnvputResult<()> {
    if args.all {
        return download_all(ws, args.force, prompt).await?.into_result();
    }

    let env = select_environment(ws.config, args.requested(), prompt)?;
    download_environment(ws, env, ExistingPolicy::single(args.force), prompt).await?;
    Ok(())
}

/// Download every configured environment, isolating failures
pub async fn download_all(
    ws: &Workspace<'_>,
    force: bool,
    prompt: &mut dyn Prompt,
) -> EnvputResult<BatchReport> {
    let mut report = BatchReport::new("downloaded");

    for env in &ws.config.environments {
        println!();
        println!("▶ {}", env.name);

        let result = download_environment(ws, env, ExistingPolicy::batch(force), prompt).await;
        if let Err(err) = &result {
            warn!(environment = %env.name, error = %err, "download failed");
            eprintln!("❌ {}: {}", env.name, user_message(err));
        }
        report.record(&env.name, result);
    }

    report.print_summary();
    Ok(report)
}

/// Download and decrypt one environment into its local file
pub async fn download_environment(
    ws: &Workspace<'_>,
    env: &EnvironmentConfig,
    policy: ExistingPolicy,
    prompt: &mut dyn Prompt,
) -> EnvputResult<Transfer> {
    let file_path = ws.paths.resolve_env_file(&env.file);

    if file_path.exists() {
        match policy {
            ExistingPolicy::Overwrite => {}
            ExistingPolicy::Skip => {
                println!(
                    "⏭️  Skipping '{}': local file already exists: {}",
                    env.name,
                    file_path.display()
                );
                return Ok(Transfer::Skipped);
            }
            ExistingPolicy::Ask => {
                let message = format!(
                    "Local file already exists: {}. Overwrite?",
                    file_path.display()
                );
                if !prompt.confirm(&message, false)? {
                    return Err(EnvputError::Cancelled("Download cancelled".into()));
                }
            }
        }
    }

    println!("☁️  Downloading {} environment from S3...", env.name);
    let key = ws.config.storage_key(&env.name);
    let blob = ws.store.get(&key).await?;
    println!("✅ Successfully downloaded from {}", ws.store.location(&key));

    println!("🔓 Decrypting file...");
    let plaintext = Envelope::from_bytes(&blob)
        .and_then(|envelope| envelope.open(ws.config.encryption_key.as_bytes()))
        .map_err(|err| {
            debug!(environment = %env.name, error = %err, "could not open envelope");
            err
        })?;

    println!("📁 Writing to file: {}", file_path.display());
    write_atomic(&file_path, &plaintext)?;

    println!("🎉 Environment '{}' downloaded successfully!", env.name);
    Ok(Transfer::Completed)
}
