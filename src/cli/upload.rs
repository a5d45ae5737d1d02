//! Upload command
//!
//! Reads a local environment file, encrypts it, packs the envelope and hands
//! the blob to the store.

use tracing::{debug, warn};

use super::{
    select_environment, user_message, BatchReport, ExistingPolicy, Prompt, Transfer,
    TransferArgs, Workspace,
};
use crate::config::EnvironmentConfig;
use crate::envelope::Envelope;
use crate::error::{EnvputError, EnvputResult};

/// Handle `envput upload`
pub async fn handle_upload_command(
    ws: &Workspace<'_>,
    args: &TransferArgs,
    prompt: &mut dyn Prompt,
) -> EnvputResult<()> {
    if args.all {
        return upload_all(ws, args.force, prompt).await?.into_result();
    }

    let env = select_environment(ws.config, args.requested(), prompt)?;
    upload_environment(ws, env, ExistingPolicy::single(args.force), prompt).await?;
    Ok(())
}

/// Upload every configured environment, isolating failures
pub async fn upload_all(
    ws: &Workspace<'_>,
    force: bool,
    prompt: &mut dyn Prompt,
) -> EnvputResult<BatchReport> {
    let mut report = BatchReport::new("uploaded");

    for env in &ws.config.environments {
        println!();
        println!("▶ {}", env.name);

        let result = upload_environment(ws, env, ExistingPolicy::batch(force), prompt).await;
        if let Err(err) = &result {
            warn!(environment = %env.name, error = %err, "upload failed");
            eprintln!("❌ {}: {}", env.name, user_message(err));
        }
        report.record(&env.name, result);
    }

    report.print_summary();
    Ok(report)
}

/// Encrypt and upload one environment
pub async fn upload_environment(
    ws: &Workspace<'_>,
    env: &EnvironmentConfig,
    policy: ExistingPolicy,
    prompt: &mut dyn Prompt,
) -> EnvputResult<Transfer> {
    let file_path = ws.paths.resolve_env_file(&env.file);
    if !file_path.is_file() {
        return Err(EnvputError::FileNotFound(file_path));
    }

    println!("📁 Reading file: {}", file_path.display());
    let contents = std::fs::read(&file_path).map_err(|e| {
        EnvputError::Io(format!("Failed to read {}: {}", file_path.display(), e))
    })?;

    let key = ws.config.storage_key(&env.name);
    let location = ws.store.location(&key);

    if policy != ExistingPolicy::Overwrite && ws.store.exists(&key).await? {
        match policy {
            ExistingPolicy::Skip => {
                println!("⏭️  Skipping '{}': already exists at {}", env.name, location);
                return Ok(Transfer::Skipped);
            }
            _ => {
                let message = format!(
                    "Environment '{}' already exists in S3. Overwrite?",
                    env.name
                );
                if !prompt.confirm(&message, false)? {
                    return Err(EnvputError::Cancelled("Upload cancelled".into()));
                }
            }
        }
    }

    println!("🔐 Encrypting {} environment...", env.name);
    let blob = Envelope::seal(&contents, ws.config.encryption_key.as_bytes()).to_bytes()?;
    debug!(environment = %env.name, %key, bytes = blob.len(), "sealed envelope");

    println!("☁️  Uploading to S3...");
    ws.store.put(&key, blob).await?;
    println!("✅ Successfully uploaded to {}", location);

    println!("🎉 Environment '{}' uploaded successfully!", env.name);
    Ok(Transfer::Completed)
}
