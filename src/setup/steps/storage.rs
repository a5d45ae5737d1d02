//! S3 location and credentials step

use super::{ask_until_valid, required};
use crate::cli::Prompt;
use crate::config::AwsConfig;
use crate::crypto::SecureString;
use crate::error::EnvputResult;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET_PATH: &str = "/";

/// Asks where blobs are stored and how to authenticate
pub struct StorageStep;

impl StorageStep {
    pub fn run(prompt: &mut dyn Prompt) -> EnvputResult<AwsConfig> {
        println!();
        println!("📋 AWS Configuration:");
        println!("   Leave the access key empty to use the default AWS credential chain.");

        let access_key_id = prompt.input("AWS Access Key ID:", None)?.trim().to_string();

        let secret_access_key = if access_key_id.is_empty() {
            SecureString::default()
        } else {
            loop {
                let secret = SecureString::new(prompt.password("AWS Secret Access Key:")?);
                if !secret.is_blank() {
                    break SecureString::new(secret.as_str().trim());
                }
                println!("❌ Secret Access Key is required");
            }
        };

        let region = ask_until_valid(
            prompt,
            "AWS Region:",
            Some(DEFAULT_REGION),
            required("Region"),
        )?;
        let bucket = ask_until_valid(prompt, "S3 Bucket name:", None, required("Bucket name"))?;
        let bucket_path = ask_until_valid(
            prompt,
            "S3 Bucket path (directory within bucket):",
            Some(DEFAULT_BUCKET_PATH),
            |path| {
                if path.is_empty() {
                    Err("Bucket path is required".into())
                } else if !path.starts_with('/') {
                    Err("Bucket path must start with '/'".into())
                } else {
                    Ok(())
                }
            },
        )?;

        Ok(AwsConfig {
            access_key_id,
            secret_access_key,
            region,
            bucket,
            bucket_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::scripted::ScriptedPrompt;

    #[test]
    fn test_static_credentials_and_defaults() {
        let mut prompt = ScriptedPrompt::new(["AKIAEXAMPLE", "s3cret", "", "team-secrets", ""]);
        let aws = StorageStep::run(&mut prompt).unwrap();

        assert_eq!(aws.access_key_id, "AKIAEXAMPLE");
        assert_eq!(aws.secret_access_key.as_str(), "s3cret");
        assert_eq!(aws.region, DEFAULT_REGION);
        assert_eq!(aws.bucket, "team-secrets");
        assert_eq!(aws.bucket_path, DEFAULT_BUCKET_PATH);
        assert!(aws.has_static_credentials());
    }

    #[test]
    fn test_empty_access_key_skips_secret() {
        let mut prompt = ScriptedPrompt::new(["", "eu-west-1", "bucket", "/configs/"]);
        let aws = StorageStep::run(&mut prompt).unwrap();

        assert!(!aws.has_static_credentials());
        assert!(!prompt.asked.iter().any(|q| q.contains("Secret")));
        assert_eq!(aws.bucket_path, "/configs/");
    }

    #[test]
    fn test_bucket_path_must_start_with_slash() {
        let mut prompt = ScriptedPrompt::new(["", "", "bucket", "configs", "/configs"]);
        let aws = StorageStep::run(&mut prompt).unwrap();

        assert_eq!(aws.bucket_path, "/configs");
        assert_eq!(
            prompt
                .asked
                .iter()
                .filter(|q| q.starts_with("S3 Bucket path"))
                .count(),
            2
        );
    }
}
