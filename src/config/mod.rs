//! Configuration module for envput
//!
//! This module provides configuration management including:
//! - Config file location
//! - The `.envputrc` project model and its validation
//! - Storage key derivation

pub mod paths;
pub mod project;

pub use paths::EnvputPaths;
pub use project::{AwsConfig, EnvironmentConfig, ProjectConfig};
