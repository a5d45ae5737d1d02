//! Interactive project setup
//!
//! Walks a new user through creating `.envputrc`: project name, S3 location,
//! and the environments to manage.

pub mod steps;
pub mod wizard;

pub use wizard::SetupWizard;
