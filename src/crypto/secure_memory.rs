//! Secure memory handling for sensitive data
//!
//! Provides a passphrase type that zeroes its memory on drop and never
//! prints its contents.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

/// A string type that zeros its contents on drop
///
/// Use this for passphrases and other sensitive string data. It serializes
/// as a plain JSON string so it can live directly inside the config file model.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString {
    inner: Zeroizing<String>,
}

impl SecureString {
    /// Create a new SecureString
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    /// Get the string contents
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Get the length
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty (or whitespace only)
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl Default for SecureString {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl AsRef<str> for SecureString {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for SecureString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for SecureString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_creation() {
        let s = SecureString::new("test");
        assert_eq!(s.as_str(), "test");
        assert_eq!(s.len(), 4);
        assert!(!s.is_blank());
        assert!(SecureString::new("  ").is_blank());
    }

    #[test]
    fn test_secure_string_debug_and_display_redact() {
        let s = SecureString::new("hunter2-secret");
        let debug = format!("{:?}", s);
        let display = format!("{}", s);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("SecureString"));
        assert!(!display.contains("hunter2"));
        assert!(display.contains("REDACTED"));
    }

    #[test]
    fn test_secure_string_serializes_as_plain_string() {
        let s = SecureString::new("abc123");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"abc123\"");

        let back: SecureString = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "abc123");
    }
}
