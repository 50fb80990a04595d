//! Process-lifetime session settings.
//!
//! Seeded from config at startup, changed only by the settings workflow,
//! never written back to disk.

use std::path::{Path, PathBuf};

use crate::config::{expand_tilde, SessionConfig};
use crate::error::{CryptaError, CryptaResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Directory every named artifact is written to.
    pub output_dir: PathBuf,
    /// The user's own RSA private key (PEM), if one has been chosen.
    pub private_key: Option<PathBuf>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            private_key: None,
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            output_dir: expand_tilde(&config.output_dir),
            private_key: config.private_key.as_deref().map(expand_tilde),
        }
    }

    /// Hard precondition for decrypting and signing. Never prompts.
    pub fn require_private_key(&self) -> CryptaResult<&Path> {
        self.private_key
            .as_deref()
            .ok_or(CryptaError::MissingPrivateKey)
    }

    /// Location of a named artifact inside the output directory.
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_cwd_and_no_key() {
        let s = SessionSettings::default();
        assert_eq!(s.output_dir, PathBuf::from("."));
        assert!(matches!(
            s.require_private_key(),
            Err(CryptaError::MissingPrivateKey)
        ));
    }

    #[test]
    fn test_from_config() {
        let config = SessionConfig {
            output_dir: PathBuf::from("/tmp/out"),
            private_key: Some(PathBuf::from("/tmp/me_PrKey_RSA.pem")),
        };
        let s = SessionSettings::from_config(&config);
        assert_eq!(s.artifact_path("msg.enc"), PathBuf::from("/tmp/out/msg.enc"));
        assert_eq!(
            s.require_private_key().unwrap(),
            Path::new("/tmp/me_PrKey_RSA.pem")
        );
    }
}
