//! Symmetric key material

use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

/// A user-supplied symmetric key (passphrase bytes). Zeroized on drop.
///
/// Never empty: construction fails on empty input.
#[derive(Clone)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
}

impl SymmetricKey {
    pub fn new(bytes: Vec<u8>) -> anyhow::Result<Self> {
        if bytes.is_empty() {
            anyhow::bail!("symmetric key must not be empty");
        }
        Ok(Self { bytes })
    }

    pub fn from_secret(secret: &SecretString) -> anyhow::Result<Self> {
        Self::new(secret.expose_secret().as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
