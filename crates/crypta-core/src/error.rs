use thiserror::Error;

pub type CryptaResult<T> = Result<T, CryptaError>;

#[derive(Debug, Error)]
pub enum CryptaError {
    /// The user cancelled a prompt; only the current workflow is aborted.
    #[error("cancelled by user")]
    Cancelled,

    #[error("invalid input: {0}")]
    Validation(String),

    /// A primitive provider call failed; the message is the provider's diagnostic.
    #[error("{0}")]
    Primitive(String),

    #[error("no private key configured; choose one under Settings first")]
    MissingPrivateKey,

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CryptaError {
    /// Wrap a provider failure, keeping its whole context chain.
    pub fn primitive(err: anyhow::Error) -> Self {
        CryptaError::Primitive(format!("{err:#}"))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CryptaError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_keeps_context_chain() {
        let err = anyhow::anyhow!("bad padding").context("symmetric decryption failed");
        let wrapped = CryptaError::primitive(err);
        assert_eq!(
            wrapped.to_string(),
            "symmetric decryption failed: bad padding"
        );
    }

    #[test]
    fn test_cancelled_is_detected() {
        assert!(CryptaError::Cancelled.is_cancelled());
        assert!(!CryptaError::MissingPrivateKey.is_cancelled());
    }
}
