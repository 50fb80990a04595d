//! Symmetric file encryption

use std::path::PathBuf;

use crypta_core::{Cipher, CryptaError, CryptaResult, SessionSettings};
use crypta_crypto::{Cryptogram, PrimitiveProvider, SymmetricKey};

use crate::artifact;
use crate::interaction::{Interaction, Notice};
use crate::prompt;
use crate::ExecutionMode;

#[derive(Debug, Clone)]
pub struct EncryptOutcome {
    pub cryptogram: Cryptogram,
    /// Set only in [`ExecutionMode::Produce`].
    pub path: Option<PathBuf>,
}

/// Encrypt `plaintext`, writing `<basename>.enc` when producing.
pub fn encrypt_bytes(
    provider: &dyn PrimitiveProvider,
    source_name: &str,
    plaintext: &[u8],
    key: &SymmetricKey,
    cipher: Cipher,
    mode: ExecutionMode<'_>,
) -> CryptaResult<EncryptOutcome> {
    tracing::debug!(source = source_name, %cipher, bytes = plaintext.len(), "encrypting");
    let cryptogram = provider
        .symmetric_encrypt(plaintext, key, cipher)
        .map_err(CryptaError::primitive)?;

    let path = match mode {
        ExecutionMode::Produce(settings) => {
            let name = artifact::cryptogram_name(&artifact::base_name(source_name));
            Some(artifact::write_atomic(
                &settings.artifact_path(&name),
                cryptogram.as_bytes(),
            )?)
        }
        ExecutionMode::Internal => None,
    };

    Ok(EncryptOutcome { cryptogram, path })
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &SessionSettings,
) -> CryptaResult<EncryptOutcome> {
    let file = prompt::ask_input_file(io, "File to encrypt")?;
    let key = prompt::ask_key(io, "Symmetric key")?;
    let cipher = prompt::choose_cipher(io, "Cipher")?;

    let outcome = encrypt_bytes(
        provider,
        &file.display_name(),
        &file.contents,
        &key,
        cipher,
        ExecutionMode::Produce(settings),
    )?;

    if let Some(path) = &outcome.path {
        io.tell(
            Notice::Success,
            &format!(
                "Encrypted with {} to {}. The same cipher is needed to decrypt.",
                cipher.label(),
                path.display()
            ),
        );
    }
    Ok(outcome)
}
