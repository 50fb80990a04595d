//! Digital signatures with the session's private key

use std::path::PathBuf;

use zeroize::Zeroizing;

use crypta_core::{CryptaError, CryptaResult, HashAlgorithm, SessionSettings};
use crypta_crypto::PrimitiveProvider;

use crate::artifact;
use crate::interaction::{Interaction, Notice};
use crate::prompt;

/// Sign `data` and write the raw signature to `<basename>.sign`.
pub fn sign(
    provider: &dyn PrimitiveProvider,
    source_name: &str,
    data: &[u8],
    private_pem: &[u8],
    hash: HashAlgorithm,
    settings: &SessionSettings,
) -> CryptaResult<PathBuf> {
    tracing::debug!(source = source_name, %hash, "signing");
    let signature = provider
        .sign(data, private_pem, hash)
        .map_err(CryptaError::primitive)?;

    let name = artifact::signature_name(&artifact::base_name(source_name));
    artifact::write_atomic(&settings.artifact_path(&name), &signature)
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &SessionSettings,
) -> CryptaResult<PathBuf> {
    let private_key_path = settings.require_private_key()?;
    let private_pem = Zeroizing::new(std::fs::read(private_key_path)?);

    let file = prompt::ask_input_file(io, "File to sign")?;
    let hash = prompt::choose_hash(io, "Hash algorithm")?;

    let path = sign(
        provider,
        &file.display_name(),
        &file.contents,
        &private_pem,
        hash,
        settings,
    )?;
    io.tell(
        Notice::Success,
        &format!(
            "Signature ({}) written to {}",
            hash.label(),
            path.display()
        ),
    );
    Ok(path)
}
