//! Signature verification against a sender's public key

use crypta_core::{CryptaError, CryptaResult, HashAlgorithm, SessionSettings, Verdict};
use crypta_crypto::{KeyRole, PrimitiveProvider};

use crate::interaction::{Interaction, Notice};
use crate::prompt;

pub fn verify(
    provider: &dyn PrimitiveProvider,
    data: &[u8],
    signature: &[u8],
    public_pem: &[u8],
    hash: HashAlgorithm,
) -> CryptaResult<Verdict> {
    let ok = provider
        .verify_signature(data, signature, public_pem, hash)
        .map_err(CryptaError::primitive)?;
    Ok(Verdict::from_bool(ok))
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    _settings: &SessionSettings,
) -> CryptaResult<Verdict> {
    let file = prompt::ask_input_file(io, "Original file")?;
    let signature = prompt::ask_input_file(io, "Signature (.sign)")?;
    let public = prompt::ask_key_file(io, provider, "Signer's public key", KeyRole::Public)?;
    let hash = prompt::choose_hash(io, "Hash algorithm used to sign")?;

    let verdict = verify(provider, &file.contents, &signature.contents, &public.contents, hash)?;
    tracing::info!(file = %file.path.display(), ?verdict, "signature checked");
    match verdict {
        Verdict::Valid => io.tell(
            Notice::Success,
            &format!(
                "Signature is valid: {} was signed by the owner of {}",
                file.display_name(),
                public.display_name()
            ),
        ),
        Verdict::Invalid => io.tell(
            Notice::Failure,
            "Signature is NOT valid for this file, key and hash algorithm",
        ),
    }
    Ok(verdict)
}
