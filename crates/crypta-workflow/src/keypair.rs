//! RSA key pair generation

use crypta_core::{CryptaError, CryptaResult, KeyBits, KeyPair, SessionSettings};
use crypta_crypto::PrimitiveProvider;

use crate::artifact;
use crate::interaction::{Interaction, Notice};
use crate::prompt;

/// Generate a key pair and store both halves under `name` in the output directory.
///
/// Both halves are produced in memory first. If the public key cannot be
/// written, the private key that was already written is removed again.
pub fn generate(
    provider: &dyn PrimitiveProvider,
    name: &str,
    bits: KeyBits,
    settings: &SessionSettings,
) -> CryptaResult<KeyPair> {
    tracing::debug!(name, bits = bits.bits(), "generating RSA key pair");
    let pair = provider
        .generate_key_pair(bits)
        .map_err(CryptaError::primitive)?;

    let private_key_path = settings.artifact_path(&artifact::private_key_name(name));
    let public_key_path = settings.artifact_path(&artifact::public_key_name(name));

    artifact::write_atomic(&private_key_path, pair.private_pem.as_bytes())?;
    if let Err(e) = artifact::write_atomic(&public_key_path, pair.public_pem.as_bytes()) {
        artifact::discard(&private_key_path);
        return Err(e);
    }

    Ok(KeyPair {
        private_key_path,
        public_key_path,
        bits,
    })
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &SessionSettings,
) -> CryptaResult<KeyPair> {
    let name = prompt::ask_name(io, "Key pair name")?;
    let bits = prompt::choose_bits(io)?;

    io.begin_task(&format!("Generating {bits} RSA key pair"));
    let result = generate(provider, &name, bits, settings);
    io.end_task();
    let pair = result?;

    io.tell(
        Notice::Success,
        &format!(
            "Key pair created:\n  private: {}\n  public:  {}",
            pair.private_key_path.display(),
            pair.public_key_path.display()
        ),
    );
    Ok(pair)
}
