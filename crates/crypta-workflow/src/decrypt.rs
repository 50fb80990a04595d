//! Decryption of a received message with a distributed key
//!
//! The unwrapped key can optionally be kept as `<name>.key` so it can be
//! checked against the checksum that was distributed with it.

use std::path::PathBuf;

use zeroize::Zeroizing;

use crypta_core::{Cipher, CryptaError, CryptaResult, SessionSettings};
use crypta_crypto::{PrimitiveProvider, SymmetricKey};

use crate::artifact;
use crate::interaction::{Interaction, Notice};
use crate::prompt;

/// Recover a distributed symmetric key with our private key.
pub fn unwrap_key(
    provider: &dyn PrimitiveProvider,
    wrapped_key: &[u8],
    private_pem: &[u8],
) -> CryptaResult<SymmetricKey> {
    let raw_key = Zeroizing::new(
        provider
            .asymmetric_decrypt(wrapped_key, private_pem)
            .map_err(CryptaError::primitive)?,
    );
    SymmetricKey::new(raw_key.to_vec()).map_err(CryptaError::primitive)
}

/// Unwrap the symmetric key with our private key, then decrypt the message.
///
/// Authenticity is not checked here; that is the checksum verification's job.
pub fn decrypt(
    provider: &dyn PrimitiveProvider,
    message: &[u8],
    wrapped_key: &[u8],
    private_pem: &[u8],
    cipher: Cipher,
) -> CryptaResult<Vec<u8>> {
    let key = unwrap_key(provider, wrapped_key, private_pem)?;
    provider
        .symmetric_decrypt(message, &key, cipher)
        .map_err(CryptaError::primitive)
}

/// Write the unwrapped key to the output directory as `<name>.key`.
///
/// The file is created owner-only, like every artifact written through
/// [`artifact::write_atomic`].
pub fn save_key(
    key: &SymmetricKey,
    name: &str,
    settings: &SessionSettings,
) -> CryptaResult<PathBuf> {
    let path = settings.artifact_path(&artifact::recovered_key_name(name));
    artifact::write_atomic(&path, key.as_bytes())
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &SessionSettings,
) -> CryptaResult<Vec<u8>> {
    let private_key_path = settings.require_private_key()?;
    let private_pem = Zeroizing::new(std::fs::read(private_key_path)?);

    let message = prompt::ask_input_file(io, "Encrypted message (.enc)")?;
    let wrapped_key = prompt::ask_input_file(io, "Encrypted key (.enc)")?;
    let cipher = prompt::choose_cipher(io, "Cipher the message was encrypted with")?;

    io.begin_task("Decrypting");
    let result = unwrap_key(provider, &wrapped_key.contents, &private_pem).and_then(|key| {
        let plaintext = provider
            .symmetric_decrypt(&message.contents, &key, cipher)
            .map_err(CryptaError::primitive)?;
        Ok((key, plaintext))
    });
    io.end_task();
    let (key, plaintext) = result?;

    tracing::info!(message = %message.path.display(), bytes = plaintext.len(), "message decrypted");
    io.tell(
        Notice::Success,
        &format!(
            "Decrypted {}:\n{}",
            message.display_name(),
            String::from_utf8_lossy(&plaintext)
        ),
    );

    // named after the wrapped key: forbob.enc -> forbob.key
    let name = artifact::base_name(&wrapped_key.display_name());
    let key_name = artifact::recovered_key_name(&name);
    let keep = prompt::choose_from(
        io,
        "Keep the unwrapped key for checksum verification?",
        &[false, true],
        |keep| {
            if *keep {
                format!("Yes, save it as {key_name}")
            } else {
                "No".to_string()
            }
        },
    );
    let keep = match keep {
        Ok(keep) => keep,
        Err(CryptaError::Cancelled) => false,
        Err(e) => return Err(e),
    };

    if keep {
        let path = save_key(&key, &name, settings)?;
        io.tell(
            Notice::Warning,
            &format!(
                "The key has not been authenticated. Verify its checksum with \
                 Verify MAC / HMAC, using {} as the original file.",
                path.display()
            ),
        );
    } else {
        io.tell(
            Notice::Warning,
            "The key has not been authenticated. Verify it against the checksum that came with it.",
        );
    }
    Ok(plaintext)
}
