//! Top-level dispatcher: one workflow at a time until the user exits

use crypta_core::{CryptaError, CryptaResult, SessionSettings};
use crypta_crypto::PrimitiveProvider;

use crate::interaction::{Interaction, Notice};
use crate::{
    checksum, decrypt, distribute, encrypt, keypair, prompt, settings, sign, verify_checksum,
    verify_signature,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    GenerateKeyPair,
    Encrypt,
    DistributeKey,
    Decrypt,
    Checksum,
    Sign,
    VerifySignature,
    VerifyChecksum,
    Settings,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 10] = [
        MenuItem::GenerateKeyPair,
        MenuItem::Encrypt,
        MenuItem::DistributeKey,
        MenuItem::Decrypt,
        MenuItem::Checksum,
        MenuItem::Sign,
        MenuItem::VerifySignature,
        MenuItem::VerifyChecksum,
        MenuItem::Settings,
        MenuItem::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::GenerateKeyPair => "Generate RSA key pair",
            MenuItem::Encrypt => "Encrypt a file",
            MenuItem::DistributeKey => "Distribute a symmetric key",
            MenuItem::Decrypt => "Decrypt a message",
            MenuItem::Checksum => "Create MAC / HMAC",
            MenuItem::Sign => "Sign a file",
            MenuItem::VerifySignature => "Verify a signature",
            MenuItem::VerifyChecksum => "Verify MAC / HMAC",
            MenuItem::Settings => "Settings",
            MenuItem::Exit => "Exit",
        }
    }
}

/// Run the workflow behind `item` to completion.
pub fn dispatch(
    item: MenuItem,
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    session: &mut SessionSettings,
) -> CryptaResult<()> {
    tracing::debug!(?item, "dispatching");
    match item {
        MenuItem::GenerateKeyPair => keypair::run(provider, io, session).map(drop),
        MenuItem::Encrypt => encrypt::run(provider, io, session).map(drop),
        MenuItem::DistributeKey => distribute::run(provider, io, session).map(drop),
        MenuItem::Decrypt => decrypt::run(provider, io, session).map(drop),
        MenuItem::Checksum => checksum::run(provider, io, session).map(drop),
        MenuItem::Sign => sign::run(provider, io, session).map(drop),
        MenuItem::VerifySignature => verify_signature::run(provider, io, session).map(drop),
        MenuItem::VerifyChecksum => verify_checksum::run(provider, io, session).map(drop),
        MenuItem::Settings => settings::run(provider, io, session),
        MenuItem::Exit => Ok(()),
    }
}

/// Main loop. Workflow failures, cancellations and repeated bad menu
/// choices are reported and the menu is shown again; only
/// [`MenuItem::Exit`] (or cancelling the menu itself) returns.
pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    session: &mut SessionSettings,
) -> CryptaResult<()> {
    loop {
        let item = match prompt::choose_from(io, "crypta", &MenuItem::ALL, |m| {
            m.label().to_string()
        }) {
            Ok(item) => item,
            Err(CryptaError::Cancelled) => return Ok(()),
            Err(CryptaError::Validation(msg)) => {
                io.tell(Notice::Failure, &msg);
                continue;
            }
            Err(e) => return Err(e),
        };
        if item == MenuItem::Exit {
            return Ok(());
        }

        match dispatch(item, provider, io, session) {
            Ok(()) => {}
            Err(CryptaError::Cancelled) => io.tell(Notice::Info, "Cancelled"),
            Err(e) => {
                tracing::warn!(?item, "workflow failed: {e}");
                io.tell(Notice::Failure, &e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_operations_plus_exit() {
        assert_eq!(MenuItem::ALL.len(), 10);
        assert_eq!(MenuItem::ALL.last(), Some(&MenuItem::Exit));
    }
}
