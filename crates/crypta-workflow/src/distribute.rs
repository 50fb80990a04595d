//! Hybrid key distribution
//!
//! The symmetric key is wrapped for the recipient with their RSA public key
//! (`<name>.enc`), and a checksum over the *plaintext* key is produced next
//! to it so the recipient can confirm what they unwrapped.

use std::path::PathBuf;

use crypta_core::{ChecksumRecipe, CryptaError, CryptaResult, SessionSettings};
use crypta_crypto::{KeyRole, PrimitiveProvider, SymmetricKey};

use crate::artifact;
use crate::checksum::{self, ChecksumJob, ChecksumOutcome};
use crate::interaction::{Interaction, Notice};
use crate::prompt;
use crate::ExecutionMode;

#[derive(Debug, Clone)]
pub struct DistributionOutcome {
    pub wrapped_key_path: PathBuf,
    pub checksum: ChecksumOutcome,
}

pub fn distribute(
    provider: &dyn PrimitiveProvider,
    key: &SymmetricKey,
    recipient_public_pem: &[u8],
    name: &str,
    recipe: ChecksumRecipe,
    settings: &SessionSettings,
) -> CryptaResult<DistributionOutcome> {
    tracing::debug!(name, recipe = %recipe.tag(), "distributing key");
    let wrapped = provider
        .asymmetric_encrypt(key.as_bytes(), recipient_public_pem)
        .map_err(CryptaError::primitive)?;

    let wrapped_key_path = artifact::write_atomic(
        &settings.artifact_path(&artifact::distributed_key_name(name)),
        &wrapped,
    )?;

    let job = ChecksumJob {
        source_name: name,
        basename: name,
        data: key.as_bytes(),
        key,
        recipe,
    };
    let checksum = match checksum::checksum(provider, &job, ExecutionMode::Produce(settings)) {
        Ok(outcome) => outcome,
        Err(e) => {
            artifact::discard(&wrapped_key_path);
            return Err(e);
        }
    };

    Ok(DistributionOutcome {
        wrapped_key_path,
        checksum,
    })
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &SessionSettings,
) -> CryptaResult<DistributionOutcome> {
    let key = prompt::ask_key(io, "Symmetric key to distribute")?;
    let recipient = prompt::ask_key_file(io, provider, "Recipient's public key", KeyRole::Public)?;
    let name = prompt::ask_name(io, "Name for the distributed key")?;
    let recipe = prompt::choose_recipe(io)?;

    let outcome = distribute(provider, &key, &recipient.contents, &name, recipe, settings)?;

    let mut report = format!(
        "Key wrapped for {}:\n  key:        {}",
        recipient.display_name(),
        outcome.wrapped_key_path.display()
    );
    for path in [&outcome.checksum.checksum_path, &outcome.checksum.descriptor_path]
        .into_iter()
        .flatten()
    {
        report.push_str(&format!("\n  checksum:   {}", path.display()));
    }
    io.tell(Notice::Success, &report);
    Ok(outcome)
}
