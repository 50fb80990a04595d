//! MAC and HMAC checksums
//!
//! ```text
//! MAC   value = Encrypt_k(hex(Hash(M)))   under an explicitly chosen cipher
//! HMAC  value = hex(HMAC_k(M))
//! ```
//!
//! The construction is fixed by the [`ChecksumRecipe`] before any data is
//! read. Values carry no labels or paths, so identical content gives
//! identical checksums wherever the file lives.

use std::path::PathBuf;

use zeroize::Zeroizing;

use crypta_core::{
    ChecksumRecipe, ChecksumRecord, Construction, CryptaError, CryptaResult, SessionSettings,
};
use crypta_crypto::{PrimitiveProvider, SymmetricKey};

use crate::artifact;
use crate::encrypt::encrypt_bytes;
use crate::interaction::{Interaction, Notice};
use crate::prompt;
use crate::ExecutionMode;

/// Drop an `ALG(source)= ` prefix, as printed by `openssl dgst`, and
/// surrounding whitespace.
pub fn strip_label(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.find(")= ") {
        Some(pos) if !trimmed[..pos].contains('\n') => trimmed[pos + 3..].trim_start(),
        _ => trimmed,
    }
}

/// Everything one checksum computation needs.
#[derive(Debug)]
pub struct ChecksumJob<'a> {
    /// Recorded in the descriptor header.
    pub source_name: &'a str,
    /// Prefix of the `.hex` / `.info` artifact names.
    pub basename: &'a str,
    pub data: &'a [u8],
    pub key: &'a SymmetricKey,
    pub recipe: ChecksumRecipe,
}

#[derive(Debug, Clone)]
pub struct ChecksumOutcome {
    pub record: ChecksumRecord,
    pub checksum_path: Option<PathBuf>,
    pub descriptor_path: Option<PathBuf>,
}

/// The checksum value for `data`, with all provider labels removed.
pub fn compute(
    provider: &dyn PrimitiveProvider,
    data: &[u8],
    key: &SymmetricKey,
    recipe: ChecksumRecipe,
) -> CryptaResult<Vec<u8>> {
    match recipe.construction {
        Construction::Mac { cipher } => {
            let digest = provider
                .digest(data, recipe.hash)
                .map_err(CryptaError::primitive)?;
            let digest_hex = Zeroizing::new(hex::encode(digest));
            let sealed = encrypt_bytes(
                provider,
                "digest",
                digest_hex.as_bytes(),
                key,
                cipher,
                ExecutionMode::Internal,
            )?;
            Ok(strip_label(sealed.cryptogram.as_str()).as_bytes().to_vec())
        }
        Construction::Hmac => {
            let tag = provider
                .hmac(data, key, recipe.hash)
                .map_err(CryptaError::primitive)?;
            Ok(hex::encode(tag).into_bytes())
        }
    }
}

/// Compute a checksum and, when producing, write its `.hex` and `.info`
/// artifacts. Either both files exist afterwards or neither does.
pub fn checksum(
    provider: &dyn PrimitiveProvider,
    job: &ChecksumJob<'_>,
    mode: ExecutionMode<'_>,
) -> CryptaResult<ChecksumOutcome> {
    tracing::debug!(source = job.source_name, recipe = %job.recipe.tag(), "computing checksum");
    let record = ChecksumRecord {
        recipe: job.recipe,
        source_name: job.source_name.to_string(),
        digest: compute(provider, job.data, job.key, job.recipe)?,
    };

    let settings = match mode {
        ExecutionMode::Produce(settings) => settings,
        ExecutionMode::Internal => {
            return Ok(ChecksumOutcome {
                record,
                checksum_path: None,
                descriptor_path: None,
            })
        }
    };

    let (checksum_path, descriptor_path) = write_checksum(&record, job.basename, settings)?;
    Ok(ChecksumOutcome {
        record,
        checksum_path: Some(checksum_path),
        descriptor_path: Some(descriptor_path),
    })
}

fn write_checksum(
    record: &ChecksumRecord,
    basename: &str,
    settings: &SessionSettings,
) -> CryptaResult<(PathBuf, PathBuf)> {
    let kind = record.kind();
    let checksum_path = settings.artifact_path(&artifact::checksum_name(basename, kind));
    let descriptor_path = settings.artifact_path(&artifact::descriptor_name(basename, kind));

    artifact::write_atomic(&checksum_path, &record.digest)?;
    if let Err(e) = artifact::write_atomic(&descriptor_path, &record.to_descriptor()) {
        artifact::discard(&checksum_path);
        return Err(e);
    }
    Ok((checksum_path, descriptor_path))
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &SessionSettings,
) -> CryptaResult<ChecksumOutcome> {
    let recipe = prompt::choose_recipe(io)?;
    let file = prompt::ask_input_file(io, "File to checksum")?;
    let key = prompt::ask_key(io, "Checksum key")?;

    let source_name = file.display_name();
    let basename = artifact::base_name(&source_name);
    let job = ChecksumJob {
        source_name: &source_name,
        basename: &basename,
        data: &file.contents,
        key: &key,
        recipe,
    };
    let outcome = checksum(provider, &job, ExecutionMode::Produce(settings))?;

    if let (Some(hex_path), Some(info_path)) = (&outcome.checksum_path, &outcome.descriptor_path) {
        io.tell(
            Notice::Success,
            &format!(
                "{} written:\n  checksum:   {}\n  descriptor: {}",
                recipe.kind().label(),
                hex_path.display(),
                info_path.display()
            ),
        );
    }
    io.tell(
        Notice::Warning,
        "The recipient needs the same key to verify. Send it over a secure channel (Distribute key).",
    );
    Ok(outcome)
}
