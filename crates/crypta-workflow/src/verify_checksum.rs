//! Checksum verification
//!
//! The stored value is recomputed from the source file in internal mode and
//! compared byte for byte. A mismatch is a [`Verdict::Invalid`], not an error.

use crypta_core::{ChecksumRecipe, ChecksumRecord, CryptaResult, SessionSettings, Verdict};
use crypta_crypto::{PrimitiveProvider, SymmetricKey};

use crate::checksum::{self, strip_label, ChecksumJob};
use crate::interaction::{Interaction, Notice};
use crate::prompt::{self, LoadedFile};
use crate::ExecutionMode;

/// A checksum as read back from disk.
#[derive(Debug, Clone)]
pub struct StoredChecksum {
    pub value: Vec<u8>,
    /// Present when the file was a descriptor.
    pub recipe: Option<ChecksumRecipe>,
    pub source_name: Option<String>,
}

impl StoredChecksum {
    /// `.info` files are parsed as descriptors; anything else is a bare value.
    pub fn from_file(file: &LoadedFile) -> CryptaResult<Self> {
        let is_descriptor = file
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("info"));
        if is_descriptor {
            let record = ChecksumRecord::from_descriptor(&file.contents)?;
            Ok(Self {
                value: record.digest,
                recipe: Some(record.recipe),
                source_name: Some(record.source_name),
            })
        } else {
            Ok(Self {
                value: file.contents.clone(),
                recipe: None,
                source_name: None,
            })
        }
    }
}

/// Recompute the checksum of `data` and compare it with `stored`.
pub fn verify(
    provider: &dyn PrimitiveProvider,
    stored: &[u8],
    data: &[u8],
    key: &SymmetricKey,
    recipe: ChecksumRecipe,
) -> CryptaResult<Verdict> {
    let job = ChecksumJob {
        source_name: "-",
        basename: "-",
        data,
        key,
        recipe,
    };
    let recomputed = checksum::checksum(provider, &job, ExecutionMode::Internal)?.record;
    // armoured MAC values may have picked up CRLF line endings in transit
    let stored = String::from_utf8_lossy(stored).replace("\r\n", "\n");
    let verdict =
        Verdict::from_bool(strip_label(&stored).as_bytes() == recomputed.digest.as_slice());
    tracing::debug!(recipe = %recipe.tag(), ?verdict, "checksum verified");
    Ok(verdict)
}

pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    _settings: &SessionSettings,
) -> CryptaResult<Verdict> {
    let stored = prompt::with_retries(io, |io| {
        let file = prompt::load_file(io.ask_file("Checksum file (.hex or .info)")?)?;
        StoredChecksum::from_file(&file)
    })?;

    let recipe = match stored.recipe {
        Some(recipe) => {
            io.tell(
                Notice::Info,
                &format!(
                    "Descriptor: {} over {}",
                    recipe.tag(),
                    stored.source_name.as_deref().unwrap_or("?")
                ),
            );
            recipe
        }
        None => prompt::choose_recipe(io)?,
    };

    let file = prompt::ask_input_file(io, "Original file")?;
    let key = prompt::ask_key(io, "Checksum key")?;

    let verdict = verify(provider, &stored.value, &file.contents, &key, recipe)?;
    match verdict {
        Verdict::Valid => io.tell(
            Notice::Success,
            &format!("{} is valid for {}", recipe.kind().label(), file.display_name()),
        ),
        Verdict::Invalid => io.tell(
            Notice::Failure,
            &format!(
                "{} does NOT match {}: wrong key, wrong parameters, or the file was altered",
                recipe.kind().label(),
                file.display_name()
            ),
        ),
    }
    Ok(verdict)
}
