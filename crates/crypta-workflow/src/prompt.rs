//! Validated prompts shared by all workflows
//!
//! Invalid answers are reported and asked again, at most [`MAX_ATTEMPTS`]
//! times. Cancellation and any non-validation error end the loop at once.

use std::path::PathBuf;

use crypta_core::{
    ChecksumKind, ChecksumRecipe, Cipher, CryptaError, CryptaResult, HashAlgorithm, KeyBits,
};
use crypta_crypto::{KeyRole, PrimitiveProvider, SymmetricKey};

use crate::interaction::{Interaction, Notice};

pub const MAX_ATTEMPTS: usize = 5;

/// A file chosen by the user together with its contents.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl LoadedFile {
    /// File name used to label artifacts and descriptors.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Repeat `attempt` while it fails validation.
pub fn with_retries<T>(
    io: &mut dyn Interaction,
    mut attempt: impl FnMut(&mut dyn Interaction) -> CryptaResult<T>,
) -> CryptaResult<T> {
    let mut last = String::new();
    for _ in 0..MAX_ATTEMPTS {
        match attempt(&mut *io) {
            Err(CryptaError::Validation(msg)) => {
                io.tell(Notice::Warning, &msg);
                last = msg;
            }
            other => return other,
        }
    }
    Err(CryptaError::Validation(format!(
        "{last} (gave up after {MAX_ATTEMPTS} attempts)"
    )))
}

/// Remove every whitespace character from a user-entered name.
pub fn normalize_name(raw: &str) -> CryptaResult<String> {
    let name: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if name.is_empty() {
        return Err(CryptaError::Validation("name must not be empty".into()));
    }
    Ok(name)
}

pub fn ask_name(io: &mut dyn Interaction, prompt: &str) -> CryptaResult<String> {
    with_retries(io, |io| normalize_name(&io.ask_text(prompt)?))
}

pub fn ask_key(io: &mut dyn Interaction, prompt: &str) -> CryptaResult<SymmetricKey> {
    with_retries(io, |io| {
        let secret = io.ask_secret(prompt)?;
        SymmetricKey::from_secret(&secret)
            .map_err(|_| CryptaError::Validation("key must not be empty".into()))
    })
}

/// Accept `path` only if it names a readable, non-empty file.
pub fn load_file(path: PathBuf) -> CryptaResult<LoadedFile> {
    if path.as_os_str().is_empty() {
        return Err(CryptaError::Validation("no file selected".into()));
    }
    if !path.is_file() {
        return Err(CryptaError::Validation(format!(
            "not a file: {}",
            path.display()
        )));
    }
    let contents = std::fs::read(&path).map_err(|e| {
        CryptaError::Validation(format!("cannot read {}: {e}", path.display()))
    })?;
    if contents.is_empty() {
        return Err(CryptaError::Validation(format!(
            "file is empty: {}",
            path.display()
        )));
    }
    Ok(LoadedFile { path, contents })
}

/// Ask for an existing, readable, non-empty file.
pub fn ask_input_file(io: &mut dyn Interaction, prompt: &str) -> CryptaResult<LoadedFile> {
    with_retries(io, |io| load_file(io.ask_file(prompt)?))
}

/// Ask for a PEM file that the provider accepts as the given key role.
pub fn ask_key_file(
    io: &mut dyn Interaction,
    provider: &dyn PrimitiveProvider,
    prompt: &str,
    role: KeyRole,
) -> CryptaResult<LoadedFile> {
    with_retries(io, |io| {
        let file = load_file(io.ask_file(prompt)?)?;
        if !provider.validate_key(&file.contents, role) {
            let what = match role {
                KeyRole::Public => "public",
                KeyRole::Private => "private",
            };
            return Err(CryptaError::Validation(format!(
                "{} is not a valid RSA {what} key",
                file.path.display()
            )));
        }
        Ok(file)
    })
}

/// Ask for an existing directory.
pub fn ask_existing_dir(io: &mut dyn Interaction, prompt: &str) -> CryptaResult<PathBuf> {
    with_retries(io, |io| {
        let dir = io.ask_directory(prompt)?;
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(CryptaError::Validation(format!(
                "not a directory: {}",
                dir.display()
            )))
        }
    })
}

/// Single choice over `items`, labelled by `label`.
pub fn choose_from<T: Copy>(
    io: &mut dyn Interaction,
    prompt: &str,
    items: &[T],
    label: impl Fn(&T) -> String,
) -> CryptaResult<T> {
    let options: Vec<String> = items.iter().map(label).collect();
    with_retries(io, |io| {
        let idx = io.choose(prompt, &options)?;
        items
            .get(idx)
            .copied()
            .ok_or_else(|| CryptaError::Validation(format!("no option number {}", idx + 1)))
    })
}

pub fn choose_cipher(io: &mut dyn Interaction, prompt: &str) -> CryptaResult<Cipher> {
    choose_from(io, prompt, &Cipher::ALL, |c| c.label().to_string())
}

pub fn choose_hash(io: &mut dyn Interaction, prompt: &str) -> CryptaResult<HashAlgorithm> {
    choose_from(io, prompt, &HashAlgorithm::ALL, |h| h.label().to_string())
}

pub fn choose_bits(io: &mut dyn Interaction) -> CryptaResult<KeyBits> {
    choose_from(io, "Key length", &KeyBits::ALL, |b| b.to_string())
}

/// Kind first; MAC additionally needs the cipher that encrypts the digest.
pub fn choose_recipe(io: &mut dyn Interaction) -> CryptaResult<ChecksumRecipe> {
    let kind = choose_from(io, "Checksum type", &ChecksumKind::ALL, |k| {
        k.label().to_string()
    })?;
    let hash = choose_hash(io, "Hash algorithm")?;
    match kind {
        ChecksumKind::Mac => {
            let cipher = choose_cipher(io, "Cipher for the MAC")?;
            Ok(ChecksumRecipe::mac(cipher, hash))
        }
        ChecksumKind::Hmac => Ok(ChecksumRecipe::hmac(hash)),
    }
}
