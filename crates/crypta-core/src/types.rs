use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CryptaError;

/// Symmetric cipher used for cryptograms and MAC construction.
///
/// The cipher is never stored alongside a cryptogram: whoever decrypts must
/// supply the same one that was used to encrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cipher {
    #[serde(rename = "des")]
    Des,
    #[serde(rename = "des3")]
    TripleDes,
    #[serde(rename = "bf")]
    Blowfish,
    #[serde(rename = "aes256")]
    Aes256,
}

impl Cipher {
    pub const ALL: [Cipher; 4] = [Cipher::Des, Cipher::TripleDes, Cipher::Blowfish, Cipher::Aes256];

    pub fn id(&self) -> &'static str {
        match self {
            Cipher::Des => "des",
            Cipher::TripleDes => "des3",
            Cipher::Blowfish => "bf",
            Cipher::Aes256 => "aes256",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cipher::Des => "DES",
            Cipher::TripleDes => "3DES",
            Cipher::Blowfish => "Blowfish",
            Cipher::Aes256 => "AES-256",
        }
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Cipher {
    type Err = CryptaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cipher::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| CryptaError::Validation(format!("unknown cipher: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha224 => "SHA-224",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|h| h.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| CryptaError::Validation(format!("unknown hash algorithm: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumKind {
    Mac,
    Hmac,
}

impl ChecksumKind {
    pub const ALL: [ChecksumKind; 2] = [ChecksumKind::Mac, ChecksumKind::Hmac];

    pub fn id(&self) -> &'static str {
        match self {
            ChecksumKind::Mac => "mac",
            ChecksumKind::Hmac => "hmac",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChecksumKind::Mac => "MAC (encrypted digest)",
            ChecksumKind::Hmac => "HMAC (keyed digest)",
        }
    }
}

impl fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChecksumKind {
    type Err = CryptaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChecksumKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| CryptaError::Validation(format!("unknown checksum kind: {s}")))
    }
}

/// Recommended RSA modulus sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyBits {
    B1024,
    B2048,
    B3072,
    B4096,
}

impl KeyBits {
    pub const ALL: [KeyBits; 4] = [KeyBits::B1024, KeyBits::B2048, KeyBits::B3072, KeyBits::B4096];

    pub fn bits(&self) -> usize {
        match self {
            KeyBits::B1024 => 1024,
            KeyBits::B2048 => 2048,
            KeyBits::B3072 => 3072,
            KeyBits::B4096 => 4096,
        }
    }
}

impl fmt::Display for KeyBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

/// A freshly generated key pair as written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub bits: KeyBits,
}

/// How a checksum is built. Chosen once, before any data is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construction {
    /// Encrypt_k(Hash(M)) with an explicitly chosen cipher.
    Mac { cipher: Cipher },
    /// HMAC(M, k).
    Hmac,
}

impl Construction {
    pub fn kind(&self) -> ChecksumKind {
        match self {
            Construction::Mac { .. } => ChecksumKind::Mac,
            Construction::Hmac => ChecksumKind::Hmac,
        }
    }

    pub fn cipher(&self) -> Option<Cipher> {
        match self {
            Construction::Mac { cipher } => Some(*cipher),
            Construction::Hmac => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumRecipe {
    pub construction: Construction,
    pub hash: HashAlgorithm,
}

impl ChecksumRecipe {
    pub fn mac(cipher: Cipher, hash: HashAlgorithm) -> Self {
        Self {
            construction: Construction::Mac { cipher },
            hash,
        }
    }

    pub fn hmac(hash: HashAlgorithm) -> Self {
        Self {
            construction: Construction::Hmac,
            hash,
        }
    }

    pub fn kind(&self) -> ChecksumKind {
        self.construction.kind()
    }

    /// `mac-aes256-sha256` / `hmac-sha256`
    pub fn tag(&self) -> String {
        match self.construction {
            Construction::Mac { cipher } => format!("mac-{cipher}-{}", self.hash),
            Construction::Hmac => format!("hmac-{}", self.hash),
        }
    }

    pub fn parse_tag(tag: &str) -> Result<Self, CryptaError> {
        let parts: Vec<&str> = tag.trim().split('-').collect();
        match parts.as_slice() {
            [kind, hash] if kind.parse::<ChecksumKind>()? == ChecksumKind::Hmac => {
                Ok(Self::hmac(hash.parse()?))
            }
            [kind, cipher, hash] if kind.parse::<ChecksumKind>()? == ChecksumKind::Mac => {
                Ok(Self::mac(cipher.parse()?, hash.parse()?))
            }
            _ => Err(CryptaError::Validation(format!(
                "malformed checksum recipe: {tag}"
            ))),
        }
    }
}

/// A computed checksum together with everything needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    pub recipe: ChecksumRecipe,
    pub source_name: String,
    /// Checksum value with all provider metadata removed.
    pub digest: Vec<u8>,
}

impl ChecksumRecord {
    pub fn kind(&self) -> ChecksumKind {
        self.recipe.kind()
    }

    pub fn cipher(&self) -> Option<Cipher> {
        self.recipe.construction.cipher()
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.recipe.hash
    }

    /// First line of the `.info` descriptor: `<recipe>: <source>`.
    pub fn descriptor_header(&self) -> String {
        format!("{}: {}", self.recipe.tag(), self.source_name)
    }

    /// Descriptor artifact: header line, newline, then the digest bytes.
    pub fn to_descriptor(&self) -> Vec<u8> {
        let header = self.descriptor_header();
        let mut out = Vec::with_capacity(header.len() + 1 + self.digest.len());
        out.extend_from_slice(header.as_bytes());
        out.push(b'\n');
        out.extend_from_slice(&self.digest);
        out
    }

    pub fn from_descriptor(bytes: &[u8]) -> Result<Self, CryptaError> {
        let newline = bytes
            .iter()
            .position(|b| *b == b'\n')
            .ok_or_else(|| CryptaError::Validation("descriptor has no header line".into()))?;
        let header = std::str::from_utf8(&bytes[..newline])
            .map_err(|_| CryptaError::Validation("descriptor header is not UTF-8".into()))?;
        let (tag, source) = header.split_once(": ").ok_or_else(|| {
            CryptaError::Validation(format!("malformed descriptor header: {header}"))
        })?;

        Ok(Self {
            recipe: ChecksumRecipe::parse_tag(tag)?,
            source_name: source.trim_end_matches('\r').to_string(),
            digest: bytes[newline + 1..].to_vec(),
        })
    }
}

/// Result of a checksum or signature verification. A mismatch is an
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}
