//! RSA key pairs, key wrapping and signatures
//!
//! Keys are written as PKCS#8 PEM. On read both PKCS#8 and the older PKCS#1
//! (`BEGIN RSA PRIVATE KEY`, as printed by `openssl genrsa`) are accepted.

use md5::Md5;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crypta_core::{HashAlgorithm, KeyBits};

use crate::digest::digest;

/// Which half of a key pair a PEM blob is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Public,
    Private,
}

/// Both halves of a new key pair, PEM encoded. The private half is zeroized on drop.
pub struct GeneratedKeyPair {
    pub private_pem: Zeroizing<String>,
    pub public_pem: String,
}

impl std::fmt::Debug for GeneratedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedKeyPair")
            .field("private_pem", &"[REDACTED]")
            .field("public_pem", &self.public_pem)
            .finish()
    }
}

pub fn generate(bits: KeyBits) -> anyhow::Result<GeneratedKeyPair> {
    let private = RsaPrivateKey::new(&mut rand::thread_rng(), bits.bits())
        .map_err(|e| anyhow::anyhow!("RSA key generation failed: {e}"))?;
    let public = RsaPublicKey::from(&private);

    let private_pem = private
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| anyhow::anyhow!("encoding private key: {e}"))?;
    let public_pem = public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| anyhow::anyhow!("encoding public key: {e}"))?;

    Ok(GeneratedKeyPair {
        private_pem,
        public_pem,
    })
}

fn pem_str(pem: &[u8]) -> anyhow::Result<&str> {
    std::str::from_utf8(pem).map_err(|_| anyhow::anyhow!("key file is not PEM text"))
}

pub fn parse_private(pem: &[u8]) -> anyhow::Result<RsaPrivateKey> {
    let text = pem_str(pem)?;
    RsaPrivateKey::from_pkcs8_pem(text)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(text))
        .map_err(|e| anyhow::anyhow!("unable to load private key: {e}"))
}

pub fn parse_public(pem: &[u8]) -> anyhow::Result<RsaPublicKey> {
    let text = pem_str(pem)?;
    RsaPublicKey::from_public_key_pem(text)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(text))
        .map_err(|e| anyhow::anyhow!("unable to load public key: {e}"))
}

pub fn validate(pem: &[u8], role: KeyRole) -> bool {
    match role {
        KeyRole::Public => parse_public(pem).is_ok(),
        KeyRole::Private => parse_private(pem).is_ok(),
    }
}

pub fn derive_public(private_pem: &[u8]) -> anyhow::Result<String> {
    let private = parse_private(private_pem)?;
    RsaPublicKey::from(&private)
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| anyhow::anyhow!("encoding public key: {e}"))
}

/// PKCS#1 v1.5 encryption. The payload must fit in one RSA block.
pub fn encrypt(data: &[u8], public_pem: &[u8]) -> anyhow::Result<Vec<u8>> {
    let public = parse_public(public_pem)?;
    public
        .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, data)
        .map_err(|e| anyhow::anyhow!("RSA encryption failed: {e}"))
}

pub fn decrypt(data: &[u8], private_pem: &[u8]) -> anyhow::Result<Vec<u8>> {
    let private = parse_private(private_pem)?;
    private
        .decrypt(Pkcs1v15Encrypt, data)
        .map_err(|e| anyhow::anyhow!("RSA decryption failed: {e}"))
}

fn signing_scheme(hash: HashAlgorithm) -> Pkcs1v15Sign {
    match hash {
        HashAlgorithm::Md5 => Pkcs1v15Sign::new::<Md5>(),
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        HashAlgorithm::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

/// Hash `data` with `hash` and sign the digest (PKCS#1 v1.5).
pub fn sign(data: &[u8], private_pem: &[u8], hash: HashAlgorithm) -> anyhow::Result<Vec<u8>> {
    let private = parse_private(private_pem)?;
    let hashed = digest(data, hash);
    private
        .sign(signing_scheme(hash), &hashed)
        .map_err(|e| anyhow::anyhow!("signing failed: {e}"))
}

/// `Ok(false)` for a signature that does not match; `Err` only when the key is unusable.
pub fn verify(
    data: &[u8],
    signature: &[u8],
    public_pem: &[u8],
    hash: HashAlgorithm,
) -> anyhow::Result<bool> {
    let public = parse_public(public_pem)?;
    let hashed = digest(data, hash);
    Ok(public
        .verify(signing_scheme(hash), &hashed, signature)
        .is_ok())
}
