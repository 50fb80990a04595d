//! crypta-crypto: the primitive operations the workflows are built from
//!
//! Everything here is synchronous and stateless. Workflows only ever see the
//! [`PrimitiveProvider`] trait; [`RustCryptoProvider`] is the implementation
//! shipped with the binary.
//!
//! ```text
//! RSA (PKCS#8 PEM)      key pairs, PKCS#1 v1.5 key wrapping and signatures
//! DES/3DES/BF/AES-256   CBC + PKCS#7, key/IV from EVP_BytesToKey(SHA-256), no salt
//! MD5 … SHA-512         digests and HMAC
//! ```
//!
//! Cryptograms are byte-compatible with
//! `openssl enc -<cipher>-cbc -nosalt -md sha256 -a -k <key>`.

pub mod asymmetric;
pub mod digest;
pub mod key;
pub mod provider;
pub mod symmetric;

pub use asymmetric::{GeneratedKeyPair, KeyRole};
pub use key::SymmetricKey;
pub use provider::RustCryptoProvider;
pub use symmetric::Cryptogram;

use crypta_core::{Cipher, HashAlgorithm, KeyBits};

/// Column width of base64 armour lines.
pub const ARMOR_LINE_LEN: usize = 64;

/// The primitive capabilities the workflows depend on.
///
/// Every operation either succeeds or fails with a diagnostic that is shown
/// to the user verbatim. Key material crosses this boundary as PEM bytes.
pub trait PrimitiveProvider {
    fn generate_key_pair(&self, bits: KeyBits) -> anyhow::Result<GeneratedKeyPair>;

    fn derive_public_key(&self, private_pem: &[u8]) -> anyhow::Result<String>;

    fn validate_key(&self, pem: &[u8], role: KeyRole) -> bool;

    /// Unsalted, so equal inputs always give equal cryptograms.
    fn symmetric_encrypt(
        &self,
        plaintext: &[u8],
        key: &SymmetricKey,
        cipher: Cipher,
    ) -> anyhow::Result<Cryptogram>;

    fn symmetric_decrypt(
        &self,
        cryptogram: &[u8],
        key: &SymmetricKey,
        cipher: Cipher,
    ) -> anyhow::Result<Vec<u8>>;

    fn digest(&self, data: &[u8], hash: HashAlgorithm) -> anyhow::Result<Vec<u8>>;

    fn hmac(&self, data: &[u8], key: &SymmetricKey, hash: HashAlgorithm)
        -> anyhow::Result<Vec<u8>>;

    fn asymmetric_encrypt(&self, data: &[u8], public_pem: &[u8]) -> anyhow::Result<Vec<u8>>;

    fn asymmetric_decrypt(&self, data: &[u8], private_pem: &[u8]) -> anyhow::Result<Vec<u8>>;

    fn sign(&self, data: &[u8], private_pem: &[u8], hash: HashAlgorithm)
        -> anyhow::Result<Vec<u8>>;

    fn verify_signature(
        &self,
        data: &[u8],
        signature: &[u8],
        public_pem: &[u8],
        hash: HashAlgorithm,
    ) -> anyhow::Result<bool>;
}
