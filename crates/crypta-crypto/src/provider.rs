//! The provider shipped with the binary, backed by RustCrypto crates

use crypta_core::{Cipher, HashAlgorithm, KeyBits};

use crate::asymmetric::{self, GeneratedKeyPair, KeyRole};
use crate::key::SymmetricKey;
use crate::symmetric::{self, Cryptogram};
use crate::{digest, PrimitiveProvider};

#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl RustCryptoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PrimitiveProvider for RustCryptoProvider {
    fn generate_key_pair(&self, bits: KeyBits) -> anyhow::Result<GeneratedKeyPair> {
        tracing::debug!(bits = bits.bits(), "generating RSA key pair");
        asymmetric::generate(bits)
    }

    fn derive_public_key(&self, private_pem: &[u8]) -> anyhow::Result<String> {
        asymmetric::derive_public(private_pem)
    }

    fn validate_key(&self, pem: &[u8], role: KeyRole) -> bool {
        asymmetric::validate(pem, role)
    }

    fn symmetric_encrypt(
        &self,
        plaintext: &[u8],
        key: &SymmetricKey,
        cipher: Cipher,
    ) -> anyhow::Result<Cryptogram> {
        tracing::debug!(%cipher, bytes = plaintext.len(), "symmetric encrypt");
        symmetric::encrypt(plaintext, key, cipher)
    }

    fn symmetric_decrypt(
        &self,
        cryptogram: &[u8],
        key: &SymmetricKey,
        cipher: Cipher,
    ) -> anyhow::Result<Vec<u8>> {
        tracing::debug!(%cipher, bytes = cryptogram.len(), "symmetric decrypt");
        symmetric::decrypt(cryptogram, key, cipher)
    }

    fn digest(&self, data: &[u8], hash: HashAlgorithm) -> anyhow::Result<Vec<u8>> {
        Ok(digest::digest(data, hash))
    }

    fn hmac(
        &self,
        data: &[u8],
        key: &SymmetricKey,
        hash: HashAlgorithm,
    ) -> anyhow::Result<Vec<u8>> {
        digest::hmac(data, key.as_bytes(), hash)
    }

    fn asymmetric_encrypt(&self, data: &[u8], public_pem: &[u8]) -> anyhow::Result<Vec<u8>> {
        asymmetric::encrypt(data, public_pem)
    }

    fn asymmetric_decrypt(&self, data: &[u8], private_pem: &[u8]) -> anyhow::Result<Vec<u8>> {
        asymmetric::decrypt(data, private_pem)
    }

    fn sign(
        &self,
        data: &[u8],
        private_pem: &[u8],
        hash: HashAlgorithm,
    ) -> anyhow::Result<Vec<u8>> {
        tracing::debug!(%hash, bytes = data.len(), "signing");
        asymmetric::sign(data, private_pem, hash)
    }

    fn verify_signature(
        &self,
        data: &[u8],
        signature: &[u8],
        public_pem: &[u8],
        hash: HashAlgorithm,
    ) -> anyhow::Result<bool> {
        asymmetric::verify(data, signature, public_pem, hash)
    }
}
