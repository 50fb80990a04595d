//! Unsalted CBC block encryption with base64 armour
//!
//! Key and IV come from the passphrase via EVP_BytesToKey over SHA-256 with
//! one round and no salt:
//! ```text
//! D_1 = SHA256(passphrase)
//! D_i = SHA256(D_{i-1} || passphrase)
//! key || iv = D_1 || D_2 || ...   (truncated)
//! ```
//! With no salt the whole pipeline is deterministic, which is what lets a MAC
//! over a cryptogram be recomputed later.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{
    block_padding::Pkcs7, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crypta_core::Cipher;

use crate::key::SymmetricKey;
use crate::ARMOR_LINE_LEN;

/// Base64-armoured ciphertext, wrapped at 64 columns with a trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cryptogram {
    armored: String,
}

impl Cryptogram {
    fn from_ciphertext(ciphertext: &[u8]) -> Self {
        let encoded = STANDARD.encode(ciphertext);
        let mut armored = String::with_capacity(encoded.len() + encoded.len() / ARMOR_LINE_LEN + 1);
        // base64 output is ASCII, so byte chunks are valid str boundaries
        for line in encoded.as_bytes().chunks(ARMOR_LINE_LEN) {
            armored.push_str(std::str::from_utf8(line).unwrap_or_default());
            armored.push('\n');
        }
        Self { armored }
    }

    pub fn as_str(&self) -> &str {
        &self.armored
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.armored.as_bytes()
    }
}

/// (key length, IV length) in bytes for each cipher's CBC mode.
fn key_iv_len(cipher: Cipher) -> (usize, usize) {
    match cipher {
        Cipher::Des => (8, 8),
        Cipher::TripleDes => (24, 8),
        Cipher::Blowfish => (16, 8),
        Cipher::Aes256 => (32, 16),
    }
}

fn derive_key_iv(passphrase: &[u8], cipher: Cipher) -> (Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>) {
    let (key_len, iv_len) = key_iv_len(cipher);
    let mut material = Zeroizing::new(Vec::with_capacity(key_len + iv_len + 32));
    let mut block = Zeroizing::new(Vec::new());

    while material.len() < key_len + iv_len {
        let mut hasher = Sha256::new();
        hasher.update(block.as_slice());
        hasher.update(passphrase);
        *block = hasher.finalize().to_vec();
        material.extend_from_slice(&block);
    }

    let key = Zeroizing::new(material[..key_len].to_vec());
    let iv = Zeroizing::new(material[key_len..key_len + iv_len].to_vec());
    (key, iv)
}

fn cbc_encrypt<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> anyhow::Result<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|e| anyhow::anyhow!("cipher initialisation failed: {e}"))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> anyhow::Result<Vec<u8>>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|e| anyhow::anyhow!("cipher initialisation failed: {e}"))?;
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| anyhow::anyhow!("bad decrypt: wrong key, wrong cipher, or corrupted data"))
}

/// Encrypt `plaintext` under `key` with `cipher`. No salt, no embedded metadata.
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey, cipher: Cipher) -> anyhow::Result<Cryptogram> {
    let (k, iv) = derive_key_iv(key.as_bytes(), cipher);

    let ciphertext = match cipher {
        Cipher::Des => cbc_encrypt::<des::Des>(&k, &iv, plaintext),
        Cipher::TripleDes => cbc_encrypt::<des::TdesEde3>(&k, &iv, plaintext),
        Cipher::Blowfish => cbc_encrypt::<blowfish::Blowfish>(&k, &iv, plaintext),
        Cipher::Aes256 => cbc_encrypt::<aes::Aes256>(&k, &iv, plaintext),
    }?;

    Ok(Cryptogram::from_ciphertext(&ciphertext))
}

/// Decrypt an armoured cryptogram. Whitespace inside the armour is ignored.
pub fn decrypt(armored: &[u8], key: &SymmetricKey, cipher: Cipher) -> anyhow::Result<Vec<u8>> {
    let compact: Vec<u8> = armored
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let ciphertext = STANDARD
        .decode(&compact)
        .map_err(|e| anyhow::anyhow!("cryptogram is not valid base64: {e}"))?;

    let (k, iv) = derive_key_iv(key.as_bytes(), cipher);

    match cipher {
        Cipher::Des => cbc_decrypt::<des::Des>(&k, &iv, &ciphertext),
        Cipher::TripleDes => cbc_decrypt::<des::TdesEde3>(&k, &iv, &ciphertext),
        Cipher::Blowfish => cbc_decrypt::<blowfish::Blowfish>(&k, &iv, &ciphertext),
        Cipher::Aes256 => cbc_decrypt::<aes::Aes256>(&k, &iv, &ciphertext),
    }
}
