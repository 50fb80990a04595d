//! Digests and HMAC over the supported hash algorithms

use hmac::digest::core_api::BlockSizeUser;
use hmac::{Mac, SimpleHmac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crypta_core::HashAlgorithm;

/// Raw digest bytes of `data`.
pub fn digest(data: &[u8], hash: HashAlgorithm) -> Vec<u8> {
    match hash {
        HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
        HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        HashAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// HMAC of `data` keyed with `key`.
pub fn hmac(data: &[u8], key: &[u8], hash: HashAlgorithm) -> anyhow::Result<Vec<u8>> {
    match hash {
        HashAlgorithm::Md5 => keyed::<Md5>(data, key),
        HashAlgorithm::Sha1 => keyed::<Sha1>(data, key),
        HashAlgorithm::Sha224 => keyed::<Sha224>(data, key),
        HashAlgorithm::Sha256 => keyed::<Sha256>(data, key),
        HashAlgorithm::Sha384 => keyed::<Sha384>(data, key),
        HashAlgorithm::Sha512 => keyed::<Sha512>(data, key),
    }
}

fn keyed<D>(data: &[u8], key: &[u8]) -> anyhow::Result<Vec<u8>>
where
    D: Digest + BlockSizeUser,
{
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)
        .map_err(|e| anyhow::anyhow!("HMAC initialisation failed: {e}"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
