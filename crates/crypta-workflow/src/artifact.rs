//! Artifact naming and scoped, all-or-nothing writes
//!
//! ```text
//! <name>_PrKey_RSA.pem       private key
//! <name>_PubKey_RSA.pem      public key
//! <basename>.enc             cryptogram
//! <name>.enc                 distributed (RSA-wrapped) key
//! <name>.key                 distributed key after unwrapping
//! <basename>.sign            signature
//! <basename>_<kind>.hex      checksum value
//! <basename>_<kind>.info     checksum descriptor
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crypta_core::{ChecksumKind, CryptaResult};

pub fn private_key_name(name: &str) -> String {
    format!("{name}_PrKey_RSA.pem")
}

pub fn public_key_name(name: &str) -> String {
    format!("{name}_PubKey_RSA.pem")
}

pub fn cryptogram_name(basename: &str) -> String {
    format!("{basename}.enc")
}

pub fn distributed_key_name(name: &str) -> String {
    format!("{name}.enc")
}

pub fn recovered_key_name(name: &str) -> String {
    format!("{name}.key")
}

pub fn signature_name(basename: &str) -> String {
    format!("{basename}.sign")
}

pub fn checksum_name(basename: &str, kind: ChecksumKind) -> String {
    format!("{basename}_{kind}.hex")
}

pub fn descriptor_name(basename: &str, kind: ChecksumKind) -> String {
    format!("{basename}_{kind}.info")
}

/// File name without directory or final extension (`dir/msg.txt` → `msg`).
pub fn base_name(source: &str) -> String {
    let path = Path::new(source);
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

/// Write `contents` to `path` atomically.
///
/// Data goes to an anonymous temporary in the destination directory and is
/// renamed into place only once fully written. On any failure the temporary
/// is deleted when it drops and `path` is left as it was.
pub fn write_atomic(path: &Path, contents: &[u8]) -> CryptaResult<PathBuf> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(path.to_path_buf())
}

/// Best-effort removal used when a multi-file artifact set fails half way.
pub fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!(path = %path.display(), "failed to remove partial artifact: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(private_key_name("alice"), "alice_PrKey_RSA.pem");
        assert_eq!(public_key_name("alice"), "alice_PubKey_RSA.pem");
        assert_eq!(cryptogram_name("msg"), "msg.enc");
        assert_eq!(signature_name("msg"), "msg.sign");
        assert_eq!(recovered_key_name("forbob"), "forbob.key");
        assert_eq!(checksum_name("msg", ChecksumKind::Hmac), "msg_hmac.hex");
        assert_eq!(descriptor_name("msg", ChecksumKind::Mac), "msg_mac.info");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("msg.txt"), "msg");
        assert_eq!(base_name("/tmp/dir/archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("bob"), "bob");
    }

    #[test]
    fn test_write_atomic_leaves_no_temporaries() {
        let tmp = tempfile::TempDir::new().unwrap();
        let target = tmp.path().join("out.enc");

        write_atomic(&target, b"first").unwrap();
        write_atomic(&target, b"second").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"second");
        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomic_into_missing_dir_fails_cleanly() {
        let tmp = tempfile::TempDir::new().unwrap();
        let target = tmp.path().join("missing").join("out.enc");
        assert!(write_atomic(&target, b"data").is_err());
        assert!(!target.exists());
    }
}
