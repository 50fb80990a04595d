//! MAC / HMAC reproducibility, sensitivity and verification behaviour.

mod common;

use common::*;
use crypta_core::{ChecksumRecipe, ChecksumRecord, Cipher, HashAlgorithm, Verdict};
use crypta_crypto::SymmetricKey;
use crypta_workflow::checksum::{self, ChecksumJob};
use crypta_workflow::{verify_checksum, ExecutionMode};
use proptest::prelude::*;

fn key(s: &str) -> SymmetricKey {
    SymmetricKey::new(s.as_bytes().to_vec()).unwrap()
}

fn mac(data: &[u8], k: &str, cipher: Cipher, hash: HashAlgorithm) -> Vec<u8> {
    checksum::compute(&provider(), data, &key(k), ChecksumRecipe::mac(cipher, hash)).unwrap()
}

fn hmac(data: &[u8], k: &str, hash: HashAlgorithm) -> Vec<u8> {
    checksum::compute(&provider(), data, &key(k), ChecksumRecipe::hmac(hash)).unwrap()
}

#[test]
fn mac_is_reproducible_for_every_cipher_and_hash() {
    for c in Cipher::ALL {
        for h in HashAlgorithm::ALL {
            assert_eq!(mac(b"payload", "k", c, h), mac(b"payload", "k", c, h), "{c}/{h}");
        }
    }
}

#[test]
fn mac_changes_with_each_parameter() {
    let base = mac(b"payload", "k1", Cipher::Aes256, HashAlgorithm::Sha256);
    assert_ne!(base, mac(b"payload", "k2", Cipher::Aes256, HashAlgorithm::Sha256));
    assert_ne!(base, mac(b"payload", "k1", Cipher::Blowfish, HashAlgorithm::Sha256));
    assert_ne!(base, mac(b"payload", "k1", Cipher::Aes256, HashAlgorithm::Sha512));
    assert_ne!(base, mac(b"payloaD", "k1", Cipher::Aes256, HashAlgorithm::Sha256));
}

#[test]
fn hmac_changes_with_each_parameter() {
    let base = hmac(b"payload", "k1", HashAlgorithm::Sha1);
    assert_eq!(base, hmac(b"payload", "k1", HashAlgorithm::Sha1));
    assert_ne!(base, hmac(b"payload", "k2", HashAlgorithm::Sha1));
    assert_ne!(base, hmac(b"payload", "k1", HashAlgorithm::Md5));
    assert_ne!(base, hmac(b"Payload", "k1", HashAlgorithm::Sha1));
}

#[test]
fn hmac_value_is_lowercase_hex_of_digest_length() {
    let lengths = [16, 20, 28, 32, 48, 64];
    for (h, len) in HashAlgorithm::ALL.into_iter().zip(lengths) {
        let value = hmac(b"x", "k", h);
        assert_eq!(value.len(), 2 * len);
        assert!(value.iter().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b)));
    }
}

/// Same bytes in differently named files, in different directories.
#[test]
fn checksum_is_independent_of_file_name_and_path() {
    let (tmp, settings) = session();
    let a = write_test_file(tmp.path(), "a.txt", b"same content");
    let b = write_test_file(tmp.path(), "deeply/nested/other name.dat", b"same content");

    for recipe in [
        ChecksumRecipe::mac(Cipher::TripleDes, HashAlgorithm::Sha224),
        ChecksumRecipe::hmac(HashAlgorithm::Sha384),
    ] {
        let k = key("k1");
        let job_a = ChecksumJob {
            source_name: &a.to_string_lossy(),
            basename: "a",
            data: &std::fs::read(&a).unwrap(),
            key: &k,
            recipe,
        };
        let job_b = ChecksumJob {
            source_name: &b.to_string_lossy(),
            basename: "other name",
            data: &std::fs::read(&b).unwrap(),
            key: &k,
            recipe,
        };
        let out_a = checksum::checksum(&provider(), &job_a, ExecutionMode::Produce(&settings)).unwrap();
        let out_b = checksum::checksum(&provider(), &job_b, ExecutionMode::Internal).unwrap();
        assert_eq!(out_a.record.digest, out_b.record.digest);

        let written = std::fs::read(out_a.checksum_path.unwrap()).unwrap();
        assert_eq!(written, out_a.record.digest);
        assert!(!String::from_utf8_lossy(&written).contains("a.txt"));
    }
}

#[test]
fn descriptor_round_trips_through_disk() {
    let (tmp, settings) = session();
    let source = write_test_file(tmp.path(), "report.pdf", b"%PDF-1.7 not really");
    let k = key("s3cret");
    let recipe = ChecksumRecipe::mac(Cipher::Des, HashAlgorithm::Md5);
    let job = ChecksumJob {
        source_name: "report.pdf",
        basename: "report",
        data: &std::fs::read(&source).unwrap(),
        key: &k,
        recipe,
    };
    let outcome = checksum::checksum(&provider(), &job, ExecutionMode::Produce(&settings)).unwrap();

    let info = std::fs::read(outcome.descriptor_path.unwrap()).unwrap();
    let parsed = ChecksumRecord::from_descriptor(&info).unwrap();
    assert_eq!(parsed, outcome.record);
    assert_eq!(parsed.descriptor_header(), "mac-des-md5: report.pdf");
    assert_eq!(
        file_names(&settings.output_dir),
        ["report_mac.hex", "report_mac.info"]
    );
}

#[test]
fn verification_fails_on_any_single_byte_change_to_stored_value() {
    let data = b"ledger line 1\nledger line 2\n";
    let recipe = ChecksumRecipe::mac(Cipher::Aes256, HashAlgorithm::Sha1);
    let stored = checksum::compute(&provider(), data, &key("k"), recipe).unwrap();

    let p = provider();
    assert_eq!(
        verify_checksum::verify(&p, &stored, data, &key("k"), recipe).unwrap(),
        Verdict::Valid
    );
    for i in 0..stored.len() {
        let mut tampered = stored.clone();
        // stay printable so the change is not just whitespace
        tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
        assert_eq!(
            verify_checksum::verify(&p, &tampered, data, &key("k"), recipe).unwrap(),
            Verdict::Invalid,
            "byte {i}"
        );
    }
}

#[test]
fn verification_with_wrong_recipe_is_invalid() {
    let recipe = ChecksumRecipe::mac(Cipher::Blowfish, HashAlgorithm::Sha256);
    let stored = checksum::compute(&provider(), b"data", &key("k"), recipe).unwrap();
    let other = ChecksumRecipe::mac(Cipher::Aes256, HashAlgorithm::Sha256);
    assert_eq!(
        verify_checksum::verify(&provider(), &stored, b"data", &key("k"), other).unwrap(),
        Verdict::Invalid
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn recomputed_hmac_always_verifies(
        data in prop::collection::vec(any::<u8>(), 0..256),
        pass in "[a-zA-Z0-9]{1,16}",
    ) {
        let recipe = ChecksumRecipe::hmac(HashAlgorithm::Sha256);
        let stored = checksum::compute(&provider(), &data, &key(&pass), recipe).unwrap();
        let verdict = verify_checksum::verify(&provider(), &stored, &data, &key(&pass), recipe).unwrap();
        prop_assert_eq!(verdict, Verdict::Valid);
    }
}
