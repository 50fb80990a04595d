//! Multi-file artifacts are written completely or not at all.
//!
//! Each test blocks the second file of a set with a directory of the same
//! name, so the final rename fails after the first file is already in place.

mod common;

use common::*;
use crypta_core::{ChecksumKind, CryptaError, HashAlgorithm, KeyBits};
use crypta_workflow::{checksum, distribute, keypair};

#[test]
fn key_pair_without_public_half_removes_private_key() {
    let (_tmp, settings) = session();
    std::fs::create_dir(settings.output_dir.join("carol_PubKey_RSA.pem")).unwrap();

    let err = keypair::generate(&provider(), "carol", KeyBits::B1024, &settings).unwrap_err();

    assert!(matches!(err, CryptaError::Io(_)));
    assert_eq!(file_names(&settings.output_dir), ["carol_PubKey_RSA.pem"]);
}

#[test]
fn checksum_without_descriptor_removes_value() {
    let (tmp, settings) = session();
    let source = write_test_file(tmp.path(), "msg.txt", b"hello");
    std::fs::create_dir(settings.output_dir.join("msg_hmac.info")).unwrap();

    let mut io = ScriptedInteraction::new([
        kind(ChecksumKind::Hmac),
        hash(HashAlgorithm::Sha1),
        file(&source),
        secret("k1"),
    ]);
    let err = checksum::run(&provider(), &mut io, &settings).unwrap_err();

    assert!(matches!(err, CryptaError::Io(_)));
    assert_eq!(file_names(&settings.output_dir), ["msg_hmac.info"]);
}

#[test]
fn distribution_without_checksum_removes_wrapped_key() {
    let (_tmp, settings) = session();
    let bob = key_pair(&settings, "bob");
    std::fs::create_dir(settings.output_dir.join("forbob_hmac.info")).unwrap();

    let mut io = ScriptedInteraction::new([
        secret("k1"),
        file(&bob.public_key_path),
        text("forbob"),
        kind(ChecksumKind::Hmac),
        hash(HashAlgorithm::Sha256),
    ]);
    let err = distribute::run(&provider(), &mut io, &settings).unwrap_err();

    assert!(matches!(err, CryptaError::Io(_)));
    assert_eq!(
        file_names(&settings.output_dir),
        ["bob_PrKey_RSA.pem", "bob_PubKey_RSA.pem", "forbob_hmac.info"]
    );
}
