use crypta_core::Cipher;
use crypta_crypto::{symmetric, SymmetricKey};

fn make_data(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| (i.wrapping_mul(7) ^ (i >> 3)) as u8)
        .collect()
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_encrypt_aes256(bencher: divan::Bencher, size: usize) {
    let key = SymmetricKey::new(b"bench-key".to_vec()).unwrap();
    let data = make_data(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| {
            symmetric::encrypt(
                divan::black_box(&data),
                divan::black_box(&key),
                Cipher::Aes256,
            )
            .unwrap()
        });
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_decrypt_3des(bencher: divan::Bencher, size: usize) {
    let key = SymmetricKey::new(b"bench-key".to_vec()).unwrap();
    let data = make_data(size);
    let cryptogram = symmetric::encrypt(&data, &key, Cipher::TripleDes).unwrap();
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| {
            symmetric::decrypt(
                divan::black_box(cryptogram.as_bytes()),
                divan::black_box(&key),
                Cipher::TripleDes,
            )
            .unwrap()
        });
}

fn main() {
    divan::main();
}
