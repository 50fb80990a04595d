pub mod config;
pub mod error;
pub mod settings;
pub mod types;

pub use error::{CryptaError, CryptaResult};
pub use settings::SessionSettings;
pub use types::{
    ChecksumKind, ChecksumRecipe, ChecksumRecord, Cipher, Construction, HashAlgorithm, KeyBits,
    KeyPair, Verdict,
};
