//! crypta-workflow: the user-facing cryptographic workflows
//!
//! Each workflow module exposes a non-interactive core (plain inputs in, a
//! result value out) and a `run` entry point that gathers those inputs
//! through an [`Interaction`]. Workflows reuse each other's cores directly:
//!
//! ```text
//! distribute ──► checksum (Produce, over the plaintext key)
//! verify_checksum ──► checksum (Internal)
//! checksum[MAC] ──► encrypt (Internal)
//! ```
//!
//! Named artifacts are only written in [`ExecutionMode::Produce`]; internal
//! reuse keeps everything in memory.

pub mod artifact;
pub mod checksum;
pub mod decrypt;
pub mod distribute;
pub mod encrypt;
pub mod interaction;
pub mod keypair;
pub mod menu;
pub mod prompt;
pub mod settings;
pub mod sign;
pub mod verify_checksum;
pub mod verify_signature;

pub use interaction::{Interaction, Notice};
pub use menu::MenuItem;

use crypta_core::SessionSettings;

/// Whether a workflow delivers a named artifact or only an in-memory result.
#[derive(Debug, Clone, Copy)]
pub enum ExecutionMode<'a> {
    /// Write the user-visible artifact into the session's output directory.
    Produce(&'a SessionSettings),
    /// Reused by another workflow; nothing touches the filesystem.
    Internal,
}
