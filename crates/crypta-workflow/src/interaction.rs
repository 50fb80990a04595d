//! The boundary between workflows and whoever is answering their questions

use secrecy::SecretString;
use std::path::PathBuf;

use crypta_core::CryptaResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Success,
    Warning,
    Failure,
}

/// Prompt vocabulary used by every workflow.
///
/// Each `ask_*` call blocks until the user answers or cancels; cancellation
/// is reported as [`crypta_core::CryptaError::Cancelled`].
pub trait Interaction {
    fn ask_text(&mut self, prompt: &str) -> CryptaResult<String>;

    fn ask_secret(&mut self, prompt: &str) -> CryptaResult<SecretString>;

    fn ask_file(&mut self, prompt: &str) -> CryptaResult<PathBuf>;

    fn ask_directory(&mut self, prompt: &str) -> CryptaResult<PathBuf>;

    /// Single choice; returns the index into `options`.
    fn choose(&mut self, prompt: &str, options: &[String]) -> CryptaResult<usize>;

    fn tell(&mut self, notice: Notice, message: &str);

    /// A slow primitive call is starting.
    fn begin_task(&mut self, _label: &str) {}

    fn end_task(&mut self) {}
}
