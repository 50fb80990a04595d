//! Shared fixtures for workflow integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tempfile::TempDir;

use crypta_core::{
    ChecksumKind, Cipher, CryptaError, CryptaResult, HashAlgorithm, KeyBits, KeyPair,
    SessionSettings,
};
use crypta_crypto::RustCryptoProvider;
use crypta_workflow::{keypair, Interaction, Notice};

/// One scripted user answer.
#[derive(Debug, Clone)]
pub enum Answer {
    Text(String),
    Secret(String),
    File(PathBuf),
    Dir(PathBuf),
    Choice(usize),
    /// A choice the front end could not parse, such as a typo.
    BadChoice,
    Cancel,
}

/// An [`Interaction`] that replays a fixed script and records what it was told.
///
/// Running out of answers behaves like the user cancelling.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<Answer>,
    pub told: Vec<(Notice, String)>,
    pub prompts: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn was_told(&self, notice: Notice, needle: &str) -> bool {
        self.told
            .iter()
            .any(|(n, msg)| *n == notice && msg.contains(needle))
    }

    fn next(&mut self, prompt: &str) -> CryptaResult<Answer> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            None | Some(Answer::Cancel) => Err(CryptaError::Cancelled),
            Some(answer) => Ok(answer),
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn ask_text(&mut self, prompt: &str) -> CryptaResult<String> {
        match self.next(prompt)? {
            Answer::Text(t) => Ok(t),
            other => panic!("{prompt}: expected text, script has {other:?}"),
        }
    }

    fn ask_secret(&mut self, prompt: &str) -> CryptaResult<SecretString> {
        match self.next(prompt)? {
            Answer::Secret(s) => Ok(SecretString::from(s)),
            other => panic!("{prompt}: expected secret, script has {other:?}"),
        }
    }

    fn ask_file(&mut self, prompt: &str) -> CryptaResult<PathBuf> {
        match self.next(prompt)? {
            Answer::File(p) => Ok(p),
            other => panic!("{prompt}: expected file, script has {other:?}"),
        }
    }

    fn ask_directory(&mut self, prompt: &str) -> CryptaResult<PathBuf> {
        match self.next(prompt)? {
            Answer::Dir(p) => Ok(p),
            other => panic!("{prompt}: expected directory, script has {other:?}"),
        }
    }

    fn choose(&mut self, prompt: &str, options: &[String]) -> CryptaResult<usize> {
        match self.next(prompt)? {
            Answer::Choice(i) => {
                assert!(i < options.len(), "{prompt}: choice {i} out of range");
                Ok(i)
            }
            Answer::BadChoice => Err(CryptaError::Validation(format!(
                "enter a number between 1 and {}",
                options.len()
            ))),
            other => panic!("{prompt}: expected choice, script has {other:?}"),
        }
    }

    fn tell(&mut self, notice: Notice, message: &str) {
        self.told.push((notice, message.to_string()));
    }
}

pub fn text(s: &str) -> Answer {
    Answer::Text(s.to_string())
}

pub fn secret(s: &str) -> Answer {
    Answer::Secret(s.to_string())
}

pub fn file(p: impl AsRef<Path>) -> Answer {
    Answer::File(p.as_ref().to_path_buf())
}

pub fn dir(p: impl AsRef<Path>) -> Answer {
    Answer::Dir(p.as_ref().to_path_buf())
}

fn position<T: PartialEq>(all: &[T], item: T) -> Answer {
    Answer::Choice(all.iter().position(|x| *x == item).unwrap())
}

pub fn cipher(c: Cipher) -> Answer {
    position(&Cipher::ALL, c)
}

pub fn hash(h: HashAlgorithm) -> Answer {
    position(&HashAlgorithm::ALL, h)
}

pub fn kind(k: ChecksumKind) -> Answer {
    position(&ChecksumKind::ALL, k)
}

pub fn bits(b: KeyBits) -> Answer {
    position(&KeyBits::ALL, b)
}

pub fn provider() -> RustCryptoProvider {
    RustCryptoProvider::new()
}

/// Temp dir for inputs, with `out/` as the session output directory.
pub fn session() -> (TempDir, SessionSettings) {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let settings = SessionSettings {
        output_dir: out,
        private_key: None,
    };
    (tmp, settings)
}

pub fn write_test_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Small key pair written into the output directory.
pub fn key_pair(settings: &SessionSettings, name: &str) -> KeyPair {
    keypair::generate(&provider(), name, KeyBits::B1024, settings).unwrap()
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
