//! Line-oriented terminal front end for the workflows
//!
//! An empty answer or `q` cancels the current prompt. Secrets are read
//! without echo when stdin is a terminal.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use crypta_core::config::expand_tilde;
use crypta_core::{CryptaError, CryptaResult};
use crypta_workflow::{Interaction, Notice};

pub struct TerminalInteraction<R, W> {
    input: R,
    output: W,
    masked_secrets: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalInteraction<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let masked_secrets = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stdout(),
            masked_secrets,
            spinner: None,
        }
    }
}

impl<R: BufRead, W: Write> TerminalInteraction<R, W> {
    /// Plain reader/writer pair; secrets are read as ordinary lines.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            masked_secrets: false,
            spinner: None,
        }
    }

    fn read_line(&mut self) -> CryptaResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CryptaError::Cancelled);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask_line(&mut self, prompt: &str) -> CryptaResult<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;
        let line = self.read_line()?;
        let answer = line.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
            return Err(CryptaError::Cancelled);
        }
        Ok(answer.to_string())
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalInteraction<R, W> {
    fn ask_text(&mut self, prompt: &str) -> CryptaResult<String> {
        self.ask_line(prompt)
    }

    /// Empty secrets are returned as-is so the caller can reject them.
    fn ask_secret(&mut self, prompt: &str) -> CryptaResult<SecretString> {
        let secret = if self.masked_secrets {
            rpassword::prompt_password(format!("{prompt}: "))?
        } else {
            write!(self.output, "{prompt}: ")?;
            self.output.flush()?;
            self.read_line()?
        };
        Ok(SecretString::from(secret))
    }

    fn ask_file(&mut self, prompt: &str) -> CryptaResult<PathBuf> {
        let answer = self.ask_line(prompt)?;
        Ok(expand_tilde(&PathBuf::from(answer)))
    }

    fn ask_directory(&mut self, prompt: &str) -> CryptaResult<PathBuf> {
        self.ask_file(prompt)
    }

    fn choose(&mut self, prompt: &str, options: &[String]) -> CryptaResult<usize> {
        writeln!(self.output, "\n{prompt}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {option}", i + 1)?;
        }
        let answer = self.ask_line("Choice")?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Ok(n - 1),
            _ => Err(CryptaError::Validation(format!(
                "enter a number between 1 and {}",
                options.len()
            ))),
        }
    }

    fn tell(&mut self, notice: Notice, message: &str) {
        let tag = match notice {
            Notice::Info => "",
            Notice::Success => "[ok] ",
            Notice::Warning => "[!] ",
            Notice::Failure => "[error] ",
        };
        // a closed stdout leaves nothing to report to
        let _ = writeln!(self.output, "{tag}{message}");
    }

    fn begin_task(&mut self, label: &str) {
        self.end_task();
        self.spinner = Some(make_spinner(label));
    }

    fn end_task(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

fn make_spinner(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn terminal(input: &str) -> TerminalInteraction<&[u8], Vec<u8>> {
        TerminalInteraction::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_empty_line_and_q_cancel() {
        let mut t = terminal("\nq\n");
        assert!(t.ask_text("Name").unwrap_err().is_cancelled());
        assert!(t.ask_text("Name").unwrap_err().is_cancelled());
        // end of input
        assert!(t.ask_text("Name").unwrap_err().is_cancelled());
    }

    #[test]
    fn test_choose_is_one_based() {
        let options = vec!["DES".to_string(), "AES-256".to_string()];
        let mut t = terminal("2\n3\nx\n");
        assert_eq!(t.choose("Cipher", &options).unwrap(), 1);
        assert!(matches!(
            t.choose("Cipher", &options),
            Err(CryptaError::Validation(_))
        ));
        assert!(matches!(
            t.choose("Cipher", &options),
            Err(CryptaError::Validation(_))
        ));
        let shown = String::from_utf8(t.output.clone()).unwrap();
        assert!(shown.contains(" 2) AES-256"));
    }

    #[test]
    fn test_unmasked_secret_keeps_empty_answer() {
        let mut t = terminal("\nk1\r\n");
        assert_eq!(t.ask_secret("Key").unwrap().expose_secret(), "");
        assert_eq!(t.ask_secret("Key").unwrap().expose_secret(), "k1");
    }

    #[test]
    fn test_tell_tags_messages() {
        let mut t = terminal("");
        t.tell(Notice::Failure, "bad decrypt");
        t.tell(Notice::Success, "done");
        assert_eq!(
            String::from_utf8(t.output).unwrap(),
            "[error] bad decrypt\n[ok] done\n"
        );
    }
}
