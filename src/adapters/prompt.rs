use crate::domain::ports::Confirm;
use std::io::{BufRead, Write};

/// Prompts on stderr and reads a `y`/`yes` answer from a reader (stdin by default).
pub struct ReaderConfirm<R> {
    reader: R,
}

impl ReaderConfirm<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            reader: std::io::stdin().lock(),
        }
    }
}

impl<R: BufRead> ReaderConfirm<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Confirm for ReaderConfirm<R> {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if self.reader.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Approves everything; backs `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, prompt: &str) -> bool {
        tracing::debug!("Auto-confirmed: {}", prompt);
        true
    }
}
