use rename_movies_core::{Confirm, Result};
use std::io::{self, BufRead, Write};

/// Asks on stderr and reads the answer from `reader`.
pub struct PromptConfirm<R> {
    reader: R,
}

impl PromptConfirm<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> PromptConfirm<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Confirm for PromptConfirm<R> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            eprint!("{prompt} [Y/n]: ");
            io::stderr().flush()?;

            let mut input = String::new();
            if self.reader.read_line(&mut input)? == 0 {
                // EOF
                eprintln!();
                return Ok(false);
            }

            match input.trim().to_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => eprintln!("Please answer y or n."),
            }
        }
    }
}
