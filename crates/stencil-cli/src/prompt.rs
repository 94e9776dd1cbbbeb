//! Terminal confirmation prompts.
//!
//! Interactive terminals get a `dialoguer` prompt (when the `interactive`
//! feature is enabled). Piped stdin falls back to reading one line per
//! question, so `printf 'n\n' | stencil make:dto Author` works in scripts.

use std::io::{self, BufRead, IsTerminal, Write};

use stencil_core::application::ApplicationError;
use stencil_core::prelude::{Confirmer, StencilResult};

/// Asks questions on stderr and reads answers from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl TerminalConfirmer {
    pub const fn new() -> Self {
        Self
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, question: &str, default: bool) -> StencilResult<bool> {
        if io::stdin().is_terminal() {
            #[cfg(feature = "interactive")]
            {
                return dialoguer::Confirm::new()
                    .with_prompt(question)
                    .default(default)
                    .interact()
                    .map_err(|e| prompt_failed(e.to_string()));
            }
        }

        let stdin = io::stdin();
        read_answer(&mut stdin.lock(), &mut io::stderr(), question, default)
    }
}

/// Line-based prompt used for piped input and builds without `interactive`.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    prompt_out: &mut W,
    question: &str,
    default: bool,
) -> StencilResult<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    write!(prompt_out, "{question} {hint} ").map_err(|e| prompt_failed(e.to_string()))?;
    prompt_out.flush().map_err(|e| prompt_failed(e.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| prompt_failed(e.to_string()))?;
    if read == 0 {
        // Closed input behaves like pressing enter.
        let _ = writeln!(prompt_out);
        return Ok(default);
    }

    Ok(parse_answer(&line, default))
}

fn parse_answer(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

fn prompt_failed(reason: String) -> stencil_core::error::StencilError {
    ApplicationError::PromptFailed { reason }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, default: bool) -> (bool, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut shown = Vec::new();
        let answer = read_answer(&mut reader, &mut shown, "Overwrite?", default).unwrap();
        (answer, String::from_utf8(shown).unwrap())
    }

    #[test]
    fn empty_line_takes_the_default() {
        assert!(ask("\n", true).0);
        assert!(!ask("\n", false).0);
    }

    #[test]
    fn yes_and_no_are_case_insensitive() {
        assert!(ask("YES\n", false).0);
        assert!(ask("y\n", false).0);
        assert!(!ask("No\n", true).0);
        assert!(!ask("whatever\n", true).0);
    }

    #[test]
    fn closed_input_takes_the_default() {
        assert!(ask("", true).0);
        assert!(!ask("", false).0);
    }

    #[test]
    fn hint_reflects_the_default() {
        assert!(ask("\n", true).1.contains("[Y/n]"));
        assert!(ask("\n", false).1.contains("[y/N]"));
    }
}
