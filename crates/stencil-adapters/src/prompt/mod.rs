//! Non-interactive confirmation adapters.
//!
//! The interactive terminal prompt lives in the CLI; these cover CI runs
//! (`--no-interaction`) and tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use tracing::debug;

use stencil_core::{
    application::{ApplicationError, ports::Confirmer},
    error::StencilResult,
};

/// Answers every question the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmer {
    answer: bool,
}

impl FixedConfirmer {
    pub const fn new(answer: bool) -> Self {
        Self { answer }
    }

    pub const fn accept_all() -> Self {
        Self::new(true)
    }

    /// What `--no-interaction` uses: never overwrite, never chain.
    pub const fn reject_all() -> Self {
        Self::new(false)
    }
}

impl Confirmer for FixedConfirmer {
    fn confirm(&self, question: &str, _default: bool) -> StencilResult<bool> {
        debug!(question, answer = self.answer, "answered without prompting");
        Ok(self.answer)
    }
}

/// Replays a fixed list of answers and records every question asked.
///
/// Clones share the script, so a test can keep one to inspect after handing
/// the other to a service.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirmer {
    inner: Arc<Mutex<Script>>,
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Script {
                answers: answers.into_iter().collect(),
                asked: Vec::new(),
            })),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|script| script.asked.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.inner
            .lock()
            .map(|script| script.answers.len())
            .unwrap_or(0)
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, question: &str, _default: bool) -> StencilResult<bool> {
        let mut script = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        script.asked.push(question.to_string());
        script.answers.pop_front().ok_or_else(|| {
            ApplicationError::PromptFailed {
                reason: format!("no scripted answer for: {question}"),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_answers_ignore_default() {
        assert!(FixedConfirmer::accept_all().confirm("Overwrite?", false).unwrap());
        assert!(!FixedConfirmer::reject_all().confirm("Overwrite?", true).unwrap());
    }

    #[test]
    fn scripted_answers_in_order_then_fail() {
        let confirmer = ScriptedConfirmer::new([true, false]);
        let observer = confirmer.clone();

        assert!(confirmer.confirm("first?", false).unwrap());
        assert!(!confirmer.confirm("second?", true).unwrap());
        assert!(confirmer.confirm("third?", true).is_err());

        assert_eq!(observer.questions(), ["first?", "second?", "third?"]);
        assert_eq!(observer.remaining(), 0);
    }
}
