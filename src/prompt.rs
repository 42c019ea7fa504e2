//! Operator confirmation.
//!
//! The generator asks before overwriting a model and before generating a
//! missing form request. Answers come from a [`Prompt`] so that batch runs and
//! tests never block on stdin.

use crate::error::{GeneratorError, GeneratorResult};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Yes/no question source
pub trait Prompt {
    fn confirm(&self, question: &str, default: bool) -> GeneratorResult<bool>;
}

/// Interactive prompt on stdin/stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&self, question: &str, default: bool) -> GeneratorResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let mut stdout = std::io::stdout();
        write!(stdout, "❓ {question} {hint} ").map_err(|e| GeneratorError::Prompt(e.to_string()))?;
        stdout.flush().map_err(|e| GeneratorError::Prompt(e.to_string()))?;

        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| GeneratorError::Prompt(e.to_string()))?;
        Ok(parse_answer(&line).unwrap_or(default))
    }
}

/// Interpret a typed answer; `None` for blank or unrecognized input
pub fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" | "s" | "sim" => Some(true),
        "n" | "no" | "nao" | "não" => Some(false),
        _ => None,
    }
}

/// Answers every question with the same value (`--yes` answers `true`)
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompt(pub bool);

impl Prompt for FixedPrompt {
    fn confirm(&self, question: &str, _default: bool) -> GeneratorResult<bool> {
        tracing::info!(question, answer = self.0, "answered non-interactively");
        Ok(self.0)
    }
}

/// Takes each question's default (`--no-interaction`)
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPrompt;

impl Prompt for DefaultPrompt {
    fn confirm(&self, question: &str, default: bool) -> GeneratorResult<bool> {
        tracing::info!(question, answer = default, "using default answer");
        Ok(default)
    }
}

/// Replays pre-recorded answers, then falls back to the question's default
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str, default: bool) -> GeneratorResult<bool> {
        self.asked.borrow_mut().push(question.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(default))
    }
}
