//! Prompt primitives for interactive workflows.
//!
//! Workflows never talk to the terminal directly; they go through the
//! `Prompter` trait so the whole prompt chain can be driven by a scripted
//! implementation in tests. Every method returns `Ok(None)` when the user
//! backs out, which workflows treat as a cancellation of the entire
//! sequence.

use crate::Result;
use dialoguer::{Confirm, Input, Select};

/// Interactive prompt primitives used by workflows.
///
/// `None` means the user cancelled: an empty text answer, or Esc on a
/// selection/confirmation.
pub trait Prompter {
    /// Prompt for a line of text. Empty (post-trim) means cancelled.
    fn input(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Prompt for a line of text with an editable initial value.
    fn input_with_default(&mut self, prompt: &str, default: &str) -> Result<Option<String>>;

    /// Pick one item from a list, starting at `default`.
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>>;
}

/// Terminal-backed prompter.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        let answer = answer.trim().to_string();
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }

    fn input_with_default(&mut self, prompt: &str, default: &str) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(default)
            .allow_empty(true)
            .interact_text()?;
        let answer = answer.trim().to_string();
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        let choice = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?;
        Ok(choice)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        Ok(answer)
    }
}

/// A scripted answer for `ScriptedPrompter`.
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum Answer {
    Text(&'static str),
    Index(usize),
    Bool(bool),
    /// Accept the offered default (only meaningful for prompts that have one)
    Keep,
    Cancel,
}

/// Prompter that replays a fixed list of answers; used in workflow tests.
///
/// Running out of answers counts as a cancellation.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Answer>,
    /// Prompts seen, in order, for asserting on the chain itself
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, prompt: &str) -> Option<Answer> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.next(prompt) {
            Some(Answer::Text(s)) => Ok(Some(s.to_string())),
            _ => Ok(None),
        }
    }

    fn input_with_default(&mut self, prompt: &str, default: &str) -> Result<Option<String>> {
        match self.next(prompt) {
            Some(Answer::Text(s)) => Ok(Some(s.to_string())),
            Some(Answer::Keep) => Ok(Some(default.to_string())),
            _ => Ok(None),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String], _default: usize) -> Result<Option<usize>> {
        match self.next(prompt) {
            Some(Answer::Index(i)) if i < items.len() => Ok(Some(i)),
            _ => Ok(None),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<Option<bool>> {
        match self.next(prompt) {
            Some(Answer::Bool(b)) => Ok(Some(b)),
            _ => Ok(None),
        }
    }
}
