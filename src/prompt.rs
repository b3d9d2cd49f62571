//! Operator prompts.
//!
//! The browse loop only talks to the `Prompter` trait; `Terminal` is the
//! interactive implementation backed by `inquire`.
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, CustomUserError, InquireError, Select, Text};

use crate::error::PromptError;

pub const DEFAULT_DEPTH: usize = 2;

pub trait Prompter {
    /// Ask for one of `options` (always at least two).
    fn choose(&mut self, message: &str, options: Vec<String>) -> Result<String, PromptError>;
    fn text(&mut self, message: &str) -> Result<String, PromptError>;
    /// Ask for a positive integer.
    fn depth(&mut self, message: &str, default: usize) -> Result<usize, PromptError>;
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;
}

/// Pick a value: nothing to pick from yields `None`, a single option is taken
/// without asking, anything else goes to the operator.
pub fn pick<P: Prompter + ?Sized>(
    prompter: &mut P,
    options: Vec<String>,
    message: &str,
) -> Result<Option<String>, PromptError> {
    match options.len() {
        0 => Ok(None),
        1 => Ok(options.into_iter().next()),
        _ => prompter.choose(message, options).map(Some),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TERMINAL
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Default)]
pub struct Terminal;

impl Prompter for Terminal {
    fn choose(&mut self, message: &str, options: Vec<String>) -> Result<String, PromptError> {
        Select::new(&format!("[?] {message}: "), options)
            .prompt()
            .map_err(from_inquire)
    }

    fn text(&mut self, message: &str) -> Result<String, PromptError> {
        Text::new(message).prompt().map_err(from_inquire)
    }

    fn depth(&mut self, message: &str, default: usize) -> Result<usize, PromptError> {
        CustomType::<usize>::new(message)
            .with_default(default)
            .with_error_message("Input must be a positive integer")
            .with_validator(|value: &usize| {
                let validation = if *value > 0 {
                    Validation::Valid
                } else {
                    Validation::Invalid("Input must be a positive integer".into())
                };
                Ok::<_, CustomUserError>(validation)
            })
            .prompt()
            .map_err(from_inquire)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::new(message).with_default(default).prompt().map_err(from_inquire)
    }
}

fn from_inquire(error: InquireError) -> PromptError {
    match error {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => PromptError::Interrupted,
        other => PromptError::Terminal(other.to_string()),
    }
}

// ------------------------------- Tests ------------------------------------ //
