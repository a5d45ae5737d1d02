//! Interactive prompts
//!
//! Command handlers ask questions through [`Prompt`] so they can run against
//! the terminal or against scripted answers.

use std::io::{self, BufRead, Write};

use crate::error::{EnvputError, EnvputResult};

/// Source of answers to interactive questions
pub trait Prompt {
    /// Yes/no question; an empty answer takes `default`
    fn confirm(&mut self, message: &str, default: bool) -> EnvputResult<bool>;

    /// Free-text answer, trimmed; an empty answer takes `default` when given
    fn input(&mut self, message: &str, default: Option<&str>) -> EnvputResult<String>;

    /// Hidden free-text answer
    fn password(&mut self, message: &str) -> EnvputResult<String>;

    /// Pick one of `choices`, returning its index
    fn select(&mut self, message: &str, choices: &[String]) -> EnvputResult<usize>;
}

/// Prompts on stdin/stdout
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self, prompt: &str) -> EnvputResult<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(EnvputError::Io("stdin closed while waiting for input".into()));
        }

        Ok(input.trim().to_string())
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, message: &str, default: bool) -> EnvputResult<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = self.read_line(&format!("? {} ({}) ", message, hint))?;
            match parse_confirm(&answer, default) {
                Some(value) => return Ok(value),
                None => println!("Please answer 'y' or 'n'."),
            }
        }
    }

    fn input(&mut self, message: &str, default: Option<&str>) -> EnvputResult<String> {
        let prompt = match default {
            Some(default) => format!("? {} ({}) ", message, default),
            None => format!("? {} ", message),
        };
        let answer = self.read_line(&prompt)?;

        Ok(match default {
            Some(default) if answer.is_empty() => default.to_string(),
            _ => answer,
        })
    }

    fn password(&mut self, message: &str) -> EnvputResult<String> {
        rpassword::prompt_password(format!("? {} ", message))
            .map_err(|e| EnvputError::Io(format!("Failed to read hidden input: {}", e)))
    }

    fn select(&mut self, message: &str, choices: &[String]) -> EnvputResult<usize> {
        println!("? {}", message);
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}. {}", i + 1, choice);
        }

        loop {
            let answer = self.read_line(&format!("Select [1-{}]: ", choices.len()))?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => println!("Please enter a number between 1 and {}.", choices.len()),
            }
        }
    }
}

/// Interpret a yes/no answer; `None` when it is neither
pub fn parse_confirm(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
