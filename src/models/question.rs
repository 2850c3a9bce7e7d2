use std::fmt;

use serde::{Deserialize, Serialize};

/// A single multiple-choice question as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    /// Labelled option strings, e.g. `"A) Paris"`.
    pub options: Vec<String>,
    pub difficulty: String,
    pub theme: String,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options,
            difficulty: "Medium".to_string(),
            theme: String::new(),
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Index of the option whose label matches `letter`.
    pub fn option_index(&self, letter: OptionLetter) -> Option<usize> {
        self.options
            .iter()
            .position(|option| OptionLetter::from_option(option) == Some(letter))
    }
}

/// The answer token sent to the backend for a chosen option.
///
/// Usually one of `A`-`D`. Options without a recognised label fall back to
/// their first character, upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionLetter(char);

impl OptionLetter {
    pub const LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

    /// Derive the letter from an option string such as `"B) Paris"`.
    pub fn from_option(option: &str) -> Option<Self> {
        let first = option.chars().next()?;
        if Self::LABELS.contains(&first) {
            return Some(Self(first));
        }
        first.to_uppercase().next().map(Self)
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
