//! Operator prompts: confirmation dialogs, input forms and the action sheet.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

/// One field of an input form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    /// Prefilled text the operator can edit
    pub text: String,
    pub placeholder: String,
}

impl InputField {
    pub fn new(text: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: placeholder.into(),
        }
    }
}

/// Modal interaction with the operator. `None`/`false` means cancelled.
pub trait Prompter {
    fn confirm(&mut self, title: &str, content: &str, confirm_text: &str) -> Result<bool>;
    fn inputs(
        &mut self,
        title: &str,
        content: &str,
        fields: &[InputField],
    ) -> Result<Option<Vec<String>>>;
    fn select(&mut self, title: &str, items: &[&str]) -> Result<Option<usize>>;
}

/// Line-editor prompts on the controlling terminal.
pub struct RustylinePrompter {
    editor: Editor<(), DefaultHistory>,
}

impl RustylinePrompter {
    pub fn new() -> Result<Self> {
        let config = Config::builder().auto_add_history(false).build();
        let editor = Editor::with_config(config).context("Failed to open terminal prompt")?;
        Ok(Self { editor })
    }

    /// Reads one line; `None` on Ctrl+C or Ctrl+D.
    fn read(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
        match self.editor.readline_with_initial(prompt, (initial, "")) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err).context("Failed to read from terminal"),
        }
    }
}

impl Prompter for RustylinePrompter {
    fn confirm(&mut self, title: &str, content: &str, confirm_text: &str) -> Result<bool> {
        eprintln!("\x1b[1m{title}\x1b[0m");
        eprintln!("{content}");
        eprintln!();
        let answer = self.read(&format!("{confirm_text}? [y/N] "), "")?;
        Ok(answer.is_some_and(|a| is_yes(&a)))
    }

    fn inputs(
        &mut self,
        title: &str,
        content: &str,
        fields: &[InputField],
    ) -> Result<Option<Vec<String>>> {
        eprintln!("\x1b[1m{title}\x1b[0m");
        if !content.is_empty() {
            eprintln!("{content}");
        }
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            match self.read(&format!("{}: ", field.placeholder), &field.text)? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn select(&mut self, title: &str, items: &[&str]) -> Result<Option<usize>> {
        eprintln!("\x1b[1m{title}\x1b[0m");
        for (i, item) in items.iter().enumerate() {
            eprintln!("  {}. {item}", i + 1);
        }
        loop {
            let Some(line) = self.read("> ", "")? else {
                return Ok(None);
            };
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }
            match parse_choice(line, items.len()) {
                Some(index) => return Ok(Some(index)),
                None => eprintln!("Enter a number between 1 and {}", items.len()),
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "是")
}

/// One-based menu choice to index.
fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let n: usize = line.parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

/// Scripted answers, consumed in order.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedPrompter {
    pub confirms: std::collections::VecDeque<bool>,
    pub inputs: std::collections::VecDeque<Option<Vec<String>>>,
    pub selects: std::collections::VecDeque<Option<usize>>,
    /// Titles of every prompt shown
    pub shown: Vec<String>,
    /// Prefilled field text of every input form shown
    pub prefilled: Vec<Vec<String>>,
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, title: &str, _content: &str, _confirm_text: &str) -> Result<bool> {
        self.shown.push(title.to_string());
        Ok(self.confirms.pop_front().unwrap_or(false))
    }

    fn inputs(
        &mut self,
        title: &str,
        _content: &str,
        fields: &[InputField],
    ) -> Result<Option<Vec<String>>> {
        self.shown.push(title.to_string());
        self.prefilled
            .push(fields.iter().map(|f| f.text.clone()).collect());
        Ok(self.inputs.pop_front().flatten())
    }

    fn select(&mut self, title: &str, _items: &[&str]) -> Result<Option<usize>> {
        self.shown.push(title.to_string());
        Ok(self.selects.pop_front().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_is_one_based() {
        assert_eq!(parse_choice("1", 5), Some(0));
        assert_eq!(parse_choice("5", 5), Some(4));
        assert_eq!(parse_choice("0", 5), None);
        assert_eq!(parse_choice("6", 5), None);
        assert_eq!(parse_choice("two", 5), None);
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(is_yes("是"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }
}
