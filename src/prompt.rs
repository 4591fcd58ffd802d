/*
 * This file is part of Rampage.
 *
 * Copyright (C) 2025 Rampage contributors
 *
 * Rampage is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Rampage is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Rampage. If not, see <https://www.gnu.org/licenses/>.
 */

//! Terminal prompts.
//!
//! Answers given on the command line are used first; anything missing is
//! asked for on the input stream. An empty line or end of input cancels.

use std::io::{BufRead, Write};

use rp_core::{same_key, Prompter};
use tracing::warn;

/// Answers supplied up front, consumed by the first matching prompt
#[derive(Debug, Clone, Default)]
pub struct Answers {
    /// Free-text answer (a new preset name)
    pub input: Option<String>,
    /// Preset to select, matched by name or key
    pub choice: Option<String>,
    /// New name for the rename dialog
    pub new_name: Option<String>,
}

pub struct CliPrompter<R, W> {
    answers: Answers,
    input: R,
    output: W,
    missed: Option<String>,
}

impl<R: BufRead, W: Write> CliPrompter<R, W> {
    pub fn new(answers: Answers, input: R, output: W) -> Self {
        Self {
            answers,
            input,
            output,
            missed: None,
        }
    }

    /// A preset named on the command line that no prompt could match.
    ///
    /// Also reports a choice that was never asked for, which happens when
    /// there were no presets to choose from.
    pub fn missing_choice(&self) -> Option<&str> {
        self.missed.as_deref().or(self.answers.choice.as_deref())
    }

    fn ask(&mut self, message: &str) -> Option<String> {
        let _ = write!(self.output, "{} ", message);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let line = line.trim();
                (!line.is_empty()).then(|| line.to_string())
            }
        }
    }

    fn find(&self, candidates: &[String], wanted: &str) -> Option<usize> {
        candidates.iter().position(|c| same_key(c, wanted))
    }
}

impl<R: BufRead, W: Write> Prompter for CliPrompter<R, W> {
    fn read_input(&mut self, message: &str) -> Option<String> {
        match self.answers.input.take() {
            Some(answer) => Some(answer),
            None => self.ask(message),
        }
    }

    fn select_one(&mut self, message: &str, labels: &[String]) -> Option<usize> {
        if let Some(choice) = self.answers.choice.take() {
            let found = self.find(labels, &choice);
            if found.is_none() {
                warn!("No preset matches '{}'", choice);
                self.missed = Some(choice);
            }
            return found;
        }

        let _ = writeln!(self.output, "{}", message);
        for (i, label) in labels.iter().enumerate() {
            let _ = writeln!(self.output, "  {}) {}", i + 1, label);
        }
        let answer = self.ask("Number:")?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=labels.len()).contains(&n) => Some(n - 1),
            _ => None,
        }
    }

    fn rename_dialog(&mut self, labels: &[String], items: &[String]) -> Option<(String, String)> {
        let index = match self.answers.choice.take() {
            Some(choice) => {
                let found = self
                    .find(items, &choice)
                    .or_else(|| self.find(labels, &choice));
                if found.is_none() {
                    warn!("No preset matches '{}'", choice);
                    self.missed = Some(choice);
                }
                found
            }
            None => self.select_one("Preset name:", labels),
        };
        let item = items.get(index?)?.clone();

        let new_name = match self.answers.new_name.take() {
            Some(name) => name,
            None => self.ask("New preset name:")?,
        };
        Some((item, new_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn labels() -> Vec<String> {
        vec!["Warm Glow".to_string(), "Cold Steel".to_string()]
    }

    fn prompter(answers: Answers, input: &str) -> CliPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        CliPrompter::new(answers, Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_input_prefers_answer() {
        let mut p = prompter(
            Answers {
                input: Some("Given".into()),
                ..Default::default()
            },
            "Typed\n",
        );
        assert_eq!(p.read_input("Name:").as_deref(), Some("Given"));
        assert_eq!(p.read_input("Name:").as_deref(), Some("Typed"));
        assert_eq!(p.read_input("Name:"), None);
    }

    #[test]
    fn test_read_input_empty_line_cancels() {
        let mut p = prompter(Answers::default(), "   \n");
        assert_eq!(p.read_input("Name:"), None);
    }

    #[test]
    fn test_select_one_by_answer() {
        let mut p = prompter(
            Answers {
                choice: Some("coldsteel".into()),
                ..Default::default()
            },
            "",
        );
        assert_eq!(p.select_one("pick", &labels()), Some(1));
    }

    #[test]
    fn test_select_one_unknown_answer() {
        let mut p = prompter(
            Answers {
                choice: Some("lukewarm".into()),
                ..Default::default()
            },
            "1\n",
        );
        assert_eq!(p.select_one("pick", &labels()), None);
        assert_eq!(p.missing_choice(), Some("lukewarm"));
    }

    #[test]
    fn test_missing_choice_only_for_named_answers() {
        let mut p = prompter(Answers::default(), "\n");
        assert_eq!(p.select_one("pick", &labels()), None);
        assert_eq!(p.missing_choice(), None);

        let unused = prompter(
            Answers {
                choice: Some("warmglow".into()),
                ..Default::default()
            },
            "",
        );
        assert_eq!(unused.missing_choice(), Some("warmglow"));
    }

    #[test]
    fn test_select_one_interactive() {
        let mut p = prompter(Answers::default(), "2\n");
        assert_eq!(p.select_one("Select preset to remove", &labels()), Some(1));
        let shown = String::from_utf8(p.output.clone()).unwrap();
        assert!(shown.contains("Select preset to remove"));
        assert!(shown.contains("  1) Warm Glow"));

        let mut p = prompter(Answers::default(), "7\n");
        assert_eq!(p.select_one("pick", &labels()), None);
    }

    #[test]
    fn test_rename_dialog() {
        let items = vec!["warmglow".to_string(), "coldsteel".to_string()];
        let mut p = prompter(
            Answers {
                choice: Some("Cold Steel".into()),
                new_name: Some("Blue Steel".into()),
                ..Default::default()
            },
            "",
        );
        assert_eq!(
            p.rename_dialog(&labels(), &items),
            Some(("coldsteel".to_string(), "Blue Steel".to_string()))
        );

        let mut p = prompter(Answers::default(), "1\nHot Glow\n");
        assert_eq!(
            p.rename_dialog(&labels(), &items),
            Some(("warmglow".to_string(), "Hot Glow".to_string()))
        );
    }
}
