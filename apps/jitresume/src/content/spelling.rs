//! Advisory spell checking for free-text sections.
//!
//! Findings are diagnostics only: they are logged and returned to the caller but
//! never change the text or stop a render.

use std::collections::HashSet;
use std::path::Path;

use crate::errors::ResumeError;

/// A word the checker did not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    pub word: String,
    /// Byte offset of the word in the checked text.
    pub offset: usize,
}

/// The spell-check collaborator used by the content model.
pub trait SpellChecker {
    fn check(&self, text: &str) -> Vec<Misspelling>;
}

/// Accepts everything. Used when no dictionary is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSpellChecker;

impl SpellChecker for NoopSpellChecker {
    fn check(&self, _text: &str) -> Vec<Misspelling> {
        Vec::new()
    }
}

/// Word-list checker. Matching is case-insensitive; all-caps tokens (acronyms)
/// and single letters are never reported.
#[derive(Debug, Clone, Default)]
pub struct DictionarySpellChecker {
    words: HashSet<String>,
}

impl DictionarySpellChecker {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Loads a word list with one word per line (e.g. `/usr/share/dict/words`).
    pub fn from_file(path: &Path) -> Result<Self, ResumeError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_words(text.lines()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    fn knows(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        if self.words.contains(&lower) {
            return true;
        }
        // Possessives: "company's" is fine when "company" is.
        lower
            .strip_suffix("'s")
            .is_some_and(|stem| self.words.contains(stem))
    }
}

impl SpellChecker for DictionarySpellChecker {
    fn check(&self, text: &str) -> Vec<Misspelling> {
        tokenize(text)
            .filter(|(_, word)| !is_exempt(word))
            .filter(|(_, word)| !self.knows(word))
            .map(|(offset, word)| Misspelling {
                word: word.to_string(),
                offset,
            })
            .collect()
    }
}

/// Yields `(byte_offset, word)` for each run of letters and inner apostrophes.
fn tokenize(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let is_word_char = c.is_alphabetic() || c == '\'';
        match (start, is_word_char) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                tokens.push((s, &text[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((s, &text[s..]));
    }

    tokens.into_iter().filter_map(|(offset, raw)| {
        let trimmed_front = raw.trim_start_matches('\'');
        let word = trimmed_front.trim_end_matches('\'');
        if word.is_empty() {
            None
        } else {
            Some((offset + (raw.len() - trimmed_front.len()), word))
        }
    })
}

fn is_exempt(word: &str) -> bool {
    word.chars().count() < 2 || word.chars().all(|c| !c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_checker() -> DictionarySpellChecker {
        DictionarySpellChecker::from_words(["built", "the", "platform", "team", "company"])
    }

    #[test]
    fn test_noop_reports_nothing() {
        assert!(NoopSpellChecker.check("teh platfrom").is_empty());
    }

    #[test]
    fn test_known_words_pass_case_insensitively() {
        assert!(make_checker().check("Built the Platform.").is_empty());
    }

    #[test]
    fn test_unknown_word_reported_with_offset() {
        let found = make_checker().check("built teh platform");
        assert_eq!(
            found,
            vec![Misspelling {
                word: "teh".to_string(),
                offset: 6
            }]
        );
    }

    #[test]
    fn test_acronyms_and_single_letters_exempt() {
        assert!(make_checker().check("the AWS team a").is_empty());
    }

    #[test]
    fn test_possessive_accepted() {
        assert!(make_checker().check("the company's team").is_empty());
    }

    #[test]
    fn test_quotes_trimmed_from_words() {
        let found = make_checker().check("'platfrom'");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].word, "platfrom");
        assert_eq!(found[0].offset, 1);
    }

    #[test]
    fn test_numbers_are_not_words() {
        assert!(make_checker().check("the 2019 team").is_empty());
    }

    #[test]
    fn test_from_file_loads_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words");
        std::fs::write(&path, "alpha\nBeta\n\n").unwrap();
        let checker = DictionarySpellChecker::from_file(&path).unwrap();
        assert_eq!(checker.len(), 2);
        assert!(checker.check("alpha beta").is_empty());
    }
}
