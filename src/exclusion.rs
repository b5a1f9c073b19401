use crate::error::{IoContext, Result};
use std::path::Path;

/// User-maintained substring rules. Matching is case-insensitive and runs
/// against the raw credit string, so a rule can straddle two artists.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    rules: Vec<String>,
}

impl IgnoreList {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for rule in rules {
            list.add(rule.as_ref());
        }
        list
    }

    /// Parse one rule per line. Blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    /// Read the ignore file. A missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No ignore file at {}, ignoring nothing", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).at(path)?;
        let list = Self::parse(&contents);
        log::info!("Loaded {} ignore rules from {}", list.len(), path.display());
        Ok(list)
    }

    fn add(&mut self, rule: &str) {
        let lower = rule.to_lowercase();
        if !lower.is_empty() && !self.rules.contains(&lower) {
            self.rules.push(lower);
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule found in `raw`, if any.
    pub fn matching_rule(&self, raw: &str) -> Option<&str> {
        let raw_lower = raw.to_lowercase();
        self.rules
            .iter()
            .find(|rule| raw_lower.contains(rule.as_str()))
            .map(String::as_str)
    }
}

pub fn is_ignored_by_list(raw: &str, list: &IgnoreList) -> bool {
    list.matching_rule(raw).is_some()
}

pub fn has_unsafe_separator(artist: &str, unsafe_char: char) -> bool {
    artist.contains(unsafe_char)
}
