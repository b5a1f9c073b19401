use crate::error::GrammarError;
use regex::Regex;
use std::sync::LazyLock;

/// Which role a separator plays in an artist credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Introduces a featured artist ("feat.", "ft", "featuring").
    Collaboration,
    /// Joins co-equal artists (",", "&", "and", ...).
    Conjunction,
}

/// A single delimiter definition. `pattern` is a regex fragment; the whole
/// family is compiled case-insensitively into one alternation.
#[derive(Debug, Clone, Copy)]
pub struct Separator {
    pub name: &'static str,
    pub pattern: &'static str,
    pub family: Family,
}

const fn collab(name: &'static str, pattern: &'static str) -> Separator {
    Separator {
        name,
        pattern,
        family: Family::Collaboration,
    }
}

const fn conj(name: &'static str, pattern: &'static str) -> Separator {
    Separator {
        name,
        pattern,
        family: Family::Conjunction,
    }
}

/// Built-in delimiter table. Order matters within a family: at a given
/// position the first alternative that matches wins, so longer tokens
/// come before their prefixes.
pub const SEPARATORS: &[Separator] = &[
    collab("featuring", r"\bfeaturing\b"),
    collab("feat.", r"\bfeat\."),
    collab("feat", r"\bfeat\b"),
    collab("ft.", r"\bft\."),
    collab("ft", r"\bft\b"),
    conj("comma", r"\s*,\s*"),
    conj("ampersand", r"\s*&\s*"),
    conj("plus", r"\s*\+\s*"),
    conj("x", r"\s+x\s+"),
    conj("times", r"\s*×\s*"),
    conj("and", r"\s+and\s+"),
    conj("with", r"\s+with\s+"),
];

static BUILTIN: LazyLock<Grammar> =
    LazyLock::new(|| Grammar::new(SEPARATORS).expect("built-in separator table compiles"));

/// One split of a string around the first matching separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub left: &'a str,
    pub right: &'a str,
    /// Text after the closing bracket of a bracketed feature clause.
    pub after: Option<&'a str>,
}

/// Compiled delimiter grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    collaboration: Regex,
    conjunction: Regex,
}

impl Default for Grammar {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl Grammar {
    /// Compile a grammar from a separator table.
    ///
    /// A collaboration token may be preceded by an opening bracket
    /// ("A (feat. B) & C"); the bracket is consumed with the token and the
    /// tail ends at the matching closer. Patterns that match the empty
    /// string are rejected.
    pub fn new(separators: &[Separator]) -> Result<Self, GrammarError> {
        for sep in separators {
            let compiled = Regex::new(sep.pattern).map_err(|source| GrammarError::Pattern {
                name: sep.name.to_string(),
                source,
            })?;
            if compiled.is_match("") {
                return Err(GrammarError::EmptyMatch(sep.name.to_string()));
            }
        }

        let collaboration = format!(
            r"(?i)(?P<open>[(\[]\s*)?(?:{})",
            alternation(separators, Family::Collaboration)
        );
        let conjunction = format!(r"(?i)(?:{})", alternation(separators, Family::Conjunction));

        Ok(Self {
            collaboration: compile("collaboration", &collaboration)?,
            conjunction: compile("conjunction", &conjunction)?,
        })
    }

    /// Split around the first collaboration token, if any.
    pub fn find_collaboration<'a>(&self, s: &'a str) -> Option<Split<'a>> {
        let caps = self
            .collaboration
            .captures_iter(s)
            .find(|c| c.get(0).is_some_and(|m| !m.is_empty()))?;
        let m = caps.get(0)?;
        let mut right = &s[m.end()..];
        let mut after = None;

        if let Some(open) = caps.name("open") {
            let closer = if open.as_str().starts_with('(') { ')' } else { ']' };
            if let Some(idx) = right.find(closer) {
                let rest = &right[idx + closer.len_utf8()..];
                right = &right[..idx];
                if !rest.trim().is_empty() {
                    after = Some(rest);
                }
            }
        }

        Some(Split {
            left: &s[..m.start()],
            right,
            after,
        })
    }

    /// Split around the leftmost conjunction separator, if any.
    pub fn find_conjunction<'a>(&self, s: &'a str) -> Option<Split<'a>> {
        self.conjunction
            .find_iter(s)
            .find(|m| !m.is_empty())
            .map(|m| Split {
                left: &s[..m.start()],
                right: &s[m.end()..],
                after: None,
            })
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, GrammarError> {
    Regex::new(pattern).map_err(|source| GrammarError::Pattern {
        name: name.to_string(),
        source,
    })
}

fn alternation(separators: &[Separator], family: Family) -> String {
    let parts: Vec<&str> = separators
        .iter()
        .filter(|s| s.family == family)
        .map(|s| s.pattern)
        .collect();

    if parts.is_empty() {
        // Matches nothing, so an empty family is simply never applied.
        r"\b\B".to_string()
    } else {
        parts.join("|")
    }
}
