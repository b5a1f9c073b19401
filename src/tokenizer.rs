use crate::grammar::Grammar;

/// Ordered artist names from one credit string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtistList {
    names: Vec<String>,
    split: bool,
}

impl ArtistList {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether any collaboration or conjunction delimiter matched.
    pub fn was_split(&self) -> bool {
        self.split
    }

    /// Join the names back into a single tag value.
    pub fn render(&self, separator: &str) -> String {
        self.names.join(separator)
    }

    fn push(&mut self, fragment: &str) {
        let name = fragment.trim();
        if !name.is_empty() {
            self.names.push(name.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenizerOptions {
    /// Remove `unsafe_char` from the whole string before splitting.
    pub strip_unsafe: bool,
    pub unsafe_char: char,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            strip_unsafe: false,
            unsafe_char: '/',
        }
    }
}

/// Splits raw artist tags into [`ArtistList`]s.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    grammar: Grammar,
    options: TokenizerOptions,
}

impl Tokenizer {
    pub fn new(grammar: Grammar, options: TokenizerOptions) -> Self {
        Self { grammar, options }
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Split `raw` into individual artists.
    ///
    /// Collaboration tokens are tried first: the text before the token is a
    /// conjunction list, the text after it is tokenized again (it may carry
    /// another "feat." or its own conjunctions). A bracketed clause ends at
    /// its closer and splitting resumes after it. Without a collaboration
    /// token the whole string is a conjunction list. Never fails; a string
    /// that yields nothing comes back as its trimmed self, unsplit.
    pub fn tokenize(&self, raw: &str) -> ArtistList {
        let stripped;
        let raw = if self.options.strip_unsafe && raw.contains(self.options.unsafe_char) {
            stripped = raw.replace(self.options.unsafe_char, "");
            stripped.as_str()
        } else {
            raw
        };

        let mut list = ArtistList::default();
        self.split_credit(raw, &mut list);

        if list.names.is_empty() {
            list.split = false;
            list.push(raw);
        }
        list
    }

    fn split_credit(&self, credit: &str, list: &mut ArtistList) {
        let mut rest = credit;
        while let Some(split) = self.grammar.find_collaboration(rest) {
            list.split = true;
            self.split_conjunctions(split.left, list);
            match split.after {
                // "A (feat. B) & C": the bracket body, then whatever follows it
                Some(after) => {
                    self.split_credit(split.right, list);
                    rest = after;
                }
                None => rest = split.right,
            }
        }
        self.split_conjunctions(rest, list);
    }

    fn split_conjunctions(&self, fragment: &str, list: &mut ArtistList) {
        let mut rest = fragment;
        while let Some(split) = self.grammar.find_conjunction(rest) {
            list.split = true;
            list.push(split.left);
            rest = split.right;
        }
        list.push(rest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &str) -> Vec<String> {
        Tokenizer::default().tokenize(raw).names().to_vec()
    }

    #[test]
    fn no_delimiter_is_single_trimmed() {
        for raw in ["Daft Punk", "  Björk ", "Alex G", "Feathers", "AC/DC"] {
            let list = Tokenizer::default().tokenize(raw);
            assert_eq!(list.names(), [raw.trim()]);
            assert!(!list.was_split(), "{raw}");
        }
    }

    #[test]
    fn mixed_conjunctions_left_to_right() {
        assert_eq!(names("A, B & C"), ["A", "B", "C"]);
        assert_eq!(names("A & B, C + D x E"), ["A", "B", "C", "D", "E"]);
        assert_eq!(names("A and B with C"), ["A", "B", "C"]);
    }

    #[test]
    fn collaboration_takes_precedence() {
        assert_eq!(names("A feat. B and C"), ["A", "B", "C"]);
        assert_eq!(names("A, B ft C"), ["A", "B", "C"]);
        assert_eq!(names("A featuring B, C & D"), ["A", "B", "C", "D"]);
    }

    #[test]
    fn repeated_collaboration_tokens() {
        assert_eq!(names("A feat. B feat. C"), ["A", "B", "C"]);
    }

    #[test]
    fn bracketed_feature_clause() {
        assert_eq!(names("A (feat. B & C)"), ["A", "B", "C"]);
        assert_eq!(names("A & B [ft. C]"), ["A", "B", "C"]);
    }

    #[test]
    fn splitting_resumes_after_bracket_closer() {
        assert_eq!(names("A (feat. B) & C"), ["A", "B", "C"]);
        assert_eq!(names("A (feat. B, C) x D feat. E"), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert_eq!(names("A, , B"), ["A", "B"]);
        assert_eq!(names("A &"), ["A"]);
        assert_eq!(names(", A"), ["A"]);
        let list = Tokenizer::default().tokenize("A,");
        assert_eq!(list.names(), ["A"]);
        assert!(list.was_split());
    }

    #[test]
    fn separators_only_falls_back_to_trimmed_input() {
        let list = Tokenizer::default().tokenize(" , & ");
        assert_eq!(list.names(), [", &"]);
        assert_eq!(list.len(), 1);
        assert!(!list.was_split());
    }

    #[test]
    fn strip_unsafe_applies_to_whole_string() {
        let tokenizer = Tokenizer::new(
            Grammar::default(),
            TokenizerOptions { strip_unsafe: true, unsafe_char: '/' },
        );
        let list = tokenizer.tokenize("AC/DC & B/");
        assert_eq!(list.names(), ["ACDC", "B"]);
    }

    #[test]
    fn render_uses_given_separator() {
        let list = Tokenizer::default().tokenize("DJ Snake, MC Ray feat. Lil Echo");
        assert_eq!(list.render("; "), "DJ Snake; MC Ray; Lil Echo");
        assert_eq!(list.render("/"), "DJ Snake/MC Ray/Lil Echo");
    }

    #[test]
    fn rendering_does_not_split_further() {
        let tokenizer = Tokenizer::default();
        for raw in ["A, B & C", "A feat. B and C", "Alex x Sandy Withers"] {
            let first = tokenizer.tokenize(raw);
            for name in first.names() {
                let again = tokenizer.tokenize(name);
                assert_eq!(again.names(), [name.clone()], "{raw}");
                assert!(!again.was_split());
            }
            let rendered = tokenizer.tokenize(&first.render("; "));
            assert!(!rendered.was_split(), "{raw}");
        }
    }
}
