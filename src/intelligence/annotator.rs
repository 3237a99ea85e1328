// ABOUTME: In-process linguistic annotator producing part-of-speech tags and place entities
// ABOUTME: Closed-class lexicon tagging plus greedy gazetteer matching for GPE/LOC spans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Lexicon-based annotation
//!
//! The annotator splits text into Unicode word tokens and single punctuation
//! marks, with clitics (`'s`, `n't`, `'re`, ...) as tokens of their own so
//! that `hyderabad's` still matches `hyderabad`. Places are recognized by greedy
//! longest match against a gazetteer, and tags parts of speech from a
//! closed-class lexicon. Open-class words default to `NOUN`; words inside a
//! recognized place are `PROPN`.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Gazetteer compiled into the binary
const BUILTIN_GAZETTEER: &str = include_str!("../../data/gazetteer.tsv");

/// Word tokens with an optional internal apostrophe, or a single non-space symbol
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}]+(?:['’]\p{L}+)?|[^\s\p{L}\p{N}]";

/// Clitics split off the end of a word token
const CLITICS: &[&str] = &[
    "n't", "n’t", "'s", "’s", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'m", "’m", "'d", "’d",
];

/// Universal part-of-speech tags produced by the annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Pos {
    Noun,
    Propn,
    Verb,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Aux,
    Cconj,
    Sconj,
    Part,
    Num,
    Punct,
    Intj,
}

impl Pos {
    /// True for `NOUN` and `PROPN`
    #[must_use]
    pub const fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }
}

/// Named-entity labels recognized by the annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityLabel {
    /// Geopolitical entity: city, state, country
    #[serde(rename = "GPE")]
    Gpe,
    /// Non-GPE location: river, range, landmark, region
    #[serde(rename = "LOC")]
    Loc,
}

impl EntityLabel {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "GPE" => Some(Self::Gpe),
            "LOC" => Some(Self::Loc),
            _ => None,
        }
    }

    /// True for labels that denote a place
    #[must_use]
    pub const fn is_place(self) -> bool {
        matches!(self, Self::Gpe | Self::Loc)
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpe => f.write_str("GPE"),
            Self::Loc => f.write_str("LOC"),
        }
    }
}

/// A token with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Surface form as written
    pub text: String,
    /// Part-of-speech tag
    pub pos: Pos,
}

/// A recognized entity covering tokens `start..end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySpan {
    /// Canonical entity name
    pub text: String,
    /// Entity type
    pub label: EntityLabel,
    /// Index of the first token
    pub start: usize,
    /// Index one past the last token
    pub end: usize,
}

/// Tokens and entities of one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Tagged tokens in text order
    pub tokens: Vec<Token>,
    /// Recognized entities in text order
    pub entities: Vec<EntitySpan>,
}

/// Part-of-speech tagging and named-entity recognition
pub trait LanguageAnnotator: Send + Sync {
    /// Annotate `text`
    fn annotate(&self, text: &str) -> Annotation;
}

/// Place names keyed by their space-joined lower-case tokens
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: HashMap<String, (String, EntityLabel)>,
    max_tokens: usize,
}

impl Gazetteer {
    /// The gazetteer shipped with the binary
    ///
    /// # Errors
    ///
    /// Returns a config error if the embedded list is malformed
    pub fn builtin(tokenizer: &Tokenizer) -> AppResult<Self> {
        Self::parse(BUILTIN_GAZETTEER, tokenizer)
    }

    /// Load a gazetteer file
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be read or parsed
    pub fn from_path(path: &Path, tokenizer: &Tokenizer) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read gazetteer {}: {e}", path.display()))
        })?;
        Self::parse(&contents, tokenizer)
    }

    /// Parse `name<TAB>LABEL` lines; blank lines and `#` comments are skipped
    ///
    /// # Errors
    ///
    /// Returns a config error naming the first malformed line
    pub fn parse(contents: &str, tokenizer: &Tokenizer) -> AppResult<Self> {
        let mut gazetteer = Self::default();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_no = index + 1;
            let (name, label) = line.split_once('\t').ok_or_else(|| {
                AppError::config(format!("Gazetteer line {line_no}: expected name<TAB>LABEL"))
            })?;
            let label = EntityLabel::parse(label).ok_or_else(|| {
                AppError::config(format!(
                    "Gazetteer line {line_no}: unknown label '{}'",
                    label.trim()
                ))
            })?;
            let name = name.trim().to_lowercase();
            let tokens = tokenizer.tokenize(&name);
            if tokens.is_empty() {
                return Err(AppError::config(format!(
                    "Gazetteer line {line_no}: empty name"
                )));
            }
            gazetteer.max_tokens = gazetteer.max_tokens.max(tokens.len());
            gazetteer.entries.insert(tokens.join(" "), (name, label));
        }
        Ok(gazetteer)
    }

    /// Number of names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no names are loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Greedy longest-match spans over lower-case `tokens`
    fn find_spans(&self, tokens: &[String]) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        let mut start = 0;
        while start < tokens.len() {
            let longest = self.max_tokens.min(tokens.len() - start);
            let hit = (1..=longest).rev().find_map(|len| {
                let key = tokens[start..start + len].join(" ");
                self.entries.get(&key).map(|(name, label)| (len, name, *label))
            });
            if let Some((len, name, label)) = hit {
                spans.push(EntitySpan {
                    text: name.clone(),
                    label,
                    start,
                    end: start + len,
                });
                start += len;
            } else {
                start += 1;
            }
        }
        spans
    }
}

/// Splits text into word and punctuation tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Compile the token pattern
    ///
    /// # Errors
    ///
    /// Returns an internal error if the pattern fails to compile
    pub fn new() -> AppResult<Self> {
        let pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| AppError::internal(format!("Invalid token pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Tokens of `text`, in order
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in self.pattern.find_iter(text).map(|m| m.as_str()) {
            match split_clitic(word) {
                Some((stem, clitic)) => {
                    tokens.push(stem.to_owned());
                    tokens.push(clitic.to_owned());
                }
                None => tokens.push(word.to_owned()),
            }
        }
        tokens
    }
}

/// Split a trailing clitic (`hyderabad's` -> `hyderabad`, `'s`)
fn split_clitic(word: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        let split = word.len().checked_sub(clitic.len())?;
        if split == 0 || !word.is_char_boundary(split) {
            return None;
        }
        let (stem, tail) = word.split_at(split);
        tail.eq_ignore_ascii_case(clitic).then_some((stem, tail))
    })
}

/// Rule-based [`LanguageAnnotator`]
#[derive(Debug, Clone)]
pub struct LexiconAnnotator {
    tokenizer: Tokenizer,
    gazetteer: Gazetteer,
    lexicon: HashMap<&'static str, Pos>,
}

impl LexiconAnnotator {
    /// Build an annotator over the given gazetteer
    #[must_use]
    pub fn new(tokenizer: Tokenizer, gazetteer: Gazetteer) -> Self {
        Self {
            tokenizer,
            gazetteer,
            lexicon: closed_class_lexicon(),
        }
    }

    /// Load the annotator with the built-in gazetteer or the file at `path`
    ///
    /// # Errors
    ///
    /// Returns a config error if the gazetteer cannot be loaded
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let tokenizer = Tokenizer::new()?;
        let gazetteer = match path {
            Some(path) => Gazetteer::from_path(path, &tokenizer)?,
            None => Gazetteer::builtin(&tokenizer)?,
        };
        if gazetteer.is_empty() {
            return Err(AppError::config("Gazetteer contains no places"));
        }
        Ok(Self::new(tokenizer, gazetteer))
    }

    /// Number of place names known to the annotator
    #[must_use]
    pub fn gazetteer_len(&self) -> usize {
        self.gazetteer.len()
    }

    fn tag(&self, token: &str) -> Pos {
        let lower = token.to_lowercase();
        if let Some(pos) = self.lexicon.get(lower.as_str()) {
            return *pos;
        }
        if token.chars().all(char::is_numeric) {
            Pos::Num
        } else if !token.chars().any(char::is_alphanumeric) {
            Pos::Punct
        } else {
            Pos::Noun
        }
    }
}

impl LanguageAnnotator for LexiconAnnotator {
    fn annotate(&self, text: &str) -> Annotation {
        let words = self.tokenizer.tokenize(text);
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let entities = self.gazetteer.find_spans(&lowered);

        let mut tokens: Vec<Token> = words
            .into_iter()
            .map(|text| {
                let pos = self.tag(&text);
                Token { text, pos }
            })
            .collect();
        for span in &entities {
            for token in &mut tokens[span.start..span.end] {
                if token.pos != Pos::Punct {
                    token.pos = Pos::Propn;
                }
            }
        }

        Annotation { tokens, entities }
    }
}

/// Function words and frequent diary verbs, adjectives and adverbs
fn closed_class_lexicon() -> HashMap<&'static str, Pos> {
    const GROUPS: &[(Pos, &[&str])] = &[
        (
            Pos::Det,
            &[
                "a", "an", "the", "this", "that", "these", "those", "some", "any", "each",
                "every", "no", "all", "both", "another", "much", "many", "few", "several",
            ],
        ),
        (
            Pos::Pron,
            &[
                "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "you", "your",
                "he", "him", "his", "she", "her", "hers", "it", "its", "they", "them", "their",
                "who", "whom", "what", "which", "something", "nothing", "everything", "someone",
                "everyone",
            ],
        ),
        (
            Pos::Adp,
            &[
                "in", "on", "at", "to", "from", "with", "without", "by", "for", "of", "about",
                "into", "onto", "over", "under", "near", "after", "before", "during", "through",
                "via", "towards", "toward", "across", "around", "between", "till", "until",
            ],
        ),
        (Pos::Cconj, &["and", "or", "but", "nor", "yet", "so"]),
        (
            Pos::Sconj,
            &["because", "although", "though", "while", "when", "if", "since", "as", "whereas"],
        ),
        (
            Pos::Aux,
            &[
                "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "do",
                "does", "did", "will", "would", "shall", "should", "can", "could", "may",
                "might", "must", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'m", "’m", "'d",
                "’d",
            ],
        ),
        (Pos::Part, &["not", "n't", "n’t", "'s", "’s", "up", "off", "out"]),
        (Pos::Intj, &["oh", "wow", "yes", "hey", "ok", "okay"]),
        (
            Pos::Verb,
            &[
                "ate", "eat", "eating", "eaten", "had", "having", "drank", "drink", "drinking",
                "went", "go", "going", "gone", "drove", "drive", "driving", "travelled",
                "traveled", "travel", "visited", "visit", "reached", "reach", "left", "leave",
                "returned", "return", "came", "come", "took", "take", "made", "make", "cooked",
                "cook", "bought", "buy", "met", "meet", "slept", "sleep", "woke", "walked",
                "walk", "ran", "run", "flew", "fly", "stayed", "stay", "felt", "feel", "got",
                "get", "enjoyed", "enjoy", "tried", "try", "started", "start", "finished",
                "finish", "skipped", "skip", "worked", "work", "spent", "spend",
            ],
        ),
        (
            Pos::Adj,
            &[
                "good", "great", "bad", "tasty", "delicious", "healthy", "hot", "cold", "fresh",
                "spicy", "sweet", "long", "short", "tired", "happy", "sad", "early", "late",
                "big", "small", "heavy", "light", "quick", "nice", "lovely", "busy", "full",
                "hungry",
            ],
        ),
        (
            Pos::Adv,
            &[
                "then", "later", "again", "also", "very", "really", "too", "just", "quite",
                "soon", "already", "still", "finally", "back", "there", "here", "now", "today",
                "tonight", "yesterday", "tomorrow", "afterwards", "home",
            ],
        ),
    ];

    GROUPS
        .iter()
        .flat_map(|(pos, words)| words.iter().map(move |word| (*word, *pos)))
        .collect()
}
