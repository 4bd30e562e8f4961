//! File names and Terraform identifiers derived from monitor names.
//!
//! Monitor names carry team and environment tags and free-form punctuation,
//! e.g. `[container-app][prod] High CPU on web-1 {env:prod}`. The rules below
//! reduce such a name to `monitor-high-cpu-web-1.tf`. They run in order on
//! each lower-cased, whitespace-separated token.
//!
//! Surviving tokens only hold `[a-z0-9-]`, so a file name never leaves the
//! output directory and re-sanitizing a stem leaves it unchanged.

pub const FILE_EXTENSION: &str = ".tf";
const PREFIX: &str = "monitor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    /// Drop tokens containing this substring.
    DropContaining(&'static str),
    /// Drop tokens containing any of these characters.
    DropAnyChar(&'static str),
    /// Drop tokens equal to one of these words.
    DropWords(&'static [&'static str]),
    /// `[x]` becomes `x` when the token is exactly one bracket pair.
    UnwrapBrackets,
    /// Remove every character outside `[a-z0-9-]`.
    StripUnsafeChars,
    /// Drop tokens without a single ASCII letter or digit.
    DropNonAlphanumeric,
}

impl TokenRule {
    fn apply(&self, token: String) -> Option<String> {
        match self {
            TokenRule::DropContaining(needle) => (!token.contains(needle)).then_some(token),
            TokenRule::DropAnyChar(chars) => {
                (!token.contains(|c: char| chars.contains(c))).then_some(token)
            }
            TokenRule::DropWords(words) => (!words.iter().any(|w| *w == token)).then_some(token),
            TokenRule::UnwrapBrackets => Some(unwrap_brackets(token)),
            TokenRule::StripUnsafeChars => Some(
                token
                    .chars()
                    .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
                    .collect(),
            ),
            TokenRule::DropNonAlphanumeric => token
                .chars()
                .any(|c| c.is_ascii_alphanumeric())
                .then_some(token),
        }
    }
}

fn unwrap_brackets(token: String) -> String {
    match token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        Some(inner) if !inner.contains(['[', ']']) => inner.to_string(),
        _ => token,
    }
}

// The team tag is matched bracketed or as a whole token, never inside a
// joined stem such as `monitor-container-app-down`.
pub const DEFAULT_RULES: &[TokenRule] = &[
    TokenRule::DropContaining("[container-app]"),
    TokenRule::DropWords(&["container-app"]),
    TokenRule::DropContaining("[prod]"),
    TokenRule::DropContaining("[production]"),
    TokenRule::DropContaining("[staging]"),
    TokenRule::DropContaining("[dev]"),
    TokenRule::DropAnyChar("{}(),:_|"),
    TokenRule::UnwrapBrackets,
    TokenRule::DropAnyChar("[]"),
    TokenRule::DropWords(&["on", "for", "in", "is", "the", "of", "at"]),
    TokenRule::StripUnsafeChars,
    TokenRule::DropNonAlphanumeric,
];

/// Ordered token rules turning monitor names into file names.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    rules: Vec<TokenRule>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl Sanitizer {
    pub fn new(rules: Vec<TokenRule>) -> Self {
        Self { rules }
    }

    /// Append a rule that runs after the existing ones.
    pub fn with_rule(mut self, rule: TokenRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// File name (with extension) for a human-readable monitor name.
    pub fn sanitize(&self, raw_name: &str) -> String {
        let mut tokens: Vec<String> = raw_name
            .split_whitespace()
            .filter_map(|token| {
                self.rules
                    .iter()
                    .try_fold(token.to_lowercase(), |token, rule| rule.apply(token))
            })
            .collect();

        let prefixed = tokens
            .first()
            .is_some_and(|t| t.as_str() == PREFIX || t.starts_with(&format!("{}-", PREFIX)));
        if !prefixed {
            tokens.insert(0, PREFIX.to_string());
        }

        format!("{}{}", tokens.join("-"), FILE_EXTENSION)
    }
}

/// File name for a monitor name using the default rules.
pub fn sanitize(raw_name: &str) -> String {
    Sanitizer::default().sanitize(raw_name)
}

/// Identifier used as the Terraform resource name for a sanitized file name.
///
/// Only ASCII letters, digits and `_` survive, and the result never starts
/// with a digit.
pub fn derive_identifier(file_name: &str) -> String {
    let identifier = stem(file_name)
        .split('-')
        .map(|part| {
            part.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|part| !part.is_empty() && part.as_str() != PREFIX)
        .collect::<Vec<_>>()
        .join("_");

    match identifier.chars().next() {
        None => PREFIX.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{}_{}", PREFIX, identifier),
        Some(_) => identifier,
    }
}

/// Stem of a file name, without the extension.
pub fn stem(file_name: &str) -> &str {
    file_name.strip_suffix(FILE_EXTENSION).unwrap_or(file_name)
}
