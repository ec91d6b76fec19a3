use std::collections::BTreeMap;

use regex::Regex;

use crate::sort::SortExpression;

/// Pattern error for criteria tables.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternError(pub String);

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pattern error: {}", self.0)
    }
}

impl std::error::Error for PatternError {}

/// A glob-style permission pattern, matched against a sort key's field
/// reference with the direction marker stripped.
///
/// Supports `*`, `?`, `[seq]` and `[!seq]`. Compiled once to an anchored
/// regex; matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct AllowPattern {
    glob: String,
    regex: Regex,
}

impl AllowPattern {
    pub fn new(glob: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&translate(glob))
            .map_err(|e| PatternError(format!("invalid pattern {glob:?}: {e}")))?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }

    pub fn matches(&self, field: &str) -> bool {
        self.regex.is_match(field)
    }
}

/// Translate a glob into an anchored regex pattern.
fn translate(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut re = String::with_capacity(glob.len() + 8);
    re.push_str(r"\A(?s:");
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            '[' => {
                // A `]` directly after `[` or `[!` is part of the class; an
                // unterminated class is a literal bracket.
                let mut j = i;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    re.push_str(r"\[");
                } else {
                    let inner: String = chars[i..j].iter().collect();
                    let inner = inner.replace('\\', r"\\");
                    re.push('[');
                    if let Some(rest) = inner.strip_prefix('!') {
                        re.push('^');
                        re.push_str(rest);
                    } else if inner.starts_with('^') {
                        re.push('\\');
                        re.push_str(&inner);
                    } else {
                        re.push_str(&inner);
                    }
                    re.push(']');
                    i = j + 1;
                }
            }
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push_str(r")\z");
    re
}

/// Per-name allow-lists of glob patterns.
///
/// Absence of a name means "no keys permitted for that name", not "all
/// permitted": an unconfigured or misspelled name resolves to an empty
/// expression.
#[derive(Debug, Clone, Default)]
pub struct CriteriaTable {
    entries: BTreeMap<String, Vec<AllowPattern>>,
}

impl CriteriaTable {
    /// Compile a raw name → glob-list table. Fails on the first invalid
    /// pattern so bad configuration surfaces at startup, not per request.
    pub fn build(raw: &BTreeMap<String, Vec<String>>) -> Result<Self, PatternError> {
        let mut entries = BTreeMap::new();
        for (name, globs) in raw {
            let patterns = globs
                .iter()
                .map(|g| AllowPattern::new(g))
                .collect::<Result<Vec<_>, _>>()?;
            entries.insert(name.clone(), patterns);
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, name: impl Into<String>, patterns: Vec<AllowPattern>) {
        self.entries.insert(name.into(), patterns);
    }

    pub fn get(&self, name: &str) -> Option<&[AllowPattern]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a raw comma-separated request value against the allow-list
    /// registered for `name`.
    ///
    /// Keeps each requested key, direction marker intact, when its bare
    /// field reference matches any pattern for `name`. Non-matching keys
    /// are dropped silently: this is a filter over untrusted input, not a
    /// validator. The result is a sub-sequence of the request's keys, with
    /// no reordering and no deduplication.
    pub fn resolve(&self, name: &str, raw: &str) -> SortExpression {
        let patterns = match self.entries.get(name) {
            Some(p) if !p.is_empty() => p,
            _ => return SortExpression::default(),
        };
        SortExpression::parse(raw)
            .iter()
            .filter(|key| patterns.iter().any(|p| p.matches(key.field())))
            .cloned()
            .collect()
    }
}
