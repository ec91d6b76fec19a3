use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One ordering dimension: a field reference plus a direction.
///
/// The serialized form is the field reference with a single leading `-` for
/// descending. Parsing strips exactly one `-`; the remainder is kept verbatim,
/// so path segments (`author__name`, `author.name`) pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    field: String,
    direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parse a single token. Returns `None` for a token with no field
    /// reference (empty, whitespace-only, or a bare `-`).
    pub fn parse(token: &str) -> Option<Self> {
        let (field, direction) = match token.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (token, SortDirection::Asc),
        };
        if field.trim().is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            direction,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// An ordered sequence of sort keys. Insertion order is the priority order
/// for multi-key ordering. Serializes to the comma-joined string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortExpression(Vec<SortKey>);

impl SortExpression {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }

    /// Parse a comma-separated expression. Tokens without a field reference
    /// are discarded, so `""`, `"  "` and stray commas never produce keys.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(',').filter_map(SortKey::parse).collect())
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn push(&mut self, key: SortKey) {
        self.0.push(key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SortKey> {
        self.0.iter()
    }
}

impl fmt::Display for SortExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl FromIterator<SortKey> for SortExpression {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SortExpression {
    type Item = &'a SortKey;
    type IntoIter = std::slice::Iter<'a, SortKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for SortExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SortExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let expr = SortExpression::parse(&raw);
        if expr.is_empty() && !raw.trim().is_empty() {
            return Err(D::Error::custom(format!("invalid sort expression: {raw}")));
        }
        Ok(expr)
    }
}
