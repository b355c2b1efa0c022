use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::parser::{Keyword, ParseError, QueryParser};

/// Dot-separated field reference such as `Account.Owner.Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Builds a path from its segments; `None` when empty or when a segment is empty.
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|segment| segment.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, the field itself.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_relationship(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        parser.skip_whitespace()?;
        let pivot = parser.position();
        let text = parser.read_name()?;

        if text.is_empty() {
            return ParseError::new("Expected field name", pivot, parser).err();
        }

        if Keyword::is_keyword(&text) {
            return ParseError::new(&format!("Expected field name, got keyword: {}", text), pivot, parser).err();
        }

        match Self::new(text.split('.')) {
            Some(path) => Ok(path),
            None => ParseError::new(&format!("Invalid field path: {}", text), pivot, parser).err(),
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Aggregate function applied to a field, e.g. `COUNT(Id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateRef {
    pub function: String,
    pub field: FieldPath,
}

impl AggregateRef {
    pub fn new(function: &str, field: FieldPath) -> Self {
        Self { function: function.to_string(), field }
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        parser.skip_whitespace()?;
        let pivot = parser.position();
        let function = parser.read_name()?;
        if function.is_empty() {
            return ParseError::new("Expected aggregate function name", pivot, parser).err();
        }

        parser.skip_whitespace()?;
        parser.expect(b"(")?;
        let field = FieldPath::parse(parser)?;
        parser.skip_whitespace()?;
        parser.expect(b")")?;

        Ok(Self { function, field })
    }
}

impl Display for AggregateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.function, self.field)
    }
}

/// Either a plain field or an aggregate over one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRef {
    Field { path: FieldPath },
    Aggregate { aggregate: AggregateRef },
}

impl FieldRef {
    pub fn field(path: FieldPath) -> Self {
        FieldRef::Field { path }
    }

    pub fn aggregate(aggregate: AggregateRef) -> Self {
        FieldRef::Aggregate { aggregate }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, FieldRef::Aggregate { .. })
    }

    /// Tries `NAME(field)` first and falls back to a plain field path.
    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        if let Some(aggregate) = parser.try_parse(AggregateRef::parse)? {
            return Ok(Self::aggregate(aggregate));
        }

        Ok(Self::field(FieldPath::parse(parser)?))
    }
}

impl Display for FieldRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRef::Field { path } => write!(f, "{}", path),
            FieldRef::Aggregate { aggregate } => write!(f, "{}", aggregate),
        }
    }
}

impl From<FieldPath> for FieldRef {
    fn from(value: FieldPath) -> Self {
        Self::field(value)
    }
}

impl From<AggregateRef> for FieldRef {
    fn from(value: AggregateRef) -> Self {
        Self::aggregate(value)
    }
}
