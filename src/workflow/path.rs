/*!
 * Reversible addresses into a workflow document.
 *
 * A path is an ordered list of segments, each an object key or an array
 * index. The textual form reads like `nodes[3].parameters.options[1].label`.
 * Keys that are empty or contain `.`, `[`, `]` or `"` are written in a quoted
 * bracket form (`["a.b"]`), so `[2]` is always an index and `.2` is always a
 * key.
 */

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::errors::WorkflowError;

/// One step from a container to its child
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member name
    Key(String),
    /// Array position
    Index(usize),
}

impl PathSegment {
    /// Empty container of the kind this segment steps into
    pub fn empty_container(&self) -> Value {
        match self {
            Self::Key(_) => Value::Object(serde_json::Map::new()),
            Self::Index(_) => Value::Array(Vec::new()),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Address of a single value inside a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<PathSegment>,
}

impl DocumentPath {
    /// The empty path (document root)
    pub fn root() -> Self {
        Self::default()
    }

    /// Path extended by an object key
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Path extended by an array index
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the first segment is the given object key
    pub fn starts_with_key(&self, key: &str) -> bool {
        matches!(self.segments.first(), Some(PathSegment::Key(k)) if k == key)
    }

    /// Read the value this path points at, if every step exists
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(document, |current, segment| match segment {
            PathSegment::Key(key) => current.as_object()?.get(key),
            PathSegment::Index(index) => current.as_array()?.get(*index),
        })
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"'])
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Key(key) if needs_quoting(key) => {
                    let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                    write!(f, "[{}]", quoted)?;
                }
                PathSegment::Key(key) if position == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
            }
        }
        Ok(())
    }
}

impl FromStr for DocumentPath {
    type Err = WorkflowError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| WorkflowError::InvalidPath(format!("{} in '{}'", reason, input));

        if input.is_empty() {
            return Err(invalid("empty path"));
        }

        let bytes = input.as_bytes();
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'[' => {
                    let rest = &input[pos + 1..];
                    if rest.starts_with('"') {
                        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<String>();
                        let key = match stream.next() {
                            Some(Ok(key)) => key,
                            _ => return Err(invalid("unterminated quoted key")),
                        };
                        let end = pos + 1 + stream.byte_offset();
                        if bytes.get(end) != Some(&b']') {
                            return Err(invalid("missing ']' after quoted key"));
                        }
                        segments.push(PathSegment::Key(key));
                        pos = end + 1;
                    } else {
                        let close = rest.find(']').ok_or_else(|| invalid("missing ']'"))?;
                        let digits = &rest[..close];
                        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                            return Err(invalid("array index must be a non-negative integer"));
                        }
                        let index = digits.parse::<usize>().map_err(|_| invalid("array index out of range"))?;
                        segments.push(PathSegment::Index(index));
                        pos += close + 2;
                    }
                }
                b'.' if !segments.is_empty() => {
                    let (key, next) = read_plain_key(input, pos + 1);
                    if key.is_empty() {
                        return Err(invalid("empty key after '.'"));
                    }
                    segments.push(PathSegment::Key(key.to_string()));
                    pos = next;
                }
                _ if segments.is_empty() && pos == 0 => {
                    let (key, next) = read_plain_key(input, 0);
                    if key.is_empty() {
                        return Err(invalid("path cannot start with '.'"));
                    }
                    segments.push(PathSegment::Key(key.to_string()));
                    pos = next;
                }
                other => {
                    return Err(invalid(&format!("unexpected character '{}'", other as char)));
                }
            }
        }

        Ok(Self { segments })
    }
}

/// Read an unquoted key starting at `start`, stopping at `.`, `[` or the end
fn read_plain_key(input: &str, start: usize) -> (&str, usize) {
    let rest = &input[start..];
    let end = rest.find(['.', '[', ']']).unwrap_or(rest.len());
    (&rest[..end], start + end)
}

impl Serialize for DocumentPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DocumentPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
