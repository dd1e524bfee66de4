//! Tagged values held by the store.
//!
//! A [`TaggedValue`] owns exactly one [`Payload`]. The payload is a sum type,
//! so the [`ValueKind`] tag is derived from it rather than tracked beside it
//! and the two cannot disagree. Dropping the payload is the release step;
//! the compiler runs it once on every exit path.

use std::fmt;

use crate::store::StoreError;

/// Discriminant of the payload types a [`TaggedValue`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum ValueKind {
    #[default]
    Int,
    Float,
    String,
    IntSequence,
}

impl ValueKind {
    /// All kinds, in declaration order.
    pub const ALL: [ValueKind; 4] = [
        ValueKind::Int,
        ValueKind::Float,
        ValueKind::String,
        ValueKind::IntSequence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::IntSequence => "int-sequence",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned data behind a tagged value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
#[cfg_attr(feature = "config", serde(tag = "kind", content = "value", rename_all = "kebab-case"))]
pub enum Payload {
    Int(i32),
    Float(f32),
    String(String),
    IntSequence(Vec<i32>),
}

impl Payload {
    /// The kind tag matching this payload.
    pub fn kind(&self) -> ValueKind {
        match self {
            Payload::Int(_) => ValueKind::Int,
            Payload::Float(_) => ValueKind::Float,
            Payload::String(_) => ValueKind::String,
            Payload::IntSequence(_) => ValueKind::IntSequence,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Int(v) => write!(f, "{}", v),
            Payload::Float(v) => write!(f, "{}", v),
            Payload::String(v) => write!(f, "{:?}", v),
            Payload::IntSequence(v) => {
                f.write_str("[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Int(value)
    }
}

impl From<f32> for Payload {
    fn from(value: f32) -> Self {
        Payload::Float(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::String(value.to_owned())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::String(value)
    }
}

impl From<&[i32]> for Payload {
    fn from(value: &[i32]) -> Self {
        Payload::IntSequence(value.to_vec())
    }
}

impl From<Vec<i32>> for Payload {
    fn from(value: Vec<i32>) -> Self {
        Payload::IntSequence(value)
    }
}

/// A single value cell: a kind tag plus the payload it owns.
///
/// The payload is absent only in the [`Default`] state. Every constructor
/// installs a payload, and the tag always reports the payload's kind.
///
/// # Example
///
/// ```ignore
/// use config_store::TaggedValue;
///
/// let ports = TaggedValue::new(vec![8080, 8081]);
/// let mut copy = ports.clone();
/// copy.release();
/// assert_eq!(ports.as_int_sequence()?, vec![8080, 8081]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaggedValue {
    kind: ValueKind,
    payload: Option<Payload>,
}

impl TaggedValue {
    /// Store `value`, tagged with its own kind.
    pub fn new(value: impl Into<Payload>) -> Self {
        let payload = value.into();
        Self {
            kind: payload.kind(),
            payload: Some(payload),
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// True only for a default-constructed or released value.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Release the current payload and install a deep copy of `other`'s.
    ///
    /// `other` cannot alias `self`, so the copy never reads released storage.
    pub fn replace_with(&mut self, other: &TaggedValue) {
        self.release();
        self.kind = other.kind;
        self.payload = other.payload.clone();
    }

    /// Drop the payload. The kind is kept; calling this twice is a no-op.
    pub fn release(&mut self) {
        self.payload = None;
    }

    /// Consume the cell and hand out its payload.
    pub fn into_payload(self) -> Option<Payload> {
        self.payload
    }

    fn checked(&self, expected: ValueKind) -> Result<&Payload, StoreError> {
        if self.kind != expected {
            return Err(StoreError::TypeMismatch {
                key: None,
                expected,
                actual: self.kind,
            });
        }
        self.payload
            .as_ref()
            .ok_or(StoreError::NullPayload { key: None })
    }

    pub fn as_int(&self) -> Result<i32, StoreError> {
        match self.checked(ValueKind::Int)? {
            Payload::Int(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Int, other)),
        }
    }

    pub fn as_float(&self) -> Result<f32, StoreError> {
        match self.checked(ValueKind::Float)? {
            Payload::Float(v) => Ok(*v),
            other => Err(mismatch(ValueKind::Float, other)),
        }
    }

    /// Owned copy of a string payload.
    pub fn as_string(&self) -> Result<String, StoreError> {
        match self.checked(ValueKind::String)? {
            Payload::String(v) => Ok(v.clone()),
            other => Err(mismatch(ValueKind::String, other)),
        }
    }

    /// Owned copy of an integer-sequence payload; never a view into `self`.
    pub fn as_int_sequence(&self) -> Result<Vec<i32>, StoreError> {
        match self.checked(ValueKind::IntSequence)? {
            Payload::IntSequence(v) => Ok(v.clone()),
            other => Err(mismatch(ValueKind::IntSequence, other)),
        }
    }
}

// The tag is derived from the payload in `new`, so this only fires if a
// future constructor breaks that rule.
fn mismatch(expected: ValueKind, found: &Payload) -> StoreError {
    StoreError::TypeMismatch {
        key: None,
        expected,
        actual: found.kind(),
    }
}

impl From<Payload> for TaggedValue {
    fn from(payload: Payload) -> Self {
        Self::new(payload)
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(payload) => write!(f, "{} ({})", payload, self.kind),
            None => write!(f, "<empty> ({})", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tags_with_payload_kind() {
        assert_eq!(TaggedValue::new(7).kind(), ValueKind::Int);
        assert_eq!(TaggedValue::new(1.5f32).kind(), ValueKind::Float);
        assert_eq!(TaggedValue::new("a").kind(), ValueKind::String);
        assert_eq!(TaggedValue::new(vec![1, 2]).kind(), ValueKind::IntSequence);
    }

    #[test]
    fn test_default_is_empty_int() {
        let value = TaggedValue::default();
        assert!(value.is_empty());
        assert_eq!(value.kind(), ValueKind::Int);
        assert!(matches!(
            value.as_int(),
            Err(StoreError::NullPayload { key: None })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = TaggedValue::new(vec![1, 2, 3]);
        let mut copy = original.clone();
        copy.release();
        assert!(copy.is_empty());
        assert_eq!(original.as_int_sequence().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_replace_with_changes_kind() {
        let mut value = TaggedValue::new("old");
        let other = TaggedValue::new(42);
        value.replace_with(&other);
        assert_eq!(value.kind(), ValueKind::Int);
        assert_eq!(value.as_int().unwrap(), 42);
        assert_eq!(other.as_int().unwrap(), 42);
    }

    #[test]
    fn test_replace_with_empty_source() {
        let mut value = TaggedValue::new(3.0f32);
        value.replace_with(&TaggedValue::default());
        assert!(value.is_empty());
        assert_eq!(value.kind(), ValueKind::Int);
    }

    #[test]
    fn test_release_twice_is_noop() {
        let mut value = TaggedValue::new("payload");
        value.release();
        value.release();
        assert!(value.is_empty());
        assert_eq!(value.kind(), ValueKind::String);
    }

    #[test]
    fn test_typed_reader_mismatch() {
        let value = TaggedValue::new("not_an_int");
        let err = value.as_int().unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().starts_with("Type mismatch"));
    }

    #[test]
    fn test_sequence_copy_does_not_alias() {
        let value = TaggedValue::new(vec![5, 6]);
        let mut out = value.as_int_sequence().unwrap();
        out.push(7);
        assert_eq!(value.as_int_sequence().unwrap(), vec![5, 6]);
    }

    #[test]
    fn test_display() {
        assert_eq!(TaggedValue::new(vec![1, 2]).to_string(), "[1, 2] (int-sequence)");
        assert_eq!(TaggedValue::new("x").to_string(), "\"x\" (string)");
        assert_eq!(TaggedValue::default().to_string(), "<empty> (int)");
    }
}
