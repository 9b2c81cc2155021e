//! CWL type declarations as an explicit tagged union.
//!
//! A type declaration appears in a document as one of three YAML shapes: a
//! scalar naming a primitive (`string`), a sequence of alternatives
//! (`["null", "string"]`), or a map carrying its own `type` tag
//! (`{type: enum, symbols: [...]}`). Deserialization resolves the shape into
//! one variant so that the mapper can pattern-match exhaustively instead of
//! probing attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A CWL type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CwlType {
    /// A named scalar type: `string`, `int`, `boolean`, `File`, `"null"`, ...
    Primitive(String),

    /// An ordered list of alternatives. A union containing the literal
    /// `"null"` member is how CWL spells nullability.
    Union(Vec<CwlType>),

    /// A fixed symbol set (`type: enum`).
    Enum {
        #[serde(rename = "type")]
        kind: EnumTag,
        symbols: Vec<String>,
    },

    /// A homogeneous list of items (`type: array`).
    Array {
        #[serde(rename = "type")]
        kind: ArrayTag,
        items: Box<CwlType>,
    },

    /// A named-field aggregate (`type: record`). Parsed for completeness;
    /// records map through the passthrough policy, never a dedicated option
    /// type.
    Record {
        #[serde(rename = "type")]
        kind: RecordTag,
        #[serde(default)]
        fields: Vec<RecordField>,
    },
}

/// Kind tag of an enum declaration; only the literal `enum` parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnumTag {
    #[serde(rename = "enum")]
    Enum,
}

/// Kind tag of an array declaration; only the literal `array` parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrayTag {
    #[serde(rename = "array")]
    Array,
}

/// Kind tag of a record declaration; only the literal `record` parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordTag {
    #[serde(rename = "record")]
    Record,
}

/// A single field of a record declaration (list form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordField {
    #[serde(alias = "id")]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: CwlType,
}

impl CwlType {
    /// A scalar type named `name`.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// A union over the given alternatives, in order.
    pub fn union(alternatives: Vec<CwlType>) -> Self {
        Self::Union(alternatives)
    }

    /// An enum over the given symbol names.
    pub fn enumeration(symbols: Vec<String>) -> Self {
        Self::Enum {
            kind: EnumTag::Enum,
            symbols,
        }
    }

    /// An array of `items`.
    pub fn array(items: CwlType) -> Self {
        Self::Array {
            kind: ArrayTag::Array,
            items: Box::new(items),
        }
    }
}

impl fmt::Display for CwlType {
    /// The declaration's own string form, used as the passthrough mapping
    /// for types with no table entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => f.write_str(name),
            Self::Union(alternatives) => {
                f.write_str("[")?;
                for (index, alternative) in alternatives.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                f.write_str("]")
            }
            Self::Enum { symbols, .. } => write!(f, "enum({})", symbols.join(", ")),
            Self::Array { items, .. } => write!(f, "{items}[]"),
            Self::Record { .. } => f.write_str("record"),
        }
    }
}
