//! Intermediate representation handed to the code-emission templates.

use crate::error::ModelError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Enumerations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    /// Absolute identifier of the named individual
    pub id: String,
    pub name: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub id: String,
    pub class_name: String,
    /// Ascending by `id`
    pub values: Vec<EnumValue>,
    pub comment: String,
}

// =============================================================================
// Properties
// =============================================================================

/// Value type of a property. Exactly one kind applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyRange {
    EnumRef { enum_id: String },
    ClassRef { class_id: String },
    Datatype {
        datatype: String,
        pattern: Option<String>,
    },
}

impl PropertyRange {
    pub fn enum_id(&self) -> Option<&str> {
        match self {
            PropertyRange::EnumRef { enum_id } => Some(enum_id),
            _ => None,
        }
    }

    pub fn class_id(&self) -> Option<&str> {
        match self {
            PropertyRange::ClassRef { class_id } => Some(class_id),
            _ => None,
        }
    }

    pub fn datatype(&self) -> Option<&str> {
        match self {
            PropertyRange::Datatype { datatype, .. } => Some(datatype),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Absolute predicate identifier
    pub path: String,
    pub name: String,
    pub comment: String,
    pub min_count: Option<u64>,
    pub max_count: Option<u64>,
    pub range: PropertyRange,
}

// =============================================================================
// Classes
// =============================================================================

/// How instances of a class may be referenced by id elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Refable {
    No,
    Local,
    #[default]
    Optional,
    Yes,
    Always,
}

impl Refable {
    pub const ALL: [Refable; 5] = [
        Refable::No,
        Refable::Local,
        Refable::Optional,
        Refable::Yes,
        Refable::Always,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Refable::No => "no",
            Refable::Local => "local",
            Refable::Optional => "optional",
            Refable::Yes => "yes",
            Refable::Always => "always",
        }
    }
}

impl fmt::Display for Refable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for a value outside the five accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRefable(pub String);

impl FromStr for Refable {
    type Err = UnknownRefable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Refable::ALL
            .into_iter()
            .find(|refable| refable.as_str() == s)
            .ok_or_else(|| UnknownRefable(s.to_string()))
    }
}

impl UnknownRefable {
    pub(crate) fn for_class(self, class: &str) -> ModelError {
        ModelError::UnknownReferenceableValue {
            class: class.to_string(),
            value: self.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    pub id: String,
    pub class_name: String,
    /// Structural superclasses, ascending and without duplicates
    pub parent_ids: Vec<String>,
    /// Inverse of `parent_ids`, ascending
    pub derived_ids: Vec<String>,
    pub properties: Vec<Property>,
    pub comment: String,
    pub id_property: Option<String>,
    pub refable: Refable,
}
