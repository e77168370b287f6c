//! Static field declarations for each API resource type
//!
//! A [`Schema`] lists the fields the decoder recognises for one resource
//! type and the [`FieldKind`] each one is converted as. Fields not listed
//! here are ignored when decoding, so additive API changes never break
//! existing clients.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// Name of the primary identifier field, shared by every resource type.
pub const ID_FIELD: &str = "id";

/// How a declared field's JSON value is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Opaque identifier string (the resource's own id, or a reference to
    /// another resource)
    Identifier,
    /// Epoch milliseconds, truncated to whole seconds
    Timestamp,
    String,
    Boolean,
    Number,
    /// Free-form name → value mapping
    Mapping,
    /// Ordered list of identifiers referencing other resources
    IdentifierList,
}

impl FieldKind {
    /// Human-readable description used in decode error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Identifier => "an identifier string",
            FieldKind::Timestamp => "epoch milliseconds as a number",
            FieldKind::String => "a string",
            FieldKind::Boolean => "a boolean",
            FieldKind::Number => "a number",
            FieldKind::Mapping => "an object or a list of name/value entries",
            FieldKind::IdentifierList => "a list of identifier strings",
        }
    }
}

/// A single declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name (camelCase, as sent by the API)
    pub name: &'static str,
    pub kind: FieldKind,
    /// Required fields must be present and non-null
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Resource types with a registered schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Organization,
    Administrator,
}

impl ResourceType {
    pub const ALL: [ResourceType; 2] = [ResourceType::Organization, ResourceType::Administrator];

    /// Wire name of the resource type
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Organization => "organization",
            ResourceType::Administrator => "administrator",
        }
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            ResourceType::Organization => &ORGANIZATION,
            ResourceType::Administrator => &ADMINISTRATOR,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceType {
    type Err = DecodeError;

    /// Accepts the wire name case-insensitively, plus the `admin` shorthand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "organization" => Ok(ResourceType::Organization),
            "administrator" | "admin" => Ok(ResourceType::Administrator),
            _ => Err(DecodeError::UnknownResourceType(s.to_string())),
        }
    }
}

/// Declared fields of one resource type.
#[derive(Debug)]
pub struct Schema {
    pub resource: ResourceType,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Look up a declared field by wire name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn recognizes(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Resolve a schema by wire name.
pub fn lookup(name: &str) -> Result<&'static Schema, DecodeError> {
    name.parse::<ResourceType>().map(|rt| rt.schema())
}

static ORGANIZATION: Schema = Schema {
    resource: ResourceType::Organization,
    fields: &[
        FieldSpec::required(ID_FIELD, FieldKind::Identifier),
        FieldSpec::optional("timeCreated", FieldKind::Timestamp),
        FieldSpec::optional("timeLastModified", FieldKind::Timestamp),
        FieldSpec::optional("name", FieldKind::String),
        FieldSpec::optional("email", FieldKind::String),
        FieldSpec::optional("image", FieldKind::Identifier),
        FieldSpec::optional("timezone", FieldKind::String),
        FieldSpec::optional("country", FieldKind::String),
        FieldSpec::optional("delegatees", FieldKind::IdentifierList),
    ],
};

static ADMINISTRATOR: Schema = Schema {
    resource: ResourceType::Administrator,
    fields: &[
        FieldSpec::required(ID_FIELD, FieldKind::Identifier),
        FieldSpec::optional("timeCreated", FieldKind::Timestamp),
        FieldSpec::optional("timeLastModified", FieldKind::Timestamp),
        FieldSpec::optional("organization", FieldKind::Identifier),
        FieldSpec::optional("email", FieldKind::String),
        FieldSpec::optional("type", FieldKind::String),
        FieldSpec::optional("name", FieldKind::String),
        FieldSpec::optional("phone", FieldKind::String),
        FieldSpec::optional("isActive", FieldKind::Boolean),
        FieldSpec::optional("isReadOnly", FieldKind::Boolean),
        FieldSpec::optional("metadata", FieldKind::Mapping),
    ],
};
