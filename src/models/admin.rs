//! Administrator resource

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::decode::{FieldBag, Resource};
use crate::schema::ResourceType;

/// A dashboard administrator belonging to one organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Administrator {
    id: String,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::timestamp::millis_option::serialize"
    )]
    time_created: Option<DateTime<Utc>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::timestamp::millis_option::serialize"
    )]
    time_last_modified: Option<DateTime<Utc>>,

    /// Owning organization identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,

    /// Role: `super` or `standard`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    admin_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    is_read_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Map<String, Value>>,
}

impl Resource for Administrator {
    const TYPE: ResourceType = ResourceType::Administrator;

    fn from_fields(id: String, mut fields: FieldBag) -> Self {
        let resource = Self {
            id,
            time_created: fields.take_timestamp("timeCreated"),
            time_last_modified: fields.take_timestamp("timeLastModified"),
            organization: fields.take_identifier("organization"),
            email: fields.take_string("email"),
            admin_type: fields.take_string("type"),
            name: fields.take_string("name"),
            phone: fields.take_string("phone"),
            is_active: fields.take_bool("isActive"),
            is_read_only: fields.take_bool("isReadOnly"),
            metadata: fields.take_mapping("metadata"),
        };
        debug_assert!(fields.is_empty(), "unread fields: {:?}", fields);
        resource
    }
}

impl Administrator {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn time_created(&self) -> Option<DateTime<Utc>> {
        self.time_created
    }

    pub fn time_last_modified(&self) -> Option<DateTime<Utc>> {
        self.time_last_modified
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn admin_type(&self) -> Option<&str> {
        self.admin_type.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    pub fn is_read_only(&self) -> Option<bool> {
        self.is_read_only
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }
}
