//! Organization resource

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decode::{FieldBag, Resource};
use crate::schema::ResourceType;

/// An Onfleet organization.
///
/// `delegatees` holds bare organization identifiers. Fetch each one with
/// [`OnfleetApi::get_organization`](crate::client::OnfleetApi::get_organization)
/// when the full record is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
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

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,

    /// Identifier of the uploaded logo
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    delegatees: Option<Vec<String>>,
}

impl Resource for Organization {
    const TYPE: ResourceType = ResourceType::Organization;

    fn from_fields(id: String, mut fields: FieldBag) -> Self {
        let resource = Self {
            id,
            time_created: fields.take_timestamp("timeCreated"),
            time_last_modified: fields.take_timestamp("timeLastModified"),
            name: fields.take_string("name"),
            email: fields.take_string("email"),
            image: fields.take_identifier("image"),
            timezone: fields.take_string("timezone"),
            country: fields.take_string("country"),
            delegatees: fields.take_identifier_list("delegatees"),
        };
        debug_assert!(fields.is_empty(), "unread fields: {:?}", fields);
        resource
    }
}

impl Organization {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn time_created(&self) -> Option<DateTime<Utc>> {
        self.time_created
    }

    pub fn time_last_modified(&self) -> Option<DateTime<Utc>> {
        self.time_last_modified
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// IANA timezone name, e.g. `America/Los_Angeles`
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// ISO 3166 alpha-2 country code
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Delegatee organization identifiers in the order the API sent them.
    ///
    /// `None` means the payload had no `delegatees` field; `Some(&[])` means
    /// it was present and empty.
    pub fn delegatees(&self) -> Option<&[String]> {
        self.delegatees.as_deref()
    }
}
