//! Typed Onfleet resources
//!
//! Every resource is immutable once decoded: fields are private and exposed
//! through read-only accessors. Optional fields report `None` when the
//! payload did not carry them.

mod admin;
mod org;
mod requests;

use serde::Serialize;

pub use admin::Administrator;
pub use org::Organization;
pub use requests::{AdministratorUpdate, NewAdministrator};

use crate::schema::ResourceType;

/// A resource whose type was chosen at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyResource {
    Organization(Organization),
    Administrator(Administrator),
}

impl AnyResource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            AnyResource::Organization(_) => ResourceType::Organization,
            AnyResource::Administrator(_) => ResourceType::Administrator,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnyResource::Organization(org) => org.id(),
            AnyResource::Administrator(admin) => admin.id(),
        }
    }
}
