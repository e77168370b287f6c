//! Typed client for the Onfleet logistics API
//!
//! Responses are decoded through a schema-driven layer: [`schema`] declares
//! the fields of each resource type, [`decode`] converts JSON payloads into
//! typed [`models`], and [`timestamp`] normalises epoch-millisecond
//! timestamps. [`client`] issues authenticated requests and hands the bodies
//! to the decoder.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod schema;
pub mod timestamp;

pub use client::{MockOnfleetClient, OnfleetApi, OnfleetClient};
pub use decode::{Resource, decode_as, decode_named};
pub use error::{ApiError, ConfigError, DecodeError, Error, Result};
pub use models::{Administrator, AdministratorUpdate, AnyResource, NewAdministrator, Organization};
pub use schema::ResourceType;
