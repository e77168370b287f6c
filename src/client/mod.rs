//! Onfleet API client
//!
//! [`OnfleetApi`] is the seam between command handlers and the network.
//! [`OnfleetClient`] talks HTTP; [`MockOnfleetClient`] serves canned
//! resources for tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Administrator, AdministratorUpdate, NewAdministrator, Organization};

pub mod mock;
pub mod onfleet;

pub use mock::MockOnfleetClient;
pub use onfleet::OnfleetClient;

/// Onfleet API operations
///
/// Every method decodes the response body through
/// [`decode`](crate::decode::decode), so decode failures surface as
/// [`Error::Decode`](crate::error::Error::Decode).
#[async_trait]
pub trait OnfleetApi: Send + Sync {
    /// Fetch the organization owning the API key
    async fn get_my_organization(&self) -> Result<Organization>;

    /// Fetch an organization by id, typically a delegatee of the caller's own
    async fn get_organization(&self, id: &str) -> Result<Organization>;

    /// List administrators of the caller's organization
    async fn list_administrators(&self) -> Result<Vec<Administrator>>;

    /// Create a new administrator
    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<Administrator>;

    /// Update an existing administrator
    async fn update_administrator(
        &self,
        id: &str,
        update: &AdministratorUpdate,
    ) -> Result<Administrator>;

    /// Delete an administrator
    async fn delete_administrator(&self, id: &str) -> Result<()>;
}
