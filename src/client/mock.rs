//! Mock Onfleet API client for testing
//!
//! Provides an in-memory implementation of [`OnfleetApi`] for exercising
//! command handlers without making real API calls.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::OnfleetApi;
use crate::decode::decode;
use crate::error::{ApiError, Result};
use crate::models::{Administrator, AdministratorUpdate, NewAdministrator, Organization};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockOnfleetClient::new()
///     .with_my_organization(org)
///     .await;
///
/// let org = mock.get_my_organization().await?;
/// ```
#[derive(Default)]
pub struct MockOnfleetClient {
    /// Organization returned from get_my_organization
    my_org: Arc<Mutex<Option<Organization>>>,
    /// Organizations resolvable through get_organization
    orgs: Arc<Mutex<Vec<Organization>>>,
    /// Administrators backing the admin operations
    admins: Arc<Mutex<Vec<Administrator>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_my_organization: usize,
    pub get_organization: usize,
    pub list_administrators: usize,
    pub create_administrator: usize,
    pub update_administrator: usize,
    pub delete_administrator: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get_my_organization
            + self.get_organization
            + self.list_administrators
            + self.create_administrator
            + self.update_administrator
            + self.delete_administrator
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "get_organization")
    pub method: String,
    /// Resource id if the call targeted one
    pub id: Option<String>,
    /// Serialized request body, if any
    pub body: Option<Value>,
}

impl MockOnfleetClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the organization returned from get_my_organization.
    pub async fn with_my_organization(self, org: Organization) -> Self {
        *self.my_org.lock().await = Some(org);
        self
    }

    /// Configure organizations resolvable by id.
    pub async fn with_organizations(self, orgs: Vec<Organization>) -> Self {
        *self.orgs.lock().await = orgs;
        self
    }

    /// Configure the administrators list.
    pub async fn with_administrators(self, admins: Vec<Administrator>) -> Self {
        *self.admins.lock().await = admins;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    /// Record a captured request for test assertions.
    async fn capture_request(&self, method: &str, id: Option<&str>, body: Option<Value>) {
        let mut requests = self.captured_requests.lock().await;
        requests.push(CapturedRequest {
            method: method.to_string(),
            id: id.map(|s| s.to_string()),
            body,
        });
    }
}

#[async_trait]
impl OnfleetApi for MockOnfleetClient {
    async fn get_my_organization(&self) -> Result<Organization> {
        self.capture_request("get_my_organization", None, None).await;
        self.check_error().await?;

        self.call_count.lock().await.get_my_organization += 1;

        self.my_org
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::NotFound("organization".to_string()).into())
    }

    async fn get_organization(&self, id: &str) -> Result<Organization> {
        self.capture_request("get_organization", Some(id), None).await;
        self.check_error().await?;

        self.call_count.lock().await.get_organization += 1;

        let orgs = self.orgs.lock().await;
        orgs.iter()
            .find(|o| o.id() == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("organization {}", id)).into())
    }

    async fn list_administrators(&self) -> Result<Vec<Administrator>> {
        self.capture_request("list_administrators", None, None).await;
        self.check_error().await?;

        self.call_count.lock().await.list_administrators += 1;

        Ok(self.admins.lock().await.clone())
    }

    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<Administrator> {
        let body = serde_json::to_value(admin)?;
        self.capture_request("create_administrator", None, Some(body.clone()))
            .await;
        self.check_error().await?;

        self.call_count.lock().await.create_administrator += 1;

        let mut admins = self.admins.lock().await;
        let mut payload = json!({
            "id": format!("mock-admin-{}", admins.len() + 1),
            "type": "standard",
            "isActive": false,
        });
        if let Some(org) = self.my_org.lock().await.as_ref() {
            payload["organization"] = json!(org.id());
        }
        merge(&mut payload, body);

        let created: Administrator = decode(&payload)?;
        admins.push(created.clone());
        Ok(created)
    }

    async fn update_administrator(
        &self,
        id: &str,
        update: &AdministratorUpdate,
    ) -> Result<Administrator> {
        let body = serde_json::to_value(update)?;
        self.capture_request("update_administrator", Some(id), Some(body.clone()))
            .await;
        self.check_error().await?;

        self.call_count.lock().await.update_administrator += 1;

        let mut admins = self.admins.lock().await;
        let existing = admins
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("administrator {}", id)))?;

        let mut payload = serde_json::to_value(&*existing)?;
        merge(&mut payload, body);

        let updated: Administrator = decode(&payload)?;
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete_administrator(&self, id: &str) -> Result<()> {
        self.capture_request("delete_administrator", Some(id), None).await;
        self.check_error().await?;

        self.call_count.lock().await.delete_administrator += 1;

        let mut admins = self.admins.lock().await;
        let before = admins.len();
        admins.retain(|a| a.id() != id);
        if admins.len() == before {
            return Err(ApiError::NotFound(format!("administrator {}", id)).into());
        }
        Ok(())
    }
}

/// Shallow-merge the keys of `patch` into `target` (both JSON objects).
fn merge(target: &mut Value, patch: Value) {
    if let (Some(target), Value::Object(patch)) = (target.as_object_mut(), patch) {
        target.extend(patch);
    }
}
