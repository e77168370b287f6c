//! Organization command implementations

use log::debug;

use crate::cli::OutputFormat;
use crate::output::display::OrgRow;
use crate::output::{render_list, render_record};
use onfleet::{OnfleetApi, Organization, Result};

/// Run the org get command
pub async fn get(client: &dyn OnfleetApi, id: Option<&str>, format: OutputFormat) -> Result<String> {
    let org = match id {
        Some(id) => client.get_organization(id).await?,
        None => client.get_my_organization().await?,
    };

    render_record(&org, format)
}

/// Run the org delegatees command
///
/// Delegatees arrive as bare ids on the caller's organization; each one is
/// resolved with its own request, in the order the API listed them.
pub async fn delegatees(client: &dyn OnfleetApi, format: OutputFormat) -> Result<String> {
    let org = client.get_my_organization().await?;
    let ids = org.delegatees().unwrap_or_default();
    debug!("Resolving {} delegatee(s) of {}", ids.len(), org.id());

    let mut resolved: Vec<Organization> = Vec::with_capacity(ids.len());
    for id in ids {
        resolved.push(client.get_organization(id).await?);
    }

    render_list::<Organization, OrgRow>(&resolved, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onfleet::decode::decode;
    use onfleet::{ApiError, Error, MockOnfleetClient};
    use serde_json::{Value, json};

    fn org(value: Value) -> Organization {
        decode(&value).unwrap()
    }

    fn my_org() -> Organization {
        org(json!({
            "id": "yAM*fDkztrT3gUcz9mNDgNOL",
            "timeCreated": 1454634415000_i64,
            "timeLastModified": 1455048510514_i64,
            "name": "Onfleet Fine Eateries",
            "email": "fe@onfleet.com",
            "delegatees": ["cBrUjKvQQgdRp~s1qvQNLpK*"]
        }))
    }

    fn delegatee() -> Organization {
        org(json!({
            "id": "cBrUjKvQQgdRp~s1qvQNLpK*",
            "name": "Onfleet Engineering",
            "email": "dev@onfleet.com",
            "timezone": "America/Los_Angeles",
            "country": "US"
        }))
    }

    #[tokio::test]
    async fn test_get_own_organization_table() {
        let mock = MockOnfleetClient::new().with_my_organization(my_org()).await;

        let output = get(&mock, None, OutputFormat::Table).await.unwrap();

        assert!(output.contains("Onfleet Fine Eateries"));
        assert!(output.contains("cBrUjKvQQgdRp~s1qvQNLpK*"));
        assert_eq!(mock.call_counts().await.get_my_organization, 1);
    }

    #[tokio::test]
    async fn test_get_organization_by_id_json() {
        let mock = MockOnfleetClient::new()
            .with_organizations(vec![delegatee()])
            .await;

        let output = get(&mock, Some("cBrUjKvQQgdRp~s1qvQNLpK*"), OutputFormat::Json)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["data"]["email"], "dev@onfleet.com");
        assert_eq!(parsed["data"]["country"], "US");
        assert!(parsed["data"].get("timeCreated").is_none());
    }

    #[tokio::test]
    async fn test_delegatees_resolves_each_id() {
        let mock = MockOnfleetClient::new()
            .with_my_organization(my_org())
            .await
            .with_organizations(vec![delegatee()])
            .await;

        let output = delegatees(&mock, OutputFormat::Json).await.unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["meta"]["count"], 1);
        assert_eq!(parsed["data"][0]["name"], "Onfleet Engineering");

        let captured = mock.captured_requests().await;
        assert_eq!(captured[1].method, "get_organization");
        assert_eq!(captured[1].id.as_deref(), Some("cBrUjKvQQgdRp~s1qvQNLpK*"));
    }

    #[tokio::test]
    async fn test_delegatees_without_field_makes_no_lookups() {
        let mock = MockOnfleetClient::new()
            .with_my_organization(org(json!({"id": "solo"})))
            .await;

        let output = delegatees(&mock, OutputFormat::Table).await.unwrap();

        assert_eq!(output, "No results found.");
        assert_eq!(mock.call_counts().await.get_organization, 0);
    }

    #[tokio::test]
    async fn test_get_propagates_api_error() {
        let mock = MockOnfleetClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let err = get(&mock, None, OutputFormat::Table).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
    }
}
