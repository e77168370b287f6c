//! Display models for table output

use chrono::{DateTime, Utc};
use serde_json::Value;
use tabled::Tabled;

use onfleet::{Administrator, Organization};

const UNSET: &str = "-";

/// Field/value pairs describing one resource in full.
pub trait Record {
    fn record(&self) -> Vec<(&'static str, String)>;
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or(UNSET).to_string()
}

fn time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| UNSET.to_string())
}

fn flag(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => UNSET.to_string(),
    }
}

/// Organization row for list output
#[derive(Debug, Clone, Tabled)]
pub struct OrgRow {
    #[tabled(rename = "ORG ID")]
    pub id: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "EMAIL")]
    pub email: String,
    #[tabled(rename = "TIMEZONE")]
    pub timezone: String,
    #[tabled(rename = "COUNTRY")]
    pub country: String,
}

impl From<&Organization> for OrgRow {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id().to_string(),
            name: text(org.name()),
            email: text(org.email()),
            timezone: text(org.timezone()),
            country: text(org.country()),
        }
    }
}

impl Record for Organization {
    fn record(&self) -> Vec<(&'static str, String)> {
        let delegatees = match self.delegatees() {
            Some([]) => "(none)".to_string(),
            Some(ids) => ids.join(", "),
            None => UNSET.to_string(),
        };

        vec![
            ("ID", self.id().to_string()),
            ("NAME", text(self.name())),
            ("EMAIL", text(self.email())),
            ("TIMEZONE", text(self.timezone())),
            ("COUNTRY", text(self.country())),
            ("IMAGE", text(self.image())),
            ("DELEGATEES", delegatees),
            ("CREATED", time(self.time_created())),
            ("MODIFIED", time(self.time_last_modified())),
        ]
    }
}

/// Administrator row for list output
#[derive(Debug, Clone, Tabled)]
pub struct AdminRow {
    #[tabled(rename = "ADMIN ID")]
    pub id: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "EMAIL")]
    pub email: String,
    #[tabled(rename = "TYPE")]
    pub admin_type: String,
    #[tabled(rename = "ACTIVE")]
    pub active: String,
}

impl From<&Administrator> for AdminRow {
    fn from(admin: &Administrator) -> Self {
        Self {
            id: admin.id().to_string(),
            name: text(admin.name()),
            email: text(admin.email()),
            admin_type: text(admin.admin_type()),
            active: flag(admin.is_active()),
        }
    }
}

impl Record for Administrator {
    fn record(&self) -> Vec<(&'static str, String)> {
        let metadata = match self.metadata() {
            Some(map) if map.is_empty() => "(none)".to_string(),
            Some(map) => map
                .iter()
                .map(|(k, v)| match v {
                    Value::String(s) => format!("{}={}", k, s),
                    other => format!("{}={}", k, other),
                })
                .collect::<Vec<_>>()
                .join(", "),
            None => UNSET.to_string(),
        };

        vec![
            ("ID", self.id().to_string()),
            ("NAME", text(self.name())),
            ("EMAIL", text(self.email())),
            ("PHONE", text(self.phone())),
            ("TYPE", text(self.admin_type())),
            ("ORGANIZATION", text(self.organization())),
            ("ACTIVE", flag(self.is_active())),
            ("READ ONLY", flag(self.is_read_only())),
            ("METADATA", metadata),
            ("CREATED", time(self.time_created())),
            ("MODIFIED", time(self.time_last_modified())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onfleet::decode::decode;
    use serde_json::json;

    fn value_of<'a>(record: &'a [(&'static str, String)], field: &str) -> &'a str {
        record
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_org_row_marks_unset_fields() {
        let org: Organization = decode(&json!({"id": "org-1", "name": "Onfleet Engineering"})).unwrap();
        let row = OrgRow::from(&org);

        assert_eq!(row.id, "org-1");
        assert_eq!(row.name, "Onfleet Engineering");
        assert_eq!(row.email, "-");
    }

    #[test]
    fn test_org_record_formats_timestamps_and_delegatees() {
        let org: Organization = decode(&json!({
            "id": "org-1",
            "timeCreated": 1454634415000_i64,
            "delegatees": ["a", "b"]
        }))
        .unwrap();
        let record = org.record();

        assert_eq!(value_of(&record, "CREATED"), "2016-02-05 01:06:55 UTC");
        assert_eq!(value_of(&record, "MODIFIED"), "-");
        assert_eq!(value_of(&record, "DELEGATEES"), "a, b");
    }

    #[test]
    fn test_org_record_empty_delegatees() {
        let org: Organization = decode(&json!({"id": "org-1", "delegatees": []})).unwrap();
        assert_eq!(value_of(&org.record(), "DELEGATEES"), "(none)");
    }

    #[test]
    fn test_admin_row_active_flag() {
        let admin: Administrator = decode(&json!({"id": "a-1", "isActive": false})).unwrap();
        let row = AdminRow::from(&admin);

        assert_eq!(row.active, "no");
        assert_eq!(row.admin_type, "-");
    }

    #[test]
    fn test_admin_record_metadata() {
        let admin: Administrator = decode(&json!({
            "id": "a-1",
            "metadata": [{"name": "shift", "type": "string", "value": "night"}]
        }))
        .unwrap();

        assert_eq!(value_of(&admin.record(), "METADATA"), "shift=night");
    }
}
