//! Generic JSON → resource decoding driven by [`Schema`](crate::schema::Schema) declarations
//!
//! Decoding happens in two steps. [`decode_fields`] walks the schema for a
//! resource type and converts every present field according to its
//! [`FieldKind`], producing a [`DecodedFields`] bag. A typed resource then
//! moves its values out of the bag via [`Resource::from_fields`]. All field
//! conversion lives here; the typed structs contain no parsing logic.
//!
//! Decoding is all-or-nothing and pure. Reference fields (an
//! administrator's organization, an organization's delegatees) stay as
//! identifiers; resolving them is a separate API call made by the caller.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::trace;
use serde_json::{Map, Number, Value};

use crate::error::{DecodeError, Result};
use crate::models::AnyResource;
use crate::schema::{self, FieldKind, FieldSpec, ID_FIELD, ResourceType};
use crate::timestamp;

/// A converted field value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Identifier(String),
    Timestamp(DateTime<Utc>),
    String(String),
    Boolean(bool),
    Number(Number),
    Mapping(Map<String, Value>),
    IdentifierList(Vec<String>),
}

/// Fields decoded for one resource, keyed by wire name.
///
/// Only fields present in the payload are stored, so a
/// missing entry means "unset" rather than an empty default.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFields {
    resource: ResourceType,
    id: String,
    values: BTreeMap<&'static str, FieldValue>,
}

impl DecodedFields {
    pub fn resource_type(&self) -> ResourceType {
        self.resource
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of decoded fields, excluding the identifier.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, FieldBag) {
        (self.id, FieldBag(self.values))
    }
}

/// Owned field values handed to [`Resource::from_fields`].
///
/// Each `take_*` returns `None` when the field is unset or holds another kind.
#[derive(Debug, Default)]
pub struct FieldBag(BTreeMap<&'static str, FieldValue>);

impl FieldBag {
    /// True once every stored value has been taken.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn take_identifier(&mut self, name: &str) -> Option<String> {
        self.take_with(name, |value| match value {
            FieldValue::Identifier(v) => Ok(v),
            other => Err(other),
        })
    }

    pub fn take_timestamp(&mut self, name: &str) -> Option<DateTime<Utc>> {
        self.take_with(name, |value| match value {
            FieldValue::Timestamp(v) => Ok(v),
            other => Err(other),
        })
    }

    pub fn take_string(&mut self, name: &str) -> Option<String> {
        self.take_with(name, |value| match value {
            FieldValue::String(v) => Ok(v),
            other => Err(other),
        })
    }

    pub fn take_bool(&mut self, name: &str) -> Option<bool> {
        self.take_with(name, |value| match value {
            FieldValue::Boolean(v) => Ok(v),
            other => Err(other),
        })
    }

    pub fn take_mapping(&mut self, name: &str) -> Option<Map<String, Value>> {
        self.take_with(name, |value| match value {
            FieldValue::Mapping(v) => Ok(v),
            other => Err(other),
        })
    }

    pub fn take_identifier_list(&mut self, name: &str) -> Option<Vec<String>> {
        self.take_with(name, |value| match value {
            FieldValue::IdentifierList(v) => Ok(v),
            other => Err(other),
        })
    }

    /// Remove `name` if `pick` accepts its kind; a value of another kind
    /// stays in the bag so [`FieldBag::is_empty`] still reports it.
    fn take_with<T>(
        &mut self,
        name: &str,
        pick: impl FnOnce(FieldValue) -> std::result::Result<T, FieldValue>,
    ) -> Option<T> {
        let (key, value) = self.0.remove_entry(name)?;
        match pick(value) {
            Ok(v) => Some(v),
            Err(value) => {
                self.0.insert(key, value);
                None
            }
        }
    }
}

/// A typed resource built from schema-decoded fields.
pub trait Resource: Sized {
    const TYPE: ResourceType;

    /// Build the resource from its identifier and the remaining fields.
    fn from_fields(id: String, fields: FieldBag) -> Self;
}

/// Decode a payload into the typed resource `T`.
pub fn decode<T: Resource>(payload: &Value) -> std::result::Result<T, DecodeError> {
    let (id, bag) = decode_fields(T::TYPE, payload)?.into_parts();
    trace!("Decoded {} {}", T::TYPE, id);
    Ok(T::from_fields(id, bag))
}

/// Decode a JSON array of payloads. Fails on the first bad element.
pub fn decode_list<T: Resource>(payload: &Value) -> std::result::Result<Vec<T>, DecodeError> {
    let items = payload
        .as_array()
        .ok_or_else(|| DecodeError::malformed(T::TYPE.name(), "$", "expected a JSON array"))?;

    items.iter().map(decode::<T>).collect()
}

/// Parse UTF-8 JSON text and decode it into `T`.
pub fn decode_str<T: Resource>(text: &str) -> Result<T> {
    let payload: Value = serde_json::from_str(text)?;
    Ok(decode::<T>(&payload)?)
}

/// Decode a payload against a resource type chosen at runtime.
pub fn decode_as(
    resource: ResourceType,
    payload: &Value,
) -> std::result::Result<AnyResource, DecodeError> {
    Ok(match resource {
        ResourceType::Organization => AnyResource::Organization(decode(payload)?),
        ResourceType::Administrator => AnyResource::Administrator(decode(payload)?),
    })
}

/// Decode a payload against a resource type given by wire name.
pub fn decode_named(
    type_name: &str,
    payload: &Value,
) -> std::result::Result<AnyResource, DecodeError> {
    let schema = schema::lookup(type_name)?;
    decode_as(schema.resource, payload)
}

/// Convert every declared field present in `payload`.
///
/// Unknown keys are skipped. Only a missing key leaves a field unset; an
/// explicit `null` is a type mismatch like any other.
pub fn decode_fields(
    resource: ResourceType,
    payload: &Value,
) -> std::result::Result<DecodedFields, DecodeError> {
    let object = payload
        .as_object()
        .ok_or_else(|| DecodeError::malformed(resource.name(), "$", "expected a JSON object"))?;
    let schema = resource.schema();

    let mut id = None;
    let mut values = BTreeMap::new();

    for spec in schema.fields {
        let value = match object.get(spec.name) {
            None | Some(Value::Null) if spec.required => {
                return Err(DecodeError::malformed(
                    resource.name(),
                    spec.name,
                    "is required but missing",
                ));
            }
            None => continue,
            Some(value) => convert(resource, spec, value)?,
        };

        match value {
            FieldValue::Identifier(v) if spec.name == ID_FIELD => id = Some(v),
            value => {
                values.insert(spec.name, value);
            }
        }
    }

    for key in object.keys().filter(|k| !schema.recognizes(k)) {
        trace!("Ignoring unrecognized {} field `{}`", resource, key);
    }

    let id = id.ok_or_else(|| {
        DecodeError::malformed(resource.name(), ID_FIELD, "is required but missing")
    })?;

    Ok(DecodedFields {
        resource,
        id,
        values,
    })
}

/// Convert one present JSON value according to its declared kind.
pub fn convert(
    resource: ResourceType,
    spec: &FieldSpec,
    value: &Value,
) -> std::result::Result<FieldValue, DecodeError> {
    let mismatch = || {
        DecodeError::malformed(
            resource.name(),
            spec.name,
            format!("expected {}, got {}", spec.kind.expected(), json_type(value)),
        )
    };

    match (spec.kind, value) {
        (FieldKind::Identifier, Value::String(s)) => Ok(FieldValue::Identifier(s.clone())),
        (FieldKind::Timestamp, Value::Number(n)) => {
            timestamp::decode_number(n).map(FieldValue::Timestamp)
        }
        (FieldKind::String, Value::String(s)) => Ok(FieldValue::String(s.clone())),
        (FieldKind::Boolean, Value::Bool(b)) => Ok(FieldValue::Boolean(*b)),
        (FieldKind::Number, Value::Number(n)) => Ok(FieldValue::Number(n.clone())),
        (FieldKind::Mapping, Value::Object(map)) => Ok(FieldValue::Mapping(map.clone())),
        (FieldKind::Mapping, Value::Array(entries)) => fold_entries(entries)
            .map(FieldValue::Mapping)
            .ok_or_else(mismatch),
        (FieldKind::IdentifierList, Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    DecodeError::malformed(
                        resource.name(),
                        format!("{}[{}]", spec.name, i),
                        format!("expected an identifier string, got {}", json_type(item)),
                    )
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(FieldValue::IdentifierList),
        _ => Err(mismatch()),
    }
}

/// Fold a metadata entry list into a mapping.
///
/// Accepts `[]` and `[{"name": "...", "type": "...", "value": ...}, ...]`.
/// Entries without a string `name` make the whole list invalid.
fn fold_entries(entries: &[Value]) -> Option<Map<String, Value>> {
    let mut map = Map::new();
    for entry in entries {
        let entry = entry.as_object()?;
        let name = entry.get("name")?.as_str()?;
        let value = entry.get("value").cloned().unwrap_or(Value::Null);
        map.insert(name.to_string(), value);
    }
    Some(map)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(kind: FieldKind) -> FieldSpec {
        FieldSpec {
            name: "field",
            kind,
            required: false,
        }
    }

    fn convert_kind(kind: FieldKind, value: Value) -> std::result::Result<FieldValue, DecodeError> {
        convert(ResourceType::Organization, &spec(kind), &value)
    }

    #[test]
    fn test_convert_identifier() {
        assert_eq!(
            convert_kind(FieldKind::Identifier, json!("yAM*fDkztrT3gUcz9mNDgNOL")).unwrap(),
            FieldValue::Identifier("yAM*fDkztrT3gUcz9mNDgNOL".to_string())
        );
    }

    #[test]
    fn test_convert_identifier_rejects_number() {
        let err = convert_kind(FieldKind::Identifier, json!(42)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload { .. }));
    }

    #[test]
    fn test_convert_timestamp_truncates() {
        let value = convert_kind(FieldKind::Timestamp, json!(1455048510514_i64)).unwrap();
        match value {
            FieldValue::Timestamp(dt) => assert_eq!(dt.timestamp(), 1455048510),
            other => panic!("Expected timestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_timestamp_rejects_string() {
        let err = convert_kind(FieldKind::Timestamp, json!("1455048510514")).unwrap_err();
        match err {
            DecodeError::MalformedPayload { field, reason, .. } => {
                assert_eq!(field, "field");
                assert!(reason.contains("got a string"));
            }
            other => panic!("Expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_timestamp_negative_is_invalid_timestamp() {
        let err = convert_kind(FieldKind::Timestamp, json!(-1000)).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_convert_boolean() {
        assert_eq!(
            convert_kind(FieldKind::Boolean, json!(false)).unwrap(),
            FieldValue::Boolean(false)
        );
        assert!(convert_kind(FieldKind::Boolean, json!("false")).is_err());
    }

    #[test]
    fn test_convert_number_keeps_exact_value() {
        assert_eq!(
            convert_kind(FieldKind::Number, json!(12.5)).unwrap(),
            FieldValue::Number(Number::from_f64(12.5).unwrap())
        );
        assert!(convert_kind(FieldKind::Number, json!([1])).is_err());
    }

    #[test]
    fn test_convert_mapping_object() {
        let value = convert_kind(FieldKind::Mapping, json!({"shift": "night"})).unwrap();
        match value {
            FieldValue::Mapping(map) => assert_eq!(map["shift"], "night"),
            other => panic!("Expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_mapping_empty_array() {
        assert_eq!(
            convert_kind(FieldKind::Mapping, json!([])).unwrap(),
            FieldValue::Mapping(Map::new())
        );
    }

    #[test]
    fn test_convert_mapping_entry_list() {
        let value = convert_kind(
            FieldKind::Mapping,
            json!([
                {"name": "badge", "type": "number", "value": 1138},
                {"name": "notes", "type": "string"}
            ]),
        )
        .unwrap();
        match value {
            FieldValue::Mapping(map) => {
                assert_eq!(map["badge"], 1138);
                assert_eq!(map["notes"], Value::Null);
            }
            other => panic!("Expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_mapping_rejects_bare_list() {
        let err = convert_kind(FieldKind::Mapping, json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload { .. }));
    }

    #[test]
    fn test_convert_identifier_list_preserves_order() {
        assert_eq!(
            convert_kind(FieldKind::IdentifierList, json!(["b", "a", "c"])).unwrap(),
            FieldValue::IdentifierList(vec!["b".into(), "a".into(), "c".into()])
        );
    }

    #[test]
    fn test_convert_identifier_list_names_bad_element() {
        let err = convert_kind(FieldKind::IdentifierList, json!(["a", 7])).unwrap_err();
        match err {
            DecodeError::MalformedPayload { field, .. } => assert_eq!(field, "field[1]"),
            other => panic!("Expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_fields_leaves_absent_fields_unset() {
        let fields = decode_fields(
            ResourceType::Organization,
            &json!({"id": "org-1", "name": "Onfleet Engineering"}),
        )
        .unwrap();

        assert_eq!(fields.id(), "org-1");
        assert!(fields.is_set("name"));
        assert!(!fields.is_set("delegatees"));
        assert!(!fields.is_set("timeCreated"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_decode_fields_rejects_null_for_declared_field() {
        let err = decode_fields(
            ResourceType::Organization,
            &json!({"id": "org-1", "timeCreated": null}),
        )
        .unwrap_err();
        match err {
            DecodeError::MalformedPayload { field, reason, .. } => {
                assert_eq!(field, "timeCreated");
                assert!(reason.contains("got null"));
            }
            other => panic!("Expected MalformedPayload, got {other:?}"),
        }

        let err = decode_fields(
            ResourceType::Administrator,
            &json!({"id": "a-1", "isActive": null}),
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload { field, .. } if field == "isActive"));
    }

    #[test]
    fn test_decode_fields_ignores_unknown_keys() {
        let fields = decode_fields(
            ResourceType::Organization,
            &json!({"id": "org-1", "driverSupportEmail": "x@example.com", "nested": {"a": 1}}),
        )
        .unwrap();
        assert!(fields.get("driverSupportEmail").is_none());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_decode_fields_requires_id() {
        let err = decode_fields(ResourceType::Administrator, &json!({"name": "x"})).unwrap_err();
        match err {
            DecodeError::MalformedPayload {
                resource, field, ..
            } => {
                assert_eq!(resource, "administrator");
                assert_eq!(field, "id");
            }
            other => panic!("Expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_fields_null_id_is_missing() {
        let err = decode_fields(ResourceType::Organization, &json!({"id": null})).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload { .. }));
    }

    #[test]
    fn test_decode_fields_rejects_non_object() {
        let err = decode_fields(ResourceType::Organization, &json!([1, 2])).unwrap_err();
        match err {
            DecodeError::MalformedPayload { field, .. } => assert_eq!(field, "$"),
            other => panic!("Expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_named_unknown_type() {
        let err = decode_named("worker", &json!({"id": "w-1"})).unwrap_err();
        assert_eq!(err, DecodeError::UnknownResourceType("worker".to_string()));
    }

    #[test]
    fn test_decode_named_dispatches_by_type() {
        let resource = decode_named("administrator", &json!({"id": "a-1"})).unwrap();
        assert!(matches!(resource, AnyResource::Administrator(_)));
        assert_eq!(resource.id(), "a-1");
    }

    fn sample(kind: FieldKind) -> Value {
        match kind {
            FieldKind::Identifier => json!("ref-1"),
            FieldKind::Timestamp => json!(1454634415000_i64),
            FieldKind::String => json!("text"),
            FieldKind::Boolean => json!(true),
            FieldKind::Number => json!(3),
            FieldKind::Mapping => json!({"shift": "night"}),
            FieldKind::IdentifierList => json!(["ref-2", "ref-3"]),
        }
    }

    #[test]
    fn test_every_declared_field_reaches_the_resource() {
        for rt in ResourceType::ALL {
            let payload: Map<String, Value> = rt
                .schema()
                .fields
                .iter()
                .map(|f| (f.name.to_string(), sample(f.kind)))
                .collect();
            let payload = Value::Object(payload);

            let resource = decode_as(rt, &payload).unwrap();
            let wire = serde_json::to_value(&resource).unwrap();

            for field in rt.schema().fields {
                assert_eq!(wire.get(field.name), payload.get(field.name), "{rt}.{}", field.name);
            }
        }
    }

    #[test]
    fn test_field_bag_keeps_value_of_other_kind() {
        let fields = decode_fields(
            ResourceType::Organization,
            &json!({"id": "org-1", "name": "Onfleet"}),
        )
        .unwrap();
        let (_, mut bag) = fields.into_parts();

        assert_eq!(bag.take_bool("name"), None);
        assert!(!bag.is_empty());
        assert_eq!(bag.take_string("name"), Some("Onfleet".to_string()));
        assert!(bag.is_empty());
    }
}
