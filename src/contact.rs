//! Contact record, sparse patch type and the loose-value boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    core::store::StoreError,
    types::{ContactField, ContactKey, Zip},
};

/// A single address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// First name; half of the identity key.
    pub first_name: String,
    /// Last name; half of the identity key.
    pub last_name: String,
    /// City name.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip: Zip,
}

impl Contact {
    /// Builds a contact from borrowed parts.
    pub fn new(first_name: &str, last_name: &str, city: &str, state: &str, zip: Zip) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip,
        }
    }

    /// Parses a loosely typed value into a contact.
    ///
    /// The value must be an object carrying every [`ContactField`] with the
    /// right JSON type; extra keys are ignored. Anything else is
    /// [`StoreError::InvalidType`].
    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        if !value.is_object() {
            return Err(StoreError::InvalidType(format!(
                "expected a contact object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| StoreError::InvalidType(e.to_string()))
    }

    /// Owned identity key.
    pub fn key(&self) -> ContactKey {
        ContactKey::new(&self.first_name, &self.last_name)
    }

    /// True when this contact is `first_name last_name`.
    pub fn is_named(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    /// `"first last"`, the string used for name ordering.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Sparse patch where each `Some` field overwrites the contact value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    /// Optional replacement for first name.
    pub first_name: Option<String>,
    /// Optional replacement for last name.
    pub last_name: Option<String>,
    /// Optional replacement for city.
    pub city: Option<String>,
    /// Optional replacement for state.
    pub state: Option<String>,
    /// Optional replacement for zip.
    pub zip: Option<Zip>,
}

impl ContactPatch {
    /// Parses a loose object into a patch.
    ///
    /// Keys outside the contact field set are dropped, so a loose patch can
    /// never grow the schema. A known key holding the wrong JSON type is
    /// [`StoreError::InvalidType`]; `null` leaves the field untouched.
    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        let Value::Object(map) = value else {
            return Err(StoreError::InvalidType(format!(
                "expected a patch object, got {}",
                json_kind(&value)
            )));
        };
        let known = map
            .into_iter()
            .filter(|(k, _)| ContactField::from_name(k).is_some())
            .collect::<serde_json::Map<_, _>>();
        serde_json::from_value(Value::Object(known))
            .map_err(|e| StoreError::InvalidType(e.to_string()))
    }

    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Fields this patch would write.
    pub fn fields(&self) -> Vec<ContactField> {
        let set = [
            self.first_name.is_some(),
            self.last_name.is_some(),
            self.city.is_some(),
            self.state.is_some(),
            self.zip.is_some(),
        ];
        ContactField::ALL
            .into_iter()
            .zip(set)
            .filter_map(|(field, present)| present.then_some(field))
            .collect()
    }

    /// Identity key `rec` would carry after this patch.
    pub fn key_after(&self, rec: &Contact) -> ContactKey {
        ContactKey {
            first_name: self.first_name.clone().unwrap_or_else(|| rec.first_name.clone()),
            last_name: self.last_name.clone().unwrap_or_else(|| rec.last_name.clone()),
        }
    }

    /// Captures an inverse patch for all fields present in `self`.
    pub fn capture_inverse_for(&self, rec: &Contact) -> Self {
        Self {
            first_name: self.first_name.as_ref().map(|_| rec.first_name.clone()),
            last_name: self.last_name.as_ref().map(|_| rec.last_name.clone()),
            city: self.city.as_ref().map(|_| rec.city.clone()),
            state: self.state.as_ref().map(|_| rec.state.clone()),
            zip: self.zip.map(|_| rec.zip),
        }
    }

    /// Applies this patch in place to `rec`.
    pub fn apply_to(&self, rec: &mut Contact) {
        if let Some(v) = &self.first_name {
            rec.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            rec.last_name = v.clone();
        }
        if let Some(v) = &self.city {
            rec.city = v.clone();
        }
        if let Some(v) = &self.state {
            rec.state = v.clone();
        }
        if let Some(v) = self.zip {
            rec.zip = v;
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
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
    use serde_json::json;

    use super::*;

    fn ann() -> Contact {
        Contact::new("Ann", "Lee", "Austin", "TX", 73301)
    }

    #[test]
    fn from_value_accepts_complete_object() {
        let c = Contact::from_value(json!({
            "firstName": "Ann",
            "lastName": "Lee",
            "city": "Austin",
            "state": "TX",
            "zip": 73301,
            "nickname": "annie"
        }))
        .unwrap();
        assert_eq!(c, ann());
    }

    #[test]
    fn from_value_rejects_missing_and_mistyped_fields() {
        let missing = json!({ "firstName": "Ann", "lastName": "Lee", "city": "Austin", "state": "TX" });
        assert!(matches!(Contact::from_value(missing), Err(StoreError::InvalidType(_))));

        let string_zip = json!({
            "firstName": "Ann", "lastName": "Lee", "city": "Austin", "state": "TX", "zip": "73301"
        });
        assert!(matches!(Contact::from_value(string_zip), Err(StoreError::InvalidType(_))));

        let negative_zip = json!({
            "firstName": "Ann", "lastName": "Lee", "city": "Austin", "state": "TX", "zip": -1
        });
        assert!(matches!(Contact::from_value(negative_zip), Err(StoreError::InvalidType(_))));

        assert!(matches!(
            Contact::from_value(json!(["Ann", "Lee"])),
            Err(StoreError::InvalidType(msg)) if msg.contains("an array")
        ));
    }

    #[test]
    fn loose_patch_drops_unknown_keys() {
        let patch = ContactPatch::from_value(json!({ "city": "Dallas", "phone": "555" })).unwrap();
        assert_eq!(
            patch,
            ContactPatch {
                city: Some("Dallas".to_string()),
                ..ContactPatch::default()
            }
        );
        assert_eq!(patch.fields(), vec![ContactField::City]);
    }

    #[test]
    fn loose_patch_rejects_mistyped_known_key() {
        let err = ContactPatch::from_value(json!({ "zip": "abc" })).unwrap_err();
        assert!(matches!(err, StoreError::InvalidType(_)));
        assert!(ContactPatch::from_value(json!("city")).is_err());
    }

    #[test]
    fn inverse_patch_restores_record() {
        let mut rec = ann();
        let patch = ContactPatch {
            last_name: Some("Park".to_string()),
            zip: Some(75001),
            ..ContactPatch::default()
        };
        assert!(ContactPatch::default().is_empty());
        assert!(!patch.is_empty());

        let inverse = patch.capture_inverse_for(&rec);
        assert_eq!(patch.key_after(&rec), ContactKey::new("Ann", "Park"));

        patch.apply_to(&mut rec);
        assert_eq!(rec.last_name, "Park");
        assert_eq!(rec.city, "Austin");

        inverse.apply_to(&mut rec);
        assert_eq!(rec, ann());
    }
}
