//! Shared primitive types: zip codes, identity keys and the contact field set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Postal code stored as a plain number.
pub type Zip = u32;

/// Identity of a contact: the case-sensitive `(first_name, last_name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactKey {
    /// First name component.
    pub first_name: String,
    /// Last name component.
    pub last_name: String,
}

impl ContactKey {
    /// Builds a key from borrowed name parts.
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    /// True when this key names `first_name last_name`.
    pub fn matches(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

impl fmt::Display for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Closed set of fields a contact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
    /// `city`
    City,
    /// `state`
    State,
    /// `zip`
    Zip,
}

impl ContactField {
    /// Every field, in declaration order.
    pub const ALL: [ContactField; 5] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::City,
        ContactField::State,
        ContactField::Zip,
    ];

    /// External (camelCase) name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::City => "city",
            ContactField::State => "state",
            ContactField::Zip => "zip",
        }
    }

    /// Resolves an external field name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_resolve_both_ways() {
        for field in ContactField::ALL {
            assert_eq!(ContactField::from_name(field.as_str()), Some(field));
        }
        assert_eq!(ContactField::from_name("phone"), None);
        assert_eq!(ContactField::from_name("FirstName"), None);
    }

    #[test]
    fn key_display_joins_names() {
        assert_eq!(ContactKey::new("Ann", "Lee").to_string(), "Ann Lee");
    }
}
