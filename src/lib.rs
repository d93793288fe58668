//! In-memory contact book with duplicate detection, grouping and sorting.
//!
//! # Examples
//!
//! ```
//! use contactbook::{
//!     contact::{Contact, ContactPatch},
//!     core::store::{ContactStore, StoreError},
//! };
//!
//! let mut store = ContactStore::new();
//! store.add(Contact::new("Ann", "Lee", "Austin", "TX", 73301)).expect("add");
//! store.add(Contact::new("Bo", "Kim", "Austin", "TX", 73301)).expect("add");
//!
//! assert_eq!(store.count(), 2);
//! assert_eq!(store.count_by_state().get("TX"), Some(&2));
//!
//! let dupe = store.add(Contact::new("Ann", "Lee", "Reno", "NV", 89501));
//! assert!(matches!(dupe, Err(StoreError::DuplicateContact(_))));
//!
//! let patch = ContactPatch {
//!     city: Some("Dallas".to_string()),
//!     ..ContactPatch::default()
//! };
//! store.update("Ann", "Lee", patch).expect("update");
//! assert_eq!(store.find_by_name("Ann", "Lee").map(|c| c.city.as_str()), Some("Dallas"));
//!
//! store.undo().expect("undo");
//! assert_eq!(store.find_by_name("Ann", "Lee").map(|c| c.city.as_str()), Some("Austin"));
//! ```
//!
//! Loose input is checked at the boundary:
//! ```
//! use contactbook::core::store::{ContactStore, StoreError};
//! use serde_json::json;
//!
//! let mut store = ContactStore::new();
//! let err = store.add_value(json!({ "firstName": "Ann" })).unwrap_err();
//! assert!(matches!(err, StoreError::InvalidType(_)));
//! ```
#![deny(missing_docs)]

/// Dictionary-order string comparison.
pub mod collate;
/// Contact records and patches.
pub mod contact;
/// Core in-memory store and grouping helpers.
pub mod core;
/// Tracing subscriber bootstrap.
pub mod logging;
/// Reversible mutation model.
pub mod op;
/// Shared primitive types and the contact field set.
pub mod types;
