use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    collate::DictionaryOrder,
    contact::{Contact, ContactPatch},
    core::indices::Grouped,
    op::Op,
    types::ContactKey,
};

/// Failures raised by [`ContactStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Input does not have the shape of a contact (or of a patch).
    #[error("value has the wrong shape: {0}")]
    InvalidType(String),
    /// Another contact already holds this name.
    #[error("contact with name {0} already exists")]
    DuplicateContact(ContactKey),
    /// No contact holds this name.
    #[error("contact {0} not found")]
    NotFound(ContactKey),
    /// Undo journal is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// Redo journal is empty.
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Tunables for a [`ContactStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of undoable mutations kept; `0` disables the journal.
    pub undo_depth: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { undo_depth: 256 }
    }
}

/// Serializable copy of the store contents in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreSnapshotV1 {
    /// Contacts in current order.
    pub contacts: Vec<Contact>,
}

/// Ordered, in-memory contact collection keyed by `(first_name, last_name)`.
#[derive(Debug, Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    undo: VecDeque<Op>,
    redo: Vec<Op>,
    config: StoreConfig,
}

impl ContactStore {
    /// Empty store with [`StoreConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store with explicit tunables.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Rebuilds a store from a snapshot, rejecting duplicate names.
    pub fn from_snapshot(snapshot: StoreSnapshotV1, config: StoreConfig) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(snapshot.contacts.len());
        for contact in &snapshot.contacts {
            let key = contact.key();
            if !seen.insert(key.clone()) {
                warn!(first_name = %key.first_name, last_name = %key.last_name, "duplicate contact in snapshot");
                return Err(StoreError::DuplicateContact(key));
            }
        }

        debug!(count = snapshot.contacts.len(), "store restored from snapshot");
        Ok(Self {
            contacts: snapshot.contacts,
            config,
            ..Self::default()
        })
    }

    /// Copies the current contents out in sequence order.
    pub fn export_snapshot(&self) -> StoreSnapshotV1 {
        StoreSnapshotV1 {
            contacts: self.contacts.clone(),
        }
    }

    /// Active tunables.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Appends `contact` unless its name is already taken.
    pub fn add(&mut self, contact: Contact) -> Result<(), StoreError> {
        let duplicates = self
            .contacts
            .iter()
            .filter(|c| c.is_named(&contact.first_name, &contact.last_name))
            .count();
        if duplicates > 0 {
            warn!(
                first_name = %contact.first_name,
                last_name = %contact.last_name,
                "rejected duplicate contact"
            );
            return Err(StoreError::DuplicateContact(contact.key()));
        }

        let index = self.contacts.len();
        debug!(first_name = %contact.first_name, last_name = %contact.last_name, index, "contact added");
        let inverse = self.apply_insert(contact, index)?;
        self.record(inverse);
        Ok(())
    }

    /// Validates a loosely typed value as a contact, then [`add`](Self::add)s it.
    pub fn add_value(&mut self, value: Value) -> Result<(), StoreError> {
        let contact = Contact::from_value(value)
            .inspect_err(|e| warn!(error = %e, "rejected contact value"))?;
        self.add(contact)
    }

    /// First contact named `first_name last_name`, if any.
    pub fn find_by_name(&self, first_name: &str, last_name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.is_named(first_name, last_name))
    }

    /// Overwrites every field set in `patch` and returns the updated contact.
    ///
    /// Renaming onto a name held by another contact is rejected with
    /// [`StoreError::DuplicateContact`] and leaves the store untouched.
    pub fn update(
        &mut self,
        first_name: &str,
        last_name: &str,
        patch: ContactPatch,
    ) -> Result<&Contact, StoreError> {
        let fields = patch.fields();
        let (index, inverse) = self
            .apply_patch(first_name, last_name, patch)
            .inspect_err(|e| warn!(first_name, last_name, error = %e, "update rejected"))?;
        self.record(inverse);
        debug!(first_name, last_name, ?fields, "contact updated");
        Ok(&self.contacts[index])
    }

    /// Like [`update`](Self::update) with a loose patch object; unknown keys are ignored.
    pub fn update_value(
        &mut self,
        first_name: &str,
        last_name: &str,
        patch: Value,
    ) -> Result<&Contact, StoreError> {
        let patch = ContactPatch::from_value(patch)?;
        self.update(first_name, last_name, patch)
    }

    /// Removes and returns the named contact; the rest keep their order.
    pub fn remove(&mut self, first_name: &str, last_name: &str) -> Result<Contact, StoreError> {
        let (removed, inverse) = self
            .apply_remove(first_name, last_name)
            .inspect_err(|e| warn!(first_name, last_name, error = %e, "remove rejected"))?;
        self.record(inverse);
        debug!(first_name, last_name, "contact removed");
        Ok(removed)
    }

    /// Number of contacts held.
    pub fn count(&self) -> usize {
        self.contacts.len()
    }

    /// Contacts whose city equals `city`, in sequence order.
    pub fn filter_by_city(&self, city: &str) -> Vec<&Contact> {
        self.filter_by(city, |c| c.city.as_str())
    }

    /// Contacts whose state equals `state`, in sequence order.
    pub fn filter_by_state(&self, state: &str) -> Vec<&Contact> {
        self.filter_by(state, |c| c.state.as_str())
    }

    /// Contacts grouped by city, cities in first-seen order.
    pub fn group_by_city(&self) -> Grouped<Vec<&Contact>> {
        self.group_by(|c| c.city.as_str())
    }

    /// Contacts grouped by state, states in first-seen order.
    pub fn group_by_state(&self) -> Grouped<Vec<&Contact>> {
        self.group_by(|c| c.state.as_str())
    }

    /// Occurrences of each city.
    pub fn count_by_city(&self) -> Grouped<usize> {
        self.count_by(|c| c.city.as_str())
    }

    /// Occurrences of each state.
    pub fn count_by_state(&self) -> Grouped<usize> {
        self.count_by(|c| c.state.as_str())
    }

    /// Reorders in place by `"first last"`, case-insensitive dictionary order.
    pub fn sort_by_name(&mut self) -> &[Contact] {
        let mut order = DictionaryOrder::new();
        self.contacts
            .sort_by(|a, b| order.compare_ignore_case(&a.full_name(), &b.full_name()));
        debug!(by = "name", "contacts sorted");
        &self.contacts
    }

    /// Reorders in place by city, dictionary order.
    pub fn sort_by_city(&mut self) -> &[Contact] {
        let mut order = DictionaryOrder::new();
        self.contacts.sort_by(|a, b| order.compare(&a.city, &b.city));
        debug!(by = "city", "contacts sorted");
        &self.contacts
    }

    /// Reorders in place by state, dictionary order.
    pub fn sort_by_state(&mut self) -> &[Contact] {
        let mut order = DictionaryOrder::new();
        self.contacts.sort_by(|a, b| order.compare(&a.state, &b.state));
        debug!(by = "state", "contacts sorted");
        &self.contacts
    }

    /// Reorders in place by ascending zip.
    pub fn sort_by_zip(&mut self) -> &[Contact] {
        self.contacts.sort_by_key(|c| c.zip);
        debug!(by = "zip", "contacts sorted");
        &self.contacts
    }

    /// Every contact in current order.
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Reverts the most recent journaled mutation.
    pub fn undo(&mut self) -> Result<(), StoreError> {
        let op = self.undo.pop_back().ok_or(StoreError::NothingToUndo)?;
        debug!(op = op.kind(), "undo");
        let inverse = self.apply_op(op)?;
        self.redo.push(inverse);
        Ok(())
    }

    /// Re-applies the most recently undone mutation.
    pub fn redo(&mut self) -> Result<(), StoreError> {
        let op = self.redo.pop().ok_or(StoreError::NothingToRedo)?;
        debug!(op = op.kind(), "redo");
        let inverse = self.apply_op(op)?;
        self.push_undo(inverse);
        Ok(())
    }

    /// Number of undoable mutations.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable mutations.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    fn record(&mut self, inverse: Op) {
        self.redo.clear();
        self.push_undo(inverse);
    }

    fn push_undo(&mut self, inverse: Op) {
        if self.config.undo_depth == 0 {
            return;
        }
        self.undo.push_back(inverse);
        while self.undo.len() > self.config.undo_depth {
            self.undo.pop_front();
        }
    }

    fn apply_op(&mut self, op: Op) -> Result<Op, StoreError> {
        match op {
            Op::Insert { contact, index } => self.apply_insert(contact, index),
            Op::Remove { key } => self
                .apply_remove(&key.first_name, &key.last_name)
                .map(|(_, inverse)| inverse),
            Op::Patch { key, patch, .. } => self
                .apply_patch(&key.first_name, &key.last_name, patch)
                .map(|(_, inverse)| inverse),
        }
    }

    fn apply_insert(&mut self, contact: Contact, index: usize) -> Result<Op, StoreError> {
        if self.position(&contact.first_name, &contact.last_name).is_some() {
            return Err(StoreError::DuplicateContact(contact.key()));
        }

        let key = contact.key();
        let index = index.min(self.contacts.len());
        self.contacts.insert(index, contact);
        Ok(Op::Remove { key })
    }

    fn apply_remove(&mut self, first_name: &str, last_name: &str) -> Result<(Contact, Op), StoreError> {
        let index = self
            .position(first_name, last_name)
            .ok_or_else(|| StoreError::NotFound(ContactKey::new(first_name, last_name)))?;
        let contact = self.contacts.remove(index);
        let inverse = Op::Insert {
            contact: contact.clone(),
            index,
        };
        Ok((contact, inverse))
    }

    fn apply_patch(
        &mut self,
        first_name: &str,
        last_name: &str,
        patch: ContactPatch,
    ) -> Result<(usize, Op), StoreError> {
        let index = self
            .position(first_name, last_name)
            .ok_or_else(|| StoreError::NotFound(ContactKey::new(first_name, last_name)))?;

        let new_key = patch.key_after(&self.contacts[index]);
        if !new_key.matches(first_name, last_name)
            && self.position(&new_key.first_name, &new_key.last_name).is_some()
        {
            return Err(StoreError::DuplicateContact(new_key));
        }

        let rec = &mut self.contacts[index];
        let prev = patch.capture_inverse_for(rec);
        patch.apply_to(rec);

        let inverse = Op::Patch {
            key: new_key,
            patch: prev,
            prev: patch,
        };
        Ok((index, inverse))
    }

    fn position(&self, first_name: &str, last_name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.is_named(first_name, last_name))
    }

    fn filter_by<'a>(&'a self, value: &str, pick: impl Fn(&'a Contact) -> &'a str) -> Vec<&'a Contact> {
        self.contacts.iter().filter(|&c| pick(c) == value).collect()
    }

    fn group_by<'a>(&'a self, pick: impl Fn(&'a Contact) -> &'a str) -> Grouped<Vec<&'a Contact>> {
        let mut groups = Grouped::new();
        for contact in &self.contacts {
            groups.get_or_insert_with(pick(contact), Vec::new).push(contact);
        }
        groups
    }

    fn count_by<'a>(&'a self, pick: impl Fn(&'a Contact) -> &'a str) -> Grouped<usize> {
        let mut counts = Grouped::new();
        for contact in &self.contacts {
            *counts.get_or_insert_with(pick(contact), || 0) += 1;
        }
        counts
    }
}
