//! Mutation operation model used by the undo/redo journal.

use crate::{
    contact::{Contact, ContactPatch},
    types::ContactKey,
};

/// A reversible store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Insert a contact at a position in the sequence.
    Insert {
        /// Inserted record.
        contact: Contact,
        /// Target position, clamped to the sequence length when applied.
        index: usize,
    },
    /// Remove the contact holding `key`.
    Remove {
        /// Identity of the contact to remove.
        key: ContactKey,
    },
    /// Patch a contact, including precomputed inverse patch.
    Patch {
        /// Identity of the contact before the patch is applied.
        key: ContactKey,
        /// Forward patch.
        patch: ContactPatch,
        /// Inverse patch that restores prior state.
        prev: ContactPatch,
    },
}

impl Op {
    /// Short label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Insert { .. } => "insert",
            Op::Remove { .. } => "remove",
            Op::Patch { .. } => "patch",
        }
    }
}
