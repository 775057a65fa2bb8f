//! Merge policy for editor-owned document fields.
//!
//! A subset of product-document fields is managed exclusively by editors
//! inside the content studio. On the update path the sync must copy the
//! existing values of those fields over whatever the transform computed,
//! so an automated sync can never clobber editorial work.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::types::Document;

/// The set of field names preserved verbatim from an existing document.
///
/// Passed into the update transform as an explicit value (not a hidden
/// constant) so deployments can extend it without recompiling the policy
/// into every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedFields {
    names: BTreeSet<String>,
}

impl Default for ProtectedFields {
    /// The five editor-owned product fields: `type`, `collection`,
    /// `categories`, `thumbnail` and `images`.
    fn default() -> Self {
        Self::new(["type", "collection", "categories", "thumbnail", "images"])
    }
}

impl ProtectedFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Copies every protected field that `existing` defines into `set`,
    /// overwriting the transform's value for it.
    ///
    /// "Defines" means the key is present — an explicit `null` counts and
    /// is preserved as `null`. Fields the existing document never had are
    /// left alone: if the outgoing patch does not mention them either,
    /// they stay unset; the sync never invents a value for them.
    pub fn apply(&self, existing: &Document, set: &mut Map<String, Value>) {
        for name in &self.names {
            if let Some(value) = existing.field(name) {
                set.insert(name.clone(), value.clone());
            }
        }
    }
}
