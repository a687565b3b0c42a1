//! Atomic multi-document writes.
//!
//! A `WriteBatch` collects writes together with preconditions checked before
//! the writes and count invariants checked after them. `DocumentStore::commit`
//! runs the whole batch in a single immediate transaction: a failed
//! precondition or invariant rolls everything back.

use super::error::StoreError;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
}

/// Comparison on a top-level JSON field. A missing field compares as null.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Ne,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) enum Write {
    Set {
        collection: String,
        id: String,
        data: Value,
    },
    Update {
        collection: String,
        id: String,
        fields: Value,
    },
    ArrayUnion {
        collection: String,
        id: String,
        field: String,
        value: Value,
    },
    Delete {
        collection: String,
        id: String,
    },
}

#[derive(Debug, Clone)]
pub(super) enum Precondition {
    Exists {
        collection: String,
        id: String,
    },
    FieldEquals {
        collection: String,
        id: String,
        field: String,
        value: Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    AtLeast(u64),
    AtMost(u64),
}

impl Bound {
    pub fn holds(&self, count: u64) -> bool {
        match *self {
            Bound::AtLeast(n) => count >= n,
            Bound::AtMost(n) => count <= n,
        }
    }
}

/// Post-write count check over one collection.
#[derive(Debug, Clone)]
pub(super) struct Invariant {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub bound: Bound,
    pub message: String,
}

#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    pub(super) preconditions: Vec<Precondition>,
    pub(super) writes: Vec<Write>,
    pub(super) invariants: Vec<Invariant>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Creates or replaces a document. Replacing keeps the original create time.
    pub fn set<T: Serialize>(
        &mut self,
        collection: &str,
        id: &str,
        data: &T,
    ) -> Result<&mut Self, StoreError> {
        let data = serde_json::to_value(data)?;
        if !data.is_object() {
            return Err(StoreError::InvalidDocument(format!(
                "{collection}/{id} must be a JSON object"
            )));
        }
        self.writes.push(Write::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            data,
        });
        Ok(self)
    }

    /// Merges `fields` (a JSON object) into an existing document.
    pub fn update(&mut self, collection: &str, id: &str, fields: Value) -> &mut Self {
        self.writes.push(Write::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            fields,
        });
        self
    }

    /// Appends `value` to an array field unless it is already present.
    pub fn array_union(
        &mut self,
        collection: &str,
        id: &str,
        field: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.writes.push(Write::ArrayUnion {
            collection: collection.to_string(),
            id: id.to_string(),
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn delete(&mut self, collection: &str, id: &str) -> &mut Self {
        self.writes.push(Write::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self
    }

    pub fn require_exists(&mut self, collection: &str, id: &str) -> &mut Self {
        self.preconditions.push(Precondition::Exists {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self
    }

    /// Fails the batch unless the document's current `field` equals `value`
    /// (null matches a missing field).
    pub fn require_field_equals(
        &mut self,
        collection: &str,
        id: &str,
        field: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.preconditions.push(Precondition::FieldEquals {
            collection: collection.to_string(),
            id: id.to_string(),
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    /// After all writes, the number of documents in `collection` matching
    /// `filters` must satisfy `bound`, otherwise the batch fails with `message`.
    pub fn ensure_count(
        &mut self,
        collection: &str,
        filters: Vec<Filter>,
        bound: Bound,
        message: &str,
    ) -> &mut Self {
        self.invariants.push(Invariant {
            collection: collection.to_string(),
            filters,
            bound,
            message: message.to_string(),
        });
        self
    }
}
