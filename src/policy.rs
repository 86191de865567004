//! What insert does when the key is already present.

use crate::error::TableError;
use core::str::FromStr;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum DuplicatePolicy {
    /// Fail with `TableError::DuplicateKey`; the table is unchanged.
    #[default]
    Reject,
    /// Keep the stored entry and hand the new pair back.
    Ignore,
    /// Overwrite the stored value, keep the stored key.
    ReplaceValue,
    /// Overwrite both. Useful when equal keys carry differing metadata.
    ReplaceKeyAndValue,
}

impl FromStr for DuplicatePolicy {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" | "throw" => Ok(DuplicatePolicy::Reject),
            "ignore" => Ok(DuplicatePolicy::Ignore),
            "replace-value" => Ok(DuplicatePolicy::ReplaceValue),
            "replace-key-and-value" => Ok(DuplicatePolicy::ReplaceKeyAndValue),
            _ => Err(TableError::InvalidArgument("duplicate policy")),
        }
    }
}

/// Result of a successful insert.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome<K, V> {
    /// The key was absent and now occupies a slot.
    Inserted,
    /// The key was present under `Ignore`; the rejected pair is returned.
    Ignored { key: K, value: V },
    /// The key was present under `ReplaceValue`; the old value is returned.
    ValueReplaced(V),
    /// The key was present under `ReplaceKeyAndValue`; the old pair is returned.
    EntryReplaced { key: K, value: V },
}

impl<K, V> InsertOutcome<K, V> {
    /// True when the insert added a new entry.
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}
