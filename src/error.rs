//! Error kinds reported by the table and its builder.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Insert under `DuplicatePolicy::Reject` found an equal key.
    #[error("an equal key is already present in the table")]
    DuplicateKey,
    /// Checked read of a key that is not present.
    #[error("key not found in the table")]
    KeyNotFound,
    /// The table's own bookkeeping is broken. Never returned as a value;
    /// raised through [`invariant_violation`] instead.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),
    /// A required argument was missing or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Abort the current operation on a broken internal invariant.
#[cold]
#[inline(never)]
pub(crate) fn invariant_violation(what: &'static str) -> ! {
    panic!("{}", TableError::InvariantViolation(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            TableError::InvalidArgument("hasher").to_string(),
            "invalid argument: hasher"
        );
        assert_eq!(
            TableError::InvariantViolation("probe exhausted").to_string(),
            "internal invariant violated: probe exhausted"
        );
    }

    #[test]
    #[should_panic(expected = "internal invariant violated: broken")]
    fn invariant_violation_panics_with_message() {
        invariant_violation("broken");
    }
}
