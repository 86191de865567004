//! TableBuilder: assembles a table from separately supplied capabilities.
//!
//! Every capability is required. `build` reports the first missing one as
//! `TableError::InvalidArgument` naming it, so a half-configured builder
//! fails at the call that would have used it.

use crate::error::TableError;
use crate::open_table::{OpenAddressingTable, DEFAULT_CAPACITY};

#[derive(Clone, Debug)]
pub struct TableBuilder<H, KE, VE> {
    capacity: usize,
    hasher: Option<H>,
    key_eq: Option<KE>,
    value_eq: Option<VE>,
}

impl<H, KE, VE> Default for TableBuilder<H, KE, VE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, KE, VE> TableBuilder<H, KE, VE> {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hasher: None,
            key_eq: None,
            value_eq: None,
        }
    }

    /// Initial slot count. Must be non-zero.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn hasher(mut self, hasher: H) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn key_eq(mut self, key_eq: KE) -> Self {
        self.key_eq = Some(key_eq);
        self
    }

    pub fn value_eq(mut self, value_eq: VE) -> Self {
        self.value_eq = Some(value_eq);
        self
    }

    pub fn build<K, V>(self) -> Result<OpenAddressingTable<K, V, H, KE, VE>, TableError> {
        let hasher = self.hasher.ok_or(TableError::InvalidArgument("hasher"))?;
        let key_eq = self.key_eq.ok_or(TableError::InvalidArgument("key_eq"))?;
        let value_eq = self
            .value_eq
            .ok_or(TableError::InvalidArgument("value_eq"))?;
        OpenAddressingTable::with_capacity(self.capacity, hasher, key_eq, value_eq)
    }
}
