use std::collections::HashMap;

use cmod_core::Variant;

/// Content-addressed pool assigning stable 1-based indices.
///
/// Values are kept in first-seen order; interning an already-present value
/// returns the index it was first given. OBJ indices are 1-based, so the
/// pool is too.
#[derive(Debug, Default)]
pub struct Pool {
    values: Vec<Variant>,
    lookup: HashMap<Variant, i32>,
}

impl Pool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
        }
    }

    /// Looks up `value`, inserting it at the next index if absent.
    pub fn intern(&mut self, value: Variant) -> i32 {
        if let Some(&index) = self.lookup.get(&value) {
            return index;
        }
        let index = self.values.len() as i32 + 1;
        self.values.push(value);
        self.lookup.insert(value, index);
        index
    }

    pub fn values(&self) -> &[Variant] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Variant> {
        self.values
    }
}
