use std::collections::HashMap;

use crate::resource::{EntityId, Resource};

/// Read-only id → record index over one loaded collection.
///
/// Built once per data load. Iteration keeps the backend's row order; when
/// the backend returns the same id twice, lookups resolve to the first row.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityIndex<T> {
    rows: Vec<T>,
    positions: HashMap<EntityId, usize>,
}

impl<T: Resource> EntityIndex<T> {
    pub fn build(rows: Vec<T>) -> Self {
        let mut positions = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            positions.entry(row.id()).or_insert(position);
        }
        Self { rows, positions }
    }
}

impl<T> EntityIndex<T> {
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.positions.get(&id).map(|&position| &self.rows[position])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Default for EntityIndex<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Resource> FromIterator<T> for EntityIndex<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build(iter.into_iter().collect())
    }
}
