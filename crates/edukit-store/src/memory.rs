//! In-memory repository

use crate::error::StoreError;
use crate::repository::{Entity, Repository};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

struct Slot<T> {
    seq: u64,
    item: T,
}

struct Inner<T: Entity> {
    items: HashMap<T::Id, Slot<T>>,
    next_seq: u64,
}

/// `HashMap` behind one mutex; last write wins
pub struct InMemoryRepository<T: Entity> {
    inner: Mutex<Inner<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Number of stored entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Check if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(item: &T) -> Result<T::Id, StoreError> {
        item.id().ok_or(StoreError::MissingId { kind: T::KIND })
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> std::fmt::Debug for InMemoryRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("kind", &T::KIND)
            .field("len", &self.len())
            .finish()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn insert(&self, item: T) -> Result<T, StoreError> {
        let id = Self::key(&item)?;
        let mut inner = self.inner.lock();
        if inner.items.contains_key(&id) {
            return Err(StoreError::Duplicate {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.items.insert(id, Slot { seq, item: item.clone() });
        tracing::debug!("Inserted {} {}", T::KIND, id);
        Ok(item)
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.inner.lock().items.get(id).map(|s| s.item.clone()))
    }

    async fn update(&self, item: T) -> Result<T, StoreError> {
        let id = Self::key(&item)?;
        let mut inner = self.inner.lock();
        let slot = inner.items.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })?;
        slot.item = item.clone();
        tracing::debug!("Updated {} {}", T::KIND, id);
        Ok(item)
    }

    async fn delete(&self, id: &T::Id) -> Result<T, StoreError> {
        let slot = self
            .inner
            .lock()
            .items
            .remove(id)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        tracing::debug!("Deleted {} {}", T::KIND, id);
        Ok(slot.item)
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let inner = self.inner.lock();
        let mut slots: Vec<&Slot<T>> = inner.items.values().collect();
        slots.sort_by_key(|s| s.seq);
        Ok(slots.into_iter().map(|s| s.item.clone()).collect())
    }
}
