//! Storage interface
//!
//! Everything persisted goes through [`Repository`]; handlers and gateways
//! never touch a collection directly.

use crate::error::StoreError;
use async_trait::async_trait;
use edukit_model::{ContentId, CurriculumContent};
use std::fmt::Display;
use std::hash::Hash;

/// Something a repository can hold
pub trait Entity: Clone + Send + Sync + 'static {
    /// Key type
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Kind name used in errors and logs
    const KIND: &'static str;

    /// Key, if one has been assigned
    fn id(&self) -> Option<Self::Id>;
}

impl Entity for CurriculumContent {
    type Id = ContentId;

    const KIND: &'static str = "content";

    fn id(&self) -> Option<ContentId> {
        self.metadata.id
    }
}

/// Keyed async storage
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Store a new entity
    ///
    /// # Errors
    /// `MissingId` without an id, `Duplicate` if the id is taken.
    async fn insert(&self, item: T) -> Result<T, StoreError>;

    /// Load by id
    ///
    /// # Errors
    /// Backend failures only; a missing entity is `Ok(None)`.
    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError>;

    /// Replace an existing entity
    ///
    /// # Errors
    /// `MissingId` without an id, `NotFound` if nothing is stored under it.
    async fn update(&self, item: T) -> Result<T, StoreError>;

    /// Remove by id, returning what was stored
    ///
    /// # Errors
    /// `NotFound` if nothing is stored under the id.
    async fn delete(&self, id: &T::Id) -> Result<T, StoreError>;

    /// All entities in insertion order
    ///
    /// # Errors
    /// Backend failures only.
    async fn list(&self) -> Result<Vec<T>, StoreError>;
}

/// Load by id or fail with `NotFound`
///
/// # Errors
/// `NotFound` if absent, plus whatever the repository returns.
pub async fn require<T, R>(repo: &R, id: &T::Id) -> Result<T, StoreError>
where
    T: Entity,
    R: Repository<T> + ?Sized,
{
    repo.get(id).await?.ok_or_else(|| StoreError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    })
}
