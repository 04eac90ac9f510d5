//! Process-wide default Docket stores.
//!
//! A [`Registry`] holds one lazily-created [`Store<T>`] per concrete
//! payload type, keyed by `TypeId`. Applications that want a single
//! ambient store per type use the [`Registry::global`] instance through
//! the module-level forwarding functions ([`put`], [`get`], [`delete`],
//! [`clear`], [`select`]); applications composing several stores
//! construct their own `Registry` (or their own stores) instead.
//!
//! Heterogeneous payloads are handled by holding one store per concrete
//! type; there is no runtime type registration and no dynamic tagging of
//! individual documents.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use docket_store::{Document, Query, QueryResult, Store, StoreError};
use docket_types::DocId;
use thiserror::Error;

/// Errors from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The store registered for a type could not be retrieved as the
    /// requested concrete type.
    #[error("document type mismatch: requested {requested}")]
    TypeMismatch { requested: &'static str },

    /// Error from the underlying store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// A collection of default stores, one per concrete payload type.
pub struct Registry {
    stores: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry backing the module-level forwarding
    /// functions.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// The default store for payload type `T`, created on first use.
    ///
    /// Repeated calls for the same type return the same store instance.
    pub fn store_of<T>(&self) -> RegistryResult<Arc<Store<T>>>
    where
        T: Send + Sync + 'static,
    {
        if let Some(existing) = self
            .stores
            .read()
            .expect("lock poisoned")
            .get(&TypeId::of::<T>())
        {
            return downcast::<T>(Arc::clone(existing));
        }

        let mut map = self.stores.write().expect("lock poisoned");
        let entry = map
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(Store::<T>::new()) as Arc<dyn Any + Send + Sync>);
        downcast::<T>(Arc::clone(entry))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T>(any: Arc<dyn Any + Send + Sync>) -> RegistryResult<Arc<Store<T>>>
where
    T: Send + Sync + 'static,
{
    any.downcast::<Store<T>>()
        .map_err(|_| RegistryError::TypeMismatch {
            requested: std::any::type_name::<T>(),
        })
}

/// Generate a fresh random document identifier.
pub fn generate_id() -> DocId {
    DocId::generate()
}

/// Insert or replace a document in the default store for `T`.
pub fn put<T>(doc: Document<T>) -> RegistryResult<()>
where
    T: Send + Sync + 'static,
{
    Registry::global().store_of::<T>()?.put(doc)?;
    Ok(())
}

/// Retrieve a document from the default store for `T`.
pub fn get<T>(id: &DocId) -> RegistryResult<Document<T>>
where
    T: Clone + Send + Sync + 'static,
{
    Ok(Registry::global().store_of::<T>()?.get(id)?)
}

/// Delete a document from the default store for `T`.
pub fn delete<T>(id: &DocId) -> RegistryResult<()>
where
    T: Send + Sync + 'static,
{
    Registry::global().store_of::<T>()?.delete(id)?;
    Ok(())
}

/// Empty the default store for `T`.
pub fn clear<T>() -> RegistryResult<()>
where
    T: Send + Sync + 'static,
{
    Registry::global().store_of::<T>()?.clear();
    Ok(())
}

/// Evaluate a query against the default store for `T`.
pub fn select<T>(query: &Query<T>) -> RegistryResult<QueryResult<T>>
where
    T: Clone + Send + Sync + 'static,
{
    Ok(Registry::global().store_of::<T>()?.select(query))
}
