//! Per-type schema descriptor cache
//!
//! Descriptors are resolved on first use and shared afterwards. The cache is
//! an ordinary value owned by a mapper or validator (share it with `Arc` to
//! reuse resolutions across both); there is no process-wide registry.

use super::{Record, SchemaDescriptor};
use crate::Result;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

type Entry = Arc<dyn Any + Send + Sync>;

/// Memoizes resolved descriptors keyed by record type identity
#[derive(Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<TypeId, Entry>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for `T`, resolving and storing it on first request
    ///
    /// Resolution failures are not cached; a broken declaration fails on
    /// every call.
    pub fn resolve<T: Record>(&self) -> Result<Arc<SchemaDescriptor<T>>> {
        let key = TypeId::of::<T>();

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(descriptor) =
            cached.and_then(|entry| entry.downcast::<SchemaDescriptor<T>>().ok())
        {
            return Ok(descriptor);
        }

        let descriptor = Arc::new(SchemaDescriptor::<T>::of()?);
        debug!(
            "Resolved schema for {} ({} fields)",
            descriptor.type_name(),
            descriptor.fields().len()
        );

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .entry(key)
            .or_insert_with(|| descriptor.clone() as Entry)
            .clone();
        Ok(entry.downcast::<SchemaDescriptor<T>>().unwrap_or(descriptor))
    }

    /// Number of resolved descriptors
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("entries", &self.len())
            .finish()
    }
}
