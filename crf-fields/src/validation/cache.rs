//! Compiled schema cache keyed by definition fingerprint.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::trace;

use crate::config::EngineConfig;
use crate::core::FieldDefinition;
use crate::errors::FieldError;
use crate::schema::{compile, ValidationSchema};

/// Returns a stable fingerprint of a field definition.
///
/// Any change to the type, label, options or constraints yields a new
/// fingerprint, so cached schemas never go stale.
pub fn fingerprint(definition: &FieldDefinition) -> Result<String, FieldError> {
    let json = serde_json::to_string(definition)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(&result[..16]))
}

/// A bounded, thread-safe cache of compiled schemas.
#[derive(Debug)]
pub struct SchemaCache {
    entries: DashMap<String, Arc<ValidationSchema>>,
    capacity: usize,
}

impl SchemaCache {
    /// Creates a cache holding at most `capacity` schemas; 0 disables it.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
        }
    }

    /// Returns the cached schema for `definition`, compiling it on a miss.
    pub fn get_or_compile(
        &self,
        definition: &FieldDefinition,
        config: &EngineConfig,
    ) -> Result<Arc<ValidationSchema>, FieldError> {
        if self.capacity == 0 {
            return compile(definition, config).map(Arc::new);
        }

        let key = fingerprint(definition)?;
        if let Some(schema) = self.entries.get(&key) {
            trace!(key = %key, "Schema cache hit");
            return Ok(Arc::clone(&schema));
        }

        let schema = Arc::new(compile(definition, config)?);
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(key, Arc::clone(&schema));
        Ok(schema)
    }

    /// Returns the number of cached schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
