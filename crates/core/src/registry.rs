//! Resource registry: table names mapped to explicitly registered domain types.
//!
//! The registry is built once at startup and only read afterwards. Types are
//! looked up through a [`TypeCatalog`] populated in code (or from static
//! configuration); there is no runtime string-to-type reflection.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource name that can never be mapped nor served.
pub const RESERVED_TABLE: &str = "configurations";

/// One `table_name -> class_name` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub table_name: String,
    pub class_name: String,
}

impl RegistryEntry {
    pub fn new(table_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            class_name: class_name.into(),
        }
    }
}

/// Static description of a backing domain type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    /// Keys a write payload must carry for this type.
    #[serde(default)]
    pub required_fields: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_fields: Vec::new(),
        }
    }

    pub fn with_required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Cheap, clonable handle onto a registered [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandle(Arc<TypeDescriptor>);

impl TypeHandle {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn required_fields(&self) -> &[String] {
        &self.0.required_fields
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.0
    }
}

/// Name-to-type resolution service.
pub trait TypeLookup: Send + Sync {
    fn lookup(&self, class_name: &str) -> Option<TypeHandle>;
}

/// Errors raised while building a registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("resource name `configurations` is reserved and cannot be mapped (class `{0}`)")]
    ReservedName(String),

    #[error("type `{0}` registered twice")]
    DuplicateType(String),
}

/// Explicit map of type names to descriptors.
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, TypeHandle>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<TypeHandle, RegistryError> {
        if self.types.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateType(descriptor.name));
        }
        let handle = TypeHandle(Arc::new(descriptor));
        self.types.insert(handle.name().to_string(), handle.clone());
        Ok(handle)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeLookup for TypeCatalog {
    fn lookup(&self, class_name: &str) -> Option<TypeHandle> {
        self.types.get(class_name).cloned()
    }
}

/// Ordered resource entries plus the type lookup used to resolve them.
pub struct ResourceRegistry {
    entries: Vec<RegistryEntry>,
    types: Box<dyn TypeLookup>,
}

impl core::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl ResourceRegistry {
    /// Build a registry, refusing any entry that maps the reserved name.
    pub fn new(
        entries: Vec<RegistryEntry>,
        types: impl TypeLookup + 'static,
    ) -> Result<Self, RegistryError> {
        if let Some(entry) = entries.iter().find(|e| e.table_name == RESERVED_TABLE) {
            return Err(RegistryError::ReservedName(entry.class_name.clone()));
        }
        Ok(Self {
            entries,
            types: Box::new(types),
        })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            types: Box::new(TypeCatalog::new()),
        }
    }

    /// First entry whose table name matches exactly.
    pub fn find_entry(&self, table_name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.table_name == table_name)
    }

    pub fn lookup_type(&self, class_name: &str) -> Option<TypeHandle> {
        self.types.lookup(class_name)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }
}
