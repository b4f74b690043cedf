//! Resource-name resolution.

use axum::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use tablegate_core::{RegistryEntry, ResourceRegistry, TypeHandle, RESERVED_TABLE};

/// A table name resolved to its registry entry and backing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub entry: RegistryEntry,
    pub type_handle: TypeHandle,
}

impl ResolvedResource {
    pub fn table_name(&self) -> &str {
        &self.entry.table_name
    }
}

/// Resolution failures. These end the request with their own status and never
/// go through the error envelope builder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Forbidden access to: {0}")]
    Forbidden(String),

    #[error("Mapped class not found for name: {0}")]
    ResourceNotMapped(String),

    #[error("Class not found for name: {0}")]
    TypeNotResolved(String),
}

impl ResolveError {
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::Forbidden(_) => StatusCode::FORBIDDEN,
            ResolveError::ResourceNotMapped(_) | ResolveError::TypeNotResolved(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// JSON text sent back for this short-circuit.
    pub fn body(&self) -> String {
        json!({
            "error": {
                "msg": self.to_string(),
                "status_code": self.status().as_u16(),
            }
        })
        .to_string()
    }
}

/// Resolve an optional table name.
///
/// `None` means the caller does not operate on a named resource and yields
/// `Ok(None)`. The reserved name is refused before the registry is consulted.
pub fn resolve(
    registry: &ResourceRegistry,
    table_name: Option<&str>,
) -> Result<Option<ResolvedResource>, ResolveError> {
    let Some(table_name) = table_name else {
        return Ok(None);
    };

    if table_name == RESERVED_TABLE {
        return Err(ResolveError::Forbidden(table_name.to_string()));
    }

    let entry = registry
        .find_entry(table_name)
        .ok_or_else(|| ResolveError::ResourceNotMapped(table_name.to_string()))?;

    let type_handle = registry
        .lookup_type(&entry.class_name)
        .ok_or_else(|| ResolveError::TypeNotResolved(entry.class_name.clone()))?;

    Ok(Some(ResolvedResource {
        entry: entry.clone(),
        type_handle,
    }))
}
