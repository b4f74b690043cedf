//! `tablegate-core` — resource registry and failure taxonomy.
//!
//! This crate contains **pure domain** primitives (no HTTP or IO concerns).

pub mod error;
pub mod registry;

pub use error::{
    ConstraintKind, ConstraintViolation, DispatchFailure, DispatchResult, MALFORMED_PAYLOAD_MSG,
};
pub use registry::{
    RegistryEntry, RegistryError, ResourceRegistry, TypeCatalog, TypeDescriptor, TypeHandle,
    TypeLookup, RESERVED_TABLE,
};
