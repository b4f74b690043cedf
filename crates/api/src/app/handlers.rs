//! Reference handlers mounted by the `tablegate-api` binary.
//!
//! They carry no business logic of their own: reads describe the resolved
//! resource, writes check the type's required fields and echo the body back.

use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use tablegate_core::{DispatchFailure, DispatchResult, ResourceRegistry};

use crate::dispatcher::to_value;
use crate::handler::{HandlerOutcome, HandlerSet, ResourceHandler};
use crate::payload::Body;
use crate::resolver::ResolvedResource;
use crate::validation::validate_params;

#[derive(Debug, Serialize)]
struct ResourceDescription<'a> {
    table_name: &'a str,
    class_name: &'a str,
    required_fields: &'a [String],
}

impl<'a> ResourceDescription<'a> {
    fn of(target: &'a ResolvedResource) -> Self {
        Self {
            table_name: &target.entry.table_name,
            class_name: &target.entry.class_name,
            required_fields: target.type_handle.required_fields(),
        }
    }
}

fn require_target(target: Option<&ResolvedResource>) -> DispatchResult<&ResolvedResource> {
    target.ok_or_else(|| DispatchFailure::model("Resource name required."))
}

/// Serves one registered table.
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorHandler;

impl ResourceHandler for DescriptorHandler {
    fn read(&self, target: Option<&ResolvedResource>) -> DispatchResult<Value> {
        to_value(&ResourceDescription::of(require_target(target)?))
    }

    fn write(
        &self,
        body: Body,
        status: StatusCode,
        target: Option<&ResolvedResource>,
    ) -> DispatchResult<HandlerOutcome> {
        let target = require_target(target)?;
        validate_params(&body, target.type_handle.required_fields())?;

        let response = serde_json::json!({
            "table_name": target.table_name(),
            "accepted": Value::Object(body),
        });
        Ok(HandlerOutcome::new(status, response))
    }
}

/// Serves `/`: lists the registered resources.
#[derive(Debug, Clone)]
pub struct CatalogHandler {
    registry: Arc<ResourceRegistry>,
}

impl CatalogHandler {
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self { registry }
    }
}

impl ResourceHandler for CatalogHandler {
    fn read(&self, _target: Option<&ResolvedResource>) -> DispatchResult<Value> {
        let resources = to_value(&self.registry.entries())?;
        Ok(serde_json::json!({ "resources": resources }))
    }
}

/// Catalog at the root and a [`DescriptorHandler`] for every registered table.
pub fn reference_handlers(registry: &Arc<ResourceRegistry>) -> HandlerSet {
    let mut handlers = HandlerSet::new().with_root(CatalogHandler::new(Arc::clone(registry)));
    for entry in registry.entries() {
        handlers.insert(entry.table_name.clone(), Arc::new(DescriptorHandler));
    }
    handlers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use serde_json::json;
    use tablegate_core::{RegistryEntry, TypeCatalog, TypeDescriptor};

    fn registry() -> Arc<ResourceRegistry> {
        let mut types = TypeCatalog::new();
        types
            .register(TypeDescriptor::new("Widget").with_required_fields(["name"]))
            .unwrap();
        Arc::new(ResourceRegistry::new(vec![RegistryEntry::new("widgets", "Widget")], types).unwrap())
    }

    #[test]
    fn describes_resolved_resource() {
        let registry = registry();
        let target = resolve(&registry, Some("widgets")).unwrap();
        let body = DescriptorHandler.read(target.as_ref()).unwrap();
        assert_eq!(
            body,
            json!({"table_name": "widgets", "class_name": "Widget", "required_fields": ["name"]})
        );
    }

    #[test]
    fn write_requires_fields() {
        let registry = registry();
        let target = resolve(&registry, Some("widgets")).unwrap();
        let err = DescriptorHandler
            .write(Body::new(), StatusCode::OK, target.as_ref())
            .unwrap_err();
        assert_eq!(err.to_string(), "Parameter name not found. Invalid payload.");
    }

    #[test]
    fn descriptor_needs_a_target() {
        let err = DescriptorHandler.read(None).unwrap_err();
        assert!(err.is_model());
    }

    #[test]
    fn catalog_lists_entries_and_every_table_gets_a_handler() {
        let registry = registry();
        let handlers = reference_handlers(&registry);
        assert!(handlers.get(Some("widgets")).is_some());

        let body = handlers.get(None).unwrap().read(None).unwrap();
        assert_eq!(
            body,
            json!({"resources": [{"table_name": "widgets", "class_name": "Widget"}]})
        );
    }
}
