//! Widget definition registry
//!
//! Maps widget type names to shared definitions and to the resolved property
//! schema of each type: the definition's own properties plus every link name,
//! typed by the property the link targets.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use trellis_core::PropertyMap;

use crate::def::WidgetDef;
use crate::error::{Result, WidgetError};

#[derive(Debug, Clone)]
struct Entry {
    def: Arc<WidgetDef>,
    schema: PropertyMap,
}

/// Registered widget definitions, in registration order
#[derive(Debug, Default)]
pub struct WidgetDefRegistry {
    entries: IndexMap<String, Entry, FxBuildHasher>,
}

impl WidgetDefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition with its resolved schema
    pub(crate) fn insert(&mut self, def: WidgetDef, schema: PropertyMap) -> Result<Arc<WidgetDef>> {
        if self.entries.contains_key(def.type_name()) {
            return Err(WidgetError::DuplicateWidgetType(def.type_name().to_string()));
        }
        let def = Arc::new(def);
        self.entries.insert(
            def.type_name().to_string(),
            Entry {
                def: Arc::clone(&def),
                schema,
            },
        );
        Ok(def)
    }

    pub fn get(&self, type_name: &str) -> Option<&Arc<WidgetDef>> {
        self.entries.get(type_name).map(|e| &e.def)
    }

    /// Resolved schema of a registered type, with all slots unset
    pub fn schema(&self, type_name: &str) -> Option<&PropertyMap> {
        self.entries.get(type_name).map(|e| &e.schema)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Registered type names, in registration order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every registration, returning how many there were
    ///
    /// Widgets already built are unaffected; definitions still shared
    /// elsewhere stay alive until their last `Arc` is dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str) -> WidgetDef {
        WidgetDef::builder(name).property("Name", "").build().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = WidgetDefRegistry::new();
        let shared = registry.insert(def("Panel"), PropertyMap::new()).unwrap();
        registry.insert(def("Card"), PropertyMap::new()).unwrap();

        assert!(Arc::ptr_eq(&shared, registry.get("Panel").unwrap()));
        assert!(registry.get("Missing").is_none());
        assert_eq!(registry.type_names().collect::<Vec<_>>(), vec!["Panel", "Card"]);
    }

    #[test]
    fn test_duplicate_type() {
        let mut registry = WidgetDefRegistry::new();
        registry.insert(def("Panel"), PropertyMap::new()).unwrap();
        assert!(matches!(
            registry.insert(def("Panel"), PropertyMap::new()),
            Err(WidgetError::DuplicateWidgetType(name)) if name == "Panel"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_keeps_shared_definitions_alive() {
        let mut registry = WidgetDefRegistry::new();
        let shared = registry.insert(def("Panel"), PropertyMap::new()).unwrap();
        assert_eq!(registry.clear(), 1);
        assert!(registry.is_empty());
        assert_eq!(shared.type_name(), "Panel");
    }
}
