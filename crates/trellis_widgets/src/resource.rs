//! Resource providers and definition loading
//!
//! Widget definitions and templates are authored as JSON resources addressed
//! by a [`ResourcePath`] (storage location plus relative path). A
//! [`ResourceProvider`] turns a path into text; the loaders parse and
//! validate it.
//!
//! ```json
//! {
//!     "type": "IconButton",
//!     "properties": {
//!         "Name": {"type": "String", "value": ""}
//!     },
//!     "components": [{"type": "Drawable", "name": "Background"}],
//!     "component_links": [
//!         {"name": "Background", "component": "Background", "property": "Drawable"}
//!     ]
//! }
//! ```

use std::io;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tracing::debug;
use trellis_core::{ResourcePath, StorageLocation};

use crate::def::{WidgetDef, WidgetDefData};
use crate::desc::WidgetDesc;
use crate::error::{ResourceError, Result};
use crate::template::WidgetTemplate;

/// Source of resource text
pub trait ResourceProvider: Send + Sync {
    /// Read the whole resource at `path` as UTF-8 text
    fn read_to_string(&self, path: &ResourcePath) -> std::result::Result<String, ResourceError>;
}

/// Resources held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    files: FxHashMap<ResourcePath, String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: ResourcePath, contents: impl Into<String>) {
        self.files.insert(path, contents.into());
    }

    /// Builder method: add a resource
    pub fn with(mut self, path: ResourcePath, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl ResourceProvider for MemoryProvider {
    fn read_to_string(&self, path: &ResourcePath) -> std::result::Result<String, ResourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.clone()))
    }
}

/// Resources read from disk, one root directory per storage location
#[derive(Debug, Clone, Default)]
pub struct FileProvider {
    roots: FxHashMap<StorageLocation, PathBuf>,
}

impl FileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: map a storage location to a directory
    pub fn with_root(mut self, location: StorageLocation, dir: impl Into<PathBuf>) -> Self {
        self.roots.insert(location, dir.into());
        self
    }

    /// File system path a resource resolves to, if its location is mapped
    pub fn resolve(&self, path: &ResourcePath) -> Option<PathBuf> {
        self.roots.get(&path.location).map(|root| root.join(&path.path))
    }
}

impl ResourceProvider for FileProvider {
    fn read_to_string(&self, path: &ResourcePath) -> std::result::Result<String, ResourceError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| ResourceError::NotFound(path.clone()))?;
        std::fs::read_to_string(&file).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ResourceError::NotFound(path.clone()),
            _ => ResourceError::Io {
                path: path.clone(),
                source,
            },
        })
    }
}

fn parse<T: serde::de::DeserializeOwned>(
    provider: &dyn ResourceProvider,
    path: &ResourcePath,
) -> std::result::Result<T, ResourceError> {
    let text = provider.read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| ResourceError::Json {
        path: path.clone(),
        source,
    })
}

/// Read and validate a widget definition
///
/// Only the checks that need nothing but the definition run here; the rest
/// run when the definition is registered.
pub fn load_widget_def(provider: &dyn ResourceProvider, path: &ResourcePath) -> Result<WidgetDef> {
    let data: WidgetDefData = parse(provider, path)?;
    let def = WidgetDef::try_from(data)?;
    debug!(widget = def.type_name(), path = %path, "loaded widget definition");
    Ok(def)
}

/// Read a widget template
pub fn load_widget_template(
    provider: &dyn ResourceProvider,
    path: &ResourcePath,
) -> Result<WidgetTemplate> {
    let root: WidgetDesc = parse(provider, path)?;
    debug!(widget = %root.type_name, path = %path, "loaded widget template");
    Ok(WidgetTemplate::new(root).with_source(path.clone()))
}
