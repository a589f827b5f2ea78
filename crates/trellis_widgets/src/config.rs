//! Widget factory configuration

use serde::{Deserialize, Serialize};
use trellis_core::ResourcePath;

/// Configuration applied when a [`WidgetFactory`](crate::WidgetFactory) is
/// initialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetFactoryConfig {
    /// Register the built-in widget definitions (Widget, Image, Label, ...).
    pub register_builtins: bool,
    /// Maximum nesting depth of a single `create` call.
    pub max_depth: usize,
    /// Definition resources loaded after the built-ins, in order.
    pub definitions: Vec<ResourcePath>,
}

impl Default for WidgetFactoryConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl WidgetFactoryConfig {
    /// Standard configuration: built-ins registered, generous depth limit.
    pub fn standard() -> Self {
        Self {
            register_builtins: true,
            max_depth: 64,
            definitions: Vec::new(),
        }
    }

    /// Nothing registered; every definition is supplied by the caller.
    pub fn empty() -> Self {
        Self {
            register_builtins: false,
            ..Self::standard()
        }
    }

    /// Builder method: load a definition resource at init
    pub fn with_definition(mut self, path: ResourcePath) -> Self {
        self.definitions.push(path);
        self
    }

    /// Builder method: set the depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
