//! Widget templates
//!
//! A template is a stand-alone widget description, typically authored as a
//! resource file, that instantiates a tree of registered widget types.

use trellis_core::ResourcePath;

use crate::desc::WidgetDesc;

/// A reusable widget tree description
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetTemplate {
    source: Option<ResourcePath>,
    root: WidgetDesc,
}

impl WidgetTemplate {
    pub fn new(root: WidgetDesc) -> Self {
        Self { source: None, root }
    }

    /// Builder method: record the resource the template was read from
    pub fn with_source(mut self, source: ResourcePath) -> Self {
        self.source = Some(source);
        self
    }

    /// Description of the root widget
    pub fn root(&self) -> &WidgetDesc {
        &self.root
    }

    /// Resource the template was loaded from, if any
    pub fn source(&self) -> Option<&ResourcePath> {
        self.source.as_ref()
    }

    /// Widget type of the root
    pub fn type_name(&self) -> &str {
        &self.root.type_name
    }

    pub fn into_desc(self) -> WidgetDesc {
        self.root
    }
}

impl From<WidgetDesc> for WidgetTemplate {
    fn from(root: WidgetDesc) -> Self {
        Self::new(root)
    }
}
