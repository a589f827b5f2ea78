//! Widget descriptions
//!
//! A [`WidgetDesc`] is the declarative input to widget construction: the
//! widget type to build, property overrides and external children. Overrides
//! may name any property the type's definition exposes, whether stored on the
//! widget or forwarded through a link.

use serde::{Deserialize, Serialize};
use trellis_core::{PropertyMap, PropertyValue};

/// Name of the string property that identifies a widget among its siblings
pub const NAME_PROPERTY: &str = "Name";

/// Declarative description of one widget and its external children
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetDesc {
    /// Registered widget type to instantiate
    #[serde(rename = "type")]
    pub type_name: String,

    /// Property overrides, applied over the definition's defaults
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub properties: PropertyMap,

    /// External children, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WidgetDesc>,
}

impl WidgetDesc {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: PropertyMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: set the `Name` property
    pub fn named(self, name: impl Into<String>) -> Self {
        self.with_property(NAME_PROPERTY, name.into())
    }

    /// Builder method: override a property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.put(name, value);
        self
    }

    /// Builder method: append an external child
    pub fn with_child(mut self, child: WidgetDesc) -> Self {
        self.children.push(child);
        self
    }

    /// The `Name` override, if set to a string
    pub fn name(&self) -> Option<&str> {
        self.properties.get(NAME_PROPERTY).and_then(PropertyValue::as_str)
    }

    /// Number of descriptions in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(WidgetDesc::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::Colour;

    #[test]
    fn test_builder() {
        let desc = WidgetDesc::new("Widget")
            .named("root")
            .with_property("Colour", Colour::RED)
            .with_child(WidgetDesc::new("Image").named("icon"))
            .with_child(WidgetDesc::new("Label"));

        assert_eq!(desc.name(), Some("root"));
        assert_eq!(desc.children.len(), 2);
        assert_eq!(desc.children[0].name(), Some("icon"));
        assert_eq!(desc.children[1].name(), None);
        assert_eq!(desc.count(), 3);
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "type": "Widget",
            "properties": {
                "Name": {"type": "String", "value": "panel"},
                "Visible": {"type": "Bool", "value": false}
            },
            "children": [{"type": "Label"}]
        }"#;
        let desc: WidgetDesc = serde_json::from_str(json).unwrap();
        assert_eq!(desc.type_name, "Widget");
        assert_eq!(desc.name(), Some("panel"));
        assert_eq!(desc.properties.get("Visible"), Some(&PropertyValue::Bool(false)));
        assert_eq!(desc.children[0].type_name, "Label");
        assert!(desc.children[0].properties.is_empty());

        let written = serde_json::to_string(&desc).unwrap();
        assert_eq!(serde_json::from_str::<WidgetDesc>(&written).unwrap(), desc);
    }
}
