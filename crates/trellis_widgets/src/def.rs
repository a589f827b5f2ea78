//! Widget definitions
//!
//! A [`WidgetDef`] is the reusable blueprint of a widget type. It declares
//! the widget's own properties with default values, the components it owns,
//! its internal children and two link tables that expose component and child
//! properties as properties of the widget itself.
//!
//! Definitions are checked for internal consistency when built or
//! deserialized. Checks that need the component factory or other definitions
//! happen when the definition is registered with a
//! [`WidgetFactory`](crate::WidgetFactory).

use serde::{Deserialize, Serialize};
use trellis_core::{PropertyMap, PropertyValue};

use crate::desc::WidgetDesc;
use crate::error::{Result, WidgetError};

/// A component a definition instantiates for every widget of its type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentDesc {
    /// Registered component type
    #[serde(rename = "type")]
    pub type_name: String,

    /// Instance name, unique within the definition
    pub name: String,

    /// Initial property values
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub properties: PropertyMap,
}

impl ComponentDesc {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Builder method: set an initial property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.put(name, value);
        self
    }
}

/// Exposes a component property as a widget property
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLink {
    /// Widget-level property name
    pub name: String,
    /// Target component instance
    pub component: String,
    /// Property on the target component
    pub property: String,
}

/// Exposes an internal child's property as a widget property
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildLink {
    /// Widget-level property name
    pub name: String,
    /// `Name` of the target internal child
    pub child: String,
    /// Property on the target child
    pub property: String,
}

/// Blueprint of a widget type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WidgetDefData")]
pub struct WidgetDef {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(rename = "properties")]
    defaults: PropertyMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<ComponentDesc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<WidgetDesc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    component_links: Vec<ComponentLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    child_links: Vec<ChildLink>,
}

/// On-disk form of a [`WidgetDef`], before validation
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WidgetDefData {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    properties: PropertyMap,
    #[serde(default)]
    components: Vec<ComponentDesc>,
    #[serde(default)]
    children: Vec<WidgetDesc>,
    #[serde(default)]
    component_links: Vec<ComponentLink>,
    #[serde(default)]
    child_links: Vec<ChildLink>,
}

impl TryFrom<WidgetDefData> for WidgetDef {
    type Error = WidgetError;

    fn try_from(data: WidgetDefData) -> Result<Self> {
        let def = WidgetDef {
            type_name: data.type_name,
            defaults: data.properties,
            components: data.components,
            children: data.children,
            component_links: data.component_links,
            child_links: data.child_links,
        };
        def.validate()?;
        Ok(def)
    }
}

/// Description overrides routed to their destinations
#[derive(Debug, Default)]
pub(crate) struct SplitOverrides {
    /// Overrides of the widget's own properties
    pub local: PropertyMap,
    /// Extra initial properties per component, by component index
    pub components: Vec<PropertyMap>,
    /// Extra overrides per internal child, by child index
    pub children: Vec<PropertyMap>,
}

impl WidgetDef {
    /// Start building a definition for `type_name`
    pub fn builder(type_name: impl Into<String>) -> WidgetDefBuilder {
        WidgetDefBuilder {
            data: WidgetDefData {
                type_name: type_name.into(),
                ..Default::default()
            },
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The widget's own properties with their default values
    pub fn defaults(&self) -> &PropertyMap {
        &self.defaults
    }

    pub fn components(&self) -> &[ComponentDesc] {
        &self.components
    }

    /// Internal children, in order
    pub fn children(&self) -> &[WidgetDesc] {
        &self.children
    }

    pub fn component_links(&self) -> &[ComponentLink] {
        &self.component_links
    }

    pub fn child_links(&self) -> &[ChildLink] {
        &self.child_links
    }

    pub fn component_link(&self, name: &str) -> Option<&ComponentLink> {
        self.component_links.iter().find(|link| link.name == name)
    }

    pub fn child_link(&self, name: &str) -> Option<&ChildLink> {
        self.child_links.iter().find(|link| link.name == name)
    }

    /// Index of the component with instance name `name`
    pub fn component_index(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name == name)
    }

    /// Index of the internal child whose `Name` is `name`
    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == Some(name))
    }

    /// Check if widgets of this type expose a property called `name`
    pub fn declares(&self, name: &str) -> bool {
        self.defaults.contains(name)
            || self.component_link(name).is_some()
            || self.child_link(name).is_some()
    }

    /// Every exposed property name: own properties, then component links,
    /// then child links
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.defaults
            .names()
            .chain(self.component_links.iter().map(|l| l.name.as_str()))
            .chain(self.child_links.iter().map(|l| l.name.as_str()))
    }

    /// A description of this type with no overrides
    pub fn to_desc(&self) -> WidgetDesc {
        WidgetDesc::new(self.type_name.clone())
    }

    /// Check the structural rules that need nothing but the definition
    fn validate(&self) -> Result<()> {
        for (i, component) in self.components.iter().enumerate() {
            if self.components[..i].iter().any(|c| c.name == component.name) {
                return Err(WidgetError::DuplicateComponentName {
                    widget: self.type_name.clone(),
                    component: component.name.clone(),
                });
            }
        }

        for (i, child) in self.children.iter().enumerate() {
            if let Some(name) = child.name() {
                if self.children[..i].iter().any(|c| c.name() == Some(name)) {
                    return Err(WidgetError::DuplicateChildName {
                        widget: self.type_name.clone(),
                        child: name.to_string(),
                    });
                }
            }
        }

        let names: Vec<&str> = self.property_names().collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(WidgetError::AmbiguousLink {
                    widget: self.type_name.clone(),
                    property: name.to_string(),
                });
            }
        }

        for link in &self.component_links {
            if self.component_index(&link.component).is_none() {
                let reason = format!("no component named '{}'", link.component);
                return Err(self.unresolved(&link.name, reason));
            }
        }
        for link in &self.child_links {
            if self.child_index(&link.child).is_none() {
                let reason = format!("no internal child named '{}'", link.child);
                return Err(self.unresolved(&link.name, reason));
            }
        }
        Ok(())
    }

    pub(crate) fn unresolved(&self, property: &str, reason: String) -> WidgetError {
        WidgetError::UnresolvedLink {
            widget: self.type_name.clone(),
            property: property.to_string(),
            reason,
        }
    }

    /// Route every override of `desc` to the widget itself, a component or an
    /// internal child
    pub(crate) fn split_overrides(&self, desc: &WidgetDesc) -> Result<SplitOverrides> {
        let mut split = SplitOverrides {
            local: PropertyMap::new(),
            components: vec![PropertyMap::new(); self.components.len()],
            children: vec![PropertyMap::new(); self.children.len()],
        };

        for (name, value) in desc.properties.iter() {
            if self.defaults.contains(name) {
                split.local.put(name, value.clone());
                continue;
            }
            if let Some(link) = self.component_link(name) {
                if let Some(index) = self.component_index(&link.component) {
                    split.components[index].put(link.property.as_str(), value.clone());
                    continue;
                }
            }
            if let Some(link) = self.child_link(name) {
                if let Some(index) = self.child_index(&link.child) {
                    split.children[index].put(link.property.as_str(), value.clone());
                    continue;
                }
            }
            return Err(WidgetError::UnknownProperty {
                widget: self.type_name.clone(),
                property: name.to_string(),
            });
        }
        Ok(split)
    }
}

/// Builder for [`WidgetDef`]
#[derive(Debug)]
pub struct WidgetDefBuilder {
    data: WidgetDefData,
}

impl WidgetDefBuilder {
    /// Declare an own property with its default value
    pub fn property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.data.properties.put(name, value);
        self
    }

    /// Declare every set value of `properties` as an own property
    pub fn properties(mut self, properties: &PropertyMap) -> Self {
        self.data.properties.merge(properties);
        self
    }

    pub fn component(mut self, component: ComponentDesc) -> Self {
        self.data.components.push(component);
        self
    }

    /// Add an internal child
    pub fn child(mut self, child: WidgetDesc) -> Self {
        self.data.children.push(child);
        self
    }

    /// Expose `component.property` as the widget property `name`
    pub fn component_link(
        mut self,
        name: impl Into<String>,
        component: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        self.data.component_links.push(ComponentLink {
            name: name.into(),
            component: component.into(),
            property: property.into(),
        });
        self
    }

    /// Expose `child.property` as the widget property `name`
    pub fn child_link(
        mut self,
        name: impl Into<String>,
        child: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        self.data.child_links.push(ChildLink {
            name: name.into(),
            child: child.into(),
            property: property.into(),
        });
        self
    }

    pub fn build(self) -> Result<WidgetDef> {
        WidgetDef::try_from(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::Colour;

    fn button() -> WidgetDefBuilder {
        WidgetDef::builder("Button")
            .property("Name", "")
            .property("Visible", true)
            .component(ComponentDesc::new("Drawable", "Background"))
            .component(ComponentDesc::new("Text", "Caption"))
            .child(WidgetDesc::new("Image").named("Icon"))
            .component_link("Text", "Caption", "Text")
            .child_link("IconDrawable", "Icon", "Drawable")
    }

    #[test]
    fn test_build_and_query() {
        let def = button().build().unwrap();
        assert_eq!(def.type_name(), "Button");
        assert_eq!(
            def.property_names().collect::<Vec<_>>(),
            vec!["Name", "Visible", "Text", "IconDrawable"]
        );
        assert_eq!(def.component_index("Caption"), Some(1));
        assert_eq!(def.child_index("Icon"), Some(0));
        assert!(def.declares("IconDrawable"));
        assert!(!def.declares("Drawable"));
    }

    #[test]
    fn test_duplicate_component_name() {
        let err = button()
            .component(ComponentDesc::new("Text", "Background"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            WidgetError::DuplicateComponentName { component, .. } if component == "Background"
        ));
    }

    #[test]
    fn test_duplicate_child_name() {
        let err = button()
            .child(WidgetDesc::new("Label").named("Icon"))
            .build()
            .unwrap_err();
        assert!(matches!(err, WidgetError::DuplicateChildName { child, .. } if child == "Icon"));
    }

    #[test]
    fn test_ambiguous_links() {
        let shadowed = button().property("Text", "plain").build().unwrap_err();
        assert!(matches!(shadowed, WidgetError::AmbiguousLink { property, .. } if property == "Text"));

        let twice = button()
            .child_link("Text", "Icon", "Name")
            .build()
            .unwrap_err();
        assert!(matches!(twice, WidgetError::AmbiguousLink { .. }));
    }

    #[test]
    fn test_link_to_missing_target() {
        let err = button()
            .component_link("Colour", "Missing", "Colour")
            .build()
            .unwrap_err();
        assert!(matches!(err, WidgetError::UnresolvedLink { property, .. } if property == "Colour"));

        let err = button()
            .child_link("Badge", "Badge", "Drawable")
            .build()
            .unwrap_err();
        assert!(matches!(err, WidgetError::UnresolvedLink { .. }));
    }

    #[test]
    fn test_split_overrides() {
        let def = button().build().unwrap();
        let desc = WidgetDesc::new("Button")
            .with_property("Visible", false)
            .with_property("Text", "OK")
            .with_property("IconDrawable", trellis_core::DrawableDesc::standard(Colour::RED));
        let split = def.split_overrides(&desc).unwrap();

        assert_eq!(split.local.get("Visible"), Some(&PropertyValue::Bool(false)));
        assert!(split.components[0].is_empty());
        assert_eq!(
            split.components[1].get("Text"),
            Some(&PropertyValue::String("OK".into()))
        );
        assert!(split.children[0].contains("Drawable"));

        let unknown = WidgetDesc::new("Button").with_property("Opacity", 0.5f32);
        assert!(matches!(
            def.split_overrides(&unknown),
            Err(WidgetError::UnknownProperty { property, .. }) if property == "Opacity"
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "type": "Badge",
            "properties": {"Name": {"type": "String", "value": ""}},
            "components": [{"type": "Text", "name": "Count"}],
            "component_links": [{"name": "Count", "component": "Count", "property": "Text"}]
        }"#;
        let def: WidgetDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.component_links()[0].component, "Count");

        let written = serde_json::to_string(&def).unwrap();
        assert_eq!(serde_json::from_str::<WidgetDef>(&written).unwrap(), def);

        let broken = json.replace(r#""component": "Count""#, r#""component": "Missing""#);
        assert!(serde_json::from_str::<WidgetDef>(&broken).is_err());
    }
}
