//! Widget instances
//!
//! A [`Widget`] is a node of a built UI tree. It owns its components, its
//! internal children (built from the definition, not removable) and its
//! external children (supplied by descriptions or added at runtime).
//!
//! Property access goes through one name space: names stored on the widget
//! resolve locally; names in the definition's link tables resolve to the
//! linked component or internal child. A link write is the same as writing
//! the target directly, and the target's value is what a read returns.
//!
//! Children are owned by value. There are no parent pointers; navigation is
//! from a parent down, by index or by name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use trellis_core::{PropertyError, PropertyKind, PropertyMap, PropertyValue};
use trellis_core::Result as PropertyResult;

use crate::component::Component;
use crate::def::WidgetDef;
use crate::desc::NAME_PROPERTY;
use crate::error::Result;

/// Where a linked property lives, resolved to an index at construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyLink {
    Component { index: usize, property: String },
    Child { index: usize, property: String },
}

/// A built widget
#[derive(Debug)]
pub struct Widget {
    type_name: String,
    properties: PropertyMap,
    components: SmallVec<[Box<dyn Component>; 2]>,
    internal_children: Vec<Widget>,
    links: IndexMap<String, PropertyLink>,
    children: Vec<Widget>,
}

impl Widget {
    /// Assemble a widget from built parts, resolving the definition's link
    /// tables against them
    ///
    /// Fails with `UnresolvedLink` when a link names a component or internal
    /// child that is not present, or a property the target does not expose.
    pub(crate) fn from_parts(
        def: &WidgetDef,
        properties: PropertyMap,
        components: Vec<Box<dyn Component>>,
        internal_children: Vec<Widget>,
    ) -> Result<Self> {
        let capacity = def.component_links().len() + def.child_links().len();
        let mut links = IndexMap::with_capacity(capacity);

        for link in def.component_links() {
            let index = components
                .iter()
                .position(|c| c.name() == link.component)
                .ok_or_else(|| {
                    let reason = format!("no component named '{}'", link.component);
                    def.unresolved(&link.name, reason)
                })?;
            if !components[index].has_property(&link.property) {
                return Err(def.unresolved(
                    &link.name,
                    format!("component '{}' has no property '{}'", link.component, link.property),
                ));
            }
            links.insert(
                link.name.clone(),
                PropertyLink::Component {
                    index,
                    property: link.property.clone(),
                },
            );
        }

        for link in def.child_links() {
            // Internal children are built in definition order, so the index
            // holds even when an override renames the child
            let index = def
                .child_index(&link.child)
                .filter(|&index| index < internal_children.len())
                .ok_or_else(|| {
                    let reason = format!("no internal child named '{}'", link.child);
                    def.unresolved(&link.name, reason)
                })?;
            if !internal_children[index].has_property(&link.property) {
                return Err(def.unresolved(
                    &link.name,
                    format!("child '{}' has no property '{}'", link.child, link.property),
                ));
            }
            links.insert(
                link.name.clone(),
                PropertyLink::Child {
                    index,
                    property: link.property.clone(),
                },
            );
        }

        Ok(Self {
            type_name: def.type_name().to_string(),
            properties,
            components: components.into(),
            internal_children,
            links,
            children: Vec::new(),
        })
    }

    /// Registered type this widget was built from
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The `Name` property, if the widget exposes it as a string
    pub fn name(&self) -> Option<String> {
        self.get_property(NAME_PROPERTY)
            .and_then(|value| value.as_str().map(String::from))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if `name` is a local or linked property
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains(name) || self.links.contains_key(name)
    }

    /// Local names, then link names, in declaration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .names()
            .chain(self.links.keys().map(String::as_str))
    }

    /// Read a property, following links
    pub fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match self.links.get(name) {
            Some(PropertyLink::Component { index, property }) => {
                self.components[*index].get_property(property)
            }
            Some(PropertyLink::Child { index, property }) => {
                self.internal_children[*index].get_property(property)
            }
            None => self.properties.get(name).cloned(),
        }
    }

    /// Read a property as a Rust type
    pub fn get_property_as<T: PropertyKind>(&self, name: &str) -> PropertyResult<T> {
        let value = self
            .get_property(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        T::from_value(&value).ok_or_else(|| PropertyError::TypeMismatch {
            name: name.to_string(),
            expected: value.type_name(),
            actual: T::TYPE.name(),
        })
    }

    /// Write a property, following links
    ///
    /// The value is checked against the type of the property that finally
    /// stores it.
    pub fn set_property(&mut self, name: &str, value: impl Into<PropertyValue>) -> PropertyResult<()> {
        let value = value.into();
        match self.links.get(name) {
            Some(PropertyLink::Component { index, property }) => {
                self.components[*index].set_property(property, value)
            }
            Some(PropertyLink::Child { index, property }) => {
                self.internal_children[*index].set_property(property, value)
            }
            None => self.properties.set(name, value).map(|_| ()),
        }
    }

    /// Where a linked property is routed, if `name` is a link
    pub fn link(&self, name: &str) -> Option<&PropertyLink> {
        self.links.get(name)
    }

    /// The widget's own stored properties
    pub fn local_properties(&self) -> &PropertyMap {
        &self.properties
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Components
    // ─────────────────────────────────────────────────────────────────────────

    pub fn components(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.components.iter().map(|c| &**c)
    }

    pub fn component(&self, name: &str) -> Option<&(dyn Component + 'static)> {
        self.components().find(|c| c.name() == name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut (dyn Component + 'static)> {
        self.components
            .iter_mut()
            .find(|c| c.name() == name)
            .map(|c| &mut **c)
    }

    /// First component of concrete type `T`
    pub fn component_of<T: Component + 'static>(&self) -> Option<&T> {
        self.components().find_map(|c| c.downcast_ref::<T>())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Internal children, in definition order
    pub fn internal_children(&self) -> &[Widget] {
        &self.internal_children
    }

    pub fn internal_child(&self, name: &str) -> Option<&Widget> {
        self.internal_children
            .iter()
            .find(|c| c.name().as_deref() == Some(name))
    }

    pub fn internal_child_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.internal_children
            .iter_mut()
            .find(|c| c.name().as_deref() == Some(name))
    }

    /// External children, in order
    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Widget> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Widget> {
        self.children.get_mut(index)
    }

    /// First external child whose `Name` is `name`
    pub fn child_named(&self, name: &str) -> Option<&Widget> {
        self.children
            .iter()
            .find(|c| c.name().as_deref() == Some(name))
    }

    /// Append an external child, taking ownership of it
    pub fn add_widget(&mut self, widget: Widget) {
        self.children.push(widget);
    }

    /// Detach an external child, handing ownership back
    pub fn remove_widget(&mut self, index: usize) -> Option<Widget> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Detach all external children
    pub fn remove_all_widgets(&mut self) -> Vec<Widget> {
        std::mem::take(&mut self.children)
    }

    /// Number of widgets in this subtree, internal children included
    pub fn count(&self) -> usize {
        1 + self
            .internal_children
            .iter()
            .chain(&self.children)
            .map(Widget::count)
            .sum::<usize>()
    }

    /// Comparable description of the whole subtree
    pub fn snapshot(&self) -> WidgetSnapshot {
        let mut properties = PropertyMap::new();
        for name in self.property_names() {
            if let Some(value) = self.get_property(name) {
                properties.put(name, value);
            }
        }
        WidgetSnapshot {
            type_name: self.type_name.clone(),
            properties,
            components: self
                .components()
                .map(|c| ComponentSnapshot {
                    type_name: c.type_name().to_string(),
                    name: c.name().to_string(),
                    properties: c.properties(),
                })
                .collect(),
            internal_children: self.internal_children.iter().map(Widget::snapshot).collect(),
            children: self.children.iter().map(Widget::snapshot).collect(),
        }
    }
}

/// Captured state of a component
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub properties: PropertyMap,
}

/// Captured state of a widget subtree
///
/// Property values include linked properties. Two trees built from the same
/// definitions and descriptions have equal snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    #[serde(rename = "type")]
    pub type_name: String,
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_children: Vec<WidgetSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WidgetSnapshot>,
}

impl WidgetSnapshot {
    /// Pretty JSON, for debugging and golden files
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentType, PropertyComponent};
    use crate::desc::WidgetDesc;
    use crate::components::TextComponent;
    use crate::def::ComponentDesc;
    use crate::error::WidgetError;
    use trellis_core::{Colour, PropertyDesc, PropertyType};

    fn label_def() -> WidgetDef {
        WidgetDef::builder("Label")
            .property("Name", "")
            .property("Colour", Colour::WHITE)
            .component(ComponentDesc::new("Text", "Text"))
            .component_link("Text", "Text", "Text")
            .component_link("TextScale", "Text", "TextScale")
            .build()
            .unwrap()
    }

    fn label(name: &str) -> Widget {
        let def = label_def();
        let properties = def.defaults().clone().with("Name", name);
        let text: Box<dyn Component> = Box::new(TextComponent::with_name("Text"));
        Widget::from_parts(&def, properties, vec![text], Vec::new()).unwrap()
    }

    #[test]
    fn test_local_and_linked_properties() {
        let mut widget = label("title");
        assert_eq!(widget.name().as_deref(), Some("title"));
        assert_eq!(
            widget.property_names().collect::<Vec<_>>(),
            vec!["Name", "Colour", "Text", "TextScale"]
        );

        widget.set_property("Text", "Hello").unwrap();
        let text = widget.component_of::<TextComponent>().unwrap();
        assert_eq!(text.text(), "Hello");
        assert_eq!(widget.get_property_as::<String>("Text").unwrap(), "Hello");

        widget
            .component_mut("Text")
            .unwrap()
            .set_property("TextScale", 2.0f32.into())
            .unwrap();
        assert_eq!(widget.get_property_as::<f32>("TextScale").unwrap(), 2.0);
    }

    #[test]
    fn test_link_writes_are_type_checked() {
        let mut widget = label("title");
        assert!(matches!(
            widget.set_property("Text", 5i32),
            Err(PropertyError::TypeMismatch { .. })
        ));
        assert!(matches!(
            widget.set_property("Opacity", 1.0f32),
            Err(PropertyError::UnknownProperty(_))
        ));
        assert!(widget.get_property_as::<bool>("Colour").is_err());
    }

    #[test]
    fn test_child_link_routes_to_internal_child() {
        let def = WidgetDef::builder("Badge")
            .property("Name", "")
            .child(WidgetDesc::new("Label").named("Caption"))
            .child_link("Caption", "Caption", "Text")
            .build()
            .unwrap();
        let mut badge =
            Widget::from_parts(&def, def.defaults().clone(), Vec::new(), vec![label("Caption")])
                .unwrap();

        badge.set_property("Caption", "3").unwrap();
        let caption = badge.internal_child("Caption").unwrap();
        assert_eq!(caption.get_property_as::<String>("Text").unwrap(), "3");
        assert_eq!(badge.count(), 2);
    }

    #[test]
    fn test_child_link_survives_renamed_child() {
        let def = WidgetDef::builder("Badge")
            .property("Name", "")
            .child(WidgetDesc::new("Label").named("Caption"))
            .child_link("CaptionName", "Caption", "Name")
            .child_link("Caption", "Caption", "Text")
            .build()
            .unwrap();
        let mut badge =
            Widget::from_parts(&def, def.defaults().clone(), Vec::new(), vec![label("renamed")])
                .unwrap();

        assert_eq!(badge.get_property_as::<String>("CaptionName").unwrap(), "renamed");
        badge.set_property("Caption", "9").unwrap();
        assert_eq!(
            badge.internal_children()[0].get_property_as::<String>("Text").unwrap(),
            "9"
        );
    }

    #[test]
    fn test_unresolved_link_target_property() {
        let def = WidgetDef::builder("Tagged")
            .component(ComponentDesc::new("Tag", "Tag"))
            .component_link("Missing", "Tag", "Missing")
            .build()
            .unwrap();
        let tag: Box<dyn Component> = Box::new(
            PropertyComponent::new("Tag", "Tag", &[PropertyDesc::new(PropertyType::Int, "Priority")])
                .unwrap(),
        );
        let err = Widget::from_parts(&def, PropertyMap::new(), vec![tag], Vec::new())
            .unwrap_err();
        assert!(matches!(err, WidgetError::UnresolvedLink { property, .. } if property == "Missing"));
    }

    #[test]
    fn test_external_children() {
        let mut root = label("root");
        root.add_widget(label("a"));
        root.add_widget(label("b"));
        root.add_widget(label("c"));
        assert_eq!(root.children().len(), 3);
        assert!(root.child_named("b").is_some());

        let removed = root.remove_widget(1).unwrap();
        assert_eq!(removed.name().as_deref(), Some("b"));
        assert_eq!(
            root.children()
                .iter()
                .filter_map(Widget::name)
                .collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert!(root.remove_widget(5).is_none());
        assert_eq!(root.remove_all_widgets().len(), 2);
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_snapshot_includes_linked_values() {
        let mut widget = label("title");
        widget.set_property("Text", "Hi").unwrap();
        let snapshot = widget.snapshot();
        assert_eq!(
            snapshot.properties.get("Text"),
            Some(&PropertyValue::String("Hi".into()))
        );
        assert_eq!(snapshot.components[0].type_name, "Text");
        assert_eq!(snapshot, widget.snapshot());

        let json = snapshot.to_json().unwrap();
        let restored: WidgetSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
