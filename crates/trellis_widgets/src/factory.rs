//! The widget factory
//!
//! [`WidgetFactory`] owns the component factory and the definition registry
//! and turns definitions, descriptions and templates into widget trees.
//!
//! The factory has two phases. During initialisation (`&mut self`)
//! definitions are registered and cross-checked against the component types
//! and the definitions registered before them. Afterwards construction takes
//! `&self`, so one factory can build widgets from many threads at once.
//!
//! # Construction
//!
//! Building a widget from a definition and a description:
//!
//! 1. Route each description override to the widget itself, a component (via
//!    a component link) or an internal child (via a child link).
//! 2. Create each component from its initial properties plus routed
//!    overrides.
//! 3. Build each internal child from its description plus routed overrides,
//!    recursively.
//! 4. Assemble the widget, resolving link tables against the built parts.
//! 5. Build each external child of the description, recursively, and attach
//!    it in order.
//!
//! Any failure aborts the whole call; partially built subtrees are dropped.

use std::sync::Arc;

use tracing::{debug, trace, warn};
use trellis_core::{PropertyDesc, PropertyMap, ResourcePath};

use crate::builtin;
use crate::component::ComponentFactory;
use crate::config::WidgetFactoryConfig;
use crate::def::WidgetDef;
use crate::desc::WidgetDesc;
use crate::error::{Result, WidgetError};
use crate::registry::WidgetDefRegistry;
use crate::resource::{load_widget_def, load_widget_template, ResourceProvider};
use crate::template::WidgetTemplate;
use crate::widget::Widget;

/// Builds widget trees from registered definitions
#[derive(Debug)]
pub struct WidgetFactory {
    components: ComponentFactory,
    registry: WidgetDefRegistry,
    config: WidgetFactoryConfig,
}

impl WidgetFactory {
    /// Create a factory, registering the built-in definitions if configured
    ///
    /// Fails with `MissingProvider` if the config lists definition resources;
    /// use [`with_provider`](Self::with_provider) for those.
    pub fn new(components: ComponentFactory, config: WidgetFactoryConfig) -> Result<Self> {
        if !config.definitions.is_empty() {
            return Err(WidgetError::MissingProvider {
                definitions: config.definitions.len(),
            });
        }
        Self::init(components, config)
    }

    /// Create a factory and load the config's definition resources
    pub fn with_provider(
        components: ComponentFactory,
        config: WidgetFactoryConfig,
        provider: &dyn ResourceProvider,
    ) -> Result<Self> {
        let mut factory = Self::init(components, config)?;
        let paths = factory.config.definitions.clone();
        for path in &paths {
            factory.load_definition(provider, path)?;
        }
        Ok(factory)
    }

    fn init(components: ComponentFactory, config: WidgetFactoryConfig) -> Result<Self> {
        let mut factory = Self {
            components,
            registry: WidgetDefRegistry::new(),
            config,
        };
        if factory.config.register_builtins {
            for def in builtin::builtin_definitions()? {
                factory.register_definition(def)?;
            }
        }
        Ok(factory)
    }

    /// A factory with built-in components and definitions
    pub fn standard() -> Result<Self> {
        Self::new(ComponentFactory::with_builtins()?, WidgetFactoryConfig::standard())
    }

    pub fn config(&self) -> &WidgetFactoryConfig {
        &self.config
    }

    pub fn component_factory(&self) -> &ComponentFactory {
        &self.components
    }

    pub fn registry(&self) -> &WidgetDefRegistry {
        &self.registry
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Check a definition against the component types and registered
    /// definitions, then register it
    ///
    /// Internal children must be of types registered earlier.
    pub fn register_definition(&mut self, def: WidgetDef) -> Result<Arc<WidgetDef>> {
        if self.registry.contains(def.type_name()) {
            return Err(WidgetError::DuplicateWidgetType(def.type_name().to_string()));
        }
        let schema = self.resolve_schema(&def)?;
        let def = self.registry.insert(def, schema)?;
        debug!(
            widget = def.type_name(),
            components = def.components().len(),
            children = def.children().len(),
            "registered widget definition"
        );
        Ok(def)
    }

    /// Load a definition resource and register it
    pub fn load_definition(
        &mut self,
        provider: &dyn ResourceProvider,
        path: &ResourcePath,
    ) -> Result<Arc<WidgetDef>> {
        let def = load_widget_def(provider, path)?;
        self.register_definition(def)
    }

    /// Registered definition of `type_name`
    pub fn get_definition(&self, type_name: &str) -> Result<Arc<WidgetDef>> {
        self.definition(type_name).cloned()
    }

    /// Resolved property schema of a registered type
    ///
    /// Lists the type's own properties followed by its link names, each with
    /// the type of the property it stores into. All slots are unset.
    pub fn schema(&self, type_name: &str) -> Option<&PropertyMap> {
        self.registry.schema(type_name)
    }

    /// Drop every registered definition
    ///
    /// Widgets built earlier stay valid; they do not refer back to the
    /// factory.
    pub fn clear(&mut self) {
        let count = self.registry.clear();
        if count > 0 {
            warn!(definitions = count, "cleared widget definitions");
        }
    }

    fn definition(&self, type_name: &str) -> Result<&Arc<WidgetDef>> {
        self.registry
            .get(type_name)
            .ok_or_else(|| WidgetError::UnknownWidgetType(type_name.to_string()))
    }

    /// Own properties plus typed link names, after checking every component
    /// and child the definition refers to
    fn resolve_schema(&self, def: &WidgetDef) -> Result<PropertyMap> {
        let own = |source| WidgetError::WidgetProperty {
            widget: def.type_name().to_string(),
            source,
        };
        let mut schema = PropertyMap::new();
        for desc in def.defaults().descs() {
            schema.declare(desc).map_err(own)?;
        }

        for component in def.components() {
            let component_schema = self
                .components
                .schema(&component.type_name)
                .ok_or_else(|| WidgetError::UnknownComponentType(component.type_name.clone()))?;
            component_schema
                .layered(&component.properties)
                .map_err(|source| WidgetError::ComponentProperty {
                    component: component.name.clone(),
                    source,
                })?;
        }

        for link in def.component_links() {
            let ty = def
                .component_index(&link.component)
                .map(|index| &def.components()[index])
                .and_then(|component| self.components.schema(&component.type_name))
                .and_then(|component_schema| component_schema.property_type(&link.property))
                .ok_or_else(|| {
                    let reason = format!(
                        "component '{}' has no property '{}'",
                        link.component, link.property
                    );
                    def.unresolved(&link.name, reason)
                })?;
            schema
                .declare(PropertyDesc::new(ty, link.name.clone()))
                .map_err(own)?;
        }

        for child in def.children() {
            let child_schema = self
                .registry
                .schema(&child.type_name)
                .ok_or_else(|| WidgetError::UnknownWidgetType(child.type_name.clone()))?;
            child_schema
                .layered(&child.properties)
                .map_err(|source| WidgetError::WidgetProperty {
                    widget: child.type_name.clone(),
                    source,
                })?;
        }

        for link in def.child_links() {
            let ty = def
                .child_index(&link.child)
                .map(|index| &def.children()[index])
                .and_then(|child| self.registry.schema(&child.type_name))
                .and_then(|child_schema| child_schema.property_type(&link.property))
                .ok_or_else(|| {
                    let reason =
                        format!("child '{}' has no property '{}'", link.child, link.property);
                    def.unresolved(&link.name, reason)
                })?;
            schema
                .declare(PropertyDesc::new(ty, link.name.clone()))
                .map_err(own)?;
        }

        Ok(schema)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a widget of `def`'s type with default properties
    pub fn create(&self, def: &WidgetDef) -> Result<Widget> {
        self.create_recursive(def, &def.to_desc(), 0)
    }

    /// Build the widget tree a template describes
    pub fn create_from_template(&self, template: &WidgetTemplate) -> Result<Widget> {
        self.create_from_desc(template.root())
    }

    /// Build the widget tree a description describes
    pub fn create_from_desc(&self, desc: &WidgetDesc) -> Result<Widget> {
        let def = self.definition(&desc.type_name)?;
        self.create_recursive(def, desc, 0)
    }

    /// Build a widget of a registered type with default properties
    pub fn create_type(&self, type_name: &str) -> Result<Widget> {
        self.create(self.definition(type_name)?)
    }

    /// Load a template resource and build it
    pub fn create_from_resource(
        &self,
        provider: &dyn ResourceProvider,
        path: &ResourcePath,
    ) -> Result<Widget> {
        let template = load_widget_template(provider, path)?;
        self.create_from_template(&template)
    }

    fn create_recursive(&self, def: &WidgetDef, desc: &WidgetDesc, depth: usize) -> Result<Widget> {
        if depth > self.config.max_depth {
            return Err(WidgetError::RecursionLimit {
                widget: def.type_name().to_string(),
                max_depth: self.config.max_depth,
            });
        }
        trace!(widget = def.type_name(), depth, "building widget");

        let overrides = def.split_overrides(desc)?;

        let mut components = Vec::with_capacity(def.components().len());
        for (component, routed) in def.components().iter().zip(&overrides.components) {
            let mut initial = component.properties.clone();
            initial.merge(routed);
            components.push(self.components.create_component(
                &component.type_name,
                &component.name,
                &initial,
            )?);
        }

        let mut internal_children = Vec::with_capacity(def.children().len());
        for (child, routed) in def.children().iter().zip(&overrides.children) {
            let child_def = self.definition(&child.type_name)?;
            let mut child_desc = child.clone();
            child_desc.properties.merge(routed);
            internal_children.push(self.create_recursive(child_def, &child_desc, depth + 1)?);
        }

        let properties = def
            .defaults()
            .layered(&overrides.local)
            .map_err(|source| WidgetError::WidgetProperty {
                widget: def.type_name().to_string(),
                source,
            })?;
        let mut widget = Widget::from_parts(def, properties, components, internal_children)?;

        for child in &desc.children {
            let child_def = self.definition(&child.type_name)?;
            widget.add_widget(self.create_recursive(child_def, child, depth + 1)?);
        }

        trace!(widget = def.type_name(), depth, children = desc.children.len(), "built widget");
        Ok(widget)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Built-in types
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_widget(&self) -> Result<Widget> {
        self.create_type(builtin::WIDGET)
    }

    pub fn create_image(&self) -> Result<Widget> {
        self.create_type(builtin::IMAGE)
    }

    pub fn create_label(&self) -> Result<Widget> {
        self.create_type(builtin::LABEL)
    }

    pub fn create_highlight_button(&self) -> Result<Widget> {
        self.create_type(builtin::HIGHLIGHT_BUTTON)
    }

    pub fn create_toggle_button(&self) -> Result<Widget> {
        self.create_type(builtin::TOGGLE_BUTTON)
    }

    pub fn create_horizontal_slider(&self) -> Result<Widget> {
        self.create_type(builtin::HORIZONTAL_SLIDER)
    }

    pub fn create_vertical_slider(&self) -> Result<Widget> {
        self.create_type(builtin::VERTICAL_SLIDER)
    }

    pub fn create_horizontal_progress_bar(&self) -> Result<Widget> {
        self.create_type(builtin::HORIZONTAL_PROGRESS_BAR)
    }

    pub fn create_vertical_progress_bar(&self) -> Result<Widget> {
        self.create_type(builtin::VERTICAL_PROGRESS_BAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::ComponentDesc;
    use trellis_core::{Colour, DrawableDesc, PropertyType, PropertyValue, StorageLocation};

    fn empty_factory() -> WidgetFactory {
        let components = ComponentFactory::with_builtins().unwrap();
        WidgetFactory::new(components, WidgetFactoryConfig::empty()).unwrap()
    }

    #[test]
    fn test_standard_registers_builtins_in_order() {
        let factory = WidgetFactory::standard().unwrap();
        assert_eq!(
            factory.registry().type_names().collect::<Vec<_>>(),
            builtin::ALL
        );
    }

    #[test]
    fn test_schema_types_links() {
        let factory = WidgetFactory::standard().unwrap();
        let schema = factory.schema(builtin::HORIZONTAL_SLIDER).unwrap();
        assert_eq!(schema.property_type("Visible"), Some(PropertyType::Bool));
        assert_eq!(schema.property_type("SliderPosition"), Some(PropertyType::Float));
        assert_eq!(schema.property_type("HandleDrawable"), Some(PropertyType::DrawableDesc));
        assert_eq!(schema.property_type("HandleSize"), Some(PropertyType::Vec2));
    }

    #[test]
    fn test_register_rejects_unknown_component_type() {
        let mut factory = empty_factory();
        let def = WidgetDef::builder("Broken")
            .component(ComponentDesc::new("Sparkle", "Sparkle"))
            .build()
            .unwrap();
        assert!(matches!(
            factory.register_definition(def),
            Err(WidgetError::UnknownComponentType(name)) if name == "Sparkle"
        ));
        assert!(!factory.registry().contains("Broken"));
    }

    #[test]
    fn test_register_rejects_link_to_missing_component_property() {
        let mut factory = empty_factory();
        let def = WidgetDef::builder("Broken")
            .component(ComponentDesc::new("Text", "Text"))
            .component_link("Font", "Text", "Font")
            .build()
            .unwrap();
        assert!(matches!(
            factory.register_definition(def),
            Err(WidgetError::UnresolvedLink { property, .. }) if property == "Font"
        ));
    }

    #[test]
    fn test_register_requires_children_first() {
        let mut factory = empty_factory();
        let def = WidgetDef::builder("Panel")
            .child(WidgetDesc::new("Card").named("Card"))
            .build()
            .unwrap();
        assert!(matches!(
            factory.register_definition(def),
            Err(WidgetError::UnknownWidgetType(name)) if name == "Card"
        ));
    }

    #[test]
    fn test_register_duplicate_type() {
        let mut factory = WidgetFactory::standard().unwrap();
        let def = WidgetDef::builder(builtin::IMAGE).build().unwrap();
        assert!(matches!(
            factory.register_definition(def),
            Err(WidgetError::DuplicateWidgetType(_))
        ));
    }

    #[test]
    fn test_component_initial_values_checked_at_registration() {
        let mut factory = empty_factory();
        let def = WidgetDef::builder("Tinted")
            .component(
                ComponentDesc::new("StandardDrawable", "bg").with_property("Colour", 1.0f32),
            )
            .build()
            .unwrap();
        assert!(matches!(
            factory.register_definition(def),
            Err(WidgetError::ComponentProperty { component, .. }) if component == "bg"
        ));
    }

    #[test]
    fn test_overrides_reach_links() {
        let factory = WidgetFactory::standard().unwrap();
        let desc = WidgetDesc::new(builtin::HORIZONTAL_SLIDER)
            .named("volume")
            .with_property("SliderPosition", 2.0f32)
            .with_property("HandleDrawable", DrawableDesc::standard(Colour::RED));
        let slider = factory.create_from_desc(&desc).unwrap();

        assert_eq!(slider.name().as_deref(), Some("volume"));
        assert_eq!(slider.get_property_as::<f32>("SliderPosition").unwrap(), 1.0);
        let handle = slider.internal_child("Handle").unwrap();
        assert_eq!(
            handle.get_property("Drawable"),
            Some(PropertyValue::DrawableDesc(DrawableDesc::standard(Colour::RED)))
        );
    }

    #[test]
    fn test_unknown_override_fails() {
        let factory = WidgetFactory::standard().unwrap();
        let desc = WidgetDesc::new(builtin::IMAGE).with_property("Text", "nope");
        assert!(matches!(
            factory.create_from_desc(&desc),
            Err(WidgetError::UnknownProperty { property, .. }) if property == "Text"
        ));
    }

    #[test]
    fn test_mistyped_override_fails() {
        let factory = WidgetFactory::standard().unwrap();
        let local = WidgetDesc::new(builtin::IMAGE).with_property("Visible", 1i32);
        assert!(matches!(
            factory.create_from_desc(&local),
            Err(WidgetError::WidgetProperty { .. })
        ));

        let linked = WidgetDesc::new(builtin::LABEL).with_property("Text", 1i32);
        assert!(matches!(
            factory.create_from_desc(&linked),
            Err(WidgetError::ComponentProperty { .. })
        ));
    }

    #[test]
    fn test_recursion_limit() {
        let factory = WidgetFactory::new(
            ComponentFactory::with_builtins().unwrap(),
            WidgetFactoryConfig::standard().with_max_depth(2),
        )
        .unwrap();
        let leaf = || WidgetDesc::new(builtin::WIDGET);
        let desc = leaf().with_child(leaf().with_child(leaf().with_child(leaf())));
        assert!(matches!(
            factory.create_from_desc(&desc),
            Err(WidgetError::RecursionLimit { max_depth: 2, .. })
        ));

        let shallow = leaf().with_child(leaf().with_child(leaf()));
        assert_eq!(factory.create_from_desc(&shallow).unwrap().count(), 3);
    }

    #[test]
    fn test_configured_definitions_need_a_provider() {
        let config = WidgetFactoryConfig::standard()
            .with_definition(ResourcePath::new(StorageLocation::Package, "ui/badge.json"));
        let components = ComponentFactory::with_builtins().unwrap();
        assert!(matches!(
            WidgetFactory::new(components, config),
            Err(WidgetError::MissingProvider { definitions: 1 })
        ));
    }

    #[test]
    fn test_clear_keeps_built_widgets() {
        let mut factory = WidgetFactory::standard().unwrap();
        let label = factory.create_label().unwrap();
        factory.clear();
        assert!(factory.registry().is_empty());
        assert!(matches!(
            factory.create_label(),
            Err(WidgetError::UnknownWidgetType(_))
        ));
        assert_eq!(label.type_name(), builtin::LABEL);
    }

    #[test]
    fn test_convenience_constructors() {
        let factory = WidgetFactory::standard().unwrap();
        let built = [
            factory.create_widget().unwrap(),
            factory.create_image().unwrap(),
            factory.create_label().unwrap(),
            factory.create_highlight_button().unwrap(),
            factory.create_toggle_button().unwrap(),
            factory.create_horizontal_slider().unwrap(),
            factory.create_vertical_slider().unwrap(),
            factory.create_horizontal_progress_bar().unwrap(),
            factory.create_vertical_progress_bar().unwrap(),
        ];
        let names: Vec<_> = built.iter().map(Widget::type_name).collect();
        assert_eq!(names, builtin::ALL);
    }
}
