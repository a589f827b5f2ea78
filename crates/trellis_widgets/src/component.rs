//! Components and the component factory
//!
//! A component is a named unit of widget behaviour (drawing, text, layout,
//! interaction state) exposing a fixed property schema. Widgets own their
//! components; definitions route widget-level properties to them through
//! component links.
//!
//! Component types are registered with a [`ComponentFactory`] under a type
//! name, together with their schema and a constructor. Statically typed
//! components implement [`ComponentType`] and register with
//! [`ComponentFactory::register_type`].

use std::any::Any;
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::debug;
use trellis_core::{PropertyDesc, PropertyError, PropertyKind, PropertyMap, PropertyValue};
use trellis_core::Result as PropertyResult;

use crate::error::{Result, WidgetError};

/// A named unit of widget behaviour with a fixed property schema
pub trait Component: Send + Sync + fmt::Debug {
    /// Instance name, unique within the owning widget
    fn name(&self) -> &str;

    /// Registered type name
    fn type_name(&self) -> &str;

    /// Declared properties, in declaration order
    fn property_descs(&self) -> Vec<PropertyDesc>;

    /// Current value of a declared property
    fn get_property(&self, name: &str) -> Option<PropertyValue>;

    /// Write a declared property
    ///
    /// Fails with `UnknownProperty` for undeclared names, `TypeMismatch` for a
    /// value of the wrong type and `InvalidValue` when the component rejects an
    /// otherwise well-typed value.
    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Check if `name` is part of this component's schema
    fn has_property(&self, name: &str) -> bool {
        self.property_descs().iter().any(|desc| desc.name == name)
    }

    /// All declared properties with their current values
    fn properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        for desc in self.property_descs() {
            if let Some(value) = self.get_property(&desc.name) {
                map.put(desc.name, value);
            }
        }
        map
    }
}

impl dyn Component {
    /// Downcast to a concrete component type
    pub fn downcast_ref<T: Component + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcast to a concrete component type, mutably
    pub fn downcast_mut<T: Component + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// A statically typed component
pub trait ComponentType: Component + Sized + 'static {
    /// The type name the component registers under
    const TYPE_NAME: &'static str;

    /// Declared properties, in declaration order
    fn schema() -> Vec<PropertyDesc>;

    /// A component holding default values for every property
    fn with_name(name: &str) -> Self;

    /// Create a component and apply `properties` in order
    fn create(name: &str, properties: &PropertyMap) -> PropertyResult<Self> {
        let mut component = Self::with_name(name);
        for (property, value) in properties.iter() {
            component.set_property(property, value.clone())?;
        }
        Ok(component)
    }
}

/// Unwrap a value of the expected Rust type, for `set_property` implementations
pub fn expect_value<T: PropertyKind>(name: &str, value: PropertyValue) -> PropertyResult<T> {
    T::from_value(&value).ok_or_else(|| PropertyError::TypeMismatch {
        name: name.to_string(),
        expected: T::TYPE.name(),
        actual: value.type_name(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Schema-backed component
// ─────────────────────────────────────────────────────────────────────────────

/// A component whose state is exactly its property map
///
/// Useful for components that only carry data for a renderer or an
/// application system to read. Every declared property starts at the default
/// value of its type.
#[derive(Clone, Debug)]
pub struct PropertyComponent {
    name: String,
    type_name: String,
    properties: PropertyMap,
}

impl PropertyComponent {
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        descs: &[PropertyDesc],
    ) -> PropertyResult<Self> {
        let mut properties = PropertyMap::new();
        for desc in descs {
            properties.insert(desc.clone(), PropertyValue::default_for(desc.ty))?;
        }
        Ok(Self {
            name: name.into(),
            type_name: type_name.into(),
            properties,
        })
    }
}

impl Component for PropertyComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property_descs(&self) -> Vec<PropertyDesc> {
        self.properties.descs().collect()
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        self.properties.set(name, value).map(|_| ())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Factory
// ─────────────────────────────────────────────────────────────────────────────

/// Constructor stored for a registered component type
///
/// Receives the instance name and the initial properties, already checked
/// against the registered schema.
pub type ComponentConstructor = Box<
    dyn Fn(&str, &PropertyMap) -> PropertyResult<Box<dyn Component>>
        + Send
        + Sync,
>;

struct Registration {
    schema: PropertyMap,
    constructor: ComponentConstructor,
}

/// Registry of component types by name
pub struct ComponentFactory {
    registrations: FxHashMap<String, Registration>,
}

impl Default for ComponentFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.type_names().collect();
        names.sort_unstable();
        f.debug_struct("ComponentFactory")
            .field("types", &names)
            .finish()
    }
}

impl ComponentFactory {
    /// Create a new empty factory
    pub fn new() -> Self {
        Self {
            registrations: FxHashMap::default(),
        }
    }

    /// Create a factory with every built-in component type registered
    pub fn with_builtins() -> Result<Self> {
        let mut factory = Self::new();
        crate::components::register_all_builtins(&mut factory)?;
        Ok(factory)
    }

    /// Register a component type with its schema and constructor
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        descs: &[PropertyDesc],
        constructor: ComponentConstructor,
    ) -> Result<()> {
        let type_name = type_name.into();
        if self.registrations.contains_key(&type_name) {
            return Err(WidgetError::DuplicateComponentType(type_name));
        }
        let schema = PropertyMap::from_descs(descs).map_err(|source| {
            WidgetError::ComponentProperty {
                component: type_name.clone(),
                source,
            }
        })?;
        debug!(component = %type_name, properties = schema.len(), "registered component type");
        self.registrations.insert(
            type_name,
            Registration {
                schema,
                constructor,
            },
        );
        Ok(())
    }

    /// Register a statically typed component
    pub fn register_type<T: ComponentType>(&mut self) -> Result<()> {
        self.register(
            T::TYPE_NAME,
            &T::schema(),
            Box::new(|name: &str, properties: &PropertyMap| {
                T::create(name, properties).map(|c| Box::new(c) as Box<dyn Component>)
            }),
        )
    }

    /// Register a [`PropertyComponent`] type with the given schema
    pub fn register_properties(&mut self, type_name: &str, descs: &[PropertyDesc]) -> Result<()> {
        let owned_name = type_name.to_string();
        let owned_descs = descs.to_vec();
        self.register(
            type_name,
            descs,
            Box::new(move |name: &str, properties: &PropertyMap| {
                let mut component = PropertyComponent::new(owned_name.as_str(), name, &owned_descs)?;
                component.properties.apply(properties)?;
                Ok(Box::new(component) as Box<dyn Component>)
            }),
        )
    }

    /// Check if a component type is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.registrations.contains_key(type_name)
    }

    /// Registered schema of a component type, with all slots unset
    pub fn schema(&self, type_name: &str) -> Option<&PropertyMap> {
        self.registrations.get(type_name).map(|r| &r.schema)
    }

    /// Get all registered type names
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.registrations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Create a component instance
    ///
    /// Every entry of `initial` must name a property of the type's schema with
    /// a value of the declared type.
    pub fn create_component(
        &self,
        type_name: &str,
        name: &str,
        initial: &PropertyMap,
    ) -> Result<Box<dyn Component>> {
        let registration = self
            .registrations
            .get(type_name)
            .ok_or_else(|| WidgetError::UnknownComponentType(type_name.to_string()))?;

        let wrap = |source| WidgetError::ComponentProperty {
            component: name.to_string(),
            source,
        };
        let properties = registration.schema.layered(initial).map_err(wrap)?;
        (registration.constructor)(name, &properties).map_err(wrap)
    }
}
