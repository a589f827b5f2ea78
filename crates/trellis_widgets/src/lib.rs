//! Trellis Widgets
//!
//! Declarative widget composition on top of the `trellis_core` property
//! schema:
//!
//! - **Components**: named units of behaviour with a fixed property schema,
//!   created by type name through a [`ComponentFactory`]
//! - **Definitions**: reusable widget blueprints ([`WidgetDef`]) with default
//!   properties, components, internal children and property links
//! - **Descriptions and templates**: per-instance overrides and external
//!   children ([`WidgetDesc`], [`WidgetTemplate`])
//! - **Factory**: a registry of definitions and the recursive builder that
//!   turns them into [`Widget`] trees
//!
//! # Example
//!
//! ```rust
//! use trellis_widgets::prelude::*;
//!
//! let factory = WidgetFactory::standard().unwrap();
//!
//! let desc = WidgetDesc::new("Widget")
//!     .named("menu")
//!     .with_child(WidgetDesc::new("Label").with_property("Text", "Play"))
//!     .with_child(WidgetDesc::new("Label").with_property("Text", "Quit"));
//!
//! let menu = factory.create_from_desc(&desc).unwrap();
//! assert_eq!(menu.children().len(), 2);
//! assert_eq!(
//!     menu.children()[1].get_property_as::<String>("Text").unwrap(),
//!     "Quit"
//! );
//! ```

pub mod builtin;
mod component;
pub mod components;
mod config;
mod def;
mod desc;
mod error;
mod factory;
mod registry;
mod resource;
mod template;
mod widget;

pub use component::{
    expect_value, Component, ComponentConstructor, ComponentFactory, ComponentType,
    PropertyComponent,
};
pub use config::WidgetFactoryConfig;
pub use def::{ChildLink, ComponentDesc, ComponentLink, WidgetDef, WidgetDefBuilder};
pub use desc::{WidgetDesc, NAME_PROPERTY};
pub use error::{ResourceError, Result, WidgetError};
pub use factory::WidgetFactory;
pub use registry::WidgetDefRegistry;
pub use resource::{
    load_widget_def, load_widget_template, FileProvider, MemoryProvider, ResourceProvider,
};
pub use template::WidgetTemplate;
pub use widget::{ComponentSnapshot, PropertyLink, Widget, WidgetSnapshot};

pub use trellis_core;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::component::{Component, ComponentFactory, ComponentType};
    pub use crate::config::WidgetFactoryConfig;
    pub use crate::def::{ComponentDesc, WidgetDef};
    pub use crate::desc::WidgetDesc;
    pub use crate::error::{Result, WidgetError};
    pub use crate::factory::WidgetFactory;
    pub use crate::template::WidgetTemplate;
    pub use crate::widget::Widget;
    pub use trellis_core::prelude::*;
}
