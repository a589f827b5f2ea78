//! Widget error types

use thiserror::Error;
use trellis_core::{PropertyError, ResourcePath};

/// Errors raised while registering definitions or building widgets
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Property schema error outside any widget or component context
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// Property rejected while initialising a component
    #[error("Invalid property for component '{component}': {source}")]
    ComponentProperty {
        component: String,
        #[source]
        source: PropertyError,
    },

    /// Property rejected while building a widget
    #[error("Invalid property for widget '{widget}': {source}")]
    WidgetProperty {
        widget: String,
        #[source]
        source: PropertyError,
    },

    /// Description override naming neither a default nor a link
    #[error("Widget '{widget}' has no property named '{property}'")]
    UnknownProperty { widget: String, property: String },

    /// Component type missing from the component factory
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    /// Component type registered twice
    #[error("Component type already registered: {0}")]
    DuplicateComponentType(String),

    /// Two components of one definition share an instance name
    #[error("Widget '{widget}' declares component '{component}' more than once")]
    DuplicateComponentName { widget: String, component: String },

    /// Two internal children of one definition share a name
    #[error("Widget '{widget}' declares internal child '{child}' more than once")]
    DuplicateChildName { widget: String, child: String },

    /// Widget type missing from the definition registry
    #[error("Unknown widget type: {0}")]
    UnknownWidgetType(String),

    /// Widget type registered twice
    #[error("Widget type already registered: {0}")]
    DuplicateWidgetType(String),

    /// Property name claimed by more than one of defaults, component links
    /// and child links
    #[error("Property '{property}' of widget '{widget}' is declared more than once")]
    AmbiguousLink { widget: String, property: String },

    /// Link whose target component, child or property does not exist
    #[error("Link '{property}' of widget '{widget}' cannot be resolved: {reason}")]
    UnresolvedLink {
        widget: String,
        property: String,
        reason: String,
    },

    /// Construction nested deeper than the configured limit
    #[error("Widget tree deeper than {max_depth} levels while building '{widget}'")]
    RecursionLimit { widget: String, max_depth: usize },

    /// Config lists definition resources but no provider was given to read them
    #[error("{definitions} configured definition resource(s) need a resource provider")]
    MissingProvider { definitions: usize },

    /// Failed to read or parse a resource
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Errors raised by resource providers and loaders
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No resource at the given path
    #[error("Resource not found: {0}")]
    NotFound(ResourcePath),

    /// Failed to read the resource
    #[error("Failed to read {path}: {source}")]
    Io {
        path: ResourcePath,
        #[source]
        source: std::io::Error,
    },

    /// Resource contents are not valid JSON for the expected type
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: ResourcePath,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
