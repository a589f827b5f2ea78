//! Trellis Core
//!
//! The schema language shared by every widget and component in Trellis:
//!
//! - **Property types**: a closed set of value kinds ([`PropertyType`])
//! - **Property values**: a tagged sum type ([`PropertyValue`]) with textual and
//!   serde forms
//! - **Property maps**: ordered, type-checked storage ([`PropertyMap`])
//! - **Descriptors**: declarative drawable and layout configuration
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{PropertyDesc, PropertyMap, PropertyType, Vec2};
//!
//! let mut props = PropertyMap::from_descs(&[
//!     PropertyDesc::new(PropertyType::String, "Name"),
//!     PropertyDesc::new(PropertyType::Vec2, "RelSize"),
//! ])
//! .unwrap();
//!
//! props.set("Name", "panel").unwrap();
//! props.set_text("RelSize", "0.5 1.0").unwrap();
//!
//! assert_eq!(props.get_as::<Vec2>("RelSize").unwrap(), Vec2::new(0.5, 1.0));
//! assert!(props.set("RelSize", 3i32).is_err());
//! ```

mod descriptor;
mod error;
mod map;
mod math;
mod property;
mod types;
mod value;

pub use descriptor::{
    CellOrder, DrawableDesc, DrawableSource, LayoutDesc, LayoutSpacing, PatchDirection,
    ResourcePath,
};
pub use error::{PropertyError, Result};
pub use map::PropertyMap;
pub use math::{Colour, Vec2, Vec3, Vec4};
pub use property::{PropertyDesc, PropertyType};
pub use types::{
    AlignmentAnchor, HorizontalTextJustification, SizePolicy, StorageLocation,
    VerticalTextJustification,
};
pub use value::{PropertyKind, PropertyValue};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PropertyError, Result};
    pub use crate::map::PropertyMap;
    pub use crate::math::{Colour, Vec2, Vec3, Vec4};
    pub use crate::property::{PropertyDesc, PropertyType};
    pub use crate::value::{PropertyKind, PropertyValue};
}
