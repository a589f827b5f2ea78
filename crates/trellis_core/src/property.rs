//! Property types and declarations
//!
//! [`PropertyType`] is the closed set of value kinds a widget or component can
//! expose. A [`PropertyDesc`] pairs a type with a name and is the unit of every
//! schema in the system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PropertyError;

/// The supported property value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Bool,
    Int,
    Float,
    String,
    Vec2,
    Vec3,
    Vec4,
    Colour,
    AlignmentAnchor,
    SizePolicy,
    StorageLocation,
    HorizontalTextJustification,
    VerticalTextJustification,
    DrawableDesc,
    LayoutDesc,
}

impl PropertyType {
    /// Every property type, in declaration order
    pub const ALL: &'static [PropertyType] = &[
        PropertyType::Bool,
        PropertyType::Int,
        PropertyType::Float,
        PropertyType::String,
        PropertyType::Vec2,
        PropertyType::Vec3,
        PropertyType::Vec4,
        PropertyType::Colour,
        PropertyType::AlignmentAnchor,
        PropertyType::SizePolicy,
        PropertyType::StorageLocation,
        PropertyType::HorizontalTextJustification,
        PropertyType::VerticalTextJustification,
        PropertyType::DrawableDesc,
        PropertyType::LayoutDesc,
    ];

    /// Canonical name, as written in resources
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Bool => "Bool",
            PropertyType::Int => "Int",
            PropertyType::Float => "Float",
            PropertyType::String => "String",
            PropertyType::Vec2 => "Vec2",
            PropertyType::Vec3 => "Vec3",
            PropertyType::Vec4 => "Vec4",
            PropertyType::Colour => "Colour",
            PropertyType::AlignmentAnchor => "AlignmentAnchor",
            PropertyType::SizePolicy => "SizePolicy",
            PropertyType::StorageLocation => "StorageLocation",
            PropertyType::HorizontalTextJustification => "HorizontalTextJustification",
            PropertyType::VerticalTextJustification => "VerticalTextJustification",
            PropertyType::DrawableDesc => "DrawableDesc",
            PropertyType::LayoutDesc => "LayoutDesc",
        }
    }

    /// Returns true for the two composite descriptor kinds
    pub fn is_descriptor(&self) -> bool {
        matches!(self, PropertyType::DrawableDesc | PropertyType::LayoutDesc)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyType {
    type Err = PropertyError;

    /// Parse a canonical type name (case-insensitive, `Color` accepted).
    ///
    /// Unrecognised names are an error; there is no fallback type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("color") {
            return Ok(PropertyType::Colour);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PropertyError::UnknownType(s.to_string()))
    }
}

/// Declaration of one schema slot: a name and its fixed type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDesc {
    #[serde(rename = "type")]
    pub ty: PropertyType,
    pub name: String,
}

impl PropertyDesc {
    pub fn new(ty: PropertyType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_type() {
        assert_eq!("Int".parse::<PropertyType>(), Ok(PropertyType::Int));
        assert_eq!("vec2".parse::<PropertyType>(), Ok(PropertyType::Vec2));
        assert_eq!("Color".parse::<PropertyType>(), Ok(PropertyType::Colour));
        assert_eq!(
            "DrawableDesc".parse::<PropertyType>(),
            Ok(PropertyType::DrawableDesc)
        );
    }

    #[test]
    fn test_parse_unknown_property_type() {
        assert_eq!(
            "Quaternion".parse::<PropertyType>(),
            Err(PropertyError::UnknownType("Quaternion".to_string()))
        );
        assert!("".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for ty in PropertyType::ALL {
            assert_eq!(ty.name().parse::<PropertyType>(), Ok(*ty));
        }
    }
}
