//! Type-tagged property values
//!
//! [`PropertyValue`] is the sum type every stored property carries. Its variant
//! is its [`PropertyType`]; there is no untyped storage anywhere in the system.
//!
//! Serialization uses an adjacent tag so authored resources read as
//! `{"type": "Colour", "value": [1.0, 1.0, 1.0, 1.0]}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::{DrawableDesc, LayoutDesc};
use crate::error::{PropertyError, Result};
use crate::math::{Colour, Vec2, Vec3, Vec4};
use crate::property::PropertyType;
use crate::types::{
    AlignmentAnchor, HorizontalTextJustification, SizePolicy, StorageLocation,
    VerticalTextJustification,
};

/// A property value tagged with its type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Colour(Colour),
    AlignmentAnchor(AlignmentAnchor),
    SizePolicy(SizePolicy),
    StorageLocation(StorageLocation),
    HorizontalTextJustification(HorizontalTextJustification),
    VerticalTextJustification(VerticalTextJustification),
    DrawableDesc(DrawableDesc),
    LayoutDesc(LayoutDesc),
}

impl PropertyValue {
    /// The type tag of this value
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Vec2(_) => PropertyType::Vec2,
            PropertyValue::Vec3(_) => PropertyType::Vec3,
            PropertyValue::Vec4(_) => PropertyType::Vec4,
            PropertyValue::Colour(_) => PropertyType::Colour,
            PropertyValue::AlignmentAnchor(_) => PropertyType::AlignmentAnchor,
            PropertyValue::SizePolicy(_) => PropertyType::SizePolicy,
            PropertyValue::StorageLocation(_) => PropertyType::StorageLocation,
            PropertyValue::HorizontalTextJustification(_) => {
                PropertyType::HorizontalTextJustification
            }
            PropertyValue::VerticalTextJustification(_) => PropertyType::VerticalTextJustification,
            PropertyValue::DrawableDesc(_) => PropertyType::DrawableDesc,
            PropertyValue::LayoutDesc(_) => PropertyType::LayoutDesc,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        self.property_type().name()
    }

    /// The value a freshly declared property of type `ty` holds
    pub fn default_for(ty: PropertyType) -> Self {
        match ty {
            PropertyType::Bool => PropertyValue::Bool(false),
            PropertyType::Int => PropertyValue::Int(0),
            PropertyType::Float => PropertyValue::Float(0.0),
            PropertyType::String => PropertyValue::String(String::new()),
            PropertyType::Vec2 => PropertyValue::Vec2(Vec2::ZERO),
            PropertyType::Vec3 => PropertyValue::Vec3(Vec3::ZERO),
            PropertyType::Vec4 => PropertyValue::Vec4(Vec4::ZERO),
            PropertyType::Colour => PropertyValue::Colour(Colour::WHITE),
            PropertyType::AlignmentAnchor => {
                PropertyValue::AlignmentAnchor(AlignmentAnchor::default())
            }
            PropertyType::SizePolicy => PropertyValue::SizePolicy(SizePolicy::default()),
            PropertyType::StorageLocation => {
                PropertyValue::StorageLocation(StorageLocation::default())
            }
            PropertyType::HorizontalTextJustification => {
                PropertyValue::HorizontalTextJustification(Default::default())
            }
            PropertyType::VerticalTextJustification => {
                PropertyValue::VerticalTextJustification(Default::default())
            }
            PropertyType::DrawableDesc => PropertyValue::DrawableDesc(DrawableDesc::default()),
            PropertyType::LayoutDesc => PropertyValue::LayoutDesc(LayoutDesc::default()),
        }
    }

    /// Parse the textual form of a value of type `ty`
    ///
    /// Vectors are whitespace or comma separated components, colours are
    /// `r g b [a]` or a colour name, enumerations use their variant names and
    /// descriptors are JSON objects.
    pub fn parse(ty: PropertyType, text: &str) -> Result<Self> {
        let fail = || PropertyError::Parse {
            expected: ty.name(),
            text: text.to_string(),
        };

        let value = match ty {
            PropertyType::Bool => match text.trim().to_ascii_lowercase().as_str() {
                "true" => PropertyValue::Bool(true),
                "false" => PropertyValue::Bool(false),
                _ => return Err(fail()),
            },
            PropertyType::Int => PropertyValue::Int(text.trim().parse().map_err(|_| fail())?),
            PropertyType::Float => {
                PropertyValue::Float(text.trim().parse().map_err(|_| fail())?)
            }
            PropertyType::String => PropertyValue::String(text.to_string()),
            PropertyType::Vec2 => {
                PropertyValue::Vec2(parse_components::<2>(text).ok_or_else(fail)?.into())
            }
            PropertyType::Vec3 => {
                PropertyValue::Vec3(parse_components::<3>(text).ok_or_else(fail)?.into())
            }
            PropertyType::Vec4 => {
                PropertyValue::Vec4(parse_components::<4>(text).ok_or_else(fail)?.into())
            }
            PropertyType::Colour => PropertyValue::Colour(parse_colour(text).ok_or_else(fail)?),
            PropertyType::AlignmentAnchor => PropertyValue::AlignmentAnchor(text.parse()?),
            PropertyType::SizePolicy => PropertyValue::SizePolicy(text.parse()?),
            PropertyType::StorageLocation => PropertyValue::StorageLocation(text.parse()?),
            PropertyType::HorizontalTextJustification => {
                PropertyValue::HorizontalTextJustification(text.parse()?)
            }
            PropertyType::VerticalTextJustification => {
                PropertyValue::VerticalTextJustification(text.parse()?)
            }
            PropertyType::DrawableDesc => {
                PropertyValue::DrawableDesc(serde_json::from_str(text).map_err(|_| fail())?)
            }
            PropertyType::LayoutDesc => {
                PropertyValue::LayoutDesc(serde_json::from_str(text).map_err(|_| fail())?)
            }
        };
        Ok(value)
    }

    /// Extract a typed value, if this value has that type
    pub fn get<T: PropertyKind>(&self) -> Option<T> {
        T::from_value(self)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_colour(&self) -> Option<Colour> {
        match self {
            PropertyValue::Colour(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_drawable(&self) -> Option<&DrawableDesc> {
        match self {
            PropertyValue::DrawableDesc(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_layout(&self) -> Option<&LayoutDesc> {
        match self {
            PropertyValue::LayoutDesc(v) => Some(v),
            _ => None,
        }
    }
}

fn parse_components<const N: usize>(text: &str) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    let mut parts = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    for slot in out.iter_mut() {
        *slot = parts.next()?.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

fn parse_colour(text: &str) -> Option<Colour> {
    if let Some(named) = Colour::from_name(text.trim()) {
        return Some(named);
    }
    if let Some([r, g, b, a]) = parse_components::<4>(text) {
        return Some(Colour::rgba(r, g, b, a));
    }
    parse_components::<3>(text).map(|[r, g, b]| Colour::rgb(r, g, b))
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::String(v) => f.write_str(v),
            PropertyValue::Vec2(v) => write!(f, "{} {}", v.x, v.y),
            PropertyValue::Vec3(v) => write!(f, "{} {} {}", v.x, v.y, v.z),
            PropertyValue::Vec4(v) => write!(f, "{} {} {} {}", v.x, v.y, v.z, v.w),
            PropertyValue::Colour(c) => write!(f, "{} {} {} {}", c.r, c.g, c.b, c.a),
            PropertyValue::AlignmentAnchor(v) => write!(f, "{}", v),
            PropertyValue::SizePolicy(v) => write!(f, "{}", v),
            PropertyValue::StorageLocation(v) => write!(f, "{}", v),
            PropertyValue::HorizontalTextJustification(v) => write!(f, "{}", v),
            PropertyValue::VerticalTextJustification(v) => write!(f, "{}", v),
            PropertyValue::DrawableDesc(v) => {
                f.write_str(&serde_json::to_string(v).map_err(|_| fmt::Error)?)
            }
            PropertyValue::LayoutDesc(v) => {
                f.write_str(&serde_json::to_string(v).map_err(|_| fmt::Error)?)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed access
// ─────────────────────────────────────────────────────────────────────────────

/// Rust types that map one-to-one onto a [`PropertyType`]
pub trait PropertyKind: Sized + Clone + 'static {
    /// The property type this Rust type is stored as
    const TYPE: PropertyType;

    /// Extract from a value of the matching type
    fn from_value(value: &PropertyValue) -> Option<Self>;

    /// Wrap into a tagged value
    fn into_value(self) -> PropertyValue;
}

macro_rules! property_kind {
    ($($rust:ty => $variant:ident),+ $(,)?) => {
        $(
            impl PropertyKind for $rust {
                const TYPE: PropertyType = PropertyType::$variant;

                fn from_value(value: &PropertyValue) -> Option<Self> {
                    match value {
                        PropertyValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }

                fn into_value(self) -> PropertyValue {
                    PropertyValue::$variant(self)
                }
            }

            impl From<$rust> for PropertyValue {
                fn from(v: $rust) -> Self {
                    PropertyValue::$variant(v)
                }
            }
        )+
    };
}

property_kind! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    String => String,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Colour => Colour,
    AlignmentAnchor => AlignmentAnchor,
    SizePolicy => SizePolicy,
    StorageLocation => StorageLocation,
    HorizontalTextJustification => HorizontalTextJustification,
    VerticalTextJustification => VerticalTextJustification,
    DrawableDesc => DrawableDesc,
    LayoutDesc => LayoutDesc,
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(
            PropertyValue::parse(PropertyType::Bool, "True"),
            Ok(PropertyValue::Bool(true))
        );
        assert_eq!(
            PropertyValue::parse(PropertyType::Int, " -12 "),
            Ok(PropertyValue::Int(-12))
        );
        assert_eq!(
            PropertyValue::parse(PropertyType::Float, "0.5"),
            Ok(PropertyValue::Float(0.5))
        );
        assert!(PropertyValue::parse(PropertyType::Int, "1.5").is_err());
        assert!(PropertyValue::parse(PropertyType::Bool, "yes").is_err());
    }

    #[test]
    fn test_parse_vectors() {
        assert_eq!(
            PropertyValue::parse(PropertyType::Vec2, "1 2"),
            Ok(PropertyValue::Vec2(Vec2::new(1.0, 2.0)))
        );
        assert_eq!(
            PropertyValue::parse(PropertyType::Vec3, "1, 2, 3"),
            Ok(PropertyValue::Vec3(Vec3::new(1.0, 2.0, 3.0)))
        );
        assert!(PropertyValue::parse(PropertyType::Vec2, "1 2 3").is_err());
        assert!(PropertyValue::parse(PropertyType::Vec4, "1 2 3").is_err());
    }

    #[test]
    fn test_parse_colours() {
        assert_eq!(
            PropertyValue::parse(PropertyType::Colour, "white"),
            Ok(PropertyValue::Colour(Colour::WHITE))
        );
        assert_eq!(
            PropertyValue::parse(PropertyType::Colour, "1 0 0"),
            Ok(PropertyValue::Colour(Colour::RED))
        );
        assert_eq!(
            PropertyValue::parse(PropertyType::Colour, "0 0 0 0"),
            Ok(PropertyValue::Colour(Colour::TRANSPARENT))
        );
    }

    #[test]
    fn test_parse_enums_and_descriptors() {
        assert_eq!(
            PropertyValue::parse(PropertyType::AlignmentAnchor, "TopLeft"),
            Ok(PropertyValue::AlignmentAnchor(AlignmentAnchor::TopLeft))
        );

        let layout = PropertyValue::parse(
            PropertyType::LayoutDesc,
            r#"{"type": "HorizontalList", "cells": 3}"#,
        )
        .unwrap();
        assert_eq!(layout.as_layout().map(|l| l.cell_count()), Some(3));

        assert!(matches!(
            PropertyValue::parse(PropertyType::DrawableDesc, "not json"),
            Err(PropertyError::Parse { expected: "DrawableDesc", .. })
        ));
    }

    #[test]
    fn test_display_parses_back() {
        let values = [
            PropertyValue::Bool(true),
            PropertyValue::Int(7),
            PropertyValue::Float(2.25),
            PropertyValue::Vec2(Vec2::new(0.5, 1.0)),
            PropertyValue::Colour(Colour::rgba(0.25, 0.5, 0.75, 1.0)),
            PropertyValue::SizePolicy(SizePolicy::FitMaintainingAspect),
            PropertyValue::DrawableDesc(DrawableDesc::standard(Colour::RED)),
        ];
        for value in values {
            let text = value.to_string();
            assert_eq!(PropertyValue::parse(value.property_type(), &text), Ok(value));
        }
    }

    #[test]
    fn test_typed_access() {
        let value = PropertyValue::from(Colour::BLUE);
        assert_eq!(value.get::<Colour>(), Some(Colour::BLUE));
        assert_eq!(value.get::<f32>(), None);
        assert_eq!(<Colour as PropertyKind>::TYPE, PropertyType::Colour);
    }

    #[test]
    fn test_serialization_is_tagged() {
        let value = PropertyValue::Vec2(Vec2::new(1.0, 2.0));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"type":"Vec2","value":[1.0,2.0]}"#);

        let restored: PropertyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn test_default_matches_type() {
        for ty in PropertyType::ALL {
            assert_eq!(PropertyValue::default_for(*ty).property_type(), *ty);
        }
    }
}
