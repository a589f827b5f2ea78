//! Ordered, schema-checked property storage
//!
//! A [`PropertyMap`] holds declared slots in declaration order. Every slot has
//! a fixed [`PropertyType`] and an optional value; writes whose type does not
//! match the slot are rejected, never coerced.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PropertyError, Result};
use crate::property::{PropertyDesc, PropertyType};
use crate::value::{PropertyKind, PropertyValue};

#[derive(Clone, Debug, PartialEq)]
struct Slot {
    ty: PropertyType,
    value: Option<PropertyValue>,
}

/// Ordered mapping from property name to a type-tagged value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    slots: IndexMap<String, Slot>,
}

impl PropertyMap {
    /// Create an empty map with no declared slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one unset slot per desc
    pub fn from_descs<'a>(descs: impl IntoIterator<Item = &'a PropertyDesc>) -> Result<Self> {
        let mut map = Self::new();
        for desc in descs {
            map.declare(desc.clone())?;
        }
        Ok(map)
    }

    /// Declare a slot without a value
    pub fn declare(&mut self, desc: PropertyDesc) -> Result<()> {
        if self.slots.contains_key(&desc.name) {
            return Err(PropertyError::DuplicateProperty(desc.name));
        }
        self.slots.insert(
            desc.name,
            Slot {
                ty: desc.ty,
                value: None,
            },
        );
        Ok(())
    }

    /// Declare a slot and give it a value in one step
    ///
    /// The value must have the desc's type and the name must not already be
    /// declared.
    pub fn insert(&mut self, desc: PropertyDesc, value: PropertyValue) -> Result<()> {
        check_type(&desc.name, desc.ty, &value)?;
        let name = desc.name.clone();
        self.declare(desc)?;
        if let Some(slot) = self.slots.get_mut(&name) {
            slot.value = Some(value);
        }
        Ok(())
    }

    /// Declare `name` with the value's own type and set it, replacing any
    /// previous declaration of that name
    ///
    /// Used for override maps, which carry no schema of their own; they are
    /// checked when applied to the schema they target.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let value = value.into();
        self.slots.insert(
            name.into(),
            Slot {
                ty: value.property_type(),
                value: Some(value),
            },
        );
    }

    /// Builder form of [`put`](Self::put)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.put(name, value);
        self
    }

    /// [`put`](Self::put) every set value of `other`
    pub fn merge(&mut self, other: &PropertyMap) {
        for (name, value) in other.iter() {
            self.put(name, value.clone());
        }
    }

    /// Set the value of a declared slot
    ///
    /// Returns the previous value, if any.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<Option<PropertyValue>> {
        let value = value.into();
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        check_type(name, slot.ty, &value)?;
        Ok(slot.value.replace(value))
    }

    /// Parse `text` according to the slot's declared type and set it
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<()> {
        let ty = self
            .property_type(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        self.set(name, PropertyValue::parse(ty, text)?)?;
        Ok(())
    }

    /// Clear a slot's value, keeping the declaration
    pub fn unset(&mut self, name: &str) -> Option<PropertyValue> {
        self.slots.get_mut(name).and_then(|slot| slot.value.take())
    }

    /// Get the value of a slot, if declared and set
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.slots.get(name).and_then(|slot| slot.value.as_ref())
    }

    /// Get a typed value
    ///
    /// Fails if the slot is undeclared or unset, or declared with another type.
    pub fn get_as<T: PropertyKind>(&self, name: &str) -> Result<T> {
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        if slot.ty != T::TYPE {
            return Err(PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: slot.ty.name(),
                actual: T::TYPE.name(),
            });
        }
        slot.value
            .as_ref()
            .and_then(T::from_value)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))
    }

    /// Declared type of a slot
    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.slots.get(name).map(|slot| slot.ty)
    }

    /// Check if a slot is declared
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Check if a slot is declared and holds a value
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of declared slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Declared slots as descs, in declaration order
    pub fn descs(&self) -> impl Iterator<Item = PropertyDesc> + '_ {
        self.slots
            .iter()
            .map(|(name, slot)| PropertyDesc::new(slot.ty, name.clone()))
    }

    /// Declared names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Set values, in declaration order (unset slots are skipped)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.slots
            .iter()
            .filter_map(|(name, slot)| slot.value.as_ref().map(|v| (name.as_str(), v)))
    }

    /// Write every set value of `overrides` into this map
    ///
    /// Each override must name a slot declared here with the same type. On
    /// error this map is left unchanged.
    pub fn apply(&mut self, overrides: &PropertyMap) -> Result<()> {
        for (name, value) in overrides.iter() {
            let ty = self
                .property_type(name)
                .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
            check_type(name, ty, value)?;
        }
        for (name, value) in overrides.iter() {
            self.set(name, value.clone())?;
        }
        Ok(())
    }

    /// A copy of this map with `overrides` applied
    pub fn layered(&self, overrides: &PropertyMap) -> Result<Self> {
        let mut map = self.clone();
        map.apply(overrides)?;
        Ok(map)
    }
}

fn check_type(name: &str, ty: PropertyType, value: &PropertyValue) -> Result<()> {
    if value.property_type() == ty {
        Ok(())
    } else {
        Err(PropertyError::TypeMismatch {
            name: name.to_string(),
            expected: ty.name(),
            actual: value.type_name(),
        })
    }
}

// Serialized as an ordered object of name -> tagged value. Only set slots are
// written; on read every entry declares a slot of its value's type.

impl Serialize for PropertyMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = IndexMap::<String, PropertyValue>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .fold(PropertyMap::new(), |map, (name, value)| map.with(name, value)))
    }
}

impl<N: Into<String>, V: Into<PropertyValue>> FromIterator<(N, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PropertyMap::new(), |map, (name, value)| map.with(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Colour, Vec2};

    fn schema() -> PropertyMap {
        PropertyMap::from_descs(&[
            PropertyDesc::new(PropertyType::String, "Name"),
            PropertyDesc::new(PropertyType::Vec2, "RelSize"),
            PropertyDesc::new(PropertyType::Colour, "Colour"),
        ])
        .unwrap()
    }

    #[test]
    fn test_declared_slots_start_unset() {
        let map = schema();
        assert_eq!(map.len(), 3);
        assert!(map.contains("Name"));
        assert!(!map.is_set("Name"));
        assert_eq!(map.iter().count(), 0);
        assert_eq!(map.property_type("RelSize"), Some(PropertyType::Vec2));
    }

    #[test]
    fn test_set_checks_type() {
        let mut map = schema();
        map.set("Name", "root").unwrap();
        assert_eq!(map.get_as::<String>("Name").unwrap(), "root");

        let err = map.set("RelSize", 1.0f32).unwrap_err();
        assert_eq!(
            err,
            PropertyError::TypeMismatch {
                name: "RelSize".into(),
                expected: "Vec2",
                actual: "Float",
            }
        );
        assert!(!map.is_set("RelSize"));
    }

    #[test]
    fn test_set_unknown_property() {
        let mut map = schema();
        assert_eq!(
            map.set("Opacity", 1.0f32),
            Err(PropertyError::UnknownProperty("Opacity".into()))
        );
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut map = schema();
        assert_eq!(
            map.declare(PropertyDesc::new(PropertyType::Int, "Name")),
            Err(PropertyError::DuplicateProperty("Name".into()))
        );
        assert!(map
            .insert(PropertyDesc::new(PropertyType::Int, "Count"), 1.0f32.into())
            .is_err());
        assert!(!map.contains("Count"));
    }

    #[test]
    fn test_set_text_uses_declared_type() {
        let mut map = schema();
        map.set_text("RelSize", "0.5 0.25").unwrap();
        map.set_text("Colour", "red").unwrap();
        assert_eq!(map.get_as::<Vec2>("RelSize").unwrap(), Vec2::new(0.5, 0.25));
        assert_eq!(map.get_as::<Colour>("Colour").unwrap(), Colour::RED);
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut map = schema();
        map.set("Name", "before").unwrap();

        let bad = PropertyMap::new()
            .with("Name", "after")
            .with("Colour", 3i32);
        assert!(map.apply(&bad).is_err());
        assert_eq!(map.get_as::<String>("Name").unwrap(), "before");

        let good = PropertyMap::new().with("Name", "after");
        map.apply(&good).unwrap();
        assert_eq!(map.get_as::<String>("Name").unwrap(), "after");
    }

    #[test]
    fn test_merge_replaces_declarations() {
        let mut base = PropertyMap::new().with("Text", "a").with("Scale", 1.0f32);
        base.merge(&PropertyMap::new().with("Scale", 2i32).with("Extra", true));
        assert_eq!(base.property_type("Scale"), Some(PropertyType::Int));
        assert_eq!(base.get("Scale"), Some(&PropertyValue::Int(2)));
        assert_eq!(base.names().collect::<Vec<_>>(), vec!["Text", "Scale", "Extra"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let map: PropertyMap = [("b", 1i32), ("a", 2i32), ("c", 3i32)].into_iter().collect();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_serialization() {
        let map = PropertyMap::new()
            .with("Name", "label")
            .with("Visible", true);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"Name":{"type":"String","value":"label"},"Visible":{"type":"Bool","value":true}}"#
        );

        let restored: PropertyMap = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, map);
    }
}
