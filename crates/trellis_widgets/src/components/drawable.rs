//! Drawable components

use std::any::Any;

use trellis_core::{
    Colour, DrawableDesc, DrawableSource, PropertyDesc, PropertyError, PropertyType,
    PropertyValue, ResourcePath, StorageLocation, Vec4,
};
use trellis_core::Result as PropertyResult;

use crate::component::{expect_value, Component, ComponentType};

const TEXTURE: &str = "Texture";
const TEXTURE_LOCATION: &str = "TextureLocation";
const UVS: &str = "UVs";
const COLOUR: &str = "Colour";

/// A single texture (or plain colour) stretched over the widget
///
/// An empty texture path means the widget is drawn as a solid colour.
#[derive(Clone, Debug)]
pub struct StandardDrawableComponent {
    name: String,
    texture: String,
    texture_location: StorageLocation,
    uvs: Vec4,
    colour: Colour,
}

impl StandardDrawableComponent {
    pub fn texture(&self) -> Option<ResourcePath> {
        if self.texture.is_empty() {
            None
        } else {
            Some(ResourcePath::new(self.texture_location, self.texture.clone()))
        }
    }

    pub fn uvs(&self) -> Vec4 {
        self.uvs
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// The equivalent drawable descriptor
    pub fn to_desc(&self) -> DrawableDesc {
        DrawableDesc::Standard {
            source: DrawableSource {
                texture: self.texture(),
                uvs: self.uvs,
                colour: self.colour,
                ..Default::default()
            },
        }
    }
}

impl ComponentType for StandardDrawableComponent {
    const TYPE_NAME: &'static str = "StandardDrawable";

    fn schema() -> Vec<PropertyDesc> {
        vec![
            PropertyDesc::new(PropertyType::String, TEXTURE),
            PropertyDesc::new(PropertyType::StorageLocation, TEXTURE_LOCATION),
            PropertyDesc::new(PropertyType::Vec4, UVS),
            PropertyDesc::new(PropertyType::Colour, COLOUR),
        ]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            texture: String::new(),
            texture_location: StorageLocation::default(),
            uvs: Vec4::new(0.0, 0.0, 1.0, 1.0),
            colour: Colour::WHITE,
        }
    }
}

impl Component for StandardDrawableComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn property_descs(&self) -> Vec<PropertyDesc> {
        Self::schema()
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            TEXTURE => Some(self.texture.clone().into()),
            TEXTURE_LOCATION => Some(self.texture_location.into()),
            UVS => Some(self.uvs.into()),
            COLOUR => Some(self.colour.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        match name {
            TEXTURE => self.texture = expect_value(name, value)?,
            TEXTURE_LOCATION => self.texture_location = expect_value(name, value)?,
            UVS => self.uvs = expect_value(name, value)?,
            COLOUR => self.colour = expect_value(name, value)?,
            _ => return Err(PropertyError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

const DRAWABLE: &str = "Drawable";

/// A component configured by a full [`DrawableDesc`]
///
/// Patch insets are validated on every write.
#[derive(Clone, Debug)]
pub struct DrawableComponent {
    name: String,
    drawable: DrawableDesc,
}

impl DrawableComponent {
    pub fn drawable(&self) -> &DrawableDesc {
        &self.drawable
    }

    pub fn set_drawable(&mut self, drawable: DrawableDesc) -> PropertyResult<()> {
        drawable.validate(DRAWABLE)?;
        self.drawable = drawable;
        Ok(())
    }
}

impl ComponentType for DrawableComponent {
    const TYPE_NAME: &'static str = "Drawable";

    fn schema() -> Vec<PropertyDesc> {
        vec![PropertyDesc::new(PropertyType::DrawableDesc, DRAWABLE)]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            drawable: DrawableDesc::default(),
        }
    }
}

impl Component for DrawableComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn property_descs(&self) -> Vec<PropertyDesc> {
        Self::schema()
    }

    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        (name == DRAWABLE).then(|| self.drawable.clone().into())
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        if name != DRAWABLE {
            return Err(PropertyError::UnknownProperty(name.to_string()));
        }
        self.set_drawable(expect_value(name, value)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{PropertyMap, Vec2};

    #[test]
    fn test_standard_drawable_defaults() {
        let drawable = StandardDrawableComponent::with_name("bg");
        assert_eq!(drawable.colour(), Colour::WHITE);
        assert_eq!(drawable.uvs(), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert!(drawable.texture().is_none());
        assert_eq!(drawable.to_desc(), DrawableDesc::standard(Colour::WHITE));
    }

    #[test]
    fn test_standard_drawable_texture() {
        let props = PropertyMap::new()
            .with(TEXTURE, "ui/button.png")
            .with(TEXTURE_LOCATION, StorageLocation::Engine);
        let drawable = StandardDrawableComponent::create("bg", &props).unwrap();
        assert_eq!(
            drawable.texture(),
            Some(ResourcePath::new(StorageLocation::Engine, "ui/button.png"))
        );
    }

    #[test]
    fn test_standard_drawable_rejects_wrong_type() {
        let mut drawable = StandardDrawableComponent::with_name("bg");
        let err = drawable
            .set_property(COLOUR, PropertyValue::Float(1.0))
            .unwrap_err();
        assert!(matches!(err, PropertyError::TypeMismatch { expected: "Colour", .. }));
        assert_eq!(drawable.colour(), Colour::WHITE);
    }

    #[test]
    fn test_drawable_validates_insets() {
        let mut drawable = DrawableComponent::with_name("bg");
        let bad = DrawableDesc::ThreePatch {
            source: DrawableSource::default(),
            direction: Default::default(),
            insets: Vec2::new(0.75, 0.5),
        };
        assert!(matches!(
            drawable.set_property(DRAWABLE, bad.into()),
            Err(PropertyError::InvalidValue { .. })
        ));
        assert_eq!(drawable.drawable(), &DrawableDesc::default());
    }
}
