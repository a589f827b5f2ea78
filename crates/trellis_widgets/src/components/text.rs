//! Text component

use std::any::Any;

use trellis_core::{
    Colour, HorizontalTextJustification, PropertyDesc, PropertyError, PropertyType,
    PropertyValue, VerticalTextJustification,
};
use trellis_core::Result as PropertyResult;

use crate::component::{expect_value, Component, ComponentType};

const TEXT: &str = "Text";
const TEXT_COLOUR: &str = "TextColour";
const HORIZONTAL_JUSTIFICATION: &str = "HorizontalTextJustification";
const VERTICAL_JUSTIFICATION: &str = "VerticalTextJustification";
const TEXT_SCALE: &str = "TextScale";
const MAX_NUMBER_OF_LINES: &str = "MaxNumberOfLines";

/// A block of text drawn inside the widget bounds
#[derive(Clone, Debug)]
pub struct TextComponent {
    name: String,
    text: String,
    text_colour: Colour,
    horizontal_justification: HorizontalTextJustification,
    vertical_justification: VerticalTextJustification,
    text_scale: f32,
    /// Zero means unlimited
    max_number_of_lines: i32,
}

impl TextComponent {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text_colour(&self) -> Colour {
        self.text_colour
    }

    pub fn horizontal_justification(&self) -> HorizontalTextJustification {
        self.horizontal_justification
    }

    pub fn vertical_justification(&self) -> VerticalTextJustification {
        self.vertical_justification
    }

    pub fn text_scale(&self) -> f32 {
        self.text_scale
    }

    /// Set the scale applied to the font size; must be positive
    pub fn set_text_scale(&mut self, scale: f32) -> PropertyResult<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PropertyError::InvalidValue {
                name: TEXT_SCALE.to_string(),
                reason: format!("text scale must be positive, got {}", scale),
            });
        }
        self.text_scale = scale;
        Ok(())
    }

    /// Maximum number of lines, `None` when unlimited
    pub fn max_number_of_lines(&self) -> Option<u32> {
        u32::try_from(self.max_number_of_lines)
            .ok()
            .filter(|&lines| lines > 0)
    }

    pub fn set_max_number_of_lines(&mut self, lines: i32) -> PropertyResult<()> {
        if lines < 0 {
            return Err(PropertyError::InvalidValue {
                name: MAX_NUMBER_OF_LINES.to_string(),
                reason: format!("line count cannot be negative, got {}", lines),
            });
        }
        self.max_number_of_lines = lines;
        Ok(())
    }
}

impl ComponentType for TextComponent {
    const TYPE_NAME: &'static str = "Text";

    fn schema() -> Vec<PropertyDesc> {
        vec![
            PropertyDesc::new(PropertyType::String, TEXT),
            PropertyDesc::new(PropertyType::Colour, TEXT_COLOUR),
            PropertyDesc::new(PropertyType::HorizontalTextJustification, HORIZONTAL_JUSTIFICATION),
            PropertyDesc::new(PropertyType::VerticalTextJustification, VERTICAL_JUSTIFICATION),
            PropertyDesc::new(PropertyType::Float, TEXT_SCALE),
            PropertyDesc::new(PropertyType::Int, MAX_NUMBER_OF_LINES),
        ]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            text: String::new(),
            text_colour: Colour::BLACK,
            horizontal_justification: HorizontalTextJustification::Centre,
            vertical_justification: VerticalTextJustification::Centre,
            text_scale: 1.0,
            max_number_of_lines: 0,
        }
    }
}

impl Component for TextComponent {
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
            TEXT => Some(self.text.clone().into()),
            TEXT_COLOUR => Some(self.text_colour.into()),
            HORIZONTAL_JUSTIFICATION => Some(self.horizontal_justification.into()),
            VERTICAL_JUSTIFICATION => Some(self.vertical_justification.into()),
            TEXT_SCALE => Some(self.text_scale.into()),
            MAX_NUMBER_OF_LINES => Some(self.max_number_of_lines.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        match name {
            TEXT => self.text = expect_value(name, value)?,
            TEXT_COLOUR => self.text_colour = expect_value(name, value)?,
            HORIZONTAL_JUSTIFICATION => self.horizontal_justification = expect_value(name, value)?,
            VERTICAL_JUSTIFICATION => self.vertical_justification = expect_value(name, value)?,
            TEXT_SCALE => self.set_text_scale(expect_value(name, value)?)?,
            MAX_NUMBER_OF_LINES => self.set_max_number_of_lines(expect_value(name, value)?)?,
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
