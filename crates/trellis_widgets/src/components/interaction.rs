//! Interaction state components
//!
//! These hold the state an input system drives (highlighted, toggled) and the
//! drawable to show for each state. Input dispatch writes the state through
//! [`Component::set_property`] or the typed setters.

use std::any::Any;

use trellis_core::{
    Colour, DrawableDesc, PropertyDesc, PropertyError, PropertyType, PropertyValue,
};
use trellis_core::Result as PropertyResult;

use crate::component::{expect_value, Component, ComponentType};

const NORMAL_DRAWABLE: &str = "NormalDrawable";
const HIGHLIGHT_DRAWABLE: &str = "HighlightDrawable";
const HIGHLIGHT_COLOUR: &str = "HighlightColour";
const HIGHLIGHTED: &str = "Highlighted";

/// Swaps drawables while a pointer is over or pressing the widget
#[derive(Clone, Debug)]
pub struct HighlightComponent {
    name: String,
    normal_drawable: DrawableDesc,
    highlight_drawable: DrawableDesc,
    highlight_colour: Colour,
    highlighted: bool,
}

impl HighlightComponent {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn highlight_colour(&self) -> Colour {
        self.highlight_colour
    }

    /// Drawable for the current state
    pub fn current_drawable(&self) -> &DrawableDesc {
        if self.highlighted {
            &self.highlight_drawable
        } else {
            &self.normal_drawable
        }
    }
}

impl ComponentType for HighlightComponent {
    const TYPE_NAME: &'static str = "Highlight";

    fn schema() -> Vec<PropertyDesc> {
        vec![
            PropertyDesc::new(PropertyType::DrawableDesc, NORMAL_DRAWABLE),
            PropertyDesc::new(PropertyType::DrawableDesc, HIGHLIGHT_DRAWABLE),
            PropertyDesc::new(PropertyType::Colour, HIGHLIGHT_COLOUR),
            PropertyDesc::new(PropertyType::Bool, HIGHLIGHTED),
        ]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            normal_drawable: DrawableDesc::default(),
            highlight_drawable: DrawableDesc::default(),
            highlight_colour: Colour::GREY,
            highlighted: false,
        }
    }
}

impl Component for HighlightComponent {
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
            NORMAL_DRAWABLE => Some(self.normal_drawable.clone().into()),
            HIGHLIGHT_DRAWABLE => Some(self.highlight_drawable.clone().into()),
            HIGHLIGHT_COLOUR => Some(self.highlight_colour.into()),
            HIGHLIGHTED => Some(self.highlighted.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        match name {
            NORMAL_DRAWABLE => {
                let drawable: DrawableDesc = expect_value(name, value)?;
                drawable.validate(name)?;
                self.normal_drawable = drawable;
            }
            HIGHLIGHT_DRAWABLE => {
                let drawable: DrawableDesc = expect_value(name, value)?;
                drawable.validate(name)?;
                self.highlight_drawable = drawable;
            }
            HIGHLIGHT_COLOUR => self.highlight_colour = expect_value(name, value)?,
            HIGHLIGHTED => self.highlighted = expect_value(name, value)?,
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

const ON_DRAWABLE: &str = "OnDrawable";
const OFF_DRAWABLE: &str = "OffDrawable";
const TOGGLED_ON: &str = "ToggledOn";

/// Two-state switch with a drawable per state
#[derive(Clone, Debug)]
pub struct ToggleComponent {
    name: String,
    on_drawable: DrawableDesc,
    off_drawable: DrawableDesc,
    toggled_on: bool,
}

impl ToggleComponent {
    pub fn is_on(&self) -> bool {
        self.toggled_on
    }

    pub fn set_on(&mut self, on: bool) {
        self.toggled_on = on;
    }

    /// Flip the state, returning the new one
    pub fn toggle(&mut self) -> bool {
        self.toggled_on = !self.toggled_on;
        self.toggled_on
    }

    /// Drawable for the current state
    pub fn current_drawable(&self) -> &DrawableDesc {
        if self.toggled_on {
            &self.on_drawable
        } else {
            &self.off_drawable
        }
    }
}

impl ComponentType for ToggleComponent {
    const TYPE_NAME: &'static str = "Toggle";

    fn schema() -> Vec<PropertyDesc> {
        vec![
            PropertyDesc::new(PropertyType::DrawableDesc, ON_DRAWABLE),
            PropertyDesc::new(PropertyType::DrawableDesc, OFF_DRAWABLE),
            PropertyDesc::new(PropertyType::Bool, TOGGLED_ON),
        ]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            on_drawable: DrawableDesc::default(),
            off_drawable: DrawableDesc::default(),
            toggled_on: false,
        }
    }
}

impl Component for ToggleComponent {
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
            ON_DRAWABLE => Some(self.on_drawable.clone().into()),
            OFF_DRAWABLE => Some(self.off_drawable.clone().into()),
            TOGGLED_ON => Some(self.toggled_on.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        match name {
            ON_DRAWABLE | OFF_DRAWABLE => {
                let drawable: DrawableDesc = expect_value(name, value)?;
                drawable.validate(name)?;
                if name == ON_DRAWABLE {
                    self.on_drawable = drawable;
                } else {
                    self.off_drawable = drawable;
                }
            }
            TOGGLED_ON => self.toggled_on = expect_value(name, value)?,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_switches_drawable() {
        let mut highlight = HighlightComponent::with_name("highlight");
        highlight
            .set_property(HIGHLIGHT_DRAWABLE, DrawableDesc::standard(Colour::RED).into())
            .unwrap();
        assert_eq!(highlight.current_drawable(), &DrawableDesc::default());

        highlight.set_property(HIGHLIGHTED, true.into()).unwrap();
        assert_eq!(
            highlight.current_drawable(),
            &DrawableDesc::standard(Colour::RED)
        );
    }

    #[test]
    fn test_toggle() {
        let mut toggle = ToggleComponent::with_name("toggle");
        toggle
            .set_property(ON_DRAWABLE, DrawableDesc::standard(Colour::GREEN).into())
            .unwrap();
        assert!(!toggle.is_on());
        assert!(toggle.toggle());
        assert_eq!(toggle.get_property(TOGGLED_ON), Some(PropertyValue::Bool(true)));
        assert_eq!(
            toggle.current_drawable(),
            &DrawableDesc::standard(Colour::GREEN)
        );
    }
}
