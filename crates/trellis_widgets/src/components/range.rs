//! Range components: slider and progress

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use trellis_core::{PropertyDesc, PropertyError, PropertyType, PropertyValue};
use trellis_core::Result as PropertyResult;

use crate::component::{expect_value, Component, ComponentType};

const SLIDER_POSITION: &str = "SliderPosition";
const SLIDER_DIRECTION: &str = "SliderDirection";
const PROGRESS: &str = "Progress";

/// Axis a slider handle travels along
///
/// Stored in the `SliderDirection` string property as `"Horizontal"` or
/// `"Vertical"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SliderDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl SliderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SliderDirection::Horizontal => "Horizontal",
            SliderDirection::Vertical => "Vertical",
        }
    }
}

impl fmt::Display for SliderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliderDirection {
    type Err = PropertyError;

    fn from_str(s: &str) -> PropertyResult<Self> {
        if s.eq_ignore_ascii_case("horizontal") {
            Ok(SliderDirection::Horizontal)
        } else if s.eq_ignore_ascii_case("vertical") {
            Ok(SliderDirection::Vertical)
        } else {
            Err(PropertyError::InvalidValue {
                name: SLIDER_DIRECTION.to_string(),
                reason: format!("expected Horizontal or Vertical, got '{}'", s),
            })
        }
    }
}

/// Clamp to the unit interval; NaN maps to 0
fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Position of a draggable handle along a track
#[derive(Clone, Debug)]
pub struct SliderComponent {
    name: String,
    position: f32,
    direction: SliderDirection,
}

impl SliderComponent {
    /// Normalised handle position in [0, 1]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Set the position, clamped to [0, 1]
    pub fn set_position(&mut self, position: f32) {
        self.position = unit(position);
    }

    pub fn direction(&self) -> SliderDirection {
        self.direction
    }
}

impl ComponentType for SliderComponent {
    const TYPE_NAME: &'static str = "Slider";

    fn schema() -> Vec<PropertyDesc> {
        vec![
            PropertyDesc::new(PropertyType::Float, SLIDER_POSITION),
            PropertyDesc::new(PropertyType::String, SLIDER_DIRECTION),
        ]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: 0.5,
            direction: SliderDirection::default(),
        }
    }
}

impl Component for SliderComponent {
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
            SLIDER_POSITION => Some(self.position.into()),
            SLIDER_DIRECTION => Some(self.direction.as_str().into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        match name {
            SLIDER_POSITION => self.set_position(expect_value(name, value)?),
            SLIDER_DIRECTION => {
                let text: String = expect_value(name, value)?;
                self.direction = text.parse()?;
            }
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

/// Fill fraction of a progress bar
#[derive(Clone, Debug)]
pub struct ProgressComponent {
    name: String,
    progress: f32,
}

impl ProgressComponent {
    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set the progress, clamped to [0, 1]
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = unit(progress);
    }
}

impl ComponentType for ProgressComponent {
    const TYPE_NAME: &'static str = "Progress";

    fn schema() -> Vec<PropertyDesc> {
        vec![PropertyDesc::new(PropertyType::Float, PROGRESS)]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            progress: 0.0,
        }
    }
}

impl Component for ProgressComponent {
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
        (name == PROGRESS).then(|| self.progress.into())
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        if name != PROGRESS {
            return Err(PropertyError::UnknownProperty(name.to_string()));
        }
        self.set_progress(expect_value(name, value)?);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
