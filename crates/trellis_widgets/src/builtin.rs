//! Built-in widget definitions
//!
//! Every built-in type declares the common widget properties and builds on
//! the built-in component types. Sliders and progress bars own an internal
//! [`IMAGE`] child, so definitions are listed children first.

use trellis_core::{AlignmentAnchor, Colour, PropertyMap, SizePolicy, Vec2};

use crate::def::{ComponentDesc, WidgetDef};
use crate::desc::{WidgetDesc, NAME_PROPERTY};
use crate::error::Result;

pub const WIDGET: &str = "Widget";
pub const IMAGE: &str = "Image";
pub const LABEL: &str = "Label";
pub const HIGHLIGHT_BUTTON: &str = "HighlightButton";
pub const TOGGLE_BUTTON: &str = "ToggleButton";
pub const HORIZONTAL_SLIDER: &str = "HorizontalSlider";
pub const VERTICAL_SLIDER: &str = "VerticalSlider";
pub const HORIZONTAL_PROGRESS_BAR: &str = "HorizontalProgressBar";
pub const VERTICAL_PROGRESS_BAR: &str = "VerticalProgressBar";

/// Built-in type names in registration order
pub const ALL: &[&str] = &[
    WIDGET,
    IMAGE,
    LABEL,
    HIGHLIGHT_BUTTON,
    TOGGLE_BUTTON,
    HORIZONTAL_SLIDER,
    VERTICAL_SLIDER,
    HORIZONTAL_PROGRESS_BAR,
    VERTICAL_PROGRESS_BAR,
];

/// Names of the properties every built-in widget declares
pub mod property {
    pub const NAME: &str = super::NAME_PROPERTY;
    pub const REL_POSITION: &str = "RelPosition";
    pub const ABS_POSITION: &str = "AbsPosition";
    pub const REL_SIZE: &str = "RelSize";
    pub const ABS_SIZE: &str = "AbsSize";
    pub const SCALE: &str = "Scale";
    pub const ROTATION: &str = "Rotation";
    pub const COLOUR: &str = "Colour";
    pub const ORIGIN_ANCHOR: &str = "OriginAnchor";
    pub const PARENTAL_ANCHOR: &str = "ParentalAnchor";
    pub const SIZE_POLICY: &str = "SizePolicy";
    pub const VISIBLE: &str = "Visible";
    pub const INPUT_ENABLED: &str = "InputEnabled";
    pub const CLIP_CHILDREN: &str = "ClipChildren";
}

/// The common widget properties with their default values
pub fn common_properties() -> PropertyMap {
    PropertyMap::new()
        .with(property::NAME, "")
        .with(property::REL_POSITION, Vec2::ZERO)
        .with(property::ABS_POSITION, Vec2::ZERO)
        .with(property::REL_SIZE, Vec2::ONE)
        .with(property::ABS_SIZE, Vec2::ZERO)
        .with(property::SCALE, Vec2::ONE)
        .with(property::ROTATION, 0.0f32)
        .with(property::COLOUR, Colour::WHITE)
        .with(property::ORIGIN_ANCHOR, AlignmentAnchor::MiddleCentre)
        .with(property::PARENTAL_ANCHOR, AlignmentAnchor::MiddleCentre)
        .with(property::SIZE_POLICY, SizePolicy::None)
        .with(property::VISIBLE, true)
        .with(property::INPUT_ENABLED, true)
        .with(property::CLIP_CHILDREN, false)
}

/// Every built-in definition, in registration order
pub fn builtin_definitions() -> Result<Vec<WidgetDef>> {
    Ok(vec![
        widget()?,
        image()?,
        label()?,
        highlight_button()?,
        toggle_button()?,
        slider(HORIZONTAL_SLIDER, Axis::Horizontal)?,
        slider(VERTICAL_SLIDER, Axis::Vertical)?,
        progress_bar(HORIZONTAL_PROGRESS_BAR, Axis::Horizontal)?,
        progress_bar(VERTICAL_PROGRESS_BAR, Axis::Vertical)?,
    ])
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::Horizontal => "Horizontal",
            Axis::Vertical => "Vertical",
        }
    }

    /// Anchor at the start of the axis, where handles and bars grow from
    fn start(self) -> AlignmentAnchor {
        match self {
            Axis::Horizontal => AlignmentAnchor::MiddleLeft,
            Axis::Vertical => AlignmentAnchor::BottomCentre,
        }
    }

    /// Relative size of a handle: a tenth of the track along the axis
    fn handle_size(self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(0.1, 1.0),
            Axis::Vertical => Vec2::new(1.0, 0.1),
        }
    }
}

fn widget() -> Result<WidgetDef> {
    WidgetDef::builder(WIDGET)
        .properties(&common_properties())
        .component(ComponentDesc::new("Layout", "Layout"))
        .component_link("Layout", "Layout", "Layout")
        .build()
}

fn image() -> Result<WidgetDef> {
    WidgetDef::builder(IMAGE)
        .properties(&common_properties())
        .component(ComponentDesc::new("Drawable", "Drawable"))
        .component_link("Drawable", "Drawable", "Drawable")
        .build()
}

fn label() -> Result<WidgetDef> {
    let mut def = WidgetDef::builder(LABEL)
        .properties(&common_properties())
        .component(ComponentDesc::new("Drawable", "Drawable"))
        .component(ComponentDesc::new("Text", "Text"))
        .component_link("Drawable", "Drawable", "Drawable");
    for name in [
        "Text",
        "TextColour",
        "HorizontalTextJustification",
        "VerticalTextJustification",
        "TextScale",
        "MaxNumberOfLines",
    ] {
        def = def.component_link(name, "Text", name);
    }
    def.build()
}

fn highlight_button() -> Result<WidgetDef> {
    WidgetDef::builder(HIGHLIGHT_BUTTON)
        .properties(&common_properties())
        .component(ComponentDesc::new("Drawable", "Drawable"))
        .component(ComponentDesc::new("Highlight", "Highlight"))
        .component_link("NormalDrawable", "Highlight", "NormalDrawable")
        .component_link("HighlightDrawable", "Highlight", "HighlightDrawable")
        .component_link("HighlightColour", "Highlight", "HighlightColour")
        .build()
}

fn toggle_button() -> Result<WidgetDef> {
    WidgetDef::builder(TOGGLE_BUTTON)
        .properties(&common_properties())
        .component(ComponentDesc::new("Drawable", "Drawable"))
        .component(ComponentDesc::new("Toggle", "Toggle"))
        .component_link("OnDrawable", "Toggle", "OnDrawable")
        .component_link("OffDrawable", "Toggle", "OffDrawable")
        .component_link("ToggledOn", "Toggle", "ToggledOn")
        .build()
}

fn slider(type_name: &str, axis: Axis) -> Result<WidgetDef> {
    let handle = WidgetDesc::new(IMAGE)
        .named("Handle")
        .with_property(property::REL_SIZE, axis.handle_size())
        .with_property(property::PARENTAL_ANCHOR, axis.start())
        .with_property(property::ORIGIN_ANCHOR, AlignmentAnchor::MiddleCentre);

    WidgetDef::builder(type_name)
        .properties(&common_properties())
        .component(ComponentDesc::new("Drawable", "Background"))
        .component(
            ComponentDesc::new("Slider", "Slider").with_property("SliderDirection", axis.name()),
        )
        .child(handle)
        .component_link("BarDrawable", "Background", "Drawable")
        .component_link("SliderPosition", "Slider", "SliderPosition")
        .child_link("HandleDrawable", "Handle", "Drawable")
        .child_link("HandleSize", "Handle", property::REL_SIZE)
        .build()
}

fn progress_bar(type_name: &str, axis: Axis) -> Result<WidgetDef> {
    let bar = WidgetDesc::new(IMAGE)
        .named("Bar")
        .with_property(property::PARENTAL_ANCHOR, axis.start())
        .with_property(property::ORIGIN_ANCHOR, axis.start());

    WidgetDef::builder(type_name)
        .properties(&common_properties())
        .component(ComponentDesc::new("Drawable", "Background"))
        .component(ComponentDesc::new("Progress", "Progress"))
        .child(bar)
        .component_link("BackgroundDrawable", "Background", "Drawable")
        .component_link("Progress", "Progress", "Progress")
        .child_link("BarDrawable", "Bar", "Drawable")
        .child_link("BarColour", "Bar", property::COLOUR)
        .build()
}
