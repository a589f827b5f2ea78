//! Composite descriptors for drawables and layouts
//!
//! A descriptor configures a nested rendering or layout strategy declaratively.
//! The strategy itself lives with the renderer or layout engine; the widget
//! system only stores, validates and forwards the description.

use serde::{Deserialize, Serialize};

use crate::error::{PropertyError, Result};
use crate::math::{Colour, Vec2, Vec4};
use crate::types::StorageLocation;

/// A file resource: storage root plus relative path
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePath {
    #[serde(default)]
    pub location: StorageLocation,
    pub path: String,
}

impl ResourcePath {
    pub fn new(location: StorageLocation, path: impl Into<String>) -> Self {
        Self {
            location,
            path: path.into(),
        }
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.location, self.path)
    }
}

/// Texture source shared by all drawable kinds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawableSource {
    pub texture: Option<ResourcePath>,
    pub atlas: Option<ResourcePath>,
    pub atlas_id: Option<String>,
    /// UV rectangle as (u, v, width, height)
    pub uvs: Vec4,
    pub colour: Colour,
}

impl Default for DrawableSource {
    fn default() -> Self {
        Self {
            texture: None,
            atlas: None,
            atlas_id: None,
            uvs: Vec4::new(0.0, 0.0, 1.0, 1.0),
            colour: Colour::WHITE,
        }
    }
}

/// Stretch axis of a three-patch drawable
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Description of how a widget's background is drawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawableDesc {
    /// Texture stretched over the whole widget
    Standard {
        #[serde(flatten)]
        source: DrawableSource,
    },
    /// Texture split into a 3x3 grid; corners keep their size
    NinePatch {
        #[serde(flatten)]
        source: DrawableSource,
        /// Fractional insets in left/right/top/bottom order
        insets: Vec4,
    },
    /// Texture split into three strips along one axis
    ThreePatch {
        #[serde(flatten)]
        source: DrawableSource,
        #[serde(default)]
        direction: PatchDirection,
        /// Fractional insets: (left or bottom, right or top)
        insets: Vec2,
    },
}

impl Default for DrawableDesc {
    fn default() -> Self {
        DrawableDesc::Standard {
            source: DrawableSource::default(),
        }
    }
}

impl DrawableDesc {
    /// A plain drawable tinted with `colour`
    pub fn standard(colour: Colour) -> Self {
        DrawableDesc::Standard {
            source: DrawableSource {
                colour,
                ..Default::default()
            },
        }
    }

    pub fn source(&self) -> &DrawableSource {
        match self {
            DrawableDesc::Standard { source }
            | DrawableDesc::NinePatch { source, .. }
            | DrawableDesc::ThreePatch { source, .. } => source,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DrawableDesc::Standard { .. } => "Standard",
            DrawableDesc::NinePatch { .. } => "NinePatch",
            DrawableDesc::ThreePatch { .. } => "ThreePatch",
        }
    }

    /// Check that patch insets are fractions that leave room for the centre
    pub fn validate(&self, property: &str) -> Result<()> {
        let insets_ok = |a: f32, b: f32| {
            (0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&b) && a + b <= 1.0
        };
        let ok = match self {
            DrawableDesc::Standard { .. } => true,
            DrawableDesc::NinePatch { insets, .. } => {
                insets_ok(insets.x, insets.y) && insets_ok(insets.z, insets.w)
            }
            DrawableDesc::ThreePatch { insets, .. } => insets_ok(insets.x, insets.y),
        };
        if ok {
            Ok(())
        } else {
            Err(PropertyError::InvalidValue {
                name: property.to_string(),
                reason: format!("{} insets must be fractions summing to at most 1", self.kind()),
            })
        }
    }
}

/// Order in which a grid layout fills its cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOrder {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// Margins and spacing shared by all layout kinds
///
/// Relative values are fractions of the owning widget's size; absolute values
/// are added on top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpacing {
    pub relative_margins: Vec4,
    pub absolute_margins: Vec4,
    pub relative_spacing: f32,
    pub absolute_spacing: f32,
}

/// Description of how a widget arranges its children
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayoutDesc {
    Grid {
        rows: u32,
        columns: u32,
        #[serde(default)]
        order: CellOrder,
        #[serde(flatten)]
        spacing: LayoutSpacing,
    },
    HorizontalList {
        cells: u32,
        #[serde(flatten)]
        spacing: LayoutSpacing,
    },
    VerticalList {
        cells: u32,
        #[serde(flatten)]
        spacing: LayoutSpacing,
    },
}

impl Default for LayoutDesc {
    fn default() -> Self {
        LayoutDesc::VerticalList {
            cells: 1,
            spacing: LayoutSpacing::default(),
        }
    }
}

impl LayoutDesc {
    /// Number of cells the layout provides
    pub fn cell_count(&self) -> u32 {
        match self {
            LayoutDesc::Grid { rows, columns, .. } => rows * columns,
            LayoutDesc::HorizontalList { cells, .. } | LayoutDesc::VerticalList { cells, .. } => {
                *cells
            }
        }
    }

    pub fn spacing(&self) -> &LayoutSpacing {
        match self {
            LayoutDesc::Grid { spacing, .. }
            | LayoutDesc::HorizontalList { spacing, .. }
            | LayoutDesc::VerticalList { spacing, .. } => spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawable_from_json() {
        let json = r#"{
            "type": "NinePatch",
            "texture": { "location": "Engine", "path": "Textures/Button.png" },
            "insets": [0.1, 0.1, 0.2, 0.2]
        }"#;
        let desc: DrawableDesc = serde_json::from_str(json).unwrap();
        assert_eq!(desc.kind(), "NinePatch");
        assert_eq!(
            desc.source().texture,
            Some(ResourcePath::new(StorageLocation::Engine, "Textures/Button.png"))
        );
        assert_eq!(desc.source().colour, Colour::WHITE);
        assert!(desc.validate("Drawable").is_ok());
    }

    #[test]
    fn test_drawable_rejects_overlapping_insets() {
        let desc = DrawableDesc::ThreePatch {
            source: DrawableSource::default(),
            direction: PatchDirection::Vertical,
            insets: Vec2::new(0.6, 0.6),
        };
        assert!(matches!(
            desc.validate("Drawable"),
            Err(PropertyError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_layout_cell_count() {
        let json = r#"{ "type": "Grid", "rows": 2, "columns": 3, "absolute_spacing": 4.0 }"#;
        let layout: LayoutDesc = serde_json::from_str(json).unwrap();
        assert_eq!(layout.cell_count(), 6);
        assert_eq!(layout.spacing().absolute_spacing, 4.0);
    }
}
