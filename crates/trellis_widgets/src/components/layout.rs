//! Layout component

use std::any::Any;

use trellis_core::{LayoutDesc, PropertyDesc, PropertyError, PropertyType, PropertyValue};
use trellis_core::Result as PropertyResult;

use crate::component::{expect_value, Component, ComponentType};

const LAYOUT: &str = "Layout";

/// Arranges the owning widget's external children into cells
#[derive(Clone, Debug)]
pub struct LayoutComponent {
    name: String,
    layout: LayoutDesc,
}

impl LayoutComponent {
    pub fn layout(&self) -> &LayoutDesc {
        &self.layout
    }

    /// Replace the layout; a layout must provide at least one cell
    pub fn set_layout(&mut self, layout: LayoutDesc) -> PropertyResult<()> {
        if layout.cell_count() == 0 {
            return Err(PropertyError::InvalidValue {
                name: LAYOUT.to_string(),
                reason: "layout has no cells".to_string(),
            });
        }
        self.layout = layout;
        Ok(())
    }
}

impl ComponentType for LayoutComponent {
    const TYPE_NAME: &'static str = "Layout";

    fn schema() -> Vec<PropertyDesc> {
        vec![PropertyDesc::new(PropertyType::LayoutDesc, LAYOUT)]
    }

    fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layout: LayoutDesc::default(),
        }
    }
}

impl Component for LayoutComponent {
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
        (name == LAYOUT).then(|| self.layout.clone().into())
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> PropertyResult<()> {
        if name != LAYOUT {
            return Err(PropertyError::UnknownProperty(name.to_string()));
        }
        self.set_layout(expect_value(name, value)?)
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
    use trellis_core::{CellOrder, LayoutSpacing};

    #[test]
    fn test_layout_rejects_empty_grid() {
        let mut layout = LayoutComponent::with_name("layout");
        let empty = LayoutDesc::Grid {
            rows: 0,
            columns: 3,
            order: CellOrder::RowMajor,
            spacing: LayoutSpacing::default(),
        };
        assert!(layout.set_property(LAYOUT, empty.into()).is_err());
        assert_eq!(layout.layout().cell_count(), 1);

        let grid = LayoutDesc::Grid {
            rows: 2,
            columns: 3,
            order: CellOrder::ColumnMajor,
            spacing: LayoutSpacing::default(),
        };
        layout.set_property(LAYOUT, grid.into()).unwrap();
        assert_eq!(layout.layout().cell_count(), 6);
    }
}
