//! Built-in component types
//!
//! Each component exposes a fixed schema of typed properties. Rendering,
//! text shaping and input handling read component state; they are not part of
//! this crate.

mod drawable;
mod interaction;
mod layout;
mod range;
mod text;

pub use drawable::{DrawableComponent, StandardDrawableComponent};
pub use interaction::{HighlightComponent, ToggleComponent};
pub use layout::LayoutComponent;
pub use range::{ProgressComponent, SliderComponent, SliderDirection};
pub use text::TextComponent;

use crate::component::ComponentFactory;
use crate::error::Result;

/// Register all built-in component types into a factory
pub fn register_all_builtins(factory: &mut ComponentFactory) -> Result<()> {
    // Drawing
    factory.register_type::<StandardDrawableComponent>()?;
    factory.register_type::<DrawableComponent>()?;

    // Content and arrangement
    factory.register_type::<TextComponent>()?;
    factory.register_type::<LayoutComponent>()?;

    // Interaction state
    factory.register_type::<HighlightComponent>()?;
    factory.register_type::<ToggleComponent>()?;
    factory.register_type::<SliderComponent>()?;
    factory.register_type::<ProgressComponent>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_register_once() {
        let mut factory = ComponentFactory::new();
        register_all_builtins(&mut factory).unwrap();
        assert_eq!(factory.len(), 8);
        assert!(register_all_builtins(&mut factory).is_err());
    }
}
