//! Closed enumerations used as property values
//!
//! Each enumeration round-trips through its variant name, which is also the
//! form used in authored resources. Parsing is case-insensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PropertyError;
use crate::math::Vec2;

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident, )+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The canonical name of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = PropertyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| PropertyError::Parse {
                        expected: stringify!($name),
                        text: s.to_string(),
                    })
            }
        }
    };
}

named_enum! {
    /// One of the nine anchor points of a rectangle
    pub enum AlignmentAnchor {
        TopLeft,
        TopCentre,
        TopRight,
        MiddleLeft,
        MiddleCentre,
        MiddleRight,
        BottomLeft,
        BottomCentre,
        BottomRight,
    }
    default = MiddleCentre;
}

impl AlignmentAnchor {
    /// Position of the anchor within a unit rectangle, origin bottom-left
    pub fn fraction(&self) -> Vec2 {
        let x = match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => 0.0,
            Self::TopCentre | Self::MiddleCentre | Self::BottomCentre => 0.5,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => 1.0,
        };
        let y = match self {
            Self::BottomLeft | Self::BottomCentre | Self::BottomRight => 0.0,
            Self::MiddleLeft | Self::MiddleCentre | Self::MiddleRight => 0.5,
            Self::TopLeft | Self::TopCentre | Self::TopRight => 1.0,
        };
        Vec2::new(x, y)
    }
}

named_enum! {
    /// How a widget reconciles its authored size with its preferred size
    pub enum SizePolicy {
        None,
        UsePreferredSize,
        UseWidthMaintainingAspect,
        UseHeightMaintainingAspect,
        FitMaintainingAspect,
        FillMaintainingAspect,
    }
    default = None;
}

named_enum! {
    /// Root a resource path is relative to
    pub enum StorageLocation {
        /// Application package
        Package,
        /// Resources bundled with the engine itself
        Engine,
        SaveData,
        Cache,
        /// Downloadable content
        Dlc,
        /// Absolute path
        Root,
    }
    default = Package;
}

named_enum! {
    pub enum HorizontalTextJustification {
        Left,
        Centre,
        Right,
    }
    default = Centre;
}

named_enum! {
    pub enum VerticalTextJustification {
        Top,
        Centre,
        Bottom,
    }
    default = Centre;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "bottomright".parse::<AlignmentAnchor>(),
            Ok(AlignmentAnchor::BottomRight)
        );
        assert_eq!(" Engine ".parse::<StorageLocation>(), Ok(StorageLocation::Engine));
        assert!("Sideways".parse::<SizePolicy>().is_err());
    }

    #[test]
    fn test_display_matches_serde_name() {
        for anchor in AlignmentAnchor::ALL {
            let json = serde_json::to_string(anchor).unwrap();
            assert_eq!(json, format!("\"{}\"", anchor));
        }
    }

    #[test]
    fn test_anchor_fraction() {
        assert_eq!(AlignmentAnchor::TopLeft.fraction(), Vec2::new(0.0, 1.0));
        assert_eq!(AlignmentAnchor::MiddleCentre.fraction(), Vec2::new(0.5, 0.5));
    }
}
