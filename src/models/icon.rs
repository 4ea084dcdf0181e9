//! Category icons
//!
//! A fixed set of supported icon names. Stored records keep the icon's name
//! (e.g. `"ShoppingCart"`); a name outside the set reads back as
//! [`CategoryIcon::FALLBACK`] so old or hand-edited data still loads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FiscalError;

macro_rules! define_icons {
    ($( $variant:ident => $name:literal, $glyph:literal; )+) => {
        /// A supported category icon
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CategoryIcon {
            $( $variant, )+
        }

        impl CategoryIcon {
            /// Every supported icon, in picker order
            pub const ALL: &'static [CategoryIcon] = &[ $( CategoryIcon::$variant, )+ ];

            /// The stored name of this icon
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }

            /// A terminal glyph standing in for the icon
            pub fn glyph(&self) -> &'static str {
                match self {
                    $( Self::$variant => $glyph, )+
                }
            }

            /// Exact (case-insensitive) lookup by name
            pub fn from_name(name: &str) -> Option<Self> {
                let name = name.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|icon| icon.name().eq_ignore_ascii_case(name))
            }
        }
    };
}

define_icons! {
    ShoppingCart => "ShoppingCart", "🛒";
    Car => "Car", "🚗";
    Zap => "Zap", "⚡";
    Home => "Home", "🏠";
    Film => "Film", "🎬";
    HeartPulse => "HeartPulse", "💓";
    BookOpen => "BookOpen", "📖";
    Sparkles => "Sparkles", "✨";
    Plane => "Plane", "✈";
    Train => "Train", "🚆";
    Bike => "Bike", "🚲";
    Bus => "Bus", "🚌";
    Shirt => "Shirt", "👕";
    Gift => "Gift", "🎁";
    Coffee => "Coffee", "☕";
    Pizza => "Pizza", "🍕";
    Landmark => "Landmark", "🏛";
    Banknote => "Banknote", "💵";
    Briefcase => "Briefcase", "💼";
    GraduationCap => "GraduationCap", "🎓";
    Music => "Music", "🎵";
    Gamepad2 => "Gamepad2", "🎮";
    Wifi => "Wifi", "📶";
    Phone => "Phone", "📞";
    Cable => "Cable", "🔌";
    Baby => "Baby", "👶";
    Bone => "Bone", "🦴";
}

impl CategoryIcon {
    /// Icon used when a stored name is not recognised
    pub const FALLBACK: CategoryIcon = CategoryIcon::Sparkles;

    /// Lookup by name, falling back to [`CategoryIcon::FALLBACK`]
    pub fn from_name_or_fallback(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::FALLBACK)
    }
}

impl Default for CategoryIcon {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryIcon {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            FiscalError::Validation(format!(
                "Unknown icon '{}'. Run 'fiscally category icons' to list supported icons.",
                s.trim()
            ))
        })
    }
}

impl Serialize for CategoryIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CategoryIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name_or_fallback(&name))
    }
}
