//! Marker categories.

use std::fmt;

/// Category a marker is grouped under in the host profiler.
///
/// The associated constants are the categories every host ships with.
/// Registering custom categories is not supported yet, see
/// [`ProfilerMarkerFactory::create_category`].
///
/// [`ProfilerMarkerFactory::create_category`]: crate::ProfilerMarkerFactory::create_category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u16);

impl CategoryId {
    pub const RENDER: Self = Self(0);
    pub const SCRIPTS: Self = Self(1);
    pub const GUI: Self = Self(4);
    pub const PHYSICS: Self = Self(5);
    pub const ANIMATION: Self = Self(6);
    pub const AI: Self = Self(7);
    pub const AUDIO: Self = Self(8);
    pub const VIDEO: Self = Self(11);
    pub const PARTICLES: Self = Self(12);
    pub const LIGHTING: Self = Self(13);
    pub const NETWORK: Self = Self(14);
    pub const LOADING: Self = Self(15);
    pub const OTHER: Self = Self(16);
    pub const VSYNC: Self = Self(18);
    pub const OVERHEAD: Self = Self(19);
    pub const INTERNAL: Self = Self(24);
    pub const FILE_IO: Self = Self(25);
    pub const INPUT: Self = Self(30);

    /// Wrap a raw category id issued by the host.
    #[inline]
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw id as understood by the host.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Display name for built-in categories.
    #[must_use]
    pub const fn builtin_name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "Render",
            1 => "Scripts",
            4 => "GUI",
            5 => "Physics",
            6 => "Animation",
            7 => "AI",
            8 => "Audio",
            11 => "Video",
            12 => "Particles",
            13 => "Lighting",
            14 => "Network",
            15 => "Loading",
            16 => "Other",
            18 => "VSync",
            19 => "Overhead",
            24 => "Internal",
            25 => "File IO",
            30 => "Input",
            _ => return None,
        })
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::OTHER
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Category({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_categories_have_names() {
        assert_eq!(CategoryId::VIDEO.to_string(), "Video");
        assert_eq!(CategoryId::NETWORK.builtin_name(), Some("Network"));
        assert_eq!(CategoryId::default(), CategoryId::OTHER);
    }

    #[test]
    fn unknown_category_displays_raw_id() {
        let custom = CategoryId::new(512);
        assert_eq!(custom.builtin_name(), None);
        assert_eq!(custom.to_string(), "Category(512)");
        assert_eq!(custom.raw(), 512);
    }
}
