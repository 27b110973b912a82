use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const GREEN: Color = Color(0xFF4CAF50);
    pub const RED: Color = Color(0xFFF44336);

    pub const fn argb(&self) -> u32 {
        self.0
    }

    pub const fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }
}

/// Renders as `#RRGGBB`, alpha is dropped.
impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub open: Color,
    pub closed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            open: Color::GREEN,
            closed: Color::RED,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    Indonesian,
    English,
}

impl Locale {
    pub const fn open(&self) -> &'static str {
        match self {
            Locale::Indonesian => "Buka",
            Locale::English => "Open",
        }
    }

    pub const fn closed(&self) -> &'static str {
        match self {
            Locale::Indonesian => "Tutup",
            Locale::English => "Closed",
        }
    }

    pub const fn not_available(&self) -> &'static str {
        match self {
            Locale::Indonesian => "Tidak tersedia",
            Locale::English => "Not available",
        }
    }

    /// Accepts "id"/"en" style language tags, falling back to Indonesian.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "en" || tag.starts_with("en-") || tag.starts_with("en_") {
            Locale::English
        } else {
            Locale::Indonesian
        }
    }
}

#[test]
fn color_display() {
    assert_eq!(Color::GREEN.to_string(), "#4CAF50");
    assert_eq!(Color::RED.to_string(), "#F44336");
    assert_eq!(Color::RED.alpha(), 0xFF);
}

#[test]
fn locale_tags() {
    assert_eq!(Locale::from_tag("en"), Locale::English);
    assert_eq!(Locale::from_tag("en-US"), Locale::English);
    assert_eq!(Locale::from_tag("id"), Locale::Indonesian);
    assert_eq!(Locale::from_tag(""), Locale::Indonesian);
}
