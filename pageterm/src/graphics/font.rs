use embedded_graphics::mono_font::{
    ascii::{FONT_10X20, FONT_6X12, FONT_7X13, FONT_9X15},
    MonoFont,
};

/// Font selector for terminal lines.
///
/// Raw selectors outside `1..=4` are clamped, so every value of this type maps
/// to an entry of the font table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum FontSize {
    #[default]
    Small = 1,
    Medium = 2,
    Large = 3,
    Huge = 4,
}

/// Line height and bitmap font used for one [`FontSize`].
#[derive(Clone, Copy)]
pub struct FontMetrics {
    /// Vertical advance of one line, in pixels.
    pub line_height: u32,
    pub font: &'static MonoFont<'static>,
}

impl FontSize {
    pub const MIN: FontSize = FontSize::Small;
    pub const MAX: FontSize = FontSize::Huge;

    /// Clamps a raw selector into `1..=4`.
    pub const fn clamped(raw: u8) -> Self {
        match raw {
            0 | 1 => FontSize::Small,
            2 => FontSize::Medium,
            3 => FontSize::Large,
            _ => FontSize::Huge,
        }
    }

    pub const fn get(self) -> u8 {
        self as u8
    }

    pub const fn metrics(self) -> FontMetrics {
        match self {
            FontSize::Small => FontMetrics {
                line_height: 12,
                font: &FONT_6X12,
            },
            FontSize::Medium => FontMetrics {
                line_height: 13,
                font: &FONT_7X13,
            },
            FontSize::Large => FontMetrics {
                line_height: 15,
                font: &FONT_9X15,
            },
            FontSize::Huge => FontMetrics {
                line_height: 20,
                font: &FONT_10X20,
            },
        }
    }

    pub const fn line_height(self) -> u32 {
        self.metrics().line_height
    }

    pub const fn font(self) -> &'static MonoFont<'static> {
        self.metrics().font
    }
}

impl From<u8> for FontSize {
    fn from(raw: u8) -> Self {
        FontSize::clamped(raw)
    }
}

impl From<FontSize> for u8 {
    fn from(size: FontSize) -> Self {
        size.get()
    }
}
