use embedded_graphics::{
    mono_font::MonoTextStyle,
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
    Drawable,
};
use embedded_graphics_core::{draw_target::DrawTarget, geometry::Point, pixelcolor::BinaryColor};

use super::font::FontSize;

/// Drawing capabilities a [`Terminal`](crate::Terminal) needs from a
/// monochrome display.
///
/// Drawing happens inside a page loop: the caller invokes [`first_page`],
/// issues the same draw calls, then asks [`next_page`] whether another pass is
/// needed. Controllers that render the frame in horizontal stripes return
/// `true` until every stripe has been sent.
///
/// [`first_page`]: DisplayDriver::first_page
/// [`next_page`]: DisplayDriver::next_page
pub trait DisplayDriver {
    type Error;

    fn set_draw_color(&mut self, color: BinaryColor);

    /// Selects the font used by subsequent [`draw_str`](DisplayDriver::draw_str)
    /// calls from the fixed catalog.
    fn set_font(&mut self, size: FontSize);

    fn first_page(&mut self) -> Result<(), Self::Error>;

    /// Finishes the current pass. Returns `true` if the draw calls must be
    /// repeated for another pass.
    fn next_page(&mut self) -> Result<bool, Self::Error>;

    /// Draws a one pixel wide, unfilled rectangle.
    fn draw_frame(&mut self, frame: Rectangle) -> Result<(), Self::Error>;

    /// Draws `text` with its baseline at `baseline`.
    fn draw_str(&mut self, baseline: Point, text: &str) -> Result<(), Self::Error>;
}

/// Runs the page protocol on top of a full-frame `embedded-graphics` target.
pub struct PagedTarget<T> {
    target: T,
    color: BinaryColor,
    font: FontSize,
    pages: u32,
    pass: u32,
}

impl<T> PagedTarget<T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: T) -> Self {
        Self::with_pages(target, 1)
    }

    /// Repeats every frame `pages` times, like a stripe-buffered controller.
    pub fn with_pages(target: T, pages: u32) -> Self {
        Self {
            target,
            color: BinaryColor::On,
            font: FontSize::default(),
            pages: pages.max(1),
            pass: 0,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T> DisplayDriver for PagedTarget<T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    type Error = T::Error;

    fn set_draw_color(&mut self, color: BinaryColor) {
        self.color = color;
    }

    fn set_font(&mut self, size: FontSize) {
        self.font = size;
    }

    fn first_page(&mut self) -> Result<(), Self::Error> {
        self.pass = 0;
        self.target.clear(BinaryColor::Off)
    }

    fn next_page(&mut self) -> Result<bool, Self::Error> {
        self.pass += 1;
        Ok(self.pass < self.pages)
    }

    fn draw_frame(&mut self, frame: Rectangle) -> Result<(), Self::Error> {
        frame
            .into_styled(PrimitiveStyle::with_stroke(self.color, 1))
            .draw(&mut self.target)
    }

    fn draw_str(&mut self, baseline: Point, text: &str) -> Result<(), Self::Error> {
        let style = MonoTextStyle::new(self.font.font(), self.color);
        Text::with_baseline(text, baseline, style, Baseline::Alphabetic)
            .draw(&mut self.target)
            .map(|_| ())
    }
}
