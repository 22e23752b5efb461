#![allow(dead_code)]

use std::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{Point, Size},
    primitives::Rectangle,
};
use pageterm::{DisplayDriver, FontSize};

/// One call made on a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DrawColor(BinaryColor),
    FirstPage,
    NextPage,
    Frame(Rectangle),
    Font(FontSize),
    Str(Point, String),
}

/// A display driver that records every call and repeats each frame `pages`
/// times.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    pub pages: u32,
    pass: u32,
}

impl Recorder {
    pub fn with_pages(pages: u32) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Strings drawn, in call order.
    pub fn strings(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Str(_, text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DisplayDriver for Recorder {
    type Error = Infallible;

    fn set_draw_color(&mut self, color: BinaryColor) {
        self.calls.push(Call::DrawColor(color));
    }

    fn set_font(&mut self, size: FontSize) {
        self.calls.push(Call::Font(size));
    }

    fn first_page(&mut self) -> Result<(), Infallible> {
        self.pass = 0;
        self.calls.push(Call::FirstPage);
        Ok(())
    }

    fn next_page(&mut self) -> Result<bool, Infallible> {
        self.pass += 1;
        self.calls.push(Call::NextPage);
        Ok(self.pass < self.pages.max(1))
    }

    fn draw_frame(&mut self, frame: Rectangle) -> Result<(), Infallible> {
        self.calls.push(Call::Frame(frame));
        Ok(())
    }

    fn draw_str(&mut self, baseline: Point, text: &str) -> Result<(), Infallible> {
        self.calls.push(Call::Str(baseline, text.to_string()));
        Ok(())
    }
}

pub fn region(x: i32, y: i32, width: u32, height: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(width, height))
}
