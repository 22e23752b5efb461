use alloc::{collections::VecDeque, string::String, string::ToString};
use core::fmt::{self, Arguments, Write};

use embedded_graphics_core::{
    geometry::{Point, Size},
    pixelcolor::BinaryColor,
};
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace};

use crate::{
    error::{Error, Result},
    graphics::{DisplayDriver, FontSize},
};

/// Horizontal gap between the frame and the start of each line.
pub const TEXT_INSET: i32 = 2;

/// One printed line, tagged with the font size active when it was printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerminalLine {
    text: String,
    font_size: FontSize,
}

impl TerminalLine {
    pub fn new(text: impl Into<String>, font_size: FontSize) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn height(&self) -> u32 {
        self.font_size.line_height()
    }
}

/// A scrolling text console bound to a rectangular region of a display.
///
/// The terminal keeps the most recent `max_lines` printed lines and renders
/// as many of the newest ones as fit into the region on every [`draw`].
/// It borrows the display for `'d` and never owns it; [`deinitialize`] hands
/// the borrow back.
///
/// [`draw`]: Terminal::draw
/// [`deinitialize`]: Terminal::deinitialize
pub struct Terminal<'d, D> {
    state: State<'d, D>,
    font_size: FontSize,
}

enum State<'d, D> {
    Uninitialized,
    Active(Active<'d, D>),
}

struct Active<'d, D> {
    display: &'d mut D,
    area: Rectangle,
    font_height: u32,
    max_lines: usize,
    buffer: VecDeque<TerminalLine>,
}

impl<'d, D> Terminal<'d, D> {
    pub const fn new() -> Self {
        Self {
            state: State::Uninitialized,
            font_size: FontSize::Small,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    /// The bound region, or a zero rectangle when uninitialized.
    pub fn area(&self) -> Rectangle {
        self.active()
            .map(|active| active.area)
            .unwrap_or_else(|| Rectangle::new(Point::zero(), Size::zero()))
    }

    pub fn font_height(&self) -> u32 {
        self.active().map_or(0, |active| active.font_height)
    }

    pub fn max_lines(&self) -> usize {
        self.active().map_or(0, |active| active.max_lines)
    }

    /// Font size given to lines printed from now on.
    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    /// Buffered lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &TerminalLine> + '_ {
        self.active()
            .into_iter()
            .flat_map(|active| active.buffer.iter())
    }

    pub fn len(&self) -> usize {
        self.active().map_or(0, |active| active.buffer.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The lines [`draw`](Terminal::draw) renders: the longest run of newest
    /// lines whose stacked heights fit the region, oldest first.
    pub fn visible_lines(&self) -> impl Iterator<Item = &TerminalLine> + '_ {
        self.active().into_iter().flat_map(|active| {
            let start = first_visible(&active.buffer, active.area.size.height);
            active.buffer.range(start..)
        })
    }

    pub fn display(&self) -> Option<&D> {
        self.active().map(|active| &*active.display)
    }

    fn active(&self) -> Option<&Active<'d, D>> {
        match &self.state {
            State::Active(active) => Some(active),
            State::Uninitialized => None,
        }
    }
}

impl<'d, D: DisplayDriver> Terminal<'d, D> {
    /// Binds the terminal to `area` of `display` and empties the buffer.
    ///
    /// `font_height` only sizes the buffer (`area.height / font_height`
    /// lines); it does not change the font size of printed lines.
    pub fn initialize(
        &mut self,
        display: &'d mut D,
        area: Rectangle,
        font_height: u32,
    ) -> Result<(), D::Error> {
        if font_height == 0 {
            return Err(Error::ZeroFontHeight);
        }

        let max_lines = (area.size.height / font_height) as usize;
        debug!(
            "terminal bound to {:?}, {} px lines, {} lines max",
            area, font_height, max_lines
        );

        self.state = State::Active(Active {
            display,
            area,
            font_height,
            max_lines,
            buffer: VecDeque::new(),
        });
        Ok(())
    }

    /// Drops the buffer, resets every setting and returns the display borrow.
    ///
    /// Calling this on an uninitialized terminal does nothing.
    pub fn deinitialize(&mut self) -> Option<&'d mut D> {
        self.font_size = FontSize::default();
        match core::mem::replace(&mut self.state, State::Uninitialized) {
            State::Active(active) => {
                debug!("terminal released {:?}", active.area);
                Some(active.display)
            }
            State::Uninitialized => None,
        }
    }

    pub fn clear(&mut self) -> Result<(), D::Error> {
        self.active_mut()?.buffer.clear();
        Ok(())
    }

    /// Changes the font size of subsequently printed lines.
    ///
    /// `size` is clamped to `1..=4`. The line height of the new size becomes
    /// the terminal's font height and the capacity is recomputed from it.
    /// Lines already in the buffer keep their size; if the capacity shrinks,
    /// the excess is dropped by the next [`print`](Terminal::print).
    pub fn set_font_size(&mut self, size: u8) -> Result<(), D::Error> {
        let font_size = FontSize::clamped(size);
        let active = self.active_mut()?;

        active.font_height = font_size.line_height();
        active.max_lines = (active.area.size.height / active.font_height) as usize;
        self.font_size = font_size;

        debug!("terminal font size {:?}", font_size);
        Ok(())
    }

    /// Appends `message`, one line per `'\n'` separated segment.
    ///
    /// A message with `k` line feeds always yields `k + 1` lines, so a
    /// trailing line feed appends an empty line. Lines wider than the region
    /// are kept whole. Afterwards the oldest lines are dropped until the
    /// buffer fits `max_lines`.
    pub fn print(&mut self, message: &str) -> Result<(), D::Error> {
        let font_size = self.font_size;
        let active = self.active_mut()?;

        active.buffer.extend(
            message
                .split('\n')
                .map(|segment| TerminalLine::new(segment, font_size)),
        );

        let excess = active.buffer.len().saturating_sub(active.max_lines);
        if excess > 0 {
            active.buffer.drain(..excess);
            trace!("evicted {} line(s)", excess);
        }
        Ok(())
    }

    /// Formats `args` and prints the result as a single message.
    pub fn print_fmt(&mut self, args: Arguments<'_>) -> Result<(), D::Error> {
        match args.as_str() {
            Some(message) => self.print(message),
            None => self.print(&args.to_string()),
        }
    }

    /// Renders the frame and the visible lines through the display's page
    /// loop. The terminal itself is left untouched.
    pub fn draw(&mut self) -> Result<(), D::Error> {
        let active = self.active_mut()?;
        let start = first_visible(&active.buffer, active.area.size.height);
        trace!(
            "drawing {} of {} line(s)",
            active.buffer.len() - start,
            active.buffer.len()
        );

        let display = &mut *active.display;
        display.set_draw_color(BinaryColor::On);
        display.first_page().map_err(Error::Display)?;
        loop {
            render_page(display, active.area, active.buffer.range(start..))
                .map_err(Error::Display)?;
            if !display.next_page().map_err(Error::Display)? {
                break;
            }
        }
        Ok(())
    }

    fn active_mut(&mut self) -> Result<&mut Active<'d, D>, D::Error> {
        match &mut self.state {
            State::Active(active) => Ok(active),
            State::Uninitialized => Err(Error::NotInitialized),
        }
    }
}

impl<'d, D> Default for Terminal<'d, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d, D> fmt::Debug for Terminal<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("initialized", &self.is_initialized())
            .field("area", &self.area())
            .field("font_height", &self.font_height())
            .field("max_lines", &self.max_lines())
            .field("font_size", &self.font_size)
            .field("lines", &self.len())
            .finish()
    }
}

impl<'d, D: DisplayDriver> Write for Terminal<'d, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }

    fn write_fmt(&mut self, args: Arguments<'_>) -> fmt::Result {
        self.print_fmt(args).map_err(|_| fmt::Error)
    }
}

/// Index of the oldest line of the longest trailing run that fits `height`.
fn first_visible(buffer: &VecDeque<TerminalLine>, height: u32) -> usize {
    let mut total = 0u32;
    let mut start = buffer.len();
    for line in buffer.iter().rev() {
        let line_height = line.height();
        if total + line_height > height {
            break;
        }
        total += line_height;
        start -= 1;
    }
    start
}

fn render_page<'a, D: DisplayDriver>(
    display: &mut D,
    area: Rectangle,
    lines: impl Iterator<Item = &'a TerminalLine>,
) -> core::result::Result<(), D::Error> {
    display.draw_frame(area)?;

    let mut cursor = area.top_left.y;
    for line in lines {
        display.set_font(line.font_size());
        cursor += line.height() as i32;
        display.draw_str(
            Point::new(area.top_left.x + TEXT_INSET, cursor),
            line.text(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts draw calls and records the strings, nothing else.
    #[derive(Default)]
    struct Counter {
        passes: u32,
        strings: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl DisplayDriver for Counter {
        type Error = &'static str;

        fn set_draw_color(&mut self, _: BinaryColor) {}

        fn set_font(&mut self, _: FontSize) {}

        fn first_page(&mut self) -> core::result::Result<(), Self::Error> {
            Ok(())
        }

        fn next_page(&mut self) -> core::result::Result<bool, Self::Error> {
            self.passes += 1;
            Ok(false)
        }

        fn draw_frame(&mut self, _: Rectangle) -> core::result::Result<(), Self::Error> {
            Ok(())
        }

        fn draw_str(&mut self, _: Point, text: &str) -> core::result::Result<(), Self::Error> {
            if self.fail_on == Some(text) {
                return Err("bus error");
            }
            self.strings.push(text.to_string());
            Ok(())
        }
    }

    fn area(height: u32) -> Rectangle {
        Rectangle::new(Point::new(0, 0), Size::new(128, height))
    }

    fn texts<D>(term: &Terminal<'_, D>) -> Vec<String> {
        term.lines().map(|line| line.text().to_string()).collect()
    }

    #[test]
    fn print_splits_on_line_feeds() {
        let mut display = Counter::default();
        let mut term = Terminal::new();
        term.initialize(&mut display, area(64), 12).unwrap();

        term.print("a\nb\nc").unwrap();
        assert_eq!(texts(&term), ["a", "b", "c"]);
        assert!(term.lines().all(|line| line.font_size() == FontSize::Small));

        term.clear().unwrap();
        term.print("a\n").unwrap();
        assert_eq!(texts(&term), ["a", ""]);

        term.clear().unwrap();
        term.print("").unwrap();
        assert_eq!(texts(&term), [""]);
    }

    #[test]
    fn eviction_keeps_newest_lines() {
        let mut display = Counter::default();
        let mut term = Terminal::new();
        term.initialize(&mut display, area(36), 12).unwrap();
        assert_eq!(term.max_lines(), 3);

        for n in 0..5 {
            term.print(&n.to_string()).unwrap();
        }
        assert_eq!(texts(&term), ["2", "3", "4"]);

        term.print("x\ny\nz\nw").unwrap();
        assert_eq!(texts(&term), ["y", "z", "w"]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut display = Counter::default();
        let mut term = Terminal::new();
        term.initialize(&mut display, area(11), 12).unwrap();
        assert_eq!(term.max_lines(), 0);

        term.print("lost").unwrap();
        assert!(term.is_empty());
    }

    #[test]
    fn font_size_changes_capacity_and_tags_new_lines() {
        let mut display = Counter::default();
        let mut term = Terminal::new();
        term.initialize(&mut display, area(64), 8).unwrap();
        assert_eq!(term.max_lines(), 8);

        term.print("small").unwrap();
        term.set_font_size(2).unwrap();
        assert_eq!(term.font_height(), 13);
        assert_eq!(term.max_lines(), 64 / 13);

        term.print("medium").unwrap();
        let sizes: Vec<FontSize> = term.lines().map(TerminalLine::font_size).collect();
        assert_eq!(sizes, [FontSize::Small, FontSize::Medium]);
    }

    #[test]
    fn set_font_size_clamps() {
        let mut display = Counter::default();
        let mut term = Terminal::new();
        term.initialize(&mut display, area(60), 12).unwrap();

        term.set_font_size(0).unwrap();
        assert_eq!(term.font_size(), FontSize::Small);
        assert_eq!((term.font_height(), term.max_lines()), (12, 5));

        term.set_font_size(9).unwrap();
        assert_eq!(term.font_size(), FontSize::Huge);
        assert_eq!((term.font_height(), term.max_lines()), (20, 3));
    }

    #[test]
    fn uninitialized_operations_fail() {
        let mut term: Terminal<'_, Counter> = Terminal::new();

        assert_eq!(term.print("a"), Err(Error::NotInitialized));
        assert_eq!(term.clear(), Err(Error::NotInitialized));
        assert_eq!(term.set_font_size(2), Err(Error::NotInitialized));
        assert_eq!(term.draw(), Err(Error::NotInitialized));
        assert_eq!(term.font_size(), FontSize::Small);
        assert!(term.is_empty());
    }

    #[test]
    fn zero_font_height_is_rejected() {
        let mut display = Counter::default();
        let mut term = Terminal::new();

        assert_eq!(
            term.initialize(&mut display, area(64), 0),
            Err(Error::ZeroFontHeight)
        );
        assert!(!term.is_initialized());
    }

    #[test]
    fn deinitialize_resets_everything() {
        let mut display = Counter::default();
        let mut term = Terminal::new();
        let region = Rectangle::new(Point::new(3, 4), Size::new(100, 50));
        term.initialize(&mut display, region, 10).unwrap();
        term.set_font_size(3).unwrap();
        term.print("a\nb").unwrap();

        assert!(term.deinitialize().is_some());
        assert_eq!(term.area(), Rectangle::new(Point::zero(), Size::zero()));
        assert_eq!(term.font_height(), 0);
        assert_eq!(term.max_lines(), 0);
        assert_eq!(term.font_size(), FontSize::Small);
        assert!(term.is_empty());

        assert!(term.deinitialize().is_none());
        assert!(!term.is_initialized());
    }

    #[test]
    fn reinitialize_rebinds_and_keeps_font_size() {
        let mut first = Counter::default();
        let mut second = Counter::default();
        let mut term = Terminal::new();
        term.initialize(&mut first, area(64), 12).unwrap();
        term.set_font_size(4).unwrap();
        term.print("old").unwrap();

        term.initialize(&mut second, area(48), 12).unwrap();
        assert_eq!(term.font_size(), FontSize::Huge);
        assert_eq!(term.font_height(), 12);
        assert_eq!(term.max_lines(), 4);
        assert!(term.is_empty());

        term.print("new").unwrap();
        term.draw().unwrap();
        drop(term);
        assert!(first.strings.is_empty());
        assert_eq!(second.strings, ["new"]);
    }

    #[test]
    fn write_macros_print_whole_messages() {
        let mut display = Counter::default();
        let mut term = Terminal::new();
        term.initialize(&mut display, area(64), 12).unwrap();

        write!(term, "{} + {} = {}", 1, 2, 3).unwrap();
        writeln!(term, "done").unwrap();
        assert_eq!(texts(&term), ["1 + 2 = 3", "done", ""]);
    }

    #[test]
    fn driver_errors_abort_the_draw() {
        let mut display = Counter {
            fail_on: Some("bad"),
            ..Counter::default()
        };
        let mut term = Terminal::new();
        term.initialize(&mut display, area(64), 12).unwrap();
        term.print("good\nbad\nnever").unwrap();

        assert_eq!(term.draw(), Err(Error::Display("bus error")));
        let display = term.display().unwrap();
        assert_eq!(display.strings, ["good"]);
        assert_eq!(display.passes, 0);
    }

    #[test]
    fn first_visible_stops_at_first_misfit() {
        let buffer: VecDeque<TerminalLine> = [FontSize::Small, FontSize::Medium, FontSize::Huge]
            .into_iter()
            .map(|size| TerminalLine::new("", size))
            .collect();

        assert_eq!(first_visible(&buffer, 30), 2);
        assert_eq!(first_visible(&buffer, 33), 1);
        assert_eq!(first_visible(&buffer, 45), 0);
        assert_eq!(first_visible(&buffer, 19), 3);
    }
}
