use std::{error::Error, fmt::Write};

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};
use log::{info, warn, LevelFilter, Log};
use pageterm::{
    data::CrateMutex,
    diag::{logger, TerminalLogger},
    PagedTarget, Terminal,
};

mod ascii;

use ascii::AsciiDisplay;

type Result = std::result::Result<(), Box<dyn Error>>;

static LOGGER: CrateMutex<TerminalLogger<'static, PagedTarget<AsciiDisplay>>> =
    CrateMutex::new(TerminalLogger::new());

fn main() -> Result {
    log_panel()?;
    mixed_sizes_panel()?;
    Ok(())
}

/// Routes `log` records into a terminal covering a whole panel.
fn log_panel() -> Result {
    let display = Box::leak(Box::new(PagedTarget::new(AsciiDisplay::new())));
    LOGGER
        .lock()
        .terminal_mut()
        .initialize(display, Rectangle::new(Point::zero(), AsciiDisplay::SIZE), 12)
        .map_err(|err| err.to_string())?;
    logger::init(&LOGGER, LevelFilter::Info).map_err(|err| err.to_string())?;

    for step in 1..=3 {
        info!("boot step {}", step);
    }
    warn!("sensor offline\nretrying");
    info!("ready");
    LOGGER.flush();

    if let Some(display) = LOGGER.lock().terminal().display() {
        println!("{}", display.target());
    }
    Ok(())
}

/// Two font sizes on the lower half of a panel.
fn mixed_sizes_panel() -> Result {
    let mut display = PagedTarget::with_pages(AsciiDisplay::new(), 4);
    let mut term = Terminal::new();
    term.initialize(
        &mut display,
        Rectangle::new(Point::new(0, 24), Size::new(AsciiDisplay::SIZE.width, 40)),
        12,
    )
    .map_err(|err| err.to_string())?;

    term.set_font_size(2).map_err(|err| err.to_string())?;
    write!(term, "temp {:>3} C", 21)?;
    term.set_font_size(1).map_err(|err| err.to_string())?;
    write!(term, "humidity {}%", 40)?;
    term.draw().map_err(|err| err.to_string())?;

    drop(term);
    println!("{}", display.target());
    Ok(())
}
