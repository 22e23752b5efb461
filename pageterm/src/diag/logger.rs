use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{data::CrateMutex, error::Result, graphics::DisplayDriver, terminal::Terminal};

/// A [`Log`] sink that prints records into its own [`Terminal`].
///
/// Install it through a `static` [`CrateMutex`] with [`init`], then bind the
/// terminal to a display with [`terminal_mut`](TerminalLogger::terminal_mut).
/// Records arriving before that are discarded. [`Log::flush`] redraws the
/// terminal.
pub struct TerminalLogger<'d, D> {
    term: Terminal<'d, D>,
}

impl<D: DisplayDriver + Send> Log for CrateMutex<TerminalLogger<'static, D>> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // The terminal logs while printing; those records find the sink
        // locked and are dropped.
        if let Some(mut logger) = self.try_lock() {
            let _ = logger.log_record(record);
        }
    }

    fn flush(&self) {
        if let Some(mut logger) = self.try_lock() {
            let _ = logger.term.draw();
        }
    }
}

impl<'d, D> TerminalLogger<'d, D> {
    pub const fn new() -> Self {
        Self {
            term: Terminal::new(),
        }
    }

    pub fn terminal(&self) -> &Terminal<'d, D> {
        &self.term
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<'d, D> {
        &mut self.term
    }
}

impl<'d, D: DisplayDriver> TerminalLogger<'d, D> {
    /// Prints `record` as `[L] message`, `L` being the level's initial.
    pub fn log_record(&mut self, record: &Record) -> Result<(), D::Error> {
        self.term.print_fmt(format_args!(
            "[{}] {}",
            level_tag(record.level()),
            record.args()
        ))
    }
}

impl<'d, D> Default for TerminalLogger<'d, D> {
    fn default() -> Self {
        Self::new()
    }
}

fn level_tag(level: Level) -> char {
    match level {
        Level::Error => 'E',
        Level::Warn => 'W',
        Level::Info => 'I',
        Level::Debug => 'D',
        Level::Trace => 'T',
    }
}

/// Installs `sink` as the global logger.
pub fn init<D>(
    sink: &'static CrateMutex<TerminalLogger<'static, D>>,
    level: LevelFilter,
) -> core::result::Result<(), SetLoggerError>
where
    D: DisplayDriver + Send + 'static,
{
    log::set_logger(sink)?;
    log::set_max_level(level);
    Ok(())
}
