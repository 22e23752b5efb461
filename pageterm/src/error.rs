use core::fmt;

/// Errors reported by [`Terminal`](crate::Terminal) operations.
///
/// `E` is the error type of the bound [`DisplayDriver`](crate::DisplayDriver).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The terminal has not been initialized, or was deinitialized.
    NotInitialized,
    /// `initialize` was called with a line height of zero.
    ZeroFontHeight,
    /// The display driver failed while drawing.
    Display(E),
}

pub type Result<T, E> = core::result::Result<T, Error<E>>;

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => f.write_str("terminal is not initialized"),
            Error::ZeroFontHeight => f.write_str("font height must be positive"),
            Error::Display(err) => write!(f, "display driver error: {:?}", err),
        }
    }
}
