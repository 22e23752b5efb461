//! A scrolling text console for monochrome displays.
//!
//! A [`Terminal`] keeps a bounded history of printed lines and renders the
//! newest ones that fit into a framed region of a display on every
//! [`draw`](Terminal::draw). Lines are split on `'\n'` only; the oldest lines
//! are dropped once the region's line capacity is exceeded. Each line
//! remembers the [`FontSize`] it was printed with, so histories with mixed
//! sizes render correctly.
//!
//! Drawing goes through the [`DisplayDriver`] trait. [`PagedTarget`] provides
//! it for any `embedded-graphics` [`DrawTarget`] with [`BinaryColor`] pixels.
//!
//! [`DrawTarget`]: embedded_graphics_core::draw_target::DrawTarget
//! [`BinaryColor`]: embedded_graphics_core::pixelcolor::BinaryColor

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod data;
pub mod diag;
pub mod error;
pub mod graphics;
pub mod terminal;

pub use error::{Error, Result};
pub use graphics::{DisplayDriver, FontMetrics, FontSize, PagedTarget};
pub use terminal::{Terminal, TerminalLine, TEXT_INSET};
