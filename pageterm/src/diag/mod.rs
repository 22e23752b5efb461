pub mod logger;

pub use logger::TerminalLogger;
